use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, anyhow};
use gifdec::de::Gif;
use image::{ImageFormat, RgbaImage};
use tracing::info;

use crate::commands::Run;

#[derive(Debug, Clone, clap::Args)]
pub struct Extract {
    #[clap(help = "Path to the GIF file")]
    input: PathBuf,

    #[clap(short, long, default_value = "frames", help = "Output directory")]
    output: PathBuf,
}

impl Run for Extract {
    fn run(&self) -> anyhow::Result<()> {
        let gif = Gif::open(&self.input).context("failed to decode GIF file")?;

        fs::create_dir_all(&self.output).context("failed to create output directory")?;
        info!("created directory: {:#}", self.output.display());

        for (i, frame) in gif.frames().iter().enumerate() {
            let image = RgbaImage::from_raw(
                u32::from(frame.width()),
                u32::from(frame.height()),
                frame.to_rgba(),
            )
            .ok_or_else(|| anyhow!("frame {i} pixel data does not match its dimensions"))?;

            let path = self.output.join(format!("{i:0>2}.png"));
            image
                .save_with_format(&path, ImageFormat::Png)
                .context("failed to write frame image")?;
            info!("created file: {:#}", path.display());
        }

        println!(
            "extracted {} frames to {:#}",
            gif.frames().len(),
            self.output.display(),
        );

        Ok(())
    }
}
