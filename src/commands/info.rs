use std::path::PathBuf;

use anyhow::Context as _;
use gifdec::de::Gif;

use crate::commands::Run;

#[derive(Debug, Clone, clap::Args)]
pub struct Info {
    #[clap(help = "Path to the GIF file")]
    input: PathBuf,
}

impl Run for Info {
    fn run(&self) -> anyhow::Result<()> {
        let gif = Gif::open(&self.input).context("failed to decode GIF file")?;
        let header = gif.header();

        println!(
            "GIF{} {}x{}",
            String::from_utf8_lossy(header.version()),
            header.width(),
            header.height(),
        );
        println!(
            "global color table: {}",
            header
                .global_color_table()
                .map_or_else(|| "none".to_owned(), |table| format!("{} colors", table.len())),
        );

        if let Some(loop_count) = gif.loop_count() {
            match loop_count {
                0 => println!("loops: forever"),
                n => println!("loops: {n}"),
            }
        }

        for comment in gif.comments() {
            println!("comment: {comment}");
        }

        println!("frames: {}", gif.frames().len());
        for (i, frame) in gif.frames().iter().enumerate() {
            println!(
                "  {i:>3}: {}x{} at ({}, {}), delay {} ms, disposal {:?}, transparent {}",
                frame.width(),
                frame.height(),
                frame.left(),
                frame.top(),
                frame.delay_ms(),
                frame.disposal(),
                frame
                    .transparent_index()
                    .map_or_else(|| "none".to_owned(), |index| index.to_string()),
            );
        }

        Ok(())
    }
}
