mod extract;
mod info;

pub trait Run {
    fn run(&self) -> anyhow::Result<()>;
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    /// Print the header, loop count, comments and per-frame metadata.
    Info(info::Info),

    /// Write every frame to a numbered PNG file.
    Extract(extract::Extract),
}

impl Subcommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let handler: &dyn Run = match *self {
            Self::Info(ref inner) => inner,
            Self::Extract(ref inner) => inner,
        };

        handler.run()
    }
}
