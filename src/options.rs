use std::path::PathBuf;

use clap::Parser;

use crate::commands::Command;
use crate::resize::{parse_size, TargetSize};

#[derive(Debug, Parser)]
#[clap(about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Options {
    #[command(flatten)]
    pub global: Global,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Parser)]
pub struct Global {
    /// Path to a fitgif.toml config file. If not specified, fitgif will look
    /// for fitgif.toml in the current directory.
    #[clap(long, global(true), env("FITGIF_CONFIG"))]
    pub config: Option<PathBuf>,

    /// The size to resize to, in the WxH format. The aspect ratio of the
    /// source is not preserved. Defaults to 600x240.
    #[clap(
        long,
        global(true),
        value_parser(clap::builder::ValueParser::new(parse_size))
    )]
    pub size: Option<TargetSize>,

    /// The directory to save converted images into. Defaults to ~/Downloads.
    #[clap(long, global(true))]
    pub output_dir: Option<PathBuf>,

    /// The User-Agent header to send with every HTTP request.
    #[clap(long, global(true))]
    pub user_agent: Option<String>,

    /// Keep each frame's delay when converting an animation. By default the
    /// output GIF carries no timing information.
    #[clap(long, global(true))]
    pub preserve_delays: bool,

    /// Sets verbosity level. Can be specified multiple times to increase the verbosity
    /// of this program.
    #[clap(long = "verbose", short, global(true), action(clap::ArgAction::Count))]
    pub verbosity: u8,
}
