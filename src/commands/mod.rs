mod convert;
mod resolve;

use clap::Subcommand;
pub use convert::*;
pub use resolve::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download or open an image or GIF, resize it, and save it to the output
    /// directory as converted.png or converted.gif. Tenor share-page URLs are
    /// resolved to the GIF they show.
    Convert(ConvertOptions),

    /// Print the media URL or path a source resolves to, without downloading
    /// or converting anything.
    Resolve(ResolveOptions),
}
