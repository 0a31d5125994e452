use clap::Args;

use crate::{
    config::Settings, converter::Converter, fetch::HttpClient, options::Global,
};

#[derive(Debug, Args)]
pub struct ResolveOptions {
    /// A local path, an image URL, or a Tenor share-page URL.
    pub source: String,
}

pub fn resolve(global: Global, options: ResolveOptions) -> anyhow::Result<()> {
    let settings = Settings::load(&global)?;
    let client = HttpClient::new(&settings.user_agent)?;
    let converter = Converter::new(Box::new(client), &settings);

    let media = converter.resolve(options.source.trim())?;
    println!("{}", media);

    Ok(())
}
