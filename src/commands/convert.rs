use std::io::{self, BufRead, Write};

use anyhow::bail;
use clap::Args;
use log::debug;

use crate::{
    config::Settings, converter::Converter, fetch::HttpClient, options::Global,
};

const PROMPT: &str = "Enter image/GIF path or URL: ";

#[derive(Debug, Args)]
pub struct ConvertOptions {
    /// A local path, an image URL, or a Tenor share-page URL. If not
    /// specified, fitgif will ask for one.
    pub source: Option<String>,
}

pub fn convert(global: Global, options: ConvertOptions) -> anyhow::Result<()> {
    let settings = Settings::load(&global)?;

    let source = match options.source {
        Some(source) => source.trim().to_owned(),
        None => prompt_for_source(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let client = HttpClient::new(&settings.user_agent)?;
    let converter = Converter::new(Box::new(client), &settings);

    converter.convert(&source).map_err(|err| {
        debug!("conversion of {} failed ({:?})", source, err.kind());
        err
    })?;

    Ok(())
}

fn prompt_for_source(input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<String> {
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let source = line.trim();
    if source.is_empty() {
        bail!("no image path or URL was entered");
    }

    Ok(source.to_owned())
}
