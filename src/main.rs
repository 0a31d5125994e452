mod commands;
mod config;
mod converter;
mod fetch;
mod media;
mod options;
mod output;
mod resize;
mod tenor;

#[cfg(test)]
mod test_helpers;

use std::{env, panic, process};

use anyhow::Result;
use backtrace::Backtrace;
use clap::Parser;

use crate::commands::Command;
use crate::options::Options;

fn run(options: Options) -> Result<()> {
    match options.command {
        Command::Convert(sub_options) => commands::convert(options.global, sub_options),
        Command::Resolve(sub_options) => commands::resolve(options.global, sub_options),
    }
}

fn main() {
    panic::set_hook(Box::new(|panic_info| {
        // PanicInfo's payload is usually a &'static str or String.
        // See: https://doc.rust-lang.org/beta/std/panic/struct.PanicInfo.html#method.payload
        let message = match panic_info.payload().downcast_ref::<&str>() {
            Some(&message) => message.to_string(),
            None => match panic_info.payload().downcast_ref::<String>() {
                Some(message) => message.clone(),
                None => "<no message>".to_string(),
            },
        };

        eprintln!("fitgif crashed!");
        eprintln!("This is probably a bug in fitgif, not in your image.");
        eprintln!();
        eprintln!("If you can reproduce this crash, try adding the -v, -vv, or -vvv flags.");
        eprintln!("This might give you more information to figure out what went wrong!");
        eprintln!();
        eprintln!("Details: {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!("in file {} on line {}", location.file(), location.line());
        }

        // The backtrace crate doesn't read RUST_BACKTRACE for us.
        let should_backtrace = env::var("RUST_BACKTRACE")
            .map(|var| var == "1")
            .unwrap_or(false);

        if should_backtrace {
            eprintln!("{:?}", Backtrace::new());
        } else {
            eprintln!(
                "note: run with `RUST_BACKTRACE=1` environment variable to display a backtrace."
            );
        }

        process::exit(1);
    }));

    let options = Options::parse();

    let log_filter = match options.global.verbosity {
        0 => "info",
        1 => "info,fitgif=debug",
        2 => "info,fitgif=trace",
        _ => "trace",
    };

    let log_env = env_logger::Env::default().default_filter_or(log_filter);

    env_logger::Builder::from_env(log_env)
        .format_module_path(false)
        .format_timestamp(None)
        // Indent following lines equal to the log level label, like `[ERROR] `
        .format_indent(Some(8))
        .init();

    if let Err(err) = run(options) {
        log::error!("command exited with error {err:?}");
        process::exit(1);
    }
}
