// src/cli.rs
use std::path::PathBuf;

use crate::config::RunOptions;
use crate::core::HttpTransport;
use crate::error::{Result, ScrapeError};
use crate::scrape::{self, RunSummary};

pub const HELP: &str = "\
Usage: gatt_scrape [-o <file>] [--cache-dir <dir>]

Scrapes the Bluetooth assigned-numbers pages (units, characteristics,
descriptors, services) and writes a static lookup module.

  -o, --out <file>       output module (default: uuids.js)
      --cache-dir <dir>  entity XML cache (default: cache)
  -h, --help             show this help

Log verbosity follows RUST_LOG (default: info).";

/// `None` when help was requested.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Option<RunOptions>> {
    let mut opts = RunOptions::default();
    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "-o" | "--out" => opts.out_path = PathBuf::from(value(&mut args, &a)?),
            "--cache-dir" => opts.cache_dir = PathBuf::from(value(&mut args, &a)?),
            "-h" | "--help" => return Ok(None),
            _ => return Err(ScrapeError::Usage(format!("Unknown arg: {a}\n\n{HELP}"))),
        }
    }
    Ok(Some(opts))
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| ScrapeError::Usage(format!("Missing value for {flag}")))
}

/// One live run with the real HTTP transport.
pub async fn run(opts: RunOptions) -> Result<RunSummary> {
    let transport = HttpTransport::new()?;
    scrape::run(&transport, &opts).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_is_the_default_run() {
        assert_eq!(parse_args(args(&[])).unwrap(), Some(RunOptions::default()));
    }

    #[test]
    fn paths_override_defaults() {
        let opts = parse_args(args(&["-o", "gen/ids.js", "--cache-dir", "/tmp/c"])).unwrap().unwrap();
        assert_eq!(opts.out_path, PathBuf::from("gen/ids.js"));
        assert_eq!(opts.cache_dir, PathBuf::from("/tmp/c"));
    }

    #[test]
    fn help_and_errors() {
        assert_eq!(parse_args(args(&["--help"])).unwrap(), None);
        assert!(parse_args(args(&["--out"])).is_err());
        assert!(parse_args(args(&["--nope"])).is_err());
    }
}
