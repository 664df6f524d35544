use crate::tools::batch::batch;
use crate::tools::extract::{fetch_capture, fetch_json};
use crate::tools::fetch::fetch_body;
use crate::types::{FetchConfig, FetchOptions};
use crate::{runtime, targets};
use anyhow::{anyhow, Context as _};
use clap::{ArgAction, Args, Parser, Subcommand};
use regex::Regex;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "getbody",
    version,
    about = "Fetch a page and print its body, its JSON, or one regex capture"
)]
pub struct Cli {
    /// More diagnostics on stderr (-v warnings, -vv info, -vvv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON config file (e.g. {"response_encoding": "latin1"})
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Response encoding, overrides the config file
    #[arg(long, global = true)]
    encoding: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the response body
    Body { url: String },
    /// Print the response body decoded as JSON
    Json { url: String },
    /// Print capture group 1 of the first match of PATTERN
    Capture { url: String, pattern: String },
    /// Print the current version of one or more named targets
    Latest(LatestArgs),
}

#[derive(Args)]
struct LatestArgs {
    /// angular | node | ruby
    targets: Vec<String>,
    #[arg(long, default_value_t = 4)]
    concurrency: usize,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = match build_options(cli.config.as_deref(), cli.encoding.as_deref()) {
        Ok(options) => options,
        Err(e) => return fail(&e),
    };

    match cli.cmd {
        Command::Body { url } => {
            let res = runtime::block_on(fetch_body(&url, &options)).map_err(anyhow::Error::from);
            record("body", &url, &res);
            finish(res)
        }
        Command::Json { url } => {
            let res = runtime::block_on(fetch_json(&url, &options))
                .map_err(anyhow::Error::from)
                .and_then(|value| Ok(serde_json::to_string_pretty(&value)?));
            record("json", &url, &res);
            finish(res)
        }
        Command::Capture { url, pattern } => {
            let res = capture(&url, &pattern, &options);
            record("capture", &url, &res);
            finish(res)
        }
        Command::Latest(args) => latest(args, options),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = format!("getbody={level}");

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_options(
    config: Option<&std::path::Path>,
    encoding: Option<&str>,
) -> anyhow::Result<FetchOptions> {
    let config = match config {
        Some(path) => FetchConfig::load(path)?,
        None => FetchConfig::default(),
    };
    let options = FetchOptions::new().with_config(config);
    let options = match encoding {
        Some(label) => options.with_encoding(label),
        None => options,
    };
    // Surface a bad label before any request
    options.config.encoding()?;
    Ok(options)
}

fn capture(url: &str, pattern: &str, options: &FetchOptions) -> anyhow::Result<String> {
    let pattern = Regex::new(pattern).with_context(|| format!("invalid pattern {pattern:?}"))?;
    let text = runtime::block_on(fetch_capture(url, &pattern, options))?;
    non_empty(text)
}

fn non_empty(text: String) -> anyhow::Result<String> {
    if text.is_empty() {
        return Err(anyhow!("result is empty"));
    }
    Ok(text)
}

fn latest(args: LatestArgs, options: FetchOptions) -> ExitCode {
    let mut selected = Vec::new();
    for name in &args.targets {
        match targets::find(name) {
            Some(target) => selected.push(target),
            None => {
                eprintln!("{}", targets::usage());
                return ExitCode::FAILURE;
            }
        }
    }
    if selected.is_empty() {
        eprintln!("{}", targets::usage());
        return ExitCode::FAILURE;
    }

    let items: Vec<_> = selected.into_iter().enumerate().collect();
    let mut results = runtime::block_on(batch(items, args.concurrency, move |(idx, target)| {
        let options = options.clone();
        async move {
            let res = target.latest_version(&options).await.and_then(non_empty);
            (idx, target, res)
        }
    }));
    results.sort_by_key(|(idx, _, _)| *idx);

    let mut status = ExitCode::SUCCESS;
    for (_, target, res) in results {
        record("latest", target.name, &res);
        match res {
            Ok(version) => println!("{}: {}", target.name, version),
            Err(e) => {
                eprintln!("{}: Error: {e:#}", target.name);
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}

/// Outcome of one command, as a diagnostic only.
fn record(command: &str, subject: &str, res: &anyhow::Result<String>) {
    match res {
        Ok(text) => info!(command, subject, bytes = text.len(), "done"),
        Err(e) => warn!(command, subject, error = %format!("{e:#}"), "failed"),
    }
}

fn finish(res: anyhow::Result<String>) -> ExitCode {
    match res {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &anyhow::Error) -> ExitCode {
    eprintln!("Error: {e:#}");
    ExitCode::FAILURE
}
