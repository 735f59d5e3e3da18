//! Fertility prognosis command-line entry point.
//!
//! Reads a `ClinicalInput` JSON document from a file (or stdin) and prints
//! the report as JSON on stdout.
//!
//! ```text
//! fertility-prognosis [INPUT.json | -] [--simulate <factor> [label]] [--simulate-all]
//! ```

use std::io::Read;

use anyhow::{bail, Context, Result};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fertility_prognosis::adapters::redact::RedactingMakeWriter;
use fertility_prognosis::PrognosisService;

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    simulate: Option<(String, String)>,
    simulate_all: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1).peekable();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--simulate" => {
                let Some(factor) = iter.next() else {
                    bail!("--simulate requires a factor name");
                };
                let label = match iter.peek() {
                    Some(next) if !next.starts_with("--") => iter.next().unwrap_or_default(),
                    _ => String::new(),
                };
                args.simulate = Some((factor, label));
            }
            "--simulate-all" => args.simulate_all = true,
            "-h" | "--help" => {
                println!(
                    "usage: fertility-prognosis [INPUT.json | -] [--simulate <factor> [label]] [--simulate-all]"
                );
                std::process::exit(0);
            }
            other if args.input.is_none() => args.input = Some(other.to_string()),
            other => bail!("unexpected argument {other:?}"),
        }
    }

    Ok(args)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading input from stdin")?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {path}")),
    }
}

fn main() -> Result<()> {
    // stdout carries the JSON result, so logs go to stderr unless a file is
    // requested.
    let log_mode = std::env::var("FERTILITY_LOG_MODE").unwrap_or_else(|_| "stderr".to_string());

    let (writer, _guard) = if log_mode == "file" {
        let log_file = std::env::var("FERTILITY_LOG_FILE")
            .unwrap_or_else(|_| "fertility-prognosis.log".to_string());

        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(RedactingMakeWriter::new(writer)))
        .init();

    let args = parse_args()?;
    let raw = read_input(args.input.as_deref())?;

    let service = PrognosisService::from_env();
    let evaluation = service.evaluate_json(&raw)?;

    let mut output = json!({ "report": evaluation.report });

    if let Some((factor, label)) = &args.simulate {
        let result = service.simulate_factor_by_key(&evaluation, factor, label)?;
        output["simulation"] = serde_json::to_value(result)?;
    }

    if args.simulate_all {
        if !service.can_simulate_all(&evaluation) {
            tracing::warn!("Fewer than two sub-optimal factors; simulating all anyway");
        }
        let result = service.simulate_all_improvements(&evaluation);
        output["simulateAll"] = serde_json::to_value(result)?;
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
