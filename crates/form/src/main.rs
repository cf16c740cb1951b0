//! `fieldrules-form` -- validates a submitted form record.
//!
//! Reads one JSON object from the file named by the first argument (or from
//! stdin when no argument is given), checks it against the configured rules
//! and prints the verdict.
//!
//! # Environment variables
//!
//! | Variable                 | Required | Default  | Description                              |
//! |--------------------------|----------|----------|------------------------------------------|
//! | `FIELDRULES_SCHEMA_PATH` | no       | --       | JSON rule schema; built-in `Course` rules otherwise |
//! | `FIELDRULES_TYPE`        | no       | `Course` | Type key the record is validated as      |
//! | `FIELDRULES_REPORT`      | no       | `false`  | List every violation                     |
//!
//! Exit status is `0` for a valid record, `1` for an invalid one and `2`
//! when the handler could not be set up or the input could not be read.

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fieldrules_form::config::FormConfig;
use fieldrules_form::submit::FormHandler;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fieldrules_form=info,fieldrules_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = ?e, "Form submission failed");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<bool> {
    let config = FormConfig::from_env();
    tracing::info!(
        type_key = %config.type_key,
        schema = ?config.schema_path,
        report = config.report,
        "Loaded form configuration",
    );

    let handler = FormHandler::from_config(&config).context("failed to build rule registry")?;

    let input = read_input().context("failed to read submitted record")?;
    let report = handler.submit(&input)?;

    println!("{}", handler.render(&report));
    Ok(report.is_valid())
}

fn read_input() -> anyhow::Result<String> {
    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("cannot read {path}"))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
