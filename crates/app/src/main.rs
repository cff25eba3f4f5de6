//! Blend Feed - operator command line
//!
//! Run with: `blendfeed <command>`
//!
//! Command output goes to stdout; diagnostics go through `tracing` to
//! stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use blendfeed_lib::utils::logging::{error_label, init_logging};
use blendfeed_lib::{
    connection_status, field_map_schema, list_applications, submit_entry, AppContext,
};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("Could not load .env file: {err}");
        }
    }
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("status") => run_status().await,
        Some("applications") => run_applications().await,
        Some("submit") => run_submit(&args[1..]).await,
        Some("schema") => run_schema(),
        Some("help") | None => {
            print_help();
            Ok(true)
        }
        Some(unknown) => {
            eprintln!("Unknown command: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow!("Unknown command"))
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Command failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Blend Feed");
    println!();
    println!("USAGE:");
    println!("    blendfeed <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    status                         Check the Blend API credentials");
    println!("    applications                   List applications visible to the tenant");
    println!("    submit <entry.json> [feed]     Send one form entry through a feed");
    println!("    schema                         Print the default field-map schema");
    println!("    help                           Show this help message");
    println!();
    println!("Configuration comes from BLEND_* environment variables, a .env file,");
    println!("BLENDFEED_CONFIG, or ./blendfeed.{{json,toml}}.");
}

fn context() -> anyhow::Result<AppContext> {
    AppContext::new()
        .map_err(|e| {
            error!(error_kind = error_label(&e), error = %e, "Failed to build application context");
            e
        })
        .context("failed to load configuration")
}

async fn run_status() -> anyhow::Result<bool> {
    let ctx = context()?;
    println!("{}", connection_status(&ctx).await?);
    Ok(true)
}

async fn run_applications() -> anyhow::Result<bool> {
    let ctx = context()?;
    println!("{}", list_applications(&ctx).await?);
    Ok(true)
}

async fn run_submit(args: &[String]) -> anyhow::Result<bool> {
    let entry = args
        .first()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: blendfeed submit <entry.json> [feed]"))?;
    let feed = args.get(1).map(String::as_str);

    let ctx = context()?;
    let report = submit_entry(&ctx, &entry, feed)
        .await
        .with_context(|| format!("failed to submit {}", entry.display()))?;
    println!("{report}");
    Ok(report.outcome.is_success())
}

fn run_schema() -> anyhow::Result<bool> {
    println!("{}", field_map_schema()?);
    Ok(true)
}
