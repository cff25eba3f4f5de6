//! Development automation tasks for the Blend feed workspace.
//!
//! Run with: `cargo run -p xtask -- <command>`
//!
//! This is a CLI tool for developers, so `println!` and `eprintln!` are
//! intentionally used for user-facing output rather than structured logging.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::{Command, ExitCode};

use anyhow::{anyhow, Context};

/// Steps of `ci`, in order.
const CI_STEPS: [(&str, fn() -> anyhow::Result<()>); 4] = [
    ("Checking Rust format", run_fmt),
    ("Running Clippy", run_clippy),
    ("Building docs", run_doc),
    ("Running tests", run_test),
];

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        Some("ci") => run_ci(),
        Some("fmt") => run_fmt(),
        Some("clippy") => run_clippy(),
        Some("doc") => run_doc(),
        Some("test") => run_test(),
        Some("audit") => run_audit(),
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown task: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow!("Unknown task"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Blend Feed Development Tasks");
    println!();
    println!("USAGE:");
    println!("    cargo run -p xtask -- <TASK>");
    println!();
    println!("TASKS:");
    println!("    ci        Run fmt, clippy, doc and test in sequence");
    println!("    fmt       Check Rust code formatting");
    println!("    clippy    Run Clippy lints (warnings are errors)");
    println!("    doc       Build workspace docs without dependencies");
    println!("    test      Run all workspace tests, doctests included");
    println!("    audit     Audit dependencies for security vulnerabilities");
    println!("    help      Show this help message");
}

/// Run all CI checks in sequence
fn run_ci() -> anyhow::Result<()> {
    println!("==> Running CI checks...");

    let total = CI_STEPS.len();
    for (index, (label, step)) in CI_STEPS.iter().enumerate() {
        println!("\n==> Step {}/{total}: {label}...", index + 1);
        step().with_context(|| format!("{label} failed"))?;
    }

    println!("\n✓ All CI checks passed!");
    Ok(())
}

/// Run `cargo <args>`, failing with `failure` on a non-zero exit.
fn cargo(args: &[&str], failure: &str) -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("could not start `cargo {}`", args.join(" ")))?;

    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("{failure}"))
    }
}

/// Whether `cargo <subcommand> --version` runs, i.e. the plugin is installed.
fn cargo_plugin_installed(subcommand: &str) -> bool {
    Command::new("cargo")
        .args([subcommand, "--version"])
        .output()
        .is_ok_and(|output| output.status.success())
}

/// Check Rust code formatting
fn run_fmt() -> anyhow::Result<()> {
    cargo(
        &["fmt", "--all", "--", "--check"],
        "Format check failed. Run 'cargo fmt --all' to fix.",
    )
}

/// Run Clippy lints
fn run_clippy() -> anyhow::Result<()> {
    cargo(
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        "Clippy run failed. See output above.",
    )
}

/// Build docs so broken intra-doc links surface
fn run_doc() -> anyhow::Result<()> {
    cargo(&["doc", "--workspace", "--no-deps"], "Documentation build failed")
}

/// Run all workspace tests
fn run_test() -> anyhow::Result<()> {
    cargo(&["test", "--workspace"], "Tests failed")
}

/// Audit dependencies for security vulnerabilities
fn run_audit() -> anyhow::Result<()> {
    if !cargo_plugin_installed("audit") {
        eprintln!("cargo-audit is not installed.");
        eprintln!("Install it with: cargo install cargo-audit");
        anyhow::bail!("cargo-audit not found");
    }

    cargo(&["audit"], "cargo-audit found vulnerabilities")
}
