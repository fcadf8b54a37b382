use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for rollcube")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests, doc and the headless smoke run
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Run the roll update timing bench
    Bench,
    /// Roll the cube in every direction through the CLI
    Smoke,
}

/// Each key is held through a full turn, so every press rolls twice.
const SMOKE_SCRIPT: &str = "+d 4 -d 4 +s 4 -s 4 +a 4 -a 4 +w 4 -w 4";

fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{step} failed");
    }
    Ok(())
}

fn run_fmt() -> Result<()> {
    cargo("fmt check", &["fmt", "--all", "--", "--check"])
}

fn run_clippy() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn run_tests() -> Result<()> {
    cargo("tests", &["test", "--workspace"])
}

fn run_doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}

fn run_bench() -> Result<()> {
    cargo(
        "bench",
        &["bench", "-p", "rollcube-kernel", "--bench", "bench_roll_update"],
    )
}

fn run_smoke() -> Result<()> {
    cargo(
        "smoke run",
        &[
            "run",
            "-p",
            "rollcube-cli",
            "--",
            "simulate",
            "--script",
            SMOKE_SCRIPT,
        ],
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            run_fmt()?;
            run_clippy()?;
            run_tests()?;
            run_doc()?;
            run_smoke()?;
        }
        Commands::Fmt => run_fmt()?,
        Commands::Clippy => run_clippy()?,
        Commands::Test => run_tests()?,
        Commands::Doc => run_doc()?,
        Commands::Bench => run_bench()?,
        Commands::Smoke => run_smoke()?,
    }

    Ok(())
}
