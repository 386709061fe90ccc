//! SHA-256 Block Benchmark CLI
//!
//! Times the single-block compression function against the `sha2` crate.
//!
//! # Commands
//!
//! - `run` - Reference scenario: 64 × 'a', 100000 iterations (default)
//! - `hash` - Compress one 64-byte block given as hex
//! - `throughput` - Multi-threaded batch throughput
//! - `verify` - Check the known-answer vectors

use std::io::{self, Write};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use sha256_bench::harness::{
    self, known_answers, parse_block_hex, BenchConfig, DEFAULT_ITERATIONS, DEFAULT_MESSAGE_BYTE,
};
use sha256_bench::{compress, Block};

const DEFAULT_BYTE_CHAR: char = DEFAULT_MESSAGE_BYTE as char;

#[derive(Parser)]
#[command(name = "sha256-bench")]
#[command(author = "Cyberia")]
#[command(version = "0.1.0")]
#[command(about = "Single-block SHA-256 compression benchmark")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Time the custom compression function against sha2
    Run {
        /// Number of calls per implementation
        #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: u32,

        /// ASCII byte repeated 64 times to form the message
        #[arg(short, long, default_value_t = DEFAULT_BYTE_CHAR, conflicts_with = "message_hex")]
        byte: char,

        /// Message as 128 hex digits (exactly one block)
        #[arg(long)]
        message_hex: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Skip the per-call digest cross-check
        #[arg(long)]
        no_check: bool,
    },

    /// Compress one 64-byte block and print the digest
    Hash {
        /// Block as 128 hex digits
        #[arg(long)]
        hex: String,
    },

    /// Measure batch throughput across threads
    #[cfg(feature = "parallel")]
    Throughput {
        /// Number of blocks to compress
        #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: u32,

        /// Number of threads to use (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Check the known-answer vectors
    Verify,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run {
            iterations,
            byte,
            message_hex,
            json,
            no_check,
        }) => cmd_run(iterations, byte, message_hex.as_deref(), json, !no_check),
        Some(Commands::Hash { hex }) => cmd_hash(&hex),
        #[cfg(feature = "parallel")]
        Some(Commands::Throughput { iterations, threads }) => cmd_throughput(iterations, threads),
        Some(Commands::Verify) => cmd_verify(),
        None => cmd_run(DEFAULT_ITERATIONS, DEFAULT_BYTE_CHAR, None, false, true),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn message_from_byte(byte: char) -> anyhow::Result<Block> {
    if !byte.is_ascii() {
        bail!("message byte must be ASCII, got {:?}", byte);
    }
    Ok(BenchConfig::filled(byte as u8, 1).message)
}

fn cmd_run(
    iterations: u32,
    byte: char,
    message_hex: Option<&str>,
    json: bool,
    check: bool,
) -> anyhow::Result<()> {
    let config = match message_hex {
        Some(hex_str) => BenchConfig::from_hex(hex_str, iterations)?,
        None => BenchConfig {
            message: message_from_byte(byte)?,
            iterations,
        },
    };

    let mut out = io::stdout().lock();

    if !json {
        writeln!(out, "Running benchmark with {} iterations...", iterations)?;
        out.flush()?;
    }

    let report = harness::run_scenario(&config, check)?;

    if json {
        report.write_json(&mut out)?;
    } else {
        report.write_text(&mut out)?;
    }
    out.flush().context("failed to write report")?;

    Ok(())
}

fn cmd_hash(hex_str: &str) -> anyhow::Result<()> {
    let block = parse_block_hex(hex_str)?;

    let mut out = io::stdout().lock();
    writeln!(out, "{}", hex::encode(compress(&block)))?;
    out.flush()?;
    Ok(())
}

#[cfg(feature = "parallel")]
fn cmd_throughput(iterations: u32, threads: Option<usize>) -> anyhow::Result<()> {
    let threads = threads.unwrap_or_else(num_cpus::get);
    let config = BenchConfig::filled(DEFAULT_MESSAGE_BYTE, iterations);

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "Compressing {} blocks on {} threads...",
        iterations, threads
    )?;
    out.flush()?;

    let timing = harness::measure_batch(&config, threads)?;
    let rate = f64::from(iterations) / timing.total_secs();

    writeln!(out, "\nResults:")?;
    writeln!(out, "  Total blocks: {}", iterations)?;
    writeln!(out, "  Time elapsed: {:.6}s", timing.total_secs())?;
    writeln!(out, "  Throughput: {:.0} blocks/s", rate)?;
    writeln!(
        out,
        "  Throughput: {:.2} MiB/s",
        rate * 64.0 / (1024.0 * 1024.0)
    )?;
    out.flush()?;

    Ok(())
}

fn cmd_verify() -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    let mut failed = 0;

    for answer in known_answers() {
        let got = hex::encode(compress(&answer.block));
        if got == answer.digest_hex {
            writeln!(out, "ok    {}: {}", answer.name, got)?;
        } else {
            writeln!(
                out,
                "FAIL  {}: got {}, expected {}",
                answer.name, got, answer.digest_hex
            )?;
            failed += 1;
        }
    }
    out.flush()?;

    if failed > 0 {
        bail!("{} known-answer vector(s) failed", failed);
    }
    Ok(())
}
