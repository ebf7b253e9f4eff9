//! HashCash proof-of-work CLI
//!
//! # Commands
//!
//! - `prove` - Search for a nonce satisfying a difficulty
//! - `verify` - Check a prefix/difficulty/nonce triple
//! - `benchmark` - Measure digest throughput

use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};

use hashcash_core::{sha1_hex, verify, CancelToken, Search};

#[derive(Parser)]
#[command(name = "hashcash")]
#[command(version)]
#[command(about = "HashCash-style proof-of-work prover and verifier")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a nonce whose digest has the required leading zero bits
    Prove {
        /// Service prefix the nonce is bound to
        #[arg(long)]
        prefix: String,

        /// Required leading zero bits; expected work doubles per bit
        #[arg(long)]
        difficulty: u32,

        /// Number of worker threads (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Verify a previously found nonce
    Verify {
        /// Service prefix the nonce is bound to
        #[arg(long)]
        prefix: String,

        /// Required leading zero bits
        #[arg(long)]
        difficulty: u32,

        /// Nonce as lowercase hex, exactly as returned by `prove`
        #[arg(long)]
        nonce: String,
    },

    /// Measure digest throughput on this machine
    Benchmark {
        /// Number of digests to compute
        #[arg(short, long, default_value = "1000000")]
        count: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Prove {
            prefix,
            difficulty,
            threads,
        } => cmd_prove(&prefix, difficulty, threads),
        Commands::Verify {
            prefix,
            difficulty,
            nonce,
        } => cmd_verify(&prefix, difficulty, &nonce),
        Commands::Benchmark { count } => cmd_benchmark(count),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_prove(prefix: &str, difficulty: u32, threads: Option<usize>) -> anyhow::Result<()> {
    let workers = threads.unwrap_or_else(num_cpus::get);

    println!("Searching...");
    println!("Prefix: {}", prefix);
    println!("Difficulty: {} bits", difficulty);
    println!("Threads: {}", workers);

    let solution = Search::new(prefix, difficulty)
        .workers(workers)
        .on_progress(Duration::from_secs(5), |progress| {
            let hashrate = progress.attempts as f64 / progress.elapsed.as_secs_f64();
            println!(
                "Hashrate: {:.2} H/s | Hashes: {} | Time: {:.0}s",
                hashrate,
                progress.attempts,
                progress.elapsed.as_secs_f64()
            );
        })
        .run(&CancelToken::new())?;

    println!("\nFound valid nonce!");
    println!("Nonce: {}", solution.nonce);
    println!("Digest: {}", solution.digest);
    println!("Hashes computed: {}", solution.attempts);
    println!("Time elapsed: {:.3}s", solution.elapsed.as_secs_f64());

    // a failure here means the engine disagrees with itself
    if !verify(prefix, difficulty, &solution.nonce)? {
        anyhow::bail!("solution failed re-verification");
    }
    println!("Verified OK");

    Ok(())
}

fn cmd_verify(prefix: &str, difficulty: u32, nonce: &str) -> anyhow::Result<()> {
    if verify(prefix, difficulty, nonce)? {
        println!("Nonce OK");
        Ok(())
    } else {
        anyhow::bail!("wrong nonce for the given prefix and difficulty")
    }
}

fn cmd_benchmark(count: u64) -> anyhow::Result<()> {
    println!("Running benchmark with {} digests...", count);

    let start = Instant::now();
    for i in 0..count {
        let _ = sha1_hex(format!("benchmark input {:x}", i).as_bytes());
    }
    let elapsed = start.elapsed();
    let hashrate = count as f64 / elapsed.as_secs_f64();

    println!("\nResults:");
    println!("  Total digests: {}", count);
    println!("  Time elapsed: {:.2}s", elapsed.as_secs_f64());
    println!("  Hashrate: {:.2} H/s", hashrate);

    Ok(())
}
