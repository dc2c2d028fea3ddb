//! Rangelift CLI entry point
//!
//! Applies the staged translation tables of a remap file to its seed
//! values and reports the resulting minima.

use clap::{Parser, Subcommand};
use rangelift::core::{parse_remap_file, seed_intervals, RemapFile};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "rangelift")]
#[command(about = "Staged piecewise liftover of integer values and ranges")]
#[command(version)]
#[command(author = "Rangelift Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every stage and print the two minima
    Run {
        /// Remap file (plain, gzip or bzip2)
        input: PathBuf,
        /// Number of threads for interval translation
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },
    /// Show the shape of a remap file without translating anything
    Stats {
        /// Remap file (plain, gzip or bzip2)
        input: PathBuf,
    },
}

fn load_remap(path: &PathBuf) -> anyhow::Result<RemapFile> {
    let start = Instant::now();
    eprintln!("Loading remap file: {:?}", path);

    let remap = parse_remap_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load remap file: {}", e))?;

    eprintln!("Remap file loaded in {:.2}s", start.elapsed().as_secs_f64());
    Ok(remap)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Run { input, threads } => {
            let remap = load_remap(&input)?;
            let pipeline = remap.build_pipeline()?;

            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| anyhow::anyhow!("Failed to create thread pool: {}", e))?;
            let outcome = pool.install(|| pipeline.run(&remap.seeds))?;

            match outcome.min_value() {
                Some(v) => println!("minimum value: {}", v),
                None => println!("minimum value: n/a"),
            }
            match outcome.min_interval_start() {
                Some(v) => println!("minimum interval start: {}", v),
                None => println!("minimum interval start: n/a"),
            }

            eprintln!("\n=== Remap Statistics ===");
            eprintln!("Stages:          {}", pipeline.stage_count());
            eprintln!("Rules:           {}", pipeline.rule_count());
            eprintln!("Seed values:     {}", remap.seeds.len());
            eprintln!("Final intervals: {}", outcome.intervals.len());
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Stats { input } => {
            let remap = load_remap(&input)?;

            println!("seed values: {}", remap.seeds.len());
            match seed_intervals(&remap.seeds) {
                Ok(seeds) => println!("seed intervals: {}", seeds.len()),
                Err(e) => println!("seed intervals: invalid ({})", e),
            }
            for (i, stage) in remap.stages.iter().enumerate() {
                println!("stage {}: '{}', {} rule(s)", i, stage.name, stage.triples.len());
            }
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
