use anyhow::Context;
use champsim_stats::log::Field;
use champsim_stats::{Result, log, model, render};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "champsim-stats")]
#[command(about = "Collect ChampSim counters grouped by benchmark", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the counters extracted from a single simulation log.
    Parse {
        #[arg(long)]
        log: PathBuf,
    },

    /// Walk a results directory and emit per-benchmark value lists as JSON.
    Collect {
        #[arg(long)]
        dir: PathBuf,

        /// Write to this file instead of stdout.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    /// Walk a results directory and print count/mean/min/max per benchmark.
    Summary {
        #[arg(long)]
        dir: PathBuf,

        /// Only show these fields (repeatable), e.g. --field ipc --field bMPKI.
        #[arg(long = "field")]
        fields: Vec<Field>,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Parse { log } => {
            let rec = log::parse_log_file(&log)?;
            println!("{}", render::render_json(&rec)?);
        }
        Commands::Collect { dir, out } => {
            let table = model::collect_dir(&dir)?;
            let json = render::render_json(&table)?;
            match out {
                Some(out) => {
                    std::fs::write(&out, json)
                        .with_context(|| format!("write {}", out.display()))?;
                    println!("Wrote {}", out.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::Summary { dir, fields } => {
            let table = model::collect_dir(&dir)?;
            let summary = model::summarize(&table);
            print!("{}", render::render_summary_table(&summary, &fields));
        }
    }

    Ok(())
}
