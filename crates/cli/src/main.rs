//! Cache simulator CLI.
//!
//! This binary provides a single entry point for running the simulator. It performs:
//! 1. **Script run:** Execute a command script whose first three numbers give the cache geometry.
//! 2. **Interactive run:** Prompt for the geometry and then for commands on stdin.
//! 3. **Configured run:** Take geometry, memory, and timing from a JSON file and/or flags,
//!    in which case the input holds commands only.

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use cachesim_core::common::error::SimError;
use cachesim_core::config::Config;
use cachesim_core::sim::{script, Flow};
use cachesim_core::Simulator;

const BANNER: &str = r"*****************************************************
*                    _                              *
*      ___ __ _  ___| |__   ___                     *
*     / __/ _` |/ __| '_ \ / _ \                    *
*    | (_| (_| | (__| | | |  __/                    *
*     \___\__,_|\___|_| |_|\___|                    *
*         _                 _       _               *
*     ___(_)_ __ ___  _   _| | __ _| |_ ___  _ __   *
*    / __| | '_ ` _ \| | | | |/ _` | __/ _ \| '__|  *
*    \__ \ | | | | | | |_| | | (_| | || (_) | |     *
*    |___/_|_| |_| |_|\__,_|_|\__,_|\__\___/|_|     *
*                                                   *
*****************************************************
";

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Set-associative write-back cache simulator",
    long_about = "Simulate lw/sw accesses against a write-back, write-allocate, LRU cache.\n\nWithout geometry flags or --config, the first three numbers of the input are\nwords-per-block, number of blocks, and number of ways.\n\nExamples:\n  cachesim traces/lru.txt\n  cachesim --config cache.json traces/commands.txt\n  cachesim -w 4 -b 4 -a 2 --stats"
)]
struct Cli {
    /// Command script to run; reads stdin when omitted.
    script: Option<PathBuf>,

    /// JSON configuration file (cache, memory, timing).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Words per cache block.
    #[arg(short = 'w', long)]
    words_per_block: Option<usize>,

    /// Total number of cache blocks.
    #[arg(short = 'b', long)]
    blocks: Option<usize>,

    /// Number of ways per set.
    #[arg(short = 'a', long = "ways")]
    ways: Option<usize>,

    /// Print a statistics summary when the run ends.
    #[arg(long)]
    stats: bool,

    /// Print the final statistics as JSON on stdout.
    #[arg(long)]
    stats_json: bool,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// True when the geometry comes from flags or a config file rather than the input.
    const fn has_geometry(&self) -> bool {
        self.config.is_some()
            || self.words_per_block.is_some()
            || self.blocks.is_some()
            || self.ways.is_some()
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        error!(error = %e, "simulation aborted");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` or the verbosity flag.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Builds the simulator, runs the command stream, and prints any requested statistics.
fn run(cli: &Cli) -> Result<(), SimError> {
    let interactive = cli.script.is_none() && io::stdin().is_terminal();
    let mut input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if interactive {
        writeln!(out, "{BANNER}")?;
    }

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let mut pending = None;
    if cli.has_geometry() {
        if let Some(w) = cli.words_per_block {
            config.cache.words_per_block = w;
        }
        if let Some(b) = cli.blocks {
            config.cache.blocks = b;
        }
        if let Some(a) = cli.ways {
            config.cache.ways = a;
        }
    } else {
        if interactive {
            write!(out, "- words per block, number of blocks, number of ways: ")?;
            out.flush()?;
        }
        let (cache, leftover) = script::read_header(&mut input)?;
        config.cache = cache;
        pending = leftover;
    }
    debug!(?config.cache, ?config.timing, "configuration");

    let mut sim = Simulator::new(&config)?;
    let quit = match pending {
        Some(line) => script::run_line(&mut sim, &line, &mut out)? == Flow::Quit,
        None => false,
    };
    if !quit {
        script::run(&mut sim, &mut input, &mut out, interactive)?;
    }

    if cli.stats {
        write!(out, "{}", sim.stats.summary())?;
    }
    if cli.stats_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&sim.stats)?)?;
    }
    out.flush()?;
    Ok(())
}
