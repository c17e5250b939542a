//! Script and REPL Runner.
//!
//! A script starts with the three geometry numbers (words per block, number of
//! blocks, number of ways), separated by any whitespace, followed by one command
//! per line. The same reader drives an interactive session on stdin.

use std::io::{BufRead, Write};

use tracing::warn;

use crate::common::error::{CommandError, SimError};
use crate::config::CacheConfig;
use crate::sim::command::{self, Command, HELP};
use crate::sim::dump;
use crate::sim::simulator::Simulator;

/// Whether the runner should keep reading commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// Stop (`quit`).
    Quit,
}

/// Reads the geometry header from the start of a script.
///
/// Returns the cache settings and any tokens that followed the third number on
/// the same line, rejoined as a command line.
///
/// # Errors
///
/// Returns [`CommandError::MissingHeader`] if the input ends early,
/// [`CommandError::BadNumber`] for a non-numeric header token, and
/// [`SimError::Io`] on read failure.
pub fn read_header<R: BufRead>(input: &mut R) -> Result<(CacheConfig, Option<String>), SimError> {
    const FIELDS: [&str; 3] = ["words per block", "number of blocks", "number of ways"];
    let mut values = Vec::with_capacity(FIELDS.len());
    let mut line = String::new();

    while values.len() < FIELDS.len() {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(CommandError::MissingHeader(FIELDS[values.len()]).into());
        }
        let tokens = command::tokenize(&line);
        let mut rest = tokens.iter();
        for token in rest.by_ref() {
            values.push(command::parse_number(token)? as usize);
            if values.len() == FIELDS.len() {
                break;
            }
        }
        let leftover: Vec<&str> = rest.copied().collect();
        if values.len() == FIELDS.len() && !leftover.is_empty() {
            let config = CacheConfig::new(values[0], values[1], values[2]);
            return Ok((config, Some(leftover.join(" "))));
        }
    }

    Ok((CacheConfig::new(values[0], values[1], values[2]), None))
}

/// Executes one command, writing any output to `out`.
///
/// Rejected accesses are reported on `out` and do not stop the run.
///
/// # Errors
///
/// Returns [`SimError::Io`] if writing to `out` fails.
pub fn execute<W: Write>(sim: &mut Simulator, cmd: Command, out: &mut W) -> Result<Flow, SimError> {
    let result = match cmd {
        Command::Quit => return Ok(Flow::Quit),
        Command::Show => {
            out.write_all(dump::format_cache(&sim.cache).as_bytes())?;
            return Ok(Flow::Continue);
        }
        Command::Dump(addr) => {
            out.write_all(dump::format_memory(sim.cache.memory(), addr).as_bytes())?;
            return Ok(Flow::Continue);
        }
        Command::Cycles => {
            writeln!(out, "{}", sim.stats.cycles_line())?;
            return Ok(Flow::Continue);
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(Flow::Continue);
        }
        Command::Load(addr) => sim.load_word(addr),
        Command::Store { addr, value } => sim.store_word(addr, value),
    };

    if let Err(e) = result {
        warn!(error = %e, "access rejected");
        writeln!(out, "error: {e}")?;
    }
    Ok(Flow::Continue)
}

/// Reads commands from `input` until end of input or `quit`.
///
/// When `prompt` is set, `>> ` is written before each line is read. Malformed
/// commands print their usage text and are skipped.
///
/// # Errors
///
/// Returns [`SimError::Io`] on read or write failure.
pub fn run<R: BufRead, W: Write>(
    sim: &mut Simulator,
    input: &mut R,
    out: &mut W,
    prompt: bool,
) -> Result<(), SimError> {
    let mut line = String::new();
    loop {
        if prompt {
            write!(out, ">> ")?;
            out.flush()?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if run_line(sim, &line, out)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

/// Parses and executes a single line.
///
/// # Errors
///
/// Returns [`SimError::Io`] if writing to `out` fails.
pub fn run_line<W: Write>(sim: &mut Simulator, line: &str, out: &mut W) -> Result<Flow, SimError> {
    match Command::parse(line) {
        Ok(Some(cmd)) => execute(sim, cmd, out),
        Ok(None) => Ok(Flow::Continue),
        Err(e) => {
            writeln!(out, "{e}")?;
            Ok(Flow::Continue)
        }
    }
}
