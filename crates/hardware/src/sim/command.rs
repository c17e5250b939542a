//! Command Language.
//!
//! Parses the line-oriented command language used by scripts and the REPL:
//!
//! ```text
//! lw <addr>            simulate a word load
//! sw <addr> <value>    simulate a word store
//! show                 print every cache block
//! dump [addr]          print 64 bytes of memory from addr (default 0)
//! cycles               print hits, misses, and elapsed cycles
//! help                 print this summary
//! quit                 stop reading commands
//! ```
//!
//! Tokens are separated by whitespace; `//` or `#` starts a comment that runs to
//! the end of the line. Numbers are decimal, `0x` hexadecimal, or `0`-prefixed octal.

use tracing::debug;

use crate::common::constants::WORD_ALIGN_MASK;
use crate::common::error::CommandError;

/// Help text printed by the `help` command.
pub const HELP: &str = "\
- show         : Show cache
- dump [addr]  : Dump memory from @addr to @addr+64
- cycles       : Show elapsed cycles

- lw <addr>    : Simulate loading a word at @addr
- sw <addr> <value>
               : Simulate storing @value at @addr
";

/// One parsed command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `lw <addr>`
    Load(u32),
    /// `sw <addr> <value>`
    Store {
        /// Target address.
        addr: u32,
        /// Word to store.
        value: u32,
    },
    /// `show`
    Show,
    /// `dump [addr]`; the address is already word aligned.
    Dump(u32),
    /// `cycles`
    Cycles,
    /// `help`
    Help,
    /// `quit`
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for blank lines, comment-only lines, and unknown
    /// commands, which are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Usage`] when `lw` or `sw` has the wrong number of
    /// operands and [`CommandError::BadNumber`] when an operand is not a number.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let tokens = tokenize(line);
        let Some((&name, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match name {
            "quit" => Self::Quit,
            "show" => Self::Show,
            "cycles" => Self::Cycles,
            "help" => Self::Help,
            "dump" => {
                let addr = args.first().map_or(Ok(0), |t| parse_number(t))?;
                Self::Dump(addr & WORD_ALIGN_MASK)
            }
            "lw" => {
                let [addr, ..] = args else {
                    return Err(CommandError::Usage {
                        command: "lw",
                        usage: "lw <address to load>",
                    });
                };
                Self::Load(parse_number(addr)?)
            }
            "sw" => {
                let [addr, value] = args else {
                    return Err(CommandError::Usage {
                        command: "sw",
                        usage: "sw <address to store> <word-size value to store>",
                    });
                };
                Self::Store {
                    addr: parse_number(addr)?,
                    value: parse_number(value)?,
                }
            }
            other => {
                debug!(command = other, "ignoring unknown command");
                return Ok(None);
            }
        };
        Ok(Some(command))
    }
}

/// Splits a line into whitespace-separated tokens, dropping everything from the
/// first `//` or `#` token onward.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace()
        .take_while(|t| *t != "//" && *t != "#")
        .collect()
}

/// Parses a number the way C's `strtoimax(s, NULL, 0)` picks its base, then
/// truncates it to 32 bits. A leading `-` negates modulo 2^32.
///
/// # Errors
///
/// Returns [`CommandError::BadNumber`] if the token is not entirely a number in
/// its base or does not fit in 64 bits.
pub fn parse_number(token: &str) -> Result<u32, CommandError> {
    let bad = || CommandError::BadNumber(token.to_string());
    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };

    let (radix, digits) = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        (16, hex)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    if digits.is_empty() || digits.starts_with('+') {
        return Err(bad());
    }
    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| bad())?;
    let value = magnitude as u32;
    Ok(if negative { value.wrapping_neg() } else { value })
}
