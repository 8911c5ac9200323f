//! Command line driver for the interval trees.
//!
//! Reads whitespace separated input on stdin:
//! the number of elements `N`, then `N` integers, then commands until the end of input.
//!
//! * `q a b` prints the minimum (or sum) of the closed interval `[a, b]`.
//! * `u i v` on a min tree sets the element at `i` to `v`, and prints the new minimum
//!   of the whole array.
//! * `u a b d` on a sum tree adds `d` to every element of `[a, b]`, and prints the new
//!   sum of the whole array.
//!
//! Indices are 1-based unless `--zero-based` is given.

use std::error::Error;
use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use interval_trees::{BigInt, LazySumTree, MinTree, TreeError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which tree to build from the input.
    #[arg(value_enum)]
    tree: TreeKind,

    /// Indices in commands start at 0 instead of 1.
    #[arg(long)]
    zero_based: bool,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
enum TreeKind {
    /// Range minimum queries with point updates.
    Min,
    /// Range sums with range additions.
    Sum,
}

/// Errors of a single command. Rejected commands are reported and skipped, malformed
/// input ends the run.
#[derive(Debug)]
enum CommandError {
    /// The input ended or a token didn't parse.
    Input(String),
    /// A user index that has no 0-based counterpart.
    BadIndex(i64),
    Tree(TreeError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Input(msg) => write!(f, "malformed input: {msg}"),
            CommandError::BadIndex(index) => write!(f, "index {index} has no 0-based counterpart"),
            CommandError::Tree(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {}

impl From<TreeError> for CommandError {
    fn from(err: TreeError) -> Self {
        CommandError::Tree(err)
    }
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Tokens {
            inner: input.split_whitespace(),
        }
    }

    fn next_raw(&mut self) -> Option<&'a str> {
        self.inner.next()
    }

    fn parse<T: FromStr>(&mut self, what: &str) -> Result<T, CommandError> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| CommandError::Input(format!("expected {what}, found end of input")))?;
        token
            .parse()
            .map_err(|_| CommandError::Input(format!("expected {what}, found {token:?}")))
    }

    /// Reads a user index and translates it into a 0-based one.
    fn index(&mut self, zero_based: bool) -> Result<usize, CommandError> {
        let raw: i64 = self.parse("an index")?;
        let shifted = if zero_based { Some(raw) } else { raw.checked_sub(1) };
        shifted
            .and_then(|shifted| usize::try_from(shifted).ok())
            .ok_or(CommandError::BadIndex(raw))
    }

    /// Reads the two ends of a closed interval.
    fn interval(&mut self, zero_based: bool) -> Result<(usize, usize), CommandError> {
        // both ends are consumed even if the first one is rejected
        let left = self.index(zero_based);
        let right = self.index(zero_based);
        Ok((left?, right?))
    }
}

fn unknown_command(command: &str) -> Box<dyn Error> {
    CommandError::Input(format!("unknown command {command:?}")).into()
}

/// Runs all the commands in `input`, writing one line per successful command.
fn run<W: Write>(
    kind: TreeKind,
    zero_based: bool,
    input: &str,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let mut tokens = Tokens::new(input);
    let len: usize = tokens.parse("the number of elements")?;
    match kind {
        TreeKind::Min => {
            let values = (0..len)
                .map(|_| tokens.parse::<i64>("a value"))
                .collect::<Result<Vec<_>, _>>()?;
            let mut tree = MinTree::new(values)?;
            while let Some(command) = tokens.next_raw() {
                let res = match command {
                    "q" => tokens
                        .interval(zero_based)
                        .and_then(|(left, right)| Ok(tree.query(left, right)?)),
                    "u" => {
                        let index = tokens.index(zero_based);
                        let value = tokens.parse::<i64>("a value")?;
                        index.and_then(|index| Ok(tree.update(index, value)?))
                    }
                    other => return Err(unknown_command(other)),
                };
                report(res, out)?;
            }
        }
        TreeKind::Sum => {
            let values = (0..len)
                .map(|_| tokens.parse::<BigInt>("a value"))
                .collect::<Result<Vec<_>, _>>()?;
            let mut tree = LazySumTree::new(values)?;
            while let Some(command) = tokens.next_raw() {
                let res = match command {
                    "q" => tokens
                        .interval(zero_based)
                        .and_then(|(left, right)| Ok(tree.range_query(left, right)?)),
                    "u" => {
                        let interval = tokens.interval(zero_based);
                        let delta = tokens.parse::<BigInt>("a delta")?;
                        interval.and_then(|(left, right)| {
                            Ok(tree.range_update(left, right, delta)?)
                        })
                    }
                    other => return Err(unknown_command(other)),
                };
                report(res, out)?;
            }
        }
    }
    Ok(())
}

/// Writes the result of a command, or logs why it was rejected. Malformed input is
/// passed on.
fn report<T: fmt::Display, W: Write>(
    res: Result<T, CommandError>,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    match res {
        Ok(value) => writeln!(out, "{value}")?,
        Err(err @ CommandError::Input(_)) => return Err(err.into()),
        Err(err) => log::warn!("command rejected: {}", err),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    run(args.tree, args.zero_based, &input, &mut out)?;
    out.flush()?;
    Ok(())
}
