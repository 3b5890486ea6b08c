// src/main.rs
//
// czech-nbsp — command-line front end
//
// - Reads one document, runs `czech_nbsp::preprocess`, writes the result.
// - Input: file path, or stdin when absent or "-". Must be UTF-8.
// - Output: explicit OUTPUT path; otherwise the input file is overwritten, or
//   stdout is used when reading stdin (or with --stdout).
// - --check: write nothing; exit 1 if the document would change.
//
// Exit codes: 0 ok/unchanged, 1 would change (--check), 2 error.
// Logging: RUST_LOG (default "warn"); --verbose selects "debug".

mod error;

use clap::{ArgAction, Parser};
use error::{Error, Result};
use log::debug;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Do not write; exit with status 1 if non-breaking spaces would be inserted
    #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["stdout", "output"])]
    check: bool,

    /// Write the result to stdout instead of a file
    #[arg(long, action = ArgAction::SetTrue)]
    stdout: bool,

    /// Log debug diagnostics to stderr
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Input file ("-" or absent: stdin)
    input: Option<PathBuf>,

    /// Output file (default: overwrite input, or stdout when reading stdin)
    output: Option<PathBuf>,
}

enum Outcome {
    Done,
    WouldChange,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::WouldChange) => ExitCode::from(1),
        Err(err) => {
            eprintln!("czech-nbsp: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let input = cli.input.as_deref().filter(|p| *p != Path::new("-"));
    let label = input.unwrap_or(Path::new("<stdin>"));

    let src = read_input(input, label)?;
    let out = czech_nbsp::preprocess(&src);
    debug!("{}: processed {} bytes", label.display(), src.len());

    if cli.check {
        if out != src {
            eprintln!("{}: would insert non-breaking spaces", label.display());
            return Ok(Outcome::WouldChange);
        }
        return Ok(Outcome::Done);
    }

    match (&cli.output, input) {
        (Some(path), _) => write_file(path, &out)?,
        (None, Some(path)) if !cli.stdout => write_file(path, &out)?,
        _ => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(out.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| Error::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
        }
    }
    Ok(Outcome::Done)
}

fn read_input(input: Option<&Path>, label: &Path) -> Result<String> {
    let bytes = match input {
        Some(path) => fs::read(path),
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf).map(|_| buf)
        }
    }
    .map_err(|source| Error::Read {
        path: label.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|source| Error::Utf8 {
        path: label.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, out: &str) -> Result<()> {
    // Leave an up-to-date file untouched.
    if fs::read(path).is_ok_and(|existing| existing == out.as_bytes()) {
        debug!("{}: unchanged", path.display());
        return Ok(());
    }
    fs::write(path, out).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
