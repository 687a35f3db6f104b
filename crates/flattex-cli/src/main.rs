//! Flattex CLI - flatten LaTeX documents and diff them between Git revisions
//!
//! Usage:
//!   ftx flatten [INPUT] [-o OUTPUT] [--no-markers]
//!   ftx diff -m MAIN -o OLD_REV [-n NEW_REV] [-d DIFF_NAME] [-w]
//!
//! `flatten` resolves `\input`/`\include` directives into one document.
//! `diff` flattens a project's main file at two Git revisions, runs
//! `latexdiff` over the results, and typesets the diff with `pdflatex`.

mod diff;
mod exec;
mod git;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flattex_core::{Config, Resolver};

use crate::diff::DiffJob;
use crate::git::GitRepo;

#[derive(Parser)]
#[command(name = "ftx", version)]
#[command(about = "Flatten LaTeX documents and diff them between Git revisions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve \input and \include directives into a single document
    Flatten(FlattenArgs),
    /// Build a PDF diff of the main document between two Git revisions
    Diff(DiffArgs),
}

#[derive(Args)]
struct FlattenArgs {
    /// Root document to flatten (stdin when omitted)
    input: Option<PathBuf>,

    /// File to write the flattened document to (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not emit begin/end marker comments around inserted files
    #[arg(long)]
    no_markers: bool,
}

#[derive(Args)]
struct DiffArgs {
    /// Main LaTeX file of the project
    #[arg(short, long)]
    main: PathBuf,

    /// Ref of the old revision to diff against
    #[arg(short, long)]
    old_rev: String,

    /// Ref of the new revision
    #[arg(short, long, default_value = "HEAD")]
    new_rev: String,

    /// Name for the final diff file
    #[arg(short, long, default_value = "diff")]
    diff_name: PathBuf,

    /// Silently overwrite an existing diff
    #[arg(short = 'w', long)]
    overwrite: bool,
}

fn main() {
    // Events go to stderr so piped flatten output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Flatten(args) => cmd_flatten(args),
        Commands::Diff(args) => cmd_diff(args),
    }
}

fn cmd_flatten(args: FlattenArgs) -> Result<()> {
    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let config = Config::default().with_markers(!args.no_markers);
    Resolver::new(config).resolve(input, &mut output)?;
    output.flush().context("cannot flush output")?;
    Ok(())
}

fn cmd_diff(args: DiffArgs) -> Result<()> {
    let job = DiffJob::new(
        &args.main,
        args.old_rev,
        args.new_rev,
        &args.diff_name,
        args.overwrite,
    )?;
    let repo = GitRepo::discover(job.main_dir())?;
    job.run(&repo)
}
