//! sprocdoc: generate documentation pages from annotated SQL stored procedures.
//!
//! Two subcommands:
//!
//! - **generate**: `sprocdoc generate -o docs sql/` extracts each procedure and
//!   writes one Markdown page per procedure (`sprocdoc generate < proc.sql`
//!   prints a single page to stdout)
//! - **view**: `sprocdoc view --select LoginUser` renders the catalog viewer
//!   as HTML; `--site DIR` writes a navigable page per procedure

mod batch;
mod config;
mod error;
mod extract;
mod model;
mod render;
mod viewer;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sprocdoc",
    about = "Generate documentation from annotated SQL stored procedures"
)]
struct Cli {
    /// Config file (defaults to ./sprocdoc.toml when present)
    #[arg(short = 'c', long, global = true, env = "SPROCDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract procedures and write one documentation page each
    Generate(GenerateArgs),
    /// Render the procedure catalog viewer as HTML
    View(ViewArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Source files, directories or glob patterns. If omitted (and no
    /// source_dir is configured), reads one document from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), html, json
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// Abort the run at the first file that fails to extract
    #[arg(long)]
    fail_fast: bool,

    /// Schema qualifier excluded from references (default: dbo)
    #[arg(long)]
    schema: Option<String>,

    /// Treat the first line as SQL instead of discarding it as a banner
    #[arg(long)]
    keep_header: bool,

    /// `createdby` value in the front matter (default: dbadmin)
    #[arg(long)]
    author: Option<String>,
}

#[derive(Args)]
struct ViewArgs {
    /// JSON catalog file, or a directory of records written by
    /// `generate --format json`. Defaults to the built-in catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Procedure to show in the detail panel
    #[arg(short = 's', long, conflicts_with = "site")]
    select: Option<String>,

    /// Write the page to this file instead of stdout
    #[arg(short = 'o', long, conflicts_with = "site")]
    output: Option<PathBuf>,

    /// Write index.html plus one page per procedure into this directory,
    /// with sidebar links between pages
    #[arg(long)]
    site: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Generate(args) => generate(args, config),
        Command::View(args) => view(args),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

fn generate(args: GenerateArgs, config: config::Config) -> Result<()> {
    let format = args.format.as_deref().unwrap_or(config.format());
    let author = args.author.as_deref().unwrap_or(config.author());
    let renderer = render::create_renderer(format, author)?;

    let mut opts = config.extract.clone();
    if let Some(schema) = args.schema {
        opts.schema = schema;
    }
    if args.keep_header {
        opts.skip_header = false;
    }
    let on_error = if args.fail_fast {
        config::OnError::Halt
    } else {
        config.on_error
    };

    let patterns = if !args.files.is_empty() {
        args.files
    } else if let Some(ref dir) = config.source_dir {
        vec![dir.to_string_lossy().to_string()]
    } else {
        return stdin_mode(renderer.as_ref(), &opts);
    };

    let output_dir = args
        .output
        .or(config.output_dir)
        .context("--output is required when files are given")?;

    let inputs = batch::collect_inputs(&patterns)?;
    let summary = batch::run(&inputs, &output_dir, renderer.as_ref(), &opts, on_error)?;
    if !summary.skipped.is_empty() {
        warn!(
            written = summary.written.len(),
            skipped = summary.skipped.len(),
            "some source files were not documented"
        );
    }
    Ok(())
}

/// stdin mode: extract one document from stdin and print the page.
fn stdin_mode(renderer: &dyn render::Renderer, opts: &extract::ExtractOptions) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let doc = extract::extract(&input, opts).map_err(|e| {
        let step = e.step();
        anyhow::Error::new(e).context(format!("failed to extract stdin ({})", step))
    })?;
    print!("{}", renderer.render(&doc));
    Ok(())
}

fn view(args: ViewArgs) -> Result<()> {
    let mut app = match args.catalog {
        Some(path) => viewer::Viewer::load(&viewer::source::JsonCatalog { path }),
        None => viewer::Viewer::load(&viewer::source::BuiltinCatalog),
    };

    if let Some(dir) = args.site {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create site directory: {}", dir.display()))?;
        let pages = app.site_pages();
        for (name, html) in &pages {
            let path = dir.join(name);
            fs::write(&path, html)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        info!(pages = pages.len(), dir = %dir.display(), "wrote viewer site");
        return Ok(());
    }

    if let Some(name) = args.select {
        app.select(name.as_str());
        if app.current().is_none() {
            warn!(name = %name, "no procedure with this name in the catalog");
        }
    }
    let html = app.render();
    match args.output {
        Some(path) => fs::write(&path, html)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", html),
    }
    Ok(())
}
