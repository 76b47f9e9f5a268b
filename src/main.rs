use anyhow::Result;
use clap::Parser;
use colored::*;
use docbundle::{export_pdf, write_markdown, Assembler, OutputFormat, PdfOptions};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// README guides bundled from the primary repository, in this order.
const PRIMARY_README_PATHS: &[&str] = &[
    "packages/cli/README.md",
    "packages/platform/README.md",
    "packages/printer/README.md",
    "packages/schema/README.md",
    "packages/sql/README.md",
    "packages/typeclass/README.md",
    "packages/vitest/README.md",
];

#[derive(Parser)]
#[command(name = "docbundle")]
#[command(
    about = "CLI utility to bundle a docs site and repository READMEs/examples into a single PDF or markdown document"
)]
#[command(version = "0.1.0")]
struct Args {
    /// Directory containing the docs-site markdown/MDX files
    docs_dir: PathBuf,

    /// Primary repository checkout (README guides and package examples)
    primary_dir: PathBuf,

    /// Secondary repository checkout; omit to bundle the primary repository alone
    secondary_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "pdf")]
    format: OutputFormat,

    /// Base name of the output file; the format's extension is appended
    #[arg(short = 'o', long = "output", default_value = "documentation")]
    output: String,
}

#[tokio::main]
async fn main() {
    // Set up logging with chromiumoxide errors suppressed
    let filter = EnvFilter::from_default_env()
        .add_directive("chromiumoxide::conn=off".parse().unwrap())
        .add_directive("chromiumoxide::handler=off".parse().unwrap())
        .add_directive("docbundle=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("{}", format!("Error: {}", e).red());
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    info!("Processing...");

    let output_path = PathBuf::from(format!("{}.{}", args.output, args.format.extension()));

    let assembler = Assembler::new(
        args.docs_dir,
        args.primary_dir,
        args.secondary_dir,
        PRIMARY_README_PATHS.iter().map(|p| p.to_string()).collect(),
        args.format,
    );

    let combined = assembler.assemble().await?;

    match args.format {
        OutputFormat::Pdf => export_pdf(&combined, &output_path, &PdfOptions::default()).await?,
        OutputFormat::Md => write_markdown(&combined, &output_path).await?,
    }

    info!(
        "Output generated at {}",
        output_path.display().to_string().green()
    );

    Ok(())
}
