use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use plagiarism_checker::{report, CheckError, CheckerConfig, PlagiarismChecker};

/// Compare a suspect document against an original and write the similarity.
///
/// The score is a number in [0, 1] written with two decimals.
#[derive(Parser)]
#[command(name = "plagiarism-checker", version, about)]
struct Cli {
    /// Original document (UTF-8 text)
    original: PathBuf,

    /// Suspect document (UTF-8 text)
    suspect: PathBuf,

    /// File the formatted score is written to
    output: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read both documents in fixed-size character chunks
    #[arg(long)]
    stream: bool,

    /// Characters per chunk with --stream (default: from config, 10000)
    #[arg(long)]
    chunk_size: Option<usize>,
}

fn read_text(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let text = String::from_utf8(bytes).map_err(|_| CheckError::EncodingUnrecognized {
        path: path.to_path_buf(),
    })?;
    Ok(text)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CheckerConfig::load(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => CheckerConfig::default(),
    };
    let chunk_size = cli.chunk_size.unwrap_or(config.chunk_size);
    let checker = PlagiarismChecker::with_config(config)?;

    let similarity = if cli.stream {
        checker
            .similarity_of_files(&cli.original, &cli.suspect, chunk_size)
            .context("streaming comparison failed")?
    } else {
        let original = read_text(&cli.original)?;
        let suspect = read_text(&cli.suspect)?;
        checker
            .similarity(&original, &suspect)
            .context("comparison failed")?
    };

    report::write_result(&cli.output, similarity)
        .with_context(|| format!("cannot write {}", cli.output.display()))?;
    let summary = report::generate_report(
        &cli.original.display().to_string(),
        &cli.suspect.display().to_string(),
        similarity,
    )?;
    info!("{summary}");
    println!("{}", report::format_similarity(similarity)?);
    Ok(())
}
