use clap::Parser;
use page_walker::{DelayRange, Walk, WalkError};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-walker")]
#[command(about = "Follows \"next chapter\" links and appends every chapter to a text file")]
#[command(version)]
pub struct Args {
    /// First chapter page to fetch (overrides start_url from --config)
    pub start_url: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of chapters to write
    #[arg(short = 'n', long)]
    pub max_chapters: Option<usize>,

    /// File the chapters are appended to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Shortest pause between two fetches, in milliseconds
    #[arg(long)]
    pub min_delay_ms: Option<u64>,

    /// Longest pause between two fetches, in milliseconds
    #[arg(long)]
    pub max_delay_ms: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Follow "next" links that leave the start page's host
    #[arg(long)]
    pub allow_external: bool,
}

/// Builds the walk from the config file (if any) and the command-line overrides
pub fn build_walk(args: &Args) -> Result<Walk, WalkError> {
    let mut walk = match (&args.config, &args.start_url) {
        (Some(path), _) => Walk::from_config_file(path)?,
        (None, Some(url)) => Walk::new(url),
        (None, None) => {
            return Err(WalkError::InvalidConfig(
                "either a start URL or --config is required".to_string(),
            ));
        }
    };

    if let Some(url) = &args.start_url {
        walk = walk.with_start_url(url);
    }
    if let Some(max_chapters) = args.max_chapters {
        walk = walk.with_max_chapters(max_chapters);
    }
    if let Some(output) = &args.output {
        walk = walk.with_output(output.clone());
    }
    if args.min_delay_ms.is_some() || args.max_delay_ms.is_some() {
        let current = walk.config().delay;
        walk = walk.with_delay(DelayRange::new(
            args.min_delay_ms.unwrap_or(current.min_ms),
            args.max_delay_ms.unwrap_or(current.max_ms),
        ));
    }
    if let Some(timeout) = args.timeout {
        walk = walk.with_timeout(timeout);
    }
    if args.allow_external {
        walk = walk.with_allow_external(true);
    }

    Ok(walk)
}
