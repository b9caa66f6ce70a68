use clap::Parser;
use page_walker::{StopReason, TerminalReason};
use std::process::ExitCode;

mod args;
use args::{Args, build_walk};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging, showing progress unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let walker = match build_walk(&args).and_then(|walk| walk.into_walker()) {
        Ok(walker) => walker,
        Err(e) => {
            ::log::error!("Failed to start walker: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start_time = std::time::Instant::now();
    let summary = walker
        .run_with(|count, record| println!("[{}] {}", count, record.title))
        .await;

    match &summary.stop {
        StopReason::Terminal(TerminalReason::NoNextPage) => {
            println!("Reached the last chapter.")
        }
        StopReason::Terminal(TerminalReason::Filtered(url)) => {
            println!("Stopped before leaving the book: {}", url)
        }
        StopReason::CeilingReached { pending } => {
            println!("Chapter limit reached; next page would have been {}", pending)
        }
        StopReason::Failed { page, error } => {
            eprintln!("Error while walking: {}", error);
            eprintln!("Current URL: {}", page);
        }
    }

    println!(
        "Done: {} chapters written to {} in {:.2} seconds",
        summary.chapters,
        walker.sink().path().display(),
        start_time.elapsed().as_secs_f64()
    );

    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
