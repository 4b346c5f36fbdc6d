use clap::Parser;

use apply_sidecar::args::Args;
use apply_sidecar::processor::Processor;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Create processor and run the batch
    let processor = Processor::new(args.media_dir, args.exiftool);
    let summary = processor.process_directory()?;

    summary.print();

    Ok(())
}
