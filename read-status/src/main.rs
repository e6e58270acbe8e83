//! Entry-point for the `bubble-read-status` binary.
use bubble_read_status::Cli;
use bubble_read_status::run_main;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(run_main(cli))
}
