use anyhow::Result;
use clap::Parser;

mod cli;
mod logger;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logger::init(args.verbose);
    cli::run(args)
}
