use clap::Parser;
use console::style;

use modlift::cli::{run, Args};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(error) = run(args).await {
        eprintln!("{} {:#}", style("error:").red().bold(), error);
        std::process::exit(1);
    }
}
