use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use tae_kim_anki::{
    info_time, process, Options, Result, DEFAULT_OUTPUT_PATH, DEFAULT_SEED_URL,
};

#[derive(Parser, Debug)]
#[command(name = "tae-kim-anki")]
#[command(about = "Scrape Tae Kim's Guide to Japanese Grammar into an Anki CSV deck")]
#[command(version)]
struct Cli {
    /// Page the scrape starts from
    #[arg(long, default_value = DEFAULT_SEED_URL)]
    seed: String,

    /// Deck file to write, replaced on every run
    #[arg(long, value_name = "FILE", default_value = DEFAULT_OUTPUT_PATH)]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = Options {
        seed_url: cli.seed,
        output_path: cli.out,
    };

    let start_time = Local::now();
    process::run(&options).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
