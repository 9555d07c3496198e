mod cli;
mod config;
mod models;
mod phalcon;
mod scraper;
mod transform;
mod writer;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use scraper::Scraper;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = crate::config::Config::load()?.apply_cli(&cli);
    let scraper = Scraper::new(config)?;

    println!("Fetching attack incidents from {}", scraper.get_config().api_url);

    match scraper.run().await? {
        Some(summary) => {
            println!("Incidents: {}", summary.incidents);
            println!("Transactions: {}", summary.transactions);
            println!("Rows written: {}", summary.rows);
            println!("Output: {}", summary.output_path.display());
        }
        None => {
            println!("Empty response received, nothing written");
        }
    }

    Ok(())
}
