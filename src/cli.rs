use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "phalcon-incident-scraper")]
#[command(about = "Fetch Phalcon attack incidents and write them to a CSV file")]
pub struct Cli {
    /// Attack events endpoint
    #[arg(long)]
    pub url: Option<String>,
    /// Only incidents before this epoch-millisecond cutoff
    #[arg(long)]
    pub end_time: Option<i64>,
    /// Incidents requested in the single page
    #[arg(long)]
    pub page_size: Option<u32>,
    /// CSV file to overwrite
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
