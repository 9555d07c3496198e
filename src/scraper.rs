use anyhow::Result;
use log::info;
use std::path::PathBuf;

use crate::{config::Config, phalcon::PhalconClient, transform, writer};

pub struct Scraper {
    client: PhalconClient,
    config: Config,
}

#[derive(Debug, PartialEq)]
pub struct RunSummary {
    pub incidents: usize,
    pub transactions: usize,
    pub rows: usize,
    pub output_path: PathBuf,
}

impl Scraper {
    pub fn new(config: Config) -> Result<Self> {
        let client = PhalconClient::new(&config.api_url)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: PhalconClient, config: Config) -> Self {
        Self { client, config }
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// Fetches, transforms and writes one page of incidents. Returns `None`
    /// without touching the output file when the endpoint sent nothing.
    pub async fn run(&self) -> Result<Option<RunSummary>> {
        let request = self.config.events_request();
        info!(
            "Fetching page {} ({} per page, before {})",
            request.page, request.page_size, request.end_time
        );

        let Some(response) = self.client.fetch_events(&request).await? else {
            info!("No data to process, {} left untouched", self.config.output_path.display());
            return Ok(None);
        };

        let incidents = transform::process_data(response)?;
        let transactions: usize = incidents.iter().map(|i| i.transactions.len()).sum();
        info!("Transformed {} incidents with {} transactions", incidents.len(), transactions);

        let rows = writer::write_csv(&self.config.output_path, &incidents)?;
        info!("Wrote {} rows to {}", rows, self.config.output_path.display());

        Ok(Some(RunSummary {
            incidents: incidents.len(),
            transactions,
            rows,
            output_path: self.config.output_path.clone(),
        }))
    }
}
