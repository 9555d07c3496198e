use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::Cli;

const DEFAULT_API_URL: &str = "https://phalcon.blocksec.com/api/v1/attack/events";
const DEFAULT_END_TIME: i64 = 1_735_682_399_000;
const DEFAULT_OUTPUT_PATH: &str = "out/attack_incidents.csv";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub page: u32,
    pub page_size: u32,
    pub end_time: i64,
    pub sort: String,
    pub output_path: PathBuf,
}

/// Body of the attack events POST request.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventsRequest {
    pub page: u32,
    pub page_size: u32,
    pub end_time: i64,
    /// Sort order; the endpoint calls it `date`.
    #[serde(rename = "date")]
    pub sort: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page: 1,
            page_size: 200,
            end_time: DEFAULT_END_TIME,
            sort: "desc".to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl Config {
    /// Defaults, overlaid by `.env` and `PHALCON_*` environment variables.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_environment(::config::Environment::with_prefix("PHALCON").try_parsing(true))
    }

    fn from_environment(environment: ::config::Environment) -> Result<Self> {
        let defaults = Config::default();

        let config = ::config::Config::builder()
            .set_default("api_url", defaults.api_url)?
            .set_default("page", i64::from(defaults.page))?
            .set_default("page_size", i64::from(defaults.page_size))?
            .set_default("end_time", defaults.end_time)?
            .set_default("sort", defaults.sort)?
            .set_default("output_path", DEFAULT_OUTPUT_PATH)?
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.url {
            self.api_url = url.clone();
        }
        if let Some(end_time) = cli.end_time {
            self.end_time = end_time;
        }
        if let Some(page_size) = cli.page_size {
            self.page_size = page_size;
        }
        if let Some(output) = &cli.output {
            self.output_path = output.clone();
        }
        self
    }

    pub fn events_request(&self) -> EventsRequest {
        EventsRequest {
            page: self.page,
            page_size: self.page_size,
            end_time: self.end_time,
            sort: self.sort.clone(),
        }
    }
}
