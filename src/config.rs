use anyhow::{Context, Result};
use dotenv::dotenv;
use std::env;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8088";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
}

impl Config {
    /// Reads the service configuration from the environment, honouring a `.env` file.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned());
        Ok(Self {
            database_url,
            bind_address,
        })
    }
}
