use std::env;
use std::path::PathBuf;

use crate::error::Result;

#[derive(Clone)]
pub struct Config {
    pub mapquest_api_key: String,
    pub cache_file: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let mapquest_api_key = env::var("MAPQUEST_API_KEY")?;

        let cache_file = env::var("CACHE_FILE").unwrap_or_else(|_| "cache.json".to_string());

        Ok(Config {
            mapquest_api_key,
            cache_file: PathBuf::from(cache_file),
        })
    }
}
