use anyhow::{anyhow, Result};
use std::str::FromStr;
use url::Url;

#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub http_timeout_seconds: u64,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self> {
        let api_base_url = env_or_err("NOTIFY_API_URL")?;
        Url::parse(&api_base_url).map_err(|err| anyhow!("invalid NOTIFY_API_URL: {}", err))?;

        Ok(Self {
            api_base_url,
            http_timeout_seconds: env_or_parse("HTTP_TIMEOUT_SECONDS", "10")?,
        })
    }
}

fn env_or_err(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| anyhow!("missing required env var: {}", key))
}

fn env_or_parse<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {}: {}", key, err))
}
