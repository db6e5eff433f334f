// Runtime configuration read from the environment (optionally a .env file, loaded by main).
//
// CMS_BIND_ADDR         listen address, default 0.0.0.0:8080
// CMS_MAX_PAGE_SIZE     largest page a list call may ask for, default 500
// CMS_API_TOKENS        `token=username:ROLE|ROLE` entries separated by `;`
// CMS_SEED_SAMPLE_DATA  seed demo accounts and records at start-up, default false

use std::net::SocketAddr;
use thiserror::Error;

use crate::modules::entities::use_cases::service::DEFAULT_MAX_PAGE_SIZE;
use crate::shared::infrastructure::auth::{Principal, Role};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            key,
            value: value.to_owned(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_page_size: u64,
    pub api_tokens: Vec<(String, Principal)>,
    pub seed_sample_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("CMS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|err| ConfigError::invalid("CMS_BIND_ADDR", &bind_addr, err))?;

        let max_page_size = match lookup("CMS_MAX_PAGE_SIZE") {
            None => DEFAULT_MAX_PAGE_SIZE,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => return Err(ConfigError::invalid("CMS_MAX_PAGE_SIZE", &raw, "must be at least 1")),
                Ok(size) => size,
                Err(err) => return Err(ConfigError::invalid("CMS_MAX_PAGE_SIZE", &raw, err)),
            },
        };

        let api_tokens = match lookup("CMS_API_TOKENS") {
            None => Vec::new(),
            Some(raw) => parse_tokens(&raw)?,
        };

        let seed_sample_data = match lookup("CMS_SEED_SAMPLE_DATA") {
            None => false,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => return Err(ConfigError::invalid("CMS_SEED_SAMPLE_DATA", &raw, "expected true or false")),
            },
        };

        Ok(Self {
            bind_addr,
            max_page_size,
            api_tokens,
            seed_sample_data,
        })
    }
}

fn parse_tokens(raw: &str) -> Result<Vec<(String, Principal)>, ConfigError> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = |reason: &str| ConfigError::invalid("CMS_API_TOKENS", entry, reason);
            let (token, identity) = entry
                .split_once('=')
                .ok_or_else(|| invalid("expected token=username:ROLE|ROLE"))?;
            let (username, roles) = identity.split_once(':').unwrap_or((identity, ""));
            let (token, username) = (token.trim(), username.trim());
            if token.is_empty() || username.is_empty() {
                return Err(invalid("token and username must not be empty"));
            }
            let roles = roles
                .split('|')
                .filter(|role| !role.trim().is_empty())
                .map(|role| role.parse::<Role>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| invalid(&err.to_string()))?;
            Ok((token.to_owned(), Principal::new(username, roles)))
        })
        .collect()
}
