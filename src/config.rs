use std::{env, fmt::Display, net::IpAddr, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::external::{google_maps, maps_links};

#[derive(Clone, Debug)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub api_key: Option<String>,
    pub api_base: String,
    pub data_dir: Option<PathBuf>,
    pub search_url: String,
    pub directions_url: String,
}

impl Config {
    pub fn load() -> Self {
        if dotenv::dotenv().is_err() {
            info!("no .env file found");
        }

        let api_key = var("GOOGLE_MAPS_API_KEY").or_else(|_| var("GOOGLE_API_KEY")).ok();
        if api_key.is_none() {
            warn!("GOOGLE_MAPS_API_KEY not set, route requests will fail");
        }

        Self {
            host: try_load("HOST", "127.0.0.1"),
            port: try_load("PORT", "3000"),
            api_key,
            api_base: load_or("GOOGLE_MAPS_API_BASE", google_maps::DEFAULT_API_BASE),
            data_dir: var("DATA_DIR").ok().map(PathBuf::from),
            search_url: load_or("GOOGLE_MAPS_SEARCH_URL", maps_links::DEFAULT_SEARCH_BASE),
            directions_url: load_or(
                "GOOGLE_MAPS_DIRECTIONS_URL",
                maps_links::DEFAULT_DIRECTIONS_BASE,
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            api_key: None,
            api_base: google_maps::DEFAULT_API_BASE.into(),
            data_dir: None,
            search_url: maps_links::DEFAULT_SEARCH_BASE.into(),
            directions_url: maps_links::DEFAULT_DIRECTIONS_BASE.into(),
        }
    }
}

fn var(key: &str) -> Result<String, env::VarError> {
    env::var(key).and_then(|value| match value.trim() {
        "" => Err(env::VarError::NotPresent),
        trimmed => Ok(trimmed.to_string()),
    })
}

fn load_or(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|_| default.to_string())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let fallback = || {
        default
            .parse()
            .unwrap_or_else(|_| unreachable!("default for {key} must parse"))
    };

    match var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            fallback()
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            fallback()
        }
    }
}

#[test]
fn try_load_falls_back_on_invalid_value() {
    env::set_var("WAYPOINTER_TEST_PORT", "not-a-port");
    let port: u16 = try_load("WAYPOINTER_TEST_PORT", "3000");
    assert_eq!(port, 3000);

    env::set_var("WAYPOINTER_TEST_PORT", "8080");
    let port: u16 = try_load("WAYPOINTER_TEST_PORT", "3000");
    assert_eq!(port, 8080);
}

#[test]
fn blank_values_count_as_unset() {
    env::set_var("WAYPOINTER_TEST_BLANK", "   ");
    assert_eq!(load_or("WAYPOINTER_TEST_BLANK", "fallback"), "fallback");
}
