use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_PER_PAGE: u32 = 5;
const APP_DATA_DIR: &str = "workout-log";

pub struct Config {
    pub api_base_url: String,
    pub per_page: u32,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let api_base_url = try_load("WORKOUT_API_URL", DEFAULT_API_URL.to_string());
        let per_page = match try_load("WORKOUT_PER_PAGE", DEFAULT_PER_PAGE) {
            0 => {
                warn!("WORKOUT_PER_PAGE must be positive, using {DEFAULT_PER_PAGE}");
                DEFAULT_PER_PAGE
            }
            n => n,
        };

        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            per_page,
            data_dir: data_dir(),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr + Display>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    let Ok(raw) = var(key) else {
        return default;
    };
    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

fn data_dir() -> PathBuf {
    if let Ok(dir) = var("WORKOUT_LOG_DATA_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::data_dir() {
        Some(base) => base.join(APP_DATA_DIR),
        None => {
            warn!("Could not determine a data directory, using the working directory");
            PathBuf::from(".").join(APP_DATA_DIR)
        }
    }
}
