use std::env;

use tracing::{debug, warn};

use crate::errors::RelayError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Load environment variables from a `.env` file in the working directory.
///
/// Missing files are fine; anything else is logged and skipped so a broken
/// `.env` never prevents startup.
pub fn load_env_file() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "Loaded environment from .env file"),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No .env file found");
        }
        Err(e) => warn!("Failed to load .env file: {}", e),
    }
}

/// Runtime settings resolved once at startup from the process environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub openai_model: String,
    pub gemini_model: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, RelayError> {
        let port = match env::var("PORT") {
            Ok(raw) if !raw.is_empty() => raw
                .parse::<u16>()
                .map_err(|_| RelayError::Config(format!("Invalid PORT value: {}", raw)))?,
            _ => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            openai_model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// First non-empty value among the given environment variables.
pub fn env_first(names: &[&str]) -> Option<String> {
    for name in names {
        if let Ok(value) = env::var(name) {
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

pub fn openai_api_key() -> Option<String> {
    env_first(&["OPENAI_API_KEY"])
}

/// Gemini credentials, accepting the older `GOOGLEAI_API_KEY` name as a
/// fallback for existing deployments.
pub fn gemini_api_key() -> Option<String> {
    env_first(&["GEMINI_API_KEY", "GOOGLEAI_API_KEY"])
}
