use std::env;
use std::time::Duration;

use dataset::SheetConfig;

use crate::error::ConfigError;

const LOAD_TIMEOUT_ENV: &str = "CHARTLAB_LOAD_TIMEOUT_SECS";

/// Upper bound for the startup fetch of the primary source.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServicesConfig {
    pub sheet: Option<SheetConfig>,
    pub load_timeout: Duration,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            sheet: None,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }
}

impl ServicesConfig {
    /// Reads `CHARTLAB_SHEET_CSV_URL` and `CHARTLAB_LOAD_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimeout` if the timeout is not a positive number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let load_timeout = match env::var(LOAD_TIMEOUT_ENV) {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => DEFAULT_LOAD_TIMEOUT,
        };
        Ok(Self {
            sheet: SheetConfig::from_env(),
            load_timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidTimeout {
        var: LOAD_TIMEOUT_ENV,
        raw: raw.to_string(),
    };
    let secs: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}
