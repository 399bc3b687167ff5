//! Client configuration baked in from the build environment.
//!
//! SYSTEM CONTEXT
//! ==============
//! The same WASM bundle is built once per deployment target, so settings are
//! read with `option_env!` at compile time rather than at page load.
//!
//! - `SAUDE_API_BASE`: backend base URL (default `/api`, reverse-proxied in dev)
//! - `SAUDE_LEGACY_TOKEN`: `true` (default) or `false`; keeps bearer-token login alive
//! - `SAUDE_DEFAULT_TIME_ZONE`: IANA zone used when the browser cannot report one

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_TIME_ZONE: &str = "America/Sao_Paulo";

/// Errors produced while parsing configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid boolean for {var}: {value}")]
    InvalidBool { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every relative API path is appended to. Never ends with `/`.
    pub api_base: String,
    /// Capability flag for the deprecated bearer-token login path.
    pub legacy_bearer_token: bool,
    pub default_time_zone: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            legacy_bearer_token: true,
            default_time_zone: DEFAULT_TIME_ZONE.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build config from the variables captured at compile time.
    ///
    /// An invalid `SAUDE_LEGACY_TOKEN` falls back to the default and is logged,
    /// since a bundle that is already built has no better recovery.
    pub fn from_env() -> Self {
        match Self::from_values(
            option_env!("SAUDE_API_BASE"),
            option_env!("SAUDE_LEGACY_TOKEN"),
            option_env!("SAUDE_DEFAULT_TIME_ZONE"),
        ) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("config: {e}; using defaults");
                Self::default()
            }
        }
    }

    /// Parse raw optional values into a typed config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBool`] if the legacy-token flag is not a
    /// recognized boolean.
    pub fn from_values(
        api_base: Option<&str>,
        legacy_token: Option<&str>,
        time_zone: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let api_base = normalize_api_base(api_base);
        let legacy_bearer_token = parse_bool("SAUDE_LEGACY_TOKEN", legacy_token, true)?;
        let default_time_zone = time_zone
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .unwrap_or(DEFAULT_TIME_ZONE)
            .to_owned();
        Ok(Self { api_base, legacy_bearer_token, default_time_zone })
    }

    /// Absolute or origin-relative URL for an API path.
    ///
    /// Paths that already carry a scheme are returned untouched.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        format!("{}{path}", self.api_base)
    }

    pub fn google_login_url(&self) -> String {
        self.url("/auth/google/login")
    }

    pub fn google_calendar_url(&self) -> String {
        self.url("/auth/google/calendar")
    }
}

fn normalize_api_base(raw: Option<&str>) -> String {
    let base = raw.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(DEFAULT_API_BASE);
    base.trim_end_matches('/').to_owned()
}

fn parse_bool(var: &'static str, raw: Option<&str>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var, value: value.to_owned() }),
    }
}
