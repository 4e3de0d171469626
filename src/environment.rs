use crate::consts::cli_consts::backend::{LOCAL_API_URL, PLACEHOLDER_MARKER, PRODUCTION_API_URL};
use reqwest::Url;
use std::convert::Infallible;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Reasons a backend address cannot be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("backend address is not set")]
    Missing,

    #[error("backend address still contains the `{}` placeholder", PLACEHOLDER_MARKER)]
    Placeholder,

    #[error("invalid backend address `{url}`: {reason}")]
    Invalid { url: String, reason: String },
}

/// Represents the backend deployments the dashboard can talk to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// The deployed backend.
    #[default]
    Production,
    /// A backend running on this machine.
    Local,
    /// Any other backend address, validated lazily.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the backend base address associated with the environment.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Production => PRODUCTION_API_URL.to_string(),
            Environment::Local => LOCAL_API_URL.to_string(),
            Environment::Custom { api_url } => api_url.clone(),
        }
    }

    /// Validates the base address: an absolute http(s) URL with a host that is
    /// not an unedited template value.
    pub fn base_url(&self) -> Result<Url, AddressError> {
        let raw = self.api_url();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Missing);
        }
        if trimmed.to_uppercase().contains(PLACEHOLDER_MARKER) {
            return Err(AddressError::Placeholder);
        }

        let url = Url::parse(trimmed).map_err(|e| AddressError::Invalid {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AddressError::Invalid {
                url: trimmed.to_string(),
                reason: format!("unsupported scheme `{}`", url.scheme()),
            });
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(AddressError::Invalid {
                url: trimmed.to_string(),
                reason: "missing host".to_string(),
            });
        }
        Ok(url)
    }

    /// Joins an endpoint onto the validated base address.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<String, AddressError> {
        let base = self.base_url()?;
        Ok(format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        ))
    }
}

impl FromStr for Environment {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "local" => Ok(Environment::Local),
            _ => Ok(Environment::Custom {
                api_url: s.trim().to_string(),
            }),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "Production"),
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(url: &str) -> Environment {
        Environment::Custom {
            api_url: url.to_string(),
        }
    }

    #[test]
    fn test_named_environments_parse() {
        assert_eq!("production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(" Local ".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!(
            "http://10.0.0.5:8000".parse::<Environment>(),
            Ok(custom("http://10.0.0.5:8000"))
        );
    }

    #[test]
    fn test_builtin_addresses_are_valid() {
        assert!(Environment::Production.base_url().is_ok());
        assert!(Environment::Local.base_url().is_ok());
    }

    #[test]
    // Template values must be reported as configuration errors.
    fn test_placeholder_is_rejected() {
        let env = custom("https://PASTE_YOUR_RAILWAY_URL_HERE");
        assert_eq!(env.base_url(), Err(AddressError::Placeholder));
        assert_eq!(custom("   ").base_url(), Err(AddressError::Missing));
    }

    #[test]
    fn test_relative_or_foreign_addresses_are_rejected() {
        assert!(matches!(
            custom("localhost:8000").base_url(),
            Err(AddressError::Invalid { .. })
        ));
        assert!(matches!(
            custom("/realtime").base_url(),
            Err(AddressError::Invalid { .. })
        ));
        assert!(matches!(
            custom("ftp://hub.example").base_url(),
            Err(AddressError::Invalid { .. })
        ));
    }

    #[test]
    fn test_endpoint_url_joins_without_double_slash() {
        let env = custom("http://hub.example:8000/");
        assert_eq!(
            env.endpoint_url("/realtime").unwrap(),
            "http://hub.example:8000/realtime"
        );
        let env = custom("https://hub.example/api");
        assert_eq!(
            env.endpoint_url("command").unwrap(),
            "https://hub.example/api/command"
        );
    }
}
