//! Configuration for the connectivity probe

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use serde::{Deserialize, Serialize};
use log::debug;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header that carries the key when none is configured
pub const DEFAULT_AUTH_HEADER: &str = "api-key";

pub const ENV_API_KEY: &str = "AZURE_API_KEY";
pub const ENV_ENDPOINT_URL: &str = "AZURE_ENDPOINT_URL";
pub const ENV_MODEL: &str = "AZURE_MODEL";
pub const ENV_API_VERSION: &str = "AZURE_API_VERSION";
pub const ENV_AUTH_HEADER: &str = "AZURE_AUTH_HEADER";
pub const ENV_TIMEOUT_SECS: &str = "AZURE_TIMEOUT_SECS";

fn default_timeout_secs() -> u64
{   DEFAULT_TIMEOUT_SECS
}

/// Credentials and routing needed to reach the chat endpoint.
///
/// Built once before the probe runs and only read afterwards.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProbeConfig
{   /// Secret API key
    pub api_key: String
  , /// Fully qualified chat completions URL
    pub endpoint_url: String
  , /// Headers sent with the request, auth header included
    #[serde(default)]
    pub headers: BTreeMap<String, String>
  , /// Query string parameters (e.g. api-version)
    #[serde(default)]
    pub params: BTreeMap<String, String>
  , /// Model or deployment name
    pub model: String
  , /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64
}

impl ProbeConfig
{   /// Create a config with the default JSON and auth headers
    pub fn new(
      api_key: impl Into<String>
    , endpoint_url: impl Into<String>
    , model: impl Into<String>
    ) -> Self
    {   let api_key = api_key.into();
        let mut headers = BTreeMap::new();
        headers.insert(
          "Content-Type".to_string()
        , "application/json".to_string()
        );
        headers.insert(DEFAULT_AUTH_HEADER.to_string(), api_key.clone());

        ProbeConfig
        {   api_key
          , endpoint_url: endpoint_url.into()
          , headers
          , params: BTreeMap::new()
          , model: model.into()
          , timeout_secs: DEFAULT_TIMEOUT_SECS
        }
    }

    pub fn with_header(
      mut self
    , name: impl Into<String>
    , value: impl Into<String>
    ) -> Self
    {   self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_param(
      mut self
    , name: impl Into<String>
    , value: impl Into<String>
    ) -> Self
    {   self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self
    {   self.timeout_secs = secs;
        self
    }

    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   match dotenvy::dotenv()
        {   Ok(path) => debug!("Loaded environment from {}", path.display())
          , Err(e) => debug!("No .env file loaded: {}", e)
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any name -> value source.
    ///
    /// Reads the `AZURE_*` variables; `AZURE_API_VERSION` becomes the
    /// `api-version` query parameter and `AZURE_AUTH_HEADER` renames the
    /// header carrying the key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, crate::error::Error>
    where
      F: Fn(&str) -> Option<String>
    {   let require = |name: &str| {
          lookup(name)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
              crate::error::Error::MissingConfig(name.to_string())
            })
        };

        let api_key = require(ENV_API_KEY)?;
        let endpoint_url = require(ENV_ENDPOINT_URL)?;
        let model = require(ENV_MODEL)?;

        let auth_header = lookup(ENV_AUTH_HEADER)
          .filter(|v| !v.trim().is_empty())
          .unwrap_or_else(|| DEFAULT_AUTH_HEADER.to_string());

        let timeout_secs = match lookup(ENV_TIMEOUT_SECS)
        {   Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
              crate::error::Error::InvalidConfiguration(format!(
                "{} must be a whole number of seconds, got {:?}",
                ENV_TIMEOUT_SECS, raw
              ))
            })?
          , None => DEFAULT_TIMEOUT_SECS
        };

        let mut config = ProbeConfig::new(api_key, endpoint_url, model)
          .with_timeout_secs(timeout_secs);
        if auth_header != DEFAULT_AUTH_HEADER
        {   config.headers.remove(DEFAULT_AUTH_HEADER);
            let key = config.api_key.clone();
            config = config.with_header(auth_header, key);
        }
        if let Some(version) = lookup(ENV_API_VERSION)
          .filter(|v| !v.trim().is_empty())
        {   config = config.with_param("api-version", version);
        }

        config.validate()?;
        debug!("Loaded probe config: {:?}", config);
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_json_file(
      path: impl AsRef<Path>
    ) -> Result<Self, crate::error::Error>
    {   let path = path.as_ref();
        debug!("Reading probe config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        let mut config: ProbeConfig = serde_json::from_str(&raw)?;
        config.fill_default_headers();
        config.validate()?;
        Ok(config)
    }

    /// Add `Content-Type` and the `api-key` header unless already present.
    ///
    /// Any header whose value is the key counts as the auth header, so a
    /// file naming its own (e.g. `Ocp-Apim-Subscription-Key`) is left alone.
    pub fn fill_default_headers(&mut self)
    {   let has_content_type = self.headers
          .keys()
          .any(|k| k.eq_ignore_ascii_case("content-type"));
        if !has_content_type
        {   self.headers.insert(
              "Content-Type".to_string()
            , "application/json".to_string()
            );
        }

        let carries_key = self.headers
          .values()
          .any(|v| *v == self.api_key);
        if !carries_key
        {   debug!("No header carries the API key, adding {}", DEFAULT_AUTH_HEADER);
            self.headers.insert(
              DEFAULT_AUTH_HEADER.to_string()
            , self.api_key.clone()
            );
        }
    }

    /// Reject values the probe could never succeed with
    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   if self.api_key.trim().is_empty()
        {   return Err(crate::error::Error::MissingConfig(
              "api_key".to_string()
            ));
        }
        if self.model.trim().is_empty()
        {   return Err(crate::error::Error::MissingConfig(
              "model".to_string()
            ));
        }
        if !(self.endpoint_url.starts_with("https://")
          || self.endpoint_url.starts_with("http://"))
        {   return Err(crate::error::Error::InvalidConfiguration(format!(
              "endpoint URL must start with http:// or https://, got {:?}",
              self.endpoint_url
            )));
        }
        if self.timeout_secs == 0
        {   return Err(crate::error::Error::InvalidConfiguration(
              "timeout must be at least one second".to_string()
            ));
        }
        Ok(())
    }

    /// First ten characters of the key, for display
    pub fn key_prefix(&self) -> String
    {   self.api_key.chars().take(10).collect()
    }
}

impl fmt::Debug for ProbeConfig
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   let masked = format!("{}...", self.key_prefix());
        let headers: BTreeMap<&str, &str> = self.headers
          .iter()
          .map(|(k, v)| {
            if *v == self.api_key
            {   (k.as_str(), masked.as_str())
            } else
            {   (k.as_str(), v.as_str())
            }
          })
          .collect();
        f.debug_struct("ProbeConfig")
          .field("api_key", &masked)
          .field("endpoint_url", &self.endpoint_url)
          .field("headers", &headers)
          .field("params", &self.params)
          .field("model", &self.model)
          .field("timeout_secs", &self.timeout_secs)
          .finish()
    }
}
