use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use utility::scaling::ScalingDefaults;
use utility::{Error, Result};

pub const DEFAULT_PROVIDER_URL: &str = "http://127.0.0.1:8081/";
pub const DEFAULT_SECRET_MOUNT_PATH: &str = "/run/secrets/";

/// environment variables read by GatewayConfig::from_env
pub const PROVIDER_URL_ENV: &str = "functions_provider_url";
pub const INCLUDE_USAGE_ENV: &str = "include_usage";
pub const UPSTREAM_TIMEOUT_ENV: &str = "upstream_timeout";
pub const BASIC_AUTH_ENV: &str = "basic_auth";
pub const SECRET_MOUNT_PATH_ENV: &str = "secret_mount_path";
pub const DEFAULT_MIN_REPLICAS_ENV: &str = "default_min_replicas";
pub const DEFAULT_MAX_REPLICAS_ENV: &str = "default_max_replicas";
pub const DEFAULT_SCALING_FACTOR_ENV: &str = "default_scaling_factor";

/// GatewayConfig everything needed to build a query against the functions provider
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    /// base url of the provider's management API
    pub functions_provider_url: String,
    /// ask the provider to include usage metrics
    pub include_usage: bool,
    /// overall deadline for a single provider call, e.g. "5s" or "1500ms"
    pub upstream_timeout: Option<String>,
    /// read basic-auth credentials from secret_mount_path
    pub basic_auth: bool,
    pub secret_mount_path: String,
    pub scaling: ScalingDefaults,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            functions_provider_url: DEFAULT_PROVIDER_URL.into(),
            include_usage: false,
            upstream_timeout: None,
            basic_auth: false,
            secret_mount_path: DEFAULT_SECRET_MOUNT_PATH.into(),
            scaling: ScalingDefaults::default(),
        }
    }
}

impl GatewayConfig {
    /// from_file reads a YAML config, ${VAR:-default} placeholders are resolved
    /// against the process environment before parsing
    pub fn from_file(path: &str) -> Result<GatewayConfig> {
        let file_path = PathBuf::from(shellexpand::tilde(path).into_owned()).clean();
        let data = std::fs::read_to_string(&file_path).map_err(|e| {
            Error::Custom(format!(
                "can't read config file {}: {}",
                file_path.to_string_lossy(),
                e
            ))
        })?;
        Self::from_yaml(&data, &std::env::vars().collect())
    }

    pub fn from_yaml(
        data: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> Result<GatewayConfig> {
        let data = utility::envsubst::substitute(data, vars)?;
        let config: GatewayConfig = serde_yaml::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// from_env starts from the defaults and applies environment overrides
    pub fn from_env() -> Result<GatewayConfig> {
        let config = GatewayConfig::default().apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// apply_env overrides fields for every variable `lookup` knows about
    pub fn apply_env<F>(mut self, lookup: F) -> Result<GatewayConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = non_empty(lookup(PROVIDER_URL_ENV)) {
            self.functions_provider_url = url;
        }
        if let Some(val) = non_empty(lookup(INCLUDE_USAGE_ENV)) {
            self.include_usage = parse_bool(&val);
        }
        if let Some(val) = non_empty(lookup(UPSTREAM_TIMEOUT_ENV)) {
            self.upstream_timeout = Some(val);
        }
        if let Some(val) = non_empty(lookup(BASIC_AUTH_ENV)) {
            self.basic_auth = parse_bool(&val);
        }
        if let Some(val) = non_empty(lookup(SECRET_MOUNT_PATH_ENV)) {
            self.secret_mount_path = val;
        }
        if let Some(val) = non_empty(lookup(DEFAULT_MIN_REPLICAS_ENV)) {
            self.scaling.min_replicas = parse_u64(DEFAULT_MIN_REPLICAS_ENV, &val)?;
        }
        if let Some(val) = non_empty(lookup(DEFAULT_MAX_REPLICAS_ENV)) {
            self.scaling.max_replicas = parse_u64(DEFAULT_MAX_REPLICAS_ENV, &val)?;
        }
        if let Some(val) = non_empty(lookup(DEFAULT_SCALING_FACTOR_ENV)) {
            self.scaling.scaling_factor = parse_u64(DEFAULT_SCALING_FACTOR_ENV, &val)?;
        }
        Ok(self)
    }

    /// validate checks the provider url and the default scaling factor
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(self.functions_provider_url.trim()).map_err(|e| {
            Error::Custom(format!(
                "functions_provider_url is not a valid URL: {:?}: {}",
                self.functions_provider_url, e
            ))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::Custom(format!(
                "functions_provider_url must be http or https, got: {}",
                self.functions_provider_url
            )));
        }
        self.request_timeout()?;
        self.scaling.validate()
    }

    /// request_timeout parses upstream_timeout, None when unset
    pub fn request_timeout(&self) -> Result<Option<Duration>> {
        match self.upstream_timeout.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => parse_duration::parse(raw).map(Some).map_err(|e| {
                Error::Custom(format!("invalid upstream_timeout {:?}: {}", raw, e))
            }),
        }
    }

    /// secret_mount_path with `~` expanded
    pub fn secret_mount_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.secret_mount_path).into_owned()).clean()
    }
}

fn non_empty(val: Option<String>) -> Option<String> {
    val.filter(|v| !v.trim().is_empty())
}

fn parse_bool(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

fn parse_u64(key: &str, val: &str) -> Result<u64> {
    val.trim()
        .parse::<u64>()
        .map_err(|e| Error::Custom(format!("{} should be of type uint, got {:?}: {}", key, val, e)))
}
