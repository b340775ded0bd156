//! CLI-owned configuration: TOML profiles and credential resolution.
//!
//! Core never sees these types -- it receives a pre-built
//! `DashboardConfig` at the single translation boundary below.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use meraki_api::TlsMode;
use meraki_core::DashboardConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::cli::GlobalOpts;
use crate::error::CliError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ── TOML config structs ──────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name (used when --profile is not specified).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,

    /// Named dashboard profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Dashboard base URL override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// API key (plaintext -- prefer keyring or env var).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Request timeout override in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Path to a custom CA certificate (PEM).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "merakictl", "merakictl")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        })
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("merakictl");
    p
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("MERAKI_").only(&["default_profile"]));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Profile resolution ───────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate the config file + global flags into a `DashboardConfig`.
///
/// This is the single boundary where CLI config types cross into core.
pub fn build_dashboard_config(global: &GlobalOpts) -> Result<DashboardConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    let api_key = resolve_api_key(profile, &profile_name, global)?;
    let mut config = DashboardConfig::new(api_key);

    // Base URL: flag / env > profile > built-in default
    if let Some(raw) = global
        .base_url
        .as_deref()
        .or_else(|| profile.and_then(|p| p.base_url.as_deref()))
    {
        let url: url::Url = raw.parse().map_err(|_| CliError::Validation {
            field: "base-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
        config = config.with_base_url(url);
    }

    // Timeout: flag / env > profile > default
    let timeout_secs = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    config = config.with_timeout(Duration::from_secs(timeout_secs));

    // TLS: insecure flag wins, then a profile CA cert, then system store
    let tls = if global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca_cert) = profile.and_then(|p| p.ca_cert.clone()) {
        TlsMode::CustomCa(ca_cert)
    } else {
        TlsMode::System
    };
    config = config.with_tls(tls);

    Ok(config)
}

// ── Credential helpers ───────────────────────────────────────────────

/// Resolve the API key from the credential chain:
/// CLI flag / env -> profile's named env var -> keyring -> plaintext.
fn resolve_api_key(
    profile: Option<&Profile>,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    // 1. CLI flag (MERAKI_API_KEY arrives here too, via clap's env support)
    if let Some(ref key) = global.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    // 2. Profile's api_key_env -> env var lookup
    if let Some(env_name) = profile.and_then(|p| p.api_key_env.as_deref()) {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new("merakictl", &format!("{profile_name}/api-key")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    if let Some(key) = profile.and_then(|p| p.api_key.as_deref()) {
        return Ok(SecretString::from(key.to_owned()));
    }

    Err(CliError::NoCredentials {
        profile: profile_name.into(),
    })
}
