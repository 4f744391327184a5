use crate::constants;
use anyhow::{Context, Result};
use ini::{Ini, Properties};
use std::path::PathBuf;
use tracing::debug;

/// Role settings of the target profile as found in the shared config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    pub role_arn: String,
    pub mfa_serial: Option<String>,
    pub region: Option<String>,
}

impl ProfileConfig {
    fn from_ini_section(profile: &str, section: &Properties) -> Result<Self> {
        let role_arn = non_empty(section, "role_arn")
            .with_context(|| format!("role_arn not found in profile '{profile}'"))?;

        Ok(Self {
            role_arn,
            mfa_serial: non_empty(section, "mfa_serial"),
            region: non_empty(section, "region"),
        })
    }
}

/// Lookup of profile settings by name
pub trait ProfileSource {
    fn load_profile(&self, profile: &str) -> Result<ProfileConfig>;
}

/// Reads profiles from an AWS shared config file
#[derive(Debug, Clone)]
pub struct SharedConfigFile {
    path: PathBuf,
}

impl SharedConfigFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `$AWS_CONFIG_FILE`, falling back to `~/.aws/config`
    pub fn from_env() -> Result<Self> {
        let path =
            constants::get_aws_config_path().context("Failed to determine AWS config path")?;
        Ok(Self::new(path))
    }
}

impl ProfileSource for SharedConfigFile {
    fn load_profile(&self, profile: &str) -> Result<ProfileConfig> {
        debug!("Reading profile '{}' from {}", profile, self.path.display());

        let ini = Ini::load_from_file(&self.path).with_context(|| {
            format!("Failed to load AWS config file: {}", self.path.display())
        })?;

        let section = ini
            .section(Some(section_name(profile)))
            .with_context(|| format!("Profile '{profile}' not found in config"))?;

        ProfileConfig::from_ini_section(profile, section)
    }
}

/// The `default` profile keeps its bare name; every other profile lives under
/// `[profile <name>]`.
fn section_name(profile: &str) -> String {
    if profile == "default" {
        profile.to_string()
    } else {
        format!("profile {profile}")
    }
}

fn non_empty(section: &Properties, key: &str) -> Option<String> {
    section
        .get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
