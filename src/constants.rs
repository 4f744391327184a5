use std::{env, path::PathBuf};

/// AWS configuration directory name
pub const AWS_CONFIG_DIR_NAME: &str = ".aws";

/// AWS configuration file name
pub const AWS_CONFIG_FILE_NAME: &str = "config";

/// Role session name sent with every AssumeRole request
pub const SESSION_NAME: &str = "via-msk";

/// Source profile used when neither the flag nor the target profile names one
pub const DEFAULT_SOURCE_PROFILE: &str = "default";

/// Requested session lifetime when `--duration` is omitted
pub const DEFAULT_SESSION_DURATION: &str = "1h";

/// Default AWS region for STS operations when no region is configured
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Prompt written to stderr before reading the MFA code
pub const MFA_PROMPT: &str = "MFA code: ";

/// Get the AWS config file path
/// Respects AWS_CONFIG_FILE environment variable if set
pub fn get_aws_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("AWS_CONFIG_FILE") {
        return Some(PathBuf::from(path));
    }

    dirs::home_dir().map(|home| home.join(AWS_CONFIG_DIR_NAME).join(AWS_CONFIG_FILE_NAME))
}
