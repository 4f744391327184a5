use std::{ffi::OsString, time::Duration};

use anyhow::Result;
use clap::{ArgAction, Parser};
use clap_complete::Shell;

use crate::{
    commands::{AssumeCommand, CompletionsCommand},
    constants::DEFAULT_SESSION_DURATION,
    duration::{parse_duration, to_session_seconds},
    error::ExchangeError,
    exchange::Settings,
    output::OutputFormat,
};

/// Long options that may also be spelled with a single dash (`-format-env`).
const SINGLE_DASH_LONG: &[&str] = &[
    "help",
    "version",
    "verbose",
    "source-profile",
    "source-profle",
    "duration",
    "format-env",
    "completions",
];

#[derive(Debug, Clone, Parser)]
#[command(
    name = "stsenv",
    version,
    about = "Assume the IAM role of an AWS profile and print its temporary credentials as shell exports",
    long_about = None,
    after_help = "Example: eval \"$(stsenv dev)\""
)]
pub struct Cli {
    #[arg(
        value_name = "PROFILE",
        required_unless_present = "completions",
        help = "Profile in the AWS config file whose role_arn is assumed"
    )]
    pub profile: Option<String>,

    #[arg(
        long,
        alias = "source-profle",
        value_name = "PROFILE",
        help = "Profile whose credentials call STS [default: default]"
    )]
    pub source_profile: Option<String>,

    #[arg(
        short = 'd',
        long,
        value_name = "DURATION",
        default_value = DEFAULT_SESSION_DURATION,
        value_parser = parse_session_duration,
        help = "Session lifetime, e.g. 1h, 90m, 1h30m"
    )]
    pub duration: Duration,

    #[arg(long, help = "Print NAME=\"value\" lines without `export`, for .env files")]
    pub format_env: bool,

    #[arg(
        short = 'v',
        long,
        action = ArgAction::Count,
        help = "Increase verbosity (-v info, -vv debug, -vvv trace)"
    )]
    pub verbose: u8,

    #[arg(
        long,
        value_enum,
        value_name = "SHELL",
        exclusive = true,
        help = "Print a shell completion script and exit"
    )]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Parse process arguments, accepting single-dash long options.
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    pub fn settings(&self) -> Result<Settings> {
        let profile = self
            .profile
            .clone()
            .ok_or_else(|| anyhow::anyhow!("required profile"))?;

        Ok(Settings {
            profile,
            source_profile: self.source_profile.clone(),
            duration_seconds: to_session_seconds(self.duration)?,
            format: if self.format_env {
                OutputFormat::Env
            } else {
                OutputFormat::Export
            },
        })
    }

    /// Run the selected action and return what belongs on stdout.
    pub async fn execute(self) -> Result<String, ExchangeError> {
        if let Some(shell) = self.completions {
            return Ok(CompletionsCommand { shell }.generate_to_string());
        }

        let settings = self.settings().map_err(ExchangeError::Usage)?;
        AssumeCommand { settings }.execute().await
    }
}

fn parse_session_duration(s: &str) -> Result<Duration, String> {
    let duration = parse_duration(s).map_err(|e| e.to_string())?;
    to_session_seconds(duration).map_err(|e| e.to_string())?;
    Ok(duration)
}

/// Rewrite `-name` / `-name=value` to `--name...` for known long options,
/// leaving everything after `--` untouched.
fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args.into_iter().map(Into::into) {
        if passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|s| {
            let rest = s.strip_prefix('-')?;
            if rest.starts_with('-') {
                return None;
            }
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            SINGLE_DASH_LONG
                .contains(&name)
                .then(|| OsString::from(format!("-{s}")))
        });

        out.push(rewritten.unwrap_or(arg));
    }

    out
}
