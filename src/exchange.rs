//! One profile-to-credentials exchange, from config lookup to rendered output.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::{
    aws::{
        AssumeRoleRequest, IamResource, MfaToken, RoleAssumer, SessionConnector, validate_iam_arn,
    },
    config::ProfileSource,
    constants::{DEFAULT_SOURCE_PROFILE, SESSION_NAME},
    error::ExchangeError,
    mfa,
    output::{self, OutputFormat},
};

/// Immutable options for a single invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Target profile whose `role_arn` is assumed
    pub profile: String,
    /// Explicit source profile; `"default"` when not given
    pub source_profile: Option<String>,
    pub duration_seconds: i32,
    pub format: OutputFormat,
}

/// Run the exchange and return the text destined for stdout.
///
/// Nothing is written to stdout here; the caller prints the returned string
/// only on success, so a failure never leaves partial credential lines.
pub async fn run<P, C, R, W>(
    settings: &Settings,
    profiles: &P,
    connector: &C,
    input: &mut R,
    prompt_out: &mut W,
) -> Result<String, ExchangeError>
where
    P: ProfileSource,
    C: SessionConnector,
    R: BufRead,
    W: Write,
{
    let profile = profiles
        .load_profile(&settings.profile)
        .map_err(ExchangeError::Config)?;

    validate_iam_arn(&profile.role_arn, IamResource::Role).map_err(ExchangeError::Validation)?;
    if let Some(serial) = &profile.mfa_serial {
        validate_iam_arn(serial, IamResource::Mfa).map_err(ExchangeError::Validation)?;
    }

    let source_profile = settings
        .source_profile
        .as_deref()
        .unwrap_or(DEFAULT_SOURCE_PROFILE);
    debug!(
        "Assuming {} for profile '{}' from source profile '{}'",
        profile.role_arn, settings.profile, source_profile
    );

    let session = connector
        .connect(source_profile, profile.region.as_deref())
        .await
        .map_err(ExchangeError::Config)?;

    let mfa = match &profile.mfa_serial {
        Some(serial) => {
            let code = mfa::read_token_code(input, prompt_out).map_err(ExchangeError::Input)?;
            Some(MfaToken {
                serial_number: serial.clone(),
                token_code: code,
            })
        }
        None => None,
    };

    let request = AssumeRoleRequest {
        role_arn: profile.role_arn.clone(),
        session_name: SESSION_NAME.to_string(),
        duration_seconds: settings.duration_seconds,
        mfa,
    };

    let credential = session
        .assume_role(&request)
        .await
        .map_err(ExchangeError::Exchange)?;

    info!(
        "Assumed {} until {}",
        credential.assumed_role_arn, credential.expiration
    );

    Ok(output::render(&credential, &settings.profile, settings.format))
}
