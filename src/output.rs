use chrono::SecondsFormat;

use crate::aws::TemporaryCredential;

/// How credential lines are rendered on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `export NAME="value"`, for `eval` in the calling shell
    #[default]
    Export,
    /// `NAME="value"`, for redirecting into an env file
    Env,
}

impl OutputFormat {
    fn prefix(self) -> &'static str {
        match self {
            Self::Export => "export ",
            Self::Env => "",
        }
    }
}

/// Render the credential set in the fixed variable order.
///
/// `profile` is the target profile the role was assumed for, echoed back as
/// `AWS_PROFILE`.
pub fn render(credential: &TemporaryCredential, profile: &str, format: OutputFormat) -> String {
    let variables = [
        ("AWS_ACCESS_KEY_ID", credential.access_key_id.as_str()),
        ("AWS_SECRET_ACCESS_KEY", credential.secret_access_key.as_str()),
        ("AWS_SESSION_TOKEN", credential.session_token.as_str()),
        ("AWS_SECURITY_TOKEN", credential.session_token.as_str()),
        ("ASSUMED_ROLE", credential.assumed_role_arn.as_str()),
        ("AWS_PROFILE", profile),
    ];

    let prefix = format.prefix();
    let mut out: String = variables
        .iter()
        .map(|(name, value)| format!("{prefix}{name}=\"{value}\"\n"))
        .collect();
    out.push_str(&format!(
        "# this temporary credentials expire at {}\n",
        credential
            .expiration
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    ));

    out
}
