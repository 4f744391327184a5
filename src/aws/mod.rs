use chrono::{DateTime, Utc};

pub mod arn;
pub mod sts;

/// MFA device and the one-time code read from the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfaToken {
    pub serial_number: String,
    pub token_code: String,
}

/// Parameters of a single AssumeRole call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeRoleRequest {
    pub role_arn: String,
    pub session_name: String,
    pub duration_seconds: i32,
    pub mfa: Option<MfaToken>,
}

/// AWS temporary credentials returned by AssumeRole
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporaryCredential {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub assumed_role_arn: String,
    pub expiration: DateTime<Utc>,
}

pub use arn::{Arn, IamResource, validate_iam_arn};
pub use sts::{RoleAssumer, SessionConnector, StsConnector, StsSession};
