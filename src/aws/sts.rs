use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use aws_config::{
    BehaviorVersion, ConfigLoader, Region, SdkConfig, profile::ProfileFileCredentialsProvider,
};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_sts::{
    Client as StsClient, error::DisplayErrorContext, operation::assume_role::AssumeRoleOutput,
};
use aws_smithy_types::DateTime as SmithyDateTime;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{AssumeRoleRequest, TemporaryCredential};
use crate::constants::DEFAULT_AWS_REGION;

/// Issues the role-assumption call on an established source session
#[async_trait]
pub trait RoleAssumer {
    async fn assume_role(&self, request: &AssumeRoleRequest) -> Result<TemporaryCredential>;
}

/// Establishes a session bound to an explicitly named source profile
#[async_trait]
pub trait SessionConnector {
    type Session: RoleAssumer + Send + Sync;

    async fn connect(&self, source_profile: &str, region: Option<&str>) -> Result<Self::Session>;
}

/// Connector backed by the profile-file credential provider for one named profile
#[derive(Debug, Clone, Default)]
pub struct StsConnector;

/// STS client authenticated as the source profile
#[derive(Debug, Clone)]
pub struct StsSession {
    client: StsClient,
}

#[async_trait]
impl SessionConnector for StsConnector {
    type Session = StsSession;

    async fn connect(&self, source_profile: &str, region: Option<&str>) -> Result<StsSession> {
        info!("Loading source profile: {}", source_profile);

        let config = load_sdk_config(source_profile, region).await;

        // Resolve once up front so a broken source profile fails before any prompt.
        let provider = config.credentials_provider().with_context(|| {
            format!("No credentials provider for source profile '{source_profile}'")
        })?;
        provider.provide_credentials().await.map_err(|e| {
            anyhow!(
                "Failed to load credentials for source profile '{}': {}",
                source_profile,
                DisplayErrorContext(&e)
            )
        })?;

        debug!("Source profile credentials resolved");

        Ok(StsSession {
            client: StsClient::new(&config),
        })
    }
}

/// Loader whose credentials come only from the named profile's entries in the
/// shared config and credentials files. `AWS_ACCESS_KEY_ID` and friends
/// exported in the calling shell are not consulted.
fn profile_loader(profile: &str) -> ConfigLoader {
    let credentials = ProfileFileCredentialsProvider::builder()
        .profile_name(profile)
        .build();

    aws_config::defaults(BehaviorVersion::latest())
        .profile_name(profile)
        .credentials_provider(credentials)
}

async fn load_sdk_config(profile: &str, region: Option<&str>) -> SdkConfig {
    if let Some(region) = region {
        info!("Using region from target profile: {}", region);
        return profile_loader(profile)
            .region(Region::new(region.to_string()))
            .load()
            .await;
    }

    let loaded = profile_loader(profile).load().await;

    match loaded.region() {
        Some(region) => {
            info!("Using region: {}", region);
            loaded
        }
        None => {
            info!(
                "No region configured, using default {} for STS",
                DEFAULT_AWS_REGION
            );
            profile_loader(profile)
                .region(Region::new(DEFAULT_AWS_REGION))
                .load()
                .await
        }
    }
}

#[async_trait]
impl RoleAssumer for StsSession {
    async fn assume_role(&self, request: &AssumeRoleRequest) -> Result<TemporaryCredential> {
        info!("Calling AWS STS AssumeRole");
        debug!("Role ARN: {}", request.role_arn);
        debug!("Session name: {}", request.session_name);
        debug!("Duration: {} seconds", request.duration_seconds);

        let (serial_number, token_code) = match &request.mfa {
            Some(mfa) => {
                debug!("MFA serial: {}", mfa.serial_number);
                (
                    Some(mfa.serial_number.clone()),
                    Some(mfa.token_code.clone()),
                )
            }
            None => (None, None),
        };

        let response = self
            .client
            .assume_role()
            .role_arn(&request.role_arn)
            .role_session_name(&request.session_name)
            .duration_seconds(request.duration_seconds)
            .set_serial_number(serial_number)
            .set_token_code(token_code)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to assume role: {}", DisplayErrorContext(&e)))?;

        let credentials = credential_from_output(&response)?;

        info!("Successfully obtained AWS credentials");
        Ok(credentials)
    }
}

fn credential_from_output(response: &AssumeRoleOutput) -> Result<TemporaryCredential> {
    let sts_creds = response
        .credentials()
        .context("AWS STS returned no credentials")?;
    let assumed_role = response
        .assumed_role_user()
        .context("AWS STS returned no assumed role user")?;

    Ok(TemporaryCredential {
        access_key_id: sts_creds.access_key_id().to_string(),
        secret_access_key: sts_creds.secret_access_key().to_string(),
        session_token: sts_creds.session_token().to_string(),
        assumed_role_arn: assumed_role.arn().to_string(),
        expiration: to_utc(sts_creds.expiration())?,
    })
}

fn to_utc(instant: &SmithyDateTime) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(instant.secs(), instant.subsec_nanos())
        .with_context(|| format!("Expiration out of range: {instant:?}"))
}
