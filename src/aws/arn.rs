use std::{fmt, str::FromStr};

use anyhow::{Context, Result, bail};

/// Amazon Resource Name split into its fixed fields.
///
/// `resource` holds the resource type (`role`, `mfa`, `user`, ...) and
/// `resource_id` everything after the first `/`, so
/// `arn:aws:iam::111122223333:role/path/Dev` yields `resource == "role"` and
/// `resource_id == "path/Dev"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
    pub resource_id: String,
}

impl FromStr for Arn {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(6, ':');

        match parts.next() {
            Some("arn") => {}
            _ => bail!("arn: invalid prefix in '{}'", s),
        }

        let partition = parts.next().context("arn: not enough sections")?;
        let service = parts.next().context("arn: not enough sections")?;
        let region = parts.next().context("arn: not enough sections")?;
        let account_id = parts.next().context("arn: not enough sections")?;
        let resource_part = parts.next().context("arn: not enough sections")?;

        if partition.is_empty() {
            bail!("arn: empty partition in '{}'", s);
        }
        if service.is_empty() {
            bail!("arn: empty service in '{}'", s);
        }
        if resource_part.is_empty() {
            bail!("arn: empty resource in '{}'", s);
        }

        let (resource, resource_id) = match resource_part.split_once('/') {
            Some((kind, id)) => (kind, id),
            None => (resource_part, ""),
        };

        Ok(Self {
            partition: partition.to_string(),
            service: service.to_string(),
            region: region.to_string(),
            account_id: account_id.to_string(),
            resource: resource.to_string(),
            resource_id: resource_id.to_string(),
        })
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )?;
        if !self.resource_id.is_empty() {
            write!(f, "/{}", self.resource_id)?;
        }
        Ok(())
    }
}

/// Kind of IAM resource a profile key is expected to reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IamResource {
    Role,
    Mfa,
}

impl IamResource {
    fn resource_type(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::Mfa => "mfa",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Self::Role => "role_arn",
            Self::Mfa => "mfa_serial",
        }
    }
}

/// Parse `value` and require an IAM ARN of the given resource class.
///
/// Rejects when either the service is not `iam` or the resource type differs.
pub fn validate_iam_arn(value: &str, expected: IamResource) -> Result<Arn> {
    let key = expected.config_key();

    let arn: Arn = value
        .parse()
        .with_context(|| format!("invalid {key} in config: '{value}'"))?;

    if arn.service != "iam" || arn.resource != expected.resource_type() {
        bail!(
            "invalid {} in config: '{}' is not an iam {} ARN",
            key,
            value,
            expected.resource_type()
        );
    }

    Ok(arn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_arn() {
        let arn: Arn = "arn:aws:iam::111122223333:role/Dev".parse().unwrap();
        assert_eq!(arn.partition, "aws");
        assert_eq!(arn.service, "iam");
        assert_eq!(arn.region, "");
        assert_eq!(arn.account_id, "111122223333");
        assert_eq!(arn.resource, "role");
        assert_eq!(arn.resource_id, "Dev");
    }

    #[test]
    fn test_parse_role_arn_with_path() {
        let arn: Arn = "arn:aws:iam::111122223333:role/teams/platform/Dev"
            .parse()
            .unwrap();
        assert_eq!(arn.resource, "role");
        assert_eq!(arn.resource_id, "teams/platform/Dev");
        assert_eq!(
            arn.to_string(),
            "arn:aws:iam::111122223333:role/teams/platform/Dev"
        );
    }

    #[test]
    fn test_parse_keeps_colons_in_resource() {
        let arn: Arn = "arn:aws:logs:us-east-1:111122223333:log-group:my-group:*"
            .parse()
            .unwrap();
        assert_eq!(arn.service, "logs");
        assert_eq!(arn.resource, "log-group:my-group:*");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("".parse::<Arn>().is_err());
        assert!("not-an-arn".parse::<Arn>().is_err());
        assert!("arn:aws:iam::111122223333".parse::<Arn>().is_err());
        assert!("urn:aws:iam::111122223333:role/Dev".parse::<Arn>().is_err());
        assert!("arn::iam::111122223333:role/Dev".parse::<Arn>().is_err());
        assert!("arn:aws:iam::111122223333:".parse::<Arn>().is_err());
    }

    #[test]
    fn test_validate_role_accepts_role_arn() {
        let arn =
            validate_iam_arn("arn:aws:iam::111122223333:role/Dev", IamResource::Role).unwrap();
        assert_eq!(arn.resource_id, "Dev");
    }

    #[test]
    fn test_validate_role_accepts_other_partitions() {
        assert!(
            validate_iam_arn("arn:aws-cn:iam::111122223333:role/Dev", IamResource::Role).is_ok()
        );
        assert!(
            validate_iam_arn("arn:aws-us-gov:iam::111122223333:role/Dev", IamResource::Role).is_ok()
        );
    }

    #[test]
    fn test_validate_role_rejects_user_arn() {
        let err =
            validate_iam_arn("arn:aws:iam::111122223333:user/Dev", IamResource::Role).unwrap_err();
        assert!(err.to_string().contains("invalid role_arn in config"));
    }

    #[test]
    fn test_validate_role_rejects_wrong_service_even_with_role_resource() {
        // Either mismatch is enough to reject.
        let err =
            validate_iam_arn("arn:aws:sts::111122223333:role/Dev", IamResource::Role).unwrap_err();
        assert!(err.to_string().contains("invalid role_arn in config"));
    }

    #[test]
    fn test_validate_role_rejects_unparseable_value() {
        let err = validate_iam_arn("Dev", IamResource::Role).unwrap_err();
        assert!(err.to_string().contains("invalid role_arn in config"));
    }

    #[test]
    fn test_validate_mfa() {
        assert!(
            validate_iam_arn("arn:aws:iam::111122223333:mfa/dev-token", IamResource::Mfa).is_ok()
        );

        let err = validate_iam_arn("arn:aws:iam::111122223333:role/Dev", IamResource::Mfa)
            .unwrap_err();
        assert!(err.to_string().contains("invalid mfa_serial in config"));

        let err = validate_iam_arn("arn:aws:s3:::mfa/dev-token", IamResource::Mfa).unwrap_err();
        assert!(err.to_string().contains("invalid mfa_serial in config"));
    }
}
