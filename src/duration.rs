//! Go-style duration literals (`1h30m`, `90m`, `1.5h`, `3600s`).

use std::time::Duration;

use anyhow::{Result, bail};

/// Parse a duration literal made of one or more `<number><unit>` segments.
///
/// Units: `ns`, `us`/`µs`, `ms`, `s`, `m`, `h`. Numbers may carry a fraction.
/// A bare `0` is accepted, matching the Go flag package.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    if s.is_empty() {
        bail!("empty duration");
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut rest = s;
    let mut total_nanos: f64 = 0.0;

    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let num_str = &rest[..num_len];
        if num_str.is_empty() || num_str == "." {
            bail!("invalid duration '{}': expected a number", s);
        }
        let value: f64 = num_str
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid duration '{}': bad number '{}'", s, num_str))?;
        rest = &rest[num_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        let scale = match unit {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60.0 * 1e9,
            "h" => 3600.0 * 1e9,
            "" => bail!("invalid duration '{}': missing unit", s),
            other => bail!("invalid duration '{}': unknown unit '{}'", s, other),
        };
        rest = &rest[unit_len..];

        total_nanos += value * scale;
    }

    if !total_nanos.is_finite() || total_nanos > u64::MAX as f64 {
        bail!("invalid duration '{}': out of range", s);
    }

    Ok(Duration::from_nanos(total_nanos.round() as u64))
}

/// Whole seconds for the STS `DurationSeconds` field.
pub fn to_session_seconds(duration: Duration) -> Result<i32> {
    let secs = duration.as_secs();
    if secs == 0 {
        bail!("session duration must be at least one second");
    }
    i32::try_from(secs).map_err(|_| anyhow::anyhow!("session duration of {secs}s is too long"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_units() {
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("90m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("3600s").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn test_compound_literal() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(
            parse_duration("2h15m30s").unwrap(),
            Duration::from_secs(2 * 3600 + 15 * 60 + 30)
        );
    }

    #[test]
    fn test_fractional_value() {
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
    }

    #[test]
    fn test_default_session_duration_is_one_hour() {
        let duration = parse_duration(crate::constants::DEFAULT_SESSION_DURATION).unwrap();
        assert_eq!(to_session_seconds(duration).unwrap(), 3600);
    }

    #[test]
    fn test_bare_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_invalid_literals() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("60").is_err());
        assert!(parse_duration("1d").is_err());
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("1h-30m").is_err());

        let err = parse_duration("5y").unwrap_err();
        assert!(err.to_string().contains("unknown unit 'y'"));
    }

    #[test]
    fn test_to_session_seconds() {
        assert_eq!(to_session_seconds(Duration::from_secs(3600)).unwrap(), 3600);
        assert_eq!(to_session_seconds(Duration::from_millis(5400_900)).unwrap(), 5400);
        assert!(to_session_seconds(Duration::ZERO).is_err());
        assert!(to_session_seconds(Duration::from_millis(500)).is_err());
        assert!(to_session_seconds(Duration::from_secs(u64::from(u32::MAX))).is_err());
    }
}
