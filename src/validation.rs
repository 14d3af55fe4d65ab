use crate::constants::MIN_DELAY_MS;
use crate::error::AppError;
use std::time::Duration;
use url::Url;

/// Clamp a configured delay to the minimum the tracker will honor.
pub fn clamp_delay_ms(delay_ms: i64) -> Duration {
    let floor = i64::try_from(MIN_DELAY_MS).unwrap_or(i64::MAX);
    let ms = u64::try_from(delay_ms.max(floor)).unwrap_or(MIN_DELAY_MS);
    Duration::from_millis(ms)
}

/// Validate a Discord application id (a numeric snowflake).
pub fn validate_application_id(id: &str) -> Result<(), AppError> {
    let err = |reason: &str| AppError::InvalidInput {
        field: "application id",
        reason: reason.into(),
    };

    if id.is_empty() {
        return Err(err("cannot be empty"));
    }
    if !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err("must contain only digits"));
    }

    Ok(())
}

/// Validate a URL before handing it to the desktop.
pub fn validate_web_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw).map_err(|e| AppError::InvalidInput {
        field: "url",
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::InvalidInput {
            field: "url",
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_delay() {
        assert_eq!(clamp_delay_ms(5000), Duration::from_millis(5000));
        assert_eq!(clamp_delay_ms(200), Duration::from_millis(200));
        assert_eq!(clamp_delay_ms(10), Duration::from_millis(200));
        assert_eq!(clamp_delay_ms(0), Duration::from_millis(200));
        assert_eq!(clamp_delay_ms(-500), Duration::from_millis(200));
    }

    #[test]
    fn test_application_id() {
        assert!(validate_application_id("634416362898325534").is_ok());
        assert!(validate_application_id("").is_err());
        assert!(validate_application_id("12ab").is_err());
        assert!(validate_application_id(" 123").is_err());
    }

    #[test]
    fn test_web_url() {
        assert!(validate_web_url("https://gamemaker.io").is_ok());
        assert!(validate_web_url("http://forum.gamemaker.io/x").is_ok());
        assert!(validate_web_url("file:///etc/passwd").is_err());
        assert!(validate_web_url("not a url").is_err());
    }
}
