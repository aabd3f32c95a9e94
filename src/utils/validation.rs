use crate::utils::error::{DemoError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub const HTTP_SCHEMES: &[&str] = &["http", "https"];
pub const WEBSOCKET_SCHEMES: &[&str] = &["ws", "wss"];

pub fn validate_url(field_name: &str, url_str: &str, allowed_schemes: &[&str]) -> Result<()> {
    if url_str.is_empty() {
        return Err(DemoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) if allowed_schemes.contains(&url.scheme()) => Ok(()),
        Ok(url) => Err(DemoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!(
                "Unsupported URL scheme: {}. Allowed schemes: {}",
                url.scheme(),
                allowed_schemes.join(", ")
            ),
        }),
        Err(e) => Err(DemoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(DemoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DemoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DemoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// MQTT topic names used for publishing must not contain wildcards.
pub fn validate_topic_name(field_name: &str, topic: &str) -> Result<()> {
    validate_non_empty_string(field_name, topic)?;
    if topic.contains(['+', '#']) || topic.contains('\0') {
        return Err(DemoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: topic.to_string(),
            reason: "Topic name cannot contain wildcards or null bytes".to_string(),
        });
    }
    Ok(())
}

/// Subscription filters may use `+` for a whole level and `#` only as the last level.
pub fn validate_topic_filter(field_name: &str, filter: &str) -> Result<()> {
    validate_non_empty_string(field_name, filter)?;
    let invalid = |reason: &str| DemoError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: filter.to_string(),
        reason: reason.to_string(),
    };

    if filter.contains('\0') {
        return Err(invalid("Topic filter cannot contain null bytes"));
    }
    let levels: Vec<&str> = filter.split('/').collect();
    for (i, level) in levels.iter().enumerate() {
        if level.contains('#') && (*level != "#" || i != levels.len() - 1) {
            return Err(invalid("'#' must be the whole last level of a topic filter"));
        }
        if level.contains('+') && *level != "+" {
            return Err(invalid("'+' must occupy a whole topic level"));
        }
    }
    Ok(())
}
