use crate::utils::error::{FreteError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(FreteError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FreteError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FreteError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(FreteError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Carrier service codes are non-empty runs of ASCII digits.
pub fn validate_service_codes(field_name: &str, codes: &[String]) -> Result<()> {
    if codes.is_empty() {
        return Err(FreteError::InvalidConfigValue {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one service code is required".to_string(),
        });
    }

    for code in codes {
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(FreteError::InvalidConfigValue {
                field: field_name.to_string(),
                value: code.clone(),
                reason: "Service codes must contain digits only".to_string(),
            });
        }
    }

    Ok(())
}

/// Checks `value` against a closed set, naming the legal values on failure.
pub fn validate_one_of<'a, T: PartialEq + std::fmt::Display>(
    field_name: &str,
    value: T,
    allowed: &'a [T],
) -> Result<&'a T> {
    allowed.iter().find(|v| **v == value).ok_or_else(|| {
        let names: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
        let listed = match names.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
            _ => names.join(""),
        };
        FreteError::invalid_argument(
            field_name,
            format!("only the values {} are supported (got {})", listed, value),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("service.endpoint", "https://example.com").is_ok());
        assert!(validate_url("service.endpoint", "http://example.com").is_ok());
        assert!(validate_url("service.endpoint", "").is_err());
        assert!(validate_url("service.endpoint", "invalid-url").is_err());
        assert!(validate_url("service.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("service.timeout_seconds", 30, 1).is_ok());
        assert!(validate_positive_number("service.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_service_codes() {
        let codes = vec!["40010".to_string(), "41106".to_string()];
        assert!(validate_service_codes("defaults.service_codes", &codes).is_ok());
        assert!(validate_service_codes("defaults.service_codes", &[]).is_err());

        let bad = vec!["40O10".to_string()];
        assert!(validate_service_codes("defaults.service_codes", &bad).is_err());
    }

    #[test]
    fn test_validate_one_of_names_legal_values() {
        assert_eq!(*validate_one_of("nCdFormato", 2, &[1, 2, 3]).unwrap(), 2);

        let err = validate_one_of("nCdFormato", 4, &[1, 2, 3]).unwrap_err();
        assert!(err.to_string().contains("1, 2 or 3"));

        let err = validate_one_of("sCdMaoPropria", "X", &["S", "N"]).unwrap_err();
        assert!(err.to_string().contains("S or N"));
    }
}
