//! Request Validation
//!
//! Input checks performed before anything reaches the subscription service
//! or the store. Rejections here have no side effects.

/// Validate an email address shape.
///
/// Requires exactly one `@`, non-empty local and domain parts, no spaces,
/// and a dotted domain that neither starts nor ends with a dot. This is a
/// shape check, not deliverability verification.
pub fn validate_email(email: &str) -> Result<(), String> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    if trimmed.contains(' ') {
        return Err("Email cannot contain spaces".to_string());
    }

    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err("Email must contain an '@' character".to_string());
    };

    if local.is_empty() {
        return Err("Email local part (before @) cannot be empty".to_string());
    }

    if domain.is_empty() || domain.contains('@') {
        return Err("Email domain part (after @) is malformed".to_string());
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Email domain must contain a dot, not at the start or end".to_string());
    }

    Ok(())
}

/// Require a non-empty (post-trim) field value
pub fn require_field(name: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{name} is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("user.name@subdomain.example.com").is_ok());
        assert!(validate_email("  padded@example.com  ").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        for bad in [
            "",
            "invalid",
            "@example.com",
            "user@",
            "user@@example.com",
            "user name@example.com",
            "user@nodot",
            "user@.example.com",
            "user@example.com.",
        ] {
            assert!(validate_email(bad).is_err(), "expected rejection: {bad:?}");
        }
    }

    #[test]
    fn test_require_field() {
        assert!(require_field("business_name", "Acme").is_ok());
        assert!(require_field("business_name", "   ").is_err());
        assert!(require_field("message", "").is_err());
    }
}
