//! Field validators shared by the stores.
//!
//! Every validator takes the raw value and returns `Ok(())` or the message to
//! show the caller.

use rust_decimal::Decimal;

pub type Validation = Result<(), String>;

pub const PHONE_LENGTH: usize = 12;
pub const USERNAME_MAX_LENGTH: usize = 150;
pub const PRODUCT_NAME_MAX_LENGTH: usize = 64;

/// `DECIMAL(8, 2)`: eight digits in total, two of them after the point.
pub const DECIMAL_MAX_DIGITS: u32 = 8;
pub const DECIMAL_PLACES: u32 = 2;

pub fn validate_phone(value: &str) -> Validation {
    if value.len() == PHONE_LENGTH && value.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(());
    }
    Err(format!(
        "Phone number must be entered in the format: '998901234567'. Exactly {PHONE_LENGTH} digits allowed."
    ))
}

pub fn validate_username(value: &str) -> Validation {
    if value.chars().count() > USERNAME_MAX_LENGTH {
        return Err(format!(
            "Ensure username has at most {USERNAME_MAX_LENGTH} characters."
        ));
    }
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if value.is_empty() || !value.chars().all(allowed) {
        return Err(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .to_string(),
        );
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Validation {
    if value.chars().count() < 8 {
        return Err("This password is too short. It must contain at least 8 characters.".to_string());
    }
    if value.chars().all(|c| c.is_ascii_digit()) {
        return Err("This password is entirely numeric.".to_string());
    }
    Ok(())
}

pub fn validate_product_name(value: &str) -> Validation {
    if value.trim().is_empty() {
        return Err("Name may not be blank.".to_string());
    }
    if value.chars().count() > PRODUCT_NAME_MAX_LENGTH {
        return Err(format!(
            "Ensure name has at most {PRODUCT_NAME_MAX_LENGTH} characters."
        ));
    }
    Ok(())
}

/// Checks that `value` fits a `DECIMAL(8, 2)` column without rounding.
pub fn validate_fixed_point(field: &str, value: Decimal) -> Validation {
    let normalized = value.normalize();
    if normalized.scale() > DECIMAL_PLACES {
        return Err(format!(
            "Ensure that there are no more than {DECIMAL_PLACES} decimal places in {field}."
        ));
    }
    let whole_digits = whole_digit_count(normalized);
    let max_whole = DECIMAL_MAX_DIGITS - DECIMAL_PLACES;
    if whole_digits > max_whole {
        return Err(format!(
            "Ensure that there are no more than {max_whole} digits before the decimal point in {field}."
        ));
    }
    Ok(())
}

fn whole_digit_count(value: Decimal) -> u32 {
    let whole = value.trunc().abs();
    if whole.is_zero() {
        return 0;
    }
    whole.to_string().len() as u32
}

/// Lowercases the domain part of an address; the local part is kept as given.
pub fn normalize_email(email: Option<&str>) -> String {
    let email = email.unwrap_or_default().trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn phone_requires_exactly_twelve_digits() {
        assert!(validate_phone("998901234567").is_ok());
        for bad in ["", "99890123456", "9989012345678", "99890123456a", "+99890123456", "９９８９０１２３４５６７"] {
            assert!(validate_phone(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn username_accepts_django_style_characters() {
        assert!(validate_username("aziz.k+shop@home_1-2").is_ok());
        assert!(validate_username("with space").is_err());
        assert!(validate_username(&"a".repeat(151)).is_err());
    }

    #[test]
    fn password_rules() {
        assert!(validate_password("short1").is_err());
        assert!(validate_password("12345678901").is_err());
        assert!(validate_password("clear-water-1").is_ok());
    }

    #[test]
    fn fixed_point_limits() {
        let ok = |s: &str| validate_fixed_point("price", Decimal::from_str(s).unwrap());
        assert!(ok("999999.99").is_ok());
        assert!(ok("12.50").is_ok());
        assert!(ok("12.500").is_ok());
        assert!(ok("0.05").is_ok());
        assert!(ok("1000000").is_err());
        assert!(ok("1.005").is_err());
        assert!(ok("-999999.99").is_ok());
    }

    #[test]
    fn email_domain_is_lowercased() {
        assert_eq!(normalize_email(Some("Ali.Valiyev@Example.UZ")), "Ali.Valiyev@example.uz");
        assert_eq!(normalize_email(None), "");
        assert_eq!(normalize_email(Some("no-at-sign")), "no-at-sign");
    }
}
