use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Regex for validating phone numbers
    /// Optional leading plus, then digits with optional spaces or hyphens
    /// - Valid: "+62 812-3456-7890", "08123456789", "555 0100"
    /// - Invalid: "phone", "12", "+", "0812--", "call me"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]+(?:[ -]?[0-9]+)*$").unwrap();

    /// Largest amount a NUMERIC(14, 2) column holds.
    pub static ref MAX_AMOUNT: Decimal = Decimal::new(99_999_999_999_999, 2);
}

/// Decimal places kept for money amounts.
pub const AMOUNT_SCALE: u32 = 2;

/// Rejects strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Money amounts must be positive, have at most two decimal places and fit
/// under [`MAX_AMOUNT`].
pub fn positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("not_positive").with_message("must be positive".into()));
    }
    if value.normalize().scale() > AMOUNT_SCALE {
        return Err(ValidationError::new("scale")
            .with_message("must have at most two decimal places".into()));
    }
    if *value > *MAX_AMOUNT {
        return Err(ValidationError::new("too_large").with_message("amount is too large".into()));
    }
    Ok(())
}

/// Phone numbers need at least 5 digits on top of matching [`PHONE_REGEX`].
pub fn phone_number(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !PHONE_REGEX.is_match(value) || digits < 5 {
        return Err(ValidationError::new("phone").with_message("invalid phone number".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_valid() {
        assert!(phone_number("+62 812-3456-7890").is_ok());
        assert!(phone_number("08123456789").is_ok());
        assert!(phone_number("555 0100").is_ok());
    }

    #[test]
    fn test_phone_invalid() {
        assert!(phone_number("phone").is_err());
        assert!(phone_number("12").is_err()); // too short
        assert!(phone_number("+").is_err());
        assert!(phone_number("0812--").is_err()); // trailing separator
        assert!(phone_number("call me").is_err());
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Flood Fund").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_positive_amount() {
        assert!(positive_amount(&Decimal::new(1, 2)).is_ok());
        assert!(positive_amount(&Decimal::ZERO).is_err());
        assert!(positive_amount(&Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_amount_bounds() {
        assert!(positive_amount(&MAX_AMOUNT).is_ok());
        assert!(positive_amount(&Decimal::new(1500, 3)).is_ok()); // 1.500 normalizes to 1.5
        assert!(positive_amount(&Decimal::new(1001, 3)).is_err());
        assert!(positive_amount(&(*MAX_AMOUNT + Decimal::new(1, 2))).is_err());
        assert!(positive_amount(&Decimal::from_i128_with_scale(10_i128.pow(27), 0)).is_err());
    }
}
