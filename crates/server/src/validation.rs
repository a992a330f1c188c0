//! Request-parameter checks applied before anything reaches the loan service.

use once_cell::sync::Lazy;
use regex::Regex;

/// Empty, or exactly ten digits.
static MOBILE_NUMBER_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(|[0-9]{10})$").expect("mobile number pattern"));

pub const MOBILE_NUMBER_MESSAGE: &str = "Mobile number must be 10 digits";

pub fn validate_mobile_number_param(value: &str) -> Result<(), &'static str> {
    if MOBILE_NUMBER_PARAM.is_match(value) {
        Ok(())
    } else {
        Err(MOBILE_NUMBER_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_empty_or_ten_digits() {
        assert!(validate_mobile_number_param("").is_ok());
        assert!(validate_mobile_number_param("9876543210").is_ok());
    }

    #[test]
    fn rejects_everything_else() {
        for bad in ["1", "987654321", "98765432100", "98765-4321", " 9876543210", "abcdefghij"] {
            assert_eq!(validate_mobile_number_param(bad), Err(MOBILE_NUMBER_MESSAGE), "{bad:?}");
        }
    }
}
