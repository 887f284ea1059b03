//! # Validation Module
//!
//! Additive input validation. The store operations keep their tolerant
//! contracts (empty supplier names are accepted, unknown ids are
//! no-ops); these checks exist for callers that want to reject bad input
//! early, plus the one check the store itself enforces: installment
//! amounts must be positive.

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::state::AppState;

/// Maximum margin accepted by [`validate_margin_bps`]: 1000%.
/// Generous on purpose; the check exists to catch unit mistakes
/// (entering 1500 for 15%), not to police pricing strategy.
pub const MAX_MARGIN_BPS: u32 = 100_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a supplier name: non-empty, at most 120 characters.
pub fn validate_company_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates a barcode.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
/// - Letters, digits, and hyphens only (covers EAN/UPC plus in-store codes)
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: 32,
        });
    }

    if !barcode.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must contain only letters, digits, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a login name: non-empty, at most 50 characters, no spaces.
/// Uniqueness is checked separately via [`validate_username_available`].
pub fn validate_username(username: &str) -> ValidationResult<()> {
    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 50,
        });
    }

    if username.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Checks that a username is not already taken (case-sensitive, matching
/// the login comparison).
pub fn validate_username_available(state: &AppState, username: &str) -> ValidationResult<()> {
    if state.users.iter().any(|u| u.username == username) {
        return Err(ValidationError::Duplicate {
            field: "username".to_string(),
            value: username.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an installment amount: strictly positive.
///
/// This is the one validator the store enforces itself — a zero or
/// negative payment is rejected, never silently applied.
pub fn validate_installment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a wholesale price: non-negative. Zero is allowed (free or
/// promotional items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a profit margin in basis points: 0 to [`MAX_MARGIN_BPS`].
pub fn validate_margin_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_MARGIN_BPS {
        return Err(ValidationError::OutOfRange {
            field: "profit margin".to_string(),
            min: 0,
            max: MAX_MARGIN_BPS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_validate_company_name() {
        assert!(validate_company_name("Al Noor Trading").is_ok());
        assert!(validate_company_name("").is_err());
        assert!(validate_company_name("   ").is_err());
        assert!(validate_company_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("6221031490019").is_ok());
        assert!(validate_barcode("IN-STORE-0042").is_ok());
        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("has space").is_err());
        assert!(validate_barcode(&"9".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("sara.k").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("two words").is_err());
        assert!(validate_username(&"a".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_username_available() {
        let state = seed::initial_state();
        assert!(validate_username_available(&state, "sara").is_ok());
        assert!(validate_username_available(&state, "admin").is_err());
        // Case-sensitive, like login itself
        assert!(validate_username_available(&state, "Admin").is_ok());
    }

    #[test]
    fn test_validate_installment_amount() {
        assert!(validate_installment_amount(Money::from_cents(1)).is_ok());
        assert!(validate_installment_amount(Money::zero()).is_err());
        assert!(validate_installment_amount(Money::from_cents(-500)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(2500).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_margin_bps() {
        assert!(validate_margin_bps(0).is_ok());
        assert!(validate_margin_bps(1500).is_ok());
        assert!(validate_margin_bps(MAX_MARGIN_BPS).is_ok());
        assert!(validate_margin_bps(MAX_MARGIN_BPS + 1).is_err());
    }
}
