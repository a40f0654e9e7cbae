//! One-time password generation and cooldown arithmetic.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Minimum interval between two OTP issuances for the same user.
pub const OTP_COOLDOWN_SECS: i64 = 60;

/// Generate a 6-digit numeric code, uniformly random in 100000..=999999.
///
/// Codes are not globally unique; confirmation always matches on the
/// (email, code) pair.
pub fn generate_otp() -> String {
    let code: u32 = rand::thread_rng().gen_range(100_000..=999_999);
    code.to_string()
}

/// Seconds left on the cooldown window, or `None` when a new code may be
/// issued. A user with no prior issuance is never throttled.
pub fn cooldown_remaining(last_otp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
    let last = last_otp?;
    let elapsed = (now - last).num_seconds();
    if elapsed < OTP_COOLDOWN_SECS {
        Some(OTP_COOLDOWN_SECS - elapsed)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_generate_otp_in_range() {
        for _ in 0..100 {
            let code = generate_otp();
            assert_eq!(code.len(), 6);
            let value: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[test]
    fn test_no_cooldown_without_prior_issuance() {
        assert_eq!(cooldown_remaining(None, Utc::now()), None);
    }

    #[test]
    fn test_cooldown_active_inside_window() {
        let now = Utc::now();
        let remaining = cooldown_remaining(Some(now - Duration::seconds(10)), now);
        assert_eq!(remaining, Some(50));
    }

    #[test]
    fn test_cooldown_expires_at_boundary() {
        let now = Utc::now();
        assert_eq!(
            cooldown_remaining(Some(now - Duration::seconds(OTP_COOLDOWN_SECS)), now),
            None
        );
        assert_eq!(
            cooldown_remaining(Some(now - Duration::seconds(OTP_COOLDOWN_SECS - 1)), now),
            Some(1)
        );
    }
}
