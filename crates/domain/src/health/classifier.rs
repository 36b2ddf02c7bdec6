use crate::common::entity::Severity;

/// Error count at or above which a module is classified `High`.
pub const HIGH_SEVERITY_THRESHOLD: u32 = 5;

/// Error count at or above which a module is classified `Medium`.
pub const MEDIUM_SEVERITY_THRESHOLD: u32 = 3;

/// Map a module's error count to a severity tier.
pub fn classify(error_count: u32) -> Severity {
    if error_count >= HIGH_SEVERITY_THRESHOLD {
        Severity::High
    } else if error_count >= MEDIUM_SEVERITY_THRESHOLD {
        Severity::Medium
    } else {
        Severity::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_medium_is_low() {
        assert_eq!(classify(0), Severity::Low);
        assert_eq!(classify(1), Severity::Low);
        assert_eq!(classify(2), Severity::Low);
    }

    #[test]
    fn medium_band() {
        assert_eq!(classify(3), Severity::Medium);
        assert_eq!(classify(4), Severity::Medium);
    }

    #[test]
    fn high_from_threshold_up() {
        assert_eq!(classify(5), Severity::High);
        assert_eq!(classify(6), Severity::High);
        assert_eq!(classify(u32::MAX), Severity::High);
    }

    #[test]
    fn tiers_match_threshold_definitions() {
        for count in 0..64 {
            let expected = if count >= 5 {
                Severity::High
            } else if (3..5).contains(&count) {
                Severity::Medium
            } else {
                Severity::Low
            };
            assert_eq!(classify(count), expected, "count {count}");
        }
    }

    #[test]
    fn classification_is_monotonic() {
        for count in 0..32 {
            assert!(classify(count) <= classify(count + 1));
        }
    }
}
