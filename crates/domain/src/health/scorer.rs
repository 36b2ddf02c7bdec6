use super::entity::{AlertRecord, HealthReport, HealthStatus};
use crate::common::entity::Severity;

pub const MAX_HEALTH_SCORE: u8 = 10;

const HIGH_PENALTY: u32 = 4;
const MEDIUM_PENALTY: u32 = 2;
const LOW_PENALTY: u32 = 1;

/// Lowest score still reported as `Healthy`.
pub const HEALTHY_MIN_SCORE: u8 = 8;
/// Lowest score still reported as `Warning`.
pub const WARNING_MIN_SCORE: u8 = 6;

/// Derive the system-wide health report from the current alert set.
///
/// Each alert subtracts a penalty by severity (high 4, medium 2, low 1)
/// from a perfect score of 10, floored at 0. Not cached: callers pass the
/// records they want scored, every time.
pub fn score<'a>(alerts: impl IntoIterator<Item = &'a AlertRecord>) -> HealthReport {
    let mut high = 0u32;
    let mut medium = 0u32;
    let mut low = 0u32;
    for alert in alerts {
        match alert.severity {
            Severity::High => high += 1,
            Severity::Medium => medium += 1,
            Severity::Low => low += 1,
        }
    }

    if high + medium + low == 0 {
        return HealthReport {
            status: HealthStatus::Healthy,
            score: MAX_HEALTH_SCORE,
        };
    }

    let penalty = high
        .saturating_mul(HIGH_PENALTY)
        .saturating_add(medium.saturating_mul(MEDIUM_PENALTY))
        .saturating_add(low.saturating_mul(LOW_PENALTY));
    let penalty =
        u8::try_from(penalty.min(u32::from(MAX_HEALTH_SCORE))).unwrap_or(MAX_HEALTH_SCORE);
    let score = MAX_HEALTH_SCORE - penalty;

    HealthReport {
        status: status_for(score),
        score,
    }
}

/// Map a score to its status band.
pub fn status_for(score: u8) -> HealthStatus {
    if score >= HEALTHY_MIN_SCORE {
        HealthStatus::Healthy
    } else if score >= WARNING_MIN_SCORE {
        HealthStatus::Warning
    } else {
        HealthStatus::Critical
    }
}
