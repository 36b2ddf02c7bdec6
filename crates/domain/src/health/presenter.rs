use super::entity::{AlertRecord, ExternalAlert, ExternalAlertType};
use crate::common::entity::{NANOS_PER_MINUTE, Severity};

/// Error count at or above which the long-form message is used.
///
/// Kept separate from `classifier::HIGH_SEVERITY_THRESHOLD`: the two share a
/// value today but are tuned independently.
pub const LONG_MESSAGE_THRESHOLD: u32 = 5;

/// Whole minutes elapsed since `first_occurrence_ns`, floored.
/// A clock reading earlier than the first occurrence yields zero.
pub fn duration_minutes(first_occurrence_ns: u64, now_ns: u64) -> u64 {
    now_ns.saturating_sub(first_occurrence_ns) / NANOS_PER_MINUTE
}

/// Project one record into its external view.
pub fn present(record: &AlertRecord, now_ns: u64) -> ExternalAlert {
    let alert_type = if record.severity == Severity::High {
        ExternalAlertType::Error
    } else {
        ExternalAlertType::Warning
    };

    ExternalAlert {
        id: record.id.clone(),
        alert_type,
        message: message_for(record, now_ns),
        priority: record.severity,
        timestamp_ns: record.first_occurrence_ns,
    }
}

/// Project every record; an empty input yields an empty list.
pub fn present_all<'a>(
    records: impl IntoIterator<Item = &'a AlertRecord>,
    now_ns: u64,
) -> Vec<ExternalAlert> {
    records.into_iter().map(|r| present(r, now_ns)).collect()
}

fn message_for(record: &AlertRecord, now_ns: u64) -> String {
    let name = record.module.display_name();
    let count = record.error_count;
    if count >= LONG_MESSAGE_THRESHOLD {
        let minutes = duration_minutes(record.first_occurrence_ns, now_ns);
        format!(
            "{name} realtime connection has failed {count} times over the last {minutes} minutes"
        )
    } else {
        format!("{name} realtime connection is unstable ({count} errors)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::classifier::classify;
    use crate::health::entity::Module;

    fn record(module: Module, error_count: u32, first_occurrence_ns: u64) -> AlertRecord {
        AlertRecord {
            id: module.alert_id(),
            module,
            error_count,
            last_error: "timeout".to_string(),
            error_history: Vec::new(),
            first_occurrence_ns,
            severity: classify(error_count),
        }
    }

    #[test]
    fn duration_floors_to_whole_minutes() {
        assert_eq!(duration_minutes(0, 0), 0);
        assert_eq!(duration_minutes(0, NANOS_PER_MINUTE - 1), 0);
        assert_eq!(duration_minutes(0, NANOS_PER_MINUTE), 1);
        assert_eq!(duration_minutes(0, 7 * NANOS_PER_MINUTE + 59_000_000_000), 7);
    }

    #[test]
    fn duration_saturates_on_clock_skew() {
        assert_eq!(duration_minutes(10 * NANOS_PER_MINUTE, 0), 0);
    }

    #[test]
    fn high_severity_is_error_type() {
        let view = present(&record(Module::Orders, 6, 0), 0);
        assert_eq!(view.alert_type, ExternalAlertType::Error);
        assert_eq!(view.priority, Severity::High);
    }

    #[test]
    fn lower_severities_are_warning_type() {
        let medium = present(&record(Module::Orders, 3, 0), 0);
        let low = present(&record(Module::Orders, 1, 0), 0);
        assert_eq!(medium.alert_type, ExternalAlertType::Warning);
        assert_eq!(medium.priority, Severity::Medium);
        assert_eq!(low.alert_type, ExternalAlertType::Warning);
        assert_eq!(low.priority, Severity::Low);
    }

    #[test]
    fn long_message_includes_count_and_duration() {
        let first = 1_000;
        let now = first + 12 * NANOS_PER_MINUTE;
        let view = present(&record(Module::SupportTickets, 8, first), now);
        assert_eq!(
            view.message,
            "Support Tickets realtime connection has failed 8 times over the last 12 minutes"
        );
    }

    #[test]
    fn short_message_includes_count_only() {
        let view = present(&record(Module::Inventory, 4, 0), 30 * NANOS_PER_MINUTE);
        assert_eq!(
            view.message,
            "Inventory realtime connection is unstable (4 errors)"
        );
        assert!(!view.message.contains("minutes"));
    }

    #[test]
    fn message_template_uses_its_own_threshold() {
        // Severity is forced to High while the count stays below the
        // long-form threshold: the short template must still be used.
        let mut rec = record(Module::Orders, 2, 0);
        rec.severity = Severity::High;
        let view = present(&rec, 0);
        assert_eq!(view.alert_type, ExternalAlertType::Error);
        assert!(view.message.contains("unstable (2 errors)"));
    }

    #[test]
    fn long_template_follows_count_not_severity() {
        // Count at the long-form threshold with severity forced below High:
        // the long template is used while the type stays warning.
        let mut rec = record(Module::Orders, LONG_MESSAGE_THRESHOLD, 0);
        rec.severity = Severity::Medium;
        let view = present(&rec, 2 * NANOS_PER_MINUTE);
        assert_eq!(view.alert_type, ExternalAlertType::Warning);
        assert_eq!(view.priority, Severity::Medium);
        assert_eq!(
            view.message,
            "Orders realtime connection has failed 5 times over the last 2 minutes"
        );
    }

    #[test]
    fn timestamp_is_first_occurrence_not_now() {
        let view = present(&record(Module::Messages, 5, 123), 9_999_999_999_999);
        assert_eq!(view.timestamp_ns, 123);
        assert_eq!(view.id, "realtime-messages-issues");
    }

    #[test]
    fn present_all_empty() {
        assert!(present_all(std::iter::empty(), 0).is_empty());
    }

    #[test]
    fn present_all_maps_every_record() {
        let records = [record(Module::Orders, 1, 0), record(Module::Inventory, 6, 0)];
        let views = present_all(&records, 0);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, records[0].id);
        assert_eq!(views[1].id, records[1].id);
    }
}
