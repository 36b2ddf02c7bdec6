#![no_main]

use libfuzzer_sys::fuzz_target;

use domain::common::entity::Severity;
use domain::health::classifier;
use domain::health::engine::AlertRegistry;
use domain::health::entity::{ErrorHistoryEntry, HealthStatus, Module};
use domain::health::{presenter, scorer};

// Fuzz the AlertRegistry with random report/recovery/clear sequences.
//
// Layout: consumed in 6-byte chunks
//   [0]    = op (0-5 = report, 6 = recovery, 7 = clear_all)
//   [1]    = module index (mod 6)
//   [2..4] = error count (u16 LE)
//   [4..6] = clock advance in seconds (u16 LE)
fuzz_target!(|data: &[u8]| {
    let mut registry = AlertRegistry::new();
    let mut now_ns: u64 = 0;

    for chunk in data.chunks_exact(6) {
        let module = Module::ALL[(chunk[1] as usize) % Module::ALL.len()];
        let error_count = u32::from(u16::from_le_bytes([chunk[2], chunk[3]]));
        let advance = u64::from(u16::from_le_bytes([chunk[4], chunk[5]]));
        now_ns = now_ns.saturating_add(advance.saturating_mul(1_000_000_000));

        match chunk[0] % 8 {
            0..=5 => {
                let previous_first = registry.get(module).map(|r| r.first_occurrence_ns);
                let history = vec![ErrorHistoryEntry::new(now_ns, "fuzz", "CLOSED")];
                let record = registry.record_alert(
                    module,
                    error_count,
                    "fuzz".to_string(),
                    history,
                    now_ns,
                );

                // Upsert keeps the first occurrence and takes everything else.
                assert_eq!(
                    record.first_occurrence_ns,
                    previous_first.unwrap_or(now_ns)
                );
                assert_eq!(record.error_count, error_count);
                assert_eq!(record.severity, classifier::classify(error_count));
                assert_eq!(record.id, module.alert_id());
            }
            6 => {
                registry.clear_alert(module);
                assert!(registry.get(module).is_none());
                // Idempotent.
                assert!(registry.clear_alert(module).is_none());
            }
            _ => {
                registry.clear_all();
                assert!(!registry.has_active());
            }
        }

        // One record per module, at most six.
        assert!(registry.len() <= Module::ALL.len());

        let report = scorer::score(registry.iter());
        assert!(report.score <= scorer::MAX_HEALTH_SCORE);
        assert_eq!(report.status, scorer::status_for(report.score));
        if registry.is_empty() {
            assert_eq!(report.score, 10);
            assert_eq!(report.status, HealthStatus::Healthy);
        }

        for alert in presenter::present_all(registry.iter(), now_ns) {
            let is_high = alert.priority == Severity::High;
            assert_eq!(is_high, alert.alert_type.as_str() == "error");
        }
    }
});
