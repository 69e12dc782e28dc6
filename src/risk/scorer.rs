//! Escalation probability -- a fixed weighted sum over 30-day history,
//! incident signals, and business impact keywords.

use crate::catalog::{Incident, SystemStats};

pub const BASE_PROBABILITY: f64 = 0.15;
pub const MAX_PROBABILITY: f64 = 0.99;

const CRITICAL_RATE_CAP: f64 = 0.7;
const CRITICAL_RATE_WEIGHT: f64 = 0.55;
const FREQUENCY_CAP: f64 = 0.5;
const FREQUENCY_WEIGHT: f64 = 0.25;

const ERROR_RATE_HIGH_BOOST: f64 = 0.25;
const LATENCY_SPIKE_BOOST: f64 = 0.15;
const DATABASE_BOOST: f64 = 0.20;
const CUSTOMER_IMPACT_BOOST: f64 = 0.15;
const INTERMITTENT_BOOST: f64 = 0.05;

pub const SIGNAL_ERROR_RATE_HIGH: &str = "error_rate_high";
pub const SIGNAL_LATENCY_SPIKE: &str = "latency_spike";
pub const SIGNAL_DB_TIMEOUT: &str = "db_timeout";
pub const SIGNAL_POOL_EXHAUSTED: &str = "pool_exhausted";

/// Probability in `[0.0, MAX_PROBABILITY]` that `incident` escalates, given
/// the 30-day `stats` of its system. Total: every input yields a score.
pub fn escalation_probability(incident: &Incident, stats: &SystemStats) -> f64 {
    let mut probability = BASE_PROBABILITY;

    // History
    probability += stats.critical_incident_rate().min(CRITICAL_RATE_CAP) * CRITICAL_RATE_WEIGHT;
    probability += (stats.incident_count() as f64 / 10.0).min(FREQUENCY_CAP) * FREQUENCY_WEIGHT;

    // Signals
    if incident.has_signal(SIGNAL_ERROR_RATE_HIGH) {
        probability += ERROR_RATE_HIGH_BOOST;
    }
    if incident.has_signal(SIGNAL_LATENCY_SPIKE) {
        probability += LATENCY_SPIKE_BOOST;
    }
    // Awarded once even when both are present.
    if incident.has_signal(SIGNAL_DB_TIMEOUT) || incident.has_signal(SIGNAL_POOL_EXHAUSTED) {
        probability += DATABASE_BOOST;
    }

    // Business impact
    let impact = incident.business_impact.to_lowercase();
    if impact.contains("checkout") || impact.contains("customer") {
        probability += CUSTOMER_IMPACT_BOOST;
    }
    if impact.contains("intermittently") {
        probability += INTERMITTENT_BOOST;
    }

    // f64::max drops NaN, so a poisoned input still lands in range.
    probability.max(0.0).min(MAX_PROBABILITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(signals: &[&str], impact: &str) -> Incident {
        Incident {
            incident_id: "INC-TEST".to_string(),
            system: "Test System".to_string(),
            description: String::new(),
            business_impact: impact.to_string(),
            signals: signals.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn stats(rate: f64, count: u64) -> SystemStats {
        SystemStats {
            critical_incident_rate: Some(rate),
            past_30_days_incidents: Some(count),
            ..SystemStats::default()
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_worked_example_clamps() {
        let i = incident(
            &[SIGNAL_ERROR_RATE_HIGH, SIGNAL_LATENCY_SPIKE],
            "Customer checkout failures",
        );
        // 0.15 + 0.231 + 0.125 + 0.25 + 0.15 + 0.15 = 1.056 before the clamp
        assert_eq!(escalation_probability(&i, &stats(0.42, 7)), 0.99);
    }

    #[test]
    fn test_baseline_without_signals() {
        let i = incident(&[], "");
        let p = escalation_probability(&i, &stats(0.0, 0));
        assert!(approx(p, BASE_PROBABILITY));
    }

    #[test]
    fn test_history_terms() {
        let i = incident(&[], "");
        // 0.15 + 0.25 * 0.55 + 0.4 * 0.25
        let p = escalation_probability(&i, &stats(0.25, 4));
        assert!(approx(p, 0.3875), "got {p}");
    }

    #[test]
    fn test_history_terms_are_capped() {
        let i = incident(&[], "");
        let capped = escalation_probability(&i, &stats(0.7, 5));
        let beyond = escalation_probability(&i, &stats(1.0, 500));
        assert_eq!(capped, beyond);
        assert!(approx(capped, 0.15 + 0.385 + 0.125));
    }

    #[test]
    fn test_decoded_counts_score_like_integers() {
        let i = incident(&[], "");
        let decode = |count: serde_json::Value| -> SystemStats {
            serde_json::from_value(serde_json::json!({
                "critical_incident_rate": 0.0,
                "past_30_days_incidents": count
            }))
            .unwrap()
        };

        let whole = escalation_probability(&i, &decode(serde_json::json!(4)));
        let float = escalation_probability(&i, &decode(serde_json::json!(4.0)));
        assert!(approx(whole, 0.25), "got {whole}");
        assert_eq!(whole, float);

        // Beyond u32 still saturates the frequency term.
        let huge = escalation_probability(&i, &decode(serde_json::json!(5_000_000_000u64)));
        assert!(approx(huge, 0.275), "got {huge}");
    }

    #[test]
    fn test_non_string_signals_do_not_hide_others() {
        let i: Incident = serde_json::from_value(serde_json::json!({
            "signals": ["error_rate_high", 5]
        }))
        .unwrap();
        // 0.15 + 0.2 * 0.55 + 0.25
        let p = escalation_probability(&i, &SystemStats::default());
        assert!(approx(p, 0.51), "got {p}");
    }

    #[test]
    fn test_error_rate_signal_adds_exactly_its_weight() {
        let s = stats(0.1, 1);
        let without = escalation_probability(&incident(&[], ""), &s);
        let with = escalation_probability(&incident(&[SIGNAL_ERROR_RATE_HIGH], ""), &s);
        assert!(approx(with - without, 0.25));
    }

    #[test]
    fn test_database_signals_count_once() {
        let s = stats(0.0, 0);
        let one = escalation_probability(&incident(&[SIGNAL_DB_TIMEOUT], ""), &s);
        let other = escalation_probability(&incident(&[SIGNAL_POOL_EXHAUSTED], ""), &s);
        let both = escalation_probability(
            &incident(&[SIGNAL_DB_TIMEOUT, SIGNAL_POOL_EXHAUSTED], ""),
            &s,
        );
        assert_eq!(one, other);
        assert_eq!(one, both);
        assert!(approx(both, 0.35));
    }

    #[test]
    fn test_impact_keywords_are_case_insensitive() {
        let s = stats(0.0, 0);
        let upper = escalation_probability(&incident(&[], "CUSTOMER-facing outage"), &s);
        let checkout = escalation_probability(&incident(&[], "Checkout broken"), &s);
        assert!(approx(upper, 0.30));
        assert_eq!(upper, checkout);

        // Both keywords still count once.
        let both = escalation_probability(&incident(&[], "customer checkout"), &s);
        assert_eq!(both, upper);

        let flaky = escalation_probability(&incident(&[], "Orders Intermittently failing"), &s);
        assert!(approx(flaky, 0.20));
    }

    #[test]
    fn test_order_processing_seed_incident() {
        let i = incident(
            &[SIGNAL_DB_TIMEOUT, SIGNAL_POOL_EXHAUSTED],
            "Orders intermittently failing",
        );
        // 0.15 + 0.1375 + 0.1 + 0.20 + 0.05
        let p = escalation_probability(&i, &stats(0.25, 4));
        assert!(approx(p, 0.6375), "got {p}");
    }

    #[test]
    fn test_empty_stats_use_defaults() {
        let i = incident(&[SIGNAL_LATENCY_SPIKE], "customer");
        let empty = escalation_probability(&i, &SystemStats::default());
        let explicit = escalation_probability(&i, &stats(0.2, 0));
        assert_eq!(empty, explicit);
    }

    #[test]
    fn test_monotonic_in_critical_rate() {
        let i = incident(&[SIGNAL_LATENCY_SPIKE], "");
        let mut previous = 0.0;
        for step in 0..=20 {
            let rate = f64::from(step) * 0.05;
            let p = escalation_probability(&i, &stats(rate, 3));
            assert!(p >= previous, "rate {rate} dropped to {p} from {previous}");
            previous = p;
        }
    }

    #[test]
    fn test_always_in_range() {
        let all = [
            SIGNAL_ERROR_RATE_HIGH,
            SIGNAL_LATENCY_SPIKE,
            SIGNAL_DB_TIMEOUT,
            SIGNAL_POOL_EXHAUSTED,
        ];
        let extremes = [
            f64::NEG_INFINITY,
            -5.0,
            0.0,
            0.5,
            1.0,
            50.0,
            f64::INFINITY,
            f64::NAN,
        ];
        for rate in extremes {
            for count in [0, 3, u64::MAX] {
                for signals in [&all[..0], &all[..1], &all[..]] {
                    for impact in ["", "customer checkout intermittently"] {
                        let p = escalation_probability(&incident(signals, impact), &stats(rate, count));
                        assert!((0.0..=MAX_PROBABILITY).contains(&p), "{rate} {count} -> {p}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_everything_saturates_at_max() {
        let i = incident(
            &[
                SIGNAL_ERROR_RATE_HIGH,
                SIGNAL_LATENCY_SPIKE,
                SIGNAL_DB_TIMEOUT,
                SIGNAL_POOL_EXHAUSTED,
            ],
            "Customer checkout failing intermittently",
        );
        assert_eq!(escalation_probability(&i, &stats(0.9, 30)), MAX_PROBABILITY);
    }
}
