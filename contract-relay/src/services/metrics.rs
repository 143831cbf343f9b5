use metrics::{counter, histogram};
use std::time::Duration;

pub fn record_analysis_outcome(outcome: &'static str) {
    counter!("contract_relay_analyses_total", "outcome" => outcome).increment(1);
}

pub fn record_downstream_duration(elapsed: Duration) {
    histogram!("contract_relay_downstream_duration_seconds").record(elapsed.as_secs_f64());
}
