pub mod logging;
pub mod metrics;
pub mod trace_context;

pub use logging::init_tracing;
pub use metrics::install_prometheus_recorder;
pub use trace_context::{
    TRACEPARENT_HEADER, TRACESTATE_HEADER, inject_trace_context, inject_trace_headers,
};
