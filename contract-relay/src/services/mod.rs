pub mod analysis_client;
pub mod metrics;

pub use analysis_client::AnalysisClient;
