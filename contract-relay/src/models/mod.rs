pub mod analysis;
pub mod upload;

pub use analysis::{AnalysisResult, Clause};
pub use upload::UploadedDocument;
