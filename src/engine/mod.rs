mod errors;
mod ingest_engine;

pub use errors::IngestError;
pub use ingest_engine::{IngestEngine, ReportView, DEFAULT_MAX_UPLOAD_BYTES};
