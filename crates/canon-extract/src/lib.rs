//! # canon-extract
//!
//! Client side of the external entity-extraction service, plus the
//! batching extractor that groups selected documents by their immediate
//! parent folder and walks the batches sequentially with per-batch
//! failure isolation.

pub mod backend;
pub mod batch;
pub mod http;
pub mod mock;

pub use backend::{ExtractionBackend, ExtractionRequest, ExtractionResponse};
pub use batch::{extract_all, BatchOutcome, BatchRunReport, ExtractorConfig};
pub use http::HttpExtractionBackend;
pub use mock::MockExtractionBackend;
