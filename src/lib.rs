pub mod export;
pub mod extractor;

pub use extractor::{
    ExtractionError, ExtractionResult, ExtractorConfig, PlaylistExtractor, ProgressEvent,
    ProgressSink,
};
