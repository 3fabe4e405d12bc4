pub mod batch;
pub mod outcome;

pub use batch::UrlBatch;
pub use outcome::{FetchOutcome, ResponseFormat, ResultBatch, TaggedOutcome, ERROR_PREFIX};
