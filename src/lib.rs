// src/lib.rs
pub mod error;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod profiles;
pub mod record;
pub mod schema;
pub mod source;

pub use error::{DecodeError, SiftError};
pub use filter::FilterSpec;
pub use pipeline::{SiftPipeline, SiftStats};
pub use profiles::Profile;
pub use record::{HeaderField, Record};
pub use schema::{project, ColumnSpec, Schema};
pub use source::InputFormat;
