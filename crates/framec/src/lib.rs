#![forbid(unsafe_code)]
//! Pipeline that converts orchestration observability NDJSON logs into
//! per-event binary frames encoded against the bundled bebop schemas.
//!
//! Each decoded event is classified, projected onto its schema shape, and
//! encoded through the external `bebopc` CLI — or written as degraded JSON
//! when that CLI is not installed. Events are independent: one failure never
//! blocks the rest of the batch.

mod encoder;
mod naming;
mod pipeline;
mod schema;

pub use encoder::{BebopcEncoder, FrameEncoder};
pub use naming::output_path;
pub use pipeline::{Conversion, ConvertError, Converter, PipelineError};
pub use schema::resolve_schema_path;
