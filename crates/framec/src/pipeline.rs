use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

use bebopc::BebopcError;
use frame_events::{decode_path, project, DecodedEvent, EventKind, RawEvent};

use crate::encoder::FrameEncoder;
use crate::naming::output_path;

/// Per-event conversion failure. Local to one event; the batch continues.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unsupported event type {event_type:?}")]
    UnsupportedEvent { event_type: Option<String> },
    #[error("bebopc failed to encode {type_name}: {source}")]
    BebopcFailed {
        type_name: &'static str,
        #[source]
        source: BebopcError,
    },
    #[error("failed to serialize {type_name} payload: {source}")]
    SerializePayload {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write frame to `{path}`: {source}")]
    WriteFrame {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Stable label for operator-facing reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedEvent { .. } => "unsupported_event",
            Self::BebopcFailed { .. } => "bebopc_failed",
            Self::SerializePayload { .. } => "serialize_failed",
            Self::WriteFrame { .. } => "write_failed",
        }
    }
}

/// Run-fatal failures. Everything per-event lives in [`ConvertError`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to create output directory `{path}`: {source}")]
    CreateOutDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of converting one decoded event.
#[derive(Debug)]
pub struct Conversion {
    pub line_number: usize,
    pub event_type: Option<String>,
    pub outcome: Result<PathBuf, ConvertError>,
}

/// Drives decode → classify → project → encode over one input file.
pub struct Converter<E> {
    encoder: E,
    outdir: PathBuf,
}

impl<E: FrameEncoder> Converter<E> {
    pub fn new(encoder: E, outdir: PathBuf) -> Self {
        Self { encoder, outdir }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Converts every decoded event in `input`, in input order.
    ///
    /// Creates the output directory (with parents) first; that failure aborts
    /// the run. Afterwards each event is processed to completion
    /// independently — the returned sequence holds exactly one outcome per
    /// decoded event and never short-circuits.
    pub async fn run(&self, input: &Path) -> Result<Vec<Conversion>, PipelineError> {
        fs::create_dir_all(&self.outdir)
            .await
            .map_err(|source| PipelineError::CreateOutDir {
                path: self.outdir.clone(),
                source,
            })?;

        let events = decode_path(input);
        let mut results = Vec::with_capacity(events.len());
        for decoded in &events {
            let outcome = self.convert_event(decoded).await;
            match &outcome {
                Ok(path) => info!(
                    line_number = decoded.line_number,
                    path = %path.display(),
                    "encoded event"
                ),
                Err(err) => warn!(
                    line_number = decoded.line_number,
                    kind = err.kind(),
                    %err,
                    "event conversion failed"
                ),
            }
            results.push(Conversion {
                line_number: decoded.line_number,
                event_type: decoded.event.event_type.clone(),
                outcome,
            });
        }
        Ok(results)
    }

    async fn convert_event(&self, decoded: &DecodedEvent) -> Result<PathBuf, ConvertError> {
        let event = &decoded.event;
        let Some(kind) = EventKind::classify(event) else {
            return Err(ConvertError::UnsupportedEvent {
                event_type: event.event_type.clone(),
            });
        };

        let type_name = kind.schema_type();
        let payload = project(kind, event);
        let payload_json =
            serde_json::to_vec(&payload).map_err(|source| ConvertError::SerializePayload {
                type_name,
                source,
            })?;

        if self.encoder.probe() {
            let frame = self
                .encoder
                .encode(type_name, &payload_json)
                .await
                .map_err(|source| ConvertError::BebopcFailed { type_name, source })?;
            self.write_frame(event, "bebop", &frame).await
        } else {
            // Observability signal only; degraded output is still a success.
            warn!(type_name, "bebopc unavailable; writing degraded JSON output");
            self.write_frame(event, "json", &payload_json).await
        }
    }

    async fn write_frame(
        &self,
        event: &RawEvent,
        extension: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, ConvertError> {
        let path = output_path(&self.outdir, event, extension);
        fs::write(&path, bytes)
            .await
            .map_err(|source| ConvertError::WriteFrame {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}
