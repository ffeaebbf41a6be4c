use std::future::Future;
use std::path::PathBuf;

use bebopc::{BebopcClient, BebopcError};

/// Capability boundary over the external binary encoder.
///
/// The pipeline's two-tier strategy (binary frame when the encoder is
/// available, degraded JSON when it is not) only sees this surface, so tests
/// substitute fakes without spawning processes.
pub trait FrameEncoder {
    /// Whether the external encoder can be invoked right now. Called before
    /// every encode attempt; implementations should keep it cheap.
    fn probe(&self) -> bool;

    /// Encodes `payload_json` against the schema struct `type_name`,
    /// returning the binary frame.
    fn encode(
        &self,
        type_name: &str,
        payload_json: &[u8],
    ) -> impl Future<Output = Result<Vec<u8>, BebopcError>> + Send;
}

/// The real encoder: a [`BebopcClient`] pointed at the resolved schema file.
#[derive(Debug, Clone)]
pub struct BebopcEncoder {
    client: BebopcClient,
    schema: PathBuf,
}

impl BebopcEncoder {
    pub fn new(client: BebopcClient, schema: PathBuf) -> Self {
        Self { client, schema }
    }
}

impl FrameEncoder for BebopcEncoder {
    fn probe(&self) -> bool {
        self.client.is_available()
    }

    fn encode(
        &self,
        type_name: &str,
        payload_json: &[u8],
    ) -> impl Future<Output = Result<Vec<u8>, BebopcError>> + Send {
        self.client.encode(&self.schema, type_name, payload_json)
    }
}
