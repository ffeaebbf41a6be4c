#![forbid(unsafe_code)]
//! Async wrapper around the `bebopc` schema compiler CLI.
//!
//! Shells out to a locally installed/pinned `bebopc` binary to turn
//! schema-shaped JSON payloads into binary frames. The wrapper owns binary
//! resolution, availability probing, per-call payload temp files, and timeout
//! handling; the schema language itself is an opaque contract between the
//! caller-supplied `.bop` file and the CLI.

mod client;
mod error;
mod process;

pub use client::{BebopcClient, BebopcClientBuilder};
pub use error::BebopcError;
pub use process::CommandOutput;
