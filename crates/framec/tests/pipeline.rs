use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bebopc::BebopcError;
use framec::{ConvertError, Converter, FrameEncoder};

enum Verdict {
    Frame(Vec<u8>),
    Fail,
}

struct FakeEncoder {
    available: bool,
    verdict: Verdict,
    calls: Mutex<Vec<String>>,
}

impl FakeEncoder {
    fn frames(bytes: &[u8]) -> Self {
        Self {
            available: true,
            verdict: Verdict::Frame(bytes.to_vec()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn absent() -> Self {
        Self {
            available: false,
            verdict: Verdict::Fail,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            available: true,
            verdict: Verdict::Fail,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FrameEncoder for FakeEncoder {
    fn probe(&self) -> bool {
        self.available
    }

    fn encode(
        &self,
        type_name: &str,
        _payload_json: &[u8],
    ) -> impl Future<Output = Result<Vec<u8>, BebopcError>> + Send {
        self.calls
            .lock()
            .expect("calls lock")
            .push(type_name.to_string());
        let verdict = match &self.verdict {
            Verdict::Frame(bytes) => Ok(bytes.clone()),
            Verdict::Fail => Err(BebopcError::Wait(std::io::Error::other("forced failure"))),
        };
        async move { verdict }
    }
}

fn write_input(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("events.ndjson");
    std::fs::write(&path, contents).expect("write input");
    path
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read outdir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

const PLACEMENT_LINE: &str = concat!(
    "{\"event_type\":\"placement_decision\",\"timestamp\":\"2024-01-01T00:00:00Z\",",
    "\"payload\":{\"operation_id\":\"op-1\",\"intent\":\"install\",\"dry_run\":true}}"
);

#[tokio::test]
async fn available_encoder_writes_binary_frames() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), &format!("{PLACEMENT_LINE}\n"));
    let outdir = dir.path().join("out");

    let encoder = FakeEncoder::frames(b"\x01\x02\x03");
    let converter = Converter::new(encoder, outdir.clone());
    let results = converter.run(&input).await.expect("run succeeds");

    assert_eq!(results.len(), 1);
    let path = results[0].outcome.as_ref().expect("conversion succeeds");
    assert_eq!(
        path,
        &outdir.join("placement_decision_2024-01-01T00-00-00Z.bebop")
    );
    assert_eq!(std::fs::read(path).expect("read frame"), b"\x01\x02\x03");
}

#[tokio::test]
async fn encoder_sees_the_schema_type_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), &format!("{PLACEMENT_LINE}\n"));

    let encoder = FakeEncoder::frames(b"x");
    let converter = Converter::new(encoder, dir.path().join("out"));
    converter.run(&input).await.expect("run succeeds");

    assert_eq!(
        *converter_calls(&converter),
        vec!["PlacementDecision".to_string()]
    );
}

// Converter takes ownership of the encoder; reach back in for assertions.
fn converter_calls(converter: &Converter<FakeEncoder>) -> Vec<String> {
    converter.encoder().calls.lock().expect("calls lock").clone()
}

#[tokio::test]
async fn absent_encoder_degrades_to_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), &format!("{PLACEMENT_LINE}\n"));
    let outdir = dir.path().join("out");

    let converter = Converter::new(FakeEncoder::absent(), outdir.clone());
    let results = converter.run(&input).await.expect("run succeeds");

    assert_eq!(results.len(), 1);
    let path = results[0].outcome.as_ref().expect("fallback succeeds");
    assert_eq!(
        path,
        &outdir.join("placement_decision_2024-01-01T00-00-00Z.json")
    );

    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(path).expect("read fallback")).expect("valid JSON");
    assert_eq!(
        written,
        serde_json::json!({
            "operation_id": "op-1",
            "package_id": "",
            "intent": "install",
            "profile": "",
            "selected_surface": "",
            "result": "",
            "dry_run": true
        })
    );
}

#[tokio::test]
async fn failing_encoder_reports_and_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), &format!("{PLACEMENT_LINE}\n"));
    let outdir = dir.path().join("out");

    let converter = Converter::new(FakeEncoder::failing(), outdir.clone());
    let results = converter.run(&input).await.expect("run succeeds");

    assert_eq!(results.len(), 1);
    let err = results[0].outcome.as_ref().expect_err("conversion fails");
    assert_eq!(err.kind(), "bebopc_failed");
    assert!(matches!(err, ConvertError::BebopcFailed { .. }));
    // No fallback JSON appears beside a failed encode.
    assert!(dir_entries(&outdir).is_empty());
}

#[tokio::test]
async fn mixed_input_converts_independently() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(
        dir.path(),
        &format!(
            "{PLACEMENT_LINE}\nthis line is not JSON\n{}\n",
            "{\"event_type\":\"unknown_kind\",\"timestamp\":\"t\"}"
        ),
    );
    let outdir = dir.path().join("out");

    let converter = Converter::new(FakeEncoder::frames(b"ok"), outdir.clone());
    let results = converter.run(&input).await.expect("run succeeds");

    // The malformed line is absent entirely; the unsupported one fails alone.
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].line_number, 1);
    assert!(results[0].outcome.is_ok());
    assert_eq!(results[1].line_number, 3);
    let err = results[1].outcome.as_ref().expect_err("unsupported event");
    assert_eq!(err.kind(), "unsupported_event");
    assert!(matches!(
        err,
        ConvertError::UnsupportedEvent { event_type: Some(t) } if t == "unknown_kind"
    ));
    assert_eq!(dir_entries(&outdir).len(), 1);
}

#[tokio::test]
async fn rerunning_overwrites_instead_of_duplicating() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), &format!("{PLACEMENT_LINE}\n"));
    let outdir = dir.path().join("out");

    let converter = Converter::new(FakeEncoder::frames(b"first"), outdir.clone());
    converter.run(&input).await.expect("first run");
    let converter = Converter::new(FakeEncoder::frames(b"second"), outdir.clone());
    converter.run(&input).await.expect("second run");

    let entries = dir_entries(&outdir);
    assert_eq!(entries.len(), 1);
    let frame = std::fs::read(outdir.join(&entries[0])).expect("read frame");
    assert_eq!(frame, b"second");
}

#[tokio::test]
async fn missing_input_file_is_an_empty_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let outdir = dir.path().join("out");

    let converter = Converter::new(FakeEncoder::frames(b"x"), outdir.clone());
    let results = converter
        .run(&dir.path().join("missing.ndjson"))
        .await
        .expect("run succeeds");

    assert!(results.is_empty());
    // The outdir is still created.
    assert!(outdir.is_dir());
}
