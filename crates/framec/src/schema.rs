use std::{env, fs, io, path::PathBuf, sync::OnceLock};

/// Bebop schema declarations for every supported event kind. Bundled with
/// the binary; never regenerated at runtime.
const SCHEMA_TEXT: &str = include_str!("../schemas/observability.bop");

static RESOLVED: OnceLock<PathBuf> = OnceLock::new();

/// Resolves the path of the fixed schema definition file, once per process.
///
/// `FRAMEC_SCHEMA` overrides the bundled copy; otherwise the embedded schema
/// text is materialized under the system temp directory. The resolved path
/// never changes after the first successful call.
pub fn resolve_schema_path() -> io::Result<PathBuf> {
    if let Some(path) = RESOLVED.get() {
        return Ok(path.clone());
    }

    let path = match env::var_os("FRAMEC_SCHEMA") {
        Some(path) => PathBuf::from(path),
        None => {
            let path = env::temp_dir().join(format!("framec_schema_{}.bop", std::process::id()));
            fs::write(&path, SCHEMA_TEXT)?;
            path
        }
    };
    Ok(RESOLVED.get_or_init(|| path).clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_is_stable_and_declares_every_schema_type() {
        let first = resolve_schema_path().expect("resolve schema");
        let second = resolve_schema_path().expect("resolve schema again");
        assert_eq!(first, second);

        let text = fs::read_to_string(&first).expect("read materialized schema");
        for kind in frame_events::EventKind::ALL {
            assert!(
                text.contains(&format!("struct {} {{", kind.schema_type())),
                "schema is missing {}",
                kind.schema_type()
            );
        }
    }
}
