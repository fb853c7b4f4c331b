//! Format detection (RON/JSON/TOML) and deserialization helpers used by the
//! plan loading pipeline.

use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a plan.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A name reference could not be resolved.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize `content` in the given format. `file` is only used to label
/// errors.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    file: &Path,
) -> Result<T, DataLoadError> {
    let parse_error = |detail: String| DataLoadError::Parse {
        file: file.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    deserialize_str(&content, format, path)
}

// ===========================================================================
// Name checks
// ===========================================================================

/// Record `name` in `seen`, returning a `DuplicateName` error if it was
/// already there.
pub fn check_duplicate<'a>(
    seen: &mut HashSet<&'a str>,
    name: &'a str,
    file: &Path,
) -> Result<(), DataLoadError> {
    if seen.insert(name) {
        Ok(())
    } else {
        Err(DataLoadError::DuplicateName {
            file: file.to_path_buf(),
            name: name.to_string(),
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PlanData;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "levelgraph_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("plan.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("plan.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("plan.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        let result = detect_format(Path::new("plan.yaml"));
        assert!(matches!(
            result,
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn detect_format_no_extension() {
        let result = detect_format(Path::new("plan"));
        assert!(matches!(
            result,
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // deserialize_file
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_file_ron() {
        let dir = make_test_dir("deser_ron");
        let path = dir.join("plan.ron");
        fs::write(&path, r#"(edges: [("a", "b")], sources: ["a"])"#).unwrap();

        let plan: PlanData = deserialize_file(&path).unwrap();
        assert_eq!(plan.edges.len(), 1);
        assert_eq!(plan.sources, vec!["a"]);

        cleanup(&dir);
    }

    #[test]
    fn deserialize_file_json() {
        let dir = make_test_dir("deser_json");
        let path = dir.join("plan.json");
        fs::write(&path, r#"{"edges": [["a", "b"]], "sources": ["a"]}"#).unwrap();

        let plan: PlanData = deserialize_file(&path).unwrap();
        assert_eq!(plan.edges.len(), 1);

        cleanup(&dir);
    }

    #[test]
    fn deserialize_file_toml() {
        let dir = make_test_dir("deser_toml");
        let path = dir.join("plan.toml");
        fs::write(
            &path,
            r#"
sources = ["a"]

[[edges]]
from = "a"
to = "b"
"#,
        )
        .unwrap();

        let plan: PlanData = deserialize_file(&path).unwrap();
        assert_eq!(plan.edges.len(), 1);
        assert_eq!(plan.edges[0].to(), "b");

        cleanup(&dir);
    }

    #[test]
    fn deserialize_file_parse_error() {
        let dir = make_test_dir("deser_parse_err");
        let path = dir.join("bad.ron");
        fs::write(&path, "this is not valid RON {{{").unwrap();

        let result: Result<PlanData, _> = deserialize_file(&path);
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    #[test]
    fn deserialize_file_missing_is_io_error() {
        let dir = make_test_dir("deser_missing");
        let result: Result<PlanData, _> = deserialize_file(&dir.join("absent.json"));
        assert!(matches!(result, Err(DataLoadError::Io(_))));
        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // check_duplicate
    // -----------------------------------------------------------------------

    #[test]
    fn check_duplicate_flags_second_occurrence() {
        let mut seen = HashSet::new();
        let file = Path::new("plan.ron");
        assert!(check_duplicate(&mut seen, "a", file).is_ok());
        assert!(check_duplicate(&mut seen, "b", file).is_ok());
        let err = check_duplicate(&mut seen, "a", file).unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateName { ref name, .. } if name == "a"));
    }

    // -----------------------------------------------------------------------
    // Error display messages
    // -----------------------------------------------------------------------

    #[test]
    fn error_display_messages() {
        let e = DataLoadError::UnsupportedFormat {
            file: PathBuf::from("plan.yaml"),
        };
        assert!(format!("{e}").contains("plan.yaml"));

        let e = DataLoadError::Parse {
            file: PathBuf::from("bad.ron"),
            detail: "syntax error".to_string(),
        };
        assert!(format!("{e}").contains("bad.ron"));
        assert!(format!("{e}").contains("syntax error"));

        let e = DataLoadError::UnresolvedRef {
            file: PathBuf::from("plan.ron"),
            name: "z".to_string(),
            expected_kind: "source node",
        };
        let msg = format!("{e}");
        assert!(msg.contains("'z'"));
        assert!(msg.contains("source node"));

        let e = DataLoadError::DuplicateName {
            file: PathBuf::from("plan.ron"),
            name: "a".to_string(),
        };
        assert!(format!("{e}").contains("'a'"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let data_err: DataLoadError = io_err.into();
        assert!(matches!(data_err, DataLoadError::Io(_)));
        assert!(format!("{data_err}").contains("file not found"));
    }
}
