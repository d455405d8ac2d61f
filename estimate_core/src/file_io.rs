//! # File I/O Module
//!
//! Saves raw estimation responses so a report can be re-rendered later, and
//! reads request files for non-interactive submissions.
//!
//! - **Atomic saves**: write to `.tmp`, sync, rename over the target
//! - **Verbatim storage**: the response body is stored exactly as received,
//!   normalization happens again on load
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::file_io::{load_response, save_response};
//! use estimate_core::session::EstimationHandoff;
//! use std::path::Path;
//!
//! let handoff = EstimationHandoff::new(200, r#"{"projectName": "Atlas"}"#);
//! save_response(&handoff, Path::new("atlas.json"))?;
//!
//! let raw = load_response(Path::new("atlas.json"))?;
//! assert!(raw.is_some());
//! # Ok::<(), estimate_core::errors::EstimateError>(())
//! ```

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::errors::{EstimateError, EstimateResult};
use crate::request::EstimationRequest;
use crate::session::EstimationHandoff;

/// Save a raw response with atomic write semantics.
///
/// The body goes to `<path>.tmp` first, is synced to disk, then renamed
/// over `path`. An interrupted save leaves the previous file intact.
pub fn save_response(handoff: &EstimationHandoff, path: &Path) -> EstimateResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        EstimateError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(handoff.raw.as_bytes()).map_err(|e| {
        EstimateError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        EstimateError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        EstimateError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(
        path = %path.display(),
        id = %handoff.id,
        bytes = handoff.raw.len(),
        "saved estimation response"
    );
    Ok(())
}

/// Load a saved raw response.
///
/// * `Ok(None)` - nothing saved at `path`
/// * `Ok(Some(raw))` - the stored text, unparsed
/// * `Err(EstimateError::FileError)` - the file exists but could not be read
pub fn load_response(path: &Path) -> EstimateResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => {
            debug!(path = %path.display(), bytes = raw.len(), "loaded estimation response");
            Ok(Some(raw))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no saved estimation response");
            Ok(None)
        }
        Err(e) => Err(EstimateError::file_error(
            "read",
            path.display().to_string(),
            e.to_string(),
        )),
    }
}

/// Load a request from a JSON file. Missing fields take their defaults.
pub fn load_request(path: &Path) -> EstimateResult<EstimationRequest> {
    let contents = fs::read_to_string(path).map_err(|e| {
        EstimateError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let mut request: EstimationRequest =
        serde_json::from_str(&contents).map_err(|e| EstimateError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;
    let dropped = request.dedupe_selections();
    if dropped > 0 {
        warn!(path = %path.display(), dropped, "ignoring repeated platform or phase entries");
    }
    request.screen_count = request.screen_total();

    info!(path = %path.display(), project = %request.project_name, "loaded estimation request");
    Ok(request)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Phase, Platform};
    use std::env::temp_dir;

    #[test]
    fn test_save_and_load_response() {
        let path = temp_dir().join("estimate_test_response.json");
        let raw = r#"[{"output": "{\"projectName\":\"Atlas\"}"}]"#;

        save_response(&EstimationHandoff::new(200, raw), &path).unwrap();
        assert!(!tmp_path_for(&path).exists());

        let loaded = load_response(&path).unwrap();
        assert_eq!(loaded.as_deref(), Some(raw));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_overwrites_previous_response() {
        let path = temp_dir().join("estimate_test_overwrite.json");
        save_response(&EstimationHandoff::new(200, "first"), &path).unwrap();
        save_response(&EstimationHandoff::new(200, "second"), &path).unwrap();
        assert_eq!(load_response(&path).unwrap().as_deref(), Some("second"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_response_is_none() {
        let path = temp_dir().join("estimate_test_never_written.json");
        let _ = fs::remove_file(&path);
        assert_eq!(load_response(&path).unwrap(), None);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let path = Path::new("/nonexistent/dir/response.json");
        let err = save_response(&EstimationHandoff::new(200, "{}"), path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_partial_request() {
        let path = temp_dir().join("estimate_test_request.json");
        let body = r#"{"projectName": "Atlas", "platform": ["iOS App"], "uniqueEasy": 2,
            "otherComplex": 3, "timeline": "8"}"#;
        fs::write(&path, body).unwrap();

        let request = load_request(&path).unwrap();
        assert_eq!(request.project_name, "Atlas");
        assert_eq!(request.platform, vec![Platform::IosApp]);
        assert_eq!(request.screen_count, 5);
        assert_eq!(request.timeline, Some(8));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_request_drops_repeated_selections() {
        let path = temp_dir().join("estimate_test_repeated_request.json");
        let body = r#"{"projectName": "Atlas", "platform": ["iOS App", "Android App", "iOS App"],
            "phases": ["Prototyping", "Discovery", "Prototyping", "Discovery"]}"#;
        fs::write(&path, body).unwrap();

        let request = load_request(&path).unwrap();
        assert_eq!(request.platform, vec![Platform::IosApp, Platform::AndroidApp]);
        assert_eq!(request.phases, vec![Phase::Prototyping, Phase::Discovery]);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["platform"], serde_json::json!(["iOS App", "Android App"]));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_request_rejects_bad_json() {
        let path = temp_dir().join("estimate_test_bad_request.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_request(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }
}
