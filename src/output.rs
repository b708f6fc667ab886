//! Output directory and sidecar file helpers.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// How the narration text is saved next to a generated WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFileSaveMode {
    /// No sidecar file
    None,
    /// Narration text as a `.txt` file (default)
    #[default]
    TextOnly,
    /// Text plus generation metadata as a `.json` file
    WithMetadata,
}

/// Metadata written for [`TextFileSaveMode::WithMetadata`].
#[derive(Debug, Serialize)]
pub struct SidecarMetadata<'a> {
    pub text: &'a str,
    pub narrator: &'a str,
    pub speed: i32,
    pub pitch: i32,
    pub emotions: Option<&'a str>,
    /// RFC 3339 local timestamp of the generation
    pub generated_at: String,
}

/// Write the sidecar file for a generated WAV, if the mode requests one.
///
/// The sidecar lives next to `wav_path` with the extension swapped to
/// `.txt` or `.json`. Returns the path written, if any.
pub fn write_sidecar(
    wav_path: &Path,
    mode: TextFileSaveMode,
    metadata: &SidecarMetadata<'_>,
) -> io::Result<Option<PathBuf>> {
    match mode {
        TextFileSaveMode::None => Ok(None),
        TextFileSaveMode::TextOnly => {
            let path = wav_path.with_extension("txt");
            std::fs::write(&path, metadata.text)?;
            Ok(Some(path))
        }
        TextFileSaveMode::WithMetadata => {
            let path = wav_path.with_extension("json");
            let json = serde_json::to_string_pretty(metadata).map_err(io::Error::other)?;
            std::fs::write(&path, json)?;
            Ok(Some(path))
        }
    }
}

/// Create a timestamped subdirectory (`yyyyMMdd_HHMMSSmmm`) under `base`.
pub fn create_timestamped_dir(base: &Path) -> io::Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S%3f").to_string();
    let dir = base.join(stamp);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::{create_timestamped_dir, write_sidecar, SidecarMetadata, TextFileSaveMode};

    fn metadata(text: &str) -> SidecarMetadata<'_> {
        SidecarMetadata {
            text,
            narrator: "Frimomen",
            speed: 100,
            pitch: 0,
            emotions: Some("happy=50,angry=0,sad=0,ochoushimono=0"),
            generated_at: "2026-08-23T12:00:00+09:00".to_string(),
        }
    }

    #[test]
    fn none_mode_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("out.wav");
        let written = write_sidecar(&wav, TextFileSaveMode::None, &metadata("text")).unwrap();
        assert!(written.is_none());
        assert!(!wav.with_extension("txt").exists());
    }

    #[test]
    fn text_only_writes_raw_text() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("out.wav");
        let written = write_sidecar(&wav, TextFileSaveMode::TextOnly, &metadata("こんにちは"))
            .unwrap()
            .expect("txt sidecar should be written");

        assert_eq!(written, wav.with_extension("txt"));
        assert_eq!(std::fs::read_to_string(&written).unwrap(), "こんにちは");
    }

    #[test]
    fn with_metadata_writes_json_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("out.wav");
        let written = write_sidecar(&wav, TextFileSaveMode::WithMetadata, &metadata("こんにちは"))
            .unwrap()
            .expect("json sidecar should be written");

        assert_eq!(written, wav.with_extension("json"));
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(parsed["text"], "こんにちは");
        assert_eq!(parsed["narrator"], "Frimomen");
        assert_eq!(parsed["speed"], 100);
        assert_eq!(parsed["emotions"], "happy=50,angry=0,sad=0,ochoushimono=0");
    }

    #[test]
    fn creates_timestamped_directory_under_base() {
        let base = tempfile::tempdir().unwrap();
        let dir = create_timestamped_dir(base.path()).unwrap();

        assert!(dir.is_dir());
        let name = dir.file_name().unwrap().to_string_lossy();
        // yyyyMMdd_HHMMSSmmm
        assert_eq!(name.len(), "20260823_120000000".len());
        assert_eq!(name.as_bytes()[8], b'_');
    }
}
