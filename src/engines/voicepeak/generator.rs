//! VOICEPEAK CLI invocation.
//!
//! VOICEPEAK exposes a one-shot command line interface:
//!
//! ```text
//! voicepeak -s <text> -n <narrator> -o <out.wav> --speed <50-200> --pitch <-300-300> [-e <emotions>]
//! ```
//!
//! The process is spawned once per request and awaited to completion; there
//! is no retry or supervision at this layer.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use super::engine::VoicePeakGenerateRequest;
use super::parser::VoicePeakError;

/// Build the CLI argument list for one generation request.
///
/// `narrator` is the resolved VOICEPEAK system name and `emotions` the
/// rendered `name=value,...` string, if any emotion is active. Speed and
/// pitch are clamped here to the ranges the application accepts.
pub(crate) fn build_args(
    request: &VoicePeakGenerateRequest,
    narrator: &str,
    emotions: Option<&str>,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-s".into(),
        request.text.clone().into(),
        "-n".into(),
        narrator.into(),
        "-o".into(),
        request.output_path.clone().into(),
        "--speed".into(),
        request.clamped_speed().to_string().into(),
        "--pitch".into(),
        request.clamped_pitch().to_string().into(),
    ];
    if let Some(emotions) = emotions {
        args.push("-e".into());
        args.push(emotions.into());
    }
    args
}

/// Run the VOICEPEAK executable and wait for it to finish.
///
/// A spawn failure with `NotFound` maps to [`VoicePeakError::ExecutableNotFound`];
/// a non-zero exit maps to [`VoicePeakError::GenerationFailed`] carrying the
/// exit code and captured stderr.
pub(crate) fn run_voicepeak(executable: &Path, args: &[OsString]) -> Result<(), VoicePeakError> {
    log::debug!("Running {} with {:?}", executable.display(), args);

    let output = Command::new(executable)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VoicePeakError::ExecutableNotFound(executable.to_path_buf())
            } else {
                VoicePeakError::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        return Err(VoicePeakError::GenerationFailed {
            code: output.status.code(),
            stderr,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{build_args, run_voicepeak};
    use crate::engines::voicepeak::engine::VoicePeakGenerateRequestBuilder;
    use crate::engines::voicepeak::parser::VoicePeakError;

    #[test]
    fn builds_basic_argument_list() {
        let request = VoicePeakGenerateRequestBuilder::default()
            .text("音声生成テストです")
            .narrator("夏色花梨")
            .output_path(PathBuf::from("/tmp/output.wav"))
            .build()
            .unwrap();

        let args = build_args(&request, "夏色花梨", None);
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-s",
                "音声生成テストです",
                "-n",
                "夏色花梨",
                "-o",
                "/tmp/output.wav",
                "--speed",
                "100",
                "--pitch",
                "0",
            ]
        );
    }

    #[test]
    fn appends_emotion_argument_when_present() {
        let request = VoicePeakGenerateRequestBuilder::default()
            .text("test")
            .build()
            .unwrap();

        let args = build_args(&request, "Frimomen", Some("happy=50,angry=0"));
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(rendered[rendered.len() - 2], "-e");
        assert_eq!(rendered[rendered.len() - 1], "happy=50,angry=0");
    }

    #[test]
    fn clamps_speed_and_pitch_in_arguments() {
        let request = VoicePeakGenerateRequestBuilder::default()
            .text("test")
            .speed(9000)
            .pitch(-9000)
            .build()
            .unwrap();

        let args = build_args(&request, "Frimomen", None);
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let speed_idx = rendered.iter().position(|a| a == "--speed").unwrap();
        let pitch_idx = rendered.iter().position(|a| a == "--pitch").unwrap();
        assert_eq!(rendered[speed_idx + 1], "200");
        assert_eq!(rendered[pitch_idx + 1], "-300");
    }

    #[test]
    fn missing_executable_maps_to_dedicated_error() {
        let err = run_voicepeak(Path::new("/no/such/voicepeak"), &[]).unwrap_err();
        assert!(matches!(err, VoicePeakError::ExecutableNotFound(_)), "{err}");
    }
}
