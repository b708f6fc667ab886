use std::path::PathBuf;
use std::time::Instant;

use derive_builder::Builder;

use crate::output::{self, SidecarMetadata, TextFileSaveMode};
use crate::{GenerateResult, VoiceGenerator};

use super::generator;
use super::narrators::Narrator;

/// Configuration for locating the VOICEPEAK installation.
#[derive(Debug, Clone)]
pub struct VoicePeakOptions {
    /// Full path of the VOICEPEAK executable
    pub executable_path: PathBuf,
    /// Narrator used when a request leaves the narrator empty
    pub default_narrator: String,
}

impl Default for VoicePeakOptions {
    fn default() -> Self {
        Self {
            executable_path: default_executable_path(),
            default_narrator: "フリモメン".to_string(),
        }
    }
}

/// Platform-conventional install location of the VOICEPEAK binary.
fn default_executable_path() -> PathBuf {
    if cfg!(target_os = "windows") {
        PathBuf::from("C:\\Program Files\\VOICEPEAK\\voicepeak.exe")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/Applications/voicepeak.app/Contents/MacOS/voicepeak")
    } else {
        // Rely on PATH lookup elsewhere
        PathBuf::from("voicepeak")
    }
}

/// Parameters for one VOICEPEAK generation request.
///
/// Unlike the project-file parser, the live request clamps its tuning
/// values to the ranges the application accepts: speed 50–200, pitch
/// -300–300, emotion values 0–100.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct VoicePeakGenerateRequest {
    /// Text to narrate
    pub text: String,
    /// Narrator display name; empty means the engine's default narrator
    #[builder(default = "String::new()")]
    pub narrator: String,
    /// Output WAV path
    #[builder(default = "PathBuf::from(\"output.wav\")")]
    pub output_path: PathBuf,
    /// Speech speed, clamped to 50–200
    #[builder(default = "100")]
    pub speed: i32,
    /// Pitch shift, clamped to -300–300
    #[builder(default = "0")]
    pub pitch: i32,
    /// Emotion parameter string, e.g. `"happy=50,angry=0"`.
    ///
    /// Applied through the narrator's preset schema; entries the narrator
    /// does not have are dropped.
    #[builder(default)]
    pub emotion_parameters: Option<String>,
    /// Sidecar text file handling next to the WAV output
    #[builder(default)]
    pub save_mode: TextFileSaveMode,
}

impl VoicePeakGenerateRequest {
    pub fn clamped_speed(&self) -> i32 {
        self.speed.clamp(50, 200)
    }

    pub fn clamped_pitch(&self) -> i32 {
        self.pitch.clamp(-300, 300)
    }
}

/// VOICEPEAK text-to-speech engine.
///
/// Drives the desktop application through its command line interface; the
/// application itself performs the synthesis and writes the WAV file.
///
/// # Quick Start
///
/// ```rust,no_run
/// use voicegen_rs::{VoiceGenerator, engines::voicepeak::{VoicePeakEngine, VoicePeakGenerateRequestBuilder}};
///
/// let engine = VoicePeakEngine::new();
/// let request = VoicePeakGenerateRequestBuilder::default()
///     .text("こんにちは")
///     .narrator("夏色花梨")
///     .build()?;
/// let result = engine.generate(&request)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct VoicePeakEngine {
    options: VoicePeakOptions,
}

impl VoicePeakEngine {
    /// Create an engine with the platform-default executable path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with explicit options.
    pub fn with_options(options: VoicePeakOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &VoicePeakOptions {
        &self.options
    }

    /// Resolve the narrator preset and rendered emotion string for a request.
    fn resolve_narrator(&self, request: &VoicePeakGenerateRequest) -> (Narrator, Option<String>) {
        let name = if request.narrator.is_empty() {
            &self.options.default_narrator
        } else {
            &request.narrator
        };
        let mut narrator = Narrator::by_name_or_unknown(name);

        if let Some(parameters) = &request.emotion_parameters {
            if narrator.emotions().is_empty() {
                log::warn!(
                    "Narrator '{}' has no known emotion schema; ignoring emotion parameters",
                    narrator.system_name()
                );
            } else {
                narrator.set_emotion_parameters(parameters);
            }
        }

        let emotions = narrator
            .has_active_emotions()
            .then(|| narrator.emotion_string());
        (narrator, emotions)
    }
}

impl VoiceGenerator for VoicePeakEngine {
    type Request = VoicePeakGenerateRequest;

    fn generate(
        &self,
        request: &Self::Request,
    ) -> Result<GenerateResult, Box<dyn std::error::Error>> {
        let (narrator, emotions) = self.resolve_narrator(request);
        let args = generator::build_args(request, narrator.system_name(), emotions.as_deref());

        let start = Instant::now();
        generator::run_voicepeak(&self.options.executable_path, &args)?;
        let elapsed = start.elapsed();

        log::info!(
            "Generated {} with narrator {} in {:.2?}",
            request.output_path.display(),
            narrator.system_name(),
            elapsed
        );

        output::write_sidecar(
            &request.output_path,
            request.save_mode,
            &SidecarMetadata {
                text: &request.text,
                narrator: narrator.system_name(),
                speed: request.clamped_speed(),
                pitch: request.clamped_pitch(),
                emotions: emotions.as_deref(),
                generated_at: chrono::Local::now().to_rfc3339(),
            },
        )?;

        Ok(GenerateResult {
            output_wav_path: request.output_path.clone(),
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{VoicePeakEngine, VoicePeakGenerateRequestBuilder, VoicePeakOptions};

    #[test]
    fn builder_applies_documented_defaults() {
        let request = VoicePeakGenerateRequestBuilder::default()
            .text("test")
            .build()
            .expect("text alone should suffice");

        assert_eq!(request.narrator, "");
        assert_eq!(request.output_path, PathBuf::from("output.wav"));
        assert_eq!(request.speed, 100);
        assert_eq!(request.pitch, 0);
        assert!(request.emotion_parameters.is_none());
    }

    #[test]
    fn builder_requires_text() {
        assert!(VoicePeakGenerateRequestBuilder::default().build().is_err());
    }

    #[test]
    fn request_clamps_speed_and_pitch() {
        let request = VoicePeakGenerateRequestBuilder::default()
            .text("test")
            .speed(10)
            .pitch(500)
            .build()
            .unwrap();
        assert_eq!(request.clamped_speed(), 50);
        assert_eq!(request.clamped_pitch(), 300);

        let request = VoicePeakGenerateRequestBuilder::default()
            .text("test")
            .speed(150)
            .pitch(-50)
            .build()
            .unwrap();
        assert_eq!(request.clamped_speed(), 150);
        assert_eq!(request.clamped_pitch(), -50);
    }

    #[test]
    fn empty_request_narrator_falls_back_to_engine_default() {
        let engine = VoicePeakEngine::with_options(VoicePeakOptions {
            default_narrator: "夏色花梨".to_string(),
            ..VoicePeakOptions::default()
        });
        let request = VoicePeakGenerateRequestBuilder::default()
            .text("test")
            .build()
            .unwrap();

        let (narrator, emotions) = engine.resolve_narrator(&request);
        assert_eq!(narrator.jp_name(), "夏色花梨");
        assert!(emotions.is_none());
    }

    #[test]
    fn active_emotions_render_into_cli_string() {
        let engine = VoicePeakEngine::new();
        let request = VoicePeakGenerateRequestBuilder::default()
            .text("test")
            .narrator("frimomen")
            .emotion_parameters(Some("happy=80,sad=20".to_string()))
            .build()
            .unwrap();

        let (_, emotions) = engine.resolve_narrator(&request);
        assert_eq!(
            emotions.as_deref(),
            Some("happy=80,angry=0,sad=20,ochoushimono=0")
        );
    }

    #[test]
    fn failed_generation_writes_no_sidecar() {
        use crate::VoiceGenerator;

        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("out.wav");
        let engine = VoicePeakEngine::with_options(VoicePeakOptions {
            executable_path: PathBuf::from("/no/such/voicepeak"),
            ..VoicePeakOptions::default()
        });
        let request = VoicePeakGenerateRequestBuilder::default()
            .text("test")
            .output_path(wav.clone())
            .build()
            .unwrap();

        assert!(engine.generate(&request).is_err());
        assert!(!wav.with_extension("txt").exists());
    }

    #[test]
    fn unknown_narrator_ignores_emotion_parameters() {
        let engine = VoicePeakEngine::new();
        let request = VoicePeakGenerateRequestBuilder::default()
            .text("test")
            .narrator("結月ゆかり")
            .emotion_parameters(Some("happy=80".to_string()))
            .build()
            .unwrap();

        let (narrator, emotions) = engine.resolve_narrator(&request);
        assert_eq!(narrator.system_name(), "結月ゆかり");
        assert!(emotions.is_none());
    }
}
