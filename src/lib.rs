//! # voicegen-rs
//!
//! A Rust library for driving desktop text-to-speech engines and working
//! with their project files.
//!
//! ## Features
//!
//! - **VOICEPEAK CLI**: Generate speech by shelling out to the VOICEPEAK
//!   desktop application's command line interface
//! - **Project File Parsing**: Decode `.vpp` project files into a fully
//!   typed document model, down to individual phoneme durations
//! - **Narrator Presets**: Built-in emotion-parameter schemas for the
//!   known VOICEPEAK narrators
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! voicegen-rs = "0.1"
//! ```
//!
//! ```ignore
//! use std::path::PathBuf;
//! use voicegen_rs::{
//!     engines::voicepeak::{VoicePeakEngine, VoicePeakGenerateRequestBuilder},
//!     VoiceGenerator,
//! };
//!
//! let engine = VoicePeakEngine::new();
//! let request = VoicePeakGenerateRequestBuilder::default()
//!     .text("こんにちは".to_string())
//!     .narrator("フリモメン".to_string())
//!     .output_path(PathBuf::from("output.wav"))
//!     .build()?;
//!
//! let result = engine.generate(&request)?;
//! println!("Wrote {} in {:.2?}", result.output_wav_path.display(), result.elapsed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engines;
pub mod output;

use std::time::Duration;

/// The result of a voice generation operation.
///
/// Contains the path of the generated WAV file and the wall time the
/// backing engine took to produce it.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Full path of the generated WAV file
    pub output_wav_path: std::path::PathBuf,
    /// Wall time spent in the backing engine
    pub elapsed: Duration,
}

impl GenerateResult {
    /// Duration of the generated audio in seconds, probed from the WAV header.
    pub fn wav_duration_secs(&self) -> Result<f64, Box<dyn std::error::Error>> {
        let reader = hound::WavReader::open(&self.output_wav_path)?;
        let spec = reader.spec();
        Ok(reader.duration() as f64 / spec.sample_rate as f64)
    }
}

/// Common interface for voice generation engines.
///
/// Each engine defines its own request type carrying the text and the
/// engine-specific tuning parameters.
pub trait VoiceGenerator {
    /// Engine-specific generation request (text, narrator, tuning, output path)
    type Request;

    /// Generate a voice file for the given request.
    fn generate(
        &self,
        request: &Self::Request,
    ) -> Result<GenerateResult, Box<dyn std::error::Error>>;
}
