//! VOICEPEAK text-to-speech engine integration.
//!
//! This module drives the VOICEPEAK desktop application through its
//! command line interface and decodes its `.vpp` project files into a
//! typed document model.
//!
//! # System Requirements
//!
//! **VOICEPEAK** must be installed with at least one narrator:
//! - **Windows**: `C:\Program Files\VOICEPEAK\voicepeak.exe` (default)
//! - **macOS**: `/Applications/voicepeak.app/Contents/MacOS/voicepeak`
//!
//! Override the location via [`VoicePeakOptions::executable_path`].
//!
//! # Known Narrators
//!
//! | System name | Japanese | Romanized | Emotion parameters |
//! |---|---|---|---|
//! | `Frimomen` | フリモメン | furimomen | happy, angry, sad, ochoushimono |
//! | `夏色花梨` | 夏色花梨 | natukikarin | hightension, buchigire, nageki, sagesumi, sasayaki |
//! | `ポロンちゃん` | ポロンちゃん | poronchan | robot, mellow, punpun, genius, teary |
//!
//! Narrators not in this table still work for generation; they just have
//! no emotion-parameter schema to validate against.
//!
//! # Examples
//!
//! ## Generating Speech
//!
//! ```rust,no_run
//! use voicegen_rs::{VoiceGenerator, engines::voicepeak::{VoicePeakEngine, VoicePeakGenerateRequestBuilder}};
//!
//! let engine = VoicePeakEngine::new();
//! let request = VoicePeakGenerateRequestBuilder::default()
//!     .text("こんにちは、世界！")
//!     .narrator("夏色花梨")
//!     .emotion_parameters("hightension=50".to_string())
//!     .build()?;
//!
//! let result = engine.generate(&request)?;
//! println!("{} ({:.1}s of audio)", result.output_wav_path.display(), result.wav_duration_secs()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Parsing a Project File
//!
//! ```rust,no_run
//! use std::path::Path;
//! use voicegen_rs::engines::voicepeak::parser;
//!
//! let doc = parser::parse(Path::new("my_project.vpp"))?;
//! for block in &doc.project.blocks {
//!     for sentence in &block.sentence_list {
//!         println!("{}: {}", block.narrator.key, sentence.text);
//!     }
//! }
//! # Ok::<(), voicegen_rs::engines::voicepeak::VoicePeakError>(())
//! ```

pub mod engine;
mod generator;
pub mod narrators;
pub mod parser;
pub mod project;

pub use engine::{
    VoicePeakEngine, VoicePeakGenerateRequest, VoicePeakGenerateRequestBuilder, VoicePeakOptions,
};
pub use narrators::{Emotion, Narrator};
pub use parser::VoicePeakError;
pub use project::ProjectDocument;
