//! Typed model of a VOICEPEAK `.vpp` project document.
//!
//! Every type here is a plain value record reconstructed on each parse.
//! Field names on the wire are short or hyphenated (`nar`, `em`, `pm`,
//! `write-scripts`); the `serde` renames carry the canonical wire spelling
//! so a decoded document re-encodes to the same shape. Numeric enum codes
//! (`mode`, `audio-format`, `char-code`, `pos`, ...) have no documented
//! meaning and are kept as raw integers, never mapped to named variants.

use std::collections::HashMap;

use serde::Serialize;

/// Root structure of a `.vpp` project file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProjectDocument {
    /// Authoring tool version, dotted-numeric (e.g. `"1.2.19"`)
    pub version: String,
    pub project: ProjectSection,
    /// Installed voices referenced by the project, keyed by narrator display name
    pub voices: HashMap<String, VoiceEntry>,
}

/// Project-wide configuration and the ordered narration blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProjectSection {
    /// Project-wide default parameters
    pub params: ProjectParams,
    /// Project-wide default emotion weights, keyed by emotion name
    pub emotions: HashMap<String, f64>,
    /// Per-narrator emotion overrides.
    ///
    /// Independently ordered from [`global_settings`](Self::global_settings):
    /// correlate entries by narrator name, never by index.
    #[serde(rename = "global-emotions")]
    pub global_emotions: Vec<GlobalEmotionEntry>,
    /// Per-narrator parameter overrides (see ordering note on `global_emotions`)
    #[serde(rename = "global-settings")]
    pub global_settings: Vec<GlobalSettingEntry>,
    pub export: ExportSettings,
    /// Narration blocks in playback order
    pub blocks: Vec<NarrationBlock>,
}

/// The four tuning parameters that cascade from project to block level.
///
/// No range constraints apply at this layer; raw file values are kept even
/// when they fall outside what the live generation request types accept.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ProjectParams {
    pub speed: f64,
    pub pitch: f64,
    pub pause: f64,
    pub volume: f64,
}

/// Project-level emotion weights for one narrator.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GlobalEmotionEntry {
    #[serde(rename = "nar")]
    pub narrator: String,
    #[serde(rename = "em")]
    pub emotions: HashMap<String, f64>,
}

/// Project-level parameter overrides for one narrator.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GlobalSettingEntry {
    #[serde(rename = "nar")]
    pub narrator: String,
    #[serde(rename = "pm")]
    pub params: ProjectParams,
}

/// Audio export configuration stored with the project.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExportSettings {
    /// Export mode code (opaque)
    pub mode: i32,
    /// Audio format code (opaque)
    #[serde(rename = "audio-format")]
    pub audio_format: i32,
    /// Output sample rate in Hz
    #[serde(rename = "sample-rate")]
    pub sample_rate: u32,
    #[serde(rename = "write-scripts")]
    pub write_scripts: bool,
    #[serde(rename = "write-text")]
    pub write_text: bool,
    #[serde(rename = "write-srt")]
    pub write_srt: bool,
    #[serde(rename = "write-lab")]
    pub write_lab: bool,
    #[serde(rename = "name-rule")]
    pub name_rule: bool,
    /// Character encoding code (opaque)
    #[serde(rename = "char-code")]
    pub char_code: i32,
    /// File-naming rule codes; length and order are both significant
    #[serde(rename = "name-formats")]
    pub name_formats: Vec<i32>,
}

/// One narration unit: a narrator plus its sentences and overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NarrationBlock {
    pub narrator: NarratorRef,
    /// Declared as floating-point in the schema even though observed values
    /// are integral; kept as `f64` for round-trip fidelity.
    #[serde(rename = "time-offset-mode")]
    pub time_offset_mode: f64,
    #[serde(rename = "time-offset")]
    pub time_offset: f64,
    /// Block-level parameter overrides
    pub params: ProjectParams,
    /// Block-level emotion overrides
    pub emotions: HashMap<String, f64>,
    #[serde(rename = "sentence-list")]
    pub sentence_list: Vec<Sentence>,
    /// Character-offset ranges into the block's concatenated sentence text.
    /// Observed inner length is always 2 (`[start, end]`) but the format
    /// does not guarantee it, so each range is an open-length sequence.
    #[serde(rename = "sentence-ranges")]
    pub sentence_ranges: Vec<Vec<i64>>,
}

/// Reference to the narrator a block is voiced with.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NarratorRef {
    /// Narrator display name
    pub key: String,
    /// Language tag (e.g. `"japanese"`)
    pub language: String,
    /// Narrator version; `-1` is an observed "unspecified/latest" sentinel
    /// and is kept literally
    #[serde(rename = "narrator-version")]
    pub narrator_version: i32,
}

/// One sentence of narration text with its token analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Sentence {
    pub text: String,
    /// End-of-sentence marker
    #[serde(rename = "has-eos")]
    pub has_eos: bool,
    pub tokens: Vec<Token>,
}

/// One lexical token of a sentence.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Token {
    /// Surface text
    pub s: String,
    /// Part-of-speech / lexicon code (opaque)
    pub pos: i32,
    /// Language code
    pub lang: i32,
    pub pe: bool,
    pub syl: Vec<Syllable>,
    /// Auxiliary rule-index table, preserved verbatim
    pub r8: Vec<i64>,
    /// Auxiliary rule-index table, preserved verbatim
    pub r32: Vec<i64>,
}

/// One syllable of a token.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Syllable {
    pub s: String,
    /// "ignore" flag
    pub ig: bool,
    /// Accent-related code
    pub a: i32,
    /// Continuous intensity value
    pub i: f64,
    pub u: bool,
    pub p: Vec<Phoneme>,
}

/// One phoneme with its timing.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Phoneme {
    /// Phoneme symbol
    pub s: String,
    /// Duration
    pub d: f64,
    pub n: bool,
    /// Discrete type code
    pub dt: i32,
}

/// Installed-voice record from the project's `voices` map.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct VoiceEntry {
    /// Voice version number
    pub latest: i32,
    /// Internal voice identifier
    pub nid: String,
}
