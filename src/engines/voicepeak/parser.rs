//! Decoder for VOICEPEAK `.vpp` project files.
//!
//! A `.vpp` file is a JSON document that the authoring tool historically
//! pads with trailing NUL bytes (fixed-size write buffers), and whose field
//! names have drifted in casing across tool versions. The decoder therefore
//! strips all trailing NULs before parsing and matches every schema field
//! name case-insensitively. Unrecognized fields are skipped; recognized
//! fields that are absent fall back to their type's default, except for the
//! required `version` and `project` roots. Decoding is all-or-nothing: no
//! partially populated document is ever returned.
//!
//! The decoder is purely syntactic. It never clamps or range-checks values;
//! that belongs to the live generation request types.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::project::{
    ExportSettings, GlobalEmotionEntry, GlobalSettingEntry, NarrationBlock, NarratorRef, Phoneme,
    ProjectDocument, ProjectParams, ProjectSection, Sentence, Syllable, Token, VoiceEntry,
};

#[derive(thiserror::Error, Debug)]
pub enum VoicePeakError {
    #[error("Project file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed project document: {0}")]
    MalformedDocument(String),
    #[error(
        "VOICEPEAK executable not found at {}. Point VoicePeakOptions::executable_path \
         at the installed binary.",
        .0.display()
    )]
    ExecutableNotFound(PathBuf),
    #[error("VOICEPEAK exited with code {code:?}: {stderr}")]
    GenerationFailed { code: Option<i32>, stderr: String },
    #[error("Unknown narrator name: '{0}'. Call Narrator::all() to list known presets.")]
    UnknownNarrator(String),
}

/// Parse the `.vpp` project file at `path` into a [`ProjectDocument`].
///
/// Reads the whole file, strips trailing NUL padding, then decodes against
/// the project schema with case-insensitive field matching.
pub fn parse(path: &Path) -> Result<ProjectDocument, VoicePeakError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VoicePeakError::NotFound(path.to_path_buf())
        } else {
            VoicePeakError::Io(e)
        }
    })?;
    let doc = parse_str(&raw)?;
    log::debug!(
        "Parsed project {} ({} blocks, {} voices) from {}",
        doc.version,
        doc.project.blocks.len(),
        doc.voices.len(),
        path.display()
    );
    Ok(doc)
}

/// Parse already-loaded project file content.
///
/// Accepts the raw text of a `.vpp` file, including any trailing NUL
/// padding the authoring tool may have appended.
pub fn parse_str(raw: &str) -> Result<ProjectDocument, VoicePeakError> {
    let trimmed = raw.trim_end_matches('\0');
    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| VoicePeakError::MalformedDocument(format!("invalid JSON: {e}")))?;
    decode_document(&value)
}

/// Check whether the file at `path` is a well-formed `.vpp` project.
///
/// Returns `false` for any failure, including a missing or unreadable
/// file; callers that need the reason must use [`parse`].
pub fn validate(path: &Path) -> bool {
    parse(path).is_ok()
}

fn decode_document(value: &Value) -> Result<ProjectDocument, VoicePeakError> {
    let obj = as_object(value, "document root")?;

    let version = match field(obj, "version") {
        Some(v) => v
            .as_str()
            .ok_or_else(|| type_mismatch("version", "string", v))?
            .to_string(),
        None => return Err(missing_required("version")),
    };

    let project = match field(obj, "project") {
        Some(v) => decode_section(v)?,
        None => return Err(missing_required("project")),
    };

    let voices = match field(obj, "voices") {
        Some(v) => {
            let map = as_object(v, "voices")?;
            let mut voices = HashMap::with_capacity(map.len());
            for (name, entry) in map {
                // Map keys are data (narrator display names), kept verbatim
                voices.insert(name.clone(), decode_voice(entry, &format!("voices[{name:?}]"))?);
            }
            voices
        }
        None => HashMap::new(),
    };

    Ok(ProjectDocument {
        version,
        project,
        voices,
    })
}

fn decode_section(value: &Value) -> Result<ProjectSection, VoicePeakError> {
    let obj = as_object(value, "project")?;
    Ok(ProjectSection {
        params: decode_params_field(obj, "params", "project")?,
        emotions: f64_map_field(obj, "emotions", "project")?,
        global_emotions: seq_field(obj, "global-emotions", "project", decode_global_emotion)?,
        global_settings: seq_field(obj, "global-settings", "project", decode_global_setting)?,
        export: match field(obj, "export") {
            Some(v) => decode_export(v)?,
            None => ExportSettings::default(),
        },
        blocks: seq_field(obj, "blocks", "project", decode_block)?,
    })
}

fn decode_params(value: &Value, ctx: &str) -> Result<ProjectParams, VoicePeakError> {
    let obj = as_object(value, ctx)?;
    Ok(ProjectParams {
        speed: f64_field(obj, "speed", ctx)?,
        pitch: f64_field(obj, "pitch", ctx)?,
        pause: f64_field(obj, "pause", ctx)?,
        volume: f64_field(obj, "volume", ctx)?,
    })
}

fn decode_global_emotion(value: &Value, ctx: &str) -> Result<GlobalEmotionEntry, VoicePeakError> {
    let obj = as_object(value, ctx)?;
    Ok(GlobalEmotionEntry {
        narrator: string_field(obj, "nar", ctx)?,
        emotions: f64_map_field(obj, "em", ctx)?,
    })
}

fn decode_global_setting(value: &Value, ctx: &str) -> Result<GlobalSettingEntry, VoicePeakError> {
    let obj = as_object(value, ctx)?;
    Ok(GlobalSettingEntry {
        narrator: string_field(obj, "nar", ctx)?,
        params: decode_params_field(obj, "pm", ctx)?,
    })
}

fn decode_export(value: &Value) -> Result<ExportSettings, VoicePeakError> {
    let ctx = "project.export";
    let obj = as_object(value, ctx)?;
    Ok(ExportSettings {
        mode: i32_field(obj, "mode", ctx)?,
        audio_format: i32_field(obj, "audio-format", ctx)?,
        sample_rate: u32_field(obj, "sample-rate", ctx)?,
        write_scripts: bool_field(obj, "write-scripts", ctx)?,
        write_text: bool_field(obj, "write-text", ctx)?,
        write_srt: bool_field(obj, "write-srt", ctx)?,
        write_lab: bool_field(obj, "write-lab", ctx)?,
        name_rule: bool_field(obj, "name-rule", ctx)?,
        char_code: i32_field(obj, "char-code", ctx)?,
        name_formats: i32_seq_field(obj, "name-formats", ctx)?,
    })
}

fn decode_block(value: &Value, ctx: &str) -> Result<NarrationBlock, VoicePeakError> {
    let obj = as_object(value, ctx)?;
    Ok(NarrationBlock {
        narrator: match field(obj, "narrator") {
            Some(v) => decode_narrator(v, &format!("{ctx}.narrator"))?,
            None => NarratorRef::default(),
        },
        time_offset_mode: f64_field(obj, "time-offset-mode", ctx)?,
        time_offset: f64_field(obj, "time-offset", ctx)?,
        params: decode_params_field(obj, "params", ctx)?,
        emotions: f64_map_field(obj, "emotions", ctx)?,
        sentence_list: seq_field(obj, "sentence-list", ctx, decode_sentence)?,
        sentence_ranges: seq_field(obj, "sentence-ranges", ctx, |v, c| i64_seq(v, c))?,
    })
}

fn decode_narrator(value: &Value, ctx: &str) -> Result<NarratorRef, VoicePeakError> {
    let obj = as_object(value, ctx)?;
    Ok(NarratorRef {
        key: string_field(obj, "key", ctx)?,
        language: string_field(obj, "language", ctx)?,
        narrator_version: i32_field(obj, "narrator-version", ctx)?,
    })
}

fn decode_sentence(value: &Value, ctx: &str) -> Result<Sentence, VoicePeakError> {
    let obj = as_object(value, ctx)?;
    Ok(Sentence {
        text: string_field(obj, "text", ctx)?,
        has_eos: bool_field(obj, "has-eos", ctx)?,
        tokens: seq_field(obj, "tokens", ctx, decode_token)?,
    })
}

fn decode_token(value: &Value, ctx: &str) -> Result<Token, VoicePeakError> {
    let obj = as_object(value, ctx)?;
    Ok(Token {
        s: string_field(obj, "s", ctx)?,
        pos: i32_field(obj, "pos", ctx)?,
        lang: i32_field(obj, "lang", ctx)?,
        pe: bool_field(obj, "pe", ctx)?,
        syl: seq_field(obj, "syl", ctx, decode_syllable)?,
        r8: i64_seq_field(obj, "r8", ctx)?,
        r32: i64_seq_field(obj, "r32", ctx)?,
    })
}

fn decode_syllable(value: &Value, ctx: &str) -> Result<Syllable, VoicePeakError> {
    let obj = as_object(value, ctx)?;
    Ok(Syllable {
        s: string_field(obj, "s", ctx)?,
        ig: bool_field(obj, "ig", ctx)?,
        a: i32_field(obj, "a", ctx)?,
        i: f64_field(obj, "i", ctx)?,
        u: bool_field(obj, "u", ctx)?,
        p: seq_field(obj, "p", ctx, decode_phoneme)?,
    })
}

fn decode_phoneme(value: &Value, ctx: &str) -> Result<Phoneme, VoicePeakError> {
    let obj = as_object(value, ctx)?;
    Ok(Phoneme {
        s: string_field(obj, "s", ctx)?,
        d: f64_field(obj, "d", ctx)?,
        n: bool_field(obj, "n", ctx)?,
        dt: i32_field(obj, "dt", ctx)?,
    })
}

fn decode_voice(value: &Value, ctx: &str) -> Result<VoiceEntry, VoicePeakError> {
    let obj = as_object(value, ctx)?;
    Ok(VoiceEntry {
        latest: i32_field(obj, "latest", ctx)?,
        nid: string_field(obj, "nid", ctx)?,
    })
}

// --- case-insensitive field access and typed extraction ---

/// Look up a schema field by name, ignoring ASCII case.
///
/// Schema field names are ASCII on the wire; data-bearing map keys
/// (emotion names, voice names) never go through this lookup.
fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

fn as_object<'a>(value: &'a Value, ctx: &str) -> Result<&'a Map<String, Value>, VoicePeakError> {
    value
        .as_object()
        .ok_or_else(|| type_mismatch(ctx, "object", value))
}

fn missing_required(name: &str) -> VoicePeakError {
    VoicePeakError::MalformedDocument(format!("missing required field '{name}'"))
}

fn type_mismatch(ctx: &str, expected: &str, got: &Value) -> VoicePeakError {
    VoicePeakError::MalformedDocument(format!(
        "{ctx}: expected {expected}, got {}",
        json_type_name(got)
    ))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn string_field(obj: &Map<String, Value>, name: &str, ctx: &str) -> Result<String, VoicePeakError> {
    match field(obj, name) {
        Some(v) => Ok(v
            .as_str()
            .ok_or_else(|| type_mismatch(&format!("{ctx}.{name}"), "string", v))?
            .to_string()),
        None => Ok(String::new()),
    }
}

fn bool_field(obj: &Map<String, Value>, name: &str, ctx: &str) -> Result<bool, VoicePeakError> {
    match field(obj, name) {
        Some(v) => v
            .as_bool()
            .ok_or_else(|| type_mismatch(&format!("{ctx}.{name}"), "boolean", v)),
        None => Ok(false),
    }
}

fn f64_field(obj: &Map<String, Value>, name: &str, ctx: &str) -> Result<f64, VoicePeakError> {
    match field(obj, name) {
        Some(v) => v
            .as_f64()
            .ok_or_else(|| type_mismatch(&format!("{ctx}.{name}"), "number", v)),
        None => Ok(0.0),
    }
}

fn i64_value(value: &Value, ctx: &str) -> Result<i64, VoicePeakError> {
    value
        .as_i64()
        .ok_or_else(|| type_mismatch(ctx, "integer", value))
}

fn i32_field(obj: &Map<String, Value>, name: &str, ctx: &str) -> Result<i32, VoicePeakError> {
    match field(obj, name) {
        Some(v) => {
            let ctx = format!("{ctx}.{name}");
            let n = i64_value(v, &ctx)?;
            i32::try_from(n).map_err(|_| {
                VoicePeakError::MalformedDocument(format!("{ctx}: integer {n} out of range"))
            })
        }
        None => Ok(0),
    }
}

fn u32_field(obj: &Map<String, Value>, name: &str, ctx: &str) -> Result<u32, VoicePeakError> {
    match field(obj, name) {
        Some(v) => {
            let ctx = format!("{ctx}.{name}");
            let n = i64_value(v, &ctx)?;
            u32::try_from(n).map_err(|_| {
                VoicePeakError::MalformedDocument(format!("{ctx}: integer {n} out of range"))
            })
        }
        None => Ok(0),
    }
}

/// Decode a sub-object of four tuning parameters; missing field means defaults.
fn decode_params_field(
    obj: &Map<String, Value>,
    name: &str,
    ctx: &str,
) -> Result<ProjectParams, VoicePeakError> {
    match field(obj, name) {
        Some(v) => decode_params(v, &format!("{ctx}.{name}")),
        None => Ok(ProjectParams::default()),
    }
}

/// Decode a mapping of name -> float weight; keys are data and kept verbatim.
fn f64_map_field(
    obj: &Map<String, Value>,
    name: &str,
    ctx: &str,
) -> Result<HashMap<String, f64>, VoicePeakError> {
    match field(obj, name) {
        Some(v) => {
            let ctx = format!("{ctx}.{name}");
            let map = as_object(v, &ctx)?;
            let mut out = HashMap::with_capacity(map.len());
            for (key, weight) in map {
                let weight = weight
                    .as_f64()
                    .ok_or_else(|| type_mismatch(&format!("{ctx}[{key:?}]"), "number", weight))?;
                out.insert(key.clone(), weight);
            }
            Ok(out)
        }
        None => Ok(HashMap::new()),
    }
}

/// Decode an array field element-by-element; missing field means empty.
fn seq_field<T>(
    obj: &Map<String, Value>,
    name: &str,
    ctx: &str,
    decode: impl Fn(&Value, &str) -> Result<T, VoicePeakError>,
) -> Result<Vec<T>, VoicePeakError> {
    match field(obj, name) {
        Some(v) => {
            let ctx = format!("{ctx}.{name}");
            let items = v
                .as_array()
                .ok_or_else(|| type_mismatch(&ctx, "array", v))?;
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| decode(item, &format!("{ctx}[{idx}]")))
                .collect()
        }
        None => Ok(Vec::new()),
    }
}

fn i64_seq(value: &Value, ctx: &str) -> Result<Vec<i64>, VoicePeakError> {
    let items = value
        .as_array()
        .ok_or_else(|| type_mismatch(ctx, "array", value))?;
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| i64_value(item, &format!("{ctx}[{idx}]")))
        .collect()
}

fn i64_seq_field(
    obj: &Map<String, Value>,
    name: &str,
    ctx: &str,
) -> Result<Vec<i64>, VoicePeakError> {
    match field(obj, name) {
        Some(v) => i64_seq(v, &format!("{ctx}.{name}")),
        None => Ok(Vec::new()),
    }
}

fn i32_seq_field(
    obj: &Map<String, Value>,
    name: &str,
    ctx: &str,
) -> Result<Vec<i32>, VoicePeakError> {
    let wide = i64_seq_field(obj, name, ctx)?;
    wide.into_iter()
        .map(|n| {
            i32::try_from(n).map_err(|_| {
                VoicePeakError::MalformedDocument(format!(
                    "{ctx}.{name}: integer {n} out of range"
                ))
            })
        })
        .collect()
}
