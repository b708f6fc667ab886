//! Voice generation engines.
//!
//! This module contains implementations of text-to-speech engines.
//!
//! # Available Engines
//!
//! - `voicepeak` - VOICEPEAK desktop application (CLI-driven)

pub mod voicepeak;
