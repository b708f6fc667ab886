use std::path::PathBuf;
use std::time::Instant;

use voicegen_rs::{
    engines::voicepeak::{parser, VoicePeakEngine, VoicePeakGenerateRequestBuilder},
    VoiceGenerator,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // With a .vpp argument, inspect the project file instead of speaking.
    if let Some(path) = std::env::args().nth(1) {
        let path = PathBuf::from(path);
        let parse_start = Instant::now();
        let doc = parser::parse(&path)?;
        println!(
            "Parsed {} (version {}) in {:.2?}",
            path.display(),
            doc.version,
            parse_start.elapsed()
        );
        println!("Voices: {:?}", doc.voices.keys().collect::<Vec<_>>());
        for (idx, block) in doc.project.blocks.iter().enumerate() {
            let text: String = block
                .sentence_list
                .iter()
                .map(|s| s.text.as_str())
                .collect();
            println!("Block {idx} [{}]: {text}", block.narrator.key);
        }
        return Ok(());
    }

    let engine = VoicePeakEngine::new();
    let request = VoicePeakGenerateRequestBuilder::default()
        .text("こんにちは！これはボイスピークによる音声生成のデモです。")
        .narrator("夏色花梨")
        .emotion_parameters("hightension=30".to_string())
        .output_path(PathBuf::from("output.wav"))
        .build()?;

    let result = engine.generate(&request)?;
    println!(
        "Generated {:.1}s of audio in {:.2?}",
        result.wav_duration_secs()?,
        result.elapsed
    );
    println!("Saved to {}", result.output_wav_path.display());

    Ok(())
}
