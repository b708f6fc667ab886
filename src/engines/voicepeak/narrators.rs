//! Narrator presets and their emotion-parameter schemas.
//!
//! VOICEPEAK narrators each expose a fixed set of named emotion parameters
//! that the CLI accepts as `-e name=value,name=value`. The presets here are
//! a static lookup table of the known narrators; values are integers and
//! always clamp to the 0–100 range the application accepts.

use super::parser::VoicePeakError;

/// A single emotion parameter with a value clamped to 0–100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emotion {
    name: &'static str,
    /// Japanese label shown in the VOICEPEAK UI
    label: &'static str,
    value: i32,
}

impl Emotion {
    pub const MIN_VALUE: i32 = 0;
    pub const MAX_VALUE: i32 = 100;

    fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            value: 0,
        }
    }

    /// CLI parameter name (lowercase ASCII)
    pub fn name(&self) -> &str {
        self.name
    }

    /// Japanese UI label
    pub fn label(&self) -> &str {
        self.label
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Set the value, clamping to the accepted 0–100 range.
    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(Self::MIN_VALUE, Self::MAX_VALUE);
    }

    /// Render as a CLI fragment, e.g. `happy=50`.
    pub fn to_parameter_string(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// A narrator preset: names plus its emotion-parameter schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrator {
    system_name: String,
    jp_name: String,
    en_name: String,
    emotions: Vec<Emotion>,
}

impl Narrator {
    /// Look up a known preset by name.
    ///
    /// Matches the VOICEPEAK system name, the Japanese display name, and the
    /// romanized name, all case-insensitively. Returns an
    /// [`VoicePeakError::UnknownNarrator`] error for anything else.
    pub fn by_name(name: &str) -> Result<Narrator, VoicePeakError> {
        match name.to_lowercase().as_str() {
            "フリモメン" | "frimomen" | "furimomen" => Ok(frimomen()),
            "夏色花梨" | "natukikarin" => Ok(natuki_karin()),
            "ポロンちゃん" | "poronchan" => Ok(poronchan()),
            _ => Err(VoicePeakError::UnknownNarrator(name.to_string())),
        }
    }

    /// Like [`by_name`](Self::by_name), but unknown names yield a preset
    /// with the given name and an empty emotion schema.
    pub fn by_name_or_unknown(name: &str) -> Narrator {
        Narrator::by_name(name).unwrap_or_else(|_| Narrator {
            system_name: name.to_string(),
            jp_name: name.to_string(),
            en_name: name.to_string(),
            emotions: Vec::new(),
        })
    }

    /// All known narrator presets.
    pub fn all() -> Vec<Narrator> {
        vec![frimomen(), natuki_karin(), poronchan()]
    }

    /// Name passed to the VOICEPEAK CLI via `-n`
    pub fn system_name(&self) -> &str {
        &self.system_name
    }

    pub fn jp_name(&self) -> &str {
        &self.jp_name
    }

    pub fn en_name(&self) -> &str {
        &self.en_name
    }

    pub fn emotions(&self) -> &[Emotion] {
        &self.emotions
    }

    /// Mutable access to one emotion parameter by name (case-insensitive).
    pub fn emotion_mut(&mut self, name: &str) -> Option<&mut Emotion> {
        self.emotions
            .iter_mut()
            .find(|emotion| emotion.name.eq_ignore_ascii_case(name))
    }

    /// Render the full `-e` argument value, e.g. `happy=50,angry=0,sad=0`.
    ///
    /// Empty for narrators without emotion parameters.
    pub fn emotion_string(&self) -> String {
        self.emotions
            .iter()
            .map(Emotion::to_parameter_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// True if any emotion parameter is set to a non-zero value.
    pub fn has_active_emotions(&self) -> bool {
        self.emotions.iter().any(|emotion| emotion.value != 0)
    }

    /// Apply a `name=value,name=value` parameter string.
    ///
    /// Entries that are malformed, non-numeric, or name an emotion this
    /// narrator does not have are skipped. Values clamp to 0–100.
    pub fn set_emotion_parameters(&mut self, parameters: &str) {
        for entry in parameters.split(',') {
            let Some((name, value)) = entry.split_once('=') else {
                continue;
            };
            let Ok(value) = value.trim().parse::<i32>() else {
                continue;
            };
            match self.emotion_mut(name.trim()) {
                Some(emotion) => emotion.set_value(value),
                None => log::warn!(
                    "Narrator {} has no emotion parameter '{}'",
                    self.system_name,
                    name.trim()
                ),
            }
        }
    }
}

fn frimomen() -> Narrator {
    Narrator {
        system_name: "Frimomen".to_string(),
        jp_name: "フリモメン".to_string(),
        en_name: "furimomen".to_string(),
        emotions: vec![
            Emotion::new("happy", "幸せ"),
            Emotion::new("angry", "怒り"),
            Emotion::new("sad", "悲しみ"),
            Emotion::new("ochoushimono", "お調子者"),
        ],
    }
}

fn natuki_karin() -> Narrator {
    Narrator {
        system_name: "夏色花梨".to_string(),
        jp_name: "夏色花梨".to_string(),
        en_name: "natukikarin".to_string(),
        emotions: vec![
            Emotion::new("hightension", "ハイテンション"),
            Emotion::new("buchigire", "ブチギレ"),
            Emotion::new("nageki", "嘆き"),
            Emotion::new("sagesumi", "蔑み"),
            Emotion::new("sasayaki", "ささやき"),
        ],
    }
}

fn poronchan() -> Narrator {
    Narrator {
        system_name: "ポロンちゃん".to_string(),
        jp_name: "ポロンちゃん".to_string(),
        en_name: "poronchan".to_string(),
        emotions: vec![
            Emotion::new("robot", "ロボ"),
            Emotion::new("mellow", "ほんわか"),
            Emotion::new("punpun", "ぷんぷん"),
            Emotion::new("genius", "天才"),
            Emotion::new("teary", "泣き"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::Narrator;
    use crate::engines::voicepeak::parser::VoicePeakError;

    #[test]
    fn looks_up_presets_by_any_alias() {
        for alias in ["フリモメン", "Frimomen", "FURIMOMEN"] {
            let narrator = Narrator::by_name(alias).expect("alias should resolve");
            assert_eq!(narrator.system_name(), "Frimomen");
        }

        let karin = Narrator::by_name("natukikarin").unwrap();
        assert_eq!(karin.jp_name(), "夏色花梨");

        let poron = Narrator::by_name("ポロンちゃん").unwrap();
        assert_eq!(poron.en_name(), "poronchan");
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = Narrator::by_name("結月ゆかり").unwrap_err();
        assert!(matches!(err, VoicePeakError::UnknownNarrator(_)), "{err}");
    }

    #[test]
    fn unknown_fallback_has_empty_schema() {
        let narrator = Narrator::by_name_or_unknown("結月ゆかり");
        assert_eq!(narrator.system_name(), "結月ゆかり");
        assert!(narrator.emotions().is_empty());
        assert_eq!(narrator.emotion_string(), "");
    }

    #[test]
    fn emotion_values_default_to_zero() {
        let karin = Narrator::by_name("夏色花梨").unwrap();
        assert!(karin.emotions().iter().all(|e| e.value() == 0));
        assert_eq!(
            karin.emotion_string(),
            "hightension=0,buchigire=0,nageki=0,sagesumi=0,sasayaki=0"
        );
    }

    #[test]
    fn sets_emotion_values_from_parameter_string() {
        let mut karin = Narrator::by_name("夏色花梨").unwrap();
        karin.set_emotion_parameters("hightension=50,buchigire=30,nageki=20,sagesumi=10,sasayaki=5");

        let values: Vec<i32> = karin.emotions().iter().map(|e| e.value()).collect();
        assert_eq!(values, vec![50, 30, 20, 10, 5]);
        assert!(karin.has_active_emotions());
        assert_eq!(
            karin.emotion_string(),
            "hightension=50,buchigire=30,nageki=20,sagesumi=10,sasayaki=5"
        );
    }

    #[test]
    fn clamps_values_to_accepted_range() {
        let mut frimomen = Narrator::by_name("frimomen").unwrap();
        frimomen.set_emotion_parameters("happy=250,angry=-40");
        assert_eq!(frimomen.emotion_mut("happy").unwrap().value(), 100);
        assert_eq!(frimomen.emotion_mut("angry").unwrap().value(), 0);
    }

    #[test]
    fn skips_malformed_and_unknown_entries() {
        let mut frimomen = Narrator::by_name("frimomen").unwrap();
        frimomen.set_emotion_parameters("happy=50,notaparam=10,sad,angry=abc,=5");
        assert_eq!(frimomen.emotion_mut("happy").unwrap().value(), 50);
        assert_eq!(frimomen.emotion_mut("sad").unwrap().value(), 0);
        assert_eq!(frimomen.emotion_mut("angry").unwrap().value(), 0);
    }

    #[test]
    fn lists_all_known_presets() {
        let all = Narrator::all();
        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|n| n.en_name() == "furimomen"));
        assert!(all.iter().any(|n| n.en_name() == "natukikarin"));
        assert!(all.iter().any(|n| n.en_name() == "poronchan"));
    }
}
