use serde::{Deserialize, Serialize};

/// How much of the subject the sticker shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StickerStyle {
    FullBody,
    FaceOnly,
    FaceWithHands,
}

impl StickerStyle {
    pub fn prompt_fragment(&self) -> &'static str {
        match self {
            StickerStyle::FullBody => "full body chibi character",
            StickerStyle::FaceOnly => "chibi face portrait",
            StickerStyle::FaceWithHands => "chibi character with visible hands and face",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtStyle {
    Chibi,
    Anime,
}

impl ArtStyle {
    pub fn prompt_fragment(&self) -> &'static str {
        match self {
            ArtStyle::Chibi => "cute chibi style",
            ArtStyle::Anime => "anime chibi style",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Angry,
    Sad,
    Surprised,
    Sleepy,
    Love,
    Confused,
    Thinking,
}

impl Emotion {
    /// The fixed batch order the emotion-set generator produces, so callers
    /// can zip labels against the returned references.
    pub const VARIANT_SET: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Angry,
        Emotion::Sad,
        Emotion::Surprised,
        Emotion::Sleepy,
        Emotion::Love,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Angry => "angry",
            Emotion::Sad => "sad",
            Emotion::Surprised => "surprised",
            Emotion::Sleepy => "sleepy",
            Emotion::Love => "love",
            Emotion::Confused => "confused",
            Emotion::Thinking => "thinking",
        }
    }
}

/// Immutable style options for one generation call. No identity beyond
/// structural equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub style: StickerStyle,
    #[serde(rename = "artStyle")]
    pub art_style: ArtStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
}

impl GenerationSettings {
    pub fn new(style: StickerStyle, art_style: ArtStyle) -> Self {
        Self {
            style,
            art_style,
            emotion: None,
        }
    }

    pub fn with_emotion(mut self, emotion: Emotion) -> Self {
        self.emotion = Some(emotion);
        self
    }

    /// The prompt the remote model receives: both style lookups plus the
    /// fixed suffix tokens.
    pub fn style_prompt(&self) -> String {
        format!(
            "{}, {}, sticker style, clean background",
            self.style.prompt_fragment(),
            self.art_style.prompt_fragment()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wire_names_are_kebab_and_lowercase() {
        let settings =
            GenerationSettings::new(StickerStyle::FaceWithHands, ArtStyle::Anime)
                .with_emotion(Emotion::Sleepy);
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["style"], "face-with-hands");
        assert_eq!(json["artStyle"], "anime");
        assert_eq!(json["emotion"], "sleepy");
    }

    #[test]
    fn unrecognized_values_are_rejected() {
        assert!(serde_json::from_str::<Emotion>("\"bored\"").is_err());
        assert!(serde_json::from_str::<StickerStyle>("\"half-body\"").is_err());
        assert!(serde_json::from_str::<ArtStyle>("\"pixel\"").is_err());
    }

    #[test]
    fn style_prompt_concatenates_both_lookups() {
        let settings = GenerationSettings::new(StickerStyle::FullBody, ArtStyle::Chibi);
        assert_eq!(
            settings.style_prompt(),
            "full body chibi character, cute chibi style, sticker style, clean background"
        );
    }

    #[test]
    fn settings_round_trip() {
        let settings = GenerationSettings::new(StickerStyle::FaceOnly, ArtStyle::Chibi);
        let json = serde_json::to_string(&settings).unwrap();
        let back: GenerationSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
        assert!(back.emotion.is_none());
    }
}
