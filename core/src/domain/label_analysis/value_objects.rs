use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

pub const MAX_LABEL_IMAGES: usize = 6;

/// Target language for translated ingredient names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Bengali,
    Marathi,
    Gujarati,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::English,
        Language::Hindi,
        Language::Tamil,
        Language::Telugu,
        Language::Kannada,
        Language::Malayalam,
        Language::Bengali,
        Language::Marathi,
        Language::Gujarati,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Kannada => "Kannada",
            Language::Malayalam => "Malayalam",
            Language::Bengali => "Bengali",
            Language::Marathi => "Marathi",
            Language::Gujarati => "Gujarati",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|language| language.as_str().eq_ignore_ascii_case(wanted))
            .ok_or(CoreError::Invalid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LabelSide {
    /// Front of pack: branding and marketing claims.
    Front,
    /// Back of pack: nutrition table and ingredient list.
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelImage {
    pub side: LabelSide,
    pub data: Vec<u8>,
}

impl LabelImage {
    pub fn new(side: LabelSide, data: Vec<u8>) -> Self {
        Self { side, data }
    }

    /// Sniffs the image format from its magic bytes, defaulting to JPEG.
    pub fn mime_type(&self) -> &'static str {
        match self.data.as_slice() {
            [0x89, b'P', b'N', b'G', ..] => "image/png",
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
            _ => "image/jpeg",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeLabelInput {
    pub images: Vec<LabelImage>,
    pub language: Language,
}

/// Everything the extraction collaborator needs for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub images: Vec<LabelImage>,
    pub response_schema: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse_is_case_insensitive() {
        assert_eq!("hindi".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!(" TAMIL ".parse::<Language>().unwrap(), Language::Tamil);
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert_eq!("Klingon".parse::<Language>(), Err(CoreError::Invalid));
    }

    #[test]
    fn test_mime_type_sniffing() {
        let png = LabelImage::new(LabelSide::Back, vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a]);
        assert_eq!(png.mime_type(), "image/png");

        let webp = LabelImage::new(LabelSide::Front, b"RIFF\x00\x00\x00\x00WEBPVP8 ".to_vec());
        assert_eq!(webp.mime_type(), "image/webp");

        let jpeg = LabelImage::new(LabelSide::Front, vec![0xff, 0xd8, 0xff, 0xe0]);
        assert_eq!(jpeg.mime_type(), "image/jpeg");

        assert_eq!(LabelImage::new(LabelSide::Back, vec![]).mime_type(), "image/jpeg");
    }
}
