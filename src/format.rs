//! Simulated capture formats and their placeholder copy

use serde::{Deserialize, Serialize};
use std::fmt;

/// The media type a memory is (pretend) captured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFormat {
    #[default]
    Photo,
    Audio,
    Text,
}

impl CaptureFormat {
    pub const ALL: [CaptureFormat; 3] = [Self::Photo, Self::Audio, Self::Text];

    /// Parse a `format` attribute value. Anything unrecognized is treated as photo.
    pub fn from_attr(value: &str) -> Self {
        match value {
            "audio" => Self::Audio,
            "text" => Self::Text,
            _ => Self::Photo,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Audio => "audio",
            Self::Text => "text",
        }
    }

    /// Body text for the capture placeholder area
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Audio => {
                "[ Audio recording placeholder ]\n\nImagine a simple record button and timer here."
            }
            Self::Text => {
                "[ Text input area ]\n\nImagine a rich text field for writing your story here."
            }
            Self::Photo => {
                "[ Photo / Video placeholder ]\n\nImagine a live camera preview or upload box here."
            }
        }
    }

    /// Subtitle describing what the placeholder simulates
    pub fn description(&self) -> &'static str {
        match self {
            Self::Audio => "Simulated audio recording area. No microphone or real audio is used.",
            Self::Text => "Simulated text area for writing. Anything you type here is not saved.",
            Self::Photo => {
                "Simulated photo or video capture area. No camera or real files are used."
            }
        }
    }
}

impl fmt::Display for CaptureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_photo() {
        assert_eq!(CaptureFormat::default(), CaptureFormat::Photo);
    }

    #[test]
    fn test_from_attr_falls_back_to_photo() {
        assert_eq!(CaptureFormat::from_attr("audio"), CaptureFormat::Audio);
        assert_eq!(CaptureFormat::from_attr("text"), CaptureFormat::Text);
        assert_eq!(CaptureFormat::from_attr("photo"), CaptureFormat::Photo);
        assert_eq!(CaptureFormat::from_attr("hologram"), CaptureFormat::Photo);
    }

    #[test]
    fn test_placeholder_copy() {
        assert!(CaptureFormat::Audio
            .placeholder()
            .starts_with("[ Audio recording placeholder ]"));
        assert!(CaptureFormat::Text.description().ends_with("not saved."));
        for format in CaptureFormat::ALL {
            assert_eq!(CaptureFormat::from_attr(format.as_str()), format);
        }
    }
}
