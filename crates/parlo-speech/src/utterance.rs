//! Utterance descriptors: validated, clamped requests for synthesis.
//!
//! A descriptor is an immutable value object. Construction is the only
//! place where validation and clamping happen, so everything downstream
//! (controller, engine) can assume the parameters are in range.

use crate::error::SpeechError;

// ── Parameter ranges ──────────────────────────────────────────────────────────

/// Speaking rate multiplier range.
pub const RATE_MIN: f32 = 0.5;
pub const RATE_MAX: f32 = 2.0;

/// Pitch multiplier range.
pub const PITCH_MIN: f32 = 0.0;
pub const PITCH_MAX: f32 = 2.0;

/// Volume range.
pub const VOLUME_MIN: f32 = 0.0;
pub const VOLUME_MAX: f32 = 1.0;

/// Neutral value for rate, pitch, and volume when the input is not a
/// finite number.
const NEUTRAL: f32 = 1.0;

// ── Options ───────────────────────────────────────────────────────────────────

/// Caller-supplied knobs for a synthesis request.
///
/// Out-of-range values are accepted here and clamped when the descriptor
/// is built.
#[derive(Debug, Clone, PartialEq)]
pub struct UtteranceOptions {
    /// Voice identity to speak with; `None` lets the engine pick.
    pub voice: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for UtteranceOptions {
    fn default() -> Self {
        Self {
            voice: None,
            rate: NEUTRAL,
            pitch: NEUTRAL,
            volume: NEUTRAL,
        }
    }
}

// ── Descriptor ────────────────────────────────────────────────────────────────

/// A validated synthesis request.
///
/// Fields are private: once built, a descriptor is guaranteed to carry
/// non-empty text and in-range parameters for its whole life.
#[derive(Debug, Clone, PartialEq)]
pub struct UtteranceDescriptor {
    text: String,
    voice: Option<String>,
    rate: f32,
    pitch: f32,
    volume: f32,
}

impl UtteranceDescriptor {
    /// Build a descriptor, rejecting empty text and clamping parameters.
    ///
    /// The text is kept as supplied (surrounding whitespace included);
    /// only the emptiness check trims.
    pub fn new(text: impl Into<String>, options: UtteranceOptions) -> Result<Self, SpeechError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        Ok(Self {
            text,
            voice: options.voice,
            rate: clamp_param(options.rate, RATE_MIN, RATE_MAX),
            pitch: clamp_param(options.pitch, PITCH_MIN, PITCH_MAX),
            volume: clamp_param(options.volume, VOLUME_MIN, VOLUME_MAX),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    #[must_use]
    pub const fn rate(&self) -> f32 {
        self.rate
    }

    #[must_use]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    #[must_use]
    pub const fn volume(&self) -> f32 {
        self.volume
    }
}

/// Clamp a parameter into `[min, max]`, mapping NaN and infinities to the
/// neutral value first.
fn clamp_param(value: f32, min: f32, max: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let d = UtteranceDescriptor::new("Hello there", UtteranceOptions::default()).unwrap();
        assert_eq!(d.text(), "Hello there");
        assert_eq!(d.voice(), None);
        assert!((d.rate() - 1.0).abs() < f32::EPSILON);
        assert!((d.pitch() - 1.0).abs() < f32::EPSILON);
        assert!((d.volume() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rejects_empty_text() {
        let err = UtteranceDescriptor::new("", UtteranceOptions::default()).unwrap_err();
        assert_eq!(err, SpeechError::EmptyText);
    }

    #[test]
    fn rejects_whitespace_only_text() {
        let err = UtteranceDescriptor::new("   \t\n  ", UtteranceOptions::default()).unwrap_err();
        assert_eq!(err, SpeechError::EmptyText);
    }

    #[test]
    fn keeps_surrounding_whitespace_in_accepted_text() {
        let d = UtteranceDescriptor::new("  hi  ", UtteranceOptions::default()).unwrap();
        assert_eq!(d.text(), "  hi  ");
    }

    #[test]
    fn clamps_out_of_range_parameters() {
        let options = UtteranceOptions {
            voice: None,
            rate: 5.0,
            pitch: -3.0,
            volume: 7.0,
        };
        let d = UtteranceDescriptor::new("x", options).unwrap();
        assert!((d.rate() - RATE_MAX).abs() < f32::EPSILON);
        assert!((d.pitch() - PITCH_MIN).abs() < f32::EPSILON);
        assert!((d.volume() - VOLUME_MAX).abs() < f32::EPSILON);
    }

    #[test]
    fn clamps_below_minimum_rate() {
        let options = UtteranceOptions {
            rate: 0.1,
            ..UtteranceOptions::default()
        };
        let d = UtteranceDescriptor::new("x", options).unwrap();
        assert!((d.rate() - RATE_MIN).abs() < f32::EPSILON);
    }

    #[test]
    fn non_finite_parameters_fall_back_to_neutral() {
        let options = UtteranceOptions {
            voice: None,
            rate: f32::NAN,
            pitch: f32::INFINITY,
            volume: f32::NEG_INFINITY,
        };
        let d = UtteranceDescriptor::new("x", options).unwrap();
        assert!((d.rate() - 1.0).abs() < f32::EPSILON);
        assert!((d.pitch() - 1.0).abs() < f32::EPSILON);
        assert!((d.volume() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn carries_the_requested_voice() {
        let options = UtteranceOptions {
            voice: Some("Samantha".to_owned()),
            ..UtteranceOptions::default()
        };
        let d = UtteranceDescriptor::new("x", options).unwrap();
        assert_eq!(d.voice(), Some("Samantha"));
    }
}
