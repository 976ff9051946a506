//! Voice descriptors and the wholesale-replace voice catalog.
//!
//! The catalog is a point-in-time snapshot of what the engine reported
//! last. It is never merged or patched: every refresh replaces the whole
//! set, so a voice that disappears from the engine disappears from the
//! catalog on the next refresh.

// ── Voice descriptor ──────────────────────────────────────────────────────────

/// A single synthesis voice as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceDescriptor {
    /// Engine-assigned identity, unique within one catalog snapshot.
    pub id: String,
    /// BCP 47 language tag, e.g. `en-US`.
    pub lang: String,
    /// Whether the engine flags this voice as its preferred default.
    pub is_default: bool,
}

impl VoiceDescriptor {
    pub fn new(id: impl Into<String>, lang: impl Into<String>, is_default: bool) -> Self {
        Self {
            id: id.into(),
            lang: lang.into(),
            is_default,
        }
    }
}

// ── Voice catalog ─────────────────────────────────────────────────────────────

/// Ordered snapshot of the voices currently offered by the engine.
///
/// Preserves engine enumeration order, which matters because the default
/// voice falls back to the first entry when no voice carries the default
/// flag.
#[derive(Debug, Clone, Default)]
pub struct VoiceCatalog {
    voices: Vec<VoiceDescriptor>,
}

impl VoiceCatalog {
    #[must_use]
    pub const fn new() -> Self {
        Self { voices: Vec::new() }
    }

    /// Replace the entire snapshot with a fresh enumeration.
    pub fn replace(&mut self, voices: Vec<VoiceDescriptor>) {
        self.voices = voices;
    }

    /// Look up a voice by its engine identity.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&VoiceDescriptor> {
        self.voices.iter().find(|v| v.id == id)
    }

    /// The effective default voice for this snapshot.
    ///
    /// The first voice flagged as default wins; otherwise the first voice
    /// in enumeration order; `None` when the snapshot is empty.
    #[must_use]
    pub fn default_voice(&self) -> Option<&VoiceDescriptor> {
        self.voices
            .iter()
            .find(|v| v.is_default)
            .or_else(|| self.voices.first())
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoiceDescriptor> {
        self.voices.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_voices() -> Vec<VoiceDescriptor> {
        vec![
            VoiceDescriptor::new("Daniel", "en-GB", false),
            VoiceDescriptor::new("Samantha", "en-US", true),
            VoiceDescriptor::new("Yuna", "ko-KR", false),
        ]
    }

    #[test]
    fn empty_catalog_has_no_default() {
        let catalog = VoiceCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.default_voice().is_none());
    }

    #[test]
    fn flagged_default_wins_over_first_entry() {
        let mut catalog = VoiceCatalog::new();
        catalog.replace(sample_voices());
        assert_eq!(catalog.default_voice().map(|v| v.id.as_str()), Some("Samantha"));
    }

    #[test]
    fn first_entry_is_default_when_nothing_is_flagged() {
        let mut catalog = VoiceCatalog::new();
        catalog.replace(vec![
            VoiceDescriptor::new("Daniel", "en-GB", false),
            VoiceDescriptor::new("Yuna", "ko-KR", false),
        ]);
        assert_eq!(catalog.default_voice().map(|v| v.id.as_str()), Some("Daniel"));
    }

    #[test]
    fn replace_is_wholesale_not_a_merge() {
        let mut catalog = VoiceCatalog::new();
        catalog.replace(sample_voices());
        assert_eq!(catalog.len(), 3);

        catalog.replace(vec![VoiceDescriptor::new("Amelie", "fr-CA", false)]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("Samantha").is_none());
        assert!(catalog.get("Amelie").is_some());
    }

    #[test]
    fn replace_with_empty_list_clears_the_catalog() {
        let mut catalog = VoiceCatalog::new();
        catalog.replace(sample_voices());
        catalog.replace(Vec::new());
        assert!(catalog.is_empty());
        assert!(catalog.default_voice().is_none());
    }

    #[test]
    fn lookup_by_id() {
        let mut catalog = VoiceCatalog::new();
        catalog.replace(sample_voices());
        assert_eq!(catalog.get("Yuna").map(|v| v.lang.as_str()), Some("ko-KR"));
        assert!(catalog.get("nobody").is_none());
    }
}
