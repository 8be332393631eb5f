//! Translator Port - resolves translation keys to display text.

/// Port for looking up user-facing strings.
pub trait Translator: Send + Sync {
    /// Returns the text for `key`. Implementations fall back to the key itself.
    fn translate(&self, key: &str) -> String;
}
