//! Length-prefixed SHA-256 fingerprints.
//!
//! Every field is written as its byte length followed by its bytes, so no
//! two different field sequences feed the hasher the same input.

use sha2::{Digest, Sha256};

/// Number of hex characters in a short fingerprint.
pub const SHORT_LEN: usize = 16;

/// Incremental fingerprint over a sequence of string fields.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one field.
    pub fn field(&mut self, value: impl AsRef<str>) -> &mut Self {
        let bytes = value.as_ref().as_bytes();
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
        self
    }

    /// Add a list of fields, preceded by its length.
    pub fn list<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let items: Vec<I::Item> = items.into_iter().collect();
        self.hasher.update((items.len() as u64).to_le_bytes());
        for item in &items {
            self.field(item);
        }
        self
    }

    /// Add a field that may be absent. Absent and empty hash differently.
    pub fn optional(&mut self, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) => {
                self.hasher.update([1u8]);
                self.field(v)
            }
            None => {
                self.hasher.update([0u8]);
                self
            }
        }
    }

    /// Lowercase hex digest.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

/// The short form of a hex fingerprint.
pub fn short(fingerprint: &str) -> &str {
    fingerprint.get(..SHORT_LEN).unwrap_or(fingerprint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(build: impl FnOnce(&mut Fingerprint)) -> String {
        let mut fp = Fingerprint::new();
        build(&mut fp);
        fp.finish()
    }

    #[test]
    fn test_empty_digest() {
        assert_eq!(
            Fingerprint::new().finish(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_field_boundaries_matter() {
        let a = digest(|fp| {
            fp.field("ab").field("c");
        });
        let b = digest(|fp| {
            fp.field("a").field("bc");
        });
        assert_ne!(a, b);
    }

    #[test]
    fn test_list_boundaries_matter() {
        let split = digest(|fp| {
            fp.list(["a", "b"]).list(Vec::<&str>::new());
        });
        let moved = digest(|fp| {
            fp.list(["a"]).list(["b"]);
        });
        assert_ne!(split, moved);
    }

    #[test]
    fn test_optional_components() {
        let absent = digest(|fp| {
            fp.optional(None).field("x");
        });
        let empty = digest(|fp| {
            fp.optional(Some("")).field("x");
        });
        assert_ne!(absent, empty);
    }

    #[test]
    fn test_short() {
        let full = Fingerprint::new().finish();
        assert_eq!(short(&full), &full[..16]);
        assert_eq!(short("abc"), "abc");
    }
}
