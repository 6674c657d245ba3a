//! Word masking applied to chirp text before it is stored or echoed back.

/// Longest accepted chirp, counted in `char`s.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Words replaced by [`MASK`]. Entries must be lowercase.
pub const DENYLIST: &[&str] = &["kerfuffle", "sharbert", "fornax"];

pub const MASK: &str = "****";

/// Masks denylisted words.
///
/// Text is split on single spaces and each token is compared, lowercased,
/// against the denylist. Tokens are never trimmed, so `"Fornax!"` is left
/// alone while `"FORNAX"` is masked. Splitting on `' '` rather than on any
/// whitespace keeps text without denylisted words byte-for-byte intact.
#[derive(Debug, Clone, Copy)]
pub struct ContentFilter {
    denylist: &'static [&'static str],
    mask: &'static str,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(DENYLIST, MASK)
    }
}

impl ContentFilter {
    pub const fn new(denylist: &'static [&'static str], mask: &'static str) -> Self {
        Self { denylist, mask }
    }

    pub fn clean(&self, text: &str) -> String {
        text.split(' ')
            .map(|word| if self.is_denied(word) { self.mask } else { word })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn is_denied(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.denylist.iter().any(|denied| *denied == lower)
    }
}
