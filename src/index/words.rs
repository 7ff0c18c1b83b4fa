// src/index/words.rs
// =============================================================================
// Text normalization: turns a raw text payload into index words.
//
// A word is a maximal run of ASCII word characters (letters, digits and '_').
// Everything else is a delimiter. Words are lower-cased; empty pieces are
// dropped.
// =============================================================================

use regex::Regex;

const DELIMITERS: &str = r"[^0-9A-Za-z_]+";

// Splits text into lower-cased words.
//
// The pattern is compiled once and the splitter is shared by every task.
#[derive(Debug, Clone)]
pub struct WordSplitter {
    delimiters: Regex,
}

impl WordSplitter {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            delimiters: Regex::new(DELIMITERS)?,
        })
    }

    pub fn words<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.delimiters
            .split(text)
            .filter(|token| !token.is_empty())
            .map(str::to_lowercase)
    }
}
