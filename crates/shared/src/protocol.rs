use grouping::{FieldAccess, FieldValue, Number};
use serde::{Deserialize, Serialize};

use crate::domain::{LookupMode, Score, SyllableCount};

pub const DEFAULT_MAX_RESULTS: u32 = 50;

/// A single lookup against the `/words` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordQuery {
    pub mode: LookupMode,
    pub word: String,
    pub max_results: u32,
}

impl WordQuery {
    pub fn new(mode: LookupMode, word: impl Into<String>) -> Self {
        Self {
            mode,
            word: word.into(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Query string pairs, e.g. `rel_rhy=grape&max=50`.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            (self.mode.query_param(), self.word.clone()),
            ("max", self.max_results.to_string()),
        ]
    }
}

/// One entry of the service response. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    #[serde(
        rename = "numSyllables",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub num_syllables: Option<SyllableCount>,
}

impl WordRecord {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            score: None,
            num_syllables: None,
        }
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(Score(score));
        self
    }

    pub fn with_syllables(mut self, count: u32) -> Self {
        self.num_syllables = Some(SyllableCount(count));
        self
    }
}

impl FieldAccess for WordRecord {
    type Value = FieldValue;

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "word" => Some(FieldValue::String(self.word.clone())),
            "score" => self.score.map(|s| FieldValue::Number(Number::from(s.0))),
            "numSyllables" => self
                .num_syllables
                .map(|n| FieldValue::Number(Number::from(u64::from(n.0)))),
            _ => None,
        }
    }
}

/// A labelled run of words, the unit rendered under one heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGroup {
    pub heading: String,
    pub words: Vec<WordRecord>,
}

/// Everything produced by one lookup, ready to render or serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    pub query: WordQuery,
    pub groups: Vec<WordGroup>,
}

impl LookupResult {
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.words.is_empty())
    }

    pub fn word_count(&self) -> usize {
        self.groups.iter().map(|g| g.words.len()).sum()
    }

    /// Entry at a 1-based position counted across all groups in display order.
    pub fn nth_word(&self, position: usize) -> Option<&WordRecord> {
        position
            .checked_sub(1)
            .and_then(|index| self.groups.iter().flat_map(|g| &g.words).nth(index))
    }
}
