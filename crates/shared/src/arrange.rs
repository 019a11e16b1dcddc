//! Turns raw service records into headed groups for display.

use std::cmp::Reverse;

use grouping::{group_by, group_by_field};

use crate::{
    domain::{LookupMode, SyllableCount},
    protocol::{LookupResult, WordGroup, WordQuery, WordRecord},
};

/// Arranges records the default way for the query's mode.
///
/// Rhymes are grouped by syllable count, ascending, with records lacking a
/// count grouped first. Similar-meaning words form a single group ordered by
/// descending relevance score. Unscored words go last and ties keep service
/// order.
pub fn arrange(query: WordQuery, records: Vec<WordRecord>) -> LookupResult {
    let groups = if records.is_empty() {
        Vec::new()
    } else {
        match query.mode {
            LookupMode::Rhymes => by_syllables(&records),
            LookupMode::SimilarMeaning => vec![by_relevance(&query.word, records)],
        }
    };
    LookupResult { query, groups }
}

/// Arranges records by an arbitrary field of [`WordRecord`].
pub fn arrange_by_field(query: WordQuery, records: Vec<WordRecord>, field: &str) -> LookupResult {
    let groups = group_by_field(&records, field)
        .into_iter()
        .map(|(value, members)| WordGroup {
            heading: match value {
                Some(value) => format!("{field}: {value}"),
                None => format!("{field}: (missing)"),
            },
            words: members.into_iter().cloned().collect(),
        })
        .collect();
    LookupResult { query, groups }
}

fn by_syllables(records: &[WordRecord]) -> Vec<WordGroup> {
    group_by(records, |r| r.num_syllables)
        .into_iter()
        .map(|(count, members)| WordGroup {
            heading: syllable_heading(count),
            words: members.into_iter().cloned().collect(),
        })
        .collect()
}

fn by_relevance(word: &str, mut records: Vec<WordRecord>) -> WordGroup {
    records.sort_by_key(|r| Reverse(r.score));
    WordGroup {
        heading: format!("Words with a similar meaning to \"{word}\":"),
        words: records,
    }
}

/// Heading shown above a group of rhymes with the given syllable count.
pub fn syllable_heading(count: Option<SyllableCount>) -> String {
    match count {
        Some(SyllableCount(1)) => "1 syllable:".to_string(),
        Some(SyllableCount(n)) => format!("{n} syllables:"),
        None => "Unknown syllables:".to_string(),
    }
}

#[cfg(test)]
#[path = "tests/arrange_tests.rs"]
mod tests;
