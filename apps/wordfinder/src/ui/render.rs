use std::fmt::Write as _;

use shared::protocol::LookupResult;

pub const LOADING: &str = "...loading";
pub const NO_RESULTS: &str = "(no results)";

pub const HELP: &str = "\
Commands:
  <word>            show rhymes for <word>
  r <word>          show rhymes for <word>
  s <word>          show words with a similar meaning to <word>
  save <n>          save entry [n] of the current results
  saved             show saved words
  help              show this help
  quit              leave";

/// Renders each group under its heading with 1-based entry numbers that run
/// across groups. The numbers are what `save <n>` refers to.
pub fn render_result(result: &LookupResult) -> String {
    if result.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut out = String::new();
    let mut position = 0;
    for group in result.groups.iter().filter(|g| !g.words.is_empty()) {
        let _ = writeln!(out, "{}", group.heading);
        for record in &group.words {
            position += 1;
            let _ = writeln!(out, "  [{position}] {}", record.word);
        }
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn render_saved(saved: &[String]) -> String {
    if saved.is_empty() {
        "Saved words: (none)".to_string()
    } else {
        format!("Saved words: {}", saved.join(", "))
    }
}
