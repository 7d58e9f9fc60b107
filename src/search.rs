//! Free-text search over journal entries with relevance ordering and match
//! highlighting.

use regex::RegexBuilder;
use std::cmp::Ordering;
use std::fmt;

use crate::journal_entry::JournalEntry;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub matched: bool,
}

/// Text split into matched and unmatched runs, original casing intact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlighted(pub Vec<Fragment>);

impl Highlighted {
    pub fn fragments(&self) -> &[Fragment] {
        &self.0
    }

    pub fn match_count(&self) -> usize {
        self.0.iter().filter(|f| f.matched).count()
    }

    fn plain(text: &str) -> Self {
        if text.is_empty() {
            return Highlighted(Vec::new());
        }
        Highlighted(vec![Fragment {
            text: text.to_string(),
            matched: false,
        }])
    }
}

impl fmt::Display for Highlighted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.0 {
            if fragment.matched {
                write!(f, "{MARK_OPEN}{}{MARK_CLOSE}", fragment.text)?;
            } else {
                f.write_str(&fragment.text)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub entry: JournalEntry,
    pub prompt: Highlighted,
    pub response: Highlighted,
}

/// Whether a search is in progress. An empty query means "no search", which
/// is not the same as a search that found nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Inactive,
    Active {
        query: String,
        results: Vec<SearchResult>,
    },
}

impl SearchState {
    pub fn is_active(&self) -> bool {
        matches!(self, SearchState::Active { .. })
    }

    pub fn results(&self) -> &[SearchResult] {
        match self {
            SearchState::Inactive => &[],
            SearchState::Active { results, .. } => results,
        }
    }

    pub fn summary(&self) -> Option<String> {
        match self {
            SearchState::Inactive => None,
            SearchState::Active { query, results } => {
                let noun = if results.len() == 1 { "entry" } else { "entries" };
                Some(format!(
                    "Found {} {noun} matching \"{query}\"",
                    results.len()
                ))
            }
        }
    }
}

pub fn search(query: &str, entries: &[JournalEntry]) -> SearchState {
    let query = query.trim();
    if query.is_empty() {
        return SearchState::Inactive;
    }

    let results = rank(query, entries)
        .into_iter()
        .map(|entry| SearchResult {
            prompt: highlight(&entry.prompt, query),
            response: highlight(&entry.response, query),
            entry: entry.clone(),
        })
        .collect();

    SearchState::Active {
        query: query.to_string(),
        results,
    }
}

/// Entries whose prompt or response contains `query` (case-insensitive),
/// most relevant first: exact prompt, exact response, prompt prefix, then
/// newest.
pub fn rank<'a>(query: &str, entries: &'a [JournalEntry]) -> Vec<&'a JournalEntry> {
    let needle = query.to_lowercase();
    let mut matches: Vec<(&JournalEntry, String, String)> = entries
        .iter()
        .map(|e| (e, e.prompt.to_lowercase(), e.response.to_lowercase()))
        .filter(|(_, prompt, response)| prompt.contains(&needle) || response.contains(&needle))
        .collect();

    matches.sort_by(|(a, a_prompt, a_response), (b, b_prompt, b_response)| {
        prefer(*a_prompt == needle, *b_prompt == needle)
            .then_with(|| prefer(*a_response == needle, *b_response == needle))
            .then_with(|| prefer(a_prompt.starts_with(&needle), b_prompt.starts_with(&needle)))
            .then_with(|| b.date.cmp(&a.date))
    });

    matches.into_iter().map(|(e, _, _)| e).collect()
}

fn prefer(a: bool, b: bool) -> Ordering {
    b.cmp(&a)
}

pub fn highlight(text: &str, query: &str) -> Highlighted {
    if query.is_empty() {
        return Highlighted::plain(text);
    }
    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            log::warn!("could not build highlight pattern for {query:?}: {e}");
            return Highlighted::plain(text);
        }
    };

    let mut fragments = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() > last {
            fragments.push(Fragment {
                text: text[last..m.start()].to_string(),
                matched: false,
            });
        }
        fragments.push(Fragment {
            text: m.as_str().to_string(),
            matched: true,
        });
        last = m.end();
    }
    if last < text.len() {
        fragments.push(Fragment {
            text: text[last..].to_string(),
            matched: false,
        });
    }
    Highlighted(fragments)
}

/// `text` with every occurrence of `query` wrapped in `<mark>` tags.
pub fn highlight_matches(text: &str, query: &str) -> String {
    highlight(text, query).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, d, 12, 0, 0).unwrap()
    }

    fn entry(prompt: &str, response: &str, d: u32) -> JournalEntry {
        JournalEntry::new(prompt.to_string(), response.to_string(), day(d))
    }

    fn prompts(state: &SearchState) -> Vec<&str> {
        state
            .results()
            .iter()
            .map(|r| r.entry.prompt.as_str())
            .collect()
    }

    #[test]
    fn test_empty_query_is_inactive() {
        let entries = vec![entry("anything", "at all", 1)];
        assert_eq!(search("", &entries), SearchState::Inactive);
        assert_eq!(search("   ", &entries), SearchState::Inactive);

        let none = search("zebra", &entries);
        assert!(none.is_active());
        assert!(none.results().is_empty());
        assert_ne!(none, SearchState::Inactive);
    }

    #[test]
    fn test_no_entries_is_empty_not_error() {
        let state = search("grateful", &[]);
        assert!(state.is_active());
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_grateful_example() {
        let entries = vec![
            entry("What are you grateful for today?", "family", 3),
            entry("grateful for nature", "trees", 1),
            entry("unrelated", "nothing here", 2),
        ];
        let state = search("grateful", &entries);
        assert_eq!(
            prompts(&state),
            vec!["grateful for nature", "What are you grateful for today?"]
        );

        let exact = search("GRATEFUL FOR NATURE", &entries);
        assert_eq!(prompts(&exact), vec!["grateful for nature"]);
    }

    #[test]
    fn test_matches_response_case_insensitively() {
        let entries = vec![
            entry("What made you smile today?", "Seeing a cute DOG at the park.", 1),
            entry("Describe your ideal day.", "Sleeping in.", 2),
        ];
        let state = search("dog", &entries);
        assert_eq!(prompts(&state), vec!["What made you smile today?"]);
    }

    #[test]
    fn test_ranking_cascade() {
        let entries = vec![
            entry("a walk in the park", "nice", 9),
            entry("park", "x", 1),
            entry("something else", "Park", 2),
            entry("park life", "y", 3),
            entry("older walk in the park", "z", 4),
        ];
        let state = search("park", &entries);
        assert_eq!(
            prompts(&state),
            vec![
                "park",
                "something else",
                "park life",
                "a walk in the park",
                "older walk in the park",
            ]
        );
    }

    #[test]
    fn test_ties_broken_by_newest_date() {
        let entries = vec![
            entry("my coffee", "", 1),
            entry("more coffee", "", 7),
            entry("old coffee", "", 4),
        ];
        let ranked: Vec<_> = rank("coffee", &entries).iter().map(|e| e.date).collect();
        assert_eq!(ranked, vec![day(7), day(4), day(1)]);
    }

    #[test]
    fn test_results_are_highlighted() {
        let entries = vec![entry("Grateful?", "So grateful, truly GRATEFUL", 1)];
        let state = search("grateful", &entries);
        let result = &state.results()[0];
        assert_eq!(result.prompt.to_string(), "<mark>Grateful</mark>?");
        assert_eq!(
            result.response.to_string(),
            "So <mark>grateful</mark>, truly <mark>GRATEFUL</mark>"
        );
        assert_eq!(result.response.match_count(), 2);
    }

    #[test]
    fn test_highlight_matches() {
        assert_eq!(
            highlight_matches("I am grateful today", "grateful"),
            "I am <mark>grateful</mark> today"
        );
        assert_eq!(highlight_matches("no hits here", "zebra"), "no hits here");
        assert_eq!(highlight_matches("text", ""), "text");
    }

    #[test]
    fn test_highlight_escapes_pattern_syntax() {
        assert_eq!(
            highlight_matches("test [brackets]", "[brackets]"),
            "test <mark>[brackets]</mark>"
        );
        assert_eq!(highlight_matches("test b", "[brackets]"), "test b");
        assert_eq!(highlight_matches("a.b axb", "a.b"), "<mark>a.b</mark> axb");
        assert_eq!(highlight_matches("1+1=2 (ok)*", "(ok)*"), "1+1=2 <mark>(ok)*</mark>");
    }

    #[test]
    fn test_highlight_fragments() {
        let highlighted = highlight("Park park", "PARK");
        assert_eq!(
            highlighted.fragments(),
            &[
                Fragment { text: "Park".into(), matched: true },
                Fragment { text: " ".into(), matched: false },
                Fragment { text: "park".into(), matched: true },
            ]
        );
    }

    #[test]
    fn test_summary() {
        let entries = vec![entry("one", "", 1)];
        assert_eq!(search("", &entries).summary(), None);
        assert_eq!(
            search("one", &entries).summary().as_deref(),
            Some("Found 1 entry matching \"one\"")
        );
        assert_eq!(
            search("two", &entries).summary().as_deref(),
            Some("Found 0 entries matching \"two\"")
        );
    }
}
