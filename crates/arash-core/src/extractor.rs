//! Ticker symbol extraction from free-form text
//!
//! A two-pass regex heuristic: an explicit pass that understands ticker
//! punctuation (`$AAPL`, `BTC-USD`, `AAPL.SA`, `^GSPC`) and a simple-word
//! pass for bare 2-5 letter tickers. Candidates from both passes are
//! filtered against a fixed stop-word set, validated against the symbol
//! acceptance rule, and deduplicated preserving first-seen order.
//!
//! The whole pipeline is a pure function of its input, so extraction
//! behavior is pinned by table-driven tests.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Maximum number of symbols returned per extraction
pub const MAX_SYMBOLS: usize = 5;

/// Fixed stop-word set: English/Portuguese function words plus finance
/// filler that is upper-case-able in ordinary sentences. Treated as a
/// test fixture; entries change extraction behavior directly.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "AND", "OR", "THE", "NEWS", "STOCK", "PRICE", "TODAY", "WITH", "ABOUT",
        "WHAT", "TELL", "ME", "QUE", "PODE", "DISSE", "DA", "DE", "DO", "DAS",
        "DOS", "EM", "NO", "NA", "NOS", "NAS", "UM", "UMA", "PARA", "POR", "COM",
        "ACOES", "AÇÃO", "ATIVO", "ATIVOS", "EMPRESA", "PRECO", "PREÇO", "HOJE",
        "EX", "VS", "COMO", "QUAL", "QUAIS", "ESTA", "SOBRE", "OF", "IS", "HOW",
    ]
    .into_iter()
    .collect()
});

// Explicit pass: optional $ prefix, optional ^ index marker, a 1-6 letter
// core, and an optional .- suffixed 1-6 letter segment.
static EXPLICIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$?(\^?[A-Z]{1,6}(?:[.-][A-Z]{1,6})?)$").expect("valid explicit ticker regex")
});

// Simple-word pass: bare runs of 2-5 uppercase letters.
static SIMPLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,5}$").expect("valid simple ticker regex"));

/// An uppercase market symbol, possibly carrying an index marker (`^`)
/// or an exchange/asset-class suffix (`AAPL.SA`, `BTC-USD`).
///
/// Immutable value type; instances only come out of [`extract`] or the
/// analysis-view input path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract candidate ticker symbols from user text
///
/// Returns at most [`MAX_SYMBOLS`] symbols in first-seen order, explicit
/// pattern matches ahead of simple-word matches, duplicates collapsed to
/// their first occurrence.
pub fn extract(text: &str) -> Vec<Symbol> {
    let upper = text.trim().to_uppercase();
    if upper.is_empty() {
        return Vec::new();
    }

    let tokens: Vec<String> = upper
        .split_whitespace()
        .map(clean_token)
        .filter(|t| !t.is_empty())
        .collect();

    let explicit = tokens
        .iter()
        .filter_map(|t| EXPLICIT_RE.captures(t).map(|c| c[1].to_string()));

    let simple = tokens
        .iter()
        .filter(|t| SIMPLE_RE.is_match(t))
        .map(ToString::to_string);

    let mut seen = HashSet::new();
    let mut symbols = Vec::new();

    for candidate in explicit.chain(simple) {
        let candidate = candidate.trim_start_matches('$').to_string();

        if STOP_WORDS.contains(candidate.as_str()) {
            continue;
        }

        if !looks_like_ticker(&candidate) {
            continue;
        }

        if seen.insert(candidate.clone()) {
            symbols.push(Symbol(candidate));
            if symbols.len() == MAX_SYMBOLS {
                break;
            }
        }
    }

    symbols
}

/// Symbol acceptance rule
///
/// A candidate passes if it carries an index marker, contains ticker
/// punctuation, or is a bare word of 2-5 letters. This re-validates
/// simple-pass matches and admits punctuated forms of any length within
/// the pattern's segment limits.
fn looks_like_ticker(candidate: &str) -> bool {
    candidate.starts_with('^')
        || candidate.contains('-')
        || candidate.contains('.')
        || (2..=5).contains(&candidate.len())
}

/// Trim token-adjacent punctuation while keeping ticker markers
///
/// Leading `$` and `^` survive; everything else that is not alphanumeric
/// is stripped from both ends ("($AAPL)," becomes "$AAPL").
fn clean_token(token: &str) -> String {
    token
        .trim_start_matches(|c: char| !(c.is_alphanumeric() || c == '$' || c == '^'))
        .trim_end_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(text: &str) -> Vec<String> {
        extract(text).into_iter().map(|s| s.as_str().to_string()).collect()
    }

    #[test]
    fn test_portuguese_question_extracts_only_ticker() {
        assert_eq!(
            extracted("Ex: Como está o preço de AAPL e qual a perspectiva?"),
            ["AAPL"]
        );
    }

    #[test]
    fn test_dollar_prefix_and_pair_symbol() {
        assert_eq!(extracted("$AAPL vs BTC-USD today"), ["AAPL", "BTC-USD"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extracted("").is_empty());
        assert!(extracted("   \t  ").is_empty());
    }

    #[test]
    fn test_lowercase_input_uppercased() {
        assert_eq!(extracted("como está aapl hoje?"), ["AAPL"]);
    }

    #[test]
    fn test_index_marker() {
        assert_eq!(extracted("Compare ^GSPC and AAPL"), ["^GSPC", "AAPL"]);
    }

    #[test]
    fn test_exchange_suffix() {
        assert_eq!(extracted("PETR.SA price today"), ["PETR.SA"]);
    }

    #[test]
    fn test_bare_word_length_limits() {
        // 1-letter and 6+-letter bare words are rejected unless punctuated
        assert!(extracted("A").is_empty());
        assert!(extracted("AMAZON GOOGLE").is_empty());
        assert_eq!(extracted("AB ABCDE"), ["AB", "ABCDE"]);
    }

    #[test]
    fn test_punctuated_form_allows_six_letters() {
        assert_eq!(extracted("GOOGLE-USD"), ["GOOGLE-USD"]);
    }

    #[test]
    fn test_stop_words_excluded() {
        assert!(extracted("THE NEWS TODAY ABOUT STOCK PRICE").is_empty());
        assert!(extracted("preço das ações hoje").is_empty());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        assert_eq!(extracted("AAPL MSFT AAPL $AAPL"), ["AAPL", "MSFT"]);
    }

    #[test]
    fn test_truncates_to_five() {
        assert_eq!(
            extracted("AAPL MSFT GOOGL AMZN TSLA NVDA META"),
            ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"]
        );
    }

    #[test]
    fn test_order_is_first_seen() {
        assert_eq!(extracted("GOOGL and $MSFT"), ["GOOGL", "MSFT"]);
    }

    #[test]
    fn test_surrounding_punctuation_stripped() {
        assert_eq!(extracted("What about (AAPL)? And MSFT!"), ["AAPL", "MSFT"]);
    }

    #[test]
    fn test_all_results_pass_acceptance_rule() {
        let symbols = extract("Tell me about $AAPL, BTC-USD, ^GSPC, PETR.SA and NVDA today");
        assert!(symbols.len() <= MAX_SYMBOLS);
        for symbol in &symbols {
            let s = symbol.as_str();
            assert_eq!(s, s.to_uppercase());
            assert!(!STOP_WORDS.contains(s));
            assert!(looks_like_ticker(s));
        }
    }
}
