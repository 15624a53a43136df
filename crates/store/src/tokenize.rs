use once_cell::sync::Lazy;
use regex::Regex;

// Word characters, minimum length 2. Single-character tokens carry no
// discriminative weight in corpora this small and are dropped at fit and
// transform alike, so queries and documents agree on what a term is.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w{2,}").expect("valid token regex"));

/// Split text into lowercase terms.
///
/// Deterministic: the same input always yields the same token sequence.
/// No stemming, no stop-word removal.
///
/// Because of the two-character minimum, single-letter corpora produce an
/// empty vocabulary; retrieval examples are therefore phrased with
/// multi-character terms (see `crates/search/tests/retrieval_flow.rs`,
/// `superset_document_outranks_subset_on_full_query`).
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lowercases_and_splits_on_non_word_chars() {
        assert_eq!(
            tokenize("The only limit, to-day!"),
            vec!["the", "only", "limit", "to", "day"]
        );
    }

    #[test]
    fn drops_single_character_tokens() {
        assert_eq!(tokenize("a bb c dd"), vec!["bb", "dd"]);
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  .,!  ").is_empty());
    }
}
