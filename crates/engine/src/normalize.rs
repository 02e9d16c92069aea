//! Text normalization — one pure function family used everywhere.
//!
//! Scoring and deduplication must agree on what "the same text" means, so
//! queries, fragments, and dedup keys all pass through the same fold:
//! lowercase, Latin diacritics stripped, non-alphanumerics collapsed to
//! single spaces. Term extraction additionally drops stopwords and terms
//! shorter than three characters.
//!
//! Everything here is deterministic: identical input always yields an
//! identical result, with no locale or time dependence.

use std::collections::BTreeSet;

/// Normalized dedup keys keep at most this many characters.
pub const DEDUP_KEY_LEN: usize = 64;

/// Output snippets keep at most this many characters.
pub const SNIPPET_LEN: usize = 240;

/// Minimum term length; anything shorter is noise.
const MIN_TERM_LEN: usize = 3;

/// Fixed stopword list, English and Portuguese (the conversational
/// languages of the surrounding system). Entries are pre-folded: no
/// uppercase, no diacritics.
const STOPWORDS: &[&str] = &[
    // English
    "the", "and", "for", "are", "but", "not", "was", "his", "her", "they",
    "them", "this", "that", "these", "those", "with", "from", "have", "has",
    "had", "you", "your", "what", "when", "where", "which", "who", "why",
    "how", "can", "could", "would", "should", "will", "all", "any", "some",
    "than", "then", "there", "their", "been", "were", "did", "does", "about",
    "into", "over", "under", "very", "just", "like", "also", "out", "one",
    // Portuguese (diacritics already stripped)
    "que", "nao", "com", "uma", "para", "por", "mais", "dos", "das", "como",
    "mas", "foi", "ele", "ela", "seu", "sua", "seus", "suas", "meu", "minha",
    "isso", "essa", "esse", "esta", "este", "sao", "tem", "ser", "estou",
    "voce", "pelo", "pela", "ate", "sem", "quando", "muito", "bem", "onde",
    "tambem", "depois", "ainda", "mesmo", "porque", "qual", "entre",
];

fn is_stopword(term: &str) -> bool {
    STOPWORDS.contains(&term)
}

/// Strip the diacritic from common Latin accented characters.
fn strip_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ç' => 'c',
        'ñ' => 'n',
        _ => c,
    }
}

/// Canonical fold: lowercase, diacritics stripped, every run of
/// non-alphanumeric characters collapsed to a single space, trimmed.
pub fn fold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        for lower in c.to_lowercase() {
            let folded = strip_diacritic(lower);
            if folded.is_alphanumeric() {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(folded);
            } else {
                pending_space = true;
            }
        }
    }
    out
}

/// Extract the set of significant terms from a text.
///
/// The result is order-independent (a set) and deterministic. Text with
/// no qualifying terms yields an empty set; callers treat an empty
/// *query* term set as "no relevant fragments" and short-circuit.
pub fn terms(text: &str) -> BTreeSet<String> {
    fold(text)
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TERM_LEN && !is_stopword(t))
        .map(str::to_string)
        .collect()
}

/// Deduplication key: a length-capped prefix of the canonical fold.
/// Near-identical fragments (same leading text, different trailing
/// detail or punctuation) collapse to the same key.
pub fn dedup_key(text: &str) -> String {
    fold(text).chars().take(DEDUP_KEY_LEN).collect()
}

/// Display snippet: whitespace collapsed but case and punctuation kept,
/// capped at `max` characters.
pub fn snippet(text: &str, max: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max {
        collapsed
    } else {
        collapsed.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_lowercases_and_strips_diacritics() {
        assert_eq!(fold("Memória é PRECIOSA!"), "memoria e preciosa");
        assert_eq!(fold("  Ação;;rápida  "), "acao rapida");
    }

    #[test]
    fn terms_drop_stopwords_and_short_terms() {
        let t = terms("What is the refund policy?");
        assert!(t.contains("refund"));
        assert!(t.contains("policy"));
        assert!(!t.contains("what"));
        assert!(!t.contains("the"));
        assert!(!t.contains("is"));
    }

    #[test]
    fn terms_are_order_independent() {
        assert_eq!(terms("refund policy details"), terms("details policy refund"));
    }

    #[test]
    fn stopword_only_text_yields_empty_set() {
        assert!(terms("what is the").is_empty());
        assert!(terms("!!! ?? ..").is_empty());
        assert!(terms("").is_empty());
    }

    #[test]
    fn dedup_key_is_capped_and_normalized() {
        let long = "Refund POLICY: ".repeat(20);
        let key = dedup_key(&long);
        assert_eq!(key.chars().count(), DEDUP_KEY_LEN);
        assert!(key.starts_with("refund policy refund policy"));
    }

    #[test]
    fn identical_texts_share_a_dedup_key() {
        assert_eq!(
            dedup_key("The refund policy:  30 days"),
            dedup_key("the REFUND policy 30 days!!")
        );
    }

    #[test]
    fn snippet_collapses_whitespace_and_caps_length() {
        assert_eq!(snippet("a  b\n\n  c", 100), "a b c");
        let long = "word ".repeat(100);
        assert_eq!(snippet(&long, 20).chars().count(), 20);
    }

    #[test]
    fn fold_is_deterministic() {
        let input = "Ressonância: estado R — intensidade 0.8";
        assert_eq!(fold(input), fold(input));
        assert_eq!(terms(input), terms(input));
    }
}
