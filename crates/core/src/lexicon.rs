//! Keyword lexicon used by the scorer.
//!
//! The lexicon is three weighted keyword categories concatenated into one ordered list. When a
//! keyword occurs in more than one category, the weight from the later category wins while the
//! keyword keeps the position of its first occurrence. Iteration order is therefore stable and
//! determines the order of matched keywords in an assessment.

use std::sync::OnceLock;

/// A group of weighted keywords.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub entries: &'static [(&'static str, f64)],
}

pub const STRESS: Category = Category {
    entries: &[
        ("stress", 2.0),
        ("stressed", 2.0),
        ("overwhelmed", 2.0),
        ("pressure", 1.5),
        ("tired", 1.0),
        ("exhausted", 1.5),
        ("burnout", 2.0),
        ("workload", 1.0),
    ],
};

pub const ANXIETY: Category = Category {
    entries: &[
        ("anxious", 2.0),
        ("worry", 1.5),
        ("panic", 2.0),
        ("nervous", 1.0),
        ("fear", 1.5),
        ("uneasy", 1.0),
    ],
};

pub const MOOD: Category = Category {
    entries: &[
        ("sad", 1.5),
        ("down", 1.0),
        ("depressed", 2.0),
        ("hopeless", 2.0),
        ("insomnia", 1.5),
        ("sleep", 0.5),
        ("headache", 0.5),
    ],
};

/// Categories in override precedence order (later wins).
pub const STANDARD_CATEGORIES: [Category; 3] = [STRESS, ANXIETY, MOOD];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexiconEntry {
    pub keyword: &'static str,
    pub weight: f64,
}

/// Ordered keyword to weight mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    /// Concatenates `categories` in order, then resolves duplicate keywords.
    pub fn merged(categories: &[Category]) -> Self {
        let concatenated = categories
            .iter()
            .flat_map(|category| category.entries.iter())
            .map(|&(keyword, weight)| LexiconEntry { keyword, weight });

        let mut entries: Vec<LexiconEntry> = Vec::new();
        for entry in concatenated {
            match entries.iter_mut().find(|e| e.keyword == entry.keyword) {
                Some(existing) => existing.weight = entry.weight,
                None => entries.push(entry),
            }
        }

        Self { entries }
    }

    /// The process-wide lexicon built from [`STANDARD_CATEGORIES`].
    pub fn standard() -> &'static Lexicon {
        static STANDARD: OnceLock<Lexicon> = OnceLock::new();
        STANDARD.get_or_init(|| Lexicon::merged(&STANDARD_CATEGORIES))
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_of(lexicon: &Lexicon, keyword: &str) -> Option<f64> {
        lexicon
            .entries()
            .iter()
            .find(|e| e.keyword == keyword)
            .map(|e| e.weight)
    }

    #[test]
    fn test_standard_lexicon_has_every_keyword_once() {
        let lexicon = Lexicon::standard();
        assert_eq!(lexicon.entries().len(), 21);

        let mut keywords: Vec<_> = lexicon.entries().iter().map(|e| e.keyword).collect();
        keywords.sort_unstable();
        keywords.dedup();
        assert_eq!(keywords.len(), 21);
    }

    #[test]
    fn test_standard_lexicon_keeps_category_order() {
        let keywords: Vec<_> = Lexicon::standard()
            .entries()
            .iter()
            .map(|e| e.keyword)
            .collect();

        assert_eq!(keywords.first(), Some(&"stress"));
        assert_eq!(keywords[7], "workload");
        assert_eq!(keywords[8], "anxious");
        assert_eq!(keywords[14], "sad");
        assert_eq!(keywords.last(), Some(&"headache"));
    }

    #[test]
    fn test_standard_lexicon_weights() {
        let lexicon = Lexicon::standard();
        assert_eq!(weight_of(lexicon, "pressure"), Some(1.5));
        assert_eq!(weight_of(lexicon, "nervous"), Some(1.0));
        assert_eq!(weight_of(lexicon, "sleep"), Some(0.5));
        assert_eq!(weight_of(lexicon, "happy"), None);
    }

    #[test]
    fn test_later_category_overrides_weight_in_first_position() {
        const FIRST: Category = Category {
            entries: &[("alpha", 1.0), ("beta", 1.0)],
        };
        const SECOND: Category = Category {
            entries: &[("gamma", 3.0), ("alpha", 2.5)],
        };

        let lexicon = Lexicon::merged(&[FIRST, SECOND]);
        let keywords: Vec<_> = lexicon.entries().iter().map(|e| e.keyword).collect();

        assert_eq!(keywords, vec!["alpha", "beta", "gamma"]);
        assert_eq!(weight_of(&lexicon, "alpha"), Some(2.5));
    }

    #[test]
    fn test_merged_without_categories_is_empty() {
        assert!(Lexicon::merged(&[]).entries().is_empty());
    }
}
