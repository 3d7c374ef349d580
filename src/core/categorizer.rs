use std::collections::HashMap;
use std::sync::Arc;

use crate::core::lexicon::{CategoryDefinition, CategoryLexicon, OTHER_CATEGORY};
use crate::core::normalize::{normalize_skill_name, tokens};
use crate::models::CategoryResult;

/// Default acceptance threshold. Scores below it resolve to "Other".
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.2;

/// Default raw score at which a category saturates to confidence 1.0
pub const DEFAULT_SATURATION: f64 = 1.0;

/// Single-word keywords at least this long also match inflected tokens
pub const MIN_PREFIX_KEYWORD_LEN: usize = 5;

/// Endings a token may add to a long keyword and still count as that keyword
pub const VARIANT_SUFFIXES: &[&str] = &[
    "s", "es", "js", "ing", "ed", "er", "ers", "ist", "ists", "ian", "ians", "ery", "y",
];

/// Tunables for the categorizer
#[derive(Debug, Clone, Copy)]
pub struct CategorizerSettings {
    pub acceptance_threshold: f64,
    pub default_saturation: f64,
}

impl Default for CategorizerSettings {
    fn default() -> Self {
        Self {
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            default_saturation: DEFAULT_SATURATION,
        }
    }
}

/// Keyword classifier for free-text skill names
///
/// A pure function of the lexicon and the input. Shared across workers behind
/// an `Arc` and never mutated after construction.
#[derive(Debug)]
pub struct Categorizer {
    lexicon: Arc<CategoryLexicon>,
    settings: CategorizerSettings,
    priority_rank: HashMap<String, usize>,
}

struct CategoryScore<'a> {
    definition: &'a CategoryDefinition,
    score: f64,
    matched: Vec<String>,
}

impl Categorizer {
    pub fn new(lexicon: Arc<CategoryLexicon>, settings: CategorizerSettings) -> Self {
        let priority_rank = lexicon
            .priority
            .iter()
            .enumerate()
            .map(|(rank, name)| (name.clone(), rank))
            .collect();

        Self {
            lexicon,
            settings,
            priority_rank,
        }
    }

    /// Categorizer over the built-in lexicon with default settings
    pub fn with_builtin_lexicon() -> Self {
        Self::new(
            Arc::new(CategoryLexicon::builtin()),
            CategorizerSettings::default(),
        )
    }

    pub fn lexicon(&self) -> &CategoryLexicon {
        &self.lexicon
    }

    pub fn lexicon_version(&self) -> &str {
        &self.lexicon.version
    }

    pub fn settings(&self) -> CategorizerSettings {
        self.settings
    }

    /// Configured categories followed by the reserved fallback
    pub fn categories(&self) -> Vec<String> {
        self.lexicon
            .category_names()
            .into_iter()
            .map(str::to_string)
            .chain(std::iter::once(OTHER_CATEGORY.to_string()))
            .collect()
    }

    /// Classify a raw skill name
    ///
    /// Never fails. Empty or unrecognized input resolves to "Other" with the
    /// best (sub-threshold) score as its confidence.
    pub fn categorize(&self, raw_name: &str) -> CategoryResult {
        let normalized = normalize_skill_name(raw_name);
        let name_tokens = tokens(&normalized);

        let mut best: Option<CategoryScore> = None;
        for definition in &self.lexicon.categories {
            let candidate = self.score_category(definition, &name_tokens);
            best = match best {
                Some(current) if !self.outranks(&candidate, &current) => Some(current),
                _ => Some(candidate),
            };
        }

        match best {
            Some(winner) if winner.score >= self.settings.acceptance_threshold && winner.score > 0.0 => {
                CategoryResult {
                    category: winner.definition.name.clone(),
                    confidence: winner.score,
                    reasoning: winner.matched,
                }
            }
            other => CategoryResult {
                category: OTHER_CATEGORY.to_string(),
                confidence: other.map(|s| s.score).unwrap_or(0.0),
                reasoning: Vec::new(),
            },
        }
    }

    fn score_category<'a>(
        &self,
        definition: &'a CategoryDefinition,
        name_tokens: &[&str],
    ) -> CategoryScore<'a> {
        let mut raw = 0.0;
        let mut matched = Vec::new();

        for keyword in &definition.keywords {
            if keyword_matches(&keyword.phrase, name_tokens) {
                raw += keyword.weight;
                matched.push(keyword.phrase.clone());
            }
        }

        let saturation = definition
            .saturation
            .unwrap_or(self.settings.default_saturation);
        let score = if saturation > 0.0 {
            (raw / saturation).clamp(0.0, 1.0)
        } else {
            0.0
        };

        CategoryScore {
            definition,
            score,
            matched,
        }
    }

    /// Higher score wins; equal scores fall back to the priority list
    fn outranks(&self, a: &CategoryScore, b: &CategoryScore) -> bool {
        if a.score != b.score {
            return a.score > b.score;
        }
        self.rank_of(&a.definition.name) < self.rank_of(&b.definition.name)
    }

    fn rank_of(&self, name: &str) -> usize {
        self.priority_rank.get(name).copied().unwrap_or(usize::MAX)
    }
}

/// Whether a normalized keyword occurs in a normalized name
///
/// Phrases match as a contiguous run of whole tokens. Single words match a
/// whole token; long ones also match a token made of the keyword plus one of
/// [`VARIANT_SUFFIXES`] ("react" hits "reactjs", not "overreacting" or "reactor").
fn keyword_matches(keyword: &str, name_tokens: &[&str]) -> bool {
    if keyword.contains(' ') {
        let phrase: Vec<&str> = tokens(keyword);
        if phrase.is_empty() || phrase.len() > name_tokens.len() {
            return false;
        }
        return name_tokens.windows(phrase.len()).any(|w| w == phrase.as_slice());
    }

    if name_tokens.contains(&keyword) {
        return true;
    }
    if keyword.chars().count() < MIN_PREFIX_KEYWORD_LEN {
        return false;
    }

    name_tokens.iter().any(|token| {
        token
            .strip_prefix(keyword)
            .is_some_and(|rest| VARIANT_SUFFIXES.contains(&rest))
    })
}
