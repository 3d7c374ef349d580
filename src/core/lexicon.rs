use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::core::normalize::normalize_skill_name;

/// Reserved fallback category. Never matched directly.
pub const OTHER_CATEGORY: &str = "Other";

/// Version tag of the built-in lexicon
pub const BUILTIN_LEXICON_VERSION: &str = "2024.1";

/// Errors raised while loading or validating a lexicon
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Failed to read lexicon file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse lexicon: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid lexicon: {0}")]
    Invalid(String),
}

/// A single weighted trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub phrase: String,
    pub weight: f64,
}

/// A category and the keywords that vote for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub name: String,
    pub keywords: Vec<Keyword>,
    /// Raw score at which confidence reaches 1.0. Falls back to the
    /// categorizer's default when unset.
    #[serde(default)]
    pub saturation: Option<f64>,
}

/// Versioned category → keyword table
///
/// Loaded once at startup and shared read-only. `priority` is the explicit
/// tie-break order used when two categories reach the same score; earlier
/// entries win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryLexicon {
    pub version: String,
    #[serde(default)]
    pub priority: Vec<String>,
    pub categories: Vec<CategoryDefinition>,
}

const TECHNOLOGY: &[(&str, f64)] = &[
    ("programming", 1.0),
    ("coding", 1.0),
    ("software", 0.8),
    ("web development", 1.0),
    ("app development", 1.0),
    ("python", 1.0),
    ("javascript", 1.0),
    ("typescript", 1.0),
    ("java", 1.0),
    ("golang", 1.0),
    ("rust", 0.6),
    ("react", 1.0),
    ("angular", 0.8),
    ("vue", 0.6),
    ("nodejs", 1.0),
    ("html", 1.0),
    ("css", 1.0),
    ("sql", 1.0),
    ("database", 0.8),
    ("machine learning", 1.0),
    ("data science", 1.0),
    ("artificial intelligence", 1.0),
    ("ai", 0.6),
    ("linux", 0.8),
    ("devops", 1.0),
    ("docker", 1.0),
    ("kubernetes", 1.0),
    ("cloud", 0.5),
    ("cybersecurity", 1.0),
    ("android", 0.8),
    ("ios", 0.8),
    ("git", 0.8),
    ("algorithms", 0.8),
    ("computer", 0.6),
    ("excel", 0.6),
    ("blockchain", 0.8),
    ("robotics", 0.6),
];

const DESIGN: &[(&str, f64)] = &[
    ("graphic design", 1.0),
    ("web design", 1.0),
    ("interior design", 1.0),
    ("design", 0.5),
    ("photoshop", 1.0),
    ("illustrator", 1.0),
    ("figma", 1.0),
    ("ui", 0.5),
    ("ux", 0.5),
    ("typography", 1.0),
    ("logo", 0.6),
    ("branding", 0.6),
    ("animation", 0.6),
    ("3d modeling", 1.0),
];

const MUSIC: &[(&str, f64)] = &[
    ("music", 0.8),
    ("music theory", 1.0),
    ("music production", 1.0),
    ("guitar", 1.0),
    ("piano", 1.0),
    ("violin", 1.0),
    ("cello", 1.0),
    ("drums", 1.0),
    ("bass", 0.5),
    ("ukulele", 1.0),
    ("flute", 1.0),
    ("saxophone", 1.0),
    ("trumpet", 1.0),
    ("singing", 1.0),
    ("vocals", 0.8),
    ("choir", 0.8),
    ("songwriting", 1.0),
    ("composing", 0.8),
    ("dj", 0.8),
];

const LANGUAGES: &[(&str, f64)] = &[
    ("spanish", 1.0),
    ("french", 1.0),
    ("german", 1.0),
    ("english", 1.0),
    ("italian", 1.0),
    ("portuguese", 1.0),
    ("russian", 1.0),
    ("arabic", 1.0),
    ("hindi", 1.0),
    ("mandarin", 1.0),
    ("chinese", 1.0),
    ("japanese", 1.0),
    ("korean", 1.0),
    ("sign language", 1.0),
    ("language", 0.6),
    ("translation", 0.8),
    ("grammar", 0.6),
];

const SPORTS_FITNESS: &[(&str, f64)] = &[
    ("football", 1.0),
    ("soccer", 1.0),
    ("basketball", 1.0),
    ("volleyball", 1.0),
    ("tennis", 1.0),
    ("golf", 1.0),
    ("swimming", 1.0),
    ("running", 0.8),
    ("cycling", 1.0),
    ("hiking", 0.8),
    ("climbing", 1.0),
    ("skiing", 1.0),
    ("surfing", 1.0),
    ("boxing", 1.0),
    ("martial arts", 1.0),
    ("karate", 1.0),
    ("weight training", 1.0),
    ("workout", 0.8),
    ("fitness", 0.8),
];

const COOKING: &[(&str, f64)] = &[
    ("cooking", 1.0),
    ("cook", 0.8),
    ("baking", 1.0),
    ("cuisine", 1.0),
    ("pastry", 1.0),
    ("recipes", 0.8),
    ("grilling", 1.0),
    ("bbq", 1.0),
    ("meal prep", 1.0),
    ("chef", 0.8),
    ("sushi", 0.8),
    ("bread", 0.6),
    ("vegan", 0.5),
    ("coffee", 0.5),
    ("food", 0.5),
];

const ARTS_CRAFTS: &[(&str, f64)] = &[
    ("painting", 1.0),
    ("drawing", 1.0),
    ("sketching", 1.0),
    ("watercolor", 1.0),
    ("calligraphy", 1.0),
    ("sculpture", 1.0),
    ("pottery", 1.0),
    ("photography", 1.0),
    ("knitting", 1.0),
    ("crochet", 1.0),
    ("sewing", 1.0),
    ("woodworking", 1.0),
    ("crafts", 0.8),
    ("art", 0.6),
    ("dance", 0.8),
    ("dancing", 0.8),
    ("acting", 0.8),
    ("theater", 0.8),
    ("creative writing", 1.0),
    ("poetry", 0.8),
    ("writing", 0.6),
];

const BUSINESS: &[(&str, f64)] = &[
    ("marketing", 1.0),
    ("digital marketing", 1.0),
    ("seo", 0.8),
    ("sales", 0.8),
    ("accounting", 1.0),
    ("bookkeeping", 1.0),
    ("finance", 1.0),
    ("investing", 1.0),
    ("trading", 0.6),
    ("entrepreneurship", 1.0),
    ("startup", 0.8),
    ("business", 0.8),
    ("management", 0.8),
    ("project management", 1.0),
    ("leadership", 0.8),
    ("negotiation", 1.0),
    ("public speaking", 1.0),
];

const ACADEMICS: &[(&str, f64)] = &[
    ("mathematics", 1.0),
    ("math", 1.0),
    ("algebra", 1.0),
    ("calculus", 1.0),
    ("statistics", 1.0),
    ("physics", 1.0),
    ("chemistry", 1.0),
    ("biology", 1.0),
    ("astronomy", 1.0),
    ("history", 1.0),
    ("geography", 0.8),
    ("philosophy", 1.0),
    ("psychology", 1.0),
    ("economics", 1.0),
    ("literature", 0.8),
    ("science", 0.6),
    ("tutoring", 0.6),
    ("test prep", 0.8),
];

const HEALTH_WELLNESS: &[(&str, f64)] = &[
    ("yoga", 1.0),
    ("pilates", 1.0),
    ("meditation", 1.0),
    ("mindfulness", 1.0),
    ("breathwork", 1.0),
    ("nutrition", 1.0),
    ("mental health", 1.0),
    ("first aid", 1.0),
    ("massage", 0.8),
    ("wellness", 0.8),
    ("therapy", 0.5),
];

const LIFESTYLE: &[(&str, f64)] = &[
    ("gardening", 1.0),
    ("chess", 1.0),
    ("wine tasting", 1.0),
    ("wine", 0.6),
    ("mixology", 1.0),
    ("barista", 0.8),
    ("fashion", 0.8),
    ("makeup", 0.8),
    ("home repair", 1.0),
    ("car maintenance", 1.0),
    ("diy", 0.6),
    ("parenting", 0.8),
    ("budgeting", 0.8),
    ("fishing", 0.8),
    ("camping", 0.8),
    ("travel", 0.6),
];

/// Tie-break order of the built-in lexicon. Cooking outranks Languages so that
/// "Italian cooking" lands in Cooking; Health & Wellness outranks Sports &
/// Fitness for the same reason with "yoga workout".
const BUILTIN_PRIORITY: &[&str] = &[
    "Technology",
    "Music",
    "Cooking",
    "Health & Wellness",
    "Sports & Fitness",
    "Design",
    "Arts & Crafts",
    "Languages",
    "Business",
    "Academics",
    "Lifestyle",
];

impl CategoryLexicon {
    /// The lexicon shipped with the service
    pub fn builtin() -> Self {
        let table: [(&str, &[(&str, f64)]); 11] = [
            ("Technology", TECHNOLOGY),
            ("Design", DESIGN),
            ("Music", MUSIC),
            ("Languages", LANGUAGES),
            ("Sports & Fitness", SPORTS_FITNESS),
            ("Cooking", COOKING),
            ("Arts & Crafts", ARTS_CRAFTS),
            ("Business", BUSINESS),
            ("Academics", ACADEMICS),
            ("Health & Wellness", HEALTH_WELLNESS),
            ("Lifestyle", LIFESTYLE),
        ];

        let categories = table
            .iter()
            .map(|(name, keywords)| CategoryDefinition {
                name: name.to_string(),
                keywords: keywords
                    .iter()
                    .map(|(phrase, weight)| Keyword {
                        phrase: phrase.to_string(),
                        weight: *weight,
                    })
                    .collect(),
                saturation: None,
            })
            .collect();

        Self {
            version: BUILTIN_LEXICON_VERSION.to_string(),
            priority: BUILTIN_PRIORITY.iter().map(|s| s.to_string()).collect(),
            categories,
        }
    }

    /// Parse a lexicon from TOML and validate it
    pub fn from_toml_str(source: &str) -> Result<Self, LexiconError> {
        let lexicon: CategoryLexicon = toml::from_str(source)?;
        lexicon.validated()
    }

    /// Load a lexicon file and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check the lexicon and bring keywords into normalized form
    ///
    /// Keyword phrases go through the same normalization as skill names so a
    /// phrase like "3D-Modeling" still matches. Categories missing from
    /// `priority` are appended in definition order.
    pub fn validated(mut self) -> Result<Self, LexiconError> {
        if self.version.trim().is_empty() {
            return Err(LexiconError::Invalid("version must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for category in &mut self.categories {
            let name = category.name.trim().to_string();
            if name.is_empty() {
                return Err(LexiconError::Invalid("category name must not be empty".into()));
            }
            if name.eq_ignore_ascii_case(OTHER_CATEGORY) {
                return Err(LexiconError::Invalid(format!(
                    "'{}' is reserved and cannot carry keywords",
                    OTHER_CATEGORY
                )));
            }
            if !seen.insert(name.clone()) {
                return Err(LexiconError::Invalid(format!("duplicate category '{}'", name)));
            }
            category.name = name.clone();

            if let Some(saturation) = category.saturation {
                if !(saturation > 0.0 && saturation.is_finite()) {
                    return Err(LexiconError::Invalid(format!(
                        "saturation of '{}' must be positive",
                        name
                    )));
                }
            }

            for keyword in &mut category.keywords {
                if !(keyword.weight > 0.0 && keyword.weight <= 1.0) {
                    return Err(LexiconError::Invalid(format!(
                        "weight of '{}' in '{}' must be in (0, 1]",
                        keyword.phrase, name
                    )));
                }
                keyword.phrase = normalize_skill_name(&keyword.phrase);
                if keyword.phrase.is_empty() {
                    return Err(LexiconError::Invalid(format!(
                        "empty keyword in '{}'",
                        name
                    )));
                }
            }
        }

        let mut priority = Vec::with_capacity(self.categories.len());
        for name in self.priority.iter().map(|n| n.trim().to_string()) {
            if !seen.contains(&name) {
                return Err(LexiconError::Invalid(format!(
                    "priority names unknown category '{}'",
                    name
                )));
            }
            if priority.contains(&name) {
                return Err(LexiconError::Invalid(format!(
                    "priority lists '{}' twice",
                    name
                )));
            }
            priority.push(name);
        }
        for category in &self.categories {
            if !priority.contains(&category.name) {
                priority.push(category.name.clone());
            }
        }
        self.priority = priority;

        Ok(self)
    }

    /// Category names in definition order
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }
}

impl Default for CategoryLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let lexicon = CategoryLexicon::builtin().validated().unwrap();
        assert_eq!(lexicon.version, BUILTIN_LEXICON_VERSION);
        assert_eq!(lexicon.priority.len(), lexicon.categories.len());
        assert!(lexicon.contains("Technology"));
        assert!(!lexicon.contains(OTHER_CATEGORY));
    }

    #[test]
    fn test_builtin_keywords_are_normalized() {
        let lexicon = CategoryLexicon::builtin();
        for category in &lexicon.categories {
            for keyword in &category.keywords {
                assert_eq!(keyword.phrase, normalize_skill_name(&keyword.phrase));
            }
        }
    }

    #[test]
    fn test_from_toml() {
        let source = r#"
            version = "test-1"
            priority = ["Outdoors"]

            [[categories]]
            name = "Indoors"
            keywords = [{ phrase = "Board-Games", weight = 1.0 }]

            [[categories]]
            name = "Outdoors"
            saturation = 2.0
            keywords = [{ phrase = "kayaking", weight = 0.9 }]
        "#;

        let lexicon = CategoryLexicon::from_toml_str(source).unwrap();
        assert_eq!(lexicon.priority, vec!["Outdoors", "Indoors"]);
        assert_eq!(lexicon.categories[0].keywords[0].phrase, "board games");
        assert_eq!(lexicon.categories[1].saturation, Some(2.0));
    }

    #[test]
    fn test_names_and_priority_are_trimmed() {
        let source = r#"
            version = "test-2"
            priority = [" Outdoors ", "Indoors"]

            [[categories]]
            name = "  Indoors "
            keywords = [{ phrase = "chess", weight = 1.0 }]

            [[categories]]
            name = "Outdoors"
            keywords = [{ phrase = "hiking", weight = 1.0 }]
        "#;

        let lexicon = CategoryLexicon::from_toml_str(source).unwrap();
        assert_eq!(lexicon.category_names(), vec!["Indoors", "Outdoors"]);
        assert_eq!(lexicon.priority, vec!["Outdoors", "Indoors"]);
    }

    #[test]
    fn test_rejects_duplicate_after_trim() {
        let source = r#"
            version = "bad"
            [[categories]]
            name = "Games"
            keywords = [{ phrase = "chess", weight = 1.0 }]

            [[categories]]
            name = " Games"
            keywords = [{ phrase = "poker", weight = 1.0 }]
        "#;

        assert!(matches!(
            CategoryLexicon::from_toml_str(source),
            Err(LexiconError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_reserved_category() {
        let source = r#"
            version = "bad"
            [[categories]]
            name = "other"
            keywords = [{ phrase = "misc", weight = 0.5 }]
        "#;

        assert!(matches!(
            CategoryLexicon::from_toml_str(source),
            Err(LexiconError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_bad_weight() {
        let source = r#"
            version = "bad"
            [[categories]]
            name = "Games"
            keywords = [{ phrase = "chess", weight = 1.5 }]
        "#;

        assert!(CategoryLexicon::from_toml_str(source).is_err());
    }

    #[test]
    fn test_rejects_unknown_priority() {
        let source = r#"
            version = "bad"
            priority = ["Nope"]
            [[categories]]
            name = "Games"
            keywords = [{ phrase = "chess", weight = 1.0 }]
        "#;

        assert!(CategoryLexicon::from_toml_str(source).is_err());
    }
}
