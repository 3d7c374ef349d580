use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

use crate::core::categorizer::Categorizer;
use crate::core::normalize::normalize_skill_name;
use crate::error::{EngineError, Result};
use crate::models::{AutoCreateSummary, Skill};
use crate::services::Storage;

/// Normalizes, categorizes and idempotently persists skills
///
/// Each unique name is written with an atomic insert-if-absent. Losing a race
/// to a concurrent writer counts as success: the entry already stored wins.
#[derive(Clone)]
pub struct SkillRegistry {
    storage: Arc<dyn Storage>,
    categorizer: Arc<Categorizer>,
}

impl SkillRegistry {
    pub fn new(storage: Arc<dyn Storage>, categorizer: Arc<Categorizer>) -> Self {
        Self {
            storage,
            categorizer,
        }
    }

    /// Make sure every name in `raw_names` has a registry entry
    ///
    /// Safe to call repeatedly and concurrently with overlapping input. Names
    /// that normalize to nothing are dropped. Writes are atomic per item, so a
    /// storage failure part way through keeps everything committed before it
    /// and surfaces as a retryable `RegistryWrite`.
    pub async fn auto_create<S: AsRef<str>>(&self, raw_names: &[S]) -> Result<AutoCreateSummary> {
        let mut summary = AutoCreateSummary::default();

        for (normalized, display_name) in unique_names(raw_names) {
            let existing = self
                .storage
                .find_skill_by_normalized_name(&normalized)
                .await
                .map_err(|source| EngineError::RegistryWrite {
                    name: normalized.clone(),
                    source,
                })?;

            if existing.is_some() {
                tracing::trace!("Skill already registered: {}", normalized);
                summary.existing.push(normalized);
                continue;
            }

            let result = self.categorizer.categorize(&normalized);
            let skill = Skill {
                normalized_name: normalized.clone(),
                display_name,
                category: result.category,
                confidence: result.confidence,
                reasoning: result.reasoning.join(", "),
                created_at: Utc::now(),
            };

            let inserted = self
                .storage
                .insert_skill_if_absent(&skill)
                .await
                .map_err(|source| EngineError::RegistryWrite {
                    name: normalized.clone(),
                    source,
                })?;

            if inserted {
                tracing::debug!(
                    "Registered skill '{}' as {} ({:.2})",
                    skill.display_name,
                    skill.category,
                    skill.confidence
                );
                summary.created.push(normalized);
            } else {
                tracing::debug!("Skill '{}' was registered concurrently", normalized);
                summary.existing.push(normalized);
            }
        }

        Ok(summary)
    }

    /// Find the entry for any spelling of a skill name
    pub async fn lookup(&self, raw_name: &str) -> Result<Option<Skill>> {
        let normalized = normalize_skill_name(raw_name);
        if normalized.is_empty() {
            return Ok(None);
        }
        Ok(self.storage.find_skill_by_normalized_name(&normalized).await?)
    }

    /// Registry contents, optionally for one category
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Skill>> {
        Ok(self.storage.list_skills(category).await?)
    }
}

/// Unique normalized names in first-seen order, each paired with the first
/// raw spelling, casing and spacing untouched, that produced it
fn unique_names<S: AsRef<str>>(raw_names: &[S]) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for raw in raw_names {
        let raw = raw.as_ref();
        let normalized = normalize_skill_name(raw);
        if normalized.is_empty() || !seen.insert(normalized.clone()) {
            continue;
        }
        unique.push((normalized, raw.to_string()));
    }

    unique
}
