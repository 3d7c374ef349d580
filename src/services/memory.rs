use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{ordered_pair, Match, MatchStatus, Skill};
use crate::services::storage::{Storage, StorageError};

/// In-process storage backend
///
/// Used for local development and tests. Every conditional write runs under
/// a single write lock, which is what makes it atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    skills: RwLock<HashMap<String, Skill>>,
    matches: RwLock<HashMap<Uuid, Match>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn skill_count(&self) -> usize {
        self.skills.read().await.len()
    }

    pub async fn match_count(&self) -> usize {
        self.matches.read().await.len()
    }
}

#[async_trait]
impl Storage for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn find_skill_by_normalized_name(&self, key: &str) -> Result<Option<Skill>, StorageError> {
        Ok(self.skills.read().await.get(key).cloned())
    }

    async fn insert_skill_if_absent(&self, skill: &Skill) -> Result<bool, StorageError> {
        let mut skills = self.skills.write().await;
        if skills.contains_key(&skill.normalized_name) {
            return Ok(false);
        }
        skills.insert(skill.normalized_name.clone(), skill.clone());
        Ok(true)
    }

    async fn list_skills(&self, category: Option<&str>) -> Result<Vec<Skill>, StorageError> {
        let skills = self.skills.read().await;
        let mut listed: Vec<Skill> = skills
            .values()
            .filter(|s| category.map_or(true, |c| s.category == c))
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.normalized_name.cmp(&b.normalized_name));
        Ok(listed)
    }

    async fn find_match_by_id(&self, id: Uuid) -> Result<Option<Match>, StorageError> {
        Ok(self.matches.read().await.get(&id).cloned())
    }

    async fn find_match_by_pair(
        &self,
        user_a: &str,
        user_b: &str,
        statuses: &[MatchStatus],
    ) -> Result<Option<Match>, StorageError> {
        let pair = ordered_pair(user_a, user_b);
        let matches = self.matches.read().await;
        Ok(matches
            .values()
            .filter(|m| m.pair() == pair && statuses.contains(&m.status))
            .max_by_key(|m| m.created_at)
            .cloned())
    }

    async fn find_active_partners(&self, user_id: &str) -> Result<Vec<String>, StorageError> {
        let matches = self.matches.read().await;
        Ok(matches
            .values()
            .filter(|m| m.status.is_active() && m.involves(user_id))
            .map(|m| m.counterpart(user_id).to_string())
            .collect())
    }

    async fn insert_match_if_no_conflict(&self, record: &Match) -> Result<bool, StorageError> {
        let mut matches = self.matches.write().await;
        let pair = record.pair();
        let conflict = matches
            .values()
            .any(|m| m.status.is_active() && m.pair() == pair);
        if conflict || matches.contains_key(&record.id) {
            return Ok(false);
        }
        matches.insert(record.id, record.clone());
        Ok(true)
    }

    async fn update_match_status(
        &self,
        id: Uuid,
        expected: MatchStatus,
        status: MatchStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Match>, StorageError> {
        let mut matches = self.matches.write().await;
        match matches.get_mut(&id) {
            Some(record) if record.status == expected => {
                record.status = status;
                record.updated_at = at;
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn list_matches_for_user(&self, user_id: &str) -> Result<Vec<Match>, StorageError> {
        let matches = self.matches.read().await;
        let mut listed: Vec<Match> = matches
            .values()
            .filter(|m| m.involves(user_id))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(listed)
    }

    async fn health_check(&self) -> Result<bool, StorageError> {
        Ok(true)
    }
}
