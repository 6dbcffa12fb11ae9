//! In-memory tip repository used by tests and local development.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tipline_core::{NewTip, NotificationTarget, Tip};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::seed::SeedTip;
use crate::traits::{RegistrationStore, TipStore};

/// Tip repository held entirely in process memory.
///
/// Mirrors the PostgreSQL backend's semantics, including the dedupe policy
/// on registrations.
#[derive(Debug, Default)]
pub struct MemoryTipStore {
    tips: RwLock<Vec<Tip>>,
    registrations: RwLock<Vec<NotificationTarget>>,
}

impl MemoryTipStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated with the given tips.
    #[must_use]
    pub fn with_tips(tips: Vec<Tip>) -> Self {
        Self { tips: RwLock::new(tips), registrations: RwLock::new(Vec::new()) }
    }
}

#[async_trait]
impl TipStore for MemoryTipStore {
    async fn random_tip(&self, category: Option<&str>) -> Result<Option<Tip>, StorageError> {
        let tips = self.tips.read().await;
        let matching: Vec<&Tip> = tips
            .iter()
            .filter(|t| category.is_none_or(|c| t.category == c))
            .collect();
        if matching.is_empty() {
            return Ok(None);
        }
        let index = rand::thread_rng().gen_range(0..matching.len());
        Ok(matching.get(index).map(|t| (*t).clone()))
    }

    async fn latest_tip(&self) -> Result<Option<Tip>, StorageError> {
        let tips = self.tips.read().await;
        Ok(tips.iter().max_by_key(|t| t.created_at).cloned())
    }

    async fn categories(&self) -> Result<Vec<String>, StorageError> {
        let tips = self.tips.read().await;
        let mut categories: Vec<String> = Vec::new();
        for tip in tips.iter() {
            if !categories.contains(&tip.category) {
                categories.push(tip.category.clone());
            }
        }
        Ok(categories)
    }

    async fn add_tip(&self, tip: NewTip) -> Result<Tip, StorageError> {
        let tip = Tip {
            text: tip.text,
            url: tip.url,
            category: tip.category,
            created_at: Utc::now(),
        };
        self.tips.write().await.push(tip.clone());
        Ok(tip)
    }

    async fn restore(&self, seed: &[SeedTip]) -> Result<usize, StorageError> {
        let mut tips = self.tips.write().await;
        tips.clear();
        let now = Utc::now();
        tips.extend(seed.iter().map(|s| Tip {
            text: s.tip.clone(),
            url: s.url.clone(),
            category: s.category.clone(),
            created_at: now,
        }));
        Ok(seed.len())
    }
}

#[async_trait]
impl RegistrationStore for MemoryTipStore {
    async fn register_for_update(
        &self,
        user_id: &str,
        intent: &str,
    ) -> Result<bool, StorageError> {
        let mut registrations = self.registrations.write().await;
        let exists = registrations.iter().any(|r| r.user_id == user_id && r.intent == intent);
        if exists {
            return Ok(false);
        }
        registrations.push(NotificationTarget {
            user_id: user_id.to_owned(),
            intent: intent.to_owned(),
        });
        Ok(true)
    }

    async fn registered_targets(
        &self,
        intent: &str,
    ) -> Result<Vec<NotificationTarget>, StorageError> {
        let registrations = self.registrations.read().await;
        Ok(registrations.iter().filter(|r| r.intent == intent).cloned().collect())
    }
}
