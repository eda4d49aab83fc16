//! In-memory graph with the same upsert semantics as the database.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use async_trait::async_trait;

use super::GraphSink;
use crate::user::model::UserRecord;

#[derive(Debug, Default)]
struct Inner {
    /// `None` marks a bare node merged only by id.
    nodes: BTreeMap<i64, Option<UserRecord>>,
    /// (follower, followed)
    edges: BTreeSet<(i64, i64)>,
}

/// A `GraphSink` that keeps the crawled graph in process memory.
///
/// Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    inner: Mutex<Inner>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of `User` nodes, bare ones included.
    pub fn node_count(&self) -> usize {
        self.lock().nodes.len()
    }

    /// Number of `FOLLOWS` edges.
    pub fn edge_count(&self) -> usize {
        self.lock().edges.len()
    }

    pub fn contains_node(&self, user_id: i64) -> bool {
        self.lock().nodes.contains_key(&user_id)
    }

    /// Stored attributes for a user, `None` for absent or bare nodes.
    pub fn user(&self, user_id: i64) -> Option<UserRecord> {
        self.lock().nodes.get(&user_id).cloned().flatten()
    }

    pub fn has_edge(&self, follower_id: i64, followed_id: i64) -> bool {
        self.lock().edges.contains(&(follower_id, followed_id))
    }

    /// All edges as `(follower, followed)` pairs in ascending order.
    pub fn edges(&self) -> Vec<(i64, i64)> {
        self.lock().edges.iter().copied().collect()
    }
}

#[async_trait]
impl GraphSink for MemoryGraph {
    async fn save_user(&self, user: &UserRecord) -> Result<()> {
        self.lock().nodes.insert(user.id, Some(user.clone()));
        Ok(())
    }

    async fn save_relationship(&self, followed_id: i64, follower_id: i64) -> Result<()> {
        let mut inner = self.lock();
        if !inner.nodes.contains_key(&followed_id) {
            return Ok(());
        }
        inner.nodes.entry(follower_id).or_insert(None);
        inner.edges.insert((follower_id, followed_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str) -> UserRecord {
        UserRecord {
            id,
            name: name.to_string(),
            screen_name: None,
            sex: None,
            home_town: None,
            city: Some("Moscow".to_string()),
        }
    }

    #[tokio::test]
    async fn test_save_user_is_idempotent() {
        let graph = MemoryGraph::new();
        graph.save_user(&record(1, "Ivan Ivanov")).await.unwrap();
        graph.save_user(&record(1, "Ivan Ivanov")).await.unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.user(1), Some(record(1, "Ivan Ivanov")));
    }

    #[tokio::test]
    async fn test_save_user_last_writer_wins() {
        let graph = MemoryGraph::new();
        graph.save_user(&record(1, "Old Name")).await.unwrap();
        graph.save_user(&record(1, "New Name")).await.unwrap();
        assert_eq!(graph.user(1).unwrap().name, "New Name");
    }

    #[tokio::test]
    async fn test_duplicate_relationship_yields_one_edge() {
        let graph = MemoryGraph::new();
        graph.save_user(&record(1, "A")).await.unwrap();
        graph.save_relationship(1, 2).await.unwrap();
        graph.save_relationship(1, 2).await.unwrap();
        assert_eq!(graph.edges(), vec![(2, 1)]);
        assert!(graph.contains_node(2));
        assert_eq!(graph.user(2), None);
    }

    #[tokio::test]
    async fn test_relationship_to_unknown_user_is_dropped() {
        let graph = MemoryGraph::new();
        graph.save_relationship(1, 2).await.unwrap();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[tokio::test]
    async fn test_bare_follower_keeps_attributes_once_saved() {
        let graph = MemoryGraph::new();
        graph.save_user(&record(1, "A")).await.unwrap();
        graph.save_user(&record(2, "B")).await.unwrap();
        graph.save_relationship(1, 2).await.unwrap();
        assert_eq!(graph.user(2).unwrap().name, "B");
        assert!(graph.has_edge(2, 1));
        assert!(!graph.has_edge(1, 2));
    }
}
