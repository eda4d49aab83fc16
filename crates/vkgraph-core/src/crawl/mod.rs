//! Follower-graph crawl.
//!
//! The crawler reads from a [`UserSource`] and writes into a [`GraphSink`].
//! Both traits are object-safe so callers can pass trait objects or concrete
//! clients.

pub mod memory;
pub mod walker;

use anyhow::Result;
use async_trait::async_trait;

use crate::error::FetchResult;
use crate::user::model::{UserInfo, UserRecord};

pub use memory::MemoryGraph;
pub use walker::{CrawlStats, Crawler, DEFAULT_MAX_DEPTH};

/// Read side of the crawl: the remote social API.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetch the profile fields of one user.
    async fn fetch_user_info(&self, user_id: i64) -> FetchResult<UserInfo>;

    /// Fetch the identifiers of the accounts following `user_id`.
    ///
    /// `Ok(vec![])` means the user has no followers; a failed call is an `Err`.
    async fn fetch_followers(&self, user_id: i64) -> FetchResult<Vec<i64>>;
}

/// Write side of the crawl: the graph database.
///
/// Every write is an upsert keyed by user id, so repeating a call is harmless.
#[async_trait]
pub trait GraphSink: Send + Sync {
    /// Create or update the `User` node for `user.id`.
    async fn save_user(&self, user: &UserRecord) -> Result<()>;

    /// Record that `follower_id` follows `followed_id`.
    ///
    /// The followed node must already exist; otherwise nothing is written.
    /// The follower is merged as a bare node when absent.
    async fn save_relationship(&self, followed_id: i64, follower_id: i64) -> Result<()>;
}
