//! Depth-bounded walk over the follower relation.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::{GraphSink, UserSource};
use crate::user::model::UserRecord;

/// Depth bound used when the caller does not pick one.
///
/// The root sits at depth 0, so the default explores the root and its direct
/// followers, and links the followers of those followers as bare nodes.
pub const DEFAULT_MAX_DEPTH: u32 = 1;

/// Counters collected over one crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub users_saved: usize,
    pub relationships_saved: usize,
    pub info_failures: usize,
    pub follower_failures: usize,
}

enum Work {
    Visit { user_id: i64, depth: u32 },
    Link { followed_id: i64, follower_id: i64 },
}

/// Depth-first walk over followers, bounded by depth, writing nodes and edges as it goes.
///
/// There is no visited set: a user reachable along several paths is fetched
/// and upserted once per path within the depth bound.
pub struct Crawler<'a, S: ?Sized, G: ?Sized> {
    source: &'a S,
    sink: &'a G,
    max_depth: u32,
}

impl<'a, S, G> Crawler<'a, S, G>
where
    S: UserSource + ?Sized,
    G: GraphSink + ?Sized,
{
    pub fn new(source: &'a S, sink: &'a G) -> Self {
        Self {
            source,
            sink,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Crawl from `root_id` at depth 0.
    pub async fn crawl(&self, root_id: i64) -> Result<CrawlStats> {
        info!(root_id, max_depth = self.max_depth, "Starting crawl");
        let stats = self.process(root_id, 0).await?;
        info!(
            users = stats.users_saved,
            relationships = stats.relationships_saved,
            info_failures = stats.info_failures,
            follower_failures = stats.follower_failures,
            "Crawl complete"
        );
        Ok(stats)
    }

    /// Process `user_id` found at `depth`, then everything reachable from it.
    ///
    /// Fetch failures skip the affected branch and are counted; graph write
    /// failures abort the crawl.
    pub async fn process(&self, user_id: i64, depth: u32) -> Result<CrawlStats> {
        let mut stats = CrawlStats::default();
        if depth > self.max_depth {
            return Ok(stats);
        }

        // Popped in the same order a recursive walk would visit: each follower
        // is explored before its edge to the user is written.
        let mut stack = vec![Work::Visit { user_id, depth }];

        while let Some(work) = stack.pop() {
            match work {
                Work::Visit { user_id, depth } => {
                    let info = match self.source.fetch_user_info(user_id).await {
                        Ok(info) => info,
                        Err(e) => {
                            warn!(user_id, depth, error = %e, "Failed to fetch user info, skipping");
                            stats.info_failures += 1;
                            continue;
                        }
                    };

                    let record = UserRecord::from(&info);
                    self.sink
                        .save_user(&record)
                        .await
                        .with_context(|| format!("Failed to save user {}", record.id))?;
                    stats.users_saved += 1;

                    let followers = match self.source.fetch_followers(user_id).await {
                        Ok(followers) => followers,
                        Err(e) => {
                            warn!(user_id, depth, error = %e, "Failed to fetch followers");
                            stats.follower_failures += 1;
                            Vec::new()
                        }
                    };
                    debug!(user_id, depth, count = followers.len(), "Fetched followers");

                    let next_depth = depth + 1;
                    for &follower_id in followers.iter().rev() {
                        stack.push(Work::Link {
                            followed_id: user_id,
                            follower_id,
                        });
                        if next_depth <= self.max_depth {
                            stack.push(Work::Visit {
                                user_id: follower_id,
                                depth: next_depth,
                            });
                        }
                    }
                }
                Work::Link {
                    followed_id,
                    follower_id,
                } => {
                    self.sink
                        .save_relationship(followed_id, follower_id)
                        .await
                        .with_context(|| {
                            format!("Failed to save relationship {} -> {}", follower_id, followed_id)
                        })?;
                    stats.relationships_saved += 1;
                }
            }
        }

        Ok(stats)
    }
}
