//! User and `FOLLOWS` persistence.

use anyhow::{Context, Result};
use async_trait::async_trait;
use neo4rs::{BoltNull, BoltType, Query, Row};
use tracing::debug;

use vkgraph_core::{GraphSink, UserRecord};

use crate::GraphClient;

/// Upsert one `User` node by id and overwrite its five attributes.
pub(crate) const UPSERT_USER: &str = "MERGE (u:User {id: $id})
     SET u.name = $name,
         u.screen_name = $screen_name,
         u.sex = $sex,
         u.home_town = $home_town,
         u.city = $city";

/// Link follower to followed. The followed node must exist; the follower is
/// merged bare if absent.
pub(crate) const UPSERT_FOLLOWS: &str = "MATCH (u:User {id: $user_id})
     MERGE (f:User {id: $follower_id})
     MERGE (f)-[:FOLLOWS]->(u)";

/// Absent values are stored as null, which leaves the property unset.
fn nullable<T: Into<BoltType>>(value: Option<T>) -> BoltType {
    value.map(Into::into).unwrap_or(BoltType::Null(BoltNull))
}

/// Graph writes and ad-hoc reads over a shared [`GraphClient`].
#[derive(Clone)]
pub struct GraphStore {
    client: GraphClient,
}

impl GraphStore {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GraphClient {
        &self.client
    }

    /// Create or update the `User` node for `user.id`.
    pub async fn save_user(&self, user: &UserRecord) -> Result<()> {
        let query = Query::new(UPSERT_USER.to_string())
            .param("id", user.id)
            .param("name", user.name.as_str())
            .param("screen_name", nullable(user.screen_name.as_deref()))
            .param("sex", nullable(user.sex))
            .param("home_town", nullable(user.home_town.as_deref()))
            .param("city", nullable(user.city.as_deref()));

        self.client.execute(query).await?;
        debug!(user_id = user.id, "Saved user");
        Ok(())
    }

    /// Merge a `FOLLOWS` edge from `follower_id` to `followed_id`.
    ///
    /// Silently writes nothing when `followed_id` has no node yet.
    pub async fn save_relationship(&self, followed_id: i64, follower_id: i64) -> Result<()> {
        let query = Query::new(UPSERT_FOLLOWS.to_string())
            .param("user_id", followed_id)
            .param("follower_id", follower_id);

        self.client.execute(query).await?;
        debug!(followed_id, follower_id, "Saved relationship");
        Ok(())
    }

    /// Run an arbitrary read query and return all rows.
    pub async fn query(&self, cypher: &str) -> Result<Vec<Row>> {
        self.client
            .query(Query::new(cypher.to_string()))
            .await
            .with_context(|| format!("Query failed: {}", cypher.trim()))
    }
}

#[async_trait]
impl GraphSink for GraphStore {
    async fn save_user(&self, user: &UserRecord) -> Result<()> {
        GraphStore::save_user(self, user).await
    }

    async fn save_relationship(&self, followed_id: i64, follower_id: i64) -> Result<()> {
        GraphStore::save_relationship(self, followed_id, follower_id).await
    }
}
