//! CLI definition and top-level flow.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use vkgraph_api::{VkClient, VkConfig, DEFAULT_API_URL, DEFAULT_API_VERSION};
use vkgraph_core::{FetchError, DEFAULT_MAX_DEPTH};
use vkgraph_graph::{GraphClient, GraphConfig, GraphStore, schema};

pub mod crawl;
pub mod report;

/// Crawl a VK user's follower graph into Neo4j
#[derive(Parser, Debug)]
#[command(name = "vkgraph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// VK user id or screen name to start from
    #[arg(long)]
    pub user: String,

    /// VK API access token
    #[arg(long, env = "VK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// VK method API base URL
    #[arg(long, env = "VK_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// VK API version
    #[arg(long, env = "VK_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "VK_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Neo4j bolt URI
    #[arg(long, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    pub neo4j_uri: String,

    /// Neo4j user
    #[arg(long, env = "NEO4J_USER", default_value = "neo4j")]
    pub neo4j_user: String,

    /// Neo4j password
    #[arg(long, env = "NEO4J_PASSWORD", default_value = "neo4j", hide_env_values = true)]
    pub neo4j_password: String,

    /// Maximum follower depth from the starting user
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub depth: u32,

    /// Skip the reports after crawling
    #[arg(long)]
    pub no_report: bool,

    /// Crawl into memory instead of Neo4j
    #[arg(long)]
    pub dry_run: bool,

    /// Also append logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn vk_config(&self) -> VkConfig {
        VkConfig {
            base_url: self.api_url.clone(),
            token: self.token.clone().filter(|t| !t.is_empty()),
            version: self.api_version.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            uri: self.neo4j_uri.clone(),
            user: self.neo4j_user.clone(),
            password: self.neo4j_password.clone(),
        }
    }

    pub async fn execute(self) -> Result<()> {
        let api = VkClient::new(self.vk_config());

        let root_id = match api.get_user_id(&self.user).await {
            Ok(id) => id,
            // Transport failures are fatal; only an unusable API answer is skipped
            Err(e @ (FetchError::Network(_) | FetchError::Http { .. })) => {
                return Err(e).with_context(|| format!("Failed to resolve user '{}'", self.user));
            }
            Err(e) => {
                error!(user = %self.user, error = %e, "Failed to resolve user id, stopping");
                return Ok(());
            }
        };

        info!(root_id, "Processing user");

        if self.dry_run {
            return crawl::execute_dry_run(&api, root_id, self.depth).await;
        }

        let client = GraphClient::connect(&self.graph_config()).await?;
        schema::initialize_schema(&client).await?;
        let store = GraphStore::new(client);

        crawl::execute(&api, &store, root_id, self.depth).await?;

        if !self.no_report {
            report::execute(&store).await?;
        }

        Ok(())
    }
}
