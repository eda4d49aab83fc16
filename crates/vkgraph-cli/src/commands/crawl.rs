//! Crawl command.

use anyhow::Result;
use colored::Colorize;

use vkgraph_api::VkClient;
use vkgraph_core::{Crawler, MemoryGraph};
use vkgraph_graph::GraphStore;

use crate::output;

/// Crawl from `root_id` into Neo4j.
pub async fn execute(api: &VkClient, store: &GraphStore, root_id: i64, depth: u32) -> Result<()> {
    println!("{}", format!("Crawling followers of {}...", root_id).bold());

    let stats = Crawler::new(api, store).with_max_depth(depth).crawl(root_id).await?;

    output::print_crawl_summary(root_id, &stats);
    Ok(())
}

/// Crawl from `root_id` into an in-memory graph; nothing is persisted.
pub async fn execute_dry_run(api: &VkClient, root_id: i64, depth: u32) -> Result<()> {
    println!("{}", format!("Dry run: crawling followers of {}...", root_id).bold());

    let graph = MemoryGraph::new();
    let stats = Crawler::new(api, &graph).with_max_depth(depth).crawl(root_id).await?;

    output::print_crawl_summary(root_id, &stats);
    output::print_memory_graph(&graph);
    Ok(())
}
