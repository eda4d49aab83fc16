//! Terminal output formatting.

use colored::Colorize;
use vkgraph_core::{CrawlStats, MemoryGraph};

/// Print the counters of a finished crawl.
pub fn print_crawl_summary(root_id: i64, stats: &CrawlStats) {
    println!("\n{} {}", "Crawl complete:".green().bold(), root_id.to_string().cyan());
    println!("  Users saved:             {}", stats.users_saved);
    println!("  Relationships saved:     {}", stats.relationships_saved);

    let failures = |n: usize| {
        if n == 0 {
            n.to_string().dimmed()
        } else {
            n.to_string().yellow()
        }
    };
    println!("  User info failures:      {}", failures(stats.info_failures));
    println!("  Follower list failures:  {}", failures(stats.follower_failures));
}

/// Print the size of an in-memory graph.
pub fn print_memory_graph(graph: &MemoryGraph) {
    println!("{}", "─".repeat(40));
    println!("  Nodes:         {}", graph.node_count().to_string().cyan());
    println!("  Relationships: {}", graph.edge_count().to_string().cyan());
}
