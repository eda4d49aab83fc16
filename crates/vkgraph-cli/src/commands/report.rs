//! Report command.

use anyhow::Result;
use tracing::info;

use vkgraph_graph::{GraphStore, run_all_reports};

/// Run the fixed reports, then log overall database counts.
pub async fn execute(store: &GraphStore) -> Result<()> {
    run_all_reports(store).await?;

    let counts = store.client().get_counts().await?;
    info!(nodes = counts.nodes, relationships = counts.relationships, "Graph totals");
    Ok(())
}
