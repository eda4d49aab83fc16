//! # vkgraph Graph
//!
//! Neo4j persistence for the follower graph.
//!
//! Provides the connection client, idempotent upserts for users and
//! `FOLLOWS` edges, schema bootstrap and the fixed analytic reports.

pub mod client;
pub mod queries;
pub mod schema;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use queries::report::{Report, ReportRow, REPORTS, run_all_reports, run_report};
pub use store::GraphStore;
