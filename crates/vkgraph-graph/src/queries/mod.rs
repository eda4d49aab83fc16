//! Read-only queries over the follower graph.

pub mod report;
