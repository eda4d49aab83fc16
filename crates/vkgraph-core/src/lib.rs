//! vkgraph Core Library
//!
//! Domain models, fetch errors and the follower-graph crawler.
//!
//! The crawler is written against two seams: [`UserSource`] for the remote
//! social API and [`GraphSink`] for the graph database.

pub mod crawl;
pub mod error;
pub mod user;

pub use crawl::{CrawlStats, Crawler, GraphSink, MemoryGraph, UserSource, DEFAULT_MAX_DEPTH};
pub use error::{FetchError, FetchResult};
pub use user::model::{City, UserInfo, UserRecord};
