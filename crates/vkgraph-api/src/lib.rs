//! # vkgraph API
//!
//! Client for the VK method API: handle lookup, profile fields and follower
//! lists. Implements [`vkgraph_core::UserSource`].

pub mod client;
mod response;

pub use client::{VkClient, VkConfig, DEFAULT_API_URL, DEFAULT_API_VERSION, USER_FIELDS};
