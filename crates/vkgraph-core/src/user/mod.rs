//! Users of the social network.

pub mod model;
