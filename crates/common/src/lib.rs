//! Shared building blocks for the workspace: log bootstrap and small wire types.

pub mod types;
pub mod utils;
