//! CLI commands

pub mod bucket;
pub mod expand;
pub mod init;
pub mod list;
pub mod order;
pub mod render;
pub mod strategy;
pub mod terms;
