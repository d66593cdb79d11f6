pub mod columns;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod metadata;
pub mod output;
pub mod prefixes;
pub mod taxonomy;
pub mod turtle;
