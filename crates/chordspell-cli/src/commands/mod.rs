//! CLI command implementations

pub mod equivalents;
pub mod export;
pub mod inversions;
pub mod json_output;
pub mod list;
pub mod show;
pub mod transpose;
pub mod validate;

mod reporting;
