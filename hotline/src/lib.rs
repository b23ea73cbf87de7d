pub mod args;
pub mod config;
pub mod error;
pub mod file_index;
pub mod format;
pub mod hotness;
pub mod listing;
pub mod logging;
pub mod navigate;
pub mod patterns;
pub mod process;
pub(crate) mod profile;
pub mod query;
pub mod report;
pub mod resolve;
pub mod units;

#[cfg(test)]
mod patterns_test;
#[cfg(test)]
mod resolve_test;
