pub mod ansi;
pub mod listing;
pub mod paths;
pub mod report;
pub mod time;

#[cfg(test)]
mod paths_test;
