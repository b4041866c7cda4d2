pub mod config;
pub mod preset;
pub mod report;
pub mod repo;
pub mod scoring;
