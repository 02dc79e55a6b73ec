//! Tagwise Core Library
//!
//! Tag recommendation engine for workspace projects and folders. Candidate
//! tags are scored by content similarity, co-occurrence with the tags already
//! applied, the acting user's recent tagging pattern and workspace popularity.

pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod signals;
pub mod store;
pub mod text;
pub mod vector;
