#![forbid(unsafe_code)]
//! Directory listing with aligned long, columnar, and single-column layouts.

pub mod cli;
pub mod config;
pub mod error;
pub mod humanize;
pub mod listing;
pub mod metadata;
pub mod render;
pub mod terminal;
pub mod tree;
pub mod width;
