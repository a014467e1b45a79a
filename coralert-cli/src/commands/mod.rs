//! CLI command implementations.

pub mod advisories;
pub mod clear;
pub mod common;
pub mod config;
pub mod init;
pub mod put;
pub mod status;
