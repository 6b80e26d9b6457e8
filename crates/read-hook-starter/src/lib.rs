//! read-hook-starter - project-local settings for the read hook
//!
//! The hook's settings live in `.claude/settings.example.json` with `$PWD`
//! standing in for the project root, because hook commands need absolute
//! paths. This crate turns that template into `.claude/settings.local.json`
//! for the checkout it is run in.
//!
//! It is literally "replace `$PWD`, check it is JSON, write it out."

pub mod config;
pub mod error;
pub mod init;
pub mod placeholder;

pub use config::InitConfig;
pub use error::InitError;
pub use init::{render, run, InitOutcome, Rendered};
pub use placeholder::{SubstitutionMode, PWD_PLACEHOLDER};
