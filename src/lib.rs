//! Workspace root package.
//!
//! Carries the shared pre-commit hook configuration; the code lives under
//! `crates/`.
