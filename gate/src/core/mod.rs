//! Pure, deterministic logic. Nothing in here touches the filesystem.

pub mod artifact;
pub mod checklist;
pub mod digest;
pub mod types;
