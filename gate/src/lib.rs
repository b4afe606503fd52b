//! Deterministic verification steps for gating a CI run.
//!
//! Three stateless steps, each invoked once per workflow step by an external
//! orchestrator:
//!
//! - **hash**: expands glob patterns per named category and computes a
//!   SHA-256 cache key over the matched files' contents.
//! - **artifact**: reports whether a build artifact exists, is executable,
//!   and how large it is.
//! - **report**: folds task presence and artifact validity into a pass/fail
//!   summary.
//!
//! The split mirrors the usual pure/impure boundary:
//!
//! - **[`core`]**: Pure, deterministic logic (digest composition, match
//!   ordering, report aggregation). No I/O.
//! - **[`io`]**: Filesystem access, configuration, step input and output.
//!
//! Step modules ([`hash`], [`artifact`], [`report`]) coordinate the two to
//! implement the CLI subcommands.

pub mod artifact;
pub mod core;
pub mod error;
pub mod exit_codes;
pub mod hash;
pub mod io;
pub mod logging;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
