//! Descriptor, report and config types plus the constants they share.
//!
//! ## Purpose
//! - Keep descriptor shapes, report rows and summaries in one place.
//! - Let `services/*` and `commands/*` depend on one set of types.
//! - Make CSV column and JSON output changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs`: descriptor shapes, role assignments, report/output structs.
//! - `constants.rs`: stable constants (default sources, sentinels, filter words).
//!
//! ## Boundaries
//! Nothing here reads files or talks to the network.
//!
//! ## Compatibility note
//! Changes in the row structs change CSV columns consumed by spreadsheets
//! downstream, and `RunSummary` is pinned by `docs/contracts/run_summary.schema.json`.

pub mod constants;
pub mod models;
