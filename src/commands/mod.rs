//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `reports.rs` : owners/kk-aliases/istio/merge-owners (CSV reports).
//! - `lookups.rs` : find-files/voter-emails/voter-case/sigs.
//!
//! ## Principles
//! - Parse/match CLI inputs here, prompting for missing positionals.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod lookups;
pub mod reports;

pub use lookups::handle_lookup_commands;
pub use reports::handle_report_commands;
