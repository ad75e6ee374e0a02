//! Report logic: descriptor parsing, affiliation resolution, CSV output.
//!
//! ## Service map
//! - `affiliations.rs`: affiliation dataset loading (login -> current company).
//! - `resolver.rs`: live-profile/dataset precedence for one login.
//! - `classify.rs`: alias name -> (group, subproject, role).
//! - `owners.rs`: OWNERS / ALIASES descriptors -> role assignments.
//! - `report.rs`: exclusion filter + CSV report writer.
//! - `reconcile.rs`: completed-descriptor set for merging auxiliary lists.
//! - `canonical.rs`: descriptor URL expansion and canonical identity.
//! - `pipeline.rs`: report orchestration and per-item failure policy.
//! - `emails.rs`: voter contact email discovery.
//! - `search.rs`: paced code search for descriptor files.
//! - `registry.rs`: governance registry listings.
//! - `config.rs` / `credentials.rs`: configuration file and token loading.
//! - `storage.rs`: dated output paths and plain file writes.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible; network access goes through
//!   `fetch::Fetcher` or the `github::GitHubApi` trait.
//! - Per-item failures are logged and counted, never propagated.
//! - Handlers in `commands/*` only parse arguments and print results.

pub mod affiliations;
pub mod canonical;
pub mod classify;
pub mod config;
pub mod credentials;
pub mod emails;
pub mod output;
pub mod owners;
pub mod pipeline;
pub mod reconcile;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod search;
pub mod storage;
