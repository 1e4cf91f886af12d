//! `circ-core` — foundational types for the circuit simulation workspace.
//!
//! This crate is a dependency of every other `circ-*` crate.  It has no
//! `circ-*` dependencies and only a handful of external ones (`thiserror`,
//! `serde`, `toml`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ComponentId`                                         |
//! | [`time`]        | `Tick`                                                |
//! | [`config`]      | `CircuitConfig` (TOML-loadable)                       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::CircuitConfig;
pub use error::{CoreError, CoreResult};
pub use ids::ComponentId;
pub use time::Tick;
