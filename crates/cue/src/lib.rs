//! Cue-sports toolkit: referees and shot planners.
//!
//! This facade crate re-exports every cue crate for convenient access.
//!
//! ## Crate Organization
//!
//! ### Foundations
//! - [`core`] — Type aliases, tuning constants, and shared traits
//! - [`table`] — Table geometry and line-of-sight tests
//!
//! ### Adjudication
//! - [`rules`] — American 8-ball, 9-ball, UK blackball, and snooker referees
//!
//! ### Planning
//! - [`planner`] — Monte Carlo planner for every variant
//! - [`learning`] — Learning advisor for UK blackball

pub use cue_core     as core;
pub use cue_table    as table;
pub use cue_rules    as rules;
pub use cue_planner  as planner;
pub use cue_learning as learning;

// Re-export commonly used types at the root
pub use cue_core::*;
