//! Basic shot planner for every variant.
//!
//! Given a read-only table [`Snapshot`] and the shooter's legal-target rule,
//! [`plan_shot`] proposes a [`Decision`] within an optional time budget.
//!
//! ## Inputs
//!
//! - [`AimRequest`] — variant, target rule, snapshot, ball in hand, seed, budget
//! - [`Snapshot`] / [`Placed`] — ball arena; [`Diff`] — hypothetical continuation
//! - [`PlannerConfig`] — power and spin grid, weights, limits
//!
//! ## Search
//!
//! - [`Pair`] — feasible (target, pocket) pairing with its ghost point
//! - [`pot_chance`] — seeded Monte Carlo pot estimate
//! - [`rest`] — analytic cue-ball resting point
//! - [`runout`] — depth-limited clearance lookahead
//! - [`Deadline`] — cooperative wall-clock budget
mod candidate;
mod config;
mod deadline;
mod decision;
mod montecarlo;
mod planner;
mod request;
mod rollout;
mod runout;
mod snapshot;

pub use candidate::*;
pub use config::*;
pub use deadline::*;
pub use decision::*;
pub use montecarlo::*;
pub use planner::*;
pub use request::*;
pub use rollout::*;
pub use runout::*;
pub use snapshot::*;
