//! Learning shot advisor for UK blackball.
//!
//! [`Advisor::select`] enumerates candidate shots for the shooter's colour,
//! scores each by expected value, and returns a [`Plan`]. Callers report
//! what actually happened through [`Advisor::record`]; the outcomes land in
//! a shared [`ShotMemory`] and pull later pot estimates toward experience.
//!
//! ## Candidates
//!
//! - [`pots`] — visible own balls into their best-viewed pocket
//! - [`banks`] — object ball off a cushion, used when no direct pot exists
//! - [`free_balls`] — nominated ball with the cue placed behind it
//! - [`kicks`] — cushion escapes onto balls the cue cannot see
//! - [`gentle`] — soft contact on the nearest own ball
//!
//! ## Evaluation
//!
//! - [`Judge`] — pot chance, position value, foul risk, safety value
//! - [`rollout`] — discrete stroke-to-resting-point table
//! - [`Memory`] — bounded learned success rates keyed by [`Bucket`]
mod advisor;
mod candidate;
mod evaluation;
mod memory;
mod params;
mod plan;
mod rules;
mod state;

pub use advisor::*;
pub use candidate::*;
pub use evaluation::*;
pub use memory::*;
pub use params::*;
pub use plan::*;
pub use rules::*;
pub use state::*;
