//! Referees for four cue-sports variants.
//!
//! Each engine owns one frame's persistent state and turns a completed
//! [`Shot`] (first contacts, potted balls, a few boolean events) into a
//! [`Ruling`]: legality, foul reason, who plays next, ball in hand, and
//! whether the frame is over.
//!
//! ## Balls and Variants
//!
//! - [`Ball`] / [`Colour`] / [`Group`] — ball identity and group membership
//! - [`Variant`] — American 8-ball, 9-ball, UK blackball, snooker
//! - [`Rack`] — bitmask of numbered balls on the table
//!
//! ## Adjudication
//!
//! - [`Rules`] — the shared referee interface
//! - [`American`], [`NineBall`], [`UkPool`], [`Snooker`] — the engines
//! - [`Frame`] — any engine behind one type, built from a [`Config`]
//! - [`Reason`] — foul and frame-state codes
//! - [`Target`] — which balls are legal for the player about to shoot
mod american;
mod ball;
mod config;
mod frame;
mod nineball;
mod player;
mod rack;
mod reason;
mod rules;
mod ruling;
mod shot;
mod snooker;
mod target;
mod ukpool;
mod variant;

pub use american::*;
pub use ball::*;
pub use config::*;
pub use frame::*;
pub use nineball::*;
pub use player::*;
pub use rack::*;
pub use reason::*;
pub use rules::*;
pub use ruling::*;
pub use shot::*;
pub use snooker::*;
pub use target::*;
pub use ukpool::*;
pub use variant::*;
