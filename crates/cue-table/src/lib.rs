//! Table geometry shared by the rule engines' callers and both planners.
//!
//! - [`Point`] — positions and displacements on the cloth
//! - [`Table`] — dimensions, ball radius, pockets, and spatial queries
//! - [`Rail`] / [`Mouth`] — cushion and pocket labels
//! - [`obstructs`], [`cut`], [`view`], [`ghost`] — line-of-sight and aiming primitives
mod point;
mod rail;
mod sight;
mod table;

pub use point::*;
pub use rail::*;
pub use sight::*;
pub use table::*;
