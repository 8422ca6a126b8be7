use super::*;

/// A variant's referee: owns one frame's persistent state and rules on each
/// completed shot.
///
/// Implementors never fail. Bad input degrades to the no-contact foul, and
/// anything submitted after the frame ends gets [`Ruling::frame_over`] with
/// the state left untouched.
pub trait Rules {
    type State;
    fn variant(&self) -> Variant;
    /// Adjudicate one shot, mutating the frame.
    fn shot(&mut self, shot: &Shot) -> Ruling;
    fn state(&self) -> &Self::State;
    fn status(&self) -> &Status;
    /// Legal-target rule for the player about to shoot.
    fn target(&self) -> Target;

    fn turn(&self) -> Player {
        self.status().turn()
    }
    fn is_over(&self) -> bool {
        self.status().is_over()
    }
}
