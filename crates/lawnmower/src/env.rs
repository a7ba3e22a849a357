use crate::error::Result;
use crate::grid::Observation;
use std::fmt;

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoneReason {
    StepsExceeded,
    Collision,
    AllMowed,
}

impl DoneReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DoneReason::StepsExceeded => "Steps exceeded",
            DoneReason::Collision => "Collision with obstacle",
            DoneReason::AllMowed => "All mowed",
        }
    }
}

impl fmt::Display for DoneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Auxiliary step information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Info {
    pub done_reason: Option<DoneReason>,
}

/// Outcome of a single [`Env::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
    pub info: Info,
}

/// Reinforcement learning environment trait.
///
/// Modelled on the classic Gym interface: [`reset`] starts an episode and
/// [`step`] advances it by one discrete action until a transition reports
/// `done`. Stepping a finished episode is an error until the next reset.
///
/// [`reset`]: Env::reset
/// [`step`]: Env::step
pub trait Env {
    /// Reset the environment to a fresh episode and return the initial observation.
    fn reset(&mut self) -> Observation;

    /// Advance the environment by one action index.
    ///
    /// # Errors
    ///
    /// Fails without touching state when the episode is not running or the
    /// action index is out of range.
    fn step(&mut self, action: usize) -> Result<Transition>;

    /// Shape of the observation grid, `(width, height)`.
    fn obs_shape(&self) -> (usize, usize);

    /// Number of discrete actions.
    fn action_size(&self) -> usize;
}
