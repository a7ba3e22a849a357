use anyhow::Result;
use lawnmower::{Cell, Env, Observation, Transition};
use serde::Serialize;

/// Uniform random policy over the discrete action space.
pub struct RandomAgent {
    rng: fastrand::Rng,
    action_size: usize,
}

impl RandomAgent {
    #[must_use]
    pub fn new(seed: u64, action_size: usize) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            action_size,
        }
    }

    pub fn act(&mut self, _obs: &Observation) -> usize {
        self.rng.usize(..self.action_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub steps: usize,
    pub total_reward: f32,
    pub done_reason: Option<String>,
    pub mowed_fraction: f32,
}

/// Share of the lawn (mowed plus remaining grass) that has been mowed.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn mowed_fraction(obs: &Observation) -> f32 {
    let mowed = obs.count(Cell::Mowed);
    let lawn = mowed + obs.count(Cell::Grass);
    if lawn == 0 {
        1.0
    } else {
        mowed as f32 / lawn as f32
    }
}

/// Plays one episode from `reset` to termination.
///
/// `on_step` sees every transition along with its 1-based step number.
///
/// # Errors
///
/// Propagates any environment error; with a well-behaved agent there are none.
pub fn run_episode<E, F>(
    env: &mut E,
    agent: &mut RandomAgent,
    episode: usize,
    mut on_step: F,
) -> Result<EpisodeSummary>
where
    E: Env,
    F: FnMut(usize, &Transition),
{
    let mut obs = env.reset();
    let mut steps = 0;
    let mut total_reward = 0.0;
    loop {
        let action = agent.act(&obs);
        let transition = env.step(action)?;
        steps += 1;
        total_reward += transition.reward;
        on_step(steps, &transition);
        if transition.done {
            return Ok(EpisodeSummary {
                episode,
                steps,
                total_reward,
                done_reason: transition.info.done_reason.map(|r| r.to_string()),
                mowed_fraction: mowed_fraction(&transition.observation),
            });
        }
        obs = transition.observation;
    }
}
