use crate::config::{Config, Rewards, TURN_LIMIT};
use crate::env::{DoneReason, Env, Info, Transition};
use crate::error::{LawnError, Result};
use crate::grid::{Grid, Observation};
use crate::types::{Action, Cell, Direction, MowerState, Position, ACTION_SPACE_SIZE};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Mutable state of one episode. Exists only between `reset` and the next `reset`.
#[derive(Debug, Clone)]
struct Episode {
    grid: Grid,
    mower: MowerState,
    current_step: usize,
    turn_count: usize,
    grass_left: usize,
    terminated: bool,
}

impl Episode {
    /// Applies `action` and returns its reward plus the termination reason, if any.
    fn apply(&mut self, action: Action, rewards: &Rewards) -> (f32, Option<DoneReason>) {
        match action {
            Action::Forward => self.forward(rewards),
            Action::TurnLeft => self.turn(self.mower.heading.turned_left(), rewards),
            Action::TurnRight => self.turn(self.mower.heading.turned_right(), rewards),
        }
    }

    fn forward(&mut self, rewards: &Rewards) -> (f32, Option<DoneReason>) {
        let target = self
            .mower
            .position
            .step(self.mower.heading)
            .filter(|&p| self.grid.contains(p));
        let Some(target) = target else {
            return (rewards.obstacle_collision, Some(DoneReason::Collision));
        };
        let was_grass = match self.grid.get(target) {
            Cell::Grass => true,
            Cell::Mowed => false,
            // turn counter is left unchanged on collision
            Cell::Obstacle | Cell::Mower(_) => {
                return (rewards.obstacle_collision, Some(DoneReason::Collision));
            }
        };

        self.grid.set(self.mower.position, Cell::Mowed);
        self.grid.set(target, Cell::Mower(self.mower.heading));
        self.mower.position = target;
        self.turn_count = 0;

        if !was_grass {
            return (rewards.not_mowed, None);
        }
        self.grass_left -= 1;
        if self.grass_left == 0 {
            (rewards.all_mowed, Some(DoneReason::AllMowed))
        } else {
            (rewards.mowed, None)
        }
    }

    fn turn(&mut self, heading: Direction, rewards: &Rewards) -> (f32, Option<DoneReason>) {
        self.mower.heading = heading;
        self.grid.set(self.mower.position, Cell::Mower(heading));
        self.turn_count += 1;
        if self.turn_count > TURN_LIMIT {
            (rewards.too_many_turns, None)
        } else {
            (rewards.turn_in_place, None)
        }
    }
}

/// The lawnmower environment.
///
/// A rectangular grid bordered by obstacles, with optional obstacles placed
/// at random inside. The mower mows every grass cell it drives onto and is
/// destroyed when it drives into an obstacle. Episodes end when the lawn is
/// fully mowed, on collision, or when the step budget runs out.
///
/// Randomness comes from a generator owned by the instance, so two worlds
/// built with the same seed and configuration replay identical episodes.
#[derive(Debug, Clone)]
pub struct GridWorld {
    config: Config,
    rng: StdRng,
    episode: Option<Episode>,
}

impl GridWorld {
    /// Creates a world seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`LawnError::Configuration`] if the grid is smaller than 3x3,
    /// too large to allocate, or the obstacles would leave no free interior
    /// cell for the mower.
    pub fn new(
        width: usize,
        height: usize,
        obstacle_number: usize,
        max_steps: usize,
    ) -> Result<Self> {
        Self::from_config(Config::new(width, height, obstacle_number, max_steps))
    }

    /// # Errors
    ///
    /// Returns [`LawnError::Configuration`] if `config` fails validation.
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::from_entropy(),
            episode: None,
        })
    }

    /// Creates a world whose episodes are reproducible from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`LawnError::Configuration`] if `config` fails validation.
    pub fn with_seed(config: Config, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            episode: None,
        })
    }

    /// Re-seeds the generator used by subsequent resets.
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Starts a new episode: bordered grass grid, randomly spawned mower,
    /// then `obstacle_number` obstacles on distinct remaining grass cells.
    pub fn reset(&mut self) -> Observation {
        let (width, height) = (self.config.width, self.config.height);
        let obstacle_number = self.config.obstacle_number;
        let mut grid = Grid::new_bordered(width, height);

        let x = self.rng.gen_range(1..width - 1);
        let y = self.rng.gen_range(1..height - 1);
        let position = Position::new(x, y);
        let heading = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        grid.set(position, Cell::Mower(heading));

        let candidates: Vec<Position> = grid
            .interior_positions()
            .filter(|&p| grid.get(p) == Cell::Grass)
            .collect();
        for &pos in candidates.choose_multiple(&mut self.rng, obstacle_number) {
            grid.set(pos, Cell::Obstacle);
        }

        let grass_left = grid.count(Cell::Grass);
        debug!(
            x = position.x,
            y = position.y,
            ?heading,
            obstacles = obstacle_number,
            grass_left,
            "episode reset"
        );

        let observation = Observation::snapshot(&grid);
        self.episode = Some(Episode {
            grid,
            mower: MowerState { position, heading },
            current_step: 0,
            turn_count: 0,
            grass_left,
            terminated: false,
        });
        observation
    }

    /// Advances the running episode by one action.
    ///
    /// The step counter is checked before the action: the `max_steps`-th
    /// call ends the episode without applying its action.
    ///
    /// # Errors
    ///
    /// Returns [`LawnError::NotReset`] if no episode is running, either
    /// because `reset` was never called or because the last one terminated.
    pub fn step_action(&mut self, action: Action) -> Result<Transition> {
        let rewards = self.config.rewards;
        let max_steps = self.config.max_steps;
        let episode = match self.episode.as_mut() {
            Some(episode) if !episode.terminated => episode,
            _ => return Err(LawnError::NotReset),
        };

        episode.current_step += 1;
        let (reward, done_reason) = if episode.current_step == max_steps {
            (rewards.exceeded, Some(DoneReason::StepsExceeded))
        } else {
            episode.apply(action, &rewards)
        };
        trace!(step = episode.current_step, ?action, reward, "step");

        let done = done_reason.is_some();
        if let Some(reason) = done_reason {
            episode.terminated = true;
            debug!(step = episode.current_step, %reason, "episode terminated");
        }

        Ok(Transition {
            observation: Observation::snapshot(&episode.grid),
            reward,
            done,
            info: Info { done_reason },
        })
    }

    /// Snapshot of the current grid.
    ///
    /// Unlike `step`, this keeps working after the episode terminates: the
    /// final grid stays readable until the next `reset`, and the terminating
    /// transition itself carries this same snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`LawnError::NotReset`] only before the first `reset`, never
    /// for a terminated episode.
    pub fn observe(&self) -> Result<Observation> {
        Ok(Observation::snapshot(&self.episode()?.grid))
    }

    /// One glyph per cell, each followed by a space, one line per row:
    /// `.` grass, blank mowed, `X` obstacle, `^ > v <` the mower.
    ///
    /// Like [`GridWorld::observe`], a terminated episode can still be rendered.
    ///
    /// # Errors
    ///
    /// Returns [`LawnError::NotReset`] only before the first `reset`, never
    /// for a terminated episode.
    pub fn render_text(&self) -> Result<String> {
        Ok(self.episode()?.grid.render_text())
    }

    /// # Errors
    ///
    /// Returns [`LawnError::NotReset`] before the first `reset`.
    pub fn mower(&self) -> Result<MowerState> {
        Ok(self.episode()?.mower)
    }

    /// Steps taken in the current episode, `0` before the first reset.
    #[must_use]
    pub fn current_step(&self) -> usize {
        self.episode.as_ref().map_or(0, |e| e.current_step)
    }

    /// Consecutive turns since the mower last moved.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.episode.as_ref().map_or(0, |e| e.turn_count)
    }

    /// Grass cells not yet mowed.
    #[must_use]
    pub fn grass_left(&self) -> usize {
        self.episode.as_ref().map_or(0, |e| e.grass_left)
    }

    #[must_use]
    pub fn is_reset(&self) -> bool {
        self.episode.is_some()
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.episode.as_ref().is_some_and(|e| e.terminated)
    }

    #[must_use]
    pub fn describe(&self) -> String {
        let c = &self.config;
        format!(
            "Lawnmower environment.\n  Grid size: {}, {}\n  Obstacles: {}\n  Max-steps: {}\n",
            c.width, c.height, c.obstacle_number, c.max_steps
        )
    }

    fn episode(&self) -> Result<&Episode> {
        self.episode.as_ref().ok_or(LawnError::NotReset)
    }
}

impl Env for GridWorld {
    fn reset(&mut self) -> Observation {
        GridWorld::reset(self)
    }

    fn step(&mut self, action: usize) -> Result<Transition> {
        let action = Action::try_from(action)?;
        self.step_action(action)
    }

    fn obs_shape(&self) -> (usize, usize) {
        (self.config.width, self.config.height)
    }

    fn action_size(&self) -> usize {
        ACTION_SPACE_SIZE
    }
}
