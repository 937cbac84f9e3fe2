use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{
    BONUS_FOOD_GROWTH, BONUS_SPAWN_THRESHOLD, GridSize, START_CELL, START_DIRECTION,
};
use crate::events::GameEvent;
use crate::food::{random_cell, BonusFood, FoodKind};
use crate::input::{direction_change_is_valid, Direction};
use crate::snake::{Cell, Snake};

/// Coarse lifecycle of one game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunState {
    /// Built but not yet started; the first start happens once at launch.
    NotStarted,
    Running,
    Ended,
}

/// Why the last game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    pub food: Cell,
    pub bonus: Option<BonusFood>,
    pub score: u32,
    /// Regular foods eaten since the last bonus spawn.
    pub food_streak: u32,
    pub status: RunState,
    pub death_reason: Option<DeathReason>,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from OS entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        let food = random_cell(&mut rng, bounds);

        Self {
            snake: Snake::new(START_CELL),
            direction: START_DIRECTION,
            food,
            bonus: None,
            score: 0,
            food_streak: 0,
            status: RunState::NotStarted,
            death_reason: None,
            bounds,
            rng,
        }
    }

    /// Returns the playfield size.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Puts every entity back to its starting value and enters `Running`.
    ///
    /// Cancelling a pending bonus expiry is the caller's job; this only
    /// drops the bonus itself.
    pub fn reset(&mut self) {
        self.snake = Snake::new(START_CELL);
        self.direction = START_DIRECTION;
        self.food = random_cell(&mut self.rng, self.bounds);
        self.bonus = None;
        self.score = 0;
        self.food_streak = 0;
        self.status = RunState::Running;
        self.death_reason = None;
    }

    /// Changes heading unless `direction` reverses the current one.
    ///
    /// Returns whether the change was accepted. Allowed in any run state;
    /// it only shows once ticks run again.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.direction = direction;
        true
    }

    /// Advances simulation by one gameplay tick and reports what happened.
    ///
    /// The steps run in a fixed order:
    ///
    /// 1. Compute the candidate head one cell ahead.
    /// 2. Leaving the grid ends the game before anything else changes.
    /// 3. Regular food: score, relocate food, count towards the next bonus.
    ///    The tail stays, which is what makes the snake grow by one.
    /// 4. Otherwise bonus food: score and stack two copies of the tail.
    /// 5. Otherwise drop the tail.
    /// 6. Check the candidate against the body left by steps 3-5. On a plain
    ///    move the tail cell has already been vacated, so following the tail
    ///    is legal.
    /// 7. Insert the candidate as the new head.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.status != RunState::Running {
            return events;
        }

        let candidate = self.snake.head().step(self.direction);

        if !candidate.is_within_bounds(self.bounds) {
            self.finish(DeathReason::WallCollision, &mut events);
            return events;
        }

        let mut vacated = None;
        if candidate == self.food {
            events.push(GameEvent::Ate(FoodKind::Normal));
            self.food = random_cell(&mut self.rng, self.bounds);
            self.score += FoodKind::Normal.points();
            self.food_streak += 1;

            if self.food_streak == BONUS_SPAWN_THRESHOLD {
                self.spawn_bonus();
                events.push(GameEvent::BonusAppeared);
                self.food_streak = 0;
            }
        } else if self.bonus.is_some_and(|bonus| bonus.covers(candidate)) {
            events.push(GameEvent::Ate(FoodKind::Bonus));
            self.snake.grow_from_tail(BONUS_FOOD_GROWTH);
            self.score += FoodKind::Bonus.points();
            self.bonus = None;
        } else {
            vacated = self.snake.pop_tail();
        }

        if self.snake.occupies(candidate) {
            // Keep the frozen game-over frame showing the whole body.
            if let Some(tail) = vacated {
                self.snake.push_tail(tail);
            }
            self.finish(DeathReason::SelfCollision, &mut events);
            return events;
        }

        self.snake.push_head(candidate);
        events.push(GameEvent::Render);
        events
    }

    /// Moves a running game to `Ended`.
    ///
    /// Returns false, and changes nothing, when the game is not running, so
    /// a second end never signals twice.
    pub fn end(&mut self, reason: DeathReason) -> bool {
        if self.status != RunState::Running {
            return false;
        }

        self.status = RunState::Ended;
        self.death_reason = Some(reason);
        true
    }

    /// Clears an uneaten bonus food. Returns whether one was present.
    pub fn expire_bonus(&mut self) -> bool {
        self.bonus.take().is_some()
    }

    /// Advances the bonus pulse animation, if a bonus is on the board.
    pub fn advance_bonus_pulse(&mut self) {
        if let Some(bonus) = self.bonus.as_mut() {
            bonus.advance_pulse();
        }
    }

    fn spawn_bonus(&mut self) {
        let position = random_cell(&mut self.rng, self.bounds);
        self.bonus = Some(BonusFood::new(position));
    }

    fn finish(&mut self, reason: DeathReason, events: &mut Vec<GameEvent>) {
        if self.end(reason) {
            events.push(GameEvent::GameOver(reason));
        }
    }
}
