use std::time::{Duration, Instant};

use crate::audio::AudioSink;
use crate::config::{BONUS_FOOD_LIFETIME, TICK_INTERVAL};
use crate::events::GameEvent;
use crate::food::FoodKind;
use crate::game::{GameState, RunState};
use crate::input::Direction;
use crate::scheduler::{Fired, Scheduler, TimerHandle};

/// Owns the game state together with the timers that drive it.
///
/// The tick interval and the bonus expiry are plain handles into the
/// scheduler; every transition that makes one obsolete cancels it
/// explicitly, so a stale callback never reaches the state.
pub struct Controller {
    state: GameState,
    scheduler: Scheduler,
    tick_timer: Option<TimerHandle>,
    bonus_timer: Option<TimerHandle>,
    audio: Box<dyn AudioSink>,
    events: Vec<GameEvent>,
}

impl Controller {
    #[must_use]
    pub fn new(state: GameState, audio: Box<dyn AudioSink>) -> Self {
        Self {
            state,
            scheduler: Scheduler::new(),
            tick_timer: None,
            bonus_timer: None,
            audio,
            events: Vec::new(),
        }
    }

    /// Read access for rendering.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for tests and scripted setups.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Returns true while the tick interval is armed.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.tick_timer
            .is_some_and(|handle| self.scheduler.is_active(handle))
    }

    /// Time until the current bonus food expires, if one is on the board.
    #[must_use]
    pub fn bonus_remaining(&self, now: Instant) -> Option<Duration> {
        self.bonus_timer
            .and_then(|handle| self.scheduler.remaining(handle, now))
    }

    /// Begins the first game. Only effective before anything has started.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.state.status != RunState::NotStarted {
            return false;
        }

        log::info!("game started");
        self.begin(now);
        true
    }

    /// Starts a fresh game after the previous one ended; a no-op otherwise.
    pub fn restart(&mut self, now: Instant) -> bool {
        if self.state.status != RunState::Ended {
            return false;
        }

        log::info!("game restarted");
        self.begin(now);
        true
    }

    /// Forwards a steering intent. Reversals are dropped by the state.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        let accepted = self.state.change_direction(direction);
        if !accepted {
            log::trace!("ignored reversal to {direction:?}");
        }
        accepted
    }

    /// Runs every timer that has come due by `now`, in deadline order.
    pub fn advance(&mut self, now: Instant) {
        while let Some(fired) = self.scheduler.next_due(now) {
            self.dispatch(fired);
        }
    }

    /// Takes the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn begin(&mut self, now: Instant) {
        self.cancel_bonus_timer();
        if let Some(handle) = self.tick_timer.take() {
            self.scheduler.cancel(handle);
        }

        self.state.reset();
        self.tick_timer = Some(self.scheduler.start_interval(now, TICK_INTERVAL));
        self.events.push(GameEvent::Render);
    }

    fn dispatch(&mut self, fired: Fired) {
        if Some(fired.handle) == self.tick_timer {
            // The frame drawn after a spawn shows phase 0; older bonuses step on.
            self.state.advance_bonus_pulse();
            let events = self.state.tick();
            for event in events {
                self.handle_event(event, fired.at);
            }
        } else if Some(fired.handle) == self.bonus_timer {
            self.bonus_timer = None;
            if self.state.expire_bonus() {
                log::debug!("bonus food expired");
                self.emit(GameEvent::BonusExpired);
            }
        } else {
            log::warn!("dropping unowned timer {:?}", fired.handle);
        }
    }

    fn handle_event(&mut self, event: GameEvent, at: Instant) {
        match event {
            GameEvent::BonusAppeared => {
                self.cancel_bonus_timer();
                self.bonus_timer = Some(self.scheduler.start_oneshot(at, BONUS_FOOD_LIFETIME));
                log::debug!("bonus food spawned at {:?}", self.state.bonus);
            }
            GameEvent::Ate(FoodKind::Bonus) => {
                self.cancel_bonus_timer();
            }
            GameEvent::GameOver(reason) => {
                self.end();
                log::info!("game over ({reason:?}), score {}", self.state.score);
            }
            GameEvent::Ate(FoodKind::Normal) | GameEvent::BonusExpired | GameEvent::Render => {}
        }

        self.emit(event);
    }

    /// Stops the tick interval and any pending bonus expiry.
    fn end(&mut self) {
        if let Some(handle) = self.tick_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.cancel_bonus_timer();
    }

    fn cancel_bonus_timer(&mut self) {
        if let Some(handle) = self.bonus_timer.take() {
            self.scheduler.cancel(handle);
            log::debug!("bonus expiry cancelled");
        }
    }

    fn emit(&mut self, event: GameEvent) {
        if let Some(cue) = event.audio_cue() {
            self.audio.play(cue);
        }
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::audio::{AudioCue, RecordingSink};
    use crate::config::{GridSize, BONUS_FOOD_LIFETIME, START_CELL, TICK_INTERVAL};
    use crate::events::GameEvent;
    use crate::food::BonusFood;
    use crate::game::{DeathReason, GameState, RunState};
    use crate::input::Direction;
    use crate::snake::{Cell, Snake};

    use super::Controller;

    const BOUNDS: GridSize = GridSize {
        width: 20,
        height: 12,
    };

    fn started(seed: u64) -> (Controller, RecordingSink, Instant) {
        let audio = RecordingSink::default();
        let mut controller = Controller::new(
            GameState::new_with_seed(BOUNDS, seed),
            Box::new(audio.clone()),
        );
        let t0 = Instant::now();
        assert!(controller.start(t0));
        controller.state_mut().food = Cell { x: 19, y: 11 };
        (controller, audio, t0)
    }

    fn ticks(count: u32) -> Duration {
        TICK_INTERVAL * count
    }

    /// Steers a short snake heading right around a 2×2 loop, one turn per
    /// tick, until the next tick would land after `until`.
    fn circle(controller: &mut Controller, mut now: Instant, until: Instant) {
        let turns = [
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Right,
        ];

        for turn in turns.iter().cycle() {
            if now + TICK_INTERVAL > until {
                break;
            }
            assert!(controller.change_direction(*turn));
            now += TICK_INTERVAL;
            controller.advance(now);
        }
    }

    #[test]
    fn start_runs_once() {
        let (mut controller, _, t0) = started(1);

        assert_eq!(controller.state().status, RunState::Running);
        assert!(controller.is_ticking());
        assert!(!controller.start(t0));
        assert_eq!(controller.drain_events(), vec![GameEvent::Render]);
    }

    #[test]
    fn ticks_follow_the_interval() {
        let (mut controller, _, t0) = started(1);

        controller.advance(t0 + ticks(1) - Duration::from_millis(1));
        assert_eq!(controller.state().snake.head(), START_CELL);

        controller.advance(t0 + ticks(3));
        assert_eq!(controller.state().snake.head(), Cell { x: 8, y: 5 });
    }

    #[test]
    fn direction_change_between_ticks_applies_to_next_tick() {
        let (mut controller, _, t0) = started(1);

        controller.advance(t0 + ticks(1));
        assert!(controller.change_direction(Direction::Down));
        assert!(!controller.change_direction(Direction::Up));
        controller.advance(t0 + ticks(2));

        assert_eq!(controller.state().snake.head(), Cell { x: 6, y: 6 });
    }

    #[test]
    fn wall_collision_stops_ticking_and_signals_once() {
        let (mut controller, audio, t0) = started(2);
        controller.state_mut().snake = Snake::new(Cell { x: 0, y: 3 });
        controller.state_mut().direction = Direction::Left;
        controller.drain_events();

        controller.advance(t0 + ticks(5));

        assert_eq!(controller.state().status, RunState::Ended);
        assert!(!controller.is_ticking());
        assert_eq!(
            controller.drain_events(),
            vec![GameEvent::GameOver(DeathReason::WallCollision)]
        );
        assert_eq!(audio.cues(), vec![AudioCue::GameOver]);
        assert_eq!(controller.state().snake.head(), Cell { x: 0, y: 3 });
    }

    #[test]
    fn restart_only_after_game_over() {
        let (mut controller, _, t0) = started(3);
        assert!(!controller.restart(t0));

        controller.state_mut().snake = Snake::new(Cell { x: 19, y: 3 });
        controller.state_mut().score = 9;
        controller.advance(t0 + ticks(1));
        assert_eq!(controller.state().status, RunState::Ended);

        let t1 = t0 + ticks(10);
        assert!(controller.restart(t1));

        let state = controller.state();
        assert_eq!(state.status, RunState::Running);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), START_CELL);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert!(state.bonus.is_none());
        assert!(controller.is_ticking());

        controller.state_mut().food = Cell { x: 19, y: 11 };
        controller.advance(t1 + ticks(1));
        assert_eq!(controller.state().snake.head(), Cell { x: 6, y: 5 });
    }

    #[test]
    fn seventh_food_arms_the_bonus_expiry() {
        let (mut controller, audio, t0) = started(4);
        controller.state_mut().food_streak = 6;
        controller.state_mut().food = Cell { x: 6, y: 5 };

        controller.advance(t0 + ticks(1));

        assert!(controller.state().bonus.is_some());
        assert_eq!(audio.cues(), vec![AudioCue::Eat, AudioCue::Appear]);
        assert_eq!(
            controller.bonus_remaining(t0 + ticks(1)),
            Some(BONUS_FOOD_LIFETIME)
        );
    }

    #[test]
    fn uneaten_bonus_expires_without_score_change() {
        let (mut controller, _, t0) = started(5);
        controller.state_mut().food_streak = 6;
        controller.state_mut().food = Cell { x: 6, y: 5 };
        controller.advance(t0 + ticks(1));

        // Keep the snake clear of the bonus while the lifetime runs out.
        controller.state_mut().bonus = Some(BonusFood::new(Cell { x: 0, y: 0 }));
        controller.state_mut().food = Cell { x: 19, y: 0 };
        controller.drain_events();

        let spawned_at = t0 + ticks(1);
        let expires_at = spawned_at + BONUS_FOOD_LIFETIME;
        circle(&mut controller, spawned_at, expires_at - Duration::from_millis(1));
        assert_eq!(controller.state().status, RunState::Running);
        assert!(controller.state().bonus.is_some());

        controller.advance(expires_at);
        assert_eq!(controller.state().status, RunState::Running);
        assert!(controller.state().bonus.is_none());
        assert_eq!(controller.state().score, 1);
        assert!(controller.drain_events().contains(&GameEvent::BonusExpired));
        assert_eq!(controller.bonus_remaining(expires_at), None);
    }

    #[test]
    fn eating_bonus_cancels_its_expiry() {
        let (mut controller, audio, t0) = started(6);
        controller.state_mut().food_streak = 6;
        controller.state_mut().food = Cell { x: 6, y: 5 };
        controller.advance(t0 + ticks(1));

        controller.state_mut().bonus = Some(BonusFood::new(Cell { x: 7, y: 4 }));
        controller.state_mut().food = Cell { x: 19, y: 11 };
        controller.advance(t0 + ticks(2));

        assert!(controller.state().bonus.is_none());
        assert_eq!(controller.state().score, 3);
        assert_eq!(controller.state().snake.len(), 5);
        assert_eq!(controller.bonus_remaining(t0 + ticks(2)), None);
        assert_eq!(
            audio.cues(),
            vec![AudioCue::Eat, AudioCue::Appear, AudioCue::Eat]
        );
    }

    #[test]
    fn expiry_from_a_previous_game_never_clears_a_new_bonus() {
        let (mut controller, _, t0) = started(7);
        controller.state_mut().food_streak = 6;
        controller.state_mut().food = Cell { x: 6, y: 5 };
        controller.advance(t0 + ticks(1));
        assert!(controller.bonus_remaining(t0 + ticks(1)).is_some());

        // Crash straight away; the ended game must drop its bonus timer.
        controller.state_mut().snake = Snake::new(Cell { x: 19, y: 5 });
        controller.advance(t0 + ticks(2));
        assert_eq!(controller.state().status, RunState::Ended);
        assert_eq!(controller.bonus_remaining(t0 + ticks(2)), None);

        let t1 = t0 + ticks(3);
        assert!(controller.restart(t1));
        controller.state_mut().bonus = Some(BonusFood::new(Cell { x: 0, y: 10 }));
        controller.state_mut().food = Cell { x: 19, y: 11 };

        // Run past the old expiry deadline within the new game.
        let old_deadline = t0 + ticks(1) + BONUS_FOOD_LIFETIME;
        circle(&mut controller, t1, old_deadline + Duration::from_millis(1));
        controller.advance(old_deadline + Duration::from_millis(1));

        assert_eq!(controller.state().status, RunState::Running);
        assert!(controller.state().bonus.is_some());
    }

    #[test]
    fn each_tick_advances_the_bonus_pulse() {
        let (mut controller, _, t0) = started(8);
        controller.state_mut().bonus = Some(BonusFood::new(Cell { x: 0, y: 0 }));
        controller.change_direction(Direction::Down);

        controller.advance(t0 + ticks(3));

        assert_eq!(
            controller.state().bonus.map(|bonus| bonus.pulse_phase),
            Some(3)
        );
    }

    #[test]
    fn fresh_bonus_is_drawn_at_pulse_phase_zero() {
        let (mut controller, _, t0) = started(9);
        controller.state_mut().food_streak = 6;
        controller.state_mut().food = Cell { x: 6, y: 5 };

        controller.advance(t0 + ticks(1));
        assert_eq!(
            controller.state().bonus.map(|bonus| bonus.pulse_phase),
            Some(0)
        );

        // Park the bonus away from the head so the next tick cannot eat it.
        if let Some(bonus) = controller.state_mut().bonus.as_mut() {
            bonus.position = Cell { x: 0, y: 0 };
        }
        controller.state_mut().food = Cell { x: 19, y: 11 };
        controller.advance(t0 + ticks(2));
        assert_eq!(
            controller.state().bonus.map(|bonus| bonus.pulse_phase),
            Some(1)
        );
    }

    #[test]
    fn second_spawn_replaces_the_pending_expiry() {
        let (mut controller, _, t0) = started(10);
        controller.state_mut().food_streak = 6;
        controller.state_mut().food = Cell { x: 6, y: 5 };
        controller.advance(t0 + ticks(1));
        assert!(controller.state().bonus.is_some());

        // Another seventh food while the first bonus is still live.
        controller.state_mut().food_streak = 6;
        controller.state_mut().food = Cell { x: 7, y: 5 };
        controller.state_mut().bonus = Some(BonusFood::new(Cell { x: 0, y: 0 }));
        let second_spawn = t0 + ticks(2);
        controller.advance(second_spawn);
        assert_eq!(
            controller.bonus_remaining(second_spawn),
            Some(BONUS_FOOD_LIFETIME)
        );

        // Keep the snake and both foods apart while the first lifetime runs out.
        controller.state_mut().bonus = Some(BonusFood::new(Cell { x: 0, y: 0 }));
        controller.state_mut().food = Cell { x: 19, y: 11 };

        let first_deadline = t0 + ticks(1) + BONUS_FOOD_LIFETIME;
        let past_first = first_deadline + Duration::from_millis(1);
        circle(&mut controller, second_spawn, past_first);
        controller.advance(past_first);

        assert_eq!(controller.state().status, RunState::Running);
        assert!(controller.state().bonus.is_some());
        assert_eq!(
            controller.bonus_remaining(past_first),
            Some(second_spawn + BONUS_FOOD_LIFETIME - past_first)
        );
    }
}
