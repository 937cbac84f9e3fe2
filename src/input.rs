use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// High-level input intents consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    Quit,
}

/// One polled terminal event, before pointer hits are resolved against the
/// on-screen control pad.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RawInput {
    Game(GameInput),
    Click { column: u16, row: u16 },
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Maps a key press to a game intent. Arrows and WASD steer.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Restart,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Maps a mouse event to a click position. Only left-button presses count.
#[must_use]
pub fn map_mouse(mouse: MouseEvent) -> Option<RawInput> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(RawInput::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

/// Waits up to `timeout` for the next relevant terminal event.
pub fn poll_input(timeout: Duration) -> io::Result<Option<RawInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    let raw = match event::read()? {
        // Release and repeat events are reported on some platforms; act on presses only.
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key).map(RawInput::Game),
        Event::Mouse(mouse) => map_mouse(mouse),
        _ => None,
    };

    Ok(raw)
}
