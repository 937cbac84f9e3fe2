use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;

use crate::input::Direction;
use crate::snake::Cell;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

/// Fixed playfield size. The grid never changes while the process runs.
pub const GRID: GridSize = GridSize {
    width: 40,
    height: 20,
};

/// Head position of a freshly reset snake.
pub const START_CELL: Cell = Cell { x: 5, y: 5 };

/// Heading of a freshly reset snake.
pub const START_DIRECTION: Direction = Direction::Right;

/// Period of the main tick interval.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// How long an uneaten bonus food stays on the board.
pub const BONUS_FOOD_LIFETIME: Duration = Duration::from_millis(6000);

/// Regular foods that must be eaten before a bonus food spawns.
pub const BONUS_SPAWN_THRESHOLD: u32 = 7;

/// Points for a regular food.
pub const NORMAL_FOOD_POINTS: u32 = 1;

/// Points for a bonus food.
pub const BONUS_FOOD_POINTS: u32 = 2;

/// Segments added when a bonus food is eaten.
pub const BONUS_FOOD_GROWTH: usize = 2;

/// Phase step of the bonus pulse animation, in radians per frame.
pub const BONUS_PULSE_RATE: f32 = 0.2;

/// How long the main loop waits for input before servicing timers again.
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Terminal columns used to draw one grid cell. Two columns keep cells square.
pub const CELL_WIDTH: u16 = 2;

/// Glyph for a filled grid cell.
pub const GLYPH_CELL: &str = "██";

/// Glyphs for the bonus food, from smallest to largest pulse size.
pub const GLYPH_BONUS_PULSE: [&str; 3] = ["▒▒", "▓▓", "██"];

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    /// Background of empty play-area cells.
    pub play_bg: Color,
    pub snake: Color,
    pub food: Color,
    pub bonus_food: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
    pub button_fg: Color,
}

/// Sage board with dark snake and red bonus food.
pub const THEME: Theme = Theme {
    play_bg: Color::Rgb(143, 188, 143),
    snake: Color::Black,
    food: Color::Rgb(0, 100, 0),
    bonus_food: Color::Red,
    border_fg: Color::Rgb(143, 188, 143),
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Red,
    button_fg: Color::Gray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};
