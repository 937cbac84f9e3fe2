use ratatui::layout::{Alignment, Position as ScreenPosition, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::Theme;
use crate::input::{Direction, GameInput};

const BUTTON_WIDTH: u16 = 5;
const BUTTON_GAP: u16 = 1;

/// Rows the control pad occupies below the board.
pub const CONTROL_PAD_HEIGHT: u16 = 3;

/// Screen rectangles of the clickable control pad, laid out as a cross:
///
/// ```text
///       [ ▲ ]
/// [ ◀ ] [ ● ] [ ▶ ]
///       [ ▼ ]
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ControlPad {
    pub up: Rect,
    pub down: Rect,
    pub left: Rect,
    pub right: Rect,
    /// Centre button; restarts after a game over.
    pub select: Rect,
}

impl ControlPad {
    /// Places the pad centred inside `area`, clipped to it.
    #[must_use]
    pub fn layout(area: Rect) -> Self {
        let center_x = area.x + area.width / 2;
        let column = center_x.saturating_sub(BUTTON_WIDTH / 2);
        let side_offset = BUTTON_WIDTH + BUTTON_GAP;

        let button = |x: u16, row: u16| {
            Rect {
                x,
                y: area.y.saturating_add(row),
                width: BUTTON_WIDTH,
                height: 1,
            }
            .intersection(area)
        };

        Self {
            up: button(column, 0),
            left: button(column.saturating_sub(side_offset), 1),
            select: button(column, 1),
            right: button(column.saturating_add(side_offset), 1),
            down: button(column, 2),
        }
    }

    /// Resolves a click to the intent of the button under it.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> Option<GameInput> {
        let point = ScreenPosition::new(column, row);

        self.buttons()
            .into_iter()
            .find(|(rect, _, _)| rect.contains(point))
            .map(|(_, _, input)| input)
    }

    fn buttons(&self) -> [(Rect, &'static str, GameInput); 5] {
        [
            (self.up, "[ ▲ ]", GameInput::Direction(Direction::Up)),
            (self.left, "[ ◀ ]", GameInput::Direction(Direction::Left)),
            (self.select, "[ ● ]", GameInput::Restart),
            (self.right, "[ ▶ ]", GameInput::Direction(Direction::Right)),
            (self.down, "[ ▼ ]", GameInput::Direction(Direction::Down)),
        ]
    }
}

/// Draws the control pad and returns its layout for click hit-testing.
pub fn render_control_pad(frame: &mut Frame<'_>, area: Rect, theme: &Theme) -> ControlPad {
    let pad = ControlPad::layout(area);
    let style = Style::new().fg(theme.button_fg).add_modifier(Modifier::BOLD);

    for (rect, label, _) in pad.buttons() {
        if rect.is_empty() {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label)
                .alignment(Alignment::Center)
                .style(style),
            rect,
        );
    }

    pad
}
