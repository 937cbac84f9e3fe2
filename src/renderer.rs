use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{
    BORDER_HALF_BLOCK, CELL_WIDTH, GLYPH_BONUS_PULSE, GLYPH_CELL, GridSize, Theme,
};
use crate::food::BonusFood;
use crate::game::{GameState, RunState};
use crate::snake::Cell;
use crate::ui::controls::{render_control_pad, ControlPad, CONTROL_PAD_HEIGHT};
use crate::ui::hud::{render_hud, HudInfo, HUD_HEIGHT};
use crate::ui::menu::render_game_over_menu;

/// Renders the full game frame from immutable state.
///
/// Returns where the control pad landed so clicks can be resolved against
/// the frame the player is looking at.
pub fn render(
    frame: &mut Frame<'_>,
    state: &GameState,
    hud_info: HudInfo,
    theme: &Theme,
) -> ControlPad {
    let [hud_area, board_area, pad_area] = frame_layout(frame.area(), state.bounds());

    render_hud(frame, hud_area, state, hud_info, theme);

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);
    frame.render_widget(Block::new().style(Style::new().bg(theme.play_bg)), inner);

    render_snake(frame, inner, state, theme);
    render_food(frame, inner, state, theme);
    if let Some(bonus) = state.bonus {
        render_bonus(frame, inner, state.bounds(), bonus, theme);
    }

    if state.status == RunState::Ended {
        render_game_over_menu(frame, board_area, state.score, state.death_reason, theme);
    }

    render_control_pad(frame, pad_area, theme)
}

/// Splits the screen into HUD, bordered board and control pad, centred.
#[must_use]
pub fn frame_layout(area: Rect, bounds: GridSize) -> [Rect; 3] {
    let board_width = bounds.width.saturating_mul(CELL_WIDTH).saturating_add(2);
    let board_height = bounds.height.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(board_width)])
        .flex(Flex::Center)
        .areas(area);

    Layout::vertical([
        Constraint::Length(HUD_HEIGHT),
        Constraint::Length(board_height),
        Constraint::Length(CONTROL_PAD_HEIGHT),
    ])
    .flex(Flex::Center)
    .areas(column)
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let style = Style::new().fg(theme.snake).bg(theme.play_bg);
    let buffer = frame.buffer_mut();

    for segment in state.snake.segments() {
        if let Some((x, y)) = cell_to_terminal(inner, state.bounds(), *segment) {
            buffer.set_string(x, y, GLYPH_CELL, style);
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = cell_to_terminal(inner, state.bounds(), state.food) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_CELL, Style::new().fg(theme.food).bg(theme.play_bg));
}

fn render_bonus(
    frame: &mut Frame<'_>,
    inner: Rect,
    bounds: GridSize,
    bonus: BonusFood,
    theme: &Theme,
) {
    let glyph = pulse_glyph(bonus.pulse_factor());
    let style = Style::new().fg(theme.bonus_food).bg(theme.play_bg);
    let buffer = frame.buffer_mut();

    // Footprint cells past the last row or column are simply not drawn.
    for cell in bonus.footprint() {
        if let Some((x, y)) = cell_to_terminal(inner, bounds, cell) {
            buffer.set_string(x, y, glyph, style);
        }
    }
}

/// Maps a pulse factor in `[0.6, 1.0]` to a glyph of matching density.
fn pulse_glyph(factor: f32) -> &'static str {
    let steps = GLYPH_BONUS_PULSE.len();
    let scaled = ((factor - 0.6) / 0.4 * steps as f32).floor();
    let index = (scaled.max(0.0) as usize).min(steps - 1);
    GLYPH_BONUS_PULSE[index]
}

fn cell_to_terminal(inner: Rect, bounds: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !cell.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
