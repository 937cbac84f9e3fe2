use std::time::Duration;

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::Theme;
use crate::game::GameState;

/// Rows the HUD occupies above the board.
pub const HUD_HEIGHT: u16 = 1;

/// Supplemental values displayed by the HUD row.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudInfo {
    /// Time left on the bonus food, when one is on the board.
    pub bonus_remaining: Option<Duration>,
}

/// Renders the score on the left and the bonus countdown on the right.
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    info: HudInfo,
    theme: &Theme,
) {
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Min(0)]).areas(area);

    frame.render_widget(
        Paragraph::new(score_line(state.score, theme)).alignment(Alignment::Left),
        left,
    );

    if let Some(remaining) = info.bonus_remaining {
        frame.render_widget(
            Paragraph::new(bonus_line(remaining, theme)).alignment(Alignment::Right),
            right,
        );
    }
}

fn score_line(score: u32, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("Score: ", Style::new().fg(theme.hud_muted)),
        Span::styled(
            score.to_string(),
            Style::new()
                .fg(theme.hud_score)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn bonus_line(remaining: Duration, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("Bonus ", Style::new().fg(theme.hud_muted)),
        Span::styled(
            format_countdown(remaining),
            Style::new().fg(theme.bonus_food),
        ),
    ])
}

/// Formats a countdown with one decimal, e.g. `4.3s`.
fn format_countdown(remaining: Duration) -> String {
    format!("{:.1}s", remaining.as_secs_f32())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::format_countdown;

    #[test]
    fn countdown_uses_one_decimal() {
        assert_eq!(format_countdown(Duration::from_millis(6000)), "6.0s");
        assert_eq!(format_countdown(Duration::from_millis(4300)), "4.3s");
        assert_eq!(format_countdown(Duration::ZERO), "0.0s");
    }
}
