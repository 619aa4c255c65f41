use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::Theme;
use crate::engine::Snapshot;

/// Height of the HUD strip below the play area.
pub const HUD_HEIGHT: u16 = 2;

/// Renders score/length and the controls hint into `area`.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let [score_row, hint_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(score_line(snapshot, theme)).alignment(Alignment::Center),
        score_row,
    );

    let hint = if snapshot.terminal {
        "[R] restart  [Q] quit"
    } else {
        "arrows/WASD move the target"
    };
    frame.render_widget(
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .style(Style::new().fg(theme.hud_muted)),
        hint_row,
    );
}

fn score_line<'a>(snapshot: &Snapshot, theme: &Theme) -> Line<'a> {
    let label = Style::new().fg(theme.hud_muted);
    let value = Style::new()
        .fg(theme.hud_score)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("Score ", label),
        Span::styled(snapshot.score.to_string(), value),
        Span::styled("  Length ", label),
        Span::styled(snapshot.body.len().to_string(), value),
    ])
}
