use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{
    GridSize, Theme, CELL_WIDTH, GLYPH_EMPTY, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_TARGET,
};
use crate::engine::Snapshot;
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::{render_hud, HUD_HEIGHT};
use crate::ui::menu::render_game_over_menu;

/// What a single grid cell shows.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CellKind {
    Empty,
    Target,
    SnakeHead,
    SnakeBody,
}

/// Classifies `position`; snake segments are drawn over the target.
#[must_use]
pub fn cell_kind(snapshot: &Snapshot, position: Position) -> CellKind {
    if snapshot.head() == Some(position) {
        CellKind::SnakeHead
    } else if snapshot.body.contains(&position) {
        CellKind::SnakeBody
    } else if snapshot.target == position {
        CellKind::Target
    } else {
        CellKind::Empty
    }
}

/// Renders the full frame from a snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, theme: &Theme) {
    let area = frame.area();
    let board = board_size(snapshot.grid);
    let [column] = Layout::horizontal([Constraint::Length(board.0.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [play_area, hud_area] = Layout::vertical([
        Constraint::Length(board.1),
        Constraint::Length(HUD_HEIGHT),
    ])
    .flex(Flex::Center)
    .areas(column);

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_cells(frame, inner, snapshot, theme);
    render_hud(frame, hud_area, snapshot, theme);

    if snapshot.terminal {
        render_game_over_menu(
            frame,
            area,
            snapshot.score,
            snapshot.end_reason,
            theme,
        );
    }
}

fn board_size(grid: GridSize) -> (u16, u16) {
    (
        grid.width.saturating_mul(CELL_WIDTH).saturating_add(2),
        grid.height.saturating_add(2),
    )
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();

    for y in 0..i32::from(snapshot.grid.height) {
        for x in 0..i32::from(snapshot.grid.width) {
            let position = Position { x, y };
            let Some((col, row)) = logical_to_terminal(inner, position) else {
                continue;
            };

            let (glyph, style) = match cell_kind(snapshot, position) {
                CellKind::Empty => (GLYPH_EMPTY, Style::new().fg(theme.hud_muted)),
                CellKind::Target => (
                    GLYPH_TARGET,
                    Style::new().fg(theme.target).add_modifier(Modifier::BOLD),
                ),
                CellKind::SnakeHead => (
                    head_glyph(snapshot.heading),
                    Style::new().fg(theme.snake_head),
                ),
                CellKind::SnakeBody => (GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body)),
            };
            buffer.set_string(col, row, glyph, style);
        }
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::config::{GridSize, THEME_CHARMER};
    use crate::engine::SimulationEngine;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{cell_kind, render, CellKind};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn snake_is_drawn_over_the_target() {
        let engine = SimulationEngine::new_with_seed(GridSize::square(10), 1).with_state(
            Snake::from_segments(vec![Position { x: 3, y: 3 }, Position { x: 3, y: 4 }]),
            Position { x: 3, y: 4 },
        );
        let snapshot = engine.snapshot();

        assert_eq!(cell_kind(&snapshot, Position { x: 3, y: 3 }), CellKind::SnakeHead);
        assert_eq!(cell_kind(&snapshot, Position { x: 3, y: 4 }), CellKind::SnakeBody);
        assert_eq!(cell_kind(&snapshot, Position { x: 0, y: 0 }), CellKind::Empty);
    }

    #[test]
    fn frame_shows_score_and_target() {
        let snapshot = SimulationEngine::new_with_seed(GridSize::square(10), 1).snapshot();
        let mut terminal =
            Terminal::new(TestBackend::new(40, 20)).expect("test backend never fails");

        terminal
            .draw(|frame| render(frame, &snapshot, &THEME_CHARMER))
            .expect("test backend never fails");

        let text = buffer_text(&terminal);
        assert!(text.contains("Score"));
        assert!(text.contains("()"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn terminal_snapshot_shows_game_over() {
        let mut engine = SimulationEngine::new_with_seed(GridSize::square(10), 1).with_state(
            Snake::from_segments(vec![Position { x: 0, y: 0 }, Position { x: 0, y: 1 }]),
            Position { x: 0, y: 5 },
        );
        engine.relocate_target(Direction::Up);
        engine.step();
        let snapshot = engine.snapshot();
        let mut terminal =
            Terminal::new(TestBackend::new(40, 20)).expect("test backend never fails");

        terminal
            .draw(|frame| render(frame, &snapshot, &THEME_CHARMER))
            .expect("test backend never fails");

        assert!(buffer_text(&terminal).contains("GAME OVER"));
    }
}
