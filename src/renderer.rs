use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::config::CELL_WIDTH;
use crate::food::Food;
use crate::game::GameState;
use crate::grid::{GridSize, Position};
use crate::snake::Snake;

const GLYPH_CELL: &str = "██";
const GLYPH_FOOD: &str = "●";

/// Something that knows how to paint itself onto the board.
pub trait Drawable {
    fn draw(&self, board: &mut Board<'_>);
}

/// Paints logical cells into the terminal buffer area inside the border.
#[derive(Debug)]
pub struct Board<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
    bounds: GridSize,
}

impl<'a> Board<'a> {
    #[must_use]
    pub fn new(buffer: &'a mut Buffer, area: Rect, bounds: GridSize) -> Self {
        Self {
            buffer,
            area,
            bounds,
        }
    }

    /// Paints `glyph` at `position`. Cells that fall outside the visible area
    /// are skipped.
    pub fn paint(&mut self, position: Position, glyph: &str, style: Style) {
        if let Some((x, y)) = logical_to_terminal(self.area, self.bounds, position) {
            self.buffer.set_string(x, y, glyph, style);
        }
    }
}

impl Drawable for Snake {
    fn draw(&self, board: &mut Board<'_>) {
        let head = self.head();
        for segment in self.segments().skip(1) {
            board.paint(*segment, GLYPH_CELL, Style::new().fg(Color::Green));
        }
        board.paint(
            head,
            GLYPH_CELL,
            Style::new()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        );
    }
}

impl Drawable for Food {
    fn draw(&self, board: &mut Board<'_>) {
        board.paint(self.position, GLYPH_FOOD, Style::new().fg(Color::Red));
    }
}

/// Renders the full game frame from immutable state.
pub fn render<R>(frame: &mut Frame<'_>, state: &GameState<R>) {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let bounds = state.bounds();
    let play_area = fit_play_area(play_area, bounds);
    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(Color::Cyan));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    let mut board = Board::new(frame.buffer_mut(), inner, bounds);
    let drawables: [&dyn Drawable; 2] = [&state.food, &state.snake];
    for drawable in drawables {
        drawable.draw(&mut board);
    }

    frame.render_widget(Paragraph::new(hud_line(state)), hud_area);
}

fn hud_line<R>(state: &GameState<R>) -> Line<'static> {
    Line::from(format!(
        " length {}  eaten {}  resets {}  [arrows/WASD] move  [Q] quit",
        state.snake.len(),
        state.collectibles_eaten,
        state.resets
    ))
    .style(Style::new().fg(Color::DarkGray))
}

/// Shrinks `area` to the bordered size of the grid, keeping its top-left corner.
fn fit_play_area(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds
        .width
        .saturating_mul(CELL_WIDTH)
        .saturating_add(2)
        .min(area.width);
    let height = bounds.height.saturating_add(2).min(area.height);
    Rect::new(area.x, area.y, width, height)
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !bounds.contains(position) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
