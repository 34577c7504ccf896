use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{EntityTag, FoodKind, GameSession, Owner, Position, GRID_HEIGHT, GRID_WIDTH};
use crate::metrics::GameMetrics;

/// Extra text shown around the board
pub struct HudInfo<'a> {
    pub player_name: &'a str,
    pub metrics: &'a GameMetrics,
    /// Mode-specific status, e.g. playback speed
    pub status: Option<String>,
    /// Controls line at the bottom
    pub controls: Vec<Span<'static>>,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, session: &GameSession, hud: &HudInfo) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(session, hud);
        frame.render_widget(stats, chunks[0]);

        let board_area = centered(chunks[1], (GRID_WIDTH * 2 + 2) as u16, (GRID_HEIGHT + 2) as u16);
        let board = self.render_board(session);
        frame.render_widget(board, board_area);

        if session.is_lost() {
            let popup = centered(board_area, 40, 9);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(session), popup);
        }

        let controls = Paragraph::new(Line::from(hud.controls.clone())).alignment(Alignment::Center);
        frame.render_widget(controls, chunks[2]);
    }

    /// Screen asking for the player's name before the first game
    pub fn render_name_entry(&self, frame: &mut Frame, name: &str) {
        let area = centered(frame.area(), 44, 7);
        let text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter your name: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{}_", name),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "And press Enter to play.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let widget = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Snake Rival "),
        );
        frame.render_widget(widget, area);
    }

    fn render_board(&self, session: &GameSession) -> Paragraph<'_> {
        // Later entities overwrite earlier ones on shared cells
        let occupied: HashMap<Position, EntityTag> = session.entities().collect();
        let mut lines = Vec::with_capacity(GRID_HEIGHT as usize);

        for y in 0..GRID_HEIGHT {
            let spans: Vec<Span> = (0..GRID_WIDTH)
                .map(|x| cell_span(occupied.get(&Position::new(x, y))))
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake Rival "),
        )
    }

    fn render_stats(&self, session: &GameSession, hud: &HudInfo) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Player: ", label),
            Span::styled(hud.player_name.to_string(), value),
            Span::raw("    "),
            Span::styled("Score: ", label),
            Span::styled(
                session.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(hud.metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(hud.metrics.format_high_score(), value),
        ];
        if let Some(status) = &hud.status {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(status.clone(), Style::default().fg(Color::Cyan)));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, session: &GameSession) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn owner_color(owner: Owner) -> Color {
    match owner {
        Owner::Player => Color::White,
        Owner::Enemy => Color::Blue,
    }
}

fn food_color(kind: FoodKind) -> Color {
    match kind {
        FoodKind::Strawberry => Color::Red,
        FoodKind::Banana => Color::Yellow,
        FoodKind::Grape => Color::Magenta,
    }
}

fn cell_span(tag: Option<&EntityTag>) -> Span<'static> {
    match tag {
        Some(EntityTag::Head(owner)) => Span::styled(
            "■ ",
            Style::default()
                .fg(owner_color(*owner))
                .add_modifier(Modifier::BOLD),
        ),
        Some(EntityTag::Body(owner)) => {
            Span::styled("□ ", Style::default().fg(owner_color(*owner)))
        }
        Some(EntityTag::Food(kind)) => Span::styled(
            "● ",
            Style::default()
                .fg(food_color(*kind))
                .add_modifier(Modifier::BOLD),
        ),
        Some(EntityTag::Obstacle) => Span::styled("▓▓", Style::default().fg(Color::Green)),
        None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
    }
}

/// A `width` x `height` rect centered in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        assert_eq!(centered(area, 82, 42), Rect::new(9, 4, 82, 42));
        // Larger than the area gets clipped
        assert_eq!(centered(area, 200, 10), Rect::new(0, 20, 100, 10));
    }

    #[test]
    fn test_cell_span_styles() {
        let grape = cell_span(Some(&EntityTag::Food(FoodKind::Grape)));
        assert_eq!(grape.style.fg, Some(Color::Magenta));

        let enemy = cell_span(Some(&EntityTag::Body(Owner::Enemy)));
        assert_eq!(enemy.style.fg, Some(Color::Blue));

        let empty = cell_span(None);
        assert_eq!(empty.content, ". ");
    }
}
