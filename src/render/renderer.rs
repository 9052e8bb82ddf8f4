use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::error::EngineError;
use crate::game::{ActorId, ActorKind, Bounds, Canvas, Glyph, Surface};
use crate::metrics::{SessionMetrics, format_duration};
use crate::session::{SessionSummary, StopReason};

const HEADER_ROWS: u16 = 1;
const FOOTER_ROWS: u16 = 1;
const BORDER: u16 = 2;

/// Smallest playable surface
pub const MIN_SURFACE_WIDTH: u16 = 20;
pub const MIN_SURFACE_HEIGHT: u16 = 12;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Size of the surface that fits a terminal area once the header,
    /// footer and border are taken out. One terminal cell per grid cell.
    pub fn surface_bounds(area: Rect) -> Result<Bounds, EngineError> {
        let width = area.width.saturating_sub(BORDER);
        let height = area.height.saturating_sub(HEADER_ROWS + FOOTER_ROWS + BORDER);

        if width < MIN_SURFACE_WIDTH || height < MIN_SURFACE_HEIGHT {
            return Err(EngineError::SurfaceTooSmall {
                width: area.width,
                height: area.height,
                min_width: MIN_SURFACE_WIDTH + BORDER,
                min_height: MIN_SURFACE_HEIGHT + HEADER_ROWS + FOOTER_ROWS + BORDER,
            });
        }
        Ok(Bounds::new(width as i32, height as i32))
    }

    pub fn render(&self, frame: &mut Frame, canvas: &Canvas, metrics: &SessionMetrics) {
        let chunks = Self::layout(frame.area());

        frame.render_widget(self.render_controls(), chunks[0]);
        frame.render_widget(self.render_grid(canvas), chunks[1]);
        frame.render_widget(self.render_stats(metrics), chunks[2]);
    }

    pub fn render_game_over(&self, frame: &mut Frame, summary: &SessionSummary) {
        let chunks = Self::layout(frame.area());

        frame.render_widget(self.render_controls(), chunks[0]);
        frame.render_widget(self.render_summary(summary), chunks[1]);
    }

    fn layout(area: Rect) -> std::rc::Rc<[Rect]> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_ROWS), // Header
                Constraint::Min(0),              // Surface
                Constraint::Length(FOOTER_ROWS), // Footer
            ])
            .split(area)
    }

    fn render_grid(&self, canvas: &Canvas) -> Paragraph<'_> {
        let lines: Vec<Line> = (0..canvas.bounds().height)
            .map(|y| {
                let spans: Vec<Span> = canvas.row(y).iter().map(|cell| glyph_span(*cell)).collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake Duel "),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Player: ", Style::default().fg(Color::Yellow)),
            Span::styled("arrows/WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            Span::styled("Bot: ", Style::default().fg(Color::Yellow)),
            Span::styled("auto", Style::default().fg(Color::Magenta)),
            Span::raw(" | "),
            Span::styled("q", Style::default().fg(Color::Red)),
            Span::raw(" - quit"),
        ])];

        Paragraph::new(text)
    }

    fn render_stats(&self, metrics: &SessionMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Ticks: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.player_ticks.to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_summary(&self, summary: &SessionSummary) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(
                stop_reason_text(summary.reason),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
        ];

        for report in &summary.actors {
            text.push(Line::from(vec![
                Span::styled(
                    format!("{} length: ", capitalize(&actor_label(report.id, report.kind))),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    report.trail_len.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(format_duration(summary.elapsed), Style::default().fg(Color::White)),
        ]));
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Press any key to exit",
            Style::default().fg(Color::Gray),
        )));

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

fn glyph_span(cell: Option<Glyph>) -> Span<'static> {
    match cell {
        Some(glyph @ Glyph::PlayerHead) => Span::styled(
            glyph.symbol().to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Some(glyph @ Glyph::BotHead) => Span::styled(
            glyph.symbol().to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Some(glyph @ Glyph::Body) => {
            Span::styled(glyph.symbol().to_string(), Style::default().fg(Color::Green))
        }
        None => Span::raw(" "),
    }
}

fn actor_label(id: ActorId, kind: ActorKind) -> String {
    match kind {
        ActorKind::Player => "player".to_string(),
        ActorKind::Bot => format!("bot {id}"),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One-line description of how the session ended
pub fn stop_reason_text(reason: Option<StopReason>) -> String {
    let label = |id: ActorId| {
        if id == ActorId::PLAYER {
            actor_label(id, ActorKind::Player)
        } else {
            actor_label(id, ActorKind::Bot)
        }
    };

    match reason {
        Some(StopReason::Quit) | None => "Quit".to_string(),
        Some(StopReason::Collision(collision)) => format!(
            "{} crashed into {} at ({}, {})",
            capitalize(&label(collision.actor)),
            label(collision.other),
            collision.at.x,
            collision.at.y
        ),
        Some(StopReason::Fault { actor }) => {
            format!("{} stopped on an error", capitalize(&label(actor)))
        }
        Some(StopReason::Poisoned) => "A control loop panicked".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ActorReport, Collision, Position};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use std::time::Duration;

    fn buffer_lines(buffer: &Buffer) -> Vec<String> {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    #[test]
    fn test_surface_bounds_subtracts_chrome() {
        let bounds = Renderer::surface_bounds(Rect::new(0, 0, 80, 24)).unwrap();
        assert_eq!(bounds, Bounds::new(78, 20));
    }

    #[test]
    fn test_surface_bounds_rejects_tiny_terminal() {
        let err = Renderer::surface_bounds(Rect::new(0, 0, 10, 5)).unwrap_err();
        assert!(matches!(err, EngineError::SurfaceTooSmall { .. }));
    }

    #[test]
    fn test_render_places_glyphs_inside_border() {
        let area = Rect::new(0, 0, 30, 18);
        let bounds = Renderer::surface_bounds(area).unwrap();
        let mut canvas = Canvas::new(bounds);
        canvas.draw_glyph(Position::new(0, 0), Glyph::PlayerHead);
        canvas.draw_glyph(Position::new(4, 3), Glyph::BotHead);
        canvas.draw_glyph(Position::new(5, 3), Glyph::Body);

        let mut terminal = Terminal::new(TestBackend::new(area.width, area.height)).unwrap();
        let renderer = Renderer::new();
        let metrics = SessionMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, &canvas, &metrics))
            .unwrap();

        let lines = buffer_lines(terminal.backend().buffer());
        // header row 0, top border row 1, surface starts at (1, 2)
        assert!(lines[0].starts_with("Player:"));
        assert_eq!(lines[2].chars().nth(1), Some('@'));
        assert_eq!(lines[5].chars().nth(5), Some('B'));
        assert_eq!(lines[5].chars().nth(6), Some('*'));
        assert!(lines[17].contains("Ticks: 0"));
    }

    #[test]
    fn test_render_game_over_lists_lengths() {
        let summary = SessionSummary {
            reason: Some(StopReason::Quit),
            actors: vec![
                ActorReport {
                    id: ActorId::PLAYER,
                    kind: ActorKind::Player,
                    trail_len: 4,
                },
                ActorReport {
                    id: ActorId(1),
                    kind: ActorKind::Bot,
                    trail_len: 4,
                },
            ],
            ticks: 12,
            elapsed: Duration::from_secs(3),
        };

        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        let renderer = Renderer::new();
        terminal
            .draw(|frame| renderer.render_game_over(frame, &summary))
            .unwrap();

        let screen = buffer_lines(terminal.backend().buffer()).join("\n");
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Player length: 4"));
        assert!(screen.contains("Bot #1 length: 4"));
    }

    #[test]
    fn test_stop_reason_text() {
        assert_eq!(stop_reason_text(Some(StopReason::Quit)), "Quit");

        let crash = StopReason::Collision(Collision {
            actor: ActorId(1),
            other: ActorId::PLAYER,
            at: Position::new(3, 4),
        });
        assert_eq!(
            stop_reason_text(Some(crash)),
            "Bot #1 crashed into player at (3, 4)"
        );

        let player_crash = StopReason::Collision(Collision {
            actor: ActorId::PLAYER,
            other: ActorId(2),
            at: Position::new(0, 0),
        });
        assert_eq!(
            stop_reason_text(Some(player_crash)),
            "Player crashed into bot #2 at (0, 0)"
        );
        assert_eq!(
            stop_reason_text(Some(StopReason::Poisoned)),
            "A control loop panicked"
        );
    }
}
