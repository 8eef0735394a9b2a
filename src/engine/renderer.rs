/// Draws the table: whose turn it is, the thinking indicator, and key hints
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::turn::TurnCoordinator;

const MAX_DOTS: usize = 5;
const FRAMES_PER_STEP: usize = 10;

/// Cycles 1..=5 dots, one step every 10 frames while someone is thinking
#[derive(Debug, Clone)]
pub struct ThinkingIndicator {
    frame: usize,
    dots: usize,
}

impl Default for ThinkingIndicator {
    fn default() -> Self {
        Self { frame: 0, dots: 1 }
    }
}

impl ThinkingIndicator {
    pub fn tick(&mut self) {
        if self.frame % FRAMES_PER_STEP == 0 {
            self.dots = self.dots % MAX_DOTS + 1;
        }
        self.frame += 1;
    }

    /// Restart the frame count; called when a turn changes hands
    pub fn reset(&mut self) {
        self.frame = 0;
    }

    pub fn dots(&self) -> String {
        ".".repeat(self.dots)
    }
}

pub fn render(frame: &mut Frame, table: &TurnCoordinator, indicator: &ThinkingIndicator, status: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // thinking
        Constraint::Min(3),    // who's up
        Constraint::Length(3), // roster
        Constraint::Length(3), // controls
        Constraint::Length(1), // status
    ])
    .split(frame.area());

    if table.is_current_actor_thinking() {
        frame.render_widget(
            Paragraph::new(indicator.dots()).style(Style::default().fg(Color::LightMagenta)),
            chunks[0],
        );
    }

    let headline = match table.current_actor_name() {
        Some(name) => Span::styled(
            format!("In play: {}", name),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        None if table.is_round_over() => Span::styled(
            "Round Over.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        None => Span::raw("Waiting for a round to start"),
    };
    let middle = Layout::vertical([Constraint::Fill(1), Constraint::Length(1), Constraint::Fill(1)])
        .split(chunks[1]);
    frame.render_widget(
        Paragraph::new(Line::from(headline)).alignment(Alignment::Center),
        middle[1],
    );

    let seats: Vec<Span> = table
        .roster()
        .iter()
        .enumerate()
        .map(|(i, actor)| {
            let style = if table.turn_index() == Some(i) {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::REVERSED)
            } else if actor.is_turn_over() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            Span::styled(format!(" {} ", actor.name()), style)
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(seats))
            .block(Block::default().borders(Borders::ALL).title(format!(" Round {} ", table.round()))),
        chunks[2],
    );

    let help = Paragraph::new(" [Enter/N] Next Player | [R] New Round | [Esc/Q] Quit")
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(help, chunks[3]);

    frame.render_widget(
        Paragraph::new(status.to_string()).style(Style::default().fg(Color::Yellow)),
        chunks[4],
    );
}
