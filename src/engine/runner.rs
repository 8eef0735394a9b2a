use crate::config::TableConfig;
use crate::core::error::TurnError;
use crate::core::turn::{TurnCoordinator, TurnEvent};
use crate::engine::renderer::{self, ThinkingIndicator};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::{debug, info};

/// What the loop should do after handling a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive host loop: draws the table every tick and turns key presses
/// into coordinator calls.
pub struct TableEngine {
    config: TableConfig,
    table: TurnCoordinator,
    indicator: ThinkingIndicator,
    status: String,
}

impl TableEngine {
    pub fn new(config: TableConfig) -> Self {
        let table = TurnCoordinator::with_think_time(config.think_time);
        Self {
            config,
            table,
            indicator: ThinkingIndicator::default(),
            status: String::new(),
        }
    }

    pub fn table(&self) -> &TurnCoordinator {
        &self.table
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.table.start_round(self.config.actors());
        let result = self.event_loop(&mut terminal).await;
        ratatui::restore();
        result
    }

    async fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            terminal.draw(|f| renderer::render(f, &self.table, &self.indicator, &self.status))?;

            // INPUT (Non-blocking)
            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key.code) == Flow::Quit {
                        break;
                    }
                }
            }

            self.pump_events();
            if self.table.is_current_actor_thinking() {
                self.indicator.tick();
            }

            tokio::time::sleep(self.config.tick).await;
        }
        info!("leaving table");
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Enter | KeyCode::Char('n') => match self.table.try_end_current_turn() {
                Ok(()) => {
                    self.indicator.reset();
                    self.status.clear();
                }
                // Block turn changes until the other player is done thinking
                Err(e @ TurnError::StillThinking { .. }) => self.status = format!("{}...", e),
                Err(e) => self.status = format!("{}; press R for a new round", e),
            },
            KeyCode::Char('r') => {
                self.table.reset_round();
                self.indicator.reset();
                self.status.clear();
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Drain coordinator events into the log and the status line
    fn pump_events(&mut self) {
        for ev in self.table.drain_events() {
            debug!(event = ?ev, "table event");
            if let TurnEvent::RoundOver { round } = ev {
                self.status = format!("Round {} finished", round);
            }
        }
    }
}
