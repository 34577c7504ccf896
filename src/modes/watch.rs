//! Watch mode: the computer plays both snakes
//!
//! The player snake is steered by the same navigation heuristic as the rival,
//! aiming at the rival instead of at the player. Lost games restart on their
//! own.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Restart the current game
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use log::info;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    style::{Color, Style},
    text::Span,
};
use std::{io::Stderr, time::Duration};
use tokio::time::{interval, Interval};

use super::{restore_terminal, setup_terminal};
use crate::game::{GameConfig, GameEngine, GameSession};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{HudInfo, Renderer};

/// Playback speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchSpeed {
    /// Slow: 2 Hz (500ms per step)
    Slow,
    /// Normal: 12 Hz (83ms per step) - same as human mode
    Normal,
    /// Fast: 30 Hz (33ms per step)
    Fast,
    /// Very Fast: 60 Hz (16ms per step)
    VeryFast,
}

impl WatchSpeed {
    fn from_preset(preset: u8) -> Option<Self> {
        match preset {
            1 => Some(Self::Slow),
            2 => Some(Self::Normal),
            3 => Some(Self::Fast),
            4 => Some(Self::VeryFast),
            _ => None,
        }
    }

    /// Get the tick interval for this speed
    fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(83),
            Self::Fast => Duration::from_millis(33),
            Self::VeryFast => Duration::from_millis(16),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
        }
    }
}

pub struct WatchMode {
    engine: GameEngine,
    session: GameSession,
    renderer: Renderer,
    input_handler: InputHandler,
    metrics: GameMetrics,
    should_quit: bool,
    paused: bool,
    speed: WatchSpeed,
}

impl WatchMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut engine = GameEngine::new(config);
        let session = engine.reset().context("Failed to build first session")?;

        Ok(Self {
            engine,
            session,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            metrics: GameMetrics::new(),
            should_quit: false,
            paused: false,
            speed: WatchSpeed::Normal,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.run_watch_loop(&mut terminal).await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn run_watch_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.speed.tick_interval());
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.step()?;
                    }
                }

                _ = render_timer.tick() => {
                    if !self.paused {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        let hud = HudInfo {
                            player_name: "Autopilot",
                            metrics: &self.metrics,
                            status: Some(self.status_text()),
                            controls: controls_line(),
                        };
                        self.renderer.render(frame, &self.session, &hud);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Advance one tick, restarting first if the last game ended
    fn step(&mut self) -> Result<()> {
        if self.session.is_lost() {
            self.session.request_reset();
        }
        if self.engine.restart_if_requested(&mut self.session)? {
            self.metrics.on_game_start();
            return Ok(());
        }

        let action = self.engine.autopilot(&self.session);
        let result = self.engine.step(&mut self.session, action)?;

        self.metrics.on_fruit_eaten(result.info.player_ate.len());
        if result.terminated {
            self.metrics.on_game_over(self.session.score);
            info!(
                "watch game {} ended with score {}",
                self.metrics.games_played, self.session.score
            );
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::TogglePause => self.paused = !self.paused,
            KeyAction::Restart => {
                // Abandon the current game; the next tick starts a new one
                self.session.lost = true;
                self.session.request_reset();
            }
            KeyAction::SetSpeed(preset) => {
                if let Some(speed) = WatchSpeed::from_preset(preset) {
                    self.change_speed(speed, tick_timer);
                }
            }
            _ => {}
        }
    }

    fn change_speed(&mut self, new_speed: WatchSpeed, tick_timer: &mut Interval) {
        self.speed = new_speed;
        *tick_timer = interval(self.speed.tick_interval());
    }

    fn status_text(&self) -> String {
        let mut status = format!("Game {}  Speed: {}", self.metrics.games_played + 1, self.speed.as_str());
        if self.paused {
            status.push_str("  PAUSED");
        }
        status
    }
}

fn controls_line() -> Vec<Span<'static>> {
    vec![
        Span::styled("Space", Style::default().fg(Color::Cyan)),
        Span::raw(" pause | "),
        Span::styled("1-4", Style::default().fg(Color::Cyan)),
        Span::raw(" speed | "),
        Span::styled("R", Style::default().fg(Color::Green)),
        Span::raw(" restart | "),
        Span::styled("Q", Style::default().fg(Color::Red)),
        Span::raw(" quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Phase;

    #[test]
    fn test_watch_speed() {
        assert_eq!(WatchSpeed::Slow.tick_interval(), Duration::from_millis(500));
        assert_eq!(WatchSpeed::Normal.tick_interval(), Duration::from_millis(83));
        assert_eq!(WatchSpeed::from_preset(4), Some(WatchSpeed::VeryFast));
        assert_eq!(WatchSpeed::from_preset(9), None);
    }

    #[test]
    fn test_watch_mode_creation() {
        let mode = WatchMode::new(GameConfig::seeded(2)).unwrap();
        assert!(!mode.paused);
        assert_eq!(mode.speed, WatchSpeed::Normal);
        assert_eq!(mode.session.phase(), Phase::Playing);
    }

    #[test]
    fn test_autopilot_games_restart() {
        let mut mode = WatchMode::new(GameConfig::seeded(2)).unwrap();

        for _ in 0..2_000 {
            mode.step().unwrap();
        }

        // Whatever happened, the mode never gets stuck on a lost session
        // for more than one tick
        mode.step().unwrap();
        assert!(mode.session.phase() != Phase::ResetPending);
    }

    #[test]
    fn test_status_text() {
        let mut mode = WatchMode::new(GameConfig::seeded(2)).unwrap();
        assert_eq!(mode.status_text(), "Game 1  Speed: Normal");
        mode.paused = true;
        assert!(mode.status_text().ends_with("PAUSED"));
    }
}
