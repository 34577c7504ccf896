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
use std::io::Stderr;
use std::time::Duration;
use tokio::time::interval;

use super::{restore_terminal, setup_terminal, tick_interval};
use crate::game::{Action, Direction, GameConfig, GameEngine, GameSession, Phase};
use crate::input::{apply_name_edit, InputHandler, KeyAction, NameEdit};
use crate::metrics::GameMetrics;
use crate::render::{HudInfo, Renderer};

pub struct HumanMode {
    engine: GameEngine,
    session: GameSession,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_direction: Option<Direction>,
    player_name: String,
    name_entered: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut engine = GameEngine::new(config);
        let session = engine.reset().context("Failed to build first session")?;

        Ok(Self {
            engine,
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
            player_name: String::new(),
            name_entered: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(tick_interval(self.engine.config().tick_rate_hz));

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.name_entered {
                        self.update_game()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.session.phase() == Phase::Playing && self.name_entered {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        if self.name_entered {
                            let hud = HudInfo {
                                player_name: &self.player_name,
                                metrics: &self.metrics,
                                status: None,
                                controls: controls_line(),
                            };
                            self.renderer.render(frame, &self.session, &hud);
                        } else {
                            self.renderer.render_name_entry(frame, &self.player_name);
                        }
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
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

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        if !self.name_entered {
            let edit = self.input_handler.handle_name_key(key);
            if edit == NameEdit::Quit {
                self.should_quit = true;
            } else if apply_name_edit(&mut self.player_name, &edit) {
                self.start_playing();
            }
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::GameAction(Action::Move(dir)) => {
                self.pending_direction = Some(dir);
            }
            KeyAction::Restart => {
                self.session.request_reset();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn start_playing(&mut self) {
        if self.player_name.trim().is_empty() {
            self.player_name = "Player".to_string();
        }
        info!("{} started playing", self.player_name);
        self.name_entered = true;
        self.metrics.on_game_start();
    }

    /// One tick: swap in a fresh session if a restart is pending, otherwise
    /// feed the pending direction to the engine.
    fn update_game(&mut self) -> Result<()> {
        if self.engine.restart_if_requested(&mut self.session)? {
            self.metrics.on_game_start();
            self.pending_direction = None;
            return Ok(());
        }

        if self.session.is_lost() {
            return Ok(());
        }

        let action = Action::from(self.pending_direction.take());
        let result = self.engine.step(&mut self.session, action)?;

        self.metrics.on_fruit_eaten(result.info.player_ate.len());
        if result.terminated {
            self.metrics.on_game_over(self.session.score);
        }

        Ok(())
    }
}

fn controls_line() -> Vec<Span<'static>> {
    vec![
        Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
        Span::raw(" or "),
        Span::styled("WASD", Style::default().fg(Color::Cyan)),
        Span::raw(" to move | "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(" to restart | "),
        Span::styled("Q", Style::default().fg(Color::Red)),
        Span::raw(" to quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn playing_mode() -> HumanMode {
        let mut mode = HumanMode::new(GameConfig::seeded(4)).unwrap();
        mode.handle_event(press(KeyCode::Enter));
        mode
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::seeded(4)).unwrap();
        assert_eq!(mode.session.phase(), Phase::Playing);
        assert_eq!(mode.session.score, 0);
        assert!(!mode.name_entered);
    }

    #[test]
    fn test_name_entry_then_play() {
        let mut mode = HumanMode::new(GameConfig::seeded(4)).unwrap();
        for c in "Kim".chars() {
            mode.handle_event(press(KeyCode::Char(c)));
        }
        // Movement keys type nothing and do not steer yet
        mode.handle_event(press(KeyCode::Up));
        assert_eq!(mode.pending_direction, None);

        mode.handle_event(press(KeyCode::Enter));
        assert!(mode.name_entered);
        assert_eq!(mode.player_name, "Kim");
    }

    #[test]
    fn test_blank_name_gets_default() {
        let mode = playing_mode();
        assert_eq!(mode.player_name, "Player");
    }

    #[test]
    fn test_pending_direction_consumed_by_tick() {
        let mut mode = playing_mode();
        mode.handle_event(press(KeyCode::Down));
        assert_eq!(mode.pending_direction, Some(Direction::Down));

        mode.update_game().unwrap();
        assert_eq!(mode.pending_direction, None);
        assert_eq!(mode.session.player.direction(), Direction::Down);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut mode = playing_mode();
        mode.handle_event(press(KeyCode::Char('r')));
        assert_eq!(mode.session.phase(), Phase::Playing);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = playing_mode();
        mode.session.score = 10;
        mode.session.lost = true;

        mode.handle_event(press(KeyCode::Enter));
        assert_eq!(mode.session.phase(), Phase::ResetPending);

        mode.update_game().unwrap();
        assert_eq!(mode.session.phase(), Phase::Playing);
        assert_eq!(mode.session.score, 0);
        assert_eq!(mode.session.player.len(), 3);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = playing_mode();
        mode.handle_event(press(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
