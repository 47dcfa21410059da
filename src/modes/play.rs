use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::time::interval;

use super::terminal::{TerminalSession, Tui};
use crate::game::{GameEngine, RoundState};
use crate::input::{HeldKeys, InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, Theme};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    GameOver { final_score: u32 },
}

/// Interactive chase against the enemy
pub struct PlayMode {
    engine: GameEngine,
    state: RoundState,
    screen: Screen,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    held: HeldKeys,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(engine: GameEngine, theme: Theme) -> Self {
        let state = engine.reset();

        Self {
            engine,
            state,
            screen: Screen::Start,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(theme),
            input_handler: InputHandler::new(),
            held: HeldKeys::default(),
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut session = TerminalSession::enter()?;
        if session.release_events() {
            self.held = HeldKeys::default().with_release_events();
        }

        tracing::info!(
            predictor = self.engine.predictor_name(),
            "play session started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut session.terminal).await;

        session.restore()?;

        tracing::info!(
            rounds = self.metrics.rounds_played,
            best_score = self.metrics.best_score,
            predictions = self.metrics.predictions,
            prediction_failures = self.metrics.prediction_failures,
            "play session ended"
        );

        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Fixed logical frame rate
        let mut tick_timer = interval(self.engine.config().frame_duration());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, Instant::now()),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.screen == Screen::Playing {
                        self.update_game(Instant::now());
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.screen == Screen::Playing {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| match self.screen {
                        Screen::Start => self.renderer.render_start(frame),
                        Screen::Playing => self.renderer.render_round(
                            frame,
                            &self.state,
                            self.engine.config(),
                            &self.metrics,
                        ),
                        Screen::GameOver { final_score } => {
                            self.renderer.render_game_over(frame, final_score, &self.metrics)
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

    fn handle_event(&mut self, event: Event, now: Instant) {
        if let Event::Key(key) = event {
            self.handle_key(key, now);
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let action = self.input_handler.handle_key_event(key);

        if key.kind == KeyEventKind::Release {
            if let KeyAction::Control(control) = action {
                self.held.release(control);
            }
            return;
        }

        match (action, self.screen) {
            (KeyAction::Control(control), Screen::Playing) => self.held.press(control, now),
            (KeyAction::Start, Screen::Start) => self.start_round(),
            (KeyAction::Restart, Screen::GameOver { .. }) => self.start_round(),
            (KeyAction::Quit, _) => self.should_quit = true,
            _ => {}
        }
    }

    fn update_game(&mut self, now: Instant) {
        let input = self.held.snapshot(now);
        let result = self.engine.step(&mut self.state, input);
        self.metrics.on_step(&result.info);

        if result.terminated {
            let final_score = self.state.score;
            if self.metrics.on_round_over(final_score) {
                tracing::info!(final_score, "new best score");
            }
            self.held.clear();
            self.screen = Screen::GameOver { final_score };
        }
    }

    fn start_round(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_round_start();
        self.held.clear();
        self.screen = Screen::Playing;
        tracing::debug!(round = self.metrics.rounds_played + 1, "round started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use crate::predictor::{LastValuePredictor, NormalizationBounds};
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn play_mode() -> PlayMode {
        let config = GameConfig::default();
        let bounds = NormalizationBounds::new(0.0, config.max_x()).unwrap();
        let engine =
            GameEngine::new(config, bounds, Box::new(LastValuePredictor::new(10))).unwrap();
        PlayMode::new(engine, Theme::default())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind_and_state(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        )
    }

    #[test]
    fn test_starts_on_start_screen() {
        let mode = play_mode();
        assert_eq!(mode.screen(), Screen::Start);
        assert!(mode.state.is_running);
    }

    #[test]
    fn test_y_starts_round() {
        let mut mode = play_mode();
        let now = Instant::now();

        // Restart does nothing before the first round
        mode.handle_key(press(KeyCode::Char('r')), now);
        assert_eq!(mode.screen(), Screen::Start);

        mode.handle_key(press(KeyCode::Char('y')), now);
        assert_eq!(mode.screen(), Screen::Playing);
    }

    #[test]
    fn test_held_arrow_moves_player() {
        let mut mode = play_mode();
        let now = Instant::now();
        mode.start_round();

        mode.handle_key(press(KeyCode::Right), now);
        mode.update_game(now);
        assert_eq!(mode.state.player.x, 173.0);

        mode.handle_key(release(KeyCode::Right), now);
        mode.update_game(now);
        assert_eq!(mode.state.player.x, 173.0);
    }

    #[test]
    fn test_controls_ignored_outside_round() {
        let mut mode = play_mode();
        let now = Instant::now();

        mode.handle_key(press(KeyCode::Left), now);
        assert_eq!(mode.held.snapshot(now), crate::game::PlayerInput::IDLE);
    }

    #[test]
    fn test_catch_shows_game_over_then_restart() {
        let mut mode = play_mode();
        let now = Instant::now();
        mode.start_round();
        mode.state.score = 250;
        mode.state.enemy.body.x = mode.state.player.x;
        mode.state.enemy.body.y = mode.state.player.y;

        mode.update_game(now);

        assert_eq!(mode.screen(), Screen::GameOver { final_score: 250 });
        assert_eq!(mode.metrics.best_score, 250);
        assert_eq!(mode.metrics.rounds_played, 1);

        mode.handle_key(press(KeyCode::Char('R')), now);
        assert_eq!(mode.screen(), Screen::Playing);
        assert_eq!(mode.state.score, 0);
        assert!(mode.state.is_running);
    }

    #[test]
    fn test_quit_from_any_screen() {
        let mut mode = play_mode();
        mode.handle_key(press(KeyCode::Char('q')), Instant::now());
        assert!(mode.should_quit);

        let mut mode = play_mode();
        mode.start_round();
        mode.handle_key(press(KeyCode::Esc), Instant::now());
        assert!(mode.should_quit);
    }
}
