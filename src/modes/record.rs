//! Movement recording mode
//!
//! The player moves alone on the playfield with the same kinematics as in play
//! mode. Every logical frame becomes one row of the movement log, which is written
//! to disk when recording stops.

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::interval;

use super::terminal::{TerminalSession, Tui};
use crate::game::{Character, GameConfig, MoveAction, PlayerInput};
use crate::input::{HeldKeys, InputHandler, KeyAction};
use crate::recording::{MovementLog, MovementRecord};
use crate::render::{Renderer, Theme};

pub struct RecordMode {
    config: GameConfig,
    output: PathBuf,
    player: Character,
    log: MovementLog,
    renderer: Renderer,
    input_handler: InputHandler,
    held: HeldKeys,
    should_quit: bool,
}

impl RecordMode {
    pub fn new(config: GameConfig, output: PathBuf, theme: Theme) -> Self {
        let player = Character::player_spawn(&config);

        Self {
            config,
            output,
            player,
            log: MovementLog::new(),
            renderer: Renderer::new(theme),
            input_handler: InputHandler::new(),
            held: HeldKeys::default(),
            should_quit: false,
        }
    }

    pub fn log(&self) -> &MovementLog {
        &self.log
    }

    /// Record until the user quits, then write the log
    pub async fn run(&mut self) -> Result<()> {
        let mut session = TerminalSession::enter()?;
        if session.release_events() {
            self.held = HeldKeys::default().with_release_events();
        }

        tracing::info!(output = ?self.output, "recording started");

        let result = self.run_record_loop(&mut session.terminal).await;

        session.restore()?;
        result?;

        self.save()?;
        println!(
            "Movement logged and saved to {:?} ({} frames)",
            self.output,
            self.log.len()
        );

        Ok(())
    }

    async fn run_record_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.config.frame_duration());
        let mut render_timer = interval(Duration::from_millis(33));
        let started = Instant::now();

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => self.handle_key(key, Instant::now()),
                        Some(Ok(_)) => {}
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    let now = Instant::now();
                    let input = self.held.snapshot(now);
                    self.record_frame(input, now.duration_since(started).as_secs_f64());
                }

                _ = render_timer.tick() => {
                    let elapsed = format_elapsed(started.elapsed());
                    terminal.draw(|frame| {
                        self.renderer.render_recorder(
                            frame,
                            &self.player,
                            &self.config,
                            self.log.len(),
                            &elapsed,
                        );
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

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let action = self.input_handler.handle_key_event(key);

        match action {
            KeyAction::Control(control) if key.kind == KeyEventKind::Release => {
                self.held.release(control)
            }
            KeyAction::Control(control) => self.held.press(control, now),
            KeyAction::Quit if key.kind != KeyEventKind::Release => self.should_quit = true,
            _ => {}
        }
    }

    /// Advance the player one frame and log where it ended up
    pub fn record_frame(&mut self, input: PlayerInput, timestamp: f64) {
        let jumped = self.player.drive(input, &self.config);

        self.log.push(MovementRecord {
            timestamp,
            x_position: self.player.x,
            y_position: self.player.y,
            action: MoveAction::from_frame(input, jumped),
        });
    }

    fn save(&self) -> Result<()> {
        if self.log.is_empty() {
            tracing::warn!("no frames recorded, {:?} not written", self.output);
            return Ok(());
        }

        self.log
            .save(&self.output)
            .with_context(|| format!("Failed to save movement log to {:?}", self.output))?;
        tracing::info!(frames = self.log.len(), output = ?self.output, "movement log saved");
        Ok(())
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
