use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph,
        canvas::{Canvas, Context, Line as CanvasLine, Rectangle},
    },
};

use super::theme::Theme;
use crate::game::{Character, GameConfig, RoundState};
use crate::metrics::GameMetrics;

pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn render_start(&self, frame: &mut Frame) {
        let area = centered(frame.area(), 60, 12);
        frame.render_widget(self.start_screen(), area);
    }

    pub fn render_round(
        &self,
        frame: &mut Frame,
        state: &RoundState,
        config: &GameConfig,
        metrics: &GameMetrics,
    ) {
        let chunks = split_screen(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let sprites = [
            Sprite {
                body: &state.player,
                label: &self.theme.player_label,
                color: self.theme.player_color,
            },
            Sprite {
                body: &state.enemy.body,
                label: &self.theme.enemy_label,
                color: self.theme.enemy_color,
            },
        ];
        frame.render_widget(self.playfield(config, &sprites), chunks[1]);

        let controls = self.render_controls("Q to quit");
        frame.render_widget(controls, chunks[2]);
    }

    pub fn render_game_over(&self, frame: &mut Frame, final_score: u32, metrics: &GameMetrics) {
        let area = centered(frame.area(), 50, 11);
        frame.render_widget(self.game_over_screen(final_score, metrics), area);
    }

    /// Player-only view used while recording movement
    pub fn render_recorder(
        &self,
        frame: &mut Frame,
        player: &Character,
        config: &GameConfig,
        rows_recorded: usize,
        elapsed: &str,
    ) {
        let chunks = split_screen(frame.area());

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "REC ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled("Frames: ", Style::default().fg(self.theme.accent_color)),
            Span::styled(rows_recorded.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(self.theme.accent_color)),
            Span::styled(elapsed.to_string(), Style::default().fg(Color::White)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        let sprites = [Sprite {
            body: player,
            label: &self.theme.player_label,
            color: self.theme.player_color,
        }];
        frame.render_widget(self.playfield(config, &sprites), chunks[1]);

        let controls = self.render_controls("Q to save and quit");
        frame.render_widget(controls, chunks[2]);
    }

    /// Playfield in game pixels; the canvas y axis points up, the game's points down
    fn playfield<'a>(
        &'a self,
        config: &GameConfig,
        sprites: &'a [Sprite<'a>],
    ) -> Canvas<'a, impl Fn(&mut Context) + 'a> {
        let width = config.field_width as f64;
        let height = config.field_height as f64;
        let floor_color = self.theme.floor_color;

        Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(format!(" {} ", self.theme.title)),
            )
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(move |ctx| {
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: width,
                    y2: 0.0,
                    color: floor_color,
                });

                for sprite in sprites {
                    let body = sprite.body;
                    let bottom = height - (body.y + body.height) as f64;
                    ctx.draw(&Rectangle {
                        x: body.x as f64,
                        y: bottom,
                        width: body.width as f64,
                        height: body.height as f64,
                        color: sprite.color,
                    });
                    ctx.print(
                        body.x as f64,
                        bottom + body.height as f64 + 16.0,
                        Line::styled(
                            sprite.label.to_string(),
                            Style::default()
                                .fg(sprite.color)
                                .add_modifier(Modifier::BOLD),
                        ),
                    );
                }
            })
    }

    fn render_stats(&self, state: &RoundState, metrics: &GameMetrics) -> Paragraph<'_> {
        let accent = Style::default().fg(self.theme.accent_color);
        let text = vec![Line::from(vec![
            Span::styled("Score: ", accent),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", accent),
            Span::styled(
                metrics.best_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", accent),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn start_screen(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                self.theme.title.as_str(),
                Style::default()
                    .fg(self.theme.accent_color)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press '", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Y",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("' to Start the Game", Style::default().fg(Color::Gray)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "CONTROLS: LEFT/RIGHT ARROWS TO MOVE,",
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                "SPACEBAR TO JUMP",
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    self.theme.player_label.as_str(),
                    Style::default().fg(self.theme.player_color),
                ),
                Span::raw(" runs, "),
                Span::styled(
                    self.theme.enemy_label.as_str(),
                    Style::default().fg(self.theme.enemy_color),
                ),
                Span::raw(" chases"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.theme.accent_color)),
        )
    }

    fn game_over_screen(&self, final_score: u32, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Better Luck Next Time. LOSER!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("FINAL SCORE: ", Style::default().fg(self.theme.accent_color)),
                Span::styled(
                    final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Best: ", Style::default().fg(Color::Gray)),
                Span::raw(metrics.best_score.to_string()),
                Span::styled("    Rounds: ", Style::default().fg(Color::Gray)),
                Span::raw(metrics.rounds_played.to_string()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
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

    fn render_controls(&self, quit_hint: &'static str) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" to jump | "),
            Span::styled(quit_hint, Style::default().fg(Color::Red)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

/// A character to draw with its label
struct Sprite<'a> {
    body: &'a Character,
    label: &'a str,
    color: Color,
}

/// Header, playfield and footer rows
fn split_screen(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Playfield
            Constraint::Length(3), // Footer
        ])
        .split(area)
}

/// A box of at most `width` x `height` cells centered in `area`
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
