use anyhow::Result;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points, Rectangle},
        Block, Gauge, Paragraph,
    },
    Frame, Terminal,
};

use super::overlay::{render_overlay, OverlayMessage};
use super::Renderer;
use crate::config::{DisplayConfig, KeyBindings};
use crate::game::{BallTint, ChargeLevel, Court, GameEvent, Paddle, Side, SmashTier};
use crate::simulation::Snapshot;

// Layout: score row, court, charge gauges, key hints
const HEADER_ROWS: u16 = 3;
const GAUGE_ROWS: u16 = 3;
const FOOTER_ROWS: u16 = 1;

/// A smash label shown above the court for a while after it happens
#[derive(Debug, Clone, PartialEq)]
struct Banner {
    text: String,
    actor: Side,
    ticks_left: u32,
}

/// Everything the draw pass needs besides the snapshot
struct View {
    display: DisplayConfig,
    start_key: String,
    reset_key: String,
    hints: String,
    banner: Option<Banner>,
}

/// Draws the match into a ratatui terminal
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    view: View,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>, display: &DisplayConfig, keys: &KeyBindings) -> Self {
        let hints = format!(
            "{}/{}/{}/{}: Move  {}: Start  {}: Pause  {}: Reset  {}: Quit",
            keys.up, keys.down, keys.left, keys.right, keys.start, keys.pause, keys.reset, keys.quit
        );
        Self {
            terminal,
            view: View {
                display: display.clone(),
                start_key: keys.start.clone(),
                reset_key: keys.reset.clone(),
                hints,
                banner: None,
            },
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    fn update_banner(&mut self, events: &[GameEvent]) {
        if let Some(banner) = &mut self.view.banner {
            banner.ticks_left = banner.ticks_left.saturating_sub(1);
        }
        if self.view.banner.as_ref().is_some_and(|b| b.ticks_left == 0) {
            self.view.banner = None;
        }

        for event in events {
            match event {
                GameEvent::Smash(smash) => {
                    self.view.banner = Some(Banner {
                        text: smash.tier().label().to_string(),
                        actor: smash.actor,
                        ticks_left: self.view.display.banner_ticks,
                    });
                }
                GameEvent::PhaseChanged(_) | GameEvent::PointScored { .. } => {
                    self.view.banner = None;
                }
                _ => {}
            }
        }
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render(&mut self, snapshot: &Snapshot, events: &[GameEvent]) -> Result<()> {
        self.update_banner(events);
        let view = &self.view;
        self.terminal.draw(|frame| draw(frame, snapshot, view))?;
        Ok(())
    }
}

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb(c[0], c[1], c[2])
}

fn draw(frame: &mut Frame, snapshot: &Snapshot, view: &View) {
    let area = frame.area();
    let [header, court_area, gauges, footer] = Layout::vertical([
        Constraint::Length(HEADER_ROWS),
        Constraint::Min(5),
        Constraint::Length(GAUGE_ROWS),
        Constraint::Length(FOOTER_ROWS),
    ])
    .areas(area);

    draw_scores(frame, snapshot, view, header);
    draw_court(frame, snapshot, view, court_area);
    draw_charge(frame, snapshot, view, gauges);

    let hints = Paragraph::new(view.hints.as_str())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, footer);

    let overlay = OverlayMessage::for_phase(snapshot.phase, &view.start_key, &view.reset_key);
    if let Some(message) = overlay {
        render_overlay(frame, &message, court_area);
    }
}

fn draw_scores(frame: &mut Frame, snapshot: &Snapshot, view: &View, area: Rect) {
    let score = Line::from(vec![
        Span::styled(
            format!("Player: {}", snapshot.player_score),
            Style::default()
                .fg(rgb(view.display.player_color))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("CPU: {}", snapshot.cpu_score),
            Style::default()
                .fg(rgb(view.display.cpu_color))
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let mut stats = vec![Span::styled(
        format!(
            "Player Smashes: {}  |  CPU Smashes: {}",
            snapshot.player_smashes, snapshot.cpu_smashes
        ),
        Style::default().fg(Color::Rgb(255, 215, 0)),
    )];
    if let Some(banner) = &view.banner {
        let color = match banner.actor {
            Side::Player => Color::Rgb(255, 215, 0),
            Side::Cpu => Color::Rgb(255, 68, 68),
        };
        stats.push(Span::raw("   "));
        stats.push(Span::styled(
            format!("{} {}", banner.actor.label(), banner.text),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph =
        Paragraph::new(vec![score, Line::from(stats)]).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn paddle_color(paddle: &Paddle, side: Side, view: &View) -> Color {
    match (side, paddle.charge_level()) {
        (Side::Player, ChargeLevel::Full) => Color::Rgb(255, 64, 129),
        (Side::Player, ChargeLevel::Half) => Color::Rgb(156, 39, 176),
        (Side::Player, ChargeLevel::Low) => rgb(view.display.player_color),
        (Side::Cpu, ChargeLevel::Full) => Color::Rgb(255, 152, 0),
        (Side::Cpu, ChargeLevel::Half) => Color::Rgb(233, 30, 99),
        (Side::Cpu, ChargeLevel::Low) => rgb(view.display.cpu_color),
    }
}

fn ball_color(tint: BallTint, view: &View) -> Color {
    match tint {
        BallTint::Plain => rgb(view.display.ball_color),
        BallTint::Smashed(SmashTier::Mega) => Color::Rgb(255, 0, 0),
        BallTint::Smashed(SmashTier::Strong) => Color::Rgb(255, 140, 0),
        BallTint::Smashed(SmashTier::Normal) => Color::Rgb(255, 165, 0),
    }
}

fn draw_court(frame: &mut Frame, snapshot: &Snapshot, view: &View, area: Rect) {
    let court = snapshot.court;
    // Canvas y grows upwards; the simulation's grows downwards
    let flip = move |y: f32| (court.height - y) as f64;

    let canvas = Canvas::default()
        .block(Block::bordered().border_style(Style::default().fg(Color::Rgb(46, 125, 50))))
        .marker(Marker::Braille)
        .x_bounds([0.0, court.width as f64])
        .y_bounds([0.0, court.height as f64])
        .paint(|ctx| {
            draw_lines(ctx, &court, rgb(view.display.court_color));
            ctx.layer();

            for (side, paddle) in [(Side::Player, &snapshot.player), (Side::Cpu, &snapshot.cpu)] {
                ctx.draw(&Rectangle {
                    x: paddle.x as f64,
                    y: flip(paddle.y + paddle.height),
                    width: paddle.width as f64,
                    height: paddle.height as f64,
                    color: paddle_color(paddle, side, view),
                });
            }

            if view.display.show_trail && snapshot.ball.trail.len() > 1 {
                let trail: Vec<(f64, f64)> = snapshot.ball.trail[..snapshot.ball.trail.len() - 1]
                    .iter()
                    .map(|&(x, y)| (x as f64, flip(y)))
                    .collect();
                ctx.draw(&Points {
                    coords: &trail,
                    color: Color::Rgb(160, 150, 0),
                });
            }

            ctx.draw(&Circle {
                x: snapshot.ball.x as f64,
                y: flip(snapshot.ball.y),
                radius: court.half_ball() as f64,
                color: ball_color(snapshot.ball.tint, view),
            });
        });

    frame.render_widget(canvas, area);
}

fn draw_lines(ctx: &mut Context, court: &Court, color: Color) {
    let (w, h, m) = (court.width as f64, court.height as f64, court.margin as f64);
    ctx.draw(&Rectangle {
        x: m,
        y: m,
        width: w - 2.0 * m,
        height: h - 2.0 * m,
        color,
    });

    // Dashed net
    let mid = w / 2.0;
    let mut y = m;
    while y < h - m {
        ctx.draw(&CanvasLine {
            x1: mid,
            y1: y,
            x2: mid,
            y2: (y + 10.0).min(h - m),
            color,
        });
        y += 15.0;
    }

    ctx.draw(&Circle {
        x: mid,
        y: h / 2.0,
        radius: 30.0,
        color,
    });
}

fn draw_charge(frame: &mut Frame, snapshot: &Snapshot, view: &View, area: Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    let max = snapshot.court.max_charge;

    for (side, paddle, rect) in [
        (Side::Player, &snapshot.player, left),
        (Side::Cpu, &snapshot.cpu, right),
    ] {
        let ratio = paddle.charge_ratio(max) as f64;
        let gauge = Gauge::default()
            .block(Block::bordered().title(format!(" {} charge ", side.label())))
            .gauge_style(Style::default().fg(paddle_color(paddle, side, view)))
            .ratio(ratio)
            .label(format!("{}/{}", paddle.charge, max));
        frame.render_widget(gauge, rect);
    }
}
