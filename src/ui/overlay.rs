// Overlay message system for displaying centered text on screen

use ratatui::{
    layout::{Alignment, Margin, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{Phase, Side};

/// A message to display as an overlay in the center of the court
#[derive(Debug, Clone)]
pub struct OverlayMessage {
    /// Lines of text to display
    pub lines: Vec<String>,
    /// Optional title for the overlay box
    pub title: Option<String>,
    /// Style preset for the overlay
    pub style: OverlayStyle,
}

/// Predefined styles for overlay messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayStyle {
    /// Waiting to start (white/cyan)
    Info,
    /// Paused (yellow)
    Warning,
    /// CPU won (red)
    Error,
    /// Player won (green)
    Success,
}

impl OverlayMessage {
    fn styled(lines: Vec<String>, style: OverlayStyle) -> Self {
        Self {
            lines,
            title: None,
            style,
        }
    }

    /// Set the title for this message
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// The overlay for a match phase, if that phase shows one
    pub fn for_phase(phase: Phase, start_key: &str, reset_key: &str) -> Option<Self> {
        match phase {
            Phase::Running => None,
            Phase::Idle => Some(
                Self::styled(
                    vec![
                        format!("Press {start_key} to serve"),
                        String::new(),
                        "Move against the ball to SMASH".to_string(),
                        "Keep moving to charge it up".to_string(),
                    ],
                    OverlayStyle::Info,
                )
                .with_title("Action Tennis"),
            ),
            Phase::Paused => Some(Self::styled(
                vec!["PAUSED".to_string()],
                OverlayStyle::Warning,
            )),
            Phase::GameOver { winner } => {
                let (headline, style) = match winner {
                    Side::Player => ("YOU WIN!", OverlayStyle::Success),
                    Side::Cpu => ("CPU WINS", OverlayStyle::Error),
                };
                Some(Self::styled(
                    vec![
                        headline.to_string(),
                        String::new(),
                        format!("{reset_key} to reset"),
                    ],
                    style,
                ))
            }
        }
    }

    /// Get the color for the border and title based on style
    fn border_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::Cyan,
            OverlayStyle::Warning => Color::Yellow,
            OverlayStyle::Error => Color::Red,
            OverlayStyle::Success => Color::Green,
        }
    }

    /// Get the color for the message text based on style
    fn text_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::White,
            OverlayStyle::Warning => Color::Yellow,
            OverlayStyle::Error => Color::LightRed,
            OverlayStyle::Success => Color::LightGreen,
        }
    }
}

/// Render an overlay message in the center of `area`
pub fn render_overlay(frame: &mut Frame, message: &OverlayMessage, area: Rect) {
    let max_line_length = message
        .lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    // Add padding for borders and spacing
    let overlay_width = (max_line_length as u16 + 6).min(area.width.saturating_sub(4));
    let overlay_height = (message.lines.len() as u16 + 4).min(area.height.saturating_sub(4));

    let overlay_area = Rect {
        x: area.x + (area.width.saturating_sub(overlay_width)) / 2,
        y: area.y + (area.height.saturating_sub(overlay_height)) / 2,
        width: overlay_width,
        height: overlay_height,
    };

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(message.border_color()))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));

    if let Some(ref title) = message.title {
        block = block.title(format!(" {} ", title));
    }

    frame.render_widget(block, overlay_area);

    let inner_area = overlay_area.inner(Margin::new(2, 1));

    let text_lines: Vec<Line> = message
        .lines
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(message.text_color()),
            ))
        })
        .collect();

    let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);

    frame.render_widget(paragraph, inner_area);
}
