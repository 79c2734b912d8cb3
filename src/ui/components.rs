//! Panels of the terminal view

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph};
use ratatui::Frame;

use super::{Phase, Progress};

pub struct StatusPanel {
    phase: Phase,
    info: String,
}

impl StatusPanel {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            info: String::new(),
        }
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn set_info(&mut self, info: impl Into<String>) {
        self.info = info.into();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (symbol, color) = match self.phase {
            Phase::Loading => ("↥", Color::Cyan),
            Phase::Cleaning => ("✂", Color::Yellow),
            Phase::Saving => ("↧", Color::Cyan),
            Phase::Complete => ("✓", Color::Green),
        };
        let style = Style::default().fg(color).add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(vec![
                Span::styled(format!(" {} ", symbol), style),
                Span::styled(self.phase.to_string(), style),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                format!("   {}", self.info),
                Style::default().fg(Color::Gray),
            )),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Game Catalog Cleaner ")
            .border_style(Style::default().fg(Color::Blue));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Gauge over the stage list
pub struct StagePanel {
    progress: Option<Progress>,
}

impl StagePanel {
    pub fn new() -> Self {
        Self { progress: None }
    }

    pub fn set(&mut self, progress: Progress) {
        self.progress = Some(progress);
    }

    pub fn clear(&mut self) {
        self.progress = None;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::Blue));

        let Some(progress) = &self.progress else {
            frame.render_widget(Paragraph::new("").block(block), area);
            return;
        };

        let label = format!(
            "stage {}/{}: {}",
            progress.current + 1,
            progress.total,
            progress.label
        );
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(Color::Yellow).bg(Color::DarkGray))
            .ratio(progress.ratio().min(1.0))
            .label(label);

        frame.render_widget(gauge, area);
    }
}

/// Shape transitions and messages, newest last
pub struct ActivityPanel {
    entries: Vec<String>,
    capacity: usize,
}

impl ActivityPanel {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            capacity: 200,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
        if self.entries.len() > self.capacity {
            let overflow = self.entries.len() - self.capacity;
            self.entries.drain(..overflow);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Stages ")
            .border_style(Style::default().fg(Color::Blue));

        let visible = area.height.saturating_sub(2) as usize;
        let start = self.entries.len().saturating_sub(visible);
        let newest = self.entries.len().saturating_sub(1);

        let items: Vec<ListItem> = self.entries[start..]
            .iter()
            .enumerate()
            .map(|(offset, entry)| {
                let color = if start + offset == newest {
                    Color::White
                } else {
                    Color::DarkGray
                };
                ListItem::new(Span::styled(format!(" {}", entry), Style::default().fg(color)))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_panel_capacity() {
        let mut panel = ActivityPanel::new();
        for i in 0..250 {
            panel.push(format!("entry {}", i));
        }
        assert_eq!(panel.entries.len(), 200);
        assert_eq!(panel.entries[0], "entry 50");
    }
}
