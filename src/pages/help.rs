use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

#[derive(Debug)]
pub struct HelpPage;

impl Default for HelpPage {
    fn default() -> Self {
        Self::new()
    }
}

fn binding(keys: &'static str, what: &'static str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{keys:<14}"), Style::new().bold().fg(color)),
        Span::raw(what),
    ])
}

impl HelpPage {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        // Fill the overlay to avoid a transparent background bleeding through
        frame.render_widget(Block::default().style(Style::new().bg(Color::Black)), area);

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(9),
                Constraint::Length(9),
                Constraint::Min(0),
            ])
            .split(area);

        let nav_help = vec![
            binding("↑↓ / k j", "Select row", Color::Cyan),
            binding("← → / h l", "Previous / next page", Color::Cyan),
            binding("Tab", "Next view (switch pane on campaign billboards)", Color::Cyan),
            binding("1 2 3", "Campaigns / Billboards / Locations", Color::Cyan),
            binding("Esc", "Back / close", Color::Cyan),
            binding("F5 / R", "Reload", Color::Cyan),
            binding("q / Ctrl-C", "Quit", Color::Cyan),
        ];
        frame.render_widget(
            Paragraph::new(nav_help).block(Block::bordered().title("Navigation")),
            sections[0],
        );

        let action_help = vec![
            binding("n", "New item", Color::Magenta),
            binding("e", "Edit selected item", Color::Magenta),
            binding("d", "Delete selected item", Color::Magenta),
            binding("Enter", "Campaigns: manage billboards", Color::Magenta),
            binding("a / r", "Add to / remove from campaign", Color::Magenta),
            binding("o", "Sign out", Color::Magenta),
        ];
        frame.render_widget(
            Paragraph::new(action_help).block(Block::bordered().title("Actions")),
            sections[1],
        );

        let form_help = vec![
            binding("Tab / ↓", "Next field", Color::Yellow),
            binding("Shift-Tab / ↑", "Previous field", Color::Yellow),
            binding("← →", "Choose location", Color::Yellow),
            binding("Enter", "Save / submit", Color::Yellow),
            binding("Ctrl-N", "Toggle sign in / sign up", Color::Yellow),
            Line::from(""),
            Line::from("Press ? or Esc to close").gray(),
        ];
        frame.render_widget(
            Paragraph::new(form_help).block(Block::bordered().title("Forms")),
            sections[2],
        );
    }
}
