use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Tabs},
    Frame,
};

use crate::routes::Route;

/// Navigation bar for the authenticated views.
#[derive(Debug)]
pub struct MainMenu {
    pub menu_items: Vec<&'static str>,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenu {
    pub fn new() -> Self {
        Self {
            menu_items: Route::NAV.iter().map(|r| r.title()).collect(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, route: Route) {
        let titles = self
            .menu_items
            .iter()
            .enumerate()
            .map(|(i, title)| Line::from(format!("{} {}", i + 1, title)));

        let tabs = Tabs::new(titles)
            .block(Block::bordered().title_bottom(Line::from(" o: Sign out ").right_aligned()))
            .select(route.nav_index())
            .highlight_style(Style::new().bold().reversed())
            .divider("|");
        frame.render_widget(tabs, area);
    }

    pub fn get_items_count(&self) -> usize {
        self.menu_items.len()
    }
}
