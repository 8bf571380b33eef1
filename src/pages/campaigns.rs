use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use throbber_widgets_tui::ThrobberState;

use super::resource_table::ResourceTable;
use crate::columns::{format_dollars, ActionsMode, CampaignColumn};
use crate::data::Campaign;
use crate::state::CollectionState;

#[derive(Debug, Default)]
pub struct CampaignsPage {
    table: ResourceTable,
}

impl CampaignsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        campaigns: &CollectionState<Campaign>,
        throbber: &ThrobberState,
    ) {
        let [table_area, details_area] =
            Layout::vertical([Constraint::Length(11), Constraint::Min(0)]).areas(area);
        self.table.render::<CampaignColumn>(
            frame,
            table_area,
            "Campaigns",
            campaigns,
            ActionsMode::Full,
            true,
            throbber,
        );

        // Right below the table: billboards of the selected campaign
        let details: Vec<Line> = match campaigns.selected_item() {
            Some(campaign) if campaign.billboards.is_empty() => {
                vec![Line::from("No billboards assigned. Press Enter to add some.").dark_gray()]
            }
            Some(campaign) => campaign
                .billboards
                .iter()
                .map(|b| {
                    Line::from(vec![
                        Span::styled(format_dollars(b.dollars_per_day), Style::new().green()),
                        Span::raw(format!("/day  {}", b.location.summary())),
                    ])
                })
                .collect(),
            None => Vec::new(),
        };
        frame.render_widget(
            Paragraph::new(details).block(Block::bordered().title("Assigned billboards")),
            details_area,
        );
    }
}
