use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use throbber_widgets_tui::ThrobberState;

use super::items_map::ItemsMap;
use super::resource_table::ResourceTable;
use crate::columns::{format_dollars, BillboardColumn};
use crate::state::{BillboardPane, CampaignBillboardsState};

#[derive(Debug, Default)]
pub struct CampaignBillboardsPage {
    table: ResourceTable,
    map: ItemsMap,
}

impl CampaignBillboardsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &CampaignBillboardsState,
        throbber: &ThrobberState,
    ) {
        let [header_area, tables_area, map_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(11),
            Constraint::Min(6),
        ])
        .areas(area);

        let header = match &state.campaign {
            Some(c) => Line::from(vec![
                Span::styled(c.name.clone(), Style::new().bold().cyan()),
                Span::raw(format!("  {} → {}  ", c.start_date, c.end_date)),
                Span::styled(
                    format!("Total {}", format_dollars(c.total_dollar_amount)),
                    Style::new().green(),
                ),
            ]),
            None => Line::from("Loading campaign...").dark_gray(),
        };
        frame.render_widget(
            Paragraph::new(header).block(Block::bordered().title("Campaign")),
            header_area,
        );

        let [current_area, available_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(tables_area);
        for (pane, pane_area, collection) in [
            (BillboardPane::Current, current_area, &state.current),
            (BillboardPane::Available, available_area, &state.available),
        ] {
            self.table.render::<BillboardColumn>(
                frame,
                pane_area,
                pane.title(),
                collection,
                pane.mode(),
                state.focus == pane,
                throbber,
            );
        }

        self.map.render(
            frame,
            map_area,
            state.current.items(),
            state.focused().selected_item(),
        );
    }
}
