use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use throbber_widgets_tui::ThrobberState;

use super::items_map::ItemsMap;
use super::resource_table::ResourceTable;
use crate::columns::{ActionsMode, BillboardColumn};
use crate::data::Billboard;
use crate::state::CollectionState;

#[derive(Debug, Default)]
pub struct BillboardsPage {
    table: ResourceTable,
    map: ItemsMap,
}

impl BillboardsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        billboards: &CollectionState<Billboard>,
        throbber: &ThrobberState,
    ) {
        let [table_area, map_area] =
            Layout::vertical([Constraint::Length(11), Constraint::Min(8)]).areas(area);
        self.table.render::<BillboardColumn>(
            frame,
            table_area,
            "Billboards",
            billboards,
            ActionsMode::Full,
            true,
            throbber,
        );
        self.map.render(
            frame,
            map_area,
            billboards.items(),
            billboards.selected_item(),
        );
    }
}
