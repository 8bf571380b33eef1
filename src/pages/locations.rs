use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use throbber_widgets_tui::ThrobberState;

use super::items_map::ItemsMap;
use super::resource_table::ResourceTable;
use crate::columns::{ActionsMode, LocationColumn};
use crate::data::Location;
use crate::state::CollectionState;

#[derive(Debug, Default)]
pub struct LocationsPage {
    table: ResourceTable,
    map: ItemsMap,
}

impl LocationsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        locations: &CollectionState<Location>,
        throbber: &ThrobberState,
    ) {
        let [table_area, map_area] =
            Layout::vertical([Constraint::Length(11), Constraint::Min(8)]).areas(area);
        self.table.render::<LocationColumn>(
            frame,
            table_area,
            "Locations",
            locations,
            ActionsMode::Full,
            true,
            throbber,
        );
        self.map
            .render(frame, map_area, locations.items(), locations.selected_item());
    }
}
