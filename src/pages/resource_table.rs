use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Cell, Paragraph, Row, Table},
    Frame,
};
use throbber_widgets_tui::{Throbber, ThrobberState, BRAILLE_SIX};

use crate::columns::{ActionsMode, Column};
use crate::state::CollectionState;
use crate::ui_utils::{create_table_state, focused_block};

/// Generic paginated table over any column set.
#[derive(Debug, Default)]
pub struct ResourceTable;

impl ResourceTable {
    pub fn new() -> Self {
        Self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render<C: Column>(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        state: &CollectionState<C::Record>,
        mode: ActionsMode,
        focused: bool,
        throbber: &ThrobberState,
    ) {
        let block = focused_block(title, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.shows_spinner() {
            let spinner = Throbber::default()
                .label("Loading...")
                .throbber_set(BRAILLE_SIX)
                .style(Style::new().cyan());
            frame.render_stateful_widget(spinner, inner, &mut throbber.clone());
            return;
        }

        let [table_area, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        if state.is_empty() {
            let message = if state.is_loaded() {
                "No items to display"
            } else {
                "Not loaded (R to reload)"
            };
            frame.render_widget(
                Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .style(Style::new().dark_gray()),
                table_area,
            );
        } else {
            let header = Row::new(C::ALL.iter().map(|c| Cell::from(c.title())))
                .style(Style::new().bold().yellow());
            let rows = state.page_items().iter().map(|record| {
                Row::new(
                    C::ALL
                        .iter()
                        .map(|c| Cell::from(c.render(record, mode).display())),
                )
            });
            let widths = C::ALL.iter().map(|c| Constraint::Fill(c.width()));
            let highlight = if focused {
                Style::new().reversed()
            } else {
                Style::new().bold()
            };
            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(highlight)
                .highlight_symbol(">> ");
            let mut table_state = create_table_state(state.selected, state.page_items().len());
            frame.render_stateful_widget(table, table_area, &mut table_state);
        }

        let mut footer = format!("{}  ({} total)", state.pager.label(state.len()), state.len());
        if state.loading {
            footer.push_str("  refreshing...");
        }
        frame.render_widget(
            Line::from(footer).right_aligned().dark_gray(),
            footer_area,
        );
    }
}
