use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, TableState, Wrap},
    Frame,
};

use crate::forms::{FieldKind, Form, ValidationErrors};

/// Creates a TableState with the selection clamped to the visible rows
pub fn create_table_state(selected: usize, row_count: usize) -> TableState {
    if row_count == 0 {
        TableState::default()
    } else {
        TableState::default().with_selected(Some(selected.min(row_count - 1)))
    }
}

/// Creates a block with conditional focus styling (yellow border when focused)
pub fn focused_block(title: &str, is_focused: bool) -> Block<'_> {
    let block = Block::bordered().title(title);
    if is_focused {
        block.border_style(Style::new().yellow())
    } else {
        block
    }
}

/// Centered rectangle of `width` x `height`, shrunk to fit `area`
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    popup
}

/// Clears `area` and draws a bordered popup frame, returning its inner area
pub fn popup_frame(frame: &mut Frame, area: Rect, title: &str, busy: bool) -> Rect {
    frame.render_widget(Clear, area);
    let block = if busy {
        Block::bordered()
            .title(format!("{title} (working...)"))
            .border_style(Style::new().dark_gray())
    } else {
        Block::bordered()
            .title(title.to_string())
            .border_style(Style::new().cyan())
    };
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Lines for a form: one `label: value` row per field, focused row highlighted,
/// field errors underneath in red
pub fn form_lines(form: &Form, errors: &ValidationErrors) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let marker = if focused { "> " } else { "  " };
        let mut value = field.display_value();
        if focused && field.kind != FieldKind::Select {
            value.push('█');
        }
        let label_style = if focused {
            Style::new().bold().yellow()
        } else {
            Style::new().gray()
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<16}", format!("{}:", field.label)), label_style),
            Span::raw(value),
        ]));
        if let Some(message) = errors.for_field(field.key) {
            lines.push(Line::from(Span::styled(
                format!("    {message}"),
                Style::new().red(),
            )));
        }
    }
    lines
}

/// Renders a form inside `area`
pub fn render_form(frame: &mut Frame, area: Rect, form: &Form, errors: &ValidationErrors) {
    frame.render_widget(
        Paragraph::new(form_lines(form, errors)).wrap(Wrap { trim: false }),
        area,
    );
}

/// Height a form needs, including error lines
pub fn form_height(form: &Form, errors: &ValidationErrors) -> u16 {
    let error_lines = form
        .fields
        .iter()
        .filter(|f| errors.for_field(f.key).is_some())
        .count();
    (form.fields.len() + error_lines) as u16
}
