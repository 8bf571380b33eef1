use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::modal::{ConfirmDelete, EditorModal, Modal};
use crate::ui_utils::{form_height, popup_area, popup_frame, render_form};

/// Draws whichever modal is open on top of the page.
#[derive(Debug, Default)]
pub struct ModalView;

impl ModalView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, modal: &Modal) {
        match modal {
            Modal::Editor(editor) => self.render_editor(frame, area, editor),
            Modal::ConfirmDelete(confirm) => self.render_confirm(frame, area, confirm),
        }
    }

    fn render_editor(&self, frame: &mut Frame, area: Rect, editor: &EditorModal) {
        let height = form_height(&editor.form, &editor.errors) + 4;
        let popup = popup_area(area, 72, height);
        let inner = popup_frame(frame, popup, &editor.title(), editor.busy);

        let [form_area, hint_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        render_form(frame, form_area, &editor.form, &editor.errors);
        frame.render_widget(
            Line::from("Enter save · Esc cancel").dark_gray(),
            hint_area,
        );
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup = popup_area(area, 60, 7);
        let title = format!("Delete {}", confirm.resource.label().to_lowercase());
        let inner = popup_frame(frame, popup, &title, confirm.busy);

        let body = vec![
            Line::from("Are you sure you want to delete"),
            Line::from(Span::styled(confirm.label.clone(), Style::new().bold())),
            Line::from(""),
            Line::from(vec![
                Span::styled("y/Enter", Style::new().red().bold()),
                Span::raw(" delete   "),
                Span::styled("n/Esc", Style::new().bold()),
                Span::raw(" cancel"),
            ]),
        ];
        frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: true }), inner);
    }
}
