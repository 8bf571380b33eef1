use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::state::{AuthMode, AuthState};
use crate::ui_utils::{form_height, popup_area, render_form};

/// Credentials form for sign-in and sign-up.
#[derive(Debug, Default)]
pub struct AuthPage;

impl AuthPage {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, auth: &AuthState) {
        let height = form_height(&auth.form, &auth.errors) + 6;
        let popup = popup_area(area, 60, height);

        let title = if auth.busy {
            format!("{} (working...)", auth.title())
        } else {
            auth.title().to_string()
        };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::new().cyan());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let [form_area, hint_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(inner);
        render_form(frame, form_area, &auth.form, &auth.errors);

        let switch = match auth.mode {
            AuthMode::SignIn => "No account? Ctrl-N to sign up",
            AuthMode::SignUp => "Have an account? Ctrl-N to sign in",
        };
        frame.render_widget(
            Paragraph::new(vec![
                Line::from("Enter to submit").dark_gray(),
                Line::from(switch).dark_gray(),
            ]),
            hint_area,
        );
    }
}
