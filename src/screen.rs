use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Stylize,
    text::{Line, Span},
    widgets::Block,
    Frame,
};

use crate::notifications::ToastLevel;
use crate::pages::auth::AuthPage;
use crate::pages::billboards::BillboardsPage;
use crate::pages::campaign_billboards::CampaignBillboardsPage;
use crate::pages::campaigns::CampaignsPage;
use crate::pages::help::HelpPage;
use crate::pages::locations::LocationsPage;
use crate::pages::main_menu::MainMenu;
use crate::pages::modal::ModalView;
use crate::render_context::RenderContext;
use crate::routes::Route;
use crate::ui_utils::popup_area;

#[derive(Debug, Default)]
pub struct Screen {
    main_menu: MainMenu,
    auth: AuthPage,
    billboards: BillboardsPage,
    locations: LocationsPage,
    campaigns: CampaignsPage,
    campaign_billboards: CampaignBillboardsPage,
    modal: ModalView,
    help: HelpPage,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, frame: &mut Frame, ctx: &RenderContext) {
        let area = frame.area();
        let title = Line::from(" Billboard Console ")
            .bold()
            .blue()
            .left_aligned();
        let block = Block::bordered().title(title);
        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        // Split into main content and bottom status bar
        let vlayout = Layout::new(
            Direction::Vertical,
            [Constraint::Min(0), Constraint::Length(1)],
        )
        .split(inner_area);

        let page_area = if ctx.route.is_auth() {
            vlayout[0]
        } else {
            let layout = Layout::new(
                Direction::Vertical,
                [Constraint::Length(3), Constraint::Min(0)],
            )
            .split(vlayout[0]);
            self.main_menu.render(frame, layout[0], ctx.route);
            layout[1]
        };

        match ctx.route {
            Route::SignIn | Route::SignUp => self.auth.render(frame, page_area, ctx.auth),
            Route::Billboards => {
                self.billboards
                    .render(frame, page_area, ctx.billboards, ctx.throbber)
            }
            Route::Locations => self.locations.render(frame, page_area, ctx.locations, ctx.throbber),
            Route::Campaigns => self.campaigns.render(frame, page_area, ctx.campaigns, ctx.throbber),
            Route::CampaignBillboards(_) => {
                if let Some(state) = ctx.campaign_billboards {
                    self.campaign_billboards
                        .render(frame, page_area, state, ctx.throbber);
                }
            }
        }

        if let Some(modal) = ctx.modal {
            self.modal.render(frame, page_area, modal);
        }

        if ctx.show_help {
            self.help.render(frame, popup_area(page_area, 70, 32));
        }

        // Render the status bar on bottom
        let status = Span::raw(ctx.status_text());
        let status = match ctx.toast.map(|t| t.level) {
            Some(ToastLevel::Error) if ctx.activity.is_none() => status.light_red(),
            Some(ToastLevel::Success) if ctx.activity.is_none() => status.light_green(),
            _ => status.white(),
        };
        let status_line = Line::from(vec![
            status,
            Span::raw(format!("  |  {}", ctx.key_hints())).white(),
        ])
        .on_dark_gray();
        frame.render_widget(status_line, vlayout[1]);
    }
}
