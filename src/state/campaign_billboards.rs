//! State for managing one campaign's billboards.

use uuid::Uuid;

use super::CollectionState;
use crate::columns::ActionsMode;
use crate::data::{Billboard, Campaign};

/// Which of the two tables has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillboardPane {
    #[default]
    Current,
    Available,
}

impl BillboardPane {
    pub fn mode(self) -> ActionsMode {
        match self {
            BillboardPane::Current => ActionsMode::Current,
            BillboardPane::Available => ActionsMode::Available,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            BillboardPane::Current => "Current billboards",
            BillboardPane::Available => "Available billboards",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CampaignBillboardsState {
    pub campaign_id: Uuid,
    /// Header data; `None` until loaded.
    pub campaign: Option<Campaign>,
    pub current: CollectionState<Billboard>,
    pub available: CollectionState<Billboard>,
    pub focus: BillboardPane,
}

impl CampaignBillboardsState {
    pub fn new(campaign_id: Uuid) -> Self {
        Self {
            campaign_id,
            campaign: None,
            current: CollectionState::new(),
            available: CollectionState::new(),
            focus: BillboardPane::Current,
        }
    }

    pub fn begin_loading(&mut self) {
        self.current.begin_loading();
        self.available.begin_loading();
    }

    /// Installs a fresh campaign snapshot and its availability list.
    pub fn replace(&mut self, campaign: Campaign, available: Vec<Billboard>) {
        self.current.replace(campaign.billboards.clone());
        self.available.replace(available);
        self.campaign = Some(campaign);
    }

    pub fn fail(&mut self) {
        self.current.fail();
        self.available.fail();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            BillboardPane::Current => BillboardPane::Available,
            BillboardPane::Available => BillboardPane::Current,
        };
    }

    pub fn focused(&self) -> &CollectionState<Billboard> {
        match self.focus {
            BillboardPane::Current => &self.current,
            BillboardPane::Available => &self.available,
        }
    }

    pub fn focused_mut(&mut self) -> &mut CollectionState<Billboard> {
        match self.focus {
            BillboardPane::Current => &mut self.current,
            BillboardPane::Available => &mut self.available,
        }
    }
}
