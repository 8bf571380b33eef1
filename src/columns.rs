//! Per-resource column definitions.
//!
//! Each resource has a closed enum of columns; rendering a cell is an
//! exhaustive `match`, so adding a column without a formatter fails to compile.

use crate::data::{Billboard, Campaign, HateoasLink, Location, ADD_TO_CAMPAIGN, REMOVE_FROM_CAMPAIGN};

/// Which affordances the synthetic actions column offers.
///
/// The modes are exclusive: a table is either the full CRUD table or one of
/// the two panes of the campaign-billboards view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionsMode {
    #[default]
    Full,
    /// Billboards currently assigned to a campaign.
    Current,
    /// Billboards that may be assigned to a campaign.
    Available,
}

/// An affordance offered on a table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
    /// Open the campaign's billboards view.
    ManageBillboards,
    AddToCampaign(HateoasLink),
    RemoveFromCampaign(HateoasLink),
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit => "Edit",
            RowAction::Delete => "Delete",
            RowAction::ManageBillboards => "Billboards",
            RowAction::AddToCampaign(_) => "Add",
            RowAction::RemoveFromCampaign(_) => "Remove",
        }
    }

    /// Key that triggers the action from the table.
    pub fn key_hint(&self) -> &'static str {
        match self {
            RowAction::Edit => "e",
            RowAction::Delete => "d",
            RowAction::ManageBillboards => "Enter",
            RowAction::AddToCampaign(_) => "a",
            RowAction::RemoveFromCampaign(_) => "r",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Actions(Vec<RowAction>),
}

impl CellValue {
    /// Plain text for the cell, e.g. `[e] Edit [d] Delete` for actions.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Actions(actions) => actions
                .iter()
                .map(|a| format!("[{}] {}", a.key_hint(), a.label()))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// A closed set of columns for one record type.
pub trait Column: Copy + 'static {
    type Record;

    /// Columns in display order.
    const ALL: &'static [Self];

    fn title(self) -> &'static str;

    fn render(self, record: &Self::Record, mode: ActionsMode) -> CellValue;

    /// Relative width used by the table layout.
    fn width(self) -> u16 {
        1
    }
}

/// Renders a full row.
pub fn render_row<C: Column>(record: &C::Record, mode: ActionsMode) -> Vec<CellValue> {
    C::ALL.iter().map(|c| c.render(record, mode)).collect()
}

/// The actions offered on `record`, or nothing if the column set has no actions column.
pub fn available_actions<C: Column>(record: &C::Record, mode: ActionsMode) -> Vec<RowAction> {
    C::ALL
        .iter()
        .find_map(|c| match c.render(record, mode) {
            CellValue::Actions(actions) => Some(actions),
            CellValue::Text(_) => None,
        })
        .unwrap_or_default()
}

/// `12.5` -> `12.50 mt`
pub fn format_meters(value: f64) -> String {
    format!("{value:.2} mt")
}

/// `250` -> `$ 250.00`
pub fn format_dollars(value: f64) -> String {
    format!("$ {value:.2}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillboardColumn {
    Location,
    WidthMt,
    HeightMt,
    DollarsPerDay,
    Actions,
}

impl Column for BillboardColumn {
    type Record = Billboard;

    const ALL: &'static [Self] = &[
        BillboardColumn::Location,
        BillboardColumn::WidthMt,
        BillboardColumn::HeightMt,
        BillboardColumn::DollarsPerDay,
        BillboardColumn::Actions,
    ];

    fn title(self) -> &'static str {
        match self {
            BillboardColumn::Location => "Location",
            BillboardColumn::WidthMt => "Width",
            BillboardColumn::HeightMt => "Height",
            BillboardColumn::DollarsPerDay => "$/day",
            BillboardColumn::Actions => "Actions",
        }
    }

    fn render(self, billboard: &Billboard, mode: ActionsMode) -> CellValue {
        match self {
            BillboardColumn::Location => CellValue::Text(billboard.location.summary()),
            BillboardColumn::WidthMt => CellValue::Text(format_meters(billboard.width_mt)),
            BillboardColumn::HeightMt => CellValue::Text(format_meters(billboard.height_mt)),
            BillboardColumn::DollarsPerDay => {
                CellValue::Text(format_dollars(billboard.dollars_per_day))
            }
            BillboardColumn::Actions => CellValue::Actions(billboard_actions(billboard, mode)),
        }
    }

    fn width(self) -> u16 {
        match self {
            BillboardColumn::Location => 4,
            BillboardColumn::Actions => 3,
            _ => 1,
        }
    }
}

/// Association affordances appear only when the server declared the link.
fn billboard_actions(billboard: &Billboard, mode: ActionsMode) -> Vec<RowAction> {
    match mode {
        ActionsMode::Full => vec![RowAction::Edit, RowAction::Delete],
        ActionsMode::Current => billboard
            .action_link(REMOVE_FROM_CAMPAIGN)
            .map(|link| RowAction::RemoveFromCampaign(link.clone()))
            .into_iter()
            .collect(),
        ActionsMode::Available => billboard
            .action_link(ADD_TO_CAMPAIGN)
            .map(|link| RowAction::AddToCampaign(link.clone()))
            .into_iter()
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationColumn {
    Address,
    City,
    State,
    CountryCode,
    Lat,
    Lng,
    Actions,
}

impl Column for LocationColumn {
    type Record = Location;

    const ALL: &'static [Self] = &[
        LocationColumn::Address,
        LocationColumn::City,
        LocationColumn::State,
        LocationColumn::CountryCode,
        LocationColumn::Lat,
        LocationColumn::Lng,
        LocationColumn::Actions,
    ];

    fn title(self) -> &'static str {
        match self {
            LocationColumn::Address => "Address",
            LocationColumn::City => "City",
            LocationColumn::State => "State",
            LocationColumn::CountryCode => "Country",
            LocationColumn::Lat => "Lat",
            LocationColumn::Lng => "Lng",
            LocationColumn::Actions => "Actions",
        }
    }

    fn render(self, location: &Location, _mode: ActionsMode) -> CellValue {
        match self {
            LocationColumn::Address => CellValue::Text(location.address.clone()),
            LocationColumn::City => CellValue::Text(location.city.clone()),
            LocationColumn::State => CellValue::Text(location.state.clone()),
            LocationColumn::CountryCode => CellValue::Text(location.country_code.clone()),
            LocationColumn::Lat => CellValue::Text(format!("{:.4}", location.lat)),
            LocationColumn::Lng => CellValue::Text(format!("{:.4}", location.lng)),
            LocationColumn::Actions => CellValue::Actions(vec![RowAction::Edit, RowAction::Delete]),
        }
    }

    fn width(self) -> u16 {
        match self {
            LocationColumn::Address => 3,
            LocationColumn::Actions => 3,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignColumn {
    Name,
    StartDate,
    EndDate,
    TotalDollarAmount,
    Billboards,
    Actions,
}

impl Column for CampaignColumn {
    type Record = Campaign;

    const ALL: &'static [Self] = &[
        CampaignColumn::Name,
        CampaignColumn::StartDate,
        CampaignColumn::EndDate,
        CampaignColumn::TotalDollarAmount,
        CampaignColumn::Billboards,
        CampaignColumn::Actions,
    ];

    fn title(self) -> &'static str {
        match self {
            CampaignColumn::Name => "Name",
            CampaignColumn::StartDate => "Start",
            CampaignColumn::EndDate => "End",
            CampaignColumn::TotalDollarAmount => "Total",
            CampaignColumn::Billboards => "Billboards",
            CampaignColumn::Actions => "Actions",
        }
    }

    fn render(self, campaign: &Campaign, _mode: ActionsMode) -> CellValue {
        match self {
            CampaignColumn::Name => CellValue::Text(campaign.name.clone()),
            CampaignColumn::StartDate => CellValue::Text(campaign.start_date.to_string()),
            CampaignColumn::EndDate => CellValue::Text(campaign.end_date.to_string()),
            CampaignColumn::TotalDollarAmount => {
                CellValue::Text(format_dollars(campaign.total_dollar_amount))
            }
            CampaignColumn::Billboards => CellValue::Text(campaign.billboards.len().to_string()),
            CampaignColumn::Actions => CellValue::Actions(vec![
                RowAction::Edit,
                RowAction::Delete,
                RowAction::ManageBillboards,
            ]),
        }
    }

    fn width(self) -> u16 {
        match self {
            CampaignColumn::Name => 3,
            CampaignColumn::Actions => 4,
            _ => 1,
        }
    }
}
