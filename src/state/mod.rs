//! Page state modules for the billboard console.
//!
//! Each view keeps its state in an isolated struct so it can be unit tested
//! without a terminal.
//!
//! # Architecture
//!
//! ```text
//! App
//! ├── CollectionState<Billboard>  - Billboards table
//! ├── CollectionState<Location>   - Locations table
//! ├── CollectionState<Campaign>   - Campaigns table
//! ├── CampaignBillboardsState     - Current / available panes for one campaign
//! └── AuthState                   - Sign-in / sign-up form
//! ```

mod auth;
mod campaign_billboards;
mod collection;

pub use auth::{AuthMode, AuthState};
pub use campaign_billboards::{BillboardPane, CampaignBillboardsState};
pub use collection::CollectionState;
