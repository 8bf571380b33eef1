pub mod auth;
pub mod billboards;
pub mod campaign_billboards;
pub mod campaigns;
pub mod help;
pub mod items_map;
pub mod locations;
pub mod main_menu;
pub mod modal;
pub mod resource_table;
