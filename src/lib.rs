pub mod choropleth;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod finals_fetch;
pub mod http_client;
pub mod page;
pub mod server;
pub mod win_summary;
