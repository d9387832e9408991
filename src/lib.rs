pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod view;

pub use config::Config;
pub use error::CatalogError;
pub use models::book::{BookDetail, BookSummary};
pub use services::catalog::{CatalogApi, HttpCatalog};
pub use view::{Phase, SearchView, ViewState};
