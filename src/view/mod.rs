pub mod controller;
pub mod render;
pub mod state;

pub use controller::SearchView;
pub use state::{Action, Phase, ViewState};
