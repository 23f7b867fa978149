pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reconcile;
pub mod roster;
pub mod state;
pub mod status;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
