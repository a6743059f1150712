pub mod app;
pub mod backend;
pub mod builder;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod selection;
pub mod session;
pub mod state;
pub mod stats;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
