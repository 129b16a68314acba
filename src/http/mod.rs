pub mod app_error;
pub mod datasets;
pub mod health;
pub mod server;
pub mod state;
