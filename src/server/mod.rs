pub mod api_error;
mod auth_routes;
pub mod config;
pub mod extract;
mod favorites_routes;
mod http_layers;
mod library_routes;
pub mod server;
pub mod session;
pub mod state;
mod user_routes;

pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
pub use state::ServerState;
