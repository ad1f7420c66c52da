pub mod api_error;
mod artist_routes;
pub mod config;
mod extract;
mod http_layers;
pub mod server;
pub mod state;

pub use api_error::ApiError;
pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
