pub mod dto;
pub mod error;
pub mod handlers;
pub mod server;
pub mod service;

pub use error::ApiError;
pub use server::{build_router, start, AppState, ServerConfig, ServerHandle};
pub use service::TaskService;
