pub mod config;
pub mod error;
pub mod render;
pub mod services;
pub mod transport;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
