pub mod config;
pub mod credentials;
pub mod errors;
pub mod kernel;
pub mod types;
