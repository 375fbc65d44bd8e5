pub mod connector;
pub mod core;

pub use connector::{build_client, Crex24Builder, Crex24Client};
pub use core::{config::Crex24Config, errors::ExchangeError, types::*};
