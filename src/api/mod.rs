//! Address checker operations and the request pipeline behind them.

pub mod client;
pub mod endpoint;
pub mod request;

pub use client::NzPostClient;
pub use endpoint::{AddressType, Endpoint};
pub use request::ApiRequest;
