//! OAuth2 client-credentials authentication and the token lifecycle.

pub mod oauth2;
pub mod token;
pub mod token_manager;

pub use token::Token;
pub use token_manager::TokenManager;
