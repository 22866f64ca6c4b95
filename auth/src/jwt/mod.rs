pub mod claims;
pub mod errors;
pub mod handler;
pub mod provider;

pub use claims::Claims;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use provider::TokenProvider;
