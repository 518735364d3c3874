mod service;
mod tokens;

pub use service::{AuthService, AuthenticatedUser};
pub use tokens::{Claims, TokenIssuer, TokenPair};
