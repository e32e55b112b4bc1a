pub mod access_jwt;
pub mod bearer;
pub mod error;
pub mod factory;
pub mod keys;
pub mod permissions;

pub use access_jwt::{AuthService, VerifiedAccessToken};
pub use error::AuthError;
pub use factory::build_auth_service;
pub use keys::{JwksKeys, KeyError, KeyResolver, StaticKey};
