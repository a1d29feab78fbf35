pub mod crypto;
pub mod repositories;

pub use crypto::JwtTokenService;
