pub mod config;
pub mod domain;
pub mod outbound;
pub mod outcome;

pub use domain::auth::command::AuthCommand;
pub use domain::auth::service::AuthService;
pub use outbound::repositories;
pub use outcome::ErrorInfo;
pub use outcome::ErrorKind;
pub use outcome::Outcome;
