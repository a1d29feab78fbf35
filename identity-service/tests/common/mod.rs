use std::sync::Arc;
use std::sync::Once;

use auth::JwtHandler;
use auth::PasswordHasher;
use identity_service::config::Config;
use identity_service::domain::auth::models::CredentialDto;
use identity_service::domain::auth::models::LoginRequest;
use identity_service::domain::auth::models::RegistrationRequest;
use identity_service::outbound::repositories::InMemoryCredentialRepository;
use identity_service::outbound::JwtTokenService;
use identity_service::AuthCommand;
use identity_service::AuthService;
use identity_service::ErrorInfo;

pub const SECRET: &str = "test_secret_key_at_least_32_bytes!";

pub type TestAuthService = AuthService<InMemoryCredentialRepository, PasswordHasher>;
pub type TestAuthCommand = AuthCommand<TestAuthService, JwtTokenService>;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "identity_service=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Fully wired application over the in-memory store
pub struct TestApp {
    pub repository: Arc<InMemoryCredentialRepository>,
    pub command: TestAuthCommand,
}

impl TestApp {
    pub fn spawn() -> Self {
        let config = Config::from_toml(&format!(
            r#"
            [token]
            audience = "app"
            expiration_minutes = 30
            secret = "{SECRET}"
            "#
        ))
        .expect("Failed to parse test config");

        Self::with_config(&config)
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();

        let repository = Arc::new(InMemoryCredentialRepository::new());
        let password_service = Arc::new(PasswordHasher::new());
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            password_service,
        ));
        let token_service = Arc::new(
            JwtTokenService::from_config(&config.token).expect("Failed to build token service"),
        );

        let command =
            AuthCommand::new(auth_service, token_service).with_policy(config.token_policy());

        Self {
            repository,
            command,
        }
    }

    pub fn register(&self, email: &str, password: &str) -> Result<CredentialDto, ErrorInfo> {
        self.command
            .register(RegistrationRequest::new(email, password, password))
    }

    pub fn login(&self, email: &str, password: &str) -> Result<String, ErrorInfo> {
        self.command.login(LoginRequest::new(email, password))
    }

    /// A verifier for the same secret, for inspecting issued tokens.
    pub fn jwt_handler(&self) -> JwtHandler {
        JwtHandler::new(SECRET.as_bytes()).with_audience("app")
    }
}
