use crate::domain::auth::TokenService;
use crate::domain::market::{MarketDataProvider, MarketDataRepository};
use crate::domain::password::PasswordHashingService;
use crate::domain::portfolio::PortfolioRepository;
use crate::domain::users::UserRepository;
use crate::infrastructure::auth::JwtTokenService;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::market::YahooFinanceProvider;
use crate::infrastructure::password::PasswordService;
use crate::infrastructure::repositories::market_data::PostgresMarketDataRepository;
use crate::infrastructure::repositories::portfolio::PostgresPortfolioRepository;
use crate::infrastructure::repositories::users::PostgresUserRepository;
use std::sync::Arc;

/// Application state shared across handlers
///
/// Every collaborator sits behind a trait object so tests can swap in the
/// in-memory repositories from `repositories::mock`.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<AppConfig>,
    pub token_service: Arc<dyn TokenService>,
    pub password_service: Arc<dyn PasswordHashingService>,
    pub users: Arc<dyn UserRepository>,
    pub portfolio: Arc<dyn PortfolioRepository>,
    pub market_data: Arc<dyn MarketDataRepository>,
    pub market_provider: Arc<dyn MarketDataProvider>,
}

impl AppState {
    /// Wire the production collaborators: Postgres repositories, HMAC tokens
    /// on the system clock and the Yahoo Finance provider.
    pub fn new(pool: DbPool, config: AppConfig) -> anyhow::Result<Self> {
        let token_service = JwtTokenService::from_config(&config.auth, Arc::new(SystemClock))?;
        let password_service = PasswordService::new(config.password_params.clone());
        let market_provider = YahooFinanceProvider::new(&config.market)?;

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            portfolio: Arc::new(PostgresPortfolioRepository::new(pool.clone())),
            market_data: Arc::new(PostgresMarketDataRepository::new(pool.clone())),
            token_service: Arc::new(token_service),
            password_service: Arc::new(password_service),
            market_provider: Arc::new(market_provider),
            config: Arc::new(config),
            pool,
        })
    }
}
