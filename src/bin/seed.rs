//! Development seed: demo users, a demo portfolio and a few market snapshots.
//! Running it twice leaves the database unchanged.

use investa::domain::market::{MarketDataRepository, MarketSnapshot};
use investa::domain::password::PasswordHashingService;
use investa::domain::portfolio::{NewHolding, PortfolioRepository};
use investa::domain::users::{NewUser, RiskTolerance, UserRepository};
use investa::infrastructure::config::AppConfig;
use investa::infrastructure::db;
use investa::infrastructure::password::PasswordService;
use investa::infrastructure::repositories::market_data::PostgresMarketDataRepository;
use investa::infrastructure::repositories::portfolio::PostgresPortfolioRepository;
use investa::infrastructure::repositories::users::PostgresUserRepository;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use time::macros::date;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_PASSWORD: &str = "demo1234";

const DEMO_USERS: [(&str, RiskTolerance); 3] = [
    ("demo@example.com", RiskTolerance::Medium),
    ("conservative@example.com", RiskTolerance::Low),
    ("aggressive@example.com", RiskTolerance::High),
];

// (symbol, quantity, average price, price, volume, change percent) in minor units
const DEMO_HOLDINGS: [(&str, i64, i64, i64, i64, i64); 4] = [
    ("AAPL", 10, 15000, 17550, 45_000_000, 230),
    ("GOOGL", 5, 250000, 265000, 1_200_000, -120),
    ("TSLA", 20, 20000, 22000, 35_000_000, 580),
    ("MSFT", 15, 30000, 32000, 20_000_000, 150),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "seed=info,investa=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    let config = AppConfig::from_env()?;
    let pool = db::create_pool(&config.database).await?;
    db::migrate(&pool).await?;

    let users = PostgresUserRepository::new(pool.clone());
    let portfolio = PostgresPortfolioRepository::new(pool.clone());
    let market_data = PostgresMarketDataRepository::new(pool.clone());
    let hasher = PasswordService::new(config.password_params.clone());

    seed_users(&users, &hasher).await?;
    seed_portfolio(&users, &portfolio).await?;
    seed_market_data(&market_data).await?;

    tracing::info!("Database seeding completed");
    Ok(())
}

async fn seed_users(
    users: &dyn UserRepository,
    hasher: &dyn PasswordHashingService,
) -> anyhow::Result<()> {
    for (email, risk_tolerance) in DEMO_USERS {
        if users.find_by_email(email).await?.is_some() {
            tracing::info!(email, "User already exists, skipping");
            continue;
        }

        users
            .create(NewUser {
                email: email.to_string(),
                password_hash: hasher.hash_password(DEMO_PASSWORD).await?,
                risk_tolerance,
            })
            .await?;
        tracing::info!(email, %risk_tolerance, "Created user");
    }
    Ok(())
}

async fn seed_portfolio(
    users: &dyn UserRepository,
    portfolio: &dyn PortfolioRepository,
) -> anyhow::Result<()> {
    let Some(demo) = users.find_by_email(DEMO_USERS[0].0).await? else {
        tracing::warn!("Demo user not found, skipping portfolio");
        return Ok(());
    };

    if !portfolio.list_for_user(demo.id).await?.is_empty() {
        tracing::info!("Demo portfolio already exists, skipping");
        return Ok(());
    }

    for (symbol, quantity, average_price, ..) in DEMO_HOLDINGS {
        portfolio
            .create(NewHolding {
                user_id: demo.id,
                symbol: symbol.to_string(),
                quantity: Decimal::from(quantity),
                average_price: Decimal::new(average_price, 2),
                purchase_date: Some(date!(2024 - 01 - 01)),
            })
            .await?;
    }
    tracing::info!(count = DEMO_HOLDINGS.len(), "Created demo holdings");
    Ok(())
}

async fn seed_market_data(market_data: &dyn MarketDataRepository) -> anyhow::Result<()> {
    let now = OffsetDateTime::now_utc();
    for (symbol, _, _, price, volume, change_percent) in DEMO_HOLDINGS {
        market_data
            .upsert(MarketSnapshot {
                symbol: symbol.to_string(),
                price: Decimal::new(price, 2),
                volume: Some(volume),
                change_percent: Some(Decimal::new(change_percent, 2)),
                last_updated: now,
                data_source: "seed".to_string(),
            })
            .await?;
    }
    tracing::info!(count = DEMO_HOLDINGS.len(), "Upserted market snapshots");
    Ok(())
}
