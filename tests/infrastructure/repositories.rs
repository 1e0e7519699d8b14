use crate::common;

use investa::domain::market::{MarketDataRepository, MarketSnapshot};
use investa::domain::portfolio::{NewHolding, PortfolioRepository, UpdateHolding};
use investa::domain::users::{NewUser, RiskTolerance, UserRepository};
use investa::infrastructure::repositories::market_data::PostgresMarketDataRepository;
use investa::infrastructure::repositories::portfolio::PostgresPortfolioRepository;
use investa::infrastructure::repositories::users::PostgresUserRepository;
use investa::shared::error::is_unique_violation;
use rust_decimal::Decimal;
use serial_test::serial;
use time::macros::{date, datetime};
use uuid::Uuid;

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        risk_tolerance: RiskTolerance::High,
    }
}

fn new_holding(user_id: Uuid, symbol: &str) -> NewHolding {
    NewHolding {
        user_id,
        symbol: symbol.to_string(),
        quantity: Decimal::new(10, 0),
        average_price: Decimal::new(15025, 2),
        purchase_date: Some(date!(2024 - 01 - 15)),
    }
}

#[tokio::test]
#[serial]
async fn test_postgres_user_repo_create_and_find() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let repo = PostgresUserRepository::new(pool.clone());

    let created = repo
        .create(new_user("repo@example.com"))
        .await
        .expect("Failed to create user");
    assert!(created.is_active);
    assert_eq!(created.risk_tolerance, RiskTolerance::High);

    let by_email = repo
        .find_by_email("repo@example.com")
        .await
        .unwrap()
        .expect("User not found by email");
    assert_eq!(by_email.id, created.id);

    let by_id = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(by_id.map(|u| u.email), Some("repo@example.com".to_string()));

    assert!(repo.find_by_email("missing@example.com").await.unwrap().is_none());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_user_repo_duplicate_email() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let repo = PostgresUserRepository::new(pool.clone());
    repo.create(new_user("dup@example.com")).await.unwrap();

    let err = repo.create(new_user("dup@example.com")).await.unwrap_err();
    assert!(is_unique_violation(&err));

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_user_repo_update_risk_tolerance() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let repo = PostgresUserRepository::new(pool.clone());
    let created = repo.create(new_user("risk@example.com")).await.unwrap();

    let updated = repo
        .update_risk_tolerance(created.id, RiskTolerance::Low)
        .await
        .unwrap();
    assert_eq!(updated.risk_tolerance, RiskTolerance::Low);
    assert!(updated.updated_at >= created.updated_at);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_portfolio_repo_crud() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let users = PostgresUserRepository::new(pool.clone());
    let repo = PostgresPortfolioRepository::new(pool.clone());
    let user = users.create(new_user("holder@example.com")).await.unwrap();

    let aapl = repo.create(new_holding(user.id, "AAPL")).await.unwrap();
    repo.create(new_holding(user.id, "MSFT")).await.unwrap();
    assert_eq!(aapl.average_price, Decimal::new(15025, 2));

    let listed = repo.list_for_user(user.id).await.unwrap();
    let mut symbols: Vec<_> = listed.iter().map(|h| h.symbol.as_str()).collect();
    symbols.sort();
    assert_eq!(symbols, vec!["AAPL", "MSFT"]);

    let found = repo.find_by_symbol(user.id, "AAPL").await.unwrap();
    assert_eq!(found.map(|h| h.id), Some(aapl.id));

    let updated = repo
        .update(
            aapl.id,
            user.id,
            UpdateHolding {
                quantity: Some(Decimal::new(125, 1)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("Holding not updated");
    assert_eq!(updated.quantity, Decimal::new(125, 1));
    assert_eq!(updated.average_price, aapl.average_price);

    // Another user's id never matches
    assert!(repo.find_for_user(aapl.id, Uuid::new_v4()).await.unwrap().is_none());
    assert!(!repo.delete(aapl.id, Uuid::new_v4()).await.unwrap());

    assert!(repo.delete(aapl.id, user.id).await.unwrap());
    assert!(repo.find_for_user(aapl.id, user.id).await.unwrap().is_none());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_portfolio_repo_unique_symbol_per_user() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let users = PostgresUserRepository::new(pool.clone());
    let repo = PostgresPortfolioRepository::new(pool.clone());
    let first = users.create(new_user("first@example.com")).await.unwrap();
    let second = users.create(new_user("second@example.com")).await.unwrap();

    repo.create(new_holding(first.id, "AAPL")).await.unwrap();
    repo.create(new_holding(second.id, "AAPL")).await.unwrap();

    let err = repo.create(new_holding(first.id, "AAPL")).await.unwrap_err();
    assert!(is_unique_violation(&err));

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_market_data_upsert_overwrites() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let repo = PostgresMarketDataRepository::new(pool.clone());
    let mut snapshot = MarketSnapshot {
        symbol: "AAPL".to_string(),
        price: Decimal::new(17550, 2),
        volume: Some(1_000),
        change_percent: Some(Decimal::new(230, 2)),
        last_updated: datetime!(2024-01-02 15:00 UTC),
        data_source: "test".to_string(),
    };
    repo.upsert(snapshot.clone()).await.unwrap();

    snapshot.price = Decimal::new(18000, 2);
    snapshot.last_updated = datetime!(2024-01-03 15:00 UTC);
    repo.upsert(snapshot).await.unwrap();

    let (count, price): (i64, Decimal) = sqlx::query_as(
        "SELECT COUNT(*) OVER (), price FROM market_data WHERE symbol = 'AAPL'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
    assert_eq!(price, Decimal::new(18000, 2));

    common::cleanup_test_db(&pool).await;
}
