//! In-memory repositories and market provider used by tests and local runs
//! without a database.

use crate::domain::market::{
    HistoryInterval, HistoryPeriod, MarketDataProvider, MarketDataRepository, MarketSnapshot,
    PriceBar, Quote, SymbolMatch,
};
use crate::domain::portfolio::{Holding, NewHolding, PortfolioRepository, UpdateHolding};
use crate::domain::users::{NewUser, RiskTolerance, User, UserRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use time::OffsetDateTime;
use uuid::Uuid;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
    lookups: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly, bypassing registration.
    pub fn with_user(&self, email: &str, password_hash: &str, is_active: bool) -> User {
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            risk_tolerance: RiskTolerance::default(),
            is_active,
            created_at: now,
            updated_at: now,
        };
        lock(&self.users).push(user.clone());
        user
    }

    pub fn set_active(&self, email: &str, is_active: bool) {
        if let Some(user) = lock(&self.users).iter_mut().find(|u| u.email == email) {
            user.is_active = is_active;
        }
    }

    /// Make every call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `find_by_email` calls seen so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), anyhow::Error> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("user store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error> {
        self.check_available()?;

        let mut users = lock(&self.users);
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(anyhow::anyhow!(
                "duplicate key value violates unique constraint \"users_email_key\""
            ));
        }

        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            risk_tolerance: new_user.risk_tolerance,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(lock(&self.users).iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, anyhow::Error> {
        self.check_available()?;
        Ok(lock(&self.users).iter().find(|u| u.id == id).cloned())
    }

    async fn update_risk_tolerance(
        &self,
        id: Uuid,
        risk_tolerance: RiskTolerance,
    ) -> Result<User, anyhow::Error> {
        self.check_available()?;

        let mut users = lock(&self.users);
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| anyhow::anyhow!("User {} not found", id))?;
        user.risk_tolerance = risk_tolerance;
        user.updated_at = OffsetDateTime::now_utc();
        Ok(user.clone())
    }
}

#[derive(Clone, Default)]
pub struct MockPortfolioRepository {
    holdings: Arc<Mutex<Vec<Holding>>>,
}

impl MockPortfolioRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PortfolioRepository for MockPortfolioRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Holding>, anyhow::Error> {
        Ok(lock(&self.holdings)
            .iter()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Holding>, anyhow::Error> {
        Ok(lock(&self.holdings)
            .iter()
            .find(|h| h.id == id && h.user_id == user_id)
            .cloned())
    }

    async fn find_by_symbol(
        &self,
        user_id: Uuid,
        symbol: &str,
    ) -> Result<Option<Holding>, anyhow::Error> {
        Ok(lock(&self.holdings)
            .iter()
            .find(|h| h.user_id == user_id && h.symbol == symbol)
            .cloned())
    }

    async fn create(&self, holding: NewHolding) -> Result<Holding, anyhow::Error> {
        let now = OffsetDateTime::now_utc();
        let holding = Holding {
            id: Uuid::new_v4(),
            user_id: holding.user_id,
            symbol: holding.symbol,
            quantity: holding.quantity,
            average_price: holding.average_price,
            purchase_date: holding.purchase_date,
            created_at: now,
            updated_at: now,
        };
        lock(&self.holdings).push(holding.clone());
        Ok(holding)
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: UpdateHolding,
    ) -> Result<Option<Holding>, anyhow::Error> {
        let mut holdings = lock(&self.holdings);
        let Some(holding) = holdings
            .iter_mut()
            .find(|h| h.id == id && h.user_id == user_id)
        else {
            return Ok(None);
        };

        if let Some(quantity) = update.quantity {
            holding.quantity = quantity;
        }
        if let Some(average_price) = update.average_price {
            holding.average_price = average_price;
        }
        if let Some(purchase_date) = update.purchase_date {
            holding.purchase_date = Some(purchase_date);
        }
        holding.updated_at = OffsetDateTime::now_utc();

        Ok(Some(holding.clone()))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, anyhow::Error> {
        let mut holdings = lock(&self.holdings);
        let before = holdings.len();
        holdings.retain(|h| !(h.id == id && h.user_id == user_id));
        Ok(holdings.len() < before)
    }
}

#[derive(Clone, Default)]
pub struct MockMarketDataRepository {
    snapshots: Arc<Mutex<HashMap<String, MarketSnapshot>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockMarketDataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn snapshot(&self, symbol: &str) -> Option<MarketSnapshot> {
        lock(&self.snapshots).get(symbol).cloned()
    }
}

#[async_trait]
impl MarketDataRepository for MockMarketDataRepository {
    async fn upsert(&self, snapshot: MarketSnapshot) -> Result<(), anyhow::Error> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("market data store unavailable"));
        }
        lock(&self.snapshots).insert(snapshot.symbol.clone(), snapshot);
        Ok(())
    }
}

/// Canned market provider. Unknown symbols resolve to `None`.
#[derive(Clone, Default)]
pub struct MockMarketDataProvider {
    quotes: Arc<Mutex<HashMap<String, Quote>>>,
    history: Arc<Mutex<HashMap<String, Vec<PriceBar>>>>,
    matches: Arc<Mutex<Vec<SymbolMatch>>>,
    failing: Arc<AtomicBool>,
}

impl MockMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a quote priced at `price` against a previous close of `previous_close`.
    pub fn with_quote(&self, symbol: &str, name: &str, price: f64, previous_close: f64) -> Quote {
        let (change, change_percent) = crate::domain::market::price_change(price, previous_close);
        let quote = Quote {
            symbol: symbol.to_string(),
            name: name.to_string(),
            current_price: price,
            previous_close,
            change,
            change_percent,
            volume: 1_000,
            currency: Some("USD".to_string()),
            market_cap: None,
            pe_ratio: None,
            dividend_yield: None,
            fifty_two_week_high: None,
            fifty_two_week_low: None,
            last_updated: OffsetDateTime::now_utc(),
        };
        lock(&self.quotes).insert(symbol.to_string(), quote.clone());
        quote
    }

    pub fn with_history(&self, symbol: &str, bars: Vec<PriceBar>) {
        lock(&self.history).insert(symbol.to_string(), bars);
    }

    pub fn with_match(&self, symbol_match: SymbolMatch) {
        lock(&self.matches).push(symbol_match);
    }

    /// Make every call fail as if the upstream were unreachable.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("market provider unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketDataProvider {
    fn source_name(&self) -> &'static str {
        "mock"
    }

    async fn quote(&self, symbol: &str) -> anyhow::Result<Option<Quote>> {
        self.check_reachable()?;
        Ok(lock(&self.quotes).get(symbol).cloned())
    }

    async fn history(
        &self,
        symbol: &str,
        _period: HistoryPeriod,
        _interval: HistoryInterval,
    ) -> anyhow::Result<Vec<PriceBar>> {
        self.check_reachable()?;
        Ok(lock(&self.history).get(symbol).cloned().unwrap_or_default())
    }

    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<SymbolMatch>> {
        self.check_reachable()?;
        let needle = query.to_ascii_lowercase();
        Ok(lock(&self.matches)
            .iter()
            .filter(|m| {
                m.symbol.to_ascii_lowercase().contains(&needle)
                    || m.name.to_ascii_lowercase().contains(&needle)
            })
            .take(limit)
            .cloned()
            .collect())
    }
}
