use jsonwebtoken::Algorithm;
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Shortest signing secret accepted at startup, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl fmt::Display) -> Self {
        ConfigError::Invalid {
            key,
            reason: reason.to_string(),
        }
    }
}

/// Token signing settings, fixed for the life of the process
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub access_token_ttl: time::Duration,
    pub refresh_token_ttl: time::Duration,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: std::time::Duration,
    pub idle_timeout: std::time::Duration,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests: u64,
    pub window_secs: u64,
}

#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub base_url: String,
    pub timeout: std::time::Duration,
}

/// Process configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub password_params: argon2::Params,
    pub cors_allowed_origins: Vec<String>,
    pub rate_limit: RateLimitConfig,
    pub market: MarketConfig,
}

impl AppConfig {
    /// Load configuration from the process environment (after `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let database = DatabaseConfig {
            url: vars.required("DATABASE_URL")?,
            max_connections: vars.positive("DB_MAX_CONNECTIONS", 20)?,
            min_connections: vars.parsed("DB_MIN_CONNECTIONS", 5)?,
            acquire_timeout: std::time::Duration::from_secs(
                vars.positive("DB_ACQUIRE_TIMEOUT_SECS", 3)?,
            ),
            idle_timeout: std::time::Duration::from_secs(
                vars.positive("DB_IDLE_TIMEOUT_SECS", 600)?,
            ),
        };
        let auth = AuthConfig::from_vars(&vars)?;

        let password_params = argon2::Params::new(
            vars.parsed("ARGON2_MEMORY_KIB", argon2::Params::DEFAULT_M_COST)?,
            vars.parsed("ARGON2_ITERATIONS", argon2::Params::DEFAULT_T_COST)?,
            vars.parsed("ARGON2_PARALLELISM", argon2::Params::DEFAULT_P_COST)?,
            None,
        )
        .map_err(|e| ConfigError::invalid("ARGON2_MEMORY_KIB", e))?;

        let cors_allowed_origins = vars
            .get("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let rate_limit = RateLimitConfig {
            requests: vars.positive("RATE_LIMIT_REQUESTS", 100)?,
            window_secs: vars.positive("RATE_LIMIT_WINDOW_SECS", 60)?,
        };
        if rate_limit.window_secs.checked_mul(1000).is_none() {
            return Err(ConfigError::invalid(
                "RATE_LIMIT_WINDOW_SECS",
                "window in milliseconds must fit in 64 bits",
            ));
        }

        let market = MarketConfig {
            base_url: vars
                .get("MARKET_DATA_BASE_URL")
                .unwrap_or_else(|| "https://query1.finance.yahoo.com".to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout: std::time::Duration::from_secs(
                vars.positive("MARKET_DATA_TIMEOUT_SECS", 10)?,
            ),
        };

        Ok(Self {
            host: vars.get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: vars.parsed("PORT", 8000)?,
            debug: vars.parsed("DEBUG", false)?,
            database,
            auth,
            password_params,
            cors_allowed_origins,
            rate_limit,
            market,
        })
    }
}

impl AuthConfig {
    fn from_vars<F>(vars: &Vars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = vars.required("JWT_SECRET")?;
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::invalid(
                "JWT_SECRET",
                format!("must be at least {} bytes", MIN_SECRET_LEN),
            ));
        }

        let jwt_algorithm = vars
            .get("JWT_ALGORITHM")
            .map(|raw| parse_hmac_algorithm(&raw))
            .transpose()?
            .unwrap_or(Algorithm::HS256);

        let access_minutes: i64 = vars.positive("JWT_ACCESS_TOKEN_EXPIRE_MINUTES", 15)?;
        let refresh_days: i64 = vars.positive("JWT_REFRESH_TOKEN_EXPIRE_DAYS", 7)?;

        Ok(Self {
            jwt_secret,
            jwt_algorithm,
            access_token_ttl: time::Duration::minutes(access_minutes),
            refresh_token_ttl: time::Duration::days(refresh_days),
        })
    }
}

/// Only shared-secret algorithms can be driven by a single signing secret.
pub fn parse_hmac_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    let algorithm = Algorithm::from_str(raw.trim())
        .map_err(|_| ConfigError::invalid("JWT_ALGORITHM", format!("unknown algorithm {raw}")))?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => Err(ConfigError::invalid(
            "JWT_ALGORITHM",
            format!("{:?} is not an HMAC algorithm", other),
        )),
    }
}

struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    fn parsed<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(key, e)),
            None => Ok(default),
        }
    }

    fn positive<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + PartialOrd + Default,
        T::Err: fmt::Display,
    {
        let value = self.parsed(key, default)?;
        if value <= T::default() {
            return Err(ConfigError::invalid(key, "must be greater than zero"));
        }
        Ok(value)
    }
}
