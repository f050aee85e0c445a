//! Gateway configuration, loaded once from the environment at startup.

use std::env;

use common::config::{DatabaseConfig, JwtConfig, ServiceConfig};
use common::{AppError, AppResult};
use domain::{
    RolePolicy, DEFAULT_JWT_EXPIRATION_HOURS, MAX_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH,
    ROLE_EMPLOYEE, ROLE_MANAGER, ROLE_SUPERUSER,
};

const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Everything the server needs, passed explicitly to the components.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub server: ServiceConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub roles: RolePolicy,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
}

impl GatewayConfig {
    /// Load configuration from environment variables (and `.env`).
    ///
    /// # Errors
    /// Fails when `JWT_SECRET` is missing in a release build or too short,
    /// when a numeric variable does not parse, when `JWT_EXPIRATION_HOURS`
    /// is out of range, or when the role settings are inconsistent.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let server_defaults = ServiceConfig::default();
        let database_defaults = DatabaseConfig::default();

        Ok(Self {
            server: ServiceConfig {
                service_name: server_defaults.service_name,
                host: env::var("SERVER_HOST").unwrap_or(server_defaults.host),
                port: parse_var("SERVER_PORT", server_defaults.port)?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(database_defaults.url),
                max_connections: parse_var(
                    "DATABASE_MAX_CONNECTIONS",
                    database_defaults.max_connections,
                )?,
                min_connections: database_defaults.min_connections,
            },
            jwt: JwtConfig::new(
                jwt_secret()?,
                expiration_hours(parse_var(
                    "JWT_EXPIRATION_HOURS",
                    DEFAULT_JWT_EXPIRATION_HOURS,
                )?)?,
            ),
            roles: role_policy()?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| split_list(&raw))
                .unwrap_or_default(),
        })
    }
}

fn jwt_secret() -> AppResult<String> {
    let secret = match env::var("JWT_SECRET") {
        Ok(secret) => secret,
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, using insecure default for development");
            DEV_JWT_SECRET.to_string()
        }
        Err(_) => {
            return Err(AppError::validation(
                "JWT_SECRET environment variable must be set in production",
            ))
        }
    };

    if secret.len() < MIN_JWT_SECRET_LENGTH {
        return Err(AppError::validation(format!(
            "JWT_SECRET must be at least {} characters long",
            MIN_JWT_SECRET_LENGTH
        )));
    }

    Ok(secret)
}

fn role_policy() -> AppResult<RolePolicy> {
    let defaults = RolePolicy::default();

    let names = match env::var("ROLE_NAMES") {
        Ok(raw) => RolePolicy::parse_names(&raw)?,
        Err(_) => defaults.roles().into_iter().map(|r| (r.tier, r.name)).collect(),
    };
    let allowed = match env::var("ROLES_ALLOWED") {
        Ok(raw) => RolePolicy::parse_tiers(&raw)?,
        Err(_) => defaults.allowed_roles().collect(),
    };

    let policy = RolePolicy::new(
        names,
        allowed,
        parse_var("MANAGER_ROLE", ROLE_MANAGER)?,
        parse_var("SUPERUSER_ROLE", ROLE_SUPERUSER)?,
        parse_var("DEFAULT_ROLE", ROLE_EMPLOYEE)?,
    )?;
    Ok(policy)
}

/// Token lifetime must be positive and bounded.
fn expiration_hours(hours: i64) -> AppResult<i64> {
    if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&hours) {
        return Err(AppError::validation(format!(
            "JWT_EXPIRATION_HOURS must be between 1 and {}, got {}",
            MAX_JWT_EXPIRATION_HOURS, hours
        )));
    }
    Ok(hours)
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> AppResult<T> {
    parse_value(key, env::var(key).ok().as_deref(), default)
}

/// Parse an optional raw value; unset falls back to `default`, garbage is an
/// error.
fn parse_value<T: std::str::FromStr>(key: &str, raw: Option<&str>, default: T) -> AppResult<T> {
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::validation(format!("{} has an invalid value '{}'", key, raw.trim()))
        }),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
