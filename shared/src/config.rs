use anyhow::{Context, Result};
use std::env;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub gmail: Option<GmailConfig>,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: env::var("DATABASE_HOST").context("DATABASE_HOST is not set")?,
            port: env::var("DATABASE_PORT")
                .context("DATABASE_PORT is not set")?
                .parse()
                .context("DATABASE_PORT must be a port number")?,
            username: env::var("DATABASE_USERNAME").context("DATABASE_USERNAME is not set")?,
            password: env::var("DATABASE_PASSWORD").context("DATABASE_PASSWORD is not set")?,
            database: env::var("DATABASE_NAME").context("DATABASE_NAME is not set")?,
        };
        let redis = RedisConfig {
            host: env::var("REDIS_HOST").context("REDIS_HOST is not set")?,
            port: env::var("REDIS_PORT")
                .context("REDIS_PORT is not set")?
                .parse()
                .context("REDIS_PORT must be a port number")?,
        };
        let auth = AuthConfig {
            ttl: env::var("AUTH_TOKEN_TTL")
                .context("AUTH_TOKEN_TTL is not set")?
                .parse()
                .context("AUTH_TOKEN_TTL must be a number of seconds")?,
        };
        // Gmail 送信は両方のパスが揃っているときのみ有効にする
        let gmail = match (
            env::var("GMAIL_CLIENT_SECRET_PATH"),
            env::var("GMAIL_TOKEN_CACHE_PATH"),
        ) {
            (Ok(client_secret_path), Ok(token_cache_path)) => Some(GmailConfig {
                client_secret_path,
                token_cache_path,
            }),
            _ => None,
        };
        Ok(Self {
            database,
            redis,
            auth,
            gmail,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    pub ttl: u64,
}

pub struct GmailConfig {
    pub client_secret_path: String,
    pub token_cache_path: String,
}
