//! One-time claim of OAuth2 authorization codes.
//!
//! Discord codes are single use, but a replayed request would otherwise reach the token
//! exchange. Each code is claimed before the exchange and the claim is kept for five
//! minutes.

use async_trait::async_trait;
use redis::aio::ConnectionManager;

use crate::server::error::AppError;

/// How long a claimed code is remembered.
pub const CODE_TTL_SECONDS: u64 = 300;

#[async_trait]
pub trait CodeCache: Send + Sync {
    /// Claims a code.
    ///
    /// # Returns
    /// - `Ok(true)` - The code had not been seen and is now claimed
    /// - `Ok(false)` - The code was claimed before
    /// - `Err(AppError)` - The cache could not be reached
    async fn claim(&self, code: &str) -> Result<bool, AppError>;
}

/// Claims codes with `SET codecache:<code> 0 NX EX 300`.
#[derive(Clone)]
pub struct RedisCodeCache {
    conn: ConnectionManager,
}

impl RedisCodeCache {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CodeCache for RedisCodeCache {
    async fn claim(&self, code: &str) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();

        let reply: Option<String> = redis::cmd("SET")
            .arg(format!("codecache:{}", code))
            .arg(0)
            .arg("NX")
            .arg("EX")
            .arg(CODE_TTL_SECONDS)
            .query_async(&mut conn)
            .await?;

        Ok(reply.is_some())
    }
}
