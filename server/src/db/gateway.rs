use async_trait::async_trait;
use futures_util::future::BoxFuture;
use std::sync::Arc;

use super::models::User;
use crate::error::Result;

/// Opens database connections. A failed connect is reported as `None` and
/// never as an error; the failure is logged by the implementation.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    async fn connect(&self) -> Option<Box<dyn UserConnection>>;

    /// Creates the `users` table when it does not exist yet.
    async fn ensure_schema(&self) -> Result<()>;
}

/// A single open connection with the queries the route handlers need.
#[async_trait]
pub trait UserConnection: Send {
    async fn find_by_username(&mut self, username: &str) -> Result<Option<User>>;

    /// Inserts a user row and commits it.
    async fn insert_user(&mut self, username: &str, password: &str) -> Result<()>;

    async fn close(&mut self);
}

/// Connection-per-request access to the users table.
#[derive(Clone)]
pub struct DbGateway {
    provider: Arc<dyn ConnectionProvider>,
}

impl DbGateway {
    pub fn new(provider: Arc<dyn ConnectionProvider>) -> Self {
        Self { provider }
    }

    /// Opens a connection, runs `work` against it and closes it again.
    ///
    /// Returns `None` when no connection could be opened. When `Some` is
    /// returned the connection has already been closed, whatever `work`
    /// produced.
    pub async fn with_connection<T, F>(&self, work: F) -> Option<T>
    where
        F: for<'c> FnOnce(&'c mut dyn UserConnection) -> BoxFuture<'c, T>,
    {
        let mut conn = self.provider.connect().await?;
        let outcome = work(conn.as_mut()).await;
        conn.close().await;
        Some(outcome)
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        self.provider.ensure_schema().await
    }
}
