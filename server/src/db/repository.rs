use async_trait::async_trait;
use sqlx::{mysql::MySqlConnection, Connection};

use super::gateway::{ConnectionProvider, UserConnection};
use super::models::User;
use crate::config::DbConfig;
use crate::error::Result;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INT AUTO_INCREMENT PRIMARY KEY,
    username VARCHAR(255) NOT NULL,
    password VARCHAR(255) NOT NULL
)
"#;

/// Opens a fresh MySQL connection for every request.
#[derive(Debug, Clone)]
pub struct MySqlConnector {
    config: DbConfig,
}

impl MySqlConnector {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    async fn open(&self) -> std::result::Result<MySqlConnection, sqlx::Error> {
        MySqlConnection::connect_with(&self.config.connect_options()).await
    }
}

#[async_trait]
impl ConnectionProvider for MySqlConnector {
    async fn connect(&self) -> Option<Box<dyn UserConnection>> {
        match self.open().await {
            Ok(conn) => Some(Box::new(UserRepository { conn: Some(conn) })),
            Err(err) => {
                log::error!(
                    "Database connection error ({}:{}/{}): {}",
                    self.config.host,
                    self.config.port,
                    self.config.database,
                    err
                );
                None
            }
        }
    }

    async fn ensure_schema(&self) -> Result<()> {
        let mut conn = self.open().await?;
        sqlx::query(CREATE_USERS_TABLE).execute(&mut conn).await?;
        conn.close().await?;
        log::info!("Users table is ready");
        Ok(())
    }
}

pub struct UserRepository {
    // Taken on close; a closed repository never touches the socket again.
    conn: Option<MySqlConnection>,
}

impl UserRepository {
    fn conn(&mut self) -> std::result::Result<&mut MySqlConnection, sqlx::Error> {
        self.conn.as_mut().ok_or(sqlx::Error::PoolClosed)
    }
}

#[async_trait]
impl UserConnection for UserRepository {
    async fn find_by_username(&mut self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.conn()?)
        .await?;
        Ok(user)
    }

    async fn insert_user(&mut self, username: &str, password: &str) -> Result<()> {
        let mut tx = self.conn()?.begin().await?;
        sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(err) = conn.close().await {
                log::warn!("Failed to close database connection cleanly: {}", err);
            }
        }
    }
}
