use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::gateway::{ConnectionProvider, UserConnection};
use super::models::User;
use crate::error::Result;

#[derive(Default)]
struct MemoryState {
    users: Mutex<Vec<User>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
    unreachable: AtomicBool,
    failing: AtomicBool,
}

/// In-process stand-in for the users table, for tests only. Counts opened
/// and closed connections and can simulate an unreachable or failing
/// database. Built with `cfg(test)` or the `testing` feature.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    state: Arc<MemoryState>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Makes every query on subsequently used connections fail.
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }

    pub fn users(&self) -> Vec<User> {
        lock_users(&self.state).clone()
    }

    pub fn find(&self, username: &str) -> Option<User> {
        lock_users(&self.state)
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    pub fn opened_connections(&self) -> usize {
        self.state.opened.load(Ordering::SeqCst)
    }

    pub fn closed_connections(&self) -> usize {
        self.state.closed.load(Ordering::SeqCst)
    }
}

fn lock_users(state: &MemoryState) -> std::sync::MutexGuard<'_, Vec<User>> {
    state
        .users
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn simulated_failure() -> sqlx::Error {
    sqlx::Error::Protocol("simulated query failure".to_string())
}

#[async_trait]
impl ConnectionProvider for MemoryUserStore {
    async fn connect(&self) -> Option<Box<dyn UserConnection>> {
        if self.state.unreachable.load(Ordering::SeqCst) {
            log::error!("Database connection error: in-memory store marked unreachable");
            return None;
        }

        self.state.opened.fetch_add(1, Ordering::SeqCst);
        Some(Box::new(MemoryConnection {
            state: Arc::clone(&self.state),
            open: true,
        }))
    }

    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }
}

struct MemoryConnection {
    state: Arc<MemoryState>,
    open: bool,
}

impl MemoryConnection {
    fn check(&self) -> Result<()> {
        if !self.open {
            return Err(sqlx::Error::PoolClosed.into());
        }
        if self.state.failing.load(Ordering::SeqCst) {
            return Err(simulated_failure().into());
        }
        Ok(())
    }
}

#[async_trait]
impl UserConnection for MemoryConnection {
    async fn find_by_username(&mut self, username: &str) -> Result<Option<User>> {
        self.check()?;
        Ok(lock_users(&self.state)
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert_user(&mut self, username: &str, password: &str) -> Result<()> {
        self.check()?;
        let mut users = lock_users(&self.state);
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        users.push(User {
            id,
            username: username.to_string(),
            password: password.to_string(),
        });
        Ok(())
    }

    async fn close(&mut self) {
        if self.open {
            self.open = false;
            self.state.closed.fetch_add(1, Ordering::SeqCst);
        }
    }
}
