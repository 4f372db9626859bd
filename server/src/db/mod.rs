pub mod gateway;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod models;
pub mod repository;

pub use gateway::{ConnectionProvider, DbGateway, UserConnection};
#[cfg(any(test, feature = "testing"))]
pub use memory::MemoryUserStore;
pub use models::User;
pub use repository::{MySqlConnector, UserRepository};
