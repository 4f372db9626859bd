pub mod extractor;
pub mod store;

pub use extractor::{Session, SESSION_COOKIE};
pub use store::{new_token, Flash, FlashLevel, MemorySessionStore, SessionAttrs, SessionStore};
