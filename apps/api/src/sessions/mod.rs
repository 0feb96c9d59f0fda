pub mod handlers;
pub mod store;

pub use store::{session_update, InMemorySessionStore, SessionStore, SessionUpdate};
