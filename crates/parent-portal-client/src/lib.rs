//! # Parent Portal Client
//!
//! An async HTTP client for the Parent Portal API together with the session
//! state a front end keeps between runs: the bearer token and the cached
//! profile of the signed-in user.
//!
//! The session is an explicit [`SessionContext`] that callers own and pass to
//! the client by reference. Its lifecycle is:
//!
//! 1. [`SessionContext::init`] loads any persisted token and profile.
//! 2. [`PortalClient::login`] or [`PortalClient::register`] establishes and
//!    persists a new session.
//! 3. [`PortalClient::logout`] clears it, and so does any 401 response from
//!    the API.
//!
//! ```ignore
//! use parent_portal_client::{FileSessionStore, PortalClient, SessionContext};
//!
//! let mut session = SessionContext::init(FileSessionStore::new("session.json"))?;
//! let client = PortalClient::new("http://localhost:3000")?;
//!
//! if !session.is_authenticated() {
//!     client.login(&mut session, "parent@example.com", "password").await?;
//! }
//!
//! for child in client.students(&mut session, &Default::default()).await? {
//!     println!("{}: {}/{}", child.name, child.attendance.present, child.attendance.total);
//! }
//! ```

pub mod client;
pub mod error;
pub mod session;

pub use client::{ApiStatus, PortalClient};
pub use error::{ClientError, ClientResult};
pub use session::{
    FileSessionStore, MemorySessionStore, SessionContext, SessionStore, StoredSession,
};
