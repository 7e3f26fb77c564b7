//! Client library for the Freela marketplace API.
//!
//! Everything here is platform-neutral: the browser frontend plugs in a
//! `localStorage`-backed [`KeyValueStore`] and the `reqwest` transport,
//! tests plug in in-memory ones.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod guard;
pub mod models;
pub mod poll;
pub mod resources;
pub mod session;
pub mod storage;
pub mod transport;
pub mod validation;
pub mod view_state;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, FieldErrors};
pub use guard::{GuardState, Requirement};
pub use poll::{CancelToken, PollGate};
pub use session::{Session, SessionStore};
pub use storage::{Credentials, KeyValueStore, MemoryStore};
pub use transport::{Attachment, ReqwestTransport, Transport};
pub use view_state::{Loadable, Submission, ViewPhase};
