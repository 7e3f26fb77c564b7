//! One module per endpoint family. Each function is a single request (or a
//! fan-out of single requests) against the shared [`ApiClient`](crate::ApiClient);
//! form drafts are validated before anything is sent.

pub mod auth;
pub mod contracts;
pub mod jobs;
pub mod messages;
pub mod notifications;
pub mod payments;
pub mod proposals;
pub mod ratings;
pub mod reports;
pub mod users;
