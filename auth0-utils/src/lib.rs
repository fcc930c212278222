//! # Auth0 Utils
//!
//! Async client for the Auth0 Authentication and Management APIs: user
//! provisioning, password changes and reset tickets, credential checks and
//! verification emails.
//!
//! ## Example
//!
//! ```no_run
//! use auth0_utils::{Auth0Client, PasswordChangeTicket};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // AUTH0_DOMAIN, AUTH0_M2M_CLIENT_ID, AUTH0_M2M_CLIENT_SECRET
//!     let auth0 = Auth0Client::from_env()?;
//!
//!     // Creates the user, or returns it if the email is already registered
//!     let user = auth0
//!         .create_or_return_user("jane@example.com", "Username-Password-Authentication")
//!         .await?;
//!
//!     let link = auth0
//!         .get_reset_password_link(&PasswordChangeTicket::for_user(&user.user_id))
//!         .await?;
//!     println!("Reset link: {link}");
//!     Ok(())
//! }
//! ```
//!
//! ## Tokens
//!
//! The Management API token is requested on the first call that needs it and
//! reused for the lifetime of the client (and its clones). It is never
//! refreshed.
//!
//! ## Errors
//!
//! Upstream failures surface as [`Auth0Error::Request`] carrying Auth0's
//! payload untouched, whichever way the endpoint chose to signal them.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod authentication;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod password;
pub mod token;
pub mod types;

mod jobs;
mod tickets;
mod users;

// Re-export main types for convenience
pub use authentication::PasswordGrantRequest;
pub use client::Auth0Client;
pub use config::Auth0Config;
pub use error::{Auth0Error, Result};
pub use password::generate_password;
pub use token::{AccessToken, ClientCredentialsRequest, TokenCache, fetch_access_token};
pub use types::{
    CreateUserRequest, Identity, Job, ListUsersQuery, PasswordChangeTicket, TicketResponse, User,
    UserUpdate,
};
