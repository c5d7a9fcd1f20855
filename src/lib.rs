//! # settler
//!
//! Rust client for the Settler reconciliation API.
//!
//! ## Overview
//!
//! Every call goes through one request pipeline that:
//!
//! - authenticates with a bearer API key
//! - rejects an identical POST/PUT/PATCH repeated within 60 seconds, before it
//!   reaches the network
//! - retries timeouts, connection failures and 429/500/502/503/504 responses
//!   with exponential backoff
//! - classifies error responses into a single [`Error`] enum
//!
//! The resource clients ([`resources`]) only shape paths and payloads on top of
//! [`SettlerClient::execute`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use settler::{SettlerClient, Error};
//! use settler::resources::CreateWebhookRequest;
//!
//! #[tokio::main]
//! async fn main() -> settler::Result<()> {
//!     let client = SettlerClient::builder()
//!         .api_key("sk_live_...")
//!         .max_retries(3)
//!         .build()?;
//!
//!     let hook = client
//!         .webhooks()
//!         .create(&CreateWebhookRequest {
//!             url: "https://example.com/hooks/settler".into(),
//!             events: vec!["reconciliation.completed".into()],
//!             secret: None,
//!         })
//!         .await?;
//!     println!("{hook}");
//!
//!     match client.jobs().get("job_missing").await {
//!         Err(Error::NotFound { message, .. }) => eprintln!("no such job: {message}"),
//!         other => println!("{other:?}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder, request pipeline, retry policy, dedup cache |
//! | [`config`] | Immutable, validated client configuration |
//! | [`resources`] | Jobs, reports, webhooks and adapters clients |
//! | [`transport`] | Transport trait and the `reqwest` implementation |
//! | [`error`] | Error taxonomy |

pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod transport;

pub use client::{ApiResponse, SettlerClient, SettlerClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, ErrorContext, ErrorKind};
pub use transport::Method;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
