//! HTTP surface for the text-similarity check orchestrator.
//!
//! Exposes exactly the two operations named in the external interfaces
//! list:
//!
//! - `POST /api/checks` - submit a document, run the full pipeline, and
//!   return the persisted `CheckOutcome`
//! - `GET /api/checks/:id` - fetch a previously committed result
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> server::ServerResult<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! Authenticated role gating, audit logging, upload/MIME handling, and
//! admin CRUD over the corpus remain external collaborators named but not
//! implemented here. `ServerState` carries a stub API-key check as the
//! seam where real auth would attach.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::start_server;
pub use state::ServerState;
