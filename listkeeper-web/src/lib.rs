//! HTTP front end for Listkeeper
//!
//! An axum application serving HTML pages for todo lists kept in per-visitor
//! sessions. [`router`] builds the routes over an [`AppState`]; [`serve`] binds
//! the configured address and runs until shut down.
//!
//! ```no_run
//! use listkeeper_config::ServerConfig;
//!
//! # async fn example() -> listkeeper_web::Result<()> {
//! let config = ServerConfig::default();
//! listkeeper_web::serve(&config, async {
//!     let _ = tokio::signal::ctrl_c().await;
//! })
//! .await
//! # }
//! ```

mod error;
pub mod forms;
pub mod handlers;
mod routes;
mod server;
pub mod session;

pub use error::{Result, WebError};
pub use routes::router;
pub use server::{serve, start_server, AppState};
pub use session::Session;
