//! Intake Relay - HTTP endpoint that forwards form submissions to a
//! work-management board.
//!
//! The service accepts a JSON form submission, classifies it by its
//! `issue_type` discriminator, remaps its fields into the matching board's
//! column layout, and creates an item through the platform's GraphQL API.
//!
//! # Issue types
//!
//! - **Data Validation** (default): validation requests against platform data
//! - **Functional Issue**: bug-style reports with status/assignee/date columns
//! - **Data Request**: requests for new data, keyed by table class and field
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use intake_relay::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     intake_relay::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe (board credential configured?)
//! - `POST /api/v1/submit` - Forward a form submission

pub mod client;
pub mod config;
pub mod error;
pub mod mapper;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use client::{ClientError, CreatedItem, ItemCreator, MondayClient};
pub use config::{DestinationConfig, MondayConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use mapper::{map_submission, IssueType, MappingResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
