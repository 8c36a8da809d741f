//! # showtrack
//!
//! A tiny JSON CRUD service for keeping track of the shows you watch.
//!
//! The crate has two halves:
//!
//! - a small HTTP layer: a radix-tree [`Router`] with shared state, async
//!   handlers, typed [`Method`] / [`Status`], and a hyper-backed [`Server`]
//!   with graceful shutdown;
//! - the application on top of it: an in-memory [`ShowStore`] and the
//!   [`api`] routes, which answer every request with the same JSON
//!   [`Envelope`](api::Envelope).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use showtrack::{api, Server, ShowStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), showtrack::Error> {
//!     let app = api::router(ShowStore::seeded());
//!     Server::bind("127.0.0.1:8080").await?.serve(app).await
//! }
//! ```
//!
//! ```text
//! $ curl -s localhost:8080/shows/2
//! {"code":200,"success":true,"message":"","result":{"id":2,"name":"Naruto","episodes_seen":220}}
//! $ curl -s -X POST localhost:8080/shows -d name=Dark -d episodes_seen=26
//! {"code":201,"success":true,"message":"","result":{"id":6,"name":"Dark","episodes_seen":26}}
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::{NewShow, Show, ShowPatch, ShowStore};
