//! # Chapter 0: Getting Started
//!
//! Your first courier endpoint in 5 minutes.
//!
//! ## What You'll Learn
//!
//! - Describe an endpoint with `#[derive(Endpoint)]`
//! - Send it with a [`Session`](crate::Session)
//! - Read the typed result
//!
//! ## Prerequisites
//!
//! Add to `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! courier = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! ## Your First Endpoint
//!
//! ```ignore
//! use courier::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! pub struct User {
//!     pub id: u64,
//!     pub display_name: String,
//! }
//!
//! #[derive(Endpoint)]
//! #[endpoint(method = "GET", base_url = "https://api.example.com", path = "/users/{id}")]
//! #[endpoint(response = User)]
//! pub struct GetUser {
//!     pub id: u64,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::new();
//!
//!     let user = GetUser { id: 42 }.send(&session)?.await?;
//!     println!("{user:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## What Happens
//!
//! An endpoint is a plain value. Sending it:
//!
//! ```text
//! GetUser { id: 42 }
//!   → request()        GET https://api.example.com/users/42
//!   → result format    Accept/Content-Type: application/json
//!   → transport        HyperClient
//!   → classify         2xx? otherwise HttpError::UnsuccessfulResponse
//!   → decode           User
//! ```
//!
//! `send` returns `Err(BuildError)` straight away when the request cannot be
//! formed (for instance an unparseable URL). Anything that goes wrong after
//! that is an [`HttpError`](crate::HttpError) from the future.
//!
//! ## Without the Macro
//!
//! The derive only fills in [`Endpoint`](crate::Endpoint) methods. Write them
//! by hand when the URL depends on more than a few fields:
//!
//! ```ignore
//! impl Endpoint for GetUser {
//!     type Response = User;
//!     const METHOD: Method = Method::Get;
//!
//!     fn base_url(&self) -> Cow<'_, str> {
//!         "https://api.example.com".into()
//!     }
//!
//!     fn path(&self) -> Cow<'_, str> {
//!         format!("/users/{}", self.id).into()
//!     }
//! }
//! ```
//!
//! ## Next Steps
//!
//! - [Chapter 1: Bodies & Capabilities][super::chapter_1] - Sending data and hooking into requests
