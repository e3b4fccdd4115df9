//! API layer for HTTP request handling and data models.
//!
//! This module contains the HTTP surface, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for the upload form and the three
//!   analyze endpoints
//! - **[`models`]**: Request data structures for API communication
//!
//! # OpenAPI Documentation
//!
//! Handlers are documented with OpenAPI annotations using `utoipa`. API
//! documentation is available at `/docs` when the server is running.

pub mod handlers;
pub mod models;
