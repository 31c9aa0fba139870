//! # Auth Service Library
//!
//! Bootstrap shell for an authentication microservice:
//! - Typed settings loaded from environment variables and `.env`
//! - HTTP application with CORS, health and metadata endpoints
//! - Database pool opened and closed around the server lifetime
//!
//! ## Module Structure
//!
//! ```text
//! auth_service/
//! +-- config/         Settings groups, aggregate and process-wide cache
//! +-- infrastructure/ Database pool lifecycle
//! +-- presentation/   HTTP routes, handlers and middleware
//! +-- shared/         Common error type
//! ```

// Configuration module
pub mod config;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
