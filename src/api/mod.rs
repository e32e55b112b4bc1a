/*
 * Responsibility
 * - HTTP API (routes() / router() の公開)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::router;
