/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::permission (route 単位), cors / http / security_headers (Router 全体)
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
