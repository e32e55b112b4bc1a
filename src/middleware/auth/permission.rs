//! Permission gate: bearer token 検証 → permission 判定 → AuthCtx を extensions に入れる
//!
//! Each gated route names exactly one required permission. The gate runs
//! before the handler, so a rejected request never reaches the store.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{AuthService, permissions::check_permission};
use crate::state::AppState;

#[derive(Clone)]
pub struct PermissionGate {
    auth: Arc<AuthService>,
    required: &'static str,
}

/// Wrap one method router with the gate.
///
/// ```ignore
/// let route = permission::apply(post(create_drink), &state, permissions::POST_DRINKS);
/// ```
pub fn apply(
    route: MethodRouter<AppState>,
    state: &AppState,
    required: &'static str,
) -> MethodRouter<AppState> {
    let gate = PermissionGate {
        auth: state.auth.clone(),
        required,
    };
    // route_layer: 405 fallback は gate を通らない
    route.route_layer(middleware::from_fn_with_state(gate, require_permission))
}

async fn require_permission(
    State(gate): State<PermissionGate>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // A non UTF-8 header value is treated like a malformed one.
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| v.to_str().unwrap_or_default());

    let verified = match gate.auth.verify_header(authorization).await {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(
                code = err.code,
                required = gate.required,
                "access token verification failed"
            );
            return Err(err.into());
        }
    };

    if let Err(err) = check_permission(&verified, gate.required) {
        tracing::warn!(
            code = err.code,
            required = gate.required,
            subject = ?verified.subject,
            "permission check failed"
        );
        return Err(err.into());
    }

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::from(verified));

    Ok(next.run(req).await)
}
