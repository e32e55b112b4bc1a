/*
 * Responsibility
 * - URL 構造と、各ルートが要求する permission の定義 (データとして持つ)
 * - permission があるルートだけ gate を掛ける
 * - 未定義ルート / 未対応メソッドの fallback
 */
use axum::{
    Router,
    routing::{MethodRouter, delete, get, patch, post},
};

use crate::api::handlers::{
    drinks::{create_drink, delete_drink, list_drinks, list_drinks_detail, update_drink},
    fallback::{method_not_allowed, not_found},
    health::health,
};
use crate::middleware::auth::permission;
use crate::services::auth::permissions;
use crate::state::AppState;

struct Endpoint {
    path: &'static str,
    route: MethodRouter<AppState>,
    permission: Option<&'static str>,
}

impl Endpoint {
    fn public(path: &'static str, route: MethodRouter<AppState>) -> Self {
        Self {
            path,
            route,
            permission: None,
        }
    }

    fn gated(
        path: &'static str,
        route: MethodRouter<AppState>,
        permission: &'static str,
    ) -> Self {
        Self {
            path,
            route,
            permission: Some(permission),
        }
    }
}

fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::public("/health", get(health)),
        Endpoint::public("/drinks", get(list_drinks)),
        Endpoint::gated(
            "/drinks-detail",
            get(list_drinks_detail),
            permissions::GET_DRINKS_DETAIL,
        ),
        Endpoint::gated("/drinks", post(create_drink), permissions::POST_DRINKS),
        Endpoint::gated("/drinks/{id}", patch(update_drink), permissions::PATCH_DRINKS),
        Endpoint::gated(
            "/drinks/{id}",
            delete(delete_drink),
            permissions::DELETE_DRINKS,
        ),
    ]
}

/// Full API router with state applied. HTTP-level middleware is added by `app`.
pub fn router(state: AppState) -> Router {
    endpoints()
        .into_iter()
        .fold(Router::new(), |router, endpoint| {
            let route = match endpoint.permission {
                Some(required) => permission::apply(endpoint.route, &state, required),
                None => endpoint.route,
            };
            // Same path twice merges the method routers.
            router.route(endpoint.path, route)
        })
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}
