/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::auth::{AuthService, JwksKeys, KeyError, KeyResolver, StaticKey};

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, KeyError> {
    let keys: Arc<dyn KeyResolver> = match &config.access_jwt_public_key_pem {
        Some(pem) => Arc::new(StaticKey::from_pem(pem, config.auth_algorithm)?),
        None => Arc::new(
            JwksKeys::new(config.auth_jwks_url.clone())?.with_refetch_cooldown(
                Duration::from_secs(config.auth_jwks_refetch_cooldown_seconds),
            ),
        ),
    };

    tracing::info!(
        source = keys.source_name(),
        domain = %config.auth_domain,
        issuer = %config.auth_issuer,
        audience = %config.auth_audience,
        "access token verification configured"
    );

    let auth = AuthService::new(
        keys,
        config.auth_algorithm,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    );

    Ok(Arc::new(auth))
}
