use std::sync::Arc;

use jsonwebtoken::{Algorithm, Validation, errors::ErrorKind};
use serde::Deserialize;

use crate::services::auth::{AuthError, KeyResolver, bearer::bearer_token};

/// The parts of the access token this service reads.
///
/// `aud` may be a string or an array; `jsonwebtoken` validates it, so it is
/// not modelled here.
#[derive(Debug, Clone, Deserialize)]
struct AccessTokenClaims {
    #[serde(default)]
    sub: Option<String>,
    // Only present when the API has RBAC + "add permissions in the access token" enabled.
    #[serde(default)]
    permissions: Option<Vec<String>>,
}

/// AuthService が返す「検証済み・アプリ側で使う型」
#[derive(Debug, Clone)]
pub struct VerifiedAccessToken {
    pub subject: Option<String>,
    pub permissions: Option<Vec<String>>,
    // Full decoded payload, passed through to handlers.
    pub claims: serde_json::Value,
}

/// Access-token verifier.
///
/// - signature against the key resolved for the token header
/// - `exp` (with leeway), `iss`, `aud`
/// - exactly one accepted algorithm
#[derive(Clone)]
pub struct AuthService {
    keys: Arc<dyn KeyResolver>,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("keys", &self.keys.source_name())
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(
        keys: Arc<dyn KeyResolver>,
        algorithm: Algorithm,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = leeway_seconds;

        Self { keys, validation }
    }

    /// Verify the token found in an `Authorization` header value.
    pub async fn verify_header(
        &self,
        authorization: Option<&str>,
    ) -> Result<VerifiedAccessToken, AuthError> {
        let token = bearer_token(authorization)?;
        self.verify(token).await
    }

    pub async fn verify(&self, token: &str) -> Result<VerifiedAccessToken, AuthError> {
        let header =
            jsonwebtoken::decode_header(token).map_err(|_| AuthError::unparseable_token())?;

        let key = self.keys.resolve(&header).await?;

        let data = jsonwebtoken::decode::<serde_json::Value>(token, &key, &self.validation)
            .map_err(|e| map_jwt_error(e.kind()))?;

        let claims: AccessTokenClaims = serde_json::from_value(data.claims.clone())
            .map_err(|_| AuthError::unparseable_token())?;

        Ok(VerifiedAccessToken {
            subject: claims.sub,
            permissions: claims.permissions,
            claims: data.claims,
        })
    }
}

fn map_jwt_error(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::token_expired(),
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::incorrect_claims(),
        _ => AuthError::unparseable_token(),
    }
}
