/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - permission gate が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは services/auth、permission 判定は middleware/auth の責務
 */
use crate::services::auth::VerifiedAccessToken;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `subject` は IdP 側のユーザー ID (`sub`)
/// - `permissions` は gate を通過した時点の RBAC permission 一覧
/// - `claims` は decode 済み payload そのもの
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub subject: Option<String>,
    pub permissions: Vec<String>,
    // No current handler reads the raw payload; kept for handlers that need extra claims.
    #[allow(dead_code)]
    pub claims: serde_json::Value,
}

impl From<VerifiedAccessToken> for AuthCtx {
    fn from(token: VerifiedAccessToken) -> Self {
        Self {
            subject: token.subject,
            permissions: token.permissions.unwrap_or_default(),
            claims: token.claims,
        }
    }
}
