//! RBAC permission names and the membership check.
//!
//! No hierarchy or wildcards: a permission is granted only by an exact match
//! in the token's `permissions` claim.

use crate::services::auth::{AuthError, VerifiedAccessToken};

pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
pub const POST_DRINKS: &str = "post:drinks";
pub const PATCH_DRINKS: &str = "patch:drinks";
pub const DELETE_DRINKS: &str = "delete:drinks";

pub fn check_permission(token: &VerifiedAccessToken, required: &str) -> Result<(), AuthError> {
    let permissions = token
        .permissions
        .as_ref()
        .ok_or(AuthError::permissions_missing())?;

    if !permissions.iter().any(|p| p == required) {
        return Err(AuthError::permission_not_found());
    }

    Ok(())
}
