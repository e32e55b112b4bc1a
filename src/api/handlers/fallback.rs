/*
 * Responsibility
 * - 未定義ルート / 未対応メソッドも同じ JSON envelope で返す
 */
use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
