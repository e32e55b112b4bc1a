/*
 * Responsibility
 * - /drinks, /drinks-detail, /drinks/{id} の handler
 * - permission 判定は route 定義側 (middleware) で済んでいる前提。ここでは AuthCtx を受け取るだけ
 * - store のエラーは原因を問わず 400、存在しない id だけ 404
 */
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    api::{
        dto::drinks::{DeleteResponse, DrinkLong, DrinkRequest, DrinkShort, DrinksResponse},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    repos::{Drink, error::RepoError},
    state::AppState,
};

fn store_failed(op: &'static str) -> impl FnOnce(RepoError) -> AppError {
    move |e| {
        tracing::error!(error = %e, op, "drink store call failed");
        AppError::from(e)
    }
}

fn read_body(payload: Result<Json<DrinkRequest>, JsonRejection>) -> Result<DrinkRequest, AppError> {
    let Json(req) = payload?;
    req.validate().map_err(AppError::bad_request)?;
    Ok(req)
}

async fn find(state: &AppState, id: Result<Path<i64>, PathRejection>) -> Result<Drink, AppError> {
    let Path(id) = id?;
    state
        .drinks
        .get(id)
        .await
        .map_err(store_failed("get"))?
        .ok_or(AppError::NotFound)
}

pub async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<DrinkShort>>, AppError> {
    let rows = state
        .drinks
        .list_all()
        .await
        .map_err(store_failed("list_all"))?;

    let drinks = rows
        .into_iter()
        .map(DrinkShort::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DrinksResponse::new(drinks)))
}

pub async fn list_drinks_detail(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<DrinksResponse<DrinkLong>>, AppError> {
    tracing::debug!(subject = ?ctx.subject, permissions = ?ctx.permissions, "drinks detail");

    let rows = state
        .drinks
        .list_all()
        .await
        .map_err(store_failed("list_all"))?;

    let drinks = rows
        .into_iter()
        .map(DrinkLong::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DrinksResponse::new(drinks)))
}

// Success body carries an empty `drinks` list; existing clients rely on it.
pub async fn create_drink(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    payload: Result<Json<DrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, AppError> {
    let (title, recipe) = read_body(payload)?.into_fields()?;

    let drink = state
        .drinks
        .create(&title, &recipe)
        .await
        .map_err(store_failed("create"))?;

    tracing::info!(drink_id = drink.id, subject = ?ctx.subject, "created drink");

    Ok(Json(DrinksResponse::new(Vec::new())))
}

pub async fn update_drink(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<DrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, AppError> {
    // 404 takes precedence over a bad body.
    let mut drink = find(&state, id).await?;

    let (title, recipe) = read_body(payload)?.into_fields()?;
    drink.title = title;
    drink.recipe = recipe;

    state
        .drinks
        .update(&drink)
        .await
        .map_err(store_failed("update"))?;

    tracing::info!(drink_id = drink.id, subject = ?ctx.subject, "updated drink");

    Ok(Json(DrinksResponse::new(Vec::new())))
}

pub async fn delete_drink(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    let drink = find(&state, id).await?;

    state
        .drinks
        .delete(&drink)
        .await
        .map_err(store_failed("delete"))?;

    tracing::info!(drink_id = drink.id, subject = ?ctx.subject, "deleted drink");

    Ok(Json(DeleteResponse {
        success: true,
        delete: drink.id,
    }))
}
