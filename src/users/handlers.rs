use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use super::{
    dto::{SearchParams, StatusResponse, UserLoginRequest},
    model::{User, UserView},
};
use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/search", get(search_users))
        .route("/users/login", post(login))
        .route(
            "/users/:user_id",
            get(get_user)
                .put(update_user)
                .patch(update_user)
                .delete(delete_user),
        )
}

/// `X-Public: true` asks for the reduced view of each user.
fn is_public(headers: &HeaderMap) -> bool {
    headers
        .get("X-Public")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "true")
        .unwrap_or(false)
}

fn parse_user_id(path: Result<Path<String>, PathRejection>) -> AppResult<i64> {
    let raw = match path {
        Ok(Path(raw)) => raw,
        Err(e) => {
            warn!(error = %e, "invalid user id path");
            return Err(AppError::bad_request("User ID should be a number."));
        }
    };
    raw.parse::<i64>()
        .map_err(|_| AppError::bad_request("User ID should be a number."))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    match query {
        Ok(Query(params)) => Ok(params),
        Err(e) => {
            warn!(error = %e, "invalid query string");
            Err(AppError::bad_request("Invalid query string."))
        }
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(e) => {
            warn!(error = %e, "invalid json body");
            Err(AppError::bad_request("Invalid JSON body."))
        }
    }
}

#[instrument(skip(state, headers, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<User>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserView>)> {
    let user = state.users.create(json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(user.view(is_public(&headers)))))
}

#[instrument(skip(state, user_id, headers))]
pub async fn get_user(
    State(state): State<AppState>,
    user_id: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> AppResult<Json<UserView>> {
    let user = state.users.get(parse_user_id(user_id)?).await?;
    Ok(Json(user.view(is_public(&headers))))
}

/// PUT replaces names and email; PATCH only applies the non-empty ones.
#[instrument(skip(state, user_id, headers, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    method: Method,
    user_id: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    payload: Result<Json<User>, JsonRejection>,
) -> AppResult<Json<UserView>> {
    let id = parse_user_id(user_id)?;
    let mut candidate = json_body(payload)?;
    candidate.id = id;

    let partial = method == Method::PATCH;
    let user = state.users.update(id, candidate, partial).await?;
    Ok(Json(user.view(is_public(&headers))))
}

#[instrument(skip(state, user_id))]
pub async fn delete_user(
    State(state): State<AppState>,
    user_id: Result<Path<String>, PathRejection>,
) -> AppResult<Json<StatusResponse>> {
    state.users.delete(parse_user_id(user_id)?).await?;
    Ok(Json(StatusResponse {
        status: "Deleted successfully.".into(),
    }))
}

#[instrument(skip(state, query, headers))]
pub async fn search_users(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<UserView>>> {
    let params: SearchParams = query_params(query)?;
    let public = is_public(&headers);
    let users = state.users.search(&params.status).await?;
    Ok(Json(users.iter().map(|u| u.view(public)).collect()))
}

#[instrument(skip(state, headers, payload))]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UserLoginRequest>, JsonRejection>,
) -> AppResult<Json<UserView>> {
    let user = state.users.login(json_body(payload)?).await?;
    Ok(Json(user.view(is_public(&headers))))
}
