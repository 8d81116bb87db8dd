use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;

use crate::services::activity_directory::{ActivitiesSnapshot, Confirmation};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    // Only presence is checked; the address is stored as given.
    fn require(self) -> ApiResult<String> {
        match self.email {
            Some(email) if !email.is_empty() => Ok(email),
            _ => Err(ApiError::unprocessable("email query parameter is required")),
        }
    }
}

pub async fn list_activities_handler(State(state): State<AppState>) -> Json<ActivitiesSnapshot> {
    Json(state.directory.list_activities())
}

pub async fn signup_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult<Json<Confirmation>> {
    let Path(activity_name) = path?;
    let Query(query) = query?;
    let email = query.require()?;
    let confirmation = state.directory.signup(&activity_name, &email)?;
    Ok(Json(confirmation))
}

pub async fn unregister_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult<Json<Confirmation>> {
    let Path(activity_name) = path?;
    let Query(query) = query?;
    let email = query.require()?;
    let confirmation = state.directory.unregister(&activity_name, &email)?;
    Ok(Json(confirmation))
}
