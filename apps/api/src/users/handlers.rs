use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::scoring::store::load_history;
use crate::state::AppState;
use crate::users::profile::{dashboard_route, profile_progress, AuthProvider, UserRole};
use crate::users::store::{create_user, get_user, touch_login, NewUser};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default = "default_provider")]
    pub provider: AuthProvider,
}

fn default_provider() -> AuthProvider {
    AuthProvider::Password
}

#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    #[serde(flatten)]
    pub user: UserRow,
    pub dashboard_route: &'static str,
    pub profile_progress: u8,
}

impl CreateUserRequest {
    fn validate(self) -> Result<NewUser, AppError> {
        let uid = self.uid.trim();
        let name = self.name.trim();
        let email = self.email.trim();
        if uid.is_empty() || name.is_empty() || email.is_empty() {
            return Err(AppError::Validation(
                "uid, name, and email are required".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(AppError::Validation(format!("Invalid email: {email}")));
        }
        Ok(NewUser {
            uid: uid.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: self.role,
            provider: self.provider,
        })
    }
}

async fn profile_response(state: &AppState, user: UserRow) -> Result<UserProfileResponse, AppError> {
    let history = load_history(&state.db, &user.uid).await?;
    Ok(UserProfileResponse {
        dashboard_route: dashboard_route(&user.role),
        profile_progress: profile_progress(&user, &history),
        user,
    })
}

/// POST /api/v1/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserProfileResponse>), AppError> {
    let new_user = req.validate()?;
    let user = create_user(&state.db, &new_user).await?;
    Ok((StatusCode::CREATED, Json(profile_response(&state, user).await?)))
}

/// GET /api/v1/users/:uid
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<UserProfileResponse>, AppError> {
    let user = get_user(&state.db, &uid).await?;
    Ok(Json(profile_response(&state, user).await?))
}

/// POST /api/v1/users/:uid/login
pub async fn handle_login(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<UserProfileResponse>, AppError> {
    let user = touch_login(&state.db, &uid).await?;
    Ok(Json(profile_response(&state, user).await?))
}
