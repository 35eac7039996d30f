use crate::{
    api::{
        error::AccountError,
        handlers::types::{ErrorResponse, LoginRequest, LoginResponse, UserProfile},
    },
    password,
    store::UserStore,
};
use anyhow::Context;
use axum::{Json, extract::Extension};
use std::sync::Arc;
use tracing::{debug, instrument};

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse, content_type = "application/json"),
        (status = 400, description = "Invalid credentials or missing payload", body = ErrorResponse),
        (status = 500, description = "Store or hashing failure", body = ErrorResponse)
    ),
    tag = "accounts"
)]
#[instrument(skip(store, payload))]
pub async fn login(
    store: Extension<Arc<dyn UserStore>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<Json<LoginResponse>, AccountError> {
    let Some(Json(request)) = payload else {
        return Err(AccountError::MissingPayload);
    };

    debug!("login request: {:?}", request);

    let user = store.find_by_email(&request.email).await?;

    // Unknown emails still pay for one verification.
    let digest = user
        .as_ref()
        .map_or_else(|| password::DUMMY_DIGEST.to_string(), |user| user.password.clone());
    let plaintext = request.password;
    let verified = tokio::task::spawn_blocking(move || password::verify(&plaintext, &digest))
        .await
        .context("password verification task failed")??;

    match user {
        Some(user) if verified => {
            debug!("Login successful");
            Ok(Json(LoginResponse {
                message: "Login successful".to_string(),
                user: UserProfile {
                    name: user.name,
                    email: user.email,
                    role: user.role,
                },
            }))
        }
        Some(_) => {
            debug!("Password mismatch");
            Err(AccountError::InvalidCredentials)
        }
        None => {
            debug!("User not found");
            Err(AccountError::InvalidCredentials)
        }
    }
}
