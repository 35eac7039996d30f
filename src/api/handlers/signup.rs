use crate::{
    api::{
        error::AccountError,
        handlers::types::{ErrorResponse, MessageResponse, SignupRequest},
    },
    password,
    store::{InsertOutcome, NewUser, UserStore},
};
use anyhow::Context;
use axum::{Json, extract::Extension};
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User created", body = MessageResponse, content_type = "application/json"),
        (status = 400, description = "Email already registered or missing payload", body = ErrorResponse),
        (status = 500, description = "Store or hashing failure", body = ErrorResponse)
    ),
    tag = "accounts"
)]
#[instrument(skip(store, payload))]
pub async fn signup(
    store: Extension<Arc<dyn UserStore>>,
    payload: Option<Json<SignupRequest>>,
) -> Result<Json<MessageResponse>, AccountError> {
    let Some(Json(request)) = payload else {
        return Err(AccountError::MissingPayload);
    };

    debug!("signup request: {:?}", request);

    if store.find_by_email(&request.email).await?.is_some() {
        debug!("Email already registered");
        return Err(AccountError::Conflict);
    }

    let SignupRequest {
        name,
        email,
        password: plaintext,
        role,
    } = request;

    let digest = tokio::task::spawn_blocking(move || password::hash(&plaintext))
        .await
        .context("password hashing task failed")??;

    match store
        .insert(NewUser {
            name,
            email,
            password: digest,
            role,
        })
        .await?
    {
        InsertOutcome::Created(id) => {
            info!(user_id = %id, "user created");
            Ok(Json(MessageResponse {
                message: "User created successfully".to_string(),
            }))
        }
        // Lost a race with a concurrent signup for the same email.
        InsertOutcome::Conflict => Err(AccountError::Conflict),
    }
}
