use tracing::{error, info};
use validator::Validate;

use super::dto::{AuthResponse, Identity, LoginRequest, RegisterRequest, UpdateProfileRequest};
use super::model::User;
use crate::common::response::ApiError;
use crate::common::security;
use crate::state::AppState;

pub struct AuthService;

impl AuthService {
    pub async fn register(state: AppState, req: RegisterRequest) -> Result<AuthResponse, ApiError> {
        require_credentials(&req.email, &req.password)?;
        validate(&req, &["email", "password"])?;

        let existing = state.users.find_user_by_email(&req.email).await.map_err(|e| {
            error!(error = %e, "user lookup failed");
            ApiError::Internal("Internal server error")
        })?;
        if existing.is_some() {
            return Err(ApiError::Conflict("User already exists"));
        }

        let password_hash = security::hash_password(&req.password).map_err(|e| {
            error!(error = %e, "password hashing failed");
            ApiError::Internal("Failed to hash password")
        })?;

        let user = state
            .users
            .create_user(&req.email, &password_hash)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to create user");
                ApiError::Internal("Failed to create user")
            })?;

        info!(user_id = user.id, "user registered");
        Self::respond_with_token(&state, user)
    }

    pub async fn login(state: AppState, req: LoginRequest) -> Result<AuthResponse, ApiError> {
        require_credentials(&req.email, &req.password)?;
        validate(&req, &["email", "password"])?;

        let user = state
            .users
            .find_user_by_email(&req.email)
            .await
            .map_err(|e| {
                error!(error = %e, "user lookup failed");
                ApiError::Internal("Internal server error")
            })?
            .ok_or(ApiError::InvalidLogin)?;

        security::verify_password(&req.password, &user.password_hash)
            .map_err(|_| ApiError::InvalidLogin)?;

        Self::respond_with_token(&state, user)
    }

    pub async fn profile(state: AppState, identity: &Identity) -> Result<User, ApiError> {
        state
            .users
            .find_user_by_id(identity.user_id)
            .await
            .map_err(|e| {
                error!(user_id = identity.user_id, error = %e, "user lookup failed");
                ApiError::Internal("Internal server error")
            })?
            .ok_or(ApiError::NotFound("User not found"))
    }

    pub async fn update_profile(
        state: AppState,
        identity: &Identity,
        req: UpdateProfileRequest,
    ) -> Result<User, ApiError> {
        let email = req.email.trim();
        if email.is_empty() {
            return Self::profile(state, identity).await;
        }

        state
            .users
            .update_email(identity.user_id, email)
            .await
            .map_err(|e| {
                error!(user_id = identity.user_id, error = %e, "failed to update user");
                ApiError::Internal("Failed to update user")
            })?
            .ok_or(ApiError::NotFound("User not found"))
    }

    fn respond_with_token(state: &AppState, user: User) -> Result<AuthResponse, ApiError> {
        let token = security::issue_token(
            &Identity::from(&user),
            &state.config.jwt_secret,
            state.config.token_ttl_hours,
        )
        .map_err(|e| {
            error!(error = %e, "failed to generate token");
            ApiError::Internal("Failed to generate token")
        })?;

        Ok(AuthResponse { token, user })
    }
}

fn require_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password are required".to_string(),
        ));
    }
    Ok(())
}

/// Reports the first failing rule, checking fields in the given order.
fn validate<T: Validate>(req: &T, fields: &[&str]) -> Result<(), ApiError> {
    req.validate().map_err(|errors| {
        let by_field = errors.field_errors();
        let message = fields
            .iter()
            .filter_map(|field| by_field.get(*field))
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());
        ApiError::Validation(message)
    })
}
