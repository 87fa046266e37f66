//! Authentication handlers.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, session_id};
use crate::api::AppState;
use crate::domain::{SessionUser, Signup, UserResponse, UserRole};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Account creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    #[schema(example = "Alice Smith")]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    #[schema(example = "alice@campus.edu")]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    #[validate(length(min = 1, max = 64, message = "phone is required"))]
    #[schema(example = "555-0100")]
    pub phone: String,
    #[validate(length(min = 1, max = 255, message = "department is required"))]
    #[schema(example = "Computer Science")]
    pub department: String,
    pub role: UserRole,
    /// Required for club admins, ignored for students
    #[schema(example = "Tech")]
    #[serde(default)]
    pub club_name: Option<String>,
}

impl From<SignupRequest> for Signup {
    fn from(request: SignupRequest) -> Self {
        Signup {
            name: request.name,
            email: request.email,
            password: request.password,
            phone: request.phone,
            department: request.department,
            role: request.role,
            club_name: request.club_name,
        }
    }
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    #[schema(example = "alice@campus.edu")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

pub fn auth_routes(state: &AppState) -> Router<AppState> {
    let require_session = middleware::from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/whoami", get(whoami).route_layer(require_session))
}

/// Create an account
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.auth_service.signup(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Log in and receive the session cookie
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = SessionUser),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<SessionUser>)> {
    let session = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    let jar = jar.add(state.cookies.session_cookie(session.id));
    Ok((jar, Json(session.user)))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session cleared", body = MessageResponse)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<MessageResponse>)> {
    if let Some(id) = session_id(&headers) {
        state.auth_service.logout(&id).await?;
    }

    let jar = jar.remove(state.cookies.removal_cookie());
    Ok((jar, Json(MessageResponse::new("Logged out"))))
}

/// Current session identity
#[utoipa::path(
    get,
    path = "/auth/whoami",
    tag = "Authentication",
    responses(
        (status = 200, description = "Authenticated user", body = SessionUser),
        (status = 401, description = "No valid session")
    ),
    security(("session_cookie" = []))
)]
pub async fn whoami(Extension(user): Extension<SessionUser>) -> Json<SessionUser> {
    Json(user)
}
