/// Authentication handlers
use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::{LoginForm, SignupRequest, UserResponse},
    AppState,
};

/// POST /auth/signup
pub async fn signup(
    state: web::Data<AppState>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = state.auth.signup(&payload.email, &payload.password).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// POST /auth/login
///
/// OAuth2 password grant: form fields `username` (the email) and `password`.
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let token = state.auth.login(&form.username, &form.password).await?;

    Ok(HttpResponse::Ok().json(token))
}
