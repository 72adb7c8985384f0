use axum::{
    body::Body as AxumBody,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{DecodingKey, Validation, decode};
use std::sync::Arc;
use tracing::warn;

use crate::web::models::{AuthenticatedUser, Claims};
use crate::web::{AppState, error::AppError};

fn bearer_or_cookie<B>(req: &Request<B>, jar: &CookieJar) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|s| s.to_string())
        .or_else(|| jar.get("token").map(|c| c.value().to_string()))
}

/// Decodes the caller's token when one is sent and stores the result as
/// `Extension<Option<AuthenticatedUser>>`. A missing or undecodable token
/// leaves the request anonymous; handlers that need a user reject it through
/// [`require_user`].
pub async fn optional_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut req: Request<AxumBody>,
    next: Next,
) -> Response {
    let user = bearer_or_cookie(&req, &jar).and_then(|token| {
        match decode::<Claims>(
            &token,
            &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
            &Validation::default(),
        ) {
            Ok(token_data) => Some(AuthenticatedUser {
                id: token_data.claims.sub,
            }),
            Err(e) => {
                warn!(error = ?e, "Ignoring undecodable JWT; continuing as anonymous.");
                None
            }
        }
    });

    req.extensions_mut().insert(user);
    next.run(req).await
}

pub fn require_user(user: Option<AuthenticatedUser>) -> Result<AuthenticatedUser, AppError> {
    user.ok_or(AppError::Unauthorized)
}
