use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::response::ErrCode;
use crate::state::AppState;

pub const AUTH_COOKIE: &str = "auth_token";

/// Token claims; `sub` is the caller's `open_id`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Verified caller identity, placed into request extensions by [`require_bearer_token`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub open_id: String,
}

enum TokenSource {
    Missing,
    Malformed,
    Found(String),
}

fn cookie_token(cookie_header: &str) -> Option<&str> {
    cookie_header
        .split(';')
        .filter_map(|part| part.trim().strip_prefix("auth_token="))
        .find(|v| !v.is_empty())
}

fn extract_token(parts: &axum::http::HeaderMap) -> TokenSource {
    // 优先读取 Authorization 头，缺失时回退到 auth_token Cookie
    if let Some(h) = parts.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return match h.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => TokenSource::Found(t.trim().to_string()),
            _ => TokenSource::Malformed,
        };
    }
    let cookies = parts.get(header::COOKIE).and_then(|v| v.to_str().ok()).unwrap_or("");
    match cookie_token(cookies) {
        Some(t) => TokenSource::Found(t.to_string()),
        None => TokenSource::Missing,
    }
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &key, &validation).map(|d| d.claims)
}

/// 鉴权中间件：校验 Bearer token（或 auth_token Cookie），成功后注入 CurrentUser
/// 缺失返回 401 ERROR_AUTH，非法或过期返回 401 ERROR_AUTH_CHECK_TOKEN_FAIL
pub async fn require_bearer_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    let token = match extract_token(req.headers()) {
        TokenSource::Found(t) => t,
        TokenSource::Missing => {
            tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
            return Err(ApiError::unauthorized(ErrCode::ErrorAuth));
        }
        TokenSource::Malformed => {
            tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
            return Err(ApiError::unauthorized(ErrCode::ErrorAuthCheckTokenFail));
        }
    };

    match verify_token(&token, &state.auth.jwt_secret) {
        Ok(claims) if !claims.sub.trim().is_empty() => {
            req.extensions_mut().insert(CurrentUser { open_id: claims.sub });
            Ok(next.run(req).await)
        }
        Ok(_) => {
            tracing::warn!(path = %path, "token carries an empty subject");
            Err(ApiError::unauthorized(ErrCode::ErrorAuthCheckTokenFail))
        }
        Err(e) => {
            tracing::warn!(path = %path, err = %e, "token validation failed");
            Err(ApiError::unauthorized(ErrCode::ErrorAuthCheckTokenFail))
        }
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized(ErrCode::ErrorAuth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(sub: &str, exp_offset: i64, secret: &str) -> String {
        let exp = (models::unix_now() + exp_offset) as usize;
        encode(&Header::default(), &Claims { sub: sub.into(), exp }, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn cookie_is_found_among_others() {
        assert_eq!(cookie_token("theme=dark; auth_token=abc; lang=zh"), Some("abc"));
        assert_eq!(cookie_token("auth_token="), None);
        assert_eq!(cookie_token(""), None);
    }

    #[test]
    fn header_without_bearer_is_malformed() {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert!(matches!(extract_token(&h), TokenSource::Malformed));
    }

    #[test]
    fn no_credentials_is_missing() {
        assert!(matches!(extract_token(&HeaderMap::new()), TokenSource::Missing));
    }

    #[test]
    fn verify_accepts_valid_and_rejects_expired_or_foreign() {
        let ok = token("client-1", 3600, "secret");
        assert_eq!(verify_token(&ok, "secret").unwrap().sub, "client-1");
        assert!(verify_token(&ok, "other-secret").is_err());
        let expired = token("client-1", -3600, "secret");
        assert!(verify_token(&expired, "secret").is_err());
    }
}
