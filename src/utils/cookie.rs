use axum::http::HeaderValue;

use crate::utils::error::AppError;

/// 쿠키 이름 상수
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

fn build_cookie(name: &str, value: &str, max_age_seconds: i64) -> Result<HeaderValue, AppError> {
    let cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        name, value, max_age_seconds
    );
    HeaderValue::from_str(&cookie)
        .map_err(|_| AppError::InternalError(format!("Invalid {} cookie value", name)))
}

/// Access Token 쿠키 생성
pub fn create_access_token_cookie(
    token: &str,
    max_age_seconds: i64,
) -> Result<HeaderValue, AppError> {
    build_cookie(ACCESS_TOKEN_COOKIE, token, max_age_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_http_only_cookie_with_max_age() {
        let value = create_access_token_cookie("tok", 1800).unwrap();
        let value = value.to_str().unwrap();

        assert!(value.starts_with("access_token=tok;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Max-Age=1800"));
    }
}
