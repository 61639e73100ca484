use axum::http::{header, HeaderMap, HeaderValue};

pub const SESSION_COOKIE: &str = "sid";

fn with_attributes(pair: String, secure: bool) -> String {
    let mut cookie = pair;
    cookie.push_str("; Path=/; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn session_cookie(token: &str, secure: bool) -> anyhow::Result<HeaderValue> {
    let value = with_attributes(format!("{}={}", SESSION_COOKIE, token), secure);
    Ok(HeaderValue::from_str(&value)?)
}

pub fn clear_session_cookie(secure: bool) -> HeaderValue {
    let value = with_attributes(
        format!(
            "{}=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            SESSION_COOKIE
        ),
        secure,
    );
    // built only from constants
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("sid=; Max-Age=0"))
}

/// Value of the session cookie, if the request carries a non-empty one.
pub fn read_session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
