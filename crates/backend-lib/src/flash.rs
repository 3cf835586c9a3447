//! One-shot messages carried to the next rendered page in a cookie.
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// Name of the flash cookie
pub const FLASH_COOKIE: &str = "gatekeeper_flash";

/// Queue `message` for the next page, replacing any pending one
pub fn set(jar: CookieJar, message: &str) -> CookieJar {
    let cookie = Cookie::build((FLASH_COOKIE, URL_SAFE_NO_PAD.encode(message)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    jar.add(cookie)
}

/// Take the pending message, if any, and clear the cookie
pub fn take(jar: CookieJar) -> (CookieJar, Option<String>) {
    let Some(raw) = jar.get(FLASH_COOKIE).map(|c| c.value().to_owned()) else {
        return (jar, None);
    };

    // a cookie we cannot decode is dropped silently
    let message = URL_SAFE_NO_PAD
        .decode(raw)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());

    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, message)
}
