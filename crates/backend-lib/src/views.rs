//! Minimal HTML pages.
use axum::response::Html;

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, logged_in: bool, flash: Option<&str>, body: &str) -> Html<String> {
    let nav = if logged_in {
        r#"<a href="/">Home</a> <a href="/secrets">Secrets</a> <a href="/logout">Log Out</a>"#
    } else {
        r#"<a href="/">Home</a> <a href="/login">Login</a> <a href="/register">Register</a>"#
    };
    let flash = flash
        .map(|m| format!(r#"<p class="flash">{}</p>"#, escape(m)))
        .unwrap_or_default();

    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<nav>{nav}</nav>\n{flash}\n{body}\n</body>\n</html>\n",
        title = escape(title),
    ))
}

/// Landing page
pub fn home(logged_in: bool, flash: Option<&str>) -> Html<String> {
    let body = if logged_in {
        r#"<h1>Welcome back</h1><p><a href="/secrets">Go to your secrets</a></p>"#
    } else {
        r#"<h1>Welcome</h1><p><a href="/register">Register</a> or <a href="/login">log in</a> to see the secrets.</p>"#
    };
    layout("Home", logged_in, flash, body)
}

/// Registration form, with an optional error above it
pub fn register(logged_in: bool, flash: Option<&str>, error: Option<&str>) -> Html<String> {
    let error = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    let body = format!(
        r#"<h1>Register</h1>{error}
<form method="post" action="/register">
<input type="text" name="name" placeholder="Name" required>
<input type="email" name="email" placeholder="Email" required>
<input type="password" name="password" placeholder="Password" required>
<button type="submit">Sign me up</button>
</form>"#
    );
    layout("Register", logged_in, flash, &body)
}

/// Login form, with an optional error above it
pub fn login(logged_in: bool, flash: Option<&str>, error: Option<&str>) -> Html<String> {
    let error = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    let body = format!(
        r#"<h1>Login</h1>{error}
<form method="post" action="/login">
<input type="email" name="email" placeholder="Email" required>
<input type="password" name="password" placeholder="Password" required>
<button type="submit">Let me in</button>
</form>"#
    );
    layout("Login", logged_in, flash, &body)
}

/// Protected page
pub fn secrets(name: &str, flash: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<h1>Welcome, {}.</h1>
<p>Here are your secrets.</p>
<p><a href="/download">Download Your File</a></p>"#,
        escape(name)
    );
    layout("Secrets", true, flash, &body)
}
