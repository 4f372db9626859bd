use crate::session::Flash;

fn base_style() -> &'static str {
    r#"
    body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; background: #f4f5f7; margin: 0; }
    .card { max-width: 420px; margin: 64px auto; background: #fff; border-radius: 8px; padding: 32px;
            box-shadow: 0 2px 12px rgba(0, 0, 0, 0.08); }
    h1 { font-size: 24px; margin: 0 0 24px; }
    .form-group { margin-bottom: 16px; }
    .form-group label { display: block; font-size: 14px; margin-bottom: 6px; color: #333; }
    .form-group input { width: 100%; box-sizing: border-box; padding: 10px; border: 1px solid #ccc; border-radius: 4px; }
    .btn { display: inline-block; padding: 10px 18px; border: none; border-radius: 4px; cursor: pointer;
           background: #0d6efd; color: #fff; text-decoration: none; font-size: 14px; }
    .btn-secondary { background: #6c757d; }
    .alert { padding: 12px 16px; border-radius: 4px; margin-bottom: 16px; font-size: 14px; }
    .alert-success { background: #d1e7dd; color: #0f5132; }
    .alert-info { background: #cff4fc; color: #055160; }
    .alert-warning { background: #fff3cd; color: #664d03; }
    .alert-danger { background: #f8d7da; color: #842029; }
    .link { margin-top: 16px; font-size: 14px; }
    "#
}

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_flashes(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|flash| {
            format!(
                r#"<div class="alert alert-{level}" role="alert">{message}</div>"#,
                level = flash.level,
                message = escape_html(&flash.message),
            )
        })
        .collect::<Vec<_>>()
        .join("\n  ")
}

fn layout(title: &str, flashes: &[Flash], content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head><body>
<div class="card">
  {flashes}
  {content}
</div>
</body></html>"#,
        style = base_style(),
        flashes = render_flashes(flashes),
    )
}

fn credentials_form(action: &str, submit_label: &str, password_autocomplete: &str) -> String {
    format!(
        r#"<form method="POST" action="{action}">
    <div class="form-group">
      <label for="username">Username</label>
      <input type="text" id="username" name="username" required autocomplete="username">
    </div>
    <div class="form-group">
      <label for="password">Password</label>
      <input type="password" id="password" name="password" required autocomplete="{password_autocomplete}">
    </div>
    <button type="submit" class="btn">{submit_label}</button>
  </form>"#
    )
}

pub fn register_page(flashes: &[Flash]) -> String {
    let content = format!(
        r#"<h1>Register</h1>
  {form}
  <div class="link">Already have an account? <a href="/login">Login</a></div>"#,
        form = credentials_form("/register", "Register", "new-password"),
    );
    layout("Register", flashes, &content)
}

pub fn login_page(flashes: &[Flash]) -> String {
    let content = format!(
        r#"<h1>Login</h1>
  {form}
  <div class="link">No account yet? <a href="/register">Register</a></div>"#,
        form = credentials_form("/login", "Login", "current-password"),
    );
    layout("Login", flashes, &content)
}

pub fn welcome_page(username: &str, flashes: &[Flash]) -> String {
    let content = format!(
        r#"<h1>Welcome, {username}!</h1>
  <p>You are logged in.</p>
  <a href="/logout" class="btn btn-secondary">Logout</a>"#,
        username = escape_html(username),
    );
    layout("Welcome", flashes, &content)
}
