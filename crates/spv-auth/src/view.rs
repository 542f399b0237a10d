//! Minimal sign-in page. The rest of the application owns its own views.

/// Sign-in form, optionally prefilled and with an error banner.
pub fn sign_in(username: &str, error: Option<&str>) -> String {
    let banner = error
        .map(|e| format!("<p class=\"error\">{}</p>", escape(e)))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>
<html>
<head><meta charset=\"utf-8\"><title>Sign in</title></head>
<body>
<form method=\"post\" action=\"{action}\">
{banner}
<label>Username <input name=\"username\" value=\"{username}\" autocomplete=\"username\" required></label>
<label>Password <input name=\"password\" type=\"password\" autocomplete=\"current-password\" required></label>
<button type=\"submit\">Sign in</button>
</form>
</body>
</html>",
        action = spv_core::SIGN_IN_PATH,
        banner = banner,
        username = escape(username),
    )
}

/// Escapes text for HTML bodies and attribute values.
pub fn escape(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            c => c.to_string(),
        })
        .collect()
}
