//! Relay service: form submission rules and page rendering.
//!
//! A POST to `/` goes through [`review_submission`] first:
//!
//! 1. If a token is configured and the form's `token` field does not match,
//!    the request is [`Submission::Unauthorized`].
//! 2. The `text` field has its trailing whitespace removed.  If nothing is
//!    left the result is [`Submission::Empty`].
//! 3. Otherwise the trimmed text is [`Submission::Forward`]ed to the receiver.
//!
//! The page itself is a single static form; every user-provided string is
//! escaped with [`html_escape`] before it is interpolated.

use std::fmt::{Display, Write as _};

use crate::domain::{FormFields, RelayConfig};

/// Status line shown when the submitted text is empty after trimming.
pub const EMPTY_TEXT_STATUS: &str = "Please enter some text.";

/// What to do with one form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Token missing or wrong.
    Unauthorized,
    /// Nothing left to send after trimming.
    Empty,
    /// Send this text to the receiver.
    Forward(String),
}

/// Applies the token check and the trailing-whitespace trim to a form.
pub fn review_submission(config: &RelayConfig, form: &FormFields) -> Submission {
    if let Some(expected) = config.required_token() {
        if form.get("token").map(String::as_str) != Some(expected) {
            return Submission::Unauthorized;
        }
    }

    let text = form.get("text").map_or("", |t| t.trim_end());
    if text.is_empty() {
        Submission::Empty
    } else {
        Submission::Forward(text.to_string())
    }
}

/// Status line after a successful send.
pub fn sent_status(bytes: usize) -> String {
    format!("Sent {bytes} bytes.")
}

/// Status line after a failed send.
pub fn failed_status(error: &dyn Display) -> String {
    format!("Failed: {error}")
}

/// Escapes the five HTML-significant characters.
pub fn html_escape(input: &str) -> String {
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

const PAGE_HEAD: &str = r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <title>LinuxKey Sender</title>
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <style>
    body { font-family: Arial, sans-serif; margin: 2rem auto; max-width: 42rem; }
    textarea { width: 100%; min-height: 12rem; font-family: Consolas, monospace; }
    button { padding: 0.6rem 1.2rem; }
    .status { margin: 0.5rem 0; }
  </style>
</head>
<body>
  <h1>LinuxKey Sender</h1>
"#;

/// Renders the form page.
///
/// `text` pre-fills the textarea; it is non-empty only after a failed send,
/// so the user does not lose what they typed.
pub fn render_page(config: &RelayConfig, status: Option<&str>, text: &str) -> String {
    let mut page = String::from(PAGE_HEAD);
    // Writing to a String cannot fail.
    let _ = writeln!(page, "  <p>Target: {}</p>", html_escape(&config.target.to_string()));
    if let Some(status) = status {
        let _ = writeln!(page, "  <div class=\"status\">{}</div>", html_escape(status));
    }
    page.push_str("  <form method=\"post\" action=\"/\">\n");
    let _ = writeln!(
        page,
        "    <textarea name=\"text\" placeholder=\"Paste text here...\">{}</textarea><br/>",
        html_escape(text)
    );
    if config.token_required() {
        page.push_str("    <input type=\"password\" name=\"token\" placeholder=\"Token\" />\n");
    }
    page.push_str("    <button type=\"submit\">Send</button>\n  </form>\n</body>\n</html>\n");
    page
}

// ── Tests ─────────────────────────────────────────────────────────────────────
