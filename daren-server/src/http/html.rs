//! HTML fragments for the dare pages
//!
//! Pages are small enough to build with `format!`. Anything user-supplied
//! goes through `escape` first.

use axum::response::Html;

use crate::db::Dare;

/// Escape text for use in element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a body in the shared page chrome.
pub fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Daren</title>
</head>
<body>
<nav><a href="/">Home</a> | <a href="/create">Create</a> | <a href="/random">Random</a> | <a href="/all">All</a></nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    ))
}

/// Values to prefill the create form with after a failed submit
#[derive(Debug, Default)]
pub struct FormState<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub added_by: &'a str,
    pub error: Option<String>,
}

pub fn index() -> Html<String> {
    page(
        "Home",
        r#"<h1>Daren</h1>
<p>Write a dare, or take one you have not seen yet.</p>
<ul>
<li><a href="/create">Create a dare</a></li>
<li><a href="/random">Get a random dare</a></li>
<li><a href="/all">See all dares</a></li>
</ul>"#,
    )
}

pub fn create_form(state: &FormState<'_>) -> Html<String> {
    let error = state
        .error
        .as_deref()
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();

    page(
        "Create",
        &format!(
            r#"<h1>Create a dare</h1>
{error}
<form method="post" action="/create">
<label>Title <input name="title" maxlength="128" value="{title}" required></label>
<label>Dare <textarea name="text" maxlength="1000" required>{text}</textarea></label>
<label>Your name <input name="addedBy" maxlength="64" value="{added_by}"></label>
<button type="submit">Create</button>
</form>"#,
            title = escape(state.title),
            text = escape(state.text),
            added_by = escape(state.added_by),
        ),
    )
}

pub fn success() -> Html<String> {
    page(
        "Created",
        r#"<h1>Dare created</h1>
<p><a href="/create">Add another</a> or <a href="/random">take one</a>.</p>"#,
    )
}

fn dare_card(dare: &Dare) -> String {
    format!(
        r#"<article>
<h2>{title}</h2>
<p>{text}</p>
<footer>added by {added_by}</footer>
</article>"#,
        title = escape(&dare.title),
        text = escape(&dare.text),
        added_by = escape(&dare.added_by),
    )
}

pub fn all(dares: &[Dare]) -> Html<String> {
    if dares.is_empty() {
        return page("All dares", "<h1>All dares</h1>\n<p>No dares yet.</p>");
    }

    let cards: String = dares.iter().map(dare_card).collect::<Vec<_>>().join("\n");
    page("All dares", &format!("<h1>All dares</h1>\n{cards}"))
}

pub fn random(dare: Option<&Dare>) -> Html<String> {
    match dare {
        Some(dare) => page("Your dare", &dare_card(dare)),
        None => page(
            "No dares left",
            r#"<h1>No dares left</h1>
<p>Every dare has been seen. <a href="/create">Write a new one</a>.</p>"#,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b onclick="x">Tom & 'Jerry'</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn dare_text_is_escaped() {
        let dare = Dare {
            id: 1,
            title: "<script>".into(),
            text: "a & b".into(),
            added_by: "anonymous".into(),
            seen: true,
            created_at: Utc::now(),
        };

        let Html(body) = all(&[dare]);
        assert!(body.contains("&lt;script&gt;"));
        assert!(!body.contains("<script>"));
        assert!(body.contains("a &amp; b"));
    }

    #[test]
    fn form_keeps_values_and_error() {
        let Html(body) = create_form(&FormState {
            title: "Jump",
            text: "",
            added_by: "Kim",
            error: Some("text cannot be empty".into()),
        });
        assert!(body.contains(r#"value="Jump""#));
        assert!(body.contains("text cannot be empty"));
    }
}
