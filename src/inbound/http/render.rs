//! Minimal server-side HTML rendering.
//!
//! Pages are assembled from small string-building helpers rather than a
//! template engine. Every value that originates from user input must pass
//! through [`escape`] before it is interpolated into markup.

use actix_web::http::header;
use actix_web::HttpResponse;

use super::session::Flash;

/// Escape the HTML-significant characters in user-supplied text.
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn nav(username: Option<&str>) -> String {
    match username {
        Some(name) => format!(
            concat!(
                r#"<nav><a href="/dashboard">Dashboard</a> "#,
                r#"<a href="/blog">Blog</a> <a href="/social">Social</a> "#,
                r#"<a href="/chatbot">Chatbot</a> <a href="/analytics">Analytics</a> "#,
                r#"<span>Signed in as {}</span> <a href="/logout">Logout</a></nav>"#
            ),
            escape(name)
        ),
        None => concat!(
            r#"<nav><a href="/">Home</a> <a href="/login">Login</a> "#,
            r#"<a href="/register">Register</a></nav>"#
        )
        .to_owned(),
    }
}

fn flash_block(flashes: &[Flash]) -> String {
    let mut block = String::new();
    for flash in flashes {
        block.push_str(&format!(
            r#"<p class="flash {}">{}</p>"#,
            flash.kind.css_class(),
            escape(&flash.message)
        ));
    }
    block
}

/// Render a full page with the shared chrome around `body`.
///
/// `body` is trusted markup built by the caller; anything user-supplied in it
/// must already be escaped.
pub fn page(title: &str, username: Option<&str>, flashes: &[Flash], body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8"><title>{title}</title></head>"#,
            "<body>{nav}{flashes}<main>{body}</main></body></html>"
        ),
        title = escape(title),
        nav = nav(username),
        flashes = flash_block(flashes),
        body = body,
    )
}

/// Render a bare error page for the response layer.
pub fn error_page(message: &str) -> String {
    page("Error", None, &[], &format!("<h1>{}</h1>", escape(message)))
}

/// A 200 response carrying rendered HTML.
pub fn html(markup: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(markup)
}

/// A 303 redirect, used after every successful form submission.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use rstest::rstest;

    #[rstest]
    #[case("plain text", "plain text")]
    #[case("<script>", "&lt;script&gt;")]
    #[case("a & b", "a &amp; b")]
    #[case(r#"say "hi""#, "say &quot;hi&quot;")]
    fn escape_neutralises_markup(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[test]
    fn page_includes_flashes_and_identity() {
        let markup = page(
            "Dashboard",
            Some("alice"),
            &[Flash::success("saved")],
            "<p>hello</p>",
        );
        assert!(markup.contains("Signed in as alice"));
        assert!(markup.contains(r#"class="flash success""#));
        assert!(markup.contains("saved"));
        assert!(markup.contains("<p>hello</p>"));
    }

    #[test]
    fn page_escapes_hostile_usernames() {
        let markup = page("Home", Some("<img>"), &[], "");
        assert!(markup.contains("&lt;img&gt;"));
        assert!(!markup.contains("<img>"));
    }

    #[test]
    fn redirect_sets_location() {
        let response = redirect("/login");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .expect("location header"),
            "/login"
        );
    }
}
