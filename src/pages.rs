use pulldown_cmark::{Event, Parser, html};

use crate::VideoId;

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; color: #222; }\
input[type=text] { width: 100%; padding: 0.5rem; font-size: 1rem; }\
button { margin-top: 0.5rem; padding: 0.5rem 1.5rem; font-size: 1rem; }\
.flash { background: #fde8e8; border: 1px solid #f5b5b5; padding: 0.75rem; border-radius: 4px; }\
.summary { line-height: 1.5; }\
footer { margin-top: 3rem; color: #888; font-size: 0.85rem; }";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = html_escape::encode_text(title),
    )
}

/// The landing page: URL input form, plus a transient flash message if the
/// previous request failed.
pub fn index(flash: Option<&str>) -> String {
    let flash_html = match flash {
        Some(message) => format!(
            "<p class=\"flash\">{}</p>\n",
            html_escape::encode_text(message)
        ),
        None => String::new(),
    };
    let body = format!(
        "<h1>ytbrief</h1>\n\
         <p>Paste a YouTube link to get a summary of the video's transcript.</p>\n\
         {flash_html}\
         <form action=\"/summarize\" method=\"post\">\n\
         <input type=\"text\" name=\"youtube_url\" placeholder=\"https://www.youtube.com/watch?v=...\" required autofocus>\n\
         <button type=\"submit\">Summarize</button>\n\
         </form>"
    );
    page("ytbrief", &body)
}

/// The result page: the summary rendered from Markdown, plus a link back to
/// the video.
pub fn summary(video_id: &VideoId, summary_markdown: &str) -> String {
    let body = format!(
        "<h1>Summary</h1>\n\
         <p><a href=\"https://www.youtube.com/watch?v={id}\">Watch the video</a> \
         (ID: <code>{id}</code>)</p>\n\
         <div class=\"summary\">{rendered}</div>\n\
         <footer><a href=\"/\">Summarize another video</a></footer>",
        id = video_id,
        rendered = render_markdown(summary_markdown),
    );
    page("Summary · ytbrief", &body)
}

/// Generic error page for 404/500: a short message plus the status code,
/// nothing else.
pub fn error(status: u16) -> String {
    let message = match status {
        404 => "Page not found.",
        _ => "Something went wrong on our end.",
    };
    let body = format!("<h1>{status}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back to start</a></p>");
    page(&format!("{status} · ytbrief"), &body)
}

/// Render model output as Markdown. Inline HTML in the model's output is
/// demoted to literal text so it cannot inject markup into the page.
fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new(markdown).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_has_form() {
        let html = index(None);
        assert!(html.contains("action=\"/summarize\""));
        assert!(html.contains("name=\"youtube_url\""));
        assert!(!html.contains("class=\"flash\""));
    }

    #[test]
    fn test_index_escapes_flash_message() {
        let html = index(Some("<script>alert(1)</script>"));
        assert!(html.contains("class=\"flash\""));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_summary_renders_markdown() {
        let id = VideoId::new("dQw4w9WgXcQ").unwrap();
        let html = summary(&id, "## Overview\n\n- first point\n- second point");
        assert!(html.contains("<h2>Overview</h2>"));
        assert!(html.contains("<li>first point</li>"));
        assert!(html.contains("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_summary_neutralizes_inline_html() {
        let id = VideoId::new("dQw4w9WgXcQ").unwrap();
        let html = summary(&id, "hello <script>alert(1)</script> world");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_error_page_shows_status() {
        let html = error(404);
        assert!(html.contains("404"));
        assert!(html.contains("Page not found."));

        let html = error(500);
        assert!(html.contains("500"));
    }
}
