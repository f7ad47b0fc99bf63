//! Embed page rendering
//!
//! Builds the HTML document served for social previews: Open Graph and
//! Twitter meta tags plus the `fc:frame` meta tag carrying a JSON payload
//! that launches the board as a Farcaster frame.

/// Settings for embed rendering, fixed per deployment
#[derive(Debug, Clone)]
pub struct FrameSettings {
    /// App name shown on the frame launch button
    pub app_name: String,
    /// Public base URL of this deployment
    pub base_url: String,
    /// Preview image used when a board is missing or has no images; also the
    /// fixed site image for the Open Graph tags
    pub fallback_image_url: String,
    /// Fixed preview title
    pub title: String,
    /// Fixed preview description
    pub description: String,
}

impl Default for FrameSettings {
    fn default() -> Self {
        let base_url = "http://localhost:3000".to_string();
        Self {
            app_name: "Castboard".to_string(),
            fallback_image_url: format!("{}/preview.png", base_url),
            base_url,
            title: "Castboard".to_string(),
            description: "Share image boards on Farcaster".to_string(),
        }
    }
}

impl FrameSettings {
    /// Build settings for a deployment base URL
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            fallback_image_url: format!("{}/preview.png", base_url),
            base_url,
            ..Self::default()
        }
    }

    /// Canonical URL of a board page
    pub fn board_url(&self, slug: &str) -> String {
        format!("{}/board/{}", self.base_url.trim_end_matches('/'), slug)
    }
}

/// Escape HTML special characters for safe interpolation into the document
fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render the embed HTML document for a board.
///
/// `image_url` is the preview image for the frame, normally the board's
/// first image; callers pass the fallback image when the board is missing
/// or empty.
pub fn render_board_embed(settings: &FrameSettings, slug: &str, image_url: &str) -> String {
    let board_url = settings.board_url(slug);

    let frame_payload = serde_json::json!({
        "version": "next",
        "imageUrl": image_url,
        "button": {
            "title": "Open board",
            "action": {
                "type": "launch_frame",
                "name": settings.app_name,
                "url": board_url,
            }
        }
    });

    let escaped_title = html_escape(&settings.title);
    let escaped_description = html_escape(&settings.description);
    let escaped_site_image = html_escape(&settings.fallback_image_url);
    let escaped_frame = html_escape(&frame_payload.to_string());
    let escaped_board_url = html_escape(&board_url);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{escaped_title}</title>
    <meta property="og:title" content="{escaped_title}">
    <meta property="og:description" content="{escaped_description}">
    <meta property="og:image" content="{escaped_site_image}">
    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:title" content="{escaped_title}">
    <meta name="twitter:description" content="{escaped_description}">
    <meta name="twitter:image" content="{escaped_site_image}">
    <meta name="fc:frame" content="{escaped_frame}">
</head>
<body>
    <p><a href="{escaped_board_url}">{escaped_title}</a></p>
</body>
</html>
"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_board_url() {
        let settings = FrameSettings::for_base_url("https://boards.example/");
        assert_eq!(
            settings.board_url("cats"),
            "https://boards.example/board/cats"
        );
    }

    #[test]
    fn test_render_contains_frame_image() {
        let settings = FrameSettings::default();
        let html = render_board_embed(&settings, "cats", "https://img.example/first.png");

        assert!(html.contains("fc:frame"));
        assert!(html.contains("https://img.example/first.png"));
        assert!(html.contains("imageUrl"));
        assert!(html.contains(&html_escape(&settings.board_url("cats"))));
    }

    #[test]
    fn test_render_escapes_payload_quotes() {
        let settings = FrameSettings::default();
        let html = render_board_embed(&settings, "cats", "https://img.example/first.png");

        // The JSON payload must be attribute-safe
        let content_start = html.find("fc:frame").unwrap();
        let frame_tag = &html[content_start..html[content_start..].find('>').unwrap() + content_start];
        assert!(!frame_tag.contains("\"imageUrl\""));
        assert!(frame_tag.contains("&quot;imageUrl&quot;"));
    }

    #[test]
    fn test_render_og_tags_use_fixed_site_image() {
        let settings = FrameSettings::for_base_url("https://boards.example");
        let html = render_board_embed(&settings, "cats", "https://img.example/first.png");

        assert!(html.contains(r#"property="og:image" content="https://boards.example/preview.png""#));
    }
}
