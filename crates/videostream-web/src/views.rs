//! HTML presentation layer.
//!
//! Server-rendered pages: a shared shell with the navigation bar and the
//! configuration banner, plus one renderer per page state. Logic stays in
//! the core/client/pipeline components; these functions only format their
//! outputs.

use videostream_core::VideoRecord;

/// Escape text for interpolation into HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; }
nav { background: #1f2937; color: #fff; padding: 1rem 2rem; display: flex; justify-content: space-between; }
nav a, nav button { color: #fff; text-decoration: none; margin-left: 1rem; background: none; border: none; font-size: 1rem; cursor: pointer; }
nav .brand { font-weight: bold; font-size: 1.25rem; margin-left: 0; }
main { max-width: 56rem; margin: 0 auto; padding: 2rem; }
.banner-warn { background: #fef9c3; border-left: 4px solid #eab308; color: #854d0e; padding: 1rem; margin-bottom: 1rem; }
.banner-error { background: #fee2e2; border: 1px solid #f87171; color: #b91c1c; padding: 1rem; margin-bottom: 1rem; border-radius: 0.25rem; }
.banner-success { background: #dcfce7; border: 1px solid #4ade80; color: #166534; padding: 1rem; margin-bottom: 1rem; border-radius: 0.25rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1.5rem; }
.card { border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 1rem; }
.card h3 { margin: 0 0 0.5rem 0; }
.muted { color: #6b7280; font-size: 0.875rem; }
label { display: block; margin: 0.75rem 0 0.25rem; font-weight: 500; }
input, textarea { width: 100%; padding: 0.5rem; border: 1px solid #d1d5db; border-radius: 0.375rem; box-sizing: border-box; }
button[type=submit] { margin-top: 1rem; background: #2563eb; color: #fff; border: none; padding: 0.6rem 1.2rem; border-radius: 0.375rem; cursor: pointer; }
video { width: 100%; background: #000; border-radius: 0.5rem; }
progress { width: 100%; }
"#;

/// Shared page shell: navigation bar plus the configuration banner shown on
/// every page while the backend is unconfigured.
pub fn layout(title: &str, config_valid: bool, signed_in: bool, body: &str) -> String {
    let session_links = if config_valid {
        if signed_in {
            r#"<a href="/upload">Upload</a>
            <form method="post" action="/auth/signout" style="display:inline"><button type="submit">Sign Out</button></form>"#
        } else {
            r#"<a href="/auth">Sign In</a>"#
        }
    } else {
        ""
    };

    let config_banner = if config_valid {
        String::new()
    } else {
        r#"<div class="banner-warn"><p><strong>Supabase Not Configured</strong></p>
        <p>Please set up your Supabase environment variables. See the Supabase Setup Guide for instructions.</p></div>"#
            .to_string()
    };

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - VideoStream</title>
<style>{STYLE}</style>
</head>
<body>
<nav>
  <a class="brand" href="/">VideoStream</a>
  <div>
    <a href="/videos">Browse Videos</a>
    {session_links}
  </div>
</nav>
{config_banner}
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        session_links = session_links,
        config_banner = config_banner,
        body = body,
    )
}

pub fn home_page(
    config_valid: bool,
    signed_in: bool,
    setup_required: bool,
    supabase_error: bool,
) -> String {
    let mut body = String::new();
    if setup_required {
        body.push_str(
            r#"<div class="banner-warn"><p><strong>Supabase Setup Required</strong></p>
            <p>Please set up your Supabase environment variables to enable full functionality.</p></div>"#,
        );
    }
    if supabase_error {
        body.push_str(
            r#"<div class="banner-error"><p><strong>Supabase Connection Error</strong></p>
            <p>There was an error connecting to Supabase. Please check your configuration and try again.</p></div>"#,
        );
    }
    body.push_str(
        r#"<h1>Welcome to VideoStream</h1>
<p>A platform where you can upload and stream videos online. Share your content with the world!</p>
<p><a href="/videos">Browse Videos</a> &middot; <a href="/upload">Upload Video</a></p>"#,
    );
    if !config_valid {
        body.push_str(
            r#"<h2>Getting Started</h2>
<ol>
<li>Create a Supabase account and project</li>
<li>Copy your Supabase URL and anon key from the project settings</li>
<li>Set SUPABASE_URL and SUPABASE_ANON_KEY in your environment</li>
<li>Create the videos table and storage bucket, then restart the server</li>
</ol>"#,
        );
    }
    layout("Home", config_valid, signed_in, &body)
}

pub fn auth_page(
    config_valid: bool,
    sign_up: bool,
    error: Option<&str>,
    message: Option<&str>,
) -> String {
    if !config_valid {
        return not_configured_page("Authentication", "authentication");
    }

    let heading = if sign_up { "Create an Account" } else { "Sign In" };
    let mode = if sign_up { "signup" } else { "signin" };
    let submit_label = if sign_up { "Sign Up" } else { "Sign In" };
    let toggle = if sign_up {
        r#"<a href="/auth">Already have an account? Sign In</a>"#
    } else {
        r#"<a href="/auth?mode=signup">Need an account? Sign Up</a>"#
    };

    let error_banner = error
        .map(|e| format!(r#"<div class="banner-error">{}</div>"#, escape(e)))
        .unwrap_or_default();
    let message_banner = message
        .map(|m| format!(r#"<div class="banner-success">{}</div>"#, escape(m)))
        .unwrap_or_default();

    let body = format!(
        r#"<h1>{heading}</h1>
{error_banner}
{message_banner}
<form method="post" action="/auth">
  <input type="hidden" name="mode" value="{mode}">
  <label for="email">Email Address</label>
  <input type="email" id="email" name="email" required>
  <label for="password">Password</label>
  <input type="password" id="password" name="password" required>
  <button type="submit">{submit_label}</button>
</form>
<p>{toggle}</p>"#,
    );
    layout("Authentication", config_valid, false, &body)
}

pub fn videos_page(config_valid: bool, signed_in: bool, videos: &[VideoRecord]) -> String {
    if !config_valid {
        return not_configured_page("Browse Videos", "video browsing");
    }

    let body = if videos.is_empty() {
        r#"<h1>Browse Videos</h1>
<p>No videos available yet</p>
<p><a href="/upload">Upload a Video</a></p>"#
            .to_string()
    } else {
        let cards: String = videos
            .iter()
            .map(|video| {
                format!(
                    r#"<a class="card" href="/videos/{id}">
<h3>{title}</h3>
<p>{description}</p>
<p class="muted">{date}</p>
</a>"#,
                    id = video.id,
                    title = escape(&video.title),
                    description = escape(&video.description),
                    date = video.created_at.format("%Y-%m-%d"),
                )
            })
            .collect();
        format!(
            r#"<h1>Browse Videos</h1>
<div class="grid">{cards}</div>"#
        )
    };
    layout("Browse Videos", config_valid, signed_in, &body)
}

pub fn video_detail_page(config_valid: bool, signed_in: bool, video: &VideoRecord) -> String {
    let description = if video.description.is_empty() {
        String::new()
    } else {
        format!(
            r#"<h2>Description</h2>
<p>{}</p>"#,
            escape(&video.description)
        )
    };
    let body = format!(
        r#"<p><a href="/videos">&larr; Back to videos</a></p>
<h1>{title}</h1>
<p class="muted">{date}</p>
<video src="{url}" controls autoplay></video>
{description}"#,
        title = escape(&video.title),
        date = video.created_at.format("%Y-%m-%d"),
        url = escape(&video.url),
        description = description,
    );
    layout(&video.title, config_valid, signed_in, &body)
}

pub fn video_not_found_page(config_valid: bool, signed_in: bool) -> String {
    let body = r#"<div class="banner-error">Video not found</div>
<p><a href="/videos">&larr; Back to videos</a></p>"#;
    layout("Video not found", config_valid, signed_in, body)
}

pub fn upload_page(error: Option<&str>) -> String {
    let error_banner = error
        .map(|e| format!(r#"<div class="banner-error">{}</div>"#, escape(e)))
        .unwrap_or_default();
    let body = format!(
        r#"<h1>Upload Video</h1>
{error_banner}
<form method="post" action="/upload" enctype="multipart/form-data">
  <label for="title">Video Title</label>
  <input type="text" id="title" name="title" placeholder="Enter video title" required>
  <label for="description">Video Description</label>
  <textarea id="description" name="description" rows="4" placeholder="Enter video description"></textarea>
  <label for="file">Video File</label>
  <input type="file" id="file" name="file" accept="video/*" required>
  <p class="muted">Supported formats: MP4, WebM, MOV, etc.</p>
  <button type="submit">Upload</button>
</form>"#,
    );
    layout("Upload Video", true, true, &body)
}

pub fn upload_success_page(url: &str) -> String {
    let body = format!(
        r#"<h1>Upload Video</h1>
<div class="banner-success">
<p>Video uploaded successfully!</p>
<p><a href="{url}">Watch it</a> or <a href="/videos">go to the videos page</a>.</p>
</div>"#,
        url = escape(url),
    );
    layout("Upload Video", true, true, &body)
}

/// Page-level error state (list/detail fetch failures and the generic
/// fallback). Renders inline rather than navigating away.
pub fn error_page(message: &str) -> String {
    let body = format!(
        r#"<div class="banner-error">{}</div>
<p><a href="/">Return to Home</a></p>"#,
        escape(message)
    );
    layout("Error", true, false, &body)
}

/// Degraded-mode page for a section that needs the backend.
pub fn not_configured_page(title: &str, activity: &str) -> String {
    let body = format!(
        r#"<h1>{title}</h1>
<div class="banner-warn">
<p><strong>Supabase Not Configured</strong></p>
<p>Please set up your Supabase environment variables to enable {activity}. See the Supabase Setup Guide for instructions.</p>
</div>
<p><a href="/">Return to Home</a></p>"#,
        title = escape(title),
        activity = escape(activity),
    );
    layout(title, false, false, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"x" & 'y'</b>"#),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_layout_shows_config_banner_when_invalid() {
        let page = layout("Home", false, false, "<p>hi</p>");
        assert!(page.contains("Supabase Not Configured"));
        let page = layout("Home", true, false, "<p>hi</p>");
        assert!(!page.contains("Supabase Not Configured"));
    }

    #[test]
    fn test_nav_reflects_session() {
        let page = layout("Home", true, true, "");
        assert!(page.contains("Sign Out"));
        assert!(page.contains(r#"href="/upload""#));
        let page = layout("Home", true, false, "");
        assert!(page.contains("Sign In"));
        assert!(!page.contains("Sign Out"));
    }

    #[test]
    fn test_video_titles_are_escaped() {
        let video = VideoRecord {
            id: uuid::Uuid::new_v4(),
            title: "<script>alert(1)</script>".to_string(),
            description: String::new(),
            url: "https://x.example.co/v.mp4".to_string(),
            file_path: "videos/v.mp4".to_string(),
            created_at: chrono::Utc::now(),
        };
        let page = videos_page(true, false, std::slice::from_ref(&video));
        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_list_renders_call_to_action() {
        let page = videos_page(true, false, &[]);
        assert!(page.contains("No videos available yet"));
        assert!(page.contains("Upload a Video"));
    }
}
