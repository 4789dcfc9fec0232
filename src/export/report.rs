// Illustrated report: one section per video with its thumbnail

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::ExportError;
use crate::extractor::utils::{display_date, format_total_duration, watch_url};
use crate::extractor::ExtractionResult;

const TITLE: &str = "Playlist Data Evidence";

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 40px; }
h1 { color: #1a73e8; }
.video { margin-bottom: 30px; border-bottom: 1px solid #eee; padding-bottom: 20px; }
.video h2 { color: #202124; }
.metadata { margin-bottom: 15px; }
.metadata p { margin: 5px 0; }
img { max-width: 100%; border: 1px solid #ddd; }
.page-break { page-break-after: always; }";

/// Render the result as a standalone HTML document.
///
/// Videos and screenshots are zipped by position.
pub fn render_html(result: &ExtractionResult) -> Result<String, ExportError> {
    if result.videos.is_empty() || result.screenshots.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut html = String::new();
    // Writing into a String cannot fail
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{TITLE}</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n<h1>{TITLE}</h1>\n<p class=\"summary\">{} videos, total time {}</p>\n",
        result.total_videos,
        format_total_duration(result.total_duration),
    );

    let count = result.videos.len();
    for (index, (video, screenshot)) in result.videos.iter().zip(&result.screenshots).enumerate() {
        let title = encode_text(&video.title);
        let link = watch_url(&video.video_id);

        let _ = write!(
            html,
            "<div class=\"video\">\n\
             <h2>Video {n}: {title}</h2>\n\
             <div class=\"metadata\">\n\
             <p><strong>Episode Name:</strong> {title}</p>\n\
             <p><strong>Duration:</strong> {duration}</p>\n\
             <p><strong>Views:</strong> {views}</p>\n\
             <p><strong>Likes:</strong> {likes}</p>\n\
             <p><strong>Link:</strong> <a href=\"{href}\">{link_text}</a></p>\n\
             <p><strong>Published:</strong> {published}</p>\n\
             </div>\n\
             <img src=\"{image}\" alt=\"Screenshot: {alt}\">\n\
             </div>\n",
            n = index + 1,
            href = encode_double_quoted_attribute(&link),
            link_text = encode_text(&link),
            duration = encode_text(&video.duration),
            views = group_thousands(video.views),
            likes = group_thousands(video.likes),
            published = encode_text(&display_date(&video.published_date)),
            image = encode_double_quoted_attribute(&screenshot.image_url),
            alt = encode_double_quoted_attribute(&video.title),
        );

        if index + 1 < count {
            html.push_str("<div class=\"page-break\"></div>\n");
        }
    }

    html.push_str("</body>\n</html>\n");
    Ok(html)
}

/// 1234567 -> "1,234,567"
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{Screenshot, VideoDetail};

    fn result(titles: &[&str]) -> ExtractionResult {
        let videos: Vec<VideoDetail> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| VideoDetail {
                video_id: format!("id{}", i),
                title: t.to_string(),
                views: 1_234_567,
                likes: 999,
                duration_seconds: 60,
                duration: "1:00".to_string(),
                published_date: "2024-01-05".to_string(),
                channel_title: String::new(),
                description: String::new(),
                thumbnail_url: String::new(),
            })
            .collect();
        let screenshots = videos
            .iter()
            .map(|v| Screenshot {
                video_id: v.video_id.clone(),
                title: v.title.clone(),
                image_url: format!("https://img.youtube.com/vi/{}/mqdefault.jpg", v.video_id),
                timestamp: String::new(),
            })
            .collect();
        ExtractionResult {
            total_videos: videos.len(),
            total_duration: 60 * videos.len() as u64,
            videos,
            screenshots,
        }
    }

    #[test]
    fn test_sections_follow_positional_alignment() {
        let html = render_html(&result(&["One", "Two"])).unwrap();

        assert!(html.contains("<h2>Video 1: One</h2>"));
        assert!(html.contains("<h2>Video 2: Two</h2>"));
        assert!(html.contains("https://img.youtube.com/vi/id1/mqdefault.jpg"));
        assert!(html.contains("https://www.youtube.com/watch?v=id0"));
        assert!(html.contains("1,234,567"));
        assert!(html.contains("05/01/2024"));
        assert_eq!(html.matches("class=\"page-break\"").count(), 1);
    }

    #[test]
    fn test_titles_are_escaped() {
        let html = render_html(&result(&["<script>alert(1)</script>"])).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let mut data = result(&["Say \"hi\" & bye"]);
        data.screenshots[0].image_url = "https://img.example/x.jpg\" onerror=\"alert(1)".to_string();

        let html = render_html(&data).unwrap();

        assert!(html.contains("alt=\"Screenshot: Say &quot;hi&quot; &amp; bye\""));
        assert!(html.contains("<h2>Video 1: Say \"hi\" &amp; bye</h2>"));
        assert!(!html.contains("\" onerror=\""));
        assert!(html.contains("x.jpg&quot; onerror=&quot;alert(1)"));
    }

    #[test]
    fn test_empty_is_no_data() {
        assert!(matches!(render_html(&result(&[])), Err(ExportError::NoData)));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
