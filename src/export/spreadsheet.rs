// Tabular export: one row per video

use super::ExportError;
use crate::extractor::utils::{display_date, watch_url};
use crate::extractor::VideoDetail;

const HEADER: &str = "Episode Name,Duration,Views,Likes,Link,Published";

/// Render videos as CSV with a header row
pub fn render_csv(videos: &[VideoDetail]) -> Result<String, ExportError> {
    if videos.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut csv = String::from(HEADER);
    csv.push('\n');
    for video in videos {
        let row = [
            quote(&video.title),
            video.duration.clone(),
            video.views.to_string(),
            video.likes.to_string(),
            quote(&watch_url(&video.video_id)),
            display_date(&video.published_date),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    Ok(csv)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
