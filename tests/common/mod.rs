#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use playlist_extractor_lib::ProgressEvent;

pub use playlist_extractor_lib::extractor::testing::ScriptedFetcher;

/// Progress sink that records every event
#[derive(Default, Clone)]
pub struct Recorder {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl Recorder {
    pub fn sink(&self) -> impl Fn(ProgressEvent) + '_ {
        move |event| self.events.lock().unwrap().push(event)
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

pub fn playlist_json(ids: &[&str]) -> String {
    let items: Vec<String> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            format!(
                r#"{{"snippet":{{"title":"API {id}","position":{i},"publishedAt":"2024-02-0{d}T00:00:00Z",
                   "thumbnails":{{"high":{{"url":"https://i.ytimg.com/vi/{id}/hqdefault.jpg"}}}}}},
                   "contentDetails":{{"videoId":"{id}"}}}}"#,
                d = i % 9 + 1
            )
        })
        .collect();
    format!(r#"{{"items":[{}]}}"#, items.join(","))
}

pub fn video_json(title: &str, duration: &str) -> String {
    format!(
        r#"{{"items":[{{"snippet":{{"title":"{title}","publishedAt":"2024-02-01T00:00:00Z","channelTitle":"API Channel","description":"d"}},
            "contentDetails":{{"duration":"{duration}"}},
            "statistics":{{"viewCount":"100","likeCount":"10"}}}}]}}"#
    )
}

pub const PLAYLIST_PAGE: &str = r#"<script>var ytInitialData = {
    {"videoId":"scraped0001","title":{"runs":[{"text":"Scraped One"}]}},
    {"videoId":"scraped0002","title":{"runs":[{"text":"Scraped Two"}]}},
    {"videoId":"scraped0003","title":{"runs":[{"text":"Scraped Three"}]}}
};</script>"#;

pub const WATCH_PAGE: &str = r#"<script>var ytInitialPlayerResponse = {
    "lengthSeconds":"95","viewCount":{"simpleText":"2,500 views"},"likeCount":"77",
    "publishDate":"2022-08-30","ownerChannelName":"Scraped Channel"
};</script>"#;
