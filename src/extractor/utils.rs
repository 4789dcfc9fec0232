// Helper functions shared by strategies, exporters and the CLI

use rand::Rng;
use regex::Regex;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

/// Milliseconds in a 365-day year
const YEAR_MILLIS: i64 = 31_536_000_000;

pub const WATCH_BASE: &str = "https://www.youtube.com/watch";

lazy_static::lazy_static! {
    static ref PLAYLIST_URL_RE: Regex =
        Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.be)/.*list=([a-zA-Z0-9_-]+)").unwrap();
    static ref LIST_PARAM_RE: Regex = Regex::new(r"list=([a-zA-Z0-9_-]+)").unwrap();
    static ref BARE_ID_RE: Regex = Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Check that `url` is a playlist link on a recognised host
pub fn is_playlist_url(url: &str) -> bool {
    PLAYLIST_URL_RE.is_match(url.trim())
}

/// Pull the playlist id out of a playlist URL, or accept a bare id as-is
pub fn extract_playlist_id(input: &str) -> Option<String> {
    let input = input.trim();
    if is_playlist_url(input) {
        return LIST_PARAM_RE
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());
    }
    if BARE_ID_RE.is_match(input) {
        return Some(input.to_string());
    }
    None
}

/// Canonical watch link for a video
pub fn watch_url(video_id: &str) -> String {
    format!("{}?v={}", WATCH_BASE, video_id)
}

/// Wrap `target` with the relay prefix, percent-encoding it
pub fn relay_url(relay: Option<&str>, target: &str) -> String {
    match relay {
        Some(prefix) => {
            let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
            format!("{}{}", prefix, encoded)
        }
        None => target.to_string(),
    }
}

/// Keep only ASCII digits and parse them; "1,234 views" -> 1234
pub fn parse_digits(text: &str) -> u64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Total play time, always with hours: `H:MM:SS`
pub fn format_total_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{}:{:02}:{:02}", hours, minutes, secs)
}

/// Current time as RFC 3339
pub fn now_rfc3339() -> String {
    to_rfc3339(OffsetDateTime::now_utc())
}

/// Today's date as `YYYY-MM-DD`
pub fn today_iso_date() -> String {
    let format = format_description!("[year]-[month]-[day]");
    OffsetDateTime::now_utc()
        .date()
        .format(&format)
        .unwrap_or_default()
}

/// Uniformly random instant within the trailing 365 days, RFC 3339
pub fn random_instant_within_year() -> String {
    let back = rand::thread_rng().gen_range(0..YEAR_MILLIS);
    to_rfc3339(OffsetDateTime::now_utc() - Duration::milliseconds(back))
}

/// Render a published timestamp or date as `DD/MM/YYYY`; unparseable input is returned unchanged
pub fn display_date(published: &str) -> String {
    let display = format_description!("[day]/[month]/[year]");
    let date = OffsetDateTime::parse(published, &Rfc3339)
        .map(|dt| dt.date())
        .or_else(|_| Date::parse(published, format_description!("[year]-[month]-[day]")));

    match date.ok().and_then(|d| d.format(&display).ok()) {
        Some(rendered) => rendered,
        None => published.to_string(),
    }
}

fn to_rfc3339(dt: OffsetDateTime) -> String {
    dt.format(&Rfc3339).unwrap_or_default()
}
