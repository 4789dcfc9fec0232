use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use playlist_extractor_lib::export;
use playlist_extractor_lib::extractor::utils::{extract_playlist_id, format_total_duration};
use playlist_extractor_lib::{ExtractorConfig, PlaylistExtractor, ProgressEvent};

/// Extract per-video metadata from a YouTube playlist
#[derive(Parser)]
#[command(name = "playlist-extractor", version)]
struct Cli {
    /// Playlist URL (https://www.youtube.com/playlist?list=...) or bare playlist id
    playlist: String,

    /// YouTube Data API v3 key
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Fail instead of degrading to scraping/simulation
    #[arg(long)]
    no_fallback: bool,

    /// Relay prefix for page fetches, e.g. https://corsproxy.io/?
    #[arg(long, env = "PLAYLIST_EXTRACTOR_RELAY")]
    relay: Option<String>,

    /// Data API base URL, e.g. a local mock server
    #[arg(long, env = "PLAYLIST_EXTRACTOR_API_BASE")]
    api_base: Option<String>,

    /// HTTP or SOCKS5 proxy URL
    #[arg(long, env = "PLAYLIST_EXTRACTOR_PROXY")]
    proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u32,

    /// Directory for the exported files (defaults to the download directory)
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// Only print the summary, write no files
    #[arg(long)]
    no_export: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("playlist_extractor_lib=info")),
        )
        .init();

    let cli = Cli::parse();

    let playlist_id = extract_playlist_id(&cli.playlist)
        .ok_or_else(|| anyhow!("Not a valid YouTube playlist link: {}", cli.playlist))?;

    let mut config = ExtractorConfig::from_env()
        .with_relay(cli.relay)
        .with_proxy(cli.proxy)
        .with_timeout(cli.timeout);
    if cli.no_fallback {
        config = config.with_scraping_fallback(false);
    }
    if let Some(base) = cli.api_base {
        config = config.with_api_base(base);
    }

    let mut extractor = PlaylistExtractor::new(config)?;
    if let Some(key) = cli.api_key {
        extractor.set_api_key(key);
    }

    let sink = |event: ProgressEvent| {
        let current = event.current_video.as_deref().unwrap_or("");
        eprintln!(
            "[{:>3}%] {}/{} {} {}",
            event.progress, event.processed, event.total, event.status, current
        );
    };
    let result = extractor.process_playlist(&playlist_id, &sink).await?;

    println!("Videos:      {}", result.total_videos);
    println!("Screenshots: {}", result.screenshots.len());
    println!("Total time:  {}", format_total_duration(result.total_duration));

    if !cli.no_export {
        let dir = cli.output_dir.unwrap_or_else(export::default_output_dir);
        let files = export::write_all(&result, &dir)?;
        println!("Spreadsheet: {}", files.spreadsheet.display());
        println!("Report:      {}", files.report.display());
        println!("JSON:        {}", files.json.display());
    }

    Ok(())
}
