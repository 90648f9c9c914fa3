//! News and video cards: fetch a list, show a random item, rotate on a timer.
//!
//! Neither card ever shows a hard error. When a fetch fails, or returns no
//! items, the card rotates through nothing but its static placeholder.

use super::{get_json, ServiceError};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

/// Shortest rotation period; shorter ones, including zero, are raised to it.
pub const MIN_ROTATION_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub image: Option<String>,
}

impl Article {
    pub fn placeholder() -> Self {
        Self {
            title: "Farming news is unavailable right now".to_string(),
            description: None,
            url: "https://newsapi.org".to_string(),
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub title: String,
    pub thumbnail: String,
    pub url: String,
}

impl Video {
    pub fn placeholder() -> Self {
        Self {
            title: "Farming Technology Overview".to_string(),
            thumbnail: "https://via.placeholder.com/320x180?text=Farming+Video".to_string(),
            url: "https://www.youtube.com/watch?v=mockVideo".to_string(),
        }
    }
}

/// A list of items to rotate through.
#[async_trait]
pub trait FeedSource<T>: Send + Sync {
    async fn fetch(&self) -> Result<Vec<T>, ServiceError>;
}

// =============================================================================
// NEWS
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    url_to_image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

fn articles(response: NewsResponse) -> Vec<Article> {
    response
        .articles
        .into_iter()
        .filter_map(|a| {
            Some(Article {
                title: a.title?,
                url: a.url?,
                description: a.description,
                image: a.url_to_image,
            })
        })
        .collect()
}

/// newsapi `v2/everything` for farming news.
#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    api_key: SecretString,
}

impl NewsClient {
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl FeedSource<Article> for NewsClient {
    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<Vec<Article>, ServiceError> {
        let response: NewsResponse = get_json(
            &self.client,
            "https://newsapi.org/v2/everything",
            &[
                ("q", "farming agriculture"),
                ("language", "en"),
                ("pageSize", "10"),
                ("apiKey", self.api_key.expose_secret()),
            ],
        )
        .await?;
        Ok(articles(response))
    }
}

// =============================================================================
// VIDEO
// =============================================================================

#[derive(Debug, Deserialize)]
struct VideoThumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideoThumbnails {
    medium: VideoThumbnail,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
    thumbnails: VideoThumbnails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoIdentity {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: VideoIdentity,
    snippet: VideoSnippet,
}

#[derive(Debug, Deserialize)]
struct VideoSearchResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

fn videos(response: VideoSearchResponse) -> Vec<Video> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            let id = item.id.video_id?;
            Some(Video {
                title: item.snippet.title,
                thumbnail: item.snippet.thumbnails.medium.url,
                url: format!("https://www.youtube.com/watch?v={}", id),
            })
        })
        .collect()
}

/// YouTube data API `v3/search` for farming technology videos.
#[derive(Clone)]
pub struct VideoClient {
    client: Client,
    api_key: SecretString,
}

impl VideoClient {
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl FeedSource<Video> for VideoClient {
    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<Vec<Video>, ServiceError> {
        let response: VideoSearchResponse = get_json(
            &self.client,
            "https://www.googleapis.com/youtube/v3/search",
            &[
                ("part", "snippet"),
                ("q", "farming technology"),
                ("type", "video"),
                ("maxResults", "10"),
                ("key", self.api_key.expose_secret()),
            ],
        )
        .await?;
        Ok(videos(response))
    }
}

// =============================================================================
// ROTATION
// =============================================================================

/// Pseudo-random picks from a fixed list, or the placeholder when empty.
pub struct FeedRotation<T> {
    items: Vec<T>,
    placeholder: T,
    rng: StdRng,
}

impl<T: Clone> FeedRotation<T> {
    pub fn new(items: Vec<T>, placeholder: T) -> Self {
        Self::with_rng(items, placeholder, StdRng::from_entropy())
    }

    pub fn with_rng(items: Vec<T>, placeholder: T, rng: StdRng) -> Self {
        Self {
            items,
            placeholder,
            rng,
        }
    }

    pub fn is_placeholder_only(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pick(&mut self) -> T {
        if self.items.is_empty() {
            return self.placeholder.clone();
        }
        let index = self.rng.gen_range(0..self.items.len());
        self.items[index].clone()
    }
}

/// A card that fetches once, then shows a new random item every `period`.
///
/// Dropping it stops the timer. [`refresh`](RotatingFeed::refresh) refetches;
/// the previous timer is cancelled first, so an old fetch can never publish
/// over a newer one.
pub struct RotatingFeed<T> {
    source: Arc<dyn FeedSource<T>>,
    placeholder: T,
    period: Duration,
    current: Arc<watch::Sender<T>>,
    task: JoinHandle<()>,
}

impl<T> RotatingFeed<T>
where
    T: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    pub fn start(source: Arc<dyn FeedSource<T>>, placeholder: T, period: Duration) -> Self {
        let period = period.max(MIN_ROTATION_PERIOD);
        let (current, _) = watch::channel(placeholder.clone());
        let current = Arc::new(current);
        let task = tokio::spawn(rotate(
            source.clone(),
            placeholder.clone(),
            period,
            current.clone(),
        ));
        Self {
            source,
            placeholder,
            period,
            current,
            task,
        }
    }

    pub fn current(&self) -> T {
        self.current.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<T> {
        self.current.subscribe()
    }

    pub fn refresh(&mut self) {
        self.task.abort();
        self.task = tokio::spawn(rotate(
            self.source.clone(),
            self.placeholder.clone(),
            self.period,
            self.current.clone(),
        ));
    }
}

impl<T> Drop for RotatingFeed<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn rotate<T>(
    source: Arc<dyn FeedSource<T>>,
    placeholder: T,
    period: Duration,
    current: Arc<watch::Sender<T>>,
) where
    T: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    let items = match source.fetch().await {
        Ok(items) => {
            info!(count = items.len(), "Feed fetched");
            items
        }
        Err(e) => {
            warn!(error = %e, "Feed fetch failed, using placeholder");
            Vec::new()
        }
    };

    let mut rotation = FeedRotation::new(items, placeholder);
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let pick = rotation.pick();
        debug!(?pick, "Feed rotated");
        current.send_replace(pick);
    }
}
