//! Related news fetched from an RSS search feed.
//!
//! The feed is requested through a CORS relay, parsed for `<item>` titles
//! and links, and rendered as a short list of anchors. A background thread
//! refreshes it on a fixed interval.

use std::fmt;
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use chrono::NaiveTime;
use folio_config::NewsConfig;
use log::{info, warn};
use serde::Deserialize;

/// Shown before the first fetch completes.
pub const LOADING_MESSAGE: &str = "Loading news…";

/// Shown when the feed has no items.
pub const NO_NEWS_MESSAGE: &str = "No related news.";

/// Shown when the fetch or the parse fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load news.";

/// Shown when fetching is turned off.
pub const DISABLED_MESSAGE: &str = "News feed disabled.";

/// How often the monitor thread checks for stop requests.
const POLL_STEP: Duration = Duration::from_millis(250);

/// Errors that can occur while fetching the feed.
#[derive(Debug)]
pub enum FeedError {
    /// The request failed or returned an error status.
    Http(ureq::Error),
    /// The body is not an RSS document with titled, linked items.
    Parse(quick_xml::DeError),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Http(e) => write!(f, "HTTP error: {}", e),
            FeedError::Parse(e) => write!(f, "Feed parse error: {}", e),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Http(e) => Some(e),
            FeedError::Parse(e) => Some(e),
        }
    }
}

impl From<ureq::Error> for FeedError {
    fn from(e: ureq::Error) -> Self {
        FeedError::Http(e)
    }
}

impl From<quick_xml::DeError> for FeedError {
    fn from(e: quick_xml::DeError) -> Self {
        FeedError::Parse(e)
    }
}

/// Something that can return the body of a URL.
pub trait FeedSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, FeedError>;
}

/// Fetches over HTTP with a global timeout.
#[derive(Debug)]
pub struct HttpFeed {
    agent: ureq::Agent,
}

impl HttpFeed {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl FeedSource for HttpFeed {
    fn fetch(&self, url: &str) -> Result<String, FeedError> {
        let mut response = self.agent.get(url).call()?;
        Ok(response.body_mut().read_to_string()?)
    }
}

/// A headline from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: String,
    link: String,
}

/// Parse the items of an RSS 2.0 document.
pub fn parse_feed(xml: &str) -> Result<Vec<NewsItem>, FeedError> {
    let rss: Rss = quick_xml::de::from_str(xml)?;
    Ok(rss
        .channel
        .items
        .into_iter()
        .map(|item| NewsItem {
            title: item.title,
            link: item.link,
        })
        .collect())
}

/// Fetch `url` from `source` and parse it as a feed.
pub fn fetch_news(source: &dyn FeedSource, url: &str) -> Result<Vec<NewsItem>, FeedError> {
    let body = source.fetch(url)?;
    parse_feed(&body)
}

/// Percent-encode everything except the characters `encodeURIComponent` keeps.
pub fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// The RSS search URL for the configured keyword and locale.
pub fn feed_url(config: &NewsConfig) -> String {
    format!(
        "{}?q={}&hl={}&gl={}&ceid={}",
        config.feed_url,
        encode_component(&config.keyword),
        config.language,
        config.country,
        config.edition
    )
}

/// `target` routed through the relay at `proxy`.
pub fn proxied_url(proxy: &str, target: &str) -> String {
    format!("{proxy}{}", encode_component(target))
}

/// A link that opens in a new browsing context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub title: String,
    pub target: &'static str,
    pub rel: &'static str,
}

impl Anchor {
    fn external(href: String, title: String) -> Self {
        Self {
            href,
            title,
            target: "_blank",
            rel: "noopener",
        }
    }
}

/// One row of the news list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsEntry {
    Link(Anchor),
    Message(&'static str),
}

/// The rendered news list.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsList {
    entries: Vec<NewsEntry>,
    updated_at: Option<NaiveTime>,
    max_items: usize,
}

impl NewsList {
    pub fn new(max_items: usize) -> Self {
        Self {
            entries: vec![NewsEntry::Message(LOADING_MESSAGE)],
            updated_at: None,
            max_items,
        }
    }

    /// A list that will never be filled.
    pub fn disabled() -> Self {
        Self {
            entries: vec![NewsEntry::Message(DISABLED_MESSAGE)],
            updated_at: None,
            max_items: 0,
        }
    }

    /// Replace the contents with the outcome of a fetch made at `now`.
    pub fn apply(&mut self, result: Result<Vec<NewsItem>, FeedError>, now: NaiveTime) {
        match result {
            Err(_) => self.entries = vec![NewsEntry::Message(LOAD_FAILED_MESSAGE)],
            Ok(items) if items.is_empty() => {
                self.entries = vec![NewsEntry::Message(NO_NEWS_MESSAGE)];
            }
            Ok(items) => {
                self.entries = items
                    .into_iter()
                    .take(self.max_items)
                    .map(|item| NewsEntry::Link(Anchor::external(item.link, item.title)))
                    .collect();
                self.updated_at = Some(now);
            }
        }
    }

    pub fn entries(&self) -> &[NewsEntry] {
        &self.entries
    }

    /// Time of the last successful refresh.
    pub fn updated_at(&self) -> Option<NaiveTime> {
        self.updated_at
    }

    pub fn anchors(&self) -> impl Iterator<Item = &Anchor> {
        self.entries.iter().filter_map(|entry| match entry {
            NewsEntry::Link(anchor) => Some(anchor),
            NewsEntry::Message(_) => None,
        })
    }
}

/// Refreshes a [`NewsList`] in a background thread.
pub struct NewsMonitor {
    /// Latest rendered list.
    list: Arc<RwLock<NewsList>>,
    source: Arc<dyn FeedSource>,
    /// Proxied feed URL.
    url: String,
    interval: Duration,
    /// Flag to signal thread termination.
    running: Arc<RwLock<bool>>,
}

impl fmt::Debug for NewsMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsMonitor")
            .field("url", &self.url)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl NewsMonitor {
    pub fn new(
        source: Arc<dyn FeedSource>,
        url: String,
        max_items: usize,
        interval: Duration,
    ) -> Self {
        Self {
            list: Arc::new(RwLock::new(NewsList::new(max_items))),
            source,
            url,
            interval,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Monitor for the configured feed over HTTP.
    pub fn from_config(config: &NewsConfig) -> Self {
        let url = proxied_url(&config.proxy, &feed_url(config));
        Self::new(
            Arc::new(HttpFeed::new(Duration::from_secs(config.timeout_secs))),
            url,
            config.max_items,
            Duration::from_secs(config.refresh_interval_secs),
        )
    }

    /// Start the background fetching thread.
    pub fn start(&self) {
        if let Ok(mut running) = self.running.write() {
            if *running {
                return;
            }
            *running = true;
        }

        let list = self.list.clone();
        let source = self.source.clone();
        let url = self.url.clone();
        let interval = self.interval;
        let running = self.running.clone();

        thread::spawn(move || {
            refresh(source.as_ref(), &url, &list);
            let mut last_fetch = Instant::now();

            loop {
                if let Ok(is_running) = running.read()
                    && !*is_running
                {
                    break;
                }

                if last_fetch.elapsed() >= interval {
                    refresh(source.as_ref(), &url, &list);
                    last_fetch = Instant::now();
                }

                thread::sleep(POLL_STEP);
            }
        });
    }

    /// Stop the background thread.
    pub fn stop(&self) {
        if let Ok(mut running) = self.running.write() {
            *running = false;
        }
    }

    /// A copy of the current list.
    pub fn snapshot(&self) -> NewsList {
        self.list
            .read()
            .map(|list| list.clone())
            .unwrap_or_else(|_| NewsList::new(0))
    }
}

impl Drop for NewsMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Fetch once and publish the outcome.
fn refresh(source: &dyn FeedSource, url: &str, list: &RwLock<NewsList>) {
    let result = fetch_news(source, url);
    match &result {
        Ok(items) => info!("fetched {} news items", items.len()),
        Err(e) => warn!("news refresh failed: {e}"),
    }
    if let Ok(mut list) = list.write() {
        list.apply(result, chrono::Local::now().time());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a fixed body, or an HTTP failure when `body` is `None`.
    struct CannedFeed {
        body: Option<String>,
    }

    impl FeedSource for CannedFeed {
        fn fetch(&self, _url: &str) -> Result<String, FeedError> {
            match &self.body {
                Some(body) => Ok(body.clone()),
                None => Err(ureq::Error::StatusCode(503).into()),
            }
        }
    }

    fn rss(count: usize) -> String {
        let items: String = (0..count)
            .map(|i| {
                format!(
                    "<item><title>Story {i} &amp; more</title><link>https://news.example/{i}</link>\
                     <guid>{i}</guid><pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate></item>"
                )
            })
            .collect();
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><rss version=\"2.0\"><channel>\
             <title>search</title><link>https://news.example</link>{items}</channel></rss>"
        )
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("a b&c"), "a%20b%26c");
        assert_eq!(encode_component("safe-_.!~*'()"), "safe-_.!~*'()");
        assert_eq!(encode_component("의원"), "%EC%9D%98%EC%9B%90");
    }

    #[test]
    fn test_feed_and_proxy_urls() {
        let config = NewsConfig {
            keyword: "rust lang".to_string(),
            ..NewsConfig::default()
        };
        let url = feed_url(&config);
        assert_eq!(
            url,
            "https://news.google.com/rss/search?q=rust%20lang&hl=ko&gl=KR&ceid=KR:ko"
        );
        assert_eq!(
            proxied_url(&config.proxy, &url),
            concat!(
                "https://corsproxy.io/?",
                "https%3A%2F%2Fnews.google.com%2Frss%2Fsearch",
                "%3Fq%3Drust%2520lang%26hl%3Dko%26gl%3DKR%26ceid%3DKR%3Ako"
            )
        );
    }

    #[test]
    fn test_parse_feed() {
        let items = parse_feed(&rss(2)).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Story 0 & more");
        assert_eq!(items[1].link, "https://news.example/1");
    }

    #[test]
    fn test_parse_feed_rejects_garbage() {
        assert!(matches!(parse_feed("<html><body>oops</body></html>"), Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_empty_feed_renders_no_news() {
        let source = CannedFeed { body: Some(rss(0)) };
        let mut list = NewsList::new(5);
        list.apply(fetch_news(&source, "url"), noon());
        assert_eq!(list.entries(), &[NewsEntry::Message(NO_NEWS_MESSAGE)]);
        assert_eq!(list.anchors().count(), 0);
        assert_eq!(list.updated_at(), None);
    }

    #[test]
    fn test_seven_items_render_five_anchors() {
        let source = CannedFeed { body: Some(rss(7)) };
        let mut list = NewsList::new(5);
        list.apply(fetch_news(&source, "url"), noon());

        assert_eq!(list.entries().len(), 5);
        assert_eq!(list.anchors().count(), 5);
        for (i, anchor) in list.anchors().enumerate() {
            assert_eq!(anchor.target, "_blank");
            assert_eq!(anchor.rel, "noopener");
            assert_eq!(anchor.href, format!("https://news.example/{i}"));
        }
        assert_eq!(list.updated_at(), Some(noon()));
    }

    #[test]
    fn test_failure_replaces_previous_list() {
        let mut list = NewsList::new(5);
        list.apply(fetch_news(&CannedFeed { body: Some(rss(3)) }, "url"), noon());
        list.apply(fetch_news(&CannedFeed { body: None }, "url"), noon());
        assert_eq!(list.entries(), &[NewsEntry::Message(LOAD_FAILED_MESSAGE)]);
        // The stamp records the last success.
        assert_eq!(list.updated_at(), Some(noon()));
    }

    #[test]
    fn test_monitor_creation() {
        let monitor = NewsMonitor::new(
            Arc::new(CannedFeed { body: Some(rss(1)) }),
            "url".to_string(),
            5,
            Duration::from_secs(60),
        );
        assert_eq!(monitor.snapshot().entries(), &[NewsEntry::Message(LOADING_MESSAGE)]);
    }

    #[test]
    fn test_monitor_fetches_on_start() {
        let monitor = NewsMonitor::new(
            Arc::new(CannedFeed { body: Some(rss(2)) }),
            "url".to_string(),
            5,
            Duration::from_secs(60),
        );
        monitor.start();

        let deadline = Instant::now() + Duration::from_secs(5);
        while monitor.snapshot().anchors().count() == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        monitor.stop();
        assert_eq!(monitor.snapshot().anchors().count(), 2);
    }

    /// Fails the first fetch and serves one item afterwards.
    struct FlakyFeed {
        fetches: AtomicUsize,
    }

    impl FeedSource for FlakyFeed {
        fn fetch(&self, _url: &str) -> Result<String, FeedError> {
            if self.fetches.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ureq::Error::StatusCode(503).into())
            } else {
                Ok(rss(1))
            }
        }
    }

    #[test]
    fn test_monitor_refreshes_after_failure() {
        let source = Arc::new(FlakyFeed {
            fetches: AtomicUsize::new(0),
        });
        let monitor = NewsMonitor::new(
            source.clone(),
            "url".to_string(),
            5,
            Duration::from_millis(100),
        );
        monitor.start();

        let deadline = Instant::now() + Duration::from_secs(10);
        while source.fetches.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        monitor.stop();

        assert!(source.fetches.load(Ordering::SeqCst) >= 3);
        let list = monitor.snapshot();
        assert_eq!(list.anchors().count(), 1);
        assert!(list.updated_at().is_some());
    }
}
