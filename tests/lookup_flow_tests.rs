//! Lookup pipeline behavior: caching, retry classification, backoff
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use rift_scout::domain::RiotId;
use rift_scout::infrastructure::fetcher::{Document, DocumentFetcher, FetchError};
use rift_scout::{AppConfig, LookupError, LookupService};

const PROFILE_PAGE: &str = r#"
    <div class="summoner-name">RichardMille</div>
    <div class="tier">GOLD</div>
    <div class="rank">II</div>
    <div class="game-item win"><div class="champion-name">Yasuo</div></div>
    <div class="game-item lose"><div class="champion-name">Ahri</div></div>
"#;

const NOT_FOUND_PAGE: &str = "<html><body><p>Summoner Not Found</p></body></html>";

type CannedResponse = Result<(u16, String), FetchError>;

/// Scripted fetcher: a response per call index, counting every open.
/// Also records the paused-clock instant of each attempt so backoff
/// spacing can be asserted.
struct MockFetcher {
    respond: Box<dyn Fn(usize) -> CannedResponse + Send + Sync>,
    calls: AtomicUsize,
    attempt_times: Mutex<Vec<Instant>>,
}

impl MockFetcher {
    fn new(respond: impl Fn(usize) -> CannedResponse + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
            attempt_times: Mutex::new(Vec::new()),
        })
    }

    fn always(status: u16, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Self::new(move |_| Ok((status, body.clone())))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn attempt_gaps(&self) -> Vec<Duration> {
        let times = self.attempt_times.lock().unwrap();
        times.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

#[async_trait]
impl DocumentFetcher for MockFetcher {
    async fn open(&self, _url: &str, _timeout: Duration) -> Result<Document, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.attempt_times.lock().unwrap().push(Instant::now());
        let (status, body) = (self.respond)(call)?;
        Ok(Document::new(status, &body))
    }
}

fn service_with(fetcher: Arc<MockFetcher>, config: AppConfig) -> LookupService {
    LookupService::new(fetcher, config).unwrap()
}

fn id() -> RiotId {
    RiotId::parse("RichardMille#666")
}

#[tokio::test]
async fn second_profile_lookup_within_ttl_skips_the_fetcher() {
    let fetcher = MockFetcher::always(200, PROFILE_PAGE);
    let service = service_with(fetcher.clone(), AppConfig::default());

    let first = service.profile(&id()).await.unwrap();
    let second = service.profile(&id()).await.unwrap();

    assert_eq!(fetcher.calls(), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn cache_key_ignores_identity_letter_case() {
    let fetcher = MockFetcher::always(200, PROFILE_PAGE);
    let service = service_with(fetcher.clone(), AppConfig::default());

    service.profile(&RiotId::parse("RichardMille#666")).await.unwrap();
    service.profile(&RiotId::parse("richardmille#666")).await.unwrap();

    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn profile_lookup_after_ttl_fetches_again() {
    let fetcher = MockFetcher::always(200, PROFILE_PAGE);
    let config = AppConfig {
        cache_ttl_ms: 30,
        ..AppConfig::default()
    };
    let service = service_with(fetcher.clone(), config);

    service.profile(&id()).await.unwrap();
    // the cache ages on the real clock
    std::thread::sleep(Duration::from_millis(40));
    service.profile(&id()).await.unwrap();

    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn match_lookups_are_never_cached() {
    let fetcher = MockFetcher::always(200, PROFILE_PAGE);
    let service = service_with(fetcher.clone(), AppConfig::default());

    let first = service.matches(&id()).await.unwrap();
    let second = service.matches(&id()).await.unwrap();

    assert_eq!(fetcher.calls(), 2);
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn not_found_is_terminal_after_exactly_one_attempt() {
    let fetcher = MockFetcher::always(200, NOT_FOUND_PAGE);
    let service = service_with(fetcher.clone(), AppConfig::default());

    let error = service.profile(&id()).await.unwrap_err();

    assert_eq!(error, LookupError::NotFound);
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn missing_identity_element_classifies_as_not_found() {
    let fetcher = MockFetcher::always(200, "<html><body><p>unrelated page</p></body></html>");
    let service = service_with(fetcher.clone(), AppConfig::default());

    assert_eq!(service.profile(&id()).await.unwrap_err(), LookupError::NotFound);
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn timeout_retries_three_times_with_growing_backoff() {
    let fetcher = MockFetcher::new(|_| Err(FetchError::Timeout));
    let service = service_with(fetcher.clone(), AppConfig::default());

    let started = Instant::now();
    let error = service.profile(&id()).await.unwrap_err();

    assert_eq!(error, LookupError::Timeout);
    assert_eq!(fetcher.calls(), 3);
    // backoff after attempts 1 and 2: 2 s then 4 s, strictly increasing
    assert_eq!(started.elapsed(), Duration::from_millis(6000));
    let gaps = fetcher.attempt_gaps();
    assert_eq!(gaps, vec![Duration::from_millis(2000), Duration::from_millis(4000)]);
    assert!(gaps[0] < gaps[1]);
}

#[tokio::test(start_paused = true)]
async fn blocked_status_retries_then_surfaces_blocked() {
    let fetcher = MockFetcher::always(403, "<html></html>");
    let service = service_with(fetcher.clone(), AppConfig::default());

    let error = service.profile(&id()).await.unwrap_err();

    assert_eq!(error, LookupError::Blocked { status: 403 });
    assert_eq!(fetcher.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn transient_failure_recovers_on_a_later_attempt() {
    let fetcher = MockFetcher::new(|call| {
        if call == 0 {
            Err(FetchError::Network("connection reset".to_string()))
        } else {
            Ok((200, PROFILE_PAGE.to_string()))
        }
    });
    let service = service_with(fetcher.clone(), AppConfig::default());

    let profile = service.profile(&id()).await.unwrap();

    assert_eq!(profile.summoner_name.as_deref(), Some("RichardMille"));
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn match_at_uses_one_based_index_and_bounds() {
    let fetcher = MockFetcher::always(200, PROFILE_PAGE);
    let service = service_with(fetcher.clone(), AppConfig::default());

    let first = service.match_at(&id(), 1).await.unwrap();
    assert_eq!(first.champion, "Yasuo");

    let second = service.match_at(&id(), 2).await.unwrap();
    assert_eq!(second.champion, "Ahri");

    assert_eq!(service.match_at(&id(), 3).await.unwrap_err(), LookupError::NotFound);
    assert_eq!(service.match_at(&id(), 0).await.unwrap_err(), LookupError::NotFound);
}

#[tokio::test]
async fn stats_composes_profile_and_matches() {
    let fetcher = MockFetcher::always(200, PROFILE_PAGE);
    let service = service_with(fetcher.clone(), AppConfig::default());

    let stats = service.stats(&id(), 20).await.unwrap();

    assert_eq!(stats.window, 2);
    assert_eq!(stats.win_rate, Some(50));
    assert_eq!(stats.profile.summoner_name.as_deref(), Some("RichardMille"));
    assert_eq!(stats.profile.rank.as_deref(), Some("GOLD II"));
    // one fetch for the profile pipeline, one for the match pipeline
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn compare_resolves_two_independent_identities() {
    let fetcher = MockFetcher::always(200, PROFILE_PAGE);
    let service = service_with(fetcher.clone(), AppConfig::default());

    let (a, b) = service
        .compare(&RiotId::parse("One#111"), &RiotId::parse("Two#222"))
        .await
        .unwrap();

    assert_eq!(fetcher.calls(), 2);
    assert_eq!(a.summoner_name, b.summoner_name);

    // both results were cached under their own keys
    service
        .compare(&RiotId::parse("One#111"), &RiotId::parse("Two#222"))
        .await
        .unwrap();
    assert_eq!(fetcher.calls(), 2);
}
