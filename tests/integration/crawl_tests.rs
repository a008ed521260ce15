//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for both a search engine and the
//! sites it returns, and run full gather-and-crawl cycles against them.

use contact_crawler::config::{Config, OutputConfig};
use contact_crawler::crawler::{
    CrawlController, CrawlEngine, CycleError, RecordHandler, Scheduler, SkipReason,
};
use contact_crawler::output::{Persister, ResultWriter};
use contact_crawler::search::{
    build_search_client, Engine, EngineLimits, HtmlSearchBackend, SearchBackend, SeedGatherer,
    UserAgentPool,
};
use contact_crawler::state::SchedulerState;
use contact_crawler::storage::SqliteStorage;
use contact_crawler::{ContactRecord, ContactType, Language};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTACT_PAGE: &str = r#"<html><head><title>Acme Contact</title></head><body>
    <h1>Get in touch</h1>
    <p>Email: contact@acme.com</p>
    <p>Tel: 139-1234-5678</p>
    <p>Chat with us on <a href="https://t.me/acmebiz">t.me/acmebiz</a></p>
    <script>var decoy = "bot@tracker.example";</script>
</body></html>"#;

const ABOUT_PAGE: &str = r#"<html><head><title>About Acme</title></head><body>
    <p>Write to contact@acme.com for anything.</p>
</body></html>"#;

const ZH_PAGE: &str = r#"<html><head><title>联系我们</title></head><body>
    <p>微信：acme_wx</p>
</body></html>"#;

const PLAIN_PAGE: &str = r#"<html><head><title>Nothing here</title></head><body>
    <p>No way to reach us.</p>
</body></html>"#;

/// Creates a test configuration writing into `dir`
fn create_test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.crawler.request_timeout = 5;
    config.crawler.connect_timeout = 2;
    config.crawler.per_host_rate_limit = 200.0;
    config.user_agent.agents = vec!["TestBot/1.0".to_string()];
    config.scheduler.idle_wait_ms = 10;
    config.scheduler.pause_poll_ms = 10;
    config.scheduler.cycle_backoff_ms = 10;
    config.output = OutputConfig {
        data_dir: dir.join("data"),
        export_dir: dir.join("export"),
    };
    config
}

/// Opens the store and result files under the config's data dir
fn create_persister(config: &Config) -> (Persister, Arc<SqliteStorage>) {
    let storage = Arc::new(SqliteStorage::new(&config.output.database_path()).unwrap());
    let writer = Arc::new(ResultWriter::open(&config.output).unwrap());
    (Persister::new(storage.clone(), writer), storage)
}

fn create_backend(config: &Config, engine: Engine, server: &MockServer) -> HtmlSearchBackend {
    HtmlSearchBackend::new(
        engine,
        build_search_client(config).unwrap(),
        UserAgentPool::from_config(&config.user_agent),
        EngineLimits {
            max_results: 30,
            max_pages: 1,
            redirect_timeout: Duration::from_secs(2),
        },
    )
    .with_base_url(server.uri())
}

fn create_scheduler_with_handler(
    config: &Config,
    server: &MockServer,
    state: SchedulerState,
    handler: Arc<dyn RecordHandler>,
) -> Scheduler {
    let backends: Vec<Arc<dyn SearchBackend>> =
        vec![Arc::new(create_backend(config, Engine::Mojeek, server))];

    Scheduler::new(
        state,
        Arc::new(SeedGatherer::new(backends)),
        Arc::new(CrawlEngine::from_config(config).unwrap()),
        handler,
        config.scheduler.clone(),
    )
}

/// Wires a scheduler whose only search backend is the mock server
fn create_scheduler(
    config: &Config,
    server: &MockServer,
    state: SchedulerState,
) -> (Scheduler, Arc<SqliteStorage>) {
    let (persister, storage) = create_persister(config);
    let scheduler = create_scheduler_with_handler(config, server, state, Arc::new(persister));
    (scheduler, storage)
}

/// Persists records like [`Persister`] and pauses after the first one
fn pause_after_first_record(persister: Persister, state: SchedulerState) -> Arc<dyn RecordHandler> {
    let fired = AtomicBool::new(false);
    Arc::new(move |record: ContactRecord| {
        persister.handle(record);
        if !fired.swap(true, Ordering::SeqCst) {
            state.pause();
        }
    })
}

async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_html(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(server)
        .await;
}

/// Serves a result page linking to `pages` on the mock server
async fn mount_results(server: &MockServer, keyword: &str, pages: &[&str]) {
    let base = server.uri();
    let mut html = String::from("<html><body>");
    for page in pages {
        html.push_str(&format!(r#"<a href="{}{}">result</a>"#, base, page));
    }
    html.push_str(r#"<a href="https://www.mojeek.com/about">About Mojeek</a></body></html>"#);

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", keyword))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(server)
        .await;
}

/// Paths requested from the mock server so far, in arrival order
async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

async fn wait_for_request(server: &MockServer, page: &str) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while !requested_paths(server).await.iter().any(|p| p == page) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("{} was never requested", page));
}

async fn wait_for_contacts(storage: &SqliteStorage, count: usize) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while storage.count_contacts().unwrap() < count as u64 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("contacts were not stored in time");
}

fn read_lines(path: &Path) -> Vec<ContactRecord> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_full_cycle_records_contacts() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(dir.path());

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_results(&server, "acme", &["/contact", "/about", "/contact"]).await;
    mount_html(&server, "/contact", CONTACT_PAGE).await;
    mount_html(&server, "/about", ABOUT_PAGE).await;

    let (scheduler, storage) = create_scheduler(&config, &server, SchedulerState::new());
    let summary = scheduler.run_cycle("acme").await.unwrap();

    // duplicate result link and the engine's own link are dropped
    assert_eq!(summary.seeds, 2);
    assert_eq!(summary.report.pages_fetched, 2);
    assert_eq!(summary.report.records_dispatched, 4);
    assert_eq!(summary.report.total_skipped(), 0);

    // contact@acme.com appears on both pages but is stored once per site
    assert_eq!(storage.count_contacts().unwrap(), 3);
    let by_type = storage.count_by_type().unwrap();
    assert_eq!(by_type.get(&ContactType::Email), Some(&1));
    assert_eq!(by_type.get(&ContactType::Phone), Some(&1));
    assert_eq!(by_type.get(&ContactType::Telegram), Some(&1));

    let records = read_lines(&config.output.results_en_path());
    assert_eq!(records.len(), 3);
    assert!(read_lines(&config.output.results_zh_path()).is_empty());

    let values: Vec<&str> = records.iter().map(|r| r.contact_value.as_str()).collect();
    assert!(values.contains(&"contact@acme.com"));
    assert!(values.contains(&"+8613912345678"));
    assert!(values.contains(&"@acmebiz"));
    assert!(!values.contains(&"bot@tracker.example"));

    let phone = records
        .iter()
        .find(|r| r.contact_type == ContactType::Phone)
        .unwrap();
    assert_eq!(phone.keyword, "acme");
    assert_eq!(phone.lang, Language::En);
    assert_eq!(phone.page_title, "Acme Contact");
    assert_eq!(phone.source_url, format!("{}/contact", server.uri()));
    assert_eq!(phone.site_domain, "127.0.0.1");
}

#[tokio::test]
async fn test_repeat_cycle_writes_nothing_new() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(dir.path());

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_results(&server, "acme", &["/contact"]).await;
    mount_html(&server, "/contact", CONTACT_PAGE).await;

    let (scheduler, storage) = create_scheduler(&config, &server, SchedulerState::new());
    let first = scheduler.run_cycle("acme").await.unwrap();
    let second = scheduler.run_cycle("acme").await.unwrap();

    assert_eq!(first.report.records_dispatched, 3);
    assert_eq!(second.report.records_dispatched, 3);
    assert_eq!(storage.count_contacts().unwrap(), 3);
    assert_eq!(read_lines(&config.output.results_en_path()).len(), 3);
}

#[tokio::test]
async fn test_chinese_page_goes_to_zh_results() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(dir.path());

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_results(&server, "acme", &["/zh"]).await;
    mount_html(&server, "/zh", ZH_PAGE).await;

    let (scheduler, _storage) = create_scheduler(&config, &server, SchedulerState::new());
    scheduler.run_cycle("acme").await.unwrap();

    let records = read_lines(&config.output.results_zh_path());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].contact_type, ContactType::Wechat);
    assert_eq!(records[0].contact_value, "acme_wx");
    assert_eq!(records[0].lang, Language::Zh);
    assert_eq!(records[0].page_title, "联系我们");
    assert!(read_lines(&config.output.results_en_path()).is_empty());
}

#[tokio::test]
async fn test_unusable_pages_are_skipped() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(dir.path());

    mount_robots(&server, "User-agent: *\nDisallow: /private").await;
    mount_results(
        &server,
        "acme",
        &["/private", "/missing", "/data.json", "/plain"],
    )
    .await;
    mount_html(&server, "/private", CONTACT_PAGE).await;
    mount_html(&server, "/plain", PLAIN_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"email":"a@acme.com"}"#, "application/json"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (scheduler, storage) = create_scheduler(&config, &server, SchedulerState::new());
    let summary = scheduler.run_cycle("acme").await.unwrap();
    let report = &summary.report;

    assert_eq!(report.urls, 4);
    assert_eq!(report.skipped_for(SkipReason::RobotsDisallowed), 1);
    assert_eq!(report.skipped_for(SkipReason::HttpStatus), 1);
    assert_eq!(report.skipped_for(SkipReason::NotHtml), 1);
    assert_eq!(report.skipped_for(SkipReason::NoContacts), 1);
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(report.records_dispatched, 0);
    assert_eq!(storage.count_contacts().unwrap(), 0);
}

#[tokio::test]
async fn test_missing_robots_allows_everything() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(dir.path());

    mount_results(&server, "acme", &["/contact"]).await;
    mount_html(&server, "/contact", CONTACT_PAGE).await;

    let (scheduler, storage) = create_scheduler(&config, &server, SchedulerState::new());
    let summary = scheduler.run_cycle("acme").await.unwrap();

    assert_eq!(summary.report.records_dispatched, 3);
    assert_eq!(storage.count_contacts().unwrap(), 3);
}

#[tokio::test]
async fn test_paused_cycle_waits_for_resume() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(dir.path());

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_results(&server, "acme", &["/contact", "/about"]).await;
    mount_html(&server, "/contact", CONTACT_PAGE).await;
    mount_html(&server, "/about", ABOUT_PAGE).await;

    let state = SchedulerState::new();
    state.pause();
    let (scheduler, storage) = create_scheduler(&config, &server, state.clone());

    let resume_later = async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let paths = requested_paths(&server).await;
        assert!(!paths.iter().any(|p| p == "/contact" || p == "/about"));
        state.resume();
    };
    let (summary, ()) = tokio::join!(scheduler.run_cycle("acme"), resume_later);
    let summary = summary.unwrap();

    assert_eq!(summary.report.pages_fetched, 2);
    assert_eq!(summary.report.total_skipped(), 0);
    assert_eq!(storage.count_contacts().unwrap(), 3);
}

#[tokio::test]
async fn test_pause_mid_page_drops_remaining_records() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(dir.path());

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_results(&server, "acme", &["/contact"]).await;
    mount_html(&server, "/contact", CONTACT_PAGE).await;

    let state = SchedulerState::new();
    let (persister, storage) = create_persister(&config);
    let handler = pause_after_first_record(persister, state.clone());
    let scheduler = create_scheduler_with_handler(&config, &server, state.clone(), handler);

    let summary = scheduler.run_cycle("acme").await.unwrap();

    assert!(state.is_paused());
    assert_eq!(summary.report.interrupted, 1);
    assert_eq!(summary.report.records_dispatched, 1);
    assert_eq!(summary.report.pages_fetched, 1);
    assert_eq!(storage.count_contacts().unwrap(), 1);
    let by_type = storage.count_by_type().unwrap();
    assert_eq!(by_type.get(&ContactType::Email), Some(&1));
    assert_eq!(by_type.get(&ContactType::Phone), None);
}

#[tokio::test]
async fn test_pause_mid_cycle_holds_keyword_and_queued_pages() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(dir.path());
    config.crawler.global_concurrency = 1;

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_results(&server, "acme", &["/a", "/b", "/c"]).await;
    mount_html(
        &server,
        "/a",
        "<html><body><p>xa@acme.com</p><p>Tel: 139-1234-5678</p></body></html>",
    )
    .await;
    mount_html(&server, "/b", "<html><body><p>xb@acme.com</p></body></html>").await;
    mount_html(&server, "/c", "<html><body><p>xc@acme.com</p></body></html>").await;

    let state = SchedulerState::new();
    let controller = CrawlController::new(state.clone(), config.output.clone());
    assert!(controller.add_keyword("acme").await);

    let (persister, storage) = create_persister(&config);
    let handler = pause_after_first_record(persister, state.clone());
    let scheduler = create_scheduler_with_handler(&config, &server, state.clone(), handler);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(scheduler.run(shutdown_rx));

    wait_for_contacts(&storage, 1).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let status = controller.status().await;
    assert!(status.paused);
    assert_eq!(status.active_keyword.as_deref(), Some("acme"));
    let paths = requested_paths(&server).await;
    assert!(!paths.iter().any(|p| p == "/b" || p == "/c"));

    controller.resume();
    wait_for_contacts(&storage, 3).await;
    let paths = requested_paths(&server).await;
    assert!(paths.iter().any(|p| p == "/b"));
    assert!(paths.iter().any(|p| p == "/c"));

    tokio::time::timeout(Duration::from_secs(5), async {
        while controller.status().await.active_keyword.is_some() {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("cycle did not finish after resume");

    shutdown_tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();

    // the phone on /a was dropped by the pause
    let by_type = storage.count_by_type().unwrap();
    assert_eq!(by_type.get(&ContactType::Email), Some(&3));
    assert_eq!(by_type.get(&ContactType::Phone), None);
}

#[tokio::test]
async fn test_switch_keyword_runs_before_queue() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(dir.path());

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_results(&server, "alpha", &["/slow"]).await;
    mount_results(&server, "beta", &["/about"]).await;
    mount_results(&server, "gamma", &["/zh"]).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(CONTACT_PAGE, "text/html")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    mount_html(&server, "/about", ABOUT_PAGE).await;
    mount_html(&server, "/zh", ZH_PAGE).await;

    let state = SchedulerState::new();
    let controller = CrawlController::new(state.clone(), config.output.clone());
    assert!(controller.add_keyword("alpha").await);
    assert!(controller.add_keyword("beta").await);

    let (scheduler, _storage) = create_scheduler(&config, &server, state);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(scheduler.run(shutdown_rx));

    wait_for_request(&server, "/slow").await;
    assert!(controller.switch_keyword("gamma").await);
    wait_for_request(&server, "/about").await;

    shutdown_tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();

    let searched: Vec<String> = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/search")
        .filter_map(|request| {
            request
                .url
                .query_pairs()
                .find(|(key, _)| key == "q")
                .map(|(_, value)| value.into_owned())
        })
        .collect();
    assert_eq!(searched, vec!["alpha", "gamma", "beta"]);
}

#[tokio::test]
async fn test_shutdown_aborts_cycle_in_flight() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(dir.path());

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_results(&server, "acme", &["/slow"]).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(CONTACT_PAGE, "text/html")
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    let state = SchedulerState::new();
    state.add_keyword("acme").await;
    let (scheduler, storage) = create_scheduler(&config, &server, state);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(scheduler.run(shutdown_rx));

    wait_for_request(&server, "/slow").await;
    shutdown_tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();

    // long enough for a detached crawl to have stored the page
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(storage.count_contacts().unwrap(), 0);
    assert!(read_lines(&config.output.results_en_path()).is_empty());
}

#[tokio::test]
async fn test_baidu_redirects_are_resolved_and_filtered() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(dir.path());
    let base = server.uri();
    let port = server.address().port();

    let results = format!(
        r#"<html><body>
            <div><h3><a href="{base}/link?url=1">Acme</a></h3></div>
            <div><h3><a href="{base}/link?url=2">Baidu Baike</a></h3></div>
            <div><h3><a href="{base}/link?url=3">Dead</a></h3></div>
            <div><a href="https://ads.example.com/">ad</a></div>
        </body></html>"#
    );
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("wd", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(results, "text/html"))
        .mount(&server)
        .await;

    let redirects = [
        ("1", format!("http://localhost:{}/contact", port)),
        ("2", format!("{}/about", base)),
        ("3", "http://127.0.0.1:9/gone".to_string()),
    ];
    for (id, target) in redirects {
        Mock::given(method("GET"))
            .and(path("/link"))
            .and(query_param("url", id))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", target.as_str()))
            .mount(&server)
            .await;
    }
    mount_html(&server, "/contact", CONTACT_PAGE).await;
    mount_html(&server, "/about", ABOUT_PAGE).await;

    // the mock server stands in for baidu.com
    let backend = create_backend(&config, Engine::Baidu, &server).with_own_domain("127.0.0.1");
    let seeds = backend.search("acme").await.unwrap();

    assert_eq!(seeds, vec![format!("http://localhost:{}/contact", port)]);
}

#[tokio::test]
async fn test_blocked_search_engine_fails_cycle() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(dir.path());

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let (scheduler, _storage) = create_scheduler(&config, &server, SchedulerState::new());
    let err = scheduler.run_cycle("acme").await.unwrap_err();
    assert!(matches!(err, CycleError::NoSeeds { .. }));
}

#[tokio::test]
async fn test_scheduler_loop_and_export() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(dir.path());

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_results(&server, "acme", &["/contact"]).await;
    mount_results(&server, "globex", &["/zh"]).await;
    mount_html(&server, "/contact", CONTACT_PAGE).await;
    mount_html(&server, "/zh", ZH_PAGE).await;

    let state = SchedulerState::new();
    let controller = CrawlController::new(state.clone(), config.output.clone());
    assert!(controller.add_keyword("acme").await);
    assert!(controller.add_keyword("globex").await);

    let (scheduler, storage) = create_scheduler(&config, &server, state);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(scheduler.run(shutdown_rx));

    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            let status = controller.status().await;
            if storage.count_contacts().unwrap() == 4
                && status.queue_size == 0
                && status.active_keyword.is_none()
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("scheduler did not finish both keywords");

    shutdown_tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();

    let snapshot = controller.export().unwrap();
    let content = std::fs::read_to_string(&snapshot).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    // zh results come first
    assert!(lines[0].contains("acme_wx"));
    assert!(lines[0].contains(r#""keyword":"globex""#));
}
