use super::*;
use crate::config::ServiceEndpoints;
use crate::debounce::testing::ManualScheduler;
use crate::request::MockHttpClient;
use serde_json::json;
use std::cell::RefCell;
use std::time::Duration;

// =========================================================
// Shared Mock Components
// =========================================================

const LIST_URL: &str = "http://localhost:3001/videos";

fn search_url(q: &str) -> String {
    format!("http://localhost:8080/sentence-search?q={}", q)
}

/// Collects spawned futures so the test decides when they run
#[derive(Clone, Default)]
struct QueueSpawner {
    queue: Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>,
}

impl QueueSpawner {
    async fn drain(&self) {
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                if queue.is_empty() {
                    None
                } else {
                    Some(queue.remove(0))
                }
            };
            match next {
                Some(fut) => fut.await,
                None => break,
            }
        }
    }

    fn len(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl LocalSpawner for QueueSpawner {
    fn spawn(&self, fut: LocalBoxFuture<'static, ()>) {
        self.queue.borrow_mut().push(fut);
    }
}

struct Harness {
    mock: Rc<MockHttpClient>,
    scheduler: ManualScheduler,
    spawner: QueueSpawner,
    updates: Rc<RefCell<Vec<SearchUpdate>>>,
    controller: SearchController<ManualScheduler, Rc<MockHttpClient>, QueueSpawner>,
}

fn harness() -> Harness {
    let mock = Rc::new(MockHttpClient::new());
    let api = Rc::new(StreamflowApi::new(mock.clone(), ServiceEndpoints::default()));
    let scheduler = ManualScheduler::new();
    let spawner = QueueSpawner::default();
    let updates = Rc::new(RefCell::new(Vec::new()));

    let sink = updates.clone();
    let controller = SearchController::new(
        SearchService::new(api, SearchMode::Sentence),
        scheduler.clone(),
        spawner.clone(),
        move |update| sink.borrow_mut().push(update),
    );

    Harness {
        mock,
        scheduler,
        spawner,
        updates,
        controller,
    }
}

// =========================================================
// Tests
// =========================================================

#[test]
fn sequencer_tracks_latest_ticket() {
    let seq = RequestSequencer::new();
    let a = seq.issue();
    let b = seq.issue();
    assert!(b > a);
    assert!(!seq.is_latest(a));
    assert!(seq.is_latest(b));
}

#[test]
fn headings_follow_source() {
    assert_eq!(ResultSource::Recommended.heading(), "Recommended for You");
    assert_eq!(ResultSource::Search.heading(), "Search Results");
    assert_eq!(SearchError::ListFailed.to_string(), "Failed to load videos");
    assert_eq!(SearchError::SearchFailed.to_string(), "Search error");
}

#[tokio::test]
async fn initial_load_lists_everything() {
    let h = harness();
    h.mock
        .mock_response(LIST_URL, 200, json!([{ "id": "v1", "title": "Intro", "views": "3" }]));

    h.controller.load_initial();
    h.spawner.drain().await;

    let updates = h.updates.borrow();
    assert_eq!(updates[0], SearchUpdate::Loading);
    let SearchUpdate::Loaded(results) = &updates[1] else {
        panic!("expected results, got {:?}", updates[1]);
    };
    assert_eq!(results.source, ResultSource::Recommended);
    assert_eq!(results.videos[0].views, 3);
}

#[tokio::test]
async fn rapid_typing_issues_one_request() {
    let h = harness();
    h.mock.mock_response(&search_url("cat"), 200, json!([{ "_id": "c1" }]));

    for q in ["c", "ca", "cat"] {
        h.controller.on_input(q);
        h.scheduler.advance(Duration::from_millis(200));
    }
    assert_eq!(h.spawner.len(), 0);
    assert_eq!(h.mock.request_count(), 0);

    h.scheduler.advance(SEARCH_DEBOUNCE);
    h.spawner.drain().await;

    assert_eq!(h.mock.requested_urls(), vec![search_url("cat")]);
    let updates = h.updates.borrow();
    assert!(matches!(
        updates.last(),
        Some(SearchUpdate::Loaded(r)) if r.source == ResultSource::Search && r.videos[0].id == "c1"
    ));
}

#[tokio::test]
async fn clearing_the_query_relists() {
    let h = harness();
    h.mock.mock_response(LIST_URL, 200, json!([]));

    h.controller.on_input("   ");
    h.scheduler.advance(SEARCH_DEBOUNCE);
    h.spawner.drain().await;

    assert_eq!(h.mock.requested_urls(), vec![LIST_URL.to_string()]);
    assert!(matches!(
        h.updates.borrow().last(),
        Some(SearchUpdate::Loaded(r)) if r.source == ResultSource::Recommended && r.videos.is_empty()
    ));
}

#[tokio::test]
async fn failures_map_to_display_strings() {
    let h = harness();
    h.mock.mock_unreachable(LIST_URL);
    h.mock.mock_response(&search_url("dog"), 500, json!({ "error": "index down" }));

    h.controller.load_initial();
    h.spawner.drain().await;
    assert_eq!(
        h.updates.borrow().last(),
        Some(&SearchUpdate::Failed("Failed to load videos"))
    );

    h.controller.on_input("dog");
    h.scheduler.advance(SEARCH_DEBOUNCE);
    h.spawner.drain().await;
    assert_eq!(h.updates.borrow().last(), Some(&SearchUpdate::Failed("Search error")));
}

#[tokio::test]
async fn stale_responses_are_discarded() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_response(&search_url("ca"), 200, json!([{ "id": "old" }]));
    mock.mock_response(&search_url("cat"), 200, json!([{ "id": "new" }]));
    let api = Rc::new(StreamflowApi::new(mock.clone(), ServiceEndpoints::default()));
    let service = SearchService::new(api, SearchMode::Sentence);

    let older = service.run("ca");
    let newer = service.run("cat");

    // 新请求先返回，旧请求后返回
    let Fetched::Current(Ok(results)) = newer.await else {
        panic!("newest request should be applied");
    };
    assert_eq!(results.videos[0].id, "new");
    assert_eq!(older.await, Fetched::Stale);
}

#[tokio::test]
async fn run_outlives_its_query_and_service_borrows() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_response(&search_url("cats"), 200, json!([{ "id": "c1", "title": "Cats" }]));
    let api = Rc::new(StreamflowApi::new(mock.clone(), ServiceEndpoints::default()));

    let fut: LocalBoxFuture<'static, _> = {
        let service = SearchService::new(api, SearchMode::Sentence);
        let query = String::from("cats");
        Box::pin(service.run(&query))
    };

    let Fetched::Current(Ok(results)) = fut.await else {
        panic!("expected current results");
    };
    assert_eq!(results.videos[0].id, "c1");
}
