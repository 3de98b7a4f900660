//! List screen tests: sort, fetch, merge and URL sync over HTTP.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use ifoodapp::list_sync::FetchKind;
use ifoodapp::testing::InMemoryTransport;
use ifoodapp::{
    Customer, Dish, EntityTransport, ErrorKind, FetchOutcome, ListConfig, ListSyncController,
    SortDirection, SortState,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TestFixture, in_memory_client, with_ids};

fn ids(controller: &ListSyncController<Dish>) -> Vec<i64> {
    controller.entities().iter().filter_map(|dish| dish.id).collect()
}

#[tokio::test]
async fn test_mount_without_sort_fetches_default() {
    let fixture = TestFixture::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dishes"))
        .and(query_param("sort", "id,ASC"))
        .and(query_param_is_missing("page"))
        .and(query_param_is_missing("size"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-count", "2")
                .set_body_json(with_ids(&[1, 2])),
        )
        .expect(1)
        .mount(&fixture.server)
        .await;

    let mut dishes = fixture.client.list_controller::<Dish>("/dish");
    let outcome = dishes.mount("").await;

    assert_eq!(ids(&dishes), vec![1, 2]);
    assert_eq!(dishes.total_items(), 2);
    assert!(!dishes.loading());
    assert!(dishes.links().is_empty());
    assert!(dishes.error().is_none());
    assert_eq!(outcome.navigation(), Some("/dish?sort=id,ASC"));
}

#[tokio::test]
async fn test_sorting_by_column_twice() {
    let fixture = TestFixture::start().await;
    fixture
        .mount_list("/api/dishes", "id,ASC", with_ids(&[1, 2, 3]), None, Some("3"))
        .await;
    fixture
        .mount_list("/api/dishes", "name,ASC", with_ids(&[3, 1, 2]), None, Some("3"))
        .await;
    fixture
        .mount_list("/api/dishes", "name,DESC", with_ids(&[2, 1, 3]), None, Some("3"))
        .await;

    let mut dishes = fixture.client.list_controller::<Dish>("/dish");
    dishes.mount("?sort=id,ASC").await;
    assert_eq!(ids(&dishes), vec![1, 2, 3]);

    let outcome = dishes.sort_by("name").await;
    assert_eq!(dishes.sort(), &SortState::new("name", SortDirection::Asc));
    assert_eq!(ids(&dishes), vec![3, 1, 2]);
    assert_eq!(outcome.navigation(), Some("/dish?sort=name,ASC"));

    let outcome = dishes.sort_by("name").await;
    assert_eq!(dishes.sort(), &SortState::new("name", SortDirection::Desc));
    assert_eq!(ids(&dishes), vec![2, 1, 3]);
    assert_eq!(outcome.navigation(), Some("/dish?sort=name,DESC"));
}

#[tokio::test]
async fn test_server_error_keeps_list() {
    let fixture = TestFixture::start().await;
    fixture
        .mount_list("/api/dishes", "id,ASC", with_ids(&[1, 2]), None, Some("2"))
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dishes"))
        .and(query_param("sort", "price,ASC"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "title": "Internal Server Error",
            "status": 500,
            "detail": "database unavailable",
        })))
        .mount(&fixture.server)
        .await;

    let mut dishes = fixture.client.list_controller::<Dish>("/dish");
    dishes.mount("").await;
    let outcome = dishes.sort_by("price").await;

    assert_eq!(
        outcome,
        FetchOutcome::Failed {
            kind: ErrorKind::Internal
        }
    );
    assert_eq!(outcome.navigation(), None);
    assert_eq!(ids(&dishes), vec![1, 2]);
    assert!(!dishes.loading());

    let error = dishes.error().expect("error should be exposed");
    assert_eq!(error.status(), Some(500));
    assert!(error.message().contains("database unavailable"));
    assert_eq!(dishes.location_query(), "?sort=id,ASC");
}

#[tokio::test]
async fn test_scrolling_appends_pages() {
    let fixture = TestFixture::with_config(ListConfig::new().with_page_size(2)).await;
    fixture
        .mount_list(
            "/api/dishes",
            "id,ASC",
            with_ids(&[1, 2]),
            Some(
                r#"<api/dishes?page=1&size=2&sort=id,ASC>; rel="next",<api/dishes?page=1&size=2&sort=id,ASC>; rel="last",<api/dishes?page=0&size=2&sort=id,ASC>; rel="first""#,
            ),
            Some("3"),
        )
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dishes"))
        .and(query_param("page", "1"))
        .and(query_param("size", "2"))
        .and(query_param("sort", "id,ASC"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    r#"<api/dishes?page=0&size=2&sort=id,ASC>; rel="prev",<api/dishes?page=0&size=2&sort=id,ASC>; rel="first""#,
                )
                .insert_header("x-total-count", "3")
                .set_body_json(with_ids(&[2, 3])),
        )
        .expect(1)
        .mount(&fixture.server)
        .await;

    let mut dishes = fixture.client.list_controller::<Dish>("/dish");
    dishes.mount("?sort=id,ASC").await;
    assert!(dishes.state().has_more());

    let outcome = dishes.load_more().await;
    assert_eq!(outcome, Some(FetchOutcome::Applied { navigation: None }));
    // id 2 came back on both pages: skipped, not duplicated
    assert_eq!(ids(&dishes), vec![1, 2, 3]);
    assert_eq!(dishes.total_items(), 3);
    assert!(!dishes.state().has_more());

    assert_eq!(dishes.load_more().await, None);
}

#[tokio::test]
async fn test_malformed_headers_are_tolerated() {
    let fixture = TestFixture::start().await;
    fixture
        .mount_list(
            "/api/dishes",
            "id,ASC",
            with_ids(&[5]),
            Some("garbage"),
            Some("many"),
        )
        .await;

    let mut dishes = fixture.client.list_controller::<Dish>("/dish");
    let outcome = dishes.mount("").await;

    assert!(outcome.is_applied());
    assert_eq!(ids(&dishes), vec![5]);
    assert_eq!(dishes.total_items(), 0);
    assert!(dishes.links().is_empty());
}

#[tokio::test]
async fn test_slow_stale_response_is_discarded() {
    let fixture = TestFixture::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dishes"))
        .and(query_param("sort", "id,ASC"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .insert_header("x-total-count", "1")
                .set_body_json(with_ids(&[1])),
        )
        .mount(&fixture.server)
        .await;
    fixture
        .mount_list("/api/dishes", "name,ASC", with_ids(&[7]), None, Some("1"))
        .await;

    let mut dishes = fixture.client.list_controller::<Dish>("/dish");
    dishes.initialize("");
    let slow = tokio::spawn(dishes.begin_fetch(FetchKind::Refresh).into_future());

    // the user clicks a column before the first page arrives
    let next = dishes.set_sort("name");
    dishes.initialize(&next.canonical_query());
    let fast = tokio::spawn(dishes.begin_fetch(FetchKind::Refresh).into_future());

    let (ticket, result) = fast.await.expect("fetch task should not panic");
    assert!(dishes.complete_fetch(ticket, result).is_applied());

    let (ticket, result) = slow.await.expect("fetch task should not panic");
    assert_eq!(dishes.complete_fetch(ticket, result), FetchOutcome::Stale);

    assert_eq!(ids(&dishes), vec![7]);
    assert_eq!(dishes.sort(), &SortState::new("name", SortDirection::Asc));
    assert!(!dishes.loading());
}

#[tokio::test]
async fn test_connection_refused_is_reported() {
    let client = ifoodapp::Client::builder()
        .url("http://127.0.0.1:1")
        .insecure()
        .timeout(Duration::from_secs(2))
        .build()
        .expect("client should build");

    let mut customers = client.list_controller::<Customer>("/customer");
    let outcome = customers.mount("").await;

    assert_eq!(
        outcome,
        FetchOutcome::Failed {
            kind: ErrorKind::Connection
        }
    );
    assert!(customers.entities().is_empty());
    assert!(!customers.loading());
    assert_eq!(client.stats().requests_failed, 1);
}

#[tokio::test]
async fn test_in_memory_screen_walkthrough() {
    let store = Arc::new(InMemoryTransport::new().with_page_size(2));
    store
        .insert_all(
            ["Carla", "Ana", "Eve", "Bo", "Dan"]
                .into_iter()
                .map(|name| Customer::builder().name(name).build()),
        )
        .expect("customers should be stored");
    // the client keeps the default page size; scrolling follows the store's
    let client = in_memory_client(store.clone(), ListConfig::default());

    let mut customers = client.list_controller::<Customer>("/customer");
    customers.mount("?sort=name,ASC").await;
    assert_eq!(customers.entities().len(), 2);
    assert_eq!(customers.total_items(), 5);

    while customers.state().has_more() {
        customers.load_more().await;
    }
    let names: Vec<_> = customers
        .entities()
        .iter()
        .filter_map(|c| c.name.as_deref())
        .collect();
    assert_eq!(names, vec!["Ana", "Bo", "Carla", "Dan", "Eve"]);

    // a new sort starts over from the first page
    customers.sort_by("name").await;
    let names: Vec<_> = customers
        .entities()
        .iter()
        .filter_map(|c| c.name.as_deref())
        .collect();
    assert_eq!(names, vec!["Eve", "Dan"]);
    assert_eq!(customers.location_query(), "?sort=name,DESC");

    // back navigation to the ascending URL refetches
    let outcome = customers.set_location("?sort=name,ASC").await;
    assert!(outcome.is_some_and(|o| o.is_applied()));
    assert_eq!(
        customers.entities().first().and_then(|c| c.name.as_deref()),
        Some("Ana")
    );
    assert_eq!(store.stats().requests_failed, 0);
}
