//! The per-screen list controller.

use std::future::IntoFuture;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::merge::merge_into_list;
use super::state::{FetchKind, FetchTicket, ListState};
use super::url::{UrlSync, sync_url};
use crate::client::EntityClient;
use crate::config::ListConfig;
use crate::entities::Entity;
use crate::error::ErrorKind;
use crate::types::{ListQuery, Page, PageLinks, SortState};
use crate::{Error, Result};

/// What [`ListSyncController::complete_fetch`] did with a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was merged into the list.
    Applied {
        /// Where the caller should navigate (`<path>?sort=<field>,<DIR>`)
        /// so the location shows the sort that was fetched, if it does not
        /// already.
        navigation: Option<String>,
    },
    /// The fetch failed; the list is unchanged and the error is exposed
    /// through [`ListSyncController::error`].
    Failed {
        /// Kind of the stored error.
        kind: ErrorKind,
    },
    /// A newer fetch was issued (or the list was reset) before this one
    /// completed; nothing changed.
    Stale,
}

impl FetchOutcome {
    /// Returns the navigation target of an applied fetch.
    pub fn navigation(&self) -> Option<&str> {
        match self {
            FetchOutcome::Applied { navigation } => navigation.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if the fetch changed the list.
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied { .. })
    }
}

/// A fetch issued by [`ListSyncController::begin_fetch`], not yet run.
///
/// Await it (it implements [`IntoFuture`]) and hand the output to
/// [`ListSyncController::complete_fetch`]. It owns its own client handle, so
/// it can be spawned.
#[must_use = "a pending fetch does nothing until awaited"]
pub struct PendingFetch<T> {
    ticket: FetchTicket,
    query: ListQuery,
    client: EntityClient<T>,
}

impl<T: Entity> PendingFetch<T> {
    /// Returns the ticket this fetch will complete with.
    pub fn ticket(&self) -> &FetchTicket {
        &self.ticket
    }

    /// Returns the request parameters.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

impl<T: Entity> std::fmt::Debug for PendingFetch<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingFetch")
            .field("ticket", &self.ticket)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

impl<T: Entity> IntoFuture for PendingFetch<T> {
    type Output = (FetchTicket, Result<Page<T>>);
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        async move {
            let result = self.client.list(self.query).await;
            (self.ticket, result)
        }
        .boxed()
    }
}

/// Keeps one list screen's sort, data and location query consistent.
///
/// One controller exists per rendered list screen. It owns the screen's
/// [`SortState`] and [`ListState`]; the screen reads from it and reports
/// user intent to it (mount, column click, refresh, scroll to end).
///
/// ```rust
/// use std::sync::Arc;
/// use ifoodapp::{Client, Dish};
/// use ifoodapp::testing::InMemoryTransport;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = Arc::new(InMemoryTransport::new());
/// store.insert(Dish::builder().name("Pho").build()).unwrap();
/// store.insert(Dish::builder().name("Laksa").build()).unwrap();
///
/// let client = Client::builder()
///     .url("https://ifood.test")
///     .transport(store)
///     .build()
///     .unwrap();
/// let mut dishes = client.list_controller::<Dish>("/dish");
///
/// let outcome = dishes.mount("").await;
/// assert_eq!(outcome.navigation(), Some("/dish?sort=id,ASC"));
/// assert_eq!(dishes.entities().len(), 2);
///
/// dishes.sort_by("name").await;
/// assert_eq!(dishes.entities()[0].name.as_deref(), Some("Laksa"));
/// # });
/// ```
pub struct ListSyncController<T> {
    client: EntityClient<T>,
    config: ListConfig,
    path: String,
    query: String,
    sort: SortState,
    state: ListState<T>,
    issued: u64,
    in_flight: Option<(u64, FetchKind)>,
    /// Sort of the cycle the held entities and links belong to.
    cycle_sort: Option<SortState>,
}

impl<T: Entity> std::fmt::Debug for ListSyncController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListSyncController")
            .field("entity", &T::NAME)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("sort", &self.sort)
            .field("items", &self.state.entities.len())
            .field("loading", &self.state.loading)
            .finish_non_exhaustive()
    }
}

impl<T: Entity> ListSyncController<T> {
    /// Creates a controller for the list screen at `path`.
    pub fn new(client: EntityClient<T>, config: ListConfig, path: impl Into<String>) -> Self {
        let sort = SortState::new(config.default_sort_field.clone(), config.default_direction);
        Self {
            client,
            config,
            path: path.into(),
            query: String::new(),
            sort,
            state: ListState::new(),
            issued: 0,
            in_flight: None,
            cycle_sort: None,
        }
    }

    // ------------------------------------------------------------------
    // Sort state
    // ------------------------------------------------------------------

    /// Reads the sort state from the location query and adopts it.
    ///
    /// Missing or malformed sort parameters yield the configured default.
    pub fn initialize(&mut self, location_query: &str) -> SortState {
        self.sort = super::initialize(location_query, &self.config);
        self.query = location_query.to_string();
        self.sort.clone()
    }

    /// Returns the sort state that picking `field` leads to, without
    /// changing anything.
    pub fn set_sort(&self, field: &str) -> SortState {
        super::set_sort(&self.sort, field)
    }

    // ------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------

    /// Mounts the screen: reads the sort from `location_query` and fetches.
    pub async fn mount(&mut self, location_query: &str) -> FetchOutcome {
        self.initialize(location_query);
        self.refresh().await
    }

    /// Reacts to a column-header click: toggles or changes the sort, then
    /// fetches afresh.
    pub async fn sort_by(&mut self, field: &str) -> FetchOutcome {
        self.sort = self.set_sort(field);
        self.refresh().await
    }

    /// Fetches the first page for the current sort, replacing the list.
    pub async fn refresh(&mut self) -> FetchOutcome {
        self.run(FetchKind::Refresh).await
    }

    /// Fetches the next page and appends it.
    ///
    /// Returns `None` without fetching if the last page had no `next` link.
    pub async fn load_more(&mut self) -> Option<FetchOutcome> {
        let page = self.state.links.next()?;
        Some(self.run(FetchKind::Continuation { page }).await)
    }

    /// Reacts to navigation the controller did not cause (back/forward,
    /// a typed URL).
    ///
    /// Fetches afresh if the new query carries a different sort; returns
    /// `None` if the sort is unchanged.
    pub async fn set_location(&mut self, location_query: &str) -> Option<FetchOutcome> {
        let sort = super::initialize(location_query, &self.config);
        self.query = location_query.to_string();
        if sort == self.sort {
            return None;
        }
        self.sort = sort;
        Some(self.refresh().await)
    }

    /// Empties the list. Fetches still in flight will complete as
    /// [`FetchOutcome::Stale`].
    pub fn reset(&mut self) {
        tracing::debug!(entity = T::NAME, "list reset");
        self.state.reset();
        self.in_flight = None;
        self.cycle_sort = None;
    }

    async fn run(&mut self, kind: FetchKind) -> FetchOutcome {
        let (ticket, result) = self.begin_fetch(kind).await;
        self.complete_fetch(ticket, result)
    }

    // ------------------------------------------------------------------
    // Two-phase fetch
    // ------------------------------------------------------------------

    /// Issues a fetch for the current sort and marks the list as loading.
    ///
    /// The returned ticket supersedes every earlier one. A continuation is
    /// issued as a refresh instead when it cannot extend the held list: a
    /// refresh is still outstanding, or the sort changed since the held
    /// pages were fetched. A continuation requests as many items per page as
    /// the server's `next` link did, falling back to
    /// [`ListConfig::page_size`].
    pub fn begin_fetch(&mut self, kind: FetchKind) -> PendingFetch<T> {
        let refresh_pending = matches!(self.in_flight, Some((_, FetchKind::Refresh)));
        let kind = match kind {
            FetchKind::Continuation { page }
                if refresh_pending || self.cycle_sort.as_ref() != Some(&self.sort) =>
            {
                tracing::debug!(
                    entity = T::NAME,
                    page,
                    "continuation no longer matches the held list, refreshing instead"
                );
                FetchKind::Refresh
            },
            kind => kind,
        };

        self.issued += 1;
        self.in_flight = Some((self.issued, kind));
        self.state.loading = true;

        let ticket = FetchTicket {
            sequence: self.issued,
            kind,
            sort: self.sort.clone(),
        };
        let page_size = self
            .state
            .links
            .page_size()
            .unwrap_or(self.config.page_size);
        let query = ticket.query(page_size);
        tracing::debug!(
            entity = T::NAME,
            sequence = ticket.sequence,
            kind = ?kind,
            query = %query.to_query_string(),
            "fetch started"
        );

        PendingFetch {
            ticket,
            query,
            client: self.client.clone(),
        }
    }

    /// Applies the result of a fetch, unless a newer fetch has been issued
    /// since.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<Page<T>>) -> FetchOutcome {
        if self.in_flight.map(|(sequence, _)| sequence) != Some(ticket.sequence) {
            tracing::warn!(
                entity = T::NAME,
                sequence = ticket.sequence,
                latest = self.issued,
                "discarding stale fetch completion"
            );
            return FetchOutcome::Stale;
        }
        self.in_flight = None;
        self.state.loading = false;

        match result {
            Ok(page) => self.apply(ticket, page),
            Err(error) => self.fail(ticket, error),
        }
    }

    fn apply(&mut self, ticket: FetchTicket, page: Page<T>) -> FetchOutcome {
        let Page {
            items,
            links,
            total_count,
        } = page;

        if ticket.kind.is_refresh() {
            self.cycle_sort = Some(ticket.sort.clone());
        }
        let existing = std::mem::take(&mut self.state.entities);
        self.state.entities = merge_into_list(existing, items, ticket.kind);
        self.state.links = links;
        self.state.total_items = total_count;
        self.state.error = None;

        let navigation = match sync_url(&self.query, &ticket.sort) {
            UrlSync::Navigate(query) => {
                let target = format!("{}{}", self.path, query);
                self.query = query;
                Some(target)
            },
            UrlSync::NoOp => None,
        };

        tracing::debug!(
            entity = T::NAME,
            sequence = ticket.sequence,
            items = self.state.entities.len(),
            total_items = self.state.total_items,
            navigation = ?navigation,
            "fetch applied"
        );
        FetchOutcome::Applied { navigation }
    }

    fn fail(&mut self, ticket: FetchTicket, error: Error) -> FetchOutcome {
        tracing::debug!(
            entity = T::NAME,
            sequence = ticket.sequence,
            error = %error,
            "fetch failed"
        );
        let kind = error.kind();
        self.state.error = Some(error);
        FetchOutcome::Failed { kind }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The list state the screen renders from.
    pub fn state(&self) -> &ListState<T> {
        &self.state
    }

    /// Items accumulated over the fetched pages.
    pub fn entities(&self) -> &[T] {
        self.state.entities()
    }

    /// `true` while the latest fetch is outstanding.
    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    /// The error of the last fetch, if it failed.
    pub fn error(&self) -> Option<&Error> {
        self.state.error()
    }

    /// Pagination relations of the last applied page.
    pub fn links(&self) -> &PageLinks {
        self.state.links()
    }

    /// Total items across all pages.
    pub fn total_items(&self) -> u64 {
        self.state.total_items()
    }

    /// The current sort.
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// The location query the controller believes is shown.
    pub fn location_query(&self) -> &str {
        &self.query
    }

    /// The list screen's path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The list configuration.
    pub fn config(&self) -> &ListConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::Client;
    use crate::entities::Dish;
    use crate::transport::{ListResponse, MockReply, MockTransport};
    use crate::types::SortDirection;
    use serde_json::json;

    fn setup() -> (Arc<MockTransport>, ListSyncController<Dish>) {
        let mock = Arc::new(MockTransport::new());
        let client = Client::builder()
            .url("https://ifood.test")
            .transport(mock.clone())
            .build()
            .unwrap();
        (mock, client.list_controller("/dish"))
    }

    fn dishes(ids: &[i64]) -> serde_json::Value {
        json!(ids.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>())
    }

    fn ids(controller: &ListSyncController<Dish>) -> Vec<i64> {
        controller.entities().iter().filter_map(|d| d.id).collect()
    }

    #[tokio::test]
    async fn test_mount_with_empty_query() {
        let (mock, mut controller) = setup();
        mock.push_list(ListResponse::new(dishes(&[1, 2])).with_total_count("2"));

        let outcome = controller.mount("").await;

        assert_eq!(mock.targets(), vec!["api/dishes?sort=id,ASC"]);
        assert_eq!(ids(&controller), vec![1, 2]);
        assert_eq!(controller.total_items(), 2);
        assert!(!controller.loading());
        assert!(controller.links().is_empty());
        assert_eq!(outcome.navigation(), Some("/dish?sort=id,ASC"));
        assert_eq!(controller.location_query(), "?sort=id,ASC");
    }

    #[tokio::test]
    async fn test_mount_with_canonical_query_does_not_navigate() {
        let (mock, mut controller) = setup();
        mock.push_list(ListResponse::new(dishes(&[3])).with_total_count("1"));

        let outcome = controller.mount("?sort=price,DESC").await;
        assert_eq!(outcome, FetchOutcome::Applied { navigation: None });
        assert_eq!(controller.sort(), &SortState::new("price", SortDirection::Desc));
        assert_eq!(mock.targets(), vec!["api/dishes?sort=price,DESC"]);
    }

    #[tokio::test]
    async fn test_sort_by_twice_toggles_and_replaces() {
        let (mock, mut controller) = setup();
        mock.push_list(ListResponse::new(dishes(&[1, 2, 3])).with_total_count("3"));
        mock.push_list(ListResponse::new(dishes(&[2, 1, 3])).with_total_count("3"));
        mock.push_list(ListResponse::new(dishes(&[3, 1, 2])).with_total_count("3"));

        controller.mount("").await;
        let first = controller.sort_by("name").await;
        assert_eq!(ids(&controller), vec![2, 1, 3]);
        assert_eq!(first.navigation(), Some("/dish?sort=name,ASC"));

        let second = controller.sort_by("name").await;
        assert_eq!(ids(&controller), vec![3, 1, 2]);
        assert_eq!(second.navigation(), Some("/dish?sort=name,DESC"));

        assert_eq!(
            mock.targets(),
            vec![
                "api/dishes?sort=id,ASC",
                "api/dishes?sort=name,ASC",
                "api/dishes?sort=name,DESC",
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_leaves_list_untouched() {
        let (mock, mut controller) = setup();
        mock.push_list(ListResponse::new(dishes(&[1, 2])).with_total_count("2"));
        mock.push_failure(Error::from_status(500, "Internal Server Error"));

        controller.mount("").await;
        let outcome = controller.sort_by("price").await;

        assert_eq!(
            outcome,
            FetchOutcome::Failed {
                kind: ErrorKind::Internal
            }
        );
        assert_eq!(outcome.navigation(), None);
        assert_eq!(ids(&controller), vec![1, 2]);
        assert_eq!(controller.total_items(), 2);
        assert!(!controller.loading());
        assert_eq!(controller.error().map(|e| e.status()), Some(Some(500)));
        assert_eq!(controller.location_query(), "?sort=id,ASC");
    }

    #[tokio::test]
    async fn test_success_clears_error() {
        let (mock, mut controller) = setup();
        mock.push_failure(Error::connection("refused"));
        mock.push_list(ListResponse::new(dishes(&[1])).with_total_count("1"));

        controller.mount("").await;
        assert!(controller.error().is_some());
        assert!(controller.entities().is_empty());

        controller.refresh().await;
        assert!(controller.error().is_none());
        assert_eq!(ids(&controller), vec![1]);
    }

    #[tokio::test]
    async fn test_load_more_appends_next_page() {
        let (mock, mut controller) = setup();
        mock.push_list(
            ListResponse::new(dishes(&[1, 2]))
                .with_link(r#"<api/dishes?page=1&size=20&sort=id,ASC>; rel="next""#)
                .with_total_count("4"),
        );
        mock.push_list(ListResponse::new(dishes(&[2, 3, 4])).with_total_count("4"));

        controller.mount("").await;
        assert!(controller.state().has_more());

        let outcome = controller.load_more().await;
        assert_eq!(outcome, Some(FetchOutcome::Applied { navigation: None }));
        assert_eq!(ids(&controller), vec![1, 2, 3, 4]);
        assert_eq!(
            mock.targets()[1],
            "api/dishes?page=1&size=20&sort=id,ASC"
        );

        // last page had no next link
        assert_eq!(controller.load_more().await, None);
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_load_more_uses_server_page_size() {
        let (mock, mut controller) = setup();
        mock.push_list(
            ListResponse::new(dishes(&[1, 2]))
                .with_link(r#"<api/dishes?page=1&size=2&sort=id,ASC>; rel="next""#)
                .with_total_count("3"),
        );
        mock.push_list(ListResponse::new(dishes(&[3])).with_total_count("3"));

        controller.mount("").await;
        controller.load_more().await;

        assert_eq!(controller.config().page_size, 20);
        assert_eq!(mock.targets()[1], "api/dishes?page=1&size=2&sort=id,ASC");
        assert_eq!(ids(&controller), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_continuation_during_sort_change_refreshes() {
        let (mock, mut controller) = setup();
        mock.push_list(
            ListResponse::new(dishes(&[1, 2]))
                .with_link(r#"<api/dishes?page=1&size=2&sort=id,ASC>; rel="next""#)
                .with_total_count("4"),
        );
        mock.push_list(ListResponse::new(dishes(&[4, 3])).with_total_count("4"));
        mock.push_list(ListResponse::new(dishes(&[4, 3])).with_total_count("4"));

        controller.mount("").await;
        controller.sort = controller.set_sort("id");
        let refresh = controller.begin_fetch(FetchKind::Refresh);
        // scrolled to the end before the new sort's first page arrived
        let scroll = controller.begin_fetch(FetchKind::Continuation { page: 1 });
        assert_eq!(scroll.ticket().kind(), FetchKind::Refresh);

        let (ticket, result) = refresh.await;
        assert_eq!(controller.complete_fetch(ticket, result), FetchOutcome::Stale);
        let (ticket, result) = scroll.await;
        let outcome = controller.complete_fetch(ticket, result);

        assert_eq!(outcome.navigation(), Some("/dish?sort=id,DESC"));
        assert_eq!(ids(&controller), vec![4, 3]);
        assert_eq!(controller.sort(), &SortState::new("id", SortDirection::Desc));
        assert_eq!(
            mock.targets(),
            vec![
                "api/dishes?sort=id,ASC",
                "api/dishes?sort=id,DESC",
                "api/dishes?sort=id,DESC",
            ]
        );
    }

    #[tokio::test]
    async fn test_load_more_after_failed_sort_change_refreshes() {
        let (mock, mut controller) = setup();
        mock.push_list(
            ListResponse::new(dishes(&[1, 2]))
                .with_link(r#"<api/dishes?page=1&size=2&sort=id,ASC>; rel="next""#)
                .with_total_count("4"),
        );
        mock.push_failure(Error::from_status(503, "Service Unavailable"));
        mock.push_list(ListResponse::new(dishes(&[7, 8])).with_total_count("4"));

        controller.mount("").await;
        assert!(!controller.sort_by("name").await.is_applied());

        // the held rows still belong to id,ASC; they must not be extended
        let outcome = controller.load_more().await;
        assert!(outcome.is_some_and(|o| o.is_applied()));
        assert_eq!(ids(&controller), vec![7, 8]);
        assert_eq!(mock.targets()[2], "api/dishes?sort=name,ASC");
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let (mock, mut controller) = setup();
        mock.push_list(ListResponse::new(dishes(&[1])).with_total_count("1"));
        mock.push_list(ListResponse::new(dishes(&[9])).with_total_count("1"));

        let older = controller.begin_fetch(FetchKind::Refresh);
        controller.sort = controller.set_sort("name");
        let newer = controller.begin_fetch(FetchKind::Refresh);
        assert!(newer.ticket().sequence() > older.ticket().sequence());

        let (old_ticket, old_result) = older.await;
        let (new_ticket, new_result) = newer.await;

        // the newer fetch lands first
        assert!(controller.complete_fetch(new_ticket, new_result).is_applied());
        assert_eq!(controller.complete_fetch(old_ticket, old_result), FetchOutcome::Stale);

        assert_eq!(ids(&controller), vec![9]);
        assert_eq!(controller.location_query(), "?sort=name,ASC");
    }

    #[tokio::test]
    async fn test_loading_until_latest_completes() {
        let (mock, mut controller) = setup();
        mock.push_list(ListResponse::new(dishes(&[1])));
        mock.push_list(ListResponse::new(dishes(&[2])));

        let older = controller.begin_fetch(FetchKind::Refresh);
        let newer = controller.begin_fetch(FetchKind::Refresh);

        let (ticket, result) = older.await;
        assert_eq!(controller.complete_fetch(ticket, result), FetchOutcome::Stale);
        assert!(controller.loading());
        assert!(controller.entities().is_empty());

        let (ticket, result) = newer.await;
        controller.complete_fetch(ticket, result);
        assert!(!controller.loading());
        assert_eq!(ids(&controller), vec![2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_fetches_out_of_order() {
        let (mock, mut controller) = setup();
        mock.push_delayed(
            MockReply::List(ListResponse::new(dishes(&[1]))),
            Duration::from_millis(500),
        );
        mock.push_delayed(
            MockReply::List(ListResponse::new(dishes(&[2]))),
            Duration::from_millis(10),
        );

        let slow = controller.begin_fetch(FetchKind::Refresh);
        let fast = controller.begin_fetch(FetchKind::Refresh);
        let slow = tokio::spawn(slow.into_future());
        let fast = tokio::spawn(fast.into_future());

        let (ticket, result) = fast.await.unwrap();
        assert!(controller.complete_fetch(ticket, result).is_applied());
        let (ticket, result) = slow.await.unwrap();
        assert_eq!(controller.complete_fetch(ticket, result), FetchOutcome::Stale);

        assert_eq!(ids(&controller), vec![2]);
    }

    #[tokio::test]
    async fn test_reset_invalidates_in_flight() {
        let (mock, mut controller) = setup();
        mock.push_list(ListResponse::new(dishes(&[1, 2])).with_total_count("2"));
        mock.push_list(ListResponse::new(dishes(&[3])).with_total_count("1"));

        controller.mount("").await;
        let pending = controller.begin_fetch(FetchKind::Refresh);
        controller.reset();
        assert!(controller.entities().is_empty());
        assert!(!controller.loading());

        let (ticket, result) = pending.await;
        assert_eq!(controller.complete_fetch(ticket, result), FetchOutcome::Stale);
        assert!(controller.entities().is_empty());
    }

    #[tokio::test]
    async fn test_set_location() {
        let (mock, mut controller) = setup();
        mock.push_list(ListResponse::new(dishes(&[1])));
        mock.push_list(ListResponse::new(dishes(&[1])));

        controller.mount("?sort=id,ASC").await;

        // same sort, spelled differently: nothing to fetch
        assert_eq!(controller.set_location("?sort=id&order=ASC").await, None);
        assert_eq!(mock.request_count(), 1);

        let outcome = controller.set_location("?sort=price,DESC").await;
        assert_eq!(outcome, Some(FetchOutcome::Applied { navigation: None }));
        assert_eq!(controller.sort(), &SortState::new("price", SortDirection::Desc));
        assert_eq!(mock.targets()[1], "api/dishes?sort=price,DESC");
    }

    #[test]
    fn test_initialize_and_set_sort_are_pure() {
        let (mock, mut controller) = setup();
        let sort = controller.initialize("?sort=name,bogus");
        assert_eq!(sort, SortState::default());

        let next = controller.set_sort("name");
        assert_eq!(next, SortState::new("name", SortDirection::Asc));
        assert_eq!(controller.sort(), &SortState::default());
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_pending_fetch_is_send() {
        fn assert_send<F: Send + 'static>(_: &F) {}
        let (_, mut controller) = setup();
        let pending = controller.begin_fetch(FetchKind::Refresh);
        assert_send(&pending);
        assert_send(&pending.into_future());
    }
}
