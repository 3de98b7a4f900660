//! InMemoryTransport for testing with server-like list semantics.

use std::cmp::Ordering as CmpOrdering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::config::DEFAULT_PAGE_SIZE;
use crate::entities::{Entity, EntityId};
use crate::transport::{EntityTransport, ListRequest, ListResponse, Transport, TransportStats};
use crate::types::{SortDirection, SortState};
use crate::{Error, Result};

/// An in-process entity store that answers like the REST server.
///
/// Unlike [`MockTransport`](crate::transport::MockTransport), which replays
/// canned replies, `InMemoryTransport` actually stores entities and sorts and
/// pages them, emitting the same `link` and `x-total-count` headers the
/// server does. Useful for exercising list screens end to end.
///
/// Clones share the same store.
///
/// ## Behavior
///
/// - `GET api/<resource>?sort=<field>,<DIR>[&page=<n>&size=<n>]`: sorted by
///   the field (ties by id), paged; without `page` the first page of the
///   default size is returned
/// - `POST`: assigns the next id; a body that already has an id is a `400`
/// - `PUT`: replaces; `PATCH`: overwrites only the non-null fields given.
///   Both answer `404` for an unknown id and `400` if the body's id differs
///   from the path's
/// - `DELETE`: always succeeds
///
/// ## Example
///
/// ```rust
/// use ifoodapp::Restaurant;
/// use ifoodapp::testing::InMemoryTransport;
///
/// let store = InMemoryTransport::new().with_page_size(2);
/// let stored = store
///     .insert(Restaurant::builder().name("Tasca").build())
///     .unwrap();
/// assert_eq!(stored.id, Some(1));
/// assert_eq!(store.count::<Restaurant>(), 1);
/// ```
#[derive(Clone)]
pub struct InMemoryTransport {
    store: Arc<RwLock<Store>>,
    page_size: u32,
    requests_sent: Arc<AtomicU64>,
    requests_failed: Arc<AtomicU64>,
}

#[derive(Default)]
struct Store {
    collections: HashMap<String, BTreeMap<EntityId, Value>>,
    last_id: EntityId,
}

impl Store {
    fn next_id(&mut self) -> EntityId {
        self.last_id += 1;
        self.last_id
    }
}

impl InMemoryTransport {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            page_size: DEFAULT_PAGE_SIZE,
            requests_sent: Arc::new(AtomicU64::new(0)),
            requests_failed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Sets the page size used when a list request names no page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Stores an entity directly, bypassing the request counters.
    ///
    /// An entity without an id gets the next free one; an entity with an id
    /// replaces whatever was stored under it.
    ///
    /// # Errors
    ///
    /// Fails only if the entity does not serialize to a JSON object.
    pub fn insert<T: Entity>(&self, entity: T) -> Result<T> {
        let Value::Object(mut object) = serde_json::to_value(&entity)? else {
            return Err(Error::invalid_argument(format!(
                "{} does not serialize to an object",
                T::NAME
            )));
        };

        let mut store = self.store.write();
        let id = match entity.id() {
            Some(id) => {
                store.last_id = store.last_id.max(id);
                id
            },
            None => store.next_id(),
        };
        object.insert("id".to_string(), Value::from(id));
        store
            .collections
            .entry(T::RESOURCE.to_string())
            .or_default()
            .insert(id, Value::Object(object.clone()));
        drop(store);

        Ok(serde_json::from_value(Value::Object(object))?)
    }

    /// Stores several entities in order. See [`insert`](Self::insert).
    pub fn insert_all<T: Entity>(&self, entities: impl IntoIterator<Item = T>) -> Result<Vec<T>> {
        entities.into_iter().map(|entity| self.insert(entity)).collect()
    }

    /// Returns a stored entity.
    pub fn find<T: Entity>(&self, id: EntityId) -> Option<T> {
        let store = self.store.read();
        let value = store.collections.get(T::RESOURCE)?.get(&id)?.clone();
        serde_json::from_value(value).ok()
    }

    /// Returns the number of stored entities of type `T`.
    pub fn count<T: Entity>(&self) -> usize {
        self.store
            .read()
            .collections
            .get(T::RESOURCE)
            .map_or(0, BTreeMap::len)
    }

    /// Removes every entity. Ids keep counting up.
    pub fn clear(&self) {
        self.store.write().collections.clear();
    }

    fn record<R>(&self, result: Result<R>) -> Result<R> {
        self.requests_sent.fetch_add(1, Ordering::Relaxed);
        if result.is_err() {
            self.requests_failed.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    fn list_page(&self, request: &ListRequest) -> Result<ListResponse> {
        let (resource, id) = parse_path(&request.path)?;
        if id.is_some() {
            return Err(bad_request(format!("{} is not a collection", request.path)));
        }

        let mut items: Vec<Value> = self
            .store
            .read()
            .collections
            .get(&resource)
            .map(|collection| collection.values().cloned().collect())
            .unwrap_or_default();
        if let Some(sort) = &request.query.sort {
            sort_values(&mut items, sort);
        }

        let (page, size) = match request.query.page {
            Some(page) => (page.page, page.size.max(1)),
            None => (0, self.page_size),
        };
        let total = items.len() as u64;
        let link = link_header(&request.path, request.query.sort.as_ref(), page, size, total);

        let start = (page as usize).saturating_mul(size as usize);
        let body: Vec<Value> = items.into_iter().skip(start).take(size as usize).collect();

        Ok(ListResponse::new(Value::Array(body))
            .with_link(link)
            .with_total_count(total.to_string()))
    }

    fn get_one(&self, path: &str) -> Result<Value> {
        let (resource, id) = parse_item_path(path)?;
        self.store
            .read()
            .collections
            .get(&resource)
            .and_then(|collection| collection.get(&id))
            .cloned()
            .ok_or_else(|| not_found(&resource, id))
    }

    fn create(&self, path: &str, body: Value) -> Result<Value> {
        let (resource, id) = parse_path(path)?;
        if id.is_some() {
            return Err(bad_request(format!("cannot POST to {}", path)));
        }
        let mut object = into_object(body)?;
        if object.get("id").is_some_and(|id| !id.is_null()) {
            return Err(bad_request(format!(
                "a new {} cannot already have an id",
                resource
            )));
        }

        let mut store = self.store.write();
        let id = store.next_id();
        object.insert("id".to_string(), Value::from(id));
        let stored = Value::Object(object);
        store
            .collections
            .entry(resource)
            .or_default()
            .insert(id, stored.clone());
        Ok(stored)
    }

    fn replace(&self, path: &str, body: Value, partial: bool) -> Result<Value> {
        let (resource, id) = parse_item_path(path)?;
        let mut object = into_object(body)?;
        match object.get("id").and_then(Value::as_i64) {
            Some(body_id) if body_id == id => {},
            Some(_) => return Err(bad_request("id in body does not match path")),
            None => return Err(bad_request("body has no id")),
        }

        let mut store = self.store.write();
        let current = store
            .collections
            .get_mut(&resource)
            .and_then(|collection| collection.get_mut(&id))
            .ok_or_else(|| not_found(&resource, id))?;

        if partial {
            if let Value::Object(existing) = current {
                for (field, value) in object {
                    if !value.is_null() {
                        existing.insert(field, value);
                    }
                }
            }
        } else {
            object.retain(|_, value| !value.is_null());
            *current = Value::Object(object);
        }
        Ok(current.clone())
    }

    fn remove(&self, path: &str) -> Result<()> {
        let (resource, id) = parse_item_path(path)?;
        if let Some(collection) = self.store.write().collections.get_mut(&resource) {
            collection.remove(&id);
        }
        Ok(())
    }
}

impl Default for InMemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.store.read();
        let sizes: BTreeMap<&str, usize> = store
            .collections
            .iter()
            .map(|(resource, collection)| (resource.as_str(), collection.len()))
            .collect();
        f.debug_struct("InMemoryTransport")
            .field("collections", &sizes)
            .field("page_size", &self.page_size)
            .finish()
    }
}

#[async_trait::async_trait]
impl EntityTransport for InMemoryTransport {
    async fn list(&self, request: ListRequest) -> Result<ListResponse> {
        self.record(self.list_page(&request))
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.record(self.get_one(path))
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.record(self.create(path, body))
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.record(self.replace(path, body, false))
    }

    async fn patch(&self, path: &str, body: Value) -> Result<Value> {
        self.record(self.replace(path, body, true))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.record(self.remove(path))
    }

    fn transport_type(&self) -> Transport {
        Transport::InMemory
    }

    fn stats(&self) -> TransportStats {
        TransportStats {
            requests_sent: self.requests_sent.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
        }
    }
}

/// Splits `api/<resource>[/<id>]`.
fn parse_path(path: &str) -> Result<(String, Option<EntityId>)> {
    let path = path.trim_start_matches('/');
    let rest = path
        .strip_prefix("api/")
        .ok_or_else(|| Error::not_found(format!("no such endpoint: {}", path)).with_status(404))?;

    match rest.split_once('/') {
        None if !rest.is_empty() => Ok((rest.to_string(), None)),
        Some((resource, id)) if !resource.is_empty() => {
            let id = id
                .parse()
                .map_err(|_| bad_request(format!("'{}' is not a valid id", id)))?;
            Ok((resource.to_string(), Some(id)))
        },
        _ => Err(Error::not_found(format!("no such endpoint: {}", path)).with_status(404)),
    }
}

fn parse_item_path(path: &str) -> Result<(String, EntityId)> {
    match parse_path(path)? {
        (resource, Some(id)) => Ok((resource, id)),
        (_, None) => Err(bad_request(format!("{} has no id", path))),
    }
}

fn into_object(body: Value) -> Result<Map<String, Value>> {
    match body {
        Value::Object(object) => Ok(object),
        _ => Err(bad_request("body is not a JSON object")),
    }
}

fn bad_request(message: impl Into<String>) -> Error {
    Error::from_status(400, message.into())
}

fn not_found(resource: &str, id: EntityId) -> Error {
    Error::from_status(404, format!("{}/{} not found", resource, id))
}

fn sort_values(items: &mut [Value], sort: &SortState) {
    items.sort_by(|a, b| {
        let ordering = compare_json(a.get(&sort.field), b.get(&sort.field));
        let ordering = match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        ordering.then_with(|| compare_json(a.get("id"), b.get("id")))
    });
}

/// Orders missing and `null` first, then booleans, numbers, strings; nested
/// objects by their `id`.
fn compare_json(a: Option<&Value>, b: Option<&Value>) -> CmpOrdering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(Value::Object(_)) => 4,
            Some(Value::Array(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Object(x)), Some(Value::Object(y))) => compare_json(x.get("id"), y.get("id")),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Builds the `link` header the server sends with a page.
fn link_header(path: &str, sort: Option<&SortState>, page: u32, size: u32, total: u64) -> String {
    let page_count = total.div_ceil(u64::from(size));
    let last = u32::try_from(page_count.saturating_sub(1)).unwrap_or(u32::MAX);

    let href = |page: u32| {
        let mut href = format!("{}?page={}&size={}", path, page, size);
        if let Some(sort) = sort {
            href.push_str(&format!("&sort={}", sort.to_param()));
        }
        href
    };

    let mut entries = Vec::with_capacity(4);
    if page < last {
        entries.push(format!(r#"<{}>; rel="next""#, href(page + 1)));
    }
    if page > 0 {
        entries.push(format!(r#"<{}>; rel="prev""#, href(page - 1)));
    }
    entries.push(format!(r#"<{}>; rel="last""#, href(last)));
    entries.push(format!(r#"<{}>; rel="first""#, href(0)));
    entries.join(",")
}
