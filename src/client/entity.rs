//! Typed access to one entity type.

use std::marker::PhantomData;

use serde_json::Value;

use super::Client;
use crate::entities::{Entity, EntityId};
use crate::form::clean_entity;
use crate::transport::{ListRequest, ListResponse};
use crate::types::{ListQuery, Page, PageLinks, parse_total_count};
use crate::{Error, Result};

/// CRUD and list operations for entity `T` under `api/<entities>`.
///
/// Obtained from [`Client::entities`] or one of the per-entity shortcuts
/// such as [`Client::dishes`]. Cheap to clone.
///
/// Request bodies pass through [`clean_entity`], so unset fields and
/// relationships without an id never reach the server.
pub struct EntityClient<T> {
    client: Client,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityClient<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> std::fmt::Debug for EntityClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityClient")
            .field("entity", &T::NAME)
            .field("path", &T::collection_path())
            .finish()
    }
}

impl<T: Entity> EntityClient<T> {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches one page of entities.
    ///
    /// A missing or malformed `link` header yields empty links, and a
    /// missing or malformed `x-total-count` header yields 0; neither fails
    /// the request.
    ///
    /// # Errors
    ///
    /// Transport failures, HTTP error statuses, and a body that is not an
    /// array of `T`.
    pub async fn list(&self, query: ListQuery) -> Result<Page<T>> {
        let request = ListRequest::new(T::collection_path(), query);
        tracing::debug!(entity = T::NAME, target = %request.target(), "fetching page");

        let ListResponse {
            body,
            link,
            total_count,
        } = self.client.transport().list(request).await?;

        let items: Vec<T> = serde_json::from_value(body).map_err(|e| {
            Error::invalid_response(format!("{} list body: {}", T::NAME, e)).with_source(e)
        })?;
        let links = read_links(T::NAME, link.as_deref());
        let total_count = read_total_count(T::NAME, total_count.as_deref());

        tracing::debug!(
            entity = T::NAME,
            items = items.len(),
            total_count,
            next = ?links.next(),
            "page received"
        );
        Ok(Page::new(items, links, total_count))
    }

    /// Fetches one entity.
    ///
    /// # Errors
    ///
    /// `NotFound` if no entity has this id.
    pub async fn get(&self, id: EntityId) -> Result<T> {
        let body = self.client.transport().get(&T::item_path(id)).await?;
        decode(body)
    }

    /// Creates an entity and returns it as stored, with its new id.
    ///
    /// Any id on `entity` is stripped; the server assigns identities.
    pub async fn create(&self, entity: &T) -> Result<T> {
        let mut entity = entity.clone();
        entity.set_id(None);

        tracing::debug!(entity = T::NAME, "creating");
        let body = self
            .client
            .transport()
            .post(&T::collection_path(), encode(&entity)?)
            .await?;
        decode(body)
    }

    /// Replaces an entity (`PUT`).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `entity` has no id.
    pub async fn update(&self, entity: &T) -> Result<T> {
        let id = require_id(entity)?;
        tracing::debug!(entity = T::NAME, id, "updating");
        let body = self
            .client
            .transport()
            .put(&T::item_path(id), encode(entity)?)
            .await?;
        decode(body)
    }

    /// Updates the fields set on `entity` (`PATCH`).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `entity` has no id.
    pub async fn partial_update(&self, entity: &T) -> Result<T> {
        let id = require_id(entity)?;
        tracing::debug!(entity = T::NAME, id, "patching");
        let body = self
            .client
            .transport()
            .patch(&T::item_path(id), encode(entity)?)
            .await?;
        decode(body)
    }

    /// Deletes an entity.
    pub async fn delete(&self, id: EntityId) -> Result<()> {
        tracing::debug!(entity = T::NAME, id, "deleting");
        self.client.transport().delete(&T::item_path(id)).await
    }
}

fn require_id<T: Entity>(entity: &T) -> Result<EntityId> {
    entity
        .id()
        .ok_or_else(|| Error::invalid_argument(format!("{} has no id", T::NAME)))
}

fn encode<T: Entity>(entity: &T) -> Result<Value> {
    Ok(clean_entity(serde_json::to_value(entity)?))
}

fn decode<T: Entity>(body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(|e| {
        Error::invalid_response(format!("{} body: {}", T::NAME, e)).with_source(e)
    })
}

fn read_links(entity: &str, header: Option<&str>) -> PageLinks {
    let Some(header) = header else {
        tracing::debug!(entity, "no link header");
        return PageLinks::new();
    };
    PageLinks::parse(header).unwrap_or_else(|| {
        tracing::warn!(entity, header, "unparseable link header, assuming no further pages");
        PageLinks::new()
    })
}

fn read_total_count(entity: &str, header: Option<&str>) -> u64 {
    let Some(header) = header else {
        tracing::warn!(entity, "missing x-total-count header, assuming 0");
        return 0;
    };
    parse_total_count(header).unwrap_or_else(|| {
        tracing::warn!(entity, header, "unparseable x-total-count header, assuming 0");
        0
    })
}
