//! Detail and edit screens for one entity.

use crate::client::EntityClient;
use crate::entities::{Entity, EntityId};
use crate::form::{FormValues, entity_from_form};
use crate::{Error, Result};

/// State behind an entity's detail, create/edit and delete screens.
///
/// Each operation clears the previous error and `update_success` when it
/// starts. Failures never panic or propagate; they land in
/// [`error`](Self::error) and the operation returns `None` / `false`.
///
/// ```rust
/// use std::sync::Arc;
/// use ifoodapp::{Client, Dish};
/// use ifoodapp::form::FormValues;
/// use ifoodapp::testing::InMemoryTransport;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let client = Client::builder()
///     .url("https://ifood.test")
///     .transport(Arc::new(InMemoryTransport::new()))
///     .build()
///     .unwrap();
/// let mut editor = client.editor::<Dish>();
///
/// let form = FormValues::new().with("name", "Mapo tofu").with("price", "11.50");
/// let saved = editor.save_form(&form).await.cloned().unwrap();
/// assert_eq!(saved.id, Some(1));
/// assert!(editor.update_success());
/// # });
/// ```
pub struct EntityEditor<T> {
    client: EntityClient<T>,
    entity: Option<T>,
    loading: bool,
    updating: bool,
    update_success: bool,
    error: Option<Error>,
}

impl<T: Entity + std::fmt::Debug> std::fmt::Debug for EntityEditor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityEditor")
            .field("entity", &self.entity)
            .field("loading", &self.loading)
            .field("updating", &self.updating)
            .field("update_success", &self.update_success)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T: Entity> EntityEditor<T> {
    /// Creates an editor with nothing loaded.
    pub fn new(client: EntityClient<T>) -> Self {
        Self {
            client,
            entity: None,
            loading: false,
            updating: false,
            update_success: false,
            error: None,
        }
    }

    /// Fetches the entity to show or edit.
    pub async fn load(&mut self, id: EntityId) -> Option<&T> {
        self.start();
        self.loading = true;

        let result = self.client.get(id).await;
        self.loading = false;
        match result {
            Ok(entity) => {
                self.entity = Some(entity);
                self.entity.as_ref()
            },
            Err(error) => {
                self.record_error("load", error);
                None
            },
        }
    }

    /// Submits form input.
    ///
    /// The input is laid over the loaded entity, if any. The result is
    /// created when it has no id and updated (`PUT`) otherwise.
    pub async fn save_form(&mut self, values: &FormValues) -> Option<&T> {
        self.start();
        self.updating = true;

        let result = self.submit(values).await;
        self.updating = false;
        match result {
            Ok(saved) => {
                tracing::debug!(entity = T::NAME, id = ?saved.id(), "saved");
                self.entity = Some(saved);
                self.update_success = true;
                self.entity.as_ref()
            },
            Err(error) => {
                self.record_error("save", error);
                None
            },
        }
    }

    async fn submit(&self, values: &FormValues) -> Result<T> {
        let entity = entity_from_form(values, self.entity.as_ref())?;
        if entity.id().is_some() {
            self.client.update(&entity).await
        } else {
            self.client.create(&entity).await
        }
    }

    /// Deletes an entity. Returns `true` on success.
    pub async fn delete(&mut self, id: EntityId) -> bool {
        self.start();
        self.updating = true;

        let result = self.client.delete(id).await;
        self.updating = false;
        match result {
            Ok(()) => {
                self.entity = None;
                self.update_success = true;
                true
            },
            Err(error) => {
                self.record_error("delete", error);
                false
            },
        }
    }

    /// Clears everything, as for a blank "create" screen.
    pub fn reset(&mut self) {
        self.entity = None;
        self.loading = false;
        self.updating = false;
        self.update_success = false;
        self.error = None;
    }

    fn start(&mut self) {
        self.error = None;
        self.update_success = false;
    }

    fn record_error(&mut self, operation: &'static str, error: Error) {
        tracing::debug!(entity = T::NAME, operation, error = %error, "editor operation failed");
        self.error = Some(error);
    }

    /// The loaded or last saved entity.
    pub fn entity(&self) -> Option<&T> {
        self.entity.as_ref()
    }

    /// `true` while [`load`](Self::load) is outstanding.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// `true` while a save or delete is outstanding.
    pub fn updating(&self) -> bool {
        self.updating
    }

    /// `true` after a successful save or delete, until the next operation.
    pub fn update_success(&self) -> bool {
        self.update_success
    }

    /// The error of the last operation, if it failed.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }
}
