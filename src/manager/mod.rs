//! Resource manager: list and draft lifecycle for one collection.
//!
//! The manager owns the local copy of a collection and at most one draft.
//! Local state changes only after the server confirms a mutation; a failed
//! operation leaves both the list and the draft as they were. Mutating
//! operations take `&mut self`, so one manager never has two mutations in
//! flight.

use crate::api::{ApiClient, RequestBody, Routes};
use crate::errors::{DeleteError, DraftError, FetchError, SubmitError};
use crate::resource::{Draft, DraftMode, FieldInput, Resource, Schema};

/// Outcome of the most recent load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
    /// Last load failed; the list still holds the previous contents
    Failed(String),
}

/// A delete that has not been confirmed yet.
#[derive(Debug)]
#[must_use = "a delete only runs once confirmed and passed to `ResourceManager::delete`"]
pub struct PendingDelete {
    id: String,
}

impl PendingDelete {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Confirm the destructive step.
    pub fn confirm(self) -> ConfirmedDelete {
        ConfirmedDelete { id: self.id }
    }
}

/// A confirmed delete, ready to send.
#[derive(Debug)]
pub struct ConfirmedDelete {
    id: String,
}

impl ConfirmedDelete {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Client-side controller for one resource type.
#[derive(Debug)]
pub struct ResourceManager<T: Resource> {
    client: ApiClient,
    routes: Routes,
    items: Vec<T>,
    draft: Option<Draft<T>>,
    state: LoadState,
}

impl<T: Resource> ResourceManager<T> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            routes: T::schema().routes,
            items: Vec::new(),
            draft: None,
            state: LoadState::NotLoaded,
        }
    }

    /// Override the schema's default routes.
    pub fn with_routes(mut self, routes: Routes) -> Self {
        self.routes = routes;
        self
    }

    pub fn schema(&self) -> &'static Schema {
        T::schema()
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Items in server order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn draft(&self) -> Option<&Draft<T>> {
        self.draft.as_ref()
    }

    /// Replace the local list with the server's.
    pub async fn load(&mut self) -> Result<&[T], FetchError> {
        let collection = T::schema().collection;
        match self.client.list::<T>(&self.routes).await {
            Ok(items) => {
                tracing::debug!("Loaded {} {}", items.len(), collection);
                self.items = items;
                self.state = LoadState::Loaded;
                Ok(&self.items)
            }
            Err(source) => {
                let err = FetchError { collection, source };
                tracing::warn!("{}", err);
                self.state = LoadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Open `item` for editing, replacing any current draft.
    pub fn begin_edit(&mut self, item: &T) -> &Draft<T> {
        self.draft.insert(Draft::from_resource(item))
    }

    /// Open the local entry with `id` for editing.
    pub fn begin_edit_by_id(&mut self, id: &str) -> Option<&Draft<T>> {
        let draft = Draft::from_resource(self.get(id)?);
        Some(self.draft.insert(draft))
    }

    /// Open an empty create draft, replacing any current draft.
    pub fn begin_create(&mut self) -> &Draft<T> {
        self.draft.insert(Draft::empty())
    }

    pub fn update_draft_field(
        &mut self,
        name: &str,
        value: impl Into<FieldInput>,
    ) -> Result<(), DraftError> {
        self.draft
            .as_mut()
            .ok_or(DraftError::NoDraft)?
            .set(name, value)
    }

    /// Discard the draft. Never touches the network.
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Create the draft on the server and append the result.
    pub async fn submit_create(&mut self) -> Result<T, SubmitError> {
        let draft = self.draft.take().ok_or(SubmitError::NoDraft)?;

        match self.send_create(&draft).await {
            Ok(created) => {
                tracing::info!("Created {} {}", T::schema().collection, created.id());
                self.items.push(created.clone());
                Ok(created)
            }
            Err(e) => {
                tracing::warn!("Failed to create {}: {}", T::schema().collection, e);
                self.draft = Some(draft);
                Err(e)
            }
        }
    }

    /// Send the draft's changes and replace the local entry in place.
    pub async fn submit_update(&mut self) -> Result<T, SubmitError> {
        let draft = self.draft.take().ok_or(SubmitError::NoDraft)?;
        let collection = T::schema().collection;

        let id = match draft.mode() {
            DraftMode::Edit { id } => id.clone(),
            DraftMode::Create => {
                let err = SubmitError::WrongMode {
                    expected: "update",
                    actual: draft.mode().describe(),
                };
                self.draft = Some(draft);
                return Err(err);
            }
        };

        let updated = match self.send_update(&draft, &id).await {
            Ok(updated) => updated,
            Err(e) => {
                tracing::warn!("Failed to update {} {}: {}", collection, id, e);
                self.draft = Some(draft);
                return Err(e);
            }
        };

        match self.items.iter().position(|item| item.id() == id) {
            Some(index) => {
                tracing::info!("Updated {} {}", collection, id);
                self.items[index] = updated.clone();
                Ok(updated)
            }
            None => {
                let err = SubmitError::NotInList { collection, id };
                tracing::warn!("{}", err);
                Err(err)
            }
        }
    }

    /// First step of a delete; nothing is sent until the returned value is
    /// confirmed and passed to [`ResourceManager::delete`].
    pub fn request_delete(&self, id: impl Into<String>) -> PendingDelete {
        PendingDelete { id: id.into() }
    }

    /// Delete on the server and drop the local entry. An id that is already
    /// gone, locally or on the server, counts as deleted.
    pub async fn delete(&mut self, confirmed: ConfirmedDelete) -> Result<(), DeleteError> {
        let ConfirmedDelete { id } = confirmed;
        let collection = T::schema().collection;

        match self.client.delete(&self.routes, &id).await {
            Ok(()) => tracing::info!("Deleted {} {}", collection, id),
            Err(e) if e.is_not_found() => {
                tracing::debug!("{} {} already absent on the server", collection, id)
            }
            Err(source) => {
                let err = DeleteError { id, source };
                tracing::warn!("{}", err);
                return Err(err);
            }
        }

        self.items.retain(|item| item.id() != id);
        if self.draft.as_ref().and_then(|d| d.id()) == Some(id.as_str()) {
            self.draft = None;
        }
        Ok(())
    }

    async fn send_create(&self, draft: &Draft<T>) -> Result<T, SubmitError> {
        if let DraftMode::Edit { .. } = draft.mode() {
            return Err(SubmitError::WrongMode {
                expected: "create",
                actual: draft.mode().describe(),
            });
        }
        let body = self.validated_body(draft)?;
        self.client.create::<T>(&self.routes, body).await
    }

    async fn send_update(&self, draft: &Draft<T>, id: &str) -> Result<T, SubmitError> {
        let body = self.validated_body(draft)?;
        self.client.update::<T>(&self.routes, id, body).await
    }

    fn validated_body(&self, draft: &Draft<T>) -> Result<RequestBody, SubmitError> {
        let missing = draft.missing_required();
        if !missing.is_empty() {
            return Err(SubmitError::Validation { missing });
        }
        Ok(RequestBody::from_draft(draft))
    }
}
