//! Handler bridging the HTTP layer to the owner provider.

use std::sync::Arc;

use async_trait::async_trait;

use petstack_http::dispatch::OwnerHandler;
use petstack_model::attribute_value::Item;
use petstack_model::error::OwnerError;
use petstack_model::input::{DeleteOwnerInput, GetOwnerInput, ModifyOwnerInput, SaveOwnerInput};
use petstack_model::output::{
    DeleteOwnerOutput, ListOwnersOutput, ModifyOwnerOutput, SaveOwnerOutput,
};

use crate::provider::OwnerProvider;

/// [`OwnerHandler`] backed by an [`OwnerProvider`].
#[derive(Debug, Clone)]
pub struct OwnerServiceHandler {
    provider: Arc<OwnerProvider>,
}

impl OwnerServiceHandler {
    /// Create a new handler wrapping a provider.
    #[must_use]
    pub fn new(provider: Arc<OwnerProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl OwnerHandler for OwnerServiceHandler {
    async fn get_owner(&self, input: GetOwnerInput) -> Result<Option<Item>, OwnerError> {
        self.provider.handle_get_owner(input).await
    }

    async fn list_owners(&self) -> Result<ListOwnersOutput, OwnerError> {
        self.provider.handle_list_owners().await
    }

    async fn save_owner(&self, input: SaveOwnerInput) -> Result<SaveOwnerOutput, OwnerError> {
        self.provider.handle_save_owner(input).await
    }

    async fn modify_owner(&self, input: ModifyOwnerInput) -> Result<ModifyOwnerOutput, OwnerError> {
        self.provider.handle_modify_owner(input).await
    }

    async fn delete_owner(&self, input: DeleteOwnerInput) -> Result<DeleteOwnerOutput, OwnerError> {
        self.provider.handle_delete_owner(input).await
    }
}
