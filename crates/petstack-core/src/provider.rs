//! Owner registry business logic.
//!
//! The provider owns the two collaborator handles and implements the five
//! data operations. Inputs are already validated; everything here is about
//! talking to the stores in the right order and shaping their results.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use petstack_model::attribute_value::Item;
use petstack_model::error::OwnerError;
use petstack_model::input::{DeleteOwnerInput, GetOwnerInput, ModifyOwnerInput, SaveOwnerInput};
use petstack_model::output::{
    DeleteOwnerOutput, ListOwnersOutput, ModifyOwnerOutput, SaveOwnerOutput,
};

use crate::config::{OwnerServiceConfig, valid_bucket_name};
use crate::pagination::scan_all;
use crate::signer::{SignedOperation, UrlSigner};
use crate::store::OwnerStore;

/// Validity of the upload and download URLs minted on create.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(3600);

/// The owner registry.
pub struct OwnerProvider {
    store: Arc<dyn OwnerStore>,
    signer: Arc<dyn UrlSigner>,
    upload_bucket: Option<String>,
}

impl std::fmt::Debug for OwnerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnerProvider")
            .field("upload_bucket", &self.upload_bucket)
            .finish_non_exhaustive()
    }
}

impl OwnerProvider {
    /// Create a provider over the given collaborators.
    pub fn new(
        store: Arc<dyn OwnerStore>,
        signer: Arc<dyn UrlSigner>,
        config: &OwnerServiceConfig,
    ) -> Self {
        Self {
            store,
            signer,
            upload_bucket: config.bucket_name.clone(),
        }
    }

    /// Look up one owner.
    #[instrument(skip(self), fields(owner_id = %input.owner_id))]
    pub async fn handle_get_owner(&self, input: GetOwnerInput) -> Result<Option<Item>, OwnerError> {
        Ok(self.store.get_item(&input.key()).await?)
    }

    /// Scan every owner across all pages.
    #[instrument(skip(self))]
    pub async fn handle_list_owners(&self) -> Result<ListOwnersOutput, OwnerError> {
        let owners = scan_all(self.store.as_ref()).await?;
        info!(count = owners.len(), "listed owners");
        Ok(ListOwnersOutput { owners })
    }

    /// Mint the upload and download URLs, then persist the owner.
    ///
    /// Nothing is signed or written when the bucket is unusable, and nothing
    /// is written when either URL fails.
    #[instrument(skip(self, input), fields(file_name = %input.upload.file_name))]
    pub async fn handle_save_owner(
        &self,
        input: SaveOwnerInput,
    ) -> Result<SaveOwnerOutput, OwnerError> {
        let bucket = valid_bucket_name(self.upload_bucket.as_deref())
            .ok_or_else(OwnerError::bucket_not_configured)?;
        let SaveOwnerInput { record, upload } = input;

        let upload_url = self
            .signer
            .presign(
                bucket,
                &upload.file_name,
                SignedOperation::Write,
                Some(upload.file_type.as_str()),
                SIGNED_URL_TTL,
            )
            .await?;
        let file_url = self
            .signer
            .presign(
                bucket,
                &upload.file_name,
                SignedOperation::Read,
                None,
                SIGNED_URL_TTL,
            )
            .await?;

        self.store.put_item(record.clone()).await?;
        info!("saved owner");

        Ok(SaveOwnerOutput::new(record, upload_url, file_url))
    }

    /// Set one attribute on an owner.
    #[instrument(skip(self, input), fields(update_key = %input.update_key))]
    pub async fn handle_modify_owner(
        &self,
        input: ModifyOwnerInput,
    ) -> Result<ModifyOwnerOutput, OwnerError> {
        let updated = self
            .store
            .update_item(&input.owner_id, &input.update_key, input.update_value)
            .await?;
        Ok(ModifyOwnerOutput::new(updated))
    }

    /// Remove an owner, returning its last values.
    #[instrument(skip(self, input))]
    pub async fn handle_delete_owner(
        &self,
        input: DeleteOwnerInput,
    ) -> Result<DeleteOwnerOutput, OwnerError> {
        let prior = self.store.delete_item(&input.owner_id).await?;
        info!(existed = prior.is_some(), "deleted owner");
        Ok(DeleteOwnerOutput::new(prior))
    }
}
