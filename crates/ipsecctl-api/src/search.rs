// Resource search and managed-instance update endpoints.

use tracing::debug;

use crate::client::CloudClient;
use crate::error::Error;
use crate::types::{Collection, ResourceSummary, StructuredSearchDetails, UpdateSummary};

impl CloudClient {
    /// Run a structured search query.
    ///
    /// `POST resources` with `{"type": "Structured", "query": …}`
    pub async fn search_resources(&self, query: &str) -> Result<Vec<ResourceSummary>, Error> {
        debug!(query, "structured resource search");
        let page: Collection<ResourceSummary> = self
            .post("resources", &StructuredSearchDetails::new(query))
            .await?;
        Ok(page.items)
    }

    /// Security updates available to a Windows managed instance.
    ///
    /// `GET managedInstances/{id}/availableWindowsUpdates?classificationType=SECURITY`
    pub async fn list_available_windows_updates(
        &self,
        managed_instance_id: &str,
    ) -> Result<Vec<UpdateSummary>, Error> {
        self.get_all_pages(
            &format!("managedInstances/{managed_instance_id}/availableWindowsUpdates"),
            &[("classificationType", "SECURITY".into())],
            |c: Collection<UpdateSummary>| c.items,
        )
        .await
    }

    /// Security packages updatable on a Linux managed instance.
    ///
    /// `GET managedInstances/{id}/updatablePackages?classificationType=SECURITY`
    pub async fn list_updatable_packages(
        &self,
        managed_instance_id: &str,
    ) -> Result<Vec<UpdateSummary>, Error> {
        self.get_all_pages(
            &format!("managedInstances/{managed_instance_id}/updatablePackages"),
            &[("classificationType", "SECURITY".into())],
            |c: Collection<UpdateSummary>| c.items,
        )
        .await
    }
}
