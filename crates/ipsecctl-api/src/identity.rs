// Identity endpoints
//
// Compartments are listed from the tenancy root with the subtree flag so
// a single paginated walk covers the whole hierarchy.

use std::convert::identity;

use tracing::debug;

use crate::client::CloudClient;
use crate::error::Error;
use crate::types::{AvailabilityDomain, Compartment};

impl CloudClient {
    /// List every compartment below `parent_id` (all pages, whole subtree).
    ///
    /// `GET compartments?compartmentId={parent}&compartmentIdInSubtree=true`
    pub async fn list_compartments(&self, parent_id: &str) -> Result<Vec<Compartment>, Error> {
        debug!(parent_id, "listing compartments");
        self.get_all_pages(
            "compartments",
            &[
                ("compartmentId", parent_id.to_owned()),
                ("compartmentIdInSubtree", "true".into()),
                ("accessLevel", "ANY".into()),
            ],
            identity,
        )
        .await
    }

    /// List the availability domains visible to the tenancy.
    ///
    /// `GET availabilityDomains?compartmentId={tenancy}`
    pub async fn list_availability_domains(
        &self,
        tenancy_id: &str,
    ) -> Result<Vec<AvailabilityDomain>, Error> {
        self.get(
            "availabilityDomains",
            &[("compartmentId", tenancy_id.to_owned())],
        )
        .await
    }
}
