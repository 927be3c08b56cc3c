// Warehouse endpoints
//
// CRUD over /warehouse/*. Status changes are plain full-payload updates;
// there is no dedicated status endpoint.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ListPage, WarehouseListParams, WarehouseRecord};

impl ApiClient {
    /// List warehouses for one page of results.
    ///
    /// `GET /warehouse/list?search=&offset=&limit=&warehouseType=&warehouseOwnerType=`
    pub async fn list_warehouses(
        &self,
        params: &WarehouseListParams,
    ) -> Result<ListPage<WarehouseRecord>, Error> {
        let url = self.endpoint_url("warehouse/list")?;
        debug!(offset = params.offset, limit = params.limit, "listing warehouses");
        self.get_list(url, params).await
    }

    /// Fetch a single warehouse by id.
    ///
    /// `GET /warehouse/read/{id}`
    pub async fn read_warehouse(&self, id: &str) -> Result<WarehouseRecord, Error> {
        let url = self.endpoint_url(&format!("warehouse/read/{id}"))?;
        self.get_one(url).await
    }

    /// Create a warehouse.
    ///
    /// `POST /warehouse/create`
    pub async fn create_warehouse(
        &self,
        payload: &WarehouseRecord,
    ) -> Result<WarehouseRecord, Error> {
        let url = self.endpoint_url("warehouse/create")?;
        debug!(code = %payload.code, "creating warehouse");
        self.post(url, payload).await
    }

    /// Update a warehouse. The payload carries every field, changed or not.
    ///
    /// `PUT /warehouse/update/{id}`
    pub async fn update_warehouse(
        &self,
        id: &str,
        payload: &WarehouseRecord,
    ) -> Result<WarehouseRecord, Error> {
        let url = self.endpoint_url(&format!("warehouse/update/{id}"))?;
        debug!(id, "updating warehouse");
        self.put(url, payload).await
    }

    /// Delete a warehouse.
    ///
    /// `DELETE /warehouse/delete/{id}`
    pub async fn delete_warehouse(&self, id: &str) -> Result<(), Error> {
        let url = self.endpoint_url(&format!("warehouse/delete/{id}"))?;
        debug!(id, "deleting warehouse");
        self.delete(url).await
    }
}
