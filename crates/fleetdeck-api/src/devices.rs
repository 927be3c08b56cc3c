// Device endpoints
//
// CRUD over /device/*. List results come back one server page at a time;
// the caller owns pagination state.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{DeviceListParams, DeviceRecord, ListPage};

impl ApiClient {
    /// List devices for one page of results.
    ///
    /// `GET /device/list?search=&offset=&limit=&fieldEngineerId=&locationType=`
    pub async fn list_devices(
        &self,
        params: &DeviceListParams,
    ) -> Result<ListPage<DeviceRecord>, Error> {
        let url = self.endpoint_url("device/list")?;
        debug!(offset = params.offset, limit = params.limit, "listing devices");
        self.get_list(url, params).await
    }

    /// Fetch a single device by id.
    ///
    /// `GET /device/read/{id}`
    pub async fn read_device(&self, id: &str) -> Result<DeviceRecord, Error> {
        let url = self.endpoint_url(&format!("device/read/{id}"))?;
        self.get_one(url).await
    }

    /// Create a device.
    ///
    /// `POST /device/create`
    pub async fn create_device(&self, payload: &DeviceRecord) -> Result<DeviceRecord, Error> {
        let url = self.endpoint_url("device/create")?;
        debug!(imei = %payload.imei, "creating device");
        self.post(url, payload).await
    }

    /// Update a device. The payload carries every field, changed or not.
    ///
    /// `PUT /device/update/{id}`
    pub async fn update_device(
        &self,
        id: &str,
        payload: &DeviceRecord,
    ) -> Result<DeviceRecord, Error> {
        let url = self.endpoint_url(&format!("device/update/{id}"))?;
        debug!(id, "updating device");
        self.put(url, payload).await
    }

    /// Delete a device.
    ///
    /// `DELETE /device/delete/{id}`
    pub async fn delete_device(&self, id: &str) -> Result<(), Error> {
        let url = self.endpoint_url(&format!("device/delete/{id}"))?;
        debug!(id, "deleting device");
        self.delete(url).await
    }
}
