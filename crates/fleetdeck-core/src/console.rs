// ── Console service ──
//
// Domain-typed operations over the raw API client. Cheaply cloneable via
// `Arc<ConsoleInner>` so the TUI can hand copies to spawned fetch tasks.
// There is no background refresh and no cache: every screen re-fetches, and
// mutations are direct calls followed by an explicit re-fetch on the
// caller's side.

use std::sync::Arc;

use tracing::debug;

use fleetdeck_api::models::{DeviceRecord, WarehouseRecord};
use fleetdeck_api::transport::{TlsMode, TransportConfig};
use fleetdeck_api::ApiClient;

use crate::config::{ConsoleConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{Aggregator, Device, Warehouse, WarehouseStatus};
use crate::query::{DeviceQuery, WarehouseQuery};
use crate::ListPage;

/// The main entry point for consumers.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    api: ApiClient,
}

impl Console {
    /// Build a console from configuration. Fails only on malformed
    /// transport settings; no connection is attempted up front.
    pub fn new(config: &ConsoleConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: tls_to_transport(&config.tls),
            timeout: config.timeout,
            api_key: config.api_key.clone(),
        };
        let api = ApiClient::new(config.api_url.clone(), &transport)?;
        Ok(Self {
            inner: Arc::new(ConsoleInner { api }),
        })
    }

    /// Wrap an existing API client (tests).
    pub fn with_api(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(ConsoleInner { api }),
        }
    }

    // ── Devices ──────────────────────────────────────────────────────

    pub async fn list_devices(&self, query: &DeviceQuery) -> Result<ListPage<Device>, CoreError> {
        let page = self.inner.api.list_devices(&query.to_params()).await?;
        debug!(rows = page.rows.len(), max_page = page.max_page, "device page loaded");
        Ok(ListPage {
            rows: page.rows.into_iter().map(Device::from).collect(),
            max_page: page.max_page,
        })
    }

    pub async fn read_device(&self, id: &str) -> Result<Device, CoreError> {
        Ok(Device::from(self.inner.api.read_device(id).await?))
    }

    pub async fn create_device(&self, payload: &DeviceRecord) -> Result<Device, CoreError> {
        Ok(Device::from(self.inner.api.create_device(payload).await?))
    }

    pub async fn update_device(
        &self,
        id: &str,
        payload: &DeviceRecord,
    ) -> Result<Device, CoreError> {
        Ok(Device::from(self.inner.api.update_device(id, payload).await?))
    }

    pub async fn delete_device(&self, id: &str) -> Result<(), CoreError> {
        Ok(self.inner.api.delete_device(id).await?)
    }

    // ── Warehouses ───────────────────────────────────────────────────

    pub async fn list_warehouses(
        &self,
        query: &WarehouseQuery,
    ) -> Result<ListPage<Warehouse>, CoreError> {
        let page = self.inner.api.list_warehouses(&query.to_params()).await?;
        debug!(rows = page.rows.len(), max_page = page.max_page, "warehouse page loaded");
        Ok(ListPage {
            rows: page.rows.into_iter().map(Warehouse::from).collect(),
            max_page: page.max_page,
        })
    }

    pub async fn read_warehouse(&self, id: &str) -> Result<Warehouse, CoreError> {
        Ok(Warehouse::from(self.inner.api.read_warehouse(id).await?))
    }

    pub async fn create_warehouse(
        &self,
        payload: &WarehouseRecord,
    ) -> Result<Warehouse, CoreError> {
        Ok(Warehouse::from(self.inner.api.create_warehouse(payload).await?))
    }

    pub async fn update_warehouse(
        &self,
        id: &str,
        payload: &WarehouseRecord,
    ) -> Result<Warehouse, CoreError> {
        Ok(Warehouse::from(
            self.inner.api.update_warehouse(id, payload).await?,
        ))
    }

    pub async fn delete_warehouse(&self, id: &str) -> Result<(), CoreError> {
        Ok(self.inner.api.delete_warehouse(id).await?)
    }

    /// Set a warehouse's status via the service's only update path: read the
    /// current record, then resend the full payload with the new status.
    pub async fn set_warehouse_status(
        &self,
        id: &str,
        status: WarehouseStatus,
    ) -> Result<Warehouse, CoreError> {
        let current = self.read_warehouse(id).await?;
        let mut payload = WarehouseRecord::from(&current);
        payload.status = Some(status.to_string());
        debug!(id, %status, "updating warehouse status");
        self.update_warehouse(id, &payload).await
    }

    // ── Aggregators ──────────────────────────────────────────────────

    /// Full aggregator list for the owner-type dependent dropdown.
    /// Fetched once per form mount.
    pub async fn list_aggregators(&self) -> Result<Vec<Aggregator>, CoreError> {
        let page = self.inner.api.list_aggregators().await?;
        Ok(page.rows.into_iter().map(Aggregator::from).collect())
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
