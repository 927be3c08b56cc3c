//! Screen registry.

mod alerts;
mod devices;
mod warehouses;

pub use alerts::AlertsScreen;
pub use devices::DevicesScreen;
pub use warehouses::WarehousesScreen;

use crate::component::Component;
use crate::screen::ScreenId;

/// Instantiate every screen for the app loop.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Devices, Box::new(DevicesScreen::new())),
        (ScreenId::Warehouses, Box::new(WarehousesScreen::new())),
        (ScreenId::Alerts, Box::new(AlertsScreen::new())),
    ]
}
