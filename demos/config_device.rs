//! Creates a device from a JSON description, e.g.
//!
//! ```json
//! {
//!   "name": "Arcade Stick",
//!   "vendor_id": 4711,
//!   "product_id": 2071,
//!   "version": 1,
//!   "keys": [304, 305, 307, 308],
//!   "axes": [
//!     { "axis": "X", "min": -1, "max": 1 },
//!     { "axis": "Y", "min": -1, "max": 1 }
//!   ]
//! }
//! ```

use anyhow::Context;
use std::thread::sleep;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vuinput::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .context("usage: config_device <device.json>")?;
    let config = vuinput::config::load_device_config(&config_path)?;
    tracing::info!(
        "Loaded {:?}: {} keys, {} axes, {} relative axes",
        config.name,
        config.keys.len(),
        config.axes.len(),
        config.rel_axes.len()
    );

    let mut device = VirtualDevice::create(vuinput::config::control_path(), config)?;
    sleep(Duration::from_millis(500));

    // Tap every declared key once
    let keys = device.config().keys.clone();
    for key in keys {
        device.batch("tap").press(key).commit()?;
        device.batch("tap").release(key).commit()?;
        sleep(Duration::from_millis(50));
    }

    device.destroy()?;
    Ok(())
}
