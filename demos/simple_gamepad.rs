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

    let path = vuinput::config::control_path();
    let mut pad = Gamepad::create(&path, "Virtual Gamepad")?;
    tracing::info!("Created gamepad through {}", path.display());

    // Give userspace a moment to pick up the new device node
    sleep(Duration::from_millis(500));

    tracing::info!("Pressing A");
    pad.button_down(Button::A)?;
    sleep(Duration::from_millis(100));
    pad.button_up(Button::A)?;

    tracing::info!("Sweeping left stick");
    for step in -4..=4 {
        pad.set_axis(step * 8000, -step * 8000)?;
        sleep(Duration::from_millis(50));
    }
    pad.set_axis(0, 0)?;
    pad.set_axis_r(0, 0)?;

    pad.close()?;
    tracing::info!("Done");

    Ok(())
}
