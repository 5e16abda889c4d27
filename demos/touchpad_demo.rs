use std::thread::sleep;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vuinput::*;

const WIDTH: i32 = 1920;
const HEIGHT: i32 = 1080;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut pad = TouchPad::create(
        vuinput::config::control_path(),
        "Virtual TouchPad",
        0,
        WIDTH - 1,
        0,
        HEIGHT - 1,
    )?;
    sleep(Duration::from_millis(500));

    // Trace the diagonal with a finger down, then click in the centre
    pad.touch_down()?;
    for i in 0..=20 {
        pad.move_to(i * (WIDTH - 1) / 20, i * (HEIGHT - 1) / 20)?;
        sleep(Duration::from_millis(20));
    }
    pad.touch_up()?;

    pad.move_to(WIDTH / 2, HEIGHT / 2)?;
    pad.left_click()?;
    tracing::info!("Clicked at {}x{}", WIDTH / 2, HEIGHT / 2);

    pad.close()?;
    Ok(())
}
