use std::thread::sleep;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vuinput::protocol::*;
use vuinput::Keyboard;

/// US layout only. Returns the key and whether shift is needed.
fn key_for(c: char) -> Option<(u16, bool)> {
    const LETTERS: [u16; 26] = [
        KEY_A, KEY_B, KEY_C, KEY_D, KEY_E, KEY_F, KEY_G, KEY_H, KEY_I, KEY_J, KEY_K, KEY_L,
        KEY_M, KEY_N, KEY_O, KEY_P, KEY_Q, KEY_R, KEY_S, KEY_T, KEY_U, KEY_V, KEY_W, KEY_X,
        KEY_Y, KEY_Z,
    ];
    const DIGITS: [u16; 10] = [
        KEY_0, KEY_1, KEY_2, KEY_3, KEY_4, KEY_5, KEY_6, KEY_7, KEY_8, KEY_9,
    ];

    match c {
        'a'..='z' => Some((LETTERS[c as usize - 'a' as usize], false)),
        'A'..='Z' => Some((LETTERS[c as usize - 'A' as usize], true)),
        '0'..='9' => Some((DIGITS[c as usize - '0' as usize], false)),
        ' ' => Some((KEY_SPACE, false)),
        '\n' => Some((KEY_ENTER, false)),
        ',' => Some((KEY_COMMA, false)),
        '.' => Some((KEY_DOT, false)),
        '-' => Some((KEY_MINUS, false)),
        '!' => Some((KEY_1, true)),
        '?' => Some((KEY_SLASH, true)),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Hello from vuinput!\n".to_string());

    let mut keyboard = Keyboard::create(vuinput::config::control_path(), "Virtual Keyboard")?;
    sleep(Duration::from_millis(500));

    for c in text.chars() {
        match key_for(c) {
            Some((key, true)) => keyboard.key_combo(&[KEY_LEFTSHIFT, key])?,
            Some((key, false)) => keyboard.key_press(key)?,
            None => tracing::warn!("No key for {:?}, skipping", c),
        }
        sleep(Duration::from_millis(15));
    }

    keyboard.close()?;
    Ok(())
}
