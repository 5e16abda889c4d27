use std::path::PathBuf;
use ulid::Ulid;
use vuinput::config::{load_device_config, save_device_config};
use vuinput::manager::mock::MockHandle;
use vuinput::protocol::*;
use vuinput::{DeviceTemplates, VirtualDevice};

fn temp_config_path() -> PathBuf {
    std::env::temp_dir().join(format!("vuinput-{}.json", Ulid::new()))
}

#[test]
fn saved_template_loads_back() {
    let path = temp_config_path();
    let config = DeviceTemplates::touchpad("Saved TouchPad", 0, 1919, 0, 1079);

    save_device_config(&path, &config).unwrap();
    let loaded = load_device_config(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn loaded_config_drives_a_device() {
    let path = temp_config_path();
    std::fs::write(
        &path,
        r#"{
            "name": "Arcade Stick",
            "vendor_id": 4711,
            "product_id": 2071,
            "version": 1,
            "keys": [304, 305],
            "axes": [
                { "axis": "X", "min": -1, "max": 1 },
                { "axis": "Y", "min": -1, "max": 1 }
            ]
        }"#,
    )
    .unwrap();
    let config = load_device_config(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let (handle, recorder) = MockHandle::new();
    let mut device = VirtualDevice::from_handle(handle, config).unwrap();
    device.batch("tap").press(BTN_SOUTH).abs(ABS_X, -1).commit().unwrap();

    assert_eq!(recorder.event_batches()[0].len(), 3);
    assert!(device.capabilities().contains(EV_KEY, BTN_EAST));
    assert!(!device.capabilities().contains(EV_ABS, ABS_RX));
}

#[test]
fn missing_file_names_the_path() {
    let path = temp_config_path();
    let err = load_device_config(&path).unwrap_err();
    assert!(format!("{err:#}").contains(&path.display().to_string()));
}

#[test]
fn broken_file_is_rejected() {
    let path = temp_config_path();
    std::fs::write(&path, "{ not json").unwrap();
    let result = load_device_config(&path);
    std::fs::remove_file(&path).unwrap();

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("Invalid device configuration"));
}
