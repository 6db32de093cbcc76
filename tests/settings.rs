use std::fs;

use glam::Vec2;
use ricktcal::settings::{Channel, POSITIONS_FILE, Positions, SETTINGS_FILE, Settings};
use tempfile::TempDir;

// ── Settings ─────────────────────────────────────────────────────────────────

#[test]
fn missing_file_gives_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let settings = Settings::load(dir.path().join(SETTINGS_FILE));
    assert_eq!(settings.bgm_volume, 0.7);
    assert_eq!(settings.sfx_volume, 0.8);
    assert!(settings.path().is_some());
}

#[test]
fn malformed_file_gives_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(SETTINGS_FILE);
    fs::write(&path, "{ not json").expect("write");
    let settings = Settings::load(&path);
    assert_eq!((settings.bgm_volume, settings.sfx_volume), (0.7, 0.8));
    assert_eq!(settings.path(), Some(path.as_path()));
}

#[test]
fn partial_file_fills_in_defaults_and_clamps() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(SETTINGS_FILE);
    fs::write(&path, r#"{ "bgm_volume": 3.5 }"#).expect("write");
    let settings = Settings::load(&path);
    assert_eq!(settings.bgm_volume, 1.0);
    assert_eq!(settings.sfx_volume, 0.8);
}

#[test]
fn set_volume_saves_to_disk() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nested").join(SETTINGS_FILE);
    let mut settings = Settings::load(&path);
    settings.set_volume(Channel::Sfx, 0.25);

    let reloaded = Settings::load(&path);
    assert_eq!(reloaded.sfx_volume, 0.25);
    assert_eq!(reloaded.bgm_volume, 0.7);
}

#[test]
fn nudge_snaps_to_tenths_and_clamps() {
    let mut settings = Settings::default();
    settings.nudge_volume(Channel::Bgm, 0.1);
    assert!((settings.bgm_volume - 0.8).abs() < 1e-6);
    for _ in 0..5 {
        settings.nudge_volume(Channel::Bgm, 0.1);
    }
    assert_eq!(settings.volume(Channel::Bgm), 1.0);
    for _ in 0..20 {
        settings.nudge_volume(Channel::Sfx, -0.1);
    }
    assert_eq!(settings.volume(Channel::Sfx), 0.0);
}

#[test]
fn in_memory_settings_save_nowhere() {
    let settings = Settings::default();
    assert!(settings.path().is_none());
    assert!(settings.save().is_ok());
}

// ── Positions ────────────────────────────────────────────────────────────────

#[test]
fn default_positions_cover_the_cast() {
    let p = Positions::default();
    assert_eq!(p.get("erpin"), Vec2::new(600.0, 50.0));
    assert_eq!(p.get("sherum"), Vec2::new(100.0, 300.0));
    assert_eq!(p.get("joanne"), Vec2::new(350.0, 50.0));
}

#[test]
fn unknown_name_is_placed_at_origin() {
    assert_eq!(Positions::default().get("nobody"), Vec2::ZERO);
}

#[test]
fn positions_load_from_json_keyed_by_name() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(POSITIONS_FILE);
    fs::write(&path, r#"{ "erpin": { "x": 10, "y": 20 } }"#).expect("write");
    let p = Positions::load(&path);
    assert_eq!(p.get("erpin"), Vec2::new(10.0, 20.0));
    assert_eq!(p.get("sherum"), Vec2::ZERO);
}

#[test]
fn missing_positions_file_gives_defaults() {
    let dir = TempDir::new().expect("temp dir");
    assert_eq!(Positions::load(&dir.path().join(POSITIONS_FILE)), Positions::default());
}
