//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use orbital_core::{Color, GravityMode, ShapeKind};
use orbital_shapes::config::AppConfig;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;

/// Fresh config directory under the system temp dir
fn temp_config_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("orbital_config_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_shipped_defaults_load() {
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Orbital Shapes");
    assert_eq!(config.sketch.gravity_strength, 2.5);
    assert_eq!(config.sketch.spawn_drift, 0.5);
    assert_eq!(config.simulation.tick_rate, 30.0);
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("ORBITAL_WINDOW__TITLE", "Test From Env");
    std::env::set_var("ORBITAL_SKETCH__GRAVITY_STRENGTH", "4.5");
    let config = AppConfig::load_from(temp_config_dir("env"));
    std::env::remove_var("ORBITAL_WINDOW__TITLE");
    std::env::remove_var("ORBITAL_SKETCH__GRAVITY_STRENGTH");

    let config = config.unwrap();
    assert_eq!(config.window.title, "Test From Env");
    assert_eq!(config.sketch.gravity_strength, 4.5);
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = temp_config_dir("user");
    fs::write(
        dir.join("default.toml"),
        "[sketch]\nshape_size = 30.0\nselected_kind = \"square\"\n",
    )
    .unwrap();
    fs::write(
        dir.join("user.toml"),
        "[sketch]\nshape_size = 45.0\nbackground = \"#203040\"\ngravity_mode = \"reciprocal\"\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.sketch.shape_size, 45.0);
    assert_eq!(config.sketch.selected_kind, ShapeKind::Square);
    assert_eq!(config.sketch.background, Color::rgb(0x20, 0x30, 0x40));
    assert_eq!(config.sketch.gravity_mode, GravityMode::Reciprocal);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_loaded_values_are_sanitized() {
    let dir = temp_config_dir("sanitize");
    fs::write(
        dir.join("default.toml"),
        "[sketch]\ngravity_strength = -3.0\nrestitution = 7.0\n\n[simulation]\ntick_rate = 0.0\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert!(config.sketch.gravity_strength >= 0.0);
    assert!(config.sketch.restitution <= 1.0);
    assert_eq!(config.simulation.tick_rate, 30.0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from(std::env::temp_dir().join("orbital_config_does_not_exist")).unwrap();
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.sketch.shape_size, 20.0);
}

#[test]
#[serial]
fn test_malformed_file_is_an_error() {
    let dir = temp_config_dir("malformed");
    fs::write(dir.join("default.toml"), "[sketch]\nshape_size = \"huge\"\n").unwrap();

    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));

    let _ = fs::remove_dir_all(&dir);
}
