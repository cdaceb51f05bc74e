//! Browser tests, run with `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use cozyterm::prefs::{LocalStorage, PreferenceStore};
use cozyterm::theme::{Theme, ThemeManager};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const KEY: &str = "cozyterm-theme-test";

#[wasm_bindgen_test]
fn test_local_storage_roundtrip() {
    let mut store = LocalStorage::open();
    store.set(KEY, "rainy").unwrap();
    assert_eq!(LocalStorage::open().get(KEY).as_deref(), Some("rainy"));
}

#[wasm_bindgen_test]
fn test_theme_survives_reload() {
    let mut manager = ThemeManager::load(Box::new(LocalStorage::open()), KEY);
    manager.set(Theme::Rainy);

    let reloaded = ThemeManager::load(Box::new(LocalStorage::open()), KEY);
    assert_eq!(reloaded.current(), Theme::Rainy);

    let mut manager = reloaded;
    manager.set(Theme::Meadow);
}
