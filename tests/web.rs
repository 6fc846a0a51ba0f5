// Browser-only tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use creature_guess::{BrowserStorage, KeyValue, ScoreStore, ScoreTally};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let storage = BrowserStorage::new();
    assert!(storage.is_available());
    let mut store = ScoreStore::new(storage);
    let key = "creature-guess-test-round-trip";
    store.save(key, &ScoreTally::new(3, 8)).unwrap();
    assert_eq!(store.load(key, ScoreTally::default()), ScoreTally::new(3, 8));
}

#[wasm_bindgen_test]
fn local_storage_unknown_key_uses_default() {
    let store = ScoreStore::new(BrowserStorage::new());
    let d = ScoreTally::new(1, 2);
    assert_eq!(store.load("creature-guess-test-never-written", d), d);
}

#[wasm_bindgen_test]
fn corrupt_slot_falls_back() {
    let mut raw = BrowserStorage::new();
    raw.set("creature-guess-test-corrupt", "{oops").unwrap();
    let store = ScoreStore::new(raw);
    assert_eq!(
        store.load("creature-guess-test-corrupt", ScoreTally::default()),
        ScoreTally::default()
    );
}
