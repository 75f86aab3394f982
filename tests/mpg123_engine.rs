//! Smoke tests against the real libmpg123 backend.
//!
//! These keep their assertions conservative: no fixture MP3 data is
//! shipped, so they only pin down the pre-format behavior every libmpg123
//! build shares.

#![cfg(feature = "mpg123")]

use streamdec::{FormatChange, Mpg123Engine, SessionRegistry};

#[test]
fn engine_instances_come_up_and_tear_down() {
    // Two at once also exercises the once-only library setup.
    let first = Mpg123Engine::new().expect("create first engine");
    let second = Mpg123Engine::new().expect("create second engine");
    drop(first);
    drop(second);
}

#[test]
fn session_over_real_engine_opens_and_closes() {
    let mut registry = SessionRegistry::new();
    let handle = registry.open(|_: FormatChange| {}).expect("open session");
    assert!(registry.is_open(handle));
    registry.close(handle);
    assert!(!registry.is_open(handle));
}

#[test]
fn empty_input_before_format_is_not_an_error() {
    let mut registry = SessionRegistry::new();
    let handle = registry.open(|_: FormatChange| {}).expect("open session");

    let mut out = [0u8; 8192];
    assert_eq!(registry.decode(handle, &[], &mut out), 0);
    assert_eq!(registry.format(handle), None);
    registry.close(handle);
}

#[test]
fn junk_input_never_reports_a_positive_count_before_format() {
    let mut registry = SessionRegistry::new();
    let handle = registry.open(|_: FormatChange| {}).expect("open session");

    // No sync word anywhere in this, so the engine keeps scanning.
    let junk = [0u8; 512];
    let mut out = [0u8; 8192];
    for _ in 0..4 {
        let status = registry.decode(handle, &junk, &mut out);
        assert!(status <= 0, "junk produced a byte count: {}", status);
    }
    registry.close(handle);
}
