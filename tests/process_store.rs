use lazyconf::core::source::DATABASE_CONNECTION;
use lazyconf::{init_settings_store, settings_store, StoreConfig};
use std::ptr;

// The process-wide store is a single OnceLock, so everything touching it
// lives in this one test.
#[test]
fn process_wide_store_is_installed_once() {
    let installed = init_settings_store(&StoreConfig::with_load_delay_ms(0));
    assert!(!installed.is_loaded());

    let again = init_settings_store(&StoreConfig::with_load_delay_ms(5_000));
    assert!(ptr::eq(installed, again));
    assert!(ptr::eq(installed, settings_store()));
    assert!(installed.source().delay().is_zero());

    assert_eq!(
        settings_store().get_setting(DATABASE_CONNECTION).unwrap().as_deref(),
        Some("Server=localhost;Database=MyApp;")
    );
    assert_eq!(installed.load_count(), 1);
}
