/// Cross-module scenario tests simulating a full page integration
use crate::{
    Debounce, FileStorage, Language, ManualClock, MemoryStorage, PreferenceStore, Rect,
    RevealConfig, RevealObserver, RootMargin, ScrollSpy, StorageBackend, StorageError, Throttle,
    KEY_DARK_MODE,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Backend that fails every operation, simulating quota exhaustion or a
/// sandboxed environment with storage disabled.
struct FailingStorage;

impl StorageBackend for FailingStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

#[test]
fn preferences_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    // First session: user flips both toggles.
    {
        let mut prefs = PreferenceStore::new(FileStorage::open(&path).unwrap());
        assert!(!prefs.dark_mode());
        assert_eq!(prefs.language(), Language::Es);

        prefs.set_dark_mode(true);
        prefs.set_language(prefs.language().toggled());
    }

    // Second session: both choices come back.
    let prefs = PreferenceStore::new(FileStorage::open(&path).unwrap());
    assert!(prefs.dark_mode());
    assert_eq!(prefs.language(), Language::En);
}

#[test]
fn unavailable_storage_degrades_to_defaults() {
    cov_mark::check!(storage_read_swallowed);
    cov_mark::check!(storage_write_swallowed);

    let mut prefs = PreferenceStore::new(FailingStorage);

    // Writes are swallowed, reads fall back; the page keeps working.
    prefs.set_dark_mode(true);
    assert!(!prefs.dark_mode());
    assert_eq!(prefs.get(KEY_DARK_MODE, "false"), "false");
}

#[test]
fn corrupt_preference_file_fails_open_loudly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "not json {").unwrap();

    assert!(matches!(
        FileStorage::open(&path),
        Err(StorageError::Format(_))
    ));
}

#[test]
fn fade_in_elements_reveal_once_while_scrolling() {
    // Three fade-in elements at increasing page offsets, default config
    // (10% visibility, bottom edge pulled up 50px).
    let mut reveals = RevealObserver::new(RevealConfig::default()).unwrap();
    let revealed = Rc::new(RefCell::new(Vec::new()));
    for id in ["about", "skills", "projects"] {
        let revealed = revealed.clone();
        reveals.observe(id, move || revealed.borrow_mut().push(id));
    }

    let rects = |scroll_y: f64| {
        [
            ("about", Rect::from_size(0.0, 700.0 - scroll_y, 600.0, 200.0)),
            ("skills", Rect::from_size(0.0, 1400.0 - scroll_y, 600.0, 200.0)),
            ("projects", Rect::from_size(0.0, 2100.0 - scroll_y, 600.0, 200.0)),
        ]
    };
    let viewport = Rect::from_size(0.0, 0.0, 800.0, 600.0);

    // Initial paint: nothing qualifies yet ("about" starts below the
    // margin-adjusted bottom edge).
    reveals.sweep(rects(0.0), viewport);
    assert!(revealed.borrow().is_empty());
    assert_eq!(reveals.tracked_len(), 3);

    // Scroll down in steps; each element reveals exactly once and repeated
    // sweeps over already-revealed elements change nothing.
    for scroll_y in [200.0, 400.0, 900.0, 900.0, 1700.0, 1700.0] {
        reveals.sweep(rects(scroll_y), viewport);
    }

    assert_eq!(*revealed.borrow(), vec!["about", "skills", "projects"]);
    assert_eq!(reveals.tracked_len(), 0);
}

#[test]
fn lazy_images_load_with_zero_threshold_and_no_margin() {
    let config = RevealConfig {
        threshold: 0.0,
        root_margin: RootMargin::ZERO,
    };
    let mut loader = RevealObserver::new(config).unwrap();
    let loaded = Rc::new(RefCell::new(Vec::new()));
    for id in ["avatar", "screenshot"] {
        let loaded = loaded.clone();
        loader.observe(id, move || loaded.borrow_mut().push(id));
    }

    let viewport = Rect::from_size(0.0, 0.0, 800.0, 600.0);

    // Avatar is on screen from the start; the screenshot is one full
    // viewport further down and must wait for scroll.
    loader.sweep(
        [
            ("avatar", Rect::from_size(100.0, 100.0, 200.0, 200.0)),
            ("screenshot", Rect::from_size(100.0, 1300.0, 400.0, 300.0)),
        ],
        viewport,
    );
    assert_eq!(*loaded.borrow(), vec!["avatar"]);

    // A single pixel of overlap is enough at threshold 0.
    loader.sweep(
        [("screenshot", Rect::from_size(100.0, 599.0, 400.0, 300.0))],
        viewport,
    );
    assert_eq!(*loaded.borrow(), vec!["avatar", "screenshot"]);
}

#[test]
fn throttled_scroll_handler_drives_spy_and_parallax() {
    let mut spy = ScrollSpy::new();
    spy.add_section("inicio", 0.0);
    spy.add_section("sobre-mi", 800.0);
    spy.add_section("proyectos", 1600.0);

    let clock = ManualClock::new();
    let processed = Rc::new(RefCell::new(Vec::new()));
    let processed_clone = processed.clone();
    let mut on_scroll = Throttle::with_clock(
        Duration::from_millis(100),
        move |scroll_y: f64| processed_clone.borrow_mut().push(scroll_y),
        clock.clone(),
    );

    // A 60Hz-ish scroll flood; the throttle passes one event per window.
    let mut scroll_y = 0.0;
    for _ in 0..12 {
        scroll_y += 150.0;
        on_scroll.call(scroll_y);
        clock.advance(Duration::from_millis(16));
    }

    let processed = processed.borrow();
    assert_eq!(*processed, vec![150.0, 1200.0]);

    // The surviving samples are what the page reacts to.
    assert_eq!(spy.active_section(processed[0]), Some("inicio"));
    assert_eq!(spy.active_section(processed[1]), Some("sobre-mi"));
    assert_eq!(crate::parallax_offset(processed[1], 0.5), 600.0);
    assert!(crate::past(processed[1], 500.0));
}

#[test]
fn debounced_resize_recomputes_layout_once() {
    // Resizing the window fires a storm of events; layout recomputation
    // (section offsets feeding the spy) should happen once, from the final
    // size, after the storm ends.
    let clock = ManualClock::new();
    let spy = Rc::new(RefCell::new(ScrollSpy::new()));
    let rebuilds = Rc::new(RefCell::new(0u32));

    let spy_clone = spy.clone();
    let rebuilds_clone = rebuilds.clone();
    let mut on_resize = Debounce::with_clock(
        Duration::from_millis(100),
        move |viewport_width: f64| {
            *rebuilds_clone.borrow_mut() += 1;
            let mut spy = spy_clone.borrow_mut();
            *spy = ScrollSpy::new();
            // Narrower viewports stack content taller.
            let scale = 1000.0 / viewport_width;
            spy.add_section("inicio", 0.0);
            spy.add_section("proyectos", 800.0 * scale);
        },
        clock.clone(),
    );

    for width in [990.0, 970.0, 940.0, 900.0, 860.0, 800.0] {
        on_resize.call(width);
        clock.advance(Duration::from_millis(20));
        on_resize.poll();
    }
    assert_eq!(*rebuilds.borrow(), 0);

    clock.advance(Duration::from_millis(100));
    assert!(on_resize.poll());
    assert_eq!(*rebuilds.borrow(), 1);
    // Layout was computed from the final width only.
    assert_eq!(spy.borrow().scroll_target("proyectos"), Some(920.0));
}

#[test]
fn toggles_and_reveals_compose_on_one_page() {
    // The full startup sequence: read preferences, apply them, then wire
    // the reveal observer for the visible content.
    let mut prefs = PreferenceStore::new(MemoryStorage::new());
    prefs.set_dark_mode(true);

    let theme_class = if prefs.dark_mode() { "dark-mode" } else { "" };
    assert_eq!(theme_class, "dark-mode");

    let mut reveals = RevealObserver::new(RevealConfig::default()).unwrap();
    let shown = Rc::new(RefCell::new(0u32));
    let shown_clone = shown.clone();
    reveals.observe("hero", move || *shown_clone.borrow_mut() += 1);

    // The language toggle does not disturb visibility tracking.
    prefs.set_language(Language::En);
    assert!(reveals.is_tracked(&"hero"));

    reveals.sweep(
        [("hero", Rect::from_size(0.0, 0.0, 800.0, 400.0))],
        Rect::from_size(0.0, 0.0, 800.0, 600.0),
    );
    assert_eq!(*shown.borrow(), 1);
    assert_eq!(prefs.language(), Language::En);
}
