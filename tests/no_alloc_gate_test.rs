use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_concentration::core::{EngineConfig, GameSnapshot, MatchEngine};
use tui_concentration::input::{handle_key_event, Cursor};
use tui_concentration::types::TICK_MS;

use crossterm::event::{KeyCode, KeyEvent};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn idle_frame_paths_do_not_allocate() {
    let deck: Vec<u32> = (0..8).flat_map(|id| [id, id]).collect();
    let mut engine = MatchEngine::new(4, 4, &deck, EngineConfig::default()).unwrap();
    let mut snap = GameSnapshot::default();
    let mut cursor = Cursor::default();

    // Warm-up: start the clock and size the snapshot buffer.
    engine.select(0);
    engine.snapshot_into(&mut snap);

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            let _ = engine.tick(TICK_MS);
            engine.snapshot_into(&mut snap);

            // Re-selecting the face-up card is a no-op.
            let _ = engine.select(0);
            let _ = engine.select(99);

            if let Some(action) = handle_key_event(KeyEvent::from(KeyCode::Right)) {
                cursor.apply(action, 4, 4);
            }
        }
    });

    assert_eq!(allocs, 0);
    assert!(engine.elapsed_ms() >= u64::from(TICK_MS) * 200);
}
