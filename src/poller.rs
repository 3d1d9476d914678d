//! Poll loop: one dedicated thread ticking at a fixed cadence.
//!
//! Each tick reads a fresh snapshot, publishes it for foreground command
//! handlers, diffs it against the previous one, runs the proximity engine,
//! and hands the merged, sorted, de-duplicated event list to the sink.
//! All tracker state is owned exclusively by the poll thread; the published
//! snapshot slot is the only cross-thread resource.

use log::{info, warn};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::io::Write;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::events::EventDetector;
use crate::geometry::GeometryStore;
use crate::memory::{read_snapshot, MemoryReader};
use crate::proximity::ProximityEngine;
use crate::snapshot::Snapshot;
use crate::types::{BridgeConfig, BridgeError, BridgeStats, Event, EventKind, Result};

/// Seconds allowed for the poll thread to wind down on stop.
const STOP_TIMEOUT: f64 = 2.0;

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Receives the ordered event list once per tick.  Implementations must not
/// mutate events; they only get a borrowed slice.
pub trait EventSink: Send {
    fn deliver(&mut self, events: &[Event]);
}

/// Line-oriented sink suitable for a screen reader: one flushed line per
/// message line.
pub struct LineSink {
    diagnostics: bool,
}

impl LineSink {
    pub fn new(diagnostics: bool) -> Self {
        Self { diagnostics }
    }
}

impl EventSink for LineSink {
    fn deliver(&mut self, events: &[Event]) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for event in events {
            let diag = self.diagnostics
                && matches!(event.kind, EventKind::Proximity | EventKind::Facing)
                && !event.data.is_null();
            let result = if diag {
                writeln!(out, "  [DIAG] {} | {}", event.message, event.data)
            } else {
                writeln!(out, "{}", event.message)
            };
            if result.is_err() {
                return;
            }
        }
        let _ = out.flush();
    }
}

// ---------------------------------------------------------------------------
// Event merge
// ---------------------------------------------------------------------------

/// Output sort rank: blocked movement first, combat alerts second, the rest
/// in arrival order.
pub fn sort_rank(kind: EventKind) -> u8 {
    match kind {
        EventKind::Blocked => 0,
        EventKind::EnemyNearby
        | EventKind::DamageTaken
        | EventKind::LowHealth
        | EventKind::NearPit
        | EventKind::Death => 1,
        _ => 2,
    }
}

/// Stable-sort by rank and drop repeated message texts, preserving order.
pub fn merge_events(mut events: Vec<Event>) -> Vec<Event> {
    events.sort_by_key(|e| sort_rank(e.kind));
    let mut seen: HashSet<String> = HashSet::new();
    events.retain(|e| seen.insert(e.message.clone()));
    events
}

// ---------------------------------------------------------------------------
// Poller
// ---------------------------------------------------------------------------

struct SharedState {
    snapshot: Mutex<Option<Arc<Snapshot>>>,
    stats: Mutex<BridgeStats>,
    running: AtomicBool,
}

/// Drives the tick loop on a dedicated thread.
pub struct Poller {
    config: BridgeConfig,
    reader: Arc<dyn MemoryReader>,
    geometry: Option<Arc<GeometryStore>>,
    shared: Arc<SharedState>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Poller {
    pub fn new(
        config: BridgeConfig,
        reader: Arc<dyn MemoryReader>,
        geometry: Option<Arc<GeometryStore>>,
    ) -> Self {
        Self {
            config,
            reader,
            geometry,
            shared: Arc::new(SharedState {
                snapshot: Mutex::new(None),
                stats: Mutex::new(BridgeStats::default()),
                running: AtomicBool::new(false),
            }),
            handle: None,
        }
    }

    /// Latest published snapshot, readable from any thread.
    pub fn latest_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.shared.snapshot.lock().clone()
    }

    pub fn stats(&self) -> BridgeStats {
        self.shared.stats.lock().clone()
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Spawn the poll thread.
    pub fn start(&mut self, sink: Box<dyn EventSink>) -> Result<()> {
        if self.handle.is_some() {
            return Err(BridgeError::AlreadyRunning);
        }
        self.shared.running.store(true, Ordering::SeqCst);

        let config = self.config.clone();
        let reader = self.reader.clone();
        let geometry = self.geometry.clone();
        let shared = self.shared.clone();

        let handle = thread::Builder::new()
            .name("bridge-poll".into())
            .spawn(move || run_loop(config, reader, geometry, shared, sink))?;
        self.handle = Some(handle);
        info!("poll loop started at {:.0} Hz", self.config.poll_hz);
        Ok(())
    }

    /// Cooperative stop: clear the running flag, then join with a bound.
    /// The memory client's own read timeout keeps any in-flight tick short.
    pub fn stop(&mut self) -> Result<()> {
        self.shared.running.store(false, Ordering::SeqCst);
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        let deadline = Instant::now() + Duration::from_secs_f64(STOP_TIMEOUT);
        while !handle.is_finished() {
            if Instant::now() >= deadline {
                self.handle = Some(handle);
                return Err(BridgeError::StopTimeout(STOP_TIMEOUT));
            }
            thread::sleep(Duration::from_millis(10));
        }
        let _ = handle.join();
        info!("poll loop stopped");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Loop body
// ---------------------------------------------------------------------------

fn run_loop(
    config: BridgeConfig,
    reader: Arc<dyn MemoryReader>,
    geometry: Option<Arc<GeometryStore>>,
    shared: Arc<SharedState>,
    mut sink: Box<dyn EventSink>,
) {
    let started = Instant::now();
    let interval = Duration::from_secs_f64(1.0 / config.poll_hz);
    let mut engine = ProximityEngine::new(Some(reader.clone()));
    let mut detector = EventDetector::new(config.blocked_threshold);
    let mut prev: Option<Arc<Snapshot>> = None;

    while shared.running.load(Ordering::SeqCst) {
        // A fault in one tick must never kill the loop: a frozen bridge is
        // worse for the player than one skipped update.
        let tick = catch_unwind(AssertUnwindSafe(|| {
            run_tick(
                &*reader, &geometry, &shared, &mut engine, &mut detector, &mut prev,
                sink.as_mut(), started,
            );
        }));
        if tick.is_err() {
            warn!("poll tick panicked; continuing with the next tick");
        }
        thread::sleep(interval);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_tick(
    reader: &dyn MemoryReader,
    geometry: &Option<Arc<GeometryStore>>,
    shared: &SharedState,
    engine: &mut ProximityEngine,
    detector: &mut EventDetector,
    prev: &mut Option<Arc<Snapshot>>,
    sink: &mut dyn EventSink,
    started: Instant,
) {
    let now = started.elapsed().as_secs_f64();
    let snapshot = Arc::new(read_snapshot(reader, geometry.clone(), now));

    // An unreadable primary mode means the emulator is mid-load or gone;
    // treat the whole tick as a transient miss.
    if snapshot.field("main_module").is_none() {
        shared.stats.lock().skipped_ticks += 1;
        return;
    }

    *shared.snapshot.lock() = Some(snapshot.clone());

    let mut events = Vec::new();
    if let Some(prev_snapshot) = prev.as_ref() {
        events.extend(detector.detect(prev_snapshot, &snapshot, engine));
    }
    events.extend(engine.check(&snapshot));

    let events = merge_events(events);

    {
        let mut stats = shared.stats.lock();
        stats.total_ticks += 1;
        stats.events_emitted += events.len() as u64;
    }

    if !events.is_empty() {
        sink.deliver(&events);
    }

    *prev = Some(snapshot);
}
