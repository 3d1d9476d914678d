//! ALttP Accessibility Bridge
//!
//! Converts periodic raw-memory snapshots of a running A Link to the Past
//! into prioritized, spoken-word-friendly events for a blind player.
//!
//! ## Architecture
//!
//! ```text
//! Poller  (poller.rs)            ← tick loop, snapshot publication, sink
//!   ├── EventDetector  (events.rs)    ← snapshot diff + blocked heuristic
//!   ├── ProximityEngine  (proximity.rs) ← zones, cone scan, doorways
//!   │     └── ObjectTracker  (tracker.rs) ← identity + EMA velocity
//!   ├── read_snapshot  (memory.rs)   ← field table + sprite table reads
//!   │     └── RetroArchClient        ← UDP network-command wire client
//!   └── Snapshot  (snapshot.rs)      ← immutable per-tick state
//!         └── GeometryStore  (geometry.rs) ← parsed room/screen geometry
//! ```
//!
//! The engine modules build without the `client` feature; `client` adds
//! the async signal/stdin handling used by the `alttp-bridge` binary.

pub mod events;
pub mod geometry;
pub mod memory;
pub mod poller;
pub mod proximity;
pub mod snapshot;
pub mod tables;
pub mod tracker;
pub mod types;

// Convenience re-exports
pub use events::EventDetector;
pub use geometry::{GeometryStore, RoomData};
pub use memory::{read_snapshot, MemoryReader, RetroArchClient};
pub use poller::{merge_events, EventSink, LineSink, Poller};
pub use proximity::{zone_transition, ProximityEngine, APPROACH_DIST, NEARBY_DIST};
pub use snapshot::{Snapshot, SpriteSlot};
pub use tracker::{ObjectTracker, StaticFeature, TrackedObject};
pub use types::{
    BridgeConfig, BridgeError, BridgeStats, Compass, Direction, Event, EventKind, EventPriority,
    SpriteCategory, Zone,
};
