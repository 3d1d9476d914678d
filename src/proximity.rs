//! Proximity engine: zone-based announcements, the facing cone scan with
//! line-of-sight occlusion, and doorway cluster detection.

use log::debug;
use once_cell::sync::Lazy;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::geometry::{dedup_sprites, GeometryStore, RoomData};
use crate::memory::MemoryReader;
use crate::snapshot::Snapshot;
use crate::tables::{
    is_doorway_tile, is_indoor_wall_tile, BODY_OFFSET_X, BODY_OFFSET_Y, DUNGEON_TILE_ATTR_ADDR,
    MODULE_DUNGEON, MODULE_OVERWORLD, OVERWORLD_TILE_ADDR, TILE_ATTR_OPEN_CHEST, TILE_TYPE_NAMES,
};
use crate::tracker::{ObjectTracker, StaticFeature, SPEED_THRESHOLD};
use crate::types::{Compass, Direction, Event, EventKind, EventPriority, SpriteCategory, Zone};

/// Outer announcement radius (~12 tiles).
pub const APPROACH_DIST: f64 = 96.0;
/// Inner announcement radius (~7 tiles).
pub const NEARBY_DIST: f64 = 56.0;
/// Seconds after an area change during which close-range zone chatter and
/// the cone scan are suppressed.
pub const AREA_CHANGE_COOLDOWN: f64 = 2.0;

/// Tile names the cone scan and blocker probe never report.
pub const CONE_IGNORE_TILES: &[&str] = &["diggable ground", "hookshot target"];

// ---------------------------------------------------------------------------
// Zone transition
// ---------------------------------------------------------------------------

/// Zone boundary crossed inward this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEntry {
    Facing,
    Nearby,
    Approach,
}

/// Evaluate the zone state machine for one object.
///
/// Returns the zone to store and the boundary entered, if any.  An object
/// already holding a zone does not re-fire there; drifting outward
/// downgrades the stored zone to whatever the new distance still supports,
/// so a later re-entry fires again.
pub fn zone_transition(
    prev: Option<Zone>,
    dist: f64,
    is_facing: bool,
) -> (Option<Zone>, Option<ZoneEntry>) {
    let mut zone = prev;
    let mut entry = None;

    if is_facing && prev != Some(Zone::Facing) {
        entry = Some(ZoneEntry::Facing);
        zone = Some(Zone::Facing);
    } else if dist <= NEARBY_DIST && !matches!(prev, Some(Zone::Nearby | Zone::Facing)) {
        entry = Some(ZoneEntry::Nearby);
        zone = Some(Zone::Nearby);
    } else if dist <= APPROACH_DIST && prev.is_none() {
        entry = Some(ZoneEntry::Approach);
        zone = Some(Zone::Approach);
    }

    // Downgrades keyed off the previous zone.
    if prev == Some(Zone::Facing) && !is_facing {
        zone = if dist <= NEARBY_DIST {
            Some(Zone::Nearby)
        } else if dist <= APPROACH_DIST {
            Some(Zone::Approach)
        } else {
            None
        };
    } else if prev == Some(Zone::Nearby) && dist > NEARBY_DIST {
        zone = if dist <= APPROACH_DIST {
            Some(Zone::Approach)
        } else {
            None
        };
    } else if dist > APPROACH_DIST && prev.is_some() {
        zone = None;
    }

    (zone, entry)
}

// ---------------------------------------------------------------------------
// Fixed geometry tables
// ---------------------------------------------------------------------------

/// Exact door tile positions in the 64x64 room grid, keyed by
/// (direction, position).  Positions 0-5 cover the upper/left half of big
/// rooms, 6-11 the lower/right half.  This table is authoritative data.
static DOOR_TILE_POS: Lazy<HashMap<(u8, u8), (i32, i32)>> = Lazy::new(|| {
    HashMap::from([
        // North doors
        ((0, 0), (14, 4)),
        ((0, 1), (30, 4)),
        ((0, 2), (46, 4)),
        ((0, 3), (14, 7)),
        ((0, 4), (30, 7)),
        ((0, 5), (46, 7)),
        ((0, 6), (14, 36)),
        ((0, 7), (30, 36)),
        ((0, 8), (46, 36)),
        ((0, 9), (14, 39)),
        ((0, 10), (30, 39)),
        ((0, 11), (46, 39)),
        // South doors
        ((1, 0), (14, 26)),
        ((1, 1), (30, 26)),
        ((1, 2), (46, 26)),
        ((1, 3), (14, 23)),
        ((1, 4), (30, 23)),
        ((1, 5), (46, 23)),
        ((1, 6), (14, 58)),
        ((1, 7), (30, 58)),
        ((1, 8), (46, 58)),
        ((1, 9), (14, 55)),
        ((1, 10), (30, 55)),
        ((1, 11), (46, 55)),
        // West doors
        ((2, 0), (2, 15)),
        ((2, 1), (2, 31)),
        ((2, 2), (2, 47)),
        ((2, 3), (5, 15)),
        ((2, 4), (5, 31)),
        ((2, 5), (5, 47)),
        ((2, 6), (34, 15)),
        ((2, 7), (34, 31)),
        ((2, 8), (34, 47)),
        ((2, 9), (37, 15)),
        ((2, 10), (37, 31)),
        ((2, 11), (37, 47)),
        // East doors
        ((3, 0), (26, 15)),
        ((3, 1), (26, 31)),
        ((3, 2), (26, 47)),
        ((3, 3), (23, 15)),
        ((3, 4), (23, 31)),
        ((3, 5), (23, 47)),
        ((3, 6), (58, 15)),
        ((3, 7), (58, 31)),
        ((3, 8), (58, 47)),
        ((3, 9), (55, 15)),
        ((3, 10), (55, 31)),
        ((3, 11), (55, 47)),
    ])
});

/// Object classes worth announcing as zone features.
const ANNOUNCE_CLASSES: &[&str] = &[
    "chest",
    "stairs",
    "pit",
    "hazard",
    "switch",
    "block",
    "water",
    "wall",
    "shrub",
    "feature",
    "torch",
    "interactable",
];

/// Overworld tile names worth tracking as zone features.  These
/// interactables exist only as tile attributes, not as placed sprites.
const PROXIMITY_TILE_NAMES: &[&str] = &[
    "sign",
    "gravestone",
    "liftable rock",
    "liftable boulder",
    "dark rock",
    "dashable rocks",
    "cactus",
    "liftable pot",
    "chest",
];

/// 45-degree cone tile offsets per direction, grouped by distance ring
/// (1-8 tiles ahead).  Offsets are (dx, dy) in 8-px tile units relative to
/// the player's tile.  The tables are authoritative data; the slight
/// asymmetry is intentional.
static CONE_NORTH: &[&[(i32, i32)]] = &[
    &[(0, -1)],
    &[(-1, -2), (0, -2), (1, -2)],
    &[(-1, -3), (0, -3), (1, -3)],
    &[(-2, -4), (-1, -4), (0, -4), (1, -4), (2, -4)],
    &[(-2, -5), (-1, -5), (0, -5), (1, -5), (2, -5)],
    &[(-3, -6), (-2, -6), (-1, -6), (0, -6), (1, -6), (2, -6), (3, -6)],
    &[(-3, -7), (-2, -7), (-1, -7), (0, -7), (1, -7), (2, -7), (3, -7)],
    &[
        (-4, -8),
        (-3, -8),
        (-2, -8),
        (-1, -8),
        (0, -8),
        (1, -8),
        (2, -8),
        (3, -8),
        (4, -8),
    ],
];

static CONE_SOUTH: &[&[(i32, i32)]] = &[
    &[(0, 1)],
    &[(-1, 2), (0, 2), (1, 2)],
    &[(-1, 3), (0, 3), (1, 3)],
    &[(-2, 4), (-1, 4), (0, 4), (1, 4), (2, 4)],
    &[(-2, 5), (-1, 5), (0, 5), (1, 5), (2, 5)],
    &[(-3, 6), (-2, 6), (-1, 6), (0, 6), (1, 6), (2, 6), (3, 6)],
    &[(-3, 7), (-2, 7), (-1, 7), (0, 7), (1, 7), (2, 7), (3, 7)],
    &[
        (-4, 8),
        (-3, 8),
        (-2, 8),
        (-1, 8),
        (0, 8),
        (1, 8),
        (2, 8),
        (3, 8),
        (4, 8),
    ],
];

static CONE_WEST: &[&[(i32, i32)]] = &[
    &[(-1, 0)],
    &[(-2, -1), (-2, 0), (-2, 1)],
    &[(-3, -1), (-3, 0), (-3, 1)],
    &[(-4, -2), (-4, -1), (-4, 0), (-4, 1), (-4, 2)],
    &[(-5, -2), (-5, -1), (-5, 0), (-5, 1), (-5, 2)],
    &[(-6, -3), (-6, -2), (-6, -1), (-6, 0), (-6, 1), (-6, 2), (-6, 3)],
    &[(-7, -3), (-7, -2), (-7, -1), (-7, 0), (-7, 1), (-7, 2), (-7, 3)],
    &[
        (-8, -4),
        (-8, -3),
        (-8, -2),
        (-8, -1),
        (-8, 0),
        (-8, 1),
        (-8, 2),
        (-8, 3),
        (-8, 4),
    ],
];

static CONE_EAST: &[&[(i32, i32)]] = &[
    &[(1, 0)],
    &[(2, -1), (2, 0), (2, 1)],
    &[(3, -1), (3, 0), (3, 1)],
    &[(4, -2), (4, -1), (4, 0), (4, 1), (4, 2)],
    &[(5, -2), (5, -1), (5, 0), (5, 1), (5, 2)],
    &[(6, -3), (6, -2), (6, -1), (6, 0), (6, 1), (6, 2), (6, 3)],
    &[(7, -3), (7, -2), (7, -1), (7, 0), (7, 1), (7, 2), (7, 3)],
    &[
        (8, -4),
        (8, -3),
        (8, -2),
        (8, -1),
        (8, 0),
        (8, 1),
        (8, 2),
        (8, 3),
        (8, 4),
    ],
];

fn cone_offsets(dir: Direction) -> &'static [&'static [(i32, i32)]] {
    match dir {
        Direction::North => CONE_NORTH,
        Direction::South => CONE_SOUTH,
        Direction::West => CONE_WEST,
        Direction::East => CONE_EAST,
    }
}

/// Unit step from a cone cell back toward the player along the primary axis.
fn closer_step(dir: Direction) -> (i32, i32) {
    match dir {
        Direction::North => (0, 1),
        Direction::South => (0, -1),
        Direction::West => (1, 0),
        Direction::East => (-1, 0),
    }
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Cells on a Bresenham line between two points, excluding both endpoints.
pub fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = (x1 - x0).signum();
    let sy = (y1 - y0).signum();
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);
    loop {
        if (x, y) != (x0, y0) && (x, y) != (x1, y1) {
            cells.push((x, y));
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    cells
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Announces nearby features as the player approaches them.
///
/// Tracks distance zones per feature and only announces when the player
/// crosses a threshold boundary inward.  Resets tracking on room change.
pub struct ProximityEngine {
    reader: Option<Arc<dyn MemoryReader>>,
    current_room: Option<u16>,
    current_ow_screen: Option<u16>,
    tracker: ObjectTracker,
    doorway_features: Vec<StaticFeature>,
    last_cone: String,
    last_direction: Option<Direction>,
    area_change_time: f64,
}

impl ProximityEngine {
    pub fn new(reader: Option<Arc<dyn MemoryReader>>) -> Self {
        Self {
            reader,
            current_room: None,
            current_ow_screen: None,
            tracker: ObjectTracker::new(),
            doorway_features: Vec::new(),
            last_cone: String::new(),
            last_direction: None,
            area_change_time: 0.0,
        }
    }

    pub fn tracker(&self) -> &ObjectTracker {
        &self.tracker
    }

    /// Doorway clusters detected in the current dungeon room.
    pub fn doorway_features(&self) -> &[StaticFeature] {
        &self.doorway_features
    }

    // -----------------------------------------------------------------------
    // Per-tick check
    // -----------------------------------------------------------------------

    /// Run the zone machine and cone scan for one poll tick.
    pub fn check(&mut self, state: &Snapshot) -> Vec<Event> {
        if state.geometry.is_none() {
            return Vec::new();
        }

        let now = state.timestamp;
        // Distances are measured from the player's body center, not the
        // sprite's top-left origin.
        let link_x = state.get("link_x") as i32 + BODY_OFFSET_X;
        let link_y = state.get("link_y") as i32 + BODY_OFFSET_Y;
        let mut features: Vec<StaticFeature> = Vec::new();

        if state.is_in_dungeon() {
            let room_id = state.get("dungeon_room") as u16;
            if self.current_room != Some(room_id) {
                self.current_room = Some(room_id);
                self.tracker.clear();
                self.area_change_time = now;
                self.doorway_features =
                    self.scan_doorways(link_x, link_y, state.get("lower_level"));
                debug!(
                    "room {:#06x}: {} doorway cluster(s)",
                    room_id,
                    self.doorway_features.len()
                );
            }
            if let Some(geometry) = &state.geometry {
                if let Some(room) = geometry.room(room_id) {
                    features = self.room_features(room, link_x, link_y);
                }
            }
            features.extend(self.doorway_features.iter().cloned());
        } else if state.is_on_overworld() {
            if let Some(screen) = state.ow_screen_from_coords() {
                if self.current_ow_screen != Some(screen) {
                    self.current_ow_screen = Some(screen);
                    self.tracker.clear();
                    self.area_change_time = now;
                }
                if let Some(geometry) = &state.geometry {
                    features = Self::ow_features(geometry.as_ref(), screen);
                }
                features.extend(self.ow_tile_features(state, link_x, link_y));
            }
        }

        self.tracker.update_static(&features, now);
        self.tracker.update_sprites(&state.sprites, now);
        self.tracker.prune_stale(now);

        let mut events: Vec<Event> = Vec::new();
        let link_dir = state.direction();
        let in_cooldown = (now - self.area_change_time) < AREA_CHANGE_COOLDOWN;

        for obj in self.tracker.all_objects_mut() {
            let dx = obj.world_x - link_x;
            let dy = obj.world_y - link_y;
            let dist = f64::from(dx * dx + dy * dy).sqrt();
            let direction = Compass::from_delta(dx, dy);

            let is_facing = dist <= NEARBY_DIST
                && link_dir
                    .map(|d| direction.matches(d) || direction == Compass::Here)
                    .unwrap_or(false);

            let (new_zone, entry) = zone_transition(obj.zone, dist, is_facing);
            obj.zone = new_zone;

            let Some(entry) = entry else {
                continue;
            };
            // During cooldown the close-range zones stay quiet; approach
            // announcements still pass.
            if in_cooldown && matches!(new_zone, Some(Zone::Nearby | Zone::Facing)) {
                continue;
            }

            let diag = json!({
                "key": obj.key,
                "dist": dist as i32,
                "tile": [obj.world_x / 16, obj.world_y / 16],
            });
            let event = match entry {
                ZoneEntry::Facing => Event::with_data(
                    EventKind::Facing,
                    EventPriority::Medium,
                    format!("Facing {}.", capitalized(&obj.name)),
                    diag,
                ),
                ZoneEntry::Nearby => Event::with_data(
                    EventKind::Proximity,
                    EventPriority::Medium,
                    format!("Nearing {} to the {}.", capitalized(&obj.name), direction),
                    diag,
                ),
                ZoneEntry::Approach => {
                    let mut msg =
                        format!("Approaching {} to the {}.", capitalized(&obj.name), direction);
                    if obj.is_dynamic && obj.speed() > SPEED_THRESHOLD {
                        let from = Compass::from_delta(-obj.vx as i32, -obj.vy as i32);
                        msg = format!(
                            "Approaching {} to the {}, moving from the {}.",
                            capitalized(&obj.name),
                            direction,
                            from
                        );
                    }
                    Event::with_data(EventKind::Proximity, EventPriority::Low, msg, diag)
                }
            };
            events.push(event);
        }

        // Turning invalidates the cone cache: a new facing means a new scan.
        let direction = state.direction();
        if direction != self.last_direction {
            self.last_direction = direction;
            self.last_cone.clear();
        }

        if !in_cooldown {
            let cone_msg = self.scan_cone(state);
            if !cone_msg.is_empty() && cone_msg != self.last_cone {
                events.push(Event::new(
                    EventKind::ConeTile,
                    EventPriority::Low,
                    cone_msg.clone(),
                ));
                self.last_cone = cone_msg;
            }
        }

        // De-duplicate by message text, preserving order.
        let mut seen: HashSet<String> = HashSet::new();
        events.retain(|e| seen.insert(e.message.clone()));
        events
    }

    // -----------------------------------------------------------------------
    // On-demand scan
    // -----------------------------------------------------------------------

    /// List all features within approach range, sorted by distance.
    pub fn scan(&self, state: &Snapshot) -> Vec<String> {
        if state.geometry.is_none() {
            return Vec::new();
        }
        let link_x = state.get("link_x") as i32 + BODY_OFFSET_X;
        let link_y = state.get("link_y") as i32 + BODY_OFFSET_Y;
        let mut features: Vec<StaticFeature> = Vec::new();

        if state.is_in_dungeon() {
            if let Some(geometry) = &state.geometry {
                if let Some(room) = geometry.room(state.get("dungeon_room") as u16) {
                    features = self.room_features(room, link_x, link_y);
                }
            }
            features.extend(self.doorway_features.iter().cloned());
        } else if state.is_on_overworld() {
            if let Some(screen) = state.ow_screen_from_coords() {
                if let Some(geometry) = &state.geometry {
                    features = Self::ow_features(geometry.as_ref(), screen);
                }
                features.extend(self.ow_tile_features(state, link_x, link_y));
            }
        }

        let mut results: Vec<(f64, String)> = Vec::new();

        for feat in &features {
            let dx = feat.x - link_x;
            let dy = feat.y - link_y;
            let dist = f64::from(dx * dx + dy * dy).sqrt();
            if dist <= APPROACH_DIST {
                let direction = Compass::from_delta(dx, dy);
                results.push((
                    dist,
                    format!(
                        "{} to the {}, {} pixels away.",
                        capitalized(&feat.name),
                        direction,
                        dist as i32
                    ),
                ));
            }
        }

        for s in &state.sprites {
            if !s.is_active() || s.category() == SpriteCategory::Unknown {
                continue;
            }
            let dx = s.x - link_x;
            let dy = s.y - link_y;
            let dist = f64::from(dx * dx + dy * dy).sqrt();
            if dist <= APPROACH_DIST {
                let direction = Compass::from_delta(dx, dy);
                let mut entry = format!(
                    "{} to the {}, {} pixels away",
                    capitalized(&s.name()),
                    direction,
                    dist as i32
                );
                // Velocity annotation only when this slot is being tracked.
                if let Some(obj) = self.tracker.get(&format!("sprite:{}", s.index)) {
                    if obj.type_id == s.type_id && obj.speed() > SPEED_THRESHOLD {
                        let moving = Compass::from_delta(obj.vx as i32, obj.vy as i32);
                        entry.push_str(&format!(", moving {}", moving));
                    }
                }
                entry.push('.');
                results.push((dist, entry));
            }
        }

        results.sort_by(|a, b| a.0.total_cmp(&b.0));
        results.into_iter().map(|(_, s)| s).collect()
    }

    /// Compass labels of doorway clusters relative to the room center,
    /// deduplicated in discovery order.  Runs a fresh doorway scan, so it
    /// works from any thread that holds a reader.
    pub fn detect_exits(&self, state: &Snapshot) -> Vec<Compass> {
        if !state.is_in_dungeon() {
            return Vec::new();
        }
        let link_x = state.get("link_x") as i32 + BODY_OFFSET_X;
        let link_y = state.get("link_y") as i32 + BODY_OFFSET_Y;
        let features = self.scan_doorways(link_x, link_y, state.get("lower_level"));
        let room_cx = ((link_x >> 9) << 9) + 256;
        let room_cy = ((link_y >> 9) << 9) + 256;
        let mut exits = Vec::new();
        for feat in &features {
            let dir = Compass::from_delta(feat.x - room_cx, feat.y - room_cy);
            if !exits.contains(&dir) {
                exits.push(dir);
            }
        }
        exits
    }

    // -----------------------------------------------------------------------
    // Cone scan
    // -----------------------------------------------------------------------

    /// Describe every unobscured interactable tile in a cone ahead of the
    /// player, closest first.
    ///
    /// A cell is obscured when any other named cell in the cone lies on the
    /// Bresenham line between the player's tile and that cell.
    fn scan_cone(&self, state: &Snapshot) -> String {
        if self.reader.is_none() {
            return String::new();
        }
        let Some(direction) = state.direction() else {
            return String::new();
        };
        let cone = cone_offsets(direction);

        let link_x = state.get("link_x") as i32;
        let link_y = state.get("link_y") as i32;
        if link_x == 0 || link_y == 0 {
            return String::new();
        }
        if !matches!(state.get("main_module"), MODULE_DUNGEON | MODULE_OVERWORLD) {
            return String::new();
        }

        let indoors = state.is_indoors();

        // Center of the hitbox on the 8-px tile grid.
        let ltx = (link_x + 8) >> 3;
        let lty = (link_y + 12) >> 3;
        let closer = closer_step(direction);

        // Phase 1: read and name every tile in the cone.
        let mut solid: HashMap<(i32, i32), String> = HashMap::new();
        for ring in cone {
            for &(dx, dy) in ring.iter() {
                let name = self
                    .read_tile_name(state, ltx + dx, lty + dy, indoors)
                    .filter(|n| !CONE_IGNORE_TILES.contains(n));
                if let Some(name) = name {
                    if name.starts_with("ledge") {
                        // Ledges are detected late; place them one tile closer.
                        let pos = (dx + closer.0, dy + closer.1);
                        if pos != (0, 0) {
                            solid.insert(pos, name.to_string());
                        }
                    } else {
                        solid.insert((dx, dy), name.to_string());
                    }
                }
            }
        }

        // Phase 2: tracked objects inside the cone override raw tile names.
        let mut cone_set: HashSet<(i32, i32)> = HashSet::new();
        for ring in cone {
            cone_set.extend(ring.iter().copied());
        }
        for obj in self.tracker.all_objects() {
            let obj_dx = (obj.world_x >> 3) - ltx;
            let obj_dy = (obj.world_y >> 3) - lty;
            if cone_set.contains(&(obj_dx, obj_dy)) {
                solid.insert((obj_dx, obj_dy), obj.name.clone());
            }
        }

        // Phase 3: occlusion — keep only cells with clear line of sight.
        let mut visible: Vec<(String, &'static str)> = Vec::new();
        for ring in cone {
            for &(dx, dy) in ring.iter() {
                let Some(name) = solid.get(&(dx, dy)) else {
                    continue;
                };
                let obscured = bresenham(0, 0, dx, dy)
                    .into_iter()
                    .any(|cell| solid.contains_key(&cell));
                if obscured {
                    continue;
                }
                // Snap to a pure cardinal on the dominant axis.
                let cardinal = if dx.abs() >= dy.abs() {
                    if dx > 0 {
                        "east"
                    } else {
                        "west"
                    }
                } else if dy > 0 {
                    "south"
                } else {
                    "north"
                };
                visible.push((name.clone(), cardinal));
            }
        }

        if visible.is_empty() {
            return String::new();
        }

        let mut seen: HashSet<(String, &'static str)> = HashSet::new();
        let mut parts: Vec<String> = Vec::new();
        for (name, cardinal) in visible {
            if seen.insert((name.clone(), cardinal)) {
                parts.push(format!("{} to the {}.", capitalized(&name), cardinal));
            }
        }
        parts.join("\n")
    }

    // -----------------------------------------------------------------------
    // Tile reads
    // -----------------------------------------------------------------------

    /// Read a single dungeon tile attribute at tile coords (tx, ty).
    fn read_dungeon_tile_attr(&self, state: &Snapshot, tx: i32, ty: i32) -> Option<u8> {
        let reader = self.reader.as_deref()?;
        let ctx = tx & 63;
        let cty = (ty * 8) & 0x1F8;
        let lower = if state.get("lower_level") != 0 { 0x1000 } else { 0 };
        let off = cty * 8 + ctx + lower;
        reader
            .read(DUNGEON_TILE_ATTR_ADDR + off as u32, 1)
            .and_then(|b| b.first().copied())
    }

    /// Read a dungeon tile attribute at room-relative coordinates, upper
    /// level only (chest probes live on BG2).
    fn read_room_tile_attr(&self, room_tx: i32, room_ty: i32) -> Option<u8> {
        let reader = self.reader.as_deref()?;
        let ctx = room_tx & 63;
        let cty = (room_ty * 8) & 0x1F8;
        let off = cty * 8 + ctx;
        reader
            .read(DUNGEON_TILE_ATTR_ADDR + off as u32, 1)
            .and_then(|b| b.first().copied())
    }

    /// Human name for a tile, graphic-based identification first.
    ///
    /// On the overworld the map16 graphic index names objects more reliably
    /// than the shared attribute bytes; the attribute is the fallback.
    pub fn read_tile_name(
        &self,
        state: &Snapshot,
        tx: i32,
        ty: i32,
        indoors: bool,
    ) -> Option<&'static str> {
        let module = state.get("main_module");

        if module == MODULE_OVERWORLD {
            let reader = self.reader.as_deref()?;
            let geometry = state.geometry.as_deref()?;
            let py = ty * 8;
            let base_y = state.get("ow_offset_base_y") as i32;
            let mask_y = state.get("ow_offset_mask_y") as i32;
            let base_x = state.get("ow_offset_base_x") as i32;
            let mask_x = state.get("ow_offset_mask_x") as i32;
            let t = ((py - base_y) & mask_y) * 8 | ((tx - base_x) & mask_x);
            let ow_off = t >> 1;
            let bytes = reader.read(OVERWORLD_TILE_ADDR + (ow_off as u32) * 2, 2)?;
            if bytes.len() < 2 {
                return None;
            }
            let map16_idx = u16::from(bytes[0]) | (u16::from(bytes[1]) << 8);
            if let Some(name) = geometry.ow_tile_name(map16_idx) {
                return Some(name);
            }
            let attr = geometry.ow_tile_attr(map16_idx, tx, py);
            return TILE_TYPE_NAMES.get(&attr).copied();
        }

        let attr = self.read_dungeon_tile_attr(state, tx, ty)?;
        if indoors && is_indoor_wall_tile(attr) {
            return Some("wall");
        }
        TILE_TYPE_NAMES.get(&attr).copied()
    }

    // -----------------------------------------------------------------------
    // Feature gathering
    // -----------------------------------------------------------------------

    /// Announceable features of a dungeon room as absolute-pixel entries.
    ///
    /// Room geometry uses tilemap-relative coordinates while the player's
    /// position is absolute; rooms are 512-px aligned, so the room origin
    /// falls out of the player's position.
    fn room_features(&self, room: &RoomData, link_x: i32, link_y: i32) -> Vec<StaticFeature> {
        let mut features = Vec::new();

        let room_ox = (link_x >> 9) << 9;
        let room_oy = (link_y >> 9) << 9;

        for door in &room.doors {
            if let Some(&(tx, ty)) = DOOR_TILE_POS.get(&(door.direction, door.position)) {
                features.push(StaticFeature::new(
                    format!(
                        "door:{}:{}:{}",
                        door.door_type, door.direction, door.position
                    ),
                    room_ox + tx * 8,
                    room_oy + ty * 8,
                    door.type_name(),
                ));
            }
        }

        // Objects use 8-px tile units (64x64 grid spans the 512-px room).
        for obj in &room.objects {
            if !ANNOUNCE_CLASSES.contains(&obj.class()) {
                continue;
            }
            let mut name = obj.name();
            if obj.class() == "chest" && !name.contains("open") {
                if self.read_room_tile_attr(obj.x_tile, obj.y_tile) == Some(TILE_ATTR_OPEN_CHEST) {
                    name = format!("open {}", name);
                }
            }
            features.push(StaticFeature::new(
                format!("obj:{}:{}:{}", obj.object_type, obj.x_tile, obj.y_tile),
                room_ox + obj.x_tile * 8,
                room_oy + obj.y_tile * 8,
                name,
            ));
        }

        // Placed sprites except enemies; live enemies come from the sprite
        // table with real-time positions.
        for spr in &room.sprites {
            if matches!(
                spr.category(),
                SpriteCategory::Enemy | SpriteCategory::Unknown
            ) {
                continue;
            }
            features.push(StaticFeature::new(
                format!("spr:{}:{}:{}", spr.sprite_type, spr.x_tile, spr.y_tile),
                room_ox + spr.x_tile * 16,
                room_oy + spr.y_tile * 16,
                spr.name(),
            ));
        }

        features
    }

    /// Announceable overworld sprites as absolute-pixel entries.  Each
    /// screen is 512 px in the 8x8 grid.
    fn ow_features(geometry: &GeometryStore, screen: u16) -> Vec<StaticFeature> {
        let sprites = dedup_sprites(geometry.ow_sprites(screen));
        if sprites.is_empty() {
            return Vec::new();
        }
        let col = i32::from(screen & 7);
        let row = i32::from((screen >> 3) & 7);
        let ox = col * 512;
        let oy = row * 512;
        sprites
            .iter()
            .filter(|spr| spr.category() != SpriteCategory::Unknown)
            .map(|spr| {
                // Placed enemies stay here too: the static position keeps the
                // approach zone firing for patrol-route enemies before their
                // live slot spawns.
                StaticFeature::new(
                    format!("ow:{}:{}:{}", spr.sprite_type, spr.x_tile, spr.y_tile),
                    ox + spr.x_tile * 16,
                    oy + spr.y_tile * 16,
                    spr.name(),
                )
            })
            .collect()
    }

    /// Interactable overworld tiles near the player, from one bulk read of
    /// the 8 KiB scrolling tile table.
    fn ow_tile_features(
        &self,
        state: &Snapshot,
        link_x: i32,
        link_y: i32,
    ) -> Vec<StaticFeature> {
        let Some(reader) = self.reader.as_deref() else {
            return Vec::new();
        };
        let Some(geometry) = state.geometry.as_deref() else {
            return Vec::new();
        };
        let Some(bulk) = reader.read(OVERWORLD_TILE_ADDR, 8192) else {
            return Vec::new();
        };

        let base_y = state.get("ow_offset_base_y") as i32;
        let mask_y = state.get("ow_offset_mask_y") as i32;
        let base_x = state.get("ow_offset_base_x") as i32;
        let mask_x = state.get("ow_offset_mask_x") as i32;

        // Scan radius in map16 cells (16 px each), +1 so features right at
        // the approach boundary don't flicker in and out.
        let radius = (APPROACH_DIST as i32) / 16 + 1;
        let cx = link_x / 16;
        let cy = link_y / 16;

        let mut features = Vec::new();

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let m16x = cx + dx;
                let m16y = cy + dy;

                // 8-px tile column of this cell's top-left sub-tile.
                let tx = m16x * 2;
                let py_px = m16y * 16;

                let t = ((py_px - base_y) & mask_y) * 8 | ((tx - base_x) & mask_x);
                let ow_off = t >> 1;
                let byte_off = (ow_off * 2) as usize;
                if ow_off < 0 || byte_off + 2 > bulk.len() {
                    continue;
                }

                let map16_idx = u16::from(bulk[byte_off]) | (u16::from(bulk[byte_off + 1]) << 8);

                let name = geometry.ow_tile_name(map16_idx).or_else(|| {
                    let attr = geometry.ow_tile_attr(map16_idx, tx, py_px);
                    TILE_TYPE_NAMES.get(&attr).copied()
                });

                if let Some(name) = name {
                    if PROXIMITY_TILE_NAMES.contains(&name) {
                        features.push(StaticFeature::new(
                            format!("owtile:{}:{}", m16x, m16y),
                            m16x * 16 + 8,
                            m16y * 16 + 8,
                            name,
                        ));
                    }
                }
            }
        }

        features
    }

    // -----------------------------------------------------------------------
    // Doorway clustering
    // -----------------------------------------------------------------------

    /// Scan the dungeon tile attribute grid for doorway tiles, flood-fill
    /// adjacent ones into clusters, and return one "open doorway" feature
    /// per cluster at its centroid.  This recovers exits the room geometry
    /// data omits.
    fn scan_doorways(&self, link_x: i32, link_y: i32, lower_level: u32) -> Vec<StaticFeature> {
        let Some(reader) = self.reader.as_deref() else {
            return Vec::new();
        };
        let base = DUNGEON_TILE_ATTR_ADDR + if lower_level != 0 { 0x1000 } else { 0 };
        let Some(data) = reader.read(base, 4096) else {
            return Vec::new();
        };
        if data.len() < 4096 {
            return Vec::new();
        }

        let mut doorway_set: HashSet<(i32, i32)> = HashSet::new();
        for y in 0..64 {
            for x in 0..64 {
                if is_doorway_tile(data[(y * 64 + x) as usize]) {
                    doorway_set.insert((x, y));
                }
            }
        }
        if doorway_set.is_empty() {
            return Vec::new();
        }

        // 4-connected flood fill.
        let mut remaining = doorway_set;
        let mut clusters: Vec<Vec<(i32, i32)>> = Vec::new();
        while let Some(&seed) = remaining.iter().next() {
            remaining.remove(&seed);
            let mut cluster = vec![seed];
            let mut queue = vec![seed];
            while let Some((cx, cy)) = queue.pop() {
                for neighbor in [(cx - 1, cy), (cx + 1, cy), (cx, cy - 1), (cx, cy + 1)] {
                    if remaining.remove(&neighbor) {
                        cluster.push(neighbor);
                        queue.push(neighbor);
                    }
                }
            }
            clusters.push(cluster);
        }

        let room_ox = (link_x >> 9) << 9;
        let room_oy = (link_y >> 9) << 9;
        clusters
            .into_iter()
            .map(|cluster| {
                let n = cluster.len() as i32;
                let cx = cluster.iter().map(|t| t.0).sum::<i32>() / n;
                let cy = cluster.iter().map(|t| t.1).sum::<i32>() / n;
                StaticFeature::new(
                    format!("doorway:{}:{}", cx, cy),
                    room_ox + cx * 8,
                    room_oy + cy * 8,
                    "open doorway",
                )
            })
            .collect()
    }
}
