//! Frame-to-frame object tracking with EMA velocity estimation.
//!
//! The tracker owns every [`TrackedObject`] by value, keyed by a stable
//! string id.  Static features come and go with the room geometry; dynamic
//! objects mirror the live sprite table and age out when unseen.

use log::debug;
use std::collections::HashMap;

use crate::snapshot::SpriteSlot;
use crate::types::{Compass, SpriteCategory, Zone};

/// EMA smoothing factor for velocity samples.
pub const VELOCITY_ALPHA: f64 = 0.3;
/// Seconds before an unseen dynamic object is dropped.
pub const STALE_TIMEOUT: f64 = 2.0;
/// Speed floor in px/s; below this, velocity is jitter.
pub const SPEED_THRESHOLD: f64 = 20.0;

// ---------------------------------------------------------------------------
// Tracked object
// ---------------------------------------------------------------------------

/// A static feature derived from room/screen geometry.
#[derive(Debug, Clone)]
pub struct StaticFeature {
    pub key: String,
    pub x: i32,
    pub y: i32,
    pub name: String,
}

impl StaticFeature {
    pub fn new(key: impl Into<String>, x: i32, y: i32, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            x,
            y,
            name: name.into(),
        }
    }
}

/// A game object tracked across ticks.
#[derive(Debug, Clone)]
pub struct TrackedObject {
    pub key: String,
    /// Absolute pixel position.
    pub world_x: i32,
    pub world_y: i32,
    pub type_id: u8,
    pub name: String,
    pub category: SpriteCategory,
    /// True for live sprite-table entries, false for static geometry.
    pub is_dynamic: bool,
    pub last_seen: f64,
    pub zone: Option<Zone>,
    /// EMA-smoothed velocity in px/s.
    pub vx: f64,
    pub vy: f64,
    prev_x: i32,
    prev_y: i32,
    prev_time: f64,
}

impl TrackedObject {
    pub fn speed(&self) -> f64 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ObjectTracker {
    objects: HashMap<String, TrackedObject>,
}

impl ObjectTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all tracking (call on room/screen transition).
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn get(&self, key: &str) -> Option<&TrackedObject> {
        self.objects.get(key)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn all_objects(&self) -> impl Iterator<Item = &TrackedObject> {
        self.objects.values()
    }

    pub fn all_objects_mut(&mut self) -> impl Iterator<Item = &mut TrackedObject> {
        self.objects.values_mut()
    }

    pub fn active_dynamic(&self) -> impl Iterator<Item = &TrackedObject> {
        self.objects.values().filter(|o| o.is_dynamic)
    }

    pub fn set_zone(&mut self, key: &str, zone: Option<Zone>) {
        if let Some(obj) = self.objects.get_mut(key) {
            obj.zone = zone;
        }
    }

    // -----------------------------------------------------------------------
    // Static features
    // -----------------------------------------------------------------------

    /// Upsert static feature tracking from the current feature list.  Any
    /// static object missing from the list is removed immediately; there is
    /// no grace period for geometry.
    pub fn update_static(&mut self, features: &[StaticFeature], now: f64) {
        let mut seen: Vec<&str> = Vec::with_capacity(features.len());
        for feat in features {
            seen.push(&feat.key);
            match self.objects.get_mut(&feat.key) {
                Some(obj) => {
                    obj.world_x = feat.x;
                    obj.world_y = feat.y;
                    obj.last_seen = now;
                }
                None => {
                    self.objects.insert(
                        feat.key.clone(),
                        TrackedObject {
                            key: feat.key.clone(),
                            world_x: feat.x,
                            world_y: feat.y,
                            type_id: 0,
                            name: feat.name.clone(),
                            category: SpriteCategory::Object,
                            is_dynamic: false,
                            last_seen: now,
                            zone: None,
                            vx: 0.0,
                            vy: 0.0,
                            prev_x: feat.x,
                            prev_y: feat.y,
                            prev_time: now,
                        },
                    );
                }
            }
        }
        self.objects
            .retain(|key, obj| obj.is_dynamic || seen.iter().any(|s| *s == key.as_str()));
    }

    // -----------------------------------------------------------------------
    // Dynamic sprites
    // -----------------------------------------------------------------------

    /// Upsert dynamic sprite tracking from the live sprite table.
    ///
    /// A slot whose occupant type changed is treated as annihilation of the
    /// old entity plus birth of a new one: velocity and zone never carry
    /// over (a drop must not inherit its killer's approach state).
    pub fn update_sprites(&mut self, sprites: &[SpriteSlot], now: f64) {
        for s in sprites {
            if !s.is_active() || s.category() == SpriteCategory::Unknown {
                continue;
            }
            let key = format!("sprite:{}", s.index);

            let reuse = match self.objects.get(&key) {
                Some(obj) if obj.is_dynamic && obj.type_id != s.type_id => {
                    debug!("slot {} reused: {:#04x} -> {:#04x}", s.index, obj.type_id, s.type_id);
                    true
                }
                _ => false,
            };
            if reuse {
                self.objects.remove(&key);
            }

            match self.objects.get_mut(&key) {
                Some(obj) => {
                    let dt = now - obj.prev_time;
                    if dt > 0.001 {
                        let raw_vx = f64::from(s.x - obj.prev_x) / dt;
                        let raw_vy = f64::from(s.y - obj.prev_y) / dt;
                        obj.vx = VELOCITY_ALPHA * raw_vx + (1.0 - VELOCITY_ALPHA) * obj.vx;
                        obj.vy = VELOCITY_ALPHA * raw_vy + (1.0 - VELOCITY_ALPHA) * obj.vy;
                    }
                    obj.prev_x = s.x;
                    obj.prev_y = s.y;
                    obj.prev_time = now;
                    obj.world_x = s.x;
                    obj.world_y = s.y;
                    obj.type_id = s.type_id;
                    obj.name = s.name();
                    obj.category = s.category();
                    obj.last_seen = now;
                }
                None => {
                    self.objects.insert(
                        key.clone(),
                        TrackedObject {
                            key,
                            world_x: s.x,
                            world_y: s.y,
                            type_id: s.type_id,
                            name: s.name(),
                            category: s.category(),
                            is_dynamic: true,
                            last_seen: now,
                            zone: None,
                            vx: 0.0,
                            vy: 0.0,
                            prev_x: s.x,
                            prev_y: s.y,
                            prev_time: now,
                        },
                    );
                }
            }
        }
        // Unseen dynamic sprites are left in place; prune_stale ages them out.
    }

    /// Remove dynamic objects not seen for [`STALE_TIMEOUT`] seconds.
    pub fn prune_stale(&mut self, now: f64) {
        self.objects
            .retain(|_, obj| !obj.is_dynamic || (now - obj.last_seen) <= STALE_TIMEOUT);
    }

    // -----------------------------------------------------------------------
    // Approach detection
    // -----------------------------------------------------------------------

    /// Compass label of the direction a moving object is coming *from*,
    /// when its velocity points toward the player above the speed floor.
    pub fn approaching(obj: &TrackedObject, player_x: i32, player_y: i32) -> Option<Compass> {
        if obj.speed() < SPEED_THRESHOLD {
            return None;
        }
        let to_player_x = f64::from(player_x - obj.world_x);
        let to_player_y = f64::from(player_y - obj.world_y);
        let dot = obj.vx * to_player_x + obj.vy * to_player_y;
        if dot <= 0.0 {
            return None;
        }
        Some(Compass::from_delta(-obj.vx as i32, -obj.vy as i32))
    }
}
