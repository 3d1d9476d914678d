//! Immutable per-tick game state.
//!
//! A [`Snapshot`] is built once per poll tick from the memory collaborator
//! and never mutated afterwards; the next tick supersedes it.  Everything
//! beyond the raw field map is derived on demand.

use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::geometry::GeometryStore;
use crate::tables::{
    boolean_item_name, is_enemy_type, is_indoor_wall_tile, sprite_category, sprite_name,
    tiered_name, BOTTLE_NAMES, DUNGEON_DESCRIPTIONS, DUNGEON_ROOMS, ENEMY_DETECT_RADIUS,
    INTERACT_RADIUS, KEYS_UNINITIALIZED, MODULE_DUNGEON, MODULE_OVERWORLD, OVERWORLD_DESCRIPTIONS,
    OVERWORLD_NAMES, TILE_TYPE_NAMES,
};
use crate::types::{Compass, Direction, SpriteCategory};

/// Field name -> value, or `None` when the read failed this tick.
pub type FieldMap = HashMap<&'static str, Option<u32>>;

// ---------------------------------------------------------------------------
// Live sprite slot
// ---------------------------------------------------------------------------

/// One entry from the live 16-slot sprite table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SpriteSlot {
    pub index: usize,
    pub type_id: u8,
    pub state: u8,
    pub x: i32,
    pub y: i32,
}

impl SpriteSlot {
    pub fn is_active(&self) -> bool {
        self.state != 0 && self.type_id != 0
    }

    pub fn is_enemy(&self) -> bool {
        is_enemy_type(self.type_id)
    }

    pub fn name(&self) -> String {
        sprite_name(self.type_id)
    }

    pub fn category(&self) -> SpriteCategory {
        sprite_category(self.type_id)
    }
}

/// A nearby live entity, as returned by the radius queries.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyEntity {
    pub index: usize,
    pub type_id: u8,
    pub name: String,
    pub category: SpriteCategory,
    pub distance: i32,
    pub direction: Compass,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Snapshot of all watched memory values at one instant.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    raw: FieldMap,
    pub sprites: Vec<SpriteSlot>,
    /// Seconds on the poller's monotonic clock.
    pub timestamp: f64,
    pub geometry: Option<Arc<GeometryStore>>,
    /// Tile attribute of the tile directly ahead, when readable.
    pub facing_tile: Option<u8>,
}

impl Snapshot {
    pub fn new(
        raw: FieldMap,
        sprites: Vec<SpriteSlot>,
        timestamp: f64,
        geometry: Option<Arc<GeometryStore>>,
        facing_tile: Option<u8>,
    ) -> Self {
        Self {
            raw,
            sprites,
            timestamp,
            geometry,
            facing_tile,
        }
    }

    /// Field value, defaulting unknown to 0.  Event comparisons must use
    /// [`Snapshot::field`] instead so unknown never reads as zero.
    pub fn get(&self, key: &str) -> u32 {
        self.raw.get(key).copied().flatten().unwrap_or(0)
    }

    /// Field value, or `None` when the read failed.
    pub fn field(&self, key: &str) -> Option<u32> {
        self.raw.get(key).copied().flatten()
    }

    pub fn raw_fields(&self) -> &FieldMap {
        &self.raw
    }

    // -----------------------------------------------------------------------
    // Derived state
    // -----------------------------------------------------------------------

    pub fn hp_hearts(&self) -> f64 {
        f64::from(self.get("hp")) / 8.0
    }

    pub fn max_hp_hearts(&self) -> f64 {
        f64::from(self.get("max_hp")) / 8.0
    }

    pub fn direction(&self) -> Option<Direction> {
        self.field("direction").and_then(Direction::from_register)
    }

    pub fn direction_name(&self) -> &'static str {
        self.direction().map(Direction::name).unwrap_or("unknown")
    }

    pub fn is_indoors(&self) -> bool {
        self.get("indoors") != 0
    }

    pub fn is_in_dungeon(&self) -> bool {
        self.get("main_module") == MODULE_DUNGEON
    }

    pub fn is_on_overworld(&self) -> bool {
        self.get("main_module") == MODULE_OVERWORLD
    }

    pub fn world_name(&self) -> &'static str {
        if self.get("world") != 0 {
            "Dark World"
        } else {
            "Light World"
        }
    }

    /// Overworld screen derived from absolute coordinates.  Large scrolling
    /// areas keep the hardware screen register constant, so identity must
    /// come from position.
    pub fn ow_screen_from_coords(&self) -> Option<u16> {
        if !self.is_on_overworld() {
            return None;
        }
        let x = self.get("link_x");
        let y = self.get("link_y");
        let col = (x >> 9) & 7;
        let row = (y >> 9) & 7;
        let mut screen = (row * 8 + col) as u16;
        if self.get("world") != 0 {
            screen += 0x40;
        }
        Some(screen)
    }

    pub fn facing_tile_name(&self) -> Option<&'static str> {
        let attr = self.facing_tile?;
        if self.is_indoors() && is_indoor_wall_tile(attr) {
            return Some("wall");
        }
        TILE_TYPE_NAMES.get(&attr).copied()
    }

    pub fn dungeon_name(&self) -> &'static str {
        let room = self.get("dungeon_room") as u16;
        DUNGEON_ROOMS.get(&room).copied().unwrap_or("")
    }

    pub fn location_name(&self) -> String {
        if self.is_in_dungeon() {
            let room = self.get("dungeon_room");
            let name = self.dungeon_name();
            if name.is_empty() {
                return format!("Dungeon room {:#06x}", room);
            }
            return format!("{}, room {:#06x}", name, room);
        }
        let screen = self
            .ow_screen_from_coords()
            .unwrap_or(self.get("ow_screen") as u16);
        match OVERWORLD_NAMES.get(&screen) {
            Some(name) => (*name).to_string(),
            None => format!("Overworld {:#04x}", screen),
        }
    }

    /// Area description for the `look` command.
    pub fn area_description(&self) -> String {
        if self.is_in_dungeon() {
            if let Some(geometry) = &self.geometry {
                let room_id = self.get("dungeon_room") as u16;
                if let Some(room) = geometry.room(room_id) {
                    if room.is_described() {
                        return room.to_full();
                    }
                }
            }
            let name = self.dungeon_name();
            return DUNGEON_DESCRIPTIONS
                .get(name)
                .copied()
                .unwrap_or("")
                .to_string();
        }
        let screen = self
            .ow_screen_from_coords()
            .unwrap_or(self.get("ow_screen") as u16);
        let mut desc = OVERWORLD_DESCRIPTIONS
            .get(&screen)
            .copied()
            .unwrap_or("")
            .to_string();
        if let Some(geometry) = &self.geometry {
            let sprite_text = geometry.format_ow_sprites(screen);
            if !sprite_text.is_empty() {
                if desc.is_empty() {
                    desc = sprite_text;
                } else {
                    desc = format!("{} {}", desc, sprite_text);
                }
            }
        }
        desc
    }

    /// Brief room description announced on room change, when available.
    pub fn area_brief(&self) -> String {
        if !self.is_in_dungeon() {
            return String::new();
        }
        let Some(geometry) = &self.geometry else {
            return String::new();
        };
        let room_id = self.get("dungeon_room") as u16;
        match geometry.room(room_id) {
            Some(room) if room.is_described() => room.to_brief(),
            _ => String::new(),
        }
    }

    /// Display name for an inventory field's current value, or `None` when
    /// the slot is empty.
    pub fn item_name(&self, key: &str) -> Option<&'static str> {
        let val = self.get(key);
        if let Some(name) = boolean_item_name(key) {
            return if val != 0 { Some(name) } else { None };
        }
        if key.starts_with("bottle_") {
            let name = BOTTLE_NAMES.get(val as usize).copied()?;
            return if name == "no bottle" { None } else { Some(name) };
        }
        let name = tiered_name(key, val)?;
        if name == "none" {
            None
        } else {
            Some(name)
        }
    }

    // -----------------------------------------------------------------------
    // Spoken-sentence formatters
    // -----------------------------------------------------------------------

    fn format_hearts(value: f64) -> String {
        if value == value.trunc() {
            format!("{}", value as i64)
        } else {
            format!("{:.1}", value)
        }
    }

    pub fn format_health(&self) -> String {
        format!(
            "{}/{} hearts",
            Self::format_hearts(self.hp_hearts()),
            Self::format_hearts(self.max_hp_hearts())
        )
    }

    pub fn format_position(&self) -> String {
        format!(
            "Position: ({}, {}), facing {}. Location: {}, {}{}.",
            self.get("link_x"),
            self.get("link_y"),
            self.direction_name(),
            self.location_name(),
            self.world_name(),
            if self.is_indoors() {
                ", indoors"
            } else {
                ", outdoors"
            },
        )
    }

    pub fn format_resources(&self) -> String {
        let keys = self.get("keys");
        let keys = if keys == KEYS_UNINITIALIZED { 0 } else { keys };
        format!(
            "Health: {}. Magic: {}. Rupees: {}. Bombs: {}. Arrows: {}. Keys: {}.",
            self.format_health(),
            self.get("magic"),
            self.get("rupees"),
            self.get("bombs"),
            self.get("arrows"),
            keys,
        )
    }

    pub fn format_equipment(&self) -> String {
        let mut parts: Vec<&'static str> = Vec::new();
        for key in ["sword", "shield", "armor", "gloves"] {
            if let Some(name) = tiered_name(key, self.get(key)) {
                if !name.starts_with("no ") {
                    parts.push(name);
                }
            }
        }
        for key in ["boots", "flippers", "moon_pearl"] {
            if self.get(key) != 0 {
                if let Some(name) = boolean_item_name(key) {
                    parts.push(name);
                }
            }
        }
        if parts.is_empty() {
            "Equipment: none.".to_string()
        } else {
            format!("Equipment: {}.", parts.join(", "))
        }
    }

    pub fn format_inventory(&self) -> String {
        let mut items: Vec<&'static str> = Vec::new();
        for key in [
            "bow",
            "boomerang",
            "mushroom_powder",
            "flute_shovel",
            "mirror",
            "hookshot",
            "fire_rod",
            "ice_rod",
            "bombos",
            "ether",
            "quake",
            "lamp",
            "hammer",
            "bug_net",
            "book",
            "cane_somaria",
            "cane_byrna",
            "magic_cape",
            "bottle_1",
            "bottle_2",
            "bottle_3",
            "bottle_4",
        ] {
            if let Some(name) = self.item_name(key) {
                items.push(name);
            }
        }
        if items.is_empty() {
            "Inventory: empty.".to_string()
        } else {
            format!("Inventory: {}.", items.join(", "))
        }
    }

    pub fn format_progress(&self) -> String {
        let pendants = self.get("pendants");
        let crystals = self.get("crystals");
        let mut pendant_names = Vec::new();
        if pendants & 0x04 != 0 {
            pendant_names.push("Courage (green)");
        }
        if pendants & 0x02 != 0 {
            pendant_names.push("Power (blue)");
        }
        if pendants & 0x01 != 0 {
            pendant_names.push("Wisdom (red)");
        }
        format!(
            "Pendants: {}. Crystals: {}/7. Progress indicator: {}.",
            if pendant_names.is_empty() {
                "none".to_string()
            } else {
                pendant_names.join(", ")
            },
            crystals.count_ones(),
            self.get("progress"),
        )
    }

    // -----------------------------------------------------------------------
    // Radius queries
    // -----------------------------------------------------------------------

    fn nearby(&self, radius: i32, want_enemy: bool) -> Vec<NearbyEntity> {
        let link_x = self.get("link_x") as i32;
        let link_y = self.get("link_y") as i32;
        let r_sq = i64::from(radius) * i64::from(radius);
        let mut result = Vec::new();
        for s in &self.sprites {
            if !s.is_active() || s.is_enemy() != want_enemy {
                continue;
            }
            if !want_enemy && s.category() == SpriteCategory::Unknown {
                continue;
            }
            let dx = s.x - link_x;
            let dy = s.y - link_y;
            let dist_sq = i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy);
            if dist_sq <= r_sq {
                result.push(NearbyEntity {
                    index: s.index,
                    type_id: s.type_id,
                    name: s.name(),
                    category: s.category(),
                    distance: (dist_sq as f64).sqrt() as i32,
                    direction: Compass::from_delta(dx, dy),
                });
            }
        }
        result.sort_by_key(|e| e.distance);
        result
    }

    pub fn nearby_enemies(&self) -> Vec<NearbyEntity> {
        self.nearby(ENEMY_DETECT_RADIUS, true)
    }

    pub fn nearby_enemies_within(&self, radius: i32) -> Vec<NearbyEntity> {
        self.nearby(radius, true)
    }

    pub fn nearby_sprites(&self) -> Vec<NearbyEntity> {
        self.nearby(INTERACT_RADIUS, false)
    }

    pub fn format_enemies(&self) -> String {
        let enemies = self.nearby_enemies();
        if enemies.is_empty() {
            return "No enemies nearby.".to_string();
        }
        let parts: Vec<String> = enemies
            .iter()
            .map(|e| format!("{} to the {}", e.name, e.direction))
            .collect();
        format!("Nearby: {}.", parts.join(", "))
    }

    // -----------------------------------------------------------------------
    // Debug dump
    // -----------------------------------------------------------------------

    /// Comprehensive state snapshot for the `dump` command.
    pub fn dump_value(&self) -> serde_json::Value {
        let raw: serde_json::Map<String, serde_json::Value> = self
            .raw
            .iter()
            .map(|(k, v)| {
                let val = match v {
                    Some(v) => json!(format!("0x{:X}", v)),
                    None => serde_json::Value::Null,
                };
                ((*k).to_string(), val)
            })
            .collect();

        let live_sprites: Vec<serde_json::Value> = self
            .sprites
            .iter()
            .filter(|s| s.is_active())
            .map(|s| {
                json!({
                    "slot": s.index,
                    "type_id": format!("0x{:02X}", s.type_id),
                    "name": s.name(),
                    "is_enemy": s.is_enemy(),
                    "state": s.state,
                    "x": s.x,
                    "y": s.y,
                })
            })
            .collect();

        json!({
            "raw_memory": raw,
            "interpreted": {
                "location": self.location_name(),
                "world": self.world_name(),
                "indoors": self.is_indoors(),
                "in_dungeon": self.is_in_dungeon(),
                "on_overworld": self.is_on_overworld(),
                "direction": self.direction_name(),
                "health": self.format_health(),
                "position": {"x": self.get("link_x"), "y": self.get("link_y")},
                "dungeon_room": format!("0x{:04X}", self.get("dungeon_room")),
                "ow_screen": format!("0x{:04X}", self.get("ow_screen")),
                "ow_screen_from_coords": self.ow_screen_from_coords()
                    .map(|s| format!("0x{:02X}", s)),
            },
            "live_sprites": live_sprites,
            "nearby_enemies": self.nearby_enemies(),
            "area_description": self.area_description(),
            "area_brief": self.area_brief(),
        })
    }
}
