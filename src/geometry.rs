//! Static room/screen geometry: the data surface produced by the one-time
//! ROM parse and consumed by the tracking engine.
//!
//! The parser itself lives outside this crate; everything here is the
//! contract it must fill in: rooms with headers/doors/objects/sprites,
//! per-screen overworld sprites, dialog strings, and the map16/map8 tile
//! attribute tables used for scroll-compensated overworld lookups.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::tables::{
    DOOR_DIRECTION_NAMES, DOOR_TYPE_NAMES, DUNGEON_ROOMS, MAP16_NAMES, OBJECT_TYPE_NAMES,
    SPRITE_TYPES,
};
use crate::types::SpriteCategory;

// ---------------------------------------------------------------------------
// Room header
// ---------------------------------------------------------------------------

/// Relevant slice of a dungeon room header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomHeader {
    pub tag1: u8,
    pub tag2: u8,
    pub spriteset: u8,
    pub msg_id: u16,
}

impl RoomHeader {
    pub fn is_dark(&self) -> bool {
        self.tag1 == 0x02
    }

    pub fn has_kill_to_open(&self) -> bool {
        self.tag1 == 0x08
    }

    pub fn has_moving_floor(&self) -> bool {
        self.tag1 == 0x04
    }

    pub fn has_moving_water(&self) -> bool {
        self.tag1 == 0x06
    }

    pub fn has_water_gates(&self) -> bool {
        self.tag1 == 0x0A
    }
}

// ---------------------------------------------------------------------------
// Room contents
// ---------------------------------------------------------------------------

/// A sprite placement from room data (tile coordinates, not live position).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSprite {
    pub x_tile: i32,
    pub y_tile: i32,
    pub sprite_type: u8,
    pub is_lower_layer: bool,
}

impl RoomSprite {
    pub fn name(&self) -> String {
        match SPRITE_TYPES.get(&self.sprite_type) {
            Some((name, _)) => (*name).to_string(),
            None => format!("sprite {:#04x}", self.sprite_type),
        }
    }

    pub fn category(&self) -> SpriteCategory {
        SPRITE_TYPES
            .get(&self.sprite_type)
            .map(|(_, cat)| *cat)
            .unwrap_or(SpriteCategory::Unknown)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDoor {
    pub direction: u8,
    pub door_type: u8,
    pub position: u8,
}

impl RoomDoor {
    pub fn direction_name(&self) -> String {
        match DOOR_DIRECTION_NAMES.get(&self.direction) {
            Some(name) => (*name).to_string(),
            None => format!("direction {:#04x}", self.direction),
        }
    }

    pub fn type_name(&self) -> String {
        match DOOR_TYPE_NAMES.get(&self.door_type) {
            Some(name) => (*name).to_string(),
            None => format!("door type {:#04x}", self.door_type),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomObject {
    pub x_tile: i32,
    pub y_tile: i32,
    pub object_type: u16,
}

impl RoomObject {
    pub fn name(&self) -> String {
        match OBJECT_TYPE_NAMES.get(&self.object_type) {
            Some((name, _)) => (*name).to_string(),
            None => format!("object {:#04x}", self.object_type),
        }
    }

    /// Announce-filter class (chest/stairs/pit/...), or "unknown".
    pub fn class(&self) -> &'static str {
        OBJECT_TYPE_NAMES
            .get(&self.object_type)
            .map(|(_, class)| *class)
            .unwrap_or("unknown")
    }
}

// ---------------------------------------------------------------------------
// Name formatting helpers
// ---------------------------------------------------------------------------

/// Remove duplicate sprites of the same type at adjacent tiles.  Room data
/// frequently places one logical creature as a pair of neighbouring
/// entries.
pub fn dedup_sprites(sprites: &[RoomSprite]) -> Vec<RoomSprite> {
    let mut by_type: HashMap<u8, Vec<usize>> = HashMap::new();
    for (i, s) in sprites.iter().enumerate() {
        by_type.entry(s.sprite_type).or_default().push(i);
    }
    let mut seen = vec![false; sprites.len()];
    let mut kept_indices: Vec<usize> = Vec::new();
    let mut type_order: Vec<u8> = Vec::new();
    for s in sprites {
        if !type_order.contains(&s.sprite_type) {
            type_order.push(s.sprite_type);
        }
    }
    for ty in type_order {
        let indices = &by_type[&ty];
        for &i in indices {
            if seen[i] {
                continue;
            }
            seen[i] = true;
            kept_indices.push(i);
            let si = &sprites[i];
            for &j in indices {
                if seen[j] {
                    continue;
                }
                let sj = &sprites[j];
                if (si.x_tile - sj.x_tile).abs() <= 1 && (si.y_tile - sj.y_tile).abs() <= 1 {
                    seen[j] = true;
                }
            }
        }
    }
    kept_indices.sort_unstable();
    kept_indices.into_iter().map(|i| sprites[i].clone()).collect()
}

/// Pluralize a name, keeping parenthetical suffixes in place.
fn pluralize(name: &str) -> String {
    let (base, suffix) = match name.find('(') {
        Some(idx) if idx > 0 => (name[..idx].trim_end(), format!(" {}", &name[idx..])),
        _ => (name, String::new()),
    };
    if base.split_whitespace().any(|w| w.ends_with('s')) {
        return name.to_string();
    }
    if base.ends_with("ch") || base.ends_with("sh") || base.ends_with('x') || base.ends_with('z') {
        format!("{}es{}", base, suffix)
    } else {
        format!("{}s{}", base, suffix)
    }
}

/// "3 Stalfos, Keese" style listing with insertion-ordered counts.
fn format_name_counts(names: &[String]) -> String {
    let mut order: Vec<&String> = Vec::new();
    let mut counts: HashMap<&String, usize> = HashMap::new();
    for name in names {
        if !counts.contains_key(name) {
            order.push(name);
        }
        *counts.entry(name).or_insert(0) += 1;
    }
    order
        .into_iter()
        .map(|name| {
            let count = counts[name];
            if count > 1 {
                format!("{} {}", count, pluralize(name))
            } else {
                name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Room data
// ---------------------------------------------------------------------------

/// Everything the parse produced for one dungeon room.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomData {
    pub room_id: u16,
    pub header: Option<RoomHeader>,
    pub sprites: Vec<RoomSprite>,
    pub doors: Vec<RoomDoor>,
    pub objects: Vec<RoomObject>,
}

impl RoomData {
    pub fn dungeon_name(&self) -> &'static str {
        DUNGEON_ROOMS.get(&self.room_id).copied().unwrap_or("")
    }

    /// True when there is anything worth describing.
    pub fn is_described(&self) -> bool {
        !self.sprites.is_empty()
            || !self.doors.is_empty()
            || self.header.as_ref().map(|h| h.tag1 != 0).unwrap_or(false)
    }

    fn sprite_groups(&self) -> HashMap<SpriteCategory, Vec<String>> {
        let mut groups: HashMap<SpriteCategory, Vec<String>> = HashMap::new();
        for s in dedup_sprites(&self.sprites) {
            groups.entry(s.category()).or_default().push(s.name());
        }
        groups
    }

    fn object_groups(&self) -> HashMap<&'static str, Vec<String>> {
        let mut groups: HashMap<&'static str, Vec<String>> = HashMap::new();
        for obj in &self.objects {
            groups.entry(obj.class()).or_default().push(obj.name());
        }
        groups
    }

    fn format_doors(&self) -> String {
        if self.doors.is_empty() {
            return String::new();
        }
        // Collapse co-located doors, preferring the typed entry over the
        // generic "open doorway" placeholder.
        let mut by_loc: HashMap<(u8, u8), Vec<&RoomDoor>> = HashMap::new();
        let mut loc_order: Vec<(u8, u8)> = Vec::new();
        for d in &self.doors {
            let loc = (d.direction, d.position);
            if !by_loc.contains_key(&loc) {
                loc_order.push(loc);
            }
            by_loc.entry(loc).or_default().push(d);
        }
        let mut parts = Vec::new();
        for loc in loc_order {
            let group = &by_loc[&loc];
            let specific: Vec<&&RoomDoor> = group.iter().filter(|d| d.door_type != 0).collect();
            let chosen: Vec<&RoomDoor> = if specific.is_empty() {
                group.clone()
            } else {
                specific.into_iter().copied().collect()
            };
            for d in chosen {
                parts.push(format!("{} to the {}", d.type_name(), d.direction_name()));
            }
        }
        parts.join(", ")
    }

    fn conditions(&self) -> Vec<&'static str> {
        let mut conditions = Vec::new();
        if let Some(header) = &self.header {
            if header.is_dark() {
                conditions.push("Dark room");
            }
            if header.has_kill_to_open() {
                conditions.push("Defeat all enemies to open the doors");
            }
            if header.has_moving_floor() {
                conditions.push("Moving floor");
            }
            if header.has_moving_water() {
                conditions.push("Moving water");
            }
            if header.has_water_gates() {
                conditions.push("Water level gates");
            }
        }
        conditions
    }

    /// Brief description auto-announced on room change.
    pub fn to_brief(&self) -> String {
        let mut parts = Vec::new();

        let dungeon = self.dungeon_name();
        if dungeon.is_empty() {
            parts.push(format!("Room {:#06x}", self.room_id));
        } else {
            parts.push(format!("{}, room {:#06x}", dungeon, self.room_id));
        }

        let conditions = self.conditions();
        if !conditions.is_empty() {
            parts.push(conditions.join(". "));
        }

        let doors = self.format_doors();
        if !doors.is_empty() {
            parts.push(format!("Exits: {}", doors));
        }

        let groups = self.sprite_groups();
        for cat in [SpriteCategory::Boss, SpriteCategory::Enemy] {
            if let Some(names) = groups.get(&cat) {
                parts.push(format_name_counts(names));
            }
        }

        format!("{}.", parts.join(". "))
    }

    /// Full description for the `look` command.
    pub fn to_full(&self) -> String {
        let mut lines = Vec::new();

        let dungeon = self.dungeon_name();
        if dungeon.is_empty() {
            lines.push(format!("Room {:#06x}.", self.room_id));
        } else {
            lines.push(format!("{}, room {:#06x}.", dungeon, self.room_id));
        }

        for cond in self.conditions() {
            match cond {
                "Dark room" => lines.push("This room is dark. Use the Lamp to see.".to_string()),
                other => lines.push(format!("{}.", other)),
            }
        }

        let doors = self.format_doors();
        if !doors.is_empty() {
            lines.push(format!("Exits: {}.", doors));
        }

        let obj_groups = self.object_groups();
        let mut feature_parts = Vec::new();
        for class in [
            "chest",
            "stairs",
            "switch",
            "torch",
            "block",
            "interactable",
            "feature",
        ] {
            if let Some(names) = obj_groups.get(class) {
                feature_parts.push(format_name_counts(names));
            }
        }
        if !feature_parts.is_empty() {
            lines.push(format!("Features: {}.", feature_parts.join(", ")));
        }

        let sprite_groups = self.sprite_groups();
        let mut hazard_parts: Vec<String> = Vec::new();
        for class in ["hazard", "pit", "water"] {
            if let Some(names) = obj_groups.get(class) {
                hazard_parts.extend(names.iter().cloned());
            }
        }
        if let Some(names) = sprite_groups.get(&SpriteCategory::Hazard) {
            hazard_parts.extend(names.iter().cloned());
        }
        if !hazard_parts.is_empty() {
            lines.push(format!("Hazards: {}.", format_name_counts(&hazard_parts)));
        }

        if let Some(names) = sprite_groups.get(&SpriteCategory::Enemy) {
            lines.push(format!("Enemies: {}.", format_name_counts(names)));
        }
        if let Some(names) = sprite_groups.get(&SpriteCategory::Boss) {
            lines.push(format!("Boss: {}.", format_name_counts(names)));
        }
        if let Some(names) = sprite_groups.get(&SpriteCategory::Npc) {
            lines.push(format!("NPCs: {}.", format_name_counts(names)));
        }
        if let Some(names) = sprite_groups.get(&SpriteCategory::Interactable) {
            lines.push(format!("Interactables: {}.", format_name_counts(names)));
        }

        lines.join("\n")
    }
}

// ---------------------------------------------------------------------------
// Geometry store
// ---------------------------------------------------------------------------

/// All parsed geometry, keyed by room/screen id.
#[derive(Debug, Default)]
pub struct GeometryStore {
    rooms: HashMap<u16, RoomData>,
    ow_sprites: HashMap<u16, Vec<RoomSprite>>,
    dialog_strings: Vec<String>,
    /// map16 index -> four map8 entries (2-byte each, quadrant-ordered).
    map16_to_map8: Option<Vec<u16>>,
    /// map8 index -> tile attribute byte.
    map8_to_attr: Option<Vec<u8>>,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_room(&mut self, room: RoomData) {
        self.rooms.insert(room.room_id, room);
    }

    pub fn insert_ow_sprites(&mut self, screen: u16, sprites: Vec<RoomSprite>) {
        self.ow_sprites.insert(screen, sprites);
    }

    pub fn set_dialog_strings(&mut self, strings: Vec<String>) {
        self.dialog_strings = strings;
    }

    pub fn set_tile_tables(&mut self, map16_to_map8: Vec<u16>, map8_to_attr: Vec<u8>) {
        self.map16_to_map8 = Some(map16_to_map8);
        self.map8_to_attr = Some(map8_to_attr);
    }

    pub fn room(&self, room_id: u16) -> Option<&RoomData> {
        self.rooms.get(&room_id)
    }

    pub fn ow_sprites(&self, screen: u16) -> &[RoomSprite] {
        self.ow_sprites
            .get(&screen)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn dialog(&self, dialog_id: usize) -> Option<&str> {
        self.dialog_strings.get(dialog_id).map(String::as_str)
    }

    pub fn dialog_count(&self) -> usize {
        self.dialog_strings.len()
    }

    /// Graphic-based name for a map16 tile, or `None`.
    pub fn ow_tile_name(&self, map16_index: u16) -> Option<&'static str> {
        MAP16_NAMES.get(&map16_index).copied()
    }

    /// Tile attribute for one 8-px sub-tile of a map16 cell.
    ///
    /// `x` is the 8-px tile column and `y` the pixel row; their low bits
    /// select the quadrant.  Attributes 0x10-0x1B fold in the map8 flip
    /// bit, matching the game's own lookup.
    pub fn ow_tile_attr(&self, map16_index: u16, x: i32, y: i32) -> u8 {
        let (Some(map16_to_map8), Some(map8_to_attr)) = (&self.map16_to_map8, &self.map8_to_attr)
        else {
            return 0;
        };
        let mut t = (map16_index as usize) * 4;
        t |= ((y & 8) >> 2) as usize;
        t |= (x & 1) as usize;
        let Some(&map8) = map16_to_map8.get(t) else {
            return 0;
        };
        let idx = (map8 & 0x1FF) as usize;
        let Some(&attr) = map8_to_attr.get(idx) else {
            return 0;
        };
        if (0x10..0x1C).contains(&attr) {
            attr | ((map8 >> 14) & 1) as u8
        } else {
            attr
        }
    }

    /// "Creatures: ..." listing for an overworld screen.
    pub fn format_ow_sprites(&self, screen: u16) -> String {
        let sprites = dedup_sprites(self.ow_sprites(screen));
        if sprites.is_empty() {
            return String::new();
        }
        let mut groups: HashMap<SpriteCategory, Vec<String>> = HashMap::new();
        for s in &sprites {
            groups.entry(s.category()).or_default().push(s.name());
        }
        let mut parts = Vec::new();
        for cat in [
            SpriteCategory::Enemy,
            SpriteCategory::Npc,
            SpriteCategory::Boss,
            SpriteCategory::Hazard,
            SpriteCategory::Interactable,
            SpriteCategory::Object,
        ] {
            if let Some(names) = groups.get(&cat) {
                let formatted = format_name_counts(names);
                if !formatted.is_empty() {
                    parts.push(formatted);
                }
            }
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!("Creatures: {}.", parts.join(", "))
        }
    }
}
