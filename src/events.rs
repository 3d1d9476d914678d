//! Event detection: field-by-field diff of two consecutive snapshots plus
//! the movement-blocked heuristic.
//!
//! Every rule that compares a field skips when either side is unknown; a
//! failed read must never masquerade as a zero and false-fire an
//! announcement.

use serde_json::json;

use crate::proximity::{ProximityEngine, CONE_IGNORE_TILES};
use crate::snapshot::Snapshot;
use crate::tables::{
    is_gameplay_module, is_item_drop, sprite_name, tiered_name, BODY_OFFSET_X, BODY_OFFSET_Y,
    DUNGEON_DESCRIPTIONS, EQUIPMENT_KEYS, INVENTORY_KEYS, KEYS_UNINITIALIZED, LINK_STATE_SWIMMING,
    MODULE_BOSS_VICTORY, MODULE_DEATH, MODULE_DIALOG, MODULE_DUNGEON, MODULE_OVERWORLD,
    OVERWORLD_NAMES,
};
use crate::types::{Compass, Event, EventKind, EventPriority, Zone};

const LOW_HEALTH_THRESHOLD: u32 = 16; // two hearts, 8 units each

/// Compares previous and current snapshots to emit events.
pub struct EventDetector {
    blocked_threshold: u32,
    blocked_count: u32,
    blocked_announced: bool,
}

impl EventDetector {
    pub fn new(blocked_threshold: u32) -> Self {
        Self {
            blocked_threshold: blocked_threshold.max(1),
            blocked_count: 0,
            blocked_announced: false,
        }
    }

    /// Diff two consecutive snapshots.
    pub fn detect(
        &mut self,
        prev: &Snapshot,
        curr: &Snapshot,
        proximity: &ProximityEngine,
    ) -> Vec<Event> {
        let mut events = Vec::new();

        let curr_mod = curr.get("main_module");
        let prev_mod = prev.get("main_module");

        // Death pre-empts everything else this tick.
        if curr_mod == MODULE_DEATH && prev_mod != MODULE_DEATH {
            events.push(Event::new(
                EventKind::Death,
                EventPriority::High,
                "You died!\nSave and Continue\nSave and Quit\nDo not Save and Continue",
            ));
            return events;
        }

        if !is_gameplay_module(curr_mod) && !is_gameplay_module(prev_mod) {
            return events;
        }

        // Health
        if let (Some(prev_hp), Some(curr_hp)) = (prev.field("hp"), curr.field("hp")) {
            if curr_hp < prev_hp && prev_hp > 0 {
                events.push(Event::with_data(
                    EventKind::DamageTaken,
                    EventPriority::High,
                    format!("Damage taken! Health: {}.", curr.format_health()),
                    json!({"prev_hp": prev_hp, "curr_hp": curr_hp}),
                ));
            }
            if curr_hp <= LOW_HEALTH_THRESHOLD && curr_hp > 0 && prev_hp > LOW_HEALTH_THRESHOLD {
                events.push(Event::new(
                    EventKind::LowHealth,
                    EventPriority::High,
                    format!("Low health! Only {} remaining.", curr.format_health()),
                ));
            }
            if curr_hp > prev_hp && prev_hp > 0 && curr_mod != MODULE_DEATH {
                events.push(Event::new(
                    EventKind::HealthRestored,
                    EventPriority::Low,
                    format!("Health restored. {}.", curr.format_health()),
                ));
            }
        }

        // Pit proximity flag arming
        if let (Some(prev_pit), Some(curr_pit)) =
            (prev.field("pit_proximity"), curr.field("pit_proximity"))
        {
            if matches!(curr_pit, 1 | 2) && prev_pit == 0 {
                events.push(Event::new(
                    EventKind::NearPit,
                    EventPriority::High,
                    "Warning: near a pit!",
                ));
            }
        }

        // Dungeon room change
        if let (Some(prev_room), Some(curr_room)) =
            (prev.field("dungeon_room"), curr.field("dungeon_room"))
        {
            if curr_room != prev_room && curr.is_in_dungeon() {
                let dungeon = curr.dungeon_name();
                let msg = if dungeon.is_empty() {
                    format!("Room {:#06x}", curr_room)
                } else {
                    dungeon.to_string()
                };
                events.push(Event::with_data(
                    EventKind::RoomChange,
                    EventPriority::Medium,
                    msg,
                    json!({"room": curr_room, "dungeon": dungeon}),
                ));
            }
        }

        // Overworld screen change, derived from coordinates so transitions
        // within large scrolling areas are still detected.
        let curr_ow = curr.ow_screen_from_coords();
        let prev_ow = prev.ow_screen_from_coords();
        if let Some(screen) = curr_ow {
            if curr_ow != prev_ow {
                let area_id = curr.get("ow_screen") as u16;
                let area = OVERWORLD_NAMES
                    .get(&screen)
                    .or_else(|| OVERWORLD_NAMES.get(&area_id))
                    .map(|n| (*n).to_string())
                    .unwrap_or_else(|| format!("Area {:#04x}", screen));
                events.push(Event::with_data(
                    EventKind::RoomChange,
                    EventPriority::Medium,
                    area.clone(),
                    json!({"screen": screen, "name": area}),
                ));
            }
        }

        // Light/dark world transition
        if let (Some(prev_world), Some(curr_world)) = (prev.field("world"), curr.field("world")) {
            if curr_world != prev_world {
                events.push(Event::new(
                    EventKind::WorldTransition,
                    EventPriority::Medium,
                    format!("Transitioned to the {}.", curr.world_name()),
                ));
            }
        }

        // Dungeon enter / exit
        if prev_mod == MODULE_OVERWORLD && curr_mod == MODULE_DUNGEON {
            let dungeon = curr.dungeon_name();
            let dungeon_label = if dungeon.is_empty() { "a dungeon" } else { dungeon };
            let mut msg = format!("Entered {}.", dungeon_label);
            if let Some(desc) = DUNGEON_DESCRIPTIONS.get(dungeon) {
                msg.push(' ');
                msg.push_str(desc);
            }
            events.push(Event::with_data(
                EventKind::DungeonEnterExit,
                EventPriority::Medium,
                msg,
                json!({"entered": true, "dungeon": dungeon_label}),
            ));
        } else if prev_mod == MODULE_DUNGEON && curr_mod == MODULE_OVERWORLD {
            events.push(Event::with_data(
                EventKind::DungeonEnterExit,
                EventPriority::Medium,
                "Exited the dungeon to the overworld.",
                json!({"entered": false}),
            ));
        }

        // Camera transition (submodule leaves zero during gameplay)
        if let (Some(prev_sub), Some(curr_sub)) = (prev.field("submodule"), curr.field("submodule"))
        {
            if matches!(curr_mod, MODULE_DUNGEON | MODULE_OVERWORLD)
                && curr_sub != 0
                && prev_sub == 0
            {
                let msg = match curr.direction() {
                    Some(dir) => format!("Transitioning to the {}.", dir),
                    None => "Transitioning.".to_string(),
                };
                events.push(Event::new(EventKind::Transition, EventPriority::Low, msg));
            }
        }

        // Floor change
        if let (Some(prev_floor), Some(curr_floor)) = (prev.field("floor"), curr.field("floor")) {
            if curr.is_in_dungeon() && curr_floor != prev_floor {
                events.push(Event::with_data(
                    EventKind::FloorChange,
                    EventPriority::Medium,
                    format!("Changed floors. Now on floor {}.", curr_floor),
                    json!({"floor": curr_floor}),
                ));
            }
        }

        // Entered / exited building
        if let (Some(prev_in), Some(curr_in)) = (prev.field("indoors"), curr.field("indoors")) {
            if curr_in != prev_in {
                let msg = if curr.is_indoors() {
                    "Entered a building."
                } else {
                    "Exited to the outdoors."
                };
                events.push(Event::new(EventKind::EnteredBuilding, EventPriority::Low, msg));
            }
        }

        // Item acquired (slot 0 -> known non-zero)
        for key in INVENTORY_KEYS.iter() {
            if prev.field(key) == Some(0) && curr.field(key).map(|v| v != 0).unwrap_or(false) {
                if let Some(name) = curr.item_name(key) {
                    events.push(Event::with_data(
                        EventKind::ItemAcquired,
                        EventPriority::Medium,
                        format!("Acquired: {}!", name),
                        json!({"item": key, "name": name}),
                    ));
                }
            }
        }

        // Equipment upgrade
        for key in EQUIPMENT_KEYS {
            if let (Some(prev_tier), Some(curr_tier)) = (prev.field(key), curr.field(key)) {
                if curr_tier > prev_tier {
                    let name = tiered_name(key, curr_tier).unwrap_or("unknown");
                    events.push(Event::with_data(
                        EventKind::EquipmentUpgrade,
                        EventPriority::Medium,
                        format!("Equipment upgrade: {}!", name),
                        json!({"item": key, "name": name}),
                    ));
                }
            }
        }

        // Key acquired (the sentinel value outside dungeons is not a count)
        if let (Some(prev_keys), Some(curr_keys)) = (prev.field("keys"), curr.field("keys")) {
            if curr_keys != KEYS_UNINITIALIZED
                && prev_keys != KEYS_UNINITIALIZED
                && curr_keys > prev_keys
            {
                events.push(Event::new(
                    EventKind::KeyAcquired,
                    EventPriority::Low,
                    format!("Got a key! Keys: {}.", curr_keys),
                ));
            }
        }

        // Progress milestones
        if let (Some(prev_p), Some(curr_p)) = (prev.field("pendants"), curr.field("pendants")) {
            if curr_p != prev_p {
                events.push(Event::with_data(
                    EventKind::ProgressMilestone,
                    EventPriority::Medium,
                    "Pendant acquired!",
                    json!({"pendants": curr_p}),
                ));
            }
        }
        if let (Some(prev_c), Some(curr_c)) = (prev.field("crystals"), curr.field("crystals")) {
            if curr_c != prev_c {
                events.push(Event::with_data(
                    EventKind::ProgressMilestone,
                    EventPriority::Medium,
                    format!("Crystal acquired! ({}/7)", curr_c.count_ones()),
                    json!({"crystals": curr_c}),
                ));
            }
        }

        // Boss victory
        if curr_mod == MODULE_BOSS_VICTORY && prev_mod != MODULE_BOSS_VICTORY {
            events.push(Event::new(
                EventKind::BossVictory,
                EventPriority::Medium,
                "Boss defeated!",
            ));
        }

        // Swimming state
        if let (Some(prev_state), Some(curr_state)) =
            (prev.field("link_state"), curr.field("link_state"))
        {
            if curr_state == LINK_STATE_SWIMMING && prev_state != LINK_STATE_SWIMMING {
                events.push(Event::new(EventKind::Swimming, EventPriority::Low, "Entered water."));
            } else if prev_state == LINK_STATE_SWIMMING && curr_state != LINK_STATE_SWIMMING {
                events.push(Event::new(EventKind::Swimming, EventPriority::Low, "Exited water."));
            }
        }

        // Dialog / text box appeared
        if curr_mod == MODULE_DIALOG && prev_mod != MODULE_DIALOG {
            let dialog_id = curr.get("dialog_id") as usize;
            let text = curr
                .geometry
                .as_deref()
                .and_then(|g| g.dialog(dialog_id))
                .map(str::to_string)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Text appeared on screen.".to_string());
            events.push(Event::new(EventKind::Dialog, EventPriority::Medium, text));
        }

        if is_gameplay_module(curr_mod) {
            self.detect_sprite_events(prev, curr, &mut events);
            self.detect_blocked(prev, curr, proximity, &mut events);
        }

        events
    }

    // -----------------------------------------------------------------------
    // Sprite-table diffs
    // -----------------------------------------------------------------------

    fn detect_sprite_events(&self, prev: &Snapshot, curr: &Snapshot, events: &mut Vec<Event>) {
        // Enemy proximity: any (slot, type) pair newly inside the radius.
        let curr_nearby = curr.nearby_enemies();
        let prev_nearby: Vec<(usize, u8)> = prev
            .nearby_enemies()
            .iter()
            .map(|e| (e.index, e.type_id))
            .collect();
        for e in &curr_nearby {
            if !prev_nearby.contains(&(e.index, e.type_id)) {
                events.push(Event::new(
                    EventKind::EnemyNearby,
                    EventPriority::High,
                    format!("{} to the {}!", e.name, e.direction),
                ));
            }
        }

        // Item drops: a slot that previously held something else now holds
        // a drop type.
        for cs in &curr.sprites {
            if !is_item_drop(cs.type_id) || !cs.is_active() {
                continue;
            }
            if let Some(ps) = prev.sprites.get(cs.index) {
                if ps.type_id == cs.type_id && ps.is_active() {
                    continue; // same item, already announced
                }
            }
            events.push(Event::new(
                EventKind::ItemDrop,
                EventPriority::Medium,
                format!("{} dropped!", sprite_name(cs.type_id)),
            ));
        }

        // Non-enemy sprite proximity (NPCs, interactables, objects).
        let curr_spr = curr.nearby_sprites();
        let prev_spr: Vec<(usize, u8)> = prev
            .nearby_sprites()
            .iter()
            .map(|e| (e.index, e.type_id))
            .collect();
        for e in &curr_spr {
            if !prev_spr.contains(&(e.index, e.type_id)) {
                events.push(Event::new(
                    EventKind::SpriteNearby,
                    EventPriority::Medium,
                    format!("{} to the {}.", e.name, e.direction),
                ));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Movement blocked
    // -----------------------------------------------------------------------

    fn detect_blocked(
        &mut self,
        prev: &Snapshot,
        curr: &Snapshot,
        proximity: &ProximityEngine,
        events: &mut Vec<Event>,
    ) {
        let joypad = curr.field("joypad_dir").map(|v| v & 0x0F);
        let pos_same = match (
            curr.field("link_x"),
            curr.field("link_y"),
            prev.field("link_x"),
            prev.field("link_y"),
        ) {
            (Some(cx), Some(cy), Some(px), Some(py)) => cx == px && cy == py,
            _ => false,
        };

        if joypad.map(|j| j != 0).unwrap_or(false) && pos_same {
            self.blocked_count += 1;
            if self.blocked_count >= self.blocked_threshold && !self.blocked_announced {
                let msg = match self.identify_blocker(curr, proximity) {
                    Some(blocker) => format!("Blocked by {}.", blocker),
                    None => "Blocked.".to_string(),
                };
                events.push(Event::new(EventKind::Blocked, EventPriority::Medium, msg));
                self.blocked_announced = true;
            }
        } else {
            self.blocked_count = 0;
            self.blocked_announced = false;
        }
    }

    /// Name whatever is blocking the player, or `None`.
    ///
    /// Prefers the nearest tracked object the player is facing; falls back
    /// to probing up to 3 tiles ahead through the tile-name lookup.
    fn identify_blocker(&self, state: &Snapshot, proximity: &ProximityEngine) -> Option<String> {
        let link_x = state.get("link_x") as i32 + BODY_OFFSET_X;
        let link_y = state.get("link_y") as i32 + BODY_OFFSET_Y;
        let link_dir = state.direction();

        let mut best_dist = f64::INFINITY;
        let mut best_name: Option<String> = None;
        for obj in proximity.tracker().all_objects() {
            if !matches!(obj.zone, Some(Zone::Facing | Zone::Nearby)) {
                continue;
            }
            let dx = obj.world_x - link_x;
            let dy = obj.world_y - link_y;
            let direction = Compass::from_delta(dx, dy);
            let aligned = direction == Compass::Here
                || link_dir.map(|d| direction.matches(d)).unwrap_or(false);
            if !aligned {
                continue;
            }
            let dist = f64::from(dx * dx + dy * dy).sqrt();
            if dist < best_dist {
                best_dist = dist;
                best_name = Some(obj.name.clone());
            }
        }
        if best_name.is_some() {
            return best_name;
        }

        // Probe tiles ahead, skipping names that never block movement, to
        // find the actual visual obstruction.
        let dir = link_dir?;
        let indoors = state.is_indoors();
        let ltx = (state.get("link_x") as i32 + 8) >> 3;
        let lty = (state.get("link_y") as i32 + 12) >> 3;
        let (step_x, step_y) = dir.tile_step();
        for i in 1..=3 {
            let tx = ltx + step_x * i;
            let ty = lty + step_y * i;
            if let Some(name) = proximity.read_tile_name(state, tx, ty, indoors) {
                if !CONE_IGNORE_TILES.contains(&name) {
                    return Some(name.to_string());
                }
            }
        }
        None
    }
}
