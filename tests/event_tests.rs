//! EventDetector unit tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use alttp_bridge::events::EventDetector;
    use alttp_bridge::geometry::GeometryStore;
    use alttp_bridge::proximity::ProximityEngine;
    use alttp_bridge::snapshot::{FieldMap, Snapshot, SpriteSlot};
    use alttp_bridge::types::{EventKind, EventPriority};

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn snap(fields: &[(&'static str, Option<u32>)], sprites: Vec<SpriteSlot>) -> Snapshot {
        let mut raw = FieldMap::new();
        for (key, value) in fields {
            raw.insert(*key, *value);
        }
        Snapshot::new(raw, sprites, 0.0, None, None)
    }

    fn gameplay(extra: &[(&'static str, Option<u32>)]) -> Vec<(&'static str, Option<u32>)> {
        let mut fields: Vec<(&'static str, Option<u32>)> = vec![
            ("main_module", Some(0x09)),
            ("submodule", Some(0)),
            ("link_x", Some(100)),
            ("link_y", Some(100)),
            ("direction", Some(2)),
            ("indoors", Some(0)),
            ("world", Some(0)),
            ("hp", Some(40)),
            ("max_hp", Some(40)),
            ("joypad_dir", Some(0)),
        ];
        for (key, value) in extra {
            if let Some(slot) = fields.iter_mut().find(|(k, _)| k == key) {
                slot.1 = *value;
            } else {
                fields.push((*key, *value));
            }
        }
        fields
    }

    fn detect(prev: &Snapshot, curr: &Snapshot) -> Vec<alttp_bridge::Event> {
        let engine = ProximityEngine::new(None);
        EventDetector::new(1).detect(prev, curr, &engine)
    }

    fn kinds(events: &[alttp_bridge::Event]) -> Vec<EventKind> {
        events.iter().map(|e| e.kind).collect()
    }

    fn active(index: usize, type_id: u8, x: i32, y: i32) -> SpriteSlot {
        SpriteSlot {
            index,
            type_id,
            state: 1,
            x,
            y,
        }
    }

    // -----------------------------------------------------------------------
    // Quiet baseline
    // -----------------------------------------------------------------------

    #[test]
    fn identical_snapshots_yield_no_events() {
        let prev = snap(&gameplay(&[]), vec![]);
        let curr = snap(&gameplay(&[]), vec![]);
        assert!(detect(&prev, &curr).is_empty());
    }

    #[test]
    fn non_gameplay_modes_are_silent() {
        // Title screen to file select: nothing fires despite field noise.
        let prev = snap(&[("main_module", Some(0x00)), ("hp", Some(40))], vec![]);
        let curr = snap(&[("main_module", Some(0x01)), ("hp", Some(8))], vec![]);
        assert!(detect(&prev, &curr).is_empty());
    }

    // -----------------------------------------------------------------------
    // Unknown reads never coerce to zero
    // -----------------------------------------------------------------------

    #[test]
    fn unknown_field_skips_rule_instead_of_false_firing() {
        // hp read failed this tick: no damage event for 40 -> unknown.
        let prev = snap(&gameplay(&[]), vec![]);
        let curr = snap(&gameplay(&[("hp", None), ("world", None)]), vec![]);
        assert!(detect(&prev, &curr).is_empty());

        // Item slot unknown on the previous tick: acquisition not inferred.
        let prev = snap(&gameplay(&[("hookshot", None)]), vec![]);
        let curr = snap(&gameplay(&[("hookshot", Some(1))]), vec![]);
        assert!(detect(&prev, &curr).is_empty());
    }

    // -----------------------------------------------------------------------
    // Health
    // -----------------------------------------------------------------------

    #[test]
    fn damage_taken_reports_remaining_hearts() {
        // Scenario: 40 -> 32 health units is 5 -> 4 of 5 hearts.
        let prev = snap(&gameplay(&[("hp", Some(40))]), vec![]);
        let curr = snap(&gameplay(&[("hp", Some(32))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::DamageTaken);
        assert_eq!(events[0].priority, EventPriority::High);
        assert!(events[0].message.contains("4/5 hearts"), "{}", events[0].message);
    }

    #[test]
    fn low_health_fires_on_crossing_two_hearts() {
        let prev = snap(&gameplay(&[("hp", Some(24))]), vec![]);
        let curr = snap(&gameplay(&[("hp", Some(16))]), vec![]);
        let events = detect(&prev, &curr);
        let kinds = kinds(&events);
        assert!(kinds.contains(&EventKind::DamageTaken));
        assert!(kinds.contains(&EventKind::LowHealth));

        // Already below the threshold: no repeat.
        let prev = snap(&gameplay(&[("hp", Some(16))]), vec![]);
        let curr = snap(&gameplay(&[("hp", Some(8))]), vec![]);
        let events = detect(&prev, &curr);
        assert!(!kinds_of(&events).contains(&EventKind::LowHealth));

        fn kinds_of(events: &[alttp_bridge::Event]) -> Vec<EventKind> {
            events.iter().map(|e| e.kind).collect()
        }
    }

    #[test]
    fn health_restored_is_low_priority() {
        let prev = snap(&gameplay(&[("hp", Some(16))]), vec![]);
        let curr = snap(&gameplay(&[("hp", Some(24))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::HealthRestored);
        assert_eq!(events[0].priority, EventPriority::Low);
    }

    // -----------------------------------------------------------------------
    // Death short-circuit
    // -----------------------------------------------------------------------

    #[test]
    fn death_preempts_every_other_rule() {
        let prev = snap(&gameplay(&[("main_module", Some(0x07)), ("hp", Some(8))]), vec![]);
        let curr = snap(&gameplay(&[("main_module", Some(0x12)), ("hp", Some(0))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Death);
        assert_eq!(events[0].priority, EventPriority::High);
        assert!(events[0].message.starts_with("You died!"));
    }

    // -----------------------------------------------------------------------
    // Location transitions
    // -----------------------------------------------------------------------

    #[test]
    fn dungeon_entry_fires_enter_and_room_change() {
        // Scenario: overworld (0x09) to dungeon (0x07) with a new room id.
        let prev = snap(
            &gameplay(&[("main_module", Some(0x09)), ("dungeon_room", Some(0))]),
            vec![],
        );
        let curr = snap(
            &gameplay(&[("main_module", Some(0x07)), ("dungeon_room", Some(0x12))]),
            vec![],
        );
        let events = detect(&prev, &curr);
        let kinds = kinds(&events);
        assert!(kinds.contains(&EventKind::DungeonEnterExit));
        assert!(kinds.contains(&EventKind::RoomChange));

        let enter = events
            .iter()
            .find(|e| e.kind == EventKind::DungeonEnterExit)
            .expect("enter event");
        assert!(enter.message.starts_with("Entered Hyrule Castle."));
        let room = events
            .iter()
            .find(|e| e.kind == EventKind::RoomChange)
            .expect("room event");
        assert_eq!(room.message, "Hyrule Castle");
    }

    #[test]
    fn dungeon_exit_announces_overworld_return() {
        let prev = snap(&gameplay(&[("main_module", Some(0x07))]), vec![]);
        let curr = snap(&gameplay(&[("main_module", Some(0x09))]), vec![]);
        let events = detect(&prev, &curr);
        assert!(events
            .iter()
            .any(|e| e.message == "Exited the dungeon to the overworld."));
    }

    #[test]
    fn overworld_screen_change_uses_coordinates() {
        // Crossing x = 512 moves from screen column 0 to column 1 even
        // though the hardware screen register never changes.
        let prev = snap(&gameplay(&[("link_x", Some(500)), ("ow_screen", Some(0))]), vec![]);
        let curr = snap(&gameplay(&[("link_x", Some(520)), ("ow_screen", Some(0))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::RoomChange);
    }

    #[test]
    fn world_transition_announces_new_world() {
        // Checked in a dungeon so the coordinate-derived screen stays put.
        let prev = snap(&gameplay(&[("main_module", Some(0x07)), ("world", Some(0))]), vec![]);
        let curr = snap(&gameplay(&[("main_module", Some(0x07)), ("world", Some(1))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Transitioned to the Dark World.");
    }

    #[test]
    fn floor_change_in_dungeon() {
        let prev = snap(&gameplay(&[("main_module", Some(0x07)), ("floor", Some(0))]), vec![]);
        let curr = snap(&gameplay(&[("main_module", Some(0x07)), ("floor", Some(1))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Changed floors. Now on floor 1.");
    }

    #[test]
    fn indoor_toggle_announces_building() {
        let prev = snap(&gameplay(&[("indoors", Some(0))]), vec![]);
        let curr = snap(&gameplay(&[("indoors", Some(1))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Entered a building.");
    }

    #[test]
    fn submodule_transition_names_direction() {
        let prev = snap(&gameplay(&[("submodule", Some(0)), ("direction", Some(6))]), vec![]);
        let curr = snap(&gameplay(&[("submodule", Some(5)), ("direction", Some(6))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Transition);
        assert_eq!(events[0].message, "Transitioning to the east.");
    }

    // -----------------------------------------------------------------------
    // Items, equipment, progress
    // -----------------------------------------------------------------------

    #[test]
    fn item_acquired_fires_exactly_once_with_name() {
        // Scenario: a tracked item slot goes 0 -> 1.
        let prev = snap(&gameplay(&[("hookshot", Some(0))]), vec![]);
        let curr = snap(&gameplay(&[("hookshot", Some(1))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::ItemAcquired);
        assert_eq!(events[0].message, "Acquired: Hookshot!");
    }

    #[test]
    fn equipment_upgrade_names_new_tier() {
        let prev = snap(&gameplay(&[("sword", Some(1))]), vec![]);
        let curr = snap(&gameplay(&[("sword", Some(2))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Equipment upgrade: Master Sword!");
    }

    #[test]
    fn key_count_increase_fires_and_sentinel_does_not() {
        let prev = snap(&gameplay(&[("keys", Some(1))]), vec![]);
        let curr = snap(&gameplay(&[("keys", Some(2))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Got a key! Keys: 2.");

        // Leaving a dungeon resets the register to the uninitialised
        // sentinel; that is not an acquisition.
        let prev = snap(&gameplay(&[("keys", Some(1))]), vec![]);
        let curr = snap(&gameplay(&[("keys", Some(0xFF))]), vec![]);
        assert!(detect(&prev, &curr).is_empty());
    }

    #[test]
    fn progress_milestones_for_pendants_and_crystals() {
        let prev = snap(&gameplay(&[("pendants", Some(0)), ("crystals", Some(0))]), vec![]);
        let curr = snap(&gameplay(&[("pendants", Some(4)), ("crystals", Some(3))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 2);
        assert!(events.iter().any(|e| e.message == "Pendant acquired!"));
        assert!(events.iter().any(|e| e.message == "Crystal acquired! (2/7)"));
    }

    // -----------------------------------------------------------------------
    // Mode-driven events
    // -----------------------------------------------------------------------

    #[test]
    fn boss_victory_fires_on_mode_entry() {
        let prev = snap(&gameplay(&[("main_module", Some(0x07))]), vec![]);
        let curr = snap(&gameplay(&[("main_module", Some(0x13))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Boss defeated!");
    }

    #[test]
    fn swimming_entry_and_exit() {
        let prev = snap(&gameplay(&[("link_state", Some(0))]), vec![]);
        let curr = snap(&gameplay(&[("link_state", Some(0x11))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Entered water.");

        let prev = snap(&gameplay(&[("link_state", Some(0x11))]), vec![]);
        let curr = snap(&gameplay(&[("link_state", Some(0))]), vec![]);
        let events = detect(&prev, &curr);
        assert_eq!(events[0].message, "Exited water.");
    }

    #[test]
    fn dialog_uses_lookup_with_generic_fallback() {
        // Without geometry the generic message stands in.
        let prev = snap(&gameplay(&[("main_module", Some(0x09))]), vec![]);
        let curr = snap(
            &gameplay(&[("main_module", Some(0x0E)), ("dialog_id", Some(0))]),
            vec![],
        );
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Text appeared on screen.");

        // With dialog strings loaded, the id resolves to real text.
        let mut store = GeometryStore::new();
        store.set_dialog_strings(vec!["Welcome to the shop!".into()]);
        let geometry = Arc::new(store);
        let mut raw = FieldMap::new();
        for (key, value) in gameplay(&[("main_module", Some(0x0E)), ("dialog_id", Some(0))]) {
            raw.insert(key, value);
        }
        let curr = Snapshot::new(raw, vec![], 0.0, Some(geometry), None);
        let events = detect(&prev, &curr);
        assert_eq!(events[0].message, "Welcome to the shop!");
    }

    // -----------------------------------------------------------------------
    // Sprite-table events
    // -----------------------------------------------------------------------

    #[test]
    fn new_enemy_in_radius_fires_per_enemy() {
        let prev = snap(&gameplay(&[]), vec![]);
        let curr = snap(&gameplay(&[]), vec![active(0, 0x41, 150, 100)]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::EnemyNearby);
        assert_eq!(events[0].priority, EventPriority::High);
        assert_eq!(events[0].message, "Green Soldier to the east!");

        // Already announced: the same pair stays quiet.
        let prev = snap(&gameplay(&[]), vec![active(0, 0x41, 150, 100)]);
        let curr = snap(&gameplay(&[]), vec![active(0, 0x41, 152, 100)]);
        assert!(detect(&prev, &curr).is_empty());
    }

    #[test]
    fn enemy_outside_radius_is_ignored() {
        let prev = snap(&gameplay(&[]), vec![]);
        let curr = snap(&gameplay(&[]), vec![active(0, 0x41, 400, 100)]);
        assert!(detect(&prev, &curr).is_empty());
    }

    #[test]
    fn item_drop_fires_when_slot_switches_to_drop_type() {
        let prev = snap(&gameplay(&[]), vec![active(0, 0x41, 150, 100)]);
        // Drop sits outside the interact radius so only the drop rule fires;
        // the freed slot no longer holds an enemy, which is not an alert.
        let curr = snap(&gameplay(&[]), vec![active(0, 0xD9, 150, 100)]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::ItemDrop);
        assert_eq!(events[0].message, "Green Rupee dropped!");

        // Unchanged drop: announced once only.
        let prev = snap(&gameplay(&[]), vec![active(0, 0xD9, 150, 100)]);
        let curr = snap(&gameplay(&[]), vec![active(0, 0xD9, 150, 100)]);
        assert!(detect(&prev, &curr).is_empty());
    }

    #[test]
    fn non_enemy_sprite_fires_inside_interact_radius() {
        let prev = snap(&gameplay(&[]), vec![]);
        let curr = snap(&gameplay(&[]), vec![active(0, 0x17, 115, 100)]);
        let events = detect(&prev, &curr);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::SpriteNearby);
        assert_eq!(events[0].message, "Hylian villager to the east.");
    }

    // -----------------------------------------------------------------------
    // Blocked movement
    // -----------------------------------------------------------------------

    #[test]
    fn blocked_fires_once_per_episode_and_rearms() {
        let engine = ProximityEngine::new(None);
        let mut detector = EventDetector::new(1);

        let standing = snap(&gameplay(&[("joypad_dir", Some(0x08))]), vec![]);

        // First blocked tick announces.
        let events = detector.detect(&standing, &standing, &engine);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Blocked);
        assert_eq!(events[0].message, "Blocked.");

        // Still blocked: one announcement per episode.
        assert!(detector.detect(&standing, &standing, &engine).is_empty());
        assert!(detector.detect(&standing, &standing, &engine).is_empty());

        // A single tick of movement re-arms the episode.
        let moved = snap(
            &gameplay(&[("joypad_dir", Some(0x08)), ("link_x", Some(108))]),
            vec![],
        );
        assert!(detector.detect(&standing, &moved, &engine).is_empty());

        let events = detector.detect(&moved, &moved, &engine);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Blocked);
    }

    #[test]
    fn blocked_threshold_is_tunable() {
        let engine = ProximityEngine::new(None);
        let mut detector = EventDetector::new(3);
        let standing = snap(&gameplay(&[("joypad_dir", Some(0x04))]), vec![]);

        assert!(detector.detect(&standing, &standing, &engine).is_empty());
        assert!(detector.detect(&standing, &standing, &engine).is_empty());
        let events = detector.detect(&standing, &standing, &engine);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Blocked);
    }

    #[test]
    fn released_input_never_counts_as_blocked() {
        let engine = ProximityEngine::new(None);
        let mut detector = EventDetector::new(1);
        let standing = snap(&gameplay(&[("joypad_dir", Some(0))]), vec![]);
        assert!(detector.detect(&standing, &standing, &engine).is_empty());
    }
}
