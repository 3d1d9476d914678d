//! ProximityEngine unit tests

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use alttp_bridge::geometry::{GeometryStore, RoomData, RoomObject};
    use alttp_bridge::memory::MemoryReader;
    use alttp_bridge::proximity::{bresenham, zone_transition, ProximityEngine, ZoneEntry};
    use alttp_bridge::snapshot::{FieldMap, Snapshot, SpriteSlot};
    use alttp_bridge::types::{Compass, EventKind, EventPriority, Zone};

    const DUNGEON_ATTR_BASE: u32 = 0x7F2000;

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn snap(
        fields: &[(&'static str, Option<u32>)],
        sprites: Vec<SpriteSlot>,
        ts: f64,
        geometry: Option<Arc<GeometryStore>>,
    ) -> Snapshot {
        let mut raw = FieldMap::new();
        for (key, value) in fields {
            raw.insert(*key, *value);
        }
        Snapshot::new(raw, sprites, ts, geometry, None)
    }

    fn dungeon_fields(
        room: u32,
        link_x: u32,
        link_y: u32,
        direction: u32,
    ) -> Vec<(&'static str, Option<u32>)> {
        vec![
            ("main_module", Some(0x07)),
            ("dungeon_room", Some(room)),
            ("link_x", Some(link_x)),
            ("link_y", Some(link_y)),
            ("direction", Some(direction)),
            ("indoors", Some(1)),
            ("lower_level", Some(0)),
        ]
    }

    /// Fake memory: single bytes by address plus canned bulk reads.
    #[derive(Default)]
    struct FakeMemory {
        bytes: HashMap<u32, u8>,
        bulk: HashMap<(u32, usize), Vec<u8>>,
    }

    impl FakeMemory {
        fn set_dungeon_tile(&mut self, tx: i32, ty: i32, attr: u8) {
            let off = ((ty * 8) & 0x1F8) * 8 + (tx & 63);
            self.bytes.insert(DUNGEON_ATTR_BASE + off as u32, attr);
        }
    }

    impl MemoryReader for FakeMemory {
        fn read(&self, address: u32, length: usize) -> Option<Vec<u8>> {
            if let Some(data) = self.bulk.get(&(address, length)) {
                return Some(data.clone());
            }
            if length == 1 {
                return self.bytes.get(&address).map(|b| vec![*b]);
            }
            None
        }
    }

    // -----------------------------------------------------------------------
    // Compass labeling
    // -----------------------------------------------------------------------

    #[test]
    fn direction_label_dominant_axis() {
        assert_eq!(Compass::from_delta(-100, 5), Compass::West);
        assert_eq!(Compass::from_delta(100, 5), Compass::East);
        assert_eq!(Compass::from_delta(3, -80), Compass::North);
    }

    #[test]
    fn direction_label_here_within_eight_pixels() {
        assert_eq!(Compass::from_delta(5, 5), Compass::Here);
        assert_eq!(Compass::from_delta(-7, 7), Compass::Here);
        assert_eq!(Compass::from_delta(8, 0), Compass::East);
    }

    #[test]
    fn direction_label_intercardinal() {
        assert_eq!(Compass::from_delta(-40, -40), Compass::Northwest);
        assert_eq!(Compass::from_delta(40, 40), Compass::Southeast);
    }

    // -----------------------------------------------------------------------
    // Zone transition function
    // -----------------------------------------------------------------------

    #[test]
    fn zone_unreachable_beyond_approach_distance() {
        assert_eq!(zone_transition(None, 120.0, false), (None, None));
    }

    #[test]
    fn zone_entries_fire_per_boundary() {
        assert_eq!(
            zone_transition(None, 90.0, false),
            (Some(Zone::Approach), Some(ZoneEntry::Approach))
        );
        assert_eq!(
            zone_transition(None, 50.0, false),
            (Some(Zone::Nearby), Some(ZoneEntry::Nearby))
        );
        assert_eq!(
            zone_transition(Some(Zone::Nearby), 50.0, true),
            (Some(Zone::Facing), Some(ZoneEntry::Facing))
        );
    }

    #[test]
    fn held_zone_does_not_refire() {
        assert_eq!(zone_transition(Some(Zone::Approach), 90.0, false), (Some(Zone::Approach), None));
        assert_eq!(zone_transition(Some(Zone::Nearby), 50.0, false), (Some(Zone::Nearby), None));
        assert_eq!(zone_transition(Some(Zone::Facing), 40.0, true), (Some(Zone::Facing), None));
    }

    #[test]
    fn outward_drift_downgrades_instead_of_clearing() {
        // Lost facing alignment but still close: nearby, not none.
        assert_eq!(zone_transition(Some(Zone::Facing), 50.0, false), (Some(Zone::Nearby), None));
        assert_eq!(
            zone_transition(Some(Zone::Facing), 70.0, false),
            (Some(Zone::Approach), None)
        );
        assert_eq!(
            zone_transition(Some(Zone::Nearby), 70.0, false),
            (Some(Zone::Approach), None)
        );
        assert_eq!(zone_transition(Some(Zone::Nearby), 120.0, false), (None, None));
        assert_eq!(zone_transition(Some(Zone::Approach), 120.0, false), (None, None));
    }

    #[test]
    fn reentry_after_downgrade_fires_again() {
        let (zone, _) = zone_transition(Some(Zone::Nearby), 70.0, false);
        assert_eq!(zone, Some(Zone::Approach));
        let (zone, entry) = zone_transition(zone, 50.0, false);
        assert_eq!(zone, Some(Zone::Nearby));
        assert_eq!(entry, Some(ZoneEntry::Nearby));
    }

    // -----------------------------------------------------------------------
    // Zone scenario against a dungeon room feature
    // -----------------------------------------------------------------------

    fn chest_geometry() -> Arc<GeometryStore> {
        let mut store = GeometryStore::new();
        store.insert_room(RoomData {
            room_id: 0x01,
            objects: vec![RoomObject {
                x_tile: 20,
                y_tile: 10,
                object_type: 0x119, // chest
            }],
            ..Default::default()
        });
        Arc::new(store)
    }

    #[test]
    fn approach_then_nearby_then_facing_each_fire_once() {
        let geometry = chest_geometry();
        let mut engine = ProximityEngine::new(None);

        // Chest sits at pixel (160, 80).  Body center is link + (8, 8).
        // Tick 1: distance 120, outside every zone (and the room change
        // starts the cooldown clock).
        let state = snap(&dungeon_fields(0x01, 152, 192, 2), vec![], 0.0, Some(geometry.clone()));
        assert!(engine.check(&state).is_empty());

        // Tick 2: distance 90, approach entry (allowed during cooldown).
        let state = snap(&dungeon_fields(0x01, 152, 162, 2), vec![], 0.5, Some(geometry.clone()));
        let events = engine.check(&state);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Proximity);
        assert_eq!(events[0].priority, EventPriority::Low);
        assert_eq!(events[0].message, "Approaching Chest to the north.");

        // Tick 3: distance 50 facing south, nearby entry after cooldown.
        let state = snap(&dungeon_fields(0x01, 152, 122, 2), vec![], 2.6, Some(geometry.clone()));
        let events = engine.check(&state);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Proximity);
        assert_eq!(events[0].priority, EventPriority::Medium);
        assert_eq!(events[0].message, "Nearing Chest to the north.");

        // Tick 4: turn to face the chest: facing entry.
        let state = snap(&dungeon_fields(0x01, 152, 122, 0), vec![], 3.0, Some(geometry.clone()));
        let events = engine.check(&state);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Facing);
        assert_eq!(events[0].priority, EventPriority::Medium);
        assert_eq!(events[0].message, "Facing Chest.");

        // Tick 5: holding position re-fires nothing.
        let state = snap(&dungeon_fields(0x01, 152, 122, 0), vec![], 3.2, Some(geometry.clone()));
        assert!(engine.check(&state).is_empty());

        // Tick 6: retreat far out, zone clears silently.
        let state = snap(&dungeon_fields(0x01, 152, 192, 2), vec![], 3.6, Some(geometry.clone()));
        assert!(engine.check(&state).is_empty());

        // Tick 7: approach again: the episode re-fires.
        let state = snap(&dungeon_fields(0x01, 152, 162, 2), vec![], 4.0, Some(geometry));
        let events = engine.check(&state);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Approaching Chest to the north.");
    }

    // -----------------------------------------------------------------------
    // Bresenham
    // -----------------------------------------------------------------------

    #[test]
    fn bresenham_excludes_endpoints() {
        let cells = bresenham(0, 0, 0, -4);
        assert_eq!(cells, vec![(0, -1), (0, -2), (0, -3)]);
    }

    #[test]
    fn bresenham_adjacent_cells_have_no_between() {
        assert!(bresenham(0, 0, 0, -1).is_empty());
        assert!(bresenham(0, 0, 1, 1).is_empty());
    }

    // -----------------------------------------------------------------------
    // Cone scan with occlusion
    // -----------------------------------------------------------------------

    #[test]
    fn cone_reports_only_nearest_cell_per_sightline() {
        let mut fake = FakeMemory::default();
        // Player tile is (33, 33) for link (256, 256).  Straight ahead to
        // the north: a chest two tiles out, a pit four tiles out on the
        // same sightline, and a sign on a clear diagonal sightline.
        fake.set_dungeon_tile(33, 31, 0x58); // chest at (0, -2)
        fake.set_dungeon_tile(33, 29, 0x20); // pit at (0, -4), occluded
        fake.set_dungeon_tile(35, 29, 0x46); // sign at (2, -4), clear
        let reader: Arc<dyn MemoryReader> = Arc::new(fake);

        let geometry = Arc::new(GeometryStore::new());
        let mut engine = ProximityEngine::new(Some(reader));

        // First tick enters the room and arms the cooldown.
        let state = snap(&dungeon_fields(0x02, 256, 256, 0), vec![], 0.0, Some(geometry.clone()));
        assert!(engine.check(&state).is_empty());

        // After the cooldown the cone fires once.
        let state = snap(&dungeon_fields(0x02, 256, 256, 0), vec![], 2.5, Some(geometry.clone()));
        let events = engine.check(&state);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::ConeTile);
        assert!(events[0].message.contains("Chest to the north."));
        assert!(events[0].message.contains("Sign to the north."));
        assert!(!events[0].message.contains("Pit"), "occluded cell leaked: {}", events[0].message);

        // Unchanged view: the cached message suppresses a repeat.
        let state = snap(&dungeon_fields(0x02, 256, 256, 0), vec![], 2.6, Some(geometry));
        assert!(engine.check(&state).is_empty());
    }

    // -----------------------------------------------------------------------
    // Doorway clustering
    // -----------------------------------------------------------------------

    #[test]
    fn doorway_tiles_cluster_by_adjacency() {
        let mut fake = FakeMemory::default();
        let mut grid = vec![0u8; 4096];
        grid[10] = 0x30; // (10, 0)
        grid[11] = 0x31; // (11, 0) - adjacent, same cluster
        grid[40 * 64 + 40] = 0x32; // (40, 40) - separate cluster
        fake.bulk.insert((DUNGEON_ATTR_BASE, 4096), grid);
        let reader: Arc<dyn MemoryReader> = Arc::new(fake);

        let geometry = Arc::new(GeometryStore::new());
        let mut engine = ProximityEngine::new(Some(reader));

        let state = snap(&dungeon_fields(0x05, 100, 100, 0), vec![], 0.0, Some(geometry));
        engine.check(&state);

        let doorways = engine.doorway_features();
        assert_eq!(doorways.len(), 2);
        assert!(doorways.iter().all(|f| f.name == "open doorway"));
        // Both clusters become tracked static features.
        assert_eq!(engine.tracker().len(), 2);
        // The merged cluster sits at its centroid tile (10, 0) -> (80, 0).
        assert!(doorways.iter().any(|f| f.x == 80 && f.y == 0));
        assert!(doorways.iter().any(|f| f.x == 320 && f.y == 320));
    }

    #[test]
    fn detect_exits_labels_clusters_from_room_center() {
        let mut fake = FakeMemory::default();
        let mut grid = vec![0u8; 4096];
        grid[10] = 0x30;
        grid[11] = 0x31;
        grid[40 * 64 + 40] = 0x32;
        fake.bulk.insert((DUNGEON_ATTR_BASE, 4096), grid);
        let reader: Arc<dyn MemoryReader> = Arc::new(fake);

        let geometry = Arc::new(GeometryStore::new());
        let engine = ProximityEngine::new(Some(reader));
        let state = snap(&dungeon_fields(0x05, 248, 248, 0), vec![], 0.0, Some(geometry));

        let exits = engine.detect_exits(&state);
        assert_eq!(exits.len(), 2);
        assert!(exits.contains(&Compass::Northwest));
        assert!(exits.contains(&Compass::Southeast));
    }

    // -----------------------------------------------------------------------
    // Dynamic sprite zone events
    // -----------------------------------------------------------------------

    #[test]
    fn fast_approaching_enemy_gets_motion_clause() {
        let geometry = Arc::new(GeometryStore::new());
        let mut engine = ProximityEngine::new(None);

        // Enter the area, then wait out the cooldown with the enemy far away.
        let far = SpriteSlot {
            index: 0,
            type_id: 0x41,
            state: 1,
            x: 400,
            y: 208,
        };
        let state = snap(&dungeon_fields(0x03, 192, 200, 2), vec![far], 0.0, Some(geometry.clone()));
        assert!(engine.check(&state).is_empty());

        // Still outside approach range at the end of the cooldown.
        let mid = SpriteSlot {
            index: 0,
            type_id: 0x41,
            state: 1,
            x: 322,
            y: 208,
        };
        let state = snap(&dungeon_fields(0x03, 192, 200, 2), vec![mid], 1.9, Some(geometry.clone()));
        assert!(engine.check(&state).is_empty());

        // The soldier closes 30 px westward in 100 ms: smoothed speed well
        // above the jitter floor.
        let near = SpriteSlot {
            index: 0,
            type_id: 0x41,
            state: 1,
            x: 292,
            y: 208,
        };
        let state = snap(&dungeon_fields(0x03, 192, 200, 2), vec![near], 2.0, Some(geometry));
        let events = engine.check(&state);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Proximity);
        assert_eq!(
            events[0].message,
            "Approaching Green Soldier to the east, moving from the east."
        );
    }
}
