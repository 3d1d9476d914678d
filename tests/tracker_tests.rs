//! ObjectTracker unit tests

#[cfg(test)]
mod tests {
    use alttp_bridge::snapshot::SpriteSlot;
    use alttp_bridge::tracker::{ObjectTracker, StaticFeature, SPEED_THRESHOLD, STALE_TIMEOUT};
    use alttp_bridge::types::{Compass, Zone};

    fn slot(index: usize, type_id: u8, x: i32, y: i32) -> SpriteSlot {
        SpriteSlot {
            index,
            type_id,
            state: 1,
            x,
            y,
        }
    }

    // -----------------------------------------------------------------------
    // Static features
    // -----------------------------------------------------------------------

    #[test]
    fn static_feature_absent_from_list_is_removed_immediately() {
        let mut tracker = ObjectTracker::new();
        let features = vec![
            StaticFeature::new("door:1", 100, 100, "normal doorway"),
            StaticFeature::new("obj:2", 200, 200, "chest"),
        ];
        tracker.update_static(&features, 0.0);
        assert_eq!(tracker.len(), 2);

        // Next tick the chest is gone from the feature list: no grace period.
        let features = vec![StaticFeature::new("door:1", 100, 100, "normal doorway")];
        tracker.update_static(&features, 0.033);
        assert_eq!(tracker.len(), 1);
        assert!(tracker.get("door:1").is_some());
        assert!(tracker.get("obj:2").is_none());
    }

    #[test]
    fn static_feature_survives_prune_stale() {
        let mut tracker = ObjectTracker::new();
        tracker.update_static(&[StaticFeature::new("door:1", 0, 0, "passage")], 0.0);
        tracker.prune_stale(100.0);
        assert!(tracker.get("door:1").is_some());
    }

    // -----------------------------------------------------------------------
    // Dynamic sprites
    // -----------------------------------------------------------------------

    #[test]
    fn velocity_is_ema_smoothed() {
        let mut tracker = ObjectTracker::new();
        // 0x41 = Green Soldier, a known enemy type
        tracker.update_sprites(&[slot(0, 0x41, 100, 100)], 0.0);
        tracker.update_sprites(&[slot(0, 0x41, 110, 100)], 0.1);

        let obj = tracker.get("sprite:0").expect("tracked");
        // Raw sample is 100 px/s; the EMA blends 0.3 of it into zero.
        assert!((obj.vx - 30.0).abs() < 1e-6, "vx = {}", obj.vx);
        assert!(obj.vy.abs() < 1e-6);

        // A second identical sample pulls the average further up.
        tracker.update_sprites(&[slot(0, 0x41, 120, 100)], 0.2);
        let obj = tracker.get("sprite:0").expect("tracked");
        assert!((obj.vx - 51.0).abs() < 1e-6, "vx = {}", obj.vx);
    }

    #[test]
    fn sample_faster_than_one_millisecond_is_skipped() {
        let mut tracker = ObjectTracker::new();
        tracker.update_sprites(&[slot(0, 0x41, 100, 100)], 0.0);
        tracker.update_sprites(&[slot(0, 0x41, 200, 100)], 0.0005);
        let obj = tracker.get("sprite:0").expect("tracked");
        assert_eq!(obj.vx, 0.0);
    }

    #[test]
    fn unknown_category_slot_is_never_tracked() {
        let mut tracker = ObjectTracker::new();
        // 0x03 has no entry in either sprite table.
        tracker.update_sprites(&[slot(0, 0x03, 100, 100)], 0.0);
        assert!(tracker.is_empty());
    }

    #[test]
    fn inactive_slot_is_never_tracked() {
        let mut tracker = ObjectTracker::new();
        let mut s = slot(0, 0x41, 100, 100);
        s.state = 0;
        tracker.update_sprites(&[s], 0.0);
        assert!(tracker.is_empty());
    }

    // -----------------------------------------------------------------------
    // Slot reuse
    // -----------------------------------------------------------------------

    #[test]
    fn slot_reuse_resets_velocity_and_zone() {
        let mut tracker = ObjectTracker::new();
        tracker.update_sprites(&[slot(3, 0x41, 100, 100)], 0.0);
        tracker.update_sprites(&[slot(3, 0x41, 120, 100)], 0.1);
        tracker.set_zone("sprite:3", Some(Zone::Nearby));

        let obj = tracker.get("sprite:3").expect("tracked");
        assert!(obj.vx > 0.0);
        assert_eq!(obj.zone, Some(Zone::Nearby));

        // The slot now holds a dropped item (0xD9 = Green Rupee).  The key
        // is unchanged but the entity is new: nothing carries over.
        tracker.update_sprites(&[slot(3, 0xD9, 120, 100)], 0.133);
        let obj = tracker.get("sprite:3").expect("tracked");
        assert_eq!(obj.type_id, 0xD9);
        assert_eq!(obj.vx, 0.0);
        assert_eq!(obj.vy, 0.0);
        assert_eq!(obj.zone, None);
    }

    // -----------------------------------------------------------------------
    // Staleness
    // -----------------------------------------------------------------------

    #[test]
    fn dynamic_object_unseen_past_timeout_is_pruned() {
        let mut tracker = ObjectTracker::new();
        tracker.update_sprites(&[slot(0, 0x41, 100, 100)], 0.0);

        tracker.prune_stale(STALE_TIMEOUT); // exactly at the boundary: kept
        assert_eq!(tracker.len(), 1);

        tracker.prune_stale(STALE_TIMEOUT + 0.1);
        assert!(tracker.is_empty());
    }

    #[test]
    fn reappearing_sprite_refreshes_last_seen() {
        let mut tracker = ObjectTracker::new();
        tracker.update_sprites(&[slot(0, 0x41, 100, 100)], 0.0);
        tracker.update_sprites(&[slot(0, 0x41, 100, 100)], 1.9);
        tracker.prune_stale(3.0); // 1.1s since last seen
        assert_eq!(tracker.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Approach detection
    // -----------------------------------------------------------------------

    #[test]
    fn approaching_reports_direction_of_origin() {
        let mut tracker = ObjectTracker::new();
        // Sprite moves west toward a player standing at (100, 100).
        tracker.update_sprites(&[slot(0, 0x41, 210, 100)], 0.0);
        tracker.update_sprites(&[slot(0, 0x41, 200, 100)], 0.1);

        let obj = tracker.get("sprite:0").expect("tracked");
        assert!(obj.speed() > SPEED_THRESHOLD);
        // Moving westward means it comes from the east.
        assert_eq!(
            ObjectTracker::approaching(obj, 100, 100),
            Some(Compass::East)
        );
    }

    #[test]
    fn approaching_ignores_movement_away_from_player() {
        let mut tracker = ObjectTracker::new();
        // Same motion, but the player stands on the far side.
        tracker.update_sprites(&[slot(0, 0x41, 210, 100)], 0.0);
        tracker.update_sprites(&[slot(0, 0x41, 200, 100)], 0.1);

        let obj = tracker.get("sprite:0").expect("tracked");
        assert_eq!(ObjectTracker::approaching(obj, 400, 100), None);
    }

    #[test]
    fn approaching_ignores_slow_jitter() {
        let mut tracker = ObjectTracker::new();
        tracker.update_sprites(&[slot(0, 0x41, 200, 100)], 0.0);
        tracker.update_sprites(&[slot(0, 0x41, 201, 100)], 0.1); // 3 px/s smoothed
        let obj = tracker.get("sprite:0").expect("tracked");
        assert_eq!(ObjectTracker::approaching(obj, 100, 100), None);
    }

    #[test]
    fn active_dynamic_lists_only_sprite_entries() {
        let mut tracker = ObjectTracker::new();
        tracker.update_static(&[StaticFeature::new("door:1", 0, 0, "passage")], 0.0);
        tracker.update_sprites(&[slot(0, 0x41, 100, 100)], 0.0);
        assert_eq!(tracker.active_dynamic().count(), 1);
        assert_eq!(tracker.all_objects().count(), 2);
    }
}
