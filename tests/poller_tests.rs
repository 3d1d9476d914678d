//! Poller and event-merge tests

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;

    use alttp_bridge::memory::MemoryReader;
    use alttp_bridge::poller::{merge_events, sort_rank, EventSink, Poller};
    use alttp_bridge::tables::MEMORY_MAP;
    use alttp_bridge::types::{BridgeConfig, BridgeError, Event, EventKind, EventPriority};

    // -----------------------------------------------------------------------
    // Event merge
    // -----------------------------------------------------------------------

    fn ev(kind: EventKind, message: &str) -> Event {
        Event::new(kind, EventPriority::Medium, message)
    }

    #[test]
    fn merge_sorts_blocked_first_then_alerts() {
        let events = vec![
            ev(EventKind::ConeTile, "Chest to the north."),
            ev(EventKind::DamageTaken, "Damage taken!"),
            ev(EventKind::RoomChange, "Kakariko Village"),
            ev(EventKind::Blocked, "Blocked by wall."),
            ev(EventKind::EnemyNearby, "Stalfos to the east!"),
        ];
        let merged = merge_events(events);
        let messages: Vec<&str> = merged.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Blocked by wall.",
                "Damage taken!",
                "Stalfos to the east!",
                "Chest to the north.",
                "Kakariko Village",
            ]
        );
    }

    #[test]
    fn merge_is_stable_within_a_rank() {
        let events = vec![
            ev(EventKind::DamageTaken, "first"),
            ev(EventKind::EnemyNearby, "second"),
            ev(EventKind::Death, "third"),
        ];
        let merged = merge_events(events);
        let messages: Vec<&str> = merged.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn merge_dedups_by_exact_message_keeping_first() {
        let events = vec![
            ev(EventKind::Proximity, "Nearing Chest to the north."),
            ev(EventKind::Facing, "Nearing Chest to the north."),
            ev(EventKind::Proximity, "Approaching Sign to the east."),
        ];
        let merged = merge_events(events);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].kind, EventKind::Proximity);
    }

    #[test]
    fn sort_rank_covers_alert_tier() {
        assert_eq!(sort_rank(EventKind::Blocked), 0);
        for kind in [
            EventKind::EnemyNearby,
            EventKind::DamageTaken,
            EventKind::LowHealth,
            EventKind::NearPit,
            EventKind::Death,
        ] {
            assert_eq!(sort_rank(kind), 1);
        }
        assert_eq!(sort_rank(EventKind::ItemAcquired), 2);
        assert_eq!(sort_rank(EventKind::ConeTile), 2);
    }

    // -----------------------------------------------------------------------
    // Fake memory backends
    // -----------------------------------------------------------------------

    const HP_ADDR: u32 = 0x7EF36D;
    const MODULE_ADDR: u32 = 0x7E0010;

    /// Healthy game: every field readable, hp falls by 8 per poll so each
    /// tick after the first produces a damage event.
    struct DrainingHp {
        hp: Mutex<u8>,
    }

    impl DrainingHp {
        fn new() -> Self {
            Self { hp: Mutex::new(96) }
        }
    }

    impl MemoryReader for DrainingHp {
        fn read(&self, address: u32, length: usize) -> Option<Vec<u8>> {
            if address == HP_ADDR {
                let mut hp = self.hp.lock();
                let value = *hp;
                *hp = hp.saturating_sub(8).max(8);
                return Some(vec![value]);
            }
            if address == MODULE_ADDR {
                return Some(vec![0x09]);
            }
            Some(vec![0; length])
        }
    }

    /// Emulator mid-load: the primary mode is unreadable every tick.
    struct UnreadableModule;

    impl MemoryReader for UnreadableModule {
        fn read(&self, address: u32, length: usize) -> Option<Vec<u8>> {
            if address == MODULE_ADDR {
                return None;
            }
            Some(vec![0; length])
        }
    }

    // -----------------------------------------------------------------------
    // Sinks
    // -----------------------------------------------------------------------

    struct CountingSink {
        delivered: Arc<AtomicUsize>,
    }

    impl EventSink for CountingSink {
        fn deliver(&mut self, events: &[Event]) {
            self.delivered.fetch_add(events.len(), Ordering::SeqCst);
        }
    }

    /// Panics on the first delivery, then counts normally.
    struct FaultySink {
        panicked: Arc<AtomicBool>,
        delivered: Arc<AtomicUsize>,
    }

    impl EventSink for FaultySink {
        fn deliver(&mut self, events: &[Event]) {
            if !self.panicked.swap(true, Ordering::SeqCst) {
                panic!("sink exploded");
            }
            self.delivered.fetch_add(events.len(), Ordering::SeqCst);
        }
    }

    fn fast_config() -> BridgeConfig {
        BridgeConfig {
            poll_hz: 200.0,
            ..Default::default()
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    #[test]
    fn poller_publishes_snapshots_and_delivers_events() {
        let delivered = Arc::new(AtomicUsize::new(0));
        let mut poller = Poller::new(fast_config(), Arc::new(DrainingHp::new()), None);
        poller
            .start(Box::new(CountingSink {
                delivered: delivered.clone(),
            }))
            .expect("start");

        std::thread::sleep(Duration::from_millis(200));
        poller.stop().expect("stop");

        let stats = poller.stats();
        assert!(stats.total_ticks > 2, "ticks = {}", stats.total_ticks);
        assert!(delivered.load(Ordering::SeqCst) > 0);

        let snapshot = poller.latest_snapshot().expect("published snapshot");
        assert_eq!(snapshot.get("main_module"), 0x09);
        // Every watched field was readable.
        assert_eq!(snapshot.raw_fields().len(), MEMORY_MAP.len());
    }

    #[test]
    fn unreadable_primary_mode_skips_the_whole_tick() {
        let delivered = Arc::new(AtomicUsize::new(0));
        let mut poller = Poller::new(fast_config(), Arc::new(UnreadableModule), None);
        poller
            .start(Box::new(CountingSink {
                delivered: delivered.clone(),
            }))
            .expect("start");

        std::thread::sleep(Duration::from_millis(100));
        poller.stop().expect("stop");

        let stats = poller.stats();
        assert_eq!(stats.total_ticks, 0);
        assert!(stats.skipped_ticks > 0);
        assert!(poller.latest_snapshot().is_none());
        assert_eq!(delivered.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn panicking_tick_is_swallowed_and_loop_continues() {
        let panicked = Arc::new(AtomicBool::new(false));
        let delivered = Arc::new(AtomicUsize::new(0));

        let mut poller = Poller::new(fast_config(), Arc::new(DrainingHp::new()), None);
        poller
            .start(Box::new(FaultySink {
                panicked: panicked.clone(),
                delivered: delivered.clone(),
            }))
            .expect("start");

        std::thread::sleep(Duration::from_millis(300));
        poller.stop().expect("stop");

        assert!(panicked.load(Ordering::SeqCst), "sink never panicked");
        // Deliveries after the panic prove the loop survived it.
        assert!(
            delivered.load(Ordering::SeqCst) > 0,
            "loop died with the panicking tick"
        );
    }

    #[test]
    fn double_start_is_rejected() {
        let mut poller = Poller::new(fast_config(), Arc::new(UnreadableModule), None);
        poller
            .start(Box::new(CountingSink {
                delivered: Arc::new(AtomicUsize::new(0)),
            }))
            .expect("start");
        let second = poller.start(Box::new(CountingSink {
            delivered: Arc::new(AtomicUsize::new(0)),
        }));
        assert!(matches!(second, Err(BridgeError::AlreadyRunning)));
        poller.stop().expect("stop");
    }

    #[test]
    fn stop_is_idempotent() {
        let mut poller = Poller::new(fast_config(), Arc::new(UnreadableModule), None);
        poller
            .start(Box::new(CountingSink {
                delivered: Arc::new(AtomicUsize::new(0)),
            }))
            .expect("start");
        poller.stop().expect("first stop");
        poller.stop().expect("second stop");
        assert!(!poller.is_running());
    }
}
