//! Core value types shared across all modules.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Facing direction
// ---------------------------------------------------------------------------

/// The player's facing direction as stored in the direction register.
///
/// The hardware uses even values only (0/2/4/6); odd values never occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub fn from_register(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::North),
            2 => Some(Self::South),
            4 => Some(Self::West),
            6 => Some(Self::East),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
        }
    }

    /// Pixel offset from the player's raw position to the tile probed when
    /// reading "the tile ahead".  Asymmetric on purpose: the sprite origin
    /// is its top-left corner and the body hitbox sits low.
    pub fn facing_probe_offset(self) -> (i32, i32) {
        match self {
            Self::North => (8, -2),
            Self::South => (8, 24),
            Self::West => (-2, 12),
            Self::East => (18, 12),
        }
    }

    /// One-tile step along this direction in 8-px tile units.
    pub fn tile_step(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::East => (1, 0),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Compass labels
// ---------------------------------------------------------------------------

/// Compass label from the player to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compass {
    Here,
    North,
    South,
    West,
    East,
    Northwest,
    Northeast,
    Southwest,
    Southeast,
}

impl Compass {
    /// Label a pixel delta.  Within 8 px on both axes the target is "here";
    /// one axis dominating the other by more than 3:1 yields a pure
    /// cardinal; anything else is an intercardinal.
    pub fn from_delta(dx: i32, dy: i32) -> Self {
        if dx.abs() < 8 && dy.abs() < 8 {
            return Self::Here;
        }
        if dx.abs() > dy.abs() * 3 {
            return if dx < 0 { Self::West } else { Self::East };
        }
        if dy.abs() > dx.abs() * 3 {
            return if dy < 0 { Self::North } else { Self::South };
        }
        match (dy < 0, dx < 0) {
            (true, true) => Self::Northwest,
            (true, false) => Self::Northeast,
            (false, true) => Self::Southwest,
            (false, false) => Self::Southeast,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Here => "here",
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
            Self::Northwest => "northwest",
            Self::Northeast => "northeast",
            Self::Southwest => "southwest",
            Self::Southeast => "southeast",
        }
    }

    /// True when this label matches a facing direction exactly.
    pub fn matches(self, dir: Direction) -> bool {
        matches!(
            (self, dir),
            (Self::North, Direction::North)
                | (Self::South, Direction::South)
                | (Self::West, Direction::West)
                | (Self::East, Direction::East)
        )
    }
}

impl std::fmt::Display for Compass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Sprite categories
// ---------------------------------------------------------------------------

/// Closed classification of sprite/object types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteCategory {
    Enemy,
    Boss,
    Npc,
    Interactable,
    Hazard,
    Object,
    Unknown,
}

impl SpriteCategory {
    pub fn name(self) -> &'static str {
        match self {
            Self::Enemy => "enemy",
            Self::Boss => "boss",
            Self::Npc => "npc",
            Self::Interactable => "interactable",
            Self::Hazard => "hazard",
            Self::Object => "object",
            Self::Unknown => "unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// Proximity zones
// ---------------------------------------------------------------------------

/// Proximity/alignment classification for a tracked object, outermost to
/// innermost.  "No zone" is `Option::<Zone>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Approach,
    Nearby,
    Facing,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPriority {
    Low,
    Medium,
    High,
}

/// Every event the bridge can announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Death,
    DamageTaken,
    LowHealth,
    NearPit,
    RoomChange,
    WorldTransition,
    DungeonEnterExit,
    Transition,
    FloorChange,
    EnteredBuilding,
    ItemAcquired,
    EquipmentUpgrade,
    KeyAcquired,
    HealthRestored,
    ProgressMilestone,
    BossVictory,
    Swimming,
    Dialog,
    EnemyNearby,
    ItemDrop,
    SpriteNearby,
    Blocked,
    Proximity,
    Facing,
    ConeTile,
}

/// One announceable event, produced fresh each tick.
///
/// `data` carries a diagnostic payload; sinks only surface it when the
/// diagnostics flag is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub priority: EventPriority,
    pub message: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
}

impl Event {
    pub fn new(kind: EventKind, priority: EventPriority, message: impl Into<String>) -> Self {
        Self {
            kind,
            priority,
            message: message.into(),
            data: serde_json::Value::Null,
        }
    }

    pub fn with_data(
        kind: EventKind,
        priority: EventPriority,
        message: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            kind,
            priority,
            message: message.into(),
            data,
        }
    }
}

// ---------------------------------------------------------------------------
// Stats & config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeStats {
    pub total_ticks: u64,
    pub skipped_ticks: u64,
    pub events_emitted: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Poll cadence in Hz.
    pub poll_hz: f64,
    /// Consecutive blocked ticks before a BLOCKED announcement fires.
    pub blocked_threshold: u32,
    /// Attach diagnostic payloads to proximity-class output.
    pub diagnostics: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            poll_hz: 30.0,
            blocked_threshold: 1,
            diagnostics: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error("emulator rejected command: {0}")]
    Protocol(String),

    #[error("poll loop is already running")]
    AlreadyRunning,

    #[error("poll loop did not stop within {0:.1}s")]
    StopTimeout(f64),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
