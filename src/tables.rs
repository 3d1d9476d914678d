//! Memory field table and read-only lookup tables.
//!
//! Everything here is immutable configuration: name/category/description
//! tables keyed by raw ids, built once at startup into read-only maps.
//! The tables are authoritative data lifted from the game; they are not
//! derived from formulas.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::types::SpriteCategory;

// ---------------------------------------------------------------------------
// Memory field table
// ---------------------------------------------------------------------------

/// Named logical fields read once per tick: (name, address, byte width).
pub const MEMORY_MAP: &[(&str, u32, usize)] = &[
    // Position
    ("link_y", 0x7E0020, 2),
    ("link_x", 0x7E0022, 2),
    ("direction", 0x7E002F, 1),
    // Game mode
    ("main_module", 0x7E0010, 1),
    ("submodule", 0x7E0011, 1),
    ("indoors", 0x7E001B, 1),
    // Location
    ("ow_screen", 0x7E008A, 2),
    ("dungeon_room", 0x7E00A0, 2),
    ("floor", 0x7E00A4, 1),
    ("world", 0x7E007B, 1),
    ("lower_level", 0x7E00EE, 1),
    // Overworld tile offset registers
    ("ow_offset_base_y", 0x7E0708, 2),
    ("ow_offset_mask_y", 0x7E070A, 2),
    ("ow_offset_base_x", 0x7E070C, 2),
    ("ow_offset_mask_x", 0x7E070E, 2),
    // Health
    ("hp", 0x7EF36D, 1),
    ("max_hp", 0x7EF36C, 1),
    ("magic", 0x7EF36E, 1),
    // Resources
    ("bombs", 0x7EF343, 1),
    ("arrows", 0x7EF377, 1),
    ("rupees", 0x7EF360, 2),
    ("keys", 0x7EF36F, 1),
    // Equipment
    ("sword", 0x7EF359, 1),
    ("shield", 0x7EF35A, 1),
    ("armor", 0x7EF35B, 1),
    ("gloves", 0x7EF357, 1),
    ("boots", 0x7EF358, 1),
    ("flippers", 0x7EF35C, 1),
    ("moon_pearl", 0x7EF35D, 1),
    // Inventory
    ("bow", 0x7EF340, 1),
    ("boomerang", 0x7EF341, 1),
    ("hookshot", 0x7EF342, 1),
    ("mushroom_powder", 0x7EF344, 1),
    ("fire_rod", 0x7EF345, 1),
    ("ice_rod", 0x7EF346, 1),
    ("bombos", 0x7EF347, 1),
    ("ether", 0x7EF348, 1),
    ("quake", 0x7EF349, 1),
    ("lamp", 0x7EF34A, 1),
    ("hammer", 0x7EF34B, 1),
    ("flute_shovel", 0x7EF34C, 1),
    ("bug_net", 0x7EF34D, 1),
    ("book", 0x7EF34E, 1),
    ("bottle_1", 0x7EF34F, 1),
    ("bottle_2", 0x7EF350, 1),
    ("bottle_3", 0x7EF351, 1),
    ("bottle_4", 0x7EF352, 1),
    ("cane_somaria", 0x7EF353, 1),
    ("cane_byrna", 0x7EF354, 1),
    ("magic_cape", 0x7EF355, 1),
    ("mirror", 0x7EF356, 1),
    // Input
    ("joypad_dir", 0x7E00F0, 1),
    // Status
    ("link_state", 0x7E005D, 1),
    ("damage_timer", 0x7E0046, 1),
    ("pit_proximity", 0x7E005B, 1),
    // Progress
    ("pendants", 0x7EF374, 1),
    ("crystals", 0x7EF37A, 1),
    ("progress", 0x7EF3C5, 1),
    // Dungeon-specific
    ("trap_doors", 0x7E0468, 1),
    ("ganon_state", 0x7E04C5, 1),
    // Dialog
    ("dialog_id", 0x7E1CF0, 2),
];

/// Live sprite table: 16 slots of (low-y, low-x, high-y, high-x) position
/// planes plus per-slot state and type bytes.
pub const SPRITE_POSITIONS_ADDR: u32 = 0x7E0D00;
pub const SPRITE_POSITIONS_LEN: usize = 64;
pub const SPRITE_STATES_ADDR: u32 = 0x7E0DD0;
pub const SPRITE_STATES_LEN: usize = 16;
pub const SPRITE_TYPES_ADDR: u32 = 0x7E0E20;
pub const SPRITE_TYPES_LEN: usize = 16;
pub const SPRITE_SLOTS: usize = 16;

/// Dungeon tile attribute table (64x64 bytes, +0x1000 for the lower level).
pub const DUNGEON_TILE_ATTR_ADDR: u32 = 0x7F2000;
/// Overworld map16 tile table (2-byte stride, 8 KiB).
pub const OVERWORLD_TILE_ADDR: u32 = 0x7E2000;

// ---------------------------------------------------------------------------
// Game modules
// ---------------------------------------------------------------------------

pub const MODULE_DUNGEON: u32 = 0x07;
pub const MODULE_OVERWORLD: u32 = 0x09;
pub const MODULE_DIALOG: u32 = 0x0E;
pub const MODULE_DEATH: u32 = 0x12;
pub const MODULE_BOSS_VICTORY: u32 = 0x13;

/// Primary modes during which event detection is active.
pub fn is_gameplay_module(module: u32) -> bool {
    matches!(module, 0x07 | 0x09 | 0x0A | 0x0B | 0x0E | 0x0F | 0x10)
}

pub static MODULE_NAMES: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (0x00, "Title/Triforce"),
        (0x01, "File Select"),
        (0x02, "Copy/Erase"),
        (0x04, "Save Menu"),
        (0x05, "Loading"),
        (0x06, "Pre-Dungeon"),
        (0x07, "Dungeon"),
        (0x08, "Pre-Dungeon (Map)"),
        (0x09, "Overworld"),
        (0x0A, "Special Overworld"),
        (0x0B, "Special Overworld"),
        (0x0E, "Text/Dialog"),
        (0x0F, "Closing Dialog"),
        (0x10, "Shop/Interact"),
        (0x11, "Inventory Screen"),
        (0x12, "Death"),
        (0x13, "Boss Victory"),
        (0x14, "Dungeon Clear"),
        (0x15, "Fade Transition"),
        (0x17, "Dungeon Cutscene"),
        (0x19, "Ganon/Triforce Room"),
        (0x1A, "End Credits"),
        (0x1B, "Save and Continue"),
    ])
});

pub static LINK_STATE_NAMES: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (0x00, "standing"),
        (0x01, "falling into hole"),
        (0x02, "recoiling"),
        (0x03, "spin attack"),
        (0x04, "rolling back"),
        (0x05, "tile transition"),
        (0x06, "falling (long)"),
        (0x09, "attacked"),
        (0x0D, "hovering"),
        (0x11, "swimming"),
        (0x14, "dashing"),
        (0x17, "using item"),
        (0x1C, "falling"),
        (0x1E, "dying"),
    ])
});

pub const LINK_STATE_SWIMMING: u32 = 0x11;

// ---------------------------------------------------------------------------
// Sprite types
// ---------------------------------------------------------------------------

/// Comprehensive sprite type table: id -> (name, category).
pub static SPRITE_TYPES: Lazy<HashMap<u8, (&'static str, SpriteCategory)>> = Lazy::new(|| {
    use SpriteCategory::{Boss, Enemy, Hazard, Interactable, Npc, Object};
    HashMap::from([
        (0x01, ("Raven", Enemy)),
        (0x02, ("Vulture", Enemy)),
        (0x08, ("Octorok (1-way)", Enemy)),
        (0x09, ("Octorok (4-way)", Enemy)),
        (0x0A, ("Cucco", Npc)),
        (0x0C, ("Buzzblob", Enemy)),
        (0x0D, ("Snapdragon", Enemy)),
        (0x0E, ("Octoballoon", Enemy)),
        (0x0F, ("Octoballoon baby", Enemy)),
        (0x10, ("Hinox", Enemy)),
        (0x11, ("Moblin", Enemy)),
        (0x12, ("Mini Helmasaur", Enemy)),
        (0x13, ("Thieves' Town Grate", Object)),
        (0x15, ("Antifairy", Hazard)),
        (0x16, ("Elder", Npc)),
        (0x17, ("Hylian villager", Npc)),
        (0x18, ("Mini Moldorm", Enemy)),
        (0x19, ("Poe", Enemy)),
        (0x1A, ("Leever", Enemy)),
        (0x1B, ("Arrow target", Object)),
        (0x1C, ("Statue pullable", Interactable)),
        (0x1E, ("Crystal switch", Interactable)),
        (0x1F, ("Sick Kid", Npc)),
        (0x20, ("Sluggula", Enemy)),
        (0x21, ("Water switch", Interactable)),
        (0x22, ("Ropa", Enemy)),
        (0x23, ("Red Bari", Enemy)),
        (0x24, ("Blue Bari", Enemy)),
        (0x25, ("Talking tree", Npc)),
        (0x26, ("Hardhat Beetle", Enemy)),
        (0x27, ("Deadrock", Enemy)),
        (0x28, ("Storyteller", Npc)),
        (0x29, ("Zora", Enemy)),
        (0x2A, ("Weathervane", Object)),
        (0x2B, ("Pikit", Enemy)),
        (0x2C, ("Maiden at sanctuary", Npc)),
        (0x2D, ("Apple tree", Object)),
        (0x2F, ("Master Sword", Object)),
        (0x30, ("Devalant (non-shooter)", Enemy)),
        (0x31, ("Devalant (shooter)", Enemy)),
        (0x33, ("Rupee crab", Enemy)),
        (0x35, ("Toppo", Enemy)),
        (0x37, ("Popo", Enemy)),
        (0x38, ("Popo (2)", Enemy)),
        (0x39, ("Cane of Byrna spark", Hazard)),
        (0x3B, ("Hylian guard", Npc)),
        (0x3D, ("Bush hoarder", Enemy)),
        (0x3E, ("Bombable guard", Npc)),
        (0x3F, ("Whirlpool", Hazard)),
        (0x40, ("open chest", Interactable)),
        (0x41, ("Green Soldier", Enemy)),
        (0x42, ("Blue Soldier", Enemy)),
        (0x43, ("Red Javelin Soldier", Enemy)),
        (0x44, ("Red Sword Soldier", Enemy)),
        (0x45, ("Blue Archer Soldier", Enemy)),
        (0x46, ("Green Archer Soldier", Enemy)),
        (0x47, ("Blue Javelin Soldier", Enemy)),
        (0x48, ("Red Javelin Soldier (2)", Enemy)),
        (0x49, ("Red Bomb Soldier", Enemy)),
        (0x4A, ("Green Bomb Soldier", Enemy)),
        (0x4B, ("lantern", Object)),
        (0x53, ("Armos", Enemy)),
        (0x54, ("Armos Knight", Boss)),
        (0x55, ("Lanmola", Boss)),
        (0x56, ("Fireball Zora", Enemy)),
        (0x57, ("Walking Zora", Enemy)),
        (0x58, ("Desert Crab", Enemy)),
        (0x59, ("Lost Woods Bird", Enemy)),
        (0x5B, ("Spark (clockwise)", Hazard)),
        (0x5C, ("Spark (counterclockwise)", Hazard)),
        (0x5D, ("Roller (vertical)", Hazard)),
        (0x5E, ("Roller (horizontal)", Hazard)),
        (0x60, ("Roller (diagonal)", Hazard)),
        (0x61, ("Beamos", Hazard)),
        (0x63, ("Debirando", Enemy)),
        (0x64, ("Debirando (falling)", Enemy)),
        (0x66, ("Wall cannon (vertical)", Hazard)),
        (0x67, ("Wall cannon (horizontal)", Hazard)),
        (0x68, ("Ball and Chain Trooper", Enemy)),
        (0x69, ("Cannon Soldier", Enemy)),
        (0x6A, ("Ball and Chain Trooper", Enemy)),
        (0x6B, ("Rat", Enemy)),
        (0x6C, ("Rope", Enemy)),
        (0x6D, ("Keese", Enemy)),
        (0x6E, ("Helmasaur King Fireball", Hazard)),
        (0x6F, ("Leever", Enemy)),
        (0x70, ("Fairy activation", Interactable)),
        (0x71, ("Uncle / Priest", Npc)),
        (0x72, ("Running Man", Npc)),
        (0x73, ("Bottle Vendor", Npc)),
        (0x74, ("Princess Zelda", Npc)),
        (0x76, ("Zelda", Npc)),
        (0x77, ("Pipe Down", Object)),
        (0x78, ("Pipe Up", Object)),
        (0x79, ("Pipe Right", Object)),
        (0x7A, ("Pipe Left", Object)),
        (0x7B, ("Good Bee", Npc)),
        (0x7C, ("Hylian inscription", Object)),
        (0x7D, ("Thief hoarder", Npc)),
        (0x7E, ("Bug-catching Kid", Npc)),
        (0x80, ("Moldorm (Eye)", Boss)),
        (0x81, ("Moldorm", Boss)),
        (0x82, ("Telepathic tile", Interactable)),
        (0x83, ("Green Eyegore", Enemy)),
        (0x84, ("Red Eyegore", Enemy)),
        (0x85, ("Stalfos", Enemy)),
        (0x86, ("Kodongo", Enemy)),
        (0x87, ("Kodongo fire", Hazard)),
        (0x88, ("Mothula", Boss)),
        (0x89, ("Mothula beam", Hazard)),
        (0x8A, ("Spike Trap", Hazard)),
        (0x8B, ("Gibdo", Enemy)),
        (0x8C, ("Arrghus", Boss)),
        (0x8D, ("Arrghus spawn", Boss)),
        (0x8E, ("Terrorpin", Enemy)),
        (0x8F, ("Blob", Enemy)),
        (0x90, ("Wallmaster", Enemy)),
        (0x91, ("Stalfos Knight", Enemy)),
        (0x92, ("Helmasaur King", Boss)),
        (0x93, ("Bumper", Hazard)),
        (0x95, ("Laser Eye (right)", Hazard)),
        (0x96, ("Laser Eye (left)", Hazard)),
        (0x97, ("Laser Eye (down)", Hazard)),
        (0x98, ("Laser Eye (up)", Hazard)),
        (0x99, ("Pengator", Enemy)),
        (0x9A, ("Kyameron", Enemy)),
        (0x9B, ("Wizzrobe", Enemy)),
        (0xA0, ("Babasu", Enemy)),
        (0xA1, ("Babusu", Hazard)),
        (0xA2, ("Haunted grove hopper", Enemy)),
        (0xA3, ("Lumberjack tree pull", Object)),
        (0xA4, ("Teleport bug", Hazard)),
        (0xA5, ("Firesnake", Enemy)),
        (0xA6, ("Hover", Hazard)),
        (0xA7, ("Water Tektite", Enemy)),
        (0xA8, ("Antifairy Circle", Hazard)),
        (0xA9, ("Green Eyegore (mimic)", Enemy)),
        (0xAA, ("Red Eyegore (mimic)", Enemy)),
        (0xAB, ("Yellow Stalfos", Enemy)),
        (0xAC, ("Kodongo", Enemy)),
        (0xAD, ("Flames", Hazard)),
        (0xAE, ("Mothula platform", Hazard)),
        (0xB1, ("Four-way fireball", Hazard)),
        (0xB2, ("Guruguru Bar (clockwise)", Hazard)),
        (0xB3, ("Guruguru Bar (counterclockwise)", Hazard)),
        (0xB4, ("Winder", Enemy)),
        (0xB5, ("Draw bridge", Object)),
        (0xB6, ("Rupee pull", Interactable)),
        (0xB9, ("Red Rupee Crab", Enemy)),
        (0xBA, ("Red Bari", Enemy)),
        (0xBB, ("Blue Bari", Enemy)),
        (0xBC, ("Tektite", Enemy)),
        (0xC8, ("Blind", Boss)),
        (0xC9, ("Blind laser", Hazard)),
        (0xCB, ("Kholdstare", Boss)),
        (0xCC, ("Kholdstare shell", Boss)),
        (0xCE, ("Vitreous", Boss)),
        (0xCF, ("Vitreous (small)", Boss)),
        (0xD0, ("Viterous lightning", Hazard)),
        (0xD1, ("Catfish", Npc)),
        (0xD2, ("Agahnim teleport", Hazard)),
        (0xD3, ("Bully / Pink Ball", Enemy)),
        (0xD4, ("Whirlpool", Hazard)),
        (0xD6, ("Ganon", Boss)),
        (0xD7, ("Agahnim", Boss)),
        (0xD8, ("Heart", Interactable)),
        (0xD9, ("Green Rupee", Interactable)),
        (0xDA, ("Blue Rupee", Interactable)),
        (0xDB, ("Red Rupee", Interactable)),
        (0xDC, ("Bombs (1)", Interactable)),
        (0xDD, ("Bombs (4)", Interactable)),
        (0xDE, ("Bombs (8)", Interactable)),
        (0xDF, ("Small Magic Jar", Interactable)),
        (0xE0, ("Large Magic Jar", Interactable)),
        (0xE1, ("Arrows (5)", Interactable)),
        (0xE2, ("Arrows (10)", Interactable)),
        (0xE3, ("Fairy", Npc)),
        (0xE4, ("Small Key", Interactable)),
        (0xE5, ("Big Key", Interactable)),
        (0xE8, ("Mushroom", Interactable)),
        (0xE9, ("Fake Master Sword", Object)),
        (0xEB, ("Shopkeeper", Npc)),
        (0xED, ("Maiden", Npc)),
        (0xF2, ("Chest game guy", Npc)),
        (0xF4, ("Sahasrahla", Npc)),
        (0xF5, ("Old Man on mountain", Npc)),
        (0xF7, ("Witch", Npc)),
        (0xF9, ("Waterfall fairy", Npc)),
    ])
});

/// Enemy table used for the "is this an enemy" check and as a name
/// fallback.  Narrower than the category table on purpose: only types the
/// enemy-alert path should ever announce.
pub static ENEMY_NAMES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (0x01, "Raven"),
        (0x02, "Vulture"),
        (0x08, "Octorok"),
        (0x09, "Octorok"),
        (0x0C, "Buzzblob"),
        (0x0D, "Snapdragon"),
        (0x0E, "Octoballoon"),
        (0x10, "Hinox"),
        (0x11, "Moblin"),
        (0x12, "Mini Helmasaur"),
        (0x15, "Antifairy"),
        (0x18, "Mini Moldorm"),
        (0x19, "Poe"),
        (0x1A, "Leever"),
        (0x23, "Red Bari"),
        (0x24, "Blue Bari"),
        (0x26, "Hardhat Beetle"),
        (0x27, "Deadrock"),
        (0x29, "Zora"),
        (0x2B, "Pikit"),
        (0x41, "Green Soldier"),
        (0x42, "Blue Soldier"),
        (0x43, "Red Soldier"),
        (0x44, "Red Soldier"),
        (0x45, "Blue Archer"),
        (0x46, "Green Archer"),
        (0x47, "Blue Soldier"),
        (0x48, "Red Soldier"),
        (0x49, "Red Bomb Soldier"),
        (0x4A, "Green Bomb Soldier"),
        (0x53, "Armos"),
        (0x54, "Armos Knight"),
        (0x55, "Lanmola"),
        (0x58, "Crab"),
        (0x6A, "Ball and Chain Trooper"),
        (0x83, "Green Eyegore"),
        (0x84, "Red Eyegore"),
        (0x85, "Stalfos"),
        (0x86, "Kodongo"),
        (0x88, "Mothula"),
        (0x8B, "Spike Trap"),
        (0x90, "Wallmaster"),
        (0x91, "Stalfos Knight"),
        (0x92, "Helmasaur King"),
        (0x9B, "Wizzrobe"),
        (0xA5, "Firesnake"),
        (0xA7, "Water Tektite"),
        (0xCB, "Blind"),
        (0xCE, "Vitreous"),
        (0xD6, "Ganon"),
        (0xD7, "Agahnim"),
    ])
});

pub fn sprite_name(type_id: u8) -> String {
    if let Some((name, _)) = SPRITE_TYPES.get(&type_id) {
        return (*name).to_string();
    }
    match ENEMY_NAMES.get(&type_id) {
        Some(name) => (*name).to_string(),
        None => format!("sprite {:#04x}", type_id),
    }
}

pub fn sprite_category(type_id: u8) -> SpriteCategory {
    SPRITE_TYPES
        .get(&type_id)
        .map(|(_, cat)| *cat)
        .unwrap_or(SpriteCategory::Unknown)
}

pub fn is_enemy_type(type_id: u8) -> bool {
    ENEMY_NAMES.contains_key(&type_id)
}

/// Item-drop sprite ids (hearts, rupees, bombs, keys, ...).
pub fn is_item_drop(type_id: u8) -> bool {
    (0xD8..=0xE5).contains(&type_id)
}

pub const ENEMY_DETECT_RADIUS: i32 = 112;
pub const INTERACT_RADIUS: i32 = 24;

/// Offset from the player's raw (top-left) position to the body center.
pub const BODY_OFFSET_X: i32 = 8;
pub const BODY_OFFSET_Y: i32 = 8;

// ---------------------------------------------------------------------------
// Tile names
// ---------------------------------------------------------------------------

/// Tile attribute byte -> human name.  Only interesting/interactable tile
/// types are listed; unlisted attributes are passable ground.
pub static TILE_TYPE_NAMES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (0x01, "wall"),
        (0x02, "wall"),
        (0x03, "wall"),
        (0x04, "thick grass"), // indoors this attribute is a wall
        (0x08, "deep water"),
        (0x09, "shallow water"),
        (0x0A, "water ladder"),
        (0x0D, "spike floor"),
        (0x0E, "ice floor"),
        (0x0F, "ice floor"),
        (0x1C, "ledge"),
        (0x1D, "stairs"),
        (0x1E, "stairs"),
        (0x1F, "stairs"),
        (0x20, "pit"),
        (0x22, "stairs"),
        (0x26, "wall"),
        (0x27, "hookshot target"),
        (0x28, "ledge (north)"),
        (0x29, "ledge (south)"),
        (0x2A, "ledge (east)"),
        (0x2B, "ledge (west)"),
        (0x40, "thick grass"),
        (0x42, "gravestone"),
        (0x43, "wall"),
        (0x44, "cactus"),
        (0x46, "sign"),
        (0x48, "diggable ground"),
        (0x4A, "diggable ground"),
        (0x4B, "warp tile"),
        (0x50, "bush"),
        (0x51, "bush"),
        (0x52, "liftable rock"),
        (0x53, "liftable rock"),
        (0x54, "liftable boulder"),
        (0x55, "liftable boulder"),
        (0x56, "liftable boulder"),
        (0x57, "dashable rocks"),
        (0x58, "chest"),
        (0x59, "chest"),
        (0x5A, "chest"),
        (0x5B, "chest"),
        (0x5C, "chest"),
        (0x5D, "chest"),
        (0x60, "rupee tile"),
        (0x67, "crystal peg"),
        (0x68, "conveyor (north)"),
        (0x69, "conveyor (south)"),
        (0x6A, "conveyor (west)"),
        (0x6B, "conveyor (east)"),
        (0x70, "pushable block"),
        (0x71, "pushable block"),
        (0x72, "pushable block"),
        (0x73, "pushable block"),
        (0x74, "pushable block"),
        (0x75, "pushable block"),
        (0x76, "pushable block"),
        (0x77, "pushable block"),
        (0x78, "pushable block"),
        (0x79, "pushable block"),
        (0x7A, "pushable block"),
        (0x7B, "pushable block"),
        (0x7C, "pushable block"),
        (0x7D, "pushable block"),
        (0x7E, "pushable block"),
        (0x7F, "pushable block"),
        (0x8E, "entrance"),
        (0x8F, "entrance"),
    ])
});

/// Attributes that read as plain walls when indoors.
pub fn is_indoor_wall_tile(attr: u8) -> bool {
    matches!(attr, 0x04 | 0x0B | 0x6C | 0x6D | 0x6E | 0x6F)
}

/// Attribute of an opened chest tile.
pub const TILE_ATTR_OPEN_CHEST: u8 = 0x27;

/// Doorway/transition tile attributes in the dungeon attribute grid.
pub fn is_doorway_tile(attr: u8) -> bool {
    (0x30..=0x37).contains(&attr)
}

/// Map16 index -> human name, keyed by the graphic tiles drawn.  Many
/// visually distinct objects share the same tile attribute byte (signs,
/// pots, and skulls all use the "liftable" attributes), so graphic-based
/// identification reports what the player actually sees.
pub static MAP16_NAMES: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (0x0036, "bush"),
        (0x0064, "gravestone"),
        (0x006F, "gravestone"),
        (0x0190, "gravestone"),
        (0x019A, "gravestone"),
        (0x01A0, "gravestone"),
        (0x038F, "gravestone"),
        (0x0101, "sign"),
        (0x020F, "liftable rock"),
        (0x0239, "liftable rock"),
        (0x023B, "dark rock"),
        (0x023C, "dark rock"),
        (0x023D, "dark rock"),
        (0x023E, "dark rock"),
        (0x0226, "dashable rocks"),
        (0x0227, "dashable rocks"),
        (0x0228, "dashable rocks"),
        (0x0229, "dashable rocks"),
        (0x036D, "liftable pot"),
        (0x036E, "liftable pot"),
        (0x0374, "liftable pot"),
        (0x0375, "liftable pot"),
    ])
});

// ---------------------------------------------------------------------------
// Item tables
// ---------------------------------------------------------------------------

/// Present-or-absent inventory items: field name -> display name.
pub const BOOLEAN_ITEMS: &[(&str, &str)] = &[
    ("hookshot", "Hookshot"),
    ("fire_rod", "Fire Rod"),
    ("ice_rod", "Ice Rod"),
    ("bombos", "Bombos Medallion"),
    ("ether", "Ether Medallion"),
    ("quake", "Quake Medallion"),
    ("lamp", "Lamp"),
    ("hammer", "Hammer"),
    ("bug_net", "Bug Net"),
    ("book", "Book of Mudora"),
    ("cane_somaria", "Cane of Somaria"),
    ("cane_byrna", "Cane of Byrna"),
    ("magic_cape", "Magic Cape"),
    ("boots", "Pegasus Boots"),
    ("flippers", "Zora's Flippers"),
    ("moon_pearl", "Moon Pearl"),
];

pub const SWORD_NAMES: &[&str] = &[
    "no sword",
    "Fighter's Sword",
    "Master Sword",
    "Tempered Sword",
    "Golden Sword",
];
pub const SHIELD_NAMES: &[&str] = &[
    "no shield",
    "Fighter's Shield",
    "Fire Shield",
    "Mirror Shield",
];
pub const ARMOR_NAMES: &[&str] = &["Green Mail", "Blue Mail", "Red Mail"];
pub const GLOVE_NAMES: &[&str] = &["no gloves", "Power Glove", "Titan's Mitt"];
pub const BOW_NAMES: &[&str] = &["none", "Bow", "Bow with Silver Arrows", "Silver Bow"];
pub const BOOMERANG_NAMES: &[&str] = &["none", "Blue Boomerang", "Red Boomerang"];
pub const MUSHROOM_POWDER_NAMES: &[&str] = &["none", "Mushroom", "Magic Powder"];
pub const FLUTE_SHOVEL_NAMES: &[&str] = &["none", "Shovel", "Flute (inactive)", "Flute"];
pub const MIRROR_NAMES: &[&str] = &["none", "Magic Scroll", "Magic Mirror"];
pub const BOTTLE_NAMES: &[&str] = &[
    "no bottle",
    "Mushroom",
    "Empty Bottle",
    "Red Potion",
    "Green Potion",
    "Blue Potion",
    "Bee",
    "Golden Bee",
    "Fairy",
];

/// Field names with tiered values, resolvable through [`tiered_name`].
pub const TIERED_KEYS: &[&str] = &[
    "bow",
    "boomerang",
    "mushroom_powder",
    "flute_shovel",
    "mirror",
    "sword",
    "shield",
    "armor",
    "gloves",
];

/// Equipment fields whose tier can only increase.
pub const EQUIPMENT_KEYS: &[&str] = &["sword", "shield", "armor", "gloves"];

pub fn tiered_name(key: &str, value: u32) -> Option<&'static str> {
    let table: &[&str] = match key {
        "bow" => BOW_NAMES,
        "boomerang" => BOOMERANG_NAMES,
        "mushroom_powder" => MUSHROOM_POWDER_NAMES,
        "flute_shovel" => FLUTE_SHOVEL_NAMES,
        "mirror" => MIRROR_NAMES,
        "sword" => SWORD_NAMES,
        "shield" => SHIELD_NAMES,
        "armor" => ARMOR_NAMES,
        "gloves" => GLOVE_NAMES,
        _ => return None,
    };
    table.get(value as usize).copied()
}

pub fn boolean_item_name(key: &str) -> Option<&'static str> {
    BOOLEAN_ITEMS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| *name)
}

/// Every inventory field the item-acquired rule watches.
pub static INVENTORY_KEYS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut keys: Vec<&'static str> = BOOLEAN_ITEMS.iter().map(|(k, _)| *k).collect();
    keys.extend([
        "bow",
        "boomerang",
        "mushroom_powder",
        "flute_shovel",
        "mirror",
        "bottle_1",
        "bottle_2",
        "bottle_3",
        "bottle_4",
    ]);
    keys
});

/// Keys register reads 0xFF outside dungeons; never a real count.
pub const KEYS_UNINITIALIZED: u32 = 0xFF;

// ---------------------------------------------------------------------------
// Overworld screens
// ---------------------------------------------------------------------------

pub static OVERWORLD_NAMES: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Light World
        (0x00, "Lost Woods (north)"),
        (0x02, "Lumberjack Tree area"),
        (0x03, "West Death Mountain"),
        (0x05, "East Death Mountain"),
        (0x07, "Death Mountain Summit"),
        (0x0A, "Spectacle Rock"),
        (0x0F, "Zora's Waterfall"),
        (0x10, "Lost Woods (south)"),
        (0x12, "Fortune Teller"),
        (0x14, "Master Sword Clearing"),
        (0x15, "Hyrule Castle (north)"),
        (0x16, "Hyrule Castle (east)"),
        (0x17, "Witch's Hut area"),
        (0x18, "Kakariko Village"),
        (0x1A, "Haunted Grove"),
        (0x1B, "Hyrule Castle"),
        (0x1C, "Hyrule Castle (east grounds)"),
        (0x1E, "Eastern Palace"),
        (0x22, "Sanctuary"),
        (0x25, "Graveyard"),
        (0x28, "Kakariko (south)"),
        (0x29, "Sahasrahla's area"),
        (0x2A, "Central Hyrule Field"),
        (0x2B, "Link's House"),
        (0x2C, "Eastern Hyrule"),
        (0x2E, "Eastern Palace grounds"),
        (0x30, "Desert of Mystery"),
        (0x32, "Flute Boy's Meadow"),
        (0x33, "Lake Hylia (north)"),
        (0x34, "Waterfall of Wishing"),
        (0x35, "Lake Hylia"),
        (0x37, "Lake Hylia Island"),
        (0x3A, "Dam"),
        (0x3B, "Ice Rod Cave area"),
        // Dark World
        (0x40, "Skull Woods"),
        (0x43, "West Dark Death Mountain"),
        (0x45, "East Dark Death Mountain"),
        (0x47, "Turtle Rock"),
        (0x4A, "Ganon's Tower area"),
        (0x58, "Village of Outcasts"),
        (0x5A, "Stumpy's Clearing"),
        (0x5B, "Pyramid of Power"),
        (0x5E, "Palace of Darkness"),
        (0x62, "Dark Sanctuary area"),
        (0x68, "Thieves' Town"),
        (0x69, "Dark World Archery"),
        (0x6A, "Dark World Center"),
        (0x6B, "Swamp Palace area"),
        (0x70, "Misery Mire"),
        (0x72, "Dig Game"),
        (0x73, "Dark World Swamp"),
        (0x75, "Ice Palace area"),
        (0x77, "Dark World Lake Hylia"),
    ])
});

pub static OVERWORLD_DESCRIPTIONS: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Light World
        (0x00, "Dense maze of trees. Follow the correct path or be sent back to the entrance. Soldiers patrol the area early in the game."),
        (0x02, "Open clearing with a distinctive tree. Accessible from Death Mountain to the east and Lost Woods to the west."),
        (0x03, "Rocky mountain path with falling boulders and narrow ledges. Cave entrances along the way. South exit leads to foothills."),
        (0x05, "High mountain terrain. Spiral Cave and Spectacle Rock entrances nearby. Watch for falling rocks."),
        (0x07, "The peak of Death Mountain. Tower of Hera entrance is here. Warp tile available."),
        (0x0A, "A prominent landmark on Death Mountain. Two rock formations overlook Hyrule below. Mirror warp point."),
        (0x0F, "Rushing waterfall at the northeast corner of the map. Zora sells flippers here. Deep water blocks passage without flippers."),
        (0x10, "Southern edge of the Lost Woods. A mushroom can be found here. Path leads south to Kakariko Village."),
        (0x12, "Small clearing with the Fortune Teller's hut. Pay rupees for hints about your quest."),
        (0x14, "Sacred grove deep in the Lost Woods. The Master Sword pedestal awaits one who holds all three pendants."),
        (0x15, "The north face of Hyrule Castle. Castle walls block passage. Guards patrol the area."),
        (0x16, "Eastern grounds of Hyrule Castle. Open field with scattered bushes. Connects to Witch's Hut area to the east."),
        (0x17, "Path near the Witch's Hut. Bring a mushroom to the witch for Magic Powder. Potion shop nearby."),
        (0x18, "A bustling village with many houses and shops. Friendly NPCs offer information and items. Multiple building entrances."),
        (0x1A, "A quiet clearing in the woods south of Kakariko. The Flute Boy once played music here."),
        (0x1B, "The castle entrance and courtyard. Guards are on high alert. Secret passages exist in the garden bushes."),
        (0x1E, "The entrance to the Eastern Palace. Stone building in the eastern region. First dungeon of the quest."),
        (0x22, "A safe haven north of the castle. The priest offers shelter. Heal and save your progress here."),
        (0x25, "Rows of tombstones. Some graves can be pushed to reveal secrets. Ghosts may appear."),
        (0x28, "Southern part of Kakariko Village. Library and more houses. Connects to the main village to the north."),
        (0x29, "The elder Sahasrahla's hideout. Seek his wisdom about the pendants and the Master Sword."),
        (0x2A, "Wide open field in the heart of Hyrule. Good landmark for orientation. Paths lead in all directions."),
        (0x2B, "Your home. A safe spot to rest. South of Hyrule Castle, east of the swamp."),
        (0x2C, "Open terrain between Link's House and the Eastern Palace. Scattered enemies and bushes."),
        (0x2E, "The area surrounding the Eastern Palace entrance. Stone ruins and hedges line the path."),
        (0x30, "Vast sandy desert in the southwest. Vultures circle overhead. Desert Palace entrance is here. Book of Mudora needed."),
        (0x32, "A green meadow south of the Haunted Grove. Peaceful area with few enemies."),
        (0x33, "The northern shore of Lake Hylia. Shallow water near the edges. Islands visible to the south."),
        (0x34, "A magical waterfall. Throw items into the fairy fountain for upgrades."),
        (0x35, "A large body of water. Swimming required for exploration. Ice Rod cave accessible from the east shore."),
        (0x37, "A small island in the middle of Lake Hylia. Accessible by swimming or warping."),
        (0x3A, "A stone dam controlling the water flow. A switch inside can drain the water to open passages."),
        (0x3B, "Rocky terrain near Lake Hylia. The Ice Rod cave entrance is hidden among the rocks."),
        // Dark World
        (0x40, "Twisted dark forest. Multiple entrances lead underground to Skull Woods dungeon. Trees look menacing."),
        (0x43, "Dark World version of Death Mountain west side. Hostile terrain with stronger enemies than the Light World."),
        (0x45, "Dark Death Mountain east side. Turtle Rock dungeon entrance is nearby. Requires Quake Medallion."),
        (0x47, "Turtle Rock entrance area on Dark Death Mountain. The rock formation resembles a giant turtle."),
        (0x4A, "The base of Ganon's Tower atop Dark Death Mountain. All seven crystals are needed to break the seal."),
        (0x58, "Dark World version of Kakariko Village. Hostile inhabitants have replaced the villagers. Thieves' Town dungeon below."),
        (0x5A, "Dark World version of the Haunted Grove. A creature named Stumpy stands where the Flute Boy was."),
        (0x5B, "A massive pyramid in the center of the Dark World. Ganon lurks within. A crack in the side leads to the final battle."),
        (0x5E, "Dark World eastern region. The Palace of Darkness entrance is here. First Dark World dungeon."),
        (0x62, "Dark World mirror of the Sanctuary area. Hostile version of the safe haven."),
        (0x68, "Dark World version of Kakariko. Thieves' Town dungeon entrance is disguised as a building."),
        (0x69, "Dark World area with an archery mini-game. Test your aim for rupee prizes."),
        (0x6A, "Central Dark World field. Rough terrain with stronger monsters roaming."),
        (0x6B, "Dark World swamp region. Swamp Palace dungeon entrance is here. Flooded terrain requires swimming."),
        (0x70, "A dismal swamp in the Dark World southwest. Requires the Ether Medallion to open the Misery Mire dungeon entrance."),
        (0x72, "Dark World area with a digging mini-game. Pay rupees to dig for buried treasures."),
        (0x73, "Murky swamp waters in the Dark World. Dangerous terrain with limited solid ground."),
        (0x75, "Frozen Dark World lake. Ice Palace dungeon entrance is on an island. Requires Flippers to reach."),
        (0x77, "Dark World version of Lake Hylia. Darker, more dangerous waters filled with enemies."),
    ])
});

// ---------------------------------------------------------------------------
// Dungeons
// ---------------------------------------------------------------------------

const DUNGEON_ROOM_DATA: &[(&str, &[u16])] = &[
    (
        "Hyrule Castle",
        &[
            0x01, 0x02, 0x11, 0x12, 0x21, 0x22, 0x32, 0x41, 0x50, 0x51, 0x52, 0x55, 0x60, 0x61,
            0x62, 0x70, 0x71, 0x72, 0x80, 0x81, 0x82,
        ],
    ),
    (
        "Eastern Palace",
        &[
            0x89, 0x98, 0x99, 0x9A, 0xA8, 0xA9, 0xAA, 0xB8, 0xB9, 0xBA, 0xC8, 0xC9, 0xD8, 0xD9,
            0xDA,
        ],
    ),
    (
        "Desert Palace",
        &[0x33, 0x43, 0x53, 0x63, 0x73, 0x83, 0x84, 0x85],
    ),
    ("Tower of Hera", &[0x07, 0x17, 0x27, 0x77, 0xA7]),
    ("Castle Tower", &[0x20, 0x30, 0x40, 0xB0, 0xC0, 0xD0, 0xE0]),
    (
        "Palace of Darkness",
        &[
            0x09, 0x0A, 0x0B, 0x19, 0x1A, 0x1B, 0x2A, 0x2B, 0x3A, 0x3B, 0x4A, 0x4B, 0x5A, 0x5B,
            0x6A, 0x6B,
        ],
    ),
    (
        "Swamp Palace",
        &[
            0x06, 0x16, 0x26, 0x28, 0x34, 0x35, 0x36, 0x37, 0x38, 0x46, 0x66, 0x76,
        ],
    ),
    (
        "Skull Woods",
        &[0x39, 0x49, 0x56, 0x57, 0x58, 0x59, 0x67, 0x68, 0x87, 0x88],
    ),
    (
        "Thieves' Town",
        &[
            0x44, 0x45, 0x64, 0x65, 0xAB, 0xAC, 0xBB, 0xBC, 0xCB, 0xCC, 0xDB, 0xDC,
        ],
    ),
    (
        "Ice Palace",
        &[
            0x0E, 0x1E, 0x1F, 0x2E, 0x3E, 0x3F, 0x4E, 0x5E, 0x5F, 0x6E, 0x7E, 0x7F, 0x8E, 0x9E,
            0x9F, 0xAE, 0xBE, 0xBF, 0xCE, 0xDE,
        ],
    ),
    (
        "Misery Mire",
        &[
            0x90, 0x91, 0x92, 0x93, 0xA0, 0xA1, 0xA2, 0xA3, 0xB1, 0xB2, 0xB3, 0xC1, 0xC2, 0xC3,
            0xD1, 0xD2,
        ],
    ),
    (
        "Turtle Rock",
        &[
            0x04, 0x13, 0x14, 0x15, 0x23, 0x24, 0x25, 0xB4, 0xB5, 0xB6, 0xC4, 0xC5, 0xC6, 0xD4,
            0xD5, 0xD6,
        ],
    ),
    (
        "Ganon's Tower",
        &[
            0x0C, 0x0D, 0x1C, 0x1D, 0x3C, 0x3D, 0x4C, 0x4D, 0x5C, 0x5D, 0x6C, 0x6D, 0x7C, 0x7D,
            0x8C, 0x8D, 0x95, 0x96, 0x9C, 0x9D,
        ],
    ),
];

/// Room id -> dungeon name.
pub static DUNGEON_ROOMS: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (name, rooms) in DUNGEON_ROOM_DATA {
        for room in *rooms {
            map.insert(*room, *name);
        }
    }
    map
});

pub static DUNGEON_DESCRIPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "Hyrule Castle",
            "The fortified castle at the center of Hyrule. Soldiers patrol the halls. Dark sewers lie below. Princess Zelda is held captive in the basement.",
        ),
        (
            "Eastern Palace",
            "A grand stone palace in eastern Hyrule. Home to the Pendant of Courage. Watch for Armos statues that come alive and eyegore enemies. The boss is the Armos Knights.",
        ),
        (
            "Desert Palace",
            "A sand-filled palace in the southwestern desert. Home to the Pendant of Power. Requires the Book of Mudora to enter. Beware of shifting sands. The boss is Lanmolas.",
        ),
        (
            "Tower of Hera",
            "A tall tower on Death Mountain's summit. Home to the Pendant of Wisdom. Multiple floors connected by holes in the ground. Moldorm, the boss, fights on a platform with no railing.",
        ),
        (
            "Castle Tower",
            "Agahnim's tower atop Hyrule Castle. Climb through guarded floors to confront the wizard. Requires the Master Sword to enter. Reflect Agahnim's magic with your sword to defeat him.",
        ),
        (
            "Palace of Darkness",
            "The first Dark World dungeon, a massive fortress in the east. Dark rooms require the Lamp. Maze-like passages with switches. The boss is the Helmasaur King. Use the Hammer on its mask.",
        ),
        (
            "Swamp Palace",
            "A water-filled dungeon in the Dark World swamp. Flooded rooms require swimming. Water levels change with switches. The boss is Arrghus. Pull the puffballs off with the Hookshot.",
        ),
        (
            "Skull Woods",
            "A dungeon beneath the Dark World's twisted forest. Multiple outdoor entrances lead to different sections. Fire traps and moving floors. The boss is Mothula. Watch for the moving floor and spikes.",
        ),
        (
            "Thieves' Town",
            "Hidden beneath a building in the Village of Outcasts. Dark rooms and bombable walls hide secrets. A mysterious maiden awaits rescue. The boss is Blind the Thief. Light from windows is key.",
        ),
        (
            "Ice Palace",
            "A frozen dungeon on an island in the Dark World lake. Slippery ice floors and falling ice hazards. Requires the Fire Rod to melt ice blocks. The boss is Kholdstare, encased in ice.",
        ),
        (
            "Misery Mire",
            "A dungeon in the Dark World's dismal swamp. Requires the Ether Medallion to enter. Flooded floors and Wizzrobes throughout. The boss is Vitreous, a giant eye surrounded by smaller eyes.",
        ),
        (
            "Turtle Rock",
            "A dungeon inside a rock formation on Dark Death Mountain. Requires the Quake Medallion to enter. Lava pits and pipe mazes. Uses both Fire and Ice Rods. The boss is Trinexx, a three-headed turtle.",
        ),
        (
            "Ganon's Tower",
            "The final dungeon atop Dark Death Mountain. Requires all seven crystals to break the seal. Combines puzzles and enemies from all previous dungeons. Agahnim waits at the top, then the path to Ganon opens.",
        ),
    ])
});

// ---------------------------------------------------------------------------
// Doors and room objects
// ---------------------------------------------------------------------------

pub static DOOR_DIRECTION_NAMES: Lazy<HashMap<u8, &'static str>> =
    Lazy::new(|| HashMap::from([(0, "north"), (1, "south"), (2, "west"), (3, "east")]));

pub static DOOR_TYPE_NAMES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (0, "open doorway"),
        (2, "normal doorway"),
        (4, "passage"),
        (6, "entrance door"),
        (8, "waterfall tunnel"),
        (10, "entrance (large)"),
        (12, "entrance (large, alt)"),
        (14, "cave entrance"),
        (16, "cave entrance (alt)"),
        (18, "exit to overworld"),
        (20, "throne room"),
        (22, "staircase"),
        (24, "shutter (two-way)"),
        (26, "invisible door"),
        (28, "small key door"),
        (30, "small key door (alt)"),
        (32, "staircase (locked 0)"),
        (34, "staircase (locked 1)"),
        (36, "staircase (locked 2)"),
        (38, "staircase (locked 3)"),
        (40, "breakable wall"),
        (42, "breakable wall (alt)"),
        (44, "breakable wall (alt 2)"),
        (46, "breakable wall (alt 3)"),
        (48, "large explosion wall"),
        (50, "slashable curtain"),
        (64, "regular door"),
        (68, "shutter"),
        (70, "warp room door"),
        (72, "shutter trap (upper-right)"),
        (74, "shutter trap (down-left)"),
    ])
});

/// Room object type -> (name, object class).  Object classes are the
/// announce-filter taxonomy (chest/stairs/pit/...), distinct from sprite
/// categories.
pub static OBJECT_TYPE_NAMES: Lazy<HashMap<u16, (&'static str, &'static str)>> = Lazy::new(|| {
    HashMap::from([
        // Subtype 0 (structural with gameplay relevance)
        (0x21, ("mini stairs", "stairs")),
        (0x38, ("statue", "feature")),
        (0x3D, ("standing torch", "torch")),
        (0x5E, ("block", "block")),
        (0x87, ("floor torch", "torch")),
        (0x88, ("statue", "feature")),
        (0x89, ("block", "block")),
        (0x92, ("blue peg block", "block")),
        (0x93, ("orange peg block", "block")),
        (0x96, ("hammer peg block", "block")),
        (0xA4, ("hole", "pit")),
        (0xB8, ("blue switch block", "switch")),
        (0xB9, ("red switch block", "switch")),
        (0xBD, ("hammer peg", "block")),
        (0xC8, ("water floor", "water")),
        (0xC9, ("water floor", "water")),
        (0xD1, ("water floor", "water")),
        (0xDE, ("spike block", "hazard")),
        (0xDF, ("spike floor", "hazard")),
        (0xE3, ("conveyor belt (north)", "hazard")),
        (0xE4, ("conveyor belt (south)", "hazard")),
        (0xE5, ("conveyor belt (west)", "hazard")),
        (0xE6, ("conveyor belt (east)", "hazard")),
        // Subtype 1 (discrete gameplay objects)
        (0x10D, ("prison cell", "feature")),
        (0x113, ("telepathic tile", "interactable")),
        (0x116, ("hammer peg", "block")),
        (0x118, ("cell lock", "interactable")),
        (0x119, ("chest", "chest")),
        (0x11A, ("open chest", "chest")),
        (0x11B, ("staircase", "stairs")),
        (0x11C, ("staircase", "stairs")),
        (0x11D, ("staircase", "stairs")),
        (0x11E, ("staircase going up", "stairs")),
        (0x11F, ("staircase going down", "stairs")),
        (0x120, ("staircase going up", "stairs")),
        (0x121, ("staircase going down", "stairs")),
        (0x126, ("staircase going up", "stairs")),
        (0x127, ("staircase going up", "stairs")),
        (0x128, ("staircase going down", "stairs")),
        (0x129, ("staircase going down", "stairs")),
        (0x12B, ("staircase going down", "stairs")),
        (0x12C, ("large block", "block")),
        (0x12F, ("pot", "interactable")),
        (0x131, ("big chest", "chest")),
        (0x132, ("big chest (open)", "chest")),
        (0x133, ("staircase", "stairs")),
        (0x147, ("bomb floor", "interactable")),
        (0x14A, ("warp tile", "interactable")),
        (0x150, ("floor switch", "switch")),
        (0x151, ("skull pot", "interactable")),
        (0x152, ("blue peg", "block")),
        (0x153, ("red peg", "block")),
        (0x163, ("fake floor switch", "hazard")),
        (0x164, ("fireball shooter", "hazard")),
        (0x165, ("medusa head", "hazard")),
        (0x166, ("hole", "pit")),
        (0x167, ("bombable wall (north)", "interactable")),
        (0x168, ("bombable wall (south)", "interactable")),
        (0x169, ("bombable wall (west)", "interactable")),
        (0x16A, ("bombable wall (east)", "interactable")),
        (0x174, ("boss entrance", "interactable")),
        (0x175, ("minigame chest", "chest")),
        // Subtype 2 (single-tile objects)
        (0x21C, ("fairy pot", "interactable")),
        (0x21D, ("statue", "feature")),
        (0x21E, ("star tile", "switch")),
        (0x21F, ("star tile", "switch")),
        (0x220, ("torch (lit)", "torch")),
        (0x221, ("barrel", "interactable")),
        (0x22D, ("floor stairs up", "stairs")),
        (0x22E, ("floor stairs down", "stairs")),
        (0x22F, ("floor stairs down", "stairs")),
        (0x231, ("staircase", "stairs")),
        (0x232, ("staircase", "stairs")),
        (0x234, ("block", "block")),
        (0x235, ("water ladder", "interactable")),
        (0x236, ("water ladder", "interactable")),
        (0x237, ("water gate", "interactable")),
    ])
});
