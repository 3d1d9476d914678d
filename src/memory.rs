//! Memory collaborator: the read seam the engine runs against, the
//! RetroArch UDP network-command client, and per-tick snapshot assembly.

use log::warn;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::sync::Arc;
use std::time::Duration;

use crate::geometry::GeometryStore;
use crate::snapshot::{FieldMap, Snapshot, SpriteSlot};
use crate::tables::{
    DUNGEON_TILE_ATTR_ADDR, MEMORY_MAP, MODULE_DUNGEON, MODULE_OVERWORLD, OVERWORLD_TILE_ADDR,
    SPRITE_POSITIONS_ADDR, SPRITE_POSITIONS_LEN, SPRITE_SLOTS, SPRITE_STATES_ADDR,
    SPRITE_STATES_LEN, SPRITE_TYPES_ADDR, SPRITE_TYPES_LEN,
};
use crate::types::{BridgeError, Direction, Result};

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Anything that can read emulator memory.
///
/// `None` is the distinct "unknown" signal for a failed read; it must never
/// collapse into a zero value downstream.
pub trait MemoryReader: Send + Sync {
    fn read(&self, address: u32, length: usize) -> Option<Vec<u8>>;
}

// ---------------------------------------------------------------------------
// RetroArch UDP client
// ---------------------------------------------------------------------------

/// Client for RetroArch's UDP network command interface.
///
/// Requests and responses are single datagrams of space-separated ASCII;
/// memory bytes travel hex-encoded.  The socket read timeout bounds every
/// call, which in turn bounds worst-case poll-tick latency.
pub struct RetroArchClient {
    target: SocketAddr,
    socket: UdpSocket,
}

impl RetroArchClient {
    pub const DEFAULT_PORT: u16 = 55355;
    const TIMEOUT: Duration = Duration::from_secs(1);

    pub fn new(host: &str, port: u16) -> Result<Self> {
        let target = (host, port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| BridgeError::Protocol(format!("cannot resolve host {host}")))?;
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.set_read_timeout(Some(Self::TIMEOUT))?;
        Ok(Self { target, socket })
    }

    fn send_command(&self, cmd: &str) -> Option<String> {
        if let Err(e) = self.socket.send_to(cmd.as_bytes(), self.target) {
            warn!("send to {} failed: {}", self.target, e);
            return None;
        }
        let mut buf = [0u8; 65535];
        match self.socket.recv_from(&mut buf) {
            Ok((n, _)) => Some(String::from_utf8_lossy(&buf[..n]).trim().to_string()),
            Err(_) => None, // timeout or transient failure -> unknown
        }
    }

    pub fn get_status(&self) -> Result<String> {
        self.send_command("GET_STATUS")
            .ok_or_else(|| BridgeError::Protocol("no response to GET_STATUS".into()))
    }

    pub fn get_version(&self) -> Result<String> {
        self.send_command("VERSION")
            .ok_or_else(|| BridgeError::Protocol("no response to VERSION".into()))
    }

    pub fn read_core_memory(&self, address: u32, length: usize) -> Option<Vec<u8>> {
        let resp = self.send_command(&format!("READ_CORE_MEMORY {:X} {}", address, length))?;
        if resp.is_empty() || resp.starts_with("READ_CORE_MEMORY -1") {
            return None;
        }
        let parts: Vec<&str> = resp.split_whitespace().collect();
        if parts.len() < 3 || parts[2] == "-1" {
            return None;
        }
        parts[2..]
            .iter()
            .map(|b| u8::from_str_radix(b, 16).ok())
            .collect()
    }

    pub fn write_core_memory(&self, address: u32, data: &[u8]) -> Result<()> {
        let hex_bytes: Vec<String> = data.iter().map(|b| format!("{:02X}", b)).collect();
        let cmd = format!("WRITE_CORE_MEMORY {:X} {}", address, hex_bytes.join(" "));
        let resp = self
            .send_command(&cmd)
            .ok_or_else(|| BridgeError::Protocol("no response to WRITE_CORE_MEMORY".into()))?;
        if resp.contains("WRITE_CORE_MEMORY -1") {
            return Err(BridgeError::Protocol(resp));
        }
        Ok(())
    }
}

impl MemoryReader for RetroArchClient {
    fn read(&self, address: u32, length: usize) -> Option<Vec<u8>> {
        self.read_core_memory(address, length)
    }
}

// ---------------------------------------------------------------------------
// Snapshot assembly
// ---------------------------------------------------------------------------

fn le_value(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .rev()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

/// Read every watched field and the sprite table into a fresh [`Snapshot`].
pub fn read_snapshot(
    reader: &dyn MemoryReader,
    geometry: Option<Arc<GeometryStore>>,
    now: f64,
) -> Snapshot {
    let mut raw = FieldMap::with_capacity(MEMORY_MAP.len());
    for (name, addr, len) in MEMORY_MAP {
        raw.insert(*name, reader.read(*addr, *len).map(|b| le_value(&b)));
    }

    // Sprite table: three bulk reads (position planes, states, types).
    let mut sprites = Vec::with_capacity(SPRITE_SLOTS);
    let pos = reader.read(SPRITE_POSITIONS_ADDR, SPRITE_POSITIONS_LEN);
    let states = reader.read(SPRITE_STATES_ADDR, SPRITE_STATES_LEN);
    let types = reader.read(SPRITE_TYPES_ADDR, SPRITE_TYPES_LEN);
    if let (Some(pos), Some(states), Some(types)) = (pos, states, types) {
        if pos.len() == SPRITE_POSITIONS_LEN
            && states.len() == SPRITE_STATES_LEN
            && types.len() == SPRITE_TYPES_LEN
        {
            for i in 0..SPRITE_SLOTS {
                let y = i32::from(pos[i]) | (i32::from(pos[32 + i]) << 8);
                let x = i32::from(pos[16 + i]) | (i32::from(pos[48 + i]) << 8);
                sprites.push(SpriteSlot {
                    index: i,
                    type_id: types[i],
                    state: states[i],
                    x,
                    y,
                });
            }
        }
    }

    let facing_tile = read_facing_tile(reader, &raw, geometry.as_deref());

    Snapshot::new(raw, sprites, now, geometry, facing_tile)
}

/// Probe the tile attribute directly ahead of the player.
fn read_facing_tile(
    reader: &dyn MemoryReader,
    raw: &FieldMap,
    geometry: Option<&GeometryStore>,
) -> Option<u8> {
    let direction = raw
        .get("direction")
        .copied()
        .flatten()
        .and_then(Direction::from_register)?;
    let link_x = raw.get("link_x").copied().flatten().filter(|&x| x != 0)? as i32;
    let link_y = raw.get("link_y").copied().flatten().filter(|&y| y != 0)? as i32;
    let module = raw.get("main_module").copied().flatten()?;

    let (off_x, off_y) = direction.facing_probe_offset();
    let px = link_x + off_x;
    let py = link_y + off_y;

    match module {
        MODULE_DUNGEON => {
            let tx = (px >> 3) & 63;
            let ty = py & 0x1F8;
            let lower = raw.get("lower_level").copied().flatten().unwrap_or(0);
            let offset = ty * 8 + tx + if lower != 0 { 0x1000 } else { 0 };
            reader
                .read(DUNGEON_TILE_ATTR_ADDR + offset as u32, 1)
                .and_then(|b| b.first().copied())
        }
        MODULE_OVERWORLD => {
            let geometry = geometry?;
            let base_y = raw.get("ow_offset_base_y").copied().flatten().unwrap_or(0) as i32;
            let mask_y = raw.get("ow_offset_mask_y").copied().flatten().unwrap_or(0) as i32;
            let base_x = raw.get("ow_offset_base_x").copied().flatten().unwrap_or(0) as i32;
            let mask_x = raw.get("ow_offset_mask_x").copied().flatten().unwrap_or(0) as i32;
            let ow_tx = px >> 3;
            let t = ((py - base_y) & mask_y) * 8 | ((ow_tx - base_x) & mask_x);
            let ow_off = t >> 1;
            let bytes = reader.read(OVERWORLD_TILE_ADDR + (ow_off as u32) * 2, 2)?;
            if bytes.len() < 2 {
                return None;
            }
            let map16_idx = u16::from(bytes[0]) | (u16::from(bytes[1]) << 8);
            Some(geometry.ow_tile_attr(map16_idx, ow_tx, py))
        }
        _ => None,
    }
}
