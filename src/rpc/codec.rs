//! Discord IPC framing.
//!
//! Every frame is a little-endian `u32` opcode, a little-endian `u32`
//! payload length, then the UTF-8 JSON payload.

use crate::error::AppError;
use serde::Serialize;
use serde_json::Value;
use std::io::{Read, Write};

/// Largest payload accepted from Discord
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Handshake,
    Frame,
    Close,
    Ping,
    Pong,
}

impl Opcode {
    pub fn code(self) -> u32 {
        match self {
            Opcode::Handshake => 0,
            Opcode::Frame => 1,
            Opcode::Close => 2,
            Opcode::Ping => 3,
            Opcode::Pong => 4,
        }
    }

    pub fn from_code(code: u32) -> Result<Self, AppError> {
        match code {
            0 => Ok(Opcode::Handshake),
            1 => Ok(Opcode::Frame),
            2 => Ok(Opcode::Close),
            3 => Ok(Opcode::Ping),
            4 => Ok(Opcode::Pong),
            other => Err(AppError::protocol(format!("unknown opcode {other}"))),
        }
    }
}

pub fn write_frame<W, T>(writer: &mut W, opcode: Opcode, payload: &T) -> Result<(), AppError>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_vec(payload)?;
    let len = u32::try_from(json.len())
        .map_err(|_| AppError::protocol(format!("payload too large: {} bytes", json.len())))?;

    let mut frame = Vec::with_capacity(json.len() + 8);
    frame.extend_from_slice(&opcode.code().to_le_bytes());
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(&json);

    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

pub fn read_frame<R>(reader: &mut R) -> Result<(Opcode, Value), AppError>
where
    R: Read + ?Sized,
{
    let mut header = [0u8; 8];
    reader.read_exact(&mut header)?;

    let [o0, o1, o2, o3, l0, l1, l2, l3] = header;
    let opcode = Opcode::from_code(u32::from_le_bytes([o0, o1, o2, o3]))?;
    let len = usize::try_from(u32::from_le_bytes([l0, l1, l2, l3]))
        .map_err(|_| AppError::protocol("payload length does not fit in memory"))?;

    if len > MAX_PAYLOAD_SIZE {
        return Err(AppError::protocol(format!(
            "message too large: {len} bytes (max: {MAX_PAYLOAD_SIZE} bytes)"
        )));
    }

    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer)?;

    let payload = if buffer.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&buffer)?
    };
    Ok((opcode, payload))
}
