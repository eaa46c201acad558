//! `CRC-16/MCRF4XX` — the checksum primitive used to derive a message's extra CRC seed.
//!
//! Polynomial `0x1021`, initial value `0xFFFF`, reflected input/output. The message compiler is
//! the only caller; packet framing and routing consume the resulting seed byte but live outside
//! this crate.

use crc_any::CRCu16;

/// Digests `data` with `CRC-16/MCRF4XX` and folds the two checksum bytes into one seed byte.
///
/// See [CRC_EXTRA](https://mavlink.io/en/guide/serialization.html#crc_extra) in the MAVLink
/// documentation.
pub fn seed_byte(data: &[u8]) -> u8 {
    let mut crc = CRCu16::crc16mcrf4cc();
    crc.digest(data);
    let value = crc.get_crc();
    (value as u8) ^ ((value >> 8) as u8)
}
