//! Conversions from raw byte groups to integers.
//!
//! The generic conversions read big-endian, which is how the four character
//! chunk ids compare against their ASCII constants. Numeric header fields are
//! little-endian on the wire and go through [`le_u16`] and [`le_u32`].

/// Interpret 8 bytes as a big-endian signed integer
pub fn bytes_to_long(bytes: [u8; 8]) -> i64 {
    i64::from_be_bytes(bytes)
}

/// Interpret 4 bytes as a big-endian unsigned integer
pub fn bytes_to_int(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Interpret 2 bytes as a big-endian unsigned integer
pub fn bytes_to_short(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

pub(crate) fn le_u32(bytes: [u8; 4]) -> u32 {
    u32::from_le_bytes(bytes)
}

pub(crate) fn le_u16(bytes: [u8; 2]) -> u16 {
    u16::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_ids_read_big_endian() {
        assert_eq!(bytes_to_int(*b"RIFF"), 0x5249_4646);
        assert_eq!(bytes_to_int(*b"WAVE"), 0x5741_5645);
        assert_eq!(bytes_to_int(*b"fmt "), 0x666d_7420);
        assert_eq!(bytes_to_int(*b"data"), 0x6461_7461);
    }

    #[test]
    fn short_and_long() {
        assert_eq!(bytes_to_short([0x01, 0x02]), 0x0102);
        assert_eq!(bytes_to_short([0xff, 0xfe]), 0xfffe);
        assert_eq!(bytes_to_long([0, 0, 0, 0, 0, 0, 0x01, 0x00]), 256);
        assert_eq!(bytes_to_long([0xff; 8]), -1);
    }

    #[test]
    fn little_endian_fields() {
        assert_eq!(le_u32([0x10, 0x00, 0x00, 0x00]), 16);
        assert_eq!(le_u32([0x44, 0xac, 0x00, 0x00]), 44_100);
        assert_eq!(le_u16([0x02, 0x00]), 2);
        // same bytes, opposite order
        assert_eq!(le_u16([0x01, 0x02]).swap_bytes(), bytes_to_short([0x01, 0x02]));
    }
}
