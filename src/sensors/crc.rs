//! Sensirion CRC-8 (polynomial 0x31, init 0xFF), shared by the SHT3x and
//! SGP30 word protocols.

const POLYNOMIAL: u8 = 0x31;
const INIT: u8 = 0xFF;

/// CRC over one data word as sent on the wire (MSB first).
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = INIT;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Encode `word` as `[msb, lsb, crc]`.
pub fn word_with_crc(word: u16) -> [u8; 3] {
    let [msb, lsb] = word.to_be_bytes();
    [msb, lsb, crc8(&[msb, lsb])]
}

/// Decode `[msb, lsb, crc]` into a word, or `None` on CRC mismatch.
pub fn checked_word(chunk: &[u8]) -> Option<u16> {
    match chunk {
        [msb, lsb, crc] if crc8(&[*msb, *lsb]) == *crc => Some(u16::from_be_bytes([*msb, *lsb])),
        _ => None,
    }
}
