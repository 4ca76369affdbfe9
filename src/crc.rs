//! Sensirion CRC-8: polynomial 0x31, init 0xff, no reflection, no final XOR.

// https://sensirion.com/media/documents/296373BB/6203C5DF/Sensirion_Gas_Sensors_Datasheet_SGP40.pdf
// Section 4.6
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0xff;

    for byte in data {
        crc ^= byte;

        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ 0x31;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc() {
        assert_eq!(crc8(&[0xbe, 0xef]), 0x92);
        assert_eq!(crc8(&[0xd4, 0x00]), 0xc6);
        assert_eq!(crc8(&[0x66, 0x66]), 0x93);
        assert_eq!(crc8(&[]), 0xff);
    }

    #[test]
    fn test_crc_is_stable() {
        for hi in [0x00u8, 0x5a, 0xff] {
            for lo in 0..=u8::MAX {
                assert_eq!(crc8(&[hi, lo]), crc8(&[hi, lo]));
            }
        }
    }
}
