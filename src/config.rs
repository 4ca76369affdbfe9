use crate::commands::Variant;
use crate::error::ProtocolError;

/// The only I2C address used by the SGP4x family.
pub const ADDR: u8 = 0x59;

#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub struct Config {
    pub address: u8,
    pub variant: Variant,
    /// Verify the CRC of every word read from the sensor.
    pub check_crc: bool,
}

impl Config {
    pub fn for_variant_id(id: u8) -> Result<Self, ProtocolError> {
        Ok(Self::default().with_variant(Variant::try_from(id)?))
    }

    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_crc_check(mut self, check_crc: bool) -> Self {
        self.check_crc = check_crc;
        self
    }

    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.address != ADDR {
            return Err(ProtocolError::InvalidAddress(self.address));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: ADDR,
            variant: Variant::Sgp40,
            check_crc: true,
        }
    }
}
