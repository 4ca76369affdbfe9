use thiserror::Error;

use crate::commands::{Command, Variant};

/// Failures detected by the driver itself, independent of the bus.
#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum ProtocolError {
    #[error("invalid device address {0:#04x}")]
    InvalidAddress(u8),
    #[error("invalid sensor variant id {0}")]
    InvalidVariant(u8),
    #[error("value {value} outside of {min}..={max}")]
    OutOfRange { value: f32, min: f32, max: f32 },
    #[error("invalid command code {0:#06x}")]
    InvalidCommand(u16),
    #[error("{command:?} is not supported on {variant:?}")]
    UnsupportedOnVariant { command: Command, variant: Variant },
    #[error("invalid response length {0}")]
    InvalidLength(usize),
    #[error("response buffer holds {actual} bytes, {expected} expected")]
    BufferTooShort { expected: usize, actual: usize },
    /// `expected` is the checksum byte received from the sensor.
    #[error("invalid CRC in word {group}: received {expected:#04x}, computed {computed:#04x}")]
    ChecksumMismatch {
        group: usize,
        expected: u8,
        computed: u8,
    },
}

#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum Error<I2cError> {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("I2C bus error")]
    I2c(I2cError),
}

impl<E> embedded_hal::i2c::Error for Error<E>
where
    E: embedded_hal::i2c::Error,
{
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        match self {
            Self::I2c(err) => err.kind(),
            _ => embedded_hal::i2c::ErrorKind::Other,
        }
    }
}
