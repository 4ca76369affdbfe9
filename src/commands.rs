use crate::error::ProtocolError;

pub const CMD_GET_SERIAL_NUMBER: [u8; 2] = [0x36, 0x82];
pub const CMD_TURN_HEATER_OFF: [u8; 2] = [0x36, 0x15];
pub const CMD_EXECUTE_SELF_TEST: [u8; 2] = [0x28, 0x0e];
pub const CMD_MEASURE_RAW_SIGNAL: [u8; 2] = [0x26, 0x0f];
// SGP41 only
pub const CMD_EXECUTE_CONDITIONING: [u8; 2] = [0x26, 0x12];

/// Commands shared by the SGP4x family.
#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub enum Command {
    GetSerialNumber,
    ExecuteSelfTest,
    ExecuteConditioning,
    MeasureRawSignal,
    TurnHeaterOff,
}

impl Command {
    pub const fn code(self) -> u16 {
        u16::from_be_bytes(self.bytes())
    }

    pub const fn bytes(self) -> [u8; 2] {
        match self {
            Self::GetSerialNumber => CMD_GET_SERIAL_NUMBER,
            Self::ExecuteSelfTest => CMD_EXECUTE_SELF_TEST,
            Self::ExecuteConditioning => CMD_EXECUTE_CONDITIONING,
            Self::MeasureRawSignal => CMD_MEASURE_RAW_SIGNAL,
            Self::TurnHeaterOff => CMD_TURN_HEATER_OFF,
        }
    }

    /// Commands after which the hotplate stays powered.
    pub const fn keeps_heater_on(self) -> bool {
        matches!(self, Self::ExecuteConditioning | Self::MeasureRawSignal)
    }
}

impl TryFrom<u16> for Command {
    type Error = ProtocolError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code.to_be_bytes() {
            CMD_GET_SERIAL_NUMBER => Ok(Self::GetSerialNumber),
            CMD_EXECUTE_SELF_TEST => Ok(Self::ExecuteSelfTest),
            CMD_EXECUTE_CONDITIONING => Ok(Self::ExecuteConditioning),
            CMD_MEASURE_RAW_SIGNAL => Ok(Self::MeasureRawSignal),
            CMD_TURN_HEATER_OFF => Ok(Self::TurnHeaterOff),
            _ => Err(ProtocolError::InvalidCommand(code)),
        }
    }
}

/// Hardware sub-type. SGP40 measures VOC only, SGP41 adds NOx and conditioning.
#[derive(Clone, Copy, Hash, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Sgp40,
    Sgp41,
}

impl Variant {
    pub const fn id(self) -> u8 {
        match self {
            Self::Sgp40 => 0,
            Self::Sgp41 => 1,
        }
    }
}

impl TryFrom<u8> for Variant {
    type Error = ProtocolError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Sgp40),
            1 => Ok(Self::Sgp41),
            _ => Err(ProtocolError::InvalidVariant(id)),
        }
    }
}
