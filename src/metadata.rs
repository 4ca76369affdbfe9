//! Response shape and settle time for every command the driver issues.

use crate::commands::{Command, Variant};
use crate::error::ProtocolError;

/// Expected response size in bytes and the minimum wait before reading it.
#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub struct ResponseMeta {
    pub len: usize,
    pub wait_ms: u32,
}

impl ResponseMeta {
    const fn new(len: usize, wait_ms: u32) -> Self {
        Self { len, wait_ms }
    }
}

pub fn resolve(command: Command, variant: Variant) -> Result<ResponseMeta, ProtocolError> {
    use Command::*;
    use Variant::*;

    let meta = match (command, variant) {
        (TurnHeaterOff, _) => ResponseMeta::new(0, 1),
        (ExecuteSelfTest, _) => ResponseMeta::new(3, 320),
        (ExecuteConditioning, Sgp41) => ResponseMeta::new(3, 50),
        (ExecuteConditioning, Sgp40) => {
            return Err(ProtocolError::UnsupportedOnVariant { command, variant });
        }
        (MeasureRawSignal, Sgp40) => ResponseMeta::new(3, 30),
        (MeasureRawSignal, Sgp41) => ResponseMeta::new(6, 50),
        (GetSerialNumber, _) => ResponseMeta::new(9, 1),
    };

    Ok(meta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_raw_signal() {
        assert_eq!(
            resolve(Command::MeasureRawSignal, Variant::Sgp40),
            Ok(ResponseMeta { len: 3, wait_ms: 30 })
        );
        assert_eq!(
            resolve(Command::MeasureRawSignal, Variant::Sgp41),
            Ok(ResponseMeta { len: 6, wait_ms: 50 })
        );
    }

    #[test]
    fn test_conditioning() {
        assert_eq!(
            resolve(Command::ExecuteConditioning, Variant::Sgp41),
            Ok(ResponseMeta { len: 3, wait_ms: 50 })
        );
        assert_eq!(
            resolve(Command::ExecuteConditioning, Variant::Sgp40),
            Err(ProtocolError::UnsupportedOnVariant {
                command: Command::ExecuteConditioning,
                variant: Variant::Sgp40,
            })
        );
    }

    #[test]
    fn test_variant_independent() {
        for variant in [Variant::Sgp40, Variant::Sgp41] {
            assert_eq!(
                resolve(Command::TurnHeaterOff, variant),
                Ok(ResponseMeta { len: 0, wait_ms: 1 })
            );
            assert_eq!(
                resolve(Command::ExecuteSelfTest, variant),
                Ok(ResponseMeta { len: 3, wait_ms: 320 })
            );
            assert_eq!(
                resolve(Command::GetSerialNumber, variant),
                Ok(ResponseMeta { len: 9, wait_ms: 1 })
            );
        }
    }
}
