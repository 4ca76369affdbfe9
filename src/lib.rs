//! Driver for the Sensirion SGP40 (VOC) and SGP41 (VOC + NOx) gas sensors.
//!
//! Raw signals are returned as ticks. Turning them into VOC/NOx indices is
//! the job of the Sensirion gas index algorithm and is out of scope here.
//!
//! Heating (conditioning, continuous raw measurement) must always end with
//! [`SGP4x::turn_heater_off`]. [`SGP4x::heating`] returns a guard that does
//! this on drop, including early returns through `?`.
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod commands;
pub mod config;
pub mod convert;
pub mod crc;
pub mod error;
pub mod frame;
pub mod metadata;

use core::ops::{Deref, DerefMut};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, trace, warn};

pub use commands::{Command, Variant};
pub use config::Config;
pub use convert::Compensation;
pub use error::{Error, ProtocolError};

use frame::{CommandFrame, MAX_RESPONSE_LEN, Params, Response};
use metadata::ResponseMeta;

pub const SELF_TEST_PASSED: u16 = 0xd400;
pub const SELF_TEST_FAILED: u16 = 0x4b00;

/// Longest conditioning sequence the SGP41 tolerates.
pub const MAX_CONDITIONING_MS: u32 = 10_000;

/// Only [`SELF_TEST_PASSED`] counts as success.
pub fn self_test_passed(result: u16) -> bool {
    result == SELF_TEST_PASSED
}

#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub enum State {
    /// Heater off.
    Idle,
    /// A command was written and its response has not been read yet.
    AwaitingResponse,
    /// Heater on after conditioning or a raw signal measurement.
    Measuring,
}

#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub struct SerialNumber {
    pub words: [u16; 3],
}

impl SerialNumber {
    /// The 48-bit serial, most significant word first.
    pub fn value(&self) -> u64 {
        self.words
            .iter()
            .fold(0, |acc, &word| (acc << 16) | u64::from(word))
    }
}

/// Raw signals in ticks. `nox` is only reported by the SGP41 raw signal measurement.
#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub struct MeasuredValues {
    pub voc: u16,
    pub nox: Option<u16>,
}

pub struct SGP4x<I2C, D> {
    i2c: I2C,
    delay: D,
    config: Config,
    state: State,
    last_command: Option<Command>,
    tx: CommandFrame,
    rx: [u8; MAX_RESPONSE_LEN],
}

impl<I2C: I2c, D: DelayNs> SGP4x<I2C, D> {
    pub fn new(i2c: I2C, delay: D, config: Config) -> Result<Self, ProtocolError> {
        config.validate()?;

        Ok(Self {
            i2c,
            delay,
            config,
            state: State::Idle,
            last_command: None,
            tx: CommandFrame::new(),
            rx: [0; MAX_RESPONSE_LEN],
        })
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Last command written to the bus.
    pub fn last_command(&self) -> Option<Command> {
        self.last_command
    }

    /// Reads the three serial number words.
    pub fn get_id(&mut self) -> Result<SerialNumber, Error<I2C::Error>> {
        let response = self.execute(Command::GetSerialNumber, None)?;

        Ok(SerialNumber {
            words: [
                word(&response, 0)?,
                word(&response, 1)?,
                word(&response, 2)?,
            ],
        })
    }

    /// Runs the built-in heater and MOX self-test.
    /// Compare the result with [`SELF_TEST_PASSED`].
    pub fn execute_self_test(&mut self) -> Result<u16, Error<I2C::Error>> {
        let response = self.execute(Command::ExecuteSelfTest, None)?;
        word(&response, 0)
    }

    /// SGP41 only. Must not run for longer than [`MAX_CONDITIONING_MS`].
    pub fn execute_conditioning(
        &mut self,
        compensation: Compensation,
    ) -> Result<MeasuredValues, Error<I2C::Error>> {
        let response = self.execute(Command::ExecuteConditioning, Some(compensation))?;

        Ok(MeasuredValues {
            voc: word(&response, 0)?,
            nox: None,
        })
    }

    /// Starts or continues measurement mode and returns one raw sample.
    /// The heater stays on afterwards.
    pub fn measure_raw_signal(
        &mut self,
        compensation: Compensation,
    ) -> Result<MeasuredValues, Error<I2C::Error>> {
        let response = self.execute(Command::MeasureRawSignal, Some(compensation))?;

        let nox = match self.config.variant {
            Variant::Sgp40 => None,
            Variant::Sgp41 => Some(word(&response, 1)?),
        };

        Ok(MeasuredValues {
            voc: word(&response, 0)?,
            nox,
        })
    }

    /// Stops measuring and returns the sensor to idle. Valid in any state.
    pub fn turn_heater_off(&mut self) -> Result<(), Error<I2C::Error>> {
        self.execute(Command::TurnHeaterOff, None)?;
        Ok(())
    }

    /// Borrows the sensor for a heating sequence. The heater is turned off
    /// when the guard is dropped or [`Heating::finish`] is called.
    pub fn heating(&mut self) -> Heating<'_, I2C, D> {
        Heating {
            sensor: self,
            finished: false,
        }
    }

    fn execute(
        &mut self,
        command: Command,
        compensation: Option<Compensation>,
    ) -> Result<Response, Error<I2C::Error>> {
        // Variant support is checked before the arguments and before
        // anything is written.
        let meta = metadata::resolve(command, self.config.variant)?;
        let params = match compensation {
            Some(compensation) => compensation.to_params()?,
            None => Params::Bare,
        };

        self.send(command, params)?;
        self.delay.delay_ms(meta.wait_ms);
        self.read_response(command, meta)
    }

    fn send(&mut self, command: Command, params: Params) -> Result<(), Error<I2C::Error>> {
        let frame = self.tx.encode(command.code(), params);
        debug!("sending {:?} ({} bytes, {:?})", command, frame.len(), params);

        self.i2c
            .write(self.config.address, frame)
            .map_err(Error::I2c)?;

        self.last_command = Some(command);
        self.set_state(State::AwaitingResponse);
        Ok(())
    }

    fn read_response(
        &mut self,
        command: Command,
        meta: ResponseMeta,
    ) -> Result<Response, Error<I2C::Error>> {
        let buf = &mut self.rx[..meta.len];
        if !buf.is_empty() {
            self.i2c
                .read(self.config.address, buf)
                .map_err(Error::I2c)?;
            trace!("{:?} response: {:02x?}", command, buf);
        }

        let response = frame::parse_response(buf, meta.len, self.config.check_crc)?;

        self.set_state(if command.keeps_heater_on() {
            State::Measuring
        } else {
            State::Idle
        });
        Ok(response)
    }

    fn set_state(&mut self, state: State) {
        if self.state != state {
            debug!("{:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

fn word<E>(response: &Response, index: usize) -> Result<u16, Error<E>> {
    response
        .value(index)
        .ok_or(Error::Protocol(ProtocolError::InvalidLength(response.len() * 3)))
}

/// Heating sequence guard, see [`SGP4x::heating`].
pub struct Heating<'a, I2C: I2c, D: DelayNs> {
    sensor: &'a mut SGP4x<I2C, D>,
    finished: bool,
}

impl<I2C: I2c, D: DelayNs> Heating<'_, I2C, D> {
    /// Turns the heater off and reports whether that worked.
    pub fn finish(mut self) -> Result<(), Error<I2C::Error>> {
        self.finished = true;
        self.sensor.turn_heater_off()
    }
}

impl<I2C: I2c, D: DelayNs> Deref for Heating<'_, I2C, D> {
    type Target = SGP4x<I2C, D>;

    fn deref(&self) -> &Self::Target {
        self.sensor
    }
}

impl<I2C: I2c, D: DelayNs> DerefMut for Heating<'_, I2C, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.sensor
    }
}

impl<I2C: I2c, D: DelayNs> Drop for Heating<'_, I2C, D> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(err) = self.sensor.turn_heater_off() {
            warn!("failed to turn heater off: {:?}", err);
        }
    }
}
