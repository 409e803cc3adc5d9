//! Target side of the simulated bus
//!
//! [`I2cTarget`] follows the master's clock edge by edge: it shifts in the
//! address and data bits on SCL rising edges, changes its own SDA output
//! only while SCL is low, and acknowledges on the ninth clock.

use heapless::Vec;

use crate::device::Device;

/// Capacity of the target's event log
pub const EVENT_LOG_LEN: usize = 64;

/// Bus-edge hooks the simulated bus calls into
///
/// The bus only reports what happened on the wires; the target decides what
/// it means and what level to put on SDA.
pub trait Target {
    /// Level the target puts on SDA, `true` when released
    fn sda(&self) -> bool;

    /// SDA fell while SCL was high
    fn on_start(&mut self);

    /// SDA rose while SCL was high
    fn on_stop(&mut self);

    /// SCL rose; `sda` is the bus level at that moment
    fn on_scl_rise(&mut self, sda: bool);

    /// SCL fell
    fn on_scl_fall(&mut self);
}

/// Something the target observed on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusEvent {
    /// Start condition with the bus idle
    Start,
    /// Start condition inside an ongoing transaction
    RepeatedStart,
    /// Stop condition
    Stop,
    /// Address byte; `acked` when it matched this target
    Address { address: u8, read: bool, acked: bool },
    /// Byte written by the master
    Write { byte: u8, acked: bool },
    /// Byte sent to the master; `acked` when the master acknowledged it
    Read { byte: u8, acked: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Address,
    Data,
}

/// Where to go once the acknowledge clock ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Receive,
    Transmit,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Not addressed; waiting for a start
    Idle,
    /// Shifting in a byte
    Receive { phase: Phase, shift: u8, count: u8 },
    /// Ninth clock of a received byte
    AckSlot { next: Next },
    /// Shifting out a byte; `count` bits already sampled by the master
    Transmit { byte: u8, count: u8 },
    /// Ninth clock of a transmitted byte; `acked` once sampled
    MasterAck { byte: u8, acked: Option<bool> },
}

/// Simulated I2C target at a 7-bit address
#[derive(Debug)]
pub struct I2cTarget<D> {
    address: u8,
    device: D,
    state: State,
    /// SDA output, `true` when released
    sda: bool,
    /// Between a start and the matching stop
    in_transaction: bool,
    events: Vec<BusEvent, EVENT_LOG_LEN>,
    dropped: usize,
}

impl<D: Device> I2cTarget<D> {
    /// Create a target answering at `address` (7-bit)
    pub fn new(address: u8, device: D) -> Self {
        Self {
            address: address & 0x7F,
            device,
            state: State::Idle,
            sda: true,
            in_transaction: false,
            events: Vec::new(),
            dropped: 0,
        }
    }

    /// 7-bit address this target answers to
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Events seen so far, oldest first
    pub fn events(&self) -> &[BusEvent] {
        &self.events
    }

    /// Events that did not fit in the log
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }

    /// Target is currently addressed
    pub fn is_selected(&self) -> bool {
        !matches!(self.state, State::Idle)
            && !matches!(self.state, State::Receive { phase: Phase::Address, .. })
    }

    fn record(&mut self, event: BusEvent) {
        #[cfg(feature = "defmt")]
        defmt::trace!("I2C target {=u8:#x}: {}", self.address, event);

        if self.events.push(event).is_err() {
            self.dropped += 1;
        }
    }

    /// A read byte whose ninth clock never completed counts as not acked
    fn abandon_read(&mut self) {
        if let State::MasterAck { byte, .. } = self.state {
            self.record(BusEvent::Read { byte, acked: false });
        }
    }

    fn load(&mut self) {
        let byte = self.device.read();
        self.sda = byte & 0x80 != 0;
        self.state = State::Transmit { byte, count: 0 };
    }

    fn end_of_byte(&mut self, phase: Phase, byte: u8) {
        let (acked, next) = match phase {
            Phase::Address => {
                let address = byte >> 1;
                let read = byte & 1 != 0;
                let acked = address == self.address;
                self.record(BusEvent::Address {
                    address,
                    read,
                    acked,
                });
                if !acked {
                    (false, Next::Ignore)
                } else {
                    self.device.select(read);
                    (true, if read { Next::Transmit } else { Next::Receive })
                }
            }
            Phase::Data => {
                let acked = self.device.write(byte);
                self.record(BusEvent::Write { byte, acked });
                // Nacked or not, the master may keep clocking bytes
                (acked, Next::Receive)
            }
        };

        self.sda = !acked;
        self.state = State::AckSlot { next };
    }
}

impl<D: Device> Target for I2cTarget<D> {
    fn sda(&self) -> bool {
        self.sda
    }

    fn on_start(&mut self) {
        self.abandon_read();
        self.record(if self.in_transaction {
            BusEvent::RepeatedStart
        } else {
            BusEvent::Start
        });
        self.in_transaction = true;
        self.sda = true;
        self.state = State::Receive {
            phase: Phase::Address,
            shift: 0,
            count: 0,
        };
    }

    fn on_stop(&mut self) {
        self.abandon_read();
        self.record(BusEvent::Stop);
        self.in_transaction = false;
        self.sda = true;
        if self.state != State::Idle {
            self.device.stop();
        }
        self.state = State::Idle;
    }

    fn on_scl_rise(&mut self, sda: bool) {
        match &mut self.state {
            State::Receive { shift, count, .. } if *count < 8 => {
                *shift = (*shift << 1) | u8::from(sda);
                *count += 1;
            }
            State::Transmit { count, .. } => *count += 1,
            State::MasterAck { acked, .. } => *acked = Some(!sda),
            _ => {}
        }
    }

    fn on_scl_fall(&mut self) {
        match self.state {
            State::Receive {
                phase,
                shift,
                count: 8,
            } => self.end_of_byte(phase, shift),
            State::AckSlot { next } => {
                self.sda = true;
                match next {
                    Next::Receive => {
                        self.state = State::Receive {
                            phase: Phase::Data,
                            shift: 0,
                            count: 0,
                        }
                    }
                    Next::Transmit => self.load(),
                    Next::Ignore => self.state = State::Idle,
                }
            }
            State::Transmit { byte, count } if count < 8 => {
                self.sda = (byte >> (7 - count)) & 1 != 0;
            }
            State::Transmit { byte, .. } => {
                self.sda = true;
                self.state = State::MasterAck { byte, acked: None };
            }
            State::MasterAck { byte, acked } => {
                let acked = acked == Some(true);
                self.record(BusEvent::Read { byte, acked });
                if acked {
                    self.load();
                } else {
                    self.state = State::Idle;
                }
            }
            _ => {}
        }
    }
}
