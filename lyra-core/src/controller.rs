//! Cooperative main-loop cycle
//!
//! [`Controller::poll`] performs one pass of the firmware loop:
//!
//! 1. drain the serial receiver and dispatch every completed line
//! 2. sample and debounce the button
//! 3. advance the animators
//! 4. recompose and flush the frame if anything marked it dirty
//! 5. check the link timeout
//!
//! Nothing in a cycle waits. Replies and button events are written as soon
//! as they occur; the display flush runs to completion before the next step.

use lyra_display::{DisplayBackend, DisplayError, FrameBuffer};
use lyra_hal::{Button, SerialRx, SerialTx};
use lyra_protocol::{ButtonEvent, DeviceMessage, HostCommand, LineAssembler, PlaybackState};

use crate::config::FirmwareConfig;
use crate::dispatch::dispatch;
use crate::input::Debouncer;
use crate::link::{check_timeout, LinkEvent};
use crate::render::{self, BOOT_MESSAGE, DISCONNECTED_MESSAGE};
use crate::scheduler::{tick_all, Lcg};
use crate::state::DisplayState;

/// Bytes read from the serial receiver per call
pub const RX_CHUNK: usize = 64;

/// What happened during one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Lines assembled and dispatched
    pub lines: u16,
    /// Lines whose verb was not recognised
    pub unknown: u16,
    /// Bytes lost to line-buffer overflow
    pub dropped_bytes: u32,
    /// `PONG` replies written
    pub replies: u16,
    /// Button event reported to the host
    pub button: Option<ButtonEvent>,
    /// A frame was flushed to the display
    pub redrawn: bool,
    /// Link status change
    pub link: Option<LinkEvent>,
    /// Failed serial reads or writes
    pub serial_errors: u8,
    /// Failed display flushes
    pub display_errors: u8,
}

impl CycleReport {
    /// Whether anything worth logging happened
    pub fn is_quiet(&self) -> bool {
        *self == Self::default()
    }
}

/// Owner of all firmware state
pub struct Controller {
    state: DisplayState,
    assembler: LineAssembler,
    debouncer: Debouncer,
    rng: Lcg,
    config: FirmwareConfig,
    frame: FrameBuffer,
}

impl Controller {
    /// Fresh controller at time `now`
    ///
    /// `seed` only affects equalizer jitter.
    pub fn new(config: FirmwareConfig, seed: u64, now: u32) -> Self {
        Self {
            state: DisplayState::new(&config, now),
            assembler: LineAssembler::new(),
            debouncer: Debouncer::new(&config),
            rng: Lcg::new(seed),
            config,
            frame: FrameBuffer::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Last composed frame
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Show the power-up screen
    pub fn show_boot_screen<D: DisplayBackend>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        render::compose_message(&mut self.frame, BOOT_MESSAGE, PlaybackState::Stopped);
        display.flush(&self.frame)
    }

    /// Run one cycle at time `now`
    pub fn poll<RX, TX, B, D>(
        &mut self,
        now: u32,
        rx: &mut RX,
        tx: &mut TX,
        button: &B,
        display: &mut D,
    ) -> CycleReport
    where
        RX: SerialRx,
        TX: SerialTx,
        B: Button,
        D: DisplayBackend,
    {
        let mut report = CycleReport::default();

        let was_connected = self.state.connection.connected;
        self.drain_serial(now, rx, tx, &mut report);
        if !was_connected && self.state.connection.connected {
            report.link = Some(LinkEvent::Established);
        }

        if let Some(event) = self.debouncer.poll(button.is_pressed(), now) {
            report.button = Some(event);
            if tx.write_all(DeviceMessage::Button(event).as_bytes()).is_err() {
                report.serial_errors = report.serial_errors.saturating_add(1);
            }
        }

        tick_all(&mut self.state, &mut self.rng, &self.config, now);

        if self.state.is_dirty() {
            render::compose(&mut self.state, &self.config, &mut self.frame);
            self.flush(display, &mut report);
        }

        if let Some(event) = check_timeout(&mut self.state, &self.config, now) {
            report.link = Some(event);
            render::compose_message(&mut self.frame, DISCONNECTED_MESSAGE, PlaybackState::Stopped);
            self.flush(display, &mut report);
        }

        report
    }

    fn drain_serial<RX, TX>(&mut self, now: u32, rx: &mut RX, tx: &mut TX, report: &mut CycleReport)
    where
        RX: SerialRx,
        TX: SerialTx,
    {
        let dropped_before = self.assembler.dropped_bytes();
        let mut chunk = [0u8; RX_CHUNK];
        loop {
            let count = match rx.try_read(&mut chunk) {
                Ok(0) => break,
                Ok(count) => count,
                Err(_) => {
                    report.serial_errors = report.serial_errors.saturating_add(1);
                    break;
                }
            };

            for &byte in &chunk[..count] {
                let Some(line) = self.assembler.feed(byte) else {
                    continue;
                };
                let command = HostCommand::parse(line);
                report.lines = report.lines.saturating_add(1);
                if !command.is_known() {
                    report.unknown = report.unknown.saturating_add(1);
                }

                if let Some(reply) = dispatch(&mut self.state, command, now) {
                    if tx.write_all(reply.as_bytes()).is_ok() {
                        report.replies = report.replies.saturating_add(1);
                    } else {
                        report.serial_errors = report.serial_errors.saturating_add(1);
                    }
                }
            }
        }
        report.dropped_bytes = self.assembler.dropped_bytes().wrapping_sub(dropped_before);
    }

    /// Send the frame and consume the redraw request
    fn flush<D: DisplayBackend>(&mut self, display: &mut D, report: &mut CycleReport) {
        match display.flush(&self.frame) {
            Ok(()) => report.redrawn = true,
            Err(_) => report.display_errors = report.display_errors.saturating_add(1),
        }
        self.state.clear_dirty();
    }
}
