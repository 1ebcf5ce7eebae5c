//! Scripted stand-ins for the board peripherals

#![allow(dead_code)]

use std::collections::VecDeque;

use lyra_display::{DisplayBackend, DisplayError, FrameBuffer};
use lyra_hal::{Button, SerialRx, SerialTx};

/// Serial receiver fed from a queue of bytes
#[derive(Default)]
pub struct ScriptedRx {
    pending: VecDeque<u8>,
    pub fail_next: bool,
}

impl ScriptedRx {
    pub fn push(&mut self, data: &str) {
        self.pending.extend(data.bytes());
    }
}

impl SerialRx for ScriptedRx {
    type Error = ();

    fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        if self.fail_next {
            self.fail_next = false;
            return Err(());
        }
        let n = buf.len().min(self.pending.len());
        for slot in buf.iter_mut().take(n) {
            *slot = self.pending.pop_front().unwrap_or_default();
        }
        Ok(n)
    }
}

/// Serial transmitter that records everything written
#[derive(Default)]
pub struct RecordingTx {
    pub sent: Vec<u8>,
}

impl RecordingTx {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.sent)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl SerialTx for RecordingTx {
    type Error = ();

    fn write_all(&mut self, data: &[u8]) -> Result<(), ()> {
        self.sent.extend_from_slice(data);
        Ok(())
    }
}

/// Button whose contact state is set by the test
#[derive(Default)]
pub struct FakeButton {
    pub pressed: bool,
}

impl Button for FakeButton {
    fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// Display that keeps the last frame it was sent
#[derive(Default)]
pub struct CapturingDisplay {
    pub last: Option<FrameBuffer>,
    pub flushes: usize,
    pub fail: bool,
}

impl DisplayBackend for CapturingDisplay {
    fn init(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn flush(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Communication);
        }
        self.flushes += 1;
        self.last = Some(frame.clone());
        Ok(())
    }
}

/// A controller plus its peripherals
pub struct Rig {
    pub controller: lyra_core::Controller,
    pub rx: ScriptedRx,
    pub tx: RecordingTx,
    pub button: FakeButton,
    pub display: CapturingDisplay,
    pub now: u32,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            controller: lyra_core::Controller::new(lyra_core::FirmwareConfig::DEFAULT, 0x5eed, 0),
            rx: ScriptedRx::default(),
            tx: RecordingTx::default(),
            button: FakeButton::default(),
            display: CapturingDisplay::default(),
            now: 0,
        }
    }

    /// Queue host lines, each terminated with `\n`
    pub fn send(&mut self, lines: &[&str]) {
        for line in lines {
            self.rx.push(line);
            self.rx.push("\n");
        }
    }

    /// Run one cycle at the current time
    pub fn cycle(&mut self) -> lyra_core::CycleReport {
        self.controller.poll(
            self.now,
            &mut self.rx,
            &mut self.tx,
            &self.button,
            &mut self.display,
        )
    }

    /// Run cycles every millisecond for `ms` milliseconds
    pub fn run_for(&mut self, ms: u32) -> Vec<lyra_core::CycleReport> {
        let mut reports = Vec::new();
        for _ in 0..ms {
            self.now += 1;
            reports.push(self.cycle());
        }
        reports
    }

    pub fn frame(&self) -> &FrameBuffer {
        self.display.last.as_ref().expect("nothing flushed yet")
    }
}
