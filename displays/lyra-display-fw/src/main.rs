//! Lyra Display Firmware
//!
//! Firmware for the Lyra lyric display board (STM32F042K6 + SH1106 OLED).
//! Receives lyric, metadata and equalizer commands from the host over
//! USART2 and reports button presses back.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::peripherals::USART2;
use embassy_stm32::usart::{self, BufferedUart};
use embassy_time::{Duration, Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use lyra_core::{Controller, CycleReport, LinkEvent};
use lyra_display::{DisplayBackend, Sh1106};
use lyra_hal::{ActiveLow, I2cConfig, OutputPin, UartConfig};
use lyra_hal_stm32f0::{i2c_config, usart_config, I2cMaster, Pin, UartRx, UartTx};

include!(concat!(env!("OUT_DIR"), "/config.rs"));

bind_interrupts!(struct Irqs {
    USART2 => usart::BufferedInterruptHandler<USART2>;
});

/// Pause between cooperative cycles
const CYCLE_PAUSE: Duration = Duration::from_millis(1);

/// Status LED half-period while halted on a fatal error
const FATAL_BLINK: Duration = Duration::from_millis(250);

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Lyra display firmware starting...");

    let p = embassy_stm32::init(Default::default());

    let mut led = Pin(Output::new(p.PB3, Level::Low, Speed::Low));

    // SH1106 OLED on I2C1
    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, i2c_config(&I2cConfig::FAST));
    let mut display = Sh1106::new(I2cMaster(i2c));
    if let Err(e) = display.init() {
        error!("Display init failed: {:?}", e);
        fatal_blink(&mut led).await;
    }
    info!("OLED initialized");

    // Host link on USART2 (PA2 TX, PA3 RX)
    let mut tx_buf = [0u8; 32];
    let mut rx_buf = [0u8; 256];
    let uart = match BufferedUart::new(
        p.USART2,
        p.PA3,
        p.PA2,
        &mut tx_buf,
        &mut rx_buf,
        Irqs,
        usart_config(&UartConfig::with_baudrate(BAUD_RATE)),
    ) {
        Ok(uart) => uart,
        Err(e) => {
            error!("UART config rejected: {:?}", e);
            fatal_blink(&mut led).await
        }
    };
    let (tx, rx) = uart.split();
    let mut rx = UartRx(rx);
    let mut tx = UartTx(tx);
    info!("UART initialized at {} baud", BAUD_RATE);

    // Push button to ground on PA1
    let button = ActiveLow(Pin(Input::new(p.PA1, Pull::Up)));

    let mut controller = Controller::new(FIRMWARE_CONFIG, jitter_seed(), now_ms());
    if let Err(e) = controller.show_boot_screen(&mut display) {
        warn!("Boot screen flush failed: {:?}", e);
    }
    led.set_high();

    info!("Waiting for host");

    loop {
        let report = controller.poll(now_ms(), &mut rx, &mut tx, &button, &mut display);
        log_report(&report);
        Timer::after(CYCLE_PAUSE).await;
    }
}

/// Milliseconds since boot, wrapping
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Seed the equalizer jitter from the 96-bit device unique ID
fn jitter_seed() -> u64 {
    embassy_stm32::uid::uid()
        .iter()
        .fold(0xcbf2_9ce4_8422_2325, |hash, &byte| {
            (hash ^ byte as u64).wrapping_mul(0x0000_0100_0000_01b3)
        })
}

fn log_report(report: &CycleReport) {
    if report.is_quiet() {
        return;
    }
    if report.lines > 0 {
        trace!(
            "{} line(s), {} unknown, {} replies",
            report.lines,
            report.unknown,
            report.replies
        );
    }
    if let Some(event) = report.button {
        if event.is_long() {
            debug!("Button: long press");
        } else {
            debug!("Button: press");
        }
    }
    match report.link {
        Some(LinkEvent::Established) => info!("Host connected"),
        Some(LinkEvent::Lost) => info!("Host link lost"),
        None => {}
    }
    if report.dropped_bytes > 0 {
        warn!("Line buffer overflow, {} byte(s) dropped", report.dropped_bytes);
    }
    if report.serial_errors > 0 {
        warn!("{} serial error(s)", report.serial_errors);
    }
    if report.display_errors > 0 {
        warn!("{} display flush error(s)", report.display_errors);
    }
}

/// Blink the status LED forever
async fn fatal_blink<P: OutputPin>(led: &mut P) -> ! {
    loop {
        led.toggle();
        Timer::after(FATAL_BLINK).await;
    }
}
