//! Build script for lyra-display-fw
//!
//! - Emits the cortex-m-rt / defmt linker arguments
//! - Validates display.toml at compile time
//! - Generates `config.rs` with the validated settings

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use lyra_core::config::{ConfigError, FirmwareConfig};
use serde::Deserialize;

/// Baud rates the STM32F042 USART can reach from its 48 MHz clock
const BAUD_RANGE: core::ops::RangeInclusive<u32> = 1200..=3_000_000;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplayToml {
    serial: SerialSection,
    #[serde(default)]
    timing: FirmwareConfig,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SerialSection {
    baud_rate: u32,
}

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Linker scripts; memory.x itself comes from embassy-stm32
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml configuration at compile time
fn validate_config() -> DisplayToml {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a display.toml configuration file.        ║\n\
            ║  Please create one in the lyra-display-fw directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: DisplayToml = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid display.toml                                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();

    if !BAUD_RANGE.contains(&config.serial.baud_rate) {
        errors.push(format!(
            "[serial] baud_rate must be {}-{}",
            BAUD_RANGE.start(),
            BAUD_RANGE.end()
        ));
    }

    if let Err(e) = config.timing.validate() {
        errors.push(describe(e).to_string());
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=display.toml validated successfully");
    config
}

fn describe(error: ConfigError) -> &'static str {
    match error {
        ConfigError::ZeroPeriod => "[timing] periods and timeouts must be non-zero",
        ConfigError::LongPressTooShort => "[timing] long_press_ms must exceed debounce_ms",
        ConfigError::ZeroScrollStep => "[timing] lyric_scroll_step_px must be non-zero",
        ConfigError::JitterOutOfRange => "[timing] jitter_amplitude must be 0-12",
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated: String = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the validated settings as Rust constants
fn generate_config(config: &DisplayToml) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let t = &config.timing;

    let source = format!(
        "/// Serial baud rate from display.toml\n\
         pub const BAUD_RATE: u32 = {baud};\n\
         \n\
         /// Timings from display.toml\n\
         pub const FIRMWARE_CONFIG: lyra_core::FirmwareConfig = lyra_core::FirmwareConfig {{\n    \
             link_timeout_ms: {link_timeout},\n    \
             debounce_ms: {debounce},\n    \
             long_press_ms: {long_press},\n    \
             lyric_scroll_period_ms: {scroll_period},\n    \
             lyric_scroll_step_px: {scroll_step},\n    \
             marquee_period_ms: {marquee_period},\n    \
             marquee_gap_px: {marquee_gap},\n    \
             jitter_period_ms: {jitter_period},\n    \
             jitter_amplitude: {jitter_amplitude},\n    \
             eq_fresh_ms: {eq_fresh},\n\
         }};\n",
        baud = config.serial.baud_rate,
        link_timeout = t.link_timeout_ms,
        debounce = t.debounce_ms,
        long_press = t.long_press_ms,
        scroll_period = t.lyric_scroll_period_ms,
        scroll_step = t.lyric_scroll_step_px,
        marquee_period = t.marquee_period_ms,
        marquee_gap = t.marquee_gap_px,
        jitter_period = t.jitter_period_ms,
        jitter_amplitude = t.jitter_amplitude,
        eq_fresh = t.eq_fresh_ms,
    );

    if let Err(e) = fs::write(out_dir.join("config.rs"), source) {
        panic!("failed to write config.rs: {}", e);
    }
}
