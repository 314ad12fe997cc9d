//! Build script for summit-firmware
//!
//! - Adds the esp-hal and defmt linker scripts
//! - Validates stopwatch.toml at compile time
//! - Generates the `config` constants the units are built with

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use summit_core::config::types::MAX_INTENSITY;
use summit_core::config::{DisplayConfig, TimingConfig};

/// Parsed stopwatch.toml
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StopwatchFile {
    peers: Peers,
    #[serde(default)]
    display: DisplayConfig,
    #[serde(default)]
    timing: TimingConfig,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Peers {
    top: String,
    bottom: String,
}

fn main() {
    setup_linker();
    let file = validate_config();
    generate_config(&file);
}

fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=-Tlinkall.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate stopwatch.toml configuration at compile time
fn validate_config() -> StopwatchFile {
    println!("cargo:rerun-if-changed=stopwatch.toml");

    let config_path = Path::new("stopwatch.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: stopwatch.toml not found!                                ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a stopwatch.toml configuration file       ║\n\
            ║  in the summit-firmware directory with at least a [peers]        ║\n\
            ║  section naming the top and bottom unit MAC addresses.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read stopwatch.toml                            ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let value: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in stopwatch.toml                    ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if value.get("peers").is_none() {
        fail("Missing required section", &["Missing [peers] section".to_string()]);
    }

    let file: StopwatchFile = match value.try_into() {
        Ok(file) => file,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Unexpected value in stopwatch.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    validate_peers(&file.peers);
    validate_display(&file.display);
    validate_timing(&file.timing);

    println!("cargo:warning=stopwatch.toml validated successfully");
    file
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Abort the build with a list of problems
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Parse `AA:BB:CC:DD:EE:FF`
fn parse_mac(text: &str) -> Option<[u8; 6]> {
    let mut octets = [0u8; 6];
    let mut parts = text.split(':');
    for octet in octets.iter_mut() {
        let part = parts.next()?;
        if part.len() != 2 {
            return None;
        }
        *octet = u8::from_str_radix(part, 16).ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(octets)
}

fn validate_peers(peers: &Peers) {
    let mut errors = Vec::new();

    for (name, text) in [("top", &peers.top), ("bottom", &peers.bottom)] {
        match parse_mac(text) {
            Some(octets) if octets == [0xFF; 6] => {
                errors.push(format!("[peers] {} cannot be the broadcast address", name));
            }
            Some(octets) if octets[0] & 0x01 != 0 => {
                errors.push(format!("[peers] {} is a multicast address", name));
            }
            Some(_) => {}
            None => {
                errors.push(format!("[peers] {} must look like AA:BB:CC:DD:EE:FF", name));
            }
        }
    }

    if errors.is_empty() && parse_mac(&peers.top) == parse_mac(&peers.bottom) {
        errors.push("[peers] top and bottom must differ".to_string());
    }

    if !errors.is_empty() {
        fail("Invalid peer configuration", &errors);
    }
}

fn validate_display(display: &DisplayConfig) {
    if display.intensity > MAX_INTENSITY {
        fail(
            "Invalid display configuration",
            &[format!("[display] intensity must be 0-{}", MAX_INTENSITY)],
        );
    }
}

fn validate_timing(timing: &TimingConfig) {
    let mut errors = Vec::new();

    if timing.poll_interval_ms == 0 {
        errors.push("[timing] poll_interval_ms must be at least 1".to_string());
    }
    if timing.refresh_interval_ms == 0 {
        errors.push("[timing] refresh_interval_ms must be at least 1".to_string());
    }
    if timing.heartbeat_interval_ms == 0 {
        errors.push("[timing] heartbeat_interval_ms must be at least 1".to_string());
    }
    if timing.link_timeout_ms <= timing.heartbeat_interval_ms {
        errors.push("[timing] link_timeout_ms must exceed heartbeat_interval_ms".to_string());
    }
    if timing.debounce_ms >= timing.link_timeout_ms {
        errors.push("[timing] debounce_ms is longer than the link timeout".to_string());
    }

    if !errors.is_empty() {
        fail("Invalid timing configuration", &errors);
    }
}

fn mac_literal(text: &str) -> String {
    let octets = parse_mac(text).unwrap_or([0; 6]);
    let bytes = octets
        .iter()
        .map(|b| format!("0x{:02X}", b))
        .collect::<Vec<_>>()
        .join(", ");
    format!("PeerAddress::new([{}])", bytes)
}

/// Write `config.rs` into OUT_DIR
fn generate_config(file: &StopwatchFile) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let timing = &file.timing;
    let display = &file.display;

    let source = format!(
        "// Generated by build.rs from stopwatch.toml\n\
         \n\
         /// Station address of the top unit\n\
         pub const TOP_ADDRESS: PeerAddress = {top};\n\
         \n\
         /// Station address of the bottom unit\n\
         pub const BOTTOM_ADDRESS: PeerAddress = {bottom};\n\
         \n\
         pub const DISPLAY: DisplayConfig = DisplayConfig {{\n\
         \x20   intensity: {intensity},\n\
         \x20   column_wired: {column_wired},\n\
         }};\n\
         \n\
         pub const TIMING: TimingConfig = TimingConfig {{\n\
         \x20   debounce_ms: {debounce},\n\
         \x20   poll_interval_ms: {poll},\n\
         \x20   refresh_interval_ms: {refresh},\n\
         \x20   heartbeat_interval_ms: {heartbeat},\n\
         \x20   link_timeout_ms: {timeout},\n\
         \x20   banner_ms: {banner},\n\
         }};\n",
        top = mac_literal(&file.peers.top),
        bottom = mac_literal(&file.peers.bottom),
        intensity = display.intensity,
        column_wired = display.column_wired,
        debounce = timing.debounce_ms,
        poll = timing.poll_interval_ms,
        refresh = timing.refresh_interval_ms,
        heartbeat = timing.heartbeat_interval_ms,
        timeout = timing.link_timeout_ms,
        banner = timing.banner_ms,
    );

    fs::write(out_dir.join("config.rs"), source).expect("OUT_DIR is writable");
}
