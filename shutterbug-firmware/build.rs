//! Build script for shutterbug-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates shutterbug.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use shutterbug_core::config::{parse_config, ConfigError};

const CONFIG_FILE: &str = "shutterbug.toml";

/// Sections the firmware reads
const KNOWN_SECTIONS: [&str; 3] = ["capture", "console", "framing"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x in OUT_DIR");
    f.write_all(memory_x).expect("write memory.x");

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Only meaningful when building for the RP2040
    if env::var("TARGET").map_or(false, |t| t.starts_with("thumbv6m")) {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate shutterbug.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed={}", CONFIG_FILE);

    let config_path = Path::new(CONFIG_FILE);

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: shutterbug.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds shutterbug.toml as its configuration.       ║\n\
            ║  Please create one in the shutterbug-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read shutterbug.toml", &e.to_string()),
    };

    // Full TOML syntax check first, for readable error positions
    let value: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail("Invalid TOML syntax in shutterbug.toml", &e.to_string()),
    };

    validate_sections(&value);

    // Then the same parser and checks the firmware runs at boot
    let config = match parse_config(&content) {
        Ok(config) => config,
        Err(e) => fail(
            "shutterbug.toml uses unsupported syntax or keys",
            &format!("{:?}", e),
        ),
    };

    match config.validate() {
        Ok(warnings) => {
            if warnings.noisy_capture {
                println!(
                    "cargo:warning=capture baud {} decodes with occasional corruption",
                    config.capture.baudrate
                );
            }
            if warnings.unreliable_capture {
                println!(
                    "cargo:warning=capture baud {} was unreliable on the bench",
                    config.capture.baudrate
                );
            }
            if warnings.untested_capture {
                println!(
                    "cargo:warning=capture baud {} has never been tested",
                    config.capture.baudrate
                );
            }
        }
        Err(e) => fail("Invalid decoder configuration", &describe(e)),
    }

    println!("cargo:warning=shutterbug.toml validated successfully");
}

/// Reject sections the firmware does not know about
fn validate_sections(value: &toml::Value) {
    let table = match value.as_table() {
        Some(table) => table,
        None => fail("shutterbug.toml must be a table", ""),
    };

    let mut errors = Vec::new();
    for (name, section) in table {
        if !KNOWN_SECTIONS.contains(&name.as_str()) {
            errors.push(format!("Unknown section [{}]", name));
        } else if !section.is_table() {
            errors.push(format!("'{}' must be a [section]", name));
        }
    }
    if !table.contains_key("capture") {
        errors.push("Missing [capture] section".to_string());
    }

    if !errors.is_empty() {
        fail("shutterbug.toml has invalid sections", &errors.join("\n"));
    }
}

fn describe(error: ConfigError) -> String {
    match error {
        ConfigError::ZeroGap => "framing.gap_ms must be greater than 0".to_string(),
        ConfigError::ZeroTick => "framing.tick_ms must be greater than 0".to_string(),
        ConfigError::TickTooSlow => "framing.tick_ms must be less than framing.gap_ms".to_string(),
        ConfigError::ZeroBaudrate => "baud rates must be greater than 0".to_string(),
        ConfigError::UnusableCaptureBaud(baud) => {
            format!("capture baud {} does not classify on this drone", baud)
        }
    }
}

/// Abort the build with a boxed error message
fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
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
