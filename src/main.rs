//! Delcom USB lamp CLI tool.
//!
//! Frame construction and effect timing live in the library crate; this
//! binary only resolves flags into fully-parsed values and drives one run.

use std::process;

use clap::{crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use lampctl::color::Rgb;
use lampctl::device::DeviceSession;
use lampctl::effect;
use lampctl::error::Error;

/// Default lamp on/off durations in milliseconds.
const DEFAULT_ON_MS: u64 = 200;
const DEFAULT_OFF_MS: u64 = 200;

/// Resolved invocation: everything the effect layer needs, already parsed.
struct Config {
    color: Rgb,
    on_ms: u64,
    off_ms: u64,
    frequency_index: u8,
    cycles: u64,
    tada: bool,
}

impl Config {
    fn from_cli(matches: &ArgMatches) -> Result<Self, Error> {
        let mut color = Rgb::default();
        if matches.get_flag("red") {
            color = Rgb { r: 255, g: 0, b: 0 };
        }
        if matches.get_flag("green") {
            color = Rgb { r: 0, g: 255, b: 0 };
        }
        if matches.get_flag("blue") {
            color = Rgb { r: 0, g: 0, b: 255 };
        }
        if let Some(hex) = matches.get_one::<String>("color") {
            color = parse_color(hex)?;
        }

        Ok(Config {
            color,
            on_ms: matches.get_one::<u64>("on").copied().unwrap_or(DEFAULT_ON_MS),
            off_ms: matches.get_one::<u64>("off").copied().unwrap_or(DEFAULT_OFF_MS),
            frequency_index: matches.get_one::<u8>("buzzer").copied().unwrap_or(0),
            cycles: u64::from(matches.get_count("play").max(1)),
            tada: matches.get_flag("tada"),
        })
    }
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(err) = run(&cli()) {
        eprintln!("\x1b[31mError:\x1b[0m {err}");
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let config = Config::from_cli(matches)?;

    // Build the full program before touching the device; a validation failure
    // must never reach the transport.
    let (program, cycles) = if config.tada {
        (effect::tada()?, 1)
    } else {
        let play =
            effect::play(config.color, config.on_ms, config.off_ms, config.frequency_index)?;
        (play, config.cycles)
    };

    let mut session = DeviceSession::open()?;

    for _ in 0..cycles {
        effect::run(&mut session, &program)?;
    }

    Ok(())
}

/// Get clap CLI parameters.
fn cli() -> ArgMatches {
    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::new("red")
                .help("Full-intensity red")
                .long("red")
                .short('r')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("green")
                .help("Full-intensity green")
                .long("green")
                .short('g')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("blue")
                .help("Full-intensity blue")
                .long("blue")
                .short('b')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("color")
                .help("LED color as six hex digits [example: dead00]")
                .long("color")
                .short('c'),
        )
        .arg(
            Arg::new("on")
                .help("Lamp on time in milliseconds")
                .long("on")
                .short('o')
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("off")
                .help("Lamp off time in milliseconds")
                .long("off")
                .short('f')
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("buzzer")
                .help("Buzzer frequency table index [possible values: 0..=15]")
                .long("buzzer")
                .short('z')
                .value_parser(clap::value_parser!(u8)),
        )
        .arg(
            Arg::new("play")
                .help("Run one play cycle per occurrence")
                .long("play")
                .short('n')
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("tada")
                .help("Play a fanfare instead of a play cycle")
                .long("tada")
                .short('t')
                .action(ArgAction::SetTrue),
        )
        .get_matches()
}

/// Parse a six hex digit color string.
fn parse_color(s: &str) -> Result<Rgb, Error> {
    if s.len() != 6 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidColor(s.into()));
    }

    let value = u32::from_str_radix(s, 16).map_err(|_| Error::InvalidColor(s.into()))?;

    Ok(Rgb {
        r: (value >> 16) as u8,
        g: ((value >> 8) & 0xff) as u8,
        b: (value & 0xff) as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_accepts_hex() {
        assert_eq!(parse_color("dead00").unwrap(), Rgb { r: 0xde, g: 0xad, b: 0x00 });
        assert_eq!(parse_color("0000ff").unwrap(), Rgb { r: 0, g: 0, b: 0xff });
    }

    #[test]
    fn parse_color_rejects_bad_input() {
        assert!(parse_color("dead0").is_err());
        assert!(parse_color("dead000").is_err());
        assert!(parse_color("deadzz").is_err());
        assert!(parse_color("").is_err());
    }
}
