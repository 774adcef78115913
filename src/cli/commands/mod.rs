use crate::link::{
    DEFAULT_EXPIRE,
    generator::{DEFAULT_ACCESS_KEY, DEFAULT_SERVER_URL},
};
use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::ValueParser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use url::Url;

pub fn validator_is_num() -> ValueParser {
    ValueParser::from(move |s: &str| -> std::result::Result<u64, String> {
        s.parse::<u64>()
            .map_err(|_| String::from("Not a valid number"))
    })
}

pub fn validator_is_seconds() -> ValueParser {
    ValueParser::from(move |s: &str| -> std::result::Result<u64, String> {
        match s.parse::<u64>() {
            Ok(0) => Err(String::from("must be greater than 0")),
            Ok(n) => Ok(n),
            Err(_) => Err(String::from("Not a valid number")),
        }
    })
}

pub fn validator_is_file() -> ValueParser {
    ValueParser::from(move |s: &str| -> std::result::Result<PathBuf, String> {
        if let Ok(metadata) = fs::metadata(s) {
            if metadata.is_file() {
                return Ok(PathBuf::from(s));
            }
        }

        Err(format!("Invalid file path or file does not exist: '{s}'"))
    })
}

pub fn validator_is_url() -> ValueParser {
    ValueParser::from(move |s: &str| -> std::result::Result<String, String> {
        Url::parse(s)
            .map(|_| s.to_string())
            .map_err(|e| format!("Invalid URL '{s}': {e}"))
    })
}

pub fn new(config_path: &Path) -> Command {
    // get config file path (default: ~/.config/templink/config.yml)
    let config_file_path = config_path.join("config.yml");

    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("templink")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate a temporary link for an object without contacting the server")
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("bucket")
            .help("The bucket name")
            .index(1)
            .num_args(1)
        )
        .arg(
            Arg::new("key")
            .help("The object key, example: path/to/file.txt")
            .index(2)
            .num_args(1)
        )
        .arg(
            Arg::new("config")
            .help(format!("Config file, default: {}", config_file_path.display()))
            .long("config")
            .short('c')
            .num_args(1)
            .value_parser(validator_is_file())
            .value_name("config.yml")
        )
        .arg(
            Arg::new("server-url")
            .help(format!("Server base URL [default: {DEFAULT_SERVER_URL}]"))
            .long("server-url")
            .short('s')
            .env("TEMPLINK_SERVER_URL")
            .num_args(1)
            .value_parser(validator_is_url())
        )
        .arg(
            Arg::new("access-key")
            .help(format!("Access key, shared with the server [default: {DEFAULT_ACCESS_KEY}]"))
            .long("access-key")
            .short('k')
            .env("TEMPLINK_ACCESS_KEY")
            .hide_env_values(true)
            .num_args(1)
        )
        .arg(
            Arg::new("expire")
            .help(format!("Time period in seconds [default: {DEFAULT_EXPIRE}]"))
            .long("expire")
            .short('e')
            .num_args(1)
            .value_parser(validator_is_seconds())
        )
        .arg(
            Arg::new("timestamp")
            .help("Unix timestamp of issue, defaults to now")
            .long("timestamp")
            .short('t')
            .num_args(1)
            .value_parser(validator_is_num())
        )
        .arg(
            Arg::new("json")
            .help("Print the link as JSON")
            .long("json")
            .num_args(0)
        )
        .arg(
            Arg::new("verbose")
            .help("Verbosity level")
            .short('v')
            .long("verbose")
            .action(ArgAction::Count)
        )
}
