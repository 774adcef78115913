use crate::cli::{Config, actions::Action, commands};
use crate::link::{
    DEFAULT_EXPIRE, LinkGenerator, LinkRequest, Settings,
    generator::{DEFAULT_ACCESS_KEY, DEFAULT_SERVER_URL},
};
use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use secrecy::ExposeSecret;
use std::path::{Path, PathBuf};
use url::Url;

#[must_use]
pub fn get_config_path() -> PathBuf {
    let home_dir = dirs::home_dir().map_or_else(|| PathBuf::from("/tmp"), |h| h);

    Path::new(&home_dir).join(".config").join("templink")
}

/// # Errors
/// Will return an error if the config file can't be loaded or the settings are invalid
pub fn start() -> Result<Action> {
    let config_path = get_config_path();

    // start the command line interface
    let cmd = commands::new(&config_path);

    // get the matches
    let matches = cmd.get_matches();

    let verbosity_level =
        match matches
            .get_one::<u8>("verbose")
            .map_or(0, |&v| if v > 1 { 4 } else { v })
        {
            0 => log::LevelFilter::Off,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        };

    env_logger::Builder::new()
        .filter_level(verbosity_level)
        .init();

    log::info!("config path: {}", config_path.display());

    action(&matches, &config_path)
}

/// Build the action from the parsed arguments
///
/// # Errors
/// Will return an error if the config file can't be loaded or the settings are invalid
pub fn action(matches: &ArgMatches, config_path: &Path) -> Result<Action> {
    // both positionals are required, checked here so the usage goes to stdout
    let (Some(bucket), Some(key)) = (
        matches.get_one::<String>("bucket"),
        matches.get_one::<String>("key"),
    ) else {
        return Ok(Action::ShowUsage);
    };

    let config = load_config(matches, config_path)?;

    log::debug!("config: {config:#?}");

    let settings = settings(matches, &config)?;

    log::debug!("settings: {settings:?}");

    log::info!(
        "server url: {}, expire: {}",
        settings.server_url,
        settings.expire
    );

    let mut request = LinkRequest::new(bucket, key);

    if let Some(timestamp) = matches.get_one::<u64>("timestamp") {
        request = request.with_timestamp(*timestamp);
    }

    Ok(Action::CreateLink {
        generator: LinkGenerator::new(settings),
        request,
        json: matches.get_one::<bool>("json").copied().unwrap_or(false),
    })
}

// --config or ~/.config/templink/config.yml if it exists
fn load_config(matches: &ArgMatches, config_path: &Path) -> Result<Config> {
    if let Some(config_file) = matches.get_one::<PathBuf>("config") {
        return Config::new(config_file);
    }

    let config_file = config_path.join("config.yml");

    if config_file.is_file() {
        Config::new(&config_file)
    } else {
        log::debug!("no config file found: {}", config_file.display());
        Ok(Config::default())
    }
}

/// Merge the settings: flag or environment > config file > default
///
/// # Errors
/// Will return an error if the server URL from the config file is invalid
pub fn settings(matches: &ArgMatches, config: &Config) -> Result<Settings> {
    let server_url = match matches.get_one::<String>("server-url") {
        Some(server_url) => server_url.clone(),
        None => match &config.server_url {
            Some(server_url) => {
                Url::parse(server_url).with_context(|| {
                    format!(
                        "invalid server_url in config file: {}, For more information try {}",
                        server_url.red(),
                        "--help".green()
                    )
                })?;
                server_url.clone()
            }
            None => DEFAULT_SERVER_URL.to_string(),
        },
    };

    let access_key = match matches.get_one::<String>("access-key") {
        Some(access_key) => access_key.as_str(),
        None => config
            .access_key
            .as_ref()
            .map_or(DEFAULT_ACCESS_KEY, |access_key| access_key.expose_secret()),
    };

    if access_key == DEFAULT_ACCESS_KEY {
        log::warn!("using the placeholder access key, set --access-key or TEMPLINK_ACCESS_KEY");
    }

    let expire = matches
        .get_one::<u64>("expire")
        .copied()
        .or(config.expire)
        .unwrap_or(DEFAULT_EXPIRE);

    if expire == 0 {
        return Err(anyhow::anyhow!(
            "expire must be greater than 0, For more information try {}",
            "--help".green()
        ));
    }

    Settings::new(&server_url, access_key, expire).with_context(|| {
        format!(
            "invalid access key, For more information try {}",
            "--help".green()
        )
    })
}
