use clap::Subcommand;
use tomatick_core::{Store, TimerConfig};
use tomatick_core::storage::{MAX_MINUTES, MIN_MINUTES};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (focus, short-break, long-break, sound-enabled)
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value (durations clamp to 1..=60 minutes)
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    match action {
        ConfigAction::Get { key } => {
            let config = store.load_config();
            match get(&config, &key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = store.load_config();
            set(&mut config, &key, &value)?;
            store.save_config(&config)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = store.load_config();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            store.save_config(&TimerConfig::default())?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

fn get(config: &TimerConfig, key: &str) -> Option<String> {
    match key {
        "focus" => Some(config.focus.to_string()),
        "short-break" => Some(config.short_break.to_string()),
        "long-break" => Some(config.long_break.to_string()),
        "sound-enabled" => Some(config.sound_enabled.to_string()),
        _ => None,
    }
}

fn set(config: &mut TimerConfig, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    match key {
        "focus" => config.focus = parse_minutes(value)?,
        "short-break" => config.short_break = parse_minutes(value)?,
        "long-break" => config.long_break = parse_minutes(value)?,
        "sound-enabled" => config.sound_enabled = value.parse()?,
        _ => return Err(format!("unknown config key: {key}").into()),
    }
    Ok(())
}

/// Out-of-range durations are clamped, not rejected.
fn parse_minutes(value: &str) -> Result<u32, Box<dyn std::error::Error>> {
    let minutes: u32 = value.parse()?;
    Ok(minutes.clamp(MIN_MINUTES, MAX_MINUTES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clamps_durations() {
        let mut config = TimerConfig::default();
        set(&mut config, "focus", "90").expect("set");
        assert_eq!(config.focus, 60);
        set(&mut config, "short-break", "0").expect("set");
        assert_eq!(config.short_break, 1);
    }

    #[test]
    fn set_rejects_unknown_keys() {
        let mut config = TimerConfig::default();
        assert!(set(&mut config, "volume", "50").is_err());
    }

    #[test]
    fn get_reads_every_key() {
        let config = TimerConfig::default();
        assert_eq!(get(&config, "focus").as_deref(), Some("25"));
        assert_eq!(get(&config, "short-break").as_deref(), Some("5"));
        assert_eq!(get(&config, "long-break").as_deref(), Some("15"));
        assert_eq!(get(&config, "sound-enabled").as_deref(), Some("true"));
        assert!(get(&config, "volume").is_none());
    }
}
