use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::warn;

use crate::models::Config;

const CONFIG_FILE: &str = "aniting_config.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory for this platform")]
    NoConfigDir,
    #[error("config i/o: {0}")]
    Io(#[from] io::Error),
}

/// A config line whose value could not be used; the default stays in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub key: String,
    pub value: String,
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("app", "Aniting", "Aniting")
}

fn config_file_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join(CONFIG_FILE))
}

/// Reads the platform config file, falling back to one in the working
/// directory. Nothing is logged here; the logger is not up yet.
pub fn read_config() -> Result<(Config, Vec<Rejected>), ConfigError> {
    let primary = config_file_path();
    let content = match primary.as_deref().map(fs::read_to_string) {
        Some(Ok(s)) => s,
        _ => fs::read_to_string(CONFIG_FILE)?,
    };
    Ok(parse_config(&content))
}

/// Config for this run from the outcome of [`read_config`]. A first start
/// writes the defaults out so there is a file to edit. Call once logging is
/// initialised so rejected values are reported.
pub fn or_init_defaults(read: Result<(Config, Vec<Rejected>), ConfigError>) -> Config {
    match read {
        Ok((cfg, rejected)) => {
            for r in &rejected {
                warn!(key = %r.key, value = %r.value, "ignoring invalid config value");
            }
            cfg
        }
        Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            let cfg = Config::default();
            if let Err(e) = save_config(&cfg) {
                warn!(error = %e, "could not write default config");
            }
            cfg
        }
        Err(e) => {
            warn!(error = %e, "could not read config, using defaults");
            Config::default()
        }
    }
}

pub fn parse_config(content: &str) -> (Config, Vec<Rejected>) {
    let mut cfg = Config::default();
    let mut rejected = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((k, v)) = line.split_once('=') else { continue };
        let (k, v) = (k.trim(), v.trim());
        let ok = match k {
            "endpoint" => match url::Url::parse(v) {
                Ok(u) if matches!(u.scheme(), "http" | "https") => {
                    cfg.endpoint = v.to_string();
                    true
                }
                _ => false,
            },
            "font_scale" => v.parse::<f32>().map(|n| cfg.font_scale = n.clamp(0.6, 2.0)).is_ok(),
            "cover_parallel" => v.parse::<u32>().map(|n| cfg.cover_parallel = n.max(1)).is_ok(),
            "cover_uploads_per_frame" => {
                v.parse::<u32>().map(|n| cfg.cover_uploads_per_frame = n.clamp(1, 16)).is_ok()
            }
            "reduce_motion" => v.parse::<u8>().map(|n| cfg.reduce_motion = n != 0).is_ok(),
            "log_level" => {
                cfg.log_level = v.to_string();
                true
            }
            _ => true,
        };
        if !ok {
            rejected.push(Rejected { key: k.to_string(), value: v.to_string() });
        }
    }
    (cfg, rejected)
}

pub fn render_config(cfg: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "endpoint={}", cfg.endpoint);
    let _ = writeln!(out, "font_scale={:.2}", cfg.font_scale);
    let _ = writeln!(out, "cover_parallel={}", cfg.cover_parallel);
    let _ = writeln!(out, "cover_uploads_per_frame={}", cfg.cover_uploads_per_frame);
    let _ = writeln!(out, "reduce_motion={}", if cfg.reduce_motion { 1 } else { 0 });
    let _ = writeln!(out, "log_level={}", cfg.log_level);
    out
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_config(cfg))?;
    Ok(())
}

pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_file_path().ok_or(ConfigError::NoConfigDir)?;
    save_config_to(&path, cfg)
}
