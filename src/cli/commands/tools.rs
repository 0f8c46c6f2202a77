//! Setup and diagnostics commands.

use std::path::Path;

use crate::artwork::ImageMagick;
use crate::config::{self, Config, ConfigError};

/// Check the image tool and credentials
pub fn cmd_check_tools(config: &Config) -> anyhow::Result<()> {
    println!("Checking album art tools...\n");

    let magick = ImageMagick::new(&config.image);
    if let Some(version) = magick.version() {
        println!("✓ convert: {}", version);
    } else {
        println!(
            "✗ convert: NOT FOUND ({})",
            config.image.convert_path.display()
        );
        println!("  Install ImageMagick or set image.convert_path in the config file");
    }

    println!();
    println!("Credentials:");
    let status = |value: &Option<String>| match value.as_deref() {
        Some(v) if !v.is_empty() => "set",
        _ => "not set",
    };
    println!("  access key: {}", status(&config.credentials.access_key));
    println!("  secret key: {}", status(&config.credentials.secret_key));

    Ok(())
}

/// Write the default configuration to `path` or the default location
pub fn cmd_init_config(path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config::config_path().ok_or(ConfigError::NoConfigDir)?,
    };

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    config::save(&Config::default(), &path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
