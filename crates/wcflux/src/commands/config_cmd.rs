//! Config subcommand handlers.

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile, SecretKind};
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of the config with plaintext secrets masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(MASK.into());
        }
        if profile.consumer_secret.is_some() {
            profile.consumer_secret = Some(MASK.into());
        }
    }
    cfg
}

/// TOML-like rendering for the table view. Expects an already redacted config.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "site_url = \"{}\"", p.site_url);
        let _ = writeln!(out, "site_id = {}", p.site_id);
        let _ = writeln!(out, "auth_mode = \"{}\"", p.auth_mode);
        let _ = writeln!(out, "route_style = \"{}\"", p.route_style);
        let optional = [
            ("username", p.username.as_deref()),
            ("password", p.password.as_deref()),
            ("password_env", p.password_env.as_deref()),
            ("consumer_key", p.consumer_key.as_deref()),
            ("consumer_secret", p.consumer_secret.as_deref()),
            ("consumer_secret_env", p.consumer_secret_env.as_deref()),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                let _ = writeln!(out, "{key} = \"{value}\"");
            }
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_secret(label: &str) -> Result<String, CliError> {
    let secret = rpassword::prompt_password(label).map_err(prompt_err)?;
    if secret.is_empty() {
        return Err(CliError::Validation {
            field: "secret".into(),
            reason: "value cannot be empty".into(),
        });
    }
    Ok(secret)
}

/// Store a secret in the keyring, or return it for plaintext config.
fn prompt_secret_storage(
    secret: String,
    profile_name: &str,
    kind: SecretKind,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the secret?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        config::store_secret(profile_name, kind, &secret)?;
        eprintln!("   ✓ Secret stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(secret))
    }
}

fn profile_not_found(cfg: &Config, name: String) -> CliError {
    CliError::ProfileNotFound {
        name,
        available: config::available_profiles(cfg),
    }
}

fn init_wizard() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("wcflux configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let site_url: String = Input::new()
        .with_prompt("Store URL")
        .default("https://shop.example.com".into())
        .interact_text()
        .map_err(prompt_err)?;
    if url::Url::parse(&site_url).is_err() {
        return Err(CliError::Validation {
            field: "site_url".into(),
            reason: format!("invalid URL: {site_url}"),
        });
    }

    let auth_choices = &[
        "Application password (WordPress user)",
        "REST API consumer key (WooCommerce > Settings > Advanced)",
    ];
    let auth_selection = Select::new()
        .with_prompt("Authentication method")
        .items(auth_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let mut profile = Profile {
        site_url,
        site_id: 1,
        route_style: "pretty".into(),
        ..Profile::default()
    };

    if auth_selection == 0 {
        let username: String = Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(prompt_err)?;
        let secret = prompt_secret("Application password: ")?;
        profile.auth_mode = "application-password".into();
        profile.username = Some(username);
        profile.password = prompt_secret_storage(secret, &profile_name, SecretKind::Password)?;
    } else {
        let key: String = Input::new()
            .with_prompt("Consumer key (ck_...)")
            .interact_text()
            .map_err(prompt_err)?;
        let secret = prompt_secret("Consumer secret (cs_...): ")?;
        profile.auth_mode = "consumer-key".into();
        profile.consumer_key = Some(key);
        profile.consumer_secret =
            prompt_secret_storage(secret, &profile_name, SecretKind::ConsumerSecret)?;
    }

    let route_choices = &[
        "Pretty permalinks (/wp-json/)",
        "Plain permalinks (?rest_route=)",
    ];
    let route_selection = Select::new()
        .with_prompt("REST route style")
        .items(route_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    if route_selection == 1 {
        profile.route_style = "query".into();
    }

    // Merge into the existing file so other profiles survive.
    let mut cfg = config::load_config()?;
    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());
    config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", config_path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: wcflux products list --limit 5");
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init_wizard(),

        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config()?);
            let out = output::render_single(global.output, &cfg, format_config, |_| {
                config::config_path().display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let default = cfg.active_profile_name();
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: wcflux config init");
                return Ok(());
            }
            let lines: Vec<String> = cfg
                .profiles
                .iter()
                .map(|(name, p)| {
                    let marker = if name == default { " *" } else { "" };
                    match global.output {
                        OutputFormat::Plain => name.clone(),
                        _ => format!("{name}{marker}\t{}", p.site_url),
                    }
                })
                .collect();
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(&cfg, name));
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }

        ConfigCommand::SetSecret { profile } => {
            let cfg = config::load_config()?;
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            let Some(prof) = cfg.profiles.get(&profile_name) else {
                return Err(profile_not_found(&cfg, profile_name));
            };

            let (kind, label) = if prof.auth_mode == "consumer-key" {
                (SecretKind::ConsumerSecret, "Consumer secret: ")
            } else {
                (SecretKind::Password, "Application password: ")
            };
            let secret = prompt_secret(label)?;
            config::store_secret(&profile_name, kind, &secret)?;

            if !global.quiet {
                eprintln!("✓ Secret stored in system keyring for profile '{profile_name}'");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secrets() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "shop".into(),
            Profile {
                site_url: "https://shop.test".into(),
                auth_mode: "consumer-key".into(),
                consumer_key: Some("ck_live".into()),
                consumer_secret: Some("cs_live".into()),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn secrets_are_masked() {
        let shown = format_config(&redacted(&config_with_secrets()));
        assert!(shown.contains("consumer_secret = \"****\""));
        assert!(shown.contains("consumer_key = \"ck_live\""));
        assert!(!shown.contains("cs_live"));
    }
}
