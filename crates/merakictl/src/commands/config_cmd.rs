//! Configuration inspection commands.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let mut cfg = config::load_config_or_default();
            // Never echo plaintext keys back to the terminal.
            for profile in cfg.profiles.values_mut() {
                if profile.api_key.is_some() {
                    profile.api_key = Some("***".into());
                }
            }
            let rendered =
                toml::to_string_pretty(&cfg).expect("serialization should not fail");
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }
    }
}
