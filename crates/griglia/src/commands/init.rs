use griglia_core::config;

/// Creates the default configuration at `~/.config/griglia/`.
///
/// Writes `config.toml` with every tuning knob at its default value.
/// An existing file is left untouched. The companion `patterns.toml`
/// is optional and only needed to override the built-in known-app
/// table, so none is generated here.
pub fn execute() {
    match config::write_default() {
        Ok(path) => {
            println!("Configuration at {}", path.display());
            println!("Edit it to tune padding, spacing, and manipulation timings.");
        }
        Err(e) => {
            eprintln!("Error: could not write the default configuration: {e}");
            std::process::exit(1);
        }
    }
}
