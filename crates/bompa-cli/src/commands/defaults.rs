use bompa_core::GameConfig;

pub fn run() -> Result<(), String> {
    let text = toml::to_string_pretty(&GameConfig::default())
        .map_err(|e| format!("failed to serialize defaults: {e}"))?;
    print!("{text}");
    Ok(())
}
