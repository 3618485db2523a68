use std::path::Path;

use crate::catalog::{active_catalog, find_card, load_catalog};
use crate::error::{PerksError, Result};
use crate::settings::{load_settings, save_settings, settings_path, shellexpand_path};

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("Settings:     {}", settings_path().display());
    println!("Default card: {}", settings.default_card);
    println!(
        "Catalog:      {}",
        settings.catalog_path.as_deref().unwrap_or("(built-in)")
    );
    println!(
        "Log filter:   {}",
        settings.log_filter.as_deref().unwrap_or("(default)")
    );
    Ok(())
}

pub fn set_card(id: &str) -> Result<()> {
    let mut settings = load_settings();
    let catalog = active_catalog(None, &settings)?;
    if find_card(&catalog, id).is_none() {
        return Err(PerksError::UnknownCard(id.to_string()));
    }
    settings.default_card = id.to_string();
    save_settings(&settings)?;
    println!("Default card set to {id}");
    Ok(())
}

pub fn set_catalog(path: &str) -> Result<()> {
    let resolved = shellexpand_path(path);
    let cards = load_catalog(Path::new(&resolved))?;
    if cards.is_empty() {
        return Err(PerksError::Settings(format!("{resolved} contains no cards")));
    }
    let mut settings = load_settings();
    settings.catalog_path = Some(resolved.clone());
    save_settings(&settings)?;
    println!("Using catalog {resolved} ({} cards)", cards.len());
    Ok(())
}

pub fn clear_catalog() -> Result<()> {
    let mut settings = load_settings();
    settings.catalog_path = None;
    save_settings(&settings)?;
    println!("Using built-in catalog");
    Ok(())
}
