//! Settings and insertion loaders for .deckview/

use super::types::{InsertionsFile, Settings};
use deck_core::prelude::*;
use deck_core::{normalize_insertions, NormalizedInsertions};
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const INSERTIONS_FILENAME: &str = "insertions.toml";
const DECKVIEW_DIR: &str = ".deckview";

/// Directory holding the configuration for a deck file
pub fn config_dir(deck_dir: &Path) -> PathBuf {
    deck_dir.join(DECKVIEW_DIR)
}

/// Load settings from .deckview/config.toml
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(deck_dir: &Path) -> Settings {
    let config_path = config_dir(deck_dir).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Load and validate insertion rules from .deckview/insertions.toml
///
/// A missing file means no insertions. A file that fails to parse is
/// reported and treated as empty; individual invalid rules are dropped by
/// [`normalize_insertions`].
pub fn load_insertions(deck_dir: &Path) -> NormalizedInsertions {
    let path = config_dir(deck_dir).join(INSERTIONS_FILENAME);

    if !path.exists() {
        debug!("No insertions file at {:?}", path);
        return NormalizedInsertions::default();
    }

    let file: InsertionsFile = match std::fs::read_to_string(&path)
        .map_err(Error::from)
        .and_then(|content| toml::from_str(&content).map_err(Error::from))
    {
        Ok(file) => file,
        Err(e) => {
            warn!("Ignoring insertions in {:?}: {}", path, e);
            return NormalizedInsertions::default();
        }
    };

    let result = normalize_insertions(&file.insertions);
    info!(
        "Loaded {} insertion(s), rejected {}",
        result.accepted.len(),
        result.rejected.len()
    );
    result
}

/// Create default config files in .deckview/ directory
pub fn init_config_dir(deck_dir: &Path) -> Result<()> {
    let dir = config_dir(deck_dir);

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        info!("Created .deckview directory");
    }

    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# deckview configuration

[document]
aspect_ratio = 0.77         # Page width / height

[navigation]
debounce_ms = 300           # Minimum time between two page turns
exit_ms = 200
enter_ms = 100
settle_ms = 300
initialize_delay_ms = 100

[loading]
settle_ms = 800             # Keep the overlay briefly after every page loaded

[preload]
enabled = true
cap = 10                    # Background renders in flight

[carousel]
period_ms = 3000
fade_ms = 300
restart_delay_ms = 1500

[input]
swipe_min_distance = 250.0
cell_width = 8.0            # Pixels per terminal column, for mouse swipes
cell_height = 16.0

[call_to_action]
enabled = true
min_pages = 10
copy_text = ""              # Copied by the donate capsule
form_url = ""               # Opened by the form capsule
feedback_ms = 3000
fade_ms = 300

[call_to_action.donate]
minimum = 15
end_offset = 5
fraction = 0.80

[call_to_action.form]
minimum = 16
end_offset = 4
fraction = 0.85

[watcher]
enabled = true
debounce_ms = 500

[behavior]
browser = ""                # Empty = system default
"#;
        std::fs::write(&config_path, default_content)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        debug!("Created default {:?}", config_path);
    }

    let insertions_path = dir.join(INSERTIONS_FILENAME);
    if !insertions_path.exists() {
        let default_content = r#"# External content spliced into the deck
#
# [[insertions]]
# id = "playlist"
# location = [1, 2]          # After page 1, before page 2
# url = "https://www.youtube.com/embed/videoseries?list=..."
# title = ["First line", "Second line"]
# enabled = true
"#;
        std::fs::write(&insertions_path, default_content)
            .with_context(|| format!("Failed to write {}", insertions_path.display()))?;
        debug!("Created default {:?}", insertions_path);
    }

    Ok(())
}
