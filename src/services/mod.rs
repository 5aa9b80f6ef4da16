// Kestrel services
// Stateless helpers and small stateful components: persistence, preferences,
// input classification, zoom, downloads, find-in-page and theming.

pub mod download_negotiator;
pub mod find_controller;
pub mod preferences;
pub mod settings_store;
pub mod theme_engine;
pub mod url_classifier;
pub mod zoom;
