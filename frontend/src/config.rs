use log::Level;

/// Where section content is fetched from. `None` means sections are served
/// from the built-in registry.
pub fn content_base_url() -> Option<&'static str> {
    match option_env!("LEDGERLINE_CONTENT_URL") {
        Some(url) if !url.trim().is_empty() => Some(url.trim().trim_end_matches('/')),
        _ => None,
    }
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Chatty while running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub const CONSENT_GIVEN_KEY: &str = "cookie-consent-given";
pub const COOKIE_SETTINGS_KEY: &str = "cookie-settings";
pub const THEME_KEY: &str = "theme";

/// Fraction of a section that must be on screen before it mounts.
pub const DEFAULT_THRESHOLD: f64 = 0.1;
pub const DEFAULT_ROOT_MARGIN: &str = "0px";
pub const PLACEHOLDER_HEIGHT: &str = "320px";

pub const TAGLINE_INTERVAL_MS: u32 = 2600;
