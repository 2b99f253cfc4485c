use std::rc::Rc;

use log::warn;
use stylist::yew::Global;
use yew::prelude::*;

use crate::config::THEME_KEY;
use crate::consent::storage::PreferenceStorage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn load(storage: &dyn PreferenceStorage) -> Self {
        match storage.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or(Theme::Dark),
            Ok(None) => Theme::Dark,
            Err(e) => {
                warn!("{}", e);
                Theme::Dark
            }
        }
    }

    pub fn save(self, storage: &dyn PreferenceStorage) {
        if let Err(e) = storage.set(THEME_KEY, self.as_str()) {
            warn!("theme not persisted: {}", e);
        }
    }

    /// Palette as CSS custom properties.
    pub fn css(self) -> String {
        let (bg, surface, text, muted, accent, border) = match self {
            Theme::Dark => ("#0f1419", "rgba(26, 32, 40, 0.9)", "#f4f6f8", "#9aa5b1", "#3ecf8e", "rgba(62, 207, 142, 0.15)"),
            Theme::Light => ("#f7f9fb", "#ffffff", "#14202b", "#5b6b7a", "#0f9d66", "rgba(15, 157, 102, 0.2)"),
        };
        format!(
            r#"
            :root {{
                --bg: {bg};
                --surface: {surface};
                --text: {text};
                --muted: {muted};
                --accent: {accent};
                --border: {border};
            }}
            body {{
                background: var(--bg);
                color: var(--text);
                transition: background 0.3s ease, color 0.3s ease;
            }}
            "#,
        )
    }
}

/// Theme handle shared through context.
#[derive(Clone, PartialEq)]
pub struct ThemeContext {
    pub theme: Theme,
    pub toggle: Callback<()>,
}

#[derive(Properties)]
pub struct ThemeProviderProps {
    pub storage: Rc<dyn PreferenceStorage>,
    #[prop_or_default]
    pub children: Children,
}

impl PartialEq for ThemeProviderProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage) && self.children == other.children
    }
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let theme = {
        let storage = props.storage.clone();
        use_state(move || Theme::load(storage.as_ref()))
    };

    let toggle = {
        let theme = theme.clone();
        let storage = props.storage.clone();
        Callback::from(move |_: ()| {
            let next = theme.toggled();
            next.save(storage.as_ref());
            theme.set(next);
        })
    };

    let context = ThemeContext {
        theme: *theme,
        toggle,
    };

    html! {
        <ContextProvider<ThemeContext> context={context}>
            <Global css={theme.css()} />
            { for props.children.iter() }
        </ContextProvider<ThemeContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consent::storage::MemoryStorage;

    #[test]
    fn theme_survives_a_reload() {
        let storage = MemoryStorage::new();
        assert_eq!(Theme::load(&storage), Theme::Dark);
        Theme::Light.save(&storage);
        assert_eq!(Theme::load(&storage), Theme::Light);
    }

    #[test]
    fn unknown_values_fall_back_to_dark() {
        let storage = MemoryStorage::new();
        storage.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(Theme::load(&storage), Theme::Dark);
    }

    #[test]
    fn palette_differs_per_theme() {
        assert!(Theme::Dark.css().contains("--bg: #0f1419"));
        assert!(Theme::Light.css().contains("--bg: #f7f9fb"));
    }
}
