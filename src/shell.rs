//! Bottom navigation shared by every screen

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Home,
    Catalog,
    Assistant,
    Cart,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Home, Tab::Catalog, Tab::Assistant, Tab::Cart, Tab::Profile];

    pub fn path(self) -> &'static str {
        match self {
            Tab::Home => "/",
            Tab::Catalog => "/catalog",
            Tab::Assistant => "/ai",
            Tab::Cart => "/cart",
            Tab::Profile => "/profile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Catalog => "Catalog",
            Tab::Assistant => "AI Assistant",
            Tab::Cart => "Cart",
            Tab::Profile => "Profile",
        }
    }

    pub fn for_path(path: &str) -> Option<Tab> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Tab::ALL.into_iter().find(|tab| tab.path() == path)
    }
}

/// The floating assistant is hidden on the assistant page itself
pub fn shows_assistant_widget(path: &str) -> bool {
    Tab::for_path(path) != Some(Tab::Assistant)
}

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub tab: Tab,
    pub path: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavBar {
    pub items: Vec<NavItem>,
    pub assistant_widget: bool,
}

pub fn nav_bar(current_path: &str) -> NavBar {
    let current = Tab::for_path(current_path);
    NavBar {
        items: Tab::ALL
            .into_iter()
            .map(|tab| NavItem {
                tab,
                path: tab.path(),
                label: tab.label(),
                active: current == Some(tab),
            })
            .collect(),
        assistant_widget: shows_assistant_widget(current_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_lookup() {
        assert_eq!(Tab::for_path("/"), Some(Tab::Home));
        assert_eq!(Tab::for_path("/cart/"), Some(Tab::Cart));
        assert_eq!(Tab::for_path("/checkout"), None);
    }

    #[test]
    fn test_widget_hidden_on_assistant_page() {
        assert!(!shows_assistant_widget("/ai"));
        assert!(shows_assistant_widget("/catalog"));
        assert!(shows_assistant_widget("/unknown"));
    }

    #[test]
    fn test_single_active_item() {
        let bar = nav_bar("/profile");
        let active: Vec<_> = bar.items.iter().filter(|i| i.active).map(|i| i.tab).collect();
        assert_eq!(active, [Tab::Profile]);
        assert!(bar.assistant_widget);
    }
}
