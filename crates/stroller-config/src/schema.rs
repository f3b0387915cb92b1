//! Typed site configuration.
//!
//! A [`SiteConfig`] returned by [`crate::validate`] satisfies the schema
//! invariants; values assembled by hand are not checked until they go
//! through the validator again. Serialization produces the external key
//! names (`themeConfig`, `siteTitle`) and omits keys that were absent, so a
//! validated config can be fed back through the validator unchanged.

use std::ops::Index;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Validated site configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    /// Site title (`<title>` and metadata).
    pub title: String,
    /// Meta description used by search engines.
    pub description: String,
    /// Theme configuration (`themeConfig`).
    #[serde(rename = "themeConfig")]
    pub theme: ThemeConfig,
}

impl SiteConfig {
    /// Validate a loosely-typed value into a [`SiteConfig`].
    ///
    /// Same as [`crate::validate`].
    pub fn from_value(value: &serde_json::Value) -> Result<Self, crate::ValidationError> {
        crate::validate(value)
    }

    /// Serialize back into the loosely-typed shape accepted by the validator.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl TryFrom<&serde_json::Value> for SiteConfig {
    type Error = crate::ValidationError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        crate::validate(value)
    }
}

/// Theme configuration: header, navigation and sidebar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Title shown next to the logo. The host falls back to `title`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_title: Option<String>,
    /// Logo image path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Header navigation links, in display order. `None` when the key is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav: Option<Vec<NavItem>>,
    /// Sidebar groups per route prefix. `None` when the key is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<Sidebar>,
}

static EMPTY_SIDEBAR: Sidebar = Sidebar::new();

impl ThemeConfig {
    /// Header navigation links; empty when `nav` is absent.
    #[must_use]
    pub fn nav(&self) -> &[NavItem] {
        self.nav.as_deref().unwrap_or_default()
    }

    /// Sidebar; empty when `sidebar` is absent.
    #[must_use]
    pub fn sidebar(&self) -> &Sidebar {
        self.sidebar.as_ref().unwrap_or(&EMPTY_SIDEBAR)
    }
}

/// Header navigation link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Link label.
    pub text: String,
    /// Site path or absolute URL.
    pub link: String,
}

impl NavItem {
    /// Whether the link points outside the site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.link.starts_with("http://") || self.link.starts_with("https://")
    }
}

/// Named cluster of sidebar links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    /// Group heading.
    pub text: String,
    /// Links in display order. Never empty, links unique.
    pub items: Vec<SidebarItem>,
    /// Whether the group can be folded. Defaults to `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    /// Whether the group starts folded. Defaults to `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

impl SidebarGroup {
    /// Whether the group can be folded. A collapsed group is always collapsible.
    #[must_use]
    pub fn is_collapsible(&self) -> bool {
        self.collapsible.unwrap_or(false) || self.is_collapsed()
    }

    /// Whether the group starts folded.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed.unwrap_or(false)
    }
}

/// Sidebar link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    /// Link label.
    pub text: String,
    /// Site-relative path.
    pub link: String,
}

/// Sidebar groups keyed by route prefix, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sidebar {
    entries: Vec<(String, Vec<SidebarGroup>)>,
}

impl Sidebar {
    /// Create an empty sidebar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set the groups for a prefix.
    ///
    /// An existing prefix keeps its position and its old groups are returned.
    pub fn insert(
        &mut self,
        prefix: impl Into<String>,
        groups: Vec<SidebarGroup>,
    ) -> Option<Vec<SidebarGroup>> {
        let prefix = prefix.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(p, _)| *p == prefix) {
            return Some(std::mem::replace(existing, groups));
        }
        self.entries.push((prefix, groups));
        None
    }

    /// Groups for an exact prefix.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&[SidebarGroup]> {
        self.entries
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, groups)| groups.as_slice())
    }

    /// Iterate prefixes and their groups in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SidebarGroup])> {
        self.entries
            .iter()
            .map(|(prefix, groups)| (prefix.as_str(), groups.as_slice()))
    }

    /// Route prefixes in source order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(prefix, _)| prefix.as_str())
    }

    /// Number of prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no prefixes are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for Sidebar {
    type Output = [SidebarGroup];

    /// # Panics
    ///
    /// Panics if the prefix is not configured.
    fn index(&self, prefix: &str) -> &Self::Output {
        match self.get(prefix) {
            Some(groups) => groups,
            None => panic!("no sidebar entry for prefix {prefix:?}"),
        }
    }
}

impl FromIterator<(String, Vec<SidebarGroup>)> for Sidebar {
    fn from_iter<I: IntoIterator<Item = (String, Vec<SidebarGroup>)>>(iter: I) -> Self {
        let mut sidebar = Self::new();
        for (prefix, groups) in iter {
            sidebar.insert(prefix, groups);
        }
        sidebar
    }
}

impl Serialize for Sidebar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (prefix, groups) in &self.entries {
            map.serialize_entry(prefix, groups)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn item(text: &str, link: &str) -> SidebarItem {
        SidebarItem {
            text: text.to_owned(),
            link: link.to_owned(),
        }
    }

    fn group(text: &str, items: Vec<SidebarItem>) -> SidebarGroup {
        SidebarGroup {
            text: text.to_owned(),
            items,
            ..SidebarGroup::default()
        }
    }

    #[test]
    fn test_nav_item_is_external() {
        let github = NavItem {
            text: "github".to_owned(),
            link: "https://github.com/Stroller12".to_owned(),
        };
        let blog = NavItem {
            text: "Blog".to_owned(),
            link: "/articles/intro".to_owned(),
        };
        assert!(github.is_external());
        assert!(!blog.is_external());
    }

    #[test]
    fn test_group_flags_default_to_false() {
        let g = group("Docs", vec![item("Intro", "/articles/intro")]);
        assert!(!g.is_collapsible());
        assert!(!g.is_collapsed());
    }

    #[test]
    fn test_collapsed_group_is_collapsible() {
        let g = SidebarGroup {
            collapsed: Some(true),
            ..group("Docs", vec![item("Intro", "/articles/intro")])
        };
        assert!(g.is_collapsible());
        assert!(g.is_collapsed());
    }

    #[test]
    fn test_absent_nav_and_sidebar_read_as_empty() {
        let theme = ThemeConfig::default();
        assert!(theme.nav().is_empty());
        assert!(theme.sidebar().is_empty());
        assert!(theme.sidebar().get("/articles/").is_none());
    }

    #[test]
    fn test_hand_built_config_is_checked_on_revalidation() {
        let config = SiteConfig {
            title: "stroller".to_owned(),
            description: "blog".to_owned(),
            theme: ThemeConfig {
                sidebar: Some(
                    std::iter::once(("/articles/".to_owned(), vec![group("Docs", vec![])]))
                        .collect(),
                ),
                ..ThemeConfig::default()
            },
        };

        let err = crate::validate(&config.to_value().unwrap()).unwrap_err();
        assert!(matches!(err, crate::ValidationError::Shape { .. }));
        assert!(err.to_string().contains("at least one item"));
    }

    #[test]
    fn test_sidebar_insert_keeps_position() {
        let mut sidebar = Sidebar::new();
        sidebar.insert("/articles/", vec![group("A", vec![])]);
        sidebar.insert("/notes/", vec![group("N", vec![])]);
        let old = sidebar.insert("/articles/", vec![group("B", vec![])]);

        assert_eq!(old.unwrap()[0].text, "A");
        assert_eq!(
            sidebar.prefixes().collect::<Vec<_>>(),
            vec!["/articles/", "/notes/"]
        );
        assert_eq!(sidebar["/articles/"][0].text, "B");
        assert_eq!(sidebar.len(), 2);
    }

    #[test]
    fn test_sidebar_get_missing() {
        let sidebar = Sidebar::new();
        assert!(sidebar.get("/articles/").is_none());
        assert!(sidebar.is_empty());
    }

    #[test]
    #[should_panic(expected = "no sidebar entry")]
    fn test_sidebar_index_missing_panics() {
        let sidebar = Sidebar::new();
        let _ = &sidebar["/articles/"];
    }

    #[test]
    fn test_serialize_uses_external_names() {
        let config = SiteConfig {
            title: "stroller".to_owned(),
            description: "blog".to_owned(),
            theme: ThemeConfig {
                site_title: Some("stroller".to_owned()),
                logo: None,
                nav: Some(vec![]),
                sidebar: Some(std::iter::once((
                    "/articles/".to_owned(),
                    vec![SidebarGroup {
                        collapsible: Some(true),
                        ..group("Docs", vec![item("Intro", "/articles/intro")])
                    }],
                ))
                .collect()),
            },
        };

        assert_eq!(
            config.to_value().unwrap(),
            json!({
                "title": "stroller",
                "description": "blog",
                "themeConfig": {
                    "siteTitle": "stroller",
                    "nav": [],
                    "sidebar": {
                        "/articles/": [{
                            "text": "Docs",
                            "items": [{ "text": "Intro", "link": "/articles/intro" }],
                            "collapsible": true
                        }]
                    }
                }
            })
        );
    }
}
