//! Schema validation of loosely-typed site configuration.
//!
//! The input is a [`serde_json::Value`] as produced by whatever loaded the
//! configuration. Checks run in a fixed order:
//!
//! 1. top-level `title`, `description` and `themeConfig`
//! 2. `themeConfig.nav` entries
//! 3. `themeConfig.sidebar` route-prefix keys
//! 4. sidebar groups and their items
//! 5. link uniqueness within each group
//!
//! Each pass runs over the whole tree before the next one starts, so the
//! first collected error is also the first violation in check order.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{ValidationError, ValidationErrors};
use crate::path::KeyPath;
use crate::schema::{NavItem, Sidebar, SidebarGroup, SidebarItem, SiteConfig, ThemeConfig};

/// Route prefixes must start and end with `/`.
static SIDEBAR_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/.*/$").unwrap());

const SITE_KEYS: &[&str] = &["title", "description", "themeConfig"];
const THEME_KEYS: &[&str] = &["siteTitle", "logo", "nav", "sidebar"];
const LINK_KEYS: &[&str] = &["text", "link"];
const GROUP_KEYS: &[&str] = &["text", "items", "collapsible", "collapsed"];

/// Validate a configuration value, stopping at the first violation.
///
/// # Errors
///
/// Returns the first [`ValidationError`] in check order.
pub fn validate(config: &Value) -> Result<SiteConfig, ValidationError> {
    validate_all(config).map_err(ValidationErrors::into_first)
}

/// Validate a configuration value, collecting every violation.
///
/// # Errors
///
/// Returns all violations in check order.
pub fn validate_all(config: &Value) -> Result<SiteConfig, ValidationErrors> {
    let mut checker = Checker::default();
    let site = checker.site(config);
    match ValidationErrors::from_vec(checker.errors) {
        Some(errors) => {
            tracing::debug!(count = errors.len(), "Site configuration rejected");
            Err(errors)
        }
        None => {
            tracing::debug!(
                nav = site.theme.nav().len(),
                sidebar = site.theme.sidebar().len(),
                "Site configuration validated"
            );
            Ok(site)
        }
    }
}

/// Sidebar entry that passed the key check, pending group validation.
struct PendingEntry<'a> {
    prefix: &'a str,
    path: KeyPath,
    value: &'a Value,
}

/// Accumulates violations while building a best-effort [`SiteConfig`].
///
/// Invalid values are replaced by defaults so later passes can keep going;
/// the built config is only returned when no violation was recorded.
#[derive(Default)]
struct Checker {
    errors: Vec<ValidationError>,
}

impl Checker {
    fn site(&mut self, config: &Value) -> SiteConfig {
        let root = KeyPath::root();
        let Some(object) = self.mapping(config, &root) else {
            return empty_site();
        };
        note_unknown_keys(object, SITE_KEYS, &root);

        // Pass 1: top-level keys.
        let title = self.required_text(object, "title", &root);
        let description = self.required_text(object, "description", &root);
        let theme_path = root.key("themeConfig");
        let theme_object = self
            .required(object, "themeConfig", &root)
            .and_then(|value| self.mapping(value, &theme_path));

        let Some(theme_object) = theme_object else {
            return SiteConfig {
                title,
                description,
                theme: ThemeConfig::default(),
            };
        };
        note_unknown_keys(theme_object, THEME_KEYS, &theme_path);
        let site_title = self.optional_text(theme_object, "siteTitle", &theme_path);
        let logo = self.optional_text(theme_object, "logo", &theme_path);

        // Pass 2: header navigation.
        let nav = self.nav(theme_object, &theme_path);

        // Pass 3: sidebar keys.
        let pending = self.sidebar_keys(theme_object, &theme_path);

        // Pass 4: sidebar groups.
        let sidebar: Option<Sidebar> = pending.as_ref().map(|entries| {
            entries
                .iter()
                .map(|entry| (entry.prefix.to_owned(), self.groups(entry.value, &entry.path)))
                .collect()
        });

        // Pass 5: link uniqueness.
        if let (Some(entries), Some(sidebar)) = (&pending, &sidebar) {
            for entry in entries {
                if let Some(groups) = sidebar.get(entry.prefix) {
                    self.unique_links(groups, &entry.path);
                }
            }
        }

        SiteConfig {
            title,
            description,
            theme: ThemeConfig {
                site_title,
                logo,
                nav,
                sidebar,
            },
        }
    }

    /// Header links, or `None` when `nav` is absent or not a sequence.
    fn nav(&mut self, theme: &Map<String, Value>, theme_path: &KeyPath) -> Option<Vec<NavItem>> {
        let path = theme_path.key("nav");
        let entries = self.sequence(theme.get("nav")?, &path)?;

        let items = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let (text, link) = self.link_entry(entry, &path.index(i));
                NavItem { text, link }
            })
            .collect();
        Some(items)
    }

    /// Entries with well-formed keys, or `None` when `sidebar` is absent or not a mapping.
    fn sidebar_keys<'a>(
        &mut self,
        theme: &'a Map<String, Value>,
        theme_path: &KeyPath,
    ) -> Option<Vec<PendingEntry<'a>>> {
        let path = theme_path.key("sidebar");
        let object = self.mapping(theme.get("sidebar")?, &path)?;

        let mut pending = Vec::with_capacity(object.len());
        for (prefix, value) in object {
            if SIDEBAR_KEY_RE.is_match(prefix) {
                pending.push(PendingEntry {
                    prefix,
                    path: path.key(prefix),
                    value,
                });
            } else {
                self.shape(
                    path.clone(),
                    format!("route prefix {prefix:?} must start and end with '/'"),
                );
            }
        }
        Some(pending)
    }

    fn groups(&mut self, value: &Value, path: &KeyPath) -> Vec<SidebarGroup> {
        let Some(entries) = self.sequence(value, path) else {
            return Vec::new();
        };
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| self.group(entry, &path.index(i)))
            .collect()
    }

    fn group(&mut self, value: &Value, path: &KeyPath) -> SidebarGroup {
        let Some(object) = self.mapping(value, path) else {
            return SidebarGroup::default();
        };
        note_unknown_keys(object, GROUP_KEYS, path);

        let text = self.required_text(object, "text", path);
        let items_path = path.key("items");
        let items = match self
            .required(object, "items", path)
            .and_then(|value| self.sequence(value, &items_path))
        {
            Some([]) => {
                self.shape(items_path, "a sidebar group needs at least one item");
                Vec::new()
            }
            Some(entries) => entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let (text, link) = self.link_entry(entry, &items_path.index(i));
                    SidebarItem { text, link }
                })
                .collect(),
            None => Vec::new(),
        };
        let collapsible = self.optional_flag(object, "collapsible", path);
        let collapsed = self.optional_flag(object, "collapsed", path);

        SidebarGroup {
            text,
            items,
            collapsible,
            collapsed,
        }
    }

    fn unique_links(&mut self, groups: &[SidebarGroup], prefix_path: &KeyPath) {
        for (g, group) in groups.iter().enumerate() {
            let mut seen = HashSet::with_capacity(group.items.len());
            for (i, item) in group.items.iter().enumerate() {
                // Empty links were already reported in pass 4.
                if item.link.is_empty() || seen.insert(item.link.as_str()) {
                    continue;
                }
                self.errors.push(ValidationError::DuplicateLink {
                    path: prefix_path.index(g).key("items").index(i).key("link"),
                    link: item.link.clone(),
                });
            }
        }
    }

    /// Validate a `{ text, link }` mapping.
    fn link_entry(&mut self, value: &Value, path: &KeyPath) -> (String, String) {
        let Some(object) = self.mapping(value, path) else {
            return (String::new(), String::new());
        };
        note_unknown_keys(object, LINK_KEYS, path);
        let text = self.required_text(object, "text", path);
        let link = self.required_text(object, "link", path);
        (text, link)
    }

    fn mapping<'a>(&mut self, value: &'a Value, path: &KeyPath) -> Option<&'a Map<String, Value>> {
        if let Value::Object(object) = value {
            Some(object)
        } else {
            self.shape(
                path.clone(),
                format!("expected a mapping, found {}", kind(value)),
            );
            None
        }
    }

    fn sequence<'a>(&mut self, value: &'a Value, path: &KeyPath) -> Option<&'a [Value]> {
        if let Value::Array(entries) = value {
            Some(entries)
        } else {
            self.shape(
                path.clone(),
                format!("expected a sequence, found {}", kind(value)),
            );
            None
        }
    }

    fn required<'a>(
        &mut self,
        object: &'a Map<String, Value>,
        key: &str,
        parent: &KeyPath,
    ) -> Option<&'a Value> {
        let value = object.get(key);
        if value.is_none() {
            self.errors.push(ValidationError::MissingField {
                path: parent.key(key),
            });
        }
        value
    }

    /// Required non-empty string. Returns an empty string after recording a violation.
    fn required_text(&mut self, object: &Map<String, Value>, key: &str, parent: &KeyPath) -> String {
        let Some(value) = self.required(object, key, parent) else {
            return String::new();
        };
        let path = parent.key(key);
        match value {
            Value::String(text) if text.is_empty() => {
                self.shape(path, "must not be empty");
                String::new()
            }
            Value::String(text) => text.clone(),
            other => {
                self.shape(path, format!("expected a string, found {}", kind(other)));
                String::new()
            }
        }
    }

    fn optional_text(
        &mut self,
        object: &Map<String, Value>,
        key: &str,
        parent: &KeyPath,
    ) -> Option<String> {
        match object.get(key)? {
            Value::String(text) => Some(text.clone()),
            other => {
                self.shape(
                    parent.key(key),
                    format!("expected a string, found {}", kind(other)),
                );
                None
            }
        }
    }

    fn optional_flag(
        &mut self,
        object: &Map<String, Value>,
        key: &str,
        parent: &KeyPath,
    ) -> Option<bool> {
        match object.get(key)? {
            Value::Bool(flag) => Some(*flag),
            other => {
                self.shape(
                    parent.key(key),
                    format!("expected a boolean, found {}", kind(other)),
                );
                None
            }
        }
    }

    fn shape(&mut self, path: KeyPath, message: impl Into<String>) {
        self.errors.push(ValidationError::Shape {
            path,
            message: message.into(),
        });
    }
}

fn empty_site() -> SiteConfig {
    SiteConfig {
        title: String::new(),
        description: String::new(),
        theme: ThemeConfig::default(),
    }
}

/// Log keys the schema does not know about. The host generator accepts many more.
fn note_unknown_keys(object: &Map<String, Value>, known: &[&str], path: &KeyPath) {
    for key in object.keys() {
        if !known.contains(&key.as_str()) {
            tracing::debug!(path = %path.key(key), "Ignoring unknown configuration key");
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
