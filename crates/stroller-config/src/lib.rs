//! Site navigation configuration for the Stroller blog.
//!
//! Turns the loosely-typed configuration object handed to the site
//! generator into a typed [`SiteConfig`], or reports where it breaks the
//! schema:
//!
//! ```
//! use serde_json::json;
//! use stroller_config::validate;
//!
//! let config = validate(&json!({
//!     "title": "stroller",
//!     "description": "blog",
//!     "themeConfig": {
//!         "nav": [{ "text": "Blog", "link": "/articles/intro" }],
//!         "sidebar": {
//!             "/articles/": [{
//!                 "text": "Docs",
//!                 "items": [{ "text": "Intro", "link": "/articles/intro" }]
//!             }]
//!         }
//!     }
//! }))
//! .unwrap();
//!
//! assert_eq!(config.theme.sidebar()["/articles/"][0].items[0].link, "/articles/intro");
//! ```
//!
//! ## Schema
//!
//! - `title`, `description`: required, non-empty
//! - `themeConfig`: required mapping
//!   - `siteTitle`, `logo`: optional strings
//!   - `nav`: optional sequence of `{ text, link }`
//!   - `sidebar`: optional mapping from route prefix (`/…/`) to groups
//!     `{ text, items, collapsible?, collapsed? }`; `items` is a non-empty
//!     sequence of `{ text, link }` with unique links
//!
//! Unknown keys are ignored. [`validate`] stops at the first violation,
//! [`validate_all`] collects all of them.
//!
//! Files can be loaded with [`load_file`]; see [`source`] for the supported
//! formats and discovery rules.

mod error;
mod path;
mod schema;
pub mod source;
mod validate;

pub use error::{ValidationError, ValidationErrors};
pub use path::KeyPath;
pub use schema::{NavItem, Sidebar, SidebarGroup, SidebarItem, SiteConfig, ThemeConfig};
pub use source::{ConfigFormat, LoadError, discover, load_file, load_file_all};
pub use validate::{validate, validate_all};
