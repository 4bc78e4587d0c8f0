//! References to other resources inside create payloads

use serde::Serialize;

/// `{"id": ...}`, `{"name": ...}` or `{"href": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Identity {
    Id { id: String },
    Name { name: String },
    Href { href: String },
}

impl Identity {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id { id: id.into() }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Name { name: name.into() }
    }

    pub fn href(href: impl Into<String>) -> Self {
        Self::Href { href: href.into() }
    }
}
