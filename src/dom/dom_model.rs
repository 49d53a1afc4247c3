use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque handle to an element owned by a `DocumentTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Visual marker the picker paints on elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    #[default]
    None,
    Red,
    Green,
    Blue,
}

impl Highlight {
    /// CSS outline the host paints for this highlight; empty when cleared.
    pub fn outline(&self) -> &'static str {
        match self {
            Highlight::None => "",
            Highlight::Red => "2px dotted red",
            Highlight::Green => "2px dotted green",
            Highlight::Blue => "2px dotted blue",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Highlight::None)
    }
}

/// Serialized element tree, as captured from a rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomSnapshot {
    pub tag: String,

    /// Attribute order is significant for structural matching.
    #[serde(default)]
    pub attributes: Vec<Attribute>,

    #[serde(default)]
    pub children: Vec<DomSnapshot>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default = "default_true")]
    pub activatable: bool,
}

fn default_true() -> bool {
    true
}

impl DomSnapshot {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: vec![],
            children: vec![],
            value: None,
            activatable: true,
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    pub fn child(mut self, child: DomSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = DomSnapshot>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn inert(mut self) -> Self {
        self.activatable = false;
        self
    }
}

/// Addresses an element in a document: `#id` or a `/`-separated child
/// index path from the document root (`/` alone is the root).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ElementLocator {
    Id(String),
    Path(Vec<usize>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid element locator '{0}'")]
pub struct LocatorParseError(pub String);

impl FromStr for ElementLocator {
    type Err = LocatorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(id) = s.strip_prefix('#') {
            if id.is_empty() {
                return Err(LocatorParseError(s.to_string()));
            }
            return Ok(ElementLocator::Id(id.to_string()));
        }

        let path = s
            .split('/')
            .filter(|seg| !seg.is_empty())
            .map(|seg| seg.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| LocatorParseError(s.to_string()))?;
        Ok(ElementLocator::Path(path))
    }
}

impl TryFrom<String> for ElementLocator {
    type Error = LocatorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ElementLocator> for String {
    fn from(locator: ElementLocator) -> Self {
        locator.to_string()
    }
}

impl fmt::Display for ElementLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementLocator::Id(id) => write!(f, "#{}", id),
            ElementLocator::Path(path) => {
                let segs: Vec<String> = path.iter().map(|i| i.to_string()).collect();
                write!(f, "/{}", segs.join("/"))
            }
        }
    }
}
