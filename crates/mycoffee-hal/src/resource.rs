//! # HAL Resource Model
//!
//! A parsed `application/hal+json` body.
//!
//! ```text
//! {                                       Resource
//!   "name": "Espresso",          ──────►   properties  { name, price }
//!   "price": 2.5,
//!   "_links": {                  ──────►   links       self    → [Link]
//!     "self": { "href": "/products/1" },               curies  → [Link, Link]
//!     "curies": [ {...}, {...} ]
//!   },
//!   "_embedded": {               ──────►   embedded    reviews → [Resource]
//!     "reviews": [ {...} ]
//!   }
//! }
//! ```
//!
//! A relation may be a single object or an array on the wire. Both are
//! stored as a list, and the original shape is kept so that serializing the
//! resource gives back the same JSON.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::{HalError, HalResult};

const LINKS_KEY: &str = "_links";
const EMBEDDED_KEY: &str = "_embedded";

/// The relation every resource uses for its own canonical URI.
pub const SELF_REL: &str = "self";

// =============================================================================
// Link
// =============================================================================

/// A link object from `_links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Link {
            href: href.into(),
            templated: None,
            title: None,
            name: None,
            media_type: None,
        }
    }

    pub fn is_templated(&self) -> bool {
        self.templated.unwrap_or(false)
    }

    /// Returns the href with a trailing `{...}` template section removed.
    ///
    /// Spring Data REST advertises optional query parameters this way
    /// (`/products{?page,size,sort}`); the bare form is still a valid target.
    ///
    /// ```rust
    /// use mycoffee_hal::resource::Link;
    ///
    /// let link = Link::new("http://h/products{?page,size,sort}");
    /// assert_eq!(link.expand_bare(), "http://h/products");
    /// ```
    pub fn expand_bare(&self) -> &str {
        match self.href.find('{') {
            Some(idx) if self.href.ends_with('}') => &self.href[..idx],
            _ => &self.href,
        }
    }

    /// Last path segment of the href, ignoring any query or template part.
    ///
    /// `/products/42` → `Some("42")`.
    pub fn last_segment(&self) -> Option<&str> {
        let bare = self.expand_bare();
        let path = bare.split(['?', '#']).next().unwrap_or(bare);
        // Drop scheme and authority so a bare host never counts as a segment
        let path = match path.find("://") {
            Some(i) => {
                let rest = &path[i + 3..];
                &rest[rest.find('/')?..]
            }
            None => path,
        };
        path.trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
    }
}

// =============================================================================
// One-or-many relation values
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Relation<T> {
    items: Vec<T>,
    /// Whether the wire form was an array.
    array: bool,
}

impl<T> Relation<T> {
    fn one(item: T) -> Self {
        Relation {
            items: vec![item],
            array: false,
        }
    }

    fn many(items: Vec<T>) -> Self {
        Relation { items, array: true }
    }
}

fn parse_relation<T, F>(rel: &str, value: Value, parse: F) -> HalResult<Relation<T>>
where
    F: Fn(Value) -> HalResult<T>,
{
    match value {
        Value::Array(values) => values
            .into_iter()
            .map(&parse)
            .collect::<HalResult<Vec<_>>>()
            .map(Relation::many),
        Value::Object(_) => parse(value).map(Relation::one),
        Value::Null => Ok(Relation::many(Vec::new())),
        other => Err(HalError::InvalidBody(format!(
            "relation '{}' must be an object or an array, got {}",
            rel,
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Resource
// =============================================================================

/// A parsed HAL document: links, embedded resources, and plain properties.
///
/// Immutable once parsed. Cloning gives an independent copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    links: BTreeMap<String, Relation<Link>>,
    embedded: BTreeMap<String, Relation<Resource>>,
    properties: Map<String, Value>,
}

impl Resource {
    /// Parses a HAL JSON value.
    ///
    /// The top level must be an object. `_links` and `_embedded`, when
    /// present, must be objects keyed by relation name.
    pub fn from_value(value: Value) -> HalResult<Self> {
        let Value::Object(mut object) = value else {
            return Err(HalError::InvalidBody(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        };

        let mut resource = Resource::default();

        if let Some(links) = object.remove(LINKS_KEY) {
            for (rel, value) in expect_object(LINKS_KEY, links)? {
                let relation = parse_relation(&rel, value, |v| {
                    serde_json::from_value::<Link>(v).map_err(|e| {
                        HalError::InvalidBody(format!("bad link '{}': {}", rel, e))
                    })
                })?;
                resource.links.insert(rel, relation);
            }
        }

        if let Some(embedded) = object.remove(EMBEDDED_KEY) {
            for (rel, value) in expect_object(EMBEDDED_KEY, embedded)? {
                let relation = parse_relation(&rel, value, Resource::from_value)?;
                resource.embedded.insert(rel, relation);
            }
        }

        resource.properties = object;
        Ok(resource)
    }

    /// Parses HAL JSON text.
    pub fn from_json(text: &str) -> HalResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Serializes back to the HAL JSON shape.
    pub fn to_value(&self) -> Value {
        let mut object = self.properties.clone();

        if !self.links.is_empty() {
            let links = self
                .links
                .iter()
                .map(|(rel, relation)| {
                    let value = if relation.array {
                        Value::Array(relation.items.iter().map(link_value).collect())
                    } else {
                        relation.items.first().map(link_value).unwrap_or(Value::Null)
                    };
                    (rel.clone(), value)
                })
                .collect();
            object.insert(LINKS_KEY.to_string(), Value::Object(links));
        }

        if !self.embedded.is_empty() {
            let embedded = self
                .embedded
                .iter()
                .map(|(rel, relation)| {
                    let value = if relation.array {
                        Value::Array(relation.items.iter().map(Resource::to_value).collect())
                    } else {
                        relation
                            .items
                            .first()
                            .map(Resource::to_value)
                            .unwrap_or(Value::Null)
                    };
                    (rel.clone(), value)
                })
                .collect();
            object.insert(EMBEDDED_KEY.to_string(), Value::Object(embedded));
        }

        Value::Object(object)
    }

    // =========================================================================
    // Links
    // =========================================================================

    /// First link for `rel`, if any.
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.get(rel).and_then(|r| r.items.first())
    }

    /// Every link for `rel` (empty when absent).
    pub fn links(&self, rel: &str) -> &[Link] {
        self.links.get(rel).map(|r| r.items.as_slice()).unwrap_or(&[])
    }

    /// Relation names present in `_links`.
    pub fn link_rels(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    pub fn self_link(&self) -> Option<&Link> {
        self.link(SELF_REL)
    }

    /// `href` of the self link.
    pub fn self_href(&self) -> Option<&str> {
        self.self_link().map(|l| l.href.as_str())
    }

    /// Like [`link`](Self::link) but fails with [`HalError::MissingLink`].
    pub fn require_link(&self, rel: &str) -> HalResult<&Link> {
        self.link(rel).ok_or_else(|| HalError::MissingLink {
            rel: rel.to_string(),
        })
    }

    // =========================================================================
    // Embedded
    // =========================================================================

    /// Embedded resources under `rel`; an absent key yields an empty slice.
    pub fn embedded_array(&self, rel: &str) -> &[Resource] {
        self.embedded
            .get(rel)
            .map(|r| r.items.as_slice())
            .unwrap_or(&[])
    }

    /// First embedded resource under `rel`.
    pub fn embedded(&self, rel: &str) -> Option<&Resource> {
        self.embedded_array(rel).first()
    }

    pub fn embedded_rels(&self) -> impl Iterator<Item = &str> {
        self.embedded.keys().map(String::as_str)
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Top-level members other than `_links` and `_embedded`.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Builder used by tests and by callers assembling resources by hand.
    pub fn with_link(mut self, rel: impl Into<String>, link: Link) -> Self {
        self.links.insert(rel.into(), Relation::one(link));
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }
}

fn expect_object(key: &str, value: Value) -> HalResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(HalError::InvalidBody(format!(
            "'{}' must be an object, got {}",
            key,
            json_kind(&other)
        ))),
    }
}

fn link_value(link: &Link) -> Value {
    serde_json::to_value(link).unwrap_or(Value::Null)
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Resource::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Value> for Resource {
    type Error = HalError;

    fn try_from(value: Value) -> HalResult<Self> {
        Resource::from_value(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
