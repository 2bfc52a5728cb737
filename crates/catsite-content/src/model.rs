use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The three content types the site lists and displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Cats,
    CatFood,
    CatToys,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Cats, ContentKind::CatFood, ContentKind::CatToys];

    /// Gateway collection route, e.g. "catfood".
    pub fn collection(self) -> &'static str {
        match self {
            ContentKind::Cats => "catid",
            ContentKind::CatFood => "catfood",
            ContentKind::CatToys => "cattoy",
        }
    }

    /// Custom field holding the display name used as the summary title.
    pub fn title_field(self) -> &'static str {
        match self {
            ContentKind::Cats => "cat_name",
            ContentKind::CatFood => "food_name",
            ContentKind::CatToys => "toy_name",
        }
    }

    /// Custom field holding a numeric reference into the `cat-images` collection.
    pub fn image_field(self) -> Option<&'static str> {
        match self {
            ContentKind::Cats => Some("cat_pic"),
            ContentKind::CatFood => None,
            ContentKind::CatToys => Some("toy_pic"),
        }
    }

    /// First path segment of the detail page route on the static site.
    pub fn route_prefix(self) -> &'static str {
        match self {
            ContentKind::Cats => "posts",
            ContentKind::CatFood => "catfood",
            ContentKind::CatToys => "cattoy",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Cats => "cats",
            ContentKind::CatFood => "cat_food",
            ContentKind::CatToys => "cat_toys",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    /// Accepts the kind name or its gateway collection name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cats" | "catid" => Ok(ContentKind::Cats),
            "cat_food" | "catfood" => Ok(ContentKind::CatFood),
            "cat_toys" | "cattoy" => Ok(ContentKind::CatToys),
            other => Err(format!("unknown content kind: {other}")),
        }
    }
}

/// A gateway-assigned id. WordPress sends numbers, but some routes send strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// A raw item from one of the gateway's list endpoints.
///
/// Only the fields the adapter reads are typed. Everything else is kept in
/// `extra` so a point lookup can hand the record back unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CollectionRecord {
    pub id: RecordId,
    /// Publish timestamp (ISO-8601).
    #[serde(default)]
    pub date: String,
    /// Custom fields. WordPress sends `[]` instead of `{}` when a post has none.
    #[serde(default)]
    pub acf: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CollectionRecord {
    /// The routing key: the id, stringified.
    pub fn id_key(&self) -> String {
        self.id.to_string()
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.acf.as_object()?.get(name)
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.field(name)?.as_str()
    }

    /// Stringified image reference from `field`.
    ///
    /// ACF stores an unset image field as `false` or `""`; both mean no reference.
    pub fn image_ref(&self, field: &str) -> Option<String> {
        match self.field(field)? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }
}

/// The list-view projection of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NormalizedSummary {
    pub id: String,
    pub title: String,
    pub date: String,
}

/// An attachment row from the `cat-images` route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(rename = "ID")]
    pub id: RecordId,
    #[serde(default)]
    pub guid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PathParams {
    pub id: String,
}

/// One route for static path pre-generation, shaped `{params: {id}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StaticPath {
    pub params: PathParams,
}

impl StaticPath {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            params: PathParams { id: id.into() },
        }
    }
}

/// The placeholder record older page templates render when an id is unknown.
///
/// Point lookups return `None` for a missing id; this is only for callers that
/// still want a record-shaped stand-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NotFoundRecord {
    pub id: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cat_pic: Option<String>,
}

impl NotFoundRecord {
    pub const ID: &'static str = "id";
    pub const TEXT: &'static str = "Not found";

    pub fn for_kind(kind: ContentKind) -> Self {
        Self {
            id: Self::ID.to_string(),
            date: Self::TEXT.to_string(),
            cat_pic: (kind == ContentKind::Cats).then(|| Self::TEXT.to_string()),
        }
    }
}
