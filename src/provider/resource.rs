//! The closed set of back-office resource types and their dispatch table.
//!
//! Each [`ResourceType`] maps to a single [`ResourceDescriptor`] carrying its
//! collection slug, attachment topology, populate directive, and field
//! schema. The mapping is one exhaustive `match`, so adding a variant
//! without wiring its descriptor is a compile error.

use std::fmt;

/// How a resource owns its image attachments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachmentTopology {
    /// The record owns one direct ordered list of image attachments.
    Flat,
    /// The record owns "detail" sub-items, each with its own image list.
    Nested,
}

/// The kind of a scalar field in a resource schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// A required string.
    Str,
    /// A string that may also be JSON null.
    NullableStr,
    /// A required boolean.
    Bool,
    /// A required integer.
    Int,
    /// A date carried as a string on the wire; parsed to a date value on
    /// read and serialized back as a day string on write.
    Date,
}

/// A named scalar field and its kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// The wire name of the field (e.g., `startDate`).
    pub name: &'static str,
    /// The structural kind the field must conform to.
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Everything the provider needs to know about one resource type.
#[derive(Debug)]
pub struct ResourceDescriptor {
    /// The collection slug used in URLs (e.g., `play-grounds`).
    pub slug: &'static str,
    /// Flat or nested attachment topology.
    pub topology: AttachmentTopology,
    /// The populate query parameter expanding attachments on `get_one`.
    pub populate: (&'static str, &'static str),
    /// Scalar fields of the record itself.
    pub fields: &'static [FieldSpec],
    /// Scalar fields of each detail sub-item (empty for flat resources).
    pub detail_fields: &'static [FieldSpec],
}

static NEWS: ResourceDescriptor = ResourceDescriptor {
    slug: "news",
    topology: AttachmentTopology::Flat,
    populate: ("populate", "images"),
    fields: &[
        FieldSpec::new("title", FieldKind::Str),
        FieldSpec::new("content", FieldKind::Str),
        FieldSpec::new("startDate", FieldKind::Date),
        FieldSpec::new("endDate", FieldKind::Date),
        FieldSpec::new("isTop", FieldKind::Bool),
    ],
    detail_fields: &[],
};

static PLAYGROUND: ResourceDescriptor = ResourceDescriptor {
    slug: "play-grounds",
    topology: AttachmentTopology::Flat,
    populate: ("populate", "images"),
    fields: &[
        FieldSpec::new("title", FieldKind::Str),
        FieldSpec::new("content", FieldKind::Str),
    ],
    detail_fields: &[],
};

static MEAL_COMBO: ResourceDescriptor = ResourceDescriptor {
    slug: "food-stories",
    topology: AttachmentTopology::Nested,
    populate: ("populate[details][populate][0]", "images"),
    fields: &[FieldSpec::new("name", FieldKind::Str)],
    detail_fields: &[
        FieldSpec::new("title", FieldKind::Str),
        FieldSpec::new("content", FieldKind::Str),
    ],
};

static ROOM: ResourceDescriptor = ResourceDescriptor {
    slug: "room-collections",
    topology: AttachmentTopology::Flat,
    populate: ("populate", "images"),
    fields: &[
        FieldSpec::new("name", FieldKind::Str),
        FieldSpec::new("intro", FieldKind::Str),
        FieldSpec::new("count", FieldKind::Int),
        FieldSpec::new("maxCount", FieldKind::Int),
        FieldSpec::new("checkinTime", FieldKind::Str),
        FieldSpec::new("checkoutTime", FieldKind::Str),
        FieldSpec::new("holidayJudgment", FieldKind::NullableStr),
        FieldSpec::new("notice", FieldKind::NullableStr),
    ],
    detail_fields: &[],
};

/// One of the four supported record kinds.
///
/// Each variant has its own field schema and attachment topology; see
/// [`ResourceType::descriptor`].
///
/// # Example
///
/// ```rust
/// use cms_admin::{AttachmentTopology, ResourceType};
///
/// assert_eq!(ResourceType::MealCombo.slug(), "food-stories");
/// assert_eq!(
///     ResourceType::MealCombo.descriptor().topology,
///     AttachmentTopology::Nested
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// News posts (flat attachments).
    News,
    /// Playground listings (flat attachments).
    Playground,
    /// Meal combos with per-detail attachments (nested).
    MealCombo,
    /// Room listings (flat attachments).
    Room,
}

impl ResourceType {
    /// All supported resource types.
    pub const ALL: [Self; 4] = [Self::News, Self::Playground, Self::MealCombo, Self::Room];

    /// Returns the descriptor for this resource type.
    #[must_use]
    pub fn descriptor(self) -> &'static ResourceDescriptor {
        match self {
            Self::News => &NEWS,
            Self::Playground => &PLAYGROUND,
            Self::MealCombo => &MEAL_COMBO,
            Self::Room => &ROOM,
        }
    }

    /// Returns the collection slug used in request URLs.
    #[must_use]
    pub fn slug(self) -> &'static str {
        self.descriptor().slug
    }

    /// Returns the attachment topology of this resource type.
    #[must_use]
    pub fn topology(self) -> AttachmentTopology {
        self.descriptor().topology
    }

    /// Looks a resource type up by its collection slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.slug() == slug)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
