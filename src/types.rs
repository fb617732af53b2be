//! The property-type model produced by descriptor resolution.
//!
//! This module contains the "model" structs and enums that represent a
//! resolved property type: scalar, class, container, or temporal, each
//! with explicit nullability.  Values are immutable once constructed and
//! owned by the caller; the resolver never holds on to them.

use serde::{Deserialize, Serialize};

/// Formatting metadata attached to a resolved temporal type.
///
/// Built from the optional positional parameters of a temporal descriptor
/// such as `DateTime<'Y-m-d H:i:s', 'UTC', 'Y-m-d'>`:
///   - `format`: the serialization format string.
///   - `timezone`: the timezone identifier.
///   - `deserialize_formats`: ordered alternate formats tried on
///     deserialization.  The primary deserialize format is always the
///     first element (see [`DateTimeOptions::primary_deserialize_format`]),
///     so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeOptions {
    /// Serialization format (e.g. `"Y-m-d H:i:s"`), if specified.
    pub format: Option<String>,
    /// Timezone identifier (e.g. `"UTC"`), if specified.
    pub timezone: Option<String>,
    /// Ordered alternate formats to try when deserializing.  May be empty.
    pub deserialize_formats: Vec<String>,
}

impl DateTimeOptions {
    pub fn new(
        format: Option<String>,
        timezone: Option<String>,
        deserialize_formats: Vec<String>,
    ) -> Self {
        DateTimeOptions {
            format,
            timezone,
            deserialize_formats,
        }
    }

    /// The format tried first on deserialization: the first entry of
    /// [`deserialize_formats`](Self::deserialize_formats), or `None` when
    /// no alternate formats were given.
    pub fn primary_deserialize_format(&self) -> Option<&str> {
        self.deserialize_formats.first().map(String::as_str)
    }
}

/// A fully resolved property type.
///
/// This is a closed set of shapes; consumers are expected to match
/// exhaustively so that adding a shape forces every consumption site to
/// be revisited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    /// The descriptor was empty, or a bare `array` left its element type
    /// unspecified.  Always a leaf.
    Unknown { nullable: bool },

    /// A recognized scalar type (e.g. `string`, `int`, `bool`).
    Primitive { name: String, nullable: bool },

    /// Any type name not recognized as primitive, container, or temporal.
    /// The name is kept opaquely; whether such a class exists is not
    /// this crate's concern.
    Class { name: String, nullable: bool },

    /// A container of elements: a linear sequence (`keyed: false`, one
    /// type parameter) or a key→value mapping (`keyed: true`, two type
    /// parameters of which only the value type is retained).
    Iterable {
        /// The element (value) type.  Never nullable: nullability is a
        /// property of the container, not of what it holds.
        element_type: Box<PropertyType>,
        /// Whether the descriptor declared a key type (`array<int, Foo>`).
        keyed: bool,
        nullable: bool,
        /// `None` for the built-in bare `array` shape, or the canonical
        /// class name when the descriptor named a collection class.
        collection_class: Option<String>,
    },

    /// A temporal type (e.g. `DateTime`, `DateTimeImmutable`).
    DateTime {
        /// The concrete class name.  The abstract `DateTimeInterface`
        /// marker is substituted before this value is built, so this is
        /// always instantiable.
        class_name: String,
        nullable: bool,
        /// `None` when the descriptor carried no parameters.
        options: Option<DateTimeOptions>,
    },
}

impl PropertyType {
    /// Whether this type accepts null.  Every shape carries explicit
    /// nullability; there is no "unspecified" state.
    pub fn nullable(&self) -> bool {
        match self {
            PropertyType::Unknown { nullable }
            | PropertyType::Primitive { nullable, .. }
            | PropertyType::Class { nullable, .. }
            | PropertyType::Iterable { nullable, .. }
            | PropertyType::DateTime { nullable, .. } => *nullable,
        }
    }
}
