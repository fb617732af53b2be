//! Type resolution: token tree → [`PropertyType`].
//!
//! The resolver walks the token tree produced by [`crate::token`] and
//! applies the semantic rules the tree itself does not carry: which names
//! are primitives, which are temporal classes, which name collections,
//! how many parameters a container may take, and how temporal parameter
//! defaults are filled in.
//!
//! Resolution is a pure function over the input: the resolver holds only
//! its recognized-name configuration, never per-call state, so a single
//! instance can be shared freely across threads.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::error::TypeError;
use crate::token::{self, TokenParam, TypeToken};
use crate::types::{DateTimeOptions, PropertyType};

/// The built-in bare container keyword.
const TYPE_ARRAY: &str = "array";
/// Short alias for the Doctrine `ArrayCollection` class.
const TYPE_ARRAY_COLLECTION: &str = "ArrayCollection";
/// The abstract temporal marker; never instantiated, substituted by
/// [`DEFAULT_DATETIME_CLASS`] during resolution.
const TYPE_DATETIME_INTERFACE: &str = "DateTimeInterface";
/// Concrete class substituted when a descriptor names the temporal
/// interface marker.
const DEFAULT_DATETIME_CLASS: &str = "DateTime";

const ARRAY_COLLECTION_CLASS: &str = "Doctrine\\Common\\Collections\\ArrayCollection";
const COLLECTION_INTERFACE: &str = "Doctrine\\Common\\Collections\\Collection";

/// Scalar type names recognized by default (the JMS primitive set,
/// including the long-form aliases).
pub const PRIMITIVE_TYPES: &[&str] = &[
    "string", "int", "integer", "float", "double", "bool", "boolean",
];

/// Temporal class names recognized by default.
pub const DATETIME_CLASSES: &[&str] = &["DateTime", "DateTimeImmutable"];

/// Resolves raw type descriptors into [`PropertyType`] values.
///
/// The recognized name sets are configuration, not closed enumerations:
/// ecosystems extend the primitive set, register their own temporal
/// classes, and ship their own collection types, so each set can be
/// extended through the `with_*` builders.  The collection registry is an
/// explicit mapping populated up front — there is no runtime capability
/// probing of unknown class names.
///
/// ```
/// use jmstype::{PropertyType, TypeResolver};
///
/// let resolver = TypeResolver::default();
/// let resolved = resolver.resolve("array<int, App\\User>").unwrap();
/// assert!(matches!(resolved, PropertyType::Iterable { keyed: true, .. }));
/// ```
#[derive(Debug, Clone)]
pub struct TypeResolver {
    primitives: HashSet<String>,
    datetime_classes: HashSet<String>,
    /// Short alias → canonical collection class name.
    collection_aliases: HashMap<String, String>,
    /// Class names accepted as collection-capable under their own name.
    collection_classes: HashSet<String>,
}

impl Default for TypeResolver {
    fn default() -> Self {
        TypeResolver {
            primitives: PRIMITIVE_TYPES.iter().map(|s| s.to_string()).collect(),
            datetime_classes: DATETIME_CLASSES.iter().map(|s| s.to_string()).collect(),
            collection_aliases: HashMap::from([(
                TYPE_ARRAY_COLLECTION.to_string(),
                ARRAY_COLLECTION_CLASS.to_string(),
            )]),
            collection_classes: HashSet::from([
                ARRAY_COLLECTION_CLASS.to_string(),
                COLLECTION_INTERFACE.to_string(),
            ]),
        }
    }
}

impl TypeResolver {
    /// Recognize an additional scalar type name.
    pub fn with_primitive(mut self, name: impl Into<String>) -> Self {
        self.primitives.insert(name.into());
        self
    }

    /// Recognize an additional temporal class name.
    pub fn with_datetime_class(mut self, name: impl Into<String>) -> Self {
        self.datetime_classes.insert(name.into());
        self
    }

    /// Register a short alias for a collection class
    /// (e.g. `ArrayCollection` → its fully-qualified name).
    pub fn with_collection_alias(
        mut self,
        alias: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Self {
        self.collection_aliases.insert(alias.into(), canonical.into());
        self
    }

    /// Register a class name accepted as collection-capable as-is.
    pub fn with_collection_class(mut self, name: impl Into<String>) -> Self {
        self.collection_classes.insert(name.into());
        self
    }

    /// Resolve a raw descriptor into a [`PropertyType`].
    ///
    /// An empty descriptor resolves to `Unknown(nullable: true)` without
    /// tokenizing.  Anything else is tokenized and resolved recursively;
    /// the result is fully formed and never mutated afterwards.
    pub fn resolve(&self, raw: &str) -> Result<PropertyType, TypeError> {
        if raw.is_empty() {
            return Ok(PropertyType::Unknown { nullable: true });
        }

        trace!(descriptor = raw, "resolving type descriptor");
        let token = token::parse_descriptor(raw)?;
        self.resolve_token(&token, false)
    }

    fn resolve_token(
        &self,
        token: &TypeToken,
        is_sub_type: bool,
    ) -> Result<PropertyType, TypeError> {
        // Descriptors are nullable except inside a container, where the
        // element type is always forced non-nullable.
        let nullable = !is_sub_type;

        if token.params.is_empty() {
            if token.name == TYPE_ARRAY {
                return Ok(PropertyType::Iterable {
                    element_type: Box::new(PropertyType::Unknown { nullable: false }),
                    keyed: false,
                    nullable,
                    collection_class: None,
                });
            }
            if self.primitives.contains(&token.name) {
                return Ok(PropertyType::Primitive {
                    name: token.name.clone(),
                    nullable,
                });
            }
            if self.datetime_classes.contains(&token.name) {
                return Ok(PropertyType::DateTime {
                    class_name: token.name.clone(),
                    nullable,
                    options: None,
                });
            }
            if token.name == TYPE_DATETIME_INTERFACE {
                return Ok(PropertyType::DateTime {
                    class_name: DEFAULT_DATETIME_CLASS.to_string(),
                    nullable,
                    options: None,
                });
            }
            return Ok(PropertyType::Class {
                name: token.name.clone(),
                nullable,
            });
        }

        let collection_class = self.collection_class(&token.name);
        if token.name == TYPE_ARRAY || collection_class.is_some() {
            return match token.params.as_slice() {
                [element] => Ok(PropertyType::Iterable {
                    element_type: Box::new(self.resolve_element(element, token)?),
                    keyed: false,
                    nullable,
                    collection_class,
                }),
                // Two params: key and value.  The key type is checked for
                // shape but discarded; keys are not separately typed in
                // this model.
                [key, value] => {
                    if !matches!(key, TokenParam::Type(_)) {
                        return Err(TypeError::invalid_type(
                            "container key must be a type",
                            token,
                        ));
                    }
                    Ok(PropertyType::Iterable {
                        element_type: Box::new(self.resolve_element(value, token)?),
                        keyed: true,
                        nullable,
                        collection_class,
                    })
                }
                _ => Err(TypeError::invalid_type(
                    "container type cannot have more than 2 parameters",
                    token,
                )),
            };
        }

        if self.datetime_classes.contains(&token.name) || token.name == TYPE_DATETIME_INTERFACE {
            return self.resolve_datetime(token, nullable);
        }

        Err(TypeError::invalid_type("unrecognized parameterized type", token))
    }

    /// Resolve a container's element parameter, which must be a nested
    /// type token.  Element types are resolved as sub-types and therefore
    /// come out non-nullable.
    fn resolve_element(
        &self,
        param: &TokenParam,
        container: &TypeToken,
    ) -> Result<PropertyType, TypeError> {
        match param {
            TokenParam::Type(inner) => self.resolve_token(inner, true),
            _ => Err(TypeError::invalid_type(
                "container element must be a type",
                container,
            )),
        }
    }

    /// Resolve a parameterized temporal descriptor.  Parameters are
    /// positional and all optional: format, timezone, and the alternate
    /// deserialize formats (single string or list).  Empty literals
    /// count as absent.  Parameters past the third are ignored.
    fn resolve_datetime(
        &self,
        token: &TypeToken,
        nullable: bool,
    ) -> Result<PropertyType, TypeError> {
        let format = self.literal_param(token, 0, "format")?;
        let timezone = self.literal_param(token, 1, "timezone")?;

        let deserialize_formats = match token.params.get(2) {
            None | Some(TokenParam::Empty) => Vec::new(),
            Some(TokenParam::Literal(text)) if text.is_empty() => Vec::new(),
            Some(TokenParam::Literal(text)) => vec![text.clone()],
            Some(TokenParam::List(items)) => items.clone(),
            Some(TokenParam::Type(_)) => {
                return Err(TypeError::invalid_type(
                    "datetime deserialize formats must be a string or list",
                    token,
                ));
            }
        };

        // The interface marker is abstract; deserialization needs a
        // concrete class to instantiate.
        let class_name = if token.name == TYPE_DATETIME_INTERFACE {
            DEFAULT_DATETIME_CLASS.to_string()
        } else {
            token.name.clone()
        };

        Ok(PropertyType::DateTime {
            class_name,
            nullable,
            options: Some(DateTimeOptions::new(format, timezone, deserialize_formats)),
        })
    }

    /// Read positional param `index` as an optional string literal,
    /// treating an empty or omitted slot as absent.
    fn literal_param(
        &self,
        token: &TypeToken,
        index: usize,
        what: &str,
    ) -> Result<Option<String>, TypeError> {
        match token.params.get(index) {
            None | Some(TokenParam::Empty) => Ok(None),
            Some(TokenParam::Literal(text)) if text.is_empty() => Ok(None),
            Some(TokenParam::Literal(text)) => Ok(Some(text.clone())),
            Some(_) => Err(TypeError::invalid_type(
                format!("datetime {what} must be a string literal"),
                token,
            )),
        }
    }

    /// Canonical collection class for `name`: the alias registry first,
    /// then the set of classes accepted under their own name.  `None`
    /// means the name is not a container.
    fn collection_class(&self, name: &str) -> Option<String> {
        if let Some(canonical) = self.collection_aliases.get(name) {
            return Some(canonical.clone());
        }
        self.collection_classes
            .contains(name)
            .then(|| name.to_string())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
