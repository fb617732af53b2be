//! Resolve JMS serializer type descriptors into structured property-type
//! metadata.
//!
//! Serialization metadata in the PHP ecosystem encodes property types as
//! compact descriptor strings, e.g. `@Serializer\Type("array<int, Foo>")`
//! or `@Serializer\Type("DateTime<'Y-m-d', 'UTC'>")`.  This crate turns
//! such a descriptor into a [`PropertyType`] value that metadata tooling
//! can match on to drive (de)serialization decisions.
//!
//! Resolution happens in two steps:
//!
//! 1. The [`token`] module parses the descriptor grammar into an untyped
//!    token tree (name + ordered parameters, recursively).
//! 2. The [`resolver`] module walks that tree and applies the semantic
//!    rules: primitive vs. class vs. container vs. temporal, nullability,
//!    container arity, and temporal parameter defaults.
//!
//! ```
//! use jmstype::{PropertyType, TypeResolver};
//!
//! let resolver = TypeResolver::default();
//!
//! let resolved = resolver.resolve("array<string>").unwrap();
//! match resolved {
//!     PropertyType::Iterable { element_type, keyed, .. } => {
//!         assert!(!keyed);
//!         assert!(!element_type.nullable());
//!     }
//!     other => panic!("expected an iterable, got {other:?}"),
//! }
//! ```
//!
//! The resolver does not verify that a named class exists, performs no
//! I/O, and caches nothing; each [`TypeResolver::resolve`] call is an
//! independent pure computation, so a single resolver can be shared
//! across threads without coordination.

pub mod error;
pub mod resolver;
pub mod token;
pub mod types;

pub use error::{ParseError, TypeError};
pub use resolver::TypeResolver;
pub use token::{TokenParam, TypeToken};
pub use types::{DateTimeOptions, PropertyType};
