use std::collections::BTreeMap;
use tc_ast::{LiteralKind, GENERIC_ANNOTATION, NUMBER_ANNOTATION};

/// What a registered annotation tag stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisteredType {
    /// Scalar type satisfied by exactly one literal kind.
    Primitive { display: String, accepts: LiteralKind },
    /// Valid annotation whose values are checked against an interface.
    Structural,
}

/// Immutable table of known annotation tags.
///
/// Built once before checking and shared by reference; it never changes while
/// a program is being checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    entries: BTreeMap<String, RegisteredType>,
}

impl TypeRegistry {
    /// A registry with no known tags.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register a primitive annotation. Re-registering a tag replaces it.
    pub fn with_primitive(
        mut self,
        tag: impl Into<String>,
        display: impl Into<String>,
        accepts: LiteralKind,
    ) -> Self {
        self.entries.insert(
            tag.into(),
            RegisteredType::Primitive {
                display: display.into(),
                accepts,
            },
        );
        self
    }

    /// Register a structurally checked annotation.
    pub fn with_structural(mut self, tag: impl Into<String>) -> Self {
        self.entries.insert(tag.into(), RegisteredType::Structural);
        self
    }

    pub fn is_known(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    pub fn get(&self, tag: &str) -> Option<&RegisteredType> {
        self.entries.get(tag)
    }

    /// Name shown to users for a primitive tag. Structural and unknown tags have none.
    pub fn display_name(&self, tag: &str) -> Option<&str> {
        match self.entries.get(tag)? {
            RegisteredType::Primitive { display, .. } => Some(display),
            RegisteredType::Structural => None,
        }
    }

    /// Registered entries in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegisteredType)> {
        self.entries.iter().map(|(tag, ty)| (tag.as_str(), ty))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::empty()
            .with_primitive(NUMBER_ANNOTATION, "number", LiteralKind::Numeric)
            .with_structural(GENERIC_ANNOTATION)
    }
}
