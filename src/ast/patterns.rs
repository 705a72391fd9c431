use serde::Serialize;

use crate::Span;

use super::ast::{Expression, Pattern};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ObjectPattern {
    pub properties: Vec<ObjectPatternMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObjectPatternMember {
    Property(ObjectPatternProperty),
    Rest(RestElement),
}

impl ObjectPatternMember {
    pub fn get_span(&self) -> &Span {
        match self {
            ObjectPatternMember::Property(property) => &property.span,
            ObjectPatternMember::Rest(rest) => &rest.span,
        }
    }
}

/// Object Pattern Property
/// `key: value` inside a destructuring pattern. For shorthand properties
/// `value` is the identifier itself, possibly wrapped in an
/// `AssignmentPattern` carrying the default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ObjectPatternProperty {
    pub key: Expression,
    pub value: Pattern,
    pub computed: bool,
    pub shorthand: bool,
    pub span: Span,
}

/// Array Pattern
/// `None` entries are elisions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ArrayPattern {
    pub elements: Vec<Option<Pattern>>,
    pub span: Span,
}

/// `target = default`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct AssignmentPattern {
    pub left: Box<Pattern>,
    pub right: Box<Expression>,
    pub span: Span,
}

/// `...target`, always last in its list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct RestElement {
    pub argument: Box<Pattern>,
    pub span: Span,
}
