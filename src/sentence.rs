//! Atomic propositions referenced by clauses.
//!
//! A [`Sentence`] is a subject, an action and an object:
//!
//! ```text
//! Alice  may  access  Resource
//! ╰───╯       ╰────╯  ╰──────╯
//! subject     action  object
//! ```
//!
//! The modal ("may", "shall", "may not") is not part of the sentence; it is
//! carried by the [`Clause`](crate::Clause) that references it.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Blank identifiers are rejected when an agreement is built.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(name.to_string())
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// A party to an agreement ("Alice", "the Tenant").
    Party
);

identifier!(
    /// The verb of a sentence ("access", "pay").
    Action
);

identifier!(
    /// The object of a sentence. Anything an action can be applied to,
    /// including another party.
    Entity
);

/// Which part of a [`Sentence`] a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceField {
    Subject,
    Action,
    Object,
}

impl fmt::Display for SentenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentenceField::Subject => f.write_str("subject"),
            SentenceField::Action => f.write_str("action"),
            SentenceField::Object => f.write_str("object"),
        }
    }
}

/// Subject-action-object proposition. Two sentences are the same proposition
/// iff all three fields match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Sentence {
    pub subject: Party,
    pub action: Action,
    pub object: Entity,
}

impl Sentence {
    pub fn new(
        subject: impl Into<Party>,
        action: impl Into<Action>,
        object: impl Into<Entity>,
    ) -> Self {
        Self {
            subject: subject.into(),
            action: action.into(),
            object: object.into(),
        }
    }

    /// The first blank field, if any.
    pub fn blank_field(&self) -> Option<SentenceField> {
        if self.subject.is_blank() {
            Some(SentenceField::Subject)
        } else if self.action.is_blank() {
            Some(SentenceField::Action)
        } else if self.object.is_blank() {
            Some(SentenceField::Object)
        } else {
            None
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.blank_field().is_none()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.action, self.object)
    }
}

/// Strength of a permission: whether it grants or forbids its sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Allowance {
    #[serde(rename = "Allowed")]
    Allow,
    #[serde(rename = "Forbidden")]
    Forbid,
}

impl Allowance {
    pub fn is_allowed(self) -> bool {
        matches!(self, Allowance::Allow)
    }

    pub fn is_forbidden(self) -> bool {
        matches!(self, Allowance::Forbid)
    }
}

impl fmt::Display for Allowance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Allowance::Allow => f.write_str("may"),
            Allowance::Forbid => f.write_str("may not"),
        }
    }
}
