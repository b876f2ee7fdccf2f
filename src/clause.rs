//! Clauses: the units an agreement is made of.
//!
//! Each normative variant carries its [`Sentence`] explicitly; use
//! [`Clause::sentence`] to reach it without matching on the variant.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::circumstance::CircumstanceMap;
use crate::sentence::{Allowance, Sentence};

/// A sentence that is allowed or forbidden.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub allowance: Allowance,
    pub sentence: Sentence,
}

impl Permission {
    pub fn new(allowance: Allowance, sentence: Sentence) -> Self {
        Self {
            allowance,
            sentence,
        }
    }

    pub fn allow(sentence: Sentence) -> Self {
        Self::new(Allowance::Allow, sentence)
    }

    pub fn forbid(sentence: Sentence) -> Self {
        Self::new(Allowance::Forbid, sentence)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.sentence;
        write!(f, "{} {} {} {}", s.subject, self.allowance, s.action, s.object)
    }
}

/// One decorative or normative unit of an agreement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Clause {
    /// Non-normative prose. Never affects compliance.
    Text(String),
    /// The sentence must hold.
    Requirement(Sentence),
    /// The sentence is granted or forbidden.
    Permission(Permission),
    /// The sentence must hold whenever `circumstances` hold.
    RequirementWithCircumstances {
        sentence: Sentence,
        circumstances: CircumstanceMap,
    },
    /// A permission gated by a condition.
    ///
    /// With `circumstance_allowance = Allow` the permission only applies while
    /// `circumstances` hold ("as long as"). With `Forbid`, performing the
    /// sentence while `circumstances` hold is forbidden whatever the inner
    /// permission says ("unless").
    PermissionWithCircumstances {
        permission: Permission,
        circumstance_allowance: Allowance,
        circumstances: CircumstanceMap,
    },
}

/// Variant tag of a [`Clause`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClauseKind {
    Text,
    Requirement,
    Permission,
    RequirementWithCircumstances,
    PermissionWithCircumstances,
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClauseKind::Text => "text",
            ClauseKind::Requirement => "requirement",
            ClauseKind::Permission => "permission",
            ClauseKind::RequirementWithCircumstances => "conditional requirement",
            ClauseKind::PermissionWithCircumstances => "conditional permission",
        };
        f.write_str(name)
    }
}

impl Clause {
    pub fn text(text: impl Into<String>) -> Self {
        Clause::Text(text.into())
    }

    pub fn requirement(sentence: Sentence) -> Self {
        Clause::Requirement(sentence)
    }

    pub fn permission(allowance: Allowance, sentence: Sentence) -> Self {
        Clause::Permission(Permission::new(allowance, sentence))
    }

    pub fn allow(sentence: Sentence) -> Self {
        Clause::permission(Allowance::Allow, sentence)
    }

    pub fn forbid(sentence: Sentence) -> Self {
        Clause::permission(Allowance::Forbid, sentence)
    }

    pub fn requirement_with(sentence: Sentence, circumstances: CircumstanceMap) -> Self {
        Clause::RequirementWithCircumstances {
            sentence,
            circumstances,
        }
    }

    pub fn permission_with(
        permission: Permission,
        circumstance_allowance: Allowance,
        circumstances: CircumstanceMap,
    ) -> Self {
        Clause::PermissionWithCircumstances {
            permission,
            circumstance_allowance,
            circumstances,
        }
    }

    /// The sentence this clause is about. `None` only for [`Clause::Text`].
    pub fn sentence(&self) -> Option<&Sentence> {
        match self {
            Clause::Text(_) => None,
            Clause::Requirement(sentence) => Some(sentence),
            Clause::Permission(permission) => Some(&permission.sentence),
            Clause::RequirementWithCircumstances { sentence, .. } => Some(sentence),
            Clause::PermissionWithCircumstances { permission, .. } => Some(&permission.sentence),
        }
    }

    /// Activation condition of the circumstance-qualified variants.
    pub fn circumstances(&self) -> Option<&CircumstanceMap> {
        match self {
            Clause::RequirementWithCircumstances { circumstances, .. }
            | Clause::PermissionWithCircumstances { circumstances, .. } => Some(circumstances),
            Clause::Text(_) | Clause::Requirement(_) | Clause::Permission(_) => None,
        }
    }

    pub fn is_normative(&self) -> bool {
        !matches!(self, Clause::Text(_))
    }

    pub fn kind(&self) -> ClauseKind {
        match self {
            Clause::Text(_) => ClauseKind::Text,
            Clause::Requirement(_) => ClauseKind::Requirement,
            Clause::Permission(_) => ClauseKind::Permission,
            Clause::RequirementWithCircumstances { .. } => ClauseKind::RequirementWithCircumstances,
            Clause::PermissionWithCircumstances { .. } => ClauseKind::PermissionWithCircumstances,
        }
    }
}

fn write_requirement(f: &mut fmt::Formatter<'_>, sentence: &Sentence) -> fmt::Result {
    write!(f, "{} must {} {}", sentence.subject, sentence.action, sentence.object)
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Text(text) => write!(f, "{:?}", text),
            Clause::Requirement(sentence) => write_requirement(f, sentence),
            Clause::Permission(permission) => write!(f, "{}", permission),
            Clause::RequirementWithCircumstances {
                sentence,
                circumstances,
            } => {
                write_requirement(f, sentence)?;
                write!(f, " when {}", circumstances)
            }
            Clause::PermissionWithCircumstances {
                permission,
                circumstance_allowance,
                circumstances,
            } => {
                let gate = match circumstance_allowance {
                    Allowance::Allow => "as long as",
                    Allowance::Forbid => "unless",
                };
                write!(f, "{} {} {}", permission, gate, circumstances)
            }
        }
    }
}
