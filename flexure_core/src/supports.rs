//! # Supports
//!
//! Support conditions and the reactions they provide.
//!
//! A support starts `Unsolved` and moves to `Solved` exactly once, when the
//! equilibrium solution is written back. There is no way back.
//!
//! ## Example
//!
//! ```rust
//! use flexure_core::supports::SupportKind;
//!
//! assert_eq!(SupportKind::from_alias(" Pinned "), Some(SupportKind::Pin));
//! assert_eq!(SupportKind::from_alias("r"), Some(SupportKind::Roller));
//! assert_eq!(SupportKind::from_alias("spring"), None);
//! assert_eq!(SupportKind::Fixed.unknown_count(), 3);
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// SUPPORT KIND
// =============================================================================

/// Support condition at a point on the beam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportKind {
    /// Restrains horizontal and vertical translation, rotation free
    Pin,

    /// Restrains vertical translation only
    Roller,

    /// Restrains both translations and rotation
    Fixed,
}

/// Every spelling accepted for a support type, after trimming and lowercasing.
pub const SUPPORT_ALIASES: &[(&str, SupportKind)] = &[
    ("pin", SupportKind::Pin),
    ("pinned", SupportKind::Pin),
    ("p", SupportKind::Pin),
    ("hinged", SupportKind::Pin),
    ("roller", SupportKind::Roller),
    ("rollers", SupportKind::Roller),
    ("roll", SupportKind::Roller),
    ("r", SupportKind::Roller),
    ("fixed", SupportKind::Fixed),
    ("fix", SupportKind::Fixed),
    ("f", SupportKind::Fixed),
    ("clamped", SupportKind::Fixed),
    ("encastre", SupportKind::Fixed),
    ("built-in", SupportKind::Fixed),
];

impl SupportKind {
    /// All support kinds, in display order
    pub const ALL: [SupportKind; 3] = [SupportKind::Pin, SupportKind::Roller, SupportKind::Fixed];

    /// Normalize a user-supplied support type string.
    ///
    /// Pure lookup in [`SUPPORT_ALIASES`]; anything not listed there is `None`.
    pub fn from_alias(raw: &str) -> Option<SupportKind> {
        let normalized = raw.trim().to_lowercase();
        SUPPORT_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, kind)| *kind)
    }

    /// Reaction components this support provides, in solve order
    pub fn components(&self) -> &'static [ReactionComponent] {
        match self {
            SupportKind::Pin => &[ReactionComponent::Rx, ReactionComponent::Ry],
            SupportKind::Roller => &[ReactionComponent::Ry],
            SupportKind::Fixed => &[
                ReactionComponent::Rx,
                ReactionComponent::Ry,
                ReactionComponent::M,
            ],
        }
    }

    /// Number of unknown reaction components
    pub fn unknown_count(&self) -> usize {
        self.components().len()
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportKind::Pin => "Pin",
            SupportKind::Roller => "Roller",
            SupportKind::Fixed => "Fixed",
        }
    }
}

impl std::fmt::Display for SupportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// REACTIONS
// =============================================================================

/// One scalar reaction component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionComponent {
    /// Horizontal force, positive to the right
    Rx,
    /// Vertical force, positive upward
    Ry,
    /// Moment, positive counter-clockwise
    M,
}

impl ReactionComponent {
    /// Short symbol used in unknown names (`"A.Ry"`)
    pub fn symbol(&self) -> &'static str {
        match self {
            ReactionComponent::Rx => "Rx",
            ReactionComponent::Ry => "Ry",
            ReactionComponent::M => "M",
        }
    }
}

/// Resolved reaction values. Components the support does not provide are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Reaction {
    pub rx: Option<f64>,
    pub ry: Option<f64>,
    pub m: Option<f64>,
}

impl Reaction {
    /// Set one component
    pub fn with(mut self, component: ReactionComponent, value: f64) -> Self {
        match component {
            ReactionComponent::Rx => self.rx = Some(value),
            ReactionComponent::Ry => self.ry = Some(value),
            ReactionComponent::M => self.m = Some(value),
        }
        self
    }

    /// Component value, zero when the support does not provide it
    pub fn get(&self, component: ReactionComponent) -> f64 {
        match component {
            ReactionComponent::Rx => self.rx,
            ReactionComponent::Ry => self.ry,
            ReactionComponent::M => self.m,
        }
        .unwrap_or(0.0)
    }
}

// =============================================================================
// SUPPORT
// =============================================================================

/// Solve state of a support
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "reaction")]
pub enum SupportState {
    #[default]
    Unsolved,
    Solved(Reaction),
}

/// A support located on the beam.
///
/// A serialized `state` is informational only: deserialization always yields
/// an unsolved support, since reactions come from the solver alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SupportRecord")]
pub struct Support {
    position: f64,
    kind: SupportKind,
    label: String,
    state: SupportState,
}

#[derive(Deserialize)]
struct SupportRecord {
    position: f64,
    kind: SupportKind,
    #[serde(default)]
    label: String,
}

impl From<SupportRecord> for Support {
    fn from(record: SupportRecord) -> Self {
        Support::new(record.position, record.kind, record.label)
    }
}

impl Support {
    /// Create an unsolved support. Position checks happen in [`crate::model::BeamModel`].
    pub fn new(position: f64, kind: SupportKind, label: impl Into<String>) -> Self {
        Support {
            position,
            kind,
            label: label.into(),
            state: SupportState::Unsolved,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn kind(&self) -> SupportKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> SupportState {
        self.state
    }

    pub fn is_solved(&self) -> bool {
        matches!(self.state, SupportState::Solved(_))
    }

    /// Resolved reaction, if the support has been solved
    pub fn reaction(&self) -> Option<Reaction> {
        match self.state {
            SupportState::Solved(reaction) => Some(reaction),
            SupportState::Unsolved => None,
        }
    }

    /// Record the solved reaction. Only the first call has an effect.
    pub(crate) fn settle(&mut self, reaction: Reaction) -> bool {
        match self.state {
            SupportState::Unsolved => {
                self.state = SupportState::Solved(reaction);
                true
            }
            SupportState::Solved(_) => false,
        }
    }

    /// Name of one unknown component, e.g. `"A.Ry"`
    pub fn unknown_name(&self, component: ReactionComponent) -> String {
        format!("{}.{}", self.label, component.symbol())
    }
}
