//! Core types for program representation.

use std::fmt;

use crate::tags::TagValue;

/// Identifier of a rung, unique within a program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RungId(pub String);

impl fmt::Display for RungId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RungId {
    fn from(value: &str) -> Self {
        RungId(value.to_string())
    }
}

impl From<String> for RungId {
    fn from(value: String) -> Self {
        RungId(value)
    }
}

/// Identifier of an element, unique within its rung.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub String);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        ElementId(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        ElementId(value)
    }
}

/// Logic element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Normally-open contact
    NoContact,
    /// Normally-closed contact
    NcContact,
    /// Output coil
    Coil,
    /// On-delay timer
    Ton,
    /// Off-delay timer
    Tof,
    /// Count-up counter
    Ctu,
    /// Count-down counter
    Ctd,
    /// Literal move
    Move,
}

impl ElementKind {
    /// Parse an element kind from its interchange keyword.
    ///
    /// `TIMER` and `COUNTER` are accepted as aliases for `TON` and `CTU`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_uppercase().as_str() {
            "NO_CONTACT" => Some(Self::NoContact),
            "NC_CONTACT" => Some(Self::NcContact),
            "COIL" => Some(Self::Coil),
            "TON" | "TIMER" => Some(Self::Ton),
            "TOF" => Some(Self::Tof),
            "CTU" | "COUNTER" => Some(Self::Ctu),
            "CTD" => Some(Self::Ctd),
            "MOVE" => Some(Self::Move),
            _ => None,
        }
    }

    /// The interchange keyword for this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::NoContact => "NO_CONTACT",
            Self::NcContact => "NC_CONTACT",
            Self::Coil => "COIL",
            Self::Ton => "TON",
            Self::Tof => "TOF",
            Self::Ctu => "CTU",
            Self::Ctd => "CTD",
            Self::Move => "MOVE",
        }
    }

    /// Check if this kind is a contact.
    pub fn is_contact(&self) -> bool {
        matches!(self, Self::NoContact | Self::NcContact)
    }

    /// Check if this kind takes a `preset` parameter.
    pub fn has_preset(&self) -> bool {
        matches!(self, Self::Ton | Self::Tof | Self::Ctu | Self::Ctd)
    }

    /// Preset used when the element does not carry one.
    pub fn default_preset(&self) -> f64 {
        match self {
            Self::Ton | Self::Tof => crate::blocks::DEFAULT_TIMER_PRESET,
            Self::Ctu => crate::blocks::DEFAULT_CTU_PRESET,
            Self::Ctd => crate::blocks::DEFAULT_CTD_PRESET,
            _ => 0.0,
        }
    }

    /// Value a tag gets when a program first binds an element of this kind
    /// to it: `0` for timers, counters and MOVE targets, `false` otherwise.
    pub fn initial_tag_value(&self) -> TagValue {
        if self.has_preset() || *self == Self::Move {
            TagValue::Number(0.0)
        } else {
            TagValue::Bool(false)
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_keywords() {
        assert_eq!(ElementKind::from_keyword("no_contact"), Some(ElementKind::NoContact));
        assert_eq!(ElementKind::from_keyword("TIMER"), Some(ElementKind::Ton));
        assert_eq!(ElementKind::from_keyword("COUNTER"), Some(ElementKind::Ctu));
        assert_eq!(ElementKind::from_keyword("ADD"), None);
        assert_eq!(ElementKind::Ctd.to_string(), "CTD");
    }

    #[test]
    fn test_default_presets() {
        assert_eq!(ElementKind::Ton.default_preset(), 5000.0);
        assert_eq!(ElementKind::Tof.default_preset(), 5000.0);
        assert_eq!(ElementKind::Ctu.default_preset(), 10.0);
        assert_eq!(ElementKind::Ctd.default_preset(), 0.0);
    }

    #[test]
    fn test_initial_tag_values() {
        assert_eq!(ElementKind::Ton.initial_tag_value(), TagValue::Number(0.0));
        assert_eq!(ElementKind::Move.initial_tag_value(), TagValue::Number(0.0));
        assert_eq!(ElementKind::NcContact.initial_tag_value(), TagValue::Bool(false));
        assert_eq!(ElementKind::Coil.initial_tag_value(), TagValue::Bool(false));
    }
}
