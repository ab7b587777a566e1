//! Small value types shared by the generators, the parsers and the public API.

use strum::{Display, EnumIter, IntoStaticStr};

use crate::symbols::{Symbol, SymbolFlavor, SymbolRc};

/// The declaration kinds that have a documentation-comment ID, one per prefix letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum DocIdKind {
    /// `E:`
    Event,
    /// `F:`
    Field,
    /// `M:`, also constructors and operators
    Method,
    /// `N:`
    Namespace,
    /// `P:`, also indexers
    Property,
    /// `T:`
    NamedType,
}

impl DocIdKind {
    /// The prefix letter of this kind
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            DocIdKind::Event => 'E',
            DocIdKind::Field => 'F',
            DocIdKind::Method => 'M',
            DocIdKind::Namespace => 'N',
            DocIdKind::Property => 'P',
            DocIdKind::NamedType => 'T',
        }
    }

    /// The kind for a prefix letter, `None` for letters without a declaration grammar
    ///
    /// ## Arguments
    /// * 'letter' - The first character of a declaration ID
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'E' => Some(DocIdKind::Event),
            'F' => Some(DocIdKind::Field),
            'M' => Some(DocIdKind::Method),
            'N' => Some(DocIdKind::Namespace),
            'P' => Some(DocIdKind::Property),
            'T' => Some(DocIdKind::NamedType),
            _ => None,
        }
    }

    /// The kind of declaration ID `symbol` gets, `None` if it has none.
    ///
    /// The global namespace maps to [`DocIdKind::Namespace`]; its ID is the bare `N:`.
    ///
    /// ## Arguments
    /// * 'symbol' - The symbol to classify
    #[must_use]
    pub fn for_symbol(symbol: &Symbol) -> Option<Self> {
        match symbol.flavor {
            SymbolFlavor::Namespace => Some(DocIdKind::Namespace),
            SymbolFlavor::NamedType { .. } => Some(DocIdKind::NamedType),
            SymbolFlavor::Method { .. } => Some(DocIdKind::Method),
            SymbolFlavor::Property { .. } => Some(DocIdKind::Property),
            SymbolFlavor::Field { .. } => Some(DocIdKind::Field),
            SymbolFlavor::Event { .. } => Some(DocIdKind::Event),
            SymbolFlavor::Parameter { .. }
            | SymbolFlavor::TypeParameter { .. }
            | SymbolFlavor::ArrayType { .. }
            | SymbolFlavor::PointerType { .. }
            | SymbolFlavor::Alias { .. } => None,
        }
    }
}

/// Whether a created declaration ID starts with its `X:` kind prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrefixMode {
    /// `M:N.C.F`
    #[default]
    Emit,
    /// `N.C.F`
    Omit,
}

/// One entry of a parsed parameter list
#[derive(Debug, Clone)]
pub(crate) struct ParameterInfo {
    /// The resolved parameter type
    pub parameter_type: SymbolRc,
    /// The entry carried the `@` marker
    pub is_ref_or_out: bool,
}
