//! Symbol object model consumed by the documentation-comment ID codec.
//!
//! This module provides a small, generics-aware representation of a .NET symbol graph:
//! namespaces, named types, methods, properties, fields, events, parameters, type
//! parameters, arrays, pointers and aliases. The codec in [`crate::docid`] never owns
//! symbols; it navigates a graph through the [`Compilation`] trait.
//!
//! # Key Components
//!
//! - [`Symbol`]: A single node of the graph, identified by its [`Token`]
//! - [`SymbolFlavor`]: Closed set of symbol variants and their attributes
//! - [`Compilation`]: The capability surface the codec resolves against
//! - [`SymbolRegistry`]: Thread-safe, in-memory [`Compilation`] implementation
//! - [`TypeBuilder`], [`MethodBuilder`], [`PropertyBuilder`]: Fluent construction helpers
//! - [`PrimitiveKind`]: Well-known `System` types seeded into every registry
//!
//! # Examples
//!
//! ```rust
//! use docscope::symbols::{Compilation, Language, PrimitiveKind, SymbolRegistry};
//!
//! let registry = SymbolRegistry::new(Language::CSharp);
//! let int32 = registry.primitive(PrimitiveKind::Int32)?;
//! let system = registry.namespace_path("System")?;
//!
//! let list = registry.named_type(&system, "List").type_parameters(&["T"]).build()?;
//! assert_eq!(list.arity(), 1);
//!
//! let list_of_int = registry.construct(&list, &[int32])?;
//! assert_eq!(list_of_int.original_definition(), list.token);
//! # Ok::<(), docscope::Error>(())
//! ```

mod builder;
mod compilation;
mod primitives;
mod registry;
mod token;

use std::sync::Arc;

use strum::{Display, EnumIter};

pub use builder::{MethodBuilder, PropertyBuilder, TypeBuilder};
pub use compilation::Compilation;
pub use primitives::PrimitiveKind;
pub use registry::SymbolRegistry;
pub use token::Token;

/// Reference to a `Symbol`
pub type SymbolRc = Arc<Symbol>;

/// Source language flavor of a symbol graph.
///
/// The only behavior that depends on it is the indexer naming convention: C# names an
/// indexer `this[]` while its documentation ID spells it `Item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Language {
    /// C#
    CSharp,
    /// Visual Basic
    VisualBasic,
}

/// How a parameter is passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefKind {
    /// By value
    #[default]
    None,
    /// `ref`
    Ref,
    /// `out`
    Out,
    /// `in` / `ref readonly`
    In,
}

/// Field-less tag of a [`SymbolFlavor`]
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum SymbolKind {
    Namespace,
    NamedType,
    Method,
    Property,
    Field,
    Event,
    Parameter,
    TypeParameter,
    ArrayType,
    PointerType,
    Alias,
}

/// Variant-specific attributes of a [`Symbol`].
///
/// All cross references are tokens into the owning graph.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolFlavor {
    /// A namespace, the global namespace has no containing symbol
    Namespace,
    /// A class, struct, interface, enum or delegate; either a definition or a
    /// generic instantiation
    NamedType {
        /// The type parameters this type declares itself (excluding enclosing types')
        type_parameters: Vec<Token>,
        /// The type arguments of a generic instantiation, empty for definitions
        type_arguments: Vec<Token>,
        /// The generic definition this type was constructed from, `None` for definitions
        definition: Option<Token>,
    },
    /// A method, constructor or operator
    Method {
        /// The method's own type parameters
        type_parameters: Vec<Token>,
        /// The method's parameters (tokens of [`SymbolFlavor::Parameter`] symbols)
        parameters: Vec<Token>,
        /// The return type, `None` for `void`
        return_type: Option<Token>,
    },
    /// A property or indexer
    Property {
        /// Indexer parameters (tokens of [`SymbolFlavor::Parameter`] symbols)
        parameters: Vec<Token>,
        /// The property type
        value_type: Option<Token>,
    },
    /// A field
    Field {
        /// The field type
        field_type: Option<Token>,
    },
    /// An event
    Event {
        /// The delegate type of the event
        event_type: Option<Token>,
    },
    /// A method or indexer parameter
    Parameter {
        /// The type of the parameter
        parameter_type: Token,
        /// How the parameter is passed
        ref_kind: RefKind,
    },
    /// A type parameter of a generic type or method
    TypeParameter {
        /// Position within the declaring symbol's own type parameter list
        ordinal: u32,
    },
    /// An array, jagged arrays nest
    ArrayType {
        /// The element type
        element: Token,
        /// The number of dimensions
        rank: u32,
    },
    /// An unmanaged pointer
    PointerType {
        /// The type pointed to
        pointed_at: Token,
    },
    /// A name that forwards to another namespace or type
    Alias {
        /// The namespace or type this alias stands for
        target: Token,
    },
}

/// A single symbol of a symbol graph.
///
/// Symbols are immutable once published, except for their member list which grows as
/// members are added to a container.
pub struct Symbol {
    /// Token, the identity of this symbol
    pub token: Token,
    /// The simple name (empty for the global namespace and for arrays/pointers)
    pub name: String,
    /// The containing symbol, `None` for the global namespace and arrays/pointers
    pub containing: Option<Token>,
    /// Variant-specific attributes
    pub flavor: SymbolFlavor,
    /// All symbols that are 'contained' in this symbol, in declaration order
    pub members: boxcar::Vec<Token>,
}

impl Symbol {
    /// Create a new instance of a `Symbol`
    ///
    /// ## Arguments
    /// * 'token'      - The token identifying the symbol
    /// * 'name'       - The simple name
    /// * 'containing' - The containing symbol's token
    /// * 'flavor'     - Variant-specific attributes
    #[must_use]
    pub fn new(token: Token, name: String, containing: Option<Token>, flavor: SymbolFlavor) -> Self {
        Symbol {
            token,
            name,
            containing,
            flavor,
            members: boxcar::Vec::new(),
        }
    }

    /// The field-less kind of this symbol
    #[must_use]
    pub fn kind(&self) -> SymbolKind {
        match self.flavor {
            SymbolFlavor::Namespace => SymbolKind::Namespace,
            SymbolFlavor::NamedType { .. } => SymbolKind::NamedType,
            SymbolFlavor::Method { .. } => SymbolKind::Method,
            SymbolFlavor::Property { .. } => SymbolKind::Property,
            SymbolFlavor::Field { .. } => SymbolKind::Field,
            SymbolFlavor::Event { .. } => SymbolKind::Event,
            SymbolFlavor::Parameter { .. } => SymbolKind::Parameter,
            SymbolFlavor::TypeParameter { .. } => SymbolKind::TypeParameter,
            SymbolFlavor::ArrayType { .. } => SymbolKind::ArrayType,
            SymbolFlavor::PointerType { .. } => SymbolKind::PointerType,
            SymbolFlavor::Alias { .. } => SymbolKind::Alias,
        }
    }

    /// True for namespaces
    #[must_use]
    pub fn is_namespace(&self) -> bool {
        matches!(self.flavor, SymbolFlavor::Namespace)
    }

    /// True for the root namespace
    #[must_use]
    pub fn is_global_namespace(&self) -> bool {
        self.is_namespace() && self.containing.is_none()
    }

    /// True for named types, type parameters, arrays and pointers
    #[must_use]
    pub fn is_type(&self) -> bool {
        matches!(
            self.flavor,
            SymbolFlavor::NamedType { .. }
                | SymbolFlavor::TypeParameter { .. }
                | SymbolFlavor::ArrayType { .. }
                | SymbolFlavor::PointerType { .. }
        )
    }

    /// The type parameters this symbol declares itself (named types and methods)
    #[must_use]
    pub fn type_parameters(&self) -> &[Token] {
        match &self.flavor {
            SymbolFlavor::NamedType {
                type_parameters, ..
            }
            | SymbolFlavor::Method {
                type_parameters, ..
            } => type_parameters,
            _ => &[],
        }
    }

    /// Number of own type parameters, not counting those of enclosing types
    #[must_use]
    pub fn arity(&self) -> usize {
        self.type_parameters().len()
    }

    /// The type arguments of a generic instantiation
    #[must_use]
    pub fn type_arguments(&self) -> &[Token] {
        match &self.flavor {
            SymbolFlavor::NamedType { type_arguments, .. } => type_arguments,
            _ => &[],
        }
    }

    /// The parameters of a method or indexer
    #[must_use]
    pub fn parameters(&self) -> &[Token] {
        match &self.flavor {
            SymbolFlavor::Method { parameters, .. } | SymbolFlavor::Property { parameters, .. } => {
                parameters
            }
            _ => &[],
        }
    }

    /// The generic definition of a named type; the type itself if it is a definition
    #[must_use]
    pub fn original_definition(&self) -> Token {
        match &self.flavor {
            SymbolFlavor::NamedType {
                definition: Some(definition),
                ..
            } => *definition,
            _ => self.token,
        }
    }

    /// True for generic instantiations like `List<int>`
    #[must_use]
    pub fn is_constructed(&self) -> bool {
        matches!(
            self.flavor,
            SymbolFlavor::NamedType {
                definition: Some(_),
                ..
            }
        )
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Symbol")
            .field("token", &self.token)
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("containing", &self.containing)
            .finish_non_exhaustive()
    }
}
