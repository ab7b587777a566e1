//! # docscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the docscope library. Import this module to get quick access to the symbol graph
//! and the documentation-comment ID codec.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all docscope operations
pub use crate::Error;

/// The result type used throughout docscope
pub use crate::Result;

// ================================================================================================
// Symbol Graph
// ================================================================================================

/// The capability surface IDs are resolved against
pub use crate::symbols::Compilation;

/// The bundled, thread-safe symbol graph and its builders
pub use crate::symbols::{MethodBuilder, PropertyBuilder, SymbolRegistry, TypeBuilder};

/// Symbols and their attributes
pub use crate::symbols::{
    Language, PrimitiveKind, RefKind, Symbol, SymbolFlavor, SymbolKind, SymbolRc, Token,
};

// ================================================================================================
// Documentation-Comment IDs
// ================================================================================================

/// The codec module with its free functions (`docid::create_declaration_id`, ...)
pub use crate::docid;

/// Codec, configuration and ID kinds
pub use crate::docid::{DocIdCodec, DocIdConfig, DocIdKind, PrefixMode, ReturnTypeSuffix};
