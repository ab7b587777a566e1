//! The capability surface the documentation-comment ID codec resolves against.
//!
//! The codec needs very little from a symbol graph: a root, exact-name member lookup,
//! token resolution and three factories for constructed types. Anything that can answer
//! these questions can be encoded and decoded, [`crate::symbols::SymbolRegistry`] is the
//! implementation shipped with this crate.

use crate::{
    symbols::{Language, Symbol, SymbolRc, Token},
    Result,
};

/// Read access to a symbol graph plus the constructions needed while parsing IDs.
///
/// Implementations must hand out one symbol per token: two lookups of the same entity
/// return symbols with equal tokens, and the factories return the same token when asked
/// for the same shape twice. The codec compares types by token only.
pub trait Compilation {
    /// The source language flavor of the graph
    fn language(&self) -> Language;

    /// The root namespace
    fn global_namespace(&self) -> SymbolRc;

    /// Resolve a token to its symbol
    ///
    /// ## Arguments
    /// * 'token' - The token to look up
    fn symbol(&self, token: Token) -> Option<SymbolRc>;

    /// All members of `container` named exactly `name`, in declaration order
    ///
    /// ## Arguments
    /// * 'container' - A namespace or named type
    /// * 'name'      - The simple (decoded) member name
    fn members(&self, container: &Symbol, name: &str) -> Vec<SymbolRc>;

    /// The array type with the given element type and rank
    ///
    /// # Errors
    /// Returns an error if `element` is not a type.
    fn create_array_type(&self, element: &SymbolRc, rank: u32) -> Result<SymbolRc>;

    /// The pointer type to `pointed_at`
    ///
    /// # Errors
    /// Returns an error if `pointed_at` is not a type.
    fn create_pointer_type(&self, pointed_at: &SymbolRc) -> Result<SymbolRc>;

    /// Instantiate the generic type definition `definition` with `type_arguments`
    ///
    /// # Errors
    /// Returns an error if `definition` is not a generic type definition or the number of
    /// type arguments differs from its arity.
    fn construct(&self, definition: &SymbolRc, type_arguments: &[SymbolRc]) -> Result<SymbolRc>;

    /// The symbol containing `symbol`, if any
    fn containing(&self, symbol: &Symbol) -> Option<SymbolRc> {
        symbol.containing.and_then(|token| self.symbol(token))
    }
}
