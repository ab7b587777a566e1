//! Documentation-comment ID encoding and decoding.
//!
//! Documentation-comment IDs are the compact strings .NET documentation uses to
//! cross-reference symbols, e.g. in `cref` attributes and in the `name` attribute of XML
//! documentation files. This module maps symbols of any [`Compilation`] to these IDs and
//! back.
//!
//! # Architecture
//!
//! - **Name codec** - escaping of dots inside names (`.` as `#`), integer and name tokens
//! - **Generators** - streaming, recursive writers for declaration and reference IDs
//! - **Declaration parser** - resolves `X:path` IDs, including overload resolution by
//!   parameter list and return type
//! - **Reference parser** - resolves type references: named and constructed generic types,
//!   type parameters with optional scope qualifier, arrays and pointers
//! - **Façade** - [`DocIdCodec`] and the free functions below, which use the default
//!   [`DocIdConfig`]
//!
//! # ID Grammar
//!
//! | ID                                            | Symbol                              |
//! |-----------------------------------------------|-------------------------------------|
//! | `N:System.Collections`                        | namespace                           |
//! | `` T:System.Collections.Generic.List`1 ``     | generic type definition             |
//! | `M:N.C.F(System.Int32@,System.String[])`      | method with `ref` and array params  |
//! | `` M:N.C.Convert``1(``0)~System.Int32 ``      | generic method with return type     |
//! | `P:N.C.Item(System.Int32)`                    | C# indexer `this[int]`              |
//! | `F:N.C.A#B`                                   | field literally named `A.B`         |
//! | `` N.C{System.Int32} ``                       | reference to `C<int>`               |
//! | `` T:N.C`1:`0 ``                              | reference to a type parameter       |
//!
//! # Failure Model
//!
//! An ID that does not resolve yields an empty list (or `None`), never an error. Errors are
//! reserved for caller bugs: asking for the ID of a symbol kind that has none, or a symbol
//! graph with dangling tokens.
//!
//! # Examples
//!
//! ```rust
//! use docscope::{docid, symbols::{Language, PrimitiveKind, SymbolRegistry}};
//!
//! let registry = SymbolRegistry::new(Language::CSharp);
//! let ns = registry.namespace_path("Acme")?;
//! let class = registry.named_type(&ns, "Parser").build()?;
//! let int32 = registry.primitive(PrimitiveKind::Int32)?;
//! let method = registry.method(&class, "Parse").parameter("value", &int32).build()?;
//!
//! let id = docid::create_declaration_id(&registry, &method)?;
//! assert_eq!(id, "M:Acme.Parser.Parse(System.Int32)");
//!
//! let found = docid::get_first_symbol_for_declaration_id(&id, &registry);
//! assert_eq!(found.map(|symbol| symbol.token), Some(method.token));
//! # Ok::<(), docscope::Error>(())
//! ```

mod config;
mod cursor;
mod generator;
mod names;
mod parser;
mod reference;
mod types;

use rayon::prelude::*;

pub use config::{DocIdConfig, ReturnTypeSuffix};
pub use cursor::IdCursor;
pub use names::{
    decode_name, decode_property_name, encode_name, encode_property_name, parse_name,
    read_integer, NAME_DELIMITERS,
};
pub use types::{DocIdKind, PrefixMode};

use crate::{
    docid::{generator::Generator, parser::IdParser},
    symbols::{Compilation, Symbol, SymbolRc},
    Result,
};

/// Encoder and decoder for documentation-comment IDs
///
/// The codec holds no state besides its configuration; one instance can serve any number of
/// compilations and threads.
///
/// # Examples
///
/// ```rust
/// use docscope::docid::{DocIdCodec, DocIdConfig, PrefixMode};
/// use docscope::symbols::{Language, SymbolRegistry};
///
/// let registry = SymbolRegistry::new(Language::CSharp);
/// let ns = registry.namespace_path("Acme")?;
/// let class = registry.named_type(&ns, "Widget").build()?;
///
/// let codec = DocIdCodec::new(DocIdConfig::compiler_compatible());
/// let id = codec.create_declaration_id_with(&registry, &class, PrefixMode::Omit)?;
/// assert_eq!(id, "Acme.Widget");
/// # Ok::<(), docscope::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DocIdCodec {
    config: DocIdConfig,
}

impl DocIdCodec {
    /// Create a codec with a custom configuration
    ///
    /// ## Arguments
    /// * 'config' - Recursion limit and return type policy
    #[must_use]
    pub fn new(config: DocIdConfig) -> Self {
        DocIdCodec { config }
    }

    /// The configuration of this codec
    #[must_use]
    pub fn config(&self) -> &DocIdConfig {
        &self.config
    }

    /// The declaration ID of `symbol`, e.g. `M:N.C.F(System.Int32)`
    ///
    /// ## Arguments
    /// * 'compilation' - The graph `symbol` belongs to
    /// * 'symbol'      - A namespace, named type, method, property, field or event
    ///
    /// # Errors
    /// Returns [`crate::Error::NoDeclarationId`] for other symbol kinds,
    /// [`crate::Error::SymbolNotFound`] for a graph with dangling tokens and
    /// [`crate::Error::RecursionLimit`] if the ID nests deeper than configured.
    pub fn create_declaration_id<C: Compilation + ?Sized>(
        &self,
        compilation: &C,
        symbol: &Symbol,
    ) -> Result<String> {
        self.create_declaration_id_with(compilation, symbol, PrefixMode::Emit)
    }

    /// The declaration ID of `symbol`, with or without the `X:` kind prefix
    ///
    /// ## Arguments
    /// * 'compilation' - The graph `symbol` belongs to
    /// * 'symbol'      - A namespace, named type, method, property, field or event
    /// * 'prefix'      - Whether to start with the kind prefix
    ///
    /// # Errors
    /// See [`DocIdCodec::create_declaration_id`].
    pub fn create_declaration_id_with<C: Compilation + ?Sized>(
        &self,
        compilation: &C,
        symbol: &Symbol,
        prefix: PrefixMode,
    ) -> Result<String> {
        Generator::new(compilation, &self.config).declaration_id(symbol, prefix)
    }

    /// Declaration IDs for many symbols, generated in parallel; the result at index `i`
    /// belongs to `symbols[i]`
    ///
    /// ## Arguments
    /// * 'compilation' - The graph the symbols belong to
    /// * 'symbols'     - The symbols to encode
    pub fn create_declaration_ids<C: Compilation + Sync + ?Sized>(
        &self,
        compilation: &C,
        symbols: &[SymbolRc],
    ) -> Vec<Result<String>> {
        symbols
            .par_iter()
            .map(|symbol| self.create_declaration_id(compilation, symbol))
            .collect()
    }

    /// The reference ID of a type, e.g. `System.Int32[]`; namespaces yield their
    /// declaration ID
    ///
    /// Type parameters are qualified with the declaration ID of their declaring symbol,
    /// e.g. `` T:N.C`1:`0 ``.
    ///
    /// ## Arguments
    /// * 'compilation' - The graph `symbol` belongs to
    /// * 'symbol'      - A type, type parameter, array, pointer, namespace or alias
    ///
    /// # Errors
    /// Returns [`crate::Error::NoReferenceId`] for members and parameters,
    /// [`crate::Error::SymbolNotFound`] for a graph with dangling tokens and
    /// [`crate::Error::RecursionLimit`] if the ID nests deeper than configured.
    pub fn create_reference_id<C: Compilation + ?Sized>(
        &self,
        compilation: &C,
        symbol: &Symbol,
    ) -> Result<String> {
        Generator::new(compilation, &self.config).reference_id(symbol)
    }

    /// All symbols matching a declaration ID, empty if it does not resolve
    ///
    /// ## Arguments
    /// * 'id'          - A declaration ID starting with its kind prefix
    /// * 'compilation' - The graph to resolve against
    pub fn get_symbols_for_declaration_id<C: Compilation + ?Sized>(
        &self,
        id: &str,
        compilation: &C,
    ) -> Vec<SymbolRc> {
        self.get_symbols_for_declaration_id_with(id, compilation, None)
    }

    /// All symbols matching a declaration ID whose kind prefix may have been stripped
    ///
    /// ## Arguments
    /// * 'id'          - The declaration ID
    /// * 'compilation' - The graph to resolve against
    /// * 'kind'        - The kind of `id` if its prefix was stripped, `None` to read the prefix
    pub fn get_symbols_for_declaration_id_with<C: Compilation + ?Sized>(
        &self,
        id: &str,
        compilation: &C,
        kind: Option<DocIdKind>,
    ) -> Vec<SymbolRc> {
        IdParser::new(compilation, &self.config).parse_declaration_id(id, kind)
    }

    /// All symbols matching a declaration ID, `None` if it is too short to be one or
    /// resolves to nothing
    ///
    /// ## Arguments
    /// * 'id'          - A declaration ID starting with its kind prefix
    /// * 'compilation' - The graph to resolve against
    pub fn try_get_symbols_for_declaration_id<C: Compilation + ?Sized>(
        &self,
        id: &str,
        compilation: &C,
    ) -> Option<Vec<SymbolRc>> {
        if id.chars().nth(1).is_none() {
            return None;
        }

        let symbols = self.get_symbols_for_declaration_id(id, compilation);
        (!symbols.is_empty()).then_some(symbols)
    }

    /// The first symbol matching a declaration ID
    ///
    /// ## Arguments
    /// * 'id'          - A declaration ID starting with its kind prefix
    /// * 'compilation' - The graph to resolve against
    pub fn get_first_symbol_for_declaration_id<C: Compilation + ?Sized>(
        &self,
        id: &str,
        compilation: &C,
    ) -> Option<SymbolRc> {
        self.get_symbols_for_declaration_id(id, compilation)
            .into_iter()
            .next()
    }

    /// All types matching a reference ID, empty if it does not resolve
    ///
    /// `N:` IDs yield namespaces, and a bare `M:`/`T:` scope without a trailing `:type`
    /// yields the declared symbols themselves.
    ///
    /// ## Arguments
    /// * 'id'          - The reference ID
    /// * 'compilation' - The graph to resolve against
    pub fn get_symbols_for_reference_id<C: Compilation + ?Sized>(
        &self,
        id: &str,
        compilation: &C,
    ) -> Vec<SymbolRc> {
        IdParser::new(compilation, &self.config).parse_reference_id(id)
    }

    /// The first symbol matching a reference ID
    ///
    /// ## Arguments
    /// * 'id'          - The reference ID
    /// * 'compilation' - The graph to resolve against
    pub fn get_first_symbol_for_reference_id<C: Compilation + ?Sized>(
        &self,
        id: &str,
        compilation: &C,
    ) -> Option<SymbolRc> {
        self.get_symbols_for_reference_id(id, compilation)
            .into_iter()
            .next()
    }
}

/// The declaration ID of `symbol`, see [`DocIdCodec::create_declaration_id`]
///
/// # Errors
/// Returns an error if `symbol` has no declaration ID or the graph is inconsistent.
pub fn create_declaration_id<C: Compilation + ?Sized>(compilation: &C, symbol: &Symbol) -> Result<String> {
    DocIdCodec::default().create_declaration_id(compilation, symbol)
}

/// The reference ID of `symbol`, see [`DocIdCodec::create_reference_id`]
///
/// # Errors
/// Returns an error if `symbol` has no reference ID or the graph is inconsistent.
pub fn create_reference_id<C: Compilation + ?Sized>(compilation: &C, symbol: &Symbol) -> Result<String> {
    DocIdCodec::default().create_reference_id(compilation, symbol)
}

/// All symbols matching a declaration ID, see [`DocIdCodec::get_symbols_for_declaration_id`]
pub fn get_symbols_for_declaration_id<C: Compilation + ?Sized>(id: &str, compilation: &C) -> Vec<SymbolRc> {
    DocIdCodec::default().get_symbols_for_declaration_id(id, compilation)
}

/// See [`DocIdCodec::try_get_symbols_for_declaration_id`]
pub fn try_get_symbols_for_declaration_id<C: Compilation + ?Sized>(
    id: &str,
    compilation: &C,
) -> Option<Vec<SymbolRc>> {
    DocIdCodec::default().try_get_symbols_for_declaration_id(id, compilation)
}

/// The first symbol matching a declaration ID
pub fn get_first_symbol_for_declaration_id<C: Compilation + ?Sized>(
    id: &str,
    compilation: &C,
) -> Option<SymbolRc> {
    DocIdCodec::default().get_first_symbol_for_declaration_id(id, compilation)
}

/// All symbols matching a reference ID, see [`DocIdCodec::get_symbols_for_reference_id`]
pub fn get_symbols_for_reference_id<C: Compilation + ?Sized>(id: &str, compilation: &C) -> Vec<SymbolRc> {
    DocIdCodec::default().get_symbols_for_reference_id(id, compilation)
}

/// The first symbol matching a reference ID
pub fn get_first_symbol_for_reference_id<C: Compilation + ?Sized>(
    id: &str,
    compilation: &C,
) -> Option<SymbolRc> {
    DocIdCodec::default().get_first_symbol_for_reference_id(id, compilation)
}
