//! Central symbol registry, the in-memory symbol graph of this crate.
//!
//! This module provides the [`SymbolRegistry`], a thread-safe graph of namespaces, types and
//! members that implements [`Compilation`] and can therefore be used to encode and decode
//! documentation-comment IDs.
//!
//! # Registry Architecture
//!
//! The registry uses a multi-index approach:
//!
//! - **Token-based lookup**: Primary index using [`Token`]s (`SkipMap`)
//! - **Member lookup**: Secondary index keyed by (container, simple name) (`DashMap`)
//! - **Construction cache**: Arrays, pointers and generic instantiations are interned by
//!   their structure, so the same shape always maps to the same token
//!
//! # Thread Safety
//!
//! Every operation takes `&self`:
//! - Lock-free primary storage (`SkipMap`)
//! - Concurrent hash maps for indices (`DashMap`)
//! - Atomic token generation
//! - Append-only member lists (`boxcar::Vec`)
//!
//! Concurrent decoding is safe, including decodes that construct new array, pointer or
//! generic instance types.
//!
//! # Examples
//!
//! ```rust
//! use docscope::symbols::{Compilation, Language, PrimitiveKind, SymbolRegistry};
//!
//! let registry = SymbolRegistry::new(Language::CSharp);
//! let ns = registry.namespace_path("Acme.Collections")?;
//! let bag = registry.named_type(&ns, "Bag").build()?;
//!
//! let int32 = registry.primitive(PrimitiveKind::Int32)?;
//! registry.method(&bag, "Add").parameter("item", &int32).build()?;
//!
//! assert_eq!(registry.members(&bag, "Add").len(), 1);
//!
//! // constructed types are interned
//! let first = registry.create_array_type(&int32, 1)?;
//! let second = registry.create_array_type(&int32, 1)?;
//! assert_eq!(first.token, second.token);
//! # Ok::<(), docscope::Error>(())
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use strum::IntoEnumIterator;

use crate::{
    symbols::{
        Compilation, Language, MethodBuilder, PrimitiveKind, PropertyBuilder, Symbol,
        SymbolFlavor, SymbolRc, Token, TypeBuilder,
    },
    Error::{ArityMismatch, SymbolNotFound, TypeError},
    Result,
};

/// Structural identity of a constructed type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ConstructedKey {
    Array { element: Token, rank: u32 },
    Pointer { pointed_at: Token },
    Instance { definition: Token, arguments: Vec<Token> },
}

/// Thread-safe symbol graph implementing [`Compilation`]
pub struct SymbolRegistry {
    /// Primary storage, all symbols indexed by their token
    symbols: SkipMap<Token, SymbolRc>,
    /// Next free row, shared by all tables
    next_row: AtomicU32,
    /// Language flavor
    language: Language,
    /// The root namespace
    global_namespace: SymbolRc,
    /// Secondary index: members by (container, name)
    members_by_name: DashMap<(Token, String), Vec<Token>>,
    /// Interned arrays, pointers and generic instantiations
    constructed: DashMap<ConstructedKey, Token>,
    /// The seeded `System` types
    primitives: DashMap<PrimitiveKind, Token>,
}

impl SymbolRegistry {
    /// Create a new registry containing the global namespace, the `System` namespace and
    /// all [`PrimitiveKind`] types.
    ///
    /// ## Arguments
    /// * 'language' - The language flavor, decides how indexers are named
    #[must_use]
    pub fn new(language: Language) -> Self {
        let global_namespace = Arc::new(Symbol::new(
            Token::from_parts(Token::NAMESPACE, 1),
            String::new(),
            None,
            SymbolFlavor::Namespace,
        ));
        let registry = SymbolRegistry {
            symbols: SkipMap::new(),
            next_row: AtomicU32::new(2),
            language,
            global_namespace: global_namespace.clone(),
            members_by_name: DashMap::new(),
            constructed: DashMap::new(),
            primitives: DashMap::new(),
        };

        registry
            .symbols
            .insert(global_namespace.token, global_namespace);
        registry.initialize_primitives();
        registry
    }

    /// Get the next available token for `table` and increment the counter
    pub(crate) fn next_token(&self, table: u8) -> Token {
        let row = self.next_row.fetch_add(1, Ordering::Relaxed);
        debug_assert!(
            row <= 0x00FF_FFFF,
            "We ran out of rows and are going to overwrite existing ones"
        );

        Token::from_parts(table, row)
    }

    /// Seed `System` and its primitive types
    fn initialize_primitives(&self) {
        let global = self.global_namespace();
        let Ok(system) = self.namespace(&global, PrimitiveKind::NAMESPACE) else {
            return;
        };

        for kind in PrimitiveKind::iter() {
            let token = self.next_token(Token::TYPE);
            self.publish(
                Symbol::new(
                    token,
                    kind.name().to_string(),
                    Some(system.token),
                    SymbolFlavor::NamedType {
                        type_parameters: Vec::new(),
                        type_arguments: Vec::new(),
                        definition: None,
                    },
                ),
                true,
            );
            self.primitives.insert(kind, token);
        }
    }

    /// Publish a fully built symbol
    ///
    /// ## Arguments
    /// * 'symbol'    - The symbol to store
    /// * 'as_member' - Also register it as a member of its containing symbol
    pub(crate) fn publish(&self, symbol: Symbol, as_member: bool) -> SymbolRc {
        let symbol = Arc::new(symbol);
        self.symbols.insert(symbol.token, symbol.clone());

        if as_member {
            if let Some(container_token) = symbol.containing {
                if let Some(container) = self.get(&container_token) {
                    container.members.push(symbol.token);
                }

                self.members_by_name
                    .entry((container_token, symbol.name.clone()))
                    .or_default()
                    .push(symbol.token);
            }
        }

        symbol
    }

    /// Intern a constructed type, creating it on first use
    fn intern(
        &self,
        key: ConstructedKey,
        table: u8,
        make: impl FnOnce(Token) -> Symbol,
    ) -> Result<SymbolRc> {
        let token = *self.constructed.entry(key).or_insert_with(|| {
            let token = self.next_token(table);
            self.publish(make(token), false);
            token
        });

        self.get(&token).ok_or(SymbolNotFound(token))
    }

    /// The language flavor of this registry
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Get a symbol by token
    ///
    /// ## Arguments
    /// * 'token' - The token of the symbol
    #[must_use]
    pub fn get(&self, token: &Token) -> Option<SymbolRc> {
        self.symbols.get(token).map(|entry| entry.value().clone())
    }

    /// Get one of the seeded `System` types
    ///
    /// # Errors
    /// Returns an error if the registry failed to seed the type.
    pub fn primitive(&self, kind: PrimitiveKind) -> Result<SymbolRc> {
        let token = self
            .primitives
            .get(&kind)
            .map(|entry| *entry.value())
            .ok_or_else(|| TypeError(format!("Primitive {} is not registered", kind.name())))?;

        self.get(&token).ok_or(SymbolNotFound(token))
    }

    /// Get or create the namespace `name` inside the namespace `container`
    ///
    /// ## Arguments
    /// * 'container' - The parent namespace
    /// * 'name'      - The simple namespace name
    ///
    /// # Errors
    /// Returns an error if `container` is not a namespace or `name` is empty.
    pub fn namespace(&self, container: &SymbolRc, name: &str) -> Result<SymbolRc> {
        if !container.is_namespace() {
            return Err(malformed_error!(
                "Namespace {} can not be declared inside {} - {}",
                name,
                container.kind(),
                container.token
            ));
        }
        if name.is_empty() {
            return Err(malformed_error!("Namespace names can not be empty"));
        }

        let mut entry = self
            .members_by_name
            .entry((container.token, name.to_string()))
            .or_default();

        if let Some(existing) = entry
            .iter()
            .filter_map(|token| self.get(token))
            .find(|symbol| symbol.is_namespace())
        {
            return Ok(existing);
        }

        let token = self.next_token(Token::NAMESPACE);
        let namespace = Arc::new(Symbol::new(
            token,
            name.to_string(),
            Some(container.token),
            SymbolFlavor::Namespace,
        ));
        self.symbols.insert(token, namespace.clone());
        container.members.push(token);
        entry.push(token);

        Ok(namespace)
    }

    /// Get or create a (possibly nested) namespace from its dotted name, an empty string
    /// is the global namespace
    ///
    /// ## Arguments
    /// * 'dotted' - e.g. `System.Collections.Generic`
    ///
    /// # Errors
    /// Returns an error if a segment of `dotted` is empty.
    pub fn namespace_path(&self, dotted: &str) -> Result<SymbolRc> {
        let mut current = self.global_namespace();
        if dotted.is_empty() {
            return Ok(current);
        }

        for segment in dotted.split('.') {
            current = self.namespace(&current, segment)?;
        }

        Ok(current)
    }

    /// Start building a named type inside a namespace or type definition
    ///
    /// ## Arguments
    /// * 'container' - The containing namespace or type
    /// * 'name'      - The simple name, without arity suffix
    pub fn named_type(&self, container: &SymbolRc, name: &str) -> TypeBuilder<'_> {
        TypeBuilder::new(self, container, name)
    }

    /// Start building a method inside a type definition
    ///
    /// ## Arguments
    /// * 'container' - The declaring type
    /// * 'name'      - The method name
    pub fn method(&self, container: &SymbolRc, name: &str) -> MethodBuilder<'_> {
        MethodBuilder::new(self, container, name)
    }

    /// Start building a property inside a type definition
    ///
    /// ## Arguments
    /// * 'container' - The declaring type
    /// * 'name'      - The property name
    pub fn property(&self, container: &SymbolRc, name: &str) -> PropertyBuilder<'_> {
        PropertyBuilder::new(self, container, name)
    }

    /// Start building an indexer, named after the registry's language convention
    /// (`this[]` for C#, `Item` for Visual Basic)
    ///
    /// ## Arguments
    /// * 'container' - The declaring type
    pub fn indexer(&self, container: &SymbolRc) -> PropertyBuilder<'_> {
        let name = match self.language {
            Language::CSharp => "this[]",
            Language::VisualBasic => "Item",
        };
        PropertyBuilder::new(self, container, name)
    }

    /// Add a field to a type definition
    ///
    /// ## Arguments
    /// * 'container'  - The declaring type
    /// * 'name'       - The field name
    /// * 'field_type' - The type of the field
    ///
    /// # Errors
    /// Returns an error if `container` is not a type definition.
    pub fn field(
        &self,
        container: &SymbolRc,
        name: &str,
        field_type: Option<&SymbolRc>,
    ) -> Result<SymbolRc> {
        Self::ensure_member_container(container, name)?;

        let token = self.next_token(Token::FIELD);
        Ok(self.publish(
            Symbol::new(
                token,
                name.to_string(),
                Some(container.token),
                SymbolFlavor::Field {
                    field_type: field_type.map(|ty| ty.token),
                },
            ),
            true,
        ))
    }

    /// Add an event to a type definition
    ///
    /// ## Arguments
    /// * 'container'  - The declaring type
    /// * 'name'       - The event name
    /// * 'event_type' - The delegate type of the event
    ///
    /// # Errors
    /// Returns an error if `container` is not a type definition.
    pub fn event(
        &self,
        container: &SymbolRc,
        name: &str,
        event_type: Option<&SymbolRc>,
    ) -> Result<SymbolRc> {
        Self::ensure_member_container(container, name)?;

        let token = self.next_token(Token::EVENT);
        Ok(self.publish(
            Symbol::new(
                token,
                name.to_string(),
                Some(container.token),
                SymbolFlavor::Event {
                    event_type: event_type.map(|ty| ty.token),
                },
            ),
            true,
        ))
    }

    /// Add an alias (e.g. a type forwarder) that stands for `target`
    ///
    /// ## Arguments
    /// * 'container' - The namespace or type the alias is visible in
    /// * 'name'      - The alias name
    /// * 'target'    - A namespace or named type
    ///
    /// # Errors
    /// Returns an error if `container` can't hold members or `target` is not a namespace
    /// or named type.
    pub fn alias(&self, container: &SymbolRc, name: &str, target: &SymbolRc) -> Result<SymbolRc> {
        if !matches!(
            container.flavor,
            SymbolFlavor::Namespace | SymbolFlavor::NamedType { .. }
        ) {
            return Err(malformed_error!(
                "Alias {} can not be declared inside {} - {}",
                name,
                container.kind(),
                container.token
            ));
        }
        if !matches!(
            target.flavor,
            SymbolFlavor::Namespace | SymbolFlavor::NamedType { .. } | SymbolFlavor::Alias { .. }
        ) {
            return Err(TypeError(format!(
                "Alias {} can not stand for a {} - {}",
                name,
                target.kind(),
                target.token
            )));
        }

        let token = self.next_token(Token::ALIAS);
        Ok(self.publish(
            Symbol::new(
                token,
                name.to_string(),
                Some(container.token),
                SymbolFlavor::Alias {
                    target: target.token,
                },
            ),
            true,
        ))
    }

    /// Members (fields, methods, ...) can only be declared on type definitions
    pub(crate) fn ensure_member_container(container: &Symbol, name: &str) -> Result<()> {
        match container.flavor {
            SymbolFlavor::NamedType {
                definition: None, ..
            } => Ok(()),
            _ => Err(malformed_error!(
                "Member {} can not be declared inside {} - {}",
                name,
                container.kind(),
                container.token
            )),
        }
    }

    /// Count of symbols in the registry, including constructed types
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns an iterator over all symbols in the registry
    pub fn iter(&self) -> crossbeam_skiplist::map::Iter<'_, Token, SymbolRc> {
        self.symbols.iter()
    }

    /// Get all symbols in the registry
    #[must_use]
    pub fn all_symbols(&self) -> Vec<SymbolRc> {
        self.symbols
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// All symbols a declaration ID can be generated for: non-global namespaces, type
    /// definitions, methods, properties, fields and events, in token order
    #[must_use]
    pub fn declarations(&self) -> Vec<SymbolRc> {
        self.symbols
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|symbol| match symbol.flavor {
                SymbolFlavor::Namespace => !symbol.is_global_namespace(),
                SymbolFlavor::NamedType { definition, .. } => definition.is_none(),
                SymbolFlavor::Method { .. }
                | SymbolFlavor::Property { .. }
                | SymbolFlavor::Field { .. }
                | SymbolFlavor::Event { .. } => true,
                _ => false,
            })
            .collect()
    }
}

impl Compilation for SymbolRegistry {
    fn language(&self) -> Language {
        self.language
    }

    fn global_namespace(&self) -> SymbolRc {
        self.global_namespace.clone()
    }

    fn symbol(&self, token: Token) -> Option<SymbolRc> {
        self.get(&token)
    }

    fn members(&self, container: &Symbol, name: &str) -> Vec<SymbolRc> {
        // an instantiation shares the members of its definition
        let owner = container.original_definition();

        match self.members_by_name.get(&(owner, name.to_string())) {
            Some(tokens) => tokens.iter().filter_map(|token| self.get(token)).collect(),
            None => Vec::new(),
        }
    }

    fn create_array_type(&self, element: &SymbolRc, rank: u32) -> Result<SymbolRc> {
        if !element.is_type() {
            return Err(TypeError(format!(
                "Array element must be a type, not a {} - {}",
                element.kind(),
                element.token
            )));
        }
        if rank == 0 {
            return Err(TypeError("Array rank must be at least 1".to_string()));
        }

        let element = element.token;
        self.intern(
            ConstructedKey::Array { element, rank },
            Token::TYPE_SPEC,
            |token| Symbol::new(token, String::new(), None, SymbolFlavor::ArrayType { element, rank }),
        )
    }

    fn create_pointer_type(&self, pointed_at: &SymbolRc) -> Result<SymbolRc> {
        if !pointed_at.is_type() {
            return Err(TypeError(format!(
                "Pointer target must be a type, not a {} - {}",
                pointed_at.kind(),
                pointed_at.token
            )));
        }

        let pointed_at = pointed_at.token;
        self.intern(
            ConstructedKey::Pointer { pointed_at },
            Token::TYPE_SPEC,
            |token| Symbol::new(token, String::new(), None, SymbolFlavor::PointerType { pointed_at }),
        )
    }

    fn construct(&self, definition: &SymbolRc, type_arguments: &[SymbolRc]) -> Result<SymbolRc> {
        let SymbolFlavor::NamedType {
            type_parameters,
            definition: None,
            ..
        } = &definition.flavor
        else {
            return Err(TypeError(format!(
                "Only generic type definitions can be constructed - {}",
                definition.token
            )));
        };

        if type_parameters.is_empty() || type_parameters.len() != type_arguments.len() {
            return Err(ArityMismatch {
                expected: type_parameters.len(),
                actual: type_arguments.len(),
            });
        }
        if let Some(argument) = type_arguments.iter().find(|argument| !argument.is_type()) {
            return Err(TypeError(format!(
                "Type argument must be a type, not a {} - {}",
                argument.kind(),
                argument.token
            )));
        }

        let arguments: Vec<Token> = type_arguments.iter().map(|argument| argument.token).collect();
        let key = ConstructedKey::Instance {
            definition: definition.token,
            arguments: arguments.clone(),
        };

        self.intern(key, Token::TYPE, |token| {
            Symbol::new(
                token,
                definition.name.clone(),
                definition.containing,
                SymbolFlavor::NamedType {
                    type_parameters: type_parameters.clone(),
                    type_arguments: arguments,
                    definition: Some(definition.token),
                },
            )
        })
    }
}

impl std::fmt::Debug for SymbolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolRegistry")
            .field("language", &self.language)
            .field("symbols", &self.symbols.len())
            .finish_non_exhaustive()
    }
}
