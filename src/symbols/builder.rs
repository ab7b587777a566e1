//! Builders for named types, methods and properties.
//!
//! This module provides fluent builders that add generic or parameterized symbols to a
//! [`SymbolRegistry`]. Each builder reserves the token of the symbol under construction
//! up front, so type parameters and parameters can name their declaring symbol before it
//! is published.
//!
//! # Example
//!
//! ```rust
//! use docscope::symbols::{Language, PrimitiveKind, RefKind, SymbolRegistry};
//!
//! let registry = SymbolRegistry::new(Language::CSharp);
//! let ns = registry.namespace_path("Acme")?;
//! let parser = registry.named_type(&ns, "Parser").build()?;
//! let int32 = registry.primitive(PrimitiveKind::Int32)?;
//!
//! // T Parse<T>(string text, out int consumed)
//! let mut parse = registry.method(&parser, "Parse");
//! let t = parse.type_parameter("T");
//! let parse = parse
//!     .parameter("text", &registry.primitive(PrimitiveKind::String)?)
//!     .ref_parameter("consumed", &int32, RefKind::Out)
//!     .returns(&t)
//!     .build()?;
//!
//! assert_eq!(parse.arity(), 1);
//! assert_eq!(parse.parameters().len(), 2);
//! # Ok::<(), docscope::Error>(())
//! ```

use crate::{
    symbols::{RefKind, Symbol, SymbolFlavor, SymbolRc, SymbolRegistry, Token},
    Error::TypeError,
    Result,
};

/// Publish a type parameter of the symbol `owner`
fn publish_type_parameter(
    registry: &SymbolRegistry,
    owner: Token,
    name: &str,
    ordinal: usize,
) -> SymbolRc {
    let token = registry.next_token(Token::GENERIC_PARAM);
    registry.publish(
        Symbol::new(
            token,
            name.to_string(),
            Some(owner),
            SymbolFlavor::TypeParameter {
                ordinal: u32::try_from(ordinal).unwrap_or(u32::MAX),
            },
        ),
        false,
    )
}

/// A parameter waiting for its declaring symbol to be published
struct PendingParameter {
    name: String,
    parameter_type: SymbolRc,
    ref_kind: RefKind,
}

/// Publish the parameters of `owner`, returning their tokens in order
fn publish_parameters(
    registry: &SymbolRegistry,
    owner: Token,
    parameters: Vec<PendingParameter>,
) -> Result<Vec<Token>> {
    if let Some(bad) = parameters
        .iter()
        .find(|parameter| !parameter.parameter_type.is_type())
    {
        return Err(TypeError(format!(
            "Parameter {} must be typed by a type, not a {} - {}",
            bad.name,
            bad.parameter_type.kind(),
            bad.parameter_type.token
        )));
    }

    Ok(parameters
        .into_iter()
        .map(|parameter| {
            let token = registry.next_token(Token::PARAMETER);
            registry
                .publish(
                    Symbol::new(
                        token,
                        parameter.name,
                        Some(owner),
                        SymbolFlavor::Parameter {
                            parameter_type: parameter.parameter_type.token,
                            ref_kind: parameter.ref_kind,
                        },
                    ),
                    false,
                )
                .token
        })
        .collect())
}

/// Provides a fluent API for building named types
pub struct TypeBuilder<'a> {
    /// Registry receiving the type
    registry: &'a SymbolRegistry,
    /// Reserved token of the type
    token: Token,
    /// Namespace or type declaring the new type
    container: SymbolRc,
    /// Simple name
    name: String,
    /// Published type parameters, in order
    type_parameters: Vec<SymbolRc>,
}

impl<'a> TypeBuilder<'a> {
    /// Create a new builder, prefer [`SymbolRegistry::named_type`]
    ///
    /// ## Arguments
    /// * 'registry'  - The registry to add the type to
    /// * 'container' - The containing namespace or type definition
    /// * 'name'      - The simple name, without arity suffix
    pub fn new(registry: &'a SymbolRegistry, container: &SymbolRc, name: &str) -> Self {
        TypeBuilder {
            registry,
            token: registry.next_token(Token::TYPE),
            container: container.clone(),
            name: name.to_string(),
            type_parameters: Vec::new(),
        }
    }

    /// The token the type will be published under
    #[must_use]
    pub fn token(&self) -> Token {
        self.token
    }

    /// Declare the next type parameter and return it
    ///
    /// ## Arguments
    /// * 'name' - Name of the type parameter
    pub fn type_parameter(&mut self, name: &str) -> SymbolRc {
        let type_parameter = publish_type_parameter(
            self.registry,
            self.token,
            name,
            self.type_parameters.len(),
        );
        self.type_parameters.push(type_parameter.clone());
        type_parameter
    }

    /// Declare several type parameters at once
    ///
    /// ## Arguments
    /// * 'names' - Names of the type parameters, in order
    #[must_use]
    pub fn type_parameters(mut self, names: &[&str]) -> Self {
        for name in names {
            self.type_parameter(name);
        }
        self
    }

    /// Publish the type
    ///
    /// # Errors
    /// Returns an error if the container is neither a namespace nor a type definition or
    /// the name is empty.
    pub fn build(self) -> Result<SymbolRc> {
        let container_ok = match self.container.flavor {
            SymbolFlavor::Namespace => true,
            SymbolFlavor::NamedType { definition, .. } => definition.is_none(),
            _ => false,
        };
        if !container_ok {
            return Err(malformed_error!(
                "Type {} can not be declared inside {} - {}",
                self.name,
                self.container.kind(),
                self.container.token
            ));
        }
        if self.name.is_empty() {
            return Err(malformed_error!("Type names can not be empty"));
        }

        Ok(self.registry.publish(
            Symbol::new(
                self.token,
                self.name,
                Some(self.container.token),
                SymbolFlavor::NamedType {
                    type_parameters: self.type_parameters.iter().map(|tp| tp.token).collect(),
                    type_arguments: Vec::new(),
                    definition: None,
                },
            ),
            true,
        ))
    }
}

/// Provides a fluent API for building methods
pub struct MethodBuilder<'a> {
    /// Registry receiving the method
    registry: &'a SymbolRegistry,
    /// Reserved token of the method
    token: Token,
    /// Declaring type
    container: SymbolRc,
    /// Method name
    name: String,
    /// Published type parameters, in order
    type_parameters: Vec<SymbolRc>,
    /// Parameters, published together with the method
    parameters: Vec<PendingParameter>,
    /// `None` for void
    return_type: Option<SymbolRc>,
}

impl<'a> MethodBuilder<'a> {
    /// Create a new builder, prefer [`SymbolRegistry::method`]
    ///
    /// ## Arguments
    /// * 'registry'  - The registry to add the method to
    /// * 'container' - The declaring type definition
    /// * 'name'      - The method name
    pub fn new(registry: &'a SymbolRegistry, container: &SymbolRc, name: &str) -> Self {
        MethodBuilder {
            registry,
            token: registry.next_token(Token::METHOD),
            container: container.clone(),
            name: name.to_string(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
        }
    }

    /// The token the method will be published under
    #[must_use]
    pub fn token(&self) -> Token {
        self.token
    }

    /// Declare the next method type parameter and return it, so it can be used in the
    /// signature
    ///
    /// ## Arguments
    /// * 'name' - Name of the type parameter
    pub fn type_parameter(&mut self, name: &str) -> SymbolRc {
        let type_parameter = publish_type_parameter(
            self.registry,
            self.token,
            name,
            self.type_parameters.len(),
        );
        self.type_parameters.push(type_parameter.clone());
        type_parameter
    }

    /// Declare several type parameters at once
    ///
    /// ## Arguments
    /// * 'names' - Names of the type parameters, in order
    #[must_use]
    pub fn type_parameters(mut self, names: &[&str]) -> Self {
        for name in names {
            self.type_parameter(name);
        }
        self
    }

    /// An already declared type parameter
    ///
    /// ## Arguments
    /// * 'ordinal' - Position of the type parameter
    #[must_use]
    pub fn type_parameter_at(&self, ordinal: usize) -> Option<SymbolRc> {
        self.type_parameters.get(ordinal).cloned()
    }

    /// Add a by-value parameter
    ///
    /// ## Arguments
    /// * 'name'           - Parameter name
    /// * 'parameter_type' - Parameter type
    #[must_use]
    pub fn parameter(self, name: &str, parameter_type: &SymbolRc) -> Self {
        self.ref_parameter(name, parameter_type, RefKind::None)
    }

    /// Add a parameter with an explicit passing mode
    ///
    /// ## Arguments
    /// * 'name'           - Parameter name
    /// * 'parameter_type' - Parameter type
    /// * 'ref_kind'       - How the parameter is passed
    #[must_use]
    pub fn ref_parameter(mut self, name: &str, parameter_type: &SymbolRc, ref_kind: RefKind) -> Self {
        self.parameters.push(PendingParameter {
            name: name.to_string(),
            parameter_type: parameter_type.clone(),
            ref_kind,
        });
        self
    }

    /// Set the return type, methods without one return `void`
    ///
    /// ## Arguments
    /// * 'return_type' - The return type
    #[must_use]
    pub fn returns(mut self, return_type: &SymbolRc) -> Self {
        self.return_type = Some(return_type.clone());
        self
    }

    /// Publish the method and its parameters
    ///
    /// # Errors
    /// Returns an error if the container is not a type definition or a parameter or the
    /// return type is not a type.
    pub fn build(self) -> Result<SymbolRc> {
        SymbolRegistry::ensure_member_container(&self.container, &self.name)?;
        if let Some(return_type) = self.return_type.as_ref().filter(|ty| !ty.is_type()) {
            return Err(TypeError(format!(
                "Return type of {} must be a type, not a {} - {}",
                self.name,
                return_type.kind(),
                return_type.token
            )));
        }

        let parameters = publish_parameters(self.registry, self.token, self.parameters)?;

        Ok(self.registry.publish(
            Symbol::new(
                self.token,
                self.name,
                Some(self.container.token),
                SymbolFlavor::Method {
                    type_parameters: self.type_parameters.iter().map(|tp| tp.token).collect(),
                    parameters,
                    return_type: self.return_type.map(|ty| ty.token),
                },
            ),
            true,
        ))
    }
}

/// Provides a fluent API for building properties and indexers
pub struct PropertyBuilder<'a> {
    /// Registry receiving the property
    registry: &'a SymbolRegistry,
    /// Reserved token of the property
    token: Token,
    /// Declaring type
    container: SymbolRc,
    /// Property name
    name: String,
    /// Indexer parameters
    parameters: Vec<PendingParameter>,
    /// Property type
    value_type: Option<SymbolRc>,
}

impl<'a> PropertyBuilder<'a> {
    /// Create a new builder, prefer [`SymbolRegistry::property`] or
    /// [`SymbolRegistry::indexer`]
    ///
    /// ## Arguments
    /// * 'registry'  - The registry to add the property to
    /// * 'container' - The declaring type definition
    /// * 'name'      - The property name
    pub fn new(registry: &'a SymbolRegistry, container: &SymbolRc, name: &str) -> Self {
        PropertyBuilder {
            registry,
            token: registry.next_token(Token::PROPERTY),
            container: container.clone(),
            name: name.to_string(),
            parameters: Vec::new(),
            value_type: None,
        }
    }

    /// Add a by-value indexer parameter
    ///
    /// ## Arguments
    /// * 'name'           - Parameter name
    /// * 'parameter_type' - Parameter type
    #[must_use]
    pub fn parameter(self, name: &str, parameter_type: &SymbolRc) -> Self {
        self.ref_parameter(name, parameter_type, RefKind::None)
    }

    /// Add an indexer parameter with an explicit passing mode
    ///
    /// ## Arguments
    /// * 'name'           - Parameter name
    /// * 'parameter_type' - Parameter type
    /// * 'ref_kind'       - How the parameter is passed
    #[must_use]
    pub fn ref_parameter(mut self, name: &str, parameter_type: &SymbolRc, ref_kind: RefKind) -> Self {
        self.parameters.push(PendingParameter {
            name: name.to_string(),
            parameter_type: parameter_type.clone(),
            ref_kind,
        });
        self
    }

    /// Set the property type
    ///
    /// ## Arguments
    /// * 'value_type' - The type of the property
    #[must_use]
    pub fn value_type(mut self, value_type: &SymbolRc) -> Self {
        self.value_type = Some(value_type.clone());
        self
    }

    /// Publish the property and its parameters
    ///
    /// # Errors
    /// Returns an error if the container is not a type definition or a parameter is not
    /// typed by a type.
    pub fn build(self) -> Result<SymbolRc> {
        SymbolRegistry::ensure_member_container(&self.container, &self.name)?;

        let parameters = publish_parameters(self.registry, self.token, self.parameters)?;

        Ok(self.registry.publish(
            Symbol::new(
                self.token,
                self.name,
                Some(self.container.token),
                SymbolFlavor::Property {
                    parameters,
                    value_type: self.value_type.map(|ty| ty.token),
                },
            ),
            true,
        ))
    }
}
