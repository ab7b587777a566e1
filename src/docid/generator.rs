//! Streaming generation of declaration and reference IDs.
//!
//! Both ID flavors are written straight into one `String`. Dispatch is an exhaustive match
//! over [`SymbolFlavor`]; containing symbols are visited first so the dotted path grows left
//! to right.
//!
//! Reference IDs are written relative to a *type parameter context*: the method or property
//! whose signature is being rendered. A type parameter declared by the context or by one of
//! its containing symbols is in scope and written bare (`` `0 ``, ` ``0 `), any other type
//! parameter is qualified with the declaration ID of its declaring symbol
//! (`` T:N.C`1:`0 ``). A standalone reference ID has no context at all.

use crate::{
    docid::{encode_name, names::encode_property_name, DocIdConfig, DocIdKind, PrefixMode},
    symbols::{Compilation, PrimitiveKind, RefKind, Symbol, SymbolFlavor, SymbolRc, Token},
    Error::{NoDeclarationId, NoReferenceId, RecursionLimit, SymbolNotFound, TypeError},
    Result,
};

/// True if `symbol` is `System.Void`
pub(crate) fn is_void_type<C: Compilation + ?Sized>(compilation: &C, symbol: &Symbol) -> bool {
    if !matches!(symbol.flavor, SymbolFlavor::NamedType { .. })
        || symbol.name != PrimitiveKind::Void.name()
    {
        return false;
    }

    compilation.containing(symbol).is_some_and(|namespace| {
        namespace.is_namespace()
            && namespace.name == PrimitiveKind::NAMESPACE
            && compilation
                .containing(&namespace)
                .is_some_and(|global| global.is_global_namespace())
    })
}

/// Writes documentation-comment IDs for symbols of one compilation
pub(crate) struct Generator<'c, C: Compilation + ?Sized> {
    compilation: &'c C,
    config: &'c DocIdConfig,
}

impl<'c, C: Compilation + ?Sized> Generator<'c, C> {
    pub(crate) fn new(compilation: &'c C, config: &'c DocIdConfig) -> Self {
        Generator {
            compilation,
            config,
        }
    }

    /// The declaration ID of `symbol`
    pub(crate) fn declaration_id(&self, symbol: &Symbol, prefix: PrefixMode) -> Result<String> {
        let mut out = String::new();
        self.write_declaration(&mut out, symbol, prefix, 0)?;
        Ok(out)
    }

    /// The standalone reference ID of `symbol`, namespaces are referenced by their
    /// declaration ID
    pub(crate) fn reference_id(&self, symbol: &Symbol) -> Result<String> {
        if let SymbolFlavor::Alias { target } = symbol.flavor {
            let target = self.resolve(target)?;
            return self.reference_id(&target);
        }
        if symbol.is_namespace() {
            return self.declaration_id(symbol, PrefixMode::Emit);
        }

        let mut out = String::new();
        self.write_reference(&mut out, symbol, None, 0)?;
        Ok(out)
    }

    fn resolve(&self, token: Token) -> Result<SymbolRc> {
        self.compilation.symbol(token).ok_or(SymbolNotFound(token))
    }

    fn container(&self, symbol: &Symbol) -> Result<Option<SymbolRc>> {
        symbol.containing.map(|token| self.resolve(token)).transpose()
    }

    fn descend(&self, depth: usize) -> Result<usize> {
        if depth >= self.config.max_recursion_depth {
            return Err(RecursionLimit(self.config.max_recursion_depth));
        }
        Ok(depth + 1)
    }

    /// Kind letter, `:` and the dotted declaration path of `symbol`
    fn write_declaration(
        &self,
        out: &mut String,
        symbol: &Symbol,
        prefix: PrefixMode,
        depth: usize,
    ) -> Result<()> {
        let kind = DocIdKind::for_symbol(symbol).ok_or(NoDeclarationId(symbol.kind()))?;
        if prefix == PrefixMode::Emit {
            out.push(kind.letter());
            out.push(':');
        }

        self.write_declaration_path(out, symbol, depth)?;
        Ok(())
    }

    /// Returns false if nothing was written (the global namespace)
    fn write_declaration_path(&self, out: &mut String, symbol: &Symbol, depth: usize) -> Result<bool> {
        let depth = self.descend(depth)?;

        match &symbol.flavor {
            SymbolFlavor::Namespace => self.write_namespace(out, symbol, depth),
            SymbolFlavor::NamedType {
                type_parameters, ..
            } => {
                self.write_container_path(out, symbol, depth)?;
                out.push_str(&encode_name(&symbol.name));
                if !type_parameters.is_empty() {
                    out.push('`');
                    out.push_str(&type_parameters.len().to_string());
                }
                Ok(true)
            }
            SymbolFlavor::Method {
                type_parameters,
                parameters,
                return_type,
            } => {
                self.write_container_path(out, symbol, depth)?;
                out.push_str(&encode_name(&symbol.name));
                if !type_parameters.is_empty() {
                    out.push_str("``");
                    out.push_str(&type_parameters.len().to_string());
                }
                self.write_parameters(out, parameters, symbol, depth)?;

                let return_type = return_type.map(|token| self.resolve(token)).transpose()?;
                let returns_void = return_type
                    .as_ref()
                    .map_or(true, |ty| is_void_type(self.compilation, ty));
                if let Some(return_type) = return_type {
                    if self.config.emits_return_type(&symbol.name, returns_void) {
                        out.push('~');
                        self.write_reference(out, &return_type, Some(symbol), depth)?;
                    }
                }
                Ok(true)
            }
            SymbolFlavor::Property { parameters, .. } => {
                self.write_container_path(out, symbol, depth)?;
                let name = encode_property_name(&symbol.name, self.compilation.language());
                out.push_str(&encode_name(&name));
                self.write_parameters(out, parameters, symbol, depth)?;
                Ok(true)
            }
            SymbolFlavor::Field { .. } | SymbolFlavor::Event { .. } => {
                self.write_container_path(out, symbol, depth)?;
                out.push_str(&encode_name(&symbol.name));
                Ok(true)
            }
            SymbolFlavor::Parameter { .. }
            | SymbolFlavor::TypeParameter { .. }
            | SymbolFlavor::ArrayType { .. }
            | SymbolFlavor::PointerType { .. }
            | SymbolFlavor::Alias { .. } => Err(NoDeclarationId(symbol.kind())),
        }
    }

    /// The declaration path of the containing symbol followed by `.`
    fn write_container_path(&self, out: &mut String, symbol: &Symbol, depth: usize) -> Result<()> {
        if let Some(container) = self.container(symbol)? {
            if self.write_declaration_path(out, &container, depth)? {
                out.push('.');
            }
        }
        Ok(())
    }

    /// Dotted namespace path, nothing for the global namespace
    fn write_namespace(&self, out: &mut String, namespace: &Symbol, depth: usize) -> Result<bool> {
        if namespace.is_global_namespace() {
            return Ok(false);
        }

        if let Some(container) = self.container(namespace)? {
            let depth = self.descend(depth)?;
            if self.write_namespace(out, &container, depth)? {
                out.push('.');
            }
        }
        out.push_str(&encode_name(&namespace.name));
        Ok(true)
    }

    /// `(T1,T2@)` for a non-empty parameter list
    fn write_parameters(
        &self,
        out: &mut String,
        parameters: &[Token],
        context: &Symbol,
        depth: usize,
    ) -> Result<()> {
        if parameters.is_empty() {
            return Ok(());
        }

        out.push('(');
        for (index, token) in parameters.iter().enumerate() {
            if index > 0 {
                out.push(',');
            }

            let parameter = self.resolve(*token)?;
            let SymbolFlavor::Parameter {
                parameter_type,
                ref_kind,
            } = parameter.flavor
            else {
                return Err(TypeError(format!(
                    "Expected a parameter, found a {} - {}",
                    parameter.kind(),
                    parameter.token
                )));
            };

            let parameter_type = self.resolve(parameter_type)?;
            self.write_reference(out, &parameter_type, Some(context), depth)?;
            if ref_kind != RefKind::None {
                out.push('@');
            }
        }
        out.push(')');

        Ok(())
    }

    /// Write the reference form of a type or namespace; returns false if nothing was
    /// written (the global namespace)
    pub(crate) fn write_reference(
        &self,
        out: &mut String,
        symbol: &Symbol,
        context: Option<&Symbol>,
        depth: usize,
    ) -> Result<bool> {
        let depth = self.descend(depth)?;

        match &symbol.flavor {
            SymbolFlavor::Alias { target } => {
                let target = self.resolve(*target)?;
                self.write_reference(out, &target, context, depth)
            }
            SymbolFlavor::Namespace => self.write_namespace(out, symbol, depth),
            SymbolFlavor::NamedType {
                type_parameters,
                type_arguments,
                definition,
            } => {
                if let Some(container) = self.container(symbol)? {
                    if self.write_reference(out, &container, context, depth)? {
                        out.push('.');
                    }
                }
                out.push_str(&encode_name(&symbol.name));

                if definition.is_some() {
                    out.push('{');
                    for (index, argument) in type_arguments.iter().enumerate() {
                        if index > 0 {
                            out.push(',');
                        }
                        let argument = self.resolve(*argument)?;
                        self.write_reference(out, &argument, context, depth)?;
                    }
                    out.push('}');
                } else if !type_parameters.is_empty() {
                    out.push('`');
                    out.push_str(&type_parameters.len().to_string());
                }
                Ok(true)
            }
            SymbolFlavor::ArrayType { element, rank } => {
                let element = self.resolve(*element)?;
                self.write_reference(out, &element, context, depth)?;

                // TODO: lower bounds and sizes are not modelled, only the rank survives
                out.push('[');
                for _ in 1..*rank {
                    out.push(',');
                }
                out.push(']');
                Ok(true)
            }
            SymbolFlavor::PointerType { pointed_at } => {
                let pointed_at = self.resolve(*pointed_at)?;
                self.write_reference(out, &pointed_at, context, depth)?;
                out.push('*');
                Ok(true)
            }
            SymbolFlavor::TypeParameter { ordinal } => {
                self.write_type_parameter(out, symbol, *ordinal, context, depth)?;
                Ok(true)
            }
            SymbolFlavor::Method { .. }
            | SymbolFlavor::Property { .. }
            | SymbolFlavor::Field { .. }
            | SymbolFlavor::Event { .. }
            | SymbolFlavor::Parameter { .. } => Err(NoReferenceId(symbol.kind())),
        }
    }

    fn write_type_parameter(
        &self,
        out: &mut String,
        type_parameter: &Symbol,
        ordinal: u32,
        context: Option<&Symbol>,
        depth: usize,
    ) -> Result<()> {
        let declarer = self.container(type_parameter)?.ok_or_else(|| {
            malformed_error!(
                "Type parameter {} has no declaring symbol - {}",
                type_parameter.name,
                type_parameter.token
            )
        })?;

        if !self.is_in_scope(&declarer, context)? {
            self.write_declaration(out, &declarer, PrefixMode::Emit, depth)?;
            out.push(':');
        }

        if matches!(declarer.flavor, SymbolFlavor::Method { .. }) {
            out.push_str("``");
            out.push_str(&ordinal.to_string());
        } else {
            let enclosing = self.container(&declarer)?;
            let preceding = self.cumulative_type_parameter_count(enclosing)?;
            out.push('`');
            out.push_str(&(preceding + ordinal as usize).to_string());
        }

        Ok(())
    }

    /// True if `declarer` is `context` or one of its containing symbols
    fn is_in_scope(&self, declarer: &Symbol, context: Option<&Symbol>) -> Result<bool> {
        let Some(context) = context else {
            return Ok(false);
        };
        if context.token == declarer.token {
            return Ok(true);
        }

        let mut scope = self.container(context)?;
        let mut steps = 0;
        while let Some(current) = scope {
            if current.token == declarer.token {
                return Ok(true);
            }
            steps = self.descend(steps)?;
            scope = self.container(&current)?;
        }

        Ok(false)
    }

    /// Number of type parameters declared by `symbol` and all its containing types
    fn cumulative_type_parameter_count(&self, mut symbol: Option<SymbolRc>) -> Result<usize> {
        let mut count = 0;
        let mut steps = 0;
        while let Some(current) = symbol {
            if !matches!(current.flavor, SymbolFlavor::NamedType { .. }) {
                break;
            }
            count += current.arity();
            steps = self.descend(steps)?;
            symbol = self.container(&current)?;
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        docid::ReturnTypeSuffix,
        symbols::{Language, SymbolRegistry},
        test::SampleGraph,
        Error,
    };

    fn declaration(graph: &SampleGraph, symbol: &Symbol) -> String {
        let config = DocIdConfig::default();
        Generator::new(&graph.registry, &config)
            .declaration_id(symbol, PrefixMode::Emit)
            .unwrap()
    }

    fn reference(graph: &SampleGraph, symbol: &Symbol) -> String {
        let config = DocIdConfig::default();
        Generator::new(&graph.registry, &config)
            .reference_id(symbol)
            .unwrap()
    }

    #[test]
    fn test_declaration_ids() {
        let graph = SampleGraph::new();

        assert_eq!(declaration(&graph, &graph.namespace), "N:Acme.Collections");
        assert_eq!(declaration(&graph, &graph.bag), "T:Acme.Collections.Bag");
        assert_eq!(
            declaration(&graph, &graph.enumerator),
            "T:Acme.Collections.Bag.Enumerator"
        );
        assert_eq!(
            declaration(&graph, &graph.add_int),
            "M:Acme.Collections.Bag.Add(System.Int32)"
        );
        assert_eq!(declaration(&graph, &graph.clear), "M:Acme.Collections.Bag.Clear");
        assert_eq!(
            declaration(&graph, &graph.try_take),
            "M:Acme.Collections.Bag.TryTake(System.Int32@)~System.Boolean"
        );
        assert_eq!(
            declaration(&graph, &graph.copy),
            "M:Acme.Collections.Bag.Copy(System.Int32[][],System.Int32*,System.Int32[,])"
        );
        assert_eq!(
            declaration(&graph, &graph.sum),
            "M:Acme.Collections.Bag.Sum(Acme.Collections.Box{System.Int32})~System.Int32"
        );
        assert_eq!(
            declaration(&graph, &graph.count_field),
            "F:Acme.Collections.Bag.count"
        );
        assert_eq!(
            declaration(&graph, &graph.count_property),
            "P:Acme.Collections.Bag.Count"
        );
        assert_eq!(
            declaration(&graph, &graph.changed),
            "E:Acme.Collections.Bag.Changed"
        );
        assert_eq!(
            declaration(&graph, &graph.dotted_field),
            "F:Acme.Collections.Bag.A#B"
        );
    }

    #[test]
    fn test_indexer_is_named_item() {
        let graph = SampleGraph::new();
        assert_eq!(graph.indexer.name, "this[]");
        assert_eq!(
            declaration(&graph, &graph.indexer),
            "P:Acme.Collections.Bag.Item(System.Int32)"
        );
    }

    #[test]
    fn test_generic_declaration_ids() {
        let graph = SampleGraph::new();

        assert_eq!(declaration(&graph, &graph.map), "T:Acme.Collections.Map`2");
        assert_eq!(declaration(&graph, &graph.box1), "T:Acme.Collections.Box`1");
        assert_eq!(declaration(&graph, &graph.box2), "T:Acme.Collections.Box`2");
        assert_eq!(
            declaration(&graph, &graph.get),
            "M:Acme.Collections.Map`2.Get(`0)~`1"
        );
        assert_eq!(
            declaration(&graph, &graph.convert),
            "M:Acme.Collections.Map`2.Convert``1(`1,``0)~``0"
        );
        assert_eq!(
            declaration(&graph, &graph.node),
            "T:Acme.Collections.Map`2.Node`1"
        );
        assert_eq!(
            declaration(&graph, &graph.link),
            "M:Acme.Collections.Map`2.Node`1.Link(`0,`2)"
        );
    }

    #[test]
    fn test_reference_ids() {
        let graph = SampleGraph::new();
        let int32 = graph.registry.primitive(PrimitiveKind::Int32).unwrap();
        let boxed = graph.registry.construct(&graph.box1, &[int32]).unwrap();

        assert_eq!(reference(&graph, &boxed), "Acme.Collections.Box{System.Int32}");
        assert_eq!(reference(&graph, &graph.map), "Acme.Collections.Map`2");
        assert_eq!(reference(&graph, &graph.namespace), "N:Acme.Collections");
    }

    #[test]
    fn test_type_parameter_scope_qualifier() {
        let graph = SampleGraph::new();
        let config = DocIdConfig::default();
        let generator = Generator::new(&graph.registry, &config);

        let tkey = graph.registry.symbol(graph.map.type_parameters()[0]).unwrap();
        let titem = graph.registry.symbol(graph.node.type_parameters()[0]).unwrap();
        let tresult = graph.registry.symbol(graph.convert.type_parameters()[0]).unwrap();

        // no context, always qualified
        assert_eq!(reference(&graph, &tkey), "T:Acme.Collections.Map`2:`0");
        assert_eq!(reference(&graph, &titem), "T:Acme.Collections.Map`2.Node`1:`2");
        assert_eq!(
            reference(&graph, &tresult),
            "M:Acme.Collections.Map`2.Convert``1(`1,``0)~``0:``0"
        );

        // in scope of the declaring type or one of its members
        let mut out = String::new();
        generator
            .write_reference(&mut out, &tkey, Some(&graph.link), 0)
            .unwrap();
        assert_eq!(out, "`0");

        // out of scope
        let mut out = String::new();
        generator
            .write_reference(&mut out, &tkey, Some(&graph.bag), 0)
            .unwrap();
        assert_eq!(out, "T:Acme.Collections.Map`2:`0");
    }

    #[test]
    fn test_return_type_policies() {
        let graph = SampleGraph::new();

        let compiler = DocIdConfig::compiler_compatible();
        let generator = Generator::new(&graph.registry, &compiler);
        assert_eq!(
            generator.declaration_id(&graph.try_take, PrefixMode::Emit).unwrap(),
            "M:Acme.Collections.Bag.TryTake(System.Int32@)"
        );
        assert_eq!(
            generator.declaration_id(&graph.to_int, PrefixMode::Emit).unwrap(),
            "M:Acme.Collections.Bag.op_Implicit(Acme.Collections.Bag)~System.Int32"
        );

        let never = DocIdConfig {
            return_types: ReturnTypeSuffix::Never,
            ..DocIdConfig::default()
        };
        let generator = Generator::new(&graph.registry, &never);
        assert_eq!(
            generator.declaration_id(&graph.to_int, PrefixMode::Omit).unwrap(),
            "Acme.Collections.Bag.op_Implicit(Acme.Collections.Bag)"
        );
    }

    #[test]
    fn test_explicit_void_return_is_omitted() {
        let registry = SymbolRegistry::new(Language::CSharp);
        let class = registry
            .named_type(&registry.namespace_path("N").unwrap(), "C")
            .build()
            .unwrap();
        let void = registry.primitive(PrimitiveKind::Void).unwrap();
        let method = registry.method(&class, "F").returns(&void).build().unwrap();

        let config = DocIdConfig::default();
        let generator = Generator::new(&registry, &config);
        assert_eq!(
            generator.declaration_id(&method, PrefixMode::Emit).unwrap(),
            "M:N.C.F"
        );
        assert!(is_void_type(&registry, &void));
        assert!(!is_void_type(&registry, &class));
    }

    #[test]
    fn test_contract_violations() {
        let graph = SampleGraph::new();
        let config = DocIdConfig::default();
        let generator = Generator::new(&graph.registry, &config);

        let parameter = graph.registry.symbol(graph.add_int.parameters()[0]).unwrap();
        assert!(matches!(
            generator.declaration_id(&parameter, PrefixMode::Emit),
            Err(Error::NoDeclarationId(crate::symbols::SymbolKind::Parameter))
        ));
        assert!(matches!(
            generator.reference_id(&graph.add_int),
            Err(Error::NoReferenceId(crate::symbols::SymbolKind::Method))
        ));
    }

    #[test]
    fn test_recursion_limit() {
        let graph = SampleGraph::new();
        let config = DocIdConfig {
            max_recursion_depth: 2,
            ..DocIdConfig::default()
        };
        let generator = Generator::new(&graph.registry, &config);

        assert!(matches!(
            generator.declaration_id(&graph.link, PrefixMode::Emit),
            Err(Error::RecursionLimit(2))
        ));
    }
}
