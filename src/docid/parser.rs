//! Declaration-ID parsing and the member matching shared with reference parsing.
//!
//! Parsing never fails loudly. Every step works on a list of candidates: an ambiguous
//! segment fans out, and a segment without candidates ends the parse with no result. The
//! dead ends are reported as `trace` events so a lookup that unexpectedly comes back empty
//! can be diagnosed with a subscriber installed.
//!
//! # Grammar
//!
//! ```text
//! declaration := kind ':'? segment ('.' segment)* member-suffix
//! kind        := 'E' | 'F' | 'M' | 'N' | 'P' | 'T'
//! segment     := name ('`' digits | '``' digits)?
//! member-suffix (methods)    := ('(' parameter (',' parameter)* ')')? ('~' type)?
//! member-suffix (properties) := ('(' parameter (',' parameter)* ')')?
//! parameter   := type '@'?
//! ```
//!
//! `type` is the reference grammar parsed by the functions in `reference.rs`.

use tracing::trace;

use crate::{
    docid::{
        generator::is_void_type, names::decode_property_name, parse_name, read_integer,
        types::ParameterInfo, DocIdConfig, DocIdKind, IdCursor,
    },
    symbols::{Compilation, RefKind, Symbol, SymbolFlavor, SymbolRc, Token},
};

/// True while no path segment has been consumed
fn is_root(containers: &[SymbolRc]) -> bool {
    matches!(containers, [only] if only.is_global_namespace())
}

/// Recursive-descent parser resolving IDs against one compilation
pub(crate) struct IdParser<'c, C: Compilation + ?Sized> {
    pub(crate) compilation: &'c C,
    pub(crate) config: &'c DocIdConfig,
    /// Current nesting of declaration and type parses
    depth: usize,
}

impl<'c, C: Compilation + ?Sized> IdParser<'c, C> {
    pub(crate) fn new(compilation: &'c C, config: &'c DocIdConfig) -> Self {
        IdParser {
            compilation,
            config,
            depth: 0,
        }
    }

    /// All symbols matching a complete declaration ID
    ///
    /// ## Arguments
    /// * 'id'   - The ID to resolve
    /// * 'kind' - The kind of an ID whose `X:` prefix was stripped, `None` to read it
    pub(crate) fn parse_declaration_id(&mut self, id: &str, kind: Option<DocIdKind>) -> Vec<SymbolRc> {
        let mut cursor = IdCursor::new(id);
        let mut results = Vec::new();
        self.parse_declared_id(&mut cursor, kind, &mut results);
        results
    }

    /// All symbols matching a complete reference ID, `N:` IDs name namespaces
    ///
    /// ## Arguments
    /// * 'id' - The ID to resolve
    pub(crate) fn parse_reference_id(&mut self, id: &str) -> Vec<SymbolRc> {
        let mut cursor = IdCursor::new(id);
        let mut results = Vec::new();
        if cursor.starts_with("N:") {
            self.parse_declared_id(&mut cursor, None, &mut results);
        } else {
            self.parse_types(&mut cursor, None, &mut results);
        }
        results
    }

    /// Track one more level of nesting, false once the configured limit is reached
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= self.config.max_recursion_depth {
            trace!(limit = self.config.max_recursion_depth, "documentation id nests too deep");
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn resolve(&self, token: Token) -> Option<SymbolRc> {
        let symbol = self.compilation.symbol(token);
        if symbol.is_none() {
            trace!(%token, "dangling token in symbol graph");
        }
        symbol
    }

    /// Parse a declaration ID at the cursor and append its matches to `results`.
    ///
    /// Returns false if nothing matched.
    pub(crate) fn parse_declared_id(
        &mut self,
        cursor: &mut IdCursor<'_>,
        kind: Option<DocIdKind>,
        results: &mut Vec<SymbolRc>,
    ) -> bool {
        if !self.enter() {
            return false;
        }
        let found = self.parse_declared_id_inner(cursor, kind, results);
        self.leave();
        found
    }

    fn parse_declared_id_inner(
        &mut self,
        cursor: &mut IdCursor<'_>,
        kind: Option<DocIdKind>,
        results: &mut Vec<SymbolRc>,
    ) -> bool {
        let kind = match kind {
            Some(kind) => kind,
            None => {
                let Some(kind) = DocIdKind::from_letter(cursor.peek()) else {
                    trace!(letter = %cursor.peek(), "unknown declaration kind");
                    return false;
                };
                cursor.advance();
                kind
            }
        };
        cursor.eat(':');

        let mut containers = vec![self.compilation.global_namespace()];
        let (name, arity) = loop {
            let name = parse_name(cursor);
            let mut arity = 0;
            if cursor.eat('`') {
                // methods use ``
                cursor.eat('`');
                arity = read_integer(cursor) as usize;
            }

            if !cursor.eat('.') {
                break (name, arity);
            }

            let next = if kind == DocIdKind::Namespace {
                self.matching_namespaces(&containers, &name)
            } else if arity > 0 {
                self.matching_types(&containers, &name, arity)
            } else {
                self.matching_namespaces_or_types(&containers, &name)
            };

            if next.is_empty() {
                trace!(segment = %name, arity, "path segment did not resolve");
                return false;
            }
            containers = next;
        };

        let before = results.len();
        match kind {
            DocIdKind::Method => self.matching_methods(cursor, &containers, &name, arity, results),
            DocIdKind::Property => self.matching_properties(cursor, &containers, &name, results),
            DocIdKind::NamedType => results.extend(self.matching_types(&containers, &name, arity)),
            DocIdKind::Field => results.extend(self.matching_members(&containers, &name, |member| {
                matches!(member.flavor, SymbolFlavor::Field { .. })
            })),
            DocIdKind::Event => results.extend(self.matching_members(&containers, &name, |member| {
                matches!(member.flavor, SymbolFlavor::Event { .. })
            })),
            DocIdKind::Namespace if name.is_empty() && arity == 0 && is_root(&containers) => {
                // `N:` is the global namespace
                results.extend(containers);
            }
            DocIdKind::Namespace => results.extend(self.matching_namespaces(&containers, &name)),
        }

        if results.len() == before {
            trace!(%kind, member = %name, "no member matched");
            return false;
        }
        true
    }

    /// Members of any container named `name`, aliases replaced by their targets
    fn members(&self, containers: &[SymbolRc], name: &str) -> Vec<SymbolRc> {
        containers
            .iter()
            .flat_map(|container| self.compilation.members(container, name))
            .filter_map(|member| self.follow_alias(member))
            .collect()
    }

    fn follow_alias(&self, mut symbol: SymbolRc) -> Option<SymbolRc> {
        for _ in 0..=self.config.max_recursion_depth {
            let SymbolFlavor::Alias { target } = symbol.flavor else {
                return Some(symbol);
            };
            symbol = self.resolve(target)?;
        }

        trace!(alias = %symbol.name, "alias chain exceeds the recursion limit");
        None
    }

    pub(crate) fn matching_members(
        &self,
        containers: &[SymbolRc],
        name: &str,
        filter: impl Fn(&Symbol) -> bool,
    ) -> Vec<SymbolRc> {
        let mut members = self.members(containers, name);
        members.retain(|member| filter(&**member));
        members
    }

    pub(crate) fn matching_namespaces(&self, containers: &[SymbolRc], name: &str) -> Vec<SymbolRc> {
        self.matching_members(containers, name, Symbol::is_namespace)
    }

    pub(crate) fn matching_types(
        &self,
        containers: &[SymbolRc],
        name: &str,
        arity: usize,
    ) -> Vec<SymbolRc> {
        self.matching_members(containers, name, |member| {
            matches!(member.flavor, SymbolFlavor::NamedType { .. }) && member.arity() == arity
        })
    }

    pub(crate) fn matching_namespaces_or_types(
        &self,
        containers: &[SymbolRc],
        name: &str,
    ) -> Vec<SymbolRc> {
        self.matching_members(containers, name, |member| {
            member.is_namespace()
                || (matches!(member.flavor, SymbolFlavor::NamedType { .. }) && member.arity() == 0)
        })
    }

    fn matching_methods(
        &mut self,
        cursor: &mut IdCursor<'_>,
        containers: &[SymbolRc],
        name: &str,
        arity: usize,
        results: &mut Vec<SymbolRc>,
    ) {
        let start = *cursor;
        let mut end = start;

        for candidate in self.members(containers, name) {
            let SymbolFlavor::Method { return_type, .. } = candidate.flavor else {
                continue;
            };
            if candidate.arity() != arity {
                continue;
            }

            *cursor = start;
            let mut parameters = Vec::new();
            if cursor.peek() == '('
                && !self.parse_parameter_list(cursor, Some(&candidate), &mut parameters)
            {
                trace!(method = %candidate.name, "parameter list did not resolve");
                continue;
            }
            if !self.all_parameters_match(&candidate, &parameters) {
                trace!(method = %candidate.name, token = %candidate.token, "overload rejected by parameters");
                continue;
            }

            if cursor.eat('~') {
                let Some(parsed) = self.parse_type(cursor, Some(&candidate)) else {
                    trace!(method = %candidate.name, "return type did not resolve");
                    continue;
                };
                if !self.return_type_matches(return_type, &parsed) {
                    trace!(method = %candidate.name, token = %candidate.token, "overload rejected by return type");
                    continue;
                }
            }

            if cursor.pos() > end.pos() {
                end = *cursor;
            }
            results.push(candidate);
        }

        *cursor = end;
    }

    fn matching_properties(
        &mut self,
        cursor: &mut IdCursor<'_>,
        containers: &[SymbolRc],
        name: &str,
        results: &mut Vec<SymbolRc>,
    ) {
        // `Item` names a C# indexer or an ordinary property called `Item`
        let indexer_name = decode_property_name(name, self.compilation.language());
        let mut candidates = self.members(containers, &indexer_name);
        if indexer_name != name {
            candidates.extend(self.members(containers, name));
        }

        let start = *cursor;
        let mut end = start;

        for candidate in candidates {
            if !matches!(candidate.flavor, SymbolFlavor::Property { .. }) {
                continue;
            }

            *cursor = start;
            let mut parameters = Vec::new();
            if cursor.peek() == '(' {
                // indexer signatures can only use the type parameters of the declaring type
                let context = self.compilation.containing(&candidate);
                if !self.parse_parameter_list(cursor, context.as_ref(), &mut parameters) {
                    trace!(property = %candidate.name, "parameter list did not resolve");
                    continue;
                }
            }
            if !self.all_parameters_match(&candidate, &parameters) {
                trace!(property = %candidate.name, token = %candidate.token, "indexer rejected by parameters");
                continue;
            }

            if cursor.pos() > end.pos() {
                end = *cursor;
            }
            results.push(candidate);
        }

        *cursor = end;
    }

    /// `(type, type@, ...)`; an empty `()` is accepted as no parameters
    fn parse_parameter_list(
        &mut self,
        cursor: &mut IdCursor<'_>,
        context: Option<&SymbolRc>,
        parameters: &mut Vec<ParameterInfo>,
    ) -> bool {
        if !cursor.eat('(') {
            return false;
        }
        if cursor.eat(')') {
            return true;
        }

        loop {
            let Some(parameter_type) = self.parse_type(cursor, context) else {
                return false;
            };
            parameters.push(ParameterInfo {
                parameter_type,
                is_ref_or_out: cursor.eat('@'),
            });

            match cursor.peek() {
                ',' => cursor.advance(),
                ')' => {
                    cursor.advance();
                    return true;
                }
                _ => return false,
            }
        }
    }

    fn all_parameters_match(&self, candidate: &Symbol, expected: &[ParameterInfo]) -> bool {
        let declared = candidate.parameters();
        declared.len() == expected.len()
            && declared
                .iter()
                .zip(expected)
                .all(|(token, expected)| self.parameter_matches(*token, expected))
    }

    /// Same type and a `@` exactly when the parameter is not passed by value
    fn parameter_matches(&self, parameter: Token, expected: &ParameterInfo) -> bool {
        let Some(parameter) = self.resolve(parameter) else {
            return false;
        };
        let SymbolFlavor::Parameter {
            parameter_type,
            ref_kind,
        } = parameter.flavor
        else {
            return false;
        };

        (ref_kind != RefKind::None) == expected.is_ref_or_out
            && parameter_type == expected.parameter_type.token
    }

    /// An absent return type means `void`
    fn return_type_matches(&self, declared: Option<Token>, parsed: &Symbol) -> bool {
        match declared {
            Some(token) => token == parsed.token,
            None => is_void_type(self.compilation, parsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        symbols::{Language, PrimitiveKind, SymbolRegistry},
        test::SampleGraph,
    };

    fn parse(graph: &SampleGraph, id: &str) -> Vec<Token> {
        let config = DocIdConfig::default();
        IdParser::new(&graph.registry, &config)
            .parse_declaration_id(id, None)
            .iter()
            .map(|symbol| symbol.token)
            .collect()
    }

    #[test]
    fn test_simple_declarations() {
        let graph = SampleGraph::new();

        assert_eq!(parse(&graph, "N:Acme.Collections"), [graph.namespace.token]);
        assert_eq!(parse(&graph, "T:Acme.Collections.Bag"), [graph.bag.token]);
        assert_eq!(
            parse(&graph, "T:Acme.Collections.Bag.Enumerator"),
            [graph.enumerator.token]
        );
        assert_eq!(parse(&graph, "F:Acme.Collections.Bag.count"), [graph.count_field.token]);
        assert_eq!(parse(&graph, "E:Acme.Collections.Bag.Changed"), [graph.changed.token]);
        assert_eq!(
            parse(&graph, "P:Acme.Collections.Bag.Count"),
            [graph.count_property.token]
        );
        assert_eq!(parse(&graph, "M:Acme.Collections.Bag.Clear"), [graph.clear.token]);
    }

    #[test]
    fn test_prefix_colon_is_optional() {
        let graph = SampleGraph::new();
        assert_eq!(parse(&graph, "TAcme.Collections.Bag"), [graph.bag.token]);

        let config = DocIdConfig::default();
        let found = IdParser::new(&graph.registry, &config)
            .parse_declaration_id("Acme.Collections.Bag.Clear", Some(DocIdKind::Method));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].token, graph.clear.token);
    }

    #[test]
    fn test_kind_filters_members() {
        let graph = SampleGraph::new();

        // count is a field, Count a property
        assert!(parse(&graph, "P:Acme.Collections.Bag.count").is_empty());
        assert!(parse(&graph, "E:Acme.Collections.Bag.count").is_empty());
        assert!(parse(&graph, "N:Acme.Collections.Bag").is_empty());
        assert!(parse(&graph, "X:Acme.Collections.Bag").is_empty());
        assert!(parse(&graph, "").is_empty());
    }

    #[test]
    fn test_overloads() {
        let graph = SampleGraph::new();

        assert_eq!(
            parse(&graph, "M:Acme.Collections.Bag.Add(System.Int32)"),
            [graph.add_int.token]
        );
        assert_eq!(
            parse(&graph, "M:Acme.Collections.Bag.Add(System.String)"),
            [graph.add_string.token]
        );
        assert!(parse(&graph, "M:Acme.Collections.Bag.Add(System.Double)").is_empty());
        assert!(parse(&graph, "M:Acme.Collections.Bag.Add").is_empty());
        assert!(parse(&graph, "M:Acme.Collections.Bag.Add(System.Int32,System.Int32)").is_empty());
    }

    #[test]
    fn test_by_ref_marker() {
        let graph = SampleGraph::new();

        assert_eq!(
            parse(&graph, "M:Acme.Collections.Bag.TryTake(System.Int32@)"),
            [graph.try_take.token]
        );
        assert!(parse(&graph, "M:Acme.Collections.Bag.TryTake(System.Int32)").is_empty());
        assert!(parse(&graph, "M:Acme.Collections.Bag.Add(System.Int32@)").is_empty());
    }

    #[test]
    fn test_return_type_suffix() {
        let graph = SampleGraph::new();

        assert_eq!(
            parse(&graph, "M:Acme.Collections.Bag.TryTake(System.Int32@)~System.Boolean"),
            [graph.try_take.token]
        );
        assert!(parse(&graph, "M:Acme.Collections.Bag.TryTake(System.Int32@)~System.Int32").is_empty());
        assert_eq!(
            parse(&graph, "M:Acme.Collections.Bag.Clear~System.Void"),
            [graph.clear.token]
        );
        assert!(parse(&graph, "M:Acme.Collections.Bag.Clear~System.Int32").is_empty());
    }

    #[test]
    fn test_generic_members() {
        let graph = SampleGraph::new();

        assert_eq!(parse(&graph, "T:Acme.Collections.Map`2"), [graph.map.token]);
        assert!(parse(&graph, "T:Acme.Collections.Map").is_empty());
        assert_eq!(
            parse(&graph, "M:Acme.Collections.Map`2.Get(`0)~`1"),
            [graph.get.token]
        );
        assert_eq!(
            parse(&graph, "M:Acme.Collections.Map`2.Convert``1(`1,``0)~``0"),
            [graph.convert.token]
        );
        assert!(parse(&graph, "M:Acme.Collections.Map`2.Convert(`1,``0)").is_empty());
        assert_eq!(
            parse(&graph, "M:Acme.Collections.Map`2.Node`1.Link(`0,`2)"),
            [graph.link.token]
        );
        // `1 is TValue, not TItem
        assert!(parse(&graph, "M:Acme.Collections.Map`2.Node`1.Link(`0,`1)").is_empty());
    }

    #[test]
    fn test_arity_overloads() {
        let graph = SampleGraph::new();

        assert_eq!(parse(&graph, "T:Acme.Collections.Box`1"), [graph.box1.token]);
        assert_eq!(parse(&graph, "T:Acme.Collections.Box`2"), [graph.box2.token]);
        assert!(parse(&graph, "T:Acme.Collections.Box`3").is_empty());
    }

    #[test]
    fn test_indexer() {
        let graph = SampleGraph::new();

        assert_eq!(
            parse(&graph, "P:Acme.Collections.Bag.Item(System.Int32)"),
            [graph.indexer.token]
        );
        assert!(parse(&graph, "P:Acme.Collections.Bag.Item").is_empty());
    }

    #[test]
    fn test_global_namespace() {
        let graph = SampleGraph::new();
        let global = graph.registry.global_namespace();

        assert_eq!(parse(&graph, "N:"), [global.token]);
        assert!(parse(&graph, "N:Acme.").is_empty());
        assert!(parse(&graph, "T:").is_empty());
    }

    #[test]
    fn test_property_named_item() {
        let registry = SymbolRegistry::new(Language::CSharp);
        let ns = registry.namespace_path("N").unwrap();
        let class = registry.named_type(&ns, "C").build().unwrap();
        let item = registry.property(&class, "Item").build().unwrap();

        let config = DocIdConfig::default();
        let found = IdParser::new(&registry, &config).parse_declaration_id("P:N.C.Item", None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].token, item.token);
    }

    #[test]
    fn test_escaped_names() {
        let graph = SampleGraph::new();

        assert_eq!(parse(&graph, "F:Acme.Collections.Bag.A#B"), [graph.dotted_field.token]);
        assert!(parse(&graph, "F:Acme.Collections.Bag.A.B").is_empty());
    }

    #[test]
    fn test_unresolvable() {
        let graph = SampleGraph::new();

        assert!(parse(&graph, "M:NoSuchType.NoSuchMethod").is_empty());
        assert!(parse(&graph, "M:Acme.Collections.Bag.Add(NoSuch.Type)").is_empty());
        assert!(parse(&graph, "M:Acme.Collections.Bag.Add(System.Int32").is_empty());
    }

    #[test]
    fn test_aliases_are_followed() {
        let registry = SymbolRegistry::new(Language::CSharp);
        let old = registry.namespace_path("Old").unwrap();
        let new = registry.namespace_path("New").unwrap();
        let widget = registry.named_type(&new, "Widget").build().unwrap();
        let int32 = registry.primitive(PrimitiveKind::Int32).unwrap();
        let size = registry.field(&widget, "Size", Some(&int32)).unwrap();
        registry.alias(&old, "Widget", &widget).unwrap();

        let config = DocIdConfig::default();
        let mut parser = IdParser::new(&registry, &config);
        let found = parser.parse_declaration_id("F:Old.Widget.Size", None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].token, size.token);

        let found = parser.parse_declaration_id("T:Old.Widget", None);
        assert_eq!(found[0].token, widget.token);
    }

    #[test]
    fn test_recursion_limit_yields_nothing() {
        let graph = SampleGraph::new();
        let config = DocIdConfig {
            max_recursion_depth: 1,
            ..DocIdConfig::default()
        };
        let mut parser = IdParser::new(&graph.registry, &config);

        // the parameter type needs a second level
        assert!(parser
            .parse_declaration_id("M:Acme.Collections.Bag.Add(System.Int32)", None)
            .is_empty());
        assert_eq!(
            parser.parse_declaration_id("M:Acme.Collections.Bag.Clear", None).len(),
            1
        );
    }
}
