//! Reference-ID (type) parsing.
//!
//! ```text
//! type           := (scoped | type-parameter | named-type) suffix*
//! scoped         := ('M:' | 'T:') declaration (':' type)?
//! type-parameter := '`' digits | '``' digits
//! named-type     := segment ('.' segment)*
//! segment        := name ('{' type (',' type)* '}' | '`' digits)?
//! suffix         := '[' (bound? (':' bound?)? ','?)* ']' | '*'
//! ```
//!
//! A type parameter is resolved against the *context*: the method or type whose signature
//! is being parsed, or the symbol named by an explicit `M:`/`T:` scope qualifier. A single
//! backtick counts type parameters cumulatively across nested generic types.

use tracing::trace;

use crate::{
    docid::{parse_name, parser::IdParser, read_integer, IdCursor},
    symbols::{Compilation, SymbolFlavor, SymbolRc},
};

/// Consume `[...]` and return its rank, bounds are read and dropped
fn parse_array_rank(cursor: &mut IdCursor<'_>) -> u32 {
    // '['
    cursor.advance();

    let mut rank: u32 = 0;
    loop {
        read_integer(cursor);
        if cursor.eat(':') {
            read_integer(cursor);
        }
        rank = rank.saturating_add(1);

        if !cursor.eat(',') {
            break;
        }
    }
    cursor.eat(']');

    rank
}

impl<C: Compilation + ?Sized> IdParser<'_, C> {
    /// The first type matching the reference at the cursor
    pub(crate) fn parse_type(
        &mut self,
        cursor: &mut IdCursor<'_>,
        context: Option<&SymbolRc>,
    ) -> Option<SymbolRc> {
        let mut results = Vec::new();
        self.parse_types(cursor, context, &mut results);
        results.into_iter().next()
    }

    /// Append every type matching the reference at the cursor to `results`
    pub(crate) fn parse_types(
        &mut self,
        cursor: &mut IdCursor<'_>,
        context: Option<&SymbolRc>,
        results: &mut Vec<SymbolRc>,
    ) {
        if !self.enter() {
            return;
        }
        self.parse_types_inner(cursor, context, results);
        self.leave();
    }

    fn parse_types_inner(
        &mut self,
        cursor: &mut IdCursor<'_>,
        context: Option<&SymbolRc>,
        results: &mut Vec<SymbolRc>,
    ) {
        if cursor.starts_with("M:") || cursor.starts_with("T:") {
            self.parse_scoped_types(cursor, results);
            return;
        }

        let first = results.len();
        if cursor.peek() == '`' {
            self.parse_type_parameter(cursor, context, results);
        } else {
            self.parse_named_type(cursor, context, results);
        }

        // every candidate gets the same array and pointer suffixes
        let start = *cursor;
        let mut end = start;
        let bases: Vec<SymbolRc> = results.drain(first..).collect();
        for base in bases {
            *cursor = start;
            if let Some(constructed) = self.apply_type_suffixes(cursor, base) {
                results.push(constructed);
            }
            end = *cursor;
        }
        *cursor = end;
    }

    /// `M:...:type` or `T:...:type`, the type is parsed once per scope candidate
    fn parse_scoped_types(&mut self, cursor: &mut IdCursor<'_>, results: &mut Vec<SymbolRc>) {
        let mut scopes = Vec::new();
        if !self.parse_declared_id(cursor, None, &mut scopes) {
            trace!("type parameter scope did not resolve");
            return;
        }

        if !cursor.eat(':') {
            // a bare scope is itself the answer
            results.extend(scopes);
            return;
        }

        let start = *cursor;
        let mut end = start;
        for scope in &scopes {
            *cursor = start;
            self.parse_types(cursor, Some(scope), results);
            if cursor.pos() > end.pos() {
                end = *cursor;
            }
        }
        *cursor = end;
    }

    fn apply_type_suffixes(&self, cursor: &mut IdCursor<'_>, base: SymbolRc) -> Option<SymbolRc> {
        let mut current = base;
        loop {
            let constructed = match cursor.peek() {
                '[' => {
                    let rank = parse_array_rank(cursor);
                    self.compilation.create_array_type(&current, rank)
                }
                '*' => {
                    cursor.advance();
                    self.compilation.create_pointer_type(&current)
                }
                _ => return Some(current),
            };

            match constructed {
                Ok(constructed) => current = constructed,
                Err(error) => {
                    trace!(%error, "array or pointer construction failed");
                    return None;
                }
            }
        }
    }

    fn parse_type_parameter(
        &mut self,
        cursor: &mut IdCursor<'_>,
        context: Option<&SymbolRc>,
        results: &mut Vec<SymbolRc>,
    ) {
        // '`'
        cursor.advance();

        if cursor.eat('`') {
            let ordinal = read_integer(cursor) as usize;
            let method = context.filter(|context| matches!(context.flavor, SymbolFlavor::Method { .. }));
            match method.and_then(|method| method.type_parameters().get(ordinal).copied()) {
                Some(token) => results.extend(self.resolve(token)),
                None => trace!(ordinal, "method type parameter out of scope"),
            }
        } else {
            let ordinal = read_integer(cursor) as usize;
            let found = self
                .type_context(context)
                .and_then(|owner| self.nth_type_parameter(&owner, ordinal));
            match found {
                Some(type_parameter) => results.push(type_parameter),
                None => trace!(ordinal, "type parameter out of scope"),
            }
        }
    }

    /// The named type whose type parameters a single backtick refers to
    fn type_context(&self, context: Option<&SymbolRc>) -> Option<SymbolRc> {
        let mut current = context.cloned();
        for _ in 0..=self.config.max_recursion_depth {
            let symbol = current?;
            if matches!(symbol.flavor, SymbolFlavor::NamedType { .. }) {
                return Some(symbol);
            }
            current = self.compilation.containing(&symbol);
        }
        None
    }

    /// Type parameter number `n`, counting the type parameters of all enclosing types first
    fn nth_type_parameter(&self, owner: &SymbolRc, mut n: usize) -> Option<SymbolRc> {
        let mut current = owner.clone();
        for _ in 0..=self.config.max_recursion_depth {
            let outer = self
                .compilation
                .containing(&current)
                .filter(|outer| matches!(outer.flavor, SymbolFlavor::NamedType { .. }));
            let preceding = outer
                .as_ref()
                .map_or(0, |outer| self.cumulative_type_parameter_count(outer));

            match outer {
                Some(outer) if n < preceding => current = outer,
                _ => {
                    n -= preceding;
                    let token = current.type_parameters().get(n).copied()?;
                    return self.resolve(token);
                }
            }
        }
        None
    }

    fn cumulative_type_parameter_count(&self, named_type: &SymbolRc) -> usize {
        let mut count = 0;
        let mut current = Some(named_type.clone());
        for _ in 0..=self.config.max_recursion_depth {
            let Some(symbol) = current.filter(|symbol| matches!(symbol.flavor, SymbolFlavor::NamedType { .. }))
            else {
                break;
            };
            count += symbol.arity();
            current = self.compilation.containing(&symbol);
        }
        count
    }

    /// Dotted type name, generic segments either as `{arguments}` or as `` `arity ``
    fn parse_named_type(
        &mut self,
        cursor: &mut IdCursor<'_>,
        context: Option<&SymbolRc>,
        results: &mut Vec<SymbolRc>,
    ) {
        let mut containers = vec![self.compilation.global_namespace()];

        loop {
            let name = parse_name(cursor);
            let mut arguments = Vec::new();
            let mut arity = 0;

            if cursor.peek() == '{' {
                if !self.parse_type_arguments(cursor, context, &mut arguments) {
                    trace!(segment = %name, "type argument did not resolve");
                    return;
                }
                arity = arguments.len();
            } else if cursor.eat('`') {
                arity = read_integer(cursor) as usize;
            }

            let matches = if arity != 0 || cursor.peek() != '.' {
                let definitions = self.matching_types(&containers, &name, arity);
                if arguments.is_empty() {
                    definitions
                } else {
                    definitions
                        .iter()
                        .filter_map(|definition| {
                            self.compilation
                                .construct(definition, &arguments)
                                .map_err(|error| trace!(%error, "generic construction failed"))
                                .ok()
                        })
                        .collect()
                }
            } else {
                self.matching_namespaces_or_types(&containers, &name)
            };

            if !cursor.eat('.') {
                results.extend(matches);
                return;
            }
            if matches.is_empty() {
                trace!(segment = %name, arity, "type path segment did not resolve");
                return;
            }
            containers = matches;
        }
    }

    /// `{type,type,...}`
    fn parse_type_arguments(
        &mut self,
        cursor: &mut IdCursor<'_>,
        context: Option<&SymbolRc>,
        arguments: &mut Vec<SymbolRc>,
    ) -> bool {
        // '{'
        cursor.advance();

        loop {
            let Some(argument) = self.parse_type(cursor, context) else {
                return false;
            };
            arguments.push(argument);

            if !cursor.eat(',') {
                break;
            }
        }
        if !cursor.eat('}') {
            trace!("type argument list is not closed");
            return false;
        }

        true
    }
}
