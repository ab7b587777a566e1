// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # docscope
//!
//! Encoder and decoder for .NET documentation-comment IDs, the compact strings such as
//! `` M:System.Collections.Generic.List`1.Add(`0) `` that documentation tooling uses to
//! cross-reference namespaces, types and members.
//!
//! ## Features
//!
//! - **🔁 Bidirectional** - Symbol to ID and ID back to every matching symbol
//! - **🧬 Generics aware** - Arity, constructed types, cumulative type parameter ordinals and
//!   explicit type parameter scopes
//! - **🎯 Overload resolution** - Candidates are filtered by parameter types, `ref`/`out`
//!   markers and return type
//! - **🧵 Thread-safe** - The bundled symbol graph is lock-free for readers, batch encoding
//!   runs in parallel
//! - **🛡️ Never panics on input** - Unresolvable or malformed IDs simply match nothing
//!
//! ## Quick Start
//!
//! ```rust
//! use docscope::prelude::*;
//!
//! let registry = SymbolRegistry::new(Language::CSharp);
//! let ns = registry.namespace_path("Acme.Collections")?;
//! let bag = registry.named_type(&ns, "Bag").type_parameters(&["T"]).build()?;
//! let t = registry.get(&bag.type_parameters()[0]).ok_or(Error::TypeError("T".into()))?;
//! let add = registry.method(&bag, "Add").parameter("item", &t).build()?;
//!
//! let id = docid::create_declaration_id(&registry, &add)?;
//! assert_eq!(id, "M:Acme.Collections.Bag`1.Add(`0)");
//!
//! let resolved = docid::get_symbols_for_declaration_id(&id, &registry);
//! assert_eq!(resolved.len(), 1);
//! assert_eq!(resolved[0].token, add.token);
//! # Ok::<(), docscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`symbols`] - The symbol object model: the [`symbols::Compilation`] capability trait and
//!   the [`symbols::SymbolRegistry`] graph implementing it
//! - [`docid`] - ID generation and parsing over any [`symbols::Compilation`]
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`Error`] and [`Result`] - Error handling
//!
//! Resolving an ID that names nothing is not an error; the lookup functions return an empty
//! list. [`Error`] is reserved for misuse, such as asking for the declaration ID of a
//! parameter.
//!
//! ## Logging
//!
//! The parsers emit [`tracing`] events at `trace` level whenever a lookup hits a dead end
//! (unknown path segment, rejected overload, unresolvable type argument). The library never
//! installs a subscriber.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use docscope::prelude::*;
///
/// let registry = SymbolRegistry::new(Language::CSharp);
/// let int32 = registry.primitive(PrimitiveKind::Int32)?;
/// assert_eq!(docid::create_reference_id(&registry, &int32)?, "System.Int32");
/// # Ok::<(), docscope::Error>(())
/// ```
pub mod prelude;

pub mod docid;
pub mod symbols;

/// `docscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `docscope` Error type
///
/// # Examples
///
/// ```rust
/// use docscope::{docid, symbols::{Language, SymbolRegistry}, Error};
///
/// let registry = SymbolRegistry::new(Language::CSharp);
/// let class = registry.named_type(&registry.namespace_path("N")?, "C").build()?;
/// let field = registry.field(&class, "f", None)?;
///
/// match docid::create_reference_id(&registry, &field) {
///     Err(Error::NoReferenceId(kind)) => println!("no reference id for a {kind}"),
///     Err(e) => println!("Error: {e}"),
///     Ok(id) => println!("{id}"),
/// }
/// # Ok::<(), docscope::Error>(())
/// ```
pub use error::Error;

pub use docid::{DocIdCodec, DocIdConfig, DocIdKind};
pub use symbols::{Compilation, SymbolRegistry};
