use thiserror::Error;

use crate::symbols::{SymbolKind, Token};

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which covers every error this library can return.
///
/// Note that failing to *resolve* a documentation-comment ID is never an error: lookups
/// return an empty candidate list instead. The variants below describe caller bugs
/// (asking for an ID of a symbol that has none), an inconsistent symbol graph, or
/// misuse of the graph builders.
///
/// # Error Categories
///
/// ## Encoding Errors
/// - [`Error::NoDeclarationId`] - The symbol kind has no declaration-id grammar
/// - [`Error::NoReferenceId`] - The symbol kind has no reference-id grammar
/// - [`Error::RecursionLimit`] - Generation exceeded the configured nesting depth
///
/// ## Symbol Graph Errors
/// - [`Error::SymbolNotFound`] - A token points at a symbol the graph does not hold
/// - [`Error::ArityMismatch`] - Generic construction with the wrong argument count
/// - [`Error::TypeError`] - A type operation on a symbol that is not a suitable type
/// - [`Error::Malformed`] - Builder misuse, e.g. a field placed inside a namespace
///
/// # Examples
///
/// ```rust
/// use docscope::{docid, symbols::{Compilation, Language, SymbolRegistry}, Error};
///
/// let registry = SymbolRegistry::new(Language::CSharp);
/// let global = registry.global_namespace();
///
/// match docid::create_reference_id(&registry, &global) {
///     Ok(id) => println!("{id}"),
///     Err(Error::NoReferenceId(kind)) => eprintln!("no reference id for {kind}"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The symbol graph was used in a way it does not support.
    ///
    /// Raised by the builders when a member is attached to a container that cannot hold
    /// it. The error includes the source location where the problem was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Declaration IDs exist for namespaces, types, methods, properties, fields and
    /// events only.
    ///
    /// Asking for the declaration ID of e.g. a parameter is a bug in the caller.
    #[error("Cannot generate a declaration id for a {0} symbol")]
    NoDeclarationId(SymbolKind),

    /// Reference IDs exist for namespaces and types only.
    #[error("Cannot generate a reference id for a {0} symbol")]
    NoReferenceId(SymbolKind),

    /// A token could not be resolved against the symbol graph.
    ///
    /// The graph handed out a token (as containing symbol, parameter type, ...) that it
    /// no longer, or never, contained.
    #[error("Failed to find symbol - {0}")]
    SymbolNotFound(Token),

    /// Generic instantiation with a type argument count that differs from the number of
    /// type parameters the definition declares.
    #[error("Expected {expected} type arguments, got {actual}")]
    ArityMismatch {
        /// Type parameters declared by the definition
        expected: usize,
        /// Type arguments supplied
        actual: usize,
    },

    /// General error during type construction.
    #[error("{0}")]
    TypeError(String),

    /// Recursion limit reached.
    ///
    /// Guards against cyclic alias chains and pathological nesting. The associated value
    /// is the limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}
