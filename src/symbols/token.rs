use std::fmt;
use std::hash::{Hash, Hasher};

/// A handle to a symbol inside a symbol graph.
///
/// Tokens follow the layout of .NET metadata tokens:
/// - The high byte (bits 24-31) indicates the symbol table (see [`Token::NAMESPACE`] and friends)
/// - The low 24 bits (bits 0-23) indicate the row index within the graph
///
/// Two symbols are the same symbol if and only if their tokens are equal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Token(pub u32);

impl Token {
    /// Table byte for namespaces
    pub const NAMESPACE: u8 = 0x00;
    /// Table byte for named type definitions and their instantiations
    pub const TYPE: u8 = 0x02;
    /// Table byte for fields
    pub const FIELD: u8 = 0x04;
    /// Table byte for methods
    pub const METHOD: u8 = 0x06;
    /// Table byte for parameters
    pub const PARAMETER: u8 = 0x08;
    /// Table byte for events
    pub const EVENT: u8 = 0x14;
    /// Table byte for properties
    pub const PROPERTY: u8 = 0x17;
    /// Table byte for constructed types (arrays, pointers)
    pub const TYPE_SPEC: u8 = 0x1B;
    /// Table byte for aliases
    pub const ALIAS: u8 = 0x27;
    /// Table byte for generic (type) parameters
    pub const GENERIC_PARAM: u8 = 0x2A;

    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a token from a table byte and a row index
    ///
    /// ## Arguments
    /// * 'table' - The table byte
    /// * 'row'   - The row, only the low 24 bits are used
    #[must_use]
    pub fn from_parts(table: u8, row: u32) -> Self {
        Token((u32::from(table) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table type from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
