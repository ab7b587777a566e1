use strum::{EnumIter, IntoStaticStr};

/// The well-known `System` types every [`crate::symbols::SymbolRegistry`] is seeded with.
///
/// The variant name is the metadata name of the type inside the `System` namespace.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum PrimitiveKind {
    Void,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    IntPtr,
    UIntPtr,
    Object,
    String,
    TypedReference,
    ValueType,
}

impl PrimitiveKind {
    /// Namespace all primitive types live in
    pub const NAMESPACE: &'static str = "System";

    /// The metadata name of the type, e.g. `Int32`
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The C# keyword for this type, if it has one
    #[must_use]
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            PrimitiveKind::Void => Some("void"),
            PrimitiveKind::Boolean => Some("bool"),
            PrimitiveKind::Char => Some("char"),
            PrimitiveKind::SByte => Some("sbyte"),
            PrimitiveKind::Byte => Some("byte"),
            PrimitiveKind::Int16 => Some("short"),
            PrimitiveKind::UInt16 => Some("ushort"),
            PrimitiveKind::Int32 => Some("int"),
            PrimitiveKind::UInt32 => Some("uint"),
            PrimitiveKind::Int64 => Some("long"),
            PrimitiveKind::UInt64 => Some("ulong"),
            PrimitiveKind::Single => Some("float"),
            PrimitiveKind::Double => Some("double"),
            PrimitiveKind::IntPtr => Some("nint"),
            PrimitiveKind::UIntPtr => Some("nuint"),
            PrimitiveKind::Object => Some("object"),
            PrimitiveKind::String => Some("string"),
            PrimitiveKind::TypedReference | PrimitiveKind::ValueType => None,
        }
    }
}
