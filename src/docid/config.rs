//! Configuration of the documentation-comment ID codec.

/// Which methods get a `~ReturnType` suffix in their declaration ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReturnTypeSuffix {
    /// Every method that does not return `void`
    #[default]
    NonVoid,
    /// Only the conversion operators `op_Implicit` and `op_Explicit`, the convention of
    /// XML documentation files written by the C# compiler
    ConversionOperators,
    /// No method
    Never,
}

/// Configuration for [`crate::docid::DocIdCodec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocIdConfig {
    /// Maximum nesting of generator and parser calls (default: 64). Deeper generation
    /// fails with [`crate::Error::RecursionLimit`], deeper parsing yields no match
    pub max_recursion_depth: usize,

    /// When method declaration IDs carry a return type. Parsing accepts an optional
    /// `~ReturnType` suffix regardless of this setting
    pub return_types: ReturnTypeSuffix,
}

impl Default for DocIdConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: 64,
            return_types: ReturnTypeSuffix::NonVoid,
        }
    }
}

impl DocIdConfig {
    /// Produces IDs as found in XML documentation files written by the C# compiler
    #[must_use]
    pub fn compiler_compatible() -> Self {
        Self {
            return_types: ReturnTypeSuffix::ConversionOperators,
            ..Self::default()
        }
    }

    /// Shortest IDs, no return types at all
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            return_types: ReturnTypeSuffix::Never,
            ..Self::default()
        }
    }

    /// Decide whether a method gets a `~ReturnType` suffix
    ///
    /// ## Arguments
    /// * 'method_name'  - The name of the method
    /// * 'returns_void' - True if the method returns nothing
    #[must_use]
    pub fn emits_return_type(&self, method_name: &str, returns_void: bool) -> bool {
        if returns_void {
            return false;
        }

        match self.return_types {
            ReturnTypeSuffix::NonVoid => true,
            ReturnTypeSuffix::ConversionOperators => {
                matches!(method_name, "op_Implicit" | "op_Explicit")
            }
            ReturnTypeSuffix::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DocIdConfig::default();
        assert_eq!(config.max_recursion_depth, 64);
        assert_eq!(config.return_types, ReturnTypeSuffix::NonVoid);
        assert_eq!(DocIdConfig::compiler_compatible().max_recursion_depth, 64);
    }

    #[test]
    fn test_return_type_policy() {
        let non_void = DocIdConfig::default();
        assert!(non_void.emits_return_type("Parse", false));
        assert!(!non_void.emits_return_type("Parse", true));

        let compiler = DocIdConfig::compiler_compatible();
        assert!(!compiler.emits_return_type("Parse", false));
        assert!(compiler.emits_return_type("op_Implicit", false));
        assert!(compiler.emits_return_type("op_Explicit", false));
        assert!(!compiler.emits_return_type("op_Explicit", true));

        assert!(!DocIdConfig::minimal().emits_return_type("op_Implicit", false));
    }
}
