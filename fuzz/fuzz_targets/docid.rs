#![no_main]

use std::sync::OnceLock;

use docscope::prelude::*;
use libfuzzer_sys::fuzz_target;

fn registry() -> &'static SymbolRegistry {
    static REGISTRY: OnceLock<SymbolRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let registry = SymbolRegistry::new(Language::CSharp);
        let int32 = registry.primitive(PrimitiveKind::Int32).unwrap();
        let ns = registry.namespace_path("N").unwrap();

        let mut outer_builder = registry.named_type(&ns, "Outer");
        let t = outer_builder.type_parameter("T");
        let outer = outer_builder.build().unwrap();
        let inner = registry.named_type(&outer, "Inner").type_parameters(&["U"]).build().unwrap();

        let mut method_builder = registry.method(&outer, "M");
        let v = method_builder.type_parameter("V");
        method_builder
            .parameter("t", &t)
            .ref_parameter("v", &v, RefKind::Out)
            .returns(&int32)
            .build()
            .unwrap();
        registry.method(&inner, "M").parameter("t", &t).build().unwrap();
        registry.indexer(&outer).parameter("i", &int32).value_type(&t).build().unwrap();
        registry.field(&outer, "A.B", Some(&int32)).unwrap();
        registry.alias(&ns, "Alias", &outer).unwrap();
        registry
    })
}

fuzz_target!(|data: &[u8]| {
    if let Ok(id) = std::str::from_utf8(data) {
        let registry = registry();
        for symbol in docid::get_symbols_for_declaration_id(id, registry) {
            let _ = docid::create_declaration_id(registry, &symbol);
        }
        for symbol in docid::get_symbols_for_reference_id(id, registry) {
            let _ = docid::create_reference_id(registry, &symbol);
        }
    }
});
