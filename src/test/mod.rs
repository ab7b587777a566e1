use crate::symbols::{Compilation, Language, PrimitiveKind, RefKind, SymbolRc, SymbolRegistry};

/// A small C#-flavored graph covering every ID feature:
///
/// ```text
/// namespace Acme.Collections
/// {
///     class Bag
///     {
///         int count;                              // F:Acme.Collections.Bag.count
///         int A.B;                                // F:Acme.Collections.Bag.A#B
///         event Changed;                          // E:Acme.Collections.Bag.Changed
///         int Count { get; }                      // P:Acme.Collections.Bag.Count
///         int this[int index] { get; }            // P:Acme.Collections.Bag.Item(System.Int32)
///         void Add(int item);
///         void Add(string item);
///         bool TryTake(out int item);
///         void Clear();
///         void Copy(int[][] a, int* b, int[,] c);
///         int Sum(Box<int> values);
///         static implicit operator int(Bag bag);
///         class Enumerator { }
///     }
///     class Map<TKey, TValue>
///     {
///         TValue Get(TKey key);
///         TResult Convert<TResult>(TValue value, TResult fallback);
///         class Node<TItem> { void Link(TKey key, TItem item); }
///     }
///     class Box<T> { }
///     class Box<T, U> { }
/// }
/// ```
pub(crate) struct SampleGraph {
    pub registry: SymbolRegistry,
    pub namespace: SymbolRc,
    pub bag: SymbolRc,
    pub count_field: SymbolRc,
    pub dotted_field: SymbolRc,
    pub changed: SymbolRc,
    pub count_property: SymbolRc,
    pub indexer: SymbolRc,
    pub add_int: SymbolRc,
    pub add_string: SymbolRc,
    pub try_take: SymbolRc,
    pub clear: SymbolRc,
    pub copy: SymbolRc,
    pub sum: SymbolRc,
    pub to_int: SymbolRc,
    pub enumerator: SymbolRc,
    pub map: SymbolRc,
    pub get: SymbolRc,
    pub convert: SymbolRc,
    pub node: SymbolRc,
    pub link: SymbolRc,
    pub box1: SymbolRc,
    pub box2: SymbolRc,
}

impl SampleGraph {
    pub fn new() -> Self {
        let registry = SymbolRegistry::new(Language::CSharp);
        let int32 = registry.primitive(PrimitiveKind::Int32).unwrap();
        let string = registry.primitive(PrimitiveKind::String).unwrap();
        let boolean = registry.primitive(PrimitiveKind::Boolean).unwrap();
        let namespace = registry.namespace_path("Acme.Collections").unwrap();

        let box1 = registry
            .named_type(&namespace, "Box")
            .type_parameters(&["T"])
            .build()
            .unwrap();
        let box2 = registry
            .named_type(&namespace, "Box")
            .type_parameters(&["T", "U"])
            .build()
            .unwrap();

        let bag = registry.named_type(&namespace, "Bag").build().unwrap();
        let count_field = registry.field(&bag, "count", Some(&int32)).unwrap();
        let dotted_field = registry.field(&bag, "A.B", Some(&int32)).unwrap();
        let changed = registry.event(&bag, "Changed", None).unwrap();
        let count_property = registry
            .property(&bag, "Count")
            .value_type(&int32)
            .build()
            .unwrap();
        let indexer = registry
            .indexer(&bag)
            .parameter("index", &int32)
            .value_type(&int32)
            .build()
            .unwrap();
        let add_int = registry
            .method(&bag, "Add")
            .parameter("item", &int32)
            .build()
            .unwrap();
        let add_string = registry
            .method(&bag, "Add")
            .parameter("item", &string)
            .build()
            .unwrap();
        let try_take = registry
            .method(&bag, "TryTake")
            .ref_parameter("item", &int32, RefKind::Out)
            .returns(&boolean)
            .build()
            .unwrap();
        let clear = registry.method(&bag, "Clear").build().unwrap();

        let int_array = registry.create_array_type(&int32, 1).unwrap();
        let jagged = registry.create_array_type(&int_array, 1).unwrap();
        let pointer = registry.create_pointer_type(&int32).unwrap();
        let matrix = registry.create_array_type(&int32, 2).unwrap();
        let copy = registry
            .method(&bag, "Copy")
            .parameter("a", &jagged)
            .parameter("b", &pointer)
            .parameter("c", &matrix)
            .build()
            .unwrap();

        let box_of_int = registry.construct(&box1, &[int32.clone()]).unwrap();
        let sum = registry
            .method(&bag, "Sum")
            .parameter("values", &box_of_int)
            .returns(&int32)
            .build()
            .unwrap();
        let to_int = registry
            .method(&bag, "op_Implicit")
            .parameter("bag", &bag)
            .returns(&int32)
            .build()
            .unwrap();
        let enumerator = registry.named_type(&bag, "Enumerator").build().unwrap();

        let mut map_builder = registry.named_type(&namespace, "Map");
        let tkey = map_builder.type_parameter("TKey");
        let tvalue = map_builder.type_parameter("TValue");
        let map = map_builder.build().unwrap();

        let get = registry
            .method(&map, "Get")
            .parameter("key", &tkey)
            .returns(&tvalue)
            .build()
            .unwrap();

        let mut convert_builder = registry.method(&map, "Convert");
        let tresult = convert_builder.type_parameter("TResult");
        let convert = convert_builder
            .parameter("value", &tvalue)
            .parameter("fallback", &tresult)
            .returns(&tresult)
            .build()
            .unwrap();

        let mut node_builder = registry.named_type(&map, "Node");
        let titem = node_builder.type_parameter("TItem");
        let node = node_builder.build().unwrap();
        let link = registry
            .method(&node, "Link")
            .parameter("key", &tkey)
            .parameter("item", &titem)
            .build()
            .unwrap();

        SampleGraph {
            registry,
            namespace,
            bag,
            count_field,
            dotted_field,
            changed,
            count_property,
            indexer,
            add_int,
            add_string,
            try_take,
            clear,
            copy,
            sum,
            to_int,
            enumerator,
            map,
            get,
            convert,
            node,
            link,
            box1,
            box2,
        }
    }
}
