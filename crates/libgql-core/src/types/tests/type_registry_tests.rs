use crate::types::TypeRegistry;
use crate::types::TypeShape;
use rayon::prelude::*;

#[test]
fn named_registration_is_stable() {
    let registry = TypeRegistry::new();

    let query = registry.named("Query");
    assert_eq!(registry.named("Query"), query);
    assert_eq!(registry.lookup_named("Query"), Some(query));
    assert_eq!(registry.lookup_named("Mutation"), None);
    assert_eq!(registry.shape(query), Some(TypeShape::Named("Query".into())));
    assert!(registry.owns(query.to_non_null()));
}

#[test]
fn foreign_handles_have_no_shape() {
    let registry1 = TypeRegistry::new();
    let registry2 = TypeRegistry::new();

    let int = registry1.named("Int");
    assert!(!registry2.owns(int));
    assert_eq!(registry2.shape(int), None);
}

#[test]
fn list_shapes_keep_element_nullability() {
    let registry = TypeRegistry::new();
    let int = registry.named("Int");

    let list = registry.list_of(int.to_non_null());
    assert_eq!(registry.shape(list), Some(TypeShape::List(int.to_non_null())));
    assert_eq!(registry.shape(list.to_non_null()), Some(TypeShape::List(int.to_non_null())));
}

#[test]
fn concurrent_list_of_creates_one_list_type() {
    let registry = TypeRegistry::new();
    let int = registry.named("Int");

    let lists: Vec<_> = (0..64)
        .into_par_iter()
        .map(|i| {
            let element = if i % 2 == 0 { int } else { int.to_non_null() };
            (i % 2, registry.list_of(element))
        })
        .collect();

    let nullable_elements = registry.list_of(int);
    let non_null_elements = registry.list_of(int.to_non_null());
    for (parity, list) in lists {
        let expected = if parity == 0 { nullable_elements } else { non_null_elements };
        assert_eq!(list, expected);
    }
}
