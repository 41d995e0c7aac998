pub const STARSHIP_SCHEMA: &str = include_str!("starship_schema.graphql");
pub const SIMPLE_QUERY: &str = include_str!("simple_query.graphql");
pub const COMPLEX_QUERY: &str = include_str!("complex_query.graphql");

/// Generates a schema of `type_count` object types, each with a handful of
/// scalar fields, an argument-taking field, and a link to the next type.
pub fn synthetic_schema(type_count: usize) -> String {
    let mut schema = String::new();
    for idx in 0..type_count {
        let next = (idx + 1) % type_count;
        schema.push_str(&format!(
            "\"\"\"\nGenerated type number {idx}.\n\"\"\"\n\
             type Node{idx} {{\n  \
               id: ID!\n  \
               label: String\n  \
               weight: Float\n  \
               tags(first: Int = 10, after: String): [String!]!\n  \
               next: Node{next}\n\
             }}\n\n"
        ));
    }
    schema.push_str("type Query { root: Node0 }\n");
    schema
}

/// Generates a query nesting `depth` selection sets.
pub fn deeply_nested_query(depth: usize) -> String {
    let mut query = String::from("query Deep ");
    for _ in 0..depth {
        query.push_str("{ next ");
    }
    query.push_str("{ id }");
    for _ in 0..depth {
        query.push_str(" }");
    }
    query
}
