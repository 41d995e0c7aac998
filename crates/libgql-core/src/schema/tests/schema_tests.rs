use crate::schema::Schema;
use crate::schema::SchemaBuildError;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const SCHEMA: &str = r#"
type Query {
  droid(id: ID!): Droid
  episodes: [Episode!]!
}

type Droid {
  name: String!
  primaryFunction: String
}

enum Episode { NEWHOPE EMPIRE JEDI }

input DroidFilter { name: String }

scalar DateTime
"#;

fn ty(schema: &Schema, name: &str) -> crate::types::GqlType {
    schema
        .type_by_name(name)
        .unwrap_or_else(|| panic!("`{name}` is not defined"))
}

#[test]
fn typename_is_known_on_every_object() -> Result<()> {
    let schema = Schema::from_str(SCHEMA)?;

    for object in ["Query", "Droid"] {
        let field = schema
            .field(ty(&schema, object), "__typename")
            .expect("`__typename` is always selectable");
        assert_eq!(schema.type_name(field.ty), "String!");
    }

    Ok(())
}

#[test]
fn schema_and_type_are_only_known_on_the_query_root() -> Result<()> {
    let schema = Schema::from_str(SCHEMA)?;
    let query = schema.query_type();
    let droid = ty(&schema, "Droid");

    let schema_field = schema.field(query, "__schema").expect("`__schema` on `Query`");
    assert_eq!(schema.type_name(schema_field.ty), "__Schema!");
    let type_field = schema.field(query, "__type").expect("`__type` on `Query`");
    assert_eq!(schema.type_name(type_field.ty), "__Type");
    let name_arg = type_field.args.get("name").expect("`__type(name:)`");
    assert!(name_arg.is_required());

    assert!(schema.field(droid, "__schema").is_none());
    assert!(schema.field(droid, "__type").is_none());

    Ok(())
}

#[test]
fn meta_fields_are_not_declared_fields() -> Result<()> {
    let schema = Schema::from_str(SCHEMA)?;

    let query = schema.object_type(schema.query_type()).expect("`Query` is an object");
    assert_eq!(query.fields.keys().collect::<Vec<_>>(), vec!["droid", "episodes"]);

    Ok(())
}

#[test]
fn fields_are_not_known_on_non_objects() -> Result<()> {
    let schema = Schema::from_str(SCHEMA)?;

    assert!(schema.field(ty(&schema, "Episode"), "__typename").is_none());
    assert!(schema.field(ty(&schema, "DroidFilter"), "name").is_none());
    assert!(schema.field(ty(&schema, "Droid"), "model").is_none());

    Ok(())
}

#[test]
fn classification() -> Result<()> {
    let schema = Schema::from_str(SCHEMA)?;
    let droid = ty(&schema, "Droid");
    let episode = ty(&schema, "Episode");
    let filter = ty(&schema, "DroidFilter");
    let date_time = ty(&schema, "DateTime");

    assert!(schema.is_object(droid) && schema.is_composite(droid));
    assert!(schema.is_output_type(droid) && !schema.is_input_type(droid));

    assert!(schema.is_enum(episode) && schema.is_leaf(episode));
    assert!(schema.is_input_type(episode) && schema.is_output_type(episode));

    assert!(schema.is_input_object(filter));
    assert!(schema.is_input_type(filter) && !schema.is_output_type(filter));

    assert!(schema.is_scalar(date_time) && schema.builtin_scalar(date_time).is_none());

    let episodes = schema.list_of(episode.to_non_null()).to_non_null();
    assert!(schema.is_list(episodes));
    assert!(schema.is_leaf(episodes));
    assert_eq!(schema.innermost_type(episodes), episode);
    assert_eq!(schema.enum_type(episodes).map(|e| e.name.as_str()), Some("Episode"));

    Ok(())
}

#[test]
fn declared_list_types_are_shared() -> Result<()> {
    let schema = Schema::from_str(SCHEMA)?;
    let episodes_field = schema
        .field(schema.query_type(), "episodes")
        .expect("`episodes` is declared");

    let episodes = schema.list_of(ty(&schema, "Episode").to_non_null()).to_non_null();
    assert_eq!(episodes_field.ty, episodes);

    Ok(())
}

#[test]
fn type_refs_resolve_without_registering_lists() -> Result<()> {
    let schema = Schema::from_str(SCHEMA)?;
    let registered = schema.registered_type_count();
    let document = libgql_parser::parse(
        "query ($eps: [Episode!]!, $ids: [ID!]!, $missing: Missing) { __typename }",
    )
    .into_valid_ast()
    .expect("document parses");
    let crate::ast::Definition::Operation(operation) = &document.definitions[0] else {
        panic!("expected an operation");
    };
    let [eps, ids, missing] = &operation.variable_definitions[..] else {
        panic!("expected three variables");
    };

    let episodes = schema.existing_type_from_ref(&eps.var_type);
    assert_eq!(episodes.map(|eps| schema.type_name(eps)).as_deref(), Some("[Episode!]!"));
    // No field or argument is an `[ID!]`, so there is nothing to resolve to.
    assert!(schema.existing_type_from_ref(&ids.var_type).is_none());
    assert_eq!(schema.type_ref_named(&ids.var_type), Some(ty(&schema, "ID")));
    assert!(schema.existing_type_from_ref(&missing.var_type).is_none());
    assert!(schema.type_ref_named(&missing.var_type).is_none());

    assert_eq!(schema.registered_type_count(), registered);

    Ok(())
}

#[test]
fn type_refs_compare_by_shape() -> Result<()> {
    let schema = Schema::from_str(SCHEMA)?;
    let document = libgql_parser::parse(
        "query ($a: [Episode!]!, $b: [Episode], $c: [[Episode!]!], $d: Episode!) { __typename }",
    )
    .into_valid_ast()
    .expect("document parses");
    let crate::ast::Definition::Operation(operation) = &document.definitions[0] else {
        panic!("expected an operation");
    };
    let refs: Vec<_> = operation.variable_definitions.iter().map(|def| &def.var_type).collect();
    let episode = ty(&schema, "Episode");
    let episodes = schema
        .field(schema.query_type(), "episodes")
        .expect("`Query.episodes`")
        .ty;

    assert!(schema.is_type_ref_compatible(episodes, refs[0]));
    assert!(schema.is_type_ref_compatible(episodes.to_nullable(), refs[0]));
    assert!(!schema.is_type_ref_compatible(episodes, refs[1]));
    assert!(!schema.is_type_ref_compatible(episodes, refs[2]));
    assert!(schema.is_type_ref_compatible(episode, refs[3]));
    assert!(!schema.is_type_ref_compatible(episode.to_non_null(), refs[1]));

    let accepting = schema.existing_types_accepting(refs[0]);
    assert_eq!(accepting.first(), Some(&episodes));
    assert!(schema.existing_types_accepting(refs[2]).is_empty());

    Ok(())
}
