use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::types::InputValueDefinition;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const SCHEMA: &str = r#"
type Query {
  search(
    term: String!
    limit: Int = 10
    after: String
    strict: Boolean! = true
    fallback: String = null
  ): [String]
}
"#;

fn search_args(schema: &Schema) -> Vec<InputValueDefinition> {
    schema
        .object_type(schema.query_type())
        .and_then(|query| query.field("search"))
        .map(|field| field.args.values().cloned().collect())
        .expect("missing field `search`")
}

#[test]
fn non_null_without_default_is_required() -> Result<()> {
    let schema = Schema::from_str(SCHEMA)?;
    let args = search_args(&schema);

    let term = &args[0];
    assert_eq!(term.name, "term");
    assert!(term.is_required());
    assert!(!term.has_default());
    assert!(term.default_value.is_null());

    Ok(())
}

#[test]
fn nullable_without_default_defaults_to_null() -> Result<()> {
    let schema = Schema::from_str(SCHEMA)?;
    let args = search_args(&schema);

    let after = &args[2];
    assert_eq!(after.name, "after");
    assert!(!after.is_required());
    assert!(!after.has_default());
    assert!(after.default_value.is_null());

    Ok(())
}

#[test]
fn explicit_defaults_are_coerced() -> Result<()> {
    let schema = Schema::from_str(SCHEMA)?;
    let args = search_args(&schema);

    let limit = &args[1];
    assert!(limit.has_default());
    assert_eq!(limit.default_value.as_scalar(), Some("10"));

    let strict = &args[3];
    assert!(!strict.is_required());
    assert_eq!(strict.default_value.as_bool(), Some(true));

    // `= null` is a default, and it is not the required sentinel.
    let fallback = &args[4];
    assert!(fallback.has_default());
    assert!(fallback.default_value.is_null());
    assert!(!fallback.is_required());

    Ok(())
}
