use super::run_json;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use serde_json::json;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const STARWARS: &str = r#"
type Query {
  hero(episode: Episode = JEDI): Droid
  droid(id: ID!): Droid
  search(term: String = "x", limit: Int = 10): [Droid!]!
}

type Mutation {
  rename(id: ID!, name: String!): Droid
}

"A mechanical creature."
type Droid {
  id: ID!
  name: String
  callsign: String @deprecated(reason: "Use `name`.")
}

enum Episode {
  NEWHOPE
  EMPIRE
  JEDI
  PHANTOM @deprecated
}
"#;

fn run(query: &str) -> serde_json::Value {
    let schema = Schema::from_str(STARWARS).expect("schema builds");
    run_json(&schema, &json!({}), query)
}

#[test]
fn type_by_name() {
    let response = run(r#"{
        __type(name: "Droid") {
          kind
          name
          description
          fields { name type { kind name ofType { kind name } } }
          interfaces { name }
          enumValues { name }
        }
    }"#);

    assert_eq!(response, json!({
        "data": {
            "__type": {
                "kind": "OBJECT",
                "name": "Droid",
                "description": "A mechanical creature.",
                "fields": [
                    {"name": "id", "type": {"kind": "NON_NULL", "name": null, "ofType": {"kind": "SCALAR", "name": "ID"}}},
                    {"name": "name", "type": {"kind": "SCALAR", "name": "String", "ofType": null}},
                ],
                "interfaces": [],
                "enumValues": null,
            },
        },
    }));
}

#[test]
fn unknown_type_is_null() {
    assert_eq!(
        run(r#"{ __type(name: "Wookiee") { name } }"#),
        json!({"data": {"__type": null}}),
    );
}

#[test]
fn wrapped_types_unwrap_through_of_type() {
    let response = run(r#"{
        __type(name: "Query") {
          fields { name type { kind ofType { kind ofType { kind ofType { name } } } } }
        }
    }"#);

    assert_eq!(
        response["data"]["__type"]["fields"][2],
        json!({
            "name": "search",
            "type": {
                "kind": "NON_NULL",
                "ofType": {"kind": "LIST", "ofType": {"kind": "NON_NULL", "ofType": {"name": "Droid"}}},
            },
        }),
    );
}

#[test]
fn root_types() {
    let response = run("{ __schema { queryType { name } mutationType { name } subscriptionType { name } } }");

    assert_eq!(response, json!({
        "data": {
            "__schema": {
                "queryType": {"name": "Query"},
                "mutationType": {"name": "Mutation"},
                "subscriptionType": null,
            },
        },
    }));
}

#[test]
fn schema_types_include_builtins_and_meta_types() {
    let response = run("{ __schema { types { name kind } } }");

    let types = response["data"]["__schema"]["types"].as_array().expect("types");
    let names: Vec<_> = types.iter().filter_map(|ty| ty["name"].as_str()).collect();
    for expected in ["Query", "Mutation", "Droid", "Episode", "String", "Boolean", "__Type", "__TypeKind"] {
        assert!(names.contains(&expected), "missing `{expected}` in {names:?}");
    }
    assert!(types.contains(&json!({"name": "Episode", "kind": "ENUM"})));
}

#[test]
fn directives() {
    let response = run("{ __schema { directives { name locations args { name } isRepeatable } } }");

    assert_eq!(response["data"]["__schema"]["directives"], json!([
        {
            "name": "skip",
            "locations": ["FIELD", "FRAGMENT_SPREAD", "INLINE_FRAGMENT"],
            "args": [{"name": "if"}],
            "isRepeatable": false,
        },
        {
            "name": "include",
            "locations": ["FIELD", "FRAGMENT_SPREAD", "INLINE_FRAGMENT"],
            "args": [{"name": "if"}],
            "isRepeatable": false,
        },
        {
            "name": "deprecated",
            "locations": ["FIELD_DEFINITION", "ENUM_VALUE"],
            "args": [{"name": "reason"}],
            "isRepeatable": false,
        },
    ]));
}

#[test]
fn deprecated_members_are_hidden_by_default() {
    let response = run(r#"{
        droid: __type(name: "Droid") {
          current: fields { name }
          all: fields(includeDeprecated: true) { name isDeprecated deprecationReason }
        }
        episode: __type(name: "Episode") {
          current: enumValues { name }
          all: enumValues(includeDeprecated: true) { name deprecationReason }
        }
    }"#);

    let data = &response["data"];
    assert_eq!(data["droid"]["current"], json!([{"name": "id"}, {"name": "name"}]));
    assert_eq!(
        data["droid"]["all"][2],
        json!({"name": "callsign", "isDeprecated": true, "deprecationReason": "Use `name`."}),
    );
    assert_eq!(data["episode"]["current"].as_array().map(Vec::len), Some(3));
    assert_eq!(
        data["episode"]["all"][3],
        json!({"name": "PHANTOM", "deprecationReason": "No longer supported"}),
    );
}

#[test]
fn default_values_are_printed_literals() {
    let response = run(r#"{
        __type(name: "Query") {
          fields { name args { name defaultValue } }
        }
    }"#);

    assert_eq!(response["data"]["__type"]["fields"], json!([
        {"name": "hero", "args": [{"name": "episode", "defaultValue": "JEDI"}]},
        {"name": "droid", "args": [{"name": "id", "defaultValue": null}]},
        {"name": "search", "args": [
            {"name": "term", "defaultValue": "\"x\""},
            {"name": "limit", "defaultValue": "10"},
        ]},
    ]));
}

#[test]
fn meta_fields_mix_with_data_fields() -> Result<()> {
    let schema = Schema::from_str("type Query { greeting: String }")?;

    let response = run_json(
        &schema,
        &json!({"greeting": "hello"}),
        r#"{ greeting __typename __type(name: "Query") { name } }"#,
    );

    assert_eq!(
        response.to_string(),
        r#"{"data":{"greeting":"hello","__typename":"Query","__type":{"name":"Query"}}}"#,
    );

    Ok(())
}
