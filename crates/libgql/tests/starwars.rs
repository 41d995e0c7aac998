use libgql::Request;
use libgql::execute_request;
use libgql::execution::JsonResolver;
use libgql::execution::RequestContext;
use libgql::schema::Schema;
use libgql::validation;
use serde_json::json;

const SCHEMA: &str = r#"
"The root of all queries."
type Query {
  hero(episode: Episode): Character
  character(id: ID!): Character
}

type Character {
  id: ID!
  name: String!
  friends: [Character]
  appearsIn: [Episode!]!
}

enum Episode {
  NEWHOPE
  EMPIRE
  JEDI
}
"#;

fn root() -> serde_json::Value {
    json!({
        "hero": {
            "id": "2001",
            "name": "R2-D2",
            "friends": [
                {"id": "1000", "name": "Luke Skywalker", "appearsIn": ["NEWHOPE", "EMPIRE", "JEDI"]},
                {"id": "1002", "name": "Han Solo", "appearsIn": ["NEWHOPE", "EMPIRE", "JEDI"]},
            ],
            "appearsIn": ["NEWHOPE", "EMPIRE", "JEDI"],
        },
    })
}

fn execute(request: Request) -> serde_json::Value {
    let schema = Schema::from_str(SCHEMA).expect("schema builds");
    let root = root();
    execute_request(&schema, &JsonResolver::new(&root), &request, &RequestContext::new()).to_json()
}

#[test]
fn hero_with_friends() {
    let response = execute(Request::new(r#"
        query HeroNameAndFriends {
          hero {
            name
            friends { name }
          }
        }
    "#));

    assert_eq!(response, json!({
        "data": {
            "hero": {
                "name": "R2-D2",
                "friends": [{"name": "Luke Skywalker"}, {"name": "Han Solo"}],
            },
        },
    }));
}

#[test]
fn variables_and_fragments() {
    let request: Request = serde_json::from_value(json!({
        "query": "query ($ep: Episode) { hero(episode: $ep) { ...Ids appearsIn } }\n\
                  fragment Ids on Character { id }",
        "variables": {"ep": "JEDI"},
    }))
    .expect("request deserializes");

    assert_eq!(execute(request), json!({
        "data": {"hero": {"id": "2001", "appearsIn": ["NEWHOPE", "EMPIRE", "JEDI"]}},
    }));
}

#[test]
fn invalid_documents_are_rejected_before_execution() {
    let response = execute(Request::new("{ hero { name secretBackstory } }"));

    assert_eq!(response, json!({
        "errors": [{
            "message": "Cannot query field `secretBackstory` on type `Character`",
            "locations": [{"line": 1, "column": 15}],
            "path": ["hero", "secretBackstory"],
        }],
    }));
}

#[test]
fn parser_is_reexported() {
    let schema = Schema::from_str(SCHEMA).expect("schema builds");
    let source = "{ character { name } }";
    let document = libgql::parser::parse(source)
        .into_valid_ast()
        .expect("document parses");

    let errors = validation::validate(&schema, &document, source);

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message(),
        "Argument `id` of type `ID!` is required on `Query.character` but not provided",
    );
}
