mod document_rules_tests;
mod operation_rules_tests;

use crate::schema::Schema;
use crate::validation::ValidationError;
use crate::validation::validate;

const SCHEMA: &str = r#"
type Query {
  hero(episode: Episode): Character
  droid(id: ID!): Droid
  search(term: String!, limit: Int = 10): [Character]
  echo(value: String, values: [String], flag: Boolean! = false): String
  review(input: ReviewInput): String
}

type Character {
  name: String!
  friends: [Character]
  appearsIn: [Episode!]!
}

type Droid {
  name: String!
  primaryFunction: String
}

enum Episode { NEWHOPE EMPIRE JEDI }

input ReviewInput {
  stars: Int!
  commentary: String
}
"#;

fn schema() -> Schema {
    Schema::from_str(SCHEMA).expect("test schema builds")
}

fn validate_query(schema: &Schema, query: &str) -> Vec<ValidationError> {
    let document = libgql_parser::parse(query)
        .into_valid_ast()
        .unwrap_or_else(|| panic!("query does not parse: {query}"));
    validate(schema, &document, query)
}

fn messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ValidationError::message).collect()
}
