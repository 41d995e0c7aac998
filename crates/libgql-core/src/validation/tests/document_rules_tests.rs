use super::messages;
use super::schema;
use super::validate_query;
use crate::loc::SourceLocation;
use crate::validation::ValidationErrorKind;

#[test]
fn valid_document() {
    let schema = schema();
    let errors = validate_query(&schema, r#"
        query Hero($episode: Episode = JEDI) {
          hero(episode: $episode) {
            ...CharacterFields
            friends { name }
          }
        }

        fragment CharacterFields on Character {
          name
          appearsIn
        }
    "#);

    assert_eq!(errors, vec![]);
}

#[test]
fn type_definitions_are_not_executable() {
    let schema = schema();
    let errors = validate_query(&schema, "{ __typename }\ntype Extra { a: Int }");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ValidationErrorKind::NonExecutableDefinition {
        definition_kind: "type",
        name: "Extra".to_string(),
    });
    assert_eq!(errors[0].locations, vec![SourceLocation::new(2, 1)]);
}

#[test]
fn anonymous_operation_must_be_alone() {
    let schema = schema();
    let errors = validate_query(&schema, "{ __typename }\nquery Named { __typename }");

    assert_eq!(messages(&errors), vec![
        "This anonymous operation must be the only defined operation",
    ]);
    assert_eq!(errors[0].locations, vec![SourceLocation::new(1, 1)]);
}

#[test]
fn duplicate_operation_names_report_every_location() {
    let schema = schema();
    let errors = validate_query(&schema, "query Q { __typename }\nquery Q { __typename }");

    assert_eq!(messages(&errors), vec!["There can be only one operation named `Q`"]);
    assert_eq!(errors[0].locations, vec![
        SourceLocation::new(1, 7),
        SourceLocation::new(2, 7),
    ]);
}

#[test]
fn duplicate_fragment_names() {
    let schema = schema();
    let errors = validate_query(&schema, concat!(
        "{ hero { ...F } }\n",
        "fragment F on Character { name }\n",
        "fragment F on Character { appearsIn }\n",
    ));

    assert_eq!(messages(&errors), vec!["There can be only one fragment named `F`"]);
    assert_eq!(errors[0].locations.len(), 2);
}

#[test]
fn fragment_cycle_through_another_fragment() {
    let schema = schema();
    let errors = validate_query(&schema, concat!(
        "{ hero { ...A } }\n",
        "fragment A on Character { ...B }\n",
        "fragment B on Character { ...A }\n",
    ));

    assert_eq!(messages(&errors), vec!["Cannot spread fragment `A` within itself via `B`"]);
    assert_eq!(errors[0].locations, vec![
        SourceLocation::new(2, 27),
        SourceLocation::new(3, 27),
    ]);
}

#[test]
fn fragment_spreading_itself() {
    let schema = schema();
    let errors = validate_query(&schema, concat!(
        "{ hero { ...A } }\n",
        "fragment A on Character { name friends { ...A } }\n",
    ));

    assert_eq!(messages(&errors), vec!["Cannot spread fragment `A` within itself"]);
}

#[test]
fn unknown_and_unused_fragments() {
    let schema = schema();
    let errors = validate_query(&schema, concat!(
        "{ hero { ...Missing } }\n",
        "fragment Unused on Character { name }\n",
    ));

    assert_eq!(messages(&errors), vec![
        "Unknown fragment `Missing`",
        "Fragment `Unused` is never used",
    ]);
    assert_eq!(errors[1].locations, vec![SourceLocation::new(2, 1)]);
}

#[test]
fn fragment_type_conditions() {
    let schema = schema();
    let errors = validate_query(&schema, concat!(
        "{ hero { ...OnWookiee ...OnEpisode } }\n",
        "fragment OnWookiee on Wookiee { name }\n",
        "fragment OnEpisode on Episode { name }\n",
    ));

    assert_eq!(messages(&errors), vec![
        "Unknown type `Wookiee` in fragment type condition",
        "Fragments cannot condition on the non-composite type `Episode`",
    ]);
}

#[test]
fn impossible_spreads() {
    let schema = schema();
    let errors = validate_query(&schema, concat!(
        "{\n",
        "  hero { ... on Droid { name } }\n",
        "  droid(id: 1) { ...CharacterName }\n",
        "}\n",
        "fragment CharacterName on Character { name }\n",
    ));

    assert_eq!(messages(&errors), vec![
        "Fragment cannot be spread here as objects of type `Character` can never be of type `Droid`",
        "Fragment `CharacterName` cannot be spread here as objects of type `Droid` can never be of \
         type `Character`",
    ]);
}

#[test]
fn errors_are_not_repeated() {
    let schema = schema();
    let errors = validate_query(&schema, concat!(
        "query A { hero { ...F } }\n",
        "query B { hero { ...F } }\n",
        "fragment F on Character { nickname }\n",
    ));

    // Both operations reach the same bad field through the same fragment.
    assert_eq!(messages(&errors), vec!["Cannot query field `nickname` on type `Character`"]);
}

#[test]
fn validation_is_thread_safe() {
    use rayon::prelude::*;

    let schema = schema();
    let query = "query ($id: ID!) { droid(id: $id) { name primaryFunction } }";

    let failures: usize = (0..64)
        .into_par_iter()
        .map(|_| validate_query(&schema, query).len())
        .sum();

    assert_eq!(failures, 0);
}
