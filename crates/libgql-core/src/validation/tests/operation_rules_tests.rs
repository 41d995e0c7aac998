use super::messages;
use super::schema;
use super::validate_query;
use crate::loc::SourceLocation;
use crate::response::GraphQLError;
use crate::schema::Schema;
use crate::types::DirectiveLocation;
use crate::validation::ValidationErrorKind;

mod fields {
    use super::*;

    #[test]
    fn unknown_field_carries_its_path() {
        let schema = schema();
        let errors = validate_query(&schema, "{ hero { friends { nme } } }");

        assert_eq!(messages(&errors), vec!["Cannot query field `nme` on type `Character`"]);
        assert_eq!(errors[0].locations, vec![SourceLocation::new(1, 20)]);
        let path = errors[0].path.as_ref().expect("field errors have a path");
        assert_eq!(path.to_string(), "hero.friends.nme");
    }

    #[test]
    fn unknown_field_path_uses_aliases() {
        let schema = schema();
        let errors = validate_query(&schema, "{ luke: hero { best: nme } }");

        let path = errors[0].path.as_ref().expect("field errors have a path");
        assert_eq!(path.to_string(), "luke.best");
    }

    #[test]
    fn errors_convert_to_response_errors() {
        let schema = schema();
        let errors = validate_query(&schema, "{ hero { friends { nme } } }");

        let gql_error = GraphQLError::from(errors[0].clone());
        assert_eq!(
            serde_json::to_value(&gql_error).expect("serializes"),
            serde_json::json!({
                "message": "Cannot query field `nme` on type `Character`",
                "locations": [{"line": 1, "column": 20}],
                "path": ["hero", "friends", "nme"],
            }),
        );
    }

    #[test]
    fn selection_sets_match_the_field_type() {
        let schema = schema();
        let errors = validate_query(&schema, "{ hero droid(id: 1) { name { first } } }");

        assert_eq!(messages(&errors), vec![
            "Field `hero` of type `Character` must have a selection of subfields",
            "Field `name` must not have a selection since type `String!` has no subfields",
        ]);
    }

    #[test]
    fn meta_fields() {
        let schema = schema();

        let errors = validate_query(&schema, r#"
            {
              __typename
              __schema { queryType { name } }
              __type(name: "Droid") { name fields { name } }
              hero { __typename name }
            }
        "#);
        assert_eq!(errors, vec![]);

        let errors = validate_query(&schema, "{ hero { __schema { types { name } } } }");
        assert_eq!(messages(&errors), vec!["Cannot query field `__schema` on type `Character`"]);

        let errors = validate_query(&schema, "{ __type { name } }");
        assert_eq!(messages(&errors), vec![
            "Argument `name` of type `String!` is required on `Query.__type` but not provided",
        ]);
    }
}

mod arguments {
    use super::*;

    #[test]
    fn missing_required_argument() {
        let schema = schema();
        let errors = validate_query(&schema, "{ droid { name } }");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingRequiredArgument {
            argument_name: "id".to_string(),
            type_name: "ID!".to_string(),
            owner: "Query.droid".to_string(),
        });
        assert_eq!(errors[0].locations, vec![SourceLocation::new(1, 3)]);
    }

    #[test]
    fn defaulted_non_null_argument_is_optional() {
        let schema = schema();

        assert_eq!(validate_query(&schema, "{ echo }"), vec![]);
    }

    #[test]
    fn unknown_and_duplicate_arguments() {
        let schema = schema();
        let errors = validate_query(&schema, "{ echo(volume: 11, value: \"a\", value: \"b\") }");

        assert_eq!(messages(&errors), vec![
            "Unknown argument `volume` on `Query.echo`",
            "There can be only one argument named `value`",
        ]);
        assert_eq!(errors[1].locations, vec![
            SourceLocation::new(1, 20),
            SourceLocation::new(1, 32),
        ]);
    }

    #[test]
    fn invalid_literals() {
        let schema = schema();
        let errors = validate_query(&schema, concat!(
            "{\n",
            "  hero(episode: SITH) { name }\n",
            "  review(input: {commentary: \"meh\"})\n",
            "}\n",
        ));

        assert_eq!(messages(&errors), vec![
            "Invalid value for argument `episode`: Value `SITH` does not exist in the `Episode` enum",
            "Invalid value for argument `input`: Field `ReviewInput.stars` of required type `Int!` was \
             not provided",
        ]);
        assert_eq!(errors[0].locations, vec![SourceLocation::new(2, 17)]);
    }

    #[test]
    fn single_values_are_accepted_for_lists() {
        let schema = schema();

        assert_eq!(validate_query(&schema, "{ echo(values: \"one\") }"), vec![]);
    }
}

mod variables {
    use super::*;

    #[test]
    fn undefined_variable() {
        let schema = schema();
        let errors = validate_query(&schema, "query Q { droid(id: $id) { name } }");

        assert_eq!(messages(&errors), vec!["Variable `$id` is not defined in operation `Q`"]);
        assert_eq!(errors[0].locations, vec![
            SourceLocation::new(1, 21),
            SourceLocation::new(1, 1),
        ]);
    }

    #[test]
    fn unused_variable() {
        let schema = schema();
        let errors = validate_query(&schema, "query Q($unused: Int) { __typename }");

        assert_eq!(messages(&errors), vec!["Variable `$unused` is never used in operation `Q`"]);
        assert_eq!(errors[0].locations, vec![SourceLocation::new(1, 9)]);
    }

    #[test]
    fn variables_used_by_directives_and_nested_values_count() {
        let schema = schema();
        let errors = validate_query(&schema, r#"
            query ($skip: Boolean!, $stars: Int!, $words: String) {
              hero @skip(if: $skip) { name }
              review(input: {stars: $stars, commentary: $words})
            }
        "#);

        assert_eq!(errors, vec![]);
    }

    #[test]
    fn variable_definition_errors() {
        let schema = schema();
        let errors = validate_query(&schema, concat!(
            "query (\n",
            "  $a: Int, $a: Int,\n",
            "  $planet: Planet,\n",
            "  $hero: Character,\n",
            "  $n: Int = \"many\"\n",
            ") {\n",
            "  echo(value: $planet) search(term: \"\", limit: $n) { name }\n",
            "  hero { name } droid(id: $a) { name } x: echo(values: [$hero])\n",
            "}\n",
        ));

        assert!(errors.iter().any(|err| err.kind == ValidationErrorKind::DuplicateVariableName {
            variable_name: "a".to_string(),
        }));
        assert!(errors.iter().any(|err| err.kind == ValidationErrorKind::UnknownVariableType {
            variable_name: "planet".to_string(),
            type_name: "Planet".to_string(),
        }));
        assert!(errors.iter().any(|err| err.kind == ValidationErrorKind::VariableNotInputType {
            variable_name: "hero".to_string(),
            type_name: "Character".to_string(),
        }));
        assert!(errors.iter().any(|err| matches!(
            &err.kind,
            ValidationErrorKind::InvalidVariableDefault { variable_name, .. } if variable_name == "n",
        )));
    }

    #[test]
    fn nullable_variable_in_non_null_position() {
        let schema = schema();
        let errors = validate_query(&schema, "query ($id: ID) { droid(id: $id) { name } }");

        assert_eq!(messages(&errors), vec![
            "Variable `$id` of type `ID` used in position expecting type `ID!`",
        ]);
        assert_eq!(errors[0].locations, vec![
            SourceLocation::new(1, 8),
            SourceLocation::new(1, 29),
        ]);
        assert_eq!(errors[0].path.as_ref().map(ToString::to_string).as_deref(), Some("droid"));
    }

    #[test]
    fn variable_default_alone_does_not_satisfy_non_null() {
        let schema = schema();
        let errors = validate_query(&schema, "query ($id: ID = \"2001\") { droid(id: $id) { name } }");

        assert!(matches!(
            &errors[..],
            [err] if matches!(err.kind, ValidationErrorKind::VariableTypeMismatch { .. }),
        ));
    }

    #[test]
    fn both_defaults_allow_a_nullable_variable() {
        let schema = schema();

        let errors = validate_query(&schema, "query ($flag: Boolean = true) { echo(flag: $flag) }");
        assert_eq!(errors, vec![]);

        let errors = validate_query(&schema, "query ($flag: Boolean) { echo(flag: $flag) }");
        assert_eq!(messages(&errors), vec![
            "Variable `$flag` of type `Boolean` used in position expecting type `Boolean!`",
        ]);

        let errors = validate_query(&schema, "query ($flag: Boolean = null) { echo(flag: $flag) }");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn usages_inside_lists_and_objects() {
        let schema = schema();

        let errors = validate_query(&schema, "query ($v: String) { echo(values: [$v, \"x\"]) }");
        assert_eq!(errors, vec![]);

        let errors = validate_query(&schema, "query ($v: Int) { echo(values: [$v]) }");
        assert_eq!(messages(&errors), vec![
            "Variable `$v` of type `Int` used in position expecting type `String`",
        ]);

        let errors = validate_query(&schema, "query ($s: Int) { review(input: {stars: $s}) }");
        assert_eq!(messages(&errors), vec![
            "Variable `$s` of type `Int` used in position expecting type `Int!`",
        ]);
    }

    #[test]
    fn list_variables_must_match_list_positions() {
        let schema = schema();

        let errors = validate_query(&schema, "query ($vs: [String!]!) { echo(values: $vs) }");
        assert_eq!(errors, vec![]);

        let errors = validate_query(&schema, "query ($vs: [String]) { echo(value: $vs) }");
        assert_eq!(messages(&errors), vec![
            "Variable `$vs` of type `[String]` used in position expecting type `String`",
        ]);
    }

    #[test]
    fn variable_types_do_not_grow_the_schema() {
        let schema = schema();
        let registered = schema.registered_type_count();

        let errors = validate_query(&schema, "query ($vs: [String!]) { echo(values: $vs) }");
        assert_eq!(errors, vec![]);

        for depth in 1..=30 {
            let var_type = format!("{}Int!{}", "[".repeat(depth), "]!".repeat(depth));
            let query = format!("query ($v: {var_type} = 1) {{ echo(values: $v) }}");
            let errors = validate_query(&schema, &query);
            assert!(
                errors.iter().any(|err| matches!(
                    &err.kind,
                    ValidationErrorKind::VariableTypeMismatch { variable_type, .. } if *variable_type == var_type,
                )),
                "{query}: {:?}",
                messages(&errors),
            );
        }

        assert_eq!(schema.registered_type_count(), registered);
    }
}

mod directives {
    use super::*;

    #[test]
    fn skip_and_include() {
        let schema = schema();
        let errors = validate_query(&schema, r#"
            query ($yes: Boolean!) {
              hero @skip(if: false) { name @include(if: $yes) }
              ... @include(if: true) { echo }
            }
        "#);

        assert_eq!(errors, vec![]);
    }

    #[test]
    fn directive_errors() {
        let schema = schema();
        let errors = validate_query(&schema, concat!(
            "query @skip(if: true) {\n",
            "  a: hero @skip { name }\n",
            "  b: hero @cached { name }\n",
            "  c: hero @include(if: true) @include(if: false) { name }\n",
            "  d: hero @deprecated { name }\n",
            "}\n",
        ));

        assert_eq!(errors[0].kind, ValidationErrorKind::MisplacedDirective {
            directive_name: "skip".to_string(),
            location: DirectiveLocation::Query,
        });
        assert!(errors.iter().any(|err| err.kind == ValidationErrorKind::MissingRequiredArgument {
            argument_name: "if".to_string(),
            type_name: "Boolean!".to_string(),
            owner: "@skip".to_string(),
        }));
        assert!(errors.iter().any(|err| err.kind == ValidationErrorKind::UnknownDirective {
            directive_name: "cached".to_string(),
        }));
        assert!(errors.iter().any(|err| err.kind == ValidationErrorKind::DuplicateDirective {
            directive_name: "include".to_string(),
        }));
        assert!(errors.iter().any(|err| err.kind == ValidationErrorKind::MisplacedDirective {
            directive_name: "deprecated".to_string(),
            location: DirectiveLocation::Field,
        }));
    }
}

mod operation_types {
    use super::*;

    #[test]
    fn mutations_need_a_mutation_root() {
        let schema = schema();
        let errors = validate_query(&schema, "mutation { echo }");

        assert_eq!(messages(&errors), vec!["The schema does not define a `Mutation` root type"]);
    }

    #[test]
    fn mutations_validate_against_the_mutation_root() {
        let schema = Schema::from_str(concat!(
            "type Query { a: Int }\n",
            "type Mutation { rate(stars: Int!): Int }\n",
        ))
        .expect("schema builds");

        assert_eq!(validate_query(&schema, "mutation ($s: Int!) { rate(stars: $s) }"), vec![]);
        assert_eq!(messages(&validate_query(&schema, "mutation { a }")), vec![
            "Cannot query field `a` on type `Mutation`",
        ]);
    }

    #[test]
    fn subscriptions_are_rejected() {
        let schema = schema();
        let errors = validate_query(&schema, "subscription ($x: Int) { echo }");

        // The unused variable is not reported since nothing below the root
        // could be checked.
        assert_eq!(messages(&errors), vec!["Subscription operations are not supported"]);
    }
}
