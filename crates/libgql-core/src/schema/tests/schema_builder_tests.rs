use crate::loc;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::schema::TypeValidationError;
use crate::types::DeprecationState;
use crate::types::NamedTypeKind;
use std::path::Path;

type Result<T> = std::result::Result<T, SchemaBuildError>;

fn type_errors(sdl: &str) -> Vec<TypeValidationError> {
    match Schema::from_str(sdl) {
        Err(SchemaBuildError::TypeValidationErrors { errors }) => errors,
        other => panic!("expected type-validation errors, got {other:?}"),
    }
}

mod basics {
    use super::*;

    #[test]
    fn build_without_load() -> Result<()> {
        let schema = SchemaBuilder::new().build();

        assert_eq!(schema.unwrap_err(), SchemaBuildError::EmptyDocument);

        Ok(())
    }

    #[test]
    fn build_from_blank_document() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "  # nothing but a comment\n")?
            .build();

        assert_eq!(schema.unwrap_err(), SchemaBuildError::EmptyDocument);

        Ok(())
    }

    #[test]
    fn build_without_query_type() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "type Mutation { ping: Boolean }")?
            .build();

        assert_eq!(schema.unwrap_err(), SchemaBuildError::NoQueryTypeDefined);

        Ok(())
    }

    #[test]
    fn query_must_be_an_object_type() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "enum Query { A B }")?
            .build();

        assert_eq!(schema.unwrap_err(), SchemaBuildError::NoQueryTypeDefined);

        Ok(())
    }

    #[test]
    fn root_types_are_picked_up_by_name() -> Result<()> {
        let schema = Schema::from_str(concat!(
            "type Query { a: Int }\n",
            "type Mutation { b: Int }\n",
            "type Subscription { c: Int }\n",
        ))?;

        assert_eq!(schema.type_name(schema.query_type()), "Query");
        assert_eq!(schema.mutation_type().map(|ty| schema.type_name(ty)).as_deref(), Some("Mutation"));
        assert_eq!(
            schema.subscription_type().map(|ty| schema.type_name(ty)).as_deref(),
            Some("Subscription"),
        );

        Ok(())
    }

    #[test]
    fn optional_root_types_are_absent() -> Result<()> {
        let schema = Schema::from_str("type Query { a: Int }")?;

        assert!(schema.mutation_type().is_none());
        assert!(schema.subscription_type().is_none());

        Ok(())
    }

    #[test]
    fn types_load_across_documents() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "type Query { hero: Character }")?
            .load_str(None, "type Character { name: String! friends: [Character] }")?
            .build()?;

        let character = schema.get_type("Character").expect("`Character` is defined");
        assert_eq!(character.kind(), NamedTypeKind::Object);
        let friends = character
            .as_object()
            .and_then(|obj| obj.field("friends"))
            .expect("`friends` is defined");
        assert_eq!(schema.type_name(friends.ty), "[Character]");

        Ok(())
    }

    #[test]
    fn builtins_are_always_present() -> Result<()> {
        let schema = Schema::from_str("type Query { a: Int }")?;

        for name in ["Boolean", "Float", "ID", "Int", "String"] {
            let ty = schema.get_type(name).expect("builtin scalar");
            assert!(ty.builtin_scalar().is_some(), "`{name}` is a builtin scalar");
        }
        for name in ["__Schema", "__Type", "__Field", "__InputValue", "__EnumValue", "__Directive"] {
            let ty = schema.get_type(name).expect("introspection type");
            assert!(ty.is_introspection_type());
        }
        let directive_names: Vec<_> = schema.directives().map(|d| d.name.as_str()).collect();
        assert!(directive_names.contains(&"skip"));
        assert!(directive_names.contains(&"include"));
        assert!(directive_names.contains(&"deprecated"));

        Ok(())
    }

    #[test]
    fn descriptions_are_kept() -> Result<()> {
        let schema = Schema::from_str(concat!(
            "\"\"\"The root.\"\"\"\n",
            "type Query {\n",
            "  \"Says hello.\"\n",
            "  hello: String\n",
            "}\n",
        ))?;

        let query = schema.get_type("Query").expect("`Query` is defined");
        assert_eq!(query.description(), Some("The root."));
        let hello = query.as_object().and_then(|obj| obj.field("hello")).expect("`hello`");
        assert_eq!(hello.description.as_deref(), Some("Says hello."));

        Ok(())
    }
}

mod definition_errors {
    use super::*;

    #[test]
    fn operations_are_rejected() -> Result<()> {
        let result = SchemaBuilder::new().load_str(
            Some(Path::new("schema.graphql")),
            "type Query { a: Int }\n{ a }\n",
        );

        let Err(SchemaBuildError::NonSchemaDefinition { location }) = result else {
            panic!("expected NonSchemaDefinition, got {result:?}");
        };
        assert_eq!(location.file.as_deref(), Some(Path::new("schema.graphql")));
        assert_eq!(location.line, 2);
        assert_eq!(location.col, 1);

        Ok(())
    }

    #[test]
    fn parse_errors_carry_the_file() -> Result<()> {
        let result = SchemaBuilder::new().load_str(
            Some(Path::new("broken.graphql")),
            "type Query { a: }",
        );

        let Err(SchemaBuildError::ParseError { file, errors, .. }) = result else {
            panic!("expected ParseError, got {result:?}");
        };
        assert_eq!(file.as_deref(), Some(Path::new("broken.graphql")));
        assert!(!errors.is_empty());

        Ok(())
    }

    #[test]
    fn duplicate_type_names_report_both_locations() -> Result<()> {
        let result = SchemaBuilder::new()
            .load_str(None, "type Query { a: Int }\ntype Thing { a: Int }")?
            .load_str(None, "\n\nenum Thing { A }")?
            .build();

        let Err(SchemaBuildError::DuplicateTypeDefinition { type_name, def1, def2 }) = result else {
            panic!("expected DuplicateTypeDefinition, got {result:?}");
        };
        assert_eq!(type_name, "Thing");
        let (loc::SchemaDefLocation::Schema(def1), loc::SchemaDefLocation::Schema(def2)) = (def1, def2) else {
            panic!("both definitions come from schema documents");
        };
        assert_eq!((def1.line, def1.col), (2, 6));
        assert_eq!((def2.line, def2.col), (3, 6));

        Ok(())
    }

    #[test]
    fn builtin_scalars_cannot_be_redefined() -> Result<()> {
        let result = Schema::from_str("type Query { a: Int }\nscalar String");

        assert!(matches!(
            result,
            Err(SchemaBuildError::BuiltinTypeRedefinition { ref type_name, .. }) if type_name == "String",
        ));

        Ok(())
    }

    #[test]
    fn dunder_type_names_are_rejected() -> Result<()> {
        let result = Schema::from_str("type Query { a: Int }\ntype __Secret { a: Int }");

        assert!(matches!(
            result,
            Err(SchemaBuildError::InvalidDunderPrefixedTypeName { ref type_name, .. })
                if type_name == "__Secret",
        ));

        Ok(())
    }

    #[test]
    fn introspection_types_cannot_be_redefined() -> Result<()> {
        let result = Schema::from_str("type Query { a: Int }\ntype __Type { a: Int }");

        assert!(matches!(
            result,
            Err(SchemaBuildError::InvalidDunderPrefixedTypeName { .. }),
        ));

        Ok(())
    }
}

mod type_validation {
    use super::*;

    #[test]
    fn undefined_type_reference() -> Result<()> {
        let errors = type_errors("type Query {\n  hero: Droid\n}");

        assert_eq!(errors.len(), 1);
        let TypeValidationError::UndefinedTypeName { ref_location, undefined_type_name } = &errors[0] else {
            panic!("expected UndefinedTypeName, got {:?}", errors[0]);
        };
        assert_eq!(undefined_type_name, "Droid");
        assert_eq!((ref_location.line, ref_location.col), (2, 9));

        Ok(())
    }

    #[test]
    fn undefined_type_inside_wrappers() -> Result<()> {
        let errors = type_errors("type Query { heroes: [Droid!]! }");

        assert!(matches!(
            &errors[..],
            [TypeValidationError::UndefinedTypeName { undefined_type_name, .. }]
                if undefined_type_name == "Droid",
        ));

        Ok(())
    }

    #[test]
    fn duplicate_members() -> Result<()> {
        let errors = type_errors(concat!(
            "type Query { a: Int a: String b(x: Int, x: Int): Int }\n",
            "enum Color { RED RED }\n",
            "input Filter { q: String q: String }\n",
        ));

        assert!(errors.iter().any(|err| matches!(
            err,
            TypeValidationError::DuplicateFieldName { type_name, field_name, .. }
                if type_name == "Query" && field_name == "a",
        )));
        assert!(errors.iter().any(|err| matches!(
            err,
            TypeValidationError::DuplicateArgumentName { field_name, argument_name, .. }
                if field_name == "b" && argument_name == "x",
        )));
        assert!(errors.iter().any(|err| matches!(
            err,
            TypeValidationError::DuplicateEnumValueName { enum_name, value_name, .. }
                if enum_name == "Color" && value_name == "RED",
        )));
        assert!(errors.iter().any(|err| matches!(
            err,
            TypeValidationError::DuplicateFieldName { type_name, field_name, .. }
                if type_name == "Filter" && field_name == "q",
        )));

        Ok(())
    }

    #[test]
    fn empty_type_definitions() -> Result<()> {
        let errors = type_errors("type Query { a: Int }\ntype Nothing\nenum Never\ninput Void");

        let empty: Vec<_> = errors
            .iter()
            .filter_map(|err| match err {
                TypeValidationError::EmptyTypeDefinition { type_name, member_kind, .. } => {
                    Some((type_name.as_str(), *member_kind))
                },
                _ => None,
            })
            .collect();
        assert_eq!(empty, vec![
            ("Nothing", "field"),
            ("Never", "value"),
            ("Void", "input field"),
        ]);

        Ok(())
    }

    #[test]
    fn dunder_member_names() -> Result<()> {
        let errors = type_errors("type Query { __secret: Int ok(__arg: Int): Int }");

        let names: Vec<_> = errors
            .iter()
            .filter_map(|err| match err {
                TypeValidationError::InvalidDunderPrefixedName { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["__secret", "__arg"]);

        Ok(())
    }

    #[test]
    fn input_and_output_types_do_not_mix() -> Result<()> {
        let errors = type_errors(concat!(
            "type Query { filter: Filter search(by: Droid): Int }\n",
            "input Filter { q: String }\n",
            "type Droid { name: String }\n",
        ));

        assert!(errors.iter().any(|err| matches!(
            err,
            TypeValidationError::InputTypeUsedAsOutput { field_name, input_type_name, .. }
                if field_name == "filter" && input_type_name == "Filter",
        )));
        assert!(errors.iter().any(|err| matches!(
            err,
            TypeValidationError::OutputTypeUsedAsInput { owner, output_type_name, .. }
                if owner == "Query.search(by:)" && output_type_name == "Droid",
        )));

        Ok(())
    }

    #[test]
    fn invalid_default_values() -> Result<()> {
        let errors = type_errors(concat!(
            "type Query { a(n: Int = \"ten\"): Int }\n",
            "input Filter { limit: Int! = null }\n",
        ));

        let owners: Vec<_> = errors
            .iter()
            .filter_map(|err| match err {
                TypeValidationError::InvalidDefaultValue { owner, .. } => Some(owner.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(owners.len(), 2);
        assert!(owners.contains(&"Query.a(n:)"));
        assert!(owners.contains(&"Filter.limit"));

        Ok(())
    }

    #[test]
    fn unbreakable_input_cycle() -> Result<()> {
        let errors = type_errors(concat!(
            "type Query { a(f: A): Int }\n",
            "input A { b: B! }\n",
            "input B { a: A! }\n",
        ));

        let cycles: Vec<_> = errors
            .iter()
            .filter_map(|err| match err {
                TypeValidationError::CircularInputFieldChain { circular_field_path } => {
                    Some(circular_field_path.clone())
                },
                _ => None,
            })
            .collect();
        assert_eq!(cycles, vec![vec![
            "A.b".to_string(),
            "B.a".to_string(),
            "A".to_string(),
        ]]);

        Ok(())
    }

    #[test]
    fn nullable_or_list_fields_break_input_cycles() -> Result<()> {
        Schema::from_str(concat!(
            "type Query { a(f: A): Int }\n",
            "input A { b: B! }\n",
            "input B { a: A next: [B!]! }\n",
        ))?;

        Ok(())
    }

    #[test]
    fn unknown_and_misplaced_directives() -> Result<()> {
        let errors = type_errors(concat!(
            "type Query @deprecated {\n",
            "  a: Int @cached\n",
            "  b: Int @deprecated @deprecated\n",
            "}\n",
        ));

        assert!(errors.iter().any(|err| matches!(
            err,
            TypeValidationError::MisplacedDirective { directive_name, .. } if directive_name == "deprecated",
        )));
        assert!(errors.iter().any(|err| matches!(
            err,
            TypeValidationError::UnknownDirective { directive_name, .. } if directive_name == "cached",
        )));
        assert!(errors.iter().any(|err| matches!(
            err,
            TypeValidationError::DuplicateDirective { directive_name, .. } if directive_name == "deprecated",
        )));

        Ok(())
    }

    #[test]
    fn errors_render_as_a_bulleted_list() -> Result<()> {
        let err = Schema::from_str("type Query { a: Missing }").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("type-validation errors"));
        assert!(message.contains("  * Reference to an undefined type `Missing`"));

        Ok(())
    }
}

mod deprecation {
    use super::*;

    const SCHEMA: &str = r#"
        type Query {
          current: Int
          old: Int @deprecated
          older: Int @deprecated(reason: "Use `current`.")
          oldest: Int @deprecated(reason: null)
        }

        enum Color {
          RED
          MAUVE @deprecated(reason: "Nobody knows what it is.")
        }
    "#;

    #[test]
    fn field_deprecation_states() -> Result<()> {
        let schema = Schema::from_str(SCHEMA)?;
        let query = schema.object_type(schema.query_type()).expect("`Query` is an object");
        let deprecation = |name: &str| query.field(name).map(|f| f.deprecation.clone());

        assert_eq!(deprecation("current"), Some(DeprecationState::NotDeprecated));
        assert_eq!(
            deprecation("old"),
            Some(DeprecationState::Deprecated(Some("No longer supported".to_string()))),
        );
        assert_eq!(
            deprecation("older"),
            Some(DeprecationState::Deprecated(Some("Use `current`.".to_string()))),
        );
        assert_eq!(deprecation("oldest"), Some(DeprecationState::Deprecated(None)));

        Ok(())
    }

    #[test]
    fn enum_value_deprecation() -> Result<()> {
        let schema = Schema::from_str(SCHEMA)?;
        let color = schema
            .get_type("Color")
            .and_then(|ty| ty.as_enum())
            .expect("`Color` is an enum");

        assert!(!color.value("RED").expect("RED").deprecation.is_deprecated());
        let mauve = color.value("MAUVE").expect("MAUVE");
        assert_eq!(mauve.deprecation.reason(), Some("Nobody knows what it is."));

        Ok(())
    }

    #[test]
    fn non_string_reason_is_rejected() -> Result<()> {
        let errors = type_errors("type Query { a: Int @deprecated(reason: 5) }");

        assert!(matches!(
            &errors[..],
            [TypeValidationError::InvalidDirectiveArgument { directive_name, .. }]
                if directive_name == "deprecated",
        ));

        Ok(())
    }
}
