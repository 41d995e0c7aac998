use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::graphql_files;
use crate::output_utils;
use libgql::schema::Schema;
use libgql::schema::SchemaBuilder;
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ValidateCmd {
    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "graphqls".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Paths to one or more schema (SDL) files or directories \
             containing them.",
        long,
        num_args=1..,
        required=true,
    )]
    schema: Vec<PathBuf>,

    #[arg(
        help="Paths to one or more operation documents or directories \
             containing them, which are validated against the schema.",
        name="OPERATION_PATHS",
    )]
    operation_paths: Vec<PathBuf>,
}

/// The problems found in one operation document.
struct DocumentReport {
    path: PathBuf,
    num_operations: usize,
    errors: Vec<String>,
}

#[inherent::inherent]
impl RunnableCommand for ValidateCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let exts = graphql_files::normalize_exts(&self.graphql_file_exts);

        let schema_files = match graphql_files::collect(&self.schema, &exts) {
            Ok(files) => files,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} Failed to scan schema paths: {err}",
                output_utils::RED_X,
            )),
        };
        let schema = match SchemaBuilder::new()
            .load_files(&schema_files.paths)
            .and_then(SchemaBuilder::build)
        {
            Ok(schema) => schema,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} Errors validating schema: {err}",
                output_utils::RED_X,
            )),
        };
        let num_types = schema
            .types()
            .filter(|ty| ty.builtin_scalar().is_none() && !ty.is_introspection_type())
            .count();
        log::debug!("Built a schema with {num_types} type definitions.");

        let operation_files = match graphql_files::collect(&self.operation_paths, &exts) {
            Ok(files) => files,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} Failed to scan operation paths: {err}",
                output_utils::RED_X,
            )),
        };

        let mut reports = Vec::with_capacity(operation_files.paths.len());
        for path in &operation_files.paths {
            reports.push(validate_document(&schema, path));
        }

        let num_operations: usize = reports.iter().map(|report| report.num_operations).sum();
        let failed: Vec<&DocumentReport> =
            reports.iter().filter(|report| !report.errors.is_empty()).collect();
        if !failed.is_empty() {
            let mut output = format!(
                "{} GraphQL validation errors in {} of {} documents:",
                output_utils::RED_X,
                failed.len(),
                reports.len(),
            );
            for report in failed {
                output.push_str(&format!("\n{}:", report.path.display()));
                for err in &report.errors {
                    output.push_str(&format!("\n  * {err}"));
                }
            }
            return CommandResult::stderr(format_args!("{output}"));
        }

        CommandResult::stdout(format_args!(
            concat!(
                "{} All GraphQL validated successfully:\n",
                "  * Analyzed {} schema files.\n",
                "  * Analyzed {} operation documents.\n",
                "  * Skipped {} non-graphql files.\n",
                "  * Validated {} type definitions.\n",
                "  * Validated {} operations.",
            ),
            output_utils::GREEN_CHECK,
            schema_files.paths.len(),
            reports.len(),
            schema_files.num_skipped_files + operation_files.num_skipped_files,
            num_types,
            num_operations,
        ))
    }
}

fn validate_document(schema: &Schema, path: &Path) -> DocumentReport {
    let mut report = DocumentReport {
        path: path.to_path_buf(),
        num_operations: 0,
        errors: vec![],
    };

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            report.errors.push(format!("Failed to read file: {err}"));
            return report;
        },
    };

    let parse_result = libgql::parser::parse(&source);
    if parse_result.has_errors() {
        report.errors.push(parse_result.format_errors(&source, Some(path)));
        return report;
    }
    let Some(document) = parse_result.into_valid_ast() else {
        report.errors.push("The document could not be parsed".to_string());
        return report;
    };

    report.num_operations = document.operations().count();
    report.errors = libgql::validation::validate(schema, &document, &source)
        .iter()
        .map(ToString::to_string)
        .collect();
    log::debug!(
        "Validated {} operations in {path:#?} with {} errors.",
        report.num_operations,
        report.errors.len(),
    );
    report
}
