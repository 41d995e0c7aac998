use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::output_utils;
use anyhow::Context;
use indexmap::IndexMap;
use libgql::Request;
use libgql::Response;
use libgql::ast;
use libgql::execute_request;
use libgql::execution::JsonResolver;
use libgql::execution::RequestContext;
use libgql::schema::SchemaBuilder;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, clap::Args)]
pub(crate) struct ExecuteCmd {
    #[arg(
        help="Paths to the schema (SDL) files.",
        long,
        num_args=1..,
        required=true,
    )]
    schema: Vec<PathBuf>,

    #[arg(
        help="Path to the operation document to execute.",
        long,
    )]
    query: PathBuf,

    #[arg(
        help="Variable values, as a JSON object.",
        long,
    )]
    variables: Option<String>,

    #[arg(
        help="The operation to run, when the document holds more than one.",
        long,
    )]
    operation_name: Option<String>,

    #[arg(
        help="Path to a JSON file holding the root object that fields \
             resolve from. Defaults to an empty object.",
        long,
    )]
    root_value: Option<PathBuf>,

    #[arg(
        help="Print the response as a single line.",
        long,
    )]
    compact: bool,
}
impl ExecuteCmd {
    fn execute(&self) -> anyhow::Result<Response> {
        let schema = SchemaBuilder::new()
            .load_files(&self.schema)
            .and_then(SchemaBuilder::build)
            .context("Failed to build the schema")?;

        let query = std::fs::read_to_string(&self.query)
            .with_context(|| format!("Failed to read {}", self.query.display()))?;
        let mut request = Request::new(query);
        if let Some(operation_name) = &self.operation_name {
            request = request.with_operation_name(operation_name);
        }
        if let Some(variables) = &self.variables {
            let variables: IndexMap<String, ast::InputValue> = serde_json::from_str(variables)
                .context("`--variables` must be a JSON object")?;
            request = request.with_variables(variables);
        }

        let root: serde_json::Value = match &self.root_value {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("{} does not hold valid JSON", path.display()))?
            },
            None => serde_json::Value::Object(serde_json::Map::new()),
        };

        log::debug!(
            "Executing {} against a root value with {} members.",
            self.query.display(),
            root.as_object().map_or(0, serde_json::Map::len),
        );
        Ok(execute_request(
            &schema,
            &JsonResolver::new(&root),
            &request,
            &RequestContext::new(),
        ))
    }
}

#[inherent::inherent]
impl RunnableCommand for ExecuteCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let response = match self.execute() {
            Ok(response) => response,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} {err:#}",
                output_utils::RED_X,
            )),
        };

        let json = response.to_json();
        let rendered = if self.compact {
            serde_json::to_string(&json)
        } else {
            serde_json::to_string_pretty(&json)
        };
        let rendered = match rendered {
            Ok(rendered) => rendered,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} Failed to serialize the response: {err}",
                output_utils::RED_X,
            )),
        };

        let result = CommandResult::stdout(format_args!("{rendered}"));
        if response.data.is_none() {
            result.with_exit_code(ExitCode::FAILURE)
        } else {
            result
        }
    }
}
