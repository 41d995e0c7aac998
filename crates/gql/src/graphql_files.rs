use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// The GraphQL files found at or under a set of paths.
#[derive(Debug, Default)]
pub(crate) struct GraphQLFiles {
    pub paths: Vec<PathBuf>,
    pub num_skipped_files: usize,
}

/// Normalizes `exts` to the `.ext` form.
pub(crate) fn normalize_exts(exts: &[String]) -> HashSet<String> {
    exts.iter()
        .map(|ext| {
            if !ext.starts_with('.') {
                format!(".{ext}")
            } else {
                ext.to_owned()
            }
        })
        .collect()
}

/// Recursively collects every file at or under `roots` whose extension is in
/// `exts` (as normalized by [`normalize_exts()`]).
///
/// A single file root is always kept, even when its extension does not
/// match: naming one file explicitly means it should be read as GraphQL.
pub(crate) fn collect(
    roots: &[PathBuf],
    exts: &HashSet<String>,
) -> Result<GraphQLFiles, walkdir::Error> {
    log::debug!("Scanning {} input paths...", roots.len());

    let mut files = GraphQLFiles::default();
    for root in roots {
        for entry in WalkDir::new(root.as_path()).follow_links(true).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                log::trace!("Skipping non-file: {path:#?}.");
                continue;
            }
            if has_graphql_ext(path, exts) {
                log::trace!("Found GraphQL file at {path:#?}.");
                files.paths.push(path.to_path_buf());
            } else {
                files.num_skipped_files += 1;
            }
        }
    }

    if files.paths.is_empty()
        && roots.len() == 1
        && let Some(root) = roots.first()
        && root.is_file()
    {
        log::warn!(
            "Proceeding with {root:#?} even though it doesn't match any of the \
            --graphql-file-exts ({}).",
            exts.iter()
                .map(|ext| format!("`{ext}`"))
                .collect::<Vec<_>>()
                .join(", "),
        );
        files.num_skipped_files = 0;
        files.paths.push(root.clone());
    }

    log::debug!("Found {} GraphQL files.", files.paths.len());
    Ok(files)
}

fn has_graphql_ext(path: &Path, exts: &HashSet<String>) -> bool {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .is_some_and(|ext| exts.contains(&ext))
}
