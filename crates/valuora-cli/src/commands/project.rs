use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use valuora_core::{EnvelopeWarning, SubmissionAdapter};

use crate::cli::{GenerateArgs, ProjectArgs, ProjectCommand};
use crate::error::CliError;

use super::wizard::read_state;
use super::{CommandResult, Context};

pub async fn run(args: &ProjectArgs, context: &Context) -> Result<CommandResult, CliError> {
    match &args.command {
        ProjectCommand::Submit(submit) => {
            let session = context.sessions().require()?;
            let state = read_state(&submit.file)?;

            let adapter = SubmissionAdapter::new(
                context.api().with_auth(session.http_auth()),
                &context.store,
            );
            let submitted = adapter.submit(&state).await?;

            Ok(CommandResult::ok(serde_json::to_value(&submitted)?))
        }
        ProjectCommand::Last => {
            let adapter = SubmissionAdapter::new(context.api(), &context.store);
            match adapter.last_project()? {
                Some(record) => Ok(CommandResult::ok(serde_json::to_value(&record)?)),
                None => Ok(CommandResult::ok(json!(null))
                    .with_warning(EnvelopeWarning::no_saved_project())),
            }
        }
        ProjectCommand::Generate(generate) => generate_valuation(generate, context).await,
    }
}

async fn generate_valuation(args: &GenerateArgs, context: &Context) -> Result<CommandResult, CliError> {
    let session = context.sessions().require()?;
    let adapter = SubmissionAdapter::new(
        context.api().with_auth(session.http_auth()),
        &context.store,
    );
    let artifact = adapter.generate(&args.project_id).await?;

    fs::create_dir_all(&args.out).map_err(|error| CliError::file(&args.out, error))?;
    let path = output_path(&args.out, &artifact.filename, &args.project_id);
    fs::write(&path, &artifact.bytes).map_err(|error| CliError::file(&path, error))?;

    Ok(CommandResult::ok(json!({
        "projectId": args.project_id.trim(),
        "filename": artifact.filename,
        "path": path.display().to_string(),
        "size": artifact.size,
    })))
}

/// Server-chosen names are reduced to their final component so a download
/// never escapes the output directory.
fn output_path(out: &Path, filename: &str, project_id: &str) -> PathBuf {
    let name = Path::new(filename)
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| format!("valuation-{}.xlsx", project_id.trim()).into());
    out.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_strips_directories_from_server_filename() {
        let out = Path::new("/tmp/exports");
        assert_eq!(
            output_path(out, "../../etc/passwd", "p1"),
            out.join("passwd")
        );
        assert_eq!(
            output_path(out, "SHOP-valuation.xlsx", "p1"),
            out.join("SHOP-valuation.xlsx")
        );
        assert_eq!(output_path(out, "..", "p1"), out.join("valuation-p1.xlsx"));
    }
}
