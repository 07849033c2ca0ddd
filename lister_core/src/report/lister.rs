// lister_core/src/report/lister.rs
use crate::ecs::reflect::Reflect;
use crate::error::ListerError;
use crate::report::graph_writer::{GraphWriter, ReportStyle};
use crate::storage::lister_config::current_config;
use crate::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// What a call to `list_variables` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    /// The report was written to `path`.
    Written { path: PathBuf, bytes: u64 },
    /// There was no target, nothing was written.
    NullTarget,
}

/// Writes the variables of `target` to `output_path` using the configured style.
pub fn list_variables(
    target: Option<&dyn Reflect>,
    output_path: &Path,
) -> Result<ListOutcome, ListerError> {
    // Nothing to lay out, so the config is not consulted
    if target.is_none() {
        return list_variables_with(None, output_path, &ReportStyle::default());
    }
    let style = ReportStyle::from(&current_config());
    list_variables_with(target, output_path, &style)
}

/// Writes the variables of `target` to `output_path`.
///
/// A missing target is not an error: a warning is logged and no file is created.
/// The file is closed on every path out of this function.
pub fn list_variables_with(
    target: Option<&dyn Reflect>,
    output_path: &Path,
    style: &ReportStyle,
) -> Result<ListOutcome, ListerError> {
    let Some(root) = target else {
        onscreen_warn!("Target component is null.");
        return Ok(ListOutcome::NullTarget);
    };

    let file = File::create(output_path).map_err(|source| ListerError::Create {
        path: output_path.to_path_buf(),
        source,
    })?;

    let mut writer = GraphWriter::new(BufWriter::new(file), style);
    writer.write_report(root)?;

    let file = writer
        .into_inner()
        .into_inner()
        .map_err(|e| e.into_error())?;
    let bytes = file.metadata()?.len();

    log::info!(
        "Listed variables of {} to {} ({bytes} bytes).",
        root.type_name(),
        output_path.display()
    );

    Ok(ListOutcome::Written {
        path: output_path.to_path_buf(),
        bytes,
    })
}
