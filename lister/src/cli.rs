// lister/src/cli.rs
use crate::storage::path_utils::default_report_path;
use clap::Parser;
use lister_core::report::graph_writer::ReportStyle;
use lister_core::scene::scene::Scene;
use lister_core::storage::lister_config::{ListerConfig, save_config};
use lister_core::{ListOutcome, ListerError, list_variables_with};
use lister_core::onscreen_info;
use std::path::{Path, PathBuf};

/// Writes the variables of a scene component to a text file.
#[derive(Parser, Debug)]
#[command(name = "lister", version)]
pub struct Args {
    /// Scene file (.ron) holding the entities.
    pub scene: PathBuf,

    /// Entity id or name. Defaults to the first entity.
    #[arg(short, long)]
    pub entity: Option<String>,

    /// Component type name. Defaults to the entity's first component.
    #[arg(short, long)]
    pub component: Option<String>,

    /// Report destination. Defaults to the configured file name in the working directory.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Put indentation on the content lines instead of on lines of their own.
    #[arg(long)]
    pub compact: bool,

    /// Do not stop at self-referencing values.
    #[arg(long)]
    pub no_cycle_check: bool,

    /// Keep --compact and --no-cycle-check as the defaults for later runs.
    #[arg(long)]
    pub save_config: bool,

    /// Print the scene's entities and components instead of writing a report.
    #[arg(long)]
    pub list: bool,
}

/// Runs one invocation against `config`, which was loaded from `config_file`.
/// Returns `None` when only the scene was listed.
pub fn run(
    args: &Args,
    config: &ListerConfig,
    config_file: &Path,
) -> Result<Option<ListOutcome>, ListerError> {
    let scene = Scene::load(&args.scene)?;

    if args.list {
        print!("{}", describe_scene(&scene));
        return Ok(None);
    }

    let mut config = config.clone();
    if args.compact {
        config.compact = true;
    }
    if args.no_cycle_check {
        config.detect_cycles = false;
    }
    if args.save_config {
        save_config(&config, config_file)?;
    }
    let style = ReportStyle::from(&config);

    let entity = match &args.entity {
        Some(key) => scene.find_entity(key),
        None => scene.entities.first(),
    };
    // A missing entity or component is a null target, the lister reports it
    let target = entity.and_then(|e| e.component(args.component.as_deref()));

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| default_report_path(&config.default_file_name));

    let outcome = list_variables_with(target, &out, &style)?;

    if let ListOutcome::Written { path, bytes } = &outcome {
        onscreen_info!("Wrote {bytes} bytes to {}.", path.display());
    }

    Ok(Some(outcome))
}

/// One line per entity followed by its component type names.
fn describe_scene(scene: &Scene) -> String {
    let mut out = String::new();
    for entity in &scene.entities {
        out.push_str(&format!("{} {}\n", entity.id, entity.name));
        for component in &entity.components {
            out.push_str(&format!("  {}\n", component.type_name));
        }
    }
    out
}
