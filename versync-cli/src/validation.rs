use std::path::Path;

use versync::{Config, ProjectLayout, VersionMode};

/// Everything a command needs to know about the project it runs against.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub config: Config,
    pub layout: ProjectLayout,
}

/// Validate that the anchor path exists.
///
/// The anchor may be a file or a directory inside the project's scripts
/// directory; only its location matters.
pub fn validate_anchor(path: &str) -> Result<(), String> {
    if path.trim().is_empty() {
        return Err("Anchor path cannot be empty".to_string());
    }

    if !Path::new(path).exists() {
        return Err(format!("Anchor does not exist: {}", path));
    }

    Ok(())
}

/// Resolve the project root from the anchor and load its configuration.
pub fn resolve_project(anchor: &str) -> Result<ProjectContext, String> {
    validate_anchor(anchor)?;

    let root = ProjectLayout::root_from_anchor(Path::new(anchor))
        .map_err(|e| format!("Cannot resolve project root from {}: {}", anchor, e))?;
    let config = Config::load_or_default(&root).map_err(|e| e.to_string())?;
    let layout = ProjectLayout::new(root, &config);

    Ok(ProjectContext { config, layout })
}

/// Parse the mode argument of the `version` command.
pub fn parse_mode(mode: &str) -> Result<VersionMode, String> {
    mode.parse::<VersionMode>().map_err(|e| e.to_string())
}

/// Whether the optional silent argument asks for quiet output.
///
/// Accepts `true` or `1` in any case; anything else, or nothing, is loud.
pub fn parse_silent(silent: Option<&str>) -> bool {
    silent
        .map(|s| {
            let s = s.trim();
            s == "1" || s.eq_ignore_ascii_case("true")
        })
        .unwrap_or(false)
}

/// Validate an artifact path given to the `manifest` command.
pub fn validate_artifact(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("Artifact does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Artifact is not a file: {}", path));
    }

    Ok(())
}
