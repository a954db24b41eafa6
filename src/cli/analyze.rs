use std::io;
use std::path::PathBuf;
use std::process;

use depwalk::emit::Emitter;
use depwalk::fetch::ReqwestTransport;
use depwalk::{Coordinate, Settings, WalkStats, Walker};
use tracing::info;

/// Arguments of `depwalk analyze`.
pub struct AnalyzeRequest {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub repositories: Vec<String>,
    pub config: Option<PathBuf>,
    pub deadline: Option<u64>,
}

pub fn cmd_analyze(request: AnalyzeRequest) {
    match analyze(&request) {
        Ok(stats) => info!(
            resolved = stats.resolved,
            skipped_scope = stats.skipped_scope,
            skipped_excluded = stats.skipped_excluded,
            already_visited = stats.already_visited,
            unresolved = stats.unresolved,
            "done"
        ),
        Err(message) => {
            eprintln!("error: {}", message);
            process::exit(1);
        }
    }
}

/// The scratch directory lives until this returns, so it is removed before
/// the process exits on either path.
fn analyze(request: &AnalyzeRequest) -> Result<WalkStats, String> {
    let mut settings = Settings::load(request.config.as_deref())
        .map_err(|e| e.to_string())?
        .with_repositories(request.repositories.clone());
    if request.deadline.is_some() {
        settings.deadline_secs = request.deadline;
    }

    let transport = ReqwestTransport::new(&settings).map_err(|e| e.to_string())?;
    let scratch = tempfile::Builder::new()
        .prefix("dependency-manager")
        .tempdir()
        .map_err(|e| format!("cannot create scratch directory: {}", e))?;

    let root = Coordinate::new(&request.group_id, &request.artifact_id, &request.version);
    info!(root = %root, repositories = ?settings.repositories, "analyzing");

    let walker = Walker::new(transport, settings, scratch.path());
    let stdout = io::stdout();
    let mut emitter = Emitter::new(stdout.lock(), &walker.settings().stacks);

    let mut walk = walker.walk(root);
    let mut failure = None;
    for event in walk.by_ref() {
        match event {
            Ok(event) => {
                if let Err(e) = emitter.emit(&event) {
                    failure = Some(format!("cannot write output: {}", e));
                    break;
                }
            }
            Err(e) => {
                failure = Some(e.to_string());
                break;
            }
        }
    }
    emitter
        .flush()
        .map_err(|e| format!("cannot write output: {}", e))?;

    match failure {
        Some(message) => Err(message),
        None => Ok(walk.stats()),
    }
}
