//! Creates directories and files from a textual layout, without ever writing outside of a
//! configured root.
//!
//! A layout can be given in any of three forms (see [template]), and is applied beneath a target
//! directory relative to the root:
//! ```
//! use scaffolder::{scaffold, ScaffoldRequest};
//! use scaffolder::config::{Config, Root};
//! use scaffolder::filesystem::{Filesystem, MemoryFilesystem};
//!
//! let mut fs = MemoryFilesystem::new();
//! fs.create_directory("/dev")?;
//! let config = Config::new(Root::try_from("/dev")?);
//!
//! let request = ScaffoldRequest::new("
//! app/
//! ├─ README.md
//! └─ src/
//!   └─ main.py
//! ", "app");
//! let result = scaffold(&config, &request, &mut fs)?;
//!
//! assert_eq!(result.resolved_target, "/dev/app");
//! assert_eq!(result.created, ["/dev/app/README.md", "/dev/app/src", "/dev/app/src/main.py"]);
//! assert!(fs.is_file("/dev/app/src/main.py"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Every entry is confined before anything is written: a single entry resolving outside of the
//! target fails the whole request with [Error::Confinement].
#![warn(missing_docs)]

pub use scaffolder_config as config;
pub use scaffolder_filesystem as filesystem;
pub use scaffolder_layout as layout;
pub use scaffolder_materialize as materialize;

use config::{Config, ConfigError};
use filesystem::Filesystem;
use layout::{detect, parse_layout, Grammar, LayoutError};
use materialize::{ConfinementError, Confiner, Snippets};

mod request;
pub use request::{ScaffoldRequest, ScaffoldResult};


const TEMPLATE: &str = r##"Provide either:
1) ASCII tree (box-drawing ok):
   my-app/
   ├─ README.md
   └─ src/
      └─ main.py
2) YAML nested mapping:
   tree:
     README.md: "# Title\n"
     src:
       main.py: "print('hi')\n"
3) YAML entries list:
   entries:
     - { path: README.md, type: file, content: "# Title\n" }
     - { path: src/, type: dir }
     - { path: src/main.py, type: file }"##;

/// Why a request could not be carried out
///
/// None of these leave anything written.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured root is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The prompt does not have the shape its grammar requires
    #[error("Failed to parse prompt as {grammar}: {source}")]
    Parse {
        /// The grammar the prompt was parsed with
        grammar: Grammar,
        /// What was wrong with it
        source: LayoutError,
    },

    /// The target or an entry lies outside of the root
    #[error(transparent)]
    Confinement(#[from] ConfinementError),
}

/// Returns help text describing the accepted layout forms
pub fn template() -> &'static str {
    TEMPLATE
}

/// Parses the request's layout and creates it beneath the target, within the configured root
///
/// With `dry_run` set, the resolved entries are returned as the result's `plan` and the
/// filesystem is left untouched.
pub fn scaffold<FS>(
    config: &Config,
    request: &ScaffoldRequest,
    fs: &mut FS,
) -> Result<ScaffoldResult, Error>
where
    FS: Filesystem,
{
    let root = config.root().path();
    if !fs.is_directory(root) {
        return Err(ConfigError::RootMissing(root.to_owned()).into());
    }

    let grammar = detect(&request.prompt, request.mode);
    let layout = parse_layout(&request.prompt, grammar)
        .map_err(|source| Error::Parse { grammar, source })?;

    let target = Confiner::new(&*fs, root)?.descend(&*fs, &request.target_path)?;
    let plan = materialize::plan(&*fs, &target, &layout)?;
    tracing::info!(
        "Scaffolding {} entries into {}",
        plan.entries().len(),
        target.root()
    );

    let mut result = ScaffoldResult {
        selected_mode: grammar,
        base_path: root.to_string(),
        resolved_target: target.root().to_string(),
        created: vec![],
        skipped: vec![],
        errors: vec![],
        dry_run: request.dry_run,
        plan: None,
    };
    if request.dry_run {
        result.plan = Some(plan.records());
        return Ok(result);
    }

    let mut snippets = Snippets::default();
    snippets.extend(config.snippets());
    let outcome = materialize::materialize(fs, &plan, request.overwrite, &snippets);
    if !outcome.errors.is_empty() {
        tracing::warn!("{} entries could not be created", outcome.errors.len());
    }
    result.created = outcome.created;
    result.skipped = outcome.skipped;
    result.errors = outcome.errors;
    Ok(result)
}
