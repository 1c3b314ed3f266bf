//! Applies parsed layouts to a [Filesystem](scaffolder_filesystem::Filesystem), never writing
//! outside of a single root.
//!
//! Applying a layout is done in two stages. First, [plan] resolves every entry beneath the target
//! directory through a [Confiner], failing before anything is written if any entry would land
//! elsewhere. Then [materialize] creates the planned directories and files in order:
//! ```
//! use scaffolder_filesystem::{Filesystem, MemoryFilesystem};
//! use scaffolder_layout::LayoutEntry;
//! use scaffolder_materialize::{materialize, plan, Confiner, Snippets};
//!
//! let mut fs = MemoryFilesystem::new();
//! fs.create_directory("/base")?;
//!
//! let target = Confiner::new(&fs, "/base")?.descend(&fs, "app")?;
//! let layout = [LayoutEntry::directory("src"), LayoutEntry::file("README.md", None)];
//! let plan = plan(&fs, &target, &layout)?;
//! let outcome = materialize(&mut fs, &plan, false, &Snippets::default());
//!
//! assert_eq!(outcome.created, ["/base/app/src", "/base/app/README.md"]);
//! assert!(fs.read_file("/base/app/README.md")?.starts_with("# Project"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Files that already exist are skipped unless overwriting is requested, and files given without
//! content take a default from [Snippets] by their name.
#![warn(missing_docs)]

mod apply;
pub use apply::{materialize, Outcome};

mod confine;
pub use confine::{ConfinementError, Confiner};

mod plan;
pub use plan::{plan, Plan, PlanRecord, PlannedEntry};

mod snippets;
pub use snippets::Snippets;
