//! Build-support utilities for packaging.
//!
//! - Library flag discovery: asks `<lib>-config`, then `pkg-config`, and
//!   falls back to `-l<lib>` when neither knows the library.
//! - Tree installation: copies files and directories into place with
//!   explicit permission modes and a umask.
//! - Zip packaging of files and directory trees.

mod archive;
mod group;
mod install;
mod logging;
mod paths;
mod probe;
mod resolve;

pub use archive::write_archive;
pub use group::{parse_groups, LibraryGroup, ALIAS_SEPARATOR};
pub use install::{
    create_dir_with_mode, install, install_as, install_file, set_mode, InstallOptions,
};
pub use logging::init_logging;
pub use paths::{
    archive_entry_name, archive_root_name, install_destination, is_directory_destination,
};
pub use probe::{capture_stdout, ConfigScript, PkgConfig, Probe, DEFAULT_PKG_CONFIG};
pub use resolve::{fallback_flags, resolve, Resolver};
