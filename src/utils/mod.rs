pub mod constants;
pub mod filename;
pub mod fs;

pub use constants::*;
pub use filename::{backup_path, backup_path_at, numbered_backup_path};
pub use fs::{
    backup_existing, ensure_parent_dir, remove_if_exists, replace_with_backup, write_atomic,
};
