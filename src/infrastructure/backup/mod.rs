//! Backup archiver implementations

mod tar_gz;

pub use tar_gz::{TarGzArchiver, ARCHIVE_EXTENSION};
