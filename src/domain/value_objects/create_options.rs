//! Attributes applied atomically when a file or directory is created

use std::fs::{DirBuilder, OpenOptions};

/// Options for `create_file`, `create_directory` and `create_directories`.
///
/// `mode` is a Unix permission mode (subject to the process umask). It is
/// ignored on other platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CreateOptions {
    pub mode: Option<u32>,
}

impl CreateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the permission mode
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    /// `OpenOptions` that create a new file and fail if it already exists.
    pub(crate) fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        if let Some(mode) = self.mode {
            platform::file_mode(&mut options, mode);
        }
        options
    }

    pub(crate) fn dir_builder(&self, recursive: bool) -> DirBuilder {
        let mut builder = DirBuilder::new();
        builder.recursive(recursive);
        if let Some(mode) = self.mode {
            platform::dir_mode(&mut builder, mode);
        }
        builder
    }
}

#[cfg(unix)]
mod platform {
    use std::fs::{DirBuilder, OpenOptions};
    use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};

    pub(super) fn file_mode(options: &mut OpenOptions, mode: u32) {
        options.mode(mode);
    }

    pub(super) fn dir_mode(builder: &mut DirBuilder, mode: u32) {
        builder.mode(mode);
    }
}

#[cfg(not(unix))]
mod platform {
    use std::fs::{DirBuilder, OpenOptions};

    pub(super) fn file_mode(_options: &mut OpenOptions, _mode: u32) {}

    pub(super) fn dir_mode(_builder: &mut DirBuilder, _mode: u32) {}
}
