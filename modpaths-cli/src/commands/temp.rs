//! Command to create temporary files and folders.

use crate::error::CliError;
use crate::utils::{file_system, load_configuration, require_native, GlobalOptions};
use clap::Args;
use modpaths::{AbsolutePath, Extension, TemporaryFileManager};

/// Create a uniquely named temporary file or folder and print its path.
///
/// Without `--keep` the entry and its base directory are removed again
/// before the command exits, which is useful for checking that the
/// configured temporary root is writable.
#[derive(Args)]
pub struct TempCommand {
    /// Create a folder instead of a file
    #[arg(long)]
    pub folder: bool,

    /// Leave the created entry on disk
    #[arg(long)]
    pub keep: bool,

    /// Extension for the created file, such as `.7z`
    #[arg(long, value_name = "EXT", conflicts_with = "folder")]
    pub extension: Option<String>,
}

impl TempCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        require_native(global, "temp")?;
        let config = load_configuration(global)?;
        let fs = file_system(global, &config)?;

        let extension = self.extension.map(Extension::new).transpose()?;
        let parent = config
            .temp_root
            .as_deref()
            .map(|root| AbsolutePath::from_full_path(root, fs.clone()));
        let delete_on_dispose = !self.keep && config.delete_temp_on_drop.unwrap_or(true);
        let mut manager = TemporaryFileManager::new(fs, parent, delete_on_dispose)?;

        let issued = if self.folder {
            manager.create_folder(!self.keep)?
        } else {
            let file = manager.create_file(extension.as_ref(), !self.keep)?;
            file.write_all_bytes(&[])?;
            file
        };

        println!("{}", issued.path());
        if self.keep {
            let kept = issued.keep();
            log::debug!("Keeping {kept}");
        } else {
            drop(issued);
        }

        manager.dispose()?;
        Ok(())
    }
}
