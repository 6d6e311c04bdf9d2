use std::{
    io,
    path::{Path, PathBuf},
};

const DRIVER_SUBDIR: &str = "chromedriver-mac-arm64";
const DRIVER_NAMES: [&str; 3] = ["chromedriver", "chromedriver.exe", "chromedriver_mac"];

pub trait DriverLocator {
    fn locate(&self) -> Option<PathBuf>;
}

/// Looks for a chromedriver binary in a fixed list of directories.
pub struct FixedPathLocator {
    search_dirs: Vec<PathBuf>,
}

impl FixedPathLocator {
    pub fn new(base_dir: &Path) -> Self {
        FixedPathLocator {
            search_dirs: vec![base_dir.to_path_buf(), base_dir.join(DRIVER_SUBDIR)],
        }
    }

    /// Searches next to the running executable.
    pub fn beside_executable() -> io::Result<Self> {
        let exe = std::env::current_exe()?;
        let base_dir = exe.parent().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory")
        })?;

        Ok(FixedPathLocator::new(base_dir))
    }

    pub fn candidates(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.search_dirs
            .iter()
            .flat_map(|dir| DRIVER_NAMES.iter().map(move |name| dir.join(name)))
    }
}

impl DriverLocator for FixedPathLocator {
    fn locate(&self) -> Option<PathBuf> {
        match self.candidates().find(|path| path.exists()) {
            Some(path) => {
                log::info!("Found ChromeDriver at: {}", path.display());
                Some(path)
            }
            None => {
                log::error!(
                    "ChromeDriver not found. Please ensure it's in the project root or {} directory.",
                    DRIVER_SUBDIR
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{DriverLocator, FixedPathLocator};

    #[test]
    fn locate_in_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("chromedriver"), b"").unwrap();

        let located = FixedPathLocator::new(dir.path()).locate();

        assert_eq!(located, Some(dir.path().join("chromedriver")));
    }

    #[test]
    fn locate_in_arm64_subdir() {
        let dir = tempfile::tempdir().unwrap();
        let subdir = dir.path().join("chromedriver-mac-arm64");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("chromedriver_mac"), b"").unwrap();

        let located = FixedPathLocator::new(dir.path()).locate();

        assert_eq!(located, Some(subdir.join("chromedriver_mac")));
    }

    #[test]
    fn base_dir_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let subdir = dir.path().join("chromedriver-mac-arm64");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("chromedriver"), b"").unwrap();
        fs::write(dir.path().join("chromedriver.exe"), b"").unwrap();

        let located = FixedPathLocator::new(dir.path()).locate();

        assert_eq!(located, Some(dir.path().join("chromedriver.exe")));
    }

    #[test]
    fn locate_missing_driver() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(FixedPathLocator::new(dir.path()).locate(), None);
    }

    #[test]
    fn candidates_cover_every_name_in_every_dir() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(FixedPathLocator::new(dir.path()).candidates().count(), 6);
    }
}
