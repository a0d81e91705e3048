//! Project bootstrap
//!
//! Finds the project root by walking up from a starting directory until a
//! marker file or folder shows up, loads `<root>/.env` and records the root
//! in a [`SearchPaths`] list.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Names that mark a project root
pub const DEFAULT_ROOT_MARKERS: &[&str] = &["cookbook", ".git", "requirements.txt", ".env"];

/// Name of the environment file loaded from the project root
pub const ENV_FILE_NAME: &str = ".env";

/// Ordered list of directories used to resolve project-relative files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPaths {
    dirs: Vec<PathBuf>,
}

impl SearchPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `dir` unless it is already present. Returns whether it was added.
    pub fn push_unique(&mut self, dir: impl Into<PathBuf>) -> bool {
        let dir = dir.into();
        if self.contains(&dir) {
            return false;
        }
        self.dirs.push(dir);
        true
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.iter().any(|d| d == dir)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// First `<dir>/<relative>` that exists, in search order
    pub fn resolve(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
        let relative = relative.as_ref();
        self.dirs
            .iter()
            .map(|dir| dir.join(relative))
            .find(|candidate| candidate.exists())
    }
}

/// Outcome of project setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    /// Resolved project root
    pub path: PathBuf,

    /// Whether a marker was found (otherwise `path` is the starting directory)
    pub marker_found: bool,

    /// `.env` file that was loaded, if any
    pub env_file: Option<PathBuf>,
}

/// Walk `start` and its ancestors and return the first directory that
/// directly contains any of `markers`
pub fn find_project_root(start: &Path, markers: &[&str]) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| markers.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}

/// Locate the project root from the current working directory, load its
/// `.env` and add it to `search_paths`
pub fn setup_project(markers: &[&str], search_paths: &mut SearchPaths) -> Result<ProjectRoot> {
    let cwd = std::env::current_dir()?;
    setup_project_from(&cwd, markers, search_paths)
}

/// Same as [`setup_project`] with an explicit starting directory
pub fn setup_project_from(
    start: &Path,
    markers: &[&str],
    search_paths: &mut SearchPaths,
) -> Result<ProjectRoot> {
    let (path, marker_found) = match find_project_root(start, markers) {
        Some(root) => (root, true),
        None => {
            tracing::warn!("⚠️ Could not auto-detect project root, using current directory.");
            (start.to_path_buf(), false)
        }
    };

    let env_path = path.join(ENV_FILE_NAME);
    let env_file = if env_path.is_file() {
        dotenvy::from_path_override(&env_path)?;
        tracing::info!("🔐 Loaded environment variables from: {}", env_path.display());
        Some(env_path)
    } else {
        tracing::warn!("⚠️ No .env file found at project root.");
        None
    };

    search_paths.push_unique(&path);
    tracing::info!("📦 Project root added to search paths: {}", path.display());

    Ok(ProjectRoot {
        path,
        marker_found,
        env_file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    // Marker names unlikely to exist above the temp directory
    const MARKER: &str = "llm-bridge-test-root.marker";

    #[test]
    fn test_finds_marker_in_ancestor() {
        let temp_dir = tempdir().unwrap();
        let a = temp_dir.path().join("a");
        let c = a.join("b").join("c");
        fs::create_dir_all(&c).unwrap();
        fs::write(a.join(MARKER), "").unwrap();

        let mut search_paths = SearchPaths::new();
        let root = setup_project_from(&c, &[MARKER], &mut search_paths).unwrap();

        assert_eq!(root.path, a);
        assert!(root.marker_found);
        assert_eq!(root.env_file, None);
        assert!(search_paths.contains(&a));
    }

    #[test]
    fn test_marker_directory_counts() {
        let temp_dir = tempdir().unwrap();
        let project = temp_dir.path().join("project");
        let nested = project.join("notebooks");
        fs::create_dir_all(project.join("llm-bridge-test-cookbook")).unwrap();
        fs::create_dir_all(&nested).unwrap();

        let found = find_project_root(&nested, &["llm-bridge-test-cookbook"]);
        assert_eq!(found, Some(project));
    }

    #[test]
    fn test_no_marker_falls_back_to_start() {
        let temp_dir = tempdir().unwrap();
        let start = temp_dir.path().join("x").join("y");
        fs::create_dir_all(&start).unwrap();

        let mut search_paths = SearchPaths::new();
        let root =
            setup_project_from(&start, &["llm-bridge-missing.marker"], &mut search_paths).unwrap();

        assert_eq!(root.path, start);
        assert!(!root.marker_found);
        assert_eq!(root.env_file, None);
    }

    #[test]
    fn test_env_file_overrides_existing_values() {
        let temp_dir = tempdir().unwrap();
        let root_dir = temp_dir.path().join("root");
        let start = root_dir.join("sub");
        fs::create_dir_all(&start).unwrap();
        fs::write(root_dir.join(MARKER), "").unwrap();
        fs::write(
            root_dir.join(ENV_FILE_NAME),
            "LLM_BRIDGE_TEST_FOO=bar\nLLM_BRIDGE_TEST_OTHER=1\n",
        )
        .unwrap();

        std::env::set_var("LLM_BRIDGE_TEST_FOO", "old");

        let mut search_paths = SearchPaths::new();
        let root = setup_project_from(&start, &[MARKER], &mut search_paths).unwrap();

        assert_eq!(root.env_file, Some(root_dir.join(ENV_FILE_NAME)));
        assert_eq!(std::env::var("LLM_BRIDGE_TEST_FOO").unwrap(), "bar");
        assert_eq!(std::env::var("LLM_BRIDGE_TEST_OTHER").unwrap(), "1");
    }

    #[test]
    fn test_malformed_env_leaves_search_paths_untouched() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join(MARKER), "").unwrap();
        fs::write(temp_dir.path().join(ENV_FILE_NAME), "this line has no equals sign\n").unwrap();

        let mut search_paths = SearchPaths::new();
        let result = setup_project_from(temp_dir.path(), &[MARKER], &mut search_paths);

        assert!(matches!(result, Err(crate::error::Error::Env(_))));
        assert!(search_paths.is_empty());
    }

    #[test]
    fn test_search_paths_are_not_duplicated() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join(MARKER), "").unwrap();

        let mut search_paths = SearchPaths::new();
        setup_project_from(temp_dir.path(), &[MARKER], &mut search_paths).unwrap();
        setup_project_from(temp_dir.path(), &[MARKER], &mut search_paths).unwrap();

        assert_eq!(search_paths.len(), 1);
    }

    #[test]
    fn test_search_paths_resolve() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::create_dir_all(second.path().join("prompts")).unwrap();
        fs::write(second.path().join("prompts").join("system.txt"), "be brief").unwrap();

        let mut search_paths = SearchPaths::new();
        assert!(search_paths.push_unique(first.path()));
        assert!(search_paths.push_unique(second.path()));
        assert!(!search_paths.push_unique(first.path()));

        assert_eq!(
            search_paths.resolve("prompts/system.txt"),
            Some(second.path().join("prompts/system.txt"))
        );
        assert_eq!(search_paths.resolve("missing.txt"), None);
    }
}
