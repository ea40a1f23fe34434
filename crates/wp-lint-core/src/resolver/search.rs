use std::path::{Path, PathBuf};

/// Suffix stripped from the root path to reach the project base (Bedrock style layouts).
const NESTED_INSTALL: &str = "web/wp";

/// Environment inputs to the directory search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchContext {
    pub cwd: Option<PathBuf>,
    /// WordPress installation root.
    pub root: PathBuf,
    pub home: Option<PathBuf>,
}

impl SearchContext {
    pub fn new(cwd: Option<PathBuf>, root: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            cwd,
            root: root.into(),
            home,
        }
    }

    /// Capture the process working directory and the user's home directory.
    pub fn from_env(root: impl Into<PathBuf>) -> Self {
        Self::new(std::env::current_dir().ok(), root, dirs::home_dir())
    }

    /// Directories searched for `vendor/bin/phpcs`: cwd, project base, root.
    pub fn binary_dirs(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::with_capacity(3);
        candidates.extend(self.cwd.clone());
        candidates.push(project_base(&self.root));
        candidates.push(self.root.clone());
        candidates
    }

    /// Directories searched for ruleset files: the binary dirs plus `~/.wp-cli`.
    pub fn standard_dirs(&self) -> Vec<PathBuf> {
        let mut candidates = self.binary_dirs();
        candidates.extend(self.home.as_ref().map(|home| home.join(".wp-cli")));
        candidates
    }
}

/// `root` with a trailing `web/wp` removed; `root` unchanged otherwise.
///
/// Stripping down to the filesystem root yields an empty path, which the search skips.
pub fn project_base(root: &Path) -> PathBuf {
    if root.ends_with(NESTED_INSTALL) {
        root.parent()
            .and_then(Path::parent)
            .filter(|base| base.parent().is_some())
            .map(Path::to_path_buf)
            .unwrap_or_default()
    } else {
        root.to_path_buf()
    }
}

/// Ordered directory x filename search where the directory order is outermost.
#[derive(Debug, Clone)]
pub struct ResolutionRequest<'a> {
    pub directories: Vec<PathBuf>,
    pub filenames: &'a [String],
}

impl<'a> ResolutionRequest<'a> {
    pub fn new(directories: Vec<PathBuf>, filenames: &'a [String]) -> Self {
        Self {
            directories,
            filenames,
        }
    }

    /// First `<dir>/<file>` that exists as a regular file. Empty or missing
    /// directories are skipped.
    pub fn first_existing(&self) -> Option<PathBuf> {
        self.directories
            .iter()
            .filter(|dir| !dir.as_os_str().is_empty() && dir.is_dir())
            .find_map(|dir| {
                self.filenames
                    .iter()
                    .map(|name| dir.join(name))
                    .find(|candidate| candidate.is_file())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn strips_nested_install_suffix() {
        assert_eq!(project_base(Path::new("/srv/site/web/wp")), PathBuf::from("/srv/site"));
        assert_eq!(project_base(Path::new("/srv/site/web/wp/")), PathBuf::from("/srv/site"));
        assert_eq!(project_base(Path::new("/srv/site")), PathBuf::from("/srv/site"));
        assert_eq!(project_base(Path::new("/srv/web/wpx")), PathBuf::from("/srv/web/wpx"));
        assert_eq!(project_base(Path::new("web/wp")), PathBuf::new());
        assert_eq!(project_base(Path::new("site/web/wp")), PathBuf::from("site"));
    }

    #[test]
    fn nested_install_at_filesystem_root_has_no_base() {
        assert_eq!(project_base(Path::new("/web/wp")), PathBuf::new());
        let ctx = SearchContext::new(None, "/web/wp", None);
        assert_eq!(
            ctx.binary_dirs(),
            vec![PathBuf::new(), PathBuf::from("/web/wp")]
        );
    }

    #[test]
    fn directory_order_follows_search_rules() {
        let ctx = SearchContext::new(
            Some(PathBuf::from("/work")),
            "/srv/site/web/wp",
            Some(PathBuf::from("/home/dev")),
        );
        assert_eq!(
            ctx.standard_dirs(),
            vec![
                PathBuf::from("/work"),
                PathBuf::from("/srv/site"),
                PathBuf::from("/srv/site/web/wp"),
                PathBuf::from("/home/dev/.wp-cli"),
            ]
        );
        assert_eq!(ctx.binary_dirs().len(), 3);
    }

    #[test]
    fn missing_cwd_and_home_are_left_out() {
        let ctx = SearchContext::new(None, "/srv/site", None);
        assert_eq!(
            ctx.standard_dirs(),
            vec![PathBuf::from("/srv/site"), PathBuf::from("/srv/site")]
        );
    }

    #[test]
    fn first_directory_with_a_match_wins() {
        let temp = tempfile::tempdir().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("ruleset.xml"), "<ruleset/>").unwrap();
        fs::write(b.join("phpcs.xml"), "<ruleset/>").unwrap();

        let files = names(&["phpcs.xml", "ruleset.xml"]);
        let request = ResolutionRequest::new(vec![a.clone(), b], &files);
        assert_eq!(request.first_existing(), Some(a.join("ruleset.xml")));
    }

    #[test]
    fn filename_order_applies_within_a_directory() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("ruleset.xml"), "").unwrap();
        fs::write(temp.path().join("phpcs.ruleset.xml"), "").unwrap();

        let files = names(&[".phpcs.ruleset.xml", "phpcs.ruleset.xml", "ruleset.xml"]);
        let request = ResolutionRequest::new(vec![temp.path().to_path_buf()], &files);
        assert_eq!(
            request.first_existing(),
            Some(temp.path().join("phpcs.ruleset.xml"))
        );
    }

    #[test]
    fn directories_named_like_candidates_do_not_match() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("ruleset.xml")).unwrap();

        let files = names(&["ruleset.xml"]);
        let request = ResolutionRequest::new(
            vec![PathBuf::new(), temp.path().join("nope"), temp.path().to_path_buf()],
            &files,
        );
        assert!(request.first_existing().is_none());
    }
}
