use crate::{
    Diagnostics, LogDiagnostics, NavConfig, NavError, NavFile, NodeID, Path, PathSearch, Severity,
};

/// Opens and creates named Navigation Files and owns the [`PathSearch`] that searches them.
///
/// The registry is the boundary where failures stop being errors: every operation reports
/// problems to its [`Diagnostics`] sink and returns `None` or `false` instead.
///
/// ## Examples
/// Creating, saving and loading a map:
/// ```
/// use waypoint_nav::{NavConfig, NavRegistry, Vec3};
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut registry = NavRegistry::new(NavConfig::with_data_dir(dir.path()));
///
/// let mut file = registry.create_navigation_file("camp").unwrap();
/// let tent = file.create_node(0.0, 0.0, 0.0);
/// let fire = file.create_node(3.0, 0.0, 4.0);
/// file.attach_nodes(tent, fire).unwrap();
/// assert!(registry.save_navigation_file(&mut file));
///
/// let file = registry.load_navigation_map("camp").unwrap();
/// assert_eq!(file.node_count(), 2);
///
/// let start = registry.search().nearest_node(Vec3::new(0.5, 0.0, 0.0)).unwrap().id();
/// let path = registry.find_path(Some(start), Some(fire)).unwrap();
/// assert_eq!(path.path, vec![fire, tent]);
/// assert_eq!(path.cost, 5.0);
///
/// // missing files are reported, not fatal
/// assert!(registry.open_navigation_file("swamp").is_none());
/// ```
#[derive(Debug)]
pub struct NavRegistry<D: Diagnostics = LogDiagnostics> {
    config: NavConfig,
    search: PathSearch,
    diagnostics: D,
}

impl NavRegistry<LogDiagnostics> {
    /// Creates a registry that reports problems through the [`log`] crate.
    pub fn new(config: NavConfig) -> NavRegistry<LogDiagnostics> {
        NavRegistry::with_diagnostics(config, LogDiagnostics)
    }
}

impl<D: Diagnostics> NavRegistry<D> {
    /// Creates a registry that reports problems to `diagnostics`.
    pub fn with_diagnostics(config: NavConfig, diagnostics: D) -> NavRegistry<D> {
        NavRegistry {
            config,
            search: PathSearch::new(),
            diagnostics,
        }
    }

    fn report(&self, context: &str, message: String, err: &NavError) {
        self.diagnostics
            .report(Severity::Error, context, &format!("{}: {}", message, err));
    }

    /// Creates a new, empty Navigation File called `name`, replacing any existing one.
    ///
    /// Returns `None` if the file could not be created.
    pub fn create_navigation_file(&self, name: &str) -> Option<NavFile> {
        match NavFile::create(name, &self.config) {
            Ok(file) => Some(file),
            Err(err) => {
                self.report(
                    concat!(module_path!(), "::create_navigation_file"),
                    format!("Could not create new navigation file '{}'", name),
                    &err,
                );
                None
            }
        }
    }

    /// Opens the existing Navigation File called `name`.
    ///
    /// Returns `None` if the file is missing, unreadable or corrupt.
    pub fn open_navigation_file(&self, name: &str) -> Option<NavFile> {
        match NavFile::open(name, &self.config) {
            Ok(file) => Some(file),
            Err(err) => {
                self.report(
                    concat!(module_path!(), "::open_navigation_file"),
                    format!("Could not open navigation file '{}'", name),
                    &err,
                );
                None
            }
        }
    }

    /// Writes `file` to disk. Returns `false` on failure.
    pub fn save_navigation_file(&self, file: &mut NavFile) -> bool {
        match file.save() {
            Ok(()) => true,
            Err(err) => {
                self.report(
                    concat!(module_path!(), "::save_navigation_file"),
                    format!("Could not save navigation file '{}'", file.name()),
                    &err,
                );
                false
            }
        }
    }

    /// Opens the Navigation File called `name` and loads it into the [`PathSearch`].
    ///
    /// The file is returned for further editing; the search keeps its own copy of the Graph.
    /// On failure the search is left with an empty Graph.
    pub fn load_navigation_map(&mut self, name: &str) -> Option<NavFile> {
        let file = match self.open_navigation_file(name) {
            Some(file) => file,
            None => {
                self.search.import(Default::default());
                return None;
            }
        };
        if let Err(err) = self.search.load(&file) {
            self.report(
                concat!(module_path!(), "::load_navigation_map"),
                format!("Could not load navigation map '{}'", name),
                &err,
            );
            return None;
        }
        Some(file)
    }

    /// Searches a Path in the loaded map using the configured [`Heuristic`](crate::Heuristic).
    ///
    /// See [`PathSearch::find_path`]. Searching an empty map or unknown Nodes is reported and
    /// returns `None`, just like an unreachable goal.
    pub fn find_path(
        &mut self,
        start: Option<NodeID>,
        goal: Option<NodeID>,
    ) -> Option<Path<NodeID>> {
        match self.search.find_path(start, goal, self.config.heuristic) {
            Ok(path) => path,
            Err(err) => {
                self.report(
                    concat!(module_path!(), "::find_path"),
                    format!("Could not search from {:?} to {:?}", start, goal),
                    &err,
                );
                None
            }
        }
    }

    /// The search that [`load_navigation_map`](NavRegistry::load_navigation_map) loads into
    pub fn search(&self) -> &PathSearch {
        &self.search
    }

    /// The search that [`load_navigation_map`](NavRegistry::load_navigation_map) loads into
    pub fn search_mut(&mut self) -> &mut PathSearch {
        &mut self.search
    }

    /// The config this registry was created with
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// The sink that problems are reported to
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Default)]
    struct Recorder(RefCell<Vec<(Severity, String, String)>>);

    impl Diagnostics for Recorder {
        fn report(&self, severity: Severity, context: &str, message: &str) {
            self.0
                .borrow_mut()
                .push((severity, context.to_owned(), message.to_owned()));
        }
    }

    fn registry(dir: &std::path::Path) -> NavRegistry<Recorder> {
        NavRegistry::with_diagnostics(NavConfig::with_data_dir(dir), Recorder::default())
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path());

        assert!(registry.open_navigation_file("nowhere").is_none());

        let reports = registry.diagnostics().0.borrow();
        assert_eq!(reports.len(), 1);
        let (severity, context, message) = &reports[0];
        assert_eq!(*severity, Severity::Error);
        assert!(context.ends_with("open_navigation_file"));
        assert!(message.contains("'nowhere'"));
    }

    #[test]
    fn create_in_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir.path().join("does/not/exist"));

        assert!(registry.create_navigation_file("map").is_none());
        assert_eq!(registry.diagnostics().0.borrow().len(), 1);
    }

    #[test]
    fn invalid_name_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path());
        assert!(registry.create_navigation_file("../escape").is_none());
        assert!(registry.diagnostics().0.borrow()[0].2.contains("invalid navigation file name"));
    }

    #[test]
    fn created_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = registry(dir.path());

        let file = registry.create_navigation_file("blank").unwrap();
        assert!(file.is_open());
        drop(file);

        let file = registry.load_navigation_map("blank").unwrap();
        assert!(file.is_empty());
        assert!(registry.search().graph().is_empty());
        assert!(registry.diagnostics().0.borrow().is_empty());

        // searching the empty map is reported instead of panicking
        assert!(registry.find_path(None, None).is_none());
        assert_eq!(registry.diagnostics().0.borrow().len(), 1);
    }

    #[test]
    fn save_into_removed_directory() {
        let dir = tempfile::tempdir().unwrap();
        let maps = dir.path().join("maps");
        std::fs::create_dir(&maps).unwrap();
        let registry = registry(&maps);

        let mut file = registry.create_navigation_file("lost").unwrap();
        file.create_node(1.0, 2.0, 3.0);
        std::fs::remove_dir_all(&maps).unwrap();

        assert!(!registry.save_navigation_file(&mut file));
        assert!(!file.is_open());
        assert_eq!(file.node_count(), 1);

        let reports = registry.diagnostics().0.borrow();
        assert_eq!(reports.len(), 1);
        let (severity, context, message) = &reports[0];
        assert_eq!(*severity, Severity::Error);
        assert!(context.ends_with("save_navigation_file"));
        assert!(message.contains("'lost'"));
        drop(reports);

        assert!(matches!(file.save(), Err(NavError::Create { .. })));
    }

    #[test]
    fn failed_load_clears_search() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = registry(dir.path());

        let mut file = registry.create_navigation_file("pair").unwrap();
        let a = file.create_node(0.0, 0.0, 0.0);
        let b = file.create_node(0.0, 1.0, 0.0);
        file.attach_nodes(a, b).unwrap();
        assert!(registry.save_navigation_file(&mut file));
        assert!(registry.load_navigation_map("pair").is_some());
        assert_eq!(registry.search().graph().len(), 2);

        std::fs::write(registry.config().file_path("pair"), [0xff; 3]).unwrap();
        assert!(registry.load_navigation_map("pair").is_none());
        assert!(registry.search().graph().is_empty());
    }
}
