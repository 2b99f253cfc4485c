use log::debug;

use crate::config::{DEFAULT_ROOT_MARGIN, DEFAULT_THRESHOLD};
use crate::lazy::loader::{LoadError, Renderable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityState {
    Pending,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded,
}

/// What a deferred section should show right now.
#[derive(Clone, Debug, PartialEq)]
pub enum MountView {
    Placeholder,
    Loading,
    Ready(Renderable),
    Failed(LoadError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MountOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: DEFAULT_ROOT_MARGIN.to_string(),
        }
    }
}

impl MountOptions {
    pub fn new(threshold: f64, root_margin: impl Into<String>) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin: root_margin.into(),
        }
    }
}

/// One reading from the visibility observer. `ratio` is the visible
/// fraction of the sentinel within the margin-expanded viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionSample {
    pub ratio: f64,
    pub intersecting: bool,
}

impl IntersectionSample {
    pub fn crosses(&self, threshold: f64) -> bool {
        if !self.intersecting {
            return false;
        }
        // A zero threshold fires as soon as the sentinel touches the viewport.
        if threshold <= 0.0 {
            return true;
        }
        self.ratio >= threshold
    }
}

/// Returned once per coordinator: disconnect the observer and start loading.
#[derive(Debug, PartialEq, Eq)]
pub struct MountTrigger;

/// State machine behind a lazily mounted section.
///
/// Visibility moves Pending to Visible once and loading can only start
/// after that. A successful load is terminal; a failed one is handed back
/// to the caller untouched.
#[derive(Debug)]
pub struct MountCoordinator {
    options: MountOptions,
    visibility: VisibilityState,
    load: LoadState,
    observing: bool,
    section: Option<Renderable>,
    error: Option<LoadError>,
}

impl MountCoordinator {
    pub fn new(options: MountOptions) -> Self {
        Self {
            options,
            visibility: VisibilityState::Pending,
            load: LoadState::NotLoaded,
            observing: false,
            section: None,
            error: None,
        }
    }

    pub fn options(&self) -> &MountOptions {
        &self.options
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Returns true when the caller should attach an observer. Only the
    /// first call of a still-pending coordinator does.
    pub fn register(&mut self) -> bool {
        if self.observing || self.visibility == VisibilityState::Visible {
            return false;
        }
        self.observing = true;
        true
    }

    pub fn on_intersection(&mut self, sample: IntersectionSample) -> Option<MountTrigger> {
        if self.visibility == VisibilityState::Visible || !self.observing {
            return None;
        }
        if !sample.crosses(self.options.threshold) {
            return None;
        }
        self.visibility = VisibilityState::Visible;
        self.observing = false;
        self.load = LoadState::Loading;
        debug!("section crossed {:.2} visibility, loading", self.options.threshold);
        Some(MountTrigger)
    }

    /// Records the outcome of the load started by [`MountTrigger`].
    pub fn resolve(&mut self, result: Result<Renderable, LoadError>) -> Result<(), LoadError> {
        if self.load != LoadState::Loading {
            return Ok(());
        }
        match result {
            Ok(section) => {
                self.section = Some(section);
                self.error = None;
                self.load = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn view(&self) -> MountView {
        match (self.load, &self.section) {
            (LoadState::Loaded, Some(section)) => MountView::Ready(section.clone()),
            (LoadState::Loading, _) => match &self.error {
                Some(e) => MountView::Failed(e.clone()),
                None => MountView::Loading,
            },
            _ => MountView::Placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::prefetch::PrefetchCache;
    use crate::lazy::testing::GatedLoader;
    use crate::lazy::loader::ModuleLoader;
    use futures::executor::LocalPool;
    use std::rc::Rc;
    use yew::html;

    fn seen(ratio: f64) -> IntersectionSample {
        IntersectionSample {
            ratio,
            intersecting: ratio > 0.0,
        }
    }

    fn section(name: &str) -> Renderable {
        Renderable::new(name.to_string(), || html! {})
    }

    #[test]
    fn starts_as_placeholder() {
        let mount = MountCoordinator::new(MountOptions::default());
        assert_eq!(mount.visibility(), VisibilityState::Pending);
        assert_eq!(mount.load_state(), LoadState::NotLoaded);
        assert_eq!(mount.view(), MountView::Placeholder);
    }

    #[test]
    fn registers_a_single_observer() {
        let mut mount = MountCoordinator::new(MountOptions::default());
        assert!(mount.register());
        assert!(!mount.register());
        assert!(mount.is_observing());
    }

    #[test]
    fn below_threshold_keeps_waiting() {
        let mut mount = MountCoordinator::new(MountOptions::new(0.25, "0px"));
        mount.register();
        assert_eq!(mount.on_intersection(seen(0.1)), None);
        assert_eq!(mount.visibility(), VisibilityState::Pending);
        assert_eq!(mount.load_state(), LoadState::NotLoaded);
    }

    #[test]
    fn samples_before_registration_are_ignored() {
        let mut mount = MountCoordinator::new(MountOptions::default());
        assert_eq!(mount.on_intersection(seen(1.0)), None);
        assert_eq!(mount.load_state(), LoadState::NotLoaded);
    }

    #[test]
    fn triggers_at_most_once() {
        let mut mount = MountCoordinator::new(MountOptions::default());
        mount.register();
        assert_eq!(mount.on_intersection(seen(0.5)), Some(MountTrigger));
        assert!(!mount.is_observing());
        for ratio in [0.0, 0.3, 1.0] {
            assert_eq!(mount.on_intersection(seen(ratio)), None);
        }
        assert!(!mount.register());
        assert_eq!(mount.visibility(), VisibilityState::Visible);
    }

    #[test]
    fn loading_never_precedes_visibility() {
        // Interleave resolutions and samples in every order a browser could
        // deliver them; loading must only ever be observed once visible.
        let events = [Some(0.0), None, Some(0.05), None, Some(0.4), None, Some(0.9)];
        for start in 0..events.len() {
            let mut mount = MountCoordinator::new(MountOptions::default());
            mount.register();
            for event in events[start..].iter().chain(events[..start].iter()) {
                match event {
                    Some(ratio) => {
                        mount.on_intersection(seen(*ratio));
                    }
                    None => {
                        let _ = mount.resolve(Ok(section("early")));
                    }
                }
                if mount.load_state() != LoadState::NotLoaded {
                    assert_eq!(mount.visibility(), VisibilityState::Visible);
                }
            }
        }
    }

    #[test]
    fn zero_threshold_fires_on_first_contact() {
        let mut mount = MountCoordinator::new(MountOptions::new(0.0, "200px"));
        mount.register();
        let touching = IntersectionSample {
            ratio: 0.0,
            intersecting: true,
        };
        assert_eq!(mount.on_intersection(touching), Some(MountTrigger));
    }

    #[test]
    fn success_is_terminal() {
        let mut mount = MountCoordinator::new(MountOptions::default());
        mount.register();
        mount.on_intersection(seen(1.0));
        assert_eq!(mount.view(), MountView::Loading);

        let features = section("features");
        mount.resolve(Ok(features.clone())).unwrap();
        assert_eq!(mount.view(), MountView::Ready(features.clone()));

        mount.resolve(Ok(section("other"))).unwrap();
        assert_eq!(mount.load_state(), LoadState::Loaded);
        assert_eq!(mount.view(), MountView::Ready(features));
    }

    #[test]
    fn failure_is_handed_back() {
        let mut mount = MountCoordinator::new(MountOptions::default());
        mount.register();
        mount.on_intersection(seen(1.0));
        let err = LoadError::Status {
            name: "faq".to_string(),
            status: 503,
        };
        assert_eq!(mount.resolve(Err(err.clone())), Err(err.clone()));
        assert_eq!(mount.load_state(), LoadState::Loading);
        assert_eq!(mount.view(), MountView::Failed(err));
    }

    /// A column of equally tall sections below a viewport of one section's
    /// height.
    struct Page {
        sections: Vec<(String, MountCoordinator)>,
        height: f64,
        viewport: f64,
    }

    impl Page {
        fn new(count: usize) -> Self {
            let sections = (1..=count)
                .map(|i| {
                    let mut mount = MountCoordinator::new(MountOptions::default());
                    mount.register();
                    (format!("section-{}", i), mount)
                })
                .collect();
            Self {
                sections,
                height: 800.0,
                viewport: 800.0,
            }
        }

        /// Sample of section `index` (0-based) with the page scrolled to `y`.
        /// The fold sits one viewport down, so nothing is visible at y = 0
        /// until the first section is scrolled into view.
        fn sample(&self, index: usize, y: f64) -> IntersectionSample {
            let top = self.viewport + index as f64 * self.height;
            let bottom = top + self.height;
            let visible = (bottom.min(y + self.viewport) - top.max(y)).max(0.0);
            seen(visible / self.height)
        }
    }

    #[test]
    fn scrolling_to_one_section_loads_only_that_section() {
        let mut pool = LocalPool::new();
        let cache = PrefetchCache::new();
        let loader = Rc::new(GatedLoader::default());
        let dyn_loader: Rc<dyn ModuleLoader> = loader.clone();
        let mut page = Page::new(10);

        // Jump straight to section 5 so that only its sentinel crosses.
        let y = page.viewport + 4.0 * page.height;
        let samples: Vec<_> = (0..10).map(|i| page.sample(i, y)).collect();

        let mut pending = Vec::new();
        for (i, (name, mount)) in page.sections.iter_mut().enumerate() {
            if mount.on_intersection(samples[i]).is_some() {
                pending.push((i, cache.load(name, dyn_loader.clone())));
            }
        }
        assert_eq!(pending.len(), 1);
        assert_eq!(page.sections[4].1.load_state(), LoadState::Loading);

        loader.resolve_ok("section-5");
        for (i, load) in pending {
            let result = pool.run_until(load);
            page.sections[i].1.resolve(result).unwrap();
        }

        for (i, (_, mount)) in page.sections.iter().enumerate() {
            if i == 4 {
                assert_eq!(mount.visibility(), VisibilityState::Visible);
                assert_eq!(mount.load_state(), LoadState::Loaded);
            } else {
                assert_eq!(mount.visibility(), VisibilityState::Pending);
                assert_eq!(mount.load_state(), LoadState::NotLoaded);
            }
        }
        assert_eq!(loader.total_calls(), 1);
    }
}
