//! Picking the surface a flash is shown on when the caller names none

use std::rc::{Rc, Weak};

use super::HostSurface;

/// Supplies the default host for `Flash::show`.
pub trait HostResolver {
    fn default_host(&self) -> Option<Rc<dyn HostSurface>>;
}

impl<F> HostResolver for F
where
    F: Fn() -> Option<Rc<dyn HostSurface>>,
{
    fn default_host(&self) -> Option<Rc<dyn HostSurface>> {
        self()
    }
}

/// Always resolves to the same host, for as long as it is alive.
pub struct FixedHostResolver {
    host: Weak<dyn HostSurface>,
}

impl FixedHostResolver {
    pub fn new(host: &Rc<dyn HostSurface>) -> Self {
        Self { host: Rc::downgrade(host) }
    }
}

impl HostResolver for FixedHostResolver {
    fn default_host(&self) -> Option<Rc<dyn HostSurface>> {
        self.host.upgrade()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneActivationState {
    ForegroundActive,
    ForegroundInactive,
    Background,
    Unattached,
}

#[derive(Clone)]
pub struct WindowInfo {
    pub surface: Rc<dyn HostSurface>,
    pub is_key: bool,
}

#[derive(Clone)]
pub struct SceneInfo {
    pub state: SceneActivationState,
    pub windows: Vec<WindowInfo>,
}

/// The application's scenes and their windows, in z-order.
pub trait WindowProvider {
    fn scenes(&self) -> Vec<SceneInfo>;
}

/// Resolves to the first key window of any scene.
pub struct KeyWindowResolver<P> {
    provider: P,
}

impl<P: WindowProvider> KeyWindowResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: WindowProvider> HostResolver for KeyWindowResolver<P> {
    fn default_host(&self) -> Option<Rc<dyn HostSurface>> {
        self.provider
            .scenes()
            .into_iter()
            .flat_map(|scene| scene.windows)
            .find(|window| window.is_key)
            .map(|window| window.surface)
    }
}

/// Resolves to the key window of the first foreground-active scene.
pub struct SceneResolver<P> {
    provider: P,
}

impl<P: WindowProvider> SceneResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: WindowProvider> HostResolver for SceneResolver<P> {
    fn default_host(&self) -> Option<Rc<dyn HostSurface>> {
        let scene = self
            .provider
            .scenes()
            .into_iter()
            .find(|scene| scene.state == SceneActivationState::ForegroundActive)?;
        scene
            .windows
            .into_iter()
            .find(|window| window.is_key)
            .map(|window| window.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::host::ViewTree;

    fn surface(width: f32) -> Rc<dyn HostSurface> {
        Rc::new(ViewTree::new(Rect::new(0.0, 0.0, width, 100.0)))
    }

    struct Scenes(Vec<SceneInfo>);

    impl WindowProvider for Scenes {
        fn scenes(&self) -> Vec<SceneInfo> {
            self.0.clone()
        }
    }

    fn scenes() -> Scenes {
        Scenes(vec![
            SceneInfo {
                state: SceneActivationState::Background,
                windows: vec![WindowInfo { surface: surface(1.0), is_key: true }],
            },
            SceneInfo {
                state: SceneActivationState::ForegroundActive,
                windows: vec![
                    WindowInfo { surface: surface(2.0), is_key: false },
                    WindowInfo { surface: surface(3.0), is_key: true },
                ],
            },
        ])
    }

    #[test]
    fn test_key_window_resolver() {
        let host = KeyWindowResolver::new(scenes()).default_host().unwrap();
        assert_eq!(host.bounds().width(), 1.0);
    }

    #[test]
    fn test_scene_resolver_prefers_foreground_active() {
        let host = SceneResolver::new(scenes()).default_host().unwrap();
        assert_eq!(host.bounds().width(), 3.0);
    }

    #[test]
    fn test_scene_resolver_without_active_scene() {
        assert!(SceneResolver::new(Scenes(Vec::new())).default_host().is_none());
    }

    #[test]
    fn test_fixed_resolver_does_not_keep_host_alive() {
        let host = surface(10.0);
        let resolver = FixedHostResolver::new(&host);
        assert!(resolver.default_host().is_some());
        drop(host);
        assert!(resolver.default_host().is_none());
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = || -> Option<Rc<dyn HostSurface>> { None };
        assert!(resolver.default_host().is_none());
    }
}
