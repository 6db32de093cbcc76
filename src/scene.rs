use tracing::debug;

/// Screens of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scene {
    Title,
    Loading,
    Playing,
    GameOver,
    Settings,
}

/// Things that can move the game between screens.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    StartClicked,
    ResourcesReady,
    SettingsKey,
    Back,
    GameOverCommitted,
    RestartClicked,
    MenuClicked,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SceneAction {
    None,
    /// Open a screen over the current one, remembering it.
    Push(Scene),
    /// Return to the remembered screen.
    Pop,
    Switch(Scene),
    /// Drop every remembered screen and show this one.
    ReplaceAll(Scene),
}

/// How a screen became active.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// Freshly entered; `Playing` entered this way starts a new run.
    Fresh,
    /// Uncovered by popping the screen above it.
    Resumed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Scene,
    pub to: Scene,
    pub entry: Entry,
}

/// The transition table.  Edges not listed here are ignored.
pub fn route(current: Scene, event: SceneEvent, resources_ready: bool) -> SceneAction {
    use SceneEvent::*;
    match (current, event) {
        (Scene::Title, StartClicked) if resources_ready => SceneAction::Switch(Scene::Playing),
        (Scene::Title, StartClicked) => SceneAction::Switch(Scene::Loading),
        (Scene::Loading, ResourcesReady) => SceneAction::Switch(Scene::Playing),
        (Scene::Title | Scene::Playing, SettingsKey) => SceneAction::Push(Scene::Settings),
        (Scene::Settings, Back | SettingsKey) => SceneAction::Pop,
        (Scene::Playing, GameOverCommitted) => SceneAction::Switch(Scene::GameOver),
        (Scene::GameOver, RestartClicked) => SceneAction::ReplaceAll(Scene::Playing),
        (Scene::GameOver, MenuClicked) => SceneAction::ReplaceAll(Scene::Title),
        _ => SceneAction::None,
    }
}

/// Stack of screens; only the top one is active.
#[derive(Clone, Debug)]
pub struct SceneStack {
    scenes: Vec<Scene>,
}

impl SceneStack {
    pub fn new(initial: Scene) -> Self {
        Self { scenes: vec![initial] }
    }

    pub fn current(&self) -> Scene {
        self.scenes.last().copied().unwrap_or(Scene::Title)
    }

    /// The screen that `Pop` would return to.
    pub fn previous(&self) -> Option<Scene> {
        self.scenes.len().checked_sub(2).map(|i| self.scenes[i])
    }

    pub fn depth(&self) -> usize {
        self.scenes.len()
    }

    /// Route `event` from the current screen and apply the result.
    pub fn handle(&mut self, event: SceneEvent, resources_ready: bool) -> Option<Transition> {
        let action = route(self.current(), event, resources_ready);
        self.apply(action)
    }

    pub fn apply(&mut self, action: SceneAction) -> Option<Transition> {
        let from = self.current();
        let (to, entry) = match action {
            SceneAction::None => return None,
            SceneAction::Push(s) => {
                self.scenes.push(s);
                (s, Entry::Fresh)
            }
            SceneAction::Pop => {
                if self.scenes.len() < 2 {
                    return None;
                }
                self.scenes.pop();
                (self.current(), Entry::Resumed)
            }
            SceneAction::Switch(s) => {
                self.scenes.pop();
                self.scenes.push(s);
                (s, Entry::Fresh)
            }
            SceneAction::ReplaceAll(s) => {
                self.scenes.clear();
                self.scenes.push(s);
                (s, Entry::Fresh)
            }
        };
        debug!(?from, ?to, ?entry, "scene transition");
        Some(Transition { from, to, entry })
    }
}

impl Default for SceneStack {
    fn default() -> Self { Self::new(Scene::Title) }
}
