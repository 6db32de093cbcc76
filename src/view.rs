use glam::Vec2;

use crate::entity::EntityKind;
use crate::game::Game;
use crate::scene::Scene;
use crate::session::GameOverReason;
use crate::settings::{Channel, Positions};

/// One character to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteView {
    pub kind: EntityKind,
    pub clip: String,
    pub frame: usize,
    /// Top-left corner, including the teacher's bounce.
    pub position: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    /// Whole points, as shown to the player.
    pub score: u32,
    pub gauge: f32,
    pub skill_charges: u32,
}

/// Read-only snapshot handed to the rendering collaborator each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameView {
    pub scene: Scene,
    pub sprites: Vec<SpriteView>,
    pub hud: Hud,
    pub show_exclamation: bool,
    pub game_over_reason: Option<GameOverReason>,
    pub loading_progress: u8,
    pub resources_ready: bool,
    pub bgm_volume: f32,
    pub sfx_volume: f32,
    pub selected_channel: Channel,
    pub show_credits: bool,
}

/// Draws a [`FrameView`].
pub trait Renderer {
    fn draw(&mut self, view: &FrameView);
}

/// Build the frame snapshot.  Characters are only listed while a run is on
/// screen (playing, or the game-over screen behind it).
pub fn snapshot(game: &Game, positions: &Positions) -> FrameView {
    let session = game.session();
    let scene = game.scene();
    let shows_cast = matches!(scene, Scene::Playing | Scene::GameOver)
        || (scene == Scene::Settings && game.scenes().previous() == Some(Scene::Playing));

    let sprites = if shows_cast {
        game.cast()
            .iter()
            .map(|e| SpriteView {
                kind: e.kind(),
                clip: e.clip(),
                frame: e.animation_frame,
                position: positions.get(e.name) + Vec2::new(0.0, e.render_offset() as f32),
            })
            .collect()
    } else {
        Vec::new()
    };

    FrameView {
        scene,
        sprites,
        hud: Hud {
            score: session.score.max(0.0) as u32,
            gauge: session.gauge,
            skill_charges: session.skill_charges,
        },
        show_exclamation: session.show_exclamation,
        game_over_reason: session.game_over_reason,
        loading_progress: game.loading_progress(),
        resources_ready: game.resources_ready(),
        bgm_volume: game.settings().bgm_volume,
        sfx_volume: game.settings().sfx_volume,
        selected_channel: game.settings_cursor(),
        show_credits: game.show_credits(),
    }
}

/// One-line status text for a frame, e.g. for a window title.
pub fn status_line(view: &FrameView) -> String {
    match view.scene {
        Scene::Title if view.resources_ready => "Press Enter to dance | Esc: settings".to_string(),
        Scene::Title => format!("Loading {}% | Esc: settings", view.loading_progress),
        Scene::Loading => format!("Loading... {}%", view.loading_progress),
        Scene::Playing => format!(
            "Score {} | Gauge {:.0} | Skills {}{}",
            view.hud.score,
            view.hud.gauge,
            view.hud.skill_charges,
            if view.show_exclamation { " | !" } else { "" },
        ),
        Scene::GameOver => {
            let why = match view.game_over_reason {
                Some(GameOverReason::Caught) => "Caught dancing!",
                Some(GameOverReason::NoEnergy) => "Out of energy!",
                None => "Game over",
            };
            format!("{why} Score {} | R: restart  M: menu", view.hud.score)
        }
        Scene::Settings if view.show_credits => {
            "Credits: Ricktcal Revive fan game | press any key to return".to_string()
        }
        Scene::Settings => {
            let mark = |c: Channel| if view.selected_channel == c { ">" } else { " " };
            format!(
                "{}BGM {:.0}%  {}SFX {:.0}% | C: credits  Esc: back",
                mark(Channel::Bgm),
                view.bgm_volume * 100.0,
                mark(Channel::Sfx),
                view.sfx_volume * 100.0,
            )
        }
    }
}
