pub mod companion;
pub mod student;
pub mod teacher;

pub use companion::{CompanionState, Variant};
pub use student::StudentState;
pub use teacher::{Bounce, TeacherState};

use rand::rngs::StdRng;

use crate::clock::Millis;
use crate::config::Tuning;

// ── Entity ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Teacher,
    Student,
    Companion,
}

/// Kind-specific state carried by an [`Entity`].
#[derive(Clone, Debug)]
pub enum EntityState {
    Teacher(TeacherState),
    Student(StudentState),
    Companion(CompanionState),
}

/// One character on screen.
#[derive(Clone, Debug)]
pub struct Entity {
    /// Stable key used for clip names and layout positions.
    pub name: &'static str,
    /// Timestamp of the last animation frame advance.
    pub last_update: Millis,
    pub animation_frame: usize,
    pub state: EntityState,
}

/// Everything an entity update may read, threaded explicitly into each call.
pub struct TickContext<'a> {
    pub now: Millis,
    pub tuning: &'a Tuning,
    pub rng: &'a mut StdRng,
    pub primary_dancing: bool,
    /// Seconds since the session started.
    pub session_elapsed: f64,
}

impl Entity {
    pub fn new(name: &'static str, now: Millis, state: EntityState) -> Self {
        Self { name, last_update: now, animation_frame: 0, state }
    }

    pub fn kind(&self) -> EntityKind {
        match self.state {
            EntityState::Teacher(_) => EntityKind::Teacher,
            EntityState::Student(_) => EntityKind::Student,
            EntityState::Companion(_) => EntityKind::Companion,
        }
    }

    /// Run this entity's state machine for one tick.  Returns `true` when
    /// the teacher flipped on this tick.
    pub fn update(&mut self, ctx: &mut TickContext) -> bool {
        match &mut self.state {
            EntityState::Teacher(t) => t.update(ctx.now, ctx.tuning, &mut *ctx.rng),
            EntityState::Student(s) => {
                s.update(ctx.now);
                false
            }
            EntityState::Companion(c) => {
                c.update(ctx.session_elapsed, ctx.primary_dancing, ctx.tuning, &mut *ctx.rng);
                false
            }
        }
    }

    /// Name of the animation clip this entity currently shows.
    pub fn clip(&self) -> String {
        let suffix = match &self.state {
            EntityState::Teacher(t) => if t.facing_away { "back" } else { "front" },
            EntityState::Student(s) if s.using_skill => "skill",
            EntityState::Student(s) if s.dancing => "dance_1",
            EntityState::Student(_) => "idle",
            EntityState::Companion(c) => c.variant.suffix(),
        };
        format!("{}_{}", self.name, suffix)
    }

    /// Step the animation frame once per `period`, wrapping at `frame_count`.
    pub fn advance_frame(&mut self, now: Millis, period: Millis, frame_count: usize) {
        if frame_count == 0 {
            self.animation_frame = 0;
            return;
        }
        if now.saturating_sub(self.last_update) > period {
            self.last_update = now;
            self.animation_frame = (self.animation_frame + 1) % frame_count;
        } else if self.animation_frame >= frame_count {
            self.animation_frame = 0;
        }
    }

    /// Vertical render offset (only the teacher bounces).
    pub fn render_offset(&self) -> i32 {
        match &self.state {
            EntityState::Teacher(t) => t.bounce_offset,
            _ => 0,
        }
    }

    pub fn shift(&mut self, by: Millis) {
        self.last_update += by;
        match &mut self.state {
            EntityState::Teacher(t) => t.shift(by),
            EntityState::Student(s) => s.shift(by),
            EntityState::Companion(_) => {}
        }
    }
}

// ── Cast ─────────────────────────────────────────────────────────────────────

/// The characters of one session: the student (Erpin), the teacher (Sherum)
/// and the companion (Joanne).
#[derive(Clone, Debug)]
pub struct Cast {
    entities: Vec<Entity>,
}

impl Cast {
    pub fn new(now: Millis, tuning: &Tuning, rng: &mut StdRng) -> Self {
        Self {
            entities: vec![
                Entity::new("sherum", now, EntityState::Teacher(TeacherState::new(now, tuning, rng))),
                Entity::new("erpin", now, EntityState::Student(StudentState::new())),
                Entity::new("joanne", now, EntityState::Companion(CompanionState::new())),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn teacher(&self) -> Option<&TeacherState> {
        self.entities.iter().find_map(|e| match &e.state {
            EntityState::Teacher(t) => Some(t),
            _ => None,
        })
    }

    pub fn teacher_mut(&mut self) -> Option<&mut TeacherState> {
        self.entities.iter_mut().find_map(|e| match &mut e.state {
            EntityState::Teacher(t) => Some(t),
            _ => None,
        })
    }

    /// The player-controlled student.
    pub fn primary(&self) -> Option<&StudentState> {
        self.entities.iter().find_map(|e| match &e.state {
            EntityState::Student(s) => Some(s),
            _ => None,
        })
    }

    pub fn primary_mut(&mut self) -> Option<&mut StudentState> {
        self.entities.iter_mut().find_map(|e| match &mut e.state {
            EntityState::Student(s) => Some(s),
            _ => None,
        })
    }

    pub fn primary_dancing(&self) -> bool {
        self.primary().is_some_and(|s| s.dancing)
    }

    /// Facing of the teacher; a missing teacher never watches.
    pub fn teacher_facing_away(&self) -> bool {
        self.teacher().is_none_or(|t| t.facing_away)
    }

    /// Update every entity in order.  Returns `true` if the teacher flipped.
    pub fn update(&mut self, now: Millis, session_elapsed: f64, tuning: &Tuning, rng: &mut StdRng) -> bool {
        let mut ctx = TickContext {
            now,
            tuning,
            rng,
            primary_dancing: self.primary_dancing(),
            session_elapsed,
        };
        let mut turned = false;
        for entity in &mut self.entities {
            turned |= entity.update(&mut ctx);
        }
        turned
    }

    pub fn shift(&mut self, by: Millis) {
        for entity in &mut self.entities {
            entity.shift(by);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn clip_names_follow_state() {
        let tuning = Tuning::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut cast = Cast::new(0, &tuning, &mut rng);
        let clips: Vec<String> = cast.iter().map(Entity::clip).collect();
        assert_eq!(clips, ["sherum_back", "erpin_idle", "joanne_idle_1"]);

        if let Some(s) = cast.primary_mut() {
            s.set_dancing(true);
        }
        assert!(cast.iter().any(|e| e.clip() == "erpin_dance_1"));
        if let Some(s) = cast.primary_mut() {
            s.begin_skill(0, 500);
        }
        assert!(cast.iter().any(|e| e.clip() == "erpin_skill"));
    }

    #[test]
    fn frame_advances_after_period_and_wraps() {
        let mut e = Entity::new("erpin", 0, EntityState::Student(StudentState::new()));
        e.advance_frame(50, 50, 3);
        assert_eq!(e.animation_frame, 0);
        e.advance_frame(51, 50, 3);
        assert_eq!(e.animation_frame, 1);
        e.advance_frame(102, 50, 3);
        e.advance_frame(153, 50, 3);
        assert_eq!(e.animation_frame, 0);
    }

    #[test]
    fn frame_index_clamped_when_clip_shrinks() {
        let mut e = Entity::new("erpin", 0, EntityState::Student(StudentState::new()));
        e.animation_frame = 7;
        e.advance_frame(10, 50, 2);
        assert_eq!(e.animation_frame, 0);
    }
}
