use crate::clock::Millis;

/// Player-controlled student.
#[derive(Clone, Debug, Default)]
pub struct StudentState {
    pub dancing: bool,
    pub using_skill: bool,
    /// End of the current skill effect, if one is playing.
    pub skill_until: Option<Millis>,
}

impl StudentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the dancing flag actually changed.
    pub fn set_dancing(&mut self, dancing: bool) -> bool {
        let changed = self.dancing != dancing;
        self.dancing = dancing;
        changed
    }

    pub fn begin_skill(&mut self, now: Millis, window: Millis) {
        self.using_skill = true;
        self.skill_until = Some(now + window);
    }

    /// Expire the skill effect once its deadline passes.
    pub fn update(&mut self, now: Millis) {
        if let Some(until) = self.skill_until {
            if now >= until {
                self.using_skill = false;
                self.skill_until = None;
            }
        }
    }

    pub fn shift(&mut self, by: Millis) {
        if let Some(until) = &mut self.skill_until {
            *until += by;
        }
    }
}
