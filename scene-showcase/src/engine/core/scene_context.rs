use bevy::prelude::*;

/// Shared mutable scene state touched from UI-event and frame-callback
/// call sites. Explicit resource instead of ambient globals; everything
/// runs on the main-world schedule so no locking is involved.
#[derive(Resource, Default)]
pub struct SceneContext {
    click_count: u32,
    /// The manual emitter controlled by the particles toggle.
    pub primary_emitter: Option<Entity>,
}

impl SceneContext {
    /// Count one pick-up trigger on the focal mesh.
    pub fn register_click(&mut self) -> u32 {
        self.click_count += 1;
        self.click_count
    }

    pub fn click_count(&self) -> u32 {
        self.click_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_pick_up_triggers_count_three() {
        let mut context = SceneContext::default();
        context.register_click();
        context.register_click();
        context.register_click();
        assert_eq!(context.click_count(), 3);
    }
}
