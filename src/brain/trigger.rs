/// One-shot latch for the advisory request.
///
/// The game loop feeds it the trigger condition every tick; it reports
/// `true` on the first tick the condition holds and never again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvisoryTrigger {
    fired: bool,
}

impl AdvisoryTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, condition: bool) -> bool {
        if self.fired || !condition {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
