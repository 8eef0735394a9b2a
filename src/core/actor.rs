use std::fmt;

use serde::Deserialize;

use crate::core::thinking::{ThinkDriver, ThinkTime, ThinkingTask};

/// Who controls an actor. Only computer actors spend time thinking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Human,
    Computer,
}

/// A seat at the table. Identity is the instance, not the name.
#[derive(Debug)]
pub struct Actor {
    name: String,
    kind: ActorKind,
    turn_over: bool,
    thinking: Option<ThinkingTask>,
}

impl Actor {
    pub fn new(name: impl Into<String>, kind: ActorKind) -> Self {
        Self {
            name: name.into(),
            kind,
            turn_over: true,
            thinking: None,
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, ActorKind::Human)
    }

    pub fn computer(name: impl Into<String>) -> Self {
        Self::new(name, ActorKind::Computer)
    }

    /// Same name and kind, idle, with no thinking task attached
    pub fn fresh(&self) -> Self {
        Self::new(self.name.clone(), self.kind)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    pub fn is_turn_over(&self) -> bool {
        self.turn_over
    }

    pub fn thinking(&self) -> Option<&ThinkingTask> {
        self.thinking.as_ref()
    }

    /// True while the latest thinking task is still running
    pub fn is_thinking(&self) -> bool {
        self.thinking.as_ref().is_some_and(|t| !t.is_done())
    }

    /// Begin this actor's turn. Computer actors kick off a fresh thinking
    /// task, replacing (not cancelling) whatever ran last time.
    pub(crate) fn start(&mut self, think_time: &ThinkTime, driver: &ThinkDriver) {
        self.turn_over = false;
        if self.kind == ActorKind::Computer {
            self.thinking = Some(ThinkingTask::begin_on(driver, think_time.draw()));
        }
    }

    pub(crate) fn end(&mut self) {
        self.turn_over = true;
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player: {}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn human_never_thinks() {
        let mut a = Actor::human("Player1");
        a.start(&ThinkTime::default(), &ThinkDriver::Auto);
        assert!(!a.is_turn_over());
        assert!(!a.is_thinking());
        assert!(a.thinking().is_none());
        a.end();
        assert!(a.is_turn_over());
    }

    #[test]
    fn kind_comes_from_flag_not_name() {
        let mut a = Actor::computer("player_bot");
        a.start(&ThinkTime::fixed(60), &ThinkDriver::Auto);
        assert!(a.is_thinking());
        // ending mid-think is allowed
        a.end();
        assert!(a.is_turn_over());
    }

    #[test]
    fn fresh_copy_is_idle() {
        let mut a = Actor::computer("Bot");
        a.start(&ThinkTime::fixed(60), &ThinkDriver::Auto);
        let b = a.fresh();
        assert_eq!(b.name(), "Bot");
        assert_eq!(b.kind(), ActorKind::Computer);
        assert!(b.is_turn_over());
        assert!(b.thinking().is_none());
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(Actor::human("Dealer").to_string(), "Player: Dealer");
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_stale_task() {
        let driver = ThinkDriver::current_runtime();
        let mut bot = Actor::computer("Bot");
        bot.start(&ThinkTime::fixed(5), &driver);
        tokio::time::sleep(Duration::from_secs(3)).await;

        // second turn begins while the first delay is still running
        bot.end();
        bot.start(&ThinkTime::fixed(5), &driver);
        assert_eq!(bot.thinking().map(|t| t.duration()), Some(Duration::from_secs(5)));

        // first task expires at t=5; the new one must not notice
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert!(bot.is_thinking());

        tokio::time::sleep(Duration::from_millis(2_600)).await;
        assert!(!bot.is_thinking());
    }
}
