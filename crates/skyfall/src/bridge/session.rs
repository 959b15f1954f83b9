//! Session-scoped boolean flags, injected by the host.
//!
//! The page keeps a "seen the intro" flag in per-tab storage so the intro
//! animation plays once per session. The engine never touches global
//! storage; it goes through [`SessionFlags`].

use std::collections::HashSet;

/// Key recording that the intro animation already played this session.
pub const INTRO_SEEN_KEY: &str = "skyfall:intro-seen";

/// Per-session key/value flags.
pub trait SessionFlags {
    fn get(&self, key: &str) -> bool;
    fn set(&mut self, key: &str, value: bool);
}

/// In-memory flags, for tests and hosts without storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryFlags {
    set: HashSet<String>,
}

impl MemoryFlags {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionFlags for MemoryFlags {
    fn get(&self, key: &str) -> bool {
        self.set.contains(key)
    }

    fn set(&mut self, key: &str, value: bool) {
        if value {
            self.set.insert(key.to_owned());
        } else {
            self.set.remove(key);
        }
    }
}

/// Decides whether the one-time intro should play.
pub struct IntroGate<F: SessionFlags> {
    flags: F,
}

impl<F: SessionFlags> IntroGate<F> {
    pub fn new(flags: F) -> Self {
        Self { flags }
    }

    /// True the first time in a session; marks the intro as seen.
    pub fn should_play(&mut self) -> bool {
        if self.flags.get(INTRO_SEEN_KEY) {
            return false;
        }
        self.flags.set(INTRO_SEEN_KEY, true);
        true
    }

    pub fn into_flags(self) -> F {
        self.flags
    }
}
