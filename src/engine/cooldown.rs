use std::time::{Duration, Instant};

/// Per-cell move cooldowns, keyed by cell index with a monotonic expiry.
///
/// Entries are append-only between sweeps: `arm` pushes one per successful
/// mutation, `sweep` lazily drops anything already expired. A cell can carry
/// more than one live entry at once (e.g. captured-onto then later vacated
/// and reused before the first entry expires); `is_down` only cares whether
/// *any* entry for that cell is still live.
#[derive(Clone, Debug, Default)]
pub struct CooldownSet {
    entries: Vec<(usize, Instant)>,
}

impl CooldownSet {
    pub fn new() -> CooldownSet {
        CooldownSet::default()
    }

    /// Arms a cooldown on `cell` that expires `timeout` from now.
    pub fn arm(&mut self, cell: usize, timeout: Duration) {
        self.entries.push((cell, Instant::now() + timeout));
    }

    /// Whether `cell` currently carries a live (non-expired) cooldown.
    pub fn is_down(&self, cell: usize) -> bool {
        let now = Instant::now();
        self.entries.iter().any(|&(c, expiry)| c == cell && expiry > now)
    }

    /// Drops every entry that has already expired.
    pub fn sweep(&mut self) {
        let now = Instant::now();
        self.entries.retain(|&(_, expiry)| expiry > now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armed_cell_is_down_until_expiry() {
        let mut cooldowns = CooldownSet::new();
        cooldowns.arm(36, Duration::from_millis(50));
        assert!(cooldowns.is_down(36));
        assert!(!cooldowns.is_down(37));
        std::thread::sleep(Duration::from_millis(60));
        assert!(!cooldowns.is_down(36));
    }

    #[test]
    fn sweep_drops_expired_entries() {
        let mut cooldowns = CooldownSet::new();
        cooldowns.arm(10, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        cooldowns.sweep();
        assert!(cooldowns.entries.is_empty());
    }
}
