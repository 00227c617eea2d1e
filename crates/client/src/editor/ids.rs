use std::fmt;

use web_time::{SystemTime, UNIX_EPOCH};

/// Identity of an exercise in the editor
///
/// Exercises added in the browser get a `Local` id until the server has
/// stored them, after which they carry the server's id. Only `Persisted` ids
/// are ever sent to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseId {
    Local(u64),
    Persisted(i64),
}

impl ExerciseId {
    pub fn persisted(&self) -> Option<i64> {
        match self {
            ExerciseId::Persisted(id) => Some(*id),
            ExerciseId::Local(_) => None,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, ExerciseId::Local(_))
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseId::Local(id) => write!(f, "local:{id}"),
            ExerciseId::Persisted(id) => write!(f, "{id}"),
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// Hands out ids for exercises and sets that haven't been stored yet
///
/// Ids follow the clock in milliseconds but never repeat, asking for several
/// within the same millisecond yields consecutive values
#[derive(Debug, Clone)]
pub struct LocalIdGenerator {
    last: u64,
}

impl LocalIdGenerator {
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    /// Every id handed out will be greater than `last`
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }

    pub fn next_id(&mut self) -> u64 {
        self.last = now_millis().max(self.last + 1);
        self.last
    }
}

impl Default for LocalIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::{ExerciseId, LocalIdGenerator};

    #[test]
    fn test_ids_strictly_increase() {
        let mut ids = LocalIdGenerator::new();
        let generated: Vec<u64> = (0..1000).map(|_| ids.next_id()).collect();
        assert!(generated.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_ids_follow_the_clock() {
        let mut ids = LocalIdGenerator::new();
        // Any time after 2020-01-01
        assert!(ids.next_id() > 1_577_836_800_000);
    }

    #[test]
    fn test_ids_never_go_backwards() {
        let mut ids = LocalIdGenerator::starting_after(u64::MAX - 10);
        assert_eq!(ids.next_id(), u64::MAX - 9);
    }

    #[test]
    fn test_only_persisted_ids_are_exposed() {
        assert_eq!(ExerciseId::Persisted(4).persisted(), Some(4));
        assert_eq!(ExerciseId::Local(1_700_000_000_000).persisted(), None);
        assert!(ExerciseId::Local(1).is_local());
    }
}
