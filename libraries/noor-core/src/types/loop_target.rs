/// Repeat target for verse playback
use serde::{Deserialize, Serialize};
use std::fmt;

/// How many times a verse plays before the reader moves on
///
/// Serialized as the repeat count, or `null` for [`LoopTarget::Forever`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Option<u32>", into = "Option<u32>")]
pub enum LoopTarget {
    /// Play the verse `n` times (n >= 1)
    Times(u32),
    /// Repeat the verse until the reader stops it
    Forever,
}

impl LoopTarget {
    /// Entries offered by the repeat control, in cycling order
    pub const MENU: [LoopTarget; 6] = [
        LoopTarget::Times(1),
        LoopTarget::Times(3),
        LoopTarget::Times(5),
        LoopTarget::Times(7),
        LoopTarget::Times(10),
        LoopTarget::Forever,
    ];

    /// Next entry of the menu, wrapping from `Forever` back to 1
    ///
    /// Counts that are not on the menu move to the next larger entry.
    pub fn cycle(self) -> Self {
        match self {
            LoopTarget::Forever => LoopTarget::MENU[0],
            LoopTarget::Times(n) => LoopTarget::MENU
                .iter()
                .copied()
                .find(|entry| match entry {
                    LoopTarget::Times(m) => *m > n,
                    LoopTarget::Forever => true,
                })
                .unwrap_or(LoopTarget::Forever),
        }
    }

    /// Whether another play is due after `completed` full plays
    pub fn allows_another(self, completed: u32) -> bool {
        match self {
            LoopTarget::Times(n) => completed < n,
            LoopTarget::Forever => true,
        }
    }

    /// Finite repeat count, `None` for `Forever`
    pub fn count(self) -> Option<u32> {
        match self {
            LoopTarget::Times(n) => Some(n),
            LoopTarget::Forever => None,
        }
    }
}

impl Default for LoopTarget {
    fn default() -> Self {
        LoopTarget::Times(1)
    }
}

impl fmt::Display for LoopTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopTarget::Times(n) => write!(f, "{}x", n),
            LoopTarget::Forever => write!(f, "\u{221e}"),
        }
    }
}

impl TryFrom<Option<u32>> for LoopTarget {
    type Error = String;

    fn try_from(value: Option<u32>) -> Result<Self, Self::Error> {
        match value {
            None => Ok(LoopTarget::Forever),
            Some(0) => Err("loop count must be at least 1".to_string()),
            Some(n) => Ok(LoopTarget::Times(n)),
        }
    }
}

impl From<LoopTarget> for Option<u32> {
    fn from(target: LoopTarget) -> Self {
        target.count()
    }
}
