//! Protocol limits enforced by [`Transaction::validate`](crate::Transaction::validate).

/// Base units per whole coin.
pub const ONE_COIN: u64 = 100_000_000;

/// Total supply in whole coins.
pub const MAX_BALANCE_COINS: u64 = 2_158_812_800;

/// Largest amount or fee any transaction may carry, in base units.
pub const MAX_BALANCE_NQT: u64 = MAX_BALANCE_COINS * ONE_COIN;

/// Smallest accepted fee, in base units.
pub const MIN_FEE_NQT: u64 = 735_000;

/// Longest deadline, in minutes.
pub const MAX_DEADLINE: u16 = 1440;

/// Longest message appendix payload, in bytes.
pub const MAX_MESSAGE_LENGTH: usize = 1000;

/// Highest transaction version this node understands.
pub const CURRENT_VERSION: u8 = 1;
