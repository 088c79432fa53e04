pub mod clock;
pub mod event_sim;
pub mod live_stats;
pub mod matchday;
pub mod playback;
pub mod resolver;

pub use clock::{ClockState, LiveSnapshot, MatchClock, Period, PlaybackSpeed};
pub use event_sim::{attack_share, simulate, simulate_with_config};
pub use live_stats::{LiveStats, SideStats};
pub use matchday::{
    BoardLine, FocalMatch, LiveMatchday, MatchdayBoard, MatchdayFrame, TickerMatch,
};
pub use playback::{LivePlayback, PlaybackCommand, PlaybackHandle};
pub use resolver::{
    expected_goals, resolve_quick, resolve_quick_with_config, resolve_ticker,
    resolve_ticker_with_config, sample_poisson,
};
