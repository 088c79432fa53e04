use serde::{Deserialize, Serialize};

/// Which side of a fixture an event belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opposite(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    pub fn is_home(self) -> bool {
        self == TeamSide::Home
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goal,
    YellowCard,
    RedCard,
    Substitution,
    Chance,
    Save,
    Corner,
    Foul,
}

impl EventType {
    pub fn label(self) -> &'static str {
        match self {
            EventType::Goal => "Goal",
            EventType::YellowCard => "Yellow card",
            EventType::RedCard => "Red card",
            EventType::Substitution => "Substitution",
            EventType::Chance => "Chance",
            EventType::Save => "Save",
            EventType::Corner => "Corner",
            EventType::Foul => "Foul",
        }
    }

    /// Events shown in the condensed "other scores" ticker.
    pub fn is_ticker_worthy(self) -> bool {
        matches!(self, EventType::Goal | EventType::YellowCard | EventType::RedCard)
    }
}

/// One entry of a fully simulated match timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    /// 1..=90
    pub minute: u8,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub team: TeamSide,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub player: Option<String>,
    pub description: String,
}

impl MatchEvent {
    pub fn new(
        minute: u8,
        event_type: EventType,
        team: TeamSide,
        player: Option<String>,
        club_name: &str,
    ) -> Self {
        let description = describe(event_type, player.as_deref(), club_name);
        Self { minute, event_type, team, player, description }
    }

    pub fn substitution(
        minute: u8,
        team: TeamSide,
        player_in: Option<String>,
        player_out: Option<&str>,
        club_name: &str,
    ) -> Self {
        let description = match (player_in.as_deref(), player_out) {
            (Some(on), Some(off)) => format!("{on} replaces {off} for {club_name}"),
            _ => format!("Substitution for {club_name}"),
        };
        Self { minute, event_type: EventType::Substitution, team, player: player_in, description }
    }

    pub fn is_goal_for(&self, side: TeamSide) -> bool {
        self.event_type == EventType::Goal && self.team == side
    }
}

fn describe(event_type: EventType, player: Option<&str>, club_name: &str) -> String {
    match (event_type, player) {
        (EventType::Goal, Some(p)) => format!("GOAL! {p} scores for {club_name}"),
        (EventType::Goal, None) => format!("GOAL! {club_name} score"),
        (EventType::Chance, Some(p)) => format!("{p} goes close for {club_name}"),
        (EventType::Chance, None) => format!("Chance for {club_name}"),
        (EventType::Save, Some(p)) => format!("{p} is denied by the keeper"),
        (EventType::Save, None) => format!("Save from a {club_name} effort"),
        (EventType::YellowCard, Some(p)) => format!("Yellow card for {p} ({club_name})"),
        (EventType::RedCard, Some(p)) => format!("{p} is sent off! ({club_name})"),
        (EventType::Corner, _) => format!("Corner to {club_name}"),
        (EventType::Foul, Some(p)) => format!("Foul by {p} ({club_name})"),
        (other, _) => format!("{} - {club_name}", other.label()),
    }
}

/// Condensed event for matches that are resolved rather than fully simulated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TickerEvent {
    pub minute: u8,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub team: TeamSide,
}

/// Anything placed on a minute-indexed timeline.
pub trait TimedEvent {
    fn minute(&self) -> u8;
    fn event_type(&self) -> EventType;
    fn team(&self) -> TeamSide;
}

impl TimedEvent for MatchEvent {
    fn minute(&self) -> u8 {
        self.minute
    }
    fn event_type(&self) -> EventType {
        self.event_type
    }
    fn team(&self) -> TeamSide {
        self.team
    }
}

impl TimedEvent for TickerEvent {
    fn minute(&self) -> u8 {
        self.minute
    }
    fn event_type(&self) -> EventType {
        self.event_type
    }
    fn team(&self) -> TeamSide {
        self.team
    }
}

/// Score after `minute`, counted from goal events. The only way a score is
/// ever produced.
pub fn score_at<E: TimedEvent>(events: &[E], minute: u8) -> (u8, u8) {
    events
        .iter()
        .filter(|e| e.event_type() == EventType::Goal && e.minute() <= minute)
        .fold((0u8, 0u8), |(h, a), e| match e.team() {
            TeamSide::Home => (h.saturating_add(1), a),
            TeamSide::Away => (h, a.saturating_add(1)),
        })
}

/// Prefix of a minute-sorted timeline up to and including `minute`.
pub fn events_until<E: TimedEvent>(events: &[E], minute: u8) -> &[E] {
    let end = events.partition_point(|e| e.minute() <= minute);
    &events[..end]
}
