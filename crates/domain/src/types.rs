// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

/// Stable identifier of a manager (e.g. `m1`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManagerId(String);

impl ManagerId {
    /// Creates a new manager identifier.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the identifier is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ManagerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ManagerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A league participant and the club they manage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    /// Unique, stable identifier.
    pub id: ManagerId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// The club name, derived from the logo file.
    #[serde(default)]
    pub club_name: String,
    /// The club logo file from the catalogue.
    #[serde(default)]
    pub club_logo_file: String,
    /// The manager's photo file.
    #[serde(default)]
    pub photo_file: String,
    /// Free-text biography.
    #[serde(default)]
    pub bio: String,
}

impl Manager {
    /// Creates a manager with an empty bio.
    #[must_use]
    pub fn new(id: &str, name: &str, club_name: &str, photo_file: &str) -> Self {
        Self {
            id: ManagerId::new(id),
            name: name.to_string(),
            club_name: club_name.to_string(),
            club_logo_file: crate::clubs::logo_for_club(club_name),
            photo_file: photo_file.to_string(),
            bio: String::new(),
        }
    }

    /// Returns whether this manager has claimed the given club.
    ///
    /// A club is claimed either by name or by its logo file.
    #[must_use]
    pub fn has_club(&self, club_name: &str) -> bool {
        !club_name.is_empty()
            && (self.club_name == club_name
                || self.club_logo_file == crate::clubs::logo_for_club(club_name))
    }
}

/// Declares a string-backed enum whose unknown values decode to the default.
macro_rules! lenient_str_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $text:literal
            ),+ $(,)?
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Returns the wire representation.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Parses the wire representation, returning `None` for unknown values.
            #[must_use]
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::parse(&value).unwrap_or(Self::$default)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

lenient_str_enum! {
    /// Who the match was played against.
    MatchKind {
        /// Against a computer-controlled club.
        #[default]
        Ai => "AI",
        /// Against another league manager ("teman").
        Teman => "Teman",
    }
    default Ai
}

lenient_str_enum! {
    /// The competition a match belongs to.
    Competition {
        /// League fixture.
        #[default]
        Liga => "Liga",
        /// Cup tie.
        Cup => "Cup",
        /// Friendly.
        Friendly => "Friendly",
    }
    default Liga
}

lenient_str_enum! {
    /// Home or away.
    Venue {
        /// Played at home.
        #[default]
        Home => "H",
        /// Played away.
        Away => "A",
    }
    default Home
}

/// The opponent of a match.
///
/// Exactly one representation exists per match: either another league manager
/// or a free-text club name for an AI opponent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Opponent {
    /// Another manager in the league.
    Known(ManagerId),
    /// A computer-controlled club, named in free text.
    External(String),
}

/// A recorded match result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MatchRecord", into = "MatchRecord")]
pub struct Match {
    /// Unique, monotonically assigned identifier.
    pub id: u64,
    /// The manager who played the match.
    pub manager_id: ManagerId,
    /// Who they played against.
    pub opponent: Opponent,
    /// AI or manager-versus-manager.
    pub kind: MatchKind,
    /// The match date as entered (`YYYY-MM-DD`).
    pub date: String,
    /// The competition.
    pub competition: Competition,
    /// Home or away.
    pub venue: Venue,
    /// Goals scored by the owning manager.
    pub goals_for: u32,
    /// Goals conceded by the owning manager.
    pub goals_against: u32,
    /// Whether the match counts towards the standings.
    pub counted: bool,
}

impl Match {
    /// Parses the match date, if it is a valid `YYYY-MM-DD` date.
    #[must_use]
    pub fn played_on(&self) -> Option<Date> {
        Date::parse(&self.date, format_description!("[year]-[month]-[day]")).ok()
    }
}

const fn default_counted() -> bool {
    true
}

/// Wire shape of a match, with the opponent split over two optional fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchRecord {
    id: u64,
    manager_id: ManagerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    opponent_id: Option<ManagerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    opponent: Option<String>,
    #[serde(rename = "type", default)]
    kind: MatchKind,
    #[serde(default)]
    date: String,
    #[serde(default)]
    competition: Competition,
    #[serde(default)]
    ha: Venue,
    gf: u32,
    ga: u32,
    #[serde(rename = "use", default = "default_counted")]
    counted: bool,
}

impl From<MatchRecord> for Match {
    fn from(record: MatchRecord) -> Self {
        let opponent: Opponent = match (record.opponent_id, record.opponent) {
            (Some(id), _) if !id.is_empty() => Opponent::Known(id),
            (_, Some(name)) => Opponent::External(name),
            _ => Opponent::External(String::new()),
        };

        Self {
            id: record.id,
            manager_id: record.manager_id,
            opponent,
            kind: record.kind,
            date: record.date,
            competition: record.competition,
            venue: record.ha,
            goals_for: record.gf,
            goals_against: record.ga,
            counted: record.counted,
        }
    }
}

impl From<Match> for MatchRecord {
    fn from(value: Match) -> Self {
        let (opponent_id, opponent): (Option<ManagerId>, Option<String>) = match value.opponent {
            Opponent::Known(id) => (Some(id), None),
            Opponent::External(name) => (None, Some(name)),
        };

        Self {
            id: value.id,
            manager_id: value.manager_id,
            opponent_id,
            opponent,
            kind: value.kind,
            date: value.date,
            competition: value.competition,
            ha: value.venue,
            gf: value.goals_for,
            ga: value.goals_against,
            counted: value.counted,
        }
    }
}
