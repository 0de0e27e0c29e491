//! Roster of assignable players and the filter deciding who shows in the pool.
//!
//! The board only reads the roster. Adding, editing and removing players is
//! the roster store's business.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Opaque player identifier.
///
/// Persisted ids may be numbers or strings; both load as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => ItemId(s),
            Raw::Int(n) => ItemId(n.to_string()),
            Raw::Float(n) => ItemId(n.to_string()),
        })
    }
}

/// Playing role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
    Other(String),
}

impl Role {
    /// Name used in roster files.
    pub fn code(&self) -> &str {
        match self {
            Role::Goalkeeper => "PORTIERE",
            Role::Defender => "DIFENSORE",
            Role::Midfielder => "CENTROCAMPISTA",
            Role::Forward => "ATTACCANTE",
            Role::Other(raw) => raw,
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "PORTIERE" => Role::Goalkeeper,
            "DIFENSORE" => Role::Defender,
            "CENTROCAMPISTA" => Role::Midfielder,
            "ATTACCANTE" => Role::Forward,
            _ => Role::Other(code.to_string()),
        }
    }

    /// Short badge shown on cards.
    pub fn badge(&self) -> String {
        match self {
            Role::Goalkeeper => "GK".to_string(),
            Role::Defender => "DEF".to_string(),
            Role::Midfielder => "MID".to_string(),
            Role::Forward => "FWD".to_string(),
            Role::Other(raw) => raw.chars().take(3).collect::<String>().to_uppercase(),
        }
    }

    /// Sort rank, goalkeeper first.
    pub fn order(&self) -> u8 {
        match self {
            Role::Goalkeeper => 0,
            Role::Defender => 1,
            Role::Midfielder => 2,
            Role::Forward => 3,
            Role::Other(_) => 4,
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Role::from_code(&code))
    }
}

fn serialize_flag<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *flag { "SI" } else { "NO" })
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => Ok(b),
        Raw::Text(s) => match s.trim().to_uppercase().as_str() {
            "SI" | "SÌ" | "YES" | "TRUE" => Ok(true),
            "NO" | "FALSE" | "" => Ok(false),
            other => Err(de::Error::custom(format!("invalid wildcard flag '{}'", other))),
        },
    }
}

/// A player card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "position")]
    pub role: Role,
    /// Team or squad name.
    #[serde(rename = "squad", default)]
    pub group: String,
    /// Starred player.
    #[serde(
        rename = "wildcard",
        default,
        serialize_with = "serialize_flag",
        deserialize_with = "deserialize_flag"
    )]
    pub highlighted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role, group: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            role,
            group: group.into(),
            highlighted: false,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn highlighted(mut self) -> Self {
        self.highlighted = true;
        self
    }
}

/// Read access to the roster.
pub trait RosterStore {
    fn all(&self) -> Vec<Item>;

    /// Players of one team (case-insensitive).
    fn by_group(&self, group: &str) -> Vec<Item> {
        self.all()
            .into_iter()
            .filter(|item| item.group.eq_ignore_ascii_case(group))
            .collect()
    }
}

/// Roster kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoster {
    items: Vec<Item>,
}

impl MemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Add a player. Returns `false` if the id is taken.
    pub fn add(&mut self, item: Item) -> bool {
        if self.items.iter().any(|i| i.id == item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Replace the player with the same id.
    pub fn update(&mut self, item: Item) -> bool {
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &ItemId) -> Option<Item> {
        let index = self.items.iter().position(|i| &i.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Distinct team names, sorted.
    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = self
            .items
            .iter()
            .map(|i| i.group.clone())
            .filter(|g| !g.is_empty())
            .collect();
        groups.sort_by_key(|g| g.to_lowercase());
        groups.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
        groups
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl RosterStore for MemoryRoster {
    fn all(&self) -> Vec<Item> {
        self.items.clone()
    }
}

/// Which teams the pool shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamDisplayMode {
    #[default]
    All,
    /// One team; nothing until a team is picked.
    Single(Option<String>),
    /// Two teams side by side; nothing until one is picked.
    Pair(Option<String>, Option<String>),
}

impl TeamDisplayMode {
    fn admits(&self, group: &str) -> bool {
        let same = |team: &Option<String>| team.as_deref().is_some_and(|t| t.eq_ignore_ascii_case(group));
        match self {
            TeamDisplayMode::All => true,
            TeamDisplayMode::Single(team) => same(team),
            TeamDisplayMode::Pair(a, b) => same(a) || same(b),
        }
    }
}

/// Active pool filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolFilter {
    pub group: Option<String>,
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    pub role: Option<Role>,
    pub team_mode: TeamDisplayMode,
}

impl PoolFilter {
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(group) = &self.group {
            if !item.group.eq_ignore_ascii_case(group) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            let needle = name.trim().to_lowercase();
            if !needle.is_empty() && !item.name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if self.role.as_ref().is_some_and(|role| &item.role != role) {
            return false;
        }
        self.team_mode.admits(&item.group)
    }
}

/// Pool order: team, then role, then name.
pub fn pool_order(a: &Item, b: &Item) -> Ordering {
    a.group
        .to_lowercase()
        .cmp(&b.group.to_lowercase())
        .then_with(|| a.role.order().cmp(&b.role.order()))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

/// Metadata block of a roster file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterMetadata {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub total_players: usize,
    #[serde(default)]
    pub squads: Vec<String>,
}

/// Persisted roster document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterFile {
    pub players: Vec<Item>,
    #[serde(default)]
    pub metadata: RosterMetadata,
}

impl RosterFile {
    pub const VERSION: &'static str = "1.0";

    /// Wrap a roster, deriving the metadata block.
    pub fn from_roster(roster: &MemoryRoster, last_updated: Option<String>) -> Self {
        Self {
            players: roster.all(),
            metadata: RosterMetadata {
                version: Self::VERSION.to_string(),
                last_updated,
                total_players: roster.len(),
                squads: roster.groups(),
            },
        }
    }

    pub fn into_roster(self) -> MemoryRoster {
        MemoryRoster::from_items(self.players)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
