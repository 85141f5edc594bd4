//! The working bet slip: selections staged before placement.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ids::FixtureId;
use crate::domain::odds::{AmericanOdds, BettingOdds};
use crate::domain::payout::payout;
use crate::domain::selection::{BetType, Selection};

/// Slip entry identifier, derived as `<fixture>-<bet type>-<millis>`.
///
/// The millisecond component makes ids unique across re-adds of the same
/// selection after a removal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Wrap an existing entry id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the id for a fresh entry.
    #[must_use]
    pub fn derive(fixture_id: &FixtureId, bet_type: BetType, at: DateTime<Utc>) -> Self {
        Self(format!("{fixture_id}-{bet_type}-{}", at.timestamp_millis()))
    }

    /// Get the entry ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One staged selection.
///
/// Carries a snapshot of the fixture context (teams, league) and the quoted
/// price at the moment it was added. Placement freezes this price into the
/// bet; refreshing the board does not touch entries already on the slip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlipEntry {
    id: EntryId,
    fixture_id: FixtureId,
    home_team: String,
    away_team: String,
    league: String,
    selection: Selection,
    odds: AmericanOdds,
    added_at: DateTime<Utc>,
}

impl SlipEntry {
    /// Stage a selection against a fixture from the odds board.
    #[must_use]
    pub fn new(
        board: &BettingOdds,
        selection: Selection,
        odds: AmericanOdds,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EntryId::derive(&board.fixture_id, selection.bet_type(), added_at),
            fixture_id: board.fixture_id.clone(),
            home_team: board.home_team.clone(),
            away_team: board.away_team.clone(),
            league: board.league.clone(),
            selection,
            odds,
            added_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    #[must_use]
    pub fn fixture_id(&self) -> &FixtureId {
        &self.fixture_id
    }

    #[must_use]
    pub fn home_team(&self) -> &str {
        &self.home_team
    }

    #[must_use]
    pub fn away_team(&self) -> &str {
        &self.away_team
    }

    #[must_use]
    pub fn league(&self) -> &str {
        &self.league
    }

    #[must_use]
    pub fn bet_type(&self) -> BetType {
        self.selection.bet_type()
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn odds(&self) -> AmericanOdds {
        self.odds
    }

    #[must_use]
    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// "Away @ Home" matchup label.
    #[must_use]
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}

/// Result of adding a selection to the slip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlipAdd {
    /// Selection staged under a fresh entry id.
    Added { entry_id: EntryId },
    /// The same (fixture, market, outcome) was already staged; slip unchanged.
    AlreadyInSlip { entry_id: EntryId },
}

/// A user's working slip.
///
/// Duplicate detection keys on (fixture, selection); re-adding an identical
/// pick is a no-op rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetSlip {
    entries: Vec<SlipEntry>,
}

impl BetSlip {
    /// Empty slip.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate a slip from stored entries.
    #[must_use]
    pub fn from_entries(entries: Vec<SlipEntry>) -> Self {
        Self { entries }
    }

    /// Stage an entry, deduplicating on (fixture, selection).
    pub fn add(&mut self, entry: SlipEntry) -> SlipAdd {
        if let Some(existing) = self
            .entries
            .iter()
            .find(|e| e.fixture_id == entry.fixture_id && e.selection == entry.selection)
        {
            return SlipAdd::AlreadyInSlip {
                entry_id: existing.id.clone(),
            };
        }
        let entry_id = entry.id.clone();
        self.entries.push(entry);
        SlipAdd::Added { entry_id }
    }

    /// Remove an entry by id. Returns false when the id was not on the slip.
    pub fn remove(&mut self, id: &EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.id != id);
        self.entries.len() < before
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn entries(&self) -> &[SlipEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Combined payout if every selection won, with `total_stake` split evenly
    /// across entries. Each leg pays independently; this is not a parlay.
    ///
    /// An empty slip returns zero.
    #[must_use]
    pub fn potential_payout(&self, total_stake: Decimal) -> Decimal {
        if self.entries.is_empty() {
            return Decimal::ZERO;
        }
        let per_entry = total_stake / Decimal::from(self.entries.len());
        self.entries
            .iter()
            .map(|e| payout(per_entry, e.odds))
            .sum()
    }
}
