//! Spaced-repetition item scheduler with O/Δ/X marking.
//!
//! Items live in an active pool until a passing review at full memory
//! strength promotes them, one-way, to the completed pool. The next due
//! date always comes from a fixed interval table keyed by memory strength.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SchedulerError};

/// Days until the next review, indexed by memory count.
pub const INTERVALS: [i64; 4] = [1, 3, 7, 30];

/// Memory strength ceiling.
pub const MAX_MEMORY: u8 = 3;

/// Review mark: success, partial recall, or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStatus {
    #[serde(rename = "O")]
    Pass,
    #[serde(rename = "Δ")]
    Partial,
    #[serde(rename = "X")]
    Fail,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "O",
            Self::Partial => "Δ",
            Self::Fail => "X",
        }
    }

    /// Parse an interactive mark. `d`/`D` is accepted as an ASCII spelling
    /// of `Δ`. Anything else is a validation error and mutates nothing.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "O" | "o" => Ok(Self::Pass),
            "Δ" | "δ" | "D" | "d" => Ok(Self::Partial),
            "X" | "x" => Ok(Self::Fail),
            other => Err(SchedulerError::InvalidMark(other.to_string())),
        }
    }
}

/// One entry in an item's append-only review history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewMark {
    pub date: NaiveDate,
    pub status: ReviewStatus,
}

/// A single piece of knowledge under review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerItem {
    pub content: String,
    #[serde(default)]
    pub summary: String,
    pub id: Uuid,
    pub initial_date: NaiveDate,
    pub last_review_date: NaiveDate,
    pub next_review_date: NaiveDate,
    pub memory_count: u8,
    pub status: ReviewStatus,
    #[serde(default)]
    pub history: Vec<ReviewMark>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SchedulerItem {
    pub fn new(content: String, summary: String, tags: Vec<String>, today: NaiveDate) -> Self {
        Self {
            content,
            summary,
            id: Uuid::new_v4(),
            initial_date: today,
            last_review_date: today,
            next_review_date: today + Duration::days(INTERVALS[0]),
            memory_count: 0,
            status: ReviewStatus::Fail,
            history: Vec::new(),
            tags,
        }
    }

    /// Apply a review mark: adjust memory strength, append to history, and
    /// recompute the next due date from the interval table.
    pub fn review(&mut self, status: ReviewStatus, summary_update: Option<String>, today: NaiveDate) {
        self.status = status;
        self.last_review_date = today;
        self.history.push(ReviewMark { date: today, status });

        if let Some(summary) = summary_update {
            self.summary = summary;
        }

        match status {
            ReviewStatus::Pass => {
                self.memory_count = (self.memory_count + 1).min(MAX_MEMORY);
            }
            ReviewStatus::Fail => {
                self.memory_count = 0;
            }
            ReviewStatus::Partial => {}
        }

        self.next_review_date = today + Duration::days(INTERVALS[self.memory_count as usize]);
    }

    pub fn is_due(&self, on: NaiveDate) -> bool {
        self.next_review_date <= on
    }

    /// True right after a passing review at full memory strength.
    pub fn is_mastered(&self) -> bool {
        self.status == ReviewStatus::Pass && self.memory_count == MAX_MEMORY
    }
}

/// What a review did to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewReceipt {
    pub next_review_date: NaiveDate,
    pub memory_count: u8,
    /// The item moved to the completed pool.
    pub promoted: bool,
}

/// Active and completed item pools.
#[derive(Debug, Clone, Default)]
pub struct ItemPools {
    pub active: Vec<SchedulerItem>,
    pub completed: Vec<SchedulerItem>,
}

impl ItemPools {
    pub fn add(&mut self, item: SchedulerItem) -> Uuid {
        let id = item.id;
        self.active.push(item);
        id
    }

    pub fn get_active(&self, id: Uuid) -> Option<&SchedulerItem> {
        self.active.iter().find(|it| it.id == id)
    }

    /// Review an active item. Promotion to the completed pool is one-way and
    /// happens exactly when the mark is a pass at full memory strength.
    pub fn review(
        &mut self,
        id: Uuid,
        status: ReviewStatus,
        summary_update: Option<String>,
        today: NaiveDate,
    ) -> Result<ReviewReceipt> {
        let pos = self
            .active
            .iter()
            .position(|it| it.id == id)
            .ok_or(SchedulerError::ItemNotFound(id))?;

        let item = &mut self.active[pos];
        item.review(status, summary_update, today);

        let receipt = ReviewReceipt {
            next_review_date: item.next_review_date,
            memory_count: item.memory_count,
            promoted: item.is_mastered(),
        };

        if receipt.promoted {
            let item = self.active.remove(pos);
            self.completed.push(item);
        }

        Ok(receipt)
    }

    /// Active items due on or before `on`, optionally narrowed to those
    /// sharing a tag with `tag_filter`. Most overdue, least mastered, and
    /// currently-failing items sort first.
    pub fn due(&self, on: NaiveDate, tag_filter: &[String]) -> Vec<&SchedulerItem> {
        let wanted: Vec<String> = tag_filter.iter().map(|t| t.to_lowercase()).collect();

        let mut pool: Vec<&SchedulerItem> = self
            .active
            .iter()
            .filter(|it| it.is_due(on))
            .filter(|it| {
                wanted.is_empty()
                    || it.tags.iter().any(|t| wanted.contains(&t.to_lowercase()))
            })
            .collect();

        pool.sort_by_key(|it| {
            (
                it.next_review_date,
                it.memory_count,
                it.status != ReviewStatus::Fail,
            )
        });
        pool
    }
}
