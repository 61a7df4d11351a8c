use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use salesline_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::records::{non_negative_cents, optional_text};
use crate::{OwnedRecord, RecordId, ResourceFamily, UserId};

/// Calendar month a target applies to, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetPeriod {
    year: i32,
    month: u32,
}

impl TargetPeriod {
    /// Creates a period, validating the month.
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::Validation(format!(
                "target month must be between 1 and 12, got {month}"
            )));
        }

        Ok(Self { year, month })
    }

    /// Returns the period containing the given date.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns whether the date falls inside this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Display for TargetPeriod {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for TargetPeriod {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::Validation(format!("target period '{value}' must be YYYY-MM"));
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for TargetPeriod {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl From<TargetPeriod> for String {
    fn from(value: TargetPeriod) -> Self {
        value.to_string()
    }
}

/// Monthly revenue goal for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    id: RecordId,
    user_id: UserId,
    period: TargetPeriod,
    amount_cents: i64,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

impl Target {
    /// Returns the record id.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Creates a target for a user and month.
    pub fn new(
        user_id: UserId,
        period: TargetPeriod,
        amount_cents: i64,
        created_by: UserId,
    ) -> AppResult<Self> {
        Ok(Self {
            id: RecordId::new(),
            user_id,
            period,
            amount_cents: positive_cents(amount_cents)?,
            created_by,
            created_at: Utc::now(),
        })
    }

    /// Returns the user the target belongs to.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the target month.
    #[must_use]
    pub fn period(&self) -> TargetPeriod {
        self.period
    }

    /// Returns the goal in cents.
    #[must_use]
    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    /// Returns the user that set the target.
    #[must_use]
    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Changes the goal.
    pub fn set_amount(&mut self, amount_cents: i64) -> AppResult<()> {
        self.amount_cents = positive_cents(amount_cents)?;
        Ok(())
    }
}

impl OwnedRecord for Target {
    const FAMILY: ResourceFamily = ResourceFamily::Target;

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn primary_owner(&self) -> Option<&UserId> {
        Some(&self.user_id)
    }

    fn owner_unique_key(&self) -> Option<String> {
        Some(self.period.to_string())
    }
}

fn positive_cents(value: i64) -> AppResult<i64> {
    if value <= 0 {
        return Err(AppError::Validation(
            "target amount must be greater than zero".to_owned(),
        ));
    }

    Ok(value)
}

/// Revenue booked by one user on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRevenue {
    id: RecordId,
    user_id: UserId,
    revenue_date: NaiveDate,
    amount_cents: i64,
    lead_id: Option<RecordId>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl DailyRevenue {
    /// Returns the record id.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Creates a revenue entry.
    pub fn new(
        user_id: UserId,
        revenue_date: NaiveDate,
        amount_cents: i64,
        lead_id: Option<RecordId>,
        notes: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: RecordId::new(),
            user_id,
            revenue_date,
            amount_cents: non_negative_cents(amount_cents, "revenue amount")?,
            lead_id,
            notes: optional_text(notes),
            created_at: Utc::now(),
        })
    }

    /// Returns the user the revenue is booked for.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the booking day.
    #[must_use]
    pub fn revenue_date(&self) -> NaiveDate {
        self.revenue_date
    }

    /// Returns the amount in cents.
    #[must_use]
    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    /// Returns the related lead, if any.
    #[must_use]
    pub fn lead_id(&self) -> Option<RecordId> {
        self.lead_id
    }

    /// Returns free-form notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl OwnedRecord for DailyRevenue {
    const FAMILY: ResourceFamily = ResourceFamily::DailyRevenue;

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn primary_owner(&self) -> Option<&UserId> {
        Some(&self.user_id)
    }
}

/// Channel of a recorded interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Phone call.
    Call,
    /// Email exchange.
    Email,
    /// In-person or video meeting.
    Meeting,
    /// Internal note.
    Note,
}

impl InteractionKind {
    /// Returns a stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Email => "email",
            Self::Meeting => "meeting",
            Self::Note => "note",
        }
    }
}

impl FromStr for InteractionKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "call" => Ok(Self::Call),
            "email" => Ok(Self::Email),
            "meeting" => Ok(Self::Meeting),
            "note" => Ok(Self::Note),
            _ => Err(AppError::Validation(format!(
                "unknown interaction kind '{value}'"
            ))),
        }
    }
}

/// Contact made with a lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    id: RecordId,
    lead_id: RecordId,
    user_id: UserId,
    kind: InteractionKind,
    notes: NonEmptyString,
    occurred_at: DateTime<Utc>,
}

impl Interaction {
    /// Returns the record id.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Records an interaction.
    pub fn new(
        lead_id: RecordId,
        user_id: UserId,
        kind: InteractionKind,
        notes: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: RecordId::new(),
            lead_id,
            user_id,
            kind,
            notes: NonEmptyString::new(notes)?,
            occurred_at,
        })
    }

    /// Returns the lead the interaction was with.
    #[must_use]
    pub fn lead_id(&self) -> RecordId {
        self.lead_id
    }

    /// Returns the user that made contact.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the channel.
    #[must_use]
    pub fn kind(&self) -> InteractionKind {
        self.kind
    }

    /// Returns the notes.
    #[must_use]
    pub fn notes(&self) -> &NonEmptyString {
        &self.notes
    }

    /// Returns when the interaction happened.
    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl OwnedRecord for Interaction {
    const FAMILY: ResourceFamily = ResourceFamily::Interaction;

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn primary_owner(&self) -> Option<&UserId> {
        Some(&self.user_id)
    }
}

/// Scheduled meeting or reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    id: RecordId,
    title: NonEmptyString,
    description: Option<String>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    lead_id: Option<RecordId>,
    created_by: UserId,
}

impl CalendarEvent {
    /// Returns the record id.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Creates an event.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        lead_id: Option<RecordId>,
        created_by: UserId,
    ) -> AppResult<Self> {
        validate_window(starts_at, ends_at)?;

        Ok(Self {
            id: RecordId::new(),
            title: NonEmptyString::new(title)?,
            description: optional_text(description),
            starts_at,
            ends_at,
            lead_id,
            created_by,
        })
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &NonEmptyString {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the start time.
    #[must_use]
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// Returns the end time.
    #[must_use]
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// Returns the related lead, if any.
    #[must_use]
    pub fn lead_id(&self) -> Option<RecordId> {
        self.lead_id
    }

    /// Returns the event owner.
    #[must_use]
    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    /// Replaces title, description and time window.
    pub fn reschedule(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> AppResult<()> {
        validate_window(starts_at, ends_at)?;
        self.title = NonEmptyString::new(title)?;
        self.description = optional_text(description);
        self.starts_at = starts_at;
        self.ends_at = ends_at;
        Ok(())
    }
}

impl OwnedRecord for CalendarEvent {
    const FAMILY: ResourceFamily = ResourceFamily::CalendarEvent;

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn primary_owner(&self) -> Option<&UserId> {
        Some(&self.created_by)
    }
}

fn validate_window(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> AppResult<()> {
    if ends_at < starts_at {
        return Err(AppError::Validation(
            "calendar event must not end before it starts".to_owned(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{Duration, NaiveDate, Utc};

    use super::*;

    fn user_id(value: &str) -> UserId {
        UserId::parse(value).unwrap_or_else(|_| panic!("valid user id"))
    }

    #[test]
    fn target_period_parses_and_formats() {
        let period = TargetPeriod::from_str("2026-03");
        assert!(matches!(period, Ok(value) if value.to_string() == "2026-03"));
        assert!(TargetPeriod::from_str("2026-13").is_err());
        assert!(TargetPeriod::from_str("march").is_err());
    }

    #[test]
    fn target_period_contains_its_days_only() {
        let period = TargetPeriod::new(2026, 3).unwrap_or_else(|_| panic!("valid period"));
        let inside = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap_or_default();
        let outside = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap_or_default();
        assert!(period.contains(inside));
        assert!(!period.contains(outside));
    }

    #[test]
    fn target_requires_positive_amount() {
        let period = TargetPeriod::new(2026, 3).unwrap_or_else(|_| panic!("valid period"));
        assert!(Target::new(user_id("a1"), period, 0, user_id("m1")).is_err());
        assert!(Target::new(user_id("a1"), period, 5_000, user_id("m1")).is_ok());
    }

    #[test]
    fn calendar_event_rejects_inverted_window() {
        let now = Utc::now();
        let result = CalendarEvent::new(
            "Demo",
            None,
            now,
            now - Duration::minutes(5),
            None,
            user_id("a1"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn single_owner_families_report_one_owner() {
        let revenue = DailyRevenue::new(
            user_id("a1"),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap_or_default(),
            10_000,
            None,
            Some("  ".to_owned()),
        )
        .unwrap_or_else(|_| panic!("valid revenue"));

        assert_eq!(revenue.owner_ids(), vec![&user_id("a1")]);
        assert_eq!(revenue.notes(), None);
    }
}
