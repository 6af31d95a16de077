//! Discrete filters applied alongside the text predicate.
//!
//! Each filter is an independent AND-condition. A selector holding the
//! sentinel `all` (any case) or an empty value is inactive.

use chrono::NaiveDate;

use super::parse_iso_date;
use crate::errors::AppError;
use crate::models::{Member, Offering, Prayer, PrayerStatus, PrayerVisibility};

/// Sentinel selector value meaning "no constraint".
pub const ALL: &str = "all";

/// A per-record inclusion test.
pub trait RecordFilter<R> {
    fn admits(&self, record: &R) -> bool;
}

/// The empty filter set: admits every record.
impl<R> RecordFilter<R> for () {
    fn admits(&self, _record: &R) -> bool {
        true
    }
}

/// Exact-match constraint on a single label field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selector {
    #[default]
    Any,
    Exactly(String),
}

impl Selector {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Selector::Any,
            Some(value) if value.eq_ignore_ascii_case(ALL) => Selector::Any,
            Some(value) => Selector::Exactly(value.to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Selector::Exactly(_))
    }

    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Selector::Any => true,
            Selector::Exactly(wanted) => value == Some(wanted.as_str()),
        }
    }
}

/// Member activity constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivityStatus {
    #[default]
    All,
    Active,
    Inactive,
}

impl ActivityStatus {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(ActivityStatus::All),
            Some(value) if value.eq_ignore_ascii_case(ALL) => Ok(ActivityStatus::All),
            Some(value) if value.eq_ignore_ascii_case("active") => Ok(ActivityStatus::Active),
            Some(value) if value.eq_ignore_ascii_case("inactive") => Ok(ActivityStatus::Inactive),
            Some(other) => Err(AppError::Validation(format!(
                "status must be one of all, active, inactive (got {:?})",
                other
            ))),
        }
    }

    pub fn admits(&self, is_active: bool) -> bool {
        match self {
            ActivityStatus::All => true,
            ActivityStatus::Active => is_active,
            ActivityStatus::Inactive => !is_active,
        }
    }
}

/// Inclusive date bounds. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Parse query-string bounds; blank values leave that side open.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, AppError> {
        Ok(Self {
            start: parse_bound("start_date", start)?,
            end: parse_bound("end_date", end)?,
        })
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Records without a parsable date only pass while the range is open on both sides.
    pub fn admits(&self, raw: Option<&str>) -> bool {
        if !self.is_active() {
            return true;
        }
        raw.and_then(parse_iso_date)
            .is_some_and(|date| self.contains(date))
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_iso_date(value)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Invalid {}: {:?}", name, value))),
    }
}

/// Inclusive amount bounds in whole currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmountRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl AmountRange {
    pub fn admits(&self, amount: u64) -> bool {
        self.min.is_none_or(|min| amount >= min) && self.max.is_none_or(|max| amount <= max)
    }
}

/// Member list filters: district, position and activity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub district: Selector,
    pub position: Selector,
    pub status: ActivityStatus,
}

impl RecordFilter<Member> for MemberFilter {
    fn admits(&self, member: &Member) -> bool {
        self.district.admits(member.district.as_deref())
            && self.position.admits(Some(member.position.as_str()))
            && self.status.admits(member.is_active)
    }
}

/// Offering list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferingFilter {
    pub offering_type: Selector,
    pub member_id: Option<i64>,
    pub dates: DateRange,
    pub amounts: AmountRange,
}

impl RecordFilter<Offering> for OfferingFilter {
    fn admits(&self, offering: &Offering) -> bool {
        self.offering_type
            .admits(Some(offering.offering_type.as_str()))
            && self.member_id.is_none_or(|id| offering.member_id == id)
            && self.dates.admits(Some(offering.offering_date.as_str()))
            && self.amounts.admits(offering.amount)
    }
}

/// Prayer list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrayerFilter {
    pub category: Selector,
    pub status: Option<PrayerStatus>,
    pub visibility: Option<PrayerVisibility>,
    /// Only requests written by this member
    pub created_by: Option<i64>,
}

impl PrayerFilter {
    /// Build from query-string values. Status and visibility match case-insensitively;
    /// values outside the known set are rejected.
    pub fn parse(
        category: Option<&str>,
        status: Option<&str>,
        visibility: Option<&str>,
        created_by: Option<i64>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            category: Selector::parse(category),
            status: parse_choice("status", status, &PrayerStatus::KNOWN, PrayerStatus::as_str)?,
            visibility: parse_choice(
                "visibility",
                visibility,
                &PrayerVisibility::KNOWN,
                PrayerVisibility::as_str,
            )?,
            created_by,
        })
    }
}

impl RecordFilter<Prayer> for PrayerFilter {
    fn admits(&self, prayer: &Prayer) -> bool {
        self.category.admits(prayer.category.as_deref())
            && self.status.is_none_or(|status| prayer.status == status)
            && self.visibility.is_none_or(|visibility| prayer.visibility == visibility)
            && self.created_by.is_none_or(|id| prayer.created_by == id)
    }
}

fn parse_choice<T: Copy>(
    name: &str,
    raw: Option<&str>,
    known: &[T],
    label: fn(&T) -> &'static str,
) -> Result<Option<T>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case(ALL) => Ok(None),
        Some(value) => known
            .iter()
            .find(|choice| label(*choice).eq_ignore_ascii_case(value))
            .copied()
            .map(Some)
            .ok_or_else(|| {
                let names: Vec<&str> = known.iter().map(label).collect();
                AppError::Validation(format!(
                    "{} must be one of all, {} (got {:?})",
                    name,
                    names.join(", "),
                    value
                ))
            }),
    }
}
