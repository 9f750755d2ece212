//! Month grid construction.
//!
//! The grid query is widened by ±7 days around the month so padding cells
//! belonging to adjacent months can still show their events in the rendered
//! widget. The flat list view uses strict month bounds.
//!
//! Weekend highlighting is computed against absolute Sun–Sat numbering no
//! matter which start-of-week the layout uses. Saturday stays a weekend even
//! when the grid starts on Monday — a calendar property, not a layout one.

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use chrono::{Datelike, Days, NaiveDate, Utc};
use serde::Serialize;

use cartaz_common::{ContentRepository, QueryOrder};
use cartaz_resolve::{plan_query, EventFilter, EventResolver, ResolvedEvent};

#[derive(Debug, Clone)]
pub struct CalendarRequest {
    pub year: i32,
    /// 1-based calendar month.
    pub month: u32,
    /// 0 = Sunday … 6 = Saturday; the weekday the leftmost column shows.
    pub start_of_week: u32,
    /// Per-day event cap for dense days; the rest becomes the overflow count.
    pub max_events_per_day: usize,
    pub filter: EventFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Column index 0–6 under the configured start-of-week.
    pub weekday: u32,
    pub is_today: bool,
    /// Absolute Sun/Sat, independent of `start_of_week`.
    pub is_weekend: bool,
    pub events: Vec<ResolvedEvent>,
    /// Total events on this date, including the ones cut by the cap.
    pub event_count: usize,
    pub overflow: usize,
}

/// Padding cells are real days of the adjacent months — they carry their own
/// events (this is what the ±7 day query widening feeds) but render dimmed.
#[derive(Debug, Clone, Serialize)]
pub enum CalendarCell {
    Pad(CalendarDay),
    Day(CalendarDay),
}

impl CalendarCell {
    pub fn day(&self) -> &CalendarDay {
        match self {
            CalendarCell::Pad(d) | CalendarCell::Day(d) => d,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub leading_padding: usize,
    /// Always a multiple of 7 cells.
    pub cells: Vec<CalendarCell>,
}

/// One date of the flat list view, ascending.
#[derive(Debug, Clone, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub events: Vec<ResolvedEvent>,
}

pub type DayBuckets = BTreeMap<NaiveDate, Vec<ResolvedEvent>>;

fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow!("invalid month {year}-{month}"))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| anyhow!("invalid month {year}-{month}"))?;
    Ok((first, next_first.pred_opt().unwrap_or(first)))
}

/// Pure grid layout over pre-bucketed events.
pub fn layout_month(
    year: i32,
    month: u32,
    start_of_week: u32,
    today: NaiveDate,
    buckets: &DayBuckets,
    max_events_per_day: usize,
) -> Result<CalendarMonth> {
    let (first, last) = month_bounds(year, month)?;
    let start_of_week = start_of_week % 7;

    let first_weekday = first.weekday().num_days_from_sunday();
    let leading_padding = ((first_weekday + 7 - start_of_week) % 7) as usize;
    let days_in_month = last.day() as usize;
    let trailing = (7 - (leading_padding + days_in_month) % 7) % 7;

    let grid_start = first
        .checked_sub_days(Days::new(leading_padding as u64))
        .ok_or_else(|| anyhow!("calendar range underflow"))?;

    let mut cells: Vec<CalendarCell> = Vec::with_capacity(42);
    for offset in 0..(leading_padding + days_in_month + trailing) {
        let date = grid_start
            .checked_add_days(Days::new(offset as u64))
            .ok_or_else(|| anyhow!("calendar range overflow"))?;
        let day = build_day(date, start_of_week, today, buckets, max_events_per_day);
        if date < first || date > last {
            cells.push(CalendarCell::Pad(day));
        } else {
            cells.push(CalendarCell::Day(day));
        }
    }

    Ok(CalendarMonth {
        year,
        month,
        leading_padding,
        cells,
    })
}

fn build_day(
    date: NaiveDate,
    start_of_week: u32,
    today: NaiveDate,
    buckets: &DayBuckets,
    max_events_per_day: usize,
) -> CalendarDay {
    let absolute = date.weekday().num_days_from_sunday();
    let bucket = buckets.get(&date).map(Vec::as_slice).unwrap_or(&[]);
    let event_count = bucket.len();
    let events: Vec<ResolvedEvent> = bucket.iter().take(max_events_per_day).cloned().collect();

    CalendarDay {
        date,
        weekday: (absolute + 7 - start_of_week) % 7,
        is_today: date == today,
        is_weekend: absolute == 0 || absolute == 6,
        overflow: event_count.saturating_sub(events.len()),
        event_count,
        events,
    }
}

/// Flat chronological view: strict month bounds, no padding.
pub fn layout_list(year: i32, month: u32, buckets: &DayBuckets) -> Result<Vec<DayGroup>> {
    let (first, last) = month_bounds(year, month)?;
    Ok(buckets
        .range(first..=last)
        .filter(|(_, events)| !events.is_empty())
        .map(|(date, events)| DayGroup {
            date: *date,
            events: events.clone(),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Repository-backed builder
// ---------------------------------------------------------------------------

pub struct CalendarBuilder<R> {
    repo: R,
    resolver: EventResolver<R>,
}

impl<R: ContentRepository + Clone> CalendarBuilder<R> {
    pub fn new(repo: R) -> Self {
        Self {
            resolver: EventResolver::new(repo.clone()),
            repo,
        }
    }

    pub async fn build_month(&self, request: &CalendarRequest) -> Result<CalendarMonth> {
        self.build_month_at(request, Utc::now().date_naive()).await
    }

    pub async fn build_month_at(
        &self,
        request: &CalendarRequest,
        today: NaiveDate,
    ) -> Result<CalendarMonth> {
        let buckets = self.buckets(request, today).await?;
        layout_month(
            request.year,
            request.month,
            request.start_of_week,
            today,
            &buckets,
            request.max_events_per_day,
        )
    }

    pub async fn build_list(&self, request: &CalendarRequest) -> Result<Vec<DayGroup>> {
        let today = Utc::now().date_naive();
        let buckets = self.buckets(request, today).await?;
        layout_list(request.year, request.month, &buckets)
    }

    /// Query `[first-7, last+7]` and bucket by resolved start date. The ±7
    /// widening feeds the grid's adjacent-month padding cells; `layout_list`
    /// trims back to the month itself.
    async fn buckets(&self, request: &CalendarRequest, today: NaiveDate) -> Result<DayBuckets> {
        let (first, last) = month_bounds(request.year, request.month)?;
        let widened_from = first.checked_sub_days(Days::new(7)).unwrap_or(first);
        let widened_to = last.checked_add_days(Days::new(7)).unwrap_or(last);

        let mut filter = request.filter.clone();
        filter.date_range = Some((widened_from, widened_to));
        filter.order = QueryOrder::StartDate;

        let query = plan_query(&filter, today);
        let records = self.repo.list_records(&query).await?;

        let mut buckets = DayBuckets::new();
        for record in &records {
            let resolved = self.resolver.resolve(record).await;
            // Dateless events cannot be placed on a calendar.
            if let Some(date) = resolved.start_date {
                buckets.entry(date).or_default().push(resolved);
            }
        }
        Ok(buckets)
    }
}
