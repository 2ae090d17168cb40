//! Festival queries.
//!
//! All filters borrow from the dataset and return matches in dataset order.

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{Dataset, Festival};
use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Every festival, unchanged.
pub fn all(dataset: &Dataset) -> &[Festival] {
    &dataset.festivals
}

/// First festival whose name matches, ignoring case.
pub fn by_name<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Festival> {
    let wanted = name.to_lowercase();
    dataset
        .festivals
        .iter()
        .find(|f| f.name.to_lowercase() == wanted)
        .ok_or_else(|| Error::NotFound("Festival not found".to_string()))
}

/// Festivals falling on `date`, which must be a real `YYYY-MM-DD` calendar date.
pub fn by_date<'a>(dataset: &'a Dataset, date: &str) -> Result<Vec<&'a Festival>> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| Error::InvalidArgument("Invalid date format. Use YYYY-MM-DD".to_string()))?;

    Ok(dataset.festivals.iter().filter(|f| f.date == date).collect())
}

/// Festivals in the given month (1-12).
///
/// Records whose `date` has no numeric month component are skipped.
pub fn by_month(dataset: &Dataset, month: u32) -> Result<Vec<&Festival>> {
    if !(1..=12).contains(&month) {
        return Err(invalid_month());
    }

    Ok(dataset
        .festivals
        .iter()
        .filter(|f| match f.month() {
            Some(m) => m == month,
            None => {
                warn!("Skipping festival {:?} with malformed date {:?}", f.name, f.date);
                false
            }
        })
        .collect())
}

/// Parse a month path parameter, rejecting non-integers and values outside 1-12.
pub fn parse_month(raw: &str) -> Result<u32> {
    match raw.trim().parse::<i64>() {
        Ok(month) if (1..=12).contains(&month) => Ok(month as u32),
        _ => Err(invalid_month()),
    }
}

fn invalid_month() -> Error {
    Error::InvalidArgument("Month must be an integer between 1 and 12".to_string())
}

/// Festivals observed in `region`, ignoring case.
pub fn by_region<'a>(dataset: &'a Dataset, region: &str) -> Vec<&'a Festival> {
    let wanted = region.to_lowercase();
    dataset
        .festivals
        .iter()
        .filter(|f| f.regions.iter().any(|r| r.to_lowercase() == wanted))
        .collect()
}

/// Festivals of the given type, ignoring case.
pub fn by_type<'a>(dataset: &'a Dataset, festival_type: &str) -> Vec<&'a Festival> {
    let wanted = festival_type.to_lowercase();
    dataset
        .festivals
        .iter()
        .filter(|f| f.festival_type.to_lowercase() == wanted)
        .collect()
}

pub fn public_holidays(dataset: &Dataset) -> Vec<&Festival> {
    dataset
        .festivals
        .iter()
        .filter(|f| f.is_public_holiday())
        .collect()
}
