//! The admin page's filter controls as raw form values.
//!
//! Every slot holds what its control holds: text, or a checkbox flag. Empty
//! text means the control is unused. [`ClaimsFilterPanel::criteria`] turns
//! the used controls into [`FilterCriterion`]s.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cell::{parse_amount, parse_iso_date, CalendarDate};
use crate::criterion::FilterCriterion;
use crate::error::{Result, SiftError};
use crate::schema;

/// Min/max inputs for an amount column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmountSlot {
    pub min: String,
    pub max: String,
}

impl AmountSlot {
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        AmountSlot {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Parses both bounds. Empty inputs are unset.
    pub fn bounds(&self) -> Result<(Option<f64>, Option<f64>)> {
        Ok((amount_bound(&self.min)?, amount_bound(&self.max)?))
    }

    fn criterion(&self, column: &str) -> FilterCriterion {
        let min = lenient(amount_bound(&self.min), column);
        let max = lenient(amount_bound(&self.max), column);
        FilterCriterion::amount_range(column, min, max)
    }
}

/// Start/end inputs for a date column, as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateSlot {
    pub start: String,
    pub end: String,
}

impl DateSlot {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        DateSlot {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parses both bounds. Empty inputs are unset.
    pub fn bounds(&self) -> Result<(Option<CalendarDate>, Option<CalendarDate>)> {
        Ok((date_bound(&self.start)?, date_bound(&self.end)?))
    }

    fn criterion(&self, column: &str) -> FilterCriterion {
        let start = lenient(date_bound(&self.start), column);
        let end = lenient(date_bound(&self.end), column);
        FilterCriterion::date_range(column, start, end)
    }
}

fn amount_bound(text: &str) -> Result<Option<f64>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_amount(text)
        .map(Some)
        .ok_or_else(|| SiftError::InvalidAmountBound(text.trim().to_string()))
}

fn date_bound(text: &str) -> Result<Option<CalendarDate>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_iso_date(text).map(Some)
}

// A bad bound is dropped, leaving that side of the range open.
fn lenient<T>(bound: Result<Option<T>>, column: &str) -> Option<T> {
    bound.unwrap_or_else(|err| {
        warn!(column, "{err}; bound ignored");
        None
    })
}

/// Every filter control on the claims admin page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimsFilterPanel {
    // Text boxes ("contains")
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub street_address: String,
    pub city: String,
    pub zip_code: String,
    pub basis_of_claim: String,
    pub nature_of_injury: String,
    pub capitol_experience: String,
    pub injuries_damages: String,
    pub entry_exit_time: String,
    pub inside_capitol_details: String,
    pub signature_text: String,

    // Dropdowns (exact match)
    pub state: String,
    pub employment: String,
    pub marital_status: String,

    // Ranges
    pub total_amount: AmountSlot,
    pub property_damage: AmountSlot,
    pub personal_injury: AmountSlot,
    pub wrongful_death: AmountSlot,
    pub created: DateSlot,
    pub signed: DateSlot,

    // Checkboxes
    pub basis_deviation: bool,
    pub injury_deviation: bool,
}

impl ClaimsFilterPanel {
    pub fn new() -> Self {
        ClaimsFilterPanel::default()
    }

    /// Resets every control.
    pub fn clear(&mut self) {
        *self = ClaimsFilterPanel::default();
    }

    /// Checks every range bound, reporting the first one that does not parse.
    pub fn validate(&self) -> Result<()> {
        for slot in [
            &self.total_amount,
            &self.property_damage,
            &self.personal_injury,
            &self.wrongful_death,
        ] {
            slot.bounds()?;
        }
        self.created.bounds()?;
        self.signed.bounds()?;
        Ok(())
    }

    /// Returns `true` if no control constrains anything.
    pub fn is_empty(&self) -> bool {
        self.criteria().is_empty()
    }

    /// The active criteria, one per used control.
    pub fn criteria(&self) -> Vec<FilterCriterion> {
        let text_boxes = [
            (schema::CLAIMANT_NAME, &self.name),
            (schema::EMAIL_ADDRESS, &self.email),
            (schema::PHONE_NUMBER, &self.phone_number),
            (schema::STREET_ADDRESS, &self.street_address),
            (schema::CITY, &self.city),
            (schema::ZIP_CODE, &self.zip_code),
            (schema::BASIS_OF_CLAIM, &self.basis_of_claim),
            (schema::NATURE_OF_INJURY, &self.nature_of_injury),
            (schema::CAPITOL_EXPERIENCE, &self.capitol_experience),
            (schema::INJURIES_DAMAGES, &self.injuries_damages),
            (schema::ENTRY_EXIT_TIME, &self.entry_exit_time),
            (schema::INSIDE_CAPITOL_DETAILS, &self.inside_capitol_details),
            (schema::SIGNATURE, &self.signature_text),
        ];
        let dropdowns = [
            (schema::STATE, &self.state),
            (schema::EMPLOYMENT, &self.employment),
            (schema::MARITAL_STATUS, &self.marital_status),
        ];
        let amounts = [
            (schema::TOTAL_CLAIM_AMOUNT, &self.total_amount),
            (schema::PROPERTY_DAMAGE_AMOUNT, &self.property_damage),
            (schema::PERSONAL_INJURY_AMOUNT, &self.personal_injury),
            (schema::WRONGFUL_DEATH_AMOUNT, &self.wrongful_death),
        ];
        let dates = [(schema::CREATED, &self.created), (schema::SIGNED, &self.signed)];

        let mut criteria: Vec<FilterCriterion> = text_boxes
            .into_iter()
            .map(|(column, needle)| FilterCriterion::substring(column, needle.as_str()))
            .chain(
                dropdowns
                    .into_iter()
                    .map(|(column, value)| FilterCriterion::exact(column, value.as_str())),
            )
            .chain(amounts.into_iter().map(|(column, slot)| slot.criterion(column)))
            .chain(dates.into_iter().map(|(column, slot)| slot.criterion(column)))
            .collect();

        if self.basis_deviation {
            criteria.push(FilterCriterion::deviation(
                schema::BASIS_OF_CLAIM,
                schema::BOILERPLATE_BASIS,
            ));
        }
        if self.injury_deviation {
            criteria.push(FilterCriterion::deviation(
                schema::NATURE_OF_INJURY,
                schema::BOILERPLATE_INJURY,
            ));
        }

        criteria.retain(FilterCriterion::is_active);
        criteria
    }
}
