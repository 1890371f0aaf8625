//! The claims administration table: column names, kinds and the standard
//! narrative paragraphs that the deviation filters compare against.

use crate::table::{Column, ColumnKind};

pub const CLAIMANT_NAME: &str = "Claimant Name";
pub const EMAIL_ADDRESS: &str = "Email Address";
pub const PHONE_NUMBER: &str = "Phone Number";
pub const STREET_ADDRESS: &str = "Street Address";
pub const CITY: &str = "City";
pub const STATE: &str = "State";
pub const ZIP_CODE: &str = "Zip Code";
pub const EMPLOYMENT: &str = "Type of Employment";
pub const MARITAL_STATUS: &str = "Marital Status";
pub const CREATED: &str = "Date and Time Created";
pub const SIGNATURE: &str = "Signature";
pub const SIGNED: &str = "Date and Time Signed";
pub const BASIS_OF_CLAIM: &str = "Basis of Claim";
pub const NATURE_OF_INJURY: &str = "Nature of Injury";
pub const CAPITOL_EXPERIENCE: &str = "Capitol Experience";
pub const INJURIES_DAMAGES: &str = "Injuries/Damages";
pub const ENTRY_EXIT_TIME: &str = "Entry/Exit Time";
pub const INSIDE_CAPITOL_DETAILS: &str = "Inside Capitol Details";
pub const PROPERTY_DAMAGE_AMOUNT: &str = "Property Damage Amount";
pub const PERSONAL_INJURY_AMOUNT: &str = "Personal Injury Amount";
pub const WRONGFUL_DEATH_AMOUNT: &str = "Wrongful Death Amount";
pub const TOTAL_CLAIM_AMOUNT: &str = "Total Claim Amount";

/// Column order of the admin table.
pub const COLUMN_NAMES: [&str; 22] = [
    CLAIMANT_NAME,
    EMAIL_ADDRESS,
    PHONE_NUMBER,
    STREET_ADDRESS,
    CITY,
    STATE,
    ZIP_CODE,
    EMPLOYMENT,
    MARITAL_STATUS,
    CREATED,
    SIGNATURE,
    SIGNED,
    BASIS_OF_CLAIM,
    NATURE_OF_INJURY,
    CAPITOL_EXPERIENCE,
    INJURIES_DAMAGES,
    ENTRY_EXIT_TIME,
    INSIDE_CAPITOL_DETAILS,
    PROPERTY_DAMAGE_AMOUNT,
    PERSONAL_INJURY_AMOUNT,
    WRONGFUL_DEATH_AMOUNT,
    TOTAL_CLAIM_AMOUNT,
];

/// Standard "Basis of Claim" paragraph.
pub const BOILERPLATE_BASIS: &str = "While the claimant was protesting on January 6, 2021 at the West side of the U.S. Capitol, the Capitol Police and D.C. Metropolitan Police acting on behalf of the Capitol Police used excessive force against the claimant causing claimant physical injuries. The excessive force took the form of various munitions launched against the protesters including but not limited to: pepper balls, rubber balls or bullets some filled with Oleoresin Capsicum (\"OC\"), FM 303 projectiles, sting balls, flash bang, sting bomb and tear gas grenades, tripple chasers,pepper spray, CS Gas and physical strikes with firsts or batons.";

/// Standard "Nature of Injury" paragraph.
pub const BOILERPLATE_INJURY: &str = "The claimant went to the U.S. Capitol to peacefully protest the presidential election. While the claimant was in the area of the West Side of the U.S. Capitol building police launched weapons referenced above and used excessive force. The claimant was struck and or exposed to the launched munitions and/or OC or CS Gas and suffered injuries as a result. The legal ramifications of these actions are currently under review and form part of the ongoing damages being claimed.";

/// The admin table's columns with their kinds.
pub fn claims_columns() -> Vec<Column> {
    COLUMN_NAMES.iter().copied().map(Column::inferred).collect()
}

/// The kind of a claims column, or `None` for names outside the table.
pub fn claims_column_kind(name: &str) -> Option<ColumnKind> {
    COLUMN_NAMES
        .contains(&name)
        .then(|| ColumnKind::infer(name))
}
