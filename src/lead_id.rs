/// Lead ID generation and parsing
///
/// Format: `[REGION]-[INQUIRY_TYPE]-[OWNER]-[YYMMDD]-[SEQ]-[CHECKSUM]`,
/// e.g. `MH-WB-SR-250101-001-CN`.
///
/// - REGION: 2-letter state/region code (see `codes::REGION_CODES`)
/// - INQUIRY_TYPE: 2-letter lead source code (see `codes::INQUIRY_TYPE_CODES`)
/// - OWNER: sales owner initials
/// - YYMMDD: creation date
/// - SEQ: daily sequence, at least 3 digits
/// - CHECKSUM: 2 characters derived from the other fields and the phone number
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::codes::{inquiry_type_code, owner_code, region_code};
use crate::sequence::SequenceCounter;

/// Checksum alphabet; I, O, 0 and 1 are left out to avoid misreads.
pub const CHECKSUM_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

static CANONICAL_LEAD_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2}-[A-Z]{2}-[A-Z0-9]{2}-\d{6}-\d{3,}-[A-HJ-NP-Z2-9]{2}$")
        .expect("canonical lead id pattern is valid")
});

/// Attributes of a new lead that feed into its ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadIdParams {
    /// City / state / country, free text.
    #[serde(default)]
    pub location: Option<String>,
    /// Lead source channel, free text.
    #[serde(default)]
    pub source: Option<String>,
    /// Sales owner name.
    #[serde(default)]
    pub owner: Option<String>,
    /// Creation timestamp; its calendar date in its own offset is used.
    #[serde(default)]
    pub date: Option<DateTime<FixedOffset>>,
    /// Raw phone number, only mixed into the checksum.
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Components of a parsed Lead ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLeadId {
    pub region: String,
    pub inquiry_type: String,
    pub owner_code: String,
    pub date_stamp: String,
    pub sequence: String,
    pub checksum: String,
    /// Four-digit year, assuming the 2000s ("25" -> "2025").
    pub year: String,
    pub month: String,
    pub day: String,
}

impl ParsedLeadId {
    /// Sequence segment as a number, if it is numeric.
    pub fn sequence_number(&self) -> Option<u64> {
        self.sequence.parse().ok()
    }

    /// Calendar date encoded in the ID, if it is a real date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date_stamp, "%y%m%d").ok()
    }
}

/// `YYMMDD` stamp for a calendar date.
pub fn date_stamp(date: NaiveDate) -> String {
    format!(
        "{:02}{:02}{:02}",
        date.year().rem_euclid(100),
        date.month(),
        date.day()
    )
}

/// Two-character checksum over `input`.
///
/// Runs the classic `hash * 31 + c` string hash in wrapping 32-bit signed
/// arithmetic over UTF-16 code units, then reads two base-32 digits off the
/// absolute value.
pub fn checksum(input: &str) -> String {
    let hash = input.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });

    let num = hash.unsigned_abs() as usize;
    let base = CHECKSUM_ALPHABET.len();
    let c1 = CHECKSUM_ALPHABET[num % base] as char;
    let c2 = CHECKSUM_ALPHABET[(num / base) % base] as char;

    format!("{}{}", c1, c2)
}

/// Generates the next Lead ID, using `today` when `params.date` is unset.
pub fn generate_lead_id_on(
    params: &LeadIdParams,
    counter: &mut SequenceCounter,
    today: NaiveDate,
) -> String {
    let region = region_code(params.location.as_deref());
    let inquiry_type = inquiry_type_code(params.source.as_deref());
    let owner = owner_code(params.owner.as_deref());
    let stamp = date_stamp(params.date.map(|d| d.date_naive()).unwrap_or(today));
    let sequence = format!("{:03}", counter.next(&stamp));

    let checksum_input = format!(
        "{}{}{}{}{}{}",
        region,
        inquiry_type,
        owner,
        stamp,
        sequence,
        params.phone_number.as_deref().unwrap_or_default()
    );
    let check = checksum(&checksum_input);

    let lead_id = [
        region,
        inquiry_type,
        owner.as_str(),
        stamp.as_str(),
        sequence.as_str(),
        check.as_str(),
    ]
    .join("-");
    tracing::debug!("🆔 Generated lead ID {}", lead_id);
    lead_id
}

/// Generates the next Lead ID against the local calendar date.
pub fn generate_lead_id(params: &LeadIdParams, counter: &mut SequenceCounter) -> String {
    generate_lead_id_on(params, counter, chrono::Local::now().date_naive())
}

fn char_range(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end - start).collect()
}

/// Splits a Lead ID into its components.
///
/// Returns `None` for an empty string or anything that does not have exactly
/// six dash-separated segments. Segment contents are not validated.
pub fn parse_lead_id(lead_id: &str) -> Option<ParsedLeadId> {
    if lead_id.is_empty() {
        return None;
    }

    let parts: Vec<&str> = lead_id.split('-').collect();
    let [region, inquiry_type, owner, stamp, sequence, check] = parts.as_slice() else {
        return None;
    };

    Some(ParsedLeadId {
        region: region.to_string(),
        inquiry_type: inquiry_type.to_string(),
        owner_code: owner.to_string(),
        date_stamp: stamp.to_string(),
        sequence: sequence.to_string(),
        checksum: check.to_string(),
        year: format!("20{}", char_range(stamp, 0, 2)),
        month: char_range(stamp, 2, 4),
        day: char_range(stamp, 4, 6),
    })
}

/// True when `lead_id` has exactly the shape the generator produces for
/// ordinary inputs.
pub fn is_canonical(lead_id: &str) -> bool {
    CANONICAL_LEAD_ID.is_match(lead_id)
}

/// Recomputes the checksum of `lead_id` with `phone_number` and compares it
/// with the one embedded in the ID.
pub fn verify_checksum(lead_id: &str, phone_number: Option<&str>) -> bool {
    let Some(parsed) = parse_lead_id(lead_id) else {
        return false;
    };

    let input = format!(
        "{}{}{}{}{}{}",
        parsed.region,
        parsed.inquiry_type,
        parsed.owner_code,
        parsed.date_stamp,
        parsed.sequence,
        phone_number.unwrap_or_default()
    );
    checksum(&input) == parsed.checksum
}
