//! Two-letter codes embedded in a Lead ID.
//!
//! Region and inquiry-type codes are resolved by scanning ordered tables for
//! the first key contained in the (lower-cased) input. Table order matters:
//! "Navi Mumbai, Goa" resolves to `GA` because `goa` is listed before
//! `mumbai`.

/// Fallback region code for empty or unrecognised locations.
pub const UNKNOWN_REGION: &str = "XX";
/// Fallback inquiry-type code (new enquiry).
pub const DEFAULT_INQUIRY_TYPE: &str = "NE";
/// Fallback owner code.
pub const UNKNOWN_OWNER: &str = "XX";

/// Region/city substrings mapped to region codes, first match wins.
pub const REGION_CODES: &[(&str, &str)] = &[
    ("andhra pradesh", "AP"),
    ("arunachal pradesh", "AR"),
    ("assam", "AS"),
    ("bihar", "BR"),
    ("chhattisgarh", "CG"),
    ("goa", "GA"),
    ("gujarat", "GJ"),
    ("haryana", "HR"),
    ("himachal pradesh", "HP"),
    ("jharkhand", "JH"),
    ("karnataka", "KA"),
    ("kerala", "KL"),
    ("madhya pradesh", "MP"),
    ("maharashtra", "MH"),
    ("manipur", "MN"),
    ("meghalaya", "ML"),
    ("mizoram", "MZ"),
    ("nagaland", "NL"),
    ("odisha", "OD"),
    ("punjab", "PB"),
    ("rajasthan", "RJ"),
    ("sikkim", "SK"),
    ("tamil nadu", "TN"),
    ("telangana", "TS"),
    ("tripura", "TR"),
    ("uttar pradesh", "UP"),
    ("uttarakhand", "UK"),
    ("west bengal", "WB"),
    ("delhi", "DL"),
    ("new delhi", "DL"),
    ("mumbai", "MH"),
    ("chennai", "TN"),
    ("bangalore", "KA"),
    ("hyderabad", "TS"),
    ("kolkata", "WB"),
    ("pune", "MH"),
    ("ahmedabad", "GJ"),
    ("international", "IN"),
    ("unknown", "XX"),
];

/// Lead-source phrases mapped to inquiry-type codes, first match wins.
pub const INQUIRY_TYPE_CODES: &[(&str, &str)] = &[
    ("new enquiry", "NE"),
    ("new", "NE"),
    ("returning customer", "RE"),
    ("returning", "RE"),
    ("referral", "RF"),
    ("website", "WB"),
    ("web", "WB"),
    ("trade show", "TD"),
    ("indiamart", "IM"),
    ("justtrade", "JT"),
    ("justdial", "JD"),
    ("direct call", "DC"),
    ("email", "EM"),
    ("walk-in", "WI"),
    ("social media", "SM"),
    ("linkedin", "LI"),
    ("exhibition", "EX"),
    ("unknown", "XX"),
];

fn lookup(
    table: &[(&str, &'static str)],
    input: Option<&str>,
    fallback: &'static str,
) -> &'static str {
    let Some(raw) = input else {
        return fallback;
    };
    let needle = raw.trim().to_lowercase();
    if needle.is_empty() {
        return fallback;
    }

    table
        .iter()
        .find(|(key, _)| needle.contains(*key))
        .map(|(_, code)| *code)
        .unwrap_or(fallback)
}

/// Region code for a free-text location ("Andheri, Mumbai" -> `MH`).
pub fn region_code(location: Option<&str>) -> &'static str {
    lookup(REGION_CODES, location, UNKNOWN_REGION)
}

/// Inquiry-type code for a free-text lead source ("Website form" -> `WB`).
pub fn inquiry_type_code(source: Option<&str>) -> &'static str {
    lookup(INQUIRY_TYPE_CODES, source, DEFAULT_INQUIRY_TYPE)
}

/// Owner initials: first letters of the first and last names, or the first
/// two letters of a single-word name.
///
/// Initials that are not alphanumeric become `X`, so a name like
/// `"Mary -Ann"` cannot put a dash into the ID.
pub fn owner_code(owner: Option<&str>) -> String {
    let tokens: Vec<&str> = owner.unwrap_or_default().split_whitespace().collect();

    let code: String = match tokens.as_slice() {
        [] => return UNKNOWN_OWNER.to_string(),
        [single] => {
            let mut chars = single.chars();
            let first = chars.next().unwrap_or('X');
            let second = chars.next().unwrap_or('X');
            [first, second].iter().collect()
        }
        [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
    };

    code.chars()
        .map(|c| if c.is_alphanumeric() { c } else { 'X' })
        .collect::<String>()
        .to_uppercase()
}
