/// Duplicate detection for incoming leads
///
/// Two checks run in order:
/// 1. Phone: last 10 digits of the candidate equal those of an existing lead
/// 2. Company: normalized names contain one another or are within edit
///    distance 2
///
/// A phone match always wins; the company check only runs without one.
use crate::models::{DuplicateCheckResult, LeadRecord, NewLead, ReturningCustomer};

/// Significant length of a phone number.
pub const PHONE_DIGITS: usize = 10;

/// Company names closer than this edit distance are considered the same.
pub const COMPANY_DISTANCE_THRESHOLD: usize = 3;

/// Strips formatting and the country prefix: `+91 98765-43210` -> `9876543210`.
pub fn normalize_phone(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let start = digits.len().saturating_sub(PHONE_DIGITS);
    digits[start..].iter().collect()
}

/// Lower-cases and drops everything except `[a-z0-9]`.
pub fn normalize_company(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Levenshtein edit distance (unit-cost insert, delete, substitute).
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut curr = vec![0; a.len() + 1];

    for (j, cb) in b.iter().enumerate() {
        curr[0] = j + 1;
        for (i, ca) in a.iter().enumerate() {
            let substitution = prev[i] + usize::from(ca != cb);
            curr[i + 1] = substitution.min(prev[i + 1] + 1).min(curr[i] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[a.len()]
}

fn companies_match(candidate: &str, existing: &str) -> bool {
    existing.contains(candidate)
        || candidate.contains(existing)
        || levenshtein_distance(existing, candidate) < COMPANY_DISTANCE_THRESHOLD
}

/// Finds existing leads sharing the candidate's phone number.
pub fn detect_returning_customer(
    phone_number: Option<&str>,
    existing_leads: &[LeadRecord],
) -> ReturningCustomer {
    let Some(phone) = phone_number.filter(|p| !p.is_empty()) else {
        return ReturningCustomer::default();
    };

    let normalized = normalize_phone(phone);
    if normalized.len() != PHONE_DIGITS {
        return ReturningCustomer::default();
    }

    let matches: Vec<LeadRecord> = existing_leads
        .iter()
        .filter(|lead| {
            lead.client_number
                .as_deref()
                .map(normalize_phone)
                .is_some_and(|existing| existing == normalized)
        })
        .cloned()
        .collect();

    ReturningCustomer {
        is_returning: !matches.is_empty(),
        existing_lead_ids: matches
            .iter()
            .filter_map(|lead| lead.reference().map(str::to_string))
            .collect(),
        existing_leads: matches,
    }
}

/// Checks a new lead against existing ones by phone, then by company name.
pub fn detect_duplicate(
    new_lead: &NewLead,
    existing_leads: &[LeadRecord],
) -> DuplicateCheckResult {
    let phone_match =
        detect_returning_customer(new_lead.client_number.as_deref(), existing_leads);
    if phone_match.is_returning {
        tracing::info!(
            "📞 Phone match against {} existing lead(s): {:?}",
            phone_match.existing_leads.len(),
            phone_match.existing_lead_ids
        );
        return DuplicateCheckResult::phone_match(phone_match.existing_leads);
    }

    let candidate = new_lead
        .client_company
        .as_deref()
        .map(normalize_company)
        .unwrap_or_default();

    // A name with no alphanumerics would be contained in every company.
    if candidate.is_empty() {
        return DuplicateCheckResult::not_duplicate();
    }

    let matches: Vec<LeadRecord> = existing_leads
        .iter()
        .filter(|lead| {
            let existing = lead
                .client_company
                .as_deref()
                .map(normalize_company)
                .unwrap_or_default();
            !existing.is_empty() && companies_match(&candidate, &existing)
        })
        .cloned()
        .collect();

    if matches.is_empty() {
        tracing::debug!("No duplicate found for company '{}'", candidate);
        return DuplicateCheckResult::not_duplicate();
    }

    tracing::info!(
        "🏢 Similar company name '{}' found in {} existing lead(s)",
        candidate,
        matches.len()
    );
    DuplicateCheckResult::company_match(matches)
}
