// crates/qualreg-scenarios/src/data.rs
// ============================================================================
// Module: Payload Fabrication
// Description: Random but valid request payload values.
// Purpose: Fabricate create payloads the service accepts, per virtual user.
// Dependencies: rand
// ============================================================================

//! ## Overview
//! Pure functions over a caller-supplied RNG so every virtual user
//! fabricates independent payloads. Values stay within what the service
//! validates: KVK numbers are eight digits, names stay inside column
//! limits, descriptions are sentence-shaped.

use rand::Rng;

/// Surname-style first components for fabricated company names.
const COMPANY_STEMS: [&str; 8] =
    ["Veldkamp", "Bakker", "De Vries", "Jansen", "Peters", "Van Dijk", "Smits", "Hendriks"];
/// Sector components for fabricated company names.
const COMPANY_SECTORS: [&str; 6] = ["Zorg", "Informatica", "Medisch", "Software", "Data", "ICT"];
/// Legal-form suffixes for fabricated company names.
const COMPANY_SUFFIXES: [&str; 4] = ["B.V.", "Groep", "Systemen", "Holding"];
/// Word pool for fabricated descriptions.
const DESCRIPTION_WORDS: [&str; 12] = [
    "register", "koppeling", "versie", "kwalificatie", "toetsing", "standaard", "gegevens",
    "uitwisseling", "protocol", "leverancier", "applicatie", "beheer",
];

/// Fabricates an eight-digit KVK number.
pub fn kvk_number(rng: &mut impl Rng) -> String {
    rng.gen_range(10_000_000..=99_999_999u32).to_string()
}

/// Fabricates a company-style name.
pub fn company_name(rng: &mut impl Rng) -> String {
    let stem = COMPANY_STEMS[rng.gen_range(0..COMPANY_STEMS.len())];
    let sector = COMPANY_SECTORS[rng.gen_range(0..COMPANY_SECTORS.len())];
    let suffix = COMPANY_SUFFIXES[rng.gen_range(0..COMPANY_SUFFIXES.len())];
    format!("{stem} {sector} {suffix}")
}

/// Fabricates a random alphabetic name of the given length.
pub fn alpha_name(rng: &mut impl Rng, length: usize) -> String {
    (0..length)
        .map(|_| {
            let offset = rng.gen_range(0..26u8);
            char::from(b'a' + offset)
        })
        .collect()
}

/// Fabricates a sentence-shaped description.
pub fn sentence(rng: &mut impl Rng) -> String {
    let word_count = rng.gen_range(6..=12);
    let mut words: Vec<&str> = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        words.push(DESCRIPTION_WORDS[rng.gen_range(0..DESCRIPTION_WORDS.len())]);
    }
    let mut text = words.join(" ");
    if let Some(first) = text.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    text.push('.');
    text
}

/// Fabricates a semantic version string.
pub fn version_string(rng: &mut impl Rng) -> String {
    format!("v{}.{}.{}", rng.gen_range(1..=9), rng.gen_range(0..=9), rng.gen_range(0..=20))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
