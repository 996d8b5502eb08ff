//! Fake data source.
//!
//! Wraps a seedable RNG and the `fake` crate's name and lorem generators so
//! every entity generator draws from the same explicit random stream.

use crate::config::EmailDomain;
use chrono::{Days, Months, NaiveDate};
use fake::faker::lorem::en::{Paragraph, Word};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::Rng;

/// Fake data generator with deterministic RNG
pub struct FakeData<R: Rng> {
    rng: R,
}

impl<R: Rng> FakeData<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a random first name
    pub fn first_name(&mut self) -> String {
        FirstName().fake_with_rng(&mut self.rng)
    }

    /// Generate a random last name
    pub fn last_name(&mut self) -> String {
        LastName().fake_with_rng(&mut self.rng)
    }

    /// Draw an ID from `[1, space]`. Callers validate that `space > 0`.
    pub fn id_in(&mut self, space: usize) -> i64 {
        self.rng.random_range(1..=space as i64)
    }

    /// Generate paragraph text capped at `max_chars` characters
    pub fn text(&mut self, max_chars: usize) -> String {
        let paragraph: String = Paragraph(3..6).fake_with_rng(&mut self.rng);
        truncate_chars(&paragraph, max_chars)
    }

    /// Generate a single lowercase word
    pub fn word(&mut self) -> String {
        let word: String = Word().fake_with_rng(&mut self.rng);
        word.to_lowercase()
    }

    /// Generate a 10-digit phone number without separators
    pub fn phone_number(&mut self) -> String {
        self.rng
            .random_range(2_000_000_000u64..=9_999_999_999)
            .to_string()
    }

    /// Generate a birthday for someone aged `min_age..=max_age` on `today`
    pub fn date_of_birth(&mut self, today: NaiveDate, min_age: u32, max_age: u32) -> NaiveDate {
        let latest = years_before(today, min_age).unwrap_or(today);
        // The day after the (max_age + 1)th birthday is the earliest date
        // that still makes someone max_age years old.
        let earliest = max_age
            .checked_add(1)
            .and_then(|years| years_before(today, years))
            .and_then(|d| d.succ_opt())
            .unwrap_or(latest);

        let span = latest.signed_duration_since(earliest).num_days().max(0) as u64;
        let offset = self.rng.random_range(0..=span);
        earliest.checked_add_days(Days::new(offset)).unwrap_or(earliest)
    }

    /// Pick a domain with probability proportional to its weight
    pub fn email_domain<'a>(&mut self, domains: &'a [EmailDomain]) -> &'a str {
        let total: u64 = domains.iter().map(|d| u64::from(d.weight)).sum();
        let mut roll = self.rng.random_range(0..total);
        for d in domains {
            let weight = u64::from(d.weight);
            if roll < weight {
                return &d.domain;
            }
            roll -= weight;
        }
        // Unreachable when total > 0; validate() guarantees a positive weight.
        &domains[domains.len() - 1].domain
    }
}

/// `today` moved back by whole years, or `None` when out of range
fn years_before(today: NaiveDate, years: u32) -> Option<NaiveDate> {
    let months = years.checked_mul(12)?;
    today.checked_sub_months(Months::new(months))
}

/// Keep at most `max_chars` characters, cutting on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fake(seed: u64) -> FakeData<ChaCha8Rng> {
        FakeData::new(ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_deterministic_generation() {
        let mut fake1 = fake(42);
        let mut fake2 = fake(42);

        assert_eq!(fake1.first_name(), fake2.first_name());
        assert_eq!(fake1.text(280), fake2.text(280));
        assert_eq!(fake1.phone_number(), fake2.phone_number());
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn test_text_respects_cap() {
        let mut fake = fake(7);
        for _ in 0..200 {
            assert!(fake.text(280).chars().count() <= 280);
        }
        assert!(fake.text(10).chars().count() <= 10);
    }

    #[test]
    fn test_phone_number_is_ten_digits() {
        let mut fake = fake(1);
        for _ in 0..100 {
            let phone = fake.phone_number();
            assert_eq!(phone.len(), 10);
            assert!(phone.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_id_in_bounds() {
        let mut fake = fake(3);
        for _ in 0..1000 {
            let id = fake.id_in(5);
            assert!((1..=5).contains(&id));
        }
        assert_eq!(fake.id_in(1), 1);
    }

    #[test]
    fn test_date_of_birth_age_range() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let oldest = NaiveDate::from_ymd_opt(1973, 6, 16).unwrap();
        let youngest = NaiveDate::from_ymd_opt(2011, 6, 15).unwrap();

        let mut fake = fake(9);
        for _ in 0..500 {
            let dob = fake.date_of_birth(today, 13, 50);
            assert!(dob >= oldest && dob <= youngest, "{dob} out of range");
        }
    }

    #[test]
    fn test_date_of_birth_oversized_age_does_not_overflow() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let youngest = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();

        let mut fake = fake(4);
        let dob = fake.date_of_birth(today, 13, 400_000_000);
        assert!(dob <= youngest);
        let dob = fake.date_of_birth(today, u32::MAX, u32::MAX);
        assert_eq!(dob, today);
    }

    #[test]
    fn test_word_is_lowercase() {
        let mut fake = fake(11);
        for _ in 0..50 {
            let word = fake.word();
            assert!(!word.is_empty());
            assert_eq!(word, word.to_lowercase());
            assert!(!word.contains(' '));
        }
    }

    #[test]
    fn test_email_domain_weights() {
        let domains = vec![
            EmailDomain::new("gmail.com", 2),
            EmailDomain::new("yahoo.com", 1),
            EmailDomain::new("hotmail.com", 0),
        ];
        let mut fake = fake(5);
        let mut gmail = 0;
        for _ in 0..3000 {
            match fake.email_domain(&domains) {
                "gmail.com" => gmail += 1,
                "yahoo.com" => {}
                other => panic!("zero-weight domain picked: {other}"),
            }
        }
        let ratio = gmail as f64 / 3000.0;
        assert!((0.6..0.73).contains(&ratio), "gmail ratio {ratio}");
    }
}
