//! Seeded number source.
//!
//! Every "random" value in a practice set is a pure hash of a key string, so
//! the same seed always reproduces the same questions. The hash is 32-bit
//! FNV-1a over UTF-16 code units with wrapping multiplication; other ports of
//! the generator must match this arithmetic bit for bit.

use chrono::{DateTime, Utc};
use uuid::Uuid;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1a over the UTF-16 code units of `input`.
pub fn fnv1a32(input: &str) -> u32 {
    input.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Map `key` to an integer in `[0, modulo)`.
///
/// The hash state is read as a signed 32-bit value and its absolute value is
/// reduced by `modulo`. A non-positive `modulo` behaves like `1`.
pub fn seeded_value(key: &str, modulo: i64) -> i64 {
    let modulo = modulo.max(1);
    let signed = fnv1a32(key) as i32;
    i64::from(signed).abs() % modulo
}

/// Map `key` to an integer in the inclusive range `[min, max]`.
///
/// Bounds are swapped when inverted, so a value is always produced.
pub fn seeded_in_range(key: &str, min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    lo + seeded_value(key, hi - lo + 1)
}

/// Keyed draws for one question of one practice set.
///
/// Each draw hashes `"{seed}|{template}|{index}|{salt}"`, so distinct salts
/// give uncorrelated values for the operands of the same question.
#[derive(Debug, Clone, Copy)]
pub struct QuestionDraws<'a> {
    seed: &'a str,
    template: &'a str,
    index: usize,
}

impl<'a> QuestionDraws<'a> {
    pub fn new(seed: &'a str, template: &'a str, index: usize) -> Self {
        Self {
            seed,
            template,
            index,
        }
    }

    /// Position of the question within its set (0-based).
    pub fn index(&self) -> usize {
        self.index
    }

    /// The full hash key for `salt`.
    pub fn key(&self, salt: &str) -> String {
        format!("{}|{}|{}|{}", self.seed, self.template, self.index, salt)
    }

    /// Draw an integer in `[min, max]` for `salt`.
    pub fn int(&self, salt: &str, min: i64, max: i64) -> i64 {
        seeded_in_range(&self.key(salt), min, max)
    }

    /// Draw an index in `[0, len)` for `salt`.
    pub fn choice(&self, salt: &str, len: usize) -> usize {
        seeded_value(&self.key(salt), len as i64) as usize
    }
}

/// Seed for a student's attempt at an assignment issued at `issued_at`.
pub fn attempt_seed(student_id: &str, assignment_id: &str, issued_at: DateTime<Utc>) -> String {
    format!(
        "{student_id}:{assignment_id}:{}",
        issued_at.timestamp_millis()
    )
}

/// A fresh random seed, for callers that want a new set on every attempt.
pub fn fresh_seed() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fnv1a32_reference_vectors() {
        assert_eq!(fnv1a32(""), 0x811c_9dc5);
        assert_eq!(fnv1a32("a"), 0xe40c_292c);
        assert_eq!(fnv1a32("foobar"), 0xbf9c_f968);
        assert_eq!(fnv1a32("abc"), 440_920_331);
    }

    #[test]
    fn seeded_value_vectors() {
        // "a" hashes to a negative i32 (-468965076); the absolute value is used.
        assert_eq!(seeded_value("a", 100), 76);
        assert_eq!(seeded_value("a", 7), 6);
        assert_eq!(seeded_value("abc", 100), 31);
        assert_eq!(seeded_value("abc", 7), 5);
        assert_eq!(seeded_value("foobar", 100), 76);
        assert_eq!(seeded_value("seed-42", 100), 35);
        assert_eq!(seeded_value("", 100), 35);
    }

    #[test]
    fn hashes_utf16_code_units() {
        assert_eq!(fnv1a32("é"), 1_812_687_940);
        assert_eq!(seeded_value("é", 100), 40);
    }

    #[test]
    fn non_positive_modulo_yields_zero() {
        assert_eq!(seeded_value("anything", 0), 0);
        assert_eq!(seeded_value("anything", -5), 0);
        assert_eq!(seeded_value("anything", 1), 0);
    }

    #[test]
    fn seeded_value_stays_in_range() {
        for i in 0..500 {
            let v = seeded_value(&format!("k{i}"), 13);
            assert!((0..13).contains(&v));
        }
    }

    #[test]
    fn in_range_handles_inverted_and_collapsed_bounds() {
        for i in 0..100 {
            let key = format!("r{i}");
            let v = seeded_in_range(&key, 9, 2);
            assert!((2..=9).contains(&v));
            assert_eq!(seeded_in_range(&key, 4, 4), 4);
            let neg = seeded_in_range(&key, -10, -3);
            assert!((-10..=-3).contains(&neg));
        }
    }

    #[test]
    fn draws_differ_by_salt_and_are_stable() {
        let draws = QuestionDraws::new("abc", "math-multiplication-facts", 0);
        assert_eq!(draws.key("left"), "abc|math-multiplication-facts|0|left");
        assert_eq!(draws.int("left", 0, 99), draws.int("left", 0, 99));
        let lefts: Vec<i64> = (0..20)
            .map(|i| QuestionDraws::new("abc", "t", i).int("left", 0, 1000))
            .collect();
        let rights: Vec<i64> = (0..20)
            .map(|i| QuestionDraws::new("abc", "t", i).int("right", 0, 1000))
            .collect();
        assert_ne!(lefts, rights);
    }

    #[test]
    fn attempt_seed_format() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            attempt_seed("stu-1", "asg-9", at),
            format!("stu-1:asg-9:{}", at.timestamp_millis())
        );
    }

    #[test]
    fn fresh_seeds_are_unique() {
        let a = fresh_seed();
        let b = fresh_seed();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }
}
