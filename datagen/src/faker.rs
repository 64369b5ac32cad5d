//! Synthetic employee data.

use entity::NewEmployee;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::positions::PositionIds;

pub const MIN_SALARY: i64 = 1;
pub const MAX_SALARY: i64 = 99_999;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Alice", "Amara", "Bruno", "Carmen", "Chen", "Dmitri", "Elena", "Emil",
    "Farah", "Felix", "Grace", "Hana", "Hugo", "Ines", "Ivan", "Jonas", "Julia", "Kenji",
    "Lara", "Leo", "Maya", "Mateo", "Nadia", "Noah", "Olga", "Omar", "Priya", "Quinn",
    "Rosa", "Sam", "Sofia", "Tariq", "Uma", "Victor", "Wen", "Yara", "Yusuf", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Bauer", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Hansen",
    "Ivanova", "Jones", "Kowalski", "Larsen", "Martin", "Nakamura", "Novak", "Okafor",
    "Petrov", "Quinn", "Rossi", "Schmidt", "Silva", "Smith", "Smyth", "Tanaka", "Urban",
    "Varga", "Weber", "Williams", "Xu", "Yilmaz", "Zhang", "Zimmermann",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.net", "example.org", "corp.test"];

/// Random employees; reproducible when built from a seed.
pub struct EmployeeFaker {
    rng: StdRng,
}

impl EmployeeFaker {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn employee(&mut self, positions: &PositionIds) -> NewEmployee {
        let first_name = self.pick(FIRST_NAMES);
        let last_name = self.pick(LAST_NAMES);
        let email = format!(
            "{}.{}{}@{}",
            first_name.to_ascii_lowercase(),
            last_name.to_ascii_lowercase(),
            self.rng.gen_range(1..10_000),
            self.pick(EMAIL_DOMAINS),
        );
        NewEmployee {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            salary: self.rng.gen_range(MIN_SALARY..=MAX_SALARY),
            position_id: positions.choose(&mut self.rng),
            email,
        }
    }

    pub fn employees(&mut self, count: usize, positions: &PositionIds) -> Vec<NewEmployee> {
        (0..count).map(|_| self.employee(positions)).collect()
    }

    fn pick(&mut self, pool: &[&'static str]) -> &'static str {
        pool.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions() -> PositionIds {
        PositionIds::new(vec![3, 5, 8, 13]).unwrap()
    }

    #[test]
    fn generated_values_stay_in_range() {
        let mut faker = EmployeeFaker::new(Some(7));
        let positions = positions();
        for emp in faker.employees(2_000, &positions) {
            assert!((MIN_SALARY..=MAX_SALARY).contains(&emp.salary));
            assert!(positions.as_slice().contains(&emp.position_id));
            assert!(!emp.first_name.is_empty());
            assert!(!emp.last_name.is_empty());
            assert!(emp.email.contains('@'));
        }
    }

    #[test]
    fn same_seed_same_rows() {
        let positions = positions();
        let a = EmployeeFaker::new(Some(42)).employees(50, &positions);
        let b = EmployeeFaker::new(Some(42)).employees(50, &positions);
        assert_eq!(a, b);
    }

    #[test]
    fn every_position_gets_picked_eventually() {
        let positions = positions();
        let rows = EmployeeFaker::new(Some(1)).employees(500, &positions);
        for id in positions.as_slice() {
            assert!(rows.iter().any(|emp| emp.position_id == *id), "position {id} never chosen");
        }
    }
}
