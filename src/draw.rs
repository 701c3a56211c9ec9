use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::error::{SantaError, SantaResult};
use crate::model::{Assignment, Id, Participant};

/// Draw secret friends for `participants`.
///
/// The ids are shuffled uniformly (Fisher–Yates) and each one gives to the
/// next in the shuffled order, wrapping around. A rotation by one never maps
/// an element to itself, so the result is a derangement for any n >= 2 with
/// no retry loop.
pub fn generate_assignments<R: Rng + ?Sized>(
    participants: &[Participant],
    rng: &mut R,
) -> SantaResult<Vec<Assignment>> {
    if participants.len() < 2 {
        return Err(SantaError::InsufficientParticipants {
            count: participants.len(),
        });
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for p in participants {
        if !seen.insert(&p.id) {
            return Err(SantaError::DuplicateParticipant {
                id: p.id.to_string(),
            });
        }
    }

    let mut order: Vec<Id<Participant>> = participants.iter().map(|p| p.id.clone()).collect();
    order.shuffle(rng);

    let n = order.len();
    Ok((0..n)
        .map(|i| Assignment::new(order[i].clone(), order[(i + 1) % n].clone()))
        .collect())
}

/// Build a memorable family code: the first three letters of the name,
/// upper-cased, followed by a number in 100..=999, capped at six characters.
pub fn generate_family_code<R: Rng + ?Sized>(family_name: &str, rng: &mut R) -> String {
    let prefix: String = family_name
        .to_ascii_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .take(3)
        .collect();
    let number: u16 = rng.gen_range(100..=999);
    let mut code = format!("{}{}", prefix, number);
    code.truncate(6);
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn people(names: &[&str]) -> Vec<Participant> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Participant::with_id(Id::new((i + 1).to_string()), n.to_string()))
            .collect()
    }

    #[test]
    fn same_seed_same_draw() {
        let ps = people(&["A", "B", "C", "D", "E"]);
        let a = generate_assignments(&ps, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate_assignments(&ps, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pairs_form_a_single_cycle() {
        let ps = people(&["A", "B", "C", "D", "E", "F"]);
        let pairs = generate_assignments(&ps, &mut StdRng::seed_from_u64(1)).unwrap();

        // Following giver -> receiver from any start visits everyone once.
        let start = pairs[0].giver_id.clone();
        let mut current = start.clone();
        let mut steps = 0;
        loop {
            let next = &pairs.iter().find(|a| a.giver_id == current).unwrap().receiver_id;
            current = next.clone();
            steps += 1;
            if current == start {
                break;
            }
        }
        assert_eq!(steps, ps.len());
    }

    #[test]
    fn family_code_uses_name_prefix() {
        let code = generate_family_code("Familia Perez", &mut StdRng::seed_from_u64(3));
        assert_eq!(code.len(), 6);
        assert!(code.starts_with("FAM"));
        assert!(code[3..].parse::<u16>().is_ok());
    }

    #[test]
    fn family_code_skips_non_letters() {
        let code = generate_family_code("  1 o-k ", &mut StdRng::seed_from_u64(3));
        assert!(code.starts_with("OK"));
        assert_eq!(code.len(), 5);
    }

    #[test]
    fn family_code_without_letters_is_just_digits() {
        let code = generate_family_code("2024", &mut StdRng::seed_from_u64(9));
        assert_eq!(code.len(), 3);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}
