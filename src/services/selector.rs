use rand::Rng;
use crate::models::session::{SearchSession, SelectionResult};

/// Uniformly random pick. `None` when there is nothing to pick from.
pub fn pick_one<T>(candidates: &[T]) -> Option<&T> {
    if candidates.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..candidates.len());
    candidates.get(index)
}

pub fn spin(session: &SearchSession) -> Option<SelectionResult> {
    pick_one(&session.candidates).map(|chosen| SelectionResult {
        chosen: chosen.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_picks_nothing() {
        let empty: Vec<u32> = Vec::new();
        assert!(pick_one(&empty).is_none());
    }

    #[test]
    fn single_element_is_always_picked() {
        let only = vec!["Luigi's"];
        for _ in 0..100 {
            assert_eq!(pick_one(&only), Some(&"Luigi's"));
        }
    }

    #[test]
    fn picks_are_roughly_uniform() {
        let items: Vec<usize> = (0..6).collect();
        let mut counts = [0usize; 6];
        for _ in 0..12_000 {
            let picked = pick_one(&items).unwrap();
            counts[*picked] += 1;
        }

        // expected 2000 each
        for count in counts {
            assert!((1600..=2400).contains(&count), "unexpected counts {:?}", counts);
        }
    }
}
