use crate::Pick;
use std::collections::HashSet;

/// Rival picks whose player is not in `my_picks`, in the rival's order.
pub fn find_differentials(my_picks: &[Pick], rival_picks: &[Pick]) -> Vec<Pick> {
    let mine: HashSet<u32> = my_picks.iter().map(|p| p.element).collect();
    rival_picks
        .iter()
        .filter(|p| !mine.contains(&p.element))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picks(ids: &[u32]) -> Vec<Pick> {
        ids.iter()
            .enumerate()
            .map(|(i, &element)| Pick { element, position: i as u8 + 1, ..Default::default() })
            .collect()
    }

    fn ids(picks: &[Pick]) -> Vec<u32> {
        picks.iter().map(|p| p.element).collect()
    }

    #[test]
    fn keeps_rival_only_players_in_order() {
        let mine = picks(&[1, 2, 3, 4]);
        let rival = picks(&[9, 2, 7, 4, 5]);
        assert_eq!(ids(&find_differentials(&mine, &rival)), vec![9, 7, 5]);
    }

    #[test]
    fn is_not_symmetric() {
        let a = picks(&[1, 2, 3]);
        let b = picks(&[3, 4]);
        assert_eq!(ids(&find_differentials(&a, &b)), vec![4]);
        assert_eq!(ids(&find_differentials(&b, &a)), vec![1, 2]);
    }

    #[test]
    fn repeated_calls_agree() {
        let a = picks(&[1, 2, 3]);
        let b = picks(&[5, 3, 6, 1]);
        assert_eq!(find_differentials(&a, &b), find_differentials(&a, &b));
    }

    #[test]
    fn identical_squads_have_no_differentials() {
        let a = picks(&[1, 2, 3]);
        assert!(find_differentials(&a, &a).is_empty());
        assert_eq!(ids(&find_differentials(&[], &a)), vec![1, 2, 3]);
    }
}
