/// Finds the item whose key is closest to `target`.
///
/// Items are scanned in order and an item only replaces the current best when
/// it is strictly closer, so ties resolve to the earliest item. Items whose key
/// is NaN never win. Returns `None` if no item has a comparable distance.
///
/// # Examples
///
/// ```
/// use somnus_stats::nearest::nearest_by;
///
/// let ladder = [(0.10, 6.0), (0.20, 7.0), (0.30, 8.0)];
/// // 7.5 is equally far from 7.0 and 8.0; the earlier entry wins
/// let (p, _) = nearest_by(ladder, 7.5, |&(_, q)| q).unwrap();
/// assert_eq!(p, 0.20);
/// ```
pub fn nearest_by<I, F>(items: I, target: f64, mut key: F) -> Option<I::Item>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> f64,
{
    let mut best: Option<(I::Item, f64)> = None;
    for item in items {
        let distance = (key(&item) - target).abs();
        if distance.is_nan() {
            continue;
        }
        if best
            .as_ref()
            .is_none_or(|(_, best_distance)| distance < *best_distance)
        {
            best = Some((item, distance));
        }
    }
    best.map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_closest() {
        let values = [4.0, 6.5, 9.0];
        assert_eq!(nearest_by(values, 6.0, |v| *v), Some(6.5));
        assert_eq!(nearest_by(values, 100.0, |v| *v), Some(9.0));
        assert_eq!(nearest_by(values, -3.0, |v| *v), Some(4.0));
    }

    #[test]
    fn test_tie_resolves_to_first() {
        let entries = [("low", 6.0), ("high", 8.0)];
        assert_eq!(nearest_by(entries, 7.0, |e| e.1).map(|e| e.0), Some("low"));
        let reversed = [("high", 8.0), ("low", 6.0)];
        assert_eq!(nearest_by(reversed, 7.0, |e| e.1).map(|e| e.0), Some("high"));
    }

    #[test]
    fn test_repeated_keys_keep_first() {
        let entries = [(1, 7.0), (2, 7.0), (3, 7.0)];
        assert_eq!(nearest_by(entries, 7.0, |e| e.1).map(|e| e.0), Some(1));
    }

    #[test]
    fn test_empty_and_nan() {
        assert_eq!(nearest_by(Vec::<f64>::new(), 1.0, |v| *v), None);
        assert_eq!(nearest_by([f64::NAN], 1.0, |v| *v), None);
        assert_eq!(nearest_by([f64::NAN, 2.0], 1.0, |v| *v), Some(2.0));
    }
}
