//! Property tests over arbitrary sequence pairs.

use dtwarp_core::{Dtw, Sequence};
use proptest::prelude::*;

fn sequence() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-100.0_f32..100.0, 1..40)
}

fn step_is_unit(a: (usize, usize), b: (usize, usize)) -> bool {
    matches!((b.0 - a.0, b.1 - a.1), (1, 0) | (0, 1) | (1, 1))
}

proptest! {
    #[test]
    fn distance_is_symmetric(x in sequence(), y in sequence()) {
        let dtw = Dtw::new();
        let x = Sequence::new(x).unwrap();
        let y = Sequence::new(y).unwrap();
        let xy = dtw.distance(x.as_view(), y.as_view()).value();
        let yx = dtw.distance(y.as_view(), x.as_view()).value();
        prop_assert_eq!(xy.to_bits(), yx.to_bits());
        prop_assert!(xy >= 0.0);
    }

    #[test]
    fn matrix_corner_matches_distance(x in sequence(), y in sequence()) {
        let dtw = Dtw::new();
        let x = Sequence::new(x).unwrap();
        let y = Sequence::new(y).unwrap();
        let d = dtw.distance(x.as_view(), y.as_view()).value();
        let corner = dtw.cost_matrix(x.as_view(), y.as_view()).get(x.len() - 1, y.len() - 1);
        prop_assert!((d - corner).abs() <= 1e-5 * d.max(corner).max(1.0));
    }

    #[test]
    fn swapped_matrix_is_transpose(x in sequence(), y in sequence()) {
        let dtw = Dtw::new();
        let x = Sequence::new(x).unwrap();
        let y = Sequence::new(y).unwrap();
        let xy = dtw.cost_matrix(x.as_view(), y.as_view());
        let yx = dtw.cost_matrix(y.as_view(), x.as_view()).transpose();
        prop_assert_eq!(xy.shape(), yx.shape());
        for (a, b) in xy.as_slice().iter().zip(yx.as_slice()) {
            prop_assert!((a - b).abs() <= 1e-5 * a.max(*b).max(1.0));
        }
    }

    #[test]
    fn path_invariants(x in sequence(), y in sequence()) {
        let dtw = Dtw::new();
        let (n, m) = (x.len(), y.len());
        let x = Sequence::new(x).unwrap();
        let y = Sequence::new(y).unwrap();
        let pairs = dtw.cost_matrix(x.as_view(), y.as_view()).path().unwrap().pairs();

        prop_assert_eq!(pairs.first().copied(), Some((0, 0)));
        prop_assert_eq!(pairs.last().copied(), Some((n - 1, m - 1)));
        prop_assert!(pairs.len() >= n.max(m));
        prop_assert!(pairs.len() <= n + m - 1);
        for w in pairs.windows(2) {
            prop_assert!(step_is_unit(w[0], w[1]), "bad step {:?} -> {:?}", w[0], w[1]);
        }
    }

    #[test]
    fn self_alignment_is_diagonal(x in sequence()) {
        let dtw = Dtw::new();
        let n = x.len();
        let x = Sequence::new(x).unwrap();
        prop_assert_eq!(dtw.distance(x.as_view(), x.as_view()).value(), 0.0);
        let pairs = dtw.cost_matrix(x.as_view(), x.as_view()).path().unwrap().pairs();
        let diagonal: Vec<(usize, usize)> = (0..n).map(|k| (k, k)).collect();
        prop_assert_eq!(pairs, diagonal);
    }
}
