//! Property tests for statistics, quantiles and p-values

use normgof_stats::{
    anderson_darling, p_value, parzen_quantile, EdfTest, Modifications, NullCdf,
};
use proptest::prelude::*;

/// Sorted values strictly inside (0, 1)
fn u01_sample(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.001f64..0.999, 1..max_len).prop_map(|mut v| {
        v.sort_by(f64::total_cmp);
        v
    })
}

/// Sorted values drawn from a small set so ties are common
fn tied_sample() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0i32..6, 1..30).prop_map(|v| {
        let mut v: Vec<f64> = v.into_iter().map(f64::from).collect();
        v.sort_by(f64::total_cmp);
        v
    })
}

fn all_modifications() -> [Modifications; 4] {
    [
        Modifications::empty(),
        Modifications::FINITE_N,
        Modifications::ESTIMATES,
        Modifications::all(),
    ]
}

proptest! {
    #[test]
    fn base_statistics_are_non_negative(ps in u01_sample(60)) {
        for test in EdfTest::ALL {
            let value = test.statistic(&ps, Modifications::empty()).unwrap();
            prop_assert!(value >= 0.0, "{} = {}", test, value);
        }
    }

    #[test]
    fn correction_ratio_depends_only_on_n(
        (a, b) in (2usize..40).prop_flat_map(|n| (
            prop::collection::vec(0.001f64..0.999, n),
            prop::collection::vec(0.001f64..0.999, n),
        ))
    ) {
        let mut a = a;
        let mut b = b;
        a.sort_by(f64::total_cmp);
        b.sort_by(f64::total_cmp);

        for test in EdfTest::ALL {
            let base_a = test.statistic(&a, Modifications::empty()).unwrap();
            let base_b = test.statistic(&b, Modifications::empty()).unwrap();
            for mods in all_modifications() {
                let ratio_a = test.statistic(&a, mods).unwrap() / base_a;
                let ratio_b = test.statistic(&b, mods).unwrap() / base_b;
                prop_assert!((ratio_a - ratio_b).abs() <= 1e-9 * ratio_a.abs());
            }
        }
    }

    #[test]
    fn anderson_darling_ignores_finite_n(ps in u01_sample(60)) {
        let plain = anderson_darling(&ps, Modifications::empty()).unwrap();
        prop_assert_eq!(anderson_darling(&ps, Modifications::FINITE_N).unwrap(), plain);
        prop_assert_eq!(
            anderson_darling(&ps, Modifications::all()).unwrap(),
            anderson_darling(&ps, Modifications::ESTIMATES).unwrap()
        );
    }

    #[test]
    fn quantile_endpoints_are_extremes(sample in prop::collection::vec(-1e6f64..1e6, 1..50)) {
        let mut sorted = sample;
        sorted.sort_by(f64::total_cmp);
        prop_assert_eq!(parzen_quantile(&sorted, 0.0).unwrap(), sorted[0]);
        prop_assert_eq!(parzen_quantile(&sorted, 1.0).unwrap(), sorted[sorted.len() - 1]);
    }

    #[test]
    fn quantile_is_monotone(sorted in tied_sample(), p1 in 0.0f64..=1.0, p2 in 0.0f64..=1.0) {
        let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        let q_lo = parzen_quantile(&sorted, lo).unwrap();
        let q_hi = parzen_quantile(&sorted, hi).unwrap();
        prop_assert!(q_lo <= q_hi + 1e-9, "q({}) = {} > q({}) = {}", lo, q_lo, hi, q_hi);
        prop_assert!(q_lo >= sorted[0] && q_hi <= sorted[sorted.len() - 1]);
    }

    #[test]
    fn p_value_in_unit_interval(
        values in prop::collection::vec(-100f64..100.0, 1..100),
        statistic in -200f64..200.0,
    ) {
        let cdf = NullCdf::from_values(values).unwrap();
        let p = cdf.p_value(statistic);
        prop_assert!((0.0..=1.0).contains(&p));

        let first = cdf.values()[0];
        let last = cdf.values()[cdf.len() - 1];
        prop_assert_eq!(p_value(cdf.values(), first - 1.0), 0.0);
        prop_assert_eq!(p_value(cdf.values(), last), 1.0);
    }
}
