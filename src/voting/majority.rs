use crate::models::MajorityMethod;

/// Rounds the computed share of the base up, optionally adding one vote.
pub fn calc_majority(value: f64, add_one: bool) -> f64 {
    value.ceil() + if add_one { 1.0 } else { 0.0 }
}

impl MajorityMethod {
    pub const ALL: [MajorityMethod; 4] = [
        MajorityMethod::Simple,
        MajorityMethod::TwoThirds,
        MajorityMethod::ThreeQuarters,
        MajorityMethod::Disabled,
    ];

    pub fn value(self) -> &'static str {
        match self {
            MajorityMethod::Simple => "simple_majority",
            MajorityMethod::TwoThirds => "two-thirds_majority",
            MajorityMethod::ThreeQuarters => "three-quarters_majority",
            MajorityMethod::Disabled => "disabled",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MajorityMethod::Simple => "Simple majority",
            MajorityMethod::TwoThirds => "Two-thirds majority",
            MajorityMethod::ThreeQuarters => "Three-quarters majority",
            MajorityMethod::Disabled => "Disabled",
        }
    }

    /// Number of votes an option needs to pass, or `None` when disabled.
    pub fn calc(self, base: f64) -> Option<f64> {
        match self {
            MajorityMethod::Simple => Some(calc_majority(base / 2.0, true)),
            MajorityMethod::TwoThirds => Some(calc_majority(base * 2.0 / 3.0, false)),
            MajorityMethod::ThreeQuarters => Some(calc_majority(base * 3.0 / 4.0, false)),
            MajorityMethod::Disabled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn thresholds_per_method() {
        assert_eq!(MajorityMethod::Simple.calc(10.0), Some(6.0));
        assert_eq!(MajorityMethod::Simple.calc(9.0), Some(6.0));
        assert_eq!(MajorityMethod::TwoThirds.calc(10.0), Some(7.0));
        assert_eq!(MajorityMethod::ThreeQuarters.calc(10.0), Some(8.0));
        assert_eq!(MajorityMethod::Disabled.calc(10.0), None);
    }

    #[test]
    fn zero_base_needs_zero_or_one() {
        assert_eq!(MajorityMethod::Simple.calc(0.0), Some(1.0));
        assert_eq!(MajorityMethod::TwoThirds.calc(0.0), Some(0.0));
        assert_eq!(MajorityMethod::ThreeQuarters.calc(0.0), Some(0.0));
    }

    #[test]
    fn values_match_wire_names() {
        for method in MajorityMethod::ALL {
            let wire = serde_json::to_value(method).unwrap();
            assert_eq!(wire, method.value());
        }
    }

    proptest! {
        #[test]
        fn calc_majority_rounds_up(x in 0.0f64..1_000_000.0) {
            prop_assert_eq!(calc_majority(x, false), x.ceil());
            prop_assert_eq!(calc_majority(x, true), x.ceil() + 1.0);
        }
    }
}
