#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use episcope::algorithm::{attach_adjusted, benjamini_hochberg};
    use episcope::models::AssociationResult;

    fn result_with_p(dx1: &str, p_value: f64) -> AssociationResult {
        AssociationResult {
            dx1: dx1.to_string(),
            desc1: "No encontrado".to_string(),
            dx2: "X99".to_string(),
            desc2: "No encontrado".to_string(),
            chi2: 0.0,
            p_value,
            odds_ratio: 1.0,
            ci_lower: 1.0,
            ci_upper: 1.0,
            count_dx1: 10,
            count_dx2: 10,
            count_cooccurrence: 5,
            p_joint: 0.05,
            p_b_given_a: 0.5,
            p_a_given_b: 0.5,
            p_value_adj: f64::NAN,
        }
    }

    #[test]
    fn test_adjusted_values_map_back_by_position() {
        let mut results = vec![
            result_with_p("A00", 0.01),
            result_with_p("B00", 0.04),
            result_with_p("C00", 0.03),
            result_with_p("D00", 0.005),
        ];

        attach_adjusted(&mut results);

        // position pairing: each result keeps its own adjusted value
        assert_abs_diff_eq!(results[0].p_value_adj, 0.02, epsilon = 1e-12);
        assert_abs_diff_eq!(results[1].p_value_adj, 0.04, epsilon = 1e-12);
        assert_abs_diff_eq!(results[2].p_value_adj, 0.04, epsilon = 1e-12);
        assert_abs_diff_eq!(results[3].p_value_adj, 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_no_result_is_dropped_by_correction() {
        let mut results: Vec<AssociationResult> = (0..25)
            .map(|i| result_with_p(&format!("A{i:02}"), f64::from(i + 1) * 0.03))
            .collect();

        attach_adjusted(&mut results);

        assert_eq!(results.len(), 25);
        for result in &results {
            assert!(result.p_value_adj.is_finite());
            assert!(result.p_value_adj >= result.p_value);
            assert!(result.p_value_adj <= 1.0);
        }
    }

    #[test]
    fn test_adjusted_monotone_in_raw_p() {
        let p_values: Vec<f64> = vec![0.2, 0.001, 0.5, 0.03, 0.0004, 0.9];
        let adjusted = benjamini_hochberg(&p_values);

        let mut indexed: Vec<(f64, f64)> = p_values
            .iter()
            .copied()
            .zip(adjusted.iter().copied())
            .collect();
        indexed.sort_unstable_by(|left, right| left.0.partial_cmp(&right.0).unwrap());

        for window in indexed.windows(2) {
            assert!(window[0].1 <= window[1].1);
        }
    }

    #[test]
    fn test_empty_result_set_is_a_no_op() {
        let mut results: Vec<AssociationResult> = Vec::new();
        attach_adjusted(&mut results);
        assert!(results.is_empty());
    }
}
