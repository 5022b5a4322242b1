#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use episcope::algorithm::{AssociationTester, IncidenceMatrix, PairCount, count_pairs};
    use episcope::models::{ConsolidatedDiagnoses, ConsolidatedPatient, DiagnosisCatalog};
    use std::collections::HashMap;

    /// 100 patients: A00 in 40, B00 in 30, both in 20
    fn worked_example() -> IncidenceMatrix {
        let mut patients = Vec::new();
        for i in 0..100 {
            let codes3: Vec<String> = if i < 20 {
                vec!["A00".to_string(), "B00".to_string()]
            } else if i < 40 {
                vec!["A00".to_string()]
            } else if i < 50 {
                vec!["B00".to_string()]
            } else {
                Vec::new()
            };
            patients.push(ConsolidatedPatient {
                patient_id: format!("p{i:03}"),
                codes4: Vec::new(),
                codes3,
            });
        }

        let consolidated = ConsolidatedDiagnoses {
            patients,
            skipped_rows: 0,
            mentions4: Default::default(),
        };
        IncidenceMatrix::build(&consolidated, 10)
    }

    fn catalog() -> DiagnosisCatalog {
        let mut descriptions3 = HashMap::new();
        descriptions3.insert("A00".to_string(), "Colera".to_string());
        DiagnosisCatalog::from_maps(descriptions3, HashMap::new())
    }

    #[test]
    fn test_worked_example_counts() {
        let matrix = worked_example();
        assert_eq!(matrix.patient_count(), 100);
        assert_eq!(matrix.column_count(0), 40); // A00
        assert_eq!(matrix.column_count(1), 30); // B00

        let pairs = count_pairs(&matrix);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].count, 20);
    }

    #[test]
    fn test_worked_example_statistics() {
        let matrix = worked_example();
        let pairs = count_pairs(&matrix);
        let tester = AssociationTester::new().unwrap();

        let result = tester.test_pair(&pairs[0], &matrix, &catalog()).unwrap();

        assert_eq!(result.dx1, "A00");
        assert_eq!(result.dx2, "B00");
        assert_eq!(result.desc1, "Colera");
        assert_eq!(result.desc2, "No encontrado");
        assert_eq!(result.count_dx1, 40);
        assert_eq!(result.count_dx2, 30);
        assert_eq!(result.count_cooccurrence, 20);

        // corrected table: a=20.5, b=20.5, c=10.5, d=50.5
        assert_relative_eq!(result.chi2, 12.45931, epsilon = 1e-4);
        assert_relative_eq!(result.odds_ratio, 4.8095238, epsilon = 1e-6);
        assert_abs_diff_eq!(result.ci_lower, 1.948, epsilon = 5e-3);
        assert_abs_diff_eq!(result.ci_upper, 11.874, epsilon = 2e-2);

        // p-value for chi2 = 12.459 with one degree of freedom
        assert!(result.p_value > 1e-4 && result.p_value < 1e-3);

        assert_abs_diff_eq!(result.p_joint, 0.20, epsilon = 1e-12);
        assert_abs_diff_eq!(result.p_b_given_a, 0.5, epsilon = 1e-12);
        assert_relative_eq!(result.p_a_given_b, 2.0 / 3.0, epsilon = 1e-12);

        // adjusted p-value is attached later by the corrector
        assert!(result.p_value_adj.is_nan());
    }

    #[test]
    fn test_odds_ratio_is_positive_and_inside_ci() {
        let matrix = worked_example();
        let pairs = count_pairs(&matrix);
        let tester = AssociationTester::new().unwrap();

        let result = tester.test_pair(&pairs[0], &matrix, &catalog()).unwrap();
        assert!(result.odds_ratio > 0.0);
        assert!(result.ci_lower <= result.odds_ratio);
        assert!(result.odds_ratio <= result.ci_upper);
    }

    #[test]
    fn test_inconsistent_pair_is_skipped_not_fatal() {
        let matrix = worked_example();
        let tester = AssociationTester::new().unwrap();

        // count exceeds both column totals: impossible input
        let bogus = PairCount {
            i: 0,
            j: 1,
            count: 1000,
        };
        assert!(tester.test_pair(&bogus, &matrix, &catalog()).is_err());

        let results = tester.test_all(&[bogus], &matrix, &catalog());
        assert!(results.is_empty());
    }

    #[test]
    fn test_batch_output_preserves_pair_order() {
        // three diagnoses, all pairs co-occur
        let mut patients = Vec::new();
        for i in 0..30 {
            patients.push(ConsolidatedPatient {
                patient_id: format!("p{i:03}"),
                codes4: Vec::new(),
                codes3: vec!["A00".to_string(), "B00".to_string(), "C00".to_string()],
            });
        }
        let consolidated = ConsolidatedDiagnoses {
            patients,
            skipped_rows: 0,
            mentions4: Default::default(),
        };
        let matrix = IncidenceMatrix::build(&consolidated, 1);
        let pairs = count_pairs(&matrix);
        let tester = AssociationTester::new().unwrap();

        let results = tester.test_all(&pairs, &matrix, &catalog());
        let reported: Vec<(String, String)> = results
            .iter()
            .map(|r| (r.dx1.clone(), r.dx2.clone()))
            .collect();
        assert_eq!(
            reported,
            vec![
                ("A00".to_string(), "B00".to_string()),
                ("A00".to_string(), "C00".to_string()),
                ("B00".to_string(), "C00".to_string()),
            ]
        );
    }
}
