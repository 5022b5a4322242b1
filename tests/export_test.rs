#[cfg(test)]
mod tests {
    use arrow::array::{Array, Float64Array, Int64Array, ListArray, StringArray};
    use episcope::algorithm::DiagnosisFrequency;
    use episcope::export::{
        associations_to_batch, consolidated_to_batch, frequencies_to_batch,
        significant_associations,
    };
    use episcope::models::{AssociationResult, ConsolidatedDiagnoses, ConsolidatedPatient};
    use episcope::utils::{read_parquet, write_parquet};

    fn sample_result(p_value: f64, p_value_adj: f64) -> AssociationResult {
        AssociationResult {
            dx1: "A00".to_string(),
            desc1: "Colera".to_string(),
            dx2: "B00".to_string(),
            desc2: "No encontrado".to_string(),
            chi2: 12.4593143,
            p_value,
            odds_ratio: 4.8095238,
            ci_lower: 1.9481581,
            ci_upper: 11.8735905,
            count_dx1: 40,
            count_dx2: 30,
            count_cooccurrence: 20,
            p_joint: 0.2,
            p_b_given_a: 0.5,
            p_a_given_b: 2.0 / 3.0,
            p_value_adj,
        }
    }

    #[test]
    fn test_association_export_contract() {
        let batch = associations_to_batch(&[sample_result(4.16e-4, 4.16e-4)]).unwrap();

        let schema = batch.schema();
        let names: Vec<&str> = schema
            .fields()
            .iter()
            .map(|field| field.name().as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Dx1",
                "Desc1",
                "Dx2",
                "Desc2",
                "Chi2",
                "p_value",
                "OR",
                "IC95_Lower",
                "IC95_Upper",
                "count_dx1",
                "count_dx2",
                "count_coocurrence",
                "P_conjunta",
                "P_B_dado_A",
                "P_A_dado_B",
                "p_value_adj",
            ]
        );
        assert_eq!(batch.num_rows(), 1);
    }

    #[test]
    fn test_export_rounds_reporting_fields() {
        let batch = associations_to_batch(&[sample_result(0.000416123, 0.000416123)]).unwrap();

        let chi2 = batch
            .column(4)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(chi2.value(0), 12.459);

        let odds_ratio = batch
            .column(6)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(odds_ratio.value(0), 4.81);

        // the raw p-value keeps full precision
        let p_value = batch
            .column(5)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(p_value.value(0), 0.000416123);

        let p_a_given_b = batch
            .column(14)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(p_a_given_b.value(0), 0.66667);

        let counts = batch
            .column(11)
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(counts.value(0), 20);
    }

    #[test]
    fn test_significance_filter() {
        let results = vec![
            sample_result(0.001, 0.002),
            sample_result(0.02, 0.08),
            sample_result(0.01, 0.0499),
        ];

        let significant = significant_associations(&results, 0.05);
        assert_eq!(significant.len(), 2);
        assert!(significant.iter().all(|r| r.p_value_adj < 0.05));
    }

    #[test]
    fn test_consolidated_export_shape() {
        let consolidated = ConsolidatedDiagnoses {
            patients: vec![
                ConsolidatedPatient {
                    patient_id: "PAC00001".to_string(),
                    codes4: vec!["E119".to_string(), "I10".to_string()],
                    codes3: vec!["E11".to_string(), "I10".to_string()],
                },
                ConsolidatedPatient {
                    patient_id: "PAC00002".to_string(),
                    codes4: vec![],
                    codes3: vec![],
                },
            ],
            skipped_rows: 0,
            mentions4: Default::default(),
        };

        let batch = consolidated_to_batch(&consolidated).unwrap();
        assert_eq!(batch.num_rows(), 2);

        let ids = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(ids.value(0), "PAC00001");

        let lists = batch
            .column(1)
            .as_any()
            .downcast_ref::<ListArray>()
            .unwrap();
        let first = lists.value(0);
        let first_codes = first.as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(first_codes.len(), 2);
        assert_eq!(first_codes.value(0), "E119");
        assert_eq!(first_codes.value(1), "I10");
        assert_eq!(lists.value(1).len(), 0);
    }

    #[test]
    fn test_frequency_export_contract() {
        let frequencies = vec![DiagnosisFrequency {
            code: "E119".to_string(),
            mentions: 12,
            patients: 9,
            description4: "Diabetes mellitus tipo 2".to_string(),
            description3: "Diabetes mellitus".to_string(),
        }];

        let batch = frequencies_to_batch(&frequencies).unwrap();
        let schema = batch.schema();
        let names: Vec<&str> = schema
            .fields()
            .iter()
            .map(|field| field.name().as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Diagnostico",
                "Frecuencia",
                "Pacientes",
                "Descripcion_4dig",
                "Descripcion_3dig",
            ]
        );

        let mentions = batch
            .column(1)
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(mentions.value(0), 12);
    }

    #[test]
    fn test_parquet_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("associations.parquet");

        let batch = associations_to_batch(&[sample_result(0.001, 0.004)]).unwrap();
        write_parquet(&batch, &path).unwrap();

        let read_back = read_parquet(&path).unwrap();
        assert_eq!(read_back.len(), 1);
        assert_eq!(read_back[0], batch);
    }
}
