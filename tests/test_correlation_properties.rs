//! Property checks for the correlation engine over randomly generated survey data
//!
//! Each test draws seeded random answer columns (with skips) and verifies the
//! guarantees every result set must hold regardless of the data.

#[cfg(test)]
mod correlation_property_tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;
    use surveyflow::correlation_core::{
        pearson, CorrelationEngine, CorrelationResult, Direction, Observations, PairedSample,
        Strength, Variable,
    };

    const SEEDS: [u64; 6] = [1, 7, 42, 1337, 9001, 20240601];

    fn random_dataset(seed: u64) -> (Vec<Variable>, Observations) {
        let mut rng = StdRng::seed_from_u64(seed);
        let variable_count = rng.gen_range(2..=8);
        let respondents = rng.gen_range(0..=40);
        let skip_rate = rng.gen_range(0.0..0.6);

        let variables: Vec<Variable> = (0..variable_count)
            .map(|i| Variable::new(format!("v{}", i), format!("Variable {}", i)))
            .collect();

        let mut observations = Observations::new();
        for variable in &variables {
            let column = (0..respondents)
                .map(|_| {
                    if rng.gen_bool(skip_rate) {
                        None
                    } else {
                        Some(rng.gen_range(1..=7))
                    }
                })
                .collect();
            observations.insert_column(variable.id.clone(), column);
        }

        (variables, observations)
    }

    fn find<'a>(
        results: &'a [CorrelationResult],
        a: &str,
        b: &str,
    ) -> Option<&'a CorrelationResult> {
        results.iter().find(|r| {
            (r.variable1_id == a && r.variable2_id == b)
                || (r.variable1_id == b && r.variable2_id == a)
        })
    }

    #[test]
    fn test_coefficients_stay_within_bounds() {
        let engine = CorrelationEngine::with_defaults();

        for seed in SEEDS {
            let (variables, observations) = random_dataset(seed);
            let results = engine.compute_all(&variables, &observations).unwrap();

            for result in &results {
                if let Some(r) = result.coefficient {
                    assert!((-1.0..=1.0).contains(&r), "seed {}: r = {}", seed, r);
                } else {
                    assert!(
                        result.sample_size < 2,
                        "seed {}: absent r with n = {}",
                        seed,
                        result.sample_size
                    );
                    assert_eq!(result.strength, Strength::None);
                    assert_eq!(result.direction, Direction::None);
                }
            }
        }
    }

    #[test]
    fn test_scatter_counts_match_sample_size() {
        let engine = CorrelationEngine::with_defaults();

        for seed in SEEDS {
            let (variables, observations) = random_dataset(seed);
            let results = engine.compute_all(&variables, &observations).unwrap();

            for result in &results {
                assert!(result.sample_size > 0, "seed {}: empty pair reported", seed);

                let total: usize = result.scatter_points.iter().map(|p| p.count).sum();
                assert_eq!(total, result.sample_size, "seed {}", seed);

                let coordinates: HashSet<(u8, u8)> =
                    result.scatter_points.iter().map(|p| (p.x, p.y)).collect();
                assert_eq!(
                    coordinates.len(),
                    result.scatter_points.len(),
                    "seed {}: repeated coordinate",
                    seed
                );
                assert!(result.scatter_points.iter().all(|p| p.count > 0));
            }
        }
    }

    #[test]
    fn test_results_ranked_strongest_first() {
        let engine = CorrelationEngine::with_defaults();

        for seed in SEEDS {
            let (variables, observations) = random_dataset(seed);
            let results = engine.compute_all(&variables, &observations).unwrap();

            let first_absent = results
                .iter()
                .position(|r| r.coefficient.is_none())
                .unwrap_or(results.len());
            assert!(results[first_absent..].iter().all(|r| r.coefficient.is_none()));

            for window in results[..first_absent].windows(2) {
                let a = window[0].coefficient.unwrap().abs();
                let b = window[1].coefficient.unwrap().abs();
                assert!(a >= b, "seed {}: {} before {}", seed, a, b);
            }
        }
    }

    #[test]
    fn test_variable_order_does_not_change_coefficients() {
        let engine = CorrelationEngine::with_defaults();

        for seed in SEEDS {
            let (variables, observations) = random_dataset(seed);
            let mut reversed = variables.clone();
            reversed.reverse();

            let forward = engine.compute_all(&variables, &observations).unwrap();
            let backward = engine.compute_all(&reversed, &observations).unwrap();
            assert_eq!(forward.len(), backward.len());

            for result in &forward {
                let mirror = find(&backward, &result.variable1_id, &result.variable2_id).unwrap();
                assert_eq!(result.coefficient, mirror.coefficient, "seed {}", seed);
                assert_eq!(result.sample_size, mirror.sample_size);
                assert_eq!(result.strength, mirror.strength);
            }
        }
    }

    #[test]
    fn test_top_k_truncates_full_ranking() {
        let engine = CorrelationEngine::with_defaults();

        for seed in SEEDS {
            let (variables, observations) = random_dataset(seed);
            let all = engine.compute_all(&variables, &observations).unwrap();
            let max_pairs = variables.len() * (variables.len() - 1) / 2;
            assert!(all.len() <= max_pairs);

            for top_k in [1, 3, 5, 100] {
                let top = engine
                    .top_correlations(&variables, &observations, top_k)
                    .unwrap();
                assert_eq!(top.len(), all.len().min(top_k));
                assert_eq!(top[..], all[..top.len()]);
            }
        }
    }

    #[test]
    fn test_pearson_symmetric_in_arguments() {
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..50 {
            let n = rng.gen_range(2..30);
            let xs: Vec<u8> = (0..n).map(|_| rng.gen_range(1..=7)).collect();
            let ys: Vec<u8> = (0..n).map(|_| rng.gen_range(1..=7)).collect();

            let sample = PairedSample::from((xs, ys));
            assert_eq!(pearson(&sample), pearson(&sample.swapped()));
        }
    }

    #[test]
    fn test_overview_example_end_to_end() {
        let variables = vec![
            Variable::new("sleep", "Sleep"),
            Variable::new("mood", "Mood"),
            Variable::new("stress", "Stress"),
        ];
        let observations = Observations::new()
            .with_column("sleep", vec![Some(1), Some(3), Some(5), Some(7)])
            .with_column("mood", vec![Some(2), Some(4), Some(6), None])
            .with_column("stress", vec![Some(7), Some(5), Some(3), Some(1)]);

        let results = CorrelationEngine::with_defaults()
            .top_correlations(&variables, &observations, 5)
            .unwrap();

        assert_eq!(results.len(), 3);
        for result in &results {
            assert_eq!(result.strength, Strength::Strong);
        }
        assert_eq!(results[0].coefficient, Some(1.0));
        assert_eq!(results[0].sample_size, 3);

        let sleep_stress = find(&results, "sleep", "stress").unwrap();
        assert_eq!(sleep_stress.coefficient, Some(-1.0));
        assert_eq!(sleep_stress.direction, Direction::Negative);
        assert_eq!(sleep_stress.sample_size, 4);
    }
}
