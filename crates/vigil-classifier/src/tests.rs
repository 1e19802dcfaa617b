//! Integration tests for the Batch Classifier

#[cfg(test)]
mod tests {
    use crate::{Classifier, ClassifierConfig, NeverRetry, ScriptedRetry};
    use proptest::prelude::*;
    use std::time::Duration;
    use vigil_domain::traits::BatchClassifier;
    use vigil_domain::{ManualClock, OffenseType, Verdict};
    use vigil_llm::MockProvider;
    use vigil_prefilter::ProfanityFilter;

    fn verdicts_json(n: usize) -> String {
        let items: Vec<String> = (0..n)
            .map(|i| {
                format!(
                    r#"{{"is_offensive": true, "offense_type": "profanity", "explanation": "hit {}", "severity": 0.5}}"#,
                    i
                )
            })
            .collect();
        format!("[{}]", items.join(","))
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|t| t.to_string()).collect()
    }

    fn classifier(
        llm: MockProvider,
        prefilter: ProfanityFilter,
        clock: ManualClock,
    ) -> Classifier<MockProvider, ManualClock> {
        Classifier::new(llm, prefilter, ClassifierConfig::default(), clock).unwrap()
    }

    #[test]
    fn test_clean_batch_short_circuits() {
        let llm = MockProvider::default();
        let mut classifier = classifier(llm.clone(), ProfanityFilter::default(), ManualClock::default());

        let out = classifier.process_batch(&texts(&["good morning", "nice photo", "see you"]));

        assert_eq!(out, vec![Verdict::prefilter_clean(); 3]);
        assert_eq!(llm.call_count(), 0);
        assert_eq!(classifier.stats().short_circuited, 1);
        assert_eq!(classifier.quota().daily_count(), 0);
    }

    #[test]
    fn test_empty_batch_returns_empty() {
        let llm = MockProvider::default();
        let mut classifier = classifier(llm.clone(), ProfanityFilter::default(), ManualClock::default());

        let empty: Vec<String> = Vec::new();
        assert!(classifier.process_batch(&empty).is_empty());
        assert_eq!(llm.call_count(), 0);
        assert_eq!(classifier.stats().batches, 0);
    }

    #[test]
    fn test_mixed_batch_reconciles_by_position() {
        let llm = MockProvider::new(verdicts_json(2));
        let mut classifier = classifier(llm.clone(), ProfanityFilter::default(), ManualClock::default());

        let batch = texts(&["hello there", "what the fuck", "lovely day", "damn it"]);
        let out = classifier.process_batch(&batch);

        assert_eq!(out.len(), 4);
        assert_eq!(out[0], Verdict::prefilter_clean());
        assert_eq!(out[1].explanation, "hit 0");
        assert_eq!(out[2], Verdict::prefilter_clean());
        assert_eq!(out[3].explanation, "hit 1");
        assert_eq!(out[3].offense_type, OffenseType::Profanity);

        assert_eq!(llm.call_count(), 1);
        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("1. 'what the fuck'"));
        assert!(prompt.contains("2. 'damn it'"));
        assert!(!prompt.contains("hello there"));
        assert_eq!(classifier.quota().daily_count(), 1);
    }

    #[test]
    fn test_disabled_prefilter_sends_everything() {
        let llm = MockProvider::new(verdicts_json(3));
        let mut classifier = classifier(llm.clone(), ProfanityFilter::disabled(), ManualClock::default());

        let out = classifier.process_batch(&texts(&["a", "b", "c"]));

        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|v| v.is_offensive));
        assert!(llm.prompts()[0].contains("3. 'c'"));
    }

    #[test]
    fn test_retry_then_success() {
        let llm = MockProvider::new(verdicts_json(1));
        llm.push_error("503 Service Unavailable");
        let clock = ManualClock::default();
        let mut classifier = classifier(llm.clone(), ProfanityFilter::disabled(), clock.clone());

        let out = classifier.process_batch(&texts(&["x"]));

        assert!(!out[0].is_error());
        assert_eq!(llm.call_count(), 2);
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(5)]);
        // Failed calls still count against the quota
        assert_eq!(classifier.quota().daily_count(), 2);
        assert_eq!(classifier.stats().failed_attempts, 1);
    }

    #[test]
    fn test_exhausted_retries_yield_error_verdicts() {
        let llm = MockProvider::new("not json at all");
        let clock = ManualClock::default();
        let mut classifier = classifier(llm.clone(), ProfanityFilter::disabled(), clock.clone());

        let out = classifier.process_batch(&texts(&["a", "b"]));

        assert_eq!(out.len(), 2);
        for verdict in &out {
            assert!(verdict.is_error());
            assert!(!verdict.is_offensive);
            assert_eq!(verdict.severity, 0.0);
            assert!(verdict
                .explanation
                .starts_with("Error in analysis after 3 attempts: "));
        }
        assert_eq!(llm.call_count(), 3);
        // No delay after the final attempt
        assert_eq!(clock.sleeps().len(), 2);
        assert_eq!(classifier.stats().error_batches, 1);
    }

    #[test]
    fn test_declined_retry_stops_immediately() {
        let llm = MockProvider::default();
        llm.push_error("quota exceeded");
        let clock = ManualClock::default();
        let mut classifier =
            classifier(llm.clone(), ProfanityFilter::disabled(), clock.clone()).with_retry_policy(NeverRetry);

        let out = classifier.process_batch(&texts(&["a", "b", "c"]));

        assert_eq!(out.len(), 3);
        assert!(out.iter().all(Verdict::is_error));
        assert!(out[0]
            .explanation
            .starts_with("Error in analysis after 1 attempts: "));
        assert!(out[0].explanation.ends_with("quota exceeded"));
        assert_eq!(llm.call_count(), 1);
        assert!(clock.sleeps().is_empty());
        assert_eq!(classifier.stats().declined_retries, 1);
    }

    #[test]
    fn test_policy_consulted_only_while_attempts_remain() {
        let llm = MockProvider::new("{}");
        let mut classifier = Classifier::new(
            llm.clone(),
            ProfanityFilter::disabled(),
            ClassifierConfig::default(),
            ManualClock::default(),
        )
        .unwrap();
        let policy = ScriptedRetry::new([true, true], false);
        classifier = classifier.with_retry_policy(policy);

        classifier.process_batch(&texts(&["a"]));

        assert_eq!(llm.call_count(), 3);
        assert_eq!(classifier.stats().failed_attempts, 3);
        assert_eq!(classifier.stats().declined_retries, 0);
    }

    #[test]
    fn test_short_response_is_retried() {
        let llm = MockProvider::new(verdicts_json(2));
        llm.push_response(verdicts_json(1));
        let mut classifier = classifier(llm.clone(), ProfanityFilter::disabled(), ManualClock::default());

        let out = classifier.process_batch(&texts(&["a", "b"]));

        assert_eq!(llm.call_count(), 2);
        assert!(out.iter().all(|v| !v.is_error()));
    }

    #[test]
    fn test_quota_gate_waits_for_minute_window() {
        let llm = MockProvider::new(verdicts_json(1));
        let clock = ManualClock::default();
        let config = ClassifierConfig {
            per_minute_request_limit: 1,
            ..ClassifierConfig::default()
        };
        let mut classifier =
            Classifier::new(llm.clone(), ProfanityFilter::disabled(), config, clock.clone()).unwrap();

        classifier.process_batch(&texts(&["first"]));
        assert!(clock.sleeps().is_empty());

        classifier.process_batch(&texts(&["second"]));
        assert_eq!(llm.call_count(), 2);
        assert_eq!(clock.total_slept(), Duration::from_secs(60));
        assert!(clock.sleeps().iter().all(|d| *d == Duration::from_secs(2)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClassifierConfig {
            max_attempts: 0,
            ..ClassifierConfig::default()
        };
        let result = Classifier::new(
            MockProvider::default(),
            ProfanityFilter::default(),
            config,
            ManualClock::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_classifier_trait() {
        let llm = MockProvider::new(verdicts_json(1));
        let mut classifier = classifier(llm, ProfanityFilter::default(), ManualClock::default());

        let out = classifier
            .classify_batch(&texts(&["fine", "oh shit"]))
            .unwrap();
        assert_eq!(out.len(), 2);
        assert!(!out[0].is_offensive);
        assert!(out[1].is_offensive);
    }

    proptest! {
        #[test]
        fn prop_output_matches_input_length_and_order(
            picks in proptest::collection::vec(0usize..6, 0..30),
            fail in any::<bool>(),
        ) {
            let pool = ["hello", "you idiot", "damn it", "nice one", "bullshit", "thanks"];
            let batch: Vec<String> = picks.iter().map(|&i| pool[i].to_string()).collect();

            let filter = ProfanityFilter::default();
            let mask = filter.mask(&batch);
            let selected = mask.iter().filter(|&&m| m).count();

            let response = if fail { "garbage".to_string() } else { verdicts_json(selected) };
            let llm = MockProvider::new(response);
            let mut classifier = classifier(llm, filter, ManualClock::default())
                .with_retry_policy(NeverRetry);

            let out = classifier.process_batch(&batch);

            prop_assert_eq!(out.len(), batch.len());
            if selected == 0 {
                prop_assert!(out.iter().all(|v| *v == Verdict::prefilter_clean()));
            } else if fail {
                prop_assert!(out.iter().all(Verdict::is_error));
            } else {
                let mut next = 0;
                for (verdict, &m) in out.iter().zip(&mask) {
                    if m {
                        prop_assert_eq!(&verdict.explanation, &format!("hit {}", next));
                        next += 1;
                    } else {
                        prop_assert_eq!(verdict, &Verdict::prefilter_clean());
                    }
                }
            }
        }
    }
}
