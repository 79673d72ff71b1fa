use pkg_types::quota::LimitSet;

/// Decide whether `candidate` fits the project cap given the quotas already
/// committed to sibling namespaces.
///
/// Only keys declared in `cap` are constrained; a resource the project does
/// not cap is unconstrained at namespace level. Every capped key is
/// evaluated — the check does not stop at the first failure — and on no-fit
/// the returned detail names each exceeded resource with its committed total
/// and the cap, so the caller can report the whole diagnosis at once.
///
/// Pure: inputs are never mutated, and well-formed limit sets never produce
/// an internal error.
pub fn is_quota_fit(
    candidate: &LimitSet,
    siblings: &[LimitSet],
    cap: &LimitSet,
) -> (bool, Option<String>) {
    if cap.is_empty() {
        return (true, None);
    }

    let used = LimitSet::sum(siblings);
    let mut exceeded = Vec::new();
    for key in cap.keys() {
        let committed = used.get(key).saturating_add(candidate.get(key));
        let limit = cap.get(key);
        if committed > limit {
            exceeded.push(format!("{key}: committed {committed} exceeds cap {limit}"));
        }
    }

    if exceeded.is_empty() {
        (true, None)
    } else {
        (false, Some(exceeded.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn limits(pairs: &[(&str, &str)]) -> LimitSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.parse().unwrap()))
            .collect()
    }

    #[test]
    fn exact_fit_passes() {
        let cap = limits(&[("cpu", "4")]);
        let siblings = vec![limits(&[("cpu", "1")]), limits(&[("cpu", "1")])];
        let candidate = limits(&[("cpu", "2")]);
        assert_eq!(is_quota_fit(&candidate, &siblings, &cap), (true, None));
    }

    #[test]
    fn overshoot_reports_committed_and_cap() {
        let cap = limits(&[("cpu", "4")]);
        let siblings = vec![limits(&[("cpu", "1")]), limits(&[("cpu", "1")])];
        let candidate = limits(&[("cpu", "2.5")]);
        let (ok, detail) = is_quota_fit(&candidate, &siblings, &cap);
        assert!(!ok);
        let detail = detail.unwrap();
        assert!(detail.contains("cpu"));
        assert!(detail.contains("4.5"));
        assert!(detail.contains("cap 4"));
    }

    #[test]
    fn every_exceeded_key_is_named() {
        let cap = limits(&[("cpu", "1"), ("memory", "1Gi"), ("pods", "10")]);
        let siblings = vec![limits(&[("cpu", "1"), ("memory", "1Gi")])];
        let candidate = limits(&[("cpu", "1"), ("memory", "512Mi"), ("pods", "5")]);
        let (ok, detail) = is_quota_fit(&candidate, &siblings, &cap);
        assert!(!ok);
        let detail = detail.unwrap();
        assert!(detail.contains("cpu"));
        assert!(detail.contains("memory"));
        assert!(!detail.contains("pods"));
    }

    #[test]
    fn empty_cap_always_fits() {
        let candidate = limits(&[("cpu", "1000")]);
        let siblings = vec![limits(&[("cpu", "1000")])];
        assert_eq!(
            is_quota_fit(&candidate, &siblings, &LimitSet::new()),
            (true, None)
        );
    }

    #[test]
    fn no_siblings_compares_candidate_against_cap() {
        let cap = limits(&[("cpu", "2"), ("memory", "1Gi")]);
        assert!(is_quota_fit(&limits(&[("cpu", "2")]), &[], &cap).0);
        assert!(!is_quota_fit(&limits(&[("memory", "1.5Gi")]), &[], &cap).0);
    }

    #[test]
    fn uncapped_resources_are_unconstrained() {
        let cap = limits(&[("cpu", "4")]);
        let candidate = limits(&[("cpu", "1"), ("gpus", "9999")]);
        assert!(is_quota_fit(&candidate, &[], &cap).0);
    }

    #[test]
    fn mixed_suffix_forms_compare_by_magnitude() {
        let cap = limits(&[("memory", "1Gi")]);
        let siblings = vec![limits(&[("memory", "512Mi")])];
        assert!(is_quota_fit(&limits(&[("memory", "524288Ki")]), &siblings, &cap).0);
        assert!(!is_quota_fit(&limits(&[("memory", "513Mi")]), &siblings, &cap).0);
    }

    proptest! {
        #[test]
        fn sibling_order_never_changes_the_result(
            cpu_values in proptest::collection::vec(0u64..100, 0..6),
            candidate_cpu in 0u64..100,
            cap_cpu in 0u64..300,
        ) {
            let siblings: Vec<LimitSet> = cpu_values
                .iter()
                .map(|v| limits(&[("cpu", v.to_string().as_str())]))
                .collect();
            let mut reversed = siblings.clone();
            reversed.reverse();
            let candidate = limits(&[("cpu", candidate_cpu.to_string().as_str())]);
            let cap = limits(&[("cpu", cap_cpu.to_string().as_str())]);
            prop_assert_eq!(
                is_quota_fit(&candidate, &siblings, &cap),
                is_quota_fit(&candidate, &reversed, &cap)
            );
        }
    }
}
