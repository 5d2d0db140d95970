use engagement_log::scoring::{
    DerivedMetrics, EngagementRecord, EngagementScorer, EngagementWeights, RateBasis,
    ScorePolicy, WeightedScorer,
};

fn record(views: i64, likes: i64, reposts: i64, comments: i64, followers: Option<i64>) -> EngagementRecord {
    EngagementRecord {
        views,
        likes,
        reposts,
        comments,
        follower_count: followers,
    }
}

fn all_scorers() -> Vec<EngagementScorer> {
    let mut scorers = Vec::new();
    for basis in [RateBasis::Followers, RateBasis::Views] {
        for policy in [ScorePolicy::AudienceNormalized, ScorePolicy::FixedDivisor] {
            scorers.push(EngagementScorer::new(basis, policy));
        }
    }
    scorers
}

#[test]
fn weighted_scorer_separates_interactions_from_views() {
    let scorer = WeightedScorer::new(EngagementWeights::default());
    let input = record(100, 10, 5, 2, None);

    assert!((scorer.interactions(&input) - 26.0).abs() < 1e-9);
    assert!((scorer.weighted_engagement(&input) - 36.0).abs() < 1e-9);
}

#[test]
fn scorer_always_uses_standard_weights() {
    assert_eq!(
        EngagementWeights::default(),
        EngagementWeights { like: 1.0, repost: 2.0, comment: 3.0, view: 0.1 }
    );

    let scorer = EngagementScorer::new(RateBasis::Views, ScorePolicy::AudienceNormalized);
    let metrics = scorer.compute(&record(1_000, 1, 1, 1, None));

    // (1 + 2 + 3) / 1000 * 100 and (6 + 100) / 10
    assert!((metrics.engagement_rate - 0.6).abs() < 1e-9);
    assert!((metrics.engagement_score - 10.6).abs() < 1e-9);
}

#[test]
fn all_zero_record_scores_zero_under_every_policy() {
    let input = record(0, 0, 0, 0, Some(0));

    for scorer in all_scorers() {
        let metrics = scorer.compute(&input);
        assert_eq!(metrics, DerivedMetrics { engagement_rate: 0.0, engagement_score: 0.0 });
    }
}

#[test]
fn follower_rate_uses_interactions_over_followers() {
    let scorer = EngagementScorer::new(RateBasis::Followers, ScorePolicy::FixedDivisor);
    let metrics = scorer.compute(&record(0, 10, 5, 2, Some(100)));

    assert!((metrics.engagement_rate - 26.0).abs() < 1e-9);
}

#[test]
fn follower_rate_is_zero_without_followers() {
    let scorer = EngagementScorer::new(RateBasis::Followers, ScorePolicy::FixedDivisor);

    assert_eq!(scorer.compute(&record(500, 10, 5, 2, None)).engagement_rate, 0.0);
    assert_eq!(scorer.compute(&record(500, 10, 5, 2, Some(0))).engagement_rate, 0.0);
}

#[test]
fn view_rate_excludes_the_view_term() {
    let scorer = EngagementScorer::new(RateBasis::Views, ScorePolicy::FixedDivisor);
    let metrics = scorer.compute(&record(200, 10, 5, 2, Some(100)));

    assert!((metrics.engagement_rate - 13.0).abs() < 1e-9);
}

#[test]
fn view_rate_is_zero_without_views() {
    let scorer = EngagementScorer::new(RateBasis::Views, ScorePolicy::FixedDivisor);
    let metrics = scorer.compute(&record(0, 10, 5, 2, Some(100)));

    assert_eq!(metrics.engagement_rate, 0.0);
    assert!(metrics.engagement_rate.is_finite());
}

#[test]
fn rate_is_not_capped() {
    let scorer = EngagementScorer::new(RateBasis::Views, ScorePolicy::FixedDivisor);
    let metrics = scorer.compute(&record(10, 50, 0, 0, None));

    assert!((metrics.engagement_rate - 500.0).abs() < 1e-9);
}

#[test]
fn fixed_divisor_score_includes_views() {
    let scorer = EngagementScorer::new(RateBasis::Views, ScorePolicy::FixedDivisor);
    let metrics = scorer.compute(&record(100, 10, 5, 2, None));

    assert!((metrics.engagement_score - 0.36).abs() < 1e-9);
}

#[test]
fn fixed_divisor_ignores_followers() {
    let scorer = EngagementScorer::new(RateBasis::Views, ScorePolicy::FixedDivisor);
    let without = scorer.compute(&record(100, 10, 5, 2, None));
    let with = scorer.compute(&record(100, 10, 5, 2, Some(50)));

    assert_eq!(without.engagement_score, with.engagement_score);
}

#[test]
fn audience_score_scales_by_followers() {
    let scorer = EngagementScorer::new(RateBasis::Followers, ScorePolicy::AudienceNormalized);
    let metrics = scorer.compute(&record(100, 10, 5, 2, Some(1000)));

    // 36 / 1000 * 1000
    assert!((metrics.engagement_score - 36.0).abs() < 1e-9);
}

#[test]
fn audience_score_without_followers_uses_absolute_scale() {
    let scorer = EngagementScorer::new(RateBasis::Followers, ScorePolicy::AudienceNormalized);

    let missing = scorer.compute(&record(100, 10, 5, 2, None));
    let zero = scorer.compute(&record(100, 10, 5, 2, Some(0)));

    assert!((missing.engagement_score - 3.6).abs() < 1e-9);
    assert_eq!(missing, zero);
    assert!(!missing.engagement_score.is_nan());
}

#[test]
fn score_saturates_at_one_hundred() {
    let input = record(0, 100_000, 0, 0, Some(10));

    for scorer in all_scorers() {
        assert_eq!(scorer.compute(&input).engagement_score, 100.0);
    }
}

#[test]
fn score_stays_in_range_for_negative_input() {
    let input = record(-1_000, -50, -3, -7, Some(-20));

    for scorer in all_scorers() {
        let metrics = scorer.compute(&input);
        assert!(metrics.engagement_score >= 0.0);
        assert!(metrics.engagement_score <= 100.0);
        assert!(metrics.engagement_rate.is_finite());
    }
}

#[test]
fn score_stays_in_range_across_inputs() {
    let counts = [0, 1, 7, 99, 1_000, 123_456];

    for scorer in all_scorers() {
        for &views in &counts {
            for &likes in &counts {
                for &followers in &[None, Some(0), Some(1), Some(5_000)] {
                    let metrics = scorer.compute(&record(views, likes, likes / 2, likes / 3, followers));
                    assert!((0.0..=100.0).contains(&metrics.engagement_score));
                }
            }
        }
    }
}

#[test]
fn compute_is_deterministic() {
    let input = record(12_345, 678, 90, 12, Some(3_456));

    for scorer in all_scorers() {
        let first = scorer.compute(&input);
        let second = scorer.compute(&input);
        assert_eq!(first.engagement_rate.to_bits(), second.engagement_rate.to_bits());
        assert_eq!(first.engagement_score.to_bits(), second.engagement_score.to_bits());
    }
}

#[test]
fn missing_counters_deserialize_as_zero() {
    let input: EngagementRecord = serde_json::from_str(r#"{ "likes": 4 }"#).unwrap();

    assert_eq!(input, record(0, 4, 0, 0, None));
}

#[test]
fn policies_parse_from_names() {
    assert_eq!("followers".parse::<RateBasis>().unwrap(), RateBasis::Followers);
    assert_eq!(" Views ".parse::<RateBasis>().unwrap(), RateBasis::Views);
    assert_eq!(
        "audience_normalized".parse::<ScorePolicy>().unwrap(),
        ScorePolicy::AudienceNormalized
    );
    assert_eq!("fixed-divisor".parse::<ScorePolicy>().unwrap(), ScorePolicy::FixedDivisor);
    assert_eq!(" FOLLOWERS\t".parse::<RateBasis>().unwrap(), RateBasis::Followers);
    assert_eq!(" FIXED_DIVISOR ".parse::<ScorePolicy>().unwrap(), ScorePolicy::FixedDivisor);
    assert!("fixed divisor".parse::<ScorePolicy>().is_err());
    assert!("impressions".parse::<RateBasis>().is_err());
    assert!("log".parse::<ScorePolicy>().is_err());
}
