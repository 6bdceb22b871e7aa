//! Static registry for the scoring instrument: seven categories whose
//! ceilings sum to the 100-point full scale, the sub-score ceilings inside
//! each category, and the letter-grade bands over [0, 100].

/// Ceiling for one sub-score inside a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubScoreSpec {
    pub key: &'static str,
    pub max_points: u8,
}

/// Declared shape of one scoring category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySpec {
    pub key: &'static str,
    pub max_points: u8,
    pub sub_scores: &'static [SubScoreSpec],
}

const fn sub(key: &'static str, max_points: u8) -> SubScoreSpec {
    SubScoreSpec { key, max_points }
}

pub const CATEGORIES: &[CategorySpec] = &[
    CategorySpec {
        key: "websiteTechnicalSEO",
        max_points: 25,
        sub_scores: &[
            sub("domainQuality", 6),
            sub("onPageSEO", 8),
            sub("technicalInfrastructure", 6),
            sub("contentPresence", 5),
        ],
    },
    CategorySpec {
        key: "brandClarity",
        max_points: 12,
        sub_scores: &[
            sub("nameQuality", 5),
            sub("brandConsistency", 4),
            sub("marketPositioning", 3),
        ],
    },
    CategorySpec {
        key: "localSEO",
        max_points: 18,
        sub_scores: &[
            sub("gbpLikelihood", 8),
            sub("napConsistency", 4),
            sub("localKeywords", 3),
            sub("directoryPresence", 3),
        ],
    },
    CategorySpec {
        key: "socialPresence",
        max_points: 16,
        sub_scores: &[
            sub("platformCoverage", 5),
            sub("handleConsistency", 5),
            sub("profileCompleteness", 3),
            sub("engagementIndicators", 3),
        ],
    },
    CategorySpec {
        key: "trustAuthority",
        max_points: 15,
        sub_scores: &[
            sub("securityLegitimacy", 4),
            sub("reviewReputation", 6),
            sub("socialProof", 3),
            sub("backlinkAuthority", 2),
        ],
    },
    CategorySpec {
        key: "performanceUX",
        max_points: 8,
        sub_scores: &[],
    },
    CategorySpec {
        key: "growthReadiness",
        max_points: 6,
        sub_scores: &[],
    },
];

/// A contiguous integer score interval mapped to a letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeBand {
    pub label: &'static str,
    pub min: u8,
    pub max: u8,
}

impl GradeBand {
    /// Containment over real-valued scores: `[min, max + 1)`, except the top
    /// band which is closed at the full scale. Keeps fractional scores like
    /// 74.5 inside exactly one band.
    pub fn contains(&self, score: f64) -> bool {
        if score < f64::from(self.min) {
            return false;
        }
        if self.max >= FULL_SCALE {
            score <= f64::from(self.max)
        } else {
            score < f64::from(self.max) + 1.0
        }
    }
}

/// Ordered best-to-worst; tiles [0, 100] with no gaps or overlaps.
pub const GRADE_BANDS: &[GradeBand] = &[
    GradeBand { label: "A", min: 90, max: 100 },
    GradeBand { label: "A-", min: 85, max: 89 },
    GradeBand { label: "B+", min: 80, max: 84 },
    GradeBand { label: "B", min: 75, max: 79 },
    GradeBand { label: "B-", min: 70, max: 74 },
    GradeBand { label: "C+", min: 65, max: 69 },
    GradeBand { label: "C", min: 60, max: 64 },
    GradeBand { label: "C-", min: 55, max: 59 },
    GradeBand { label: "D", min: 50, max: 54 },
    GradeBand { label: "F", min: 0, max: 49 },
];

/// Full-scale score of the instrument.
pub const FULL_SCALE: u8 = 100;

/// Top-level keys a usable candidate must carry.
pub const REQUIRED_FIELDS: &[&str] = &["overallScore", "grade", "categoryBreakdown"];

/// Narrative sections whose absence is surfaced as a warning only.
pub const OPTIONAL_SECTIONS: &[&str] = &[
    "industryBenchmark",
    "socialAudit",
    "executiveSummary",
    "topStrengths",
    "criticalWeaknesses",
    "quickWins",
    "priorityRoadmap",
    "freeReport",
    "paidReportPreview",
];

pub fn category(key: &str) -> Option<&'static CategorySpec> {
    CATEGORIES.iter().find(|spec| spec.key == key)
}

pub fn is_known_grade(label: &str) -> bool {
    GRADE_BANDS.iter().any(|band| band.label == label)
}

pub fn band_for_grade(label: &str) -> Option<&'static GradeBand> {
    GRADE_BANDS.iter().find(|band| band.label == label)
}

/// Letter grade for a score; anything outside every band falls back to `F`.
pub fn grade_for_score(score: f64) -> &'static str {
    GRADE_BANDS
        .iter()
        .find(|band| band.contains(score))
        .map(|band| band.label)
        .unwrap_or("F")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ceilings_sum_to_full_scale() {
        let total: u32 = CATEGORIES.iter().map(|c| u32::from(c.max_points)).sum();
        assert_eq!(total, u32::from(FULL_SCALE));
    }

    #[test]
    fn sub_score_ceilings_sum_to_their_category_ceiling() {
        for spec in CATEGORIES.iter().filter(|c| !c.sub_scores.is_empty()) {
            let total: u32 = spec.sub_scores.iter().map(|s| u32::from(s.max_points)).sum();
            assert_eq!(total, u32::from(spec.max_points), "category {}", spec.key);
        }
    }

    #[test]
    fn every_integer_score_lands_in_exactly_one_band() {
        for score in 0..=100u8 {
            let hits = GRADE_BANDS
                .iter()
                .filter(|band| band.contains(f64::from(score)))
                .count();
            assert_eq!(hits, 1, "score {score}");
        }
    }

    #[test]
    fn fractional_scores_are_graded() {
        assert_eq!(grade_for_score(74.5), "B-");
        assert_eq!(grade_for_score(89.9), "A-");
        assert_eq!(grade_for_score(100.0), "A");
    }

    #[test]
    fn out_of_domain_scores_fall_back_to_f() {
        assert_eq!(grade_for_score(-1.0), "F");
        assert_eq!(grade_for_score(101.0), "F");
    }

    #[test]
    fn grade_lookup_matches_band_table() {
        assert_eq!(grade_for_score(0.0), "F");
        assert_eq!(grade_for_score(49.0), "F");
        assert_eq!(grade_for_score(50.0), "D");
        assert_eq!(grade_for_score(90.0), "A");
        assert!(is_known_grade("B+"));
        assert!(!is_known_grade("E"));
    }
}
