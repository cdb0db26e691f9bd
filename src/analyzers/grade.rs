use crate::error::TranscriptError;

/// How raw grade tokens map onto 4.0-scale grade points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradeScale {
    /// Only the nine letter grades are mappable.
    #[default]
    LetterOnly,
    /// Letter grades first; a token that is no letter grade may be a
    /// numeric 0-10 score instead.
    LetterWithNumericFallback,
}

impl GradeScale {
    /// Converts a raw grade token into a 4.0-scale grade point.
    ///
    /// Tokens are matched case-insensitively after trimming whitespace.
    ///
    /// | Token | Points |
    /// |-------|--------|
    /// | A+, A | 4.0    |
    /// | B+    | 3.5    |
    /// | B     | 3.0    |
    /// | C+    | 2.5    |
    /// | C     | 2.0    |
    /// | D+    | 1.5    |
    /// | D     | 1.0    |
    /// | F     | 0.0    |
    ///
    /// With [`GradeScale::LetterWithNumericFallback`], a non-letter token
    /// parseable as a score in 0-10 maps >=8.5 -> 4.0, >=7.0 -> 3.0,
    /// >=5.5 -> 2.0, >=4.0 -> 1.0, and below 4.0 -> 0.0.
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError::InvalidGrade`] for tokens matching
    /// neither form, including numeric scores outside 0-10.
    pub fn grade_point(&self, grade: &str) -> Result<f64, TranscriptError> {
        let token = grade.trim().to_uppercase();

        let letter = match token.as_str() {
            "A+" | "A" => Some(4.0),
            "B+" => Some(3.5),
            "B" => Some(3.0),
            "C+" => Some(2.5),
            "C" => Some(2.0),
            "D+" => Some(1.5),
            "D" => Some(1.0),
            "F" => Some(0.0),
            _ => None,
        };
        if let Some(points) = letter {
            return Ok(points);
        }

        if let GradeScale::LetterWithNumericFallback = self {
            if let Ok(score) = token.parse::<f64>() {
                if (0.0..=10.0).contains(&score) {
                    return Ok(match score {
                        s if s >= 8.5 => 4.0,
                        s if s >= 7.0 => 3.0,
                        s if s >= 5.5 => 2.0,
                        s if s >= 4.0 => 1.0,
                        _ => 0.0,
                    });
                }
            }
        }

        Err(TranscriptError::InvalidGrade {
            grade: grade.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::classify::LETTER_GRADES;

    #[test]
    fn test_letter_grade_table() {
        let scale = GradeScale::LetterOnly;
        assert_eq!(scale.grade_point("A+").unwrap(), 4.0);
        assert_eq!(scale.grade_point("A").unwrap(), 4.0);
        assert_eq!(scale.grade_point("B+").unwrap(), 3.5);
        assert_eq!(scale.grade_point("B").unwrap(), 3.0);
        assert_eq!(scale.grade_point("C+").unwrap(), 2.5);
        assert_eq!(scale.grade_point("C").unwrap(), 2.0);
        assert_eq!(scale.grade_point("D+").unwrap(), 1.5);
        assert_eq!(scale.grade_point("D").unwrap(), 1.0);
        assert_eq!(scale.grade_point("F").unwrap(), 0.0);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let scale = GradeScale::LetterOnly;
        assert_eq!(scale.grade_point(" a+ ").unwrap(), 4.0);
        assert_eq!(scale.grade_point("b").unwrap(), 3.0);
        assert_eq!(scale.grade_point("f\t").unwrap(), 0.0);
    }

    #[test]
    fn test_letter_points_bounded_and_monotonic() {
        let scale = GradeScale::LetterOnly;
        let points: Vec<f64> = LETTER_GRADES
            .iter()
            .map(|g| scale.grade_point(g).unwrap())
            .collect();
        for pair in points.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        for p in points {
            assert!((0.0..=4.0).contains(&p));
        }
    }

    #[test]
    fn test_letter_only_rejects_numeric_scores() {
        let scale = GradeScale::LetterOnly;
        assert_eq!(
            scale.grade_point("8.5"),
            Err(TranscriptError::InvalidGrade {
                grade: "8.5".to_string()
            })
        );
    }

    #[test]
    fn test_numeric_fallback_band_boundaries() {
        let scale = GradeScale::LetterWithNumericFallback;
        assert_eq!(scale.grade_point("10").unwrap(), 4.0);
        assert_eq!(scale.grade_point("8.5").unwrap(), 4.0);
        assert_eq!(scale.grade_point("8.4").unwrap(), 3.0);
        assert_eq!(scale.grade_point("7.0").unwrap(), 3.0);
        assert_eq!(scale.grade_point("6.9").unwrap(), 2.0);
        assert_eq!(scale.grade_point("5.5").unwrap(), 2.0);
        assert_eq!(scale.grade_point("5.4").unwrap(), 1.0);
        assert_eq!(scale.grade_point("4.0").unwrap(), 1.0);
    }

    #[test]
    fn test_numeric_fallback_low_scores_map_to_zero_points() {
        let scale = GradeScale::LetterWithNumericFallback;
        assert_eq!(scale.grade_point("3.9").unwrap(), 0.0);
        assert_eq!(scale.grade_point("0").unwrap(), 0.0);
    }

    #[test]
    fn test_numeric_fallback_letters_still_win() {
        // "A" must never be re-read as a number
        let scale = GradeScale::LetterWithNumericFallback;
        assert_eq!(scale.grade_point("a").unwrap(), 4.0);
    }

    #[test]
    fn test_out_of_range_and_garbage_tokens_fail() {
        let scale = GradeScale::LetterWithNumericFallback;
        assert!(scale.grade_point("10.1").is_err());
        assert!(scale.grade_point("-1").is_err());
        assert!(scale.grade_point("NaN").is_err());
        assert!(scale.grade_point("A-").is_err());
        assert!(scale.grade_point("pass").is_err());
    }
}
