//! Recommended and acceptable sleep ranges per age group.

/// Sleep recommendation for an inclusive age group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepGuideline {
    /// First age of the group in whole years.
    pub age_start: u32,
    /// Last age of the group in whole years (inclusive).
    pub age_end: u32,
    /// Recommended sleep time in hours, `[min, max]`.
    pub recommended: [f64; 2],
    /// Acceptable sleep time in hours, `[min, max]`.
    pub acceptable: [f64; 2],
}

/// How a sleep time compares with a [`SleepGuideline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GuidelineVerdict {
    #[display("recommended")]
    Recommended,
    #[display("acceptable")]
    Acceptable,
    #[display("outside acceptable range")]
    OutsideAcceptable,
}

const fn guideline(
    age_start: u32,
    age_end: u32,
    recommended: [f64; 2],
    acceptable: [f64; 2],
) -> SleepGuideline {
    SleepGuideline {
        age_start,
        age_end,
        recommended,
        acceptable,
    }
}

/// Guideline groups in ascending age order.
pub static SLEEP_GUIDELINES: [SleepGuideline; 8] = [
    guideline(1, 2, [11.0, 14.0], [9.0, 16.0]),
    guideline(3, 5, [10.0, 13.0], [8.0, 14.0]),
    guideline(6, 13, [9.0, 11.0], [7.0, 12.0]),
    guideline(14, 17, [8.0, 10.0], [7.0, 11.0]),
    guideline(18, 25, [7.0, 9.0], [6.0, 11.0]),
    guideline(26, 40, [7.0, 9.0], [6.0, 10.0]),
    guideline(41, 65, [7.0, 9.0], [6.0, 10.0]),
    guideline(66, 98, [7.0, 8.0], [5.0, 9.0]),
];

impl SleepGuideline {
    #[must_use]
    pub fn classify(&self, sleep_time: f64) -> GuidelineVerdict {
        let within = |[lo, hi]: [f64; 2]| lo <= sleep_time && sleep_time <= hi;
        if within(self.recommended) {
            GuidelineVerdict::Recommended
        } else if within(self.acceptable) {
            GuidelineVerdict::Acceptable
        } else {
            GuidelineVerdict::OutsideAcceptable
        }
    }
}

/// The guideline group covering `age`.
///
/// Fractional ages between two groups (such as 5.5) belong to the earlier one.
/// Returns `None` below the first group, above the last one, and for NaN.
#[must_use]
pub fn guideline_for(age: f64) -> Option<&'static SleepGuideline> {
    let (last, rest) = SLEEP_GUIDELINES.split_last()?;
    if age >= f64::from(last.age_start) {
        return (age <= f64::from(last.age_end)).then_some(last);
    }
    rest.iter()
        .rev()
        .find(|group| f64::from(group.age_start) <= age)
}

/// One corner of the step-after guideline band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidelinePoint {
    pub age: f64,
    pub guideline: &'static SleepGuideline,
}

/// Band points for the age domain `[age_min, age_max]`.
///
/// Every group contributes a point at its start and at its end when they lie
/// inside the domain. A group straddling `age_min` is clipped to start there,
/// and the last group is clipped to end at `age_max`.
#[must_use]
pub fn guideline_band(age_min: f64, age_max: f64) -> Vec<GuidelinePoint> {
    let mut points = vec![];
    for group in &SLEEP_GUIDELINES {
        let start = f64::from(group.age_start);
        let end = f64::from(group.age_end);
        if start < age_min && end >= age_min {
            points.push(GuidelinePoint {
                age: age_min,
                guideline: group,
            });
        }
        if start >= age_min {
            points.push(GuidelinePoint {
                age: start,
                guideline: group,
            });
        }
        if end > age_min && end <= age_max {
            points.push(GuidelinePoint {
                age: end,
                guideline: group,
            });
        }
    }
    let last = &SLEEP_GUIDELINES[SLEEP_GUIDELINES.len() - 1];
    if f64::from(last.age_end) > age_max {
        points.push(GuidelinePoint {
            age: age_max,
            guideline: last,
        });
    }
    points
}
