use std::fmt::{Display, Formatter};
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

/// Represents an interval of values. There may/not be a `start` and/or `end` bound.
///
/// Used as the valid parametric `t` range of a ray: intersections are only accepted when
/// their distance lies inside the interval, and the searcher shrinks `end` as closer hits
/// are found (see [Self::with_some_end]).
///
/// # Requirements
/// It is a logic error for `start > end`. This requirement may not necessarily be enforced due to performance reasons,
/// and is considered UB.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct Interval<T> {
    pub start: Option<T>,
    pub end: Option<T>,
}

impl<T> From<RangeFull> for Interval<T> {
    fn from(_value: RangeFull) -> Self { Self { start: None, end: None } }
}
impl<T> From<RangeInclusive<T>> for Interval<T> {
    fn from(value: RangeInclusive<T>) -> Self {
        let (min, max) = value.into_inner();
        Self {
            start: Some(min),
            end: Some(max),
        }
    }
}
impl<T> From<RangeTo<T>> for Interval<T> {
    fn from(value: RangeTo<T>) -> Self {
        Self {
            start: None,
            end: Some(value.end),
        }
    }
}
impl<T> From<RangeToInclusive<T>> for Interval<T> {
    fn from(value: RangeToInclusive<T>) -> Self {
        Self {
            start: None,
            end: Some(value.end),
        }
    }
}
impl<T> From<RangeFrom<T>> for Interval<T> {
    fn from(value: RangeFrom<T>) -> Self {
        Self {
            start: Some(value.start),
            end: None,
        }
    }
}
impl<T> From<Range<T>> for Interval<T> {
    fn from(value: Range<T>) -> Self {
        Self {
            start: Some(value.start),
            end: Some(value.end),
        }
    }
}

impl<T> Interval<T> {
    pub const FULL: Self = Self { start: None, end: None };

    /// Replaces the upper bound, keeping the lower; used to tighten the search
    /// range once an intersection at the given distance has been found
    pub fn with_some_end(self, end: T) -> Self {
        Self {
            end: Some(end),
            ..self
        }
    }
}

impl<T: PartialOrd> Interval<T> {
    /// Checks if the given range `min..max` overlaps with the bounds (`self`)
    pub fn range_overlaps(&self, min: &T, max: &T) -> bool {
        return match self {
            Self { start: None, end: None } => min <= max,
            Self {
                start: Some(start),
                end: Some(end),
            } => {
                let low = if min > start { min } else { start };
                let high = if max < end { max } else { end };
                low <= high
            }
            Self {
                start: None,
                end: Some(end),
            } => {
                let high = if max < end { max } else { end };
                min <= high
            }
            Self {
                start: Some(start),
                end: None,
            } => {
                let low = if min > start { min } else { start };
                low <= max
            }
        };
    }

    pub fn contains(&self, item: &T) -> bool {
        match self {
            Self {
                start: Some(start),
                end: Some(end),
            } => start <= item && item <= end,
            Self {
                start: Some(start),
                end: None,
            } => start <= item,
            Self {
                start: None,
                end: Some(end),
            } => item <= end,
            Self { start: None, end: None } => true,
        }
    }
}

impl<T: Display> Display for Interval<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(start) = &self.start {
            write!(f, "{start}")?;
        }
        write!(f, "..")?;
        if let Some(end) = &self.end {
            write!(f, "{end}")?
        }
        Ok(())
    }
}
