//! Circular hue intervals.
//!
//! A [`HueArc`] is the clockwise sweep from `start` to `end`. When
//! `start > end` the sweep passes through 0/360, so membership is not a plain
//! numeric range check:
//!
//! ```text
//! start <= end:  start <= h <= end
//! start >  end:  h >= start || h <= end
//! ```
//!
//! Both endpoints are inclusive. `start == end` selects exactly that angle.
//! The WGSL shader carries a copy of [`in_range`]; keep the two in sync.

/// Wraps an angle into `[0, 360)`.
///
/// ```
/// use hueshift_core::normalize_degrees;
///
/// assert_eq!(normalize_degrees(370.0), 10.0);
/// assert_eq!(normalize_degrees(-90.0), 270.0);
/// assert_eq!(normalize_degrees(360.0), 0.0);
/// ```
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if d >= 360.0 { 0.0 } else { d }
}

/// Tests whether hue `h` lies on the clockwise arc from `start` to `end`.
///
/// ```
/// use hueshift_core::in_range;
///
/// assert!(in_range(200.0, 150.0, 270.0));
/// assert!(in_range(10.0, 350.0, 20.0));
/// assert!(!in_range(180.0, 350.0, 20.0));
/// ```
#[inline]
pub fn in_range(h: f64, start: f64, end: f64) -> bool {
    if start <= end {
        start <= h && h <= end
    } else {
        h >= start || h <= end
    }
}

/// Clockwise hue arc with inclusive endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "ArcAngles"))]
pub struct HueArc {
    /// Arc start in degrees
    pub start: f64,
    /// Arc end in degrees
    pub end: f64,
}

/// Deserialized angles, wrapped on conversion.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ArcAngles {
    start: f64,
    end: f64,
}

#[cfg(feature = "serde")]
impl From<ArcAngles> for HueArc {
    fn from(a: ArcAngles) -> Self {
        Self::new(a.start, a.end)
    }
}

impl Default for HueArc {
    fn default() -> Self {
        Self::new(150.0, 270.0)
    }
}

impl HueArc {
    /// Creates an arc, wrapping both angles into `[0, 360)`.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start: normalize_degrees(start),
            end: normalize_degrees(end),
        }
    }

    /// True when the arc passes through 0/360.
    #[inline]
    pub fn wraps(&self) -> bool {
        self.start > self.end
    }

    /// Membership test, see [`in_range`].
    #[inline]
    pub fn contains(&self, h: f64) -> bool {
        in_range(h, self.start, self.end)
    }

    /// Clockwise sweep from `start` to `end` in degrees, `[0, 360)`.
    pub fn sweep(&self) -> f64 {
        normalize_degrees(self.end - self.start)
    }

    /// Same arc with a new start angle.
    pub fn with_start(self, start: f64) -> Self {
        Self::new(start, self.end)
    }

    /// Same arc with a new end angle.
    pub fn with_end(self, end: f64) -> Self {
        Self::new(self.start, end)
    }
}
