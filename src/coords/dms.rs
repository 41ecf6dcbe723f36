use std::{fmt::Display, iter::Peekable, str::{Chars, FromStr}};

use num::Integer;

use crate::{utility::dms, Error, ParseCoord, ThisOrThat};

const DEGREE_MARKS: &str = "°º˚";
const MINUTE_MARKS: &str = "'′’";
const SECOND_MARKS: &str = "\"″”";

/// Which geographic axis an angle measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Largest magnitude, in degrees, an angle on this axis can have.
    pub fn limit(self) -> u32 {
        match self {
            Axis::Latitude => dms::QD,
            Axis::Longitude => dms::HD,
        }
    }
}

/// Hemisphere letter carrying the sign of a [`Dms`] angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hemisphere {
    N,
    S,
    E,
    W,
}

impl Hemisphere {
    /// Picks the hemisphere for a signed decimal angle. Zero, including `-0.0`,
    /// is `N` or `E`.
    pub fn from_decimal(value: f64, axis: Axis) -> Hemisphere {
        let negative = value < 0.0;
        match axis {
            Axis::Latitude => negative.ternary(Hemisphere::S, Hemisphere::N),
            Axis::Longitude => negative.ternary(Hemisphere::W, Hemisphere::E),
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Hemisphere::N | Hemisphere::S => Axis::Latitude,
            Hemisphere::E | Hemisphere::W => Axis::Longitude,
        }
    }

    /// Whether decimal angles in this hemisphere are negative.
    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::S | Hemisphere::W)
    }

    pub fn as_char(self) -> char {
        match self {
            Hemisphere::N => 'N',
            Hemisphere::S => 'S',
            Hemisphere::E => 'E',
            Hemisphere::W => 'W',
        }
    }

    fn from_char(c: char) -> Option<Hemisphere> {
        match c.to_ascii_uppercase() {
            'N' => Some(Hemisphere::N),
            'S' => Some(Hemisphere::S),
            'E' => Some(Hemisphere::E),
            'W' => Some(Hemisphere::W),
            _ => None,
        }
    }
}

impl Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An angle in degrees, minutes and seconds. The sign lives entirely in the
/// hemisphere; degrees are never negative.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(try_from = "DmsParts"))]
pub struct Dms {
    pub(crate) degrees: u32,
    pub(crate) minutes: u32,
    pub(crate) seconds: f64,
    pub(crate) hemisphere: Hemisphere,
}

impl Dms {
    /// Tries to create an angle from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDms`] if minutes or seconds are outside `[0, 60)`,
    /// or if the angle exceeds 90° for `N`/`S` or 180° for `E`/`W`.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::{Dms, Hemisphere};
    ///
    /// let angle = Dms::create(5, 35, 18.09, Hemisphere::N).unwrap();
    /// assert_eq!(angle.to_string(), "5° 35' 18.09\" N");
    ///
    /// assert!(Dms::create(5, 60, 0.0, Hemisphere::N).is_err());
    /// assert!(Dms::create(91, 0, 0.0, Hemisphere::S).is_err());
    /// ```
    pub fn create(degrees: u32, minutes: u32, seconds: f64, hemisphere: Hemisphere) -> Result<Dms, Error> {
        if minutes >= dms::DM {
            return Err(Error::InvalidDms(format!("Minutes {minutes} not in [0, 60)")));
        }
        if !(0.0..f64::from(dms::MS)).contains(&seconds) {
            return Err(Error::InvalidDms(format!("Seconds {seconds} not in [0, 60)")));
        }

        let value = Dms { degrees, minutes, seconds, hemisphere };
        let limit = hemisphere.axis().limit();
        if value.magnitude() > f64::from(limit) {
            return Err(Error::InvalidDms(format!(
                "Angle {value} exceeds {limit}° for hemisphere {hemisphere}"
            )));
        }

        Ok(value)
    }

    /// Splits a decimal angle into degrees, minutes and seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFinite`] for NaN or infinite input and
    /// [`Error::InvalidCoord`] if the magnitude exceeds 90° (latitude) or 180°
    /// (longitude).
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::{Axis, Dms, Hemisphere};
    ///
    /// let angle = Dms::from_decimal(-1.25, Axis::Longitude).unwrap();
    ///
    /// assert_eq!(angle.degrees(), 1);
    /// assert_eq!(angle.minutes(), 15);
    /// assert!(angle.seconds().abs() < 1e-9);
    /// assert_eq!(angle.hemisphere(), Hemisphere::W);
    /// ```
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_decimal(value: f64, axis: Axis) -> Result<Dms, Error> {
        if !value.is_finite() {
            return Err(Error::NonFinite(format!("Cannot express {value} in degrees/minutes/seconds")));
        }

        let magnitude = value.abs();
        if magnitude > f64::from(axis.limit()) {
            return Err(Error::InvalidCoord(format!(
                "{axis:?} {value} outside of valid range [-{limit}, {limit}].",
                limit = axis.limit(),
            )));
        }

        let degrees = magnitude.floor();
        let minutes = ((magnitude - degrees) * f64::from(dms::DM)).floor();
        let seconds = ((magnitude - degrees) * f64::from(dms::DM) - minutes) * f64::from(dms::MS);

        Ok(Dms {
            degrees: degrees as u32,
            minutes: minutes as u32,
            seconds,
            hemisphere: Hemisphere::from_decimal(value, axis),
        })
    }

    /// Parses a DMS string such as `5° 35' 18.09" N`, `N 5 35 18.09` or
    /// `1°05′05.5″w`. Unit marks are optional, and at least one hemisphere
    /// letter is required.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDms`] if the string is malformed, the hemisphere
    /// is missing or conflicting, or a component is out of range.
    ///
    /// # Usage
    ///
    /// ```
    /// use ghana_grid::Dms;
    ///
    /// let angle = Dms::parse_str("5° 35' 18.09\" N").unwrap();
    /// assert!((angle.to_decimal() - (5.0 + 35.0 / 60.0 + 18.09 / 3600.0)).abs() < 1e-12);
    ///
    /// assert!(Dms::parse_str("5 35 18.09").is_err());
    /// assert!(Dms::parse_str("N 5 35 18.09 W").is_err());
    /// ```
    pub fn parse_str(dms_str: &str) -> Result<Dms, Error> {
        Self::from_str(dms_str)
    }

    #[inline]
    pub fn degrees(&self) -> u32 {
        self.degrees
    }

    #[inline]
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    #[inline]
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    #[inline]
    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    pub fn axis(&self) -> Axis {
        self.hemisphere.axis()
    }

    /// Signed decimal degrees, negative in the `S` and `W` hemispheres.
    pub fn to_decimal(&self) -> f64 {
        self.hemisphere.is_negative().ternary(-1.0, 1.0) * self.magnitude()
    }

    fn magnitude(&self) -> f64 {
        f64::from(self.degrees)
            + f64::from(self.minutes) / f64::from(dms::DM)
            + self.seconds / f64::from(dms::DS)
    }
}

/// Splits a decimal angle into a [`Dms`]. See [`Dms::from_decimal`].
///
/// # Errors
///
/// Same as [`Dms::from_decimal`].
pub fn decimal_to_dms(value: f64, axis: Axis) -> Result<Dms, Error> {
    Dms::from_decimal(value, axis)
}

/// Parses a DMS string straight to signed decimal degrees. See [`Dms::parse_str`].
///
/// # Errors
///
/// Same as [`Dms::parse_str`].
///
/// # Usage
///
/// ```
/// use ghana_grid::dms_to_decimal;
///
/// let lon = dms_to_decimal("0° 12' 36\" W").unwrap();
/// assert!((lon + 0.21).abs() < 1e-12);
/// ```
pub fn dms_to_decimal(text: &str) -> Result<f64, Error> {
    Dms::parse_str(text).map(|value| value.to_decimal())
}

impl Display for Dms {
    /// Renders `D° M' S.SS" H`. Seconds that round up to 60 carry into the
    /// minutes, and minutes into the degrees.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let centis = (self.seconds * 100.0).round() as u32;
        let (carry, centis) = centis.div_rem(&(dms::MS * 100));
        let (carry, minutes) = self.minutes.saturating_add(carry).div_rem(&dms::DM);
        let degrees = self.degrees.saturating_add(carry);

        write!(
            f,
            "{degrees}° {minutes}' {}.{:02}\" {}",
            centis / 100,
            centis % 100,
            self.hemisphere,
        )
    }
}

impl FromStr for Dms {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let mut chars = value.chars().peekable();

        let err = |msg: &str| Error::InvalidDms(format!("{msg}: {value:?}"));

        skip_whitespace(&mut chars);
        let leading = take_hemisphere(&mut chars);
        skip_whitespace(&mut chars);

        let degrees = take_digits(&mut chars).ok_or_else(|| err("Expected degrees"))?;
        skip_separators(&mut chars);
        let minutes = take_digits(&mut chars).ok_or_else(|| err("Expected minutes"))?;
        skip_separators(&mut chars);
        let seconds = take_decimal(&mut chars).ok_or_else(|| err("Expected seconds"))?;
        skip_separators(&mut chars);

        let trailing = take_hemisphere(&mut chars);
        skip_whitespace(&mut chars);

        if chars.peek().is_some() {
            return Err(err("Unexpected trailing characters"));
        }

        let degrees = degrees.parse::<u32>().map_err(|_| err("Degrees out of range"))?;
        let minutes = minutes.parse::<u32>().map_err(|_| err("Minutes out of range"))?;
        let seconds = seconds.parse::<f64>().map_err(|_| err("Seconds are not a number"))?;

        let hemisphere = match (leading, trailing) {
            (Some(lead), Some(trail)) if lead != trail => {
                return Err(err(&format!("Conflicting hemispheres {lead} and {trail}")));
            }
            (Some(h), _) | (None, Some(h)) => h,
            (None, None) => return Err(err("Missing hemisphere (N, S, E or W)")),
        };

        Dms::create(degrees, minutes, seconds, hemisphere)
    }
}

// Unchecked wire form of a [`Dms`], validated through `Dms::create`
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct DmsParts {
    degrees: u32,
    minutes: u32,
    seconds: f64,
    hemisphere: Hemisphere,
}

#[cfg(feature = "serde")]
impl TryFrom<DmsParts> for Dms {
    type Error = Error;

    fn try_from(value: DmsParts) -> Result<Self, Self::Error> {
        Dms::create(value.degrees, value.minutes, value.seconds, value.hemisphere)
    }
}

impl ParseCoord for Dms {
    fn parse_coord(value: &str) -> Result<Self, Error> {
        Self::from_str(value)
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

fn skip_separators(chars: &mut Peekable<Chars<'_>>) {
    let is_separator = |c: &char| {
        c.is_whitespace()
            || DEGREE_MARKS.contains(*c)
            || MINUTE_MARKS.contains(*c)
            || SECOND_MARKS.contains(*c)
    };
    while chars.next_if(is_separator).is_some() {}
}

fn take_hemisphere(chars: &mut Peekable<Chars<'_>>) -> Option<Hemisphere> {
    let hemisphere = chars.peek().copied().and_then(Hemisphere::from_char)?;
    chars.next();
    Some(hemisphere)
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        digits.push(c);
    }
    (!digits.is_empty()).then_some(digits)
}

// Digits with at most one decimal point, e.g. `18`, `18.09`, `18.` or `.5`
fn take_decimal(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut number = take_digits(chars).unwrap_or_default();
    if chars.next_if_eq(&'.').is_some() {
        number.push('.');
        number.push_str(&take_digits(chars).unwrap_or_default());
    }
    number.chars().any(|c| c.is_ascii_digit()).then_some(number)
}
