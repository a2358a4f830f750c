//! Positional `%`-style interpolation of translation values.
//!
//! A stored value such as `Hello, %s!` is filled in from an ordered list of
//! [`FormatArg`]s. Each conversion consumes exactly one argument; `%%` is a literal
//! percent sign. Every argument must be consumed.
//!
//! Supported conversion spec: `%[flags][width][.precision][length]conversion`
//!
//! | Part | Accepted |
//! |------|----------|
//! | flags | `-` `0` `+` space `#` |
//! | width / precision | decimal digits (`*` is rejected) |
//! | length | `h` `l` `L` (ignored) |
//! | conversion | `s` `r` `d` `i` `u` `f` `F` `x` `X` `o` `c` `%` |

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

/// A single positional argument for [`interpolate`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Str(String),
    Int(i64),
    Float(f64),
}

impl FormatArg {
    /// Short type name used in error messages.
    const fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "str",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&float_to_string(*v)),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for FormatArg {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<char> for FormatArg {
    fn from(value: char) -> Self {
        Self::Str(value.to_string())
    }
}

/// Lossless integer conversions into [`FormatArg::Int`].
macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FormatArg {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for FormatArg {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Defines errors that may occur while interpolating a value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// More conversions than supplied arguments
    #[error("not enough arguments for format string ({supplied} supplied)")]
    NotEnoughArguments { supplied: usize },

    /// Arguments left over after the last conversion
    #[error("not all arguments converted during string formatting ({consumed} of {supplied} used)")]
    TooManyArguments { consumed: usize, supplied: usize },

    /// The value ends in the middle of a conversion spec
    #[error("incomplete format")]
    IncompleteFormat,

    /// Unknown conversion character, or a `*` width/precision
    #[error("unsupported format character '{conversion}' at index {position}")]
    UnsupportedConversion { conversion: char, position: usize },

    /// Field width above `i32::MAX`
    #[error("width too big at index {position}")]
    WidthTooBig { position: usize },

    /// Precision above `i32::MAX`
    #[error("precision too big at index {position}")]
    PrecisionTooBig { position: usize },

    /// The argument type does not fit the conversion
    #[error("%{conversion} format: {expected} is required, not {found}")]
    TypeMismatch { conversion: char, expected: &'static str, found: &'static str },
}

/// Flags of one conversion spec.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
struct Flags {
    /// `-`: pad on the right
    left: bool,
    /// `0`: pad numbers with zeros
    zero: bool,
    /// `+`: always print a sign
    plus: bool,
    /// ` `: space in place of a `+` sign
    space: bool,
    /// `#`: `0x`/`0X`/`0o` prefixes
    alternate: bool,
}

/// A parsed `%...` conversion spec.
#[derive(Debug, Clone, Copy)]
struct ConversionSpec {
    /// Flag characters
    flags: Flags,
    /// Minimum field width in characters
    width: Option<usize>,
    /// Precision (`%.2f`, `%.3s`)
    precision: Option<usize>,
    /// Conversion character
    conversion: char,
}

/// Interpolates `template` against `args`, in order.
///
/// # Examples
/// ```
/// use lex_i18n::format::{FormatArg, interpolate};
///
/// let args = [FormatArg::from("World"), FormatArg::Int(3)];
/// let text = interpolate("Hello, %s! You have %d new messages.", &args).unwrap();
/// assert_eq!(text, "Hello, World! You have 3 new messages.");
/// ```
///
/// # Errors
/// Returns a [`FormatError`] when the placeholders and arguments do not match.
pub fn interpolate(template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut consumed = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let spec = parse_spec(&mut chars)?;
        if spec.conversion == '%' {
            out.push('%');
            continue;
        }

        let arg = remaining
            .next()
            .ok_or(FormatError::NotEnoughArguments { supplied: args.len() })?;
        consumed += 1;
        render(&spec, arg, &mut out)?;
    }

    if consumed < args.len() {
        return Err(FormatError::TooManyArguments { consumed, supplied: args.len() });
    }

    Ok(out)
}

/// Parses the spec following a `%`, consuming through the conversion character.
fn parse_spec(chars: &mut Peekable<CharIndices<'_>>) -> Result<ConversionSpec, FormatError> {
    let mut flags = Flags::default();
    while let Some(&(_, c)) = chars.peek() {
        match c {
            '-' => flags.left = true,
            '0' => flags.zero = true,
            '+' => flags.plus = true,
            ' ' => flags.space = true,
            '#' => flags.alternate = true,
            _ => break,
        }
        chars.next();
    }

    let width = parse_number(chars, |position| FormatError::WidthTooBig { position })?;

    let precision = if chars.next_if(|&(_, c)| c == '.').is_some() {
        Some(
            parse_number(chars, |position| FormatError::PrecisionTooBig { position })?
                .unwrap_or(0),
        )
    } else {
        None
    };

    while chars.next_if(|&(_, c)| matches!(c, 'h' | 'l' | 'L')).is_some() {}

    let (position, conversion) = chars.next().ok_or(FormatError::IncompleteFormat)?;
    if !matches!(conversion, 's' | 'r' | 'd' | 'i' | 'u' | 'f' | 'F' | 'x' | 'X' | 'o' | 'c' | '%')
    {
        return Err(FormatError::UnsupportedConversion { conversion, position });
    }

    Ok(ConversionSpec { flags, width, precision, conversion })
}

/// Largest accepted width or precision.
const MAX_FIELD: usize = i32::MAX as usize;

/// Parses an optional run of decimal digits, at most [`MAX_FIELD`].
///
/// `too_big` builds the error from the index of the first digit.
fn parse_number(
    chars: &mut Peekable<CharIndices<'_>>,
    too_big: fn(usize) -> FormatError,
) -> Result<Option<usize>, FormatError> {
    let Some(&(start, first)) = chars.peek() else {
        return Ok(None);
    };
    if first == '*' {
        return Err(FormatError::UnsupportedConversion { conversion: '*', position: start });
    }

    let mut value: Option<usize> = None;
    while let Some((_, c)) = chars.next_if(|&(_, c)| c.is_ascii_digit()) {
        let digit = c.to_digit(10).and_then(|d| usize::try_from(d).ok()).unwrap_or(0);
        let next = value
            .unwrap_or(0)
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .filter(|&v| v <= MAX_FIELD)
            .ok_or_else(|| too_big(start))?;
        value = Some(next);
    }
    Ok(value)
}

/// Renders one argument according to `spec` and appends it to `out`.
fn render(spec: &ConversionSpec, arg: &FormatArg, out: &mut String) -> Result<(), FormatError> {
    match spec.conversion {
        's' | 'r' => {
            let text = if spec.conversion == 'r' { repr(arg) } else { arg.to_string() };
            let text = match spec.precision {
                Some(precision) => text.chars().take(precision).collect(),
                None => text,
            };
            pad_text(out, &text, spec);
        }
        'c' => {
            let c = char_argument(arg)?;
            pad_text(out, &c.to_string(), spec);
        }
        'd' | 'i' | 'u' => {
            let (negative, mut digits) = decimal_argument(spec.conversion, arg)?;
            if let Some(precision) = spec.precision {
                digits = format!("{digits:0>precision$}");
            }
            pad_number(out, negative, "", &digits, spec);
        }
        'x' | 'X' | 'o' => {
            let value = integer_argument(spec.conversion, arg)?;
            let magnitude = value.unsigned_abs();
            let (digits, prefix) = match spec.conversion {
                'x' => (format!("{magnitude:x}"), "0x"),
                'X' => (format!("{magnitude:X}"), "0X"),
                _ => (format!("{magnitude:o}"), "0o"),
            };
            let prefix = if spec.flags.alternate { prefix } else { "" };
            pad_number(out, value < 0, prefix, &digits, spec);
        }
        _ => {
            let value = float_argument(spec.conversion, arg)?;
            let precision = spec.precision.unwrap_or(6);
            let digits = if value.is_nan() {
                "nan".to_string()
            } else if value.is_infinite() {
                "inf".to_string()
            } else {
                format!("{:.precision$}", value.abs())
            };
            let digits = if spec.conversion == 'F' { digits.to_uppercase() } else { digits };
            // nan/inf are never zero padded
            let spec = if value.is_finite() {
                *spec
            } else {
                ConversionSpec { flags: Flags { zero: false, ..spec.flags }, ..*spec }
            };
            pad_number(out, value.is_sign_negative() && !value.is_nan(), "", &digits, &spec);
        }
    }
    Ok(())
}

/// Pads a text conversion to the field width. The `0` flag does not apply to text.
fn pad_text(out: &mut String, text: &str, spec: &ConversionSpec) {
    let fill = spec.width.unwrap_or(0).saturating_sub(text.chars().count());
    if spec.flags.left {
        out.push_str(text);
        out.extend(std::iter::repeat_n(' ', fill));
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(text);
    }
}

/// Assembles sign, prefix and digits, then pads to the field width.
fn pad_number(out: &mut String, negative: bool, prefix: &str, digits: &str, spec: &ConversionSpec) {
    let sign = if negative {
        "-"
    } else if spec.flags.plus {
        "+"
    } else if spec.flags.space {
        " "
    } else {
        ""
    };

    let len = sign.len() + prefix.len() + digits.chars().count();
    let fill = spec.width.unwrap_or(0).saturating_sub(len);

    if spec.flags.left {
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(digits);
        out.extend(std::iter::repeat_n(' ', fill));
    } else if spec.flags.zero {
        out.push_str(sign);
        out.push_str(prefix);
        out.extend(std::iter::repeat_n('0', fill));
        out.push_str(digits);
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(digits);
    }
}

/// Sign and decimal digits for `%d`-like conversions.
///
/// Floats are truncated toward zero and rendered from the float itself, so values
/// outside the `i64` range keep all their digits.
fn decimal_argument(conversion: char, arg: &FormatArg) -> Result<(bool, String), FormatError> {
    match arg {
        FormatArg::Int(v) => Ok((*v < 0, v.unsigned_abs().to_string())),
        FormatArg::Float(v) if v.is_finite() => {
            let truncated = v.trunc();
            Ok((truncated < 0.0, format!("{:.0}", truncated.abs())))
        }
        FormatArg::Float(_) => Err(FormatError::TypeMismatch {
            conversion,
            expected: "a finite number",
            found: arg.type_name(),
        }),
        FormatArg::Str(_) => Err(FormatError::TypeMismatch {
            conversion,
            expected: "a real number",
            found: arg.type_name(),
        }),
    }
}

/// Integer value for `%x`/`%X`/`%o`.
fn integer_argument(conversion: char, arg: &FormatArg) -> Result<i64, FormatError> {
    match arg {
        FormatArg::Int(v) => Ok(*v),
        _ => Err(FormatError::TypeMismatch {
            conversion,
            expected: "an integer",
            found: arg.type_name(),
        }),
    }
}

/// Float value for `%f`/`%F`.
#[allow(clippy::cast_precision_loss)]
fn float_argument(conversion: char, arg: &FormatArg) -> Result<f64, FormatError> {
    match arg {
        FormatArg::Float(v) => Ok(*v),
        FormatArg::Int(v) => Ok(*v as f64),
        FormatArg::Str(_) => Err(FormatError::TypeMismatch {
            conversion,
            expected: "a real number",
            found: arg.type_name(),
        }),
    }
}

/// Character for `%c`: a code point or a one-character string.
fn char_argument(arg: &FormatArg) -> Result<char, FormatError> {
    let mismatch = || FormatError::TypeMismatch {
        conversion: 'c',
        expected: "an int or char",
        found: arg.type_name(),
    };
    match arg {
        FormatArg::Int(v) => u32::try_from(*v).ok().and_then(char::from_u32).ok_or_else(mismatch),
        FormatArg::Str(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(mismatch()),
            }
        }
        FormatArg::Float(_) => Err(mismatch()),
    }
}

/// Quoted representation for `%r`.
fn repr(arg: &FormatArg) -> String {
    match arg {
        FormatArg::Str(s) if s.contains('\'') && !s.contains('"') => {
            format!("\"{}\"", s.replace('\\', "\\\\"))
        }
        FormatArg::Str(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        _ => arg.to_string(),
    }
}

/// Shortest round-trip form of a float: integral values keep a `.0`, and decimal
/// exponents below -4 or from 16 up switch to `1e+20` / `1e-07` notation.
fn float_to_string(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{value:e}");
    if let Some((mantissa, exponent)) = scientific.split_once('e')
        && let Ok(exponent) = exponent.parse::<i32>()
        && !(-4..16).contains(&exponent)
    {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }

    let text = value.to_string();
    if text.contains('.') { text } else { format!("{text}.0") }
}
