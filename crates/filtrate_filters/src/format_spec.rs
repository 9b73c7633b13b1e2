//! The format spec applied after `:` in a template field.
//!
//! ```text
//! [[fill]align][sign][#][0][width][grouping][.precision][type]
//! align     <  >  ^  =
//! sign      +  -  space
//! grouping  ,  _
//! type      s | d b o x X | f F e E g G %
//! ```
//!
//! Parsing happens once per template; applying a spec checks it against the
//! value's type.

use filtrate_foundation::{Type, Value};

/// Failure message; the template attaches its source text.
type SpecResult<T> = std::result::Result<T, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    AfterSign,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sign {
    Minus,
    Plus,
    Space,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Grouping {
    Comma,
    Underscore,
}

impl Grouping {
    const fn separator(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Underscore => '_',
        }
    }
}

/// A parsed format spec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FormatSpec {
    fill: Option<char>,
    align: Option<Align>,
    sign: Option<Sign>,
    alternate: bool,
    zero: bool,
    width: usize,
    grouping: Option<Grouping>,
    precision: Option<usize>,
    kind: Option<char>,
}

const fn align_of(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        '=' => Some(Align::AfterSign),
        _ => None,
    }
}

impl FormatSpec {
    /// Parses the text between `:` and the closing brace.
    pub(crate) fn parse(spec: &str) -> SpecResult<Self> {
        let chars: Vec<char> = spec.chars().collect();
        let mut pos = 0;
        let mut parsed = Self {
            fill: None,
            align: None,
            sign: None,
            alternate: false,
            zero: false,
            width: 0,
            grouping: None,
            precision: None,
            kind: None,
        };

        match (chars.first(), chars.get(1).copied().and_then(align_of)) {
            (Some(&fill), Some(align)) => {
                parsed.fill = Some(fill);
                parsed.align = Some(align);
                pos = 2;
            }
            (Some(&c), None) => {
                if let Some(align) = align_of(c) {
                    parsed.align = Some(align);
                    pos = 1;
                }
            }
            (None, _) => {}
        }

        parsed.sign = match chars.get(pos) {
            Some('+') => Some(Sign::Plus),
            Some('-') => Some(Sign::Minus),
            Some(' ') => Some(Sign::Space),
            _ => None,
        };
        if parsed.sign.is_some() {
            pos += 1;
        }
        if chars.get(pos) == Some(&'#') {
            parsed.alternate = true;
            pos += 1;
        }
        if chars.get(pos) == Some(&'0') {
            parsed.zero = true;
            pos += 1;
        }

        let (width, next) = digits(&chars, pos);
        parsed.width = width.map_or(Ok(0), |w| parse_count(&w, "width"))?;
        pos = next;

        parsed.grouping = match chars.get(pos) {
            Some(',') => Some(Grouping::Comma),
            Some('_') => Some(Grouping::Underscore),
            _ => None,
        };
        if parsed.grouping.is_some() {
            pos += 1;
        }

        if chars.get(pos) == Some(&'.') {
            let (precision, next) = digits(&chars, pos + 1);
            let precision = precision.ok_or("format specifier missing precision")?;
            parsed.precision = Some(parse_count(&precision, "precision")?);
            pos = next;
        }

        match &chars[pos..] {
            [] => {}
            [kind] if "sdboxXfFeEgG%".contains(*kind) => parsed.kind = Some(*kind),
            [kind] => return Err(format!("unknown format code '{kind}'")),
            _ => return Err(format!("invalid format specifier {spec:?}")),
        }
        Ok(parsed)
    }

    /// Formats `value` according to this spec.
    pub(crate) fn apply(&self, value: &Value) -> SpecResult<String> {
        match value {
            Value::String(s) => self.format_text(s),
            Value::Int(n) => self.format_int(i128::from(*n), Type::Int),
            // Booleans format as integers once a spec is present.
            Value::Bool(b) => self.format_int(i128::from(*b), Type::Bool),
            Value::Float(x) => self.format_float(*x, Type::Float),
            Value::Complex(c) => {
                if self.kind.is_some() || self.precision.is_some() || self.grouping.is_some() {
                    return Err(Self::unsupported_for(Type::Complex));
                }
                Ok(self.pad("", &c.to_string(), Align::Right, true))
            }
            other => Err(format!(
                "format spec is not supported for {} values",
                other.value_type()
            )),
        }
    }

    fn format_text(&self, text: &str) -> SpecResult<String> {
        if !matches!(self.kind, None | Some('s')) {
            return Err(self.unknown_code(Type::String));
        }
        if self.sign.is_some() {
            return Err("sign not allowed in string format specifier".to_string());
        }
        if self.alternate {
            return Err("alternate form (#) not allowed in string format specifier".to_string());
        }
        if self.grouping.is_some() {
            return Err("cannot group digits of a string".to_string());
        }
        if self.align == Some(Align::AfterSign) {
            return Err("'=' alignment not allowed in string format specifier".to_string());
        }
        let body: String = match self.precision {
            Some(limit) => text.chars().take(limit).collect(),
            None => text.to_string(),
        };
        Ok(self.pad("", &body, Align::Left, false))
    }

    fn format_int(&self, n: i128, ty: Type) -> SpecResult<String> {
        let magnitude = n.unsigned_abs();
        let (body, prefix) = match self.kind {
            None | Some('d') => {
                if self.precision.is_some() {
                    return Err("precision not allowed in integer format specifier".to_string());
                }
                (self.group(&magnitude.to_string(), 3), "")
            }
            Some(kind @ ('b' | 'o' | 'x' | 'X')) => {
                if self.precision.is_some() {
                    return Err("precision not allowed in integer format specifier".to_string());
                }
                if self.grouping == Some(Grouping::Comma) {
                    return Err(format!("cannot specify ',' with '{kind}'"));
                }
                let (digits, prefix) = match kind {
                    'b' => (format!("{magnitude:b}"), "0b"),
                    'o' => (format!("{magnitude:o}"), "0o"),
                    'x' => (format!("{magnitude:x}"), "0x"),
                    _ => (format!("{magnitude:X}"), "0X"),
                };
                (self.group(&digits, 4), if self.alternate { prefix } else { "" })
            }
            #[allow(clippy::cast_precision_loss)]
            Some('f' | 'F' | 'e' | 'E' | 'g' | 'G' | '%') => {
                return self.format_float(n as f64, ty);
            }
            Some(_) => return Err(self.unknown_code(ty)),
        };
        let sign = format!("{}{prefix}", self.sign_text(n < 0));
        Ok(self.pad(&sign, &body, Align::Right, true))
    }

    fn format_float(&self, x: f64, ty: Type) -> SpecResult<String> {
        if self.alternate {
            return Err(format!("alternate form (#) is not supported for {ty} values"));
        }
        let upper = matches!(self.kind, Some('F' | 'E' | 'G'));
        let magnitude = x.abs();
        let body = if x.is_nan() {
            "nan".to_string()
        } else if x.is_infinite() {
            "inf".to_string()
        } else {
            match self.kind {
                None => match self.precision {
                    None => Value::Float(magnitude).to_string(),
                    Some(p) => general(magnitude, p, true),
                },
                Some('f' | 'F') => {
                    let precision = self.precision.unwrap_or(6);
                    format!("{magnitude:.precision$}")
                }
                Some('e' | 'E') => scientific(magnitude, self.precision.unwrap_or(6)),
                Some('g' | 'G') => general(magnitude, self.precision.unwrap_or(6), false),
                Some('%') => format!("{:.*}%", self.precision.unwrap_or(6), magnitude * 100.0),
                Some(_) => return Err(self.unknown_code(ty)),
            }
        };
        let body = if upper { body.to_uppercase() } else { body };
        let split = body.find(|c: char| !c.is_ascii_digit()).unwrap_or(body.len());
        let body = format!("{}{}", self.group(&body[..split], 3), &body[split..]);
        let negative = x.is_sign_negative() && !x.is_nan();
        Ok(self.pad(self.sign_text(negative), &body, Align::Right, true))
    }

    fn sign_text(&self, negative: bool) -> &'static str {
        match (negative, self.sign) {
            (true, _) => "-",
            (false, Some(Sign::Plus)) => "+",
            (false, Some(Sign::Space)) => " ",
            (false, _) => "",
        }
    }

    /// Inserts the grouping separator into a run of digits.
    fn group(&self, digits: &str, every: usize) -> String {
        let Some(grouping) = self.grouping else {
            return digits.to_string();
        };
        let count = digits.chars().count();
        let mut out = String::with_capacity(digits.len() + count / every);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (count - i) % every == 0 {
                out.push(grouping.separator());
            }
            out.push(c);
        }
        out
    }

    fn pad(&self, sign: &str, body: &str, default: Align, numeric: bool) -> String {
        let len = sign.chars().count() + body.chars().count();
        if self.width <= len {
            return format!("{sign}{body}");
        }
        let zero_fill = self.zero && self.fill.is_none() && self.align.is_none();
        let fill = self.fill.unwrap_or(if zero_fill { '0' } else { ' ' });
        let align = match self.align {
            Some(align) => align,
            None if zero_fill && numeric => Align::AfterSign,
            None => default,
        };
        let padding = self.width - len;
        let repeat = |n: usize| fill.to_string().repeat(n);
        match align {
            Align::Left => format!("{sign}{body}{}", repeat(padding)),
            Align::Right => format!("{}{sign}{body}", repeat(padding)),
            Align::Center => {
                let left = padding / 2;
                format!("{}{sign}{body}{}", repeat(left), repeat(padding - left))
            }
            Align::AfterSign => format!("{sign}{}{body}", repeat(padding)),
        }
    }

    fn unknown_code(&self, ty: Type) -> String {
        match self.kind {
            Some(kind) => format!("unknown format code '{kind}' for {ty} values"),
            None => format!("invalid format spec for {ty} values"),
        }
    }

    fn unsupported_for(ty: Type) -> String {
        format!("only fill, alignment and width are supported for {ty} values")
    }
}

/// Collects the run of ASCII digits starting at `pos`.
fn digits(chars: &[char], pos: usize) -> (Option<String>, usize) {
    let run: String = chars
        .iter()
        .skip(pos)
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let next = pos + run.len();
    ((!run.is_empty()).then_some(run), next)
}

fn parse_count(text: &str, what: &str) -> SpecResult<usize> {
    text.parse()
        .map_err(|_| format!("too many decimal digits in format {what}"))
}

/// Exponent notation with a signed, at least two-digit exponent (`1.50e+03`).
fn scientific(x: f64, precision: usize) -> String {
    let raw = format!("{x:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            format!("{mantissa}e{}{:02}", if exponent < 0 { '-' } else { '+' }, exponent.abs())
        }
        None => raw,
    }
}

/// General format: fixed or exponent notation depending on magnitude, with
/// trailing zeros removed. `keep_point` keeps at least one fractional digit
/// in fixed notation.
fn general(x: f64, precision: usize, keep_point: bool) -> String {
    let precision = precision.max(1);
    let exponent = if x == 0.0 {
        0
    } else {
        let places = precision - 1;
        let raw = format!("{x:.places$e}");
        raw.split_once('e')
            .and_then(|(_, e)| e.parse::<i64>().ok())
            .unwrap_or(0)
    };
    let digits = i64::try_from(precision).unwrap_or(i64::MAX);
    if (-4..digits).contains(&exponent) {
        let decimals = usize::try_from(digits - 1 - exponent).unwrap_or(0);
        let fixed = trim_fraction(&format!("{x:.decimals$}"));
        if keep_point && !fixed.contains('.') {
            format!("{fixed}.0")
        } else {
            fixed
        }
    } else {
        let raw = scientific(x, precision - 1);
        match raw.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e{exponent}", trim_fraction(mantissa)),
            None => raw,
        }
    }
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}
