//! Numeric count-up for stat labels.
//!
//! A label such as `$12,345` or `42` is parsed into a [`CountTarget`], then a
//! [`CountUp`] is sampled once per frame to produce the text to display. Labels
//! that do not start with a number are left alone.

/// Parsed stat label
#[derive(Debug, Clone, PartialEq)]
pub struct CountTarget {
    /// `"$"` for currency labels, empty otherwise
    pub prefix: &'static str,
    pub value: f64,
    /// Digits of the floored target, taken from the label itself when it is a
    /// plain integer so the final frame never shows float rounding
    whole: String,
}

impl CountTarget {
    /// Parse a displayed label. Thousands separators are ignored, and so is
    /// any text after the leading number (`500+` counts to `500`).
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        if let Some(rest) = text.strip_prefix('$') {
            if let Some(target) = Self::from_number(&rest.replace(',', ""), "$") {
                return Some(target);
            }
        }

        Self::from_number(&text.replace(',', ""), "")
    }

    fn from_number(text: &str, prefix: &'static str) -> Option<Self> {
        let number = leading_number(text)?;
        let value = number.parse::<f64>().ok().filter(|v| v.is_finite())?;
        let whole = integer_literal(number).unwrap_or_else(|| floored_digits(value));
        Some(Self {
            prefix,
            value,
            whole,
        })
    }

    /// Render an intermediate `value` the way this label is displayed
    pub fn render(&self, value: f64) -> String {
        format!("{}{}", self.prefix, format_thousands(value))
    }

    /// The text shown once the animation has finished
    pub fn final_text(&self) -> String {
        format!("{}{}", self.prefix, group_thousands(&self.whole))
    }
}

/// The leading decimal number of `text`, with optional fraction and exponent.
fn leading_number(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 || digits > 0 {
            digits += frac_end - (end + 1);
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    Some(&text[..end])
}

/// Canonical digits of a plain signed integer literal, or `None` when the
/// number has a fraction or exponent.
fn integer_literal(number: &str) -> Option<String> {
    let (negative, digits) = match number.as_bytes().first() {
        Some(b'-') => (true, &number[1..]),
        Some(b'+') => (false, &number[1..]),
        _ => (false, number),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let trimmed = digits.trim_start_matches('0');
    Some(match (trimmed.is_empty(), negative) {
        (true, _) => "0".to_string(),
        (false, true) => format!("-{trimmed}"),
        (false, false) => trimmed.to_string(),
    })
}

/// Digits of `value.floor()` without exponent notation
fn floored_digits(value: f64) -> String {
    let whole = value.floor();
    if whole == 0.0 {
        // Avoid rendering negative zero
        return "0".to_string();
    }
    format!("{whole:.0}")
}

/// Insert commas every three digits of an optionally signed integer string
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut out = String::with_capacity(sign.len() + digits.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Floor `value` and group the integer digits in threes with commas.
pub fn format_thousands(value: f64) -> String {
    group_thousands(&floored_digits(value))
}

/// Cubic ease-out: fast start, gentle landing
pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Text produced by one animation frame
#[derive(Debug, Clone, PartialEq)]
pub struct CountFrame {
    pub text: String,
    pub done: bool,
}

/// One running count-up from zero to a target
#[derive(Debug, Clone)]
pub struct CountUp {
    target: CountTarget,
    started_at: f64,
    duration_ms: f64,
}

impl CountUp {
    pub fn new(target: CountTarget, started_at: f64, duration_ms: f64) -> Self {
        Self {
            target,
            started_at,
            duration_ms,
        }
    }

    pub fn final_text(&self) -> String {
        self.target.final_text()
    }

    pub fn sample(&self, now: f64) -> CountFrame {
        let progress = if self.duration_ms > 0.0 {
            ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };

        if progress >= 1.0 {
            return CountFrame {
                text: self.target.final_text(),
                done: true,
            };
        }

        CountFrame {
            text: self.target.render(self.target.value * ease_out_cubic(progress)),
            done: false,
        }
    }
}
