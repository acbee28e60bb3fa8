use serde::Serialize;

/// A single cell of a record table.
///
/// `Missing` is the absent-value marker: empty input cells, and cells filled in
/// when tables with different columns are concatenated.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    #[default]
    Missing,
}

impl Value {
    /// Type a raw text cell: empty → Missing, then integer, float, text.
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Value::Missing;
        }

        if let Ok(n) = trimmed.parse::<i64>() {
            return Value::Int(n);
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return Value::Float(n);
            }
        }

        Value::Text(trimmed.to_string())
    }

    /// Wrap a float, collapsing integral values to `Int` (spreadsheets store
    /// every number as a double).
    pub fn from_number(n: f64) -> Self {
        if !n.is_finite() {
            Value::Missing
        } else if n.fract() == 0.0 && n.abs() < 1e15 {
            Value::Int(n as i64)
        } else {
            Value::Float(n)
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn flag(on: bool) -> Self {
        Value::Int(on as i64)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view. Text is parsed so numbers stored as text still compare.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Value::Missing => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// String form used for categorical encoding. Missing encodes as `nan` so
    /// absent cells form their own category.
    pub fn category_key(&self) -> String {
        match self {
            Value::Missing => "nan".to_string(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Missing => Ok(()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_input_types_cells() {
        assert_eq!(Value::from_input(""), Value::Missing);
        assert_eq!(Value::from_input("   "), Value::Missing);
        assert_eq!(Value::from_input("42"), Value::Int(42));
        assert_eq!(Value::from_input(" -3 "), Value::Int(-3));
        assert_eq!(Value::from_input("2.5"), Value::Float(2.5));
        assert_eq!(Value::from_input("Muy Alto"), Value::text("Muy Alto"));
        assert_eq!(Value::from_input("inf"), Value::text("inf"));
    }

    #[test]
    fn from_number_collapses_integral() {
        assert_eq!(Value::from_number(7.0), Value::Int(7));
        assert_eq!(Value::from_number(7.25), Value::Float(7.25));
        assert_eq!(Value::from_number(f64::NAN), Value::Missing);
    }

    #[test]
    fn numeric_view() {
        assert_eq!(Value::Int(4).as_f64(), Some(4.0));
        assert_eq!(Value::text("4.5").as_f64(), Some(4.5));
        assert_eq!(Value::text("High").as_f64(), None);
        assert_eq!(Value::Missing.as_f64(), None);
    }

    #[test]
    fn display_and_category_key() {
        assert_eq!(Value::Int(3).to_string(), "3");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Missing.to_string(), "");
        assert_eq!(Value::Missing.category_key(), "nan");
        assert_eq!(Value::text("Low").category_key(), "Low");
    }
}
