//! Filter predicates
//!
//! The platform's filter language (`field eq "value" AND ...`) is routed, never
//! parsed. `FilterExpr` only offers the handful of constructors the client
//! itself needs; anything else goes through [`FilterExpr::raw`].

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterExpr(String);

impl FilterExpr {
    /// Use an arbitrary predicate as is
    pub fn raw(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    /// `field eq "value"`
    pub fn eq(field: &str, value: &str) -> Self {
        Self(format!("{} eq \"{}\"", field, value))
    }

    /// `self AND other`
    pub fn and(self, other: FilterExpr) -> Self {
        Self(format!("{} AND {}", self.0, other.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<FilterExpr> for String {
    fn from(expr: FilterExpr) -> Self {
        expr.0
    }
}

impl From<&str> for FilterExpr {
    fn from(expression: &str) -> Self {
        Self::raw(expression)
    }
}

impl From<String> for FilterExpr {
    fn from(expression: String) -> Self {
        Self::raw(expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq() {
        assert_eq!(FilterExpr::eq("email", "a@b.com").as_str(), r#"email eq "a@b.com""#);
    }

    #[test]
    fn test_and() {
        let expr = FilterExpr::eq("contact.email", "a@b.com").and(FilterExpr::eq("event.id", "ev-1"));
        assert_eq!(
            expr.to_string(),
            r#"contact.email eq "a@b.com" AND event.id eq "ev-1""#
        );
    }

    #[test]
    fn test_raw_is_untouched() {
        let expr = FilterExpr::raw("start ge '2024-01-01' & weird=stuff");
        assert_eq!(String::from(expr), "start ge '2024-01-01' & weird=stuff");
    }
}
