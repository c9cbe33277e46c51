//! Helpers for building filtered listing queries

use sqlx::{QueryBuilder, Sqlite};

/// Escape `LIKE` wildcards so user input matches literally, and wrap it
/// for a substring match. Pair with `ESCAPE '\'`.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Accumulates `WHERE ... AND ...` clauses on a query builder
///
/// Conditions are conjunctive; a filter that is never added imposes no
/// constraint.
pub(crate) struct Conditions {
    any: bool,
}

impl Conditions {
    pub(crate) fn new() -> Self {
        Self { any: false }
    }

    fn next(&mut self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(if self.any { " AND " } else { " WHERE " });
        self.any = true;
    }

    /// `column LIKE '%needle%'`, skipped when `needle` is `None`
    pub(crate) fn contains(
        &mut self,
        qb: &mut QueryBuilder<'_, Sqlite>,
        column: &str,
        needle: Option<&str>,
    ) {
        if let Some(needle) = needle {
            self.next(qb);
            qb.push(column)
                .push(" LIKE ")
                .push_bind(contains_pattern(needle))
                .push(" ESCAPE '\\'");
        }
    }

    /// `column = value`, skipped when `value` is `None`
    pub(crate) fn equals(
        &mut self,
        qb: &mut QueryBuilder<'_, Sqlite>,
        column: &str,
        value: Option<i64>,
    ) {
        if let Some(value) = value {
            self.next(qb);
            qb.push(column).push(" = ").push_bind(value);
        }
    }
}
