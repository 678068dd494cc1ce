use serde_json::Value;

use super::{cell, flatten};

/// Headline fields in priority order, matched against the end of the
/// flattened field name.
const PRIORITY_FIELDS: [&str; 8] = [
    "score",
    "ratio_pct",
    "monthly_payment",
    "final_value",
    "operational_years",
    "total_return_years.period",
    "profit_break_even_years",
    "interest_saving_range",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known headline fields in priority order, then falls back to
/// the first field of the result.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let mut rows = Vec::new();
    flatten("", result, &mut rows);

    for key in PRIORITY_FIELDS {
        let suffix = format!(".{key}");
        let found = rows
            .iter()
            .find(|(field, val)| (field == key || field.ends_with(&suffix)) && !val.is_null());
        if let Some((_, val)) = found {
            return cell(val);
        }
    }

    match rows.first() {
        Some((field, val)) if !field.is_empty() => format!("{}: {}", field, cell(val)),
        Some((_, val)) => cell(val),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_score_wins_over_payment() {
        let value = json!({"result": {
            "loan_terms": {"monthly_payment": "3725.69"},
            "investment_score": {"score": "1"}
        }});
        assert_eq!(headline(&value), "1");
    }

    #[test]
    fn test_null_headline_is_skipped() {
        let value = json!({"result": {
            "operational_years": null,
            "total_return_years": {"status": "reached", "period": 11}
        }});
        assert_eq!(headline(&value), "11");
    }

    #[test]
    fn test_falls_back_to_first_field() {
        let value = json!({"result": {"alpha": "x"}});
        assert_eq!(headline(&value), "alpha: x");
    }
}
