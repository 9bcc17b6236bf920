use crate::bodies::PositionVector;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Matches `X = <num> ... Y = <num> ... Z = <num>` in free text, scientific
/// notation included. `(?s)` lets the gaps span line breaks.
static RESULT_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)X =\s*([-\d.eE+]+).*?Y =\s*([-\d.eE+]+).*?Z =\s*([-\d.eE+]+)")
        .expect("hard-coded pattern")
});

/// Ordered extraction strategies over the upstream response document.
///
/// The ephemeris API has shipped several response shapes; each tier is a
/// pure probe for one of them. Order matters and the first success wins.
const STRATEGIES: [fn(&Value) -> Option<PositionVector>; 3] =
    [from_vectors_array, from_data_array, from_result_text];

/// Extracts a heliocentric position from whatever shape the upstream
/// returned, or `None` when no known shape matches.
///
/// `None` is a hard failure for the requested body: callers must not
/// substitute a zero vector.
pub fn extract(response: &Value) -> Option<PositionVector> {
    STRATEGIES.iter().find_map(|tier| tier(response))
}

/// Numeric coercion in the upstream's loose style: JSON numbers and
/// numeric strings both count, NaN rejects the candidate.
fn coerce(field: &Value) -> Option<f64> {
    let n = match field {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (!n.is_nan()).then_some(n)
}

fn component(candidate: &Value, lower: &str, upper: &str) -> Option<f64> {
    candidate.get(lower).or_else(|| candidate.get(upper)).and_then(coerce)
}

/// Scalar `x/X`, `y/Y`, `z/Z` fields. All three or nothing.
fn from_fields(candidate: &Value) -> Option<PositionVector> {
    Some(PositionVector::new(
        component(candidate, "x", "X")?,
        component(candidate, "y", "Y")?,
        component(candidate, "z", "Z")?,
    ))
}

/// A `position` array holding `[x, y, z]`.
fn from_position_array(candidate: &Value) -> Option<PositionVector> {
    let arr = candidate.get("position")?.as_array()?;
    Some(PositionVector::new(
        coerce(arr.first()?)?,
        coerce(arr.get(1)?)?,
        coerce(arr.get(2)?)?,
    ))
}

fn candidate_vector(candidate: &Value) -> Option<PositionVector> {
    from_fields(candidate).or_else(|| from_position_array(candidate))
}

/// Tier 1: `response.vectors[0]`.
fn from_vectors_array(response: &Value) -> Option<PositionVector> {
    candidate_vector(response.get("vectors")?.as_array()?.first()?)
}

fn exposes_position(element: &Value) -> bool {
    element.get("position").is_some()
        || (element.get("x").is_some() && element.get("y").is_some() && element.get("z").is_some())
}

/// Tier 2: first element of `response.data[]` that carries position data.
///
/// Only that element is considered; if its fields fail coercion the whole
/// tier is rejected rather than scanning further elements.
fn from_data_array(response: &Value) -> Option<PositionVector> {
    let element = response.get("data")?.as_array()?.iter().find(|el| exposes_position(el))?;
    candidate_vector(element)
}

/// Tier 3: regex over the free-text `result` field.
fn from_result_text(response: &Value) -> Option<PositionVector> {
    let text = response.get("result")?.as_str()?;
    let caps = RESULT_TEXT.captures(text)?;
    let parse = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|v| !v.is_nan())
    };
    Some(PositionVector::new(parse(1)?, parse(2)?, parse(3)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const X: f64 = 2.069_270_462_897_461e8;
    const Y: f64 = -1.863_599_637_904_654e7;
    const Z: f64 = -5.484_784_277_857_619e6;

    fn assert_expected(vec: PositionVector) {
        assert!((vec.x_km - X).abs() < 1.0);
        assert!((vec.y_km - Y).abs() < 1.0);
        assert!((vec.z_km - Z).abs() < 1.0);
    }

    #[test]
    fn tier_one_scalar_fields() {
        let doc = json!({ "vectors": [{ "x": X, "y": Y, "z": Z }] });
        assert_expected(extract(&doc).unwrap());
    }

    #[test]
    fn tier_one_uppercase_and_string_numbers() {
        let doc = json!({ "vectors": [{
            "X": "2.069270462897461E+08",
            "Y": "-1.863599637904654E+07",
            "Z": "-5.484784277857619E+06",
        }] });
        assert_expected(extract(&doc).unwrap());
    }

    #[test]
    fn tier_one_position_array() {
        let doc = json!({ "vectors": [{ "position": [X, Y, Z] }] });
        assert_expected(extract(&doc).unwrap());
    }

    #[test]
    fn tier_two_first_matching_element() {
        let doc = json!({ "data": [
            { "jd": 2460676.5 },
            { "position": [X, Y, Z] },
            { "x": 0.0, "y": 0.0, "z": 0.0 },
        ] });
        assert_expected(extract(&doc).unwrap());
    }

    #[test]
    fn tier_three_free_text() {
        let doc = json!({ "result": "$$SOE\n2460676.500000000 = A.D. 2025-Jan-01 00:00:00.0000 TDB \n X = 2.069270462897461E+08 Y =-1.863599637904654E+07 Z =-5.484784277857619E+06\n$$EOE" });
        assert_expected(extract(&doc).unwrap());
    }

    #[test]
    fn tiers_yield_identical_vectors_for_equivalent_input() {
        let tier1 = extract(&json!({ "vectors": [{ "x": X, "y": Y, "z": Z }] })).unwrap();
        let tier2 = extract(&json!({ "data": [{ "x": X, "y": Y, "z": Z }] })).unwrap();
        let tier3 = extract(&json!({ "result": format!("X = {X:E} Y = {Y:E} Z = {Z:E}") })).unwrap();
        assert_eq!(tier1, tier2);
        assert!((tier1.x_km - tier3.x_km).abs() < 1.0);
        assert!((tier1.y_km - tier3.y_km).abs() < 1.0);
        assert!((tier1.z_km - tier3.z_km).abs() < 1.0);
    }

    #[test]
    fn rejected_candidate_falls_through_to_later_tier() {
        // Tier 1 candidate has a non-numeric component, tier 3 still wins.
        let doc = json!({
            "vectors": [{ "x": "n/a", "y": Y, "z": Z }],
            "result": format!("X = {X:E} Y = {Y:E} Z = {Z:E}"),
        });
        assert_expected(extract(&doc).unwrap());
    }

    #[test]
    fn no_partial_vectors() {
        let doc = json!({ "vectors": [{ "x": X, "y": Y }] });
        assert!(extract(&doc).is_none());
    }

    #[test]
    fn unrecognized_shape_is_not_found() {
        assert!(extract(&json!({})).is_none());
        assert!(extract(&json!({ "vectors": [] })).is_none());
        assert!(extract(&json!({ "data": [{ "jd": 1.0 }] })).is_none());
        assert!(extract(&json!({ "result": "no vector table here" })).is_none());
        assert!(extract(&json!({ "result": 42 })).is_none());
    }
}
