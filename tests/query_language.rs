//! Query Language Tests
//!
//! Properties of the parse → compile → validate pipeline:
//! - compiling the same expression twice is deterministic
//! - builder-rendered clauses parse back to the same criteria
//! - errors are single-cause and reported in a fixed order

use svcreg::query::{
    build_query, compile_expression, to_expression, Criterion, Operator, OperatorInfo, QueryError,
    QueryType, OPERATORS,
};
use svcreg::schema::{FieldType, ResourceType};

// =============================================================================
// Helper Functions
// =============================================================================

fn instances(field: Option<&str>, label: Option<&str>) -> Result<svcreg::query::Query, QueryError> {
    build_query(field, label, &ResourceType::ServiceInstances.schema())
}

fn kind(result: Result<svcreg::query::Query, QueryError>) -> &'static str {
    match result {
        Ok(_) => "Ok",
        Err(err) => err.kind(),
    }
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Same expression compiles to structurally equal criteria every time.
#[test]
fn test_compile_is_deterministic() {
    let expr = "platform_id in [a||b||c]|generation gte 2|context = {\"b\": 1, \"a\": 2}";
    let first = instances(Some(expr), None).unwrap();
    for _ in 0..50 {
        assert_eq!(instances(Some(expr), None).unwrap(), first);
    }
}

/// Builder output renders to text that compiles back to the same criteria.
#[test]
fn test_builder_round_trip() {
    let criteria = vec![
        Criterion::field("name").eq("db"),
        Criterion::field("platform_id").not_in(["p1", "p2"]),
        Criterion::field("generation").gt("1"),
        Criterion::field("generation").lte("9"),
        Criterion::field("dashboard_url").eq_or_nil("http://x"),
    ];
    let expr = to_expression(&criteria);
    let compiled = compile_expression(
        &expr,
        QueryType::Field,
        &ResourceType::ServiceInstances.schema(),
    )
    .unwrap();
    assert_eq!(compiled, criteria);
}

// =============================================================================
// Operator Table Tests
// =============================================================================

fn operands(info: &OperatorInfo) -> Vec<&'static str> {
    if info.multi_value_allowed {
        vec!["1", "2"]
    } else {
        vec!["1"]
    }
}

#[test]
fn test_every_operator_compiles_on_a_number_field() {
    for info in OPERATORS.iter() {
        let criterion = Criterion::field("generation").op(info.operator, operands(info));
        let query = instances(Some(&criterion.to_clause()), None);
        assert!(query.is_ok(), "{} failed: {:?}", info.token, query);
        assert_eq!(query.unwrap().field_criteria, vec![criterion]);
    }
}

#[test]
fn test_only_eqornil_is_field_only() {
    for info in OPERATORS.iter() {
        let criterion = Criterion::label("replicas").op(info.operator, operands(info));
        let result = instances(None, Some(&criterion.to_clause()));
        if info.operator == Operator::EqualOrNil {
            assert_eq!(kind(result), "OperatorNotAllowed");
        } else {
            assert!(result.is_ok(), "{} rejected on labels", info.token);
        }
    }
}

// =============================================================================
// Error Ordering Tests
// =============================================================================

/// A type error in a later clause wins over an earlier duplicate.
#[test]
fn test_type_errors_precede_conflicts() {
    let expr = "name = a|name = a|generation gt x";
    assert_eq!(kind(instances(Some(expr), None)), "NonNumericOperand");
}

#[test]
fn test_field_errors_precede_label_errors() {
    assert_eq!(
        kind(instances(Some("nope = 1"), Some("env eqornil x"))),
        "UnknownField"
    );
}

#[test]
fn test_bracketed_single_value_is_a_scalar() {
    let platforms = ResourceType::Platforms.schema();
    let gte = build_query(Some("connections gte [3]"), None, &platforms).unwrap();
    assert_eq!(gte.field_criteria, vec![Criterion::field("connections").gte("3")]);

    let eq = build_query(Some("name = [5]"), None, &platforms).unwrap();
    assert_eq!(eq.field_criteria, vec![Criterion::field("name").eq("5")]);
}

#[test]
fn test_unbalanced_bracket_is_malformed() {
    assert_eq!(
        kind(instances(Some("name = a[|generation gt 1"), None)),
        "MalformedClause"
    );
    assert_eq!(kind(instances(None, Some("env = x{|tier = 0"))), "MalformedClause");
}

#[test]
fn test_same_key_different_operator_is_a_range() {
    let query = instances(Some("generation gt 1|generation lt 5"), None).unwrap();
    assert_eq!(query.field_criteria.len(), 2);
}

#[test]
fn test_same_key_in_both_namespaces_is_fine() {
    let query = instances(Some("name = a"), Some("name = a")).unwrap();
    assert_eq!(query.criteria().count(), 2);
}

#[test]
fn test_duplicates_even_with_different_operands() {
    assert_eq!(
        kind(instances(None, Some("env = dev|env = prod"))),
        "DuplicateCriterion"
    );
}

// =============================================================================
// Schema Tests
// =============================================================================

#[test]
fn test_schema_lookup() {
    let schema = ResourceType::Platforms.schema();
    assert_eq!(
        svcreg::schema::FieldTypeLookup::field_type(&schema, "connections"),
        FieldType::Number
    );
    assert_eq!(
        svcreg::schema::FieldTypeLookup::field_type(&schema, "context"),
        FieldType::Unknown
    );
}
