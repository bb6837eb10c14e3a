mod common;

use common::standard_db;
use payroll_core::{SqliteEmployeeRepository, YearMonth};
use serde_json::{json, Value};

#[test]
fn employee_domain_serializes_nested_records() {
    let conn = standard_db();
    let repo = SqliteEmployeeRepository::from_connection(&conn);

    let domain = repo.get("1001").unwrap();
    let value = serde_json::to_value(&domain).unwrap();

    assert_eq!(value["employee"]["no"], "1001");
    assert_eq!(value["employee"]["hire_date"], "2015-01-01");
    assert_eq!(value["employee"]["transportation_amount"], 50_000);
    assert_eq!(
        value["role"],
        json!({ "rank": "R1", "name": "Member", "amount": 200_000 })
    );
    assert_eq!(
        value["capability"],
        json!({ "rank": "C1", "name": "Basic", "amount": 50_000 })
    );
    assert_eq!(value.as_object().unwrap().len(), 3);
}

#[test]
fn employee_record_reads_back_from_json() {
    let conn = standard_db();
    let repo = SqliteEmployeeRepository::from_connection(&conn);
    let employee = repo.get("1002").unwrap().employee().clone();

    let text = serde_json::to_string(&employee).unwrap();
    let decoded: payroll_core::Employee = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, employee);
}

#[test]
fn year_month_serializes_as_parts() {
    let year_month = YearMonth::from_key(201504).unwrap();
    let value: Value = serde_json::to_value(year_month).unwrap();
    assert_eq!(value, json!({ "year": 2015, "month": 4 }));
}
