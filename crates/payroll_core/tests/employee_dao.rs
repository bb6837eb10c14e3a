mod common;

use common::{date, insert_employee, standard_db, EmployeeRow};
use payroll_core::{DaoError, EmployeeDao, SqliteEmployeeDao};
use std::error::Error;

#[test]
fn get_maps_every_column() {
    let conn = standard_db();
    let employee = SqliteEmployeeDao::new(&conn).get("1002").unwrap();

    assert_eq!(employee.no, "1002");
    assert_eq!(employee.name, "employee 1002");
    assert_eq!(employee.hire_date, date(2014, 6, 1));
    assert_eq!(employee.role_rank, "R2");
    assert_eq!(employee.capability_rank, "C2");
    assert_eq!(employee.transportation_amount, 50_000);
    assert_eq!(employee.monthly_deductions(), 90_000);
}

#[test]
fn get_missing_employee_is_not_found() {
    let conn = standard_db();
    let err = SqliteEmployeeDao::new(&conn).get("9999").unwrap_err();
    assert!(matches!(err, DaoError::NotFound { table: "employee", ref key } if key == "9999"));
}

#[test]
fn get_blank_number_is_invalid_argument() {
    let conn = standard_db();
    let err = SqliteEmployeeDao::new(&conn).get(" ").unwrap_err();
    assert!(matches!(err, DaoError::InvalidArgument(_)));
    assert!(err.is_validation());
}

#[test]
fn find_all_returns_every_employee() {
    let conn = standard_db();
    let employees = SqliteEmployeeDao::new(&conn).find_all().unwrap();

    let mut numbers = employees
        .iter()
        .map(|employee| employee.no.as_str())
        .collect::<Vec<_>>();
    numbers.sort_unstable();
    assert_eq!(numbers, vec!["1001", "1002", "1003"]);
}

#[test]
fn malformed_hire_date_is_invalid_data() {
    let conn = standard_db();
    insert_employee(
        &conn,
        &EmployeeRow {
            no: "2001",
            hire_date: "2015/04/01",
            role_rank: "R1",
            capability_rank: "C1",
            transportation_amount: 0,
            deductions: [0; 4],
        },
    );

    let dao = SqliteEmployeeDao::new(&conn);
    assert!(matches!(dao.get("2001"), Err(DaoError::InvalidData(_))));
    assert!(matches!(dao.find_all(), Err(DaoError::InvalidData(_))));
}

#[test]
fn storage_failure_keeps_original_cause() {
    let conn = standard_db();
    conn.execute_batch("DROP TABLE employee;").unwrap();

    let err = SqliteEmployeeDao::new(&conn).find_all().unwrap_err();
    assert!(matches!(err, DaoError::Query(_)));
    assert!(err.source().is_some());
    assert!(err.to_string().starts_with("select failure"));
}
