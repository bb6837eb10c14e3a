#![allow(dead_code)]

use chrono::NaiveDate;
use payroll_core::db::open_db_in_memory;
use rusqlite::{params, Connection};

/// Employee row seeded straight into the `employee` table.
pub struct EmployeeRow {
    pub no: &'static str,
    pub hire_date: &'static str,
    pub role_rank: &'static str,
    pub capability_rank: &'static str,
    pub transportation_amount: i64,
    /// health insurance, pension, income tax, inhabitant tax
    pub deductions: [i64; 4],
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn seed_grades(conn: &Connection) {
    conn.execute_batch(
        "INSERT INTO role (rank, name, amount) VALUES
            ('R1', 'Member', 200000),
            ('R2', 'Leader', 300000),
            ('R3', 'Manager', 400000);
         INSERT INTO capability (rank, name, amount) VALUES
            ('C1', 'Basic', 50000),
            ('C2', 'Skilled', 100000),
            ('C3', 'Expert', 150000);",
    )
    .unwrap();
}

pub fn insert_employee(conn: &Connection, row: &EmployeeRow) {
    conn.execute(
        "INSERT INTO employee (
            no,
            name,
            hire_date,
            role_rank,
            capability_rank,
            transportation_amount,
            health_insurance_amount,
            employee_pension_amount,
            income_tax_amount,
            inhabitant_tax_amount
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
        params![
            row.no,
            format!("employee {}", row.no),
            row.hire_date,
            row.role_rank,
            row.capability_rank,
            row.transportation_amount,
            row.deductions[0],
            row.deductions[1],
            row.deductions[2],
            row.deductions[3],
        ],
    )
    .unwrap();
}

/// Reference date for the standard fixture tenures.
pub fn fixture_as_of() -> NaiveDate {
    date(2015, 6, 1)
}

/// Three employees with May 2015 totals of 300000, 450000 and 500000 and
/// tenures of 5, 12 and 1 months as of 2015-06-01.
pub fn standard_rows() -> Vec<EmployeeRow> {
    vec![
        EmployeeRow {
            no: "1001",
            hire_date: "2015-01-01",
            role_rank: "R1",
            capability_rank: "C1",
            transportation_amount: 50_000,
            deductions: [15_000, 25_000, 10_000, 10_000],
        },
        EmployeeRow {
            no: "1002",
            hire_date: "2014-06-01",
            role_rank: "R2",
            capability_rank: "C2",
            transportation_amount: 50_000,
            deductions: [20_000, 40_000, 20_000, 10_000],
        },
        EmployeeRow {
            no: "1003",
            hire_date: "2015-05-01",
            role_rank: "R3",
            capability_rank: "C1",
            transportation_amount: 50_000,
            deductions: [25_000, 45_000, 20_001, 10_000],
        },
    ]
}

pub fn standard_db() -> Connection {
    let conn = open_db_in_memory().unwrap();
    seed_grades(&conn);
    for row in standard_rows() {
        insert_employee(&conn, &row);
    }
    conn
}
