//! Command-line entry point over the payroll record store.
//!
//! # Responsibility
//! - Parse flags and environment fallbacks into one repository query.
//! - Print query results as JSON on stdout.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use payroll_core::db::open_db;
use payroll_core::{
    default_log_level, init_logging, EmployeeDomain, LogLevel, SqliteEmployeeRepository,
    YearMonth,
};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "payroll", version, about = "Query employee payroll records")]
struct Cli {
    /// SQLite database file holding the payroll tables.
    #[arg(long, env = "PAYROLL_DB")]
    db: PathBuf,

    /// trace|debug|info|warn|error; defaults to debug in debug builds.
    #[arg(long, env = "PAYROLL_LOG_LEVEL", value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    /// Absolute directory for rolling log files. Logging is off without it.
    #[arg(long, env = "PAYROLL_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) for tenure; defaults to today.
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show one employee with role and capability grades.
    Get { no: String },
    /// List employees, optionally ordered by annual salary plan.
    List {
        #[arg(long, value_enum)]
        order: Option<SortOrder>,
    },
    /// Sum of all total salaries for a month (yyyymm).
    SumTotal {
        #[arg(value_parser = parse_year_month)]
        year_month: YearMonth,
    },
    /// Average take-home amount for a month (yyyymm).
    AverageTakeHome {
        #[arg(value_parser = parse_year_month)]
        year_month: YearMonth,
    },
    /// Number of employees whose annual salary plan is at least the threshold.
    CountOver { threshold: i64 },
    /// Employee with the longest tenure, or the shortest with --min.
    Tenure {
        #[arg(long, conflicts_with = "min")]
        max: bool,
        #[arg(long)]
        min: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortOrder {
    Asc,
    Desc,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.unwrap_or_else(default_log_level);
        init_logging(level.as_str(), log_dir).context("failed to initialize logging")?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open payroll database `{}`", cli.db.display()))?;
    let mut repo = SqliteEmployeeRepository::from_connection(&conn);
    if let Some(as_of) = cli.as_of {
        repo = repo.with_as_of(as_of);
    }

    let output = run(&repo, &cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(repo: &SqliteEmployeeRepository<'_>, command: &Command) -> Result<Value> {
    info!("event=cli_command module=cli status=start command={}", command_name(command));
    let as_of = repo.as_of();

    let output = match command {
        Command::Get { no } => {
            let domain = repo
                .get(no)
                .with_context(|| format!("failed to load employee `{no}`"))?;
            domain_json(&domain, as_of)
        }
        Command::List { order } => {
            let domains = match order {
                None => repo.find_all()?,
                Some(SortOrder::Asc) => repo.find_all_order_by_annual_salary(true)?,
                Some(SortOrder::Desc) => repo.find_all_order_by_annual_salary(false)?,
            };
            Value::Array(
                domains
                    .iter()
                    .map(|domain| domain_json(domain, as_of))
                    .collect(),
            )
        }
        Command::SumTotal { year_month } => json!({
            "year_month": year_month.key(),
            "sum_total_salary": repo.get_sum_total_salary(*year_month)?,
        }),
        Command::AverageTakeHome { year_month } => json!({
            "year_month": year_month.key(),
            "average_take_home": repo.get_average_take_home(*year_month)?,
        }),
        Command::CountOver { threshold } => json!({
            "threshold": threshold,
            "count": repo.get_count_by_over_annual_salary(*threshold)?,
        }),
        Command::Tenure { min, .. } => {
            match repo.get_by_duration_month(!min)? {
                Some(domain) => domain_json(&domain, as_of),
                None => Value::Null,
            }
        }
    };

    info!("event=cli_command module=cli status=ok command={}", command_name(command));
    Ok(output)
}

fn domain_json(domain: &EmployeeDomain, as_of: NaiveDate) -> Value {
    json!({
        "employee": domain.employee(),
        "role": domain.role(),
        "capability": domain.capability(),
        "annual_total_salary_plan": domain.annual_total_salary_plan(),
        "duration_month": domain.duration_month(as_of),
    })
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Get { .. } => "get",
        Command::List { .. } => "list",
        Command::SumTotal { .. } => "sum-total",
        Command::AverageTakeHome { .. } => "average-take-home",
        Command::CountOver { .. } => "count-over",
        Command::Tenure { .. } => "tenure",
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    value.parse::<LogLevel>().map_err(|err| err.to_string())
}

fn parse_year_month(value: &str) -> Result<YearMonth, String> {
    let key = value
        .trim()
        .parse::<i32>()
        .map_err(|err| format!("expected yyyymm: {err}"))?;
    YearMonth::from_key(key).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{parse_date, parse_log_level, parse_year_month, run, Cli, Command};
    use chrono::NaiveDate;
    use clap::{CommandFactory, Parser};
    use payroll_core::db::open_db_in_memory;
    use payroll_core::{LogLevel, RepositoryError, SqliteEmployeeRepository};
    use rusqlite::Connection;
    use serde_json::Value;

    fn seeded_db() -> Connection {
        let conn = open_db_in_memory().unwrap();
        conn.execute_batch(
            "INSERT INTO role (rank, name, amount) VALUES
                ('R1', 'Member', 200000),
                ('R2', 'Leader', 300000);
             INSERT INTO capability (rank, name, amount) VALUES
                ('C1', 'Basic', 50000),
                ('C2', 'Skilled', 100000);
             INSERT INTO employee (
                no, name, hire_date, role_rank, capability_rank,
                transportation_amount, health_insurance_amount,
                employee_pension_amount, income_tax_amount, inhabitant_tax_amount
             ) VALUES
                ('1001', 'employee 1001', '2015-01-01', 'R1', 'C1', 50000, 0, 0, 0, 0),
                ('1002', 'employee 1002', '2014-06-01', 'R2', 'C2', 50000, 0, 0, 0, 0),
                ('1003', 'employee 1003', '2015-05-01', 'R1', 'C2', 50000, 0, 0, 0, 0);",
        )
        .unwrap();
        conn
    }

    fn command(args: &[&str]) -> Command {
        let argv = ["payroll", "--db", "unused.db"]
            .into_iter()
            .chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().command
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 6, 1).unwrap()
    }

    fn numbers(output: &Value) -> Vec<&str> {
        output
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["employee"]["no"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_year_month_argument() {
        let cli = Cli::try_parse_from(["payroll", "--db", "/tmp/p.db", "sum-total", "201504"])
            .unwrap();
        match cli.command {
            Command::SumTotal { year_month } => assert_eq!(year_month.key(), 201504),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(parse_year_month("201513").is_err());
        assert!(parse_year_month("april").is_err());
    }

    #[test]
    fn tenure_flags_conflict() {
        let result = Cli::try_parse_from(["payroll", "--db", "x.db", "tenure", "--max", "--min"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_date_requires_iso_format() {
        assert!(parse_date("2015-06-01").is_ok());
        assert!(parse_date("06/01/2015").is_err());
    }

    #[test]
    fn log_level_is_validated_without_log_dir() {
        let cli = Cli::try_parse_from(["payroll", "--db", "x.db", "--log-level", "WARN", "list"])
            .unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Warn));
        assert!(cli.log_dir.is_none());

        let result =
            Cli::try_parse_from(["payroll", "--db", "x.db", "--log-level", "loud", "list"]);
        assert!(result.is_err());
        assert!(parse_log_level("verbose").is_err());
    }

    #[test]
    fn get_prints_employee_with_grades() {
        let conn = seeded_db();
        let repo = SqliteEmployeeRepository::from_connection(&conn).with_as_of(as_of());

        let output = run(&repo, &command(&["get", "1001"])).unwrap();
        assert_eq!(output["employee"]["hire_date"], "2015-01-01");
        assert_eq!(output["role"]["rank"], "R1");
        assert_eq!(output["capability"]["amount"], 50_000);
        assert_eq!(output["annual_total_salary_plan"], 3_000_000);
        assert_eq!(output["duration_month"], 5);
    }

    #[test]
    fn get_unknown_employee_is_an_error() {
        let conn = seeded_db();
        let repo = SqliteEmployeeRepository::from_connection(&conn);

        let err = run(&repo, &command(&["get", "9999"])).unwrap_err();
        assert!(err.to_string().contains("9999"));
    }

    #[test]
    fn list_orders_by_annual_salary() {
        let conn = seeded_db();
        let repo = SqliteEmployeeRepository::from_connection(&conn).with_as_of(as_of());

        let unordered = run(&repo, &command(&["list"])).unwrap();
        assert_eq!(numbers(&unordered), vec!["1001", "1002", "1003"]);

        let ascending = run(&repo, &command(&["list", "--order", "asc"])).unwrap();
        assert_eq!(numbers(&ascending), vec!["1001", "1003", "1002"]);

        let descending = run(&repo, &command(&["list", "--order", "desc"])).unwrap();
        assert_eq!(numbers(&descending), vec!["1002", "1003", "1001"]);
    }

    #[test]
    fn monthly_figures_are_keyed_by_year_month() {
        let conn = seeded_db();
        let repo = SqliteEmployeeRepository::from_connection(&conn);

        // 300000 + 450000 + 350000 in May 2015, no deductions.
        let sum = run(&repo, &command(&["sum-total", "201505"])).unwrap();
        assert_eq!(sum["year_month"], 201505);
        assert_eq!(sum["sum_total_salary"], 1_100_000);

        let average = run(&repo, &command(&["average-take-home", "201505"])).unwrap();
        assert_eq!(average["average_take_home"], 366_666);

        let count = run(&repo, &command(&["count-over", "3600000"])).unwrap();
        assert_eq!(count["threshold"], 3_600_000);
        assert_eq!(count["count"], 2);
    }

    #[test]
    fn tenure_defaults_to_longest() {
        let conn = seeded_db();
        let repo = SqliteEmployeeRepository::from_connection(&conn).with_as_of(as_of());

        let longest = run(&repo, &command(&["tenure"])).unwrap();
        assert_eq!(longest["employee"]["no"], "1002");
        assert_eq!(longest["duration_month"], 12);

        let explicit = run(&repo, &command(&["tenure", "--max"])).unwrap();
        assert_eq!(explicit, longest);

        let shortest = run(&repo, &command(&["tenure", "--min"])).unwrap();
        assert_eq!(shortest["employee"]["no"], "1003");
    }

    #[test]
    fn empty_store_prints_null_tenure_and_rejects_average() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteEmployeeRepository::from_connection(&conn);

        assert_eq!(run(&repo, &command(&["tenure"])).unwrap(), Value::Null);
        assert_eq!(run(&repo, &command(&["list"])).unwrap(), Value::Array(Vec::new()));

        let err = run(&repo, &command(&["average-take-home", "201505"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::EmptyEmployeeSet)
        ));
    }
}
