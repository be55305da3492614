//! Store and report tests against a DuckDB file in a temp directory
//!
//! Run with: cargo test --test store_tests

use std::str::FromStr;
use std::sync::{Arc, Barrier};
use std::thread;

use rust_decimal::Decimal;
use tempfile::TempDir;

use payroll_core::adapters::duckdb::DuckDbPool;
use payroll_core::adapters::{DuckDbEmployeeStore, DuckDbUserStore};
use payroll_core::config::Config;
use payroll_core::domain::salary::MAX_MONEY;
use payroll_core::ports::{EmployeeStore, UserStore};
use payroll_core::services::{Credentials, ExportService, ReportService};
use payroll_core::{Action, Employee, EmployeeFilter, Error, PayrollContext, Role};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn setup() -> (TempDir, Arc<DuckDbPool>, DuckDbEmployeeStore) {
    let temp_dir = TempDir::new().unwrap();
    let pool = Arc::new(DuckDbPool::open(&temp_dir.path().join("payroll.duckdb"), 4).unwrap());
    pool.ensure_schema().unwrap();
    let store = DuckDbEmployeeStore::new(Arc::clone(&pool));
    (temp_dir, pool, store)
}

fn employee(name: &str, designation: &str, basic: &str, hra: &str, da: &str, ded: &str) -> Employee {
    Employee::new(name, designation, dec(basic), dec(hra), dec(da), dec(ded)).unwrap()
}

/// A: Engineer 25000 net, B: Engineer 45000 net, C: Manager 50000 net
fn seed_three(store: &DuckDbEmployeeStore) -> (Employee, Employee, Employee) {
    let a = store
        .create(&employee("Asha", "Engineer", "20000", "5000", "1000", "1000"))
        .unwrap();
    let b = store
        .create(&employee("Bala", "Engineer", "40000", "4000", "2000", "1000"))
        .unwrap();
    let c = store
        .create(&employee("Chen", "Manager", "45000", "5000", "1000", "1000"))
        .unwrap();
    (a, b, c)
}

fn names(records: &[Employee]) -> Vec<&str> {
    records.iter().map(|e| e.name()).collect()
}

#[test]
fn test_create_then_get_round_trips() {
    let (_dir, _pool, store) = setup();
    let draft = employee("Anna", "Engineer", "40000", "8000", "4000", "2000")
        .with_bonus(dec("1500.50"))
        .unwrap()
        .with_tax(dec("500"))
        .unwrap();

    let created = store.create(&draft).unwrap();
    let id = created.emp_id().expect("id assigned on create");
    let loaded = store.get_by_id(id).unwrap().unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.net_salary(), dec("51000.50"));
    assert_eq!(loaded.bonus(), dec("1500.50"));
}

#[test]
fn test_ids_are_unique_and_increasing() {
    let (_dir, _pool, store) = setup();
    let (a, b, c) = seed_three(&store);
    let ids = [a.emp_id().unwrap(), b.emp_id().unwrap(), c.emp_id().unwrap()];
    assert!(ids[0] < ids[1] && ids[1] < ids[2]);
}

#[test]
fn test_get_by_unknown_id_is_none() {
    let (_dir, _pool, store) = setup();
    assert_eq!(store.get_by_id(999).unwrap(), None);
}

#[test]
fn test_get_all_in_insertion_order() {
    let (_dir, _pool, store) = setup();
    seed_three(&store);
    assert_eq!(names(&store.get_all().unwrap()), vec!["Asha", "Bala", "Chen"]);
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn test_update_replaces_fields_and_recomputes() {
    let (_dir, _pool, store) = setup();
    let (a, _, _) = seed_three(&store);
    let id = a.emp_id().unwrap();

    let mut changed = a.clone();
    changed.set_designation("Lead").unwrap();
    changed.set_deductions(dec("0")).unwrap();
    assert!(store.update(id, &changed).unwrap());

    let loaded = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.designation(), "Lead");
    assert_eq!(loaded.net_salary(), dec("26000"));
}

#[test]
fn test_update_missing_id_changes_nothing() {
    let (_dir, _pool, store) = setup();
    seed_three(&store);
    let before = store.get_all().unwrap();

    let ghost = employee("Ghost", "None", "1", "0", "0", "0");
    assert!(!store.update(12345, &ghost).unwrap());
    assert_eq!(store.get_all().unwrap(), before);
}

#[test]
fn test_delete_once_then_false() {
    let (_dir, _pool, store) = setup();
    let (_, b, _) = seed_three(&store);
    let id = b.emp_id().unwrap();

    assert!(store.delete(id).unwrap());
    assert!(!store.delete(id).unwrap());
    assert_eq!(store.get_by_id(id).unwrap(), None);
    assert_eq!(names(&store.get_all().unwrap()), vec!["Asha", "Chen"]);
}

#[test]
fn test_search_by_name_fragment() {
    let (_dir, _pool, store) = setup();
    for name in ["Anna", "Johan", "Bob", "Anand"] {
        store
            .create(&employee(name, "Engineer", "1000", "0", "0", "0"))
            .unwrap();
    }

    assert_eq!(
        names(&store.search_by_name("an").unwrap()),
        vec!["Anna", "Johan", "Anand"]
    );
    assert_eq!(names(&store.search_by_name("JOHAN").unwrap()), vec!["Johan"]);
    assert_eq!(store.search_by_name("").unwrap().len(), 4);
    assert!(store.search_by_name("zzz").unwrap().is_empty());
}

#[test]
fn test_search_treats_wildcards_literally() {
    let (_dir, _pool, store) = setup();
    store
        .create(&employee("100% Ana", "Engineer", "1", "0", "0", "0"))
        .unwrap();
    store
        .create(&employee("Ana_B", "Engineer", "1", "0", "0", "0"))
        .unwrap();
    store
        .create(&employee("AnaXB", "Engineer", "1", "0", "0", "0"))
        .unwrap();

    assert_eq!(names(&store.search_by_name("%").unwrap()), vec!["100% Ana"]);
    assert_eq!(names(&store.search_by_name("_b").unwrap()), vec!["Ana_B"]);
}

#[test]
fn test_unfiltered_equals_get_all() {
    let (_dir, _pool, store) = setup();
    seed_three(&store);
    assert_eq!(
        store.get_filtered(&EmployeeFilter::all()).unwrap(),
        store.get_all().unwrap()
    );
}

#[test]
fn test_filter_by_designation_and_range() {
    let (_dir, _pool, store) = setup();
    seed_three(&store);

    let filter = EmployeeFilter::all()
        .with_designation("Engineer")
        .with_min_net_salary(dec("30000"))
        .with_max_net_salary(dec("60000"));
    assert_eq!(names(&store.get_filtered(&filter).unwrap()), vec!["Bala"]);

    let engineers = EmployeeFilter::all().with_designation("Engineer");
    assert_eq!(names(&store.get_filtered(&engineers).unwrap()), vec!["Asha", "Bala"]);

    let nobody = EmployeeFilter::all().with_designation("Intern");
    assert!(store.get_filtered(&nobody).unwrap().is_empty());
}

#[test]
fn test_range_bounds_are_inclusive() {
    let (_dir, _pool, store) = setup();
    seed_three(&store);

    let exact = EmployeeFilter::all()
        .with_min_net_salary(dec("45000"))
        .with_max_net_salary(dec("45000"));
    assert_eq!(names(&store.get_filtered(&exact).unwrap()), vec!["Bala"]);

    let inverted = EmployeeFilter::all()
        .with_min_net_salary(dec("60000"))
        .with_max_net_salary(dec("30000"));
    assert!(store.get_filtered(&inverted).unwrap().is_empty());
}

#[test]
fn test_min_bound_finer_than_cents_excludes_equal_salary() {
    let (_dir, _pool, store) = setup();
    seed_three(&store);

    let filter = EmployeeFilter::all()
        .with_designation("Engineer")
        .with_min_net_salary(dec("45000.000000000001"));
    assert!(store.get_filtered(&filter).unwrap().is_empty());

    let filter = EmployeeFilter::all().with_max_net_salary(dec("24999.999999"));
    assert!(store.get_filtered(&filter).unwrap().is_empty());
}

#[test]
fn test_bounds_beyond_column_range() {
    let (_dir, _pool, store) = setup();
    seed_three(&store);

    let no_ceiling = EmployeeFilter::all().with_max_net_salary(Decimal::MAX);
    assert_eq!(store.get_filtered(&no_ceiling).unwrap().len(), 3);

    let no_floor = EmployeeFilter::all().with_min_net_salary(Decimal::MIN);
    assert_eq!(store.get_filtered(&no_floor).unwrap().len(), 3);

    let unreachable = EmployeeFilter::all().with_min_net_salary(Decimal::MAX);
    assert!(store.get_filtered(&unreachable).unwrap().is_empty());
}

#[test]
fn test_largest_storable_amount_round_trips() {
    let (_dir, _pool, store) = setup();
    let draft = Employee::new("Max", "Owner", MAX_MONEY, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
        .unwrap();

    let created = store.create(&draft).unwrap();
    let loaded = store.get_by_id(created.emp_id().unwrap()).unwrap().unwrap();
    assert_eq!(loaded.basic_salary(), MAX_MONEY);
    assert_eq!(loaded.net_salary(), MAX_MONEY);
}

#[test]
fn test_unstorable_amount_is_a_validation_error() {
    let (_dir, _pool, store) = setup();
    let err = Employee::new(
        "Big",
        "Owner",
        dec("100000000000000000"),
        Decimal::ZERO,
        Decimal::ZERO,
        Decimal::ZERO,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_blank_designation_means_any() {
    let (_dir, _pool, store) = setup();
    seed_three(&store);
    let filter = EmployeeFilter::all()
        .with_designation("   ")
        .with_max_net_salary(dec("45000"));
    assert_eq!(names(&store.get_filtered(&filter).unwrap()), vec!["Asha", "Bala"]);
}

#[test]
fn test_report_sorted_with_summary() {
    let (_dir, pool, store) = setup();
    seed_three(&store);
    let reports = ReportService::new(Arc::new(DuckDbEmployeeStore::new(pool)));

    let report = reports.generate(&EmployeeFilter::all()).unwrap();
    assert_eq!(names(&report.employees), vec!["Chen", "Bala", "Asha"]);
    assert_eq!(report.summary.count, 3);
    assert_eq!(report.summary.total, dec("120000"));
    assert_eq!(report.summary.average, dec("40000"));
    let range = report.summary.range.unwrap();
    assert_eq!(range.max, dec("50000"));
    assert_eq!(range.min, dec("25000"));
}

#[test]
fn test_report_on_no_matches_has_no_range() {
    let (_dir, pool, _store) = setup();
    let reports = ReportService::new(Arc::new(DuckDbEmployeeStore::new(pool)));

    let report = reports
        .generate(&EmployeeFilter::all().with_designation("Intern"))
        .unwrap();
    assert!(report.employees.is_empty());
    assert_eq!(report.summary.range, None);
    assert_eq!(report.summary.total, Decimal::ZERO);
}

#[test]
fn test_export_writes_every_row() {
    let (dir, pool, store) = setup();
    seed_three(&store);
    let export = ExportService::new(Arc::new(DuckDbEmployeeStore::new(pool)));

    let path = dir.path().join("EmployeeReport.csv");
    assert_eq!(export.export_all(&path).unwrap(), 3);

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Emp ID,Name,Designation"));
    assert!(lines[3].ends_with(",Chen,Manager,45000.00,5000.00,1000.00,1000.00,0.00,0.00,50000.00"));
}

#[test]
fn test_user_login_and_own_record() {
    let (_dir, pool, store) = setup();
    let (a, _, _) = seed_three(&store);
    {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO users VALUES (1, 'asha', 'secret', 'employee', ?)",
            [a.emp_id().unwrap()],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO users VALUES (2, 'orphan', 'pw', 'employee', 999)",
            [],
        )
        .unwrap();
    }
    let users = DuckDbUserStore::new(Arc::clone(&pool));
    assert!(users.login("asha", "nope").unwrap().is_none());

    let user = users.login("asha", "secret").unwrap().unwrap();
    assert_eq!(user.role, Role::Employee);

    let session = payroll_core::services::Session::new(user);
    assert!(matches!(
        session.require(Action::ViewAllEmployees),
        Err(Error::Unauthorized(_))
    ));
    assert_eq!(session.own_record(&store).unwrap().name(), "Asha");

    let orphan = payroll_core::services::Session::new(users.login("orphan", "pw").unwrap().unwrap());
    assert!(orphan.own_record(&store).unwrap_err().is_not_found());
}

#[test]
fn test_context_wires_everything() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = PayrollContext::new(temp_dir.path()).unwrap();
    assert_eq!(ctx.pool.max_size(), Config::default().database.pool_size);

    ctx.employee_store
        .create(&employee("Dee", "Analyst", "30000", "0", "0", "0"))
        .unwrap();
    assert_eq!(ctx.report_service.generate(&EmployeeFilter::all()).unwrap().employees.len(), 1);
    assert!(ctx
        .auth_service
        .login(&Credentials::new("nobody", "pw"))
        .unwrap()
        .is_none());
    assert_eq!(ctx.csv_path(), temp_dir.path().join("EmployeeReport.csv"));
}

#[test]
fn test_reopening_keeps_data() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("payroll.duckdb");
    {
        let pool = Arc::new(DuckDbPool::open(&db_path, 2).unwrap());
        pool.ensure_schema().unwrap();
        DuckDbEmployeeStore::new(pool)
            .create(&employee("Eve", "Engineer", "100.25", "0", "0", "0"))
            .unwrap();
    }

    let pool = Arc::new(DuckDbPool::open(&db_path, 2).unwrap());
    let applied = pool.run_migrations().unwrap();
    assert!(applied.applied.is_empty());

    let all = DuckDbEmployeeStore::new(pool).get_all().unwrap();
    assert_eq!(names(&all), vec!["Eve"]);
    assert_eq!(all[0].net_salary(), dec("100.25"));
}

#[test]
fn test_concurrent_creates_through_one_pool() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 5;

    let (_dir, pool, _store) = setup();
    let store = Arc::new(DuckDbEmployeeStore::new(pool));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    store
                        .create(&employee(&format!("T{}-{}", t, i), "Engineer", "1", "0", "0", "0"))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let all = store.get_all().unwrap();
    assert_eq!(all.len(), THREADS * PER_THREAD);
    let mut ids: Vec<_> = all.iter().filter_map(Employee::emp_id).collect();
    ids.dedup();
    assert_eq!(ids.len(), THREADS * PER_THREAD);
}
