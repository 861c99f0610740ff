use crate::error::CliError;
use engine_runtime::report::RunReport;

pub fn print_report(report: &RunReport, as_json: bool) -> Result<(), CliError> {
    if as_json {
        let json = serde_json::to_string_pretty(report)?;
        println!("{json}");
    } else {
        print_report_table(report);
    }
    Ok(())
}

fn print_report_table(report: &RunReport) {
    println!("Load report for table '{}':", report.table);
    println!("-----------------------------");
    println!("{:<24} {}", "Run ID", report.run_id);
    println!("{:<24} {}", "State", report.state);
    println!("{:<24} {}", "Rows processed", report.rows_processed);
    println!("{:<24} {}", "Chunks processed", report.chunks_processed);
    println!("{:<24} {}", "Table recreated", report.table_recreated);
    println!("{:<24} {}", "Rows deleted", report.rows_deleted);
    if report.table_state_indeterminate {
        println!("{:<24} {}", "Table state", "indeterminate");
    }
    if let Some(error) = &report.error {
        println!("{:<24} {}", "Error", error);
    }
    let took = report.finished_at - report.started_at;
    println!("{:<24} {} ms", "Took", took.num_milliseconds());
}
