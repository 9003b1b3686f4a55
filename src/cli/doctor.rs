//! Doctor CLI command

use crate::error::FintrackResult;
use crate::services::DoctorService;
use crate::storage::Storage;

/// Run the integrity pass and print findings
pub fn handle_doctor_command(storage: &Storage) -> FintrackResult<()> {
    let report = DoctorService::new(storage).run()?;

    if report.is_clean() {
        println!("doctor: no issues found");
        return Ok(());
    }

    println!("doctor: {} issue(s) found", report.issues.len());
    for issue in &report.issues {
        println!("  [{}] {}", issue.code, issue.detail);
    }

    Ok(())
}
