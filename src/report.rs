use interlinear::backfill::{BackfillReport, Unresolved};

/// Prints the backfill outcome: the update count on stdout, the
/// truncated unresolved listing on the diagnostic channel.
pub fn print_report(report: &BackfillReport, limit: usize) {
    println!("updated fields: {}", report.updated());

    if report.missing.is_empty() {
        return;
    }

    log::warn!("{} unresolved entries", report.missing.len());
    let (shown, remainder) = truncated(&report.missing, limit);
    for unresolved in shown {
        eprintln!("  {} [{}]", unresolved.key, unresolved.reason);
    }

    if remainder > 0 {
        eprintln!("  ... and {remainder} more");
    }
}

/// Splits the unresolved listing into the leading slice to show and
/// the count of entries left out.
fn truncated(missing: &[Unresolved], limit: usize) -> (&[Unresolved], usize) {
    let shown = missing.len().min(limit);
    (&missing[..shown], missing.len() - shown)
}
