use stitchplan::core::types::Status;

use crate::common::{
    build_context, make_temp_dir, normalized_lines, range, read_log_contents, run_cli, shop_dir,
};

fn stdout_of(output: &std::process::Output) -> Vec<String> {
    normalized_lines(&output.stdout)
}

fn stderr_text(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Ids of table rows, in printed order.
fn row_ids(lines: &[String]) -> Vec<i32> {
    lines
        .iter()
        .filter_map(|l| l.split('|').next()?.trim().parse().ok())
        .collect()
}

#[test]
fn no_command_prints_usage() {
    let dir = shop_dir("command");
    let output = run_cli(&dir, &[]);

    assert!(output.status.success());
    let lines = stdout_of(&output);
    assert!(lines[0].starts_with("Usage: stitchplan"));
    assert!(lines.iter().any(|l| l.starts_with("drop <schedule id> --x <px>")));
}

#[test]
fn unknown_command_fails_with_valid_names() {
    let dir = shop_dir("command");
    let output = run_cli(&dir, &["frobnicate"]);

    assert!(!output.status.success());
    assert!(stderr_text(&output).contains(
        "Unknown command: 'frobnicate'. Valid commands: list, summary, lanes, check, move, drop, book, cancel, config"
    ));
}

#[test]
fn missing_config_stops_before_running() {
    let dir = make_temp_dir("command");
    let output = run_cli(&dir, &["list"]);

    assert!(!output.status.success());
    let stderr = stderr_text(&output);
    assert!(stderr.contains("Failed to start stitchplan"), "stderr: {stderr}");
    assert!(stderr.contains("Configuration file 'config.json' not found."));
}

#[test]
fn list_orders_bookings_by_start() {
    let dir = shop_dir("command");
    let output = run_cli(&dir, &["list"]);
    assert!(output.status.success());

    let lines = stdout_of(&output);
    assert!(lines.iter().any(|l| l == "SCHEDULES"));
    assert_eq!(row_ids(&lines), vec![1, 2, 4, 3]);
}

#[test]
fn list_filters_by_stage_alias() {
    let dir = shop_dir("command");
    let output = run_cli(&dir, &["list", "--stage", "jahit"]);
    assert!(output.status.success());
    assert_eq!(row_ids(&stdout_of(&output)), vec![2, 4]);
}

#[test]
fn move_previews_until_confirmed() {
    let dir = shop_dir("command");
    let preview = run_cli(&dir, &["--as", "rina", "move", "1", "2025-01-07"]);
    assert!(preview.status.success(), "stderr: {}", stderr_text(&preview));

    let lines = stdout_of(&preview);
    assert!(lines.iter().any(|l| l == "RESCHEDULE PREVIEW (+1 DAYS)"));
    assert!(lines.iter().any(|l| l == "Preview only; re-run with --yes to apply."));
    assert_eq!(build_context(&dir).schedule(1).unwrap().range, range(6, 8));

    let confirmed = run_cli(&dir, &["--as", "rina", "move", "1", "2025-01-07", "--yes"]);
    assert!(confirmed.status.success());
    assert!(stdout_of(&confirmed).iter().any(|l| l == "Rescheduled 3 schedule(s)."));

    let ctx = build_context(&dir);
    assert_eq!(ctx.schedule(1).unwrap().range, range(7, 9));
    assert_eq!(ctx.schedule(2).unwrap().range, range(11, 14));
    assert_eq!(ctx.schedule(3).unwrap().range, range(16, 17));
    assert_eq!(ctx.schedule(4).unwrap().range, range(14, 15));

    let log = read_log_contents(&dir).expect("log file should exist");
    assert!(log.contains("rina rescheduled 3 schedule(s) starting with 1 (atomic mode)."));
    assert!(log.contains("DEBUG shifted schedule 3 (printing)"));
}

#[test]
fn move_requires_acting_user_with_access() {
    let dir = shop_dir("command");

    let anonymous = run_cli(&dir, &["move", "1", "2025-01-07", "--yes"]);
    assert!(!anonymous.status.success());
    assert!(stderr_text(&anonymous).contains("No acting user; pass --as <username>."));

    let stranger = run_cli(&dir, &["--as", "budi", "move", "1", "2025-01-07", "--yes"]);
    assert!(!stranger.status.success());
    assert!(stderr_text(&stranger).contains("User 3 may not modify schedule 1."));

    let admin = run_cli(&dir, &["--as", "admin", "move", "1", "2025-01-07", "--yes"]);
    assert!(admin.status.success());
    assert_eq!(build_context(&dir).schedule(1).unwrap().range, range(7, 9));
}

#[test]
fn drop_uses_pointer_position() {
    let dir = shop_dir("command");
    // The timeline opens on Dec 30; 40px per day puts x=320 on Jan 7.
    let output = run_cli(
        &dir,
        &["--as", "rina", "drop", "1", "--x", "330", "--grab", "10", "--yes"],
    );
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert_eq!(build_context(&dir).schedule(1).unwrap().range, range(7, 9));
}

#[test]
fn book_then_conflict() {
    let dir = shop_dir("command");
    let book = |start: &str, end: &str| {
        run_cli(
            &dir,
            &[
                "--as", "rina", "book", "sablon", "--article", "1", "--qty", "100", "--week",
                "W03-2025", "--supplier", "3", "--start", start, "--end", end,
            ],
        )
    };

    let ok = book("2025-01-20", "2025-01-21");
    assert!(ok.status.success(), "stderr: {}", stderr_text(&ok));
    assert!(stdout_of(&ok).iter().any(|l| l == "Booked Screen printing schedule with id 5."));

    let clash = book("2025-01-16", "2025-01-18");
    assert!(!clash.status.success());
    assert!(stderr_text(&clash).contains(
        "Supplier 3 is not available for printing in the requested range (conflicts with [3])."
    ));
    assert_eq!(build_context(&dir).schedules.len(), 5);
}

#[test]
fn check_reports_busy_supplier() {
    let dir = shop_dir("command");
    let output = run_cli(&dir, &["check", "2", "sewing", "2025-01-12", "2025-01-14"]);

    assert!(output.status.success());
    assert!(stderr_text(&output)
        .contains("Supplier 2 is busy for sewing on 2025-01-12..2025-01-14: conflicts with 2, 4."));
}

#[test]
fn cancel_marks_booking_cancelled() {
    let dir = shop_dir("command");
    let output = run_cli(&dir, &["--as", "rina", "cancel", "4"]);
    assert!(output.status.success());
    assert_eq!(build_context(&dir).schedule(4).unwrap().status, Status::Cancelled);
}

#[test]
fn lanes_pixel_column_matches_drop_coordinates() {
    let dir = shop_dir("command");
    let lanes = stdout_of(&run_cli(&dir, &["lanes", "2"]));
    let row: Vec<String> = lanes
        .iter()
        .map(|l| l.split('|').map(|c| c.trim().to_string()).collect::<Vec<_>>())
        .find(|cells| cells.len() == 6 && cells[1] == "4")
        .unwrap();
    // The window opens seven days before the first booking (Jan 6).
    assert_eq!(row[4], "600");
    assert_eq!(row[5], "78");

    let output = run_cli(&dir, &["--as", "rina", "drop", "4", "--x", row[4].as_str()]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert!(stdout_of(&output).iter().any(|l| l == "Nothing to change."));
}

#[test]
fn lanes_and_summary_render() {
    let dir = shop_dir("command");

    let lanes = run_cli(&dir, &["lanes", "2"]);
    assert!(lanes.status.success());
    let lines = stdout_of(&lanes);
    assert!(lines.iter().any(|l| l == "JAHIT MAJU (1 LANE(S))"));
    assert!(lines.iter().any(|l| l.starts_with("Jahit Maju")));

    let summary = run_cli(&dir, &["summary"]);
    assert!(summary.status.success());
    assert!(stdout_of(&summary).iter().any(|l| l == "ACTIVE SCHEDULES"));
}
