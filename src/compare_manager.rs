// compare_manager.rs
use crate::code_comparator::compare;
use crate::column_loader::load_column;
use crate::report_renderer::render;
use crate::settings::{code_db_path, load_column_presets};
use crate::user_experience::{handle_back_flag, handle_quit_flag};
use crate::user_interaction::{
    determine_action_as_number, get_user_input, get_user_input_level_2, print_insight,
    print_insight_level_2, print_list,
};
use chrono::{DateTime, Local};
use fuzzywuzzy::fuzz;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const SPREADSHEET_EXTENSIONS: [&str; 3] = ["csv", "xls", "xlsx"];

/// The whole ride: pick two spreadsheets, pick a column on each side, find
/// the source codes the reference file does not carry, drop a report in
/// code_db.
pub fn run_comparison_flow() {
    let source_path = match pick_spreadsheet_file("SOURCE file (codes that SHOULD exist): ") {
        Some(path) => path,
        None => return,
    };

    let reference_path =
        match pick_spreadsheet_file("REFERENCE file (where the codes get looked up): ") {
            Some(path) => path,
            None => return,
        };

    let (source_column, reference_column) = match choose_columns() {
        Some(columns) => columns,
        None => return,
    };

    let source = match load_column(&source_path, &source_column) {
        Ok(values) => values,
        Err(e) => {
            print_insight(&format!("No dice on the source side. {}", e));
            return;
        }
    };

    let reference = match load_column(&reference_path, &reference_column) {
        Ok(values) => values,
        Err(e) => {
            print_insight(&format!("No dice on the reference side. {}", e));
            return;
        }
    };

    if source.values.is_empty() {
        print_insight_level_2("Source file has a header but zero rows. Nothing to chase, but here goes.");
    }

    let result = compare(&source, &reference);
    let payload = render(&result, &source.source, &reference.source);

    match save_report(&payload) {
        Ok(report_path) => {
            print_insight(&format!(
                "{} of {} codes from '{}' ({}) are missing in '{}' ({}).",
                result.missing_count(),
                result.source_total,
                source.source,
                source.column,
                reference.source,
                reference.column
            ));
            print_insight_level_2(&format!("Report saved at {}", report_path.display()));
        }
        Err(e) => {
            print_insight(&format!("Comparison done but the report would not save: {}", e));
        }
    }
}

/// Spreadsheets under the given directories, newest first, each path paired
/// with the menu label shown for it. One vector for both, so the serial the
/// user sees always indexes the path that gets opened. Names that are not
/// valid UTF-8 cannot be displayed and are left out entirely.
fn list_spreadsheet_entries(dirs: &[PathBuf]) -> Vec<(PathBuf, String)> {
    fn system_time_to_date_time(system_time: SystemTime) -> DateTime<Local> {
        let datetime: DateTime<Local> = system_time.into();
        datetime
    }

    fn list_files(path: &Path) -> io::Result<Vec<(PathBuf, SystemTime)>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() {
                if let Some(extension) = path.extension().and_then(|s| s.to_str()) {
                    if SPREADSHEET_EXTENSIONS.contains(&extension.to_lowercase().as_str()) {
                        if let Ok(metadata) = entry.metadata() {
                            if let Ok(modified) = metadata.modified() {
                                files.push((path, modified));
                            }
                        }
                    }
                }
            }
        }
        Ok(files)
    }

    let mut files = Vec::new();
    for dir in dirs {
        files.extend(list_files(dir).unwrap_or_default());
    }

    files.sort_by(|a, b| b.1.cmp(&a.1));

    files
        .into_iter()
        .filter_map(|(path, modified)| {
            let file_name = path.file_name().and_then(|n| n.to_str())?.to_string();
            let formatted_date = system_time_to_date_time(modified)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();
            let label = format!("{} (Modified: {})", file_name, formatted_date);
            Some((path, label))
        })
        .collect()
}

/// Lists the spreadsheets in code_db, Desktop and Downloads (newest first)
/// and lets the user pick one by serial or by a slice of the name.
fn pick_spreadsheet_file(prompt: &str) -> Option<PathBuf> {
    let home_dir = env::var("HOME").unwrap_or_default();
    let desktop_path = Path::new(&home_dir).join("Desktop");
    let downloads_path = Path::new(&home_dir).join("Downloads");

    let entries = list_spreadsheet_entries(&[code_db_path(), desktop_path, downloads_path]);

    if entries.is_empty() {
        print_insight("No spreadsheets in sight, bro. Drop them in code_db, Desktop or Downloads.");
        return None;
    }

    let mut file_info_slices: Vec<&str> =
        entries.iter().map(|(_, label)| label.as_str()).collect();
    file_info_slices.push("BACK");
    print_list(&file_info_slices);

    let choice = get_user_input(prompt).trim().to_lowercase();
    handle_quit_flag(&choice);
    if handle_back_flag(&choice) {
        return None;
    }

    let back_option_serial = file_info_slices.len();

    if choice
        .parse::<usize>()
        .ok()
        .map_or(false, |num| num == back_option_serial)
    {
        print_insight("Bailed on that. Heading back to the last menu, bro.");
        return None;
    } else {
        // Fuzzy match logic for 'back'
        let score = fuzz::ratio(&choice, "back");
        if score > 60 {
            print_insight("Bailed on that. Heading back to the last menu, bro.");
            return None;
        }
    }

    if let Ok(serial) = choice.parse::<usize>() {
        if serial > 0 && serial <= entries.len() {
            return Some(entries[serial - 1].0.clone());
        }
    }

    let best_match_result = entries
        .iter()
        .filter_map(|(path, _)| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|name| (path.clone(), fuzz::ratio(&choice, name)))
        })
        .max_by_key(|&(_, score)| score);

    if let Some((best_match, _)) = best_match_result {
        if best_match.is_file() {
            if let Some(file_name) = best_match.file_name().and_then(|n| n.to_str()) {
                print_insight_level_2(&format!("Going with {}", file_name));
            }
            return Some(best_match);
        }
    }

    print_insight("Invalid choice or file not accessible.");
    None
}

/// Column pair for the comparison: a saved preset if one is picked,
/// otherwise typed headers (a 1-based column number also works).
fn choose_columns() -> Option<(String, String)> {
    let presets = load_column_presets();

    if !presets.is_empty() {
        print_insight("Saved column presets, or type them fresh:");
        let mut options: Vec<String> = presets
            .iter()
            .map(|p| {
                format!(
                    "{} ({} vs {})",
                    p.name, p.source_column, p.reference_column
                )
            })
            .collect();
        options.push("TYPE THE COLUMNS OUT".to_string());
        let option_slices: Vec<&str> = options.iter().map(AsRef::as_ref).collect();
        print_list(&option_slices);

        let choice = get_user_input("Your move: ").trim().to_lowercase();
        handle_quit_flag(&choice);
        if handle_back_flag(&choice) {
            return None;
        }

        if let Some(serial) = determine_action_as_number(&option_slices, &choice) {
            if serial <= presets.len() {
                let preset = &presets[serial - 1];
                return Some((preset.source_column.clone(), preset.reference_column.clone()));
            }
        }
        // Fell through to typing them out.
    }

    let source_column = get_user_input_level_2("Column holding the codes in the SOURCE file: ");
    handle_quit_flag(&source_column);
    if source_column.trim().is_empty() || handle_back_flag(&source_column) {
        return None;
    }

    let reference_column =
        get_user_input_level_2("Column holding the codes in the REFERENCE file: ");
    handle_quit_flag(&reference_column);
    if reference_column.trim().is_empty() || handle_back_flag(&reference_column) {
        return None;
    }

    Some((
        source_column.trim().to_string(),
        reference_column.trim().to_string(),
    ))
}

fn save_report(payload: &str) -> io::Result<PathBuf> {
    let report_dir = code_db_path();
    if !report_dir.exists() {
        fs::create_dir_all(&report_dir)?;
    }

    let file_name = format!(
        "missing_codes_{}.txt",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let report_path = report_dir.join(file_name);
    fs::write(&report_path, payload)?;
    Ok(report_path)
}

/// Clears out old comparison reports from code_db.
pub fn delete_report_file(code_db_path: &Path) {
    fn list_report_files(path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("txt") {
                files.push(path);
            }
        }
        Ok(files)
    }

    match list_report_files(code_db_path) {
        Ok(mut unnamed_files) => {
            unnamed_files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

            // Same vector drives the display and the pick, so serials line up.
            let files: Vec<(PathBuf, String)> = unnamed_files
                .into_iter()
                .filter_map(|path| {
                    let name = path.file_name().and_then(|n| n.to_str())?.to_string();
                    Some((path, name))
                })
                .collect();

            if files.is_empty() {
                print_insight("No reports in sight, bro.");
                return;
            }

            let mut file_name_slices: Vec<&str> =
                files.iter().map(|(_, name)| name.as_str()).collect();
            file_name_slices.push("BACK");

            print_list(&file_name_slices);

            let choice = get_user_input(
                "Punch in the serial number or a slice of the report name to DELETE, or hit 'back' to bail.\nWhat's it gonna be?: ",
            )
            .trim()
            .to_lowercase();

            let back_option_serial = file_name_slices.len();

            if choice
                .parse::<usize>()
                .ok()
                .map_or(false, |num| num == back_option_serial)
                || (fuzz::ratio(&choice, "back") > 60)
            {
                print_insight("Bailed on that. Heading back to the last menu, bro.");
                return;
            }

            let mut file_deleted = false;

            match choice.parse::<usize>() {
                Ok(serial) if serial > 0 && serial <= files.len() => {
                    let (file_path, file_name) = &files[serial - 1];
                    if file_path.is_file() {
                        print_insight_level_2(&format!("Deleting {}", file_name));
                        if let Err(e) = fs::remove_file(file_path) {
                            print_insight(&format!("Failed to delete report: {}", e));
                        } else {
                            print_insight("Report deleted successfully.");
                            file_deleted = true;
                        }
                    }
                }
                _ => (),
            }

            if !file_deleted {
                let best_match_result = files
                    .iter()
                    .map(|(path, name)| ((path, name), fuzz::ratio(&choice, name)))
                    .max_by_key(|&(_, score)| score);

                if let Some(((best_match, file_name), _)) = best_match_result {
                    if best_match.is_file() {
                        print_insight_level_2(&format!("Deleting {}", file_name));
                        if let Err(e) = fs::remove_file(best_match) {
                            print_insight(&format!("Failed to delete report: {}", e));
                        } else {
                            print_insight("Report deleted successfully.");
                        }
                    }
                } else {
                    print_insight("No matching report found for deletion.");
                }
            }
        }
        Err(_) => {
            print_insight("Failed to read the code_db directory.");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::TempDir;

    use super::list_spreadsheet_entries;

    #[test]
    fn entries_pair_each_label_with_its_own_path() {
        let dir = TempDir::new().expect("tempdir should create");
        fs::write(dir.path().join("online.csv"), "Code\nA1\n").expect("test file should write");
        fs::write(dir.path().join("catalog.xlsx"), "stub").expect("test file should write");
        fs::write(dir.path().join("notes.txt"), "not a spreadsheet")
            .expect("test file should write");

        let entries = list_spreadsheet_entries(&[dir.path().to_path_buf()]);
        assert_eq!(entries.len(), 2);
        for (path, label) in &entries {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .expect("listed name should be utf-8");
            assert!(
                label.starts_with(name),
                "label '{label}' should lead with '{name}'"
            );
            assert!(label.contains("(Modified: "));
        }
    }

    #[cfg(unix)]
    #[test]
    fn entries_skip_names_that_cannot_be_displayed() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let dir = TempDir::new().expect("tempdir should create");
        fs::write(dir.path().join("good.csv"), "Code\nA1\n").expect("test file should write");
        let bad_name = OsString::from_vec(b"bad\xFF.csv".to_vec());
        fs::write(dir.path().join(bad_name), "Code\nZ9\n").expect("test file should write");

        let entries = list_spreadsheet_entries(&[dir.path().to_path_buf()]);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].1.starts_with("good.csv"));
    }
}
