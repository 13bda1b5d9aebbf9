// src/user_experience.rs
use crate::compare_manager::delete_report_file;
use crate::settings::{code_db_path, open_settings};
use crate::user_interaction::{print_insight, print_list};

pub fn handle_special_flag(flag: &str) -> bool {
    match flag {
        "@f" | "@flags" => {
            let flags = vec![
                "@c           : In vim edit => Cancel action",
                "@config      : Primary/ Secondary menu => Edit column presets",
                "@d / @delete : Primary/ Secondary menu => Delete reports from code_db",
                "@f / @flags  : Primary/ Secondary menu => View all flags",
                "@b           : Secondary menu => Back to the last menu",
                "@q           : Anywhere => Quit codebro",
            ];

            print_insight("Serving your flags ...");
            print_list(&flags);
            println!();
            true
        }
        "@d" | "@delete" => {
            delete_report_file(&code_db_path());
            true
        }
        "@config" => {
            let _ = open_settings();
            true
        }
        _ => false,
    }
}

pub fn handle_back_flag(flag: &str) -> bool {
    matches!(flag, "@b")
}

pub fn handle_quit_flag(flag: &str) {
    if flag == "@q" {
        std::process::exit(0);
    }
}

pub fn handle_cancel_flag(flag: &str) -> bool {
    let trimmed = flag.trim();
    trimmed == "@c" || trimmed.starts_with("@c")
}
