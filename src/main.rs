mod code_comparator;
mod column_loader;
mod compare_manager;
mod report_renderer;
mod settings;
mod user_experience;
mod user_interaction;

use crate::compare_manager::{delete_report_file, run_comparison_flow};
use crate::settings::{code_db_path, open_settings};
use crate::user_experience::{handle_quit_flag, handle_special_flag};
use crate::user_interaction::{determine_action_as_text, get_user_input, print_insight, print_list};

const BRO_VERSION: &str = "0.2.1";

fn main() {
    if std::env::args().any(|arg| arg == "--version") {
        print_insight(BRO_VERSION);
        std::process::exit(0);
    }

    println!(
        r#"
 .----------------.  .----------------.  .----------------.  .----------------.  .----------------.  .----------------.  .----------------.
| .--------------. || .--------------. || .--------------. || .--------------. || .--------------. || .--------------. || .--------------. |
| |     ______   | || |     ____     | || |  ________    | || |  _________   | || |   ______     | || |  _______     | || |     ____     | |
| |   .' ___  |  | || |   .'    `.   | || | |_   ___ `.  | || | |_   ___  |  | || |  |_   _ \    | || | |_   __ \    | || |   .'    `.   | |
| |  / .'   \_|  | || |  /  .--.  \  | || |   | |   `. \ | || |   | |_  \_|  | || |    | |_) |   | || |   | |__) |   | || |  /  .--.  \  | |
| |  | |         | || |  | |    | |  | || |   | |    | | | || |   |  _|  _   | || |    |  __'.   | || |   |  __ /    | || |  | |    | |  | |
| |  \ `.___.'\  | || |  \  `--'  /  | || |  _| |___.' / | || |  _| |___/ |  | || |   _| |__) |  | || |  _| |  \ \_  | || |  \  `--'  /  | |
| |   `._____.'  | || |   `.____.'   | || | |________.'  | || | |_________|  | || |  |_______/   | || | |____| |___| | || |   `.____.'   | |
| |              | || |              | || |              | || |              | || |              | || |              | || |              | |
| '--------------' || '--------------' || '--------------' || '--------------' || '--------------' || '--------------' || '--------------' |
 '----------------'  '----------------'  '----------------'  '----------------'  '----------------'  '----------------'  '----------------'
"#
    );

    print_insight("Who went missing? Let's find out. (@f for flags)");

    let menu_options = vec!["COMPARE", "COLUMN PRESETS", "DELETE REPORTS"];

    loop {
        println!();
        print_list(&menu_options);
        let choice = get_user_input("Your move, bro: ");
        handle_quit_flag(&choice);

        if handle_special_flag(&choice) {
            continue;
        }

        let selected_option = determine_action_as_text(&menu_options, &choice);

        match selected_option {
            Some(ref action) if action == "COMPARE" => {
                run_comparison_flow();
            }
            Some(ref action) if action == "COLUMN PRESETS" => {
                let _ = open_settings();
            }
            Some(ref action) if action == "DELETE REPORTS" => {
                delete_report_file(&code_db_path());
            }
            _ => {
                print_insight("Dude, that action's a no-go. Give it another whirl, alright?");
            }
        }
    }
}
