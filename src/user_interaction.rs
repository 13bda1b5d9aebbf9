// user_interaction.rs
use fuzzywuzzy::fuzz;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use vim_edit::vim_edit;

const BOLD_ORANGE: &str = "\x1b[1;38;5;208m";
const SOFT_ORANGE: &str = "\x1b[0;38;5;208m";
const BOLD_YELLOW: &str = "\x1b[1;33m";
const RESET: &str = "\x1b[0m";

pub fn get_user_input(prompt: &str) -> String {
    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            println!("Failed to initialize editor: {:?}", err);
            return String::new();
        }
    };

    let custom_prompt = format!("{}@CODEbro: {}{}{}", BOLD_ORANGE, BOLD_ORANGE, prompt, RESET);

    match rl.readline(&custom_prompt) {
        Ok(line) => {
            let _ = rl.add_history_entry(line.as_str());
            line
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("Input interrupted or end of file reached.");
            String::new()
        }
        Err(err) => {
            println!("Error reading line: {:?}", err);
            String::new()
        }
    }
}

pub fn get_user_input_level_2(prompt: &str) -> String {
    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            println!("Failed to initialize editor: {:?}", err);
            return String::new();
        }
    };

    let custom_prompt = format!(
        "  {}@LILbro: {}{}{}",
        SOFT_ORANGE, SOFT_ORANGE, prompt, RESET
    );

    match rl.readline(&custom_prompt) {
        Ok(line) => {
            let _ = rl.add_history_entry(line.as_str());
            line
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("Input interrupted or end of file reached.");
            String::new()
        }
        Err(err) => {
            println!("Error reading line: {:?}", err);
            String::new()
        }
    }
}

/// Opens the given JSON in vim, hands back the edited text with anything
/// after a SYNTAX divider stripped off.
pub fn get_edited_user_json_input(current_json: String) -> String {
    let edited = vim_edit(current_json);

    let truncated = if let Some(index) = edited.find("SYNTAX\n======") {
        &edited[..index]
    } else {
        &edited[..]
    };

    let result = truncated.trim().to_string();
    print!(
        "  {}@LILbro: {}Picking up this edit:{}",
        SOFT_ORANGE, SOFT_ORANGE, RESET
    );
    println!("\n{}", result);
    result
}

pub fn print_insight(message: &str) {
    println!("{}@CODEbro: {}{}", BOLD_ORANGE, message, RESET);
}

pub fn print_insight_level_2(message: &str) {
    println!("  {}@LILbro: {}{}", SOFT_ORANGE, message, RESET);
}

pub fn print_list(options: &[&str]) {
    // Pad the serials so the list lines up
    let max_digits = options.len().to_string().len();

    for (index, option) in options.iter().enumerate() {
        let padded_index = format!("{:width$}:", index + 1, width = max_digits);
        println!("  {}{} {}{}", BOLD_YELLOW, padded_index, option, RESET);
    }
}

pub fn print_list_level_2(options: &[&str]) {
    let max_digits = options.len().to_string().len();

    for (index, option) in options.iter().enumerate() {
        let padded_index = format!("{:width$}:", index + 1, width = max_digits);
        println!("    {}{} {}{}", SOFT_ORANGE, padded_index, option, RESET);
    }
}

/// Resolves a menu choice to an option label: direct serial number first,
/// fuzzy text match second.
pub fn determine_action_as_text(menu_options: &[&str], choice: &str) -> Option<String> {
    let choice = choice.to_lowercase();

    if let Ok(index) = choice.parse::<usize>() {
        if index > 0 && index <= menu_options.len() {
            return Some(menu_options[index - 1].to_string());
        }
    }

    let (best_match_index, _) = menu_options
        .iter()
        .enumerate()
        .map(|(index, option)| (index + 1, fuzz::ratio(&choice, &option.to_lowercase())))
        .max_by_key(|&(_, score)| score)
        .unwrap_or((0, 0));

    if best_match_index > 0 && best_match_index <= menu_options.len() {
        Some(menu_options[best_match_index - 1].to_string())
    } else {
        None
    }
}

pub fn determine_action_as_number(menu_options: &[&str], choice: &str) -> Option<usize> {
    let choice = choice.to_lowercase();

    if let Ok(index) = choice.parse::<usize>() {
        if index > 0 && index <= menu_options.len() {
            return Some(index);
        }
    }

    let (best_match_index, _) = menu_options
        .iter()
        .enumerate()
        .map(|(index, option)| (index + 1, fuzz::ratio(&choice, &option.to_lowercase())))
        .max_by_key(|&(_, score)| score)
        .unwrap_or((0, 0));

    if best_match_index > 0 && best_match_index <= menu_options.len() {
        Some(best_match_index)
    } else {
        None
    }
}
