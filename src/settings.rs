// settings.rs
use serde::{Deserialize, Serialize};
use serde_json;
use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::user_experience::{handle_back_flag, handle_cancel_flag, handle_quit_flag};
use crate::user_interaction::{
    determine_action_as_number, get_edited_user_json_input, get_user_input, get_user_input_level_2,
    print_insight, print_insight_level_2, print_list, print_list_level_2,
};

/// A saved source/reference column pairing, so recurring comparisons
/// (e.g. 'Variant Barcode' vs 'UPC') are one pick instead of two prompts.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ColumnPreset {
    pub name: String,
    pub source_column: String,
    pub reference_column: String,
}

#[derive(Serialize, Deserialize)]
pub struct ColumnConfig {
    pub column_presets: Vec<ColumnPreset>,
}

pub fn code_db_path() -> PathBuf {
    let home_dir = match env::var("HOME") {
        Ok(home) => home,
        Err(_) => match env::var("USERPROFILE") {
            Ok(userprofile) => userprofile,
            Err(_) => {
                eprintln!("Unable to determine user home directory.");
                std::process::exit(1);
            }
        },
    };

    Path::new(&home_dir).join("Desktop").join("code_db")
}

pub fn manage_column_config_file<F: FnOnce(&mut ColumnConfig) -> Result<(), Box<dyn Error>>>(
    op: F,
) -> Result<(), Box<dyn Error>> {
    let mut path = code_db_path();

    if !path.exists() {
        println!("Path does not exist, creating directory.");
        fs::create_dir_all(&path)?;
    }
    path.push("column_config.json");

    let mut config = if path.exists() {
        let contents = fs::read_to_string(&path)?;
        if contents.is_empty() {
            ColumnConfig {
                column_presets: vec![],
            }
        } else {
            serde_json::from_str(&contents)?
        }
    } else {
        ColumnConfig {
            column_presets: vec![],
        }
    };

    op(&mut config)?;

    let serialized = serde_json::to_string(&config)?;

    fs::write(path, serialized)?;

    Ok(())
}

pub fn open_settings() -> Result<(), Box<dyn std::error::Error>> {
    loop {
        print_insight("Column presets: name the pairs you compare all the time.");
        let menu_options = vec![
            "add column preset",
            "update column preset",
            "delete column preset",
            "view column presets",
        ];
        print_list(&menu_options);
        let choice = get_user_input("Enter your choice: ").to_lowercase();

        if handle_back_flag(&choice) {
            break;
        }
        handle_quit_flag(&choice);

        let selected_option = determine_action_as_number(&menu_options, &choice);

        match selected_option {
            Some(1) => {
                add_column_preset()?;
                continue;
            }
            Some(2) => {
                update_column_preset()?;
                continue;
            }
            Some(3) => {
                delete_column_preset()?;
                continue;
            }
            Some(4) => {
                view_column_presets()?;
                continue;
            }
            _ => {
                println!("Invalid option. Please enter a number from 1 to 4.");
                continue;
            }
        }
    }

    Ok(())
}

fn add_column_preset() -> Result<(), Box<dyn std::error::Error>> {
    let empty_preset = ColumnPreset {
        name: String::new(),
        source_column: String::new(),
        reference_column: String::new(),
    };

    let preset_json = serde_json::to_string_pretty(&empty_preset)?;

    let edited_json = get_edited_user_json_input(preset_json);

    if handle_cancel_flag(&edited_json) {
        return Ok(());
    }

    let new_preset: ColumnPreset = serde_json::from_str(&edited_json)?;

    manage_column_config_file(|config| {
        config.column_presets.push(new_preset);
        Ok(())
    })
}

fn update_column_preset() -> Result<(), Box<dyn Error>> {
    view_column_presets()?;
    let input = get_user_input("Enter the name or the number of the preset to update: ");

    manage_column_config_file(|config| {
        let maybe_preset = if let Ok(index) = input.parse::<usize>() {
            if index == 0 {
                None
            } else {
                config.column_presets.get_mut(index - 1)
            }
        } else {
            config.column_presets.iter_mut().find(|p| p.name == input)
        };

        if let Some(preset) = maybe_preset {
            let preset_json = serde_json::to_string_pretty(&preset)?;

            let edited_json = get_edited_user_json_input(preset_json);

            if handle_cancel_flag(&edited_json) {
                return Ok(());
            }

            *preset = serde_json::from_str(&edited_json)?;
        } else {
            print_insight("Preset not found.");
        }
        Ok(())
    })
}

fn delete_column_preset() -> Result<(), Box<dyn std::error::Error>> {
    view_column_presets()?;
    let input = get_user_input_level_2("Enter the name or the number of the preset to delete: ");

    if handle_cancel_flag(&input) {
        return Ok(());
    }

    manage_column_config_file(|config| {
        if let Ok(index) = input.parse::<usize>() {
            if index == 0 || index > config.column_presets.len() {
                print_insight("Invalid index.");
            } else {
                config.column_presets.remove(index - 1);
            }
        } else {
            config.column_presets.retain(|preset| preset.name != input);
        }
        Ok(())
    })
}

pub fn view_column_presets() -> Result<(), Box<dyn std::error::Error>> {
    manage_column_config_file(|config| {
        println!();
        let mut formatted_presets = Vec::new();

        for preset in config.column_presets.iter() {
            let formatted_preset = format!(
                "{}  (source: \"{}\", reference: \"{}\")",
                preset.name, preset.source_column, preset.reference_column
            );
            formatted_presets.push(formatted_preset);
        }

        if formatted_presets.is_empty() {
            print_insight_level_2("No presets yet.");
        } else {
            let formatted_presets_slices: Vec<&str> =
                formatted_presets.iter().map(AsRef::as_ref).collect();
            print_list_level_2(&formatted_presets_slices);
        }

        println!();
        Ok(())
    })
}

/// Plain read of the saved presets, for menus that only need to offer them.
/// Read-only on purpose: just browsing the menus must not create code_db or
/// rewrite the config file.
pub fn load_column_presets() -> Vec<ColumnPreset> {
    read_presets_from(&code_db_path().join("column_config.json"))
}

fn read_presets_from(path: &Path) -> Vec<ColumnPreset> {
    if !path.exists() {
        return Vec::new();
    }

    fs::read_to_string(path)
        .ok()
        .filter(|contents| !contents.is_empty())
        .and_then(|contents| serde_json::from_str::<ColumnConfig>(&contents).ok())
        .map(|config| config.column_presets)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::TempDir;

    use super::read_presets_from;

    #[test]
    fn missing_config_reads_as_no_presets_without_touching_disk() {
        let dir = TempDir::new().expect("tempdir should create");
        let config_path = dir.path().join("code_db").join("column_config.json");

        let presets = read_presets_from(&config_path);
        assert!(presets.is_empty());
        assert!(!config_path.exists());
        assert!(!dir.path().join("code_db").exists());
    }

    #[test]
    fn saved_presets_read_back() {
        let dir = TempDir::new().expect("tempdir should create");
        let config_path = dir.path().join("column_config.json");
        fs::write(
            &config_path,
            r#"{"column_presets":[{"name":"shopify vs erp","source_column":"Variant Barcode","reference_column":"UPC"}]}"#,
        )
        .expect("test config should write");

        let presets = read_presets_from(&config_path);
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].name, "shopify vs erp");
        assert_eq!(presets[0].source_column, "Variant Barcode");
        assert_eq!(presets[0].reference_column, "UPC");
    }

    #[test]
    fn garbage_config_reads_as_no_presets() {
        let dir = TempDir::new().expect("tempdir should create");
        let config_path = dir.path().join("column_config.json");
        fs::write(&config_path, "not json at all").expect("test config should write");

        let presets = read_presets_from(&config_path);
        assert!(presets.is_empty());
    }
}
