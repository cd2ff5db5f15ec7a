/// Measurement prefab and profile authoring entry point
use measure_overlay::authoring::prefabs::{
    add_measurement_tool, create_angle_marker, create_point_marker, create_readout_panel,
};
use measure_overlay::authoring::wiring::{
    inspect, load_or_default_profile, load_profile, reset_settings, save_profile, wire_defaults,
    wire_prefab_checked, wired_fields,
};
use measure_overlay::engine::assets::profile::key_label;
use constants::asset_paths::PROFILE_PATH;
use std::env;
use std::path::PathBuf;

const DEFAULT_ROOT: &str = "assets";

fn usage(program: &str) {
    eprintln!("Usage: {} [--root <assets dir>] <command> [args]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  create-point-marker          write the point marker prefab");
    eprintln!("  create-angle-marker          write the angle marker prefab");
    eprintln!("  create-ui                    write the readout panel prefab");
    eprintln!("  add-tool                     write missing prefabs and a wired profile");
    eprintln!("  wire <field> <prefab path>   wire a prefab into a profile field");
    eprintln!("  wire-defaults                wire prefabs found at their default paths");
    eprintln!("  reset-settings               restore default tool settings");
    eprintln!("  inspect                      list profile settings and wiring");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);

    let mut root = PathBuf::from(DEFAULT_ROOT);
    if let Some(i) = args.iter().position(|arg| arg == "--root") {
        if i + 1 >= args.len() {
            usage(&program);
            std::process::exit(1);
        }
        root = PathBuf::from(args.remove(i + 1));
        args.remove(i);
    }

    let Some(command) = args.first().cloned() else {
        usage(&program);
        std::process::exit(1);
    };
    let profile_path = root.join(PROFILE_PATH);

    match (command.as_str(), &args[1..]) {
        ("create-point-marker", []) => {
            println!("Created point marker prefab at {}", create_point_marker(&root)?.display());
        }
        ("create-angle-marker", []) => {
            println!("Created angle marker prefab at {}", create_angle_marker(&root)?.display());
        }
        ("create-ui", []) => {
            println!("Created readout panel prefab at {}", create_readout_panel(&root)?.display());
        }
        ("add-tool", []) => {
            let profile = add_measurement_tool(&root)?;
            println!("Created profile at {}", profile_path.display());
            println!(
                "Press '{}' in the app to toggle the measurement tool.",
                key_label(profile.settings.toggle_key)
            );
        }
        ("wire", [field, prefab_path]) => {
            let mut profile = load_or_default_profile(&profile_path)?;
            wire_prefab_checked(&root, &mut profile, field, prefab_path)?;
            save_profile(&profile_path, &profile)?;
            println!("Wired {} into `{}`", prefab_path, field);
        }
        ("wire-defaults", []) => {
            let mut profile = load_or_default_profile(&profile_path)?;
            let wired = wire_defaults(&root, &mut profile)?;
            if wired.is_empty() {
                println!("No prefabs found at their default paths under {}", root.display());
            } else {
                save_profile(&profile_path, &profile)?;
                for slot in wired {
                    println!("Wired {} into `{}`", slot.default_path(), slot.profile_field());
                }
            }
        }
        ("reset-settings", []) => {
            let mut profile = load_or_default_profile(&profile_path)?;
            reset_settings(&mut profile);
            save_profile(&profile_path, &profile)?;
            println!("Reset settings in {}", profile_path.display());
        }
        ("inspect", []) => {
            let profile = load_profile(&profile_path)?;
            println!("{}", profile_path.display());
            println!("settings:");
            for (name, value) in inspect(&profile) {
                println!("  {:<26} {}", name, value);
            }
            println!("prefabs:");
            for (field, path) in wired_fields(&profile) {
                println!("  {:<26} {}", field, path.as_deref().unwrap_or("(built-in)"));
            }
        }
        _ => {
            usage(&program);
            std::process::exit(1);
        }
    }

    Ok(())
}
