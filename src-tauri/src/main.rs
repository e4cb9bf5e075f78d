// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        if command == "action" {
            let Some(action) = args.next() else {
                eprintln!("Usage: headset action <play-pause|play-next|play-previous|like>");
                std::process::exit(2);
            };
            if headset_lib::command::PlayerCommand::parse(&action).is_none() {
                eprintln!("Unknown action: {action}");
                std::process::exit(2);
            }

            match headset_lib::send_action_to_running_instance(&action) {
                Ok(()) => return,
                Err(_) => {
                    std::env::set_var(headset_lib::START_ACTION_ENV, action);
                }
            }
        }
    }

    headset_lib::run()
}
