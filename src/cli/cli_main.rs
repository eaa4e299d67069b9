use super::cli_runner::{run_funnel, run_oscillator, run_population};
use crate::settings::DemoConfig;
use log::error;
use std::io::{self, Write};
use std::path::PathBuf;

pub fn run_interactive_menu(config: &DemoConfig) {
    loop {
        show_main_menu();
        let Some(choice) = get_user_input() else {
            break;
        };

        let result = match choice.trim() {
            "1" => oscillator_dialog(config),
            "2" => population_dialog(config),
            "3" => funnel_dialog(config),
            "4" => {
                config.pretty_print();
                Ok(())
            }
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => {
                println!("Invalid choice. Please try again.");
                Ok(())
            }
        };
        if let Err(e) = result {
            error!("{}", e);
            println!("\x1b[31mError: {}\x1b[0m", e);
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Red (\x1b[31m) - errors
*/
fn show_main_menu() {
    println!("\x1b[34m\n Physics demonstrations: numerical integration and plotting \n\x1b[0m");
    println!("\x1b[33m1. Harmonic oscillator\x1b[0m");
    println!("\x1b[33m2. World population plot\x1b[0m");
    println!("\x1b[33m3. Funnel drainage animation\x1b[0m");
    println!("\x1b[33m4. Show configuration\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    let _ = io::stdout().flush();
}

/// `None` once stdin is closed.
fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}

fn ask_path(prompt: &str, default: Option<&str>) -> Option<PathBuf> {
    match default {
        Some(d) => print!("\x1b[36m{} [{}]: \x1b[0m", prompt, d),
        None => print!("\x1b[36m{}: \x1b[0m", prompt),
    }
    let _ = io::stdout().flush();
    let input = get_user_input()?;
    let input = input.trim();
    if input.is_empty() {
        default.map(PathBuf::from)
    } else {
        Some(PathBuf::from(input))
    }
}

fn ask_yes_no(prompt: &str) -> bool {
    print!("\x1b[36m{} [y/N]: \x1b[0m", prompt);
    let _ = io::stdout().flush();
    get_user_input()
        .map(|s| matches!(s.trim().to_lowercase().as_str(), "y" | "yes"))
        .unwrap_or(false)
}

fn oscillator_dialog(config: &DemoConfig) -> Result<(), crate::error::DemoError> {
    let Some(output) = ask_path("Output picture", Some("harmonic_oscillator.png")) else {
        return Ok(());
    };
    let open = ask_yes_no("Open the picture afterwards?");
    println!("Solving...");
    run_oscillator(&config.oscillator, &output, None, open)?;
    println!("Plot written to {}", output.display());
    Ok(())
}

fn population_dialog(config: &DemoConfig) -> Result<(), crate::error::DemoError> {
    let Some(input) = ask_path("Input CSV", Some("data/worlddata.csv")) else {
        return Ok(());
    };
    let Some(output) = ask_path("Output picture", Some("world_population.png")) else {
        return Ok(());
    };
    let open = ask_yes_no("Open the picture afterwards?");
    run_population(&config.population, &input, &output, open)?;
    println!("Plot written to {}", output.display());
    Ok(())
}

fn funnel_dialog(config: &DemoConfig) -> Result<(), crate::error::DemoError> {
    let Some(movie) = ask_path("Output animation", Some("funnels.gif")) else {
        return Ok(());
    };
    let open = ask_yes_no("Open the animation afterwards?");
    println!("Rendering, this takes a while...");
    run_funnel(&config.funnel, &movie, None, open)?;
    println!("Animation written to {}", movie.display());
    Ok(())
}
