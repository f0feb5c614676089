//! Interactive command loop.
//!
//! Reads one command per line from stdin and drives the session controller.
//! Every failure is reported and the loop continues; the session never
//! terminates on its own.

use crate::classify::ClassifyImage;
use crate::error::{Error, Result};
use crate::notify::SendAlert;
use crate::session::SessionController;
use crate::session::state::UiState;
use std::io::{BufRead, Write};
use std::path::Path;

/// Whether the loop should keep running after a command.
enum LoopAction {
    Continue,
    Quit,
}

/// Run the interactive session until `quit` or end of input.
pub fn run<C: ClassifyImage, N: SendAlert>(controller: &mut SessionController<C, N>) -> Result<()> {
    println!("Wildlife detection. Type 'help' for commands.");

    let stdin = std::io::stdin();
    let mut stdin = stdin.lock();
    loop {
        print_prompt(controller);

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // End of input behaves like quit
            println!();
            return Ok(());
        }

        match dispatch(controller, line.trim(), &mut stdin) {
            Ok(LoopAction::Continue) => {}
            Ok(LoopAction::Quit) => return Ok(()),
            // Single failures are reported inline; the session stays usable.
            Err(e) => println!("error: {e}"),
        }
    }
}

fn print_prompt<C: ClassifyImage, N: SendAlert>(controller: &SessionController<C, N>) {
    match controller.session().username() {
        Some(user) => print!("wildwatch ({user})> "),
        None => print!("wildwatch> "),
    }
    let _ = std::io::stdout().flush();
}

fn dispatch<C: ClassifyImage, N: SendAlert>(
    controller: &mut SessionController<C, N>,
    line: &str,
    input: &mut impl BufRead,
) -> Result<LoopAction> {
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "help" => print_help(controller.ui_state()),
        "quit" | "exit" => return Ok(LoopAction::Quit),
        "home" => {
            controller.go_home()?;
            println!("Welcome to the wildlife detection app. Choose 'signup' or 'login'.");
        }
        "signup" => {
            controller.show_signup()?;
            let username = prompt_line(input, "Username: ")?;
            let password = prompt_line(input, "Password: ")?;
            controller.signup(&username, &password)?;
            println!("Account created successfully! You can now 'login'.");
        }
        "login" => {
            controller.show_login()?;
            let username = prompt_line(input, "Username: ")?;
            let password = prompt_line(input, "Password: ")?;
            if controller.login(&username, &password)? {
                println!("Login successful! Use 'detect <image>' to classify an image.");
            } else {
                // Generic message; does not reveal whether the username exists.
                // The form stays open for another attempt.
                println!("Invalid credentials!");
            }
        }
        "detect" => {
            if argument.is_empty() {
                println!("usage: detect <image.jpg|image.png>");
            } else {
                let prediction = controller.classify_file(Path::new(argument))?;
                println!("Detected: {}", prediction.species);
            }
        }
        "alert" => {
            if argument.is_empty() {
                println!("usage: alert <email-address>");
            } else {
                controller.send_alert(argument)?;
                println!("Email alert sent successfully!");
            }
        }
        "status" => print_status(controller),
        "logout" => {
            controller.logout();
            println!("You have logged out.");
        }
        other => println!("unknown command '{other}'; type 'help' for commands"),
    }

    Ok(LoopAction::Continue)
}

fn prompt_line(input: &mut impl BufRead, label: &str) -> Result<String> {
    print!("{label}");
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::SessionState {
            message: "input ended mid-form".to_string(),
        });
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_status<C: ClassifyImage, N: SendAlert>(controller: &SessionController<C, N>) {
    let session = controller.session();
    match session.username() {
        Some(user) => println!("Logged in as {user}."),
        None => println!("Not logged in."),
    }
    match session.last_prediction() {
        Some(prediction) => println!("Last detection: {}", prediction.species),
        None => println!("No detection yet."),
    }
}

fn print_help(state: UiState) {
    println!("Commands:");
    match state {
        UiState::AnonymousHome | UiState::SignupForm | UiState::LoginForm => {
            println!("  signup           create an account");
            println!("  login            log in");
            println!("  home             back to the home screen");
        }
        UiState::AuthenticatedIdle | UiState::AuthenticatedWithPrediction => {
            println!("  detect <image>   classify a JPEG or PNG image");
            println!("  alert <email>    email the last detection result");
            println!("  status           show session state");
            println!("  logout           log out");
        }
    }
    println!("  help             show this help");
    println!("  quit             exit");
}
