use std::{env, env::VarError};

/// There's no real CLI for the server, so just do quick 'n dirty
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // The verification key is public, but it spans several lines, so only the file path is shown.
    const DISPLAY_ENVS: [&str; 8] = [
        "RUST_LOG",
        "GBK_HOST",
        "GBK_PORT",
        "GBK_DATABASE_URL",
        "GBK_AUTO_MIGRATE",
        "GBK_JWT_VERIFICATION_KEY_FILE",
        "GBK_JWT_ISSUER",
        "GBK_CORS_ORIGINS",
    ];

    println!("Current environment values:");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    });
    let key_set = env::var("GBK_JWT_VERIFICATION_KEY").is_ok();
    println!("  {:<35} {:<15}", "GBK_JWT_VERIFICATION_KEY", if key_set { "Set" } else { "Not set" });
}
