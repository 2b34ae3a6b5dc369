//! Shared command-line interface logic, like printing help and parsing flags.
use std::path::PathBuf;

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Interactive { root: Option<PathBuf> },
    Export { root: Option<PathBuf> },
    Help,
}

/// Parses `args` (without the binary name).
pub fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut root = None;
    let mut export = false;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => return Ok(Invocation::Help),
            "-r" | "--root" => {
                let path = iter
                    .next()
                    .ok_or_else(|| format!("{} requires a path", arg))?;
                root = Some(PathBuf::from(path));
            }
            "export" => export = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(if export {
        Invocation::Export { root }
    } else {
        Invocation::Interactive { root }
    })
}

pub fn print_help(binary_name: &str) {
    println!(
        "Watodo v{} - A keyboard-driven to-do manager",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {}                      Start the interactive prompt", binary_name);
    println!("    {} export               Print stored tasks as JSON", binary_name);
    println!("    {} --help               Show this help message", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS (inside the prompt):");
    println!("    add DESCRIPTION [by/DATETIME] [from/DATETIME to/DATETIME] [#TAG]...");
    println!("    edit INDEX [DESCRIPTION] [by/..] [from/..] [to/..] [#TAG]...");
    println!("    delete INDEX");
    println!("    find KEYWORD [MORE_KEYWORDS]...");
    println!("    list | clear | undo | help | exit");
    println!();
    println!("DATES:");
    println!("    today, tonight, tomorrow, friday, next week, in 3 days, 2w");
    println!("    2025-01-16, 12/25/2025, 25 dec 2025, dec 25th");
    println!("    Times: 3pm, 3:30pm, 15:00, noon (e.g. by/tomorrow 3pm)");
    println!();
    println!("EXAMPLES:");
    println!("    add Submit report by/friday 5pm #work");
    println!("    add Team meeting from/tomorrow 2pm to/tomorrow 4pm #work");
    println!("    edit 2 #school #urgent");
    println!("    find school");
    println!();
    println!("EXPORT COMMAND:");
    println!("    {} export > backup.json           Save tasks to file", binary_name);
}
