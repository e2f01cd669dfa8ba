/*!
 * Help Texts
 */

/// Command words with their one-line summaries, in display order
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "Show this list, or details for one command"),
    ("info", "Show system information"),
    ("pwd", "Print the current folder path"),
    ("ls", "List the current folder"),
    ("cd", "Change the current folder"),
    ("mkdir", "Create folders"),
    ("rmdir", "Remove folders and everything inside them"),
    ("mk", "Create empty files"),
    ("rm", "Remove files"),
    ("vim", "Edit a file line by line"),
    ("jpkg", "Install, list and remove packages"),
    ("clear", "Clear the screen"),
    ("reboot", "Reload everything from storage"),
    ("shutdown", "Save and exit"),
];

pub fn overview() -> String {
    let width = COMMANDS.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut out = String::from("Available commands:\n");
    for (name, summary) in COMMANDS {
        out.push_str(&format!("  {name:<width$}  {summary}\n"));
    }
    out.push_str("Type help <command> for details\n");
    out
}

/// Usage text for one command
pub fn detail(command: &str) -> Option<&'static str> {
    let text = match command {
        "help" => "help [command]\nWithout arguments lists every command.",
        "info" => "info\nShows the OS version, user, host and storage location.",
        "pwd" => "pwd\nPrints the full path of the current folder, starting at root.",
        "ls" => "ls [-tree]\nLists folders (suffixed with /) then files.\n-tree prints every descendant, indented by depth.",
        "cd" => "cd <path>\nSubfolders are separated with /. ~ at the start means Home, .. means the parent folder.",
        "mkdir" => "mkdir <name> [name...]\nCreates each folder. Subfolders are separated with /.",
        "rmdir" => "rmdir <name> [name...]\nRemoves each folder with all of its contents.",
        "mk" => "mk <file> [file...]\nCreates each file empty. The type is the part after the last dot.",
        "rm" => "rm <file> [file...]\nRemoves each file. Use the full name, including its type.",
        "vim" => "vim <path/to/file>\nOpens the file, creating it if needed.\n\
                  :w# text  write line #\n\
                  :i# text  insert at position #\n\
                  :r#       remove line #\n\
                  :c#       clear line #\n\
                  :s        save\n\
                  :q        quit",
        "jpkg" => "jpkg install <name[@version]>\njpkg remove <name>\njpkg list",
        "clear" => "clear\nClears the screen.",
        "reboot" => "reboot\nSaves, then reloads the filesystem from storage.",
        "shutdown" => "shutdown\nSaves and exits the shell.",
        _ => return None,
    };
    Some(text)
}
