//! Command table and verb handlers.
//!
//! One static slice of `Command` records; the dispatcher walks it
//! linearly and hands the token slice to the first match.

use super::args::{self, MAX_ARGS};
use super::history;
use crate::fs::{self, FsError, LIST_BUFFER_SIZE, MAX_FILESIZE};
use crate::strbuf::{CapacityExhausted, StrBuf};
use crate::{print, println, sys};
use core::fmt::Write;

pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub handler: fn(&[&str]),
}

pub static COMMANDS: &[Command] = &[
    Command { name: "help", description: "Display available commands", handler: cmd_help },
    Command { name: "echo", description: "Echo text to the console", handler: cmd_echo },
    Command { name: "clear", description: "Clear the screen", handler: cmd_clear },
    Command { name: "meminfo", description: "Display memory information", handler: cmd_meminfo },
    Command { name: "version", description: "Display OS version information", handler: cmd_version },
    Command { name: "uptime", description: "Show system uptime", handler: cmd_uptime },
    Command { name: "whoami", description: "Show current user", handler: cmd_whoami },
    Command { name: "uname", description: "Show system information", handler: cmd_uname },
    Command { name: "history", description: "Show command history", handler: cmd_history },
    Command { name: "ls", description: "List directory contents", handler: cmd_ls },
    Command { name: "pwd", description: "Print working directory", handler: cmd_pwd },
    Command { name: "cat", description: "Display file contents", handler: cmd_cat },
    Command { name: "save", description: "Save text to file (save filename text)", handler: cmd_save },
    Command { name: "append", description: "Append text to file", handler: cmd_append },
    Command { name: "rm", description: "Remove file", handler: cmd_rm },
    Command { name: "delete", description: "Remove file", handler: cmd_rm },
    Command { name: "touch", description: "Create empty file", handler: cmd_touch },
    Command { name: "cp", description: "Copy file", handler: cmd_cp },
    Command { name: "mv", description: "Move/rename file", handler: cmd_mv },
    Command { name: "find", description: "Find files by name", handler: cmd_find },
    Command { name: "grep", description: "Search text in files", handler: cmd_grep },
    Command { name: "wc", description: "Count lines, words, characters", handler: cmd_wc },
    Command { name: "head", description: "Show first lines of file", handler: cmd_head },
    Command { name: "tail", description: "Show last lines of file", handler: cmd_tail },
    Command { name: "stat", description: "Show file statistics", handler: cmd_stat },
    Command { name: "fileinfo", description: "Show file statistics", handler: cmd_stat },
    Command { name: "mkdir", description: "Create directory", handler: cmd_mkdir },
    Command { name: "reboot", description: "Reboot the system", handler: cmd_reboot },
    Command { name: "shutdown", description: "Power off the system", handler: cmd_exit },
    Command { name: "exit", description: "Exit the shell and power off", handler: cmd_exit },
];

/// Tokenizes `line` and runs the matching handler.
pub fn dispatch(line: &str) {
    let mut argv = [""; MAX_ARGS];
    let argc = args::split_args(line, &mut argv);
    if argc == 0 {
        return;
    }
    for command in COMMANDS {
        if command.name == argv[0] {
            (command.handler)(&argv[..argc]);
            return;
        }
    }
    println!("Unknown command: {}", argv[0]);
    println!("Type 'help' for a list of commands");
}

/// Lines of `text`, not counting a final empty piece after a trailing LF.
fn lines(text: &str) -> core::str::SplitTerminator<'_, char> {
    text.split_terminator('\n')
}

/// Joins words with single spaces, the inverse of tokenization.
fn join_words<const N: usize>(
    words: &[&str],
    out: &mut StrBuf<N>,
) -> Result<(), CapacityExhausted> {
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push(' ')?;
        }
        out.push_str(word)?;
    }
    Ok(())
}

/// Decimal prefix of `s`; stops at the first non-digit.
fn parse_count(s: &str) -> usize {
    s.bytes()
        .take_while(|b| b.is_ascii_digit())
        .fold(0usize, |n, b| n.saturating_mul(10) + (b - b'0') as usize)
}

/// Shared `-n N` parsing for head and tail. Returns (count, filename).
fn count_and_file<'a>(argv: &[&'a str]) -> Option<(usize, &'a str)> {
    if argv.len() >= 4 && argv[1] == "-n" {
        Some((parse_count(argv[2]), argv[3]))
    } else if argv.len() >= 2 && argv[1] != "-n" {
        Some((10, argv[1]))
    } else {
        None
    }
}

fn cmd_help(argv: &[&str]) {
    println!("CinderOS Shell - Available Commands:");
    println!("====================================");
    println!();
    for command in COMMANDS {
        println!("  {:<12} - {}", command.name, command.description);
    }
    println!();
    println!("File Management Examples:");
    println!("  save test.txt Hello World    - Save text to file");
    println!("  cat test.txt                 - Display file contents");
    println!("  append test.txt More text    - Append to file");
    println!("  rm test.txt                  - Delete file");
    println!("  cp test.txt backup.txt       - Copy file");
    println!("  ls                           - List all files");
    if argv.len() > 1 {
        let topic = argv[1];
        match COMMANDS.iter().find(|c| c.name == topic) {
            Some(command) => {
                println!();
                println!("{} - {}", command.name, command.description);
                if let Some(example) = usage_example(command.name) {
                    println!("  Example: {}", example);
                }
            }
            None => {
                println!();
                println!("No help topic for '{}'", topic);
            }
        }
    }
}

fn usage_example(name: &str) -> Option<&'static str> {
    match name {
        "cat" => Some("cat readme.txt"),
        "save" => Some("save notes.txt remember this"),
        "append" => Some("append notes.txt and this"),
        "rm" | "delete" => Some("rm notes.txt"),
        "touch" => Some("touch empty.txt"),
        "cp" => Some("cp notes.txt backup.txt"),
        "mv" => Some("mv old.txt new.txt"),
        "find" => Some("find .txt"),
        "grep" => Some("grep hello notes.txt"),
        "wc" => Some("wc notes.txt"),
        "head" => Some("head -n 5 notes.txt"),
        "tail" => Some("tail -n 5 notes.txt"),
        "stat" | "fileinfo" => Some("stat notes.txt"),
        "mkdir" => Some("mkdir projects"),
        "echo" => Some("echo hello world"),
        "uname" => Some("uname -a"),
        "help" => Some("help grep"),
        _ => None,
    }
}

fn cmd_echo(argv: &[&str]) {
    for (i, word) in argv[1..].iter().enumerate() {
        if i > 0 {
            print!(" ");
        }
        print!("{}", word);
    }
    println!();
}

fn cmd_clear(_argv: &[&str]) {
    print!("\x1b[2J\x1b[H");
    #[cfg(target_arch = "x86_64")]
    crate::vga_buffer::clear();
    println!("CinderOS Shell - Screen Cleared");
    println!("Type 'help' for available commands.");
}

fn cmd_meminfo(_argv: &[&str]) {
    println!("Memory Statistics:");
    println!("  Total RAM: 1024 MB");
    println!("  Available: 1000 MB");
    println!("  Used: 24 MB");
    println!("  Kernel: 16 MB");
    println!("  User: 8 MB");
    let info = fs::store().mem_info();
    println!();
    println!("File System Memory:");
    println!("  Total Files: {}", info.files);
    println!("  Memory Used: {} bytes", info.used);
    println!("  Memory Available: {} bytes", info.available);
}

fn cmd_version(_argv: &[&str]) {
    println!("CinderOS v{}", sys::VERSION);
    println!("A small self-contained teaching kernel");
    println!();
    println!("Features:");
    println!("- In-RAM flat file store");
    println!("- Shell with command history");
    println!("- VGA text output (x86_64)");
    println!("- Multi-architecture support (x86_64, aarch64, riscv64)");
    println!();
    println!("Architecture: {}", sys::ARCH);
}

fn cmd_uptime(_argv: &[&str]) {
    println!("System uptime: no timer configured");
}

fn cmd_whoami(_argv: &[&str]) {
    println!("root");
}

fn cmd_uname(argv: &[&str]) {
    if argv.len() > 1 && argv[1] == "-a" {
        println!("CinderOS {} #1 {}", sys::VERSION, sys::ARCH);
    } else {
        println!("CinderOS {} #1", sys::VERSION);
    }
}

fn cmd_history(_argv: &[&str]) {
    println!("Command History:");
    history::with(|history| {
        if history.is_empty() {
            println!("No commands in history");
            return;
        }
        for (i, line) in history.iter().enumerate() {
            println!("{:>3}  {}", i + 1, line);
        }
    });
}

fn cmd_ls(_argv: &[&str]) {
    let mut listing = StrBuf::<LIST_BUFFER_SIZE>::new();
    match fs::store().list(&mut listing) {
        Ok(_) => print!("{}", listing),
        Err(_) => println!("Error listing files"),
    }
}

fn cmd_pwd(_argv: &[&str]) {
    println!("Current directory: {}", fs::store().cwd());
}

fn cmd_cat(argv: &[&str]) {
    if argv.len() < 2 {
        println!("Usage: cat <filename>");
        return;
    }
    let store = fs::store();
    match store.content(argv[1]) {
        Ok(text) => {
            print!("{}", text);
            if !text.is_empty() && !text.ends_with('\n') {
                println!();
            }
        }
        Err(_) => println!("File '{}' not found or error reading file", argv[1]),
    }
}

fn cmd_save(argv: &[&str]) {
    if argv.len() < 3 {
        println!("Usage: save <filename> <content>");
        return;
    }
    let name = argv[1];
    let mut content = StrBuf::<MAX_FILESIZE>::new();
    let result = match join_words(&argv[2..], &mut content) {
        Ok(()) => fs::store().save(name, content.as_str()),
        Err(CapacityExhausted) => Err(FsError::CapacityExhausted),
    };
    match result {
        Ok(()) => println!("Content saved to '{}' successfully", name),
        Err(e) => println!("Failed to save content to '{}' (code: {})", name, e.code()),
    }
}

fn cmd_append(argv: &[&str]) {
    if argv.len() < 3 {
        println!("Usage: append <filename> <content>");
        return;
    }
    let name = argv[1];
    let mut content = StrBuf::<MAX_FILESIZE>::new();
    let result = match join_words(&argv[2..], &mut content) {
        Ok(()) => fs::store().append(name, content.as_str()),
        Err(CapacityExhausted) => Err(FsError::CapacityExhausted),
    };
    match result {
        Ok(()) => println!("Content appended to '{}' successfully", name),
        Err(e) => println!("Failed to append content to '{}' (code: {})", name, e.code()),
    }
}

fn cmd_rm(argv: &[&str]) {
    if argv.len() < 2 {
        println!("Usage: rm <filename>");
        return;
    }
    match fs::store().delete(argv[1]) {
        Ok(()) => println!("File '{}' deleted successfully", argv[1]),
        Err(_) => println!("Failed to delete file '{}' (file not found)", argv[1]),
    }
}

fn cmd_touch(argv: &[&str]) {
    if argv.len() < 2 {
        println!("Usage: touch <filename>");
        return;
    }
    let name = argv[1];
    let mut store = fs::store();
    if store.exists(name) {
        println!("File '{}' already exists", name);
        return;
    }
    match store.save(name, "") {
        Ok(()) => println!("Empty file '{}' created successfully", name),
        Err(e) => println!("Failed to create file '{}' (code: {})", name, e.code()),
    }
}

fn cmd_cp(argv: &[&str]) {
    if argv.len() < 3 {
        println!("Usage: cp <source> <destination>");
        return;
    }
    let (src, dst) = (argv[1], argv[2]);
    let mut copy = StrBuf::<MAX_FILESIZE>::new();
    {
        let store = fs::store();
        match store.content(src) {
            Ok(text) => {
                let _ = copy.push_str(text);
            }
            Err(_) => {
                println!("Source file '{}' not found", src);
                return;
            }
        }
    }
    match fs::store().save(dst, copy.as_str()) {
        Ok(()) => println!("File copied from '{}' to '{}' successfully", src, dst),
        Err(_) => println!("Failed to copy file to '{}'", dst),
    }
}

fn cmd_mv(argv: &[&str]) {
    if argv.len() < 3 {
        println!("Usage: mv <source> <destination>");
        return;
    }
    let (src, dst) = (argv[1], argv[2]);
    let mut copy = StrBuf::<MAX_FILESIZE>::new();
    {
        let store = fs::store();
        match store.content(src) {
            Ok(text) => {
                let _ = copy.push_str(text);
            }
            Err(_) => {
                println!("Source file '{}' not found", src);
                return;
            }
        }
    }
    let mut store = fs::store();
    match store.save(dst, copy.as_str()) {
        Ok(()) => {
            // Source only disappears once the destination is in place.
            let _ = store.delete(src);
            println!("File moved from '{}' to '{}' successfully", src, dst);
        }
        Err(_) => println!("Failed to move file to '{}'", dst),
    }
}

fn cmd_find(argv: &[&str]) {
    if argv.len() < 2 {
        println!("Usage: find <pattern>");
        println!("Example: find test (finds files containing 'test')");
        return;
    }
    let pattern = argv[1];
    let store = fs::store();
    println!("Files matching '{}':", pattern);
    let mut found = false;
    for entry in store.entries() {
        if entry.name().contains(pattern) {
            println!("  {}", entry.name());
            found = true;
        }
    }
    if !found {
        println!("No files found matching '{}'", pattern);
    }
}

fn cmd_grep(argv: &[&str]) {
    if argv.len() < 3 {
        println!("Usage: grep <pattern> <filename>");
        println!("Example: grep hello test.txt");
        return;
    }
    let (pattern, name) = (argv[1], argv[2]);
    let store = fs::store();
    match store.content(name) {
        Ok(text) => {
            let mut found = false;
            for (number, line) in lines(text).enumerate() {
                if line.contains(pattern) {
                    println!("{}: {}", number + 1, line);
                    found = true;
                }
            }
            if !found {
                println!("Pattern not found in file");
            }
        }
        Err(_) => println!("File '{}' not found", name),
    }
}

fn cmd_wc(argv: &[&str]) {
    if argv.len() < 2 {
        println!("Usage: wc <filename>");
        return;
    }
    let name = argv[1];
    let store = fs::store();
    match store.content(name) {
        Ok(text) => {
            let line_count = lines(text).count();
            let word_count = text.split_ascii_whitespace().count();
            println!("  {}  {}  {} {}", line_count, word_count, text.len(), name);
        }
        Err(_) => println!("File '{}' not found", name),
    }
}

fn cmd_head(argv: &[&str]) {
    let Some((count, name)) = count_and_file(argv) else {
        println!("Usage: head [-n lines] <filename>");
        return;
    };
    let store = fs::store();
    match store.content(name) {
        Ok(text) => {
            for line in lines(text).take(count) {
                println!("{}", line);
            }
        }
        Err(_) => println!("File '{}' not found", name),
    }
}

fn cmd_tail(argv: &[&str]) {
    let Some((count, name)) = count_and_file(argv) else {
        println!("Usage: tail [-n lines] <filename>");
        return;
    };
    let store = fs::store();
    match store.content(name) {
        Ok(text) => {
            let total = lines(text).count();
            for line in lines(text).skip(total.saturating_sub(count)) {
                println!("{}", line);
            }
        }
        Err(_) => println!("File '{}' not found", name),
    }
}

fn cmd_stat(argv: &[&str]) {
    if argv.len() < 2 {
        println!("Usage: stat <filename>");
        return;
    }
    let name = argv[1];
    let store = fs::store();
    match store.content(name) {
        Ok(text) => {
            println!("File: {}", name);
            println!("Size: {} bytes", text.len());
            println!("Lines: {}", lines(text).count());
            println!("Type: Regular file");
            println!("Permissions: rw-r--r--");
        }
        Err(_) => println!("File '{}' not found", name),
    }
}

fn cmd_mkdir(argv: &[&str]) {
    if argv.len() < 2 {
        println!("Usage: mkdir <directory>");
        return;
    }
    let dir = argv[1];
    println!("Directory creation not yet implemented in filesystem");
    println!("Creating placeholder file: {}.dir", dir);
    let mut marker_name = StrBuf::<64>::new();
    let mut marker_content = StrBuf::<128>::new();
    let formatted = write!(marker_name, "{}.dir", dir).is_ok()
        && write!(
            marker_content,
            "Directory placeholder for: {}\nCreated by mkdir command\n",
            dir
        )
        .is_ok();
    if !formatted {
        println!("Failed to create placeholder for '{}'", dir);
        return;
    }
    if let Err(e) = fs::store().save(marker_name.as_str(), marker_content.as_str()) {
        println!(
            "Failed to create placeholder for '{}' (code: {})",
            dir,
            e.code()
        );
    }
}

fn cmd_reboot(_argv: &[&str]) {
    println!("Rebooting...");
    sys::reboot();
}

fn cmd_exit(_argv: &[&str]) {
    println!("Shutting down CinderOS...");
    println!("Thank you for using CinderOS!");
    sys::power_off();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_case]
    fn lines_counts_unterminated_tail() {
        assert_eq!(lines("").count(), 0);
        assert_eq!(lines("one").count(), 1);
        assert_eq!(lines("one\n").count(), 1);
        assert_eq!(lines("one\ntwo").count(), 2);
        assert_eq!(lines("one\n\ntwo\n").count(), 3);
    }

    #[test_case]
    fn parse_count_takes_decimal_prefix() {
        assert_eq!(parse_count("5"), 5);
        assert_eq!(parse_count("12x"), 12);
        assert_eq!(parse_count("x"), 0);
        assert_eq!(parse_count(""), 0);
    }

    #[test_case]
    fn count_and_file_defaults_to_ten() {
        assert_eq!(count_and_file(&["head", "a.txt"]), Some((10, "a.txt")));
        assert_eq!(
            count_and_file(&["head", "-n", "3", "a.txt"]),
            Some((3, "a.txt"))
        );
        assert_eq!(count_and_file(&["head"]), None);
        assert_eq!(count_and_file(&["head", "-n"]), None);
    }

    #[test_case]
    fn join_words_restores_single_spacing() {
        let mut buf = StrBuf::<32>::new();
        assert!(join_words(&["one", "two", "three"], &mut buf).is_ok());
        assert_eq!(buf.as_str(), "one two three");
    }

    #[test_case]
    fn every_command_name_is_unique() {
        for (i, a) in COMMANDS.iter().enumerate() {
            for b in &COMMANDS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
