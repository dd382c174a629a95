pub mod clipboard;
pub mod note;

pub use clipboard::copy_to_clipboard;
pub use note::NoteWriter;

/// Print the transcript to the console between 80-character delimiter lines.
pub fn print_to_console(text: &str) {
    let delimiter = "=".repeat(80);
    println!("\n{}\n", delimiter);
    println!("{}", text);
    println!("\n{}", delimiter);
}
