use std::io::{self, BufRead, Write};

/// Interactive line prompt over a reader/writer pair.
///
/// Production code wraps locked stdin/stdout; tests drive it with in-memory
/// buffers instead of a terminal.
#[derive(Debug)]
pub struct Prompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Write one line of output and flush.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()
    }

    pub fn say_blank(&mut self) -> io::Result<()> {
        self.say("")
    }

    /// Display `prompt` (no trailing newline) and read one trimmed line.
    /// A closed reader surfaces as `ErrorKind::UnexpectedEof`.
    pub fn ask_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(line.trim().to_string())
    }

    /// Repeatedly prompt until the entered text is a valid integer that falls
    /// within the optional `[min, max]` bounds (inclusive). Bad input never
    /// escapes this loop; only a closed reader does.
    pub fn ask_int(
        &mut self,
        prompt: &str,
        min: Option<i64>,
        max: Option<i64>,
    ) -> io::Result<i64> {
        loop {
            let val = self.ask_line(prompt)?;
            if val.is_empty() {
                self.say("Please enter a value.")?;
                continue;
            }
            let n = match parse_integer(&val) {
                Some(n) => n,
                None => {
                    self.say("That's not an integer. Try again.")?;
                    continue;
                }
            };
            let below = min.is_some_and(|m| n < m);
            let above = max.is_some_and(|m| n > m);
            if below || above {
                match (min, max) {
                    (Some(lo), Some(hi)) => {
                        self.say(&format!("Enter an integer between {} and {}.", lo, hi))?;
                    }
                    _ => self.say("Enter an integer.")?,
                }
                continue;
            }
            return Ok(n);
        }
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Optional leading minus, otherwise all ASCII digits. Stricter than
/// `str::parse`, which also accepts a leading `+`.
fn parse_integer(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
